//! Correlation Matrix
//!
//! Pearson correlation coefficients between every pair of columns of a
//! table, computed over the dates where both columns are observed.

use serde::Serialize;

use crate::series::{Column, SeriesTable};

/// Fewer aligned points than this yield a coefficient of 0
pub const MIN_ALIGNED_POINTS: usize = 2;

/// Square matrix of pairwise coefficients, in column order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    pub columns: Vec<String>,
    /// `coefficients[i][j]` correlates `columns[i]` with `columns[j]`
    pub coefficients: Vec<Vec<f64>>,
    /// Number of dates both columns observe
    pub sample_sizes: Vec<Vec<usize>>,
}

/// A correlation between two series
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Correlation {
    pub series_a: String,
    pub series_b: String,
    /// Pearson correlation coefficient (-1 to 1)
    pub coefficient: f64,
    /// Human-readable strength: "strong", "moderate", "weak", "negligible"
    pub strength: String,
    /// Direction: "positive" or "negative"
    pub direction: String,
    /// Number of aligned observations used
    pub sample_size: usize,
}

impl CorrelationMatrix {
    /// Coefficient between two named columns
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.columns.iter().position(|c| c == a)?;
        let j = self.columns.iter().position(|c| c == b)?;
        Some(self.coefficients[i][j])
    }

    /// Pairs with `|r| > min_abs`, strongest first
    pub fn strongest_pairs(&self, min_abs: f64) -> Vec<Correlation> {
        let mut pairs = Vec::new();

        for i in 0..self.columns.len() {
            for j in (i + 1)..self.columns.len() {
                let r = self.coefficients[i][j];
                if r.abs() > min_abs && !r.is_nan() {
                    pairs.push(Correlation {
                        series_a: self.columns[i].clone(),
                        series_b: self.columns[j].clone(),
                        coefficient: r,
                        strength: correlation_strength(r),
                        direction: if r > 0.0 {
                            "positive".to_string()
                        } else {
                            "negative".to_string()
                        },
                        sample_size: self.sample_sizes[i][j],
                    });
                }
            }
        }

        // Sort by absolute correlation strength (strongest first)
        pairs.sort_by(|a, b| {
            b.coefficient
                .abs()
                .partial_cmp(&a.coefficient.abs())
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        pairs
    }
}

/// Pairwise Pearson correlations between all columns of `table`
pub fn correlation_matrix(table: &SeriesTable) -> CorrelationMatrix {
    let columns = table.columns();
    let n = columns.len();
    let mut coefficients = vec![vec![0.0; n]; n];
    let mut sample_sizes = vec![vec![0; n]; n];

    for i in 0..n {
        let observed = columns[i].observed_count();
        sample_sizes[i][i] = observed;
        coefficients[i][i] = if observed > 0 { 1.0 } else { 0.0 };

        for j in (i + 1)..n {
            let (a, b) = align(&columns[i], &columns[j]);
            let r = if a.len() < MIN_ALIGNED_POINTS {
                0.0
            } else {
                pearson_correlation(&a, &b)
            };

            coefficients[i][j] = r;
            coefficients[j][i] = r;
            sample_sizes[i][j] = a.len();
            sample_sizes[j][i] = a.len();
        }
    }

    CorrelationMatrix {
        columns: table.column_names(),
        coefficients,
        sample_sizes,
    }
}

/// Values of two columns on the dates both observe
fn align(a: &Column, b: &Column) -> (Vec<f64>, Vec<f64>) {
    a.values
        .iter()
        .zip(&b.values)
        .filter_map(|(x, y)| Some(((*x)?, (*y)?)))
        .unzip()
}

/// Calculate Pearson correlation coefficient
///
/// Returns a value between -1 and 1:
/// - 1: perfect positive correlation
/// - 0: no correlation (also returned for zero variance)
/// - -1: perfect negative correlation
pub fn pearson_correlation(x: &[f64], y: &[f64]) -> f64 {
    if x.len() != y.len() || x.is_empty() {
        return 0.0;
    }

    let n = x.len() as f64;
    let mean_x = x.iter().sum::<f64>() / n;
    let mean_y = y.iter().sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (a, b) in x.iter().zip(y) {
        let dx = a - mean_x;
        let dy = b - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    let denominator = (var_x * var_y).sqrt();
    if denominator == 0.0 {
        0.0
    } else {
        (cov / denominator).clamp(-1.0, 1.0)
    }
}

/// Convert correlation coefficient to human-readable strength
fn correlation_strength(r: f64) -> String {
    let abs_r = r.abs();
    if abs_r > 0.7 {
        "strong".to_string()
    } else if abs_r > 0.5 {
        "moderate".to_string()
    } else if abs_r > 0.3 {
        "weak".to_string()
    } else {
        "negligible".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::types::tests::{dates, table};

    #[test]
    fn test_pearson_correlation_perfect_positive() {
        let x = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let y = vec![2.0, 4.0, 6.0, 8.0, 10.0];
        let r = pearson_correlation(&x, &y);
        assert!((r - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_pearson_correlation_perfect_negative() {
        let x = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let y = vec![10.0, 8.0, 6.0, 4.0, 2.0];
        let r = pearson_correlation(&x, &y);
        assert!((r + 1.0).abs() < 0.001);
    }

    #[test]
    fn test_pearson_correlation_constant_series() {
        let x = vec![1.0, 2.0, 3.0];
        let y = vec![5.25, 5.25, 5.25];
        assert_eq!(pearson_correlation(&x, &y), 0.0);
    }

    #[test]
    fn test_correlation_strength() {
        assert_eq!(correlation_strength(0.8), "strong");
        assert_eq!(correlation_strength(-0.75), "strong");
        assert_eq!(correlation_strength(0.6), "moderate");
        assert_eq!(correlation_strength(0.4), "weak");
        assert_eq!(correlation_strength(0.2), "negligible");
    }

    #[test]
    fn test_matrix_is_symmetric_with_unit_diagonal() {
        let t = table(&[
            ("US_10Y", &[4.0, 4.1, 4.3, 4.2]),
            ("KR_10Y", &[3.5, 3.6, 3.8, 3.7]),
            ("USD/KRW", &[1360.0, 1350.0, 1330.0, 1340.0]),
        ]);
        let m = correlation_matrix(&t);

        assert_eq!(m.coefficients[0][0], 1.0);
        assert_eq!(m.coefficients[1][2], m.coefficients[2][1]);
        assert!((m.get("US_10Y", "KR_10Y").unwrap() - 1.0).abs() < 1e-9);
        assert!((m.get("US_10Y", "USD/KRW").unwrap() + 1.0).abs() < 1e-9);
        assert_eq!(m.get("US_10Y", "JPY/KRW"), None);
    }

    #[test]
    fn test_matrix_aligns_on_shared_dates() {
        let t = SeriesTable::new(
            dates(4),
            vec![
                Column::new("A", vec![Some(1.0), Some(2.0), None, Some(4.0)]),
                Column::new("B", vec![Some(10.0), None, Some(30.0), Some(40.0)]),
            ],
        )
        .unwrap();
        let m = correlation_matrix(&t);

        assert_eq!(m.sample_sizes[0][1], 2);
        assert_eq!(m.sample_sizes[0][0], 3);
        assert!((m.coefficients[0][1] - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_too_few_aligned_points() {
        let t = SeriesTable::new(
            dates(2),
            vec![
                Column::new("A", vec![Some(1.0), None]),
                Column::new("B", vec![Some(2.0), Some(3.0)]),
            ],
        )
        .unwrap();
        let m = correlation_matrix(&t);
        assert_eq!(m.coefficients[0][1], 0.0);
    }

    #[test]
    fn test_strongest_pairs_sorted() {
        let t = table(&[
            ("A", &[1.0, 2.0, 3.0, 4.0, 5.0]),
            ("B", &[2.0, 1.0, 4.0, 3.0, 6.0]),
            ("C", &[5.0, 4.0, 3.0, 2.0, 1.0]),
        ]);
        let pairs = correlation_matrix(&t).strongest_pairs(0.3);

        assert_eq!(pairs[0].series_a, "A");
        assert_eq!(pairs[0].series_b, "C");
        assert_eq!(pairs[0].direction, "negative");
        assert_eq!(pairs[0].strength, "strong");
        assert!(pairs
            .windows(2)
            .all(|w| w[0].coefficient.abs() >= w[1].coefficient.abs()));
    }
}
