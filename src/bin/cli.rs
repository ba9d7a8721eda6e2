//! Ratedash CLI
//!
//! Command-line access to the analysis routines over CSV files:
//! - Per-series statistics
//! - Axis scaling decision
//! - Spreads and normalization
//! - Correlations

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use ratedash::analysis::{
    compute_spread, correlation_matrix, normalize, SeriesStatistics, SpreadOperation,
    StatisticsRecord,
};
use ratedash::config::{generate_default_config, Config};
use ratedash::logging::init_logging;
use ratedash::series::{CsvTableReader, DateRange, Period, SeriesTable, TablePayload};

#[derive(Parser)]
#[command(name = "ratedash-cli")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Statistics and chart-axis analysis for rate time series")]
#[command(long_about = "Reads a CSV table (a date column followed by one column per series)\nand prints statistics, axis decisions, spreads and correlations.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,

    /// Config file path (default: standard locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Restrict the table to a period ending at its last date (1Y, 3Y, 5Y, 10Y)
    #[arg(short, long, global = true)]
    pub period: Option<Period>,

    /// Date format of the CSV date column (strftime)
    #[arg(long, global = true)]
    pub date_format: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Summary statistics for every series
    Stats {
        /// Path to CSV file
        path: PathBuf,
    },

    /// Decide whether the series need a secondary axis
    Axis {
        /// Path to CSV file
        path: PathBuf,
        /// Median ratio threshold (default from config)
        #[arg(short, long)]
        threshold: Option<f64>,
    },

    /// Spread of two series
    Spread {
        /// Path to CSV file
        path: PathBuf,
        /// Base series
        item_a: String,
        /// Comparison series
        item_b: String,
        /// Operation (subtract, divide)
        #[arg(long, default_value = "subtract")]
        op: SpreadOperation,
    },

    /// Rebase every series to 100 at its first observation
    Normalize {
        /// Path to CSV file
        path: PathBuf,
    },

    /// Pairwise correlations
    Correlations {
        /// Path to CSV file
        path: PathBuf,
        /// Minimum |r| for listed pairs (default from config)
        #[arg(long)]
        min_abs: Option<f64>,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_with_env(path)
            .with_context(|| format!("loading config from {:?}", path))?,
        None => Config::load_default().context("loading config")?,
    };
    init_logging(&config.logging).context("initializing logging")?;

    let json = match cli.format.as_str() {
        "json" => true,
        "table" => false,
        other => bail!("Unknown output format: {} (use table or json)", other),
    };

    match &cli.command {
        Commands::Stats { path } => {
            let table = load_table(&cli, path)?;
            let stats = config.analysis.statistics_engine().compute_table(&table);

            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                print_statistics(&stats);
            }
        }

        Commands::Axis { path, threshold } => {
            let threshold = threshold.unwrap_or(config.analysis.axis_threshold);
            if !(threshold.is_finite() && threshold > 0.0) {
                bail!("threshold must be a positive number, got {}", threshold);
            }

            let table = load_table(&cli, path)?;
            let decision = ratedash::advise_axis_scaling(&table, threshold);

            if json {
                println!("{}", serde_json::to_string_pretty(&decision)?);
            } else {
                println!("Threshold: {}", threshold);
                println!(
                    "Secondary axis: {}",
                    if decision.use_secondary { "yes" } else { "no" }
                );
                println!();
                for (i, name) in decision.columns.iter().enumerate() {
                    let axis = if decision.use_secondary && i > 0 {
                        "secondary"
                    } else {
                        "primary"
                    };
                    println!("  {}. {:<20} {}", i + 1, name, axis);
                }
            }
        }

        Commands::Spread {
            path,
            item_a,
            item_b,
            op,
        } => {
            let table = load_table(&cli, path)?;
            let spread = compute_spread(&table, item_a, item_b, *op)?;
            let stats = spread.statistics(&config.analysis.lookbacks());

            if json {
                let body = serde_json::json!({
                    "label": spread.label,
                    "axis_title": spread.axis_title,
                    "series": spread.series.observations(),
                    "statistics": stats,
                });
                println!("{}", serde_json::to_string_pretty(&body)?);
            } else {
                println!("{} ({})", spread.label, spread.axis_title);
                println!("{}", "-".repeat(40));
                for obs in spread.series.observations() {
                    println!("{:<12} {}", obs.date, format_value(obs.value));
                }
                if let Some(stats) = stats {
                    println!();
                    print_statistics(&[SeriesStatistics {
                        name: spread.label.clone(),
                        record: stats.record,
                    }]);
                    println!("Chg 3M: {:.4}", stats.change_3m);
                }
            }
        }

        Commands::Normalize { path } => {
            let table = normalize(&load_table(&cli, path)?);

            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&TablePayload::from_table(&table))?
                );
            } else {
                print_table(&table);
            }
        }

        Commands::Correlations { path, min_abs } => {
            let min_abs = min_abs.unwrap_or(config.analysis.min_correlation);
            let table = load_table(&cli, path)?;
            let matrix = correlation_matrix(&table);
            let pairs = matrix.strongest_pairs(min_abs);

            if json {
                let body = serde_json::json!({ "matrix": matrix, "pairs": pairs });
                println!("{}", serde_json::to_string_pretty(&body)?);
            } else if pairs.is_empty() {
                println!("No pairs with |r| > {}", min_abs);
            } else {
                println!(
                    "{:<15} {:<15} {:>8} {:<12} {:>6}",
                    "Series A", "Series B", "r", "Strength", "n"
                );
                println!("{}", "-".repeat(60));
                for pair in pairs {
                    println!(
                        "{:<15} {:<15} {:>8.3} {:<12} {:>6}",
                        pair.series_a, pair.series_b, pair.coefficient, pair.strength,
                        pair.sample_size
                    );
                }
            }
        }

        Commands::Config { output } => {
            let config = generate_default_config();

            match output {
                Some(path) => {
                    // Create parent directory if needed
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(path, &config)?;
                    println!("Config written to {:?}", path);
                }
                None => {
                    print!("{}", config);
                }
            }
        }
    }

    Ok(())
}

/// Read the CSV table and apply the global period filter
fn load_table(cli: &Cli, path: &Path) -> anyhow::Result<SeriesTable> {
    if !path.exists() {
        bail!("File not found: {:?}", path);
    }

    let mut reader = CsvTableReader::new();
    if let Some(format) = &cli.date_format {
        reader = reader.with_date_format(format);
    }

    let table = reader
        .read_path(path)
        .with_context(|| format!("reading {:?}", path))?;

    let table = match (cli.period, table.dates().last()) {
        (Some(period), Some(&end)) => table.slice(&DateRange::for_period(period, end)),
        _ => table,
    };

    tracing::debug!(rows = table.len(), columns = table.width(), "Loaded table");
    Ok(table)
}

fn format_value(value: Option<f64>) -> String {
    value
        .map(|v| format!("{:.4}", v))
        .unwrap_or_else(|| "-".to_string())
}

fn print_statistics(stats: &[SeriesStatistics]) {
    if stats.is_empty() {
        println!("No observations");
        return;
    }

    println!(
        "{:<15} {:>10} {:>10} {:>10} {:>10} {:>10} {:>10} {:>10} {:>10} {:>8}",
        "Series", "Current", "Mean", "Std", "Min", "Max", "Chg 1D", "Chg 1W", "Chg 1M", "% 1D"
    );
    println!("{}", "-".repeat(118));

    for s in stats {
        let StatisticsRecord {
            current,
            mean,
            std,
            min,
            max,
            change_1d,
            change_1w,
            change_1m,
            pct_change_1d,
            ..
        } = &s.record;
        let name = match &s.record.unit {
            Some(unit) => format!("{} ({})", s.name, unit),
            None => s.name.clone(),
        };

        println!(
            "{:<15} {:>10.4} {:>10.4} {:>10.4} {:>10.4} {:>10.4} {:>10.4} {:>10.4} {:>10.4} {:>7.2}%",
            name, current, mean, std, min, max, change_1d, change_1w, change_1m, pct_change_1d
        );
    }
}

fn print_table(table: &SeriesTable) {
    print!("{:<12}", "Date");
    for column in table.columns() {
        print!(" | {:<10}", column.name);
    }
    println!();

    println!("{}", "-".repeat(14 + table.width() * 13));

    for (i, date) in table.dates().iter().enumerate() {
        print!("{:<12}", date.format("%Y-%m-%d"));
        for column in table.columns() {
            let val = column.values[i]
                .map(|v| format!("{:.2}", v))
                .unwrap_or_else(|| "-".to_string());
            print!(" | {:<10}", val);
        }
        println!();
    }
}
