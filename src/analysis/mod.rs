//! Rate Analysis
//!
//! Pure, synchronous routines over an in-memory [`SeriesTable`]:
//!
//! - **statistics**: per-series summary and point-in-time changes
//! - **axis**: secondary-axis decision and display ordering
//! - **transform**: rebasing to 100 and two-series spreads
//! - **correlations**: pairwise Pearson matrix
//!
//! None of them performs I/O or keeps state between calls; calling any of
//! them twice on the same input yields identical output.
//!
//! # Example
//!
//! ```rust
//! use ratedash::analysis::{advise_axis_scaling, StatisticsEngine, DEFAULT_AXIS_THRESHOLD};
//! use ratedash::series::CsvTableReader;
//!
//! let table = CsvTableReader::new()
//!     .read_str("date,USD/KRW,US_10Y\n2024-10-01,1350.0,4.01\n2024-10-02,1352.5,4.05")
//!     .unwrap();
//!
//! let stats = StatisticsEngine::default().compute_table(&table);
//! assert_eq!(stats[0].record.current, 1352.5);
//!
//! let decision = advise_axis_scaling(&table, DEFAULT_AXIS_THRESHOLD);
//! assert!(decision.use_secondary);
//! assert_eq!(decision.columns, vec!["USD/KRW", "US_10Y"]);
//! ```
//!
//! [`SeriesTable`]: crate::series::SeriesTable

pub mod axis;
pub mod correlations;
pub mod statistics;
pub mod transform;

pub use axis::{advise_axis_scaling, AxisDecision, AxisScalingAdvisor, DEFAULT_AXIS_THRESHOLD};
pub use correlations::{correlation_matrix, pearson_correlation, Correlation, CorrelationMatrix};
pub use statistics::{
    compute_statistics, quantile, summarize, LookbackOffsets, SeriesStatistics,
    StatisticsEngine, StatisticsRecord,
};
pub use transform::{compute_spread, normalize, Spread, SpreadOperation, SpreadStatistics};
