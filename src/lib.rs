//! # Ratedash
//!
//! Analysis core and HTTP backend for an interest-rate and exchange-rate
//! dashboard. Series arrive as date-indexed tables (from the rates backend
//! JSON shape or a CSV file); the crate summarizes each series and decides
//! how they should share a chart.
//!
//! ## Modules
//!
//! - [`series`]: Time series, tables, date ranges and ingestion
//! - [`analysis`]: Statistics, axis scaling, spreads, normalization, correlations
//! - [`api`]: REST API server with Axum
//! - [`config`]: TOML configuration with environment overrides
//! - [`logging`]: Tracing subscriber setup
//!
//! ## Quick Start
//!
//! ```rust
//! use ratedash::analysis::{advise_axis_scaling, StatisticsEngine};
//! use ratedash::series::TablePayload;
//!
//! let payload: TablePayload = serde_json::from_str(r#"{
//!     "dates": ["2024-01-02", "2024-01-03"],
//!     "series": {
//!         "US_10Y": {"values": [4.0, 4.1], "unit": "%"},
//!         "USD/KRW": {"values": [1300.0, 1310.0], "unit": "KRW"}
//!     }
//! }"#).unwrap();
//! let table = payload.into_table().unwrap();
//!
//! let stats = StatisticsEngine::default().compute_table(&table);
//! assert_eq!(stats[0].record.current, 4.1);
//!
//! let decision = advise_axis_scaling(&table, 5.0);
//! assert!(decision.use_secondary);
//! assert_eq!(decision.columns, vec!["USD/KRW", "US_10Y"]);
//! ```

pub mod analysis;
pub mod api;
pub mod config;
pub mod logging;
pub mod series;

// Re-export top-level types for convenience
pub use series::{
    Column, CsvTableReader, DateRange, Observation, Period, SeriesError, SeriesResult,
    SeriesTable, TablePayload, TimeSeries,
};

pub use analysis::{
    advise_axis_scaling, compute_spread, compute_statistics, correlation_matrix, normalize,
    AxisDecision, AxisScalingAdvisor, CorrelationMatrix, LookbackOffsets, SeriesStatistics,
    Spread, SpreadOperation, SpreadStatistics, StatisticsEngine, StatisticsRecord,
};

pub use api::{build_router, serve, ApiError, AppState};

pub use config::{AnalysisConfig, ApiConfig, Config, ConfigError, LoggingConfig};
