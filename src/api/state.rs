//! Application State
//!
//! Shared state accessible by all API handlers.
//! Wrapped in Arc for thread-safe sharing across async tasks; nothing in it
//! is mutated after startup.

use std::sync::Arc;
use std::time::Instant;

use crate::analysis::{AxisScalingAdvisor, LookbackOffsets, StatisticsEngine};
use crate::config::{AnalysisConfig, ApiConfig};

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// API configuration
    pub config: Arc<ApiConfig>,
    /// Analysis defaults (threshold, lookbacks, correlation cut-off)
    pub analysis: Arc<AnalysisConfig>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    pub fn new(config: ApiConfig, analysis: AnalysisConfig) -> Self {
        Self {
            config: Arc::new(config),
            analysis: Arc::new(analysis),
            start_time: Instant::now(),
        }
    }

    /// Statistics engine with the configured lookbacks
    pub fn statistics_engine(&self) -> StatisticsEngine {
        self.analysis.statistics_engine()
    }

    pub fn lookbacks(&self) -> LookbackOffsets {
        self.analysis.lookbacks()
    }

    /// Axis advisor, with a per-request threshold overriding the configured one
    pub fn axis_advisor(&self, threshold: Option<f64>) -> AxisScalingAdvisor {
        AxisScalingAdvisor::new(threshold.unwrap_or(self.analysis.axis_threshold))
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(ApiConfig::default(), AnalysisConfig::default())
    }
}
