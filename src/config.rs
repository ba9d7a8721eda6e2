//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::analysis::{
    statistics::{DEFAULT_ONE_DAY, DEFAULT_ONE_MONTH, DEFAULT_ONE_WEEK, DEFAULT_THREE_MONTH},
    AxisScalingAdvisor, LookbackOffsets, StatisticsEngine, DEFAULT_AXIS_THRESHOLD,
};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub analysis: AnalysisConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// API server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Allowed CORS origins; empty allows any origin
    #[serde(default)]
    pub cors_origins: Vec<String>,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8050
}

fn default_request_timeout() -> u64 {
    30
}

fn default_max_body_bytes() -> usize {
    10 * 1024 * 1024 // 10 MB
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
            request_timeout_secs: default_request_timeout(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

impl ApiConfig {
    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Analysis parameters
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisConfig {
    /// Median ratio above which a secondary axis is used
    #[serde(default = "default_axis_threshold")]
    pub axis_threshold: f64,

    /// Observations back for `change_1d` and `pct_change_1d`
    #[serde(default = "default_lookback_1d")]
    pub lookback_1d: usize,

    /// Observations back for `change_1w`
    #[serde(default = "default_lookback_1w")]
    pub lookback_1w: usize,

    /// Observations back for `change_1m`
    #[serde(default = "default_lookback_1m")]
    pub lookback_1m: usize,

    /// Observations back for the spread `change_3m`
    #[serde(default = "default_lookback_3m")]
    pub lookback_3m: usize,

    /// Minimum |r| for a pair to be listed as notable
    #[serde(default = "default_min_correlation")]
    pub min_correlation: f64,
}

fn default_axis_threshold() -> f64 {
    DEFAULT_AXIS_THRESHOLD
}

fn default_lookback_1d() -> usize {
    DEFAULT_ONE_DAY
}

fn default_lookback_1w() -> usize {
    DEFAULT_ONE_WEEK
}

fn default_lookback_1m() -> usize {
    DEFAULT_ONE_MONTH
}

fn default_lookback_3m() -> usize {
    DEFAULT_THREE_MONTH
}

fn default_min_correlation() -> f64 {
    0.3
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            axis_threshold: default_axis_threshold(),
            lookback_1d: default_lookback_1d(),
            lookback_1w: default_lookback_1w(),
            lookback_1m: default_lookback_1m(),
            lookback_3m: default_lookback_3m(),
            min_correlation: default_min_correlation(),
        }
    }
}

impl AnalysisConfig {
    pub fn lookbacks(&self) -> LookbackOffsets {
        LookbackOffsets {
            one_day: self.lookback_1d,
            one_week: self.lookback_1w,
            one_month: self.lookback_1m,
            three_month: self.lookback_3m,
        }
    }

    pub fn statistics_engine(&self) -> StatisticsEngine {
        StatisticsEngine::new(self.lookbacks())
    }

    pub fn axis_advisor(&self) -> AxisScalingAdvisor {
        AxisScalingAdvisor::new(self.axis_threshold)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Config::default();
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// First existing config file among the default locations
    pub fn default_path() -> Option<PathBuf> {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("ratedash").join("config.toml")),
            Some(PathBuf::from("/etc/ratedash/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        config_paths.into_iter().flatten().find(|p| p.exists())
    }

    /// Load from the first default location, or from the environment when
    /// no config file exists.
    ///
    /// A config file that exists but fails to load is an error, not a
    /// reason to fall back to defaults.
    pub fn load_default() -> Result<Self, ConfigError> {
        match Self::default_path() {
            Some(path) => Self::load_with_env(&path),
            None => Self::from_env(),
        }
    }

    /// Reject parameters the analysis routines cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let analysis = &self.analysis;

        if !(analysis.axis_threshold.is_finite() && analysis.axis_threshold > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "analysis.axis_threshold must be a positive number, got {}",
                analysis.axis_threshold
            )));
        }

        for (key, value) in [
            ("lookback_1d", analysis.lookback_1d),
            ("lookback_1w", analysis.lookback_1w),
            ("lookback_1m", analysis.lookback_1m),
            ("lookback_3m", analysis.lookback_3m),
        ] {
            if value == 0 {
                return Err(ConfigError::Invalid(format!(
                    "analysis.{} must be at least 1",
                    key
                )));
            }
        }

        if !(0.0..=1.0).contains(&analysis.min_correlation) {
            return Err(ConfigError::Invalid(format!(
                "analysis.min_correlation must be within [0, 1], got {}",
                analysis.min_correlation
            )));
        }

        Ok(())
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        // API overrides
        if let Ok(host) = std::env::var("RATEDASH_API_HOST") {
            self.api.host = host;
        }
        if let Some(port) = parse_env("RATEDASH_API_PORT")? {
            self.api.port = port;
        }

        // Analysis overrides
        if let Some(threshold) = parse_env("RATEDASH_AXIS_THRESHOLD")? {
            self.analysis.axis_threshold = threshold;
        }

        // Logging overrides
        if let Ok(level) = std::env::var("RATEDASH_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("RATEDASH_LOG_FORMAT") {
            self.logging.format = format;
        }

        Ok(())
    }
}

/// Parse an environment variable, `None` when unset
fn parse_env<T: std::str::FromStr>(key: &str) -> Result<Option<T>, ConfigError> {
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid(format!("{} has an invalid value: {}", key, raw))),
        Err(_) => Ok(None),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Ratedash Configuration
#
# Environment variables override these settings:
# - RATEDASH_API_HOST
# - RATEDASH_API_PORT
# - RATEDASH_AXIS_THRESHOLD
# - RATEDASH_LOG_LEVEL
# - RATEDASH_LOG_FORMAT

[api]
# API server host
host = "0.0.0.0"

# API server port
port = 8050

# Allowed CORS origins (empty = any origin)
cors_origins = []

# Request timeout in seconds
request_timeout_secs = 30

# Maximum request body size (bytes)
max_body_bytes = 10485760

[analysis]
# Use a secondary axis when the largest column median exceeds the
# smallest positive one by more than this factor
axis_threshold = 5.0

# Lookbacks for the change fields, counted in observations
# (not calendar days)
lookback_1d = 1
lookback_1w = 5
lookback_1m = 20

# Lookback for the spread 3-month change
lookback_3m = 60

# Minimum |r| for correlation pairs to be listed
min_correlation = 0.3

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}
