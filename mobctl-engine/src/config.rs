//! Configuration Loading for the Mobility Engine
//!
//! This module defines the decision-policy and report-subscription
//! configuration consumed by the engine, with YAML loading and validation
//! kept separate so embedders can construct configs programmatically and
//! still validate them.
//!
//! # Example
//!
//! ```rust,ignore
//! use mobctl_engine::config::{load_mobility_config, validate_mobility_config};
//!
//! let config = load_mobility_config("config/mobility.yaml")?;
//! validate_mobility_config(&config)?;
//! ```

use std::path::Path;
use std::time::Duration;

use mobctl_common::WeightVector;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File I/O error
    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    /// Configuration validation error
    #[error("Configuration validation failed: {0}")]
    ValidationError(#[from] ConfigValidationError),
}

/// Folds loader errors into the shared [`mobctl_common::Error`], so an
/// embedder returning the library error can apply `?` to the load
/// functions.
impl From<ConfigError> for mobctl_common::Error {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::IoError(e) => mobctl_common::Error::Io(e),
            ConfigError::ParseError(msg) => mobctl_common::Error::Config(msg),
            ConfigError::ValidationError(e) => mobctl_common::Error::Config(e.to_string()),
        }
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigValidationError {
    /// Serving-cell threshold outside the quantized RSRQ range
    #[error("Invalid serving threshold: {0}")]
    InvalidServingThreshold(String),

    /// Handover margin outside the quantized RSRQ range
    #[error("Invalid handover margin: {0}")]
    InvalidHandoverMargin(String),

    /// Non-finite or negative scoring weight
    #[error("Invalid weights: {0}")]
    InvalidWeights(String),

    /// Non-finite or negative score floor
    #[error("Invalid score floor: {0}")]
    InvalidScoreFloor(String),

    /// Satisfaction ceiling off the MOS scale
    #[error("Invalid QoE ceiling: {0}")]
    InvalidQoeCeiling(String),

    /// Zero report interval
    #[error("Invalid report interval: {0}")]
    InvalidReportInterval(String),
}

/// Configuration for the measurement-report subscription and the handover
/// decision policy.
///
/// The first three fields parameterize the measurement-event subscription
/// placed by the surrounding radio-control layer; the engine carries and
/// validates them but does not consult them on the decision path. The
/// remaining fields are the decision policy proper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MobilityConfig {
    /// Serving-cell RSRQ threshold of the quality-event subscription
    /// (quantized 0-34). A neighbour rising above it produces a report.
    pub serving_threshold: u8,
    /// How long a neighbour must continuously satisfy the event condition
    /// before it is reported (ms). 0 means report immediately.
    pub time_to_trigger_ms: u64,
    /// Interval between successive reports while the condition holds (ms).
    pub report_interval_ms: u64,
    /// Warm-up delay after system start during which no handover decision
    /// is taken (ms).
    pub warmup_ms: u64,
    /// Terminal QoE ceiling: a terminal whose own sample exceeds this is
    /// never disturbed (MOS scale).
    pub qoe_ceiling: f64,
    /// Weights of the composite score.
    pub weights: WeightVector,
    /// Absolute composite-score floor a winning candidate must exceed to
    /// fire a handover.
    pub score_floor: f64,
    /// Minimum amount by which the winner must clear the serving score.
    /// 0 disables the margin and keeps the plain strictly-best selection.
    pub handover_margin: f64,
}

impl Default for MobilityConfig {
    fn default() -> Self {
        Self {
            serving_threshold: 30,
            time_to_trigger_ms: 256,
            report_interval_ms: 480,
            warmup_ms: 5000,
            qoe_ceiling: 3.0,
            weights: WeightVector::default(),
            score_floor: 5.0,
            handover_margin: 0.0,
        }
    }
}

impl MobilityConfig {
    /// Returns the warm-up delay as a Duration.
    pub fn warmup(&self) -> Duration {
        Duration::from_millis(self.warmup_ms)
    }

    /// Returns the time-to-trigger as a Duration.
    pub fn time_to_trigger(&self) -> Duration {
        Duration::from_millis(self.time_to_trigger_ms)
    }

    /// Returns the report interval as a Duration.
    pub fn report_interval(&self) -> Duration {
        Duration::from_millis(self.report_interval_ms)
    }

    /// Parses a mobility configuration from a YAML string.
    ///
    /// Missing fields take their defaults, so partial documents are
    /// accepted.
    ///
    /// # Arguments
    /// * `yaml` - YAML string containing the mobility configuration
    ///
    /// # Returns
    /// * `Ok(MobilityConfig)` - Successfully parsed configuration
    /// * `Err(Error)` - YAML parsing error
    ///
    /// # Example
    /// ```
    /// use mobctl_engine::MobilityConfig;
    ///
    /// let yaml = r#"
    /// serving_threshold: 28
    /// handover_margin: 1.5
    /// "#;
    ///
    /// let config = MobilityConfig::from_yaml(yaml).unwrap();
    /// assert_eq!(config.serving_threshold, 28);
    /// ```
    pub fn from_yaml(yaml: &str) -> Result<Self, mobctl_common::Error> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Loads a mobility configuration from a YAML file.
    ///
    /// # Arguments
    /// * `path` - Path to the YAML configuration file
    ///
    /// # Returns
    /// * `Ok(MobilityConfig)` - Successfully loaded configuration
    /// * `Err(Error)` - File I/O or YAML parsing error
    ///
    /// # Example
    /// ```no_run
    /// use mobctl_engine::MobilityConfig;
    ///
    /// let config = MobilityConfig::from_yaml_file("config/mobility.yaml").unwrap();
    /// ```
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self, mobctl_common::Error> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Serializes the mobility configuration to a YAML string.
    ///
    /// # Returns
    /// * `Ok(String)` - YAML representation of the configuration
    /// * `Err(Error)` - Serialization error
    pub fn to_yaml(&self) -> Result<String, mobctl_common::Error> {
        Ok(serde_yaml::to_string(self)?)
    }
}

/// Loads a mobility configuration from a YAML file.
///
/// This only reads and parses; call [`validate_mobility_config`] (or use
/// [`load_and_validate_mobility_config`]) to range-check the values.
///
/// # Arguments
///
/// * `path` - Path to the YAML configuration file
pub fn load_mobility_config<P: AsRef<Path>>(path: P) -> Result<MobilityConfig, ConfigError> {
    let path = path.as_ref();

    let contents = std::fs::read_to_string(path)?;

    let config: MobilityConfig =
        serde_yaml::from_str(&contents).map_err(|e| ConfigError::ParseError(e.to_string()))?;

    Ok(config)
}

/// Loads a mobility configuration from a YAML string.
///
/// Missing fields take their defaults, so partial configurations are
/// accepted.
pub fn load_mobility_config_from_str(yaml: &str) -> Result<MobilityConfig, ConfigError> {
    let config: MobilityConfig =
        serde_yaml::from_str(yaml).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    Ok(config)
}

/// Validates a mobility configuration.
///
/// # Validation Rules
///
/// - Serving threshold must be within the quantized RSRQ range (0-34)
/// - Handover margin must be finite and within 0-34
/// - Each weight must be finite and non-negative
/// - Score floor must be finite and non-negative
/// - QoE ceiling must lie on the MOS scale (1-5)
/// - Report interval must be non-zero
pub fn validate_mobility_config(config: &MobilityConfig) -> Result<(), ConfigValidationError> {
    const MAX_QUANTIZED_RSRQ: u8 = 34;
    if config.serving_threshold > MAX_QUANTIZED_RSRQ {
        return Err(ConfigValidationError::InvalidServingThreshold(format!(
            "serving threshold {} exceeds maximum quantized RSRQ ({})",
            config.serving_threshold, MAX_QUANTIZED_RSRQ
        )));
    }

    if !config.handover_margin.is_finite()
        || config.handover_margin < 0.0
        || config.handover_margin > f64::from(MAX_QUANTIZED_RSRQ)
    {
        return Err(ConfigValidationError::InvalidHandoverMargin(format!(
            "handover margin {} must be within 0-{}",
            config.handover_margin, MAX_QUANTIZED_RSRQ
        )));
    }

    for (name, value) in [
        ("rsrq", config.weights.rsrq),
        ("qoe", config.weights.qoe),
        ("qos", config.weights.qos),
    ] {
        if !value.is_finite() || value < 0.0 {
            return Err(ConfigValidationError::InvalidWeights(format!(
                "{name} weight {value} must be finite and non-negative"
            )));
        }
    }

    if !config.score_floor.is_finite() || config.score_floor < 0.0 {
        return Err(ConfigValidationError::InvalidScoreFloor(format!(
            "score floor {} must be finite and non-negative",
            config.score_floor
        )));
    }

    if !config.qoe_ceiling.is_finite() || config.qoe_ceiling < 1.0 || config.qoe_ceiling > 5.0 {
        return Err(ConfigValidationError::InvalidQoeCeiling(format!(
            "QoE ceiling {} must be on the 1-5 MOS scale",
            config.qoe_ceiling
        )));
    }

    if config.report_interval_ms == 0 {
        return Err(ConfigValidationError::InvalidReportInterval(
            "report interval must be non-zero".to_string(),
        ));
    }

    Ok(())
}

/// Loads and validates a mobility configuration in one step.
pub fn load_and_validate_mobility_config<P: AsRef<Path>>(
    path: P,
) -> Result<MobilityConfig, ConfigError> {
    let config = load_mobility_config(path)?;
    validate_mobility_config(&config)?;
    Ok(config)
}
