//! Configuration for the execution core.
//!
//! This module defines the tunable parameters of the units. It provides:
//! 1. **Defaults:** Baseline constants reproducing the reference behavior.
//! 2. **Structures:** Fault-injection and ECC policy sections.
//! 3. **Validation:** Range checks applied after deserialization.
//!
//! Configuration is supplied as JSON, or use `Config::default()`. Every field
//! is optional in the JSON document.

use serde::Deserialize;

use crate::common::error::ConfigError;
use crate::core::units::ecc::metadata::{FREQUENCY_MAX, HISTORY_MAX, SENSITIVITY_MAX};

/// Default configuration constants.
mod defaults {
    /// Per-call probability that fault injection flips a bit.
    pub const FLIP_PROBABILITY: f64 = crate::core::units::alu::fault::DEFAULT_FLIP_PROBABILITY;

    /// Access count above which SECDED is selected.
    pub const FREQUENCY_THRESHOLD: u16 = 700;

    /// Sensitivity at or above which SECDED is selected.
    pub const SENSITIVITY_THRESHOLD: u8 = 4;

    /// Corrected-error count at or above which SECDED is selected.
    pub const HISTORY_THRESHOLD: u8 = 1;
}

/// Root configuration structure.
///
/// # Examples
///
/// ```
/// use alusim_core::config::Config;
///
/// let json = r#"{
///     "fault_injection": { "probability": 0.5, "seed": 42 },
///     "ecc": { "frequency_threshold": 100 }
/// }"#;
///
/// let config = Config::from_json(json).unwrap();
/// assert_eq!(config.fault_injection.seed, Some(42));
/// assert_eq!(config.ecc.frequency_threshold, 100);
/// assert_eq!(config.ecc.sensitivity_threshold, 4);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Config {
    /// Fault-injection parameters of the integer unit
    #[serde(default)]
    pub fault_injection: FaultInjectionConfig,
    /// Adaptive ECC policy thresholds
    #[serde(default)]
    pub ecc: EccPolicyConfig,
}

impl Config {
    /// Parses and validates a JSON configuration document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and the errors of
    /// [`Config::validate`] for out-of-range values.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks every value against the domain of the field it feeds.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidProbability`] or
    /// [`ConfigError::ThresholdOutOfRange`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.fault_injection.validate()?;
        self.ecc.validate()
    }
}

/// Fault-injection settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FaultInjectionConfig {
    /// Probability that one call flips a bit
    #[serde(default = "FaultInjectionConfig::default_probability")]
    pub probability: f64,

    /// Generator seed; drawn from OS entropy when absent
    #[serde(default)]
    pub seed: Option<u64>,
}

impl FaultInjectionConfig {
    fn default_probability() -> f64 {
        defaults::FLIP_PROBABILITY
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.probability.is_finite() && (0.0..=1.0).contains(&self.probability) {
            Ok(())
        } else {
            Err(ConfigError::InvalidProbability(self.probability))
        }
    }
}

impl Default for FaultInjectionConfig {
    fn default() -> Self {
        Self {
            probability: defaults::FLIP_PROBABILITY,
            seed: None,
        }
    }
}

/// Adaptive ECC policy thresholds.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EccPolicyConfig {
    /// SECDED when access frequency exceeds this
    #[serde(default = "EccPolicyConfig::default_frequency_threshold")]
    pub frequency_threshold: u16,

    /// SECDED when sensitivity reaches this
    #[serde(default = "EccPolicyConfig::default_sensitivity_threshold")]
    pub sensitivity_threshold: u8,

    /// SECDED when corrected-error history reaches this
    #[serde(default = "EccPolicyConfig::default_history_threshold")]
    pub history_threshold: u8,
}

impl EccPolicyConfig {
    fn default_frequency_threshold() -> u16 {
        defaults::FREQUENCY_THRESHOLD
    }

    fn default_sensitivity_threshold() -> u8 {
        defaults::SENSITIVITY_THRESHOLD
    }

    fn default_history_threshold() -> u8 {
        defaults::HISTORY_THRESHOLD
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let checks = [
            (
                "frequency_threshold",
                u32::from(self.frequency_threshold),
                u32::from(FREQUENCY_MAX),
            ),
            (
                "sensitivity_threshold",
                u32::from(self.sensitivity_threshold),
                u32::from(SENSITIVITY_MAX),
            ),
            (
                "history_threshold",
                u32::from(self.history_threshold),
                u32::from(HISTORY_MAX),
            ),
        ];
        for (field, value, max) in checks {
            if value > max {
                return Err(ConfigError::ThresholdOutOfRange { field, value, max });
            }
        }
        Ok(())
    }
}

impl Default for EccPolicyConfig {
    fn default() -> Self {
        Self {
            frequency_threshold: defaults::FREQUENCY_THRESHOLD,
            sensitivity_threshold: defaults::SENSITIVITY_THRESHOLD,
            history_threshold: defaults::HISTORY_THRESHOLD,
        }
    }
}
