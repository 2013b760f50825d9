//! Adaptive ECC protection policy.
//!
//! Each access to a protected register passes through [`AdaptiveEccPolicy::adapt`]:
//! 1. **Count** the access (frequency saturates at 1023).
//! 2. **Check** the word with SEC-DED unless the mode is NONE, counting a
//!    corrected data error in the history (saturates at 3).
//! 3. **Select** the mode: SECDED when the register is hot, sensitive or has
//!    a correction on record, SEC otherwise. NONE is never selected again.
//! 4. **Repack** data, code and metadata into the returned register.

use tracing::{debug, warn};

use crate::config::EccPolicyConfig;

use super::codec::{DATA_MASK, DecodeOutcome, EccCodec};
use super::metadata::{EccMetadata, EccMode, MODE_MASK, MODE_SHIFT};

/// Threshold-driven selector between SEC and SECDED.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AdaptiveEccPolicy {
    frequency_threshold: u16,
    sensitivity_threshold: u8,
    history_threshold: u8,
}

impl Default for AdaptiveEccPolicy {
    fn default() -> Self {
        Self::from_config(&EccPolicyConfig::default())
    }
}

impl AdaptiveEccPolicy {
    /// Creates a policy with the configured thresholds.
    pub const fn from_config(config: &EccPolicyConfig) -> Self {
        Self {
            frequency_threshold: config.frequency_threshold,
            sensitivity_threshold: config.sensitivity_threshold,
            history_threshold: config.history_threshold,
        }
    }

    /// Applies one access to a protected register.
    ///
    /// # Arguments
    ///
    /// * `reg` - Register returned by the previous call (or a fresh encode).
    ///
    /// # Returns
    ///
    /// The register with possibly corrected data and code and updated
    /// mode, history and frequency. Sensitivity is carried unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use alusim_core::core::units::ecc::{AdaptiveEccPolicy, EccCodec, EccMetadata, EccMode};
    ///
    /// let policy = AdaptiveEccPolicy::default();
    /// let reg = policy.adapt(EccCodec::encode(0xCAFE));
    /// let meta = EccMetadata::unpack(reg).unwrap_or_default();
    /// assert_eq!(meta.frequency(), 1);
    /// assert_eq!(meta.mode(), EccMode::Sec);
    /// ```
    pub fn adapt(&self, reg: u64) -> u64 {
        let mut meta = EccMetadata::unpack(reg).unwrap_or_else(|err| {
            warn!(
                %err,
                mode = (reg >> MODE_SHIFT) & MODE_MASK,
                "treating reserved ECC mode as protected"
            );
            EccMetadata::unpack_or(reg, EccMode::SecDed)
        });
        meta.record_access();

        let mut word = reg;
        if meta.mode() != EccMode::None {
            let (decoded, outcome) = EccCodec::decode_with_outcome(reg);
            if decoded & DATA_MASK != reg & DATA_MASK {
                meta.record_correction();
                debug!(?outcome, history = meta.history(), "ECC corrected data error");
            } else if let DecodeOutcome::Uncorrectable { syndrome } = outcome {
                debug!(syndrome, "ECC access left uncorrectable word in place");
            }
            word = decoded;
        }

        let previous = meta.mode();
        let mode = self.select_mode(&meta);
        if mode != previous {
            debug!(?previous, ?mode, "ECC mode change");
        }
        meta.set_mode(mode);
        meta.pack_into(word)
    }

    /// Mode chosen for metadata that has already been updated.
    pub const fn select_mode(&self, meta: &EccMetadata) -> EccMode {
        if meta.frequency() > self.frequency_threshold
            || meta.sensitivity() >= self.sensitivity_threshold
            || meta.history() >= self.history_threshold
        {
            EccMode::SecDed
        } else {
            EccMode::Sec
        }
    }
}
