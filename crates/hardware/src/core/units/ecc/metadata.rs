//! ECC register metadata.
//!
//! Bits `[39:63]` of a protected register carry the policy state that the
//! caller threads from one access to the next:
//!
//! | Bits     | Field       | Range  | Written by        |
//! |----------|-------------|--------|-------------------|
//! | `39`     | reserved    |        | never             |
//! | `40..42` | mode        | 0..=2  | policy            |
//! | `42..44` | history     | 0..=3  | policy (saturates)|
//! | `44..54` | frequency   | 0..=1023 | policy (saturates)|
//! | `54..60` | sensitivity | 0..=63 | caller only       |
//! | `60..64` | reserved    |        | never             |
//!
//! The layout is a binary contract; [`EccMetadata`] is the checked
//! in-memory view of it.

use crate::common::error::EccError;

/// Bit offset of the mode field.
pub const MODE_SHIFT: u32 = 40;
/// Mask of the mode field after shifting.
pub const MODE_MASK: u64 = 0x3;
/// Bit offset of the error-history counter.
pub const HISTORY_SHIFT: u32 = 42;
/// Mask of the error-history counter after shifting.
pub const HISTORY_MASK: u64 = 0x3;
/// Bit offset of the access-frequency counter.
pub const FREQUENCY_SHIFT: u32 = 44;
/// Mask of the access-frequency counter after shifting.
pub const FREQUENCY_MASK: u64 = 0x3FF;
/// Bit offset of the sensitivity field.
pub const SENSITIVITY_SHIFT: u32 = 54;
/// Mask of the sensitivity field after shifting.
pub const SENSITIVITY_MASK: u64 = 0x3F;

/// Largest history count.
pub const HISTORY_MAX: u8 = HISTORY_MASK as u8;
/// Largest frequency count.
pub const FREQUENCY_MAX: u16 = FREQUENCY_MASK as u16;
/// Largest sensitivity value.
pub const SENSITIVITY_MAX: u8 = SENSITIVITY_MASK as u8;

/// Fields rewritten by [`EccMetadata::pack_into`].
const POLICY_FIELDS: u64 = (MODE_MASK << MODE_SHIFT)
    | (HISTORY_MASK << HISTORY_SHIFT)
    | (FREQUENCY_MASK << FREQUENCY_SHIFT)
    | (SENSITIVITY_MASK << SENSITIVITY_SHIFT);

/// Protection strength recorded in a register.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum EccMode {
    /// Unprotected: decode is skipped.
    #[default]
    None = 0,
    /// Single-error correction.
    Sec = 1,
    /// Single-error correction, double-error detection.
    SecDed = 2,
}

impl EccMode {
    /// Decodes the two-bit mode field.
    ///
    /// # Errors
    ///
    /// Returns [`EccError::ReservedMode`] for `0b11`.
    pub const fn from_bits(bits: u8) -> Result<Self, EccError> {
        match bits & MODE_MASK as u8 {
            0 => Ok(Self::None),
            1 => Ok(Self::Sec),
            2 => Ok(Self::SecDed),
            other => Err(EccError::ReservedMode(other)),
        }
    }

    /// Raw field encoding.
    pub const fn bits(self) -> u8 {
        self as u8
    }
}

/// Policy view of a protected register's metadata.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct EccMetadata {
    mode: EccMode,
    history: u8,
    frequency: u16,
    sensitivity: u8,
}

impl EccMetadata {
    /// Builds metadata, checking every counter against its field width.
    ///
    /// # Errors
    ///
    /// Returns [`EccError::FieldOutOfRange`] naming the first field that
    /// does not fit.
    pub const fn new(
        mode: EccMode,
        history: u8,
        frequency: u16,
        sensitivity: u8,
    ) -> Result<Self, EccError> {
        if history > HISTORY_MAX {
            return Err(EccError::FieldOutOfRange {
                field: "history",
                value: history as u32,
                max: HISTORY_MAX as u32,
            });
        }
        if frequency > FREQUENCY_MAX {
            return Err(EccError::FieldOutOfRange {
                field: "frequency",
                value: frequency as u32,
                max: FREQUENCY_MAX as u32,
            });
        }
        if sensitivity > SENSITIVITY_MAX {
            return Err(EccError::FieldOutOfRange {
                field: "sensitivity",
                value: sensitivity as u32,
                max: SENSITIVITY_MAX as u32,
            });
        }
        Ok(Self {
            mode,
            history,
            frequency,
            sensitivity,
        })
    }

    /// Reads the metadata fields of `reg`.
    ///
    /// # Errors
    ///
    /// Returns [`EccError::ReservedMode`] if the mode field is `0b11`.
    pub const fn unpack(reg: u64) -> Result<Self, EccError> {
        let mode = match EccMode::from_bits(((reg >> MODE_SHIFT) & MODE_MASK) as u8) {
            Ok(mode) => mode,
            Err(err) => return Err(err),
        };
        Ok(Self::with_mode(reg, mode))
    }

    /// Reads the metadata fields of `reg`, substituting `fallback` for a
    /// reserved mode encoding.
    pub const fn unpack_or(reg: u64, fallback: EccMode) -> Self {
        match Self::unpack(reg) {
            Ok(meta) => meta,
            Err(_) => Self::with_mode(reg, fallback),
        }
    }

    const fn with_mode(reg: u64, mode: EccMode) -> Self {
        Self {
            mode,
            history: ((reg >> HISTORY_SHIFT) & HISTORY_MASK) as u8,
            frequency: ((reg >> FREQUENCY_SHIFT) & FREQUENCY_MASK) as u16,
            sensitivity: ((reg >> SENSITIVITY_SHIFT) & SENSITIVITY_MASK) as u8,
        }
    }

    /// Writes the metadata fields into `reg`.
    ///
    /// Data, code and reserved bits of `reg` are left as they are.
    pub const fn pack_into(self, reg: u64) -> u64 {
        (reg & !POLICY_FIELDS)
            | ((self.mode.bits() as u64) << MODE_SHIFT)
            | ((self.history as u64) << HISTORY_SHIFT)
            | ((self.frequency as u64) << FREQUENCY_SHIFT)
            | ((self.sensitivity as u64) << SENSITIVITY_SHIFT)
    }

    /// Protection mode.
    pub const fn mode(&self) -> EccMode {
        self.mode
    }

    /// Corrected-error history count.
    pub const fn history(&self) -> u8 {
        self.history
    }

    /// Access frequency count.
    pub const fn frequency(&self) -> u16 {
        self.frequency
    }

    /// Externally supplied sensitivity.
    pub const fn sensitivity(&self) -> u8 {
        self.sensitivity
    }

    /// Replaces the protection mode.
    pub const fn set_mode(&mut self, mode: EccMode) {
        self.mode = mode;
    }

    /// Counts one access, saturating at [`FREQUENCY_MAX`].
    pub const fn record_access(&mut self) {
        if self.frequency < FREQUENCY_MAX {
            self.frequency += 1;
        }
    }

    /// Counts one corrected error, saturating at [`HISTORY_MAX`].
    pub const fn record_correction(&mut self) {
        if self.history < HISTORY_MAX {
            self.history += 1;
        }
    }
}
