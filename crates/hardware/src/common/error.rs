//! Error definitions.
//!
//! Arithmetic never fails: numeric conditions (divide-by-zero, invalid
//! operation, overflow) travel in return values and exception flags. The
//! types here cover the few seams where a caller can hand the core something
//! malformed:
//! 1. **ECC metadata:** a reserved mode encoding or an out-of-range counter.
//! 2. **Configuration:** unparsable JSON or values outside their domain.
//! 3. **Opcodes:** an unknown mnemonic.

use thiserror::Error;

/// Errors raised while unpacking or constructing ECC register metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EccError {
    /// The two-bit mode field held the reserved encoding `0b11`.
    #[error("reserved ECC mode encoding {0:#04b}")]
    ReservedMode(u8),

    /// A metadata field value does not fit its bit field.
    #[error("ECC metadata field `{field}` value {value} exceeds maximum {max}")]
    FieldOutOfRange {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value.
        value: u32,
        /// Largest representable value of the field.
        max: u32,
    },
}

/// Errors raised while loading or validating a [`Config`](crate::config::Config).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The JSON document could not be parsed.
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),

    /// The fault-injection probability is not a finite value in `[0, 1]`.
    #[error("fault injection probability {0} is outside [0, 1]")]
    InvalidProbability(f64),

    /// A policy threshold does not fit the metadata field it is compared with.
    #[error("ECC policy threshold `{field}` value {value} exceeds field maximum {max}")]
    ThresholdOutOfRange {
        /// Name of the offending threshold.
        field: &'static str,
        /// The rejected value.
        value: u32,
        /// Largest value the compared field can hold.
        max: u32,
    },
}

/// Error returned when parsing an [`Opcode`](crate::isa::opcode::Opcode) from text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown opcode mnemonic `{0}`")]
pub struct OpcodeError(pub String);
