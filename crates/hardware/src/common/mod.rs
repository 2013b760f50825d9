//! Common types shared by every execution unit.
//!
//! 1. **Error Handling:** Typed errors for the configuration, metadata and
//!    opcode-parsing seams.
//! 2. **Lanes:** Splitting and reassembling packed 16- and 32-bit lanes.

/// Error types for configuration, ECC metadata and opcode parsing.
pub mod error;

/// Packed-lane extraction and assembly helpers.
pub mod lanes;

pub use error::{ConfigError, EccError, OpcodeError};
