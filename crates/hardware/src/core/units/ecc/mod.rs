//! Error-correcting code units.
//!
//! - [`codec`]: Hamming SEC-DED over the low 32 bits of a register.
//! - [`metadata`]: Policy fields packed into the register's upper bits.
//! - [`policy`]: Adaptive selection of protection strength.

/// SEC-DED encode/decode.
pub mod codec;

/// Register metadata layout and value type.
pub mod metadata;

/// Adaptive protection policy.
pub mod policy;

pub use self::codec::{DecodeOutcome, EccCodec};
pub use self::metadata::{EccMetadata, EccMode};
pub use self::policy::AdaptiveEccPolicy;
