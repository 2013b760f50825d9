//! Instruction-set surface of the execution core.
//!
//! Decoding of instruction words is the caller's concern; this module only
//! defines the operation selectors the units accept.

/// Closed opcode enumeration, families and mnemonics.
pub mod opcode;

pub use opcode::{ExecUnit, Opcode, OpcodeFamily};
