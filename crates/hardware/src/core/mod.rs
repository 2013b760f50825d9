//! Execution core.
//!
//! This module contains the execution units and the reference dispatch
//! layer that routes an opcode to its owning unit.

/// Reference dispatch over all units.
pub mod exec;

/// Execution units (integer ALU, scalar and packed FPU, ECC).
pub mod units;

pub use self::exec::{ExecOutcome, ExecutionCore};
