//! Bit-exact execution units for a processor simulator.
//!
//! This crate implements the arithmetic core of a simulated processor with the following:
//! 1. **Integer:** 64-bit and 32-bit arithmetic with overflow reporting, shifts, comparisons and packed-integer lanes.
//! 2. **Floating point:** Single and double precision IEEE 754 under a caller-selected rounding mode, with sticky exception flags.
//! 3. **Packed floating point:** Four bfloat16 lanes and two binary32 lanes with range clamping.
//! 4. **ECC:** Hamming SEC-DED protection of a 32-bit word and an adaptive policy driven by register metadata.
//! 5. **Dispatch:** A thin reference layer routing each opcode to the unit that owns it.
//!
//! No operation faults: numeric conditions travel in return values and flags.

/// Common types (errors, lane packing).
pub mod common;
/// Core configuration (fault injection, ECC policy thresholds).
pub mod config;
/// Execution units and dispatch.
pub mod core;
/// Opcode set and its partition into families and units.
pub mod isa;

/// Root configuration type; use `Config::default()` or `Config::from_json`.
pub use crate::config::Config;
/// Reference dispatch over every unit.
pub use crate::core::{ExecOutcome, ExecutionCore};
/// Operation selector.
pub use crate::isa::Opcode;
