//! Execution units.
//!
//! This module contains the integer ALU, the scalar and packed
//! floating-point units, and the SEC-DED codec with its adaptive policy.

/// Arithmetic Logic Unit for integer and packed-integer operations.
pub mod alu;

/// SEC-DED codec and adaptive protection policy.
pub mod ecc;

/// Floating-Point Units for IEEE 754 scalar and packed operations.
pub mod fpu;
