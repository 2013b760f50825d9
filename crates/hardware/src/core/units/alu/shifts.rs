//! ALU shift operations.
//!
//! 64-bit shifts use the low 6 bits of `b` as the shift amount; the 32-bit
//! "w" forms use the low 5 bits, operate on the low word and sign-extend
//! the result.

use crate::isa::opcode::Opcode;

/// Shift-amount mask for 64-bit shifts (6 bits).
const SHAMT_MASK_64: u64 = 0x3f;

/// Shift-amount mask for 32-bit shifts (5 bits).
const SHAMT_MASK_32: u64 = 0x1f;

/// Executes a shift operation.
///
/// # Arguments
///
/// * `op` - Sll, Sllw, Srl, Srlw, Sra or Sraw.
/// * `a`  - Value to shift.
/// * `b`  - Shift amount (masked).
///
/// # Returns
///
/// The shifted value, or `0` for non-shift opcodes.
pub fn execute(op: Opcode, a: u64, b: u64) -> u64 {
    let shamt64 = (b & SHAMT_MASK_64) as u32;
    let shamt32 = (b & SHAMT_MASK_32) as u32;
    match op {
        Opcode::Sll => a << shamt64,
        Opcode::Sllw => ((a as u32) << shamt32) as i32 as i64 as u64,
        Opcode::Srl => a >> shamt64,
        Opcode::Srlw => ((a as u32) >> shamt32) as i32 as i64 as u64,
        // Arithmetic shift: the cast through i64/i32 preserves the sign bit.
        Opcode::Sra => ((a as i64) >> shamt64) as u64,
        Opcode::Sraw => ((a as i32) >> shamt32) as i64 as u64,
        _ => 0,
    }
}
