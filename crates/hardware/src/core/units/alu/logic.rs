//! ALU logical and comparison operations.
//!
//! Bitwise operations act on the full 64 bits. Comparisons return 0 or 1
//! in the low bit.

use crate::isa::opcode::Opcode;

/// Executes a bitwise logical or comparison operation.
///
/// # Arguments
///
/// * `op` - The operation to perform (And, Or, Xor, Slt, Sltu).
/// * `a`  - First operand.
/// * `b`  - Second operand.
///
/// # Returns
///
/// The 64-bit result, or `0` for unrecognized opcodes.
pub fn execute(op: Opcode, a: u64, b: u64) -> u64 {
    match op {
        Opcode::And => a & b,
        Opcode::Or => a | b,
        Opcode::Xor => a ^ b,
        Opcode::Slt => ((a as i64) < (b as i64)) as u64,
        Opcode::Sltu => (a < b) as u64,
        _ => 0,
    }
}
