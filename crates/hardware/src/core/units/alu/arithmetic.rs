//! ALU arithmetic operations.
//!
//! Implements integer addition, subtraction, multiplication, division and
//! remainder for 64-bit operands and their 32-bit "w" variants.
//!
//! All 32-bit results are sign-extended from bit 31 to 64 bits. The
//! returned flag reports signed overflow for add/sub/mul (the wrapped
//! result is still produced) and the saturated `MIN / -1` quotient.
//! Division and remainder by zero return `(0, false)`.

use crate::isa::opcode::Opcode;

/// Number of bits in XLEN (used for high-multiply shift).
const XLEN_BITS: u32 = 64;

/// Sign-extends a 32-bit result to 64 bits.
#[inline]
const fn sext32(value: i32) -> u64 {
    value as i64 as u64
}

/// Executes an integer arithmetic operation.
///
/// # Arguments
///
/// * `op` - The operation to perform (must be an arithmetic variant).
/// * `a`  - First operand (64-bit value).
/// * `b`  - Second operand (64-bit value).
///
/// # Returns
///
/// `(result, flag)`. Returns `(0, false)` for non-arithmetic opcodes.
pub fn execute(op: Opcode, a: u64, b: u64) -> (u64, bool) {
    match op {
        Opcode::Add => {
            let (sum, overflow) = (a as i64).overflowing_add(b as i64);
            (sum as u64, overflow)
        }
        Opcode::Addw => {
            let (sum, overflow) = (a as i32).overflowing_add(b as i32);
            (sext32(sum), overflow)
        }
        Opcode::Sub => {
            let (diff, overflow) = (a as i64).overflowing_sub(b as i64);
            (diff as u64, overflow)
        }
        Opcode::Subw => {
            let (diff, overflow) = (a as i32).overflowing_sub(b as i32);
            (sext32(diff), overflow)
        }
        Opcode::Mul => {
            let (product, overflow) = (a as i64).overflowing_mul(b as i64);
            (product as u64, overflow)
        }
        Opcode::Mulw => {
            let (product, overflow) = (a as i32).overflowing_mul(b as i32);
            (sext32(product), overflow)
        }
        Opcode::Mulh => (
            (((a as i64 as i128) * (b as i64 as i128)) >> XLEN_BITS) as u64,
            false,
        ),
        // Signed × unsigned: sign-extend `a` through i64, zero-extend `b`.
        Opcode::Mulhsu => (
            (((a as i64 as i128) * (b as i128)) >> XLEN_BITS) as u64,
            false,
        ),
        Opcode::Mulhu => ((((a as u128) * (b as u128)) >> XLEN_BITS) as u64, false),
        Opcode::Div => {
            let (dividend, divisor) = (a as i64, b as i64);
            if divisor == 0 {
                (0, false)
            } else if dividend == i64::MIN && divisor == -1 {
                (i64::MAX as u64, true)
            } else {
                ((dividend / divisor) as u64, false)
            }
        }
        Opcode::Divw => {
            let (dividend, divisor) = (a as i32, b as i32);
            if divisor == 0 {
                (0, false)
            } else if dividend == i32::MIN && divisor == -1 {
                (sext32(i32::MAX), true)
            } else {
                (sext32(dividend / divisor), false)
            }
        }
        Opcode::Divu => {
            if b == 0 {
                (0, false)
            } else {
                (a / b, false)
            }
        }
        Opcode::Divuw => {
            let (dividend, divisor) = (a as u32, b as u32);
            if divisor == 0 {
                (0, false)
            } else {
                (sext32((dividend / divisor) as i32), false)
            }
        }
        Opcode::Rem => {
            let (dividend, divisor) = (a as i64, b as i64);
            if divisor == 0 {
                (0, false)
            } else {
                (dividend.wrapping_rem(divisor) as u64, false)
            }
        }
        Opcode::Remw => {
            let (dividend, divisor) = (a as i32, b as i32);
            if divisor == 0 {
                (0, false)
            } else {
                (sext32(dividend.wrapping_rem(divisor)), false)
            }
        }
        Opcode::Remu => {
            if b == 0 {
                (0, false)
            } else {
                (a % b, false)
            }
        }
        Opcode::Remuw => {
            let (dividend, divisor) = (a as u32, b as u32);
            if divisor == 0 {
                (0, false)
            } else {
                (sext32((dividend % divisor) as i32), false)
            }
        }
        _ => (0, false),
    }
}
