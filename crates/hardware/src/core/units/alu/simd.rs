//! Packed-integer SIMD operations.
//!
//! Registers are split into 2 lanes of 32 bits or 4 lanes of 16 bits,
//! lane 0 least significant. Add, subtract and multiply wrap per lane;
//! a zero divisor produces 0 in its own lane only. No flag is reported.

use crate::common::lanes::{map_halves, map_words};
use crate::isa::opcode::Opcode;

const LOW_WORD: u64 = 0xFFFF_FFFF;
const HIGH_WORD: u64 = 0xFFFF_FFFF_0000_0000;

fn div32(x: u32, y: u32) -> u32 {
    let (x, y) = (x as i32, y as i32);
    if y == 0 { 0 } else { x.wrapping_div(y) as u32 }
}

fn rem32(x: u32, y: u32) -> u32 {
    let (x, y) = (x as i32, y as i32);
    if y == 0 { 0 } else { x.wrapping_rem(y) as u32 }
}

fn div16(x: u16, y: u16) -> u16 {
    let (x, y) = (x as i16, y as i16);
    if y == 0 { 0 } else { x.wrapping_div(y) as u16 }
}

fn rem16(x: u16, y: u16) -> u16 {
    let (x, y) = (x as i16, y as i16);
    if y == 0 { 0 } else { x.wrapping_rem(y) as u16 }
}

/// Executes a packed-integer operation.
///
/// # Arguments
///
/// * `op` - SIMD opcode.
/// * `a`  - First packed operand.
/// * `b`  - Second packed operand.
///
/// # Returns
///
/// The packed result, or `0` for non-SIMD opcodes.
pub fn execute(op: Opcode, a: u64, b: u64) -> u64 {
    match op {
        Opcode::SimdAdd32 => map_words(a, b, u32::wrapping_add),
        Opcode::SimdSub32 => map_words(a, b, u32::wrapping_sub),
        Opcode::SimdMul32 => map_words(a, b, u32::wrapping_mul),
        Opcode::SimdDiv32 => map_words(a, b, div32),
        Opcode::SimdRem32 => map_words(a, b, rem32),
        Opcode::SimdLoad32 => ((a & LOW_WORD) << 32) | (b & LOW_WORD),
        Opcode::SimdAdd16 => map_halves(a, b, u16::wrapping_add),
        Opcode::SimdSub16 => map_halves(a, b, u16::wrapping_sub),
        Opcode::SimdMul16 => map_halves(a, b, u16::wrapping_mul),
        Opcode::SimdDiv16 => map_halves(a, b, div16),
        Opcode::SimdRem16 => map_halves(a, b, rem16),
        Opcode::SimdLoad16Upper => b & HIGH_WORD,
        Opcode::SimdLoad16Lower => b & LOW_WORD,
        _ => 0,
    }
}
