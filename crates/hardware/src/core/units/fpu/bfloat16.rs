//! bfloat16 lane conversions.
//!
//! A bfloat16 value is the upper half of a binary32 encoding, so widening
//! is exact (append sixteen zero bits) and narrowing rounds away the low
//! half of the fraction in the ambient rounding mode.

use tracing::trace;

use super::softfloat::{self, Format};

/// Largest finite bfloat16 magnitude, `0x7F7F` (≈ 3.38953139e38).
pub const BF16_MAX: f32 = 3.389_531_389_251_535e38;

/// Bits of [`BF16_MAX`] as a binary32 encoding.
pub const BF16_MAX_F32_BITS: u32 = 0x7F7F_0000;

/// Canonical bfloat16 quiet NaN.
pub const BF16_CANONICAL_NAN: u16 = 0x7FC0;

const F32_SIGN: u32 = 0x8000_0000;
const F32_EXP_MASK: u32 = 0x7F80_0000;

/// Widens a bfloat16 lane to binary32 bits. Exact.
#[inline]
pub const fn to_f32_bits(lane: u16) -> u32 {
    (lane as u32) << 16
}

/// Narrows binary32 bits to bfloat16, rounding in the ambient mode.
///
/// Inexact narrowing raises Inexact (and Underflow when tiny) into the
/// ambient environment. NaNs become the canonical bfloat16 quiet NaN,
/// keeping their sign, and raise nothing.
#[inline]
pub fn from_f32_bits(bits: u32) -> u16 {
    if bits & !F32_SIGN > F32_EXP_MASK {
        return ((bits & F32_SIGN) >> 16) as u16 | BF16_CANONICAL_NAN;
    }
    softfloat::convert(Format::SINGLE, Format::BFLOAT16, u64::from(bits)) as u16
}

/// Clamps finite and infinite binary32 results into the bfloat16 range.
///
/// NaNs pass through unclamped.
#[inline]
pub fn clamp_to_range(bits: u32) -> u32 {
    let magnitude = bits & !F32_SIGN;
    if magnitude > F32_EXP_MASK || magnitude <= BF16_MAX_F32_BITS {
        return bits;
    }
    trace!(lane = format_args!("{bits:#010x}"), "bfloat16 lane clamped");
    (bits & F32_SIGN) | BF16_MAX_F32_BITS
}
