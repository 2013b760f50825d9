//! Packed-lane extraction and assembly.
//!
//! A 64-bit register is viewed either as two 32-bit lanes or four 16-bit
//! lanes. Lane 0 is always the least-significant lane.

/// Number of 16-bit lanes in a register.
pub const HALF_LANES: usize = 4;

/// Number of 32-bit lanes in a register.
pub const WORD_LANES: usize = 2;

const HALF_MASK: u64 = 0xFFFF;
const WORD_MASK: u64 = 0xFFFF_FFFF;

/// Splits a register into four 16-bit lanes.
#[inline]
pub const fn split_halves(reg: u64) -> [u16; HALF_LANES] {
    [
        (reg & HALF_MASK) as u16,
        ((reg >> 16) & HALF_MASK) as u16,
        ((reg >> 32) & HALF_MASK) as u16,
        (reg >> 48) as u16,
    ]
}

/// Reassembles four 16-bit lanes into a register.
#[inline]
pub const fn join_halves(lanes: [u16; HALF_LANES]) -> u64 {
    (lanes[0] as u64)
        | ((lanes[1] as u64) << 16)
        | ((lanes[2] as u64) << 32)
        | ((lanes[3] as u64) << 48)
}

/// Splits a register into its low and high 32-bit lanes.
#[inline]
pub const fn split_words(reg: u64) -> [u32; WORD_LANES] {
    [(reg & WORD_MASK) as u32, (reg >> 32) as u32]
}

/// Reassembles two 32-bit lanes into a register.
#[inline]
pub const fn join_words(lanes: [u32; WORD_LANES]) -> u64 {
    (lanes[0] as u64) | ((lanes[1] as u64) << 32)
}

/// Applies `f` lane-wise to two registers viewed as four 16-bit lanes.
#[inline]
pub fn map_halves(a: u64, b: u64, mut f: impl FnMut(u16, u16) -> u16) -> u64 {
    let (la, lb) = (split_halves(a), split_halves(b));
    join_halves(std::array::from_fn(|i| f(la[i], lb[i])))
}

/// Applies `f` lane-wise to two registers viewed as two 32-bit lanes.
#[inline]
pub fn map_words(a: u64, b: u64, mut f: impl FnMut(u32, u32) -> u32) -> u64 {
    let (la, lb) = (split_words(a), split_words(b));
    join_words(std::array::from_fn(|i| f(la[i], lb[i])))
}
