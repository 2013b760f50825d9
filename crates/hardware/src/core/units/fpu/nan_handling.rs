//! IEEE 754-2008 `minNum`/`maxNum`.
//!
//! NaN payloads never survive an operation: every NaN result is the
//! canonical quiet NaN of its format (`0x7fc00000` single,
//! `0x7ff8000000000000` double).
//!
//! `minNum`/`maxNum` follow these rules:
//! 1. **One NaN operand**: the other operand is returned.
//! 2. **Two NaN operands**: the canonical NaN is returned.
//! 3. **Signed zeros**: `-0` orders below `+0`.
//! 4. **Signaling NaN**: any sNaN operand raises Invalid Operation.

use std::cmp::Ordering;

use super::exception_flags::FpFlags;
use super::fenv;
use super::softfloat::{self, Format};

fn select(fmt: Format, a: u64, b: u64, want_min: bool) -> u64 {
    if fmt.is_signaling_nan(a) || fmt.is_signaling_nan(b) {
        fenv::raise(FpFlags::NV);
    }
    match (fmt.is_nan(a), fmt.is_nan(b)) {
        (true, true) => fmt.canonical_nan(),
        (true, false) => b,
        (false, true) => a,
        (false, false) => {
            let ord = match softfloat::compare(fmt, a, b) {
                // -0 < +0 for selection purposes.
                Some(Ordering::Equal) => fmt.is_negative(b).cmp(&fmt.is_negative(a)),
                Some(ord) => ord,
                None => Ordering::Equal,
            };
            let b_wins = if want_min {
                ord == Ordering::Greater
            } else {
                ord == Ordering::Less
            };
            if b_wins { b } else { a }
        }
    }
}

/// IEEE 754-2008 `minNum` on raw encodings of `fmt`.
///
/// # Arguments
///
/// * `fmt` - Encoding of both operands.
/// * `a` - First operand bits.
/// * `b` - Second operand bits.
///
/// # Returns
///
/// The smaller operand, with NaN operands handled as described above.
#[inline]
pub fn fmin(fmt: Format, a: u64, b: u64) -> u64 {
    select(fmt, a, b, true)
}

/// IEEE 754-2008 `maxNum` on raw encodings of `fmt`.
///
/// # Arguments
///
/// * `fmt` - Encoding of both operands.
/// * `a` - First operand bits.
/// * `b` - Second operand bits.
///
/// # Returns
///
/// The larger operand, with NaN operands handled as described above.
#[inline]
pub fn fmax(fmt: Format, a: u64, b: u64) -> u64 {
    select(fmt, a, b, false)
}
