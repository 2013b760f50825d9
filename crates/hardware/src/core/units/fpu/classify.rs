//! FCLASS: ten-bit classification mask.
//!
//! Exactly one bit is set for any input:
//!
//! | Bit | Class                 |
//! |-----|-----------------------|
//! |  0  | negative infinity     |
//! |  1  | negative normal       |
//! |  2  | negative subnormal    |
//! |  3  | negative zero         |
//! |  4  | positive zero         |
//! |  5  | positive subnormal    |
//! |  6  | positive normal       |
//! |  7  | positive infinity     |
//! |  8  | signaling NaN         |
//! |  9  | quiet NaN             |

use super::softfloat::Format;

/// Negative infinity.
pub const NEG_INF: u64 = 1 << 0;
/// Negative normal number.
pub const NEG_NORMAL: u64 = 1 << 1;
/// Negative subnormal number.
pub const NEG_SUBNORMAL: u64 = 1 << 2;
/// Negative zero.
pub const NEG_ZERO: u64 = 1 << 3;
/// Positive zero.
pub const POS_ZERO: u64 = 1 << 4;
/// Positive subnormal number.
pub const POS_SUBNORMAL: u64 = 1 << 5;
/// Positive normal number.
pub const POS_NORMAL: u64 = 1 << 6;
/// Positive infinity.
pub const POS_INF: u64 = 1 << 7;
/// Signaling NaN.
pub const SIGNALING_NAN: u64 = 1 << 8;
/// Quiet NaN.
pub const QUIET_NAN: u64 = 1 << 9;

/// Classifies `bits` as an encoding of `fmt`.
pub const fn classify(fmt: Format, bits: u64) -> u64 {
    let negative = fmt.is_negative(bits);
    if fmt.is_nan(bits) {
        return if fmt.is_signaling_nan(bits) {
            SIGNALING_NAN
        } else {
            QUIET_NAN
        };
    }
    match (
        negative,
        fmt.is_infinite(bits),
        fmt.is_zero(bits),
        fmt.is_subnormal(bits),
    ) {
        (true, true, _, _) => NEG_INF,
        (false, true, _, _) => POS_INF,
        (true, _, true, _) => NEG_ZERO,
        (false, _, true, _) => POS_ZERO,
        (true, _, _, true) => NEG_SUBNORMAL,
        (false, _, _, true) => POS_SUBNORMAL,
        (true, _, _, _) => NEG_NORMAL,
        (false, _, _, _) => POS_NORMAL,
    }
}
