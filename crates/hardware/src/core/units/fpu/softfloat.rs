//! Exact binary floating-point arithmetic on raw bit patterns.
//!
//! Every operation unpacks its operands into an exact integer significand
//! and exponent, computes the exact (or exact-plus-sticky) result in 128-bit
//! integer arithmetic, and rounds once according to the ambient rounding
//! mode in [`super::fenv`]. Exceptions are raised into the same environment.
//!
//! The routines are generic over a [`Format`] so the same code serves:
//! 1. **Single** (`f32`, 8-bit exponent, 23-bit fraction).
//! 2. **Double** (`f64`, 11-bit exponent, 52-bit fraction).
//! 3. **Bfloat16** (8-bit exponent, 7-bit fraction), the narrowing target
//!    of packed bfloat16 lanes.
//!
//! All NaN results are the canonical quiet NaN of the destination format.
//! Signaling NaN operands raise Invalid Operation.

use std::cmp::Ordering;

use super::exception_flags::FpFlags;
use super::fenv;
use super::rounding_modes::RoundingMode;

/// Parameters of a binary interchange format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Format {
    /// Width of the biased exponent field.
    pub exp_bits: u32,
    /// Width of the trailing significand field.
    pub frac_bits: u32,
}

impl Format {
    /// IEEE 754 binary32.
    pub const SINGLE: Self = Self {
        exp_bits: 8,
        frac_bits: 23,
    };

    /// IEEE 754 binary64.
    pub const DOUBLE: Self = Self {
        exp_bits: 11,
        frac_bits: 52,
    };

    /// Brain floating point: binary32 with the fraction truncated to 7 bits.
    pub const BFLOAT16: Self = Self {
        exp_bits: 8,
        frac_bits: 7,
    };

    /// Total encoded width in bits.
    pub const fn width(self) -> u32 {
        1 + self.exp_bits + self.frac_bits
    }

    /// Mask covering every encoded bit.
    pub const fn value_mask(self) -> u64 {
        if self.width() == 64 {
            u64::MAX
        } else {
            (1 << self.width()) - 1
        }
    }

    const fn bias(self) -> i32 {
        (1 << (self.exp_bits - 1)) - 1
    }

    const fn emin(self) -> i32 {
        1 - self.bias()
    }

    const fn emax(self) -> i32 {
        self.bias()
    }

    const fn exp_field_max(self) -> u64 {
        (1 << self.exp_bits) - 1
    }

    const fn frac_mask(self) -> u64 {
        (1 << self.frac_bits) - 1
    }

    /// Sign bit of the encoding.
    pub const fn sign_bit(self) -> u64 {
        1 << (self.exp_bits + self.frac_bits)
    }

    const fn quiet_bit(self) -> u64 {
        1 << (self.frac_bits - 1)
    }

    /// Canonical quiet NaN: positive, quiet bit set, zero payload.
    pub const fn canonical_nan(self) -> u64 {
        (self.exp_field_max() << self.frac_bits) | self.quiet_bit()
    }

    /// Infinity with the given sign.
    pub const fn infinity(self, negative: bool) -> u64 {
        self.signed(negative, self.exp_field_max() << self.frac_bits)
    }

    /// Largest finite magnitude with the given sign.
    pub const fn max_finite(self, negative: bool) -> u64 {
        self.signed(
            negative,
            ((self.exp_field_max() - 1) << self.frac_bits) | self.frac_mask(),
        )
    }

    /// Zero with the given sign.
    pub const fn zero(self, negative: bool) -> u64 {
        self.signed(negative, 0)
    }

    const fn signed(self, negative: bool, magnitude: u64) -> u64 {
        if negative {
            magnitude | self.sign_bit()
        } else {
            magnitude
        }
    }

    /// Returns true if the sign bit of `bits` is set.
    pub const fn is_negative(self, bits: u64) -> bool {
        bits & self.sign_bit() != 0
    }

    const fn exp_field(self, bits: u64) -> u64 {
        (bits >> self.frac_bits) & self.exp_field_max()
    }

    /// Returns true if `bits` encodes any NaN.
    pub const fn is_nan(self, bits: u64) -> bool {
        self.exp_field(bits) == self.exp_field_max() && bits & self.frac_mask() != 0
    }

    /// Returns true if `bits` encodes a signaling NaN.
    pub const fn is_signaling_nan(self, bits: u64) -> bool {
        self.is_nan(bits) && bits & self.quiet_bit() == 0
    }

    /// Returns true if `bits` encodes an infinity of either sign.
    pub const fn is_infinite(self, bits: u64) -> bool {
        self.exp_field(bits) == self.exp_field_max() && bits & self.frac_mask() == 0
    }

    /// Returns true if `bits` encodes a zero of either sign.
    pub const fn is_zero(self, bits: u64) -> bool {
        bits & (self.value_mask() & !self.sign_bit()) == 0
    }

    /// Returns true if `bits` encodes a subnormal number.
    pub const fn is_subnormal(self, bits: u64) -> bool {
        self.exp_field(bits) == 0 && bits & self.frac_mask() != 0
    }

    /// Flips the sign of `bits`.
    pub const fn negate(self, bits: u64) -> u64 {
        bits ^ self.sign_bit()
    }
}

/// Decoded operand class with exact magnitude for finite non-zero values.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Value {
    Nan { signaling: bool },
    Inf { negative: bool },
    Zero { negative: bool },
    Finite(Term),
}

/// Exact finite magnitude `sig * 2^exp`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Term {
    negative: bool,
    exp: i32,
    sig: u128,
}

/// Significand position that addition aligns both operands to.
const ALIGN_MSB: u32 = 120;

impl Term {
    fn msb(self) -> u32 {
        127 - self.sig.leading_zeros()
    }

    fn aligned(self) -> Self {
        let shift = ALIGN_MSB - self.msb();
        Self {
            negative: self.negative,
            exp: self.exp - shift as i32,
            sig: self.sig << shift,
        }
    }
}

/// Intermediate result prior to rounding.
///
/// The true magnitude lies in `[sig, sig + 1) * 2^exp`, strictly above
/// `sig * 2^exp` when `sticky` is set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Exact {
    negative: bool,
    exp: i32,
    sig: u128,
    sticky: bool,
}

impl From<Term> for Exact {
    fn from(term: Term) -> Self {
        Self {
            negative: term.negative,
            exp: term.exp,
            sig: term.sig,
            sticky: false,
        }
    }
}

/// Position of the discarded part relative to half a unit in the last place.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Remainder {
    Zero,
    Below,
    Half,
    Above,
}

fn unpack(fmt: Format, bits: u64) -> Value {
    let negative = fmt.is_negative(bits);
    let exp_field = fmt.exp_field(bits);
    let frac = bits & fmt.frac_mask();
    if exp_field == fmt.exp_field_max() {
        return if frac == 0 {
            Value::Inf { negative }
        } else {
            Value::Nan {
                signaling: frac & fmt.quiet_bit() == 0,
            }
        };
    }
    if exp_field == 0 {
        if frac == 0 {
            return Value::Zero { negative };
        }
        return Value::Finite(Term {
            negative,
            exp: fmt.emin() - fmt.frac_bits as i32,
            sig: u128::from(frac),
        });
    }
    Value::Finite(Term {
        negative,
        exp: exp_field as i32 - fmt.bias() - fmt.frac_bits as i32,
        sig: u128::from(frac | (1 << fmt.frac_bits)),
    })
}

/// Splits `sig` at bit `shift`, returning the kept high part and the
/// classification of the discarded low part.
fn split_at(sig: u128, shift: i32, sticky: bool) -> (u128, Remainder) {
    if shift <= 0 {
        let kept = sig << shift.unsigned_abs();
        return (kept, if sticky { Remainder::Below } else { Remainder::Zero });
    }
    if shift >= 128 {
        let rem = if sig != 0 || sticky {
            Remainder::Below
        } else {
            Remainder::Zero
        };
        return (0, rem);
    }
    let shift = shift.unsigned_abs();
    let kept = sig >> shift;
    let low = sig & ((1u128 << shift) - 1);
    let half = 1u128 << (shift - 1);
    let rem = match low.cmp(&half) {
        Ordering::Less if low == 0 && !sticky => Remainder::Zero,
        Ordering::Less => Remainder::Below,
        Ordering::Equal if sticky => Remainder::Above,
        Ordering::Equal => Remainder::Half,
        Ordering::Greater => Remainder::Above,
    };
    (kept, rem)
}

fn rounds_up(mode: RoundingMode, negative: bool, kept: u128, rem: Remainder) -> bool {
    if rem == Remainder::Zero {
        return false;
    }
    match mode {
        RoundingMode::Rne => {
            rem == Remainder::Above || (rem == Remainder::Half && kept & 1 == 1)
        }
        RoundingMode::Rmm => matches!(rem, Remainder::Half | Remainder::Above),
        RoundingMode::Rtz => false,
        RoundingMode::Rdn => negative,
        RoundingMode::Rup => !negative,
    }
}

fn overflow_to_infinity(mode: RoundingMode, negative: bool) -> bool {
    match mode {
        RoundingMode::Rne | RoundingMode::Rmm => true,
        RoundingMode::Rtz => false,
        RoundingMode::Rdn => negative,
        RoundingMode::Rup => !negative,
    }
}

/// Rounds an exact non-zero intermediate into `fmt`.
fn round_pack(fmt: Format, x: Exact) -> u64 {
    debug_assert!(x.sig != 0);
    let mode = fenv::rounding_mode();
    let p = fmt.frac_bits as i32;
    let msb = 127 - x.sig.leading_zeros() as i32;
    let lead_exp = x.exp + msb;

    let mut quantum = lead_exp.max(fmt.emin()) - p;
    let (mut kept, rem) = split_at(x.sig, quantum - x.exp, x.sticky);
    let inexact = rem != Remainder::Zero;
    if rounds_up(mode, x.negative, kept, rem) {
        kept += 1;
    }
    if kept >> (p + 1) != 0 {
        kept >>= 1;
        quantum += 1;
    }

    if kept != 0 && quantum + p > fmt.emax() && kept >> p != 0 {
        fenv::raise(FpFlags::OF | FpFlags::NX);
        return if overflow_to_infinity(mode, x.negative) {
            fmt.infinity(x.negative)
        } else {
            fmt.max_finite(x.negative)
        };
    }

    if inexact {
        let mut flags = FpFlags::NX;
        if is_tiny_after_rounding(fmt, x, mode, lead_exp) {
            flags |= FpFlags::UF;
        }
        fenv::raise(flags);
    }

    if kept == 0 {
        return fmt.zero(x.negative);
    }
    if kept >> p == 0 {
        return fmt.signed(x.negative, kept as u64);
    }
    let biased = (quantum + p + fmt.bias()) as u64;
    fmt.signed(
        x.negative,
        (biased << fmt.frac_bits) | (kept as u64 & fmt.frac_mask()),
    )
}

/// Tininess is detected after rounding with an unbounded exponent range.
fn is_tiny_after_rounding(fmt: Format, x: Exact, mode: RoundingMode, lead_exp: i32) -> bool {
    let emin = fmt.emin();
    if lead_exp >= emin {
        return false;
    }
    if lead_exp < emin - 1 {
        return true;
    }
    let p = fmt.frac_bits as i32;
    let (mut kept, rem) = split_at(x.sig, lead_exp - p - x.exp, x.sticky);
    if rounds_up(mode, x.negative, kept, rem) {
        kept += 1;
    }
    kept >> (p + 1) == 0
}

fn invalid(fmt: Format) -> u64 {
    fenv::raise(FpFlags::NV);
    fmt.canonical_nan()
}

/// Returns the canonical NaN when any operand is a NaN, raising Invalid
/// Operation if any of them signals.
fn propagate_nan(fmt: Format, operands: &[Value]) -> Option<u64> {
    let mut any_nan = false;
    let mut signaling = false;
    for value in operands {
        if let Value::Nan { signaling: s } = *value {
            any_nan = true;
            signaling |= s;
        }
    }
    if signaling {
        fenv::raise(FpFlags::NV);
    }
    any_nan.then(|| fmt.canonical_nan())
}

/// Exact sum of two finite non-zero terms, `None` when it cancels to zero.
fn sum_exact(x: Term, y: Term) -> Option<Exact> {
    let (x, y) = (x.aligned(), y.aligned());
    let (big, small) = if x.exp >= y.exp { (x, y) } else { (y, x) };
    let distance = (big.exp - small.exp).unsigned_abs();
    let (small_sig, sticky) = if distance >= 128 {
        (0, small.sig != 0)
    } else {
        (
            small.sig >> distance,
            small.sig & ((1u128 << distance) - 1) != 0,
        )
    };

    if big.negative == small.negative {
        return Some(Exact {
            negative: big.negative,
            exp: big.exp,
            sig: big.sig + small_sig,
            sticky,
        });
    }
    if sticky {
        // Borrow one unit: the discarded fraction of `small` is strictly
        // inside (0, 1), so the difference lies strictly inside the next unit.
        return Some(Exact {
            negative: big.negative,
            exp: big.exp,
            sig: big.sig - small_sig - 1,
            sticky: true,
        });
    }
    match big.sig.cmp(&small_sig) {
        Ordering::Greater => Some(Exact {
            negative: big.negative,
            exp: big.exp,
            sig: big.sig - small_sig,
            sticky: false,
        }),
        Ordering::Less => Some(Exact {
            negative: small.negative,
            exp: big.exp,
            sig: small_sig - big.sig,
            sticky: false,
        }),
        Ordering::Equal => None,
    }
}

/// Sign of an exact zero sum of operands with opposite signs.
fn cancellation_is_negative() -> bool {
    fenv::rounding_mode() == RoundingMode::Rdn
}

fn add_values(fmt: Format, a: Value, b: Value, a_bits: u64, b_bits: u64) -> u64 {
    if let Some(nan) = propagate_nan(fmt, &[a, b]) {
        return nan;
    }
    match (a, b) {
        (Value::Inf { negative: sa }, Value::Inf { negative: sb }) => {
            if sa == sb {
                fmt.infinity(sa)
            } else {
                invalid(fmt)
            }
        }
        (Value::Inf { negative }, _) | (_, Value::Inf { negative }) => fmt.infinity(negative),
        (Value::Zero { negative: sa }, Value::Zero { negative: sb }) => {
            fmt.zero(if sa == sb { sa } else { cancellation_is_negative() })
        }
        (Value::Zero { .. }, _) => b_bits,
        (_, Value::Zero { .. }) => a_bits,
        (Value::Finite(x), Value::Finite(y)) => match sum_exact(x, y) {
            Some(exact) => round_pack(fmt, exact),
            None => fmt.zero(cancellation_is_negative()),
        },
        (Value::Nan { .. }, _) | (_, Value::Nan { .. }) => fmt.canonical_nan(),
    }
}

/// `a + b`, correctly rounded.
pub fn add(fmt: Format, a: u64, b: u64) -> u64 {
    add_values(fmt, unpack(fmt, a), unpack(fmt, b), a, b)
}

/// `a - b`, correctly rounded.
pub fn sub(fmt: Format, a: u64, b: u64) -> u64 {
    let neg_b = fmt.negate(b);
    add_values(fmt, unpack(fmt, a), unpack(fmt, neg_b), a, neg_b)
}

/// `a * b`, correctly rounded.
pub fn mul(fmt: Format, a: u64, b: u64) -> u64 {
    let (va, vb) = (unpack(fmt, a), unpack(fmt, b));
    if let Some(nan) = propagate_nan(fmt, &[va, vb]) {
        return nan;
    }
    let negative = fmt.is_negative(a) != fmt.is_negative(b);
    match (va, vb) {
        (Value::Inf { .. }, Value::Zero { .. }) | (Value::Zero { .. }, Value::Inf { .. }) => {
            invalid(fmt)
        }
        (Value::Inf { .. }, _) | (_, Value::Inf { .. }) => fmt.infinity(negative),
        (Value::Zero { .. }, _) | (_, Value::Zero { .. }) => fmt.zero(negative),
        (Value::Finite(x), Value::Finite(y)) => round_pack(
            fmt,
            Exact {
                negative,
                exp: x.exp + y.exp,
                sig: x.sig * y.sig,
                sticky: false,
            },
        ),
        (Value::Nan { .. }, _) | (_, Value::Nan { .. }) => fmt.canonical_nan(),
    }
}

/// `a / b`, correctly rounded.
///
/// A finite dividend over zero yields a signed infinity and raises Divide
/// by Zero.
pub fn div(fmt: Format, a: u64, b: u64) -> u64 {
    let (va, vb) = (unpack(fmt, a), unpack(fmt, b));
    if let Some(nan) = propagate_nan(fmt, &[va, vb]) {
        return nan;
    }
    let negative = fmt.is_negative(a) != fmt.is_negative(b);
    match (va, vb) {
        (Value::Inf { .. }, Value::Inf { .. }) | (Value::Zero { .. }, Value::Zero { .. }) => {
            invalid(fmt)
        }
        (Value::Inf { .. }, _) => fmt.infinity(negative),
        (_, Value::Inf { .. }) | (Value::Zero { .. }, _) => fmt.zero(negative),
        (_, Value::Zero { .. }) => {
            fenv::raise(FpFlags::DZ);
            fmt.infinity(negative)
        }
        (Value::Finite(x), Value::Finite(y)) => {
            let shift = 125 - x.msb();
            let dividend = x.sig << shift;
            round_pack(
                fmt,
                Exact {
                    negative,
                    exp: x.exp - shift as i32 - y.exp,
                    sig: dividend / y.sig,
                    sticky: dividend % y.sig != 0,
                },
            )
        }
        (Value::Nan { .. }, _) | (_, Value::Nan { .. }) => fmt.canonical_nan(),
    }
}

fn isqrt(n: u128) -> u128 {
    let mut op = n;
    let mut res = 0u128;
    let mut one = 1u128 << 126;
    while one > op {
        one >>= 2;
    }
    while one != 0 {
        if op >= res + one {
            op -= res + one;
            res = (res >> 1) + one;
        } else {
            res >>= 1;
        }
        one >>= 2;
    }
    res
}

/// Square root, correctly rounded. `sqrt(-0) = -0`; other negatives are
/// invalid.
pub fn sqrt(fmt: Format, a: u64) -> u64 {
    let va = unpack(fmt, a);
    if let Some(nan) = propagate_nan(fmt, &[va]) {
        return nan;
    }
    match va {
        Value::Zero { .. } => a,
        Value::Inf { negative: false } => a,
        Value::Inf { negative: true } | Value::Nan { .. } => invalid(fmt),
        Value::Finite(x) if x.negative => invalid(fmt),
        Value::Finite(x) => {
            let mut shift = 124 - x.msb();
            if (x.exp - shift as i32).rem_euclid(2) != 0 {
                shift += 1;
            }
            let n = x.sig << shift;
            let root = isqrt(n);
            round_pack(
                fmt,
                Exact {
                    negative: false,
                    exp: (x.exp - shift as i32) / 2,
                    sig: root,
                    sticky: root * root != n,
                },
            )
        }
    }
}

/// Fused `a * b + c` with a single rounding.
pub fn fused_mul_add(fmt: Format, a: u64, b: u64, c: u64) -> u64 {
    let (va, vb, vc) = (unpack(fmt, a), unpack(fmt, b), unpack(fmt, c));
    let inf_times_zero = matches!(
        (va, vb),
        (Value::Inf { .. }, Value::Zero { .. }) | (Value::Zero { .. }, Value::Inf { .. })
    );
    if let Some(nan) = propagate_nan(fmt, &[va, vb, vc]) {
        if inf_times_zero {
            fenv::raise(FpFlags::NV);
        }
        return nan;
    }
    if inf_times_zero {
        return invalid(fmt);
    }

    let product_negative = fmt.is_negative(a) != fmt.is_negative(b);
    let product_inf = matches!(va, Value::Inf { .. }) || matches!(vb, Value::Inf { .. });
    if product_inf {
        return match vc {
            Value::Inf { negative } if negative != product_negative => invalid(fmt),
            _ => fmt.infinity(product_negative),
        };
    }
    if let Value::Inf { negative } = vc {
        return fmt.infinity(negative);
    }

    let product = match (va, vb) {
        (Value::Finite(x), Value::Finite(y)) => Some(Term {
            negative: product_negative,
            exp: x.exp + y.exp,
            sig: x.sig * y.sig,
        }),
        _ => None,
    };
    match (product, vc) {
        (None, Value::Zero { negative }) => fmt.zero(if negative == product_negative {
            negative
        } else {
            cancellation_is_negative()
        }),
        (None, _) => c,
        (Some(term), Value::Finite(addend)) => match sum_exact(term, addend) {
            Some(exact) => round_pack(fmt, exact),
            None => fmt.zero(cancellation_is_negative()),
        },
        (Some(term), _) => round_pack(fmt, term.into()),
    }
}

/// Truncated remainder `a - trunc(a / b) * b`, which is always exact.
///
/// The result carries the sign of `a`. Infinite dividends and zero divisors
/// are invalid.
pub fn rem(fmt: Format, a: u64, b: u64) -> u64 {
    let (va, vb) = (unpack(fmt, a), unpack(fmt, b));
    if let Some(nan) = propagate_nan(fmt, &[va, vb]) {
        return nan;
    }
    match (va, vb) {
        (Value::Inf { .. }, _) | (_, Value::Zero { .. }) => invalid(fmt),
        (Value::Zero { .. }, _) | (_, Value::Inf { .. }) => a,
        (Value::Finite(x), Value::Finite(y)) => {
            let Some((sig, exp)) = exact_remainder(x, y) else {
                return a;
            };
            if sig == 0 {
                return fmt.zero(x.negative);
            }
            round_pack(
                fmt,
                Exact {
                    negative: x.negative,
                    exp,
                    sig,
                    sticky: false,
                },
            )
        }
        (Value::Nan { .. }, _) | (_, Value::Nan { .. }) => fmt.canonical_nan(),
    }
}

/// Remainder of `|x| / |y|` as `(sig, exp)`, or `None` when `|x| < |y|`.
fn exact_remainder(x: Term, y: Term) -> Option<(u128, i32)> {
    let x_lead = x.exp + x.msb() as i32;
    let y_lead = y.exp + y.msb() as i32;
    if x_lead < y_lead {
        return None;
    }
    let distance = x.exp - y.exp;
    if distance < 0 {
        // Both leads are within one significand width, so the shift is small.
        let divisor = y.sig << distance.unsigned_abs();
        return Some((x.sig % divisor, x.exp));
    }
    let mut r = x.sig % y.sig;
    let mut remaining = distance.unsigned_abs();
    while remaining > 0 && r != 0 {
        let step = remaining.min(64);
        r = (r << step) % y.sig;
        remaining -= step;
    }
    Some((r, y.exp))
}

/// Converts between formats, rounding when narrowing.
pub fn convert(from: Format, to: Format, bits: u64) -> u64 {
    match unpack(from, bits) {
        Value::Nan { signaling } => {
            if signaling {
                fenv::raise(FpFlags::NV);
            }
            to.canonical_nan()
        }
        Value::Inf { negative } => to.infinity(negative),
        Value::Zero { negative } => to.zero(negative),
        Value::Finite(term) => round_pack(to, term.into()),
    }
}

/// Converts the integer `±magnitude` to `fmt`, rounding in the ambient mode.
///
/// Raises nothing: the caller's raised set is left as it was.
pub fn from_int(fmt: Format, negative: bool, magnitude: u64) -> u64 {
    if magnitude == 0 {
        return fmt.zero(false);
    }
    let before = fenv::raised();
    let bits = round_pack(
        fmt,
        Exact {
            negative,
            exp: 0,
            sig: u128::from(magnitude),
            sticky: false,
        },
    );
    fenv::clear_raised();
    fenv::raise(before);
    bits
}

/// Destination of a float-to-integer conversion.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IntTarget {
    /// Two's-complement signed destination.
    pub signed: bool,
    /// Destination width, 32 or 64.
    pub width: u32,
}

impl IntTarget {
    const fn bounds(self) -> (i128, i128) {
        if self.signed {
            (-(1i128 << (self.width - 1)), (1i128 << (self.width - 1)) - 1)
        } else {
            (0, (1i128 << self.width) - 1)
        }
    }
}

/// Rounds `bits` to an integer in the ambient mode and saturates into
/// `target`.
///
/// Out-of-range values, infinities and NaNs raise Invalid Operation and
/// saturate: NaN and positive overflow to the maximum, negative overflow to
/// the minimum. In-range inexact results raise Inexact.
pub fn to_int(fmt: Format, bits: u64, target: IntTarget) -> i128 {
    let (min, max) = target.bounds();
    let saturate = |negative: bool| {
        fenv::raise(FpFlags::NV);
        if negative { min } else { max }
    };
    match unpack(fmt, bits) {
        Value::Nan { .. } => saturate(false),
        Value::Inf { negative } => saturate(negative),
        Value::Zero { .. } => 0,
        Value::Finite(term) => {
            // Anything this large is out of range for a 64-bit destination.
            if term.exp > 70 {
                return saturate(term.negative);
            }
            let (mut kept, rem) = split_at(term.sig, -term.exp, false);
            if rounds_up(fenv::rounding_mode(), term.negative, kept, rem) {
                kept += 1;
            }
            let magnitude = kept as i128;
            let value = if term.negative { -magnitude } else { magnitude };
            if value < min || value > max {
                return saturate(term.negative);
            }
            if rem != Remainder::Zero {
                fenv::raise(FpFlags::NX);
            }
            value
        }
    }
}

/// Ordered comparison. `None` if either operand is a NaN. Raises nothing.
pub fn compare(fmt: Format, a: u64, b: u64) -> Option<Ordering> {
    if fmt.is_nan(a) || fmt.is_nan(b) {
        return None;
    }
    Some(order_key(fmt, a).cmp(&order_key(fmt, b)))
}

fn order_key(fmt: Format, bits: u64) -> i128 {
    let magnitude = i128::from(bits & fmt.value_mask() & !fmt.sign_bit());
    if fmt.is_negative(bits) {
        -magnitude
    } else {
        magnitude
    }
}
