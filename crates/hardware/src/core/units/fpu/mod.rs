//! Floating-Point Units.
//!
//! This module implements the scalar floating-point unit, instantiated once
//! per precision, and the packed floating unit for bfloat16 and 2xf32 lanes.
//! Every call runs inside an [`fenv::FpEnvGuard`] that installs the caller's
//! rounding mode and restores the previous environment on exit.
//!
//! Operations are organized into submodules:
//! - [`exception_flags`]: Sticky exception flag byte.
//! - [`rounding_modes`]: Rounding mode encoding.
//! - [`fenv`]: Thread-local rounding/exception environment and its guard.
//! - [`softfloat`]: Exact, correctly rounded arithmetic on raw encodings.
//! - [`nan_handling`]: `minNum`/`maxNum` selection.
//! - [`classify`]: FCLASS bitmask.
//! - [`packed`] and [`bfloat16`]: Packed lane operations.

/// Floating-point exception flag types.
pub mod exception_flags;

/// Rounding mode definitions.
pub mod rounding_modes;

/// Ambient floating-point environment.
pub mod fenv;

/// Soft-float arithmetic core.
pub mod softfloat;

/// NaN-aware min/max.
pub mod nan_handling;

/// Ten-way classification.
pub mod classify;

/// bfloat16 lane conversions.
pub mod bfloat16;

/// Packed bfloat16 and 2xf32 unit.
pub mod packed;

mod scalar;

use std::cmp::Ordering;
use std::fmt;
use std::marker::PhantomData;

use tracing::trace;

use crate::isa::opcode::{Opcode, OpcodeFamily};

use self::exception_flags::FpFlags;
use self::fenv::FpEnvGuard;
use self::rounding_modes::RoundingMode;
use self::scalar::{ScalarOp, sign_extend};
use self::softfloat::{Format, IntTarget};

pub use self::packed::PackedFloatUnit;

/// Operand precision of a [`FloatUnit`].
pub trait Precision: fmt::Debug + Default + Copy {
    /// Encoding of the operands.
    const FORMAT: Format;
    /// Opcode family this precision executes.
    const FAMILY: OpcodeFamily;
}

/// IEEE 754 binary32 held in the low 32 bits of a register.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Single;

/// IEEE 754 binary64 occupying the whole register.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Double;

impl Precision for Single {
    const FORMAT: Format = Format::SINGLE;
    const FAMILY: OpcodeFamily = OpcodeFamily::ScalarSingle;
}

impl Precision for Double {
    const FORMAT: Format = Format::DOUBLE;
    const FAMILY: OpcodeFamily = OpcodeFamily::ScalarDouble;
}

/// Scalar floating-point unit for one precision.
///
/// The unit holds no state; the rounding mode is borrowed from the caller
/// for the duration of each call.
///
/// # Examples
///
/// ```
/// use alusim_core::core::units::fpu::{DoubleFpu, rounding_modes::RoundingMode};
/// use alusim_core::isa::Opcode;
///
/// let fpu = DoubleFpu::new();
/// let (bits, flags) = fpu.evaluate(
///     Opcode::FMulD,
///     2.0f64.to_bits(),
///     3.5f64.to_bits(),
///     0,
///     RoundingMode::Rne,
/// );
/// assert_eq!(f64::from_bits(bits), 7.0);
/// assert!(flags.is_empty());
/// ```
#[derive(Clone, Copy, Default, PartialEq, Eq)]
pub struct FloatUnit<P: Precision> {
    _precision: PhantomData<P>,
}

/// Single-precision unit.
pub type SingleFpu = FloatUnit<Single>;

/// Double-precision unit.
pub type DoubleFpu = FloatUnit<Double>;

impl<P: Precision> fmt::Debug for FloatUnit<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FloatUnit")
            .field("precision", &P::default())
            .finish()
    }
}

impl<P: Precision> FloatUnit<P> {
    /// Creates a unit.
    pub const fn new() -> Self {
        Self {
            _precision: PhantomData,
        }
    }

    /// Executes a scalar floating-point operation.
    ///
    /// # Arguments
    ///
    /// * `op` - Scalar opcode of this unit's precision.
    /// * `a` - First operand bits.
    /// * `b` - Second operand bits.
    /// * `c` - Addend for the fused multiply-add family; ignored otherwise.
    /// * `rm` - Rounding mode installed for the duration of the call.
    ///
    /// # Returns
    ///
    /// `(result, flags)`. Single-precision results occupy the low 32 bits
    /// with the upper half zero, except integer results, which are
    /// sign-extended. An opcode of another family yields `(0, NONE)`.
    pub fn evaluate(&self, op: Opcode, a: u64, b: u64, c: u64, rm: RoundingMode) -> (u64, FpFlags) {
        if op.family() != P::FAMILY {
            return (0, FpFlags::NONE);
        }
        let Some(kind) = ScalarOp::decode(op) else {
            return (0, FpFlags::NONE);
        };

        let fmt = P::FORMAT;
        let int_operand = a;
        let mask = fmt.value_mask();
        let (a, b, c) = (a & mask, b & mask, c & mask);

        let env = FpEnvGuard::enter(rm);
        let mut flags = FpFlags::NONE;

        let result = match kind {
            ScalarOp::FMAdd => softfloat::fused_mul_add(fmt, a, b, c),
            ScalarOp::FMSub => softfloat::fused_mul_add(fmt, a, b, fmt.negate(c)),
            ScalarOp::FNMAdd => softfloat::fused_mul_add(fmt, fmt.negate(a), b, fmt.negate(c)),
            ScalarOp::FNMSub => softfloat::fused_mul_add(fmt, fmt.negate(a), b, c),
            ScalarOp::Add => softfloat::add(fmt, a, b),
            ScalarOp::Sub => softfloat::sub(fmt, a, b),
            ScalarOp::Mul => softfloat::mul(fmt, a, b),
            ScalarOp::Div => {
                if fmt.is_zero(b) {
                    flags |= FpFlags::DZ;
                    fmt.canonical_nan()
                } else {
                    softfloat::div(fmt, a, b)
                }
            }
            ScalarOp::Sqrt => {
                if fmt.is_negative(a) && !fmt.is_zero(a) && !fmt.is_nan(a) {
                    flags |= FpFlags::NV;
                    fmt.canonical_nan()
                } else {
                    softfloat::sqrt(fmt, a)
                }
            }
            ScalarOp::ToInt { signed, width } => {
                let value = softfloat::to_int(fmt, a, IntTarget { signed, width });
                sign_extend(value as u64, width)
            }
            ScalarOp::FromInt { signed, width } => {
                let value = match (signed, width) {
                    (true, 32) => i128::from(int_operand as i32),
                    (false, 32) => i128::from(int_operand as u32),
                    (true, _) => i128::from(int_operand as i64),
                    (false, _) => i128::from(int_operand),
                };
                softfloat::from_int(fmt, value < 0, value.unsigned_abs() as u64)
            }
            ScalarOp::SgnJ => (a & !fmt.sign_bit()) | (b & fmt.sign_bit()),
            ScalarOp::SgnJN => (a & !fmt.sign_bit()) | (!b & fmt.sign_bit()),
            ScalarOp::SgnJX => a ^ (b & fmt.sign_bit()),
            ScalarOp::Min => nan_handling::fmin(fmt, a, b),
            ScalarOp::Max => nan_handling::fmax(fmt, a, b),
            ScalarOp::Eq | ScalarOp::Lt | ScalarOp::Le => {
                let holds = softfloat::compare(fmt, a, b).is_some_and(|ord| match kind {
                    ScalarOp::Eq => ord == Ordering::Equal,
                    ScalarOp::Lt => ord == Ordering::Less,
                    _ => ord != Ordering::Greater,
                });
                u64::from(holds)
            }
            ScalarOp::Class => return (classify::classify(fmt, a), flags),
            ScalarOp::MoveToInt => return (sign_extend(a, fmt.width()), flags),
            ScalarOp::MoveFromInt => return (a, flags),
            ScalarOp::WidenSingle => {
                softfloat::convert(Format::SINGLE, fmt, a & Format::SINGLE.value_mask())
            }
            ScalarOp::NarrowToSingle => softfloat::convert(fmt, Format::SINGLE, a),
        };

        flags |= env.raised();
        trace!(%op, result = format_args!("{result:#x}"), %flags, "fpu");
        (result, flags)
    }
}
