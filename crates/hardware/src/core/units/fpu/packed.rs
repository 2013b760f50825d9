//! Packed floating-point unit.
//!
//! Two lane layouts share the scalar unit's rounding-mode scoping and flag
//! read-back:
//! 1. **bfloat16 x4**: each 16-bit lane is widened to binary32, computed,
//!    clamped to the bfloat16 finite range and narrowed back.
//! 2. **binary32 x2**: lane 0 is the low word, lane 1 the high word. Infinite
//!    lane results are clamped to `±f32::MAX` and force Overflow.
//!
//! Lanes never influence each other: a zero divisor in one lane only
//! affects that lane's result.

use tracing::trace;

use crate::common::lanes::{map_halves, map_words, split_halves};
use crate::isa::opcode::{Opcode, OpcodeFamily};

use super::bfloat16;
use super::exception_flags::FpFlags;
use super::fenv::FpEnvGuard;
use super::rounding_modes::RoundingMode;
use super::softfloat::{self, Format};

const F32_SIGN: u32 = 0x8000_0000;
const F32_MAX_BITS: u32 = 0x7F7F_FFFF;

/// Packed bfloat16 and binary32 lane unit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PackedFloatUnit;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum LaneOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
}

impl PackedFloatUnit {
    /// Creates a unit.
    pub const fn new() -> Self {
        Self
    }

    /// Executes a packed floating-point operation.
    ///
    /// # Arguments
    ///
    /// * `op` - bfloat16 or packed-f32 opcode.
    /// * `a` - First packed operand.
    /// * `b` - Second packed operand.
    /// * `c` - Accumulator for `vdotp.bf16` (binary32 in the low 32 bits).
    /// * `rm` - Rounding mode installed for the duration of the call.
    ///
    /// # Returns
    ///
    /// `(result, flags)`. Opcodes of other families yield `(0, NONE)`.
    pub fn evaluate(&self, op: Opcode, a: u64, b: u64, c: u64, rm: RoundingMode) -> (u64, FpFlags) {
        match op.family() {
            OpcodeFamily::PackedBf16 => Self::evaluate_bf16(op, a, b, c, rm),
            OpcodeFamily::PackedF32 => Self::evaluate_f32(op, a, b, rm),
            _ => (0, FpFlags::NONE),
        }
    }

    fn evaluate_bf16(op: Opcode, a: u64, b: u64, c: u64, rm: RoundingMode) -> (u64, FpFlags) {
        let lane_op = match op {
            Opcode::FAddBf16 => LaneOp::Add,
            Opcode::FSubBf16 => LaneOp::Sub,
            Opcode::FMulBf16 => LaneOp::Mul,
            Opcode::FDivBf16 => LaneOp::Div,
            Opcode::VDotpBf16 => return Self::dot_product_bf16(a, b, c, rm),
            _ => return (0, FpFlags::NONE),
        };

        let env = FpEnvGuard::enter(rm);
        let result = map_halves(a, b, |x, y| {
            let (x, y) = (
                u64::from(bfloat16::to_f32_bits(x)),
                u64::from(bfloat16::to_f32_bits(y)),
            );
            let wide = match lane_op {
                LaneOp::Div if Format::SINGLE.is_zero(y) => Format::SINGLE.canonical_nan(),
                _ => single_lane(lane_op, x, y),
            };
            bfloat16::from_f32_bits(bfloat16::clamp_to_range(wide as u32))
        });
        let flags = env.raised();
        trace!(%op, result = format_args!("{result:#018x}"), %flags, "packed bf16");
        (result, flags)
    }

    fn dot_product_bf16(a: u64, b: u64, c: u64, rm: RoundingMode) -> (u64, FpFlags) {
        let env = FpEnvGuard::enter(rm);
        let fmt = Format::SINGLE;
        let (xs, ys) = (split_halves(a), split_halves(b));
        let sum = xs
            .iter()
            .zip(ys.iter())
            .map(|(&x, &y)| {
                softfloat::mul(
                    fmt,
                    u64::from(bfloat16::to_f32_bits(x)),
                    u64::from(bfloat16::to_f32_bits(y)),
                )
            })
            .reduce(|acc, product| softfloat::add(fmt, acc, product))
            .unwrap_or(0);
        let result = softfloat::add(fmt, c & fmt.value_mask(), sum);
        (result, env.raised())
    }

    fn evaluate_f32(op: Opcode, a: u64, b: u64, rm: RoundingMode) -> (u64, FpFlags) {
        let lane_op = match op {
            Opcode::SimdfAdd32 => LaneOp::Add,
            Opcode::SimdfSub32 => LaneOp::Sub,
            Opcode::SimdfMul32 => LaneOp::Mul,
            Opcode::SimdfDiv32 => LaneOp::Div,
            Opcode::SimdfRem32 => LaneOp::Rem,
            Opcode::SimdfLd32 => return (((a & 0xFFFF_FFFF) << 32) | (b & 0xFFFF_FFFF), FpFlags::NONE),
            _ => return (0, FpFlags::NONE),
        };

        let env = FpEnvGuard::enter(rm);
        let fmt = Format::SINGLE;
        let mut flags = FpFlags::NONE;
        let result = map_words(a, b, |x, y| {
            let (x, y) = (u64::from(x), u64::from(y));
            let wide = match lane_op {
                LaneOp::Div if fmt.is_zero(y) => {
                    flags |= FpFlags::DZ;
                    fmt.canonical_nan()
                }
                LaneOp::Rem if fmt.is_zero(y) => {
                    flags |= FpFlags::NV;
                    fmt.canonical_nan()
                }
                _ => single_lane(lane_op, x, y),
            };
            let lane = wide as u32;
            if fmt.is_infinite(u64::from(lane)) {
                flags |= FpFlags::OF;
                trace!(lane = format_args!("{lane:#010x}"), "packed f32 lane clamped");
                (lane & F32_SIGN) | F32_MAX_BITS
            } else {
                lane
            }
        });
        flags |= env.raised();
        trace!(%op, result = format_args!("{result:#018x}"), %flags, "packed f32");
        (result, flags)
    }
}

fn single_lane(op: LaneOp, x: u64, y: u64) -> u64 {
    let fmt = Format::SINGLE;
    match op {
        LaneOp::Add => softfloat::add(fmt, x, y),
        LaneOp::Sub => softfloat::sub(fmt, x, y),
        LaneOp::Mul => softfloat::mul(fmt, x, y),
        LaneOp::Div => softfloat::div(fmt, x, y),
        LaneOp::Rem => softfloat::rem(fmt, x, y),
    }
}
