//! Double-Precision Scalar Unit Tests
//!
//! Includes the single/double conversions, which the double unit owns.

use alusim_core::core::units::fpu::DoubleFpu;
use alusim_core::core::units::fpu::classify::NEG_NORMAL;
use alusim_core::core::units::fpu::exception_flags::FpFlags;
use alusim_core::core::units::fpu::rounding_modes::RoundingMode;
use alusim_core::core::units::fpu::softfloat::Format;
use alusim_core::isa::Opcode;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;

use crate::common::{as_d, d, s};

const NAN: u64 = Format::DOUBLE.canonical_nan();

fn fpu(op: Opcode, a: u64, b: u64) -> (u64, FpFlags) {
    DoubleFpu::new().evaluate(op, a, b, 0, RoundingMode::Rne)
}

fn fpu_rm(op: Opcode, a: u64, b: u64, rm: RoundingMode) -> (u64, FpFlags) {
    DoubleFpu::new().evaluate(op, a, b, 0, rm)
}

// ─── Arithmetic ──────────────────────────────────────────────────────────────

#[test]
fn inexact_sum_matches_native() {
    assert_eq!(fpu(Opcode::FAddD, d(0.1), d(0.2)), (d(0.1 + 0.2), FpFlags::NX));
}

#[rstest]
#[case(RoundingMode::Rne, 0x3FD5_5555_5555_5555)]
#[case(RoundingMode::Rtz, 0x3FD5_5555_5555_5555)]
#[case(RoundingMode::Rdn, 0x3FD5_5555_5555_5555)]
#[case(RoundingMode::Rup, 0x3FD5_5555_5555_5556)]
fn division_honors_rounding_mode(#[case] rm: RoundingMode, #[case] expected: u64) {
    assert_eq!(fpu_rm(Opcode::FDivD, d(1.0), d(3.0), rm), (expected, FpFlags::NX));
}

#[test]
fn division_by_zero_yields_canonical_nan() {
    assert_eq!(fpu(Opcode::FDivD, d(1.0), d(-0.0)), (NAN, FpFlags::DZ));
}

#[test]
fn square_root_of_negative_is_invalid() {
    assert_eq!(fpu(Opcode::FSqrtD, d(-1.0), 0), (NAN, FpFlags::NV));
    assert_eq!(fpu(Opcode::FSqrtD, d(2.0), 0), (d(2f64.sqrt()), FpFlags::NX));
}

#[test]
fn fused_multiply_add_rounds_once() {
    let (bits, flags) =
        DoubleFpu::new().evaluate(Opcode::FMAddD, d(0.1), d(10.0), d(-1.0), RoundingMode::Rne);
    assert_eq!(as_d(bits), 0.1f64.mul_add(10.0, -1.0));
    assert_ne!(as_d(bits), 0.1 * 10.0 - 1.0);
    assert!(flags.is_empty());
}

#[test]
fn underflow_to_zero() {
    assert_eq!(
        fpu(Opcode::FMulD, d(1e-300), d(1e-300)),
        (d(0.0), FpFlags::UF | FpFlags::NX)
    );
}

// ─── Conversions ─────────────────────────────────────────────────────────────

#[test]
fn widen_single_is_exact() {
    let a = 0xFFFF_FFFF_0000_0000 | s(2.5);
    assert_eq!(fpu(Opcode::FCvtDS, a, 0), (d(2.5), FpFlags::NONE));
}

#[rstest]
#[case(1.5, 1.5, FpFlags::NONE)]
#[case(0.1, 0.1, FpFlags::NX)]
#[case(1e300, f32::INFINITY, FpFlags::OF | FpFlags::NX)]
#[case(1e-300, 0.0, FpFlags::UF | FpFlags::NX)]
fn narrow_to_single(#[case] x: f64, #[case] expected: f32, #[case] flags: FpFlags) {
    assert_eq!(fpu(Opcode::FCvtSD, d(x), 0), (s(expected), flags));
}

#[rstest]
#[case(Opcode::FCvtLD, 9_223_372_036_854_775_808.0, i64::MAX as u64, FpFlags::NV)]
#[case(Opcode::FCvtLD, -9_223_372_036_854_775_808.0, i64::MIN as u64, FpFlags::NONE)]
#[case(Opcode::FCvtLuD, 9_223_372_036_854_775_808.0, 1 << 63, FpFlags::NONE)]
#[case(Opcode::FCvtWD, -1e10, 0xFFFF_FFFF_8000_0000, FpFlags::NV)]
#[case(Opcode::FCvtWD, 3.5, 4, FpFlags::NX)]
#[case(Opcode::FCvtWuD, f64::NAN, 0xFFFF_FFFF_FFFF_FFFF, FpFlags::NV)]
fn double_to_integer(
    #[case] op: Opcode,
    #[case] x: f64,
    #[case] expected: u64,
    #[case] flags: FpFlags,
) {
    assert_eq!(fpu(op, d(x), 0), (expected, flags));
}

#[rstest]
#[case(Opcode::FCvtDL, (-1i64) as u64, -1.0)]
#[case(Opcode::FCvtDW, 0x0000_0000_FFFF_FFFF, -1.0)]
#[case(Opcode::FCvtDWu, u64::MAX, 4_294_967_295.0)]
#[case(Opcode::FCvtDLu, u64::MAX, 18_446_744_073_709_551_616.0)]
fn integer_to_double(#[case] op: Opcode, #[case] a: u64, #[case] expected: f64) {
    assert_eq!(fpu(op, a, 0).0, d(expected));
}

const ABOVE_2_53: i64 = (1 << 53) + 1;

#[rstest]
#[case(Opcode::FCvtDLu, ABOVE_2_53, RoundingMode::Rne, 9_007_199_254_740_992.0)]
#[case(Opcode::FCvtDLu, ABOVE_2_53, RoundingMode::Rup, 9_007_199_254_740_994.0)]
#[case(Opcode::FCvtDLu, ABOVE_2_53, RoundingMode::Rtz, 9_007_199_254_740_992.0)]
#[case(Opcode::FCvtDL, -ABOVE_2_53, RoundingMode::Rdn, -9_007_199_254_740_994.0)]
#[case(Opcode::FCvtDL, -ABOVE_2_53, RoundingMode::Rup, -9_007_199_254_740_992.0)]
#[case(Opcode::FCvtDL, -ABOVE_2_53, RoundingMode::Rtz, -9_007_199_254_740_992.0)]
fn integer_to_double_rounds_by_mode(
    #[case] op: Opcode,
    #[case] a: i64,
    #[case] rm: RoundingMode,
    #[case] expected: f64,
) {
    let result = DoubleFpu::new().evaluate(op, a as u64, 0, 0, rm);
    assert_eq!(result, (d(expected), FpFlags::NONE));
}

// ─── Bit-level operations ────────────────────────────────────────────────────

#[test]
fn moves_and_classify() {
    let pattern = 0xC00C_0000_0000_0000;
    assert_eq!(fpu(Opcode::FMvXD, pattern, 0), (pattern, FpFlags::NONE));
    assert_eq!(fpu(Opcode::FMvDX, pattern, 0), (pattern, FpFlags::NONE));
    assert_eq!(fpu(Opcode::FClassD, d(-1.0), 0), (NEG_NORMAL, FpFlags::NONE));
}

#[test]
fn compare_with_nan_is_false_and_quiet() {
    assert_eq!(fpu(Opcode::FEqD, d(f64::NAN), d(1.0)), (0, FpFlags::NONE));
    assert_eq!(fpu(Opcode::FLeD, d(-1.0), d(1.0)), (1, FpFlags::NONE));
}

proptest! {
    #[test]
    fn rne_arithmetic_matches_native(a in any::<f64>(), b in any::<f64>()) {
        prop_assume!(!a.is_nan() && !b.is_nan());
        let expect = |x: f64| if x.is_nan() { NAN } else { d(x) };
        prop_assert_eq!(fpu(Opcode::FAddD, d(a), d(b)).0, expect(a + b));
        prop_assert_eq!(fpu(Opcode::FMulD, d(a), d(b)).0, expect(a * b));
        if b != 0.0 {
            prop_assert_eq!(fpu(Opcode::FDivD, d(a), d(b)).0, expect(a / b));
        }
    }
}
