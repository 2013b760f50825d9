//! Dispatch Layer Tests
//!
//! Every opcode reaches the unit that owns it, integer outcomes carry no
//! floating flags, and the raw rounding field is decoded before dispatch.

use alusim_core::config::{Config, FaultInjectionConfig};
use alusim_core::core::units::alu::IntegerAlu;
use alusim_core::core::units::fpu::exception_flags::FpFlags;
use alusim_core::core::units::fpu::fenv;
use alusim_core::core::units::fpu::rounding_modes::RoundingMode;
use alusim_core::isa::Opcode;
use alusim_core::{ExecOutcome, ExecutionCore};
use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::common::{bf16x4, d, f32x2, s};

fn core() -> ExecutionCore {
    ExecutionCore::with_alu(IntegerAlu::with_seed(0, 0.0))
}

#[test]
fn integer_overflow_reports_flag_only() {
    let out = core().execute(Opcode::Add, i64::MAX as u64, 1, 0, 0);
    assert_eq!(
        out,
        ExecOutcome {
            result: i64::MIN as u64,
            flag: true,
            flags: FpFlags::NONE,
        }
    );
}

#[test]
fn floating_results_never_set_the_integer_flag() {
    let out = core().execute(Opcode::FDivD, d(1.0), d(0.0), 0, 0);
    assert!(!out.flag);
    assert_eq!(out.flags, FpFlags::DZ);
}

#[rstest]
#[case(Opcode::FMulS, s(3.0), s(0.5), s(1.5))]
#[case(Opcode::FMulD, d(3.0), d(0.5), d(1.5))]
#[case(Opcode::FAddBf16, bf16x4([0x3F80; 4]), bf16x4([0x3F80; 4]), bf16x4([0x4000; 4]))]
#[case(Opcode::SimdfAdd32, f32x2(1.0, 2.0), f32x2(2.0, 1.0), f32x2(3.0, 3.0))]
#[case(Opcode::SimdSub32, 0x0000_0005_0000_0000, 0x0000_0001_0000_0001, 0x0000_0004_FFFF_FFFF)]
#[case(Opcode::Mulhu, u64::MAX, 2, 1)]
fn each_family_reaches_its_unit(
    #[case] op: Opcode,
    #[case] a: u64,
    #[case] b: u64,
    #[case] expected: u64,
) {
    assert_eq!(core().execute(op, a, b, 0, 0).result, expected);
}

#[rstest]
#[case(0, 0x3EAA_AAAB)]
#[case(1, 0x3EAA_AAAA)]
#[case(2, 0x3EAA_AAAA)]
#[case(3, 0x3EAA_AAAB)]
fn rounding_field_selects_mode(#[case] rm_bits: u8, #[case] expected: u64) {
    assert_eq!(core().execute(Opcode::FDivS, s(1.0), s(3.0), 0, rm_bits).result, expected);
}

#[rstest]
#[case(4)]
#[case(5)]
#[case(6)]
#[case(7)]
fn unsupported_rounding_fields_keep_ambient_mode(#[case] rm_bits: u8) {
    fenv::set_rounding_mode(RoundingMode::Rtz);
    let out = core().execute(Opcode::FDivS, s(1.0), s(3.0), 0, rm_bits);
    assert_eq!(out.result, 0x3EAA_AAAA);
    assert_eq!(fenv::rounding_mode(), RoundingMode::Rtz);
    fenv::set_rounding_mode(RoundingMode::Rne);
}

#[test]
fn fused_ops_read_the_third_operand() {
    let out = core().execute(Opcode::FMAddD, d(2.0), d(3.0), d(0.5), 0);
    assert_eq!(out.result, d(6.5));
}

#[test]
fn from_config_wires_fault_injection() {
    let config = Config {
        fault_injection: FaultInjectionConfig {
            probability: 1.0,
            seed: Some(1),
        },
        ..Config::default()
    };
    let mut core = ExecutionCore::from_config(&config);
    let out = core.execute(Opcode::InjectFlip, 0, 0, 0, 0);
    assert!(out.flag);
    assert_eq!(out.result.count_ones(), 1);
    assert!(out.result < 1 << 32);
}

#[test]
fn alu_mut_exposes_the_integer_unit() {
    let mut core = core();
    assert_eq!(core.alu_mut().execute(Opcode::Xor, 0b1100, 0b1010), (0b0110, false));
}

#[test]
fn every_opcode_executes_under_every_rounding_field() {
    let mut core = core();
    for &op in Opcode::ALL {
        for rm_bits in 0..8 {
            let _ = core.execute(op, 0x4000_0000_3F80_0000, 0x3FF0_0000_0000_0000, 0, rm_bits);
        }
    }
    assert_eq!(fenv::rounding_mode(), RoundingMode::Rne);
    assert!(fenv::raised().is_empty());
}
