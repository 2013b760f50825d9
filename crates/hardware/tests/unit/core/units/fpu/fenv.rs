//! Floating-Point Environment Tests
//!
//! Every unit call must leave the caller's rounding mode and raised flags
//! exactly as it found them. The environment is thread-local and each test
//! runs on its own thread, but the tests still restore what they change.

use alusim_core::core::units::fpu::exception_flags::FpFlags;
use alusim_core::core::units::fpu::fenv::{self, FpEnvGuard};
use alusim_core::core::units::fpu::rounding_modes::RoundingMode;
use alusim_core::core::units::fpu::{PackedFloatUnit, SingleFpu};
use alusim_core::isa::Opcode;
use pretty_assertions::assert_eq;

use crate::common::{bf16x4, s};

const ONE_THIRD_RNE: u64 = 0x3EAA_AAAB;
const ONE_THIRD_RTZ: u64 = 0x3EAA_AAAA;

fn reset() {
    fenv::set_rounding_mode(RoundingMode::Rne);
    fenv::clear_raised();
}

#[test]
fn guard_installs_and_restores() {
    fenv::set_rounding_mode(RoundingMode::Rdn);
    fenv::raise(FpFlags::UF);
    {
        let env = FpEnvGuard::enter(RoundingMode::Rup);
        assert_eq!(env.rounding(), RoundingMode::Rup);
        assert!(env.raised().is_empty());
        fenv::raise(FpFlags::NX);
        assert_eq!(env.raised(), FpFlags::NX);
    }
    assert_eq!(fenv::rounding_mode(), RoundingMode::Rdn);
    assert_eq!(fenv::raised(), FpFlags::UF);
    reset();
}

#[test]
fn rmm_guard_keeps_ambient_mode() {
    fenv::set_rounding_mode(RoundingMode::Rtz);
    {
        let env = FpEnvGuard::enter(RoundingMode::Rmm);
        assert_eq!(env.rounding(), RoundingMode::Rtz);
    }
    fenv::set_rounding_mode(RoundingMode::Rmm);
    assert_eq!(fenv::rounding_mode(), RoundingMode::Rtz);
    reset();
}

#[test]
fn scalar_call_restores_caller_environment() {
    fenv::set_rounding_mode(RoundingMode::Rdn);
    let fpu = SingleFpu::new();
    let (bits, flags) = fpu.evaluate(Opcode::FDivS, s(1.0), s(3.0), 0, RoundingMode::Rup);
    assert_eq!(bits, ONE_THIRD_RNE);
    assert_eq!(flags, FpFlags::NX);
    assert_eq!(fenv::rounding_mode(), RoundingMode::Rdn);
    assert!(fenv::raised().is_empty());
    reset();
}

#[test]
fn scalar_rmm_uses_whatever_mode_is_ambient() {
    let fpu = SingleFpu::new();

    fenv::set_rounding_mode(RoundingMode::Rtz);
    let (truncated, _) = fpu.evaluate(Opcode::FDivS, s(1.0), s(3.0), 0, RoundingMode::Rmm);
    assert_eq!(truncated, ONE_THIRD_RTZ);

    fenv::set_rounding_mode(RoundingMode::Rne);
    let (nearest, _) = fpu.evaluate(Opcode::FDivS, s(1.0), s(3.0), 0, RoundingMode::Rmm);
    assert_eq!(nearest, ONE_THIRD_RNE);
    reset();
}

#[test]
fn flags_do_not_leak_between_calls() {
    let fpu = SingleFpu::new();
    let (_, first) = fpu.evaluate(Opcode::FDivS, s(1.0), s(0.0), 0, RoundingMode::Rne);
    assert_eq!(first, FpFlags::DZ);
    let (_, second) = fpu.evaluate(Opcode::FAddS, s(1.0), s(1.0), 0, RoundingMode::Rne);
    assert!(second.is_empty());
    assert!(fenv::raised().is_empty());
}

#[test]
fn packed_call_restores_caller_environment() {
    fenv::set_rounding_mode(RoundingMode::Rup);
    let one = bf16x4([0x3F80; 4]);
    let _ = PackedFloatUnit::new().evaluate(Opcode::FDivBf16, one, 0, 0, RoundingMode::Rtz);
    assert_eq!(fenv::rounding_mode(), RoundingMode::Rup);
    reset();
}
