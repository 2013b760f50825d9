//! ALU ECC Check Tests
//!
//! `ecc.check` runs the SEC-DED decoder and reports "corrected" only when
//! the data word changed.

use alusim_core::core::units::alu::IntegerAlu;
use alusim_core::core::units::ecc::EccCodec;
use alusim_core::isa::Opcode;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn check(reg: u64) -> (u64, bool) {
    IntegerAlu::with_seed(0, 0.0).execute(Opcode::CheckError, reg, 0)
}

#[test]
fn clean_register_passes_through() {
    let reg = EccCodec::encode(0x1234_5678);
    assert_eq!(check(reg), (reg, false));
}

#[test]
fn single_data_flip_is_corrected_and_flagged() {
    let reg = EccCodec::encode(0x1234_5678);
    assert_eq!(check(reg ^ (1 << 5)), (reg, true));
}

#[test]
fn overall_parity_flip_is_refreshed_without_flag() {
    let reg = EccCodec::encode(0x0F0F_0F0F);
    assert_eq!(check(reg ^ (1 << 38)), (reg, false));
}

#[test]
fn double_data_flip_is_returned_unchanged() {
    let damaged = EccCodec::encode(0xCAFE_F00D) ^ 0b11;
    assert_eq!(check(damaged), (damaged, false));
}

proptest! {
    #[test]
    fn any_single_data_flip_reports_correction(data in any::<u32>(), bit in 0u32..32) {
        let reg = EccCodec::encode(data);
        let (result, flag) = check(reg ^ (1u64 << bit));
        prop_assert_eq!(result as u32, data);
        prop_assert!(flag);
    }
}
