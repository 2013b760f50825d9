//! Exception Flag Byte Tests

use alusim_core::core::units::fpu::exception_flags::FpFlags;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[test]
fn flag_bits_match_the_status_layout() {
    assert_eq!(FpFlags::NV.bits(), 0x10);
    assert_eq!(FpFlags::DZ.bits(), 0x08);
    assert_eq!(FpFlags::OF.bits(), 0x04);
    assert_eq!(FpFlags::UF.bits(), 0x02);
    assert_eq!(FpFlags::NX.bits(), 0x01);
}

#[test]
fn from_bits_drops_undefined_bits() {
    assert_eq!(FpFlags::from_bits(0xFF).bits(), 0x1F);
    assert!(FpFlags::from_bits(0xE0).is_empty());
}

#[test]
fn union_and_containment() {
    let mut flags = FpFlags::OF;
    flags |= FpFlags::NX;
    assert!(flags.contains(FpFlags::OF | FpFlags::NX));
    assert!(!flags.contains(FpFlags::UF));
    assert!(flags.contains(FpFlags::NONE));
}

#[rstest]
#[case(FpFlags::NONE, "-")]
#[case(FpFlags::NV, "NV")]
#[case(FpFlags::OF | FpFlags::NX, "OF|NX")]
#[case(FpFlags::from_bits(0x1F), "NV|DZ|OF|UF|NX")]
fn display_lists_raised_flags(#[case] flags: FpFlags, #[case] expected: &str) {
    assert_eq!(flags.to_string(), expected);
}
