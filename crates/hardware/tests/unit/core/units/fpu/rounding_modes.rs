//! Rounding-Mode Encoding Tests

use alusim_core::core::units::fpu::rounding_modes::RoundingMode;
use rstest::rstest;

#[rstest]
#[case(0, Some(RoundingMode::Rne))]
#[case(1, Some(RoundingMode::Rtz))]
#[case(2, Some(RoundingMode::Rdn))]
#[case(3, Some(RoundingMode::Rup))]
#[case(4, Some(RoundingMode::Rmm))]
#[case(5, None)]
#[case(6, None)]
#[case(7, None)]
fn field_decoding(#[case] bits: u8, #[case] expected: Option<RoundingMode>) {
    assert_eq!(RoundingMode::from_bits(bits), expected);
    if let Some(rm) = expected {
        assert_eq!(rm.bits(), bits);
    }
}

#[test]
fn only_rmm_is_not_installable() {
    for bits in 0..4 {
        assert!(RoundingMode::from_bits(bits).is_some_and(RoundingMode::is_installable));
    }
    assert!(!RoundingMode::Rmm.is_installable());
    assert_eq!(RoundingMode::default(), RoundingMode::Rne);
}
