//! FCLASS Mask Tests

use alusim_core::core::units::fpu::classify::{
    NEG_INF, NEG_NORMAL, NEG_SUBNORMAL, NEG_ZERO, POS_INF, POS_NORMAL, POS_SUBNORMAL, POS_ZERO,
    QUIET_NAN, SIGNALING_NAN, classify,
};
use alusim_core::core::units::fpu::softfloat::Format;
use rstest::rstest;

use crate::common::{d, s};

#[rstest]
#[case(s(f32::NEG_INFINITY), NEG_INF)]
#[case(s(-1.0), NEG_NORMAL)]
#[case(0x8000_0001, NEG_SUBNORMAL)]
#[case(s(-0.0), NEG_ZERO)]
#[case(s(0.0), POS_ZERO)]
#[case(0x0000_0001, POS_SUBNORMAL)]
#[case(s(f32::MAX), POS_NORMAL)]
#[case(s(f32::INFINITY), POS_INF)]
#[case(0x7F80_0001, SIGNALING_NAN)]
#[case(0xFFC0_0000, QUIET_NAN)]
fn single_classes(#[case] bits: u64, #[case] class: u64) {
    assert_eq!(classify(Format::SINGLE, bits), class);
}

#[rstest]
#[case(d(f64::MIN_POSITIVE), POS_NORMAL)]
#[case(d(f64::MIN_POSITIVE / 2.0), POS_SUBNORMAL)]
#[case(0x7FF0_0000_0000_0001, SIGNALING_NAN)]
#[case(0x7FF8_0000_0000_0000, QUIET_NAN)]
#[case(d(-0.0), NEG_ZERO)]
fn double_classes(#[case] bits: u64, #[case] class: u64) {
    assert_eq!(classify(Format::DOUBLE, bits), class);
}

#[test]
fn exactly_one_bit_is_set() {
    for bits in [0u64, 1, 0x7F7F_FFFF, 0x7F80_0000, 0x7FA0_0000, 0xFFFF_FFFF, 0x807F_FFFF] {
        assert_eq!(classify(Format::SINGLE, bits).count_ones(), 1, "{bits:#x}");
    }
}

#[rstest]
#[case(0x3F80, POS_NORMAL)]
#[case(0x0001, POS_SUBNORMAL)]
#[case(0xFF80, NEG_INF)]
#[case(0x7F81, SIGNALING_NAN)]
#[case(0x7FC0, QUIET_NAN)]
fn bfloat16_classes(#[case] bits: u64, #[case] class: u64) {
    assert_eq!(classify(Format::BFLOAT16, bits), class);
}
