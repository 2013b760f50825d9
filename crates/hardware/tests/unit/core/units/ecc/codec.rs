//! SEC-DED Codec Tests
//!
//! Clean words, single-bit correction across every data bit, double-bit
//! detection and metadata preservation.

use alusim_core::core::units::ecc::codec::PROTECTED_MASK;
use alusim_core::core::units::ecc::{DecodeOutcome, EccCodec};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;

use crate::common::init_tracing;

/// Arbitrary non-zero pattern above bit 38.
const METADATA: u64 = 0xA5A5_A580_0000_0000;

#[rstest]
#[case(0, 0)]
#[case(1, 0b000_0001)]
#[case(0x8000_0000, 0b010_0000)]
#[case(0b11, 0b000_0011)]
#[case(0b101, 0b100_0010)]
fn code_for_known_words(#[case] data: u32, #[case] code: u8) {
    assert_eq!(EccCodec::code_for(data), code);
}

#[test]
fn encode_places_code_above_data() {
    let reg = EccCodec::encode(1);
    assert_eq!(reg, 0x01_0000_0001);
    assert_eq!(reg & !PROTECTED_MASK, 0);
}

#[test]
fn clean_word_outcome() {
    let reg = EccCodec::encode(0x0BAD_F00D) | METADATA;
    assert_eq!(EccCodec::decode_with_outcome(reg), (reg, DecodeOutcome::Clean));
}

#[test]
fn single_data_flip_names_the_bit() {
    let reg = EccCodec::encode(0x0BAD_F00D) | METADATA;
    let (decoded, outcome) = EccCodec::decode_with_outcome(reg ^ (1 << 17));
    assert_eq!(decoded, reg);
    assert_eq!(outcome, DecodeOutcome::Corrected { bit: 17 });
    assert!(outcome.corrected_data());
}

#[test]
fn overall_parity_flip_is_refreshed() {
    let reg = EccCodec::encode(0x0BAD_F00D) | METADATA;
    let (decoded, outcome) = EccCodec::decode_with_outcome(reg ^ (1 << 38));
    assert_eq!(decoded, reg);
    assert_eq!(outcome, DecodeOutcome::ParityRefreshed);
    assert!(!outcome.corrected_data());
}

#[test]
fn double_data_flip_is_detected_and_left_alone() {
    init_tracing();
    let damaged = (EccCodec::encode(0x0BAD_F00D) | METADATA) ^ (1 << 3) ^ (1 << 20);
    let (decoded, outcome) = EccCodec::decode_with_outcome(damaged);
    assert_eq!(decoded, damaged);
    assert_eq!(outcome, DecodeOutcome::Uncorrectable { syndrome: 4 ^ 21 });
}

#[test]
fn syndrome_of_flipped_bit_is_its_position() {
    let reg = EccCodec::encode(0x1357_9BDF);
    for bit in 0..32u32 {
        assert_eq!(EccCodec::syndrome(reg ^ (1u64 << bit)), bit as u8 + 1);
    }
}

proptest! {
    #[test]
    fn encoded_words_decode_to_themselves(data in any::<u32>()) {
        let reg = EccCodec::encode(data);
        prop_assert_eq!(EccCodec::decode(reg), reg);
    }

    #[test]
    fn any_single_data_flip_recovers_the_word(
        data in any::<u32>(),
        bit in 0u32..32,
        meta in any::<u64>(),
    ) {
        let reg = EccCodec::encode(data) | (meta & !PROTECTED_MASK);
        prop_assert_eq!(EccCodec::decode(reg ^ (1u64 << bit)), reg);
    }

    #[test]
    fn double_data_flip_never_changes_data(
        data in any::<u32>(),
        first in 0u32..32,
        offset in 1u32..32,
    ) {
        let second = (first + offset) % 32;
        let damaged = EccCodec::encode(data) ^ (1u64 << first) ^ (1u64 << second);
        prop_assert_eq!(EccCodec::decode(damaged), damaged);
    }
}
