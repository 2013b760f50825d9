//! ECC Metadata Layout Tests

use alusim_core::common::error::EccError;
use alusim_core::core::units::ecc::codec::PROTECTED_MASK;
use alusim_core::core::units::ecc::metadata::{
    FREQUENCY_SHIFT, HISTORY_SHIFT, MODE_SHIFT, SENSITIVITY_SHIFT,
};
use alusim_core::core::units::ecc::{EccCodec, EccMetadata, EccMode};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;

#[test]
fn fields_land_at_documented_offsets() {
    let meta = EccMetadata::new(EccMode::Sec, 3, 1023, 63).unwrap();
    let reg = meta.pack_into(0);
    assert_eq!((reg >> MODE_SHIFT) & 0x3, 1);
    assert_eq!((reg >> HISTORY_SHIFT) & 0x3, 3);
    assert_eq!((reg >> FREQUENCY_SHIFT) & 0x3FF, 1023);
    assert_eq!((reg >> SENSITIVITY_SHIFT) & 0x3F, 63);
    assert_eq!(reg, 0x0FFF_FD00_0000_0000);
}

#[test]
fn pack_leaves_protected_word_alone() {
    let word = EccCodec::encode(0xFEED_FACE);
    let reg = EccMetadata::new(EccMode::SecDed, 1, 5, 9).unwrap().pack_into(word);
    assert_eq!(reg & PROTECTED_MASK, word);
}

#[rstest]
#[case(0, Ok(EccMode::None))]
#[case(1, Ok(EccMode::Sec))]
#[case(2, Ok(EccMode::SecDed))]
#[case(3, Err(EccError::ReservedMode(3)))]
fn mode_field_decoding(#[case] bits: u8, #[case] expected: Result<EccMode, EccError>) {
    assert_eq!(EccMode::from_bits(bits), expected);
}

#[test]
fn reserved_mode_error_message() {
    assert_eq!(
        EccError::ReservedMode(3).to_string(),
        "reserved ECC mode encoding 0b11"
    );
}

#[test]
fn out_of_range_fields_are_named() {
    assert_eq!(
        EccMetadata::new(EccMode::Sec, 0, 2000, 0),
        Err(EccError::FieldOutOfRange {
            field: "frequency",
            value: 2000,
            max: 1023,
        })
    );
}

proptest! {
    #[test]
    fn unpack_reads_what_pack_wrote(
        mode in 0u8..3,
        history in 0u8..=3,
        frequency in 0u16..=1023,
        sensitivity in 0u8..=63,
        base in any::<u64>(),
    ) {
        let mode = EccMode::from_bits(mode).unwrap();
        let meta = EccMetadata::new(mode, history, frequency, sensitivity).unwrap();
        prop_assert_eq!(EccMetadata::unpack(meta.pack_into(base)), Ok(meta));
    }
}
