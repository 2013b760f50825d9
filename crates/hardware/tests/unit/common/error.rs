//! Error Type Tests
//!
//! Display text and conversions of the crate's error enums.

use alusim_core::common::error::{ConfigError, EccError, OpcodeError};
use pretty_assertions::assert_eq;

#[test]
fn ecc_reserved_mode_message() {
    assert_eq!(
        EccError::ReservedMode(3).to_string(),
        "reserved ECC mode encoding 0b11"
    );
}

#[test]
fn ecc_field_out_of_range_message() {
    let err = EccError::FieldOutOfRange {
        field: "history",
        value: 9,
        max: 3,
    };
    assert_eq!(
        err.to_string(),
        "ECC metadata field `history` value 9 exceeds maximum 3"
    );
}

#[test]
fn config_parse_error_wraps_serde_json() {
    let json_err = serde_json::from_str::<u32>("not json");
    assert!(json_err.is_err());
    if let Err(inner) = json_err {
        let err: ConfigError = inner.into();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().starts_with("failed to parse configuration"));
    }
}

#[test]
fn opcode_error_names_the_mnemonic() {
    assert_eq!(
        OpcodeError("frobnicate".to_owned()).to_string(),
        "unknown opcode mnemonic `frobnicate`"
    );
}
