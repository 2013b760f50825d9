//! Floating-point rounding modes.
//!
//! | Value | Mode | Description                             |
//! |-------|------|-----------------------------------------|
//! | 0b000 | RNE  | Round to Nearest, ties to Even          |
//! | 0b001 | RTZ  | Round towards Zero                      |
//! | 0b010 | RDN  | Round Down (towards −∞)                 |
//! | 0b011 | RUP  | Round Up (towards +∞)                   |
//! | 0b100 | RMM  | Round to Nearest, ties to Max Magnitude |
//!
//! RMM is accepted on the rounding field but never installed: entering a
//! floating call with it keeps whatever mode is already ambient.

/// Rounding mode encoding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum RoundingMode {
    /// Round to Nearest, ties to Even (default IEEE mode).
    #[default]
    Rne = 0b000,
    /// Round towards Zero.
    Rtz = 0b001,
    /// Round Down (towards −∞).
    Rdn = 0b010,
    /// Round Up (towards +∞).
    Rup = 0b011,
    /// Round to Nearest, ties to Max Magnitude. Accepted as a no-op.
    Rmm = 0b100,
}

impl RoundingMode {
    /// Decodes a rounding mode field.
    ///
    /// Returns `None` for the encodings `0b101..=0b111`.
    pub const fn from_bits(bits: u8) -> Option<Self> {
        match bits & 0x7 {
            0b000 => Some(Self::Rne),
            0b001 => Some(Self::Rtz),
            0b010 => Some(Self::Rdn),
            0b011 => Some(Self::Rup),
            0b100 => Some(Self::Rmm),
            _ => None,
        }
    }

    /// Returns the raw field encoding.
    pub const fn bits(self) -> u8 {
        self as u8
    }

    /// Returns true if this mode changes the ambient rounding mode when
    /// installed.
    pub const fn is_installable(self) -> bool {
        !matches!(self, Self::Rmm)
    }
}
