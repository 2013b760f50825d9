//! Hamming SEC-DED codec over a 32-bit data word.
//!
//! The protected field occupies bits `[0:38]` of a 64-bit register:
//!
//! | Bits    | Field                                   |
//! |---------|-----------------------------------------|
//! | `0..32` | data                                    |
//! | `32..38`| Hamming parity `p1..p6`                 |
//! | `38`    | overall parity (data and `p1..p6`)      |
//!
//! Parity bit `k` covers every data bit whose 1-based position has bit `k`
//! set, so the XOR of the positions of all set data bits is exactly the
//! six-bit Hamming code. Bits `[39:63]` belong to the metadata and are
//! carried through every decode untouched.

use tracing::{trace, warn};

/// Mask of the data field.
pub const DATA_MASK: u64 = 0xFFFF_FFFF;

/// First bit of the code field.
pub const CODE_SHIFT: u32 = 32;

/// Mask of the six Hamming bits after shifting down by [`CODE_SHIFT`].
const HAMMING_MASK: u8 = 0x3F;

/// Position of the overall parity bit within the code.
const OVERALL_PARITY_BIT: u32 = 6;

/// Mask of the seven-bit code after shifting down by [`CODE_SHIFT`].
pub const CODE_MASK: u64 = 0x7F;

/// Mask of data plus code (`[0:38]`).
pub const PROTECTED_MASK: u64 = DATA_MASK | (CODE_MASK << CODE_SHIFT);

/// Number of data bits; valid correcting syndromes are `1..=DATA_BITS`.
const DATA_BITS: u8 = 32;

/// Row of the decode table taken for a register.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DecodeOutcome {
    /// Syndrome zero, parity consistent: register returned unchanged.
    Clean,
    /// Only redundant bits were inconsistent; a fresh code was written.
    ParityRefreshed,
    /// One data bit was flipped back and the code refreshed.
    Corrected {
        /// Zero-based data bit that was corrected.
        bit: u8,
    },
    /// Double-bit error: detected, register returned unchanged.
    Uncorrectable {
        /// Non-zero syndrome observed.
        syndrome: u8,
    },
}

impl DecodeOutcome {
    /// Returns true if the data word was modified.
    pub const fn corrected_data(self) -> bool {
        matches!(self, Self::Corrected { .. })
    }
}

/// Stateless SEC-DED encoder/decoder.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EccCodec;

const fn parity32(value: u32) -> u32 {
    value.count_ones() & 1
}

const fn hamming_bits(data: u32) -> u8 {
    let mut acc = 0u8;
    let mut i = 0u32;
    while i < 32 {
        if (data >> i) & 1 == 1 {
            acc ^= i as u8 + 1;
        }
        i += 1;
    }
    acc & HAMMING_MASK
}

impl EccCodec {
    /// Seven-bit SEC-DED code of `data`: six Hamming bits plus overall
    /// parity in bit 6.
    pub const fn code_for(data: u32) -> u8 {
        let hamming = hamming_bits(data);
        let overall = (parity32(data) ^ parity32(hamming as u32)) as u8;
        hamming | (overall << OVERALL_PARITY_BIT)
    }

    /// Encodes `data` into a register with a zero metadata region.
    ///
    /// # Examples
    ///
    /// ```
    /// use alusim_core::core::units::ecc::EccCodec;
    ///
    /// let reg = EccCodec::encode(0xDEAD_BEEF);
    /// assert_eq!(reg as u32, 0xDEAD_BEEF);
    /// assert_eq!(EccCodec::decode(reg), reg);
    /// ```
    pub const fn encode(data: u32) -> u64 {
        data as u64 | ((Self::code_for(data) as u64) << CODE_SHIFT)
    }

    /// Hamming syndrome of a register: recomputed XOR received parity.
    pub const fn syndrome(reg: u64) -> u8 {
        let received = ((reg >> CODE_SHIFT) & CODE_MASK) as u8 & HAMMING_MASK;
        hamming_bits(reg as u32) ^ received
    }

    /// Decodes and, where possible, corrects a protected register.
    ///
    /// Uncorrectable errors are returned unchanged; see
    /// [`Self::decode_with_outcome`] to tell them apart from clean words.
    pub fn decode(reg: u64) -> u64 {
        Self::decode_with_outcome(reg).0
    }

    /// Decodes a protected register and reports which decode row applied.
    ///
    /// # Arguments
    ///
    /// * `reg` - Register holding data, code and metadata.
    ///
    /// # Returns
    ///
    /// The decoded register (metadata bits preserved) and the outcome.
    pub fn decode_with_outcome(reg: u64) -> (u64, DecodeOutcome) {
        let data = reg as u32;
        let code = ((reg >> CODE_SHIFT) & CODE_MASK) as u8;
        let received_hamming = code & HAMMING_MASK;
        let received_parity = u32::from(code >> OVERALL_PARITY_BIT);

        let syndrome = Self::syndrome(reg);
        let overall = parity32(data) ^ parity32(u32::from(received_hamming));
        let parity_mismatch = overall != received_parity;
        trace!(syndrome, parity_mismatch, "ecc decode");

        match (syndrome, parity_mismatch) {
            (0, false) => (reg, DecodeOutcome::Clean),
            (0, true) => (Self::refresh(reg, data), DecodeOutcome::ParityRefreshed),
            (s, true) if s <= DATA_BITS => {
                let bit = s - 1;
                let corrected = data ^ (1u32 << bit);
                (Self::refresh(reg, corrected), DecodeOutcome::Corrected { bit })
            }
            (_, true) => (Self::refresh(reg, data), DecodeOutcome::ParityRefreshed),
            (s, false) => {
                warn!(
                    syndrome = s,
                    register = format_args!("{reg:#018x}"),
                    "uncorrectable double-bit error"
                );
                (reg, DecodeOutcome::Uncorrectable { syndrome: s })
            }
        }
    }

    /// Rewrites data and code, keeping the metadata bits of `reg`.
    const fn refresh(reg: u64, data: u32) -> u64 {
        (reg & !PROTECTED_MASK) | Self::encode(data)
    }
}
