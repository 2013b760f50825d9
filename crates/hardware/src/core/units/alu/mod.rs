//! Integer Arithmetic Logic Unit (ALU).
//!
//! This module implements the integer unit. It handles 64-bit arithmetic,
//! logical operations and shifts, their 32-bit "w" variants, packed-integer
//! SIMD lanes, the ECC check/correct operation and fault injection.
//!
//! Operations are organized into submodules by category:
//! - [`arithmetic`]: Add, Sub, Mul, Mulh, Mulhsu, Mulhu, Div, Divu, Rem, Remu
//! - [`logic`]:      And, Or, Xor, Slt, Sltu
//! - [`shifts`]:     Sll, Srl, Sra
//! - [`simd`]:       2x32 and 4x16 lane arithmetic and lane assembly
//! - [`fault`]:      Random single-bit upsets

/// Integer arithmetic operations (add, subtract, multiply, divide).
pub mod arithmetic;

/// Bitwise logical and comparison operations (and, or, xor, slt).
pub mod logic;

/// Shift operations (sll, srl, sra).
pub mod shifts;

/// Packed-integer lane operations.
pub mod simd;

/// Seeded bit-flip injection.
pub mod fault;

use tracing::trace;

use crate::config::FaultInjectionConfig;
use crate::core::units::ecc::EccCodec;
use crate::isa::opcode::{Opcode, OpcodeFamily};

use self::fault::{DEFAULT_FLIP_PROBABILITY, FaultInjector};

/// Integer execution unit.
///
/// Stateless except for the fault-injection generator it owns, which is why
/// [`IntegerAlu::execute`] takes `&mut self`.
#[derive(Clone, Debug)]
pub struct IntegerAlu {
    injector: FaultInjector,
}

impl Default for IntegerAlu {
    fn default() -> Self {
        Self::new()
    }
}

impl IntegerAlu {
    /// Creates an ALU with an entropy-seeded injector at the default
    /// probability.
    pub fn new() -> Self {
        Self {
            injector: FaultInjector::from_entropy(DEFAULT_FLIP_PROBABILITY),
        }
    }

    /// Creates an ALU whose fault injection is reproducible.
    pub fn with_seed(seed: u64, probability: f64) -> Self {
        Self {
            injector: FaultInjector::with_seed(seed, probability),
        }
    }

    /// Creates an ALU from configuration; a missing seed draws one from
    /// entropy.
    pub fn from_config(config: &FaultInjectionConfig) -> Self {
        let injector = match config.seed {
            Some(seed) => FaultInjector::with_seed(seed, config.probability),
            None => FaultInjector::from_entropy(config.probability),
        };
        Self { injector }
    }

    /// Executes an integer operation.
    ///
    /// # Arguments
    ///
    /// * `op` - The operation to perform.
    /// * `a`  - First operand (raw 64-bit pattern).
    /// * `b`  - Second operand (raw 64-bit pattern, also the shift amount).
    ///
    /// # Returns
    ///
    /// `(result, flag)`. The flag means overflow for arithmetic, "bit
    /// flipped" for fault injection and "error corrected" for the ECC
    /// check. Opcodes the unit does not own return `(0, false)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use alusim_core::core::units::alu::IntegerAlu;
    /// use alusim_core::isa::Opcode;
    ///
    /// let mut alu = IntegerAlu::with_seed(7, 0.0);
    ///
    /// assert_eq!(alu.execute(Opcode::Add, 42, 8), (50, false));
    /// assert_eq!(alu.execute(Opcode::Div, 42, 0), (0, false));
    /// assert_eq!(
    ///     alu.execute(Opcode::Div, i64::MIN as u64, -1i64 as u64),
    ///     (i64::MAX as u64, true)
    /// );
    /// assert_eq!(alu.execute(Opcode::Slt, -5i64 as u64, 10), (1, false));
    /// ```
    pub fn execute(&mut self, op: Opcode, a: u64, b: u64) -> (u64, bool) {
        let (result, flag) = match op.family() {
            OpcodeFamily::Integer => match op {
                Opcode::And | Opcode::Or | Opcode::Xor | Opcode::Slt | Opcode::Sltu => {
                    (logic::execute(op, a, b), false)
                }
                Opcode::Sll
                | Opcode::Sllw
                | Opcode::Srl
                | Opcode::Srlw
                | Opcode::Sra
                | Opcode::Sraw => (shifts::execute(op, a, b), false),
                _ => arithmetic::execute(op, a, b),
            },
            OpcodeFamily::IntegerSimd => (simd::execute(op, a, b), false),
            OpcodeFamily::Ecc => Self::check_error(a),
            OpcodeFamily::FaultInjection => self.injector.inject(a),
            _ => (0, false),
        };
        trace!(%op, result = format_args!("{result:#x}"), flag, "alu");
        (result, flag)
    }

    /// Runs SEC-DED decode on a protected register.
    ///
    /// The flag is set when the data word changed, i.e. a single data-bit
    /// error was corrected.
    fn check_error(reg: u64) -> (u64, bool) {
        let corrected = EccCodec::decode(reg);
        (corrected, corrected as u32 != reg as u32)
    }
}
