//! Reference dispatch layer.
//!
//! [`ExecutionCore`] owns one instance of every unit and routes an opcode to
//! the unit that owns its family. It performs no fetch, decode or register
//! access; callers supply operands and consume the outcome.

use tracing::trace;

use crate::config::Config;
use crate::isa::opcode::{ExecUnit, Opcode};

use super::units::alu::IntegerAlu;
use super::units::fpu::exception_flags::FpFlags;
use super::units::fpu::rounding_modes::RoundingMode;
use super::units::fpu::{DoubleFpu, PackedFloatUnit, SingleFpu};

/// Result of one dispatched operation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExecOutcome {
    /// Result register.
    pub result: u64,
    /// Integer unit flag: overflow, injected flip or corrected error.
    pub flag: bool,
    /// Floating-point exception flags; empty for integer operations.
    pub flags: FpFlags,
}

/// All execution units behind a single entry point.
#[derive(Debug, Default)]
pub struct ExecutionCore {
    alu: IntegerAlu,
    single: SingleFpu,
    double: DoubleFpu,
    packed: PackedFloatUnit,
}

impl ExecutionCore {
    /// Creates a core with default units.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a core whose integer unit follows `config`.
    pub fn from_config(config: &Config) -> Self {
        Self::with_alu(IntegerAlu::from_config(&config.fault_injection))
    }

    /// Creates a core around an existing integer unit.
    pub fn with_alu(alu: IntegerAlu) -> Self {
        Self {
            alu,
            single: SingleFpu::new(),
            double: DoubleFpu::new(),
            packed: PackedFloatUnit::new(),
        }
    }

    /// Integer unit.
    pub fn alu_mut(&mut self) -> &mut IntegerAlu {
        &mut self.alu
    }

    /// Executes one operation.
    ///
    /// # Arguments
    ///
    /// * `op` - Operation selector.
    /// * `a`, `b`, `c` - Operand registers; `c` is read only by fused
    ///   multiply-add and the bfloat16 dot product.
    /// * `rm_bits` - Raw rounding-mode field. Encodings 5 to 7 are treated
    ///   like the no-op mode 4.
    ///
    /// # Examples
    ///
    /// ```
    /// use alusim_core::{ExecutionCore, Opcode};
    ///
    /// let mut core = ExecutionCore::new();
    /// let out = core.execute(Opcode::SimdAdd16, 0x0001_0002_0003_0004, 0x0001_0001_0001_0001, 0, 0);
    /// assert_eq!(out.result, 0x0002_0003_0004_0005);
    /// assert!(!out.flag);
    /// ```
    pub fn execute(&mut self, op: Opcode, a: u64, b: u64, c: u64, rm_bits: u8) -> ExecOutcome {
        let rm = RoundingMode::from_bits(rm_bits).unwrap_or_else(|| {
            trace!(rm_bits, "unsupported rounding field, keeping ambient mode");
            RoundingMode::Rmm
        });
        match op.unit() {
            ExecUnit::Integer => {
                let (result, flag) = self.alu.execute(op, a, b);
                ExecOutcome {
                    result,
                    flag,
                    flags: FpFlags::NONE,
                }
            }
            ExecUnit::Single => Self::float_outcome(self.single.evaluate(op, a, b, c, rm)),
            ExecUnit::Double => Self::float_outcome(self.double.evaluate(op, a, b, c, rm)),
            ExecUnit::Packed => Self::float_outcome(self.packed.evaluate(op, a, b, c, rm)),
        }
    }

    const fn float_outcome((result, flags): (u64, FpFlags)) -> ExecOutcome {
        ExecOutcome {
            result,
            flag: false,
            flags,
        }
    }
}
