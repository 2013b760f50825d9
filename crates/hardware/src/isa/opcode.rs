//! Operation selectors.
//!
//! The opcode set is closed. Every variant belongs to exactly one
//! [`OpcodeFamily`], and every family is owned by exactly one [`ExecUnit`];
//! adding an operation means adding a row to the table below and one
//! handler arm in the owning unit.

use std::fmt;
use std::str::FromStr;

use crate::common::error::OpcodeError;

/// Operand interpretation family of an opcode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OpcodeFamily {
    /// 64-bit and 32-bit ("w") scalar integer operations.
    Integer,
    /// Packed 2x32-bit and 4x16-bit integer lanes.
    IntegerSimd,
    /// IEEE-754 single precision in the low 32 bits.
    ScalarSingle,
    /// IEEE-754 double precision in all 64 bits.
    ScalarDouble,
    /// Four bfloat16 lanes.
    PackedBf16,
    /// Two single-precision lanes.
    PackedF32,
    /// SEC-DED check and correct.
    Ecc,
    /// Random single-bit upset.
    FaultInjection,
}

/// Execution unit that owns an opcode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ExecUnit {
    /// [`IntegerAlu`](crate::core::units::alu::IntegerAlu).
    Integer,
    /// Single-precision [`FloatUnit`](crate::core::units::fpu::FloatUnit).
    Single,
    /// Double-precision [`FloatUnit`](crate::core::units::fpu::FloatUnit).
    Double,
    /// [`PackedFloatUnit`](crate::core::units::fpu::packed::PackedFloatUnit).
    Packed,
}

impl OpcodeFamily {
    /// Returns the unit that executes this family.
    pub const fn unit(self) -> ExecUnit {
        match self {
            Self::Integer | Self::IntegerSimd | Self::Ecc | Self::FaultInjection => {
                ExecUnit::Integer
            }
            Self::ScalarSingle => ExecUnit::Single,
            Self::ScalarDouble => ExecUnit::Double,
            Self::PackedBf16 | Self::PackedF32 => ExecUnit::Packed,
        }
    }
}

macro_rules! opcodes {
    ($( $(#[$attr:meta])* $name:ident = $mnemonic:literal, $family:ident; )*) => {
        /// Operation selector routed to one execution unit.
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        pub enum Opcode {
            $( $(#[$attr])* $name, )*
        }

        impl Opcode {
            /// Every opcode, in table order.
            pub const ALL: &'static [Self] = &[ $( Self::$name, )* ];

            /// Assembly mnemonic of the opcode.
            pub const fn mnemonic(self) -> &'static str {
                match self {
                    $( Self::$name => $mnemonic, )*
                }
            }

            /// Operand interpretation family of the opcode.
            pub const fn family(self) -> OpcodeFamily {
                match self {
                    $( Self::$name => OpcodeFamily::$family, )*
                }
            }
        }
    };
}

opcodes! {
    /// 64-bit add, overflow flagged.
    Add = "add", Integer;
    /// 32-bit add, sign-extended.
    Addw = "addw", Integer;
    /// 64-bit subtract, overflow flagged.
    Sub = "sub", Integer;
    /// 32-bit subtract, sign-extended.
    Subw = "subw", Integer;
    /// 64-bit multiply (low bits), overflow flagged.
    Mul = "mul", Integer;
    /// 32-bit multiply, sign-extended.
    Mulw = "mulw", Integer;
    /// High 64 bits of signed x signed.
    Mulh = "mulh", Integer;
    /// High 64 bits of signed x unsigned.
    Mulhsu = "mulhsu", Integer;
    /// High 64 bits of unsigned x unsigned.
    Mulhu = "mulhu", Integer;
    /// Signed 64-bit divide.
    Div = "div", Integer;
    /// Signed 32-bit divide.
    Divw = "divw", Integer;
    /// Unsigned 64-bit divide.
    Divu = "divu", Integer;
    /// Unsigned 32-bit divide.
    Divuw = "divuw", Integer;
    /// Signed 64-bit remainder.
    Rem = "rem", Integer;
    /// Signed 32-bit remainder.
    Remw = "remw", Integer;
    /// Unsigned 64-bit remainder.
    Remu = "remu", Integer;
    /// Unsigned 32-bit remainder.
    Remuw = "remuw", Integer;
    /// Bitwise AND.
    And = "and", Integer;
    /// Bitwise OR.
    Or = "or", Integer;
    /// Bitwise XOR.
    Xor = "xor", Integer;
    /// Shift left logical.
    Sll = "sll", Integer;
    /// 32-bit shift left logical.
    Sllw = "sllw", Integer;
    /// Shift right logical.
    Srl = "srl", Integer;
    /// 32-bit shift right logical.
    Srlw = "srlw", Integer;
    /// Shift right arithmetic.
    Sra = "sra", Integer;
    /// 32-bit shift right arithmetic.
    Sraw = "sraw", Integer;
    /// Set if less than (signed).
    Slt = "slt", Integer;
    /// Set if less than (unsigned).
    Sltu = "sltu", Integer;

    /// Lane-wise add, 2x32.
    SimdAdd32 = "simd.add32", IntegerSimd;
    /// Lane-wise subtract, 2x32.
    SimdSub32 = "simd.sub32", IntegerSimd;
    /// Lane-wise multiply, 2x32.
    SimdMul32 = "simd.mul32", IntegerSimd;
    /// Lane-wise signed divide, 2x32.
    SimdDiv32 = "simd.div32", IntegerSimd;
    /// Lane-wise signed remainder, 2x32.
    SimdRem32 = "simd.rem32", IntegerSimd;
    /// Assemble `low32(a)` above `low32(b)`.
    SimdLoad32 = "simd.ld32", IntegerSimd;
    /// Lane-wise add, 4x16.
    SimdAdd16 = "simd.add16", IntegerSimd;
    /// Lane-wise subtract, 4x16.
    SimdSub16 = "simd.sub16", IntegerSimd;
    /// Lane-wise multiply, 4x16.
    SimdMul16 = "simd.mul16", IntegerSimd;
    /// Lane-wise signed divide, 4x16.
    SimdDiv16 = "simd.div16", IntegerSimd;
    /// Lane-wise signed remainder, 4x16.
    SimdRem16 = "simd.rem16", IntegerSimd;
    /// Move the upper half-word pair of `b` into the upper half.
    SimdLoad16Upper = "simd.ld16u", IntegerSimd;
    /// Move the lower half-word pair of `b` into the lower half.
    SimdLoad16Lower = "simd.ld16l", IntegerSimd;

    /// SEC-DED check and correct of a protected register.
    CheckError = "ecc.check", Ecc;
    /// Random single-bit flip in the low 32 bits.
    InjectFlip = "inject.flip", FaultInjection;

    /// Fused `a*b + c` (single).
    FMAddS = "fmadd.s", ScalarSingle;
    /// Fused `a*b - c` (single).
    FMSubS = "fmsub.s", ScalarSingle;
    /// Fused `-(a*b) - c` (single).
    FNMAddS = "fnmadd.s", ScalarSingle;
    /// Fused `-(a*b) + c` (single).
    FNMSubS = "fnmsub.s", ScalarSingle;
    /// Add (single).
    FAddS = "fadd.s", ScalarSingle;
    /// Subtract (single).
    FSubS = "fsub.s", ScalarSingle;
    /// Multiply (single).
    FMulS = "fmul.s", ScalarSingle;
    /// Divide (single).
    FDivS = "fdiv.s", ScalarSingle;
    /// Square root (single).
    FSqrtS = "fsqrt.s", ScalarSingle;
    /// Single to signed 32-bit integer.
    FCvtWS = "fcvt.w.s", ScalarSingle;
    /// Single to unsigned 32-bit integer.
    FCvtWuS = "fcvt.wu.s", ScalarSingle;
    /// Single to signed 64-bit integer.
    FCvtLS = "fcvt.l.s", ScalarSingle;
    /// Single to unsigned 64-bit integer.
    FCvtLuS = "fcvt.lu.s", ScalarSingle;
    /// Signed 32-bit integer to single.
    FCvtSW = "fcvt.s.w", ScalarSingle;
    /// Unsigned 32-bit integer to single.
    FCvtSWu = "fcvt.s.wu", ScalarSingle;
    /// Signed 64-bit integer to single.
    FCvtSL = "fcvt.s.l", ScalarSingle;
    /// Unsigned 64-bit integer to single.
    FCvtSLu = "fcvt.s.lu", ScalarSingle;
    /// Sign injection (single).
    FSgnjS = "fsgnj.s", ScalarSingle;
    /// Negated sign injection (single).
    FSgnjnS = "fsgnjn.s", ScalarSingle;
    /// Xor sign injection (single).
    FSgnjxS = "fsgnjx.s", ScalarSingle;
    /// Minimum (single).
    FMinS = "fmin.s", ScalarSingle;
    /// Maximum (single).
    FMaxS = "fmax.s", ScalarSingle;
    /// Equal (single).
    FEqS = "feq.s", ScalarSingle;
    /// Less than (single).
    FLtS = "flt.s", ScalarSingle;
    /// Less than or equal (single).
    FLeS = "fle.s", ScalarSingle;
    /// Classify (single).
    FClassS = "fclass.s", ScalarSingle;
    /// Raw single bits to integer, sign-extended.
    FMvXW = "fmv.x.w", ScalarSingle;
    /// Raw integer bits to single.
    FMvWX = "fmv.w.x", ScalarSingle;

    /// Fused `a*b + c` (double).
    FMAddD = "fmadd.d", ScalarDouble;
    /// Fused `a*b - c` (double).
    FMSubD = "fmsub.d", ScalarDouble;
    /// Fused `-(a*b) - c` (double).
    FNMAddD = "fnmadd.d", ScalarDouble;
    /// Fused `-(a*b) + c` (double).
    FNMSubD = "fnmsub.d", ScalarDouble;
    /// Add (double).
    FAddD = "fadd.d", ScalarDouble;
    /// Subtract (double).
    FSubD = "fsub.d", ScalarDouble;
    /// Multiply (double).
    FMulD = "fmul.d", ScalarDouble;
    /// Divide (double).
    FDivD = "fdiv.d", ScalarDouble;
    /// Square root (double).
    FSqrtD = "fsqrt.d", ScalarDouble;
    /// Double to signed 32-bit integer.
    FCvtWD = "fcvt.w.d", ScalarDouble;
    /// Double to unsigned 32-bit integer.
    FCvtWuD = "fcvt.wu.d", ScalarDouble;
    /// Double to signed 64-bit integer.
    FCvtLD = "fcvt.l.d", ScalarDouble;
    /// Double to unsigned 64-bit integer.
    FCvtLuD = "fcvt.lu.d", ScalarDouble;
    /// Signed 32-bit integer to double.
    FCvtDW = "fcvt.d.w", ScalarDouble;
    /// Unsigned 32-bit integer to double.
    FCvtDWu = "fcvt.d.wu", ScalarDouble;
    /// Signed 64-bit integer to double.
    FCvtDL = "fcvt.d.l", ScalarDouble;
    /// Unsigned 64-bit integer to double.
    FCvtDLu = "fcvt.d.lu", ScalarDouble;
    /// Single (low 32 bits) to double.
    FCvtDS = "fcvt.d.s", ScalarDouble;
    /// Double to single (low 32 bits).
    FCvtSD = "fcvt.s.d", ScalarDouble;
    /// Sign injection (double).
    FSgnjD = "fsgnj.d", ScalarDouble;
    /// Negated sign injection (double).
    FSgnjnD = "fsgnjn.d", ScalarDouble;
    /// Xor sign injection (double).
    FSgnjxD = "fsgnjx.d", ScalarDouble;
    /// Minimum (double).
    FMinD = "fmin.d", ScalarDouble;
    /// Maximum (double).
    FMaxD = "fmax.d", ScalarDouble;
    /// Equal (double).
    FEqD = "feq.d", ScalarDouble;
    /// Less than (double).
    FLtD = "flt.d", ScalarDouble;
    /// Less than or equal (double).
    FLeD = "fle.d", ScalarDouble;
    /// Classify (double).
    FClassD = "fclass.d", ScalarDouble;
    /// Raw double bits to integer.
    FMvXD = "fmv.x.d", ScalarDouble;
    /// Raw integer bits to double.
    FMvDX = "fmv.d.x", ScalarDouble;

    /// Lane-wise add, 4xbfloat16.
    FAddBf16 = "fadd.bf16", PackedBf16;
    /// Lane-wise subtract, 4xbfloat16.
    FSubBf16 = "fsub.bf16", PackedBf16;
    /// Lane-wise multiply, 4xbfloat16.
    FMulBf16 = "fmul.bf16", PackedBf16;
    /// Lane-wise divide, 4xbfloat16.
    FDivBf16 = "fdiv.bf16", PackedBf16;
    /// Four-lane dot product accumulated into a single-precision value.
    VDotpBf16 = "vdotp.bf16", PackedBf16;

    /// Lane-wise add, 2xf32.
    SimdfAdd32 = "simdf.add32", PackedF32;
    /// Lane-wise subtract, 2xf32.
    SimdfSub32 = "simdf.sub32", PackedF32;
    /// Lane-wise multiply, 2xf32.
    SimdfMul32 = "simdf.mul32", PackedF32;
    /// Lane-wise divide, 2xf32.
    SimdfDiv32 = "simdf.div32", PackedF32;
    /// Lane-wise remainder (`fmod`), 2xf32.
    SimdfRem32 = "simdf.rem32", PackedF32;
    /// Assemble `low32(a)` above `low32(b)` without arithmetic.
    SimdfLd32 = "simdf.ld32", PackedF32;
}

impl Opcode {
    /// Returns the unit that executes this opcode.
    pub const fn unit(self) -> ExecUnit {
        self.family().unit()
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

impl FromStr for Opcode {
    type Err = OpcodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|op| op.mnemonic().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| OpcodeError(wanted.to_owned()))
    }
}
