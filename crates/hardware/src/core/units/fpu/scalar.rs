//! Scalar floating-point operation table.
//!
//! Both precision units share one handler per operation kind; the opcode
//! only selects the kind. Operand registers are raw 64-bit patterns whose
//! low 32 or 64 bits are interpreted by the unit's precision.

use crate::isa::opcode::Opcode;

/// Operation kind of a scalar floating-point opcode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ScalarOp {
    FMAdd,
    FMSub,
    FNMAdd,
    FNMSub,
    Add,
    Sub,
    Mul,
    Div,
    Sqrt,
    ToInt { signed: bool, width: u32 },
    FromInt { signed: bool, width: u32 },
    SgnJ,
    SgnJN,
    SgnJX,
    Min,
    Max,
    Eq,
    Lt,
    Le,
    Class,
    MoveToInt,
    MoveFromInt,
    WidenSingle,
    NarrowToSingle,
}

impl ScalarOp {
    /// Maps a scalar opcode of either precision to its operation kind.
    pub(crate) const fn decode(op: Opcode) -> Option<Self> {
        use Opcode as O;
        Some(match op {
            O::FMAddS | O::FMAddD => Self::FMAdd,
            O::FMSubS | O::FMSubD => Self::FMSub,
            O::FNMAddS | O::FNMAddD => Self::FNMAdd,
            O::FNMSubS | O::FNMSubD => Self::FNMSub,
            O::FAddS | O::FAddD => Self::Add,
            O::FSubS | O::FSubD => Self::Sub,
            O::FMulS | O::FMulD => Self::Mul,
            O::FDivS | O::FDivD => Self::Div,
            O::FSqrtS | O::FSqrtD => Self::Sqrt,
            O::FCvtWS | O::FCvtWD => Self::ToInt {
                signed: true,
                width: 32,
            },
            O::FCvtWuS | O::FCvtWuD => Self::ToInt {
                signed: false,
                width: 32,
            },
            O::FCvtLS | O::FCvtLD => Self::ToInt {
                signed: true,
                width: 64,
            },
            O::FCvtLuS | O::FCvtLuD => Self::ToInt {
                signed: false,
                width: 64,
            },
            O::FCvtSW | O::FCvtDW => Self::FromInt {
                signed: true,
                width: 32,
            },
            O::FCvtSWu | O::FCvtDWu => Self::FromInt {
                signed: false,
                width: 32,
            },
            O::FCvtSL | O::FCvtDL => Self::FromInt {
                signed: true,
                width: 64,
            },
            O::FCvtSLu | O::FCvtDLu => Self::FromInt {
                signed: false,
                width: 64,
            },
            O::FSgnjS | O::FSgnjD => Self::SgnJ,
            O::FSgnjnS | O::FSgnjnD => Self::SgnJN,
            O::FSgnjxS | O::FSgnjxD => Self::SgnJX,
            O::FMinS | O::FMinD => Self::Min,
            O::FMaxS | O::FMaxD => Self::Max,
            O::FEqS | O::FEqD => Self::Eq,
            O::FLtS | O::FLtD => Self::Lt,
            O::FLeS | O::FLeD => Self::Le,
            O::FClassS | O::FClassD => Self::Class,
            O::FMvXW | O::FMvXD => Self::MoveToInt,
            O::FMvWX | O::FMvDX => Self::MoveFromInt,
            O::FCvtDS => Self::WidenSingle,
            O::FCvtSD => Self::NarrowToSingle,
            _ => return None,
        })
    }
}

/// Sign-extends the low `width` bits of `bits` to 64 bits.
pub(crate) const fn sign_extend(bits: u64, width: u32) -> u64 {
    let shift = 64 - width;
    (((bits << shift) as i64) >> shift) as u64
}
