//! Abbreviations declared in the module-level BLOCKINFO block.
//!
//! The shapes match the ones dxc's LLVM hardcodes for these block kinds.

use crate::bitstream::FIRST_APPLICATION_ABBREV;
use crate::block::KnownBlock;
use crate::records::{ConstantsCode, FunctionCode, ValueSymtabCode};

use super::Abbrev;
use super::AbbrevOp::{Array, Char6, Fixed, Literal, TypeIndex, Vbr};

/// Block kinds that get BLOCKINFO abbreviations, in emission order.
pub const BLOCKINFO_BLOCKS: [KnownBlock; 3] = [
    KnownBlock::ValueSymtab,
    KnownBlock::Constants,
    KnownBlock::Function,
];

pub const VALUE_SYMTAB_ABBREVS: &[Abbrev] = &[
    Abbrev::new("entry8", &[Fixed(3), Vbr(8), Array, Fixed(8)]),
    Abbrev::new(
        "entry7",
        &[Literal(ValueSymtabCode::Entry as u64), Vbr(8), Array, Fixed(7)],
    ),
    Abbrev::new(
        "entry6",
        &[Literal(ValueSymtabCode::Entry as u64), Vbr(8), Array, Char6],
    ),
    Abbrev::new(
        "bbentry6",
        &[Literal(ValueSymtabCode::BbEntry as u64), Vbr(8), Array, Char6],
    ),
];

pub const CONSTANTS_ABBREVS: &[Abbrev] = &[
    Abbrev::new("settype", &[Literal(ConstantsCode::SetType as u64), TypeIndex]),
    Abbrev::new("integer", &[Literal(ConstantsCode::Integer as u64), Vbr(8)]),
    Abbrev::new(
        "eval_cast",
        &[Literal(ConstantsCode::EvalCast as u64), Fixed(4), TypeIndex, Vbr(8)],
    ),
    Abbrev::new("null", &[Literal(ConstantsCode::Null as u64)]),
];

pub const FUNCTION_ABBREVS: &[Abbrev] = &[
    Abbrev::new(
        "load",
        &[Literal(FunctionCode::Load as u64), Vbr(6), TypeIndex, Vbr(4), Fixed(1)],
    ),
    Abbrev::new(
        "binop",
        &[Literal(FunctionCode::BinOp as u64), Vbr(6), Vbr(6), Fixed(4)],
    ),
    Abbrev::new(
        "binop_flags",
        &[Literal(FunctionCode::BinOp as u64), Vbr(6), Vbr(6), Fixed(4), Fixed(7)],
    ),
    Abbrev::new(
        "cast",
        &[Literal(FunctionCode::Cast as u64), Vbr(6), TypeIndex, Fixed(4)],
    ),
    Abbrev::new("ret_void", &[Literal(FunctionCode::Ret as u64)]),
    Abbrev::new("ret_value", &[Literal(FunctionCode::Ret as u64), Vbr(6)]),
    Abbrev::new("unreachable", &[Literal(FunctionCode::Unreachable as u64)]),
    Abbrev::new(
        "gep",
        &[Literal(FunctionCode::Gep as u64), Fixed(1), TypeIndex, Array, Vbr(6)],
    ),
];

/// BLOCKINFO abbreviations for `block`; empty for kinds that have none.
pub fn block_abbrevs(block: KnownBlock) -> &'static [Abbrev] {
    match block {
        KnownBlock::ValueSymtab => VALUE_SYMTAB_ABBREVS,
        KnownBlock::Constants => CONSTANTS_ABBREVS,
        KnownBlock::Function => FUNCTION_ABBREVS,
        _ => &[],
    }
}

/// Value symbol table abbreviations, in table order.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum ValueSymtabAbbrev {
    Entry8,
    Entry7,
    Entry6,
    BbEntry6,
}

impl ValueSymtabAbbrev {
    /// Abbreviation id a reader assigns after BLOCKINFO registration.
    pub fn abbrev_id(self) -> u64 {
        FIRST_APPLICATION_ABBREV + self as u64
    }

    pub fn definition(self) -> &'static Abbrev {
        &VALUE_SYMTAB_ABBREVS[self as usize]
    }
}

/// Constants block abbreviations, in table order.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum ConstantsAbbrev {
    SetType,
    Integer,
    EvalCast,
    Null,
}

impl ConstantsAbbrev {
    pub fn abbrev_id(self) -> u64 {
        FIRST_APPLICATION_ABBREV + self as u64
    }

    pub fn definition(self) -> &'static Abbrev {
        &CONSTANTS_ABBREVS[self as usize]
    }
}

/// Function block abbreviations, in table order.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum FunctionAbbrev {
    Load,
    BinOp,
    BinOpFlags,
    Cast,
    RetVoid,
    RetValue,
    Unreachable,
    Gep,
}

impl FunctionAbbrev {
    pub fn abbrev_id(self) -> u64 {
        FIRST_APPLICATION_ABBREV + self as u64
    }

    pub fn definition(self) -> &'static Abbrev {
        &FUNCTION_ABBREVS[self as usize]
    }
}
