//! Record codes referenced by the abbreviation tables and the BLOCKINFO block.
//!
//! Only the codes this crate needs are listed; the full DXIL record
//! vocabulary belongs to the caller.

/// Records of the BLOCKINFO block.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[repr(u32)]
pub enum BlockInfoCode {
    /// Selects the block kind that following `DEFINE_ABBREV`s apply to.
    SetBid = 1,
    BlockName = 2,
    SetRecordName = 3,
}

impl BlockInfoCode {
    pub fn from_u32(code: u32) -> Option<Self> {
        match code {
            1 => Some(Self::SetBid),
            2 => Some(Self::BlockName),
            3 => Some(Self::SetRecordName),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::SetBid => "SETBID",
            Self::BlockName => "BLOCKNAME",
            Self::SetRecordName => "SETRECORDNAME",
        }
    }
}

/// Records of the value symbol table.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[repr(u32)]
pub enum ValueSymtabCode {
    /// `[value_id, name...]`
    Entry = 1,
    /// `[bb_id, name...]`
    BbEntry = 2,
}

/// Records of the constants block.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[repr(u32)]
pub enum ConstantsCode {
    SetType = 1,
    Null = 2,
    Integer = 4,
    /// `[opcode, type, value]`
    EvalCast = 11,
}

/// Instruction records of the function block.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[repr(u32)]
pub enum FunctionCode {
    BinOp = 2,
    Cast = 3,
    Ret = 10,
    Unreachable = 15,
    Load = 20,
    Gep = 43,
}
