//! Abbreviation model.
//!
//! An abbreviation is a pre-declared operand layout for a record. The first
//! operand describes the record code, usually as a literal. The tables in
//! [`tables`] are compile-time constants; the only dynamic part, the width
//! of type-index operands, is resolved by [`AbbrevOp::resolve`] at emission.

mod tables;


pub use tables::{
    BLOCKINFO_BLOCKS, CONSTANTS_ABBREVS, ConstantsAbbrev, FUNCTION_ABBREVS, FunctionAbbrev,
    VALUE_SYMTAB_ABBREVS, ValueSymtabAbbrev, block_abbrevs,
};

/// Capacity of an abbreviation, in operands.
pub const MAX_ABBREV_OPS: usize = 8;

/// Encoding tag written for a non-literal operand.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[repr(u8)]
pub enum AbbrevEncoding {
    Fixed = 1,
    Vbr = 2,
    Array = 3,
    Char6 = 4,
    Blob = 5,
}

impl AbbrevEncoding {
    /// Convert from the raw 3-bit tag.
    pub fn from_u64(v: u64) -> Option<Self> {
        match v {
            1 => Some(Self::Fixed),
            2 => Some(Self::Vbr),
            3 => Some(Self::Array),
            4 => Some(Self::Char6),
            5 => Some(Self::Blob),
            _ => None,
        }
    }

    /// Whether a width follows the tag.
    pub fn has_data(self) -> bool {
        matches!(self, Self::Fixed | Self::Vbr)
    }
}

/// One operand of an abbreviation.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum AbbrevOp {
    /// Constant value; not present in the record bits.
    Literal(u64),
    /// Fixed-width field of the given bit count.
    Fixed(u32),
    /// VBR field with the given chunk width.
    Vbr(u32),
    /// Length-prefixed array; the next operand is the element encoding.
    Array,
    Char6,
    Blob,
    /// Fixed-width type index, sized from the module's type count.
    TypeIndex,
}

impl AbbrevOp {
    /// Replace [`TypeIndex`](Self::TypeIndex) with a fixed field wide enough
    /// for `num_types` types. Every other operand is returned unchanged.
    pub fn resolve(self, num_types: u32) -> Self {
        match self {
            Self::TypeIndex => Self::Fixed(type_index_width(num_types)),
            op => op,
        }
    }

    /// Encoding tag, or `None` for literals.
    pub fn encoding(self) -> Option<AbbrevEncoding> {
        match self {
            Self::Literal(_) => None,
            Self::Fixed(_) | Self::TypeIndex => Some(AbbrevEncoding::Fixed),
            Self::Vbr(_) => Some(AbbrevEncoding::Vbr),
            Self::Array => Some(AbbrevEncoding::Array),
            Self::Char6 => Some(AbbrevEncoding::Char6),
            Self::Blob => Some(AbbrevEncoding::Blob),
        }
    }

    pub fn is_literal(self) -> bool {
        matches!(self, Self::Literal(_))
    }

    /// Whether this operand may describe the elements of an array.
    pub fn is_scalar(self) -> bool {
        matches!(
            self,
            Self::Fixed(_) | Self::Vbr(_) | Self::Char6 | Self::TypeIndex
        )
    }
}

impl std::fmt::Display for AbbrevOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Literal(v) => write!(f, "lit({v})"),
            Self::Fixed(w) => write!(f, "fixed({w})"),
            Self::Vbr(w) => write!(f, "vbr({w})"),
            Self::Array => f.write_str("array"),
            Self::Char6 => f.write_str("char6"),
            Self::Blob => f.write_str("blob"),
            Self::TypeIndex => f.write_str("fixed(type)"),
        }
    }
}

/// Bits needed to store any type index below `num_types`.
///
/// Equals the bit length of `num_types` itself, so a count that is a power
/// of two gets one spare bit, as LLVM does.
pub fn type_index_width(num_types: u32) -> u32 {
    u32::BITS - num_types.leading_zeros()
}

/// A named abbreviation shape.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Abbrev {
    pub name: &'static str,
    pub ops: &'static [AbbrevOp],
}

impl Abbrev {
    pub const fn new(name: &'static str, ops: &'static [AbbrevOp]) -> Self {
        Self { name, ops }
    }

    /// Operands with type-index widths resolved for `num_types` types.
    pub fn resolved(&self, num_types: u32) -> impl Iterator<Item = AbbrevOp> + '_ {
        self.ops.iter().map(move |op| op.resolve(num_types))
    }

    /// Check the structural rules a reader relies on: between one and
    /// [`MAX_ABBREV_OPS`] operands, and every array is the second-to-last
    /// operand followed by a single scalar element encoding.
    pub fn is_well_formed(&self) -> bool {
        let ops = self.ops;
        if ops.is_empty() || ops.len() > MAX_ABBREV_OPS {
            return false;
        }
        ops.iter().enumerate().all(|(i, op)| match op {
            AbbrevOp::Array => i + 2 == ops.len() && ops[i + 1].is_scalar(),
            AbbrevOp::Blob => i + 1 == ops.len(),
            _ => true,
        })
    }
}
