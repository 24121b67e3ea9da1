//! Errors raised while encoding or decoding a bitstream.

use crate::block::KnownBlock;

/// Encoding failure. The partially written buffer must be discarded.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodeError {
    #[error("unrecognised block id {0}")]
    UnknownBlock(u32),
    #[error("character {0:?} is not in the char6 alphabet")]
    InvalidChar6(char),
    #[error("type table is empty: type index width needs at least one type")]
    EmptyTypeTable,
    #[error("closing {closing} out of order (innermost open block: {open:?})")]
    MismatchedEndBlock {
        open: Option<KnownBlock>,
        closing: KnownBlock,
    },
    #[error("{0} is still open")]
    UnclosedBlock(KnownBlock),
    #[error("{block} body is {bytes} bytes, too long for its length word")]
    BlockTooLarge { block: KnownBlock, bytes: usize },
}

/// Decoding failure of the structural reader.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("invalid magic: expected 'BC' 0xC0DE")]
    InvalidMagic,
    #[error("unexpected end of stream at bit {bit}")]
    UnexpectedEnd { bit: usize },
    #[error("vbr value at bit {bit} exceeds 64 bits")]
    VbrOverflow { bit: usize },
    #[error("block id {0} does not fit in 32 bits")]
    InvalidBlockId(u64),
    #[error("invalid abbreviation encoding tag {0}")]
    InvalidAbbrevEncoding(u64),
    #[error("invalid abbreviation id width {0}")]
    InvalidAbbrevWidth(u64),
    #[error("abbreviated record (abbreviation id {0}) cannot be decoded")]
    AbbreviatedRecord(u64),
    #[error("unexpected abbreviation id {0} at top level")]
    UnexpectedTopLevelItem(u64),
    #[error("blocks nested deeper than {0} levels")]
    NestingTooDeep(usize),
    #[error("block {0} is not terminated")]
    UnterminatedBlock(u32),
    #[error("block {block} declares {declared} words, body has {actual}")]
    LengthMismatch {
        block: u32,
        declared: u32,
        actual: usize,
    },
}
