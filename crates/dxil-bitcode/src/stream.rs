//! Structural decoder for streams produced by [`BitcodeWriter`](crate::BitcodeWriter).
//!
//! Recovers the block tree, unabbreviated records, and abbreviation
//! definitions, and checks every length word against the body it covers.
//! Abbreviated records are never produced by the writer and are rejected.

use std::collections::BTreeMap;

use log::trace;

use crate::DecodeError;
use crate::abbrev::{AbbrevEncoding, AbbrevOp};
use crate::bitstream::{
    ABBREV_DATA_VBR, ABBREV_ENCODING_WIDTH, ABBREV_LITERAL_VBR, ABBREV_NUM_OPS_VBR,
    BLOCK_ABBREV_WIDTH_VBR, BLOCK_ID_VBR, BitReader, DEFINE_ABBREV, END_BLOCK, ENTER_SUBBLOCK,
    MAGIC, MAX_ABBREV_WIDTH, MAX_BLOCK_DEPTH, RECORD_VBR, TOP_LEVEL_ABBREV_WIDTH,
    UNABBREV_RECORD,
};
use crate::block::KnownBlock;
use crate::records::BlockInfoCode;

/// A decoded stream: the top-level blocks in order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Stream {
    pub blocks: Vec<Block>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Block {
    pub id: u32,
    pub abbrev_width: u32,
    /// Body length in 32-bit words, as declared by the length word.
    pub length_words: u32,
    pub items: Vec<Item>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Item {
    Block(Block),
    Record(Record),
    DefineAbbrev(Vec<AbbrevOp>),
}

/// An unabbreviated record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Record {
    pub code: u64,
    pub operands: Vec<u64>,
}

impl Block {
    pub fn known(&self) -> Option<KnownBlock> {
        KnownBlock::from_id(self.id)
    }

    pub fn records(&self) -> impl Iterator<Item = &Record> {
        self.items.iter().filter_map(|item| match item {
            Item::Record(record) => Some(record),
            _ => None,
        })
    }

    pub fn sub_blocks(&self) -> impl Iterator<Item = &Block> {
        self.items.iter().filter_map(|item| match item {
            Item::Block(block) => Some(block),
            _ => None,
        })
    }
}

impl Stream {
    /// Abbreviations registered through BLOCKINFO, keyed by target block id.
    ///
    /// `DEFINE_ABBREV`s seen before any `SETBID` have no target and are
    /// skipped.
    pub fn block_info(&self) -> BTreeMap<u32, Vec<Vec<AbbrevOp>>> {
        let mut map: BTreeMap<u32, Vec<Vec<AbbrevOp>>> = BTreeMap::new();
        let infos = self
            .blocks
            .iter()
            .filter(|b| b.id == KnownBlock::BlockInfo.id());

        for info in infos {
            let mut target = None;
            for item in &info.items {
                match item {
                    Item::Record(record) if record.code == BlockInfoCode::SetBid as u64 => {
                        target = record
                            .operands
                            .first()
                            .and_then(|&id| u32::try_from(id).ok());
                    }
                    Item::DefineAbbrev(ops) => {
                        if let Some(id) = target {
                            map.entry(id).or_default().push(ops.clone());
                        }
                    }
                    _ => {}
                }
            }
        }
        map
    }
}

/// Decode a whole stream, magic included.
pub fn parse(bytes: &[u8]) -> Result<Stream, DecodeError> {
    if !bytes.starts_with(&MAGIC) {
        return Err(DecodeError::InvalidMagic);
    }

    let mut reader = BitReader::new(&bytes[MAGIC.len()..]);
    let mut blocks = Vec::new();
    while !reader.at_end() {
        let id = reader.read_fixed(TOP_LEVEL_ABBREV_WIDTH)?;
        if id != ENTER_SUBBLOCK {
            return Err(DecodeError::UnexpectedTopLevelItem(id));
        }
        blocks.push(parse_block(&mut reader)?);
    }

    Ok(Stream { blocks })
}

/// A block whose header has been read but whose `END_BLOCK` has not.
struct OpenBlock {
    id: u32,
    abbrev_width: u32,
    length_words: u32,
    body_start: usize,
    items: Vec<Item>,
}

impl OpenBlock {
    /// Read a block header whose `ENTER_SUBBLOCK` id was just consumed.
    fn enter(reader: &mut BitReader<'_>) -> Result<Self, DecodeError> {
        let raw_id = reader.read_vbr(BLOCK_ID_VBR)?;
        let id = u32::try_from(raw_id).map_err(|_| DecodeError::InvalidBlockId(raw_id))?;
        let width = reader.read_vbr(BLOCK_ABBREV_WIDTH_VBR)?;
        if width == 0 || width > u64::from(MAX_ABBREV_WIDTH) {
            return Err(DecodeError::InvalidAbbrevWidth(width));
        }

        reader.align32()?;
        let length_words = reader.read_fixed(32)? as u32;
        let body_start = reader.byte_offset();
        trace!("block {id} at byte {body_start}, {length_words} words");

        Ok(Self {
            id,
            abbrev_width: width as u32,
            length_words,
            body_start,
            items: Vec::new(),
        })
    }

    /// Finish the block after its `END_BLOCK` padding, checking the length word.
    fn close(self, reader: &BitReader<'_>) -> Result<Block, DecodeError> {
        let actual = (reader.byte_offset() - self.body_start) / 4;
        if actual != self.length_words as usize {
            return Err(DecodeError::LengthMismatch {
                block: self.id,
                declared: self.length_words,
                actual,
            });
        }

        Ok(Block {
            id: self.id,
            abbrev_width: self.abbrev_width,
            length_words: self.length_words,
            items: self.items,
        })
    }
}

/// Parse a top-level block and everything nested in it.
///
/// Open ancestors live on an explicit stack. Nesting deeper than
/// [`MAX_BLOCK_DEPTH`] is an error.
fn parse_block(reader: &mut BitReader<'_>) -> Result<Block, DecodeError> {
    let mut current = OpenBlock::enter(reader)?;
    let mut parents: Vec<OpenBlock> = Vec::new();

    loop {
        let id = current.id;
        if reader.at_end() {
            return Err(DecodeError::UnterminatedBlock(id));
        }
        let abbrev_id = reader
            .read_fixed(current.abbrev_width)
            .map_err(|_| DecodeError::UnterminatedBlock(id))?;

        match abbrev_id {
            END_BLOCK => {
                reader
                    .align32()
                    .map_err(|_| DecodeError::UnterminatedBlock(id))?;
                let block = current.close(reader)?;
                match parents.pop() {
                    Some(parent) => {
                        current = parent;
                        current.items.push(Item::Block(block));
                    }
                    None => return Ok(block),
                }
            }
            ENTER_SUBBLOCK => {
                if parents.len() + 1 >= MAX_BLOCK_DEPTH {
                    return Err(DecodeError::NestingTooDeep(MAX_BLOCK_DEPTH));
                }
                let child = OpenBlock::enter(reader)?;
                parents.push(std::mem::replace(&mut current, child));
            }
            DEFINE_ABBREV => current
                .items
                .push(Item::DefineAbbrev(parse_define_abbrev(reader)?)),
            UNABBREV_RECORD => current
                .items
                .push(Item::Record(parse_unabbrev_record(reader)?)),
            other => return Err(DecodeError::AbbreviatedRecord(other)),
        }
    }
}

fn parse_define_abbrev(reader: &mut BitReader<'_>) -> Result<Vec<AbbrevOp>, DecodeError> {
    let num_ops = reader.read_vbr(ABBREV_NUM_OPS_VBR)?;
    let mut ops = Vec::new();
    for _ in 0..num_ops {
        if reader.read_bool()? {
            ops.push(AbbrevOp::Literal(reader.read_vbr(ABBREV_LITERAL_VBR)?));
            continue;
        }

        let tag = reader.read_fixed(ABBREV_ENCODING_WIDTH)?;
        let encoding =
            AbbrevEncoding::from_u64(tag).ok_or(DecodeError::InvalidAbbrevEncoding(tag))?;
        let op = match encoding {
            AbbrevEncoding::Fixed => AbbrevOp::Fixed(read_op_width(reader)?),
            AbbrevEncoding::Vbr => AbbrevOp::Vbr(read_op_width(reader)?),
            AbbrevEncoding::Array => AbbrevOp::Array,
            AbbrevEncoding::Char6 => AbbrevOp::Char6,
            AbbrevEncoding::Blob => AbbrevOp::Blob,
        };
        ops.push(op);
    }
    Ok(ops)
}

fn read_op_width(reader: &mut BitReader<'_>) -> Result<u32, DecodeError> {
    let width = reader.read_vbr(ABBREV_DATA_VBR)?;
    u32::try_from(width).map_err(|_| DecodeError::InvalidAbbrevWidth(width))
}

fn parse_unabbrev_record(reader: &mut BitReader<'_>) -> Result<Record, DecodeError> {
    let code = reader.read_vbr(RECORD_VBR)?;
    let count = reader.read_vbr(RECORD_VBR)?;
    let mut operands = Vec::new();
    for _ in 0..count {
        operands.push(reader.read_vbr(RECORD_VBR)?);
    }
    Ok(Record { code, operands })
}
