//! Block-structured bitcode emission.
//!
//! [`BitcodeWriter`] frames blocks on top of a [`BitWriter`]: entering a
//! block reserves a 32-bit length word, leaving it patches in the body size
//! so readers can skip blocks they don't understand. Records are emitted in
//! the unabbreviated form; abbreviations are only declared, in the BLOCKINFO
//! block, for the reader's benefit.

use log::{debug, error, trace};

use crate::EncodeError;
use crate::abbrev::{Abbrev, AbbrevEncoding, AbbrevOp, BLOCKINFO_BLOCKS, block_abbrevs};
use crate::bitstream::{
    ABBREV_DATA_VBR, ABBREV_ENCODING_WIDTH, ABBREV_LITERAL_VBR, ABBREV_NUM_OPS_VBR,
    BLOCK_ABBREV_WIDTH_VBR, BLOCK_ID_VBR, BitWriter, DEFINE_ABBREV, END_BLOCK, ENTER_SUBBLOCK,
    MAGIC, RECORD_VBR, TOP_LEVEL_ABBREV_WIDTH, UNABBREV_RECORD,
};
use crate::block::KnownBlock;
use crate::records::BlockInfoCode;

/// An entered, not yet exited block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct BlockFrame {
    block: KnownBlock,
    /// Byte offset of the length placeholder.
    length_offset: usize,
}

/// Handle to an open block, consumed by [`BitcodeWriter::end_block`].
///
/// Owns the length placeholder of its block: the word is patched exactly
/// when the scope is handed back.
#[must_use = "an open block must be closed with `end_block`"]
#[derive(Debug, PartialEq, Eq)]
pub struct BlockScope {
    block: KnownBlock,
    length_offset: usize,
    depth: usize,
}

impl BlockScope {
    pub fn block(&self) -> KnownBlock {
        self.block
    }

    /// Byte offset of the block's length word.
    pub fn length_offset(&self) -> usize {
        self.length_offset
    }

    /// Nesting depth of the block, 1 for a top-level block.
    pub fn depth(&self) -> usize {
        self.depth
    }
}

/// Writer session producing one bitcode stream.
#[derive(Debug)]
pub struct BitcodeWriter {
    bits: BitWriter,
    stack: Vec<BlockFrame>,
}

impl Default for BitcodeWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl BitcodeWriter {
    /// Start a stream: writes the magic, no block open.
    pub fn new() -> Self {
        Self::with_buffer(Vec::new())
    }

    /// Start a stream appended to the bytes already in `buf`.
    ///
    /// Word alignment and length offsets are measured from the start of
    /// `buf`, so existing contents should be a whole number of words.
    pub fn with_buffer(buf: Vec<u8>) -> Self {
        let mut bits = BitWriter::with_buffer(buf);
        bits.write_bytes(&MAGIC);
        Self {
            bits,
            stack: Vec::new(),
        }
    }

    /// Abbreviation id width of the innermost open block.
    pub fn abbrev_width(&self) -> u32 {
        self.stack
            .last()
            .map_or(TOP_LEVEL_ABBREV_WIDTH, |frame| frame.block.abbrev_width())
    }

    pub fn current_block(&self) -> Option<KnownBlock> {
        self.stack.last().map(|frame| frame.block)
    }

    /// Number of open blocks.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.bits.as_bytes()
    }

    /// Raw access to the bit cursor, for record payloads this writer has no
    /// helper for.
    pub fn bits_mut(&mut self) -> &mut BitWriter {
        &mut self.bits
    }

    /// Enter a block.
    ///
    /// Unknown block ids are rejected before any bit is written.
    pub fn begin_block(&mut self, block: impl Into<u32>) -> Result<BlockScope, EncodeError> {
        let id = block.into();
        let Some(block) = KnownBlock::from_id(id) else {
            error!("encoding error: unrecognised block {id}");
            return Err(EncodeError::UnknownBlock(id));
        };
        let width = block.abbrev_width();

        self.bits.write_fixed(self.abbrev_width(), ENTER_SUBBLOCK);
        self.bits.write_vbr(BLOCK_ID_VBR, u64::from(id));
        self.bits.write_vbr(BLOCK_ABBREV_WIDTH_VBR, u64::from(width));
        self.bits.align32();

        let length_offset = self.bits.byte_offset();
        self.bits.write_fixed(32, 0);

        self.stack.push(BlockFrame {
            block,
            length_offset,
        });
        trace!("enter {block} at byte {length_offset}, abbrev width {width}");

        Ok(BlockScope {
            block,
            length_offset,
            depth: self.stack.len(),
        })
    }

    /// Leave the innermost block and patch its length word.
    pub fn end_block(&mut self, scope: BlockScope) -> Result<(), EncodeError> {
        let top = self.stack.last().copied();
        let expected = BlockFrame {
            block: scope.block,
            length_offset: scope.length_offset,
        };
        if top != Some(expected) || scope.depth != self.stack.len() {
            return Err(EncodeError::MismatchedEndBlock {
                open: top.map(|frame| frame.block),
                closing: scope.block,
            });
        }

        self.bits.write_fixed(self.abbrev_width(), END_BLOCK);
        self.bits.align32();

        // The length word itself is not part of the body.
        let bytes = self.bits.byte_offset() - scope.length_offset - 4;
        let words = u32::try_from(bytes / 4).map_err(|_| EncodeError::BlockTooLarge {
            block: scope.block,
            bytes,
        })?;
        self.bits.patch_word(scope.length_offset, words);

        self.stack.pop();
        trace!("exit {} with {words} words", scope.block);
        Ok(())
    }

    /// Run `body` inside a block.
    pub fn block<F>(&mut self, block: impl Into<u32>, body: F) -> Result<(), EncodeError>
    where
        F: FnOnce(&mut Self) -> Result<(), EncodeError>,
    {
        let scope = self.begin_block(block)?;
        body(self)?;
        self.end_block(scope)
    }

    /// Emit the module-level BLOCKINFO block.
    ///
    /// Declares the abbreviations of every kind in [`BLOCKINFO_BLOCKS`], with
    /// type-index operands sized for `num_types` types.
    pub fn emit_block_info(&mut self, num_types: u32) -> Result<(), EncodeError> {
        if num_types == 0 {
            return Err(EncodeError::EmptyTypeTable);
        }
        debug!("emitting BLOCKINFO for {num_types} types");

        self.block(KnownBlock::BlockInfo, |w| {
            for block in BLOCKINFO_BLOCKS {
                w.emit_unabbrev(BlockInfoCode::SetBid as u32, block.id());
                for abbrev in block_abbrevs(block) {
                    w.emit_define_abbrev(abbrev, num_types)?;
                }
            }
            Ok(())
        })
    }

    /// Emit a `DEFINE_ABBREV` for `abbrev` in the current block.
    ///
    /// Type-index operands are sized for `num_types` types, which must not be
    /// zero; nothing is written on error.
    pub fn emit_define_abbrev(
        &mut self,
        abbrev: &Abbrev,
        num_types: u32,
    ) -> Result<(), EncodeError> {
        if num_types == 0 {
            return Err(EncodeError::EmptyTypeTable);
        }
        self.bits.write_fixed(self.abbrev_width(), DEFINE_ABBREV);
        self.bits.write_vbr(ABBREV_NUM_OPS_VBR, abbrev.ops.len() as u64);
        for op in abbrev.resolved(num_types) {
            write_abbrev_op(&mut self.bits, op);
        }
        Ok(())
    }

    /// Emit an unabbreviated record with a single operand.
    pub fn emit_unabbrev(&mut self, code: u32, value: impl Into<u64>) {
        self.emit_unabbrev_ops(code, &[value.into()]);
    }

    /// Emit an unabbreviated record.
    pub fn emit_unabbrev_ops<T>(&mut self, code: u32, values: &[T])
    where
        T: Copy + Into<u64>,
    {
        self.bits.write_fixed(self.abbrev_width(), UNABBREV_RECORD);
        self.bits.write_vbr(RECORD_VBR, u64::from(code));
        self.bits.write_vbr(RECORD_VBR, values.len() as u64);
        for &value in values {
            self.bits.write_vbr(RECORD_VBR, value.into());
        }
    }

    /// Align to a word boundary and hand over the finished stream.
    pub fn finish(mut self) -> Result<Vec<u8>, EncodeError> {
        if let Some(frame) = self.stack.last() {
            return Err(EncodeError::UnclosedBlock(frame.block));
        }
        self.bits.align32();
        Ok(self.bits.into_bytes())
    }
}

fn write_abbrev_op(bits: &mut BitWriter, op: AbbrevOp) {
    let (encoding, width) = match op {
        AbbrevOp::Literal(value) => {
            bits.write_bool(true);
            bits.write_vbr(ABBREV_LITERAL_VBR, value);
            return;
        }
        AbbrevOp::Fixed(width) => (AbbrevEncoding::Fixed, Some(width)),
        AbbrevOp::Vbr(width) => (AbbrevEncoding::Vbr, Some(width)),
        AbbrevOp::Array => (AbbrevEncoding::Array, None),
        AbbrevOp::Char6 => (AbbrevEncoding::Char6, None),
        AbbrevOp::Blob => (AbbrevEncoding::Blob, None),
        AbbrevOp::TypeIndex => unreachable!("type index operand emitted unresolved"),
    };

    bits.write_bool(false);
    bits.write_fixed(ABBREV_ENCODING_WIDTH, encoding as u64);
    if let Some(width) = width {
        bits.write_vbr(ABBREV_DATA_VBR, u64::from(width));
    }
}
