//! Bitstream container constants.

/// Magic bytes opening every bitcode stream: `'B' 'C' 0xC0DE`.
pub const MAGIC: [u8; 4] = [0x42, 0x43, 0xC0, 0xDE];

/// Abbreviation id width in effect outside of any block.
pub const TOP_LEVEL_ABBREV_WIDTH: u32 = 2;

/// Closes the innermost open block.
pub const END_BLOCK: u64 = 0;
/// Opens a nested block.
pub const ENTER_SUBBLOCK: u64 = 1;
/// Defines an abbreviation for the current block (or the BLOCKINFO target).
pub const DEFINE_ABBREV: u64 = 2;
/// Self-describing record: code, operand count, operands.
pub const UNABBREV_RECORD: u64 = 3;
/// First id handed out to a defined abbreviation.
pub const FIRST_APPLICATION_ABBREV: u64 = 4;

/// VBR chunk width of the block id in `ENTER_SUBBLOCK`.
pub const BLOCK_ID_VBR: u32 = 8;
/// VBR chunk width of the new abbreviation id width in `ENTER_SUBBLOCK`.
pub const BLOCK_ABBREV_WIDTH_VBR: u32 = 4;

/// VBR chunk width of record codes, operand counts and operands.
pub const RECORD_VBR: u32 = 6;

/// VBR chunk width of the operand count in `DEFINE_ABBREV`.
pub const ABBREV_NUM_OPS_VBR: u32 = 5;
/// VBR chunk width of literal operand values in `DEFINE_ABBREV`.
pub const ABBREV_LITERAL_VBR: u32 = 8;
/// Fixed width of the encoding tag of a non-literal operand.
pub const ABBREV_ENCODING_WIDTH: u32 = 3;
/// VBR chunk width of the Fixed/VBR operand width in `DEFINE_ABBREV`.
pub const ABBREV_DATA_VBR: u32 = 5;

/// VBR chunk width of a blob's byte count.
pub const BLOB_LEN_VBR: u32 = 6;

/// Widest abbreviation id a block may negotiate.
pub const MAX_ABBREV_WIDTH: u32 = 32;

/// Deepest block nesting the decoder accepts.
pub const MAX_BLOCK_DEPTH: usize = 256;
