//! Bit-level primitives of the LLVM bitstream container.
//!
//! [`BitWriter`] and [`BitReader`] mirror each other: fixed-width fields,
//! VBR integers (plus the signed variant), char6 characters, blobs, and
//! 32-bit alignment.

pub mod char6;
mod constants;
mod reader;
mod writer;

#[cfg(test)]
mod char6_tests;

pub use constants::{
    ABBREV_DATA_VBR, ABBREV_ENCODING_WIDTH, ABBREV_LITERAL_VBR, ABBREV_NUM_OPS_VBR,
    BLOB_LEN_VBR, BLOCK_ABBREV_WIDTH_VBR, BLOCK_ID_VBR, DEFINE_ABBREV, END_BLOCK,
    ENTER_SUBBLOCK, FIRST_APPLICATION_ABBREV, MAGIC, MAX_ABBREV_WIDTH, MAX_BLOCK_DEPTH,
    RECORD_VBR, TOP_LEVEL_ABBREV_WIDTH, UNABBREV_RECORD,
};
pub use reader::{BitReader, decode_signed_vbr};
pub use writer::{BitWriter, encode_signed_vbr};
