//! LLVM bitstream encoder for DXIL bitcode.
//!
//! Writes the container layer of a DXIL module: the `BC 0xC0DE` magic,
//! nested blocks with patched length words, unabbreviated records, and the
//! BLOCKINFO block declaring the abbreviations later blocks may use.
//! A structural decoder and a text dump are included for inspection.
//!
//! # Example
//!
//! ```
//! use dxil_bitcode::{BitcodeWriter, KnownBlock};
//!
//! let mut writer = BitcodeWriter::new();
//! writer.emit_block_info(20)?;
//! writer.block(KnownBlock::Module, |w| {
//!     w.emit_unabbrev(1, 2u32);
//!     Ok(())
//! })?;
//! let bytes = writer.finish()?;
//!
//! let stream = dxil_bitcode::parse(&bytes).expect("well-formed stream");
//! assert_eq!(stream.blocks.len(), 2);
//! # Ok::<(), dxil_bitcode::EncodeError>(())
//! ```

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod abbrev;
pub mod bitstream;
pub mod block;
pub mod colors;
pub mod dump;
pub mod error;
pub mod records;
pub mod stream;
pub mod writer;

#[cfg(test)]
mod dump_tests;
#[cfg(test)]
mod stream_tests;

pub use abbrev::{Abbrev, AbbrevEncoding, AbbrevOp};
pub use bitstream::{BitReader, BitWriter, MAGIC};
pub use block::KnownBlock;
pub use colors::Colors;
pub use dump::dump;
pub use error::{DecodeError, EncodeError};
pub use stream::{Block, Item, Record, Stream, parse};
pub use writer::{BitcodeWriter, BlockScope};
