//! Human-readable listing of a decoded stream.
//!
//! One line per item, nested blocks indented by two spaces:
//!
//! ```text
//! BLOCKINFO <id 0, width 2, len 3>
//!   SETBID VALUE_SYMTAB_BLOCK
//!   abbrev #4 [fixed(3), vbr(8), array, fixed(8)]
//! MODULE_BLOCK <id 8, width 3, len 2>
//!   record 1 [2]
//! ```
//!
//! `len` is the declared body length in 32-bit words. Abbreviations are
//! numbered with the id a reader would assign them.

use std::collections::BTreeMap;
use std::fmt;

use crate::abbrev::AbbrevOp;
use crate::bitstream::FIRST_APPLICATION_ABBREV;
use crate::block::KnownBlock;
use crate::colors::Colors;
use crate::records::BlockInfoCode;
use crate::stream::{Block, Item, Record, Stream};

/// Render `stream` as text.
pub fn dump(stream: &Stream, colors: Colors) -> String {
    Dump { stream, colors }.to_string()
}

struct Dump<'a> {
    stream: &'a Stream,
    colors: Colors,
}

impl fmt::Display for Dump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Abbreviations registered for each block kind, so ids defined
        // locally continue after them.
        let registered: BTreeMap<u32, u64> = self
            .stream
            .block_info()
            .into_iter()
            .map(|(id, abbrevs)| (id, abbrevs.len() as u64))
            .collect();

        let ctx = DumpContext {
            colors: self.colors,
            registered,
        };
        for block in &self.stream.blocks {
            ctx.block(f, block, 0)?;
        }
        Ok(())
    }
}

struct DumpContext {
    colors: Colors,
    registered: BTreeMap<u32, u64>,
}

impl DumpContext {
    fn block(&self, f: &mut fmt::Formatter<'_>, block: &Block, depth: usize) -> fmt::Result {
        let c = self.colors;
        let indent = "  ".repeat(depth);
        let name = block_name(block.id);
        writeln!(
            f,
            "{indent}{}{name}{} {}<id {}, width {}, len {}>{}",
            c.block, c.reset, c.meta, block.id, block.abbrev_width, block.length_words, c.reset
        )?;

        let is_block_info = block.known() == Some(KnownBlock::BlockInfo);
        let mut next_abbrev =
            FIRST_APPLICATION_ABBREV + self.registered.get(&block.id).copied().unwrap_or(0);
        let indent = "  ".repeat(depth + 1);

        for item in &block.items {
            match item {
                Item::Block(sub) => self.block(f, sub, depth + 1)?,
                Item::Record(record) if is_block_info => {
                    if record.code == BlockInfoCode::SetBid as u64 {
                        next_abbrev = FIRST_APPLICATION_ABBREV;
                    }
                    self.block_info_record(f, &indent, record)?;
                }
                Item::Record(record) => {
                    writeln!(
                        f,
                        "{indent}{}record {}{} {}",
                        c.record,
                        record.code,
                        c.reset,
                        Operands(&record.operands)
                    )?;
                }
                Item::DefineAbbrev(ops) => {
                    writeln!(
                        f,
                        "{indent}{}abbrev #{next_abbrev}{} {}",
                        c.abbrev,
                        c.reset,
                        Ops(ops)
                    )?;
                    next_abbrev += 1;
                }
            }
        }
        Ok(())
    }

    fn block_info_record(
        &self,
        f: &mut fmt::Formatter<'_>,
        indent: &str,
        record: &Record,
    ) -> fmt::Result {
        let c = self.colors;
        let code = u32::try_from(record.code)
            .ok()
            .and_then(BlockInfoCode::from_u32);

        match (code, record.operands.as_slice()) {
            (Some(BlockInfoCode::SetBid), &[id]) => {
                let target = u32::try_from(id).map_or_else(|_| id.to_string(), block_name);
                writeln!(f, "{indent}{}SETBID{} {target}", c.record, c.reset)
            }
            (Some(code), operands) => writeln!(
                f,
                "{indent}{}{}{} {}",
                c.record,
                code.name(),
                c.reset,
                Operands(operands)
            ),
            (None, operands) => writeln!(
                f,
                "{indent}{}record {}{} {}",
                c.record,
                record.code,
                c.reset,
                Operands(operands)
            ),
        }
    }
}

fn block_name(id: u32) -> String {
    KnownBlock::from_id(id).map_or_else(|| format!("BLOCK{id}"), |b| b.name().to_string())
}

struct Operands<'a>(&'a [u64]);

impl fmt::Display for Operands<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, value) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{value}")?;
        }
        f.write_str("]")
    }
}

struct Ops<'a>(&'a [AbbrevOp]);

impl fmt::Display for Ops<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, op) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{op}")?;
        }
        f.write_str("]")
    }
}
