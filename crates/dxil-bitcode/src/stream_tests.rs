use crate::abbrev::{Abbrev, AbbrevOp};
use crate::bitstream::{
    BitWriter, DEFINE_ABBREV, ENTER_SUBBLOCK, MAGIC, MAX_BLOCK_DEPTH, UNABBREV_RECORD,
};
use crate::block::KnownBlock;
use crate::stream::{Block, Item, Record, parse};
use crate::writer::BitcodeWriter;
use crate::DecodeError;

fn empty_module() -> Vec<u8> {
    let mut w = BitcodeWriter::new();
    w.block(KnownBlock::Module, |_| Ok(())).unwrap();
    w.finish().unwrap()
}

/// A stream holding whatever `body` writes after the magic, padded to a word.
fn raw(body: impl FnOnce(&mut BitWriter)) -> Vec<u8> {
    let mut bits = BitWriter::with_buffer(MAGIC.to_vec());
    body(&mut bits);
    bits.align32();
    bits.into_bytes()
}

#[test]
fn magic_is_checked() {
    assert_eq!(parse(b""), Err(DecodeError::InvalidMagic));
    assert_eq!(parse(b"BC"), Err(DecodeError::InvalidMagic));
    assert_eq!(parse(&[0xDE, 0xC0, 0x43, 0x42]), Err(DecodeError::InvalidMagic));
}

#[test]
fn magic_only_is_empty() {
    let stream = parse(&MAGIC).unwrap();
    assert!(stream.blocks.is_empty());
}

#[test]
fn nested_structure() {
    let mut w = BitcodeWriter::new();
    w.block(KnownBlock::Module, |w| {
        w.emit_unabbrev_ops(1, &[2u64, 300]);
        w.block(KnownBlock::Function, |w| {
            w.emit_unabbrev_ops::<u64>(15, &[]);
            Ok(())
        })?;
        w.emit_unabbrev(7, u64::MAX);
        Ok(())
    })
    .unwrap();
    let stream = parse(&w.finish().unwrap()).unwrap();

    let function = Block {
        id: 12,
        abbrev_width: 4,
        length_words: 1,
        items: vec![Item::Record(Record {
            code: 15,
            operands: vec![],
        })],
    };
    let module = &stream.blocks[0];
    assert_eq!(module.known(), Some(KnownBlock::Module));
    assert_eq!(module.abbrev_width, 3);
    assert_eq!(
        module.items,
        [
            Item::Record(Record {
                code: 1,
                operands: vec![2, 300],
            }),
            Item::Block(function),
            Item::Record(Record {
                code: 7,
                operands: vec![u64::MAX],
            }),
        ]
    );
    assert_eq!(module.records().count(), 2);
    assert_eq!(module.sub_blocks().count(), 1);
}

#[test]
fn abbrev_definitions_decode() {
    use AbbrevOp::*;

    let name = Abbrev::new("name", &[Literal(1), Vbr(8), Array, Char6]);
    let blob = Abbrev::new("blob", &[Literal(70), Fixed(32), Blob]);

    let mut w = BitcodeWriter::new();
    w.block(KnownBlock::Metadata, |w| {
        w.emit_define_abbrev(&name, 1)?;
        w.emit_define_abbrev(&blob, 1)?;
        Ok(())
    })
    .unwrap();
    let stream = parse(&w.finish().unwrap()).unwrap();

    assert_eq!(
        stream.blocks[0].items,
        [
            Item::DefineAbbrev(name.ops.to_vec()),
            Item::DefineAbbrev(blob.ops.to_vec()),
        ]
    );
}

#[test]
fn unknown_block_ids_are_kept() {
    let bytes = raw(|bits| {
        bits.write_fixed(2, ENTER_SUBBLOCK);
        bits.write_vbr(8, 13);
        bits.write_vbr(4, 5);
        bits.align32();
        bits.write_fixed(32, 1);
        bits.write_fixed(5, 0);
    });
    let stream = parse(&bytes).unwrap();

    assert_eq!(stream.blocks[0].id, 13);
    assert_eq!(stream.blocks[0].known(), None);
    assert_eq!(stream.blocks[0].abbrev_width, 5);
}

#[test]
fn truncated_block() {
    let bytes = empty_module();
    assert_eq!(
        parse(&bytes[..bytes.len() - 4]),
        Err(DecodeError::UnterminatedBlock(8))
    );
}

#[test]
fn length_mismatch() {
    let mut bytes = empty_module();
    bytes[8] = 2;

    assert_eq!(
        parse(&bytes),
        Err(DecodeError::LengthMismatch {
            block: 8,
            declared: 2,
            actual: 1,
        })
    );
}

#[test]
fn top_level_record_is_rejected() {
    let bytes = raw(|bits| bits.write_fixed(2, UNABBREV_RECORD));
    assert_eq!(parse(&bytes), Err(DecodeError::UnexpectedTopLevelItem(3)));
}

#[test]
fn abbreviated_record_is_rejected() {
    let mut w = BitcodeWriter::new();
    w.block(KnownBlock::Module, |w| {
        w.bits_mut().write_fixed(3, 4);
        Ok(())
    })
    .unwrap();

    assert_eq!(
        parse(&w.finish().unwrap()),
        Err(DecodeError::AbbreviatedRecord(4))
    );
}

#[test]
fn invalid_encoding_tag() {
    let mut w = BitcodeWriter::new();
    w.block(KnownBlock::Module, |w| {
        let bits = w.bits_mut();
        bits.write_fixed(3, DEFINE_ABBREV);
        bits.write_vbr(5, 1);
        bits.write_bool(false);
        bits.write_fixed(3, 0);
        Ok(())
    })
    .unwrap();

    assert_eq!(
        parse(&w.finish().unwrap()),
        Err(DecodeError::InvalidAbbrevEncoding(0))
    );
}

#[test]
fn invalid_block_width() {
    for width in [0, 33] {
        let bytes = raw(|bits| {
            bits.write_fixed(2, ENTER_SUBBLOCK);
            bits.write_vbr(8, 8);
            bits.write_vbr(4, width);
        });
        assert_eq!(parse(&bytes), Err(DecodeError::InvalidAbbrevWidth(width)));
    }
}

/// `depth` module blocks, each nested in the previous one.
fn nested_modules(depth: usize) -> Vec<u8> {
    let mut w = BitcodeWriter::new();
    let scopes: Vec<_> = (0..depth)
        .map(|_| w.begin_block(KnownBlock::Module).unwrap())
        .collect();
    for scope in scopes.into_iter().rev() {
        w.end_block(scope).unwrap();
    }
    w.finish().unwrap()
}

#[test]
fn nesting_up_to_the_limit() {
    let stream = parse(&nested_modules(MAX_BLOCK_DEPTH)).unwrap();

    let mut depth = 0;
    let mut block = stream.blocks.first();
    while let Some(b) = block {
        depth += 1;
        block = b.sub_blocks().next();
    }
    assert_eq!(depth, MAX_BLOCK_DEPTH);
}

#[test]
fn nesting_past_the_limit() {
    assert_eq!(
        parse(&nested_modules(MAX_BLOCK_DEPTH + 1)),
        Err(DecodeError::NestingTooDeep(MAX_BLOCK_DEPTH))
    );
}

#[test]
fn hostile_nesting_is_an_error() {
    // ENTER_SUBBLOCK id 0 width 2, over and over, never closed.
    let mut bytes = MAGIC.to_vec();
    for _ in 0..200_000 {
        bytes.extend_from_slice(&[0x01, 0x08, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00]);
    }

    assert_eq!(parse(&bytes), Err(DecodeError::NestingTooDeep(MAX_BLOCK_DEPTH)));
}

#[test]
fn block_info_ignores_untargeted_abbrevs() {
    let stray = Abbrev::new("stray", &[AbbrevOp::Literal(1)]);
    let mut w = BitcodeWriter::new();
    w.block(KnownBlock::BlockInfo, |w| {
        w.emit_define_abbrev(&stray, 1)?;
        w.emit_unabbrev(1, 12u32);
        w.emit_define_abbrev(&stray, 1)?;
        Ok(())
    })
    .unwrap();
    let info = parse(&w.finish().unwrap()).unwrap().block_info();

    assert_eq!(info.len(), 1);
    assert_eq!(info[&12], [vec![AbbrevOp::Literal(1)]]);
}
