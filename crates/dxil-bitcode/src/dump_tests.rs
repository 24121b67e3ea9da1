use indoc::indoc;

use crate::abbrev::{Abbrev, AbbrevOp};
use crate::block::KnownBlock;
use crate::colors::Colors;
use crate::dump::dump;
use crate::stream::{Block, Item, Record, Stream, parse};
use crate::writer::BitcodeWriter;

fn dump_bytes(bytes: &[u8]) -> String {
    dump(&parse(bytes).unwrap(), Colors::OFF)
}

#[test]
fn block_info_and_module() {
    let mut w = BitcodeWriter::new();
    w.emit_block_info(20).unwrap();
    w.block(KnownBlock::Module, |w| {
        w.emit_unabbrev(1, 2u32);
        w.block(KnownBlock::Function, |w| {
            w.emit_unabbrev_ops::<u64>(10, &[]);
            Ok(())
        })
    })
    .unwrap();

    insta::assert_snapshot!(dump_bytes(&w.finish().unwrap()), @r"
    BLOCKINFO <id 0, width 2, len 19>
      SETBID VALUE_SYMTAB_BLOCK
      abbrev #4 [fixed(3), vbr(8), array, fixed(8)]
      abbrev #5 [lit(1), vbr(8), array, fixed(7)]
      abbrev #6 [lit(1), vbr(8), array, char6]
      abbrev #7 [lit(2), vbr(8), array, char6]
      SETBID CONSTANTS_BLOCK
      abbrev #4 [lit(1), fixed(5)]
      abbrev #5 [lit(4), vbr(8)]
      abbrev #6 [lit(11), fixed(4), fixed(5), vbr(8)]
      abbrev #7 [lit(2)]
      SETBID FUNCTION_BLOCK
      abbrev #4 [lit(20), vbr(6), fixed(5), vbr(4), fixed(1)]
      abbrev #5 [lit(2), vbr(6), vbr(6), fixed(4)]
      abbrev #6 [lit(2), vbr(6), vbr(6), fixed(4), fixed(7)]
      abbrev #7 [lit(3), vbr(6), fixed(5), fixed(4)]
      abbrev #8 [lit(10)]
      abbrev #9 [lit(10), vbr(6)]
      abbrev #10 [lit(15)]
      abbrev #11 [lit(43), fixed(1), fixed(5), array, vbr(6)]
    MODULE_BLOCK <id 8, width 3, len 5>
      record 1 [2]
      FUNCTION_BLOCK <id 12, width 4, len 1>
        record 10 []
    ");
}

#[test]
fn local_abbrevs_follow_registered_ones() {
    let local = Abbrev::new("local", &[AbbrevOp::Literal(5), AbbrevOp::Vbr(6)]);

    let mut w = BitcodeWriter::new();
    w.emit_block_info(1).unwrap();
    w.block(KnownBlock::Function, |w| {
        w.emit_define_abbrev(&local, 1)?;
        Ok(())
    })
    .unwrap();
    w.block(KnownBlock::Module, |w| {
        w.emit_define_abbrev(&local, 1)?;
        Ok(())
    })
    .unwrap();

    let out = dump_bytes(&w.finish().unwrap());
    let lines: Vec<_> = out.lines().collect();
    insta::assert_snapshot!(lines[lines.len() - 4..].join("\n"), @r"
    FUNCTION_BLOCK <id 12, width 4, len 1>
      abbrev #12 [lit(5), vbr(6)]
    MODULE_BLOCK <id 8, width 3, len 1>
      abbrev #4 [lit(5), vbr(6)]
    ");
}

#[test]
fn unknown_blocks_and_codes() {
    let stream = Stream {
        blocks: vec![
            Block {
                id: 0,
                abbrev_width: 2,
                length_words: 3,
                items: vec![
                    Item::Record(Record {
                        code: 1,
                        operands: vec![13],
                    }),
                    Item::Record(Record {
                        code: 2,
                        operands: vec![104, 105],
                    }),
                    Item::Record(Record {
                        code: 9,
                        operands: vec![],
                    }),
                ],
            },
            Block {
                id: 13,
                abbrev_width: 5,
                length_words: 1,
                items: vec![],
            },
        ],
    };

    insta::assert_snapshot!(dump(&stream, Colors::OFF), @r"
    BLOCKINFO <id 0, width 2, len 3>
      SETBID BLOCK13
      BLOCKNAME [104, 105]
      record 9 []
    BLOCK13 <id 13, width 5, len 1>
    ");
}

#[test]
fn nested_indentation() {
    let mut w = BitcodeWriter::new();
    w.block(KnownBlock::Module, |w| {
        w.block(KnownBlock::Function, |w| {
            w.block(KnownBlock::ValueSymtab, |w| {
                w.emit_unabbrev_ops(1, &[0u8, 109, 97, 105, 110]);
                Ok(())
            })
        })
    })
    .unwrap();

    assert_eq!(
        dump_bytes(&w.finish().unwrap()),
        indoc! {"
            MODULE_BLOCK <id 8, width 3, len 9>
              FUNCTION_BLOCK <id 12, width 4, len 6>
                VALUE_SYMTAB_BLOCK <id 14, width 4, len 3>
                  record 1 [0, 109, 97, 105, 110]
        "}
    );
}

#[test]
fn empty_stream() {
    assert_eq!(dump(&Stream { blocks: vec![] }, Colors::OFF), "");
}

#[test]
fn colored_output() {
    let mut w = BitcodeWriter::new();
    w.block(KnownBlock::Module, |w| {
        w.emit_unabbrev(3, 7u32);
        Ok(())
    })
    .unwrap();
    let stream = parse(&w.finish().unwrap()).unwrap();

    assert_eq!(
        dump(&stream, Colors::ON),
        "\x1b[34mMODULE_BLOCK\x1b[0m \x1b[2m<id 8, width 3, len 1>\x1b[0m\n  \x1b[32mrecord 3\x1b[0m [7]\n"
    );
}

#[test]
fn colors_toggle() {
    assert!(Colors::new(true).is_enabled());
    assert!(!Colors::new(false).is_enabled());
    assert_eq!(Colors::default(), Colors::OFF);
}
