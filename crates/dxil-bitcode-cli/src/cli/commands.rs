//! Command builders for the CLI.

use clap::Command;

use super::args::*;

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("dxil-bc")
        .about("Inspect and generate DXIL bitcode streams")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(verbose_arg())
        .subcommand(dump_command())
        .subcommand(blockinfo_command())
}

/// Decode a bitcode file and print its block structure.
pub fn dump_command() -> Command {
    Command::new("dump")
        .about("Print the block structure of a bitcode file")
        .after_help(
            r#"EXAMPLES:
  dxil-bc dump shader.bc
  dxil-bc dump shader.bc --color never
  dxil-bc -vvv dump shader.bc     # trace block boundaries"#,
        )
        .arg(input_arg())
        .arg(color_arg())
}

/// Emit a stream holding only the BLOCKINFO block.
pub fn blockinfo_command() -> Command {
    Command::new("blockinfo")
        .about("Emit the BLOCKINFO abbreviation block")
        .after_help(
            r#"EXAMPLES:
  dxil-bc blockinfo --num-types 20            # dump to stdout
  dxil-bc blockinfo --num-types 20 -o bi.bc   # write the stream"#,
        )
        .arg(num_types_arg())
        .arg(output_arg())
        .arg(color_arg())
}
