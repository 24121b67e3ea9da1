//! Shared argument builders for CLI commands.

use std::path::PathBuf;

use clap::{Arg, ArgAction, value_parser};

/// Bitcode file to read (positional).
pub fn input_arg() -> Arg {
    Arg::new("input")
        .value_name("FILE")
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help("Bitcode file")
}

/// Destination file (-o/--output).
pub fn output_arg() -> Arg {
    Arg::new("output")
        .short('o')
        .long("output")
        .value_name("FILE")
        .value_parser(value_parser!(PathBuf))
        .help("Write the stream to FILE instead of dumping it")
}

/// Type table size (--num-types).
pub fn num_types_arg() -> Arg {
    Arg::new("num_types")
        .long("num-types")
        .value_name("N")
        .required(true)
        .value_parser(value_parser!(u32))
        .help("Number of module types; sizes type-index operands")
}

/// Color output control (--color).
pub fn color_arg() -> Arg {
    Arg::new("color")
        .long("color")
        .value_name("WHEN")
        .default_value("auto")
        .value_parser(["auto", "always", "never"])
        .help("Colorize output")
}

/// Log verbosity (-v, -vv, -vvv).
pub fn verbose_arg() -> Arg {
    Arg::new("verbose")
        .short('v')
        .long("verbose")
        .action(ArgAction::Count)
        .global(true)
        .help("Log more (info, debug, trace)")
}
