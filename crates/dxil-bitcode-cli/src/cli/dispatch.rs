//! Dispatch logic: extract params from ArgMatches and convert to command args.

use std::path::PathBuf;

use clap::ArgMatches;

use super::ColorChoice;
use crate::commands::blockinfo::BlockInfoArgs;
use crate::commands::dump::DumpArgs;

pub struct DumpParams {
    pub input: PathBuf,
    pub color: ColorChoice,
}

impl DumpParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            input: m.get_one::<PathBuf>("input").cloned().unwrap_or_default(),
            color: parse_color(m),
        }
    }
}

impl From<DumpParams> for DumpArgs {
    fn from(p: DumpParams) -> Self {
        Self {
            input: p.input,
            color: p.color.should_colorize(),
        }
    }
}

pub struct BlockInfoParams {
    pub num_types: u32,
    pub output: Option<PathBuf>,
    pub color: ColorChoice,
}

impl BlockInfoParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            num_types: m.get_one::<u32>("num_types").copied().unwrap_or_default(),
            output: m.get_one::<PathBuf>("output").cloned(),
            color: parse_color(m),
        }
    }
}

impl From<BlockInfoParams> for BlockInfoArgs {
    fn from(p: BlockInfoParams) -> Self {
        Self {
            num_types: p.num_types,
            output: p.output,
            color: p.color.should_colorize(),
        }
    }
}

fn parse_color(m: &ArgMatches) -> ColorChoice {
    match m.get_one::<String>("color").map(String::as_str) {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}
