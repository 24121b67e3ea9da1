use std::io::Write;
use std::path::PathBuf;

use dxil_bitcode::{Colors, dump, parse};
use log::info;

use super::CommandError;

pub struct DumpArgs {
    pub input: PathBuf,
    pub color: bool,
}

pub fn run(args: DumpArgs) -> Result<(), CommandError> {
    execute(&args, &mut std::io::stdout().lock())
}

pub fn execute(args: &DumpArgs, out: &mut impl Write) -> Result<(), CommandError> {
    let bytes = std::fs::read(&args.input).map_err(|source| CommandError::Read {
        path: args.input.clone(),
        source,
    })?;
    info!("read {} bytes from {}", bytes.len(), args.input.display());

    let stream = parse(&bytes).map_err(|source| CommandError::Decode {
        path: args.input.clone(),
        source,
    })?;
    out.write_all(dump(&stream, Colors::new(args.color)).as_bytes())?;
    Ok(())
}
