use std::io::Write;
use std::path::PathBuf;

use dxil_bitcode::{BitcodeWriter, Colors, dump, parse};
use log::info;

use super::CommandError;

pub struct BlockInfoArgs {
    pub num_types: u32,
    pub output: Option<PathBuf>,
    pub color: bool,
}

pub fn run(args: BlockInfoArgs) -> Result<(), CommandError> {
    execute(&args, &mut std::io::stdout().lock())
}

/// Build magic + BLOCKINFO; write it to the output file, or dump it to `out`.
pub fn execute(args: &BlockInfoArgs, out: &mut impl Write) -> Result<(), CommandError> {
    let mut writer = BitcodeWriter::new();
    writer.emit_block_info(args.num_types)?;
    let bytes = writer.finish()?;

    if let Some(path) = &args.output {
        std::fs::write(path, &bytes).map_err(|source| CommandError::Write {
            path: path.clone(),
            source,
        })?;
        info!("wrote {} bytes to {}", bytes.len(), path.display());
        return Ok(());
    }

    let stream = parse(&bytes).map_err(|source| CommandError::Decode {
        path: PathBuf::from("<blockinfo>"),
        source,
    })?;
    out.write_all(dump(&stream, Colors::new(args.color)).as_bytes())?;
    Ok(())
}
