use std::io;
use std::path::PathBuf;

use dxil_bitcode::{DecodeError, EncodeError};

pub mod blockinfo;
pub mod dump;


/// Failure of a CLI command, printed as `error: ...` by `main`.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("cannot read {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("cannot write {}: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },
    #[error("{}: {source}", .path.display())]
    Decode { path: PathBuf, source: DecodeError },
    #[error(transparent)]
    Encode(#[from] EncodeError),
    #[error(transparent)]
    Stdout(#[from] io::Error),
}
