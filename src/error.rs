use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnnError {
    #[error("failed to read '{}'", .path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("failed to walk '{}'", .path.display())]
    Walk {
        path: PathBuf,
        source: walkdir::Error,
    },

    #[error("failed to write '{}'", .path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("failed to remove '{}'", .path.display())]
    Remove { path: PathBuf, source: io::Error },

    #[error("path '{}' has been used by another package", .0.display())]
    OutputConflict(PathBuf),

    #[error("no module declaration found in '{}'", .0.display())]
    MissingModule(PathBuf),
}

pub type Result<T> = std::result::Result<T, AnnError>;
