//! Ownership marker for generated directories.
//!
//! Every output directory gets a marker file on creation. A directory that
//! carries it may be deleted and regenerated; one that does not is never
//! touched.

use std::{fs, path::Path};

use crate::error::{AnnError, Result};

pub const MARKER_FILE_NAME: &str = ".annotation";
pub const MARKER_CONTENT: &str = "This directory is auto generated by ann, do not edit/create/remove any file in this directory.";

pub fn is_tool_owned(dir: &Path) -> bool {
    dir.join(MARKER_FILE_NAME).is_file()
}

pub fn write_marker(dir: &Path) -> Result<()> {
    let path = dir.join(MARKER_FILE_NAME);
    fs::write(&path, MARKER_CONTENT).map_err(|source| AnnError::Write { path, source })
}
