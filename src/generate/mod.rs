//! Registry generation and cleanup.
//!
//! `generate` scans the tree, renders the registry and replaces the output
//! directory. The output directory is only ever removed when it carries the
//! ownership marker; otherwise generation stops with a conflict before
//! anything is written.

pub mod marker;
pub mod render;

use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::info;
use walkdir::WalkDir;

use crate::config::Config;
use crate::core::{analyze_tree, manifest::load_manifest};
use crate::error::{AnnError, Result};
use marker::{is_tool_owned, write_marker};
use render::{DEFAULT_RUNTIME_IMPORT, Registry};

pub const DEFAULT_OUTPUT_DIR: &str = "annotation";
pub const GENERATED_FILE_NAME: &str = "annotation.go";

#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Module root: holds `go.mod` and is the top of the scanned tree.
    pub root: PathBuf,
    /// Output directory, relative to `root` unless absolute.
    pub output: PathBuf,
    pub runtime_import: String,
    /// Written into the generated header.
    pub version: String,
}

impl GenerateOptions {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            output: PathBuf::from(DEFAULT_OUTPUT_DIR),
            runtime_import: DEFAULT_RUNTIME_IMPORT.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    fn output_dir(&self) -> PathBuf {
        self.root.join(&self.output)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateSummary {
    pub output_file: PathBuf,
    pub files_scanned: usize,
    pub entries: usize,
}

/// Generate `<output>/annotation.go` for the module at `options.root`.
pub fn generate(options: &GenerateOptions, config: &Config) -> Result<GenerateSummary> {
    let output_dir = options.output_dir();
    if output_dir.exists() && !is_tool_owned(&output_dir) {
        return Err(AnnError::OutputConflict(output_dir));
    }

    let manifest = load_manifest(&options.root)?;
    let files = analyze_tree(&options.root, &manifest.module, config)?;
    let registry = Registry::build(&files);
    let content = registry.render(
        &package_name(&output_dir),
        &options.version,
        &options.runtime_import,
    );

    prepare_output_dir(&output_dir)?;
    let output_file = output_dir.join(GENERATED_FILE_NAME);
    fs::write(&output_file, content).map_err(|source| AnnError::Write {
        path: output_file.clone(),
        source,
    })?;

    info!(
        path = %output_file.display(),
        entries = registry.len(),
        "registry written"
    );
    Ok(GenerateSummary {
        output_file,
        files_scanned: files.len(),
        entries: registry.len(),
    })
}

/// Remove a previous tool-owned output, then create the directory and claim it.
fn prepare_output_dir(dir: &Path) -> Result<()> {
    if dir.exists() {
        fs::remove_dir_all(dir).map_err(|source| AnnError::Remove {
            path: dir.to_path_buf(),
            source,
        })?;
    }
    fs::create_dir_all(dir).map_err(|source| AnnError::Write {
        path: dir.to_path_buf(),
        source,
    })?;
    write_marker(dir)
}

/// Go package name of the output directory: its last path component.
fn package_name(dir: &Path) -> String {
    dir.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| DEFAULT_OUTPUT_DIR.to_string())
}

/// Remove every tool-owned directory under `root`. Returns the removed paths.
pub fn clean(root: &Path) -> Result<Vec<PathBuf>> {
    let mut owned = Vec::new();
    let mut walker = WalkDir::new(root).sort_by_file_name().into_iter();
    while let Some(entry) = walker.next() {
        let entry = entry.map_err(|source| AnnError::Walk {
            path: source.path().unwrap_or(root).to_path_buf(),
            source,
        })?;
        if entry.file_type().is_dir() && entry.depth() > 0 && is_tool_owned(entry.path()) {
            owned.push(entry.path().to_path_buf());
            walker.skip_current_dir();
        }
    }

    for dir in &owned {
        fs::remove_dir_all(dir).map_err(|source| AnnError::Remove {
            path: dir.clone(),
            source,
        })?;
        info!(path = %dir.display(), "removed generated directory");
    }
    Ok(owned)
}
