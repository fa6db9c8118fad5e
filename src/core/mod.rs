//! Scanning and annotation resolution.
//!
//! ## Module Structure
//!
//! - `types`: records shared by the scanner and the generator
//! - `manifest`: `go.mod` module identifier
//! - `imports`: import specs and the per-file import context
//! - `scanner`: declarations and their leading comments
//! - `annotation`: `@` annotations and reference qualification

pub mod annotation;
pub mod imports;
pub mod manifest;
pub mod scanner;
pub mod types;

use std::path::Path;

use crate::config::Config;
use crate::error::Result;
use annotation::resolve_annotations;
use imports::ImportContext;
use scanner::Scanner;
use types::SourceFile;

/// Resolve the annotations of every declaration in `file`.
pub fn resolve_file(file: &mut SourceFile) {
    let resolved: Vec<_> = {
        let ctx = ImportContext::for_file(file);
        file.declarations
            .iter()
            .map(|decl| resolve_annotations(&decl.comments, &ctx))
            .collect()
    };
    for (decl, annotations) in file.declarations.iter_mut().zip(resolved) {
        decl.annotations = annotations;
    }
}

/// Scan the tree under `root` and resolve all annotations.
pub fn analyze_tree(root: &Path, module: &str, config: &Config) -> Result<Vec<SourceFile>> {
    let mut files = Scanner::new(module, config).scan_tree(root)?;
    for file in &mut files {
        resolve_file(file);
    }
    Ok(files)
}
