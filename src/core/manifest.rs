//! Module manifest (`go.mod`) loading.

use std::{fs, path::Path};

use crate::error::{AnnError, Result};

pub const MANIFEST_FILE_NAME: &str = "go.mod";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    /// Module identifier, the prefix of every import path in the tree.
    pub module: String,
    pub go_version: Option<String>,
}

impl Manifest {
    pub fn parse(content: &str) -> Option<Self> {
        let mut module = None;
        let mut go_version = None;
        for line in content.lines().map(str::trim) {
            if let Some(rest) = keyword_value(line, "module") {
                module = Some(rest.trim_matches('"').to_string());
            } else if let Some(rest) = keyword_value(line, "go") {
                go_version = Some(rest.to_string());
            }
        }
        module.map(|module| Self { module, go_version })
    }
}

fn keyword_value<'a>(line: &'a str, keyword: &str) -> Option<&'a str> {
    let rest = line.strip_prefix(keyword)?;
    rest.starts_with(char::is_whitespace)
        .then(|| rest.trim())
        .filter(|value| !value.is_empty())
}

/// Read the manifest at `<root>/go.mod`.
pub fn load_manifest(root: &Path) -> Result<Manifest> {
    let path = root.join(MANIFEST_FILE_NAME);
    let content = fs::read_to_string(&path).map_err(|source| AnnError::Read {
        path: path.clone(),
        source,
    })?;
    Manifest::parse(&content).ok_or(AnnError::MissingModule(path))
}
