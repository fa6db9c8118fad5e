//! Records produced by the scanner and consumed by the registry generator.

use std::collections::BTreeSet;

use serde::Serialize;

/// Kind of a top-level declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DeclKind {
    /// `func` declaration, including methods.
    Callable,
    /// `type` declaration.
    TypeDef,
}

impl DeclKind {
    /// Numeric tag used by the generated registry (`TypeFunc` / `TypeStruct`).
    pub fn tag(self) -> u8 {
        match self {
            DeclKind::Callable => 1,
            DeclKind::TypeDef => 2,
        }
    }
}

/// Kind of a reference embedded in an annotation, decided by its delimiter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RelationKind {
    /// `[Name]`
    TypeRef,
    /// `<Name>`
    CallableRef,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Relation {
    pub path: String,
    pub kind: RelationKind,
}

/// One `@`-prefixed comment line with its references qualified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnnotationItem {
    /// Comment line with the leading `@` stripped.
    pub raw: String,
    /// `raw` with every reference replaced by its fully-qualified form.
    pub rendered: String,
    pub relations: Vec<Relation>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Declaration {
    pub kind: DeclKind,
    pub name: String,
    /// `<import path>.<name>`
    pub path: String,
    pub exported: bool,
    pub comments: Vec<String>,
    pub annotations: Vec<AnnotationItem>,
}

impl Declaration {
    pub fn new(kind: DeclKind, name: String, import_path: &str, comments: Vec<String>) -> Self {
        Self {
            kind,
            path: format!("{}.{}", import_path, name),
            exported: is_exported(&name),
            name,
            comments,
            annotations: Vec::new(),
        }
    }

    /// Whether the declaration belongs in the generated registry.
    pub fn is_registered(&self) -> bool {
        self.exported && !self.annotations.is_empty()
    }
}

/// Syntactic export rule: the first character is an uppercase ASCII letter.
pub fn is_exported(name: &str) -> bool {
    name.chars().next().is_some_and(|c| c.is_ascii_uppercase())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportRef {
    pub path: String,
    /// Declared alias plus any configured extra aliases.
    pub aliases: BTreeSet<String>,
    /// Alias written in the source, if any.
    pub declared_alias: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct SourceFile {
    /// Path relative to the scan root, `/`-separated.
    pub file_path: String,
    pub package_name: String,
    /// `<module>/<directory>`
    pub import_path: String,
    pub imports: Vec<ImportRef>,
    pub package_comments: Vec<String>,
    pub declarations: Vec<Declaration>,
}
