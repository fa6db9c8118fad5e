//! Registry rendering.
//!
//! Each registered declaration becomes one entry of a Go map literal keyed
//! by its fully-qualified path. Entries carry a runtime handle: the
//! function value for callables and `new(T)` for types. Every handle needs
//! its package imported, so rendering also collects import paths.

use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, warn};

use crate::core::types::{AnnotationItem, DeclKind, Declaration, RelationKind, SourceFile};

/// Import path of the runtime package that defines `core.Element`.
pub const DEFAULT_RUNTIME_IMPORT: &str = "github.com/cro4k/annotation/core";

const FILE_TEMPLATE: &str = r#"// Code generated by ann. DO NOT EDIT.
// version: {{version}}

package {{package}}

import (
{{imports}})

const (
	TypeFunc   = 1
	TypeStruct = 2
)

var elements = map[string]*core.Element{
{{elements}}}

// Elements returns every annotated declaration keyed by its full path.
func Elements() map[string]*core.Element {
	return elements
}
"#;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Entry {
    text: String,
    imports: BTreeSet<String>,
}

/// Rendered registry entries, keyed and ordered by fully-qualified path.
#[derive(Debug, Default)]
pub struct Registry {
    entries: BTreeMap<String, Entry>,
}

impl Registry {
    /// Collect exported, annotated declarations from all files.
    ///
    /// When two declarations share a path the later one (in scan order) wins.
    pub fn build(files: &[SourceFile]) -> Self {
        let mut entries = BTreeMap::new();
        for decl in files
            .iter()
            .flat_map(|file| &file.declarations)
            .filter(|decl| decl.is_registered())
        {
            debug!(
                path = %decl.path,
                annotations = decl.annotations.len(),
                "registering declaration"
            );
            if entries
                .insert(decl.path.clone(), render_declaration(decl))
                .is_some()
            {
                warn!(path = %decl.path, "duplicate declaration path, keeping the last one");
            }
        }
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Sorted, deduplicated import paths, always including `runtime_import`.
    pub fn imports(&self, runtime_import: &str) -> BTreeSet<String> {
        let mut imports: BTreeSet<String> = self
            .entries
            .values()
            .flat_map(|entry| entry.imports.iter().cloned())
            .collect();
        imports.insert(runtime_import.to_string());
        imports
    }

    /// Render the complete generated file.
    pub fn render(&self, package: &str, version: &str, runtime_import: &str) -> String {
        let imports: String = self
            .imports(runtime_import)
            .iter()
            .map(|import| format!("\t{}\n", go_string(import)))
            .collect();
        let elements: String = self
            .entries
            .iter()
            .map(|(path, entry)| format!("\t{}: {},\n", go_string(path), entry.text))
            .collect();

        // Elements last: their text may contain anything, including placeholders.
        FILE_TEMPLATE
            .replace("{{version}}", version)
            .replace("{{package}}", package)
            .replace("{{imports}}", &imports)
            .replace("{{elements}}", &elements)
    }
}

fn render_declaration(decl: &Declaration) -> Entry {
    let mut imports = BTreeSet::new();
    let handle = handle_expr(&decl.path, decl.kind == DeclKind::TypeDef, &mut imports);
    let items: String = decl
        .annotations
        .iter()
        .map(|item| render_item(item, &mut imports))
        .collect();

    let text = format!(
        "{{\n\t\tType: {},\n\t\tName: {},\n\t\tPtr: {},\n\t\tPath: {},\n\t\tComments: []string{{{}}},\n\t\tAnnotations: []*core.AnnotationItem{{\n{}\t\t}},\n\t}}",
        decl.kind.tag(),
        go_string(&decl.name),
        handle,
        go_string(&decl.path),
        string_list(&decl.comments),
        items,
    );

    Entry { text, imports }
}

fn render_item(item: &AnnotationItem, imports: &mut BTreeSet<String>) -> String {
    let relations: Vec<String> = item
        .relations
        .iter()
        .map(|relation| {
            handle_expr(
                &relation.path,
                relation.kind == RelationKind::TypeRef,
                imports,
            )
        })
        .collect();

    format!(
        "\t\t\t{{\n\t\t\t\tRaw: {},\n\t\t\t\tAnnotation: {},\n\t\t\t\tRelation: []interface{{}}{{{}}},\n\t\t\t}},\n",
        go_string(&item.raw),
        go_string(&item.rendered),
        relations.join(", ")
    )
}

/// Expression referring to the declaration at `path`, recording its import.
///
/// `github.com/acme/app/example.Hello` renders as `example.Hello`
/// (or `new(example.Hello)` for a type) and imports `github.com/acme/app/example`.
fn handle_expr(path: &str, is_type: bool, imports: &mut BTreeSet<String>) -> String {
    let (import, name) = split_handle(path);
    imports.insert(import.to_string());
    if is_type {
        format!("new({})", name)
    } else {
        name.to_string()
    }
}

/// Split a qualified path into its import path and package-local name.
fn split_handle(path: &str) -> (&str, &str) {
    let name = match path.rfind('/') {
        Some(idx) if idx > 0 => &path[idx + 1..],
        _ => path,
    };
    let import = match path.rfind('.') {
        Some(idx) if idx > 0 => &path[..idx],
        _ => path,
    };
    (import, name)
}

fn string_list(values: &[String]) -> String {
    values
        .iter()
        .map(|value| go_string(value))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Quote text as a Go interpreted string literal.
///
/// JSON string escapes (`\"`, `\\`, `\n`, `\t`, `\u00XX`, ...) are a subset
/// of Go's, so a JSON string is a valid Go literal with the same value.
pub fn go_string(value: &str) -> String {
    serde_json::Value::from(value).to_string()
}
