//! Annotation parsing and reference qualification.
//!
//! An annotation is a comment line starting with `@`. References inside it
//! are written `[Name]` for types and `<Name>` for callables, where `Name`
//! is a bare identifier or a dotted path. Resolution never fails: a prefix
//! that matches no import passes through unchanged.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::core::imports::ImportContext;
use crate::core::types::{AnnotationItem, Relation, RelationKind};

pub const ANNOTATION_PREFIX: char = '@';

// Group 1: type reference `[a.b]`, group 2: callable reference `<a.b>`.
static REFERENCE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[(\w+(?:\.\w+)*)\]|<(\w+(?:\.\w+)*)>").unwrap());

/// Qualify a reference against the file's imports.
///
/// - `Name` becomes `<current import path>.Name`.
/// - `alias.Name` becomes `<aliased import path>.Name` when `alias` is known.
/// - anything else is taken as already fully qualified.
pub fn qualify(reference: &str, ctx: &ImportContext<'_>) -> String {
    match reference.rsplit_once('.') {
        Some((prefix, name)) => match ctx.lookup(prefix) {
            Some(path) => format!("{}.{}", path, name),
            None => reference.to_string(),
        },
        None => format!("{}.{}", ctx.import_path, reference),
    }
}

/// Parse one comment line. Returns `None` unless it is an annotation.
pub fn parse_annotation(line: &str, ctx: &ImportContext<'_>) -> Option<AnnotationItem> {
    let raw = line.strip_prefix(ANNOTATION_PREFIX)?;

    let mut relations = Vec::new();
    let rendered = REFERENCE_REGEX.replace_all(raw, |caps: &Captures<'_>| {
        let (inner, kind, open, close) = match (caps.get(1), caps.get(2)) {
            (Some(inner), _) => (inner.as_str(), RelationKind::TypeRef, '[', ']'),
            (None, Some(inner)) => (inner.as_str(), RelationKind::CallableRef, '<', '>'),
            (None, None) => return caps[0].to_string(),
        };
        let path = qualify(inner, ctx);
        let replacement = format!("{}{}{}", open, path, close);
        relations.push(Relation { path, kind });
        replacement
    });

    Some(AnnotationItem {
        raw: raw.to_string(),
        rendered: rendered.into_owned(),
        relations,
    })
}

/// Collect the annotation items of a declaration's comment lines, in order.
pub fn resolve_annotations(comments: &[String], ctx: &ImportContext<'_>) -> Vec<AnnotationItem> {
    comments
        .iter()
        .filter_map(|line| parse_annotation(line, ctx))
        .collect()
}
