//! Import specs and the per-file import context.

use std::collections::{BTreeSet, HashMap};

use crate::config::Config;
use crate::core::types::{ImportRef, SourceFile};

/// Aliases that bring no short name into scope.
const BLANK_ALIASES: &[&str] = &[".", "_"];

/// Parse one import spec (the part after the `import` keyword, or one line
/// of a grouped import block): `"path"` or `alias "path"`.
///
/// Configured extra aliases for the path are merged into the alias set.
/// Returns `None` for an empty spec.
pub fn parse_import_spec(spec: &str, config: &Config) -> Option<ImportRef> {
    let tokens: Vec<&str> = spec.split_whitespace().collect();
    let (alias, path) = match tokens.as_slice() {
        [] => return None,
        [path] => (None, *path),
        [alias, path] => (Some(*alias), *path),
        // Unexpected shape, keep the last token as the path.
        [first, .., last] => (Some(*first), *last),
    };

    let path = unquote(path);
    if path.is_empty() {
        return None;
    }

    let mut aliases = BTreeSet::new();
    if let Some(alias) = alias {
        aliases.insert(alias.to_string());
    }
    aliases.extend(config.aliases_for(&path).iter().cloned());

    Some(ImportRef {
        path,
        aliases,
        declared_alias: alias.map(str::to_string),
    })
}

/// Parse the text following `import` on a single line. Handles the plain
/// form and a group closed on the same line: `import ( "a"; b "b" )`.
pub fn parse_inline_imports(rest: &str, config: &Config) -> Vec<ImportRef> {
    let rest = rest.trim();
    let inner = rest
        .strip_prefix('(')
        .map(|inner| inner.trim_end().trim_end_matches(')'))
        .unwrap_or(rest);
    inner
        .split(';')
        .filter_map(|spec| parse_import_spec(spec, config))
        .collect()
}

fn unquote(token: &str) -> String {
    token.trim_matches(|c| c == '"' || c == '`').to_string()
}

/// Last `/`-separated segment of an import path.
pub fn basename(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Short-name view of a file's imports, used to qualify annotation references.
#[derive(Debug, Clone)]
pub struct ImportContext<'a> {
    pub package: &'a str,
    pub import_path: &'a str,
    names: HashMap<String, String>,
}

impl<'a> ImportContext<'a> {
    pub fn for_file(file: &'a SourceFile) -> Self {
        let mut names = HashMap::new();
        for import in &file.imports {
            let short = import
                .declared_alias
                .as_deref()
                .unwrap_or_else(|| basename(&import.path));
            for name in std::iter::once(short).chain(import.aliases.iter().map(String::as_str)) {
                if !BLANK_ALIASES.contains(&name) {
                    names.insert(name.to_string(), import.path.clone());
                }
            }
        }

        Self {
            package: &file.package_name,
            import_path: &file.import_path,
            names,
        }
    }

    /// Full import path for a short name, if the file imports it.
    pub fn lookup(&self, short: &str) -> Option<&str> {
        self.names.get(short).map(String::as_str)
    }
}
