//! Declaration scanner.
//!
//! Reads a source file line by line and extracts the package clause, the
//! imports, and every top-level `func` / `type` declaration together with
//! the comment lines directly above it. Declaration bodies are skipped by
//! counting braces and parentheses reported by the [`Lexer`], so delimiters
//! inside strings, raw literals and comments never count.
//!
//! # Comment attachment
//!
//! A run of full-line comments is attached to the next declaration (or
//! package clause) only when it sits directly above it. A blank line or a
//! line carrying code breaks the run:
//!
//! ```go
//! // Hello greets.          <- pending: ["Hello greets."]
//! // @req [Example]         <- pending: ["Hello greets.", "@req [Example]"]
//! func Hello() {}           <- attached, pending cleared
//!
//! // orphaned               <- pending: ["orphaned"]
//!                           <- blank, pending cleared
//! func Bye() {}             <- attached: []
//! ```

use std::{fs, path::Path};

use tracing::debug;
use walkdir::WalkDir;

use crate::config::Config;
use crate::core::imports::{parse_import_spec, parse_inline_imports};
use crate::core::types::{DeclKind, Declaration, ImportRef, SourceFile};
use crate::error::{AnnError, Result};
use crate::generate::marker::is_tool_owned;
use crate::lexer::{LexState, LexedLine, Lexer};

const PACKAGE_KEYWORD: &str = "package";
const IMPORT_KEYWORD: &str = "import";
const FUNC_KEYWORD: &str = "func";
const TYPE_KEYWORD: &str = "type";

/// Pending comment run waiting for a declaration.
#[derive(Debug, Default)]
enum CommentRun {
    #[default]
    Empty,
    Pending(Vec<String>),
}

impl CommentRun {
    fn comment(&mut self, lines: Vec<String>) {
        match self {
            CommentRun::Empty => *self = CommentRun::Pending(lines),
            CommentRun::Pending(pending) => pending.extend(lines),
        }
    }

    fn code(&mut self) {
        *self = CommentRun::Empty;
    }

    /// Hand the run to a declaration and start over.
    fn attach(&mut self) -> Vec<String> {
        match std::mem::take(self) {
            CommentRun::Empty => Vec::new(),
            CommentRun::Pending(lines) => lines,
        }
    }
}

/// Scans files of one module.
pub struct Scanner<'a> {
    module: &'a str,
    config: &'a Config,
}

impl<'a> Scanner<'a> {
    pub fn new(module: &'a str, config: &'a Config) -> Self {
        Self { module, config }
    }

    /// Scan every regular file under `root`, in file-name order.
    ///
    /// Directories owned by the generator are skipped. Any read failure
    /// aborts the walk.
    pub fn scan_tree(&self, root: &Path) -> Result<Vec<SourceFile>> {
        let mut files = Vec::new();
        let mut walker = WalkDir::new(root)
            .min_depth(1)
            .sort_by_file_name()
            .into_iter();

        while let Some(entry) = walker.next() {
            let entry = entry.map_err(|source| AnnError::Walk {
                path: source.path().unwrap_or(root).to_path_buf(),
                source,
            })?;
            let file_type = entry.file_type();
            if file_type.is_dir() {
                if is_tool_owned(entry.path()) {
                    debug!(path = %entry.path().display(), "skipping generated directory");
                    walker.skip_current_dir();
                }
                continue;
            }
            if file_type.is_file() {
                files.push(self.scan_file(root, entry.path())?);
            }
        }

        Ok(files)
    }

    /// Read and scan one file. `root` is used to derive the file's directory.
    pub fn scan_file(&self, root: &Path, path: &Path) -> Result<SourceFile> {
        let bytes = fs::read(path).map_err(|source| AnnError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let relative = relative_path(root, path);
        let file = self.scan_source(&relative, &String::from_utf8_lossy(&bytes));
        debug!(
            file = %relative,
            declarations = file.declarations.len(),
            "scanned file"
        );
        Ok(file)
    }

    /// Scan source text. `file_path` is `/`-separated and relative to the
    /// module root.
    pub fn scan_source(&self, file_path: &str, source: &str) -> SourceFile {
        let mut file = SourceFile {
            file_path: file_path.to_string(),
            ..Default::default()
        };
        let mut lines = source.lines();
        let mut lexer = Lexer::new();
        let mut comments = CommentRun::default();
        // Brace and paren depth of lines that are not declarations.
        let mut depth: usize = 0;
        // Whether an open block comment started on a comment-only line.
        let mut doc_block = false;

        while let Some(line) = lines.next() {
            let starts_in = lexer.state();
            let mut lexed = lexer.feed_line(line);

            match starts_in {
                LexState::InRawLiteral => {
                    depth = apply_depth(depth, &lexed);
                    comments.code();
                    continue;
                }
                LexState::InBlockComment => {
                    if doc_block {
                        comments.comment(std::mem::take(&mut lexed.comments));
                    } else {
                        comments.code();
                    }
                    if lexed.code.is_empty() {
                        continue;
                    }
                    // Code after the closing `*/` is dispatched like any other line.
                }
                _ if lexed.code.is_empty() => {
                    // A bare `/*` opens a doc block even though it lexes as blank.
                    if lexer.state() == LexState::InBlockComment {
                        doc_block = true;
                        comments.comment(lexed.comments);
                    } else if lexed.is_blank() {
                        comments.code();
                    } else {
                        comments.comment(lexed.comments);
                    }
                    continue;
                }
                _ => {}
            }
            doc_block = false;

            if depth == 0 {
                let code = lexed.code.as_str();
                if let Some(rest) = keyword_rest(code, PACKAGE_KEYWORD) {
                    file.package_name = rest.trim().trim_end_matches(';').trim().to_string();
                    file.package_comments = comments.attach();
                    file.import_path = format!("{}/{}", self.module, directory_of(file_path));
                    continue;
                }
                if let Some(rest) = keyword_rest(code, IMPORT_KEYWORD) {
                    let imports = match rest.trim_start().strip_prefix('(') {
                        Some(first) if lexed.open_parens > lexed.close_parens => {
                            let mut imports = parse_inline_imports(first, self.config);
                            imports.extend(self.read_import_group(&mut lines, &mut lexer));
                            imports
                        }
                        _ => parse_inline_imports(rest, self.config),
                    };
                    file.imports.extend(imports);
                    comments.code();
                    continue;
                }
                if let Some((kind, rest)) = declaration_keyword(code) {
                    let name = declaration_name(kind, rest);
                    let attached = comments.attach();
                    skip_body(&lexed, &mut lines, &mut lexer);
                    if let Some(name) = name {
                        file.declarations.push(Declaration::new(
                            kind,
                            name,
                            &file.import_path,
                            attached,
                        ));
                    }
                    continue;
                }
            }

            depth = apply_depth(depth, &lexed);
            comments.code();
        }

        file
    }

    /// Read the lines of an `import ( ... )` block after its opening line.
    fn read_import_group<'s>(
        &self,
        lines: &mut impl Iterator<Item = &'s str>,
        lexer: &mut Lexer,
    ) -> Vec<ImportRef> {
        let mut imports = Vec::new();
        for line in lines.by_ref() {
            let lexed = lexer.feed_line(line);
            let (spec, closed) = match lexed.code.find(')') {
                Some(end) => (&lexed.code[..end], true),
                None => (lexed.code.as_str(), false),
            };
            imports.extend(parse_import_spec(spec, self.config));
            if closed {
                break;
            }
        }
        imports
    }
}

/// Consume a declaration body: lines are read until every brace and
/// parenthesis opened by the header is closed.
fn skip_body<'s>(header: &LexedLine, lines: &mut impl Iterator<Item = &'s str>, lexer: &mut Lexer) {
    let mut braces = header.open_braces as isize - header.close_braces as isize;
    let mut parens = header.open_parens as isize - header.close_parens as isize;
    while braces > 0 || parens > 0 {
        let Some(line) = lines.next() else {
            break;
        };
        let lexed = lexer.feed_line(line);
        braces += lexed.open_braces as isize - lexed.close_braces as isize;
        parens += lexed.open_parens as isize - lexed.close_parens as isize;
    }
}

fn apply_depth(depth: usize, lexed: &LexedLine) -> usize {
    (depth + lexed.open_braces + lexed.open_parens)
        .saturating_sub(lexed.close_braces + lexed.close_parens)
}

/// Text after `keyword` when the line starts with it as a whole word.
fn keyword_rest<'c>(code: &'c str, keyword: &str) -> Option<&'c str> {
    let rest = code.strip_prefix(keyword)?;
    match rest.chars().next() {
        Some(c) if c.is_alphanumeric() || c == '_' => None,
        _ => Some(rest),
    }
}

fn declaration_keyword(code: &str) -> Option<(DeclKind, &str)> {
    keyword_rest(code, FUNC_KEYWORD)
        .map(|rest| (DeclKind::Callable, rest))
        .or_else(|| keyword_rest(code, TYPE_KEYWORD).map(|rest| (DeclKind::TypeDef, rest)))
}

/// Name declared by a header, without receiver, parameters or type
/// parameters. `None` for headers without a name such as `type (`.
fn declaration_name(kind: DeclKind, rest: &str) -> Option<String> {
    let mut rest = rest.trim_start();
    if kind == DeclKind::Callable && rest.starts_with('(') {
        rest = skip_group(rest)?.trim_start();
    }
    let name: String = rest
        .chars()
        .take_while(|c| c.is_alphanumeric() || *c == '_')
        .collect();
    (!name.is_empty()).then_some(name)
}

/// Text after the parenthesized group that `text` starts with.
fn skip_group(text: &str) -> Option<&str> {
    let mut depth = 0usize;
    for (idx, c) in text.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(&text[idx + 1..]);
                }
            }
            _ => {}
        }
    }
    None
}

/// Directory part of a `/`-separated file path, `.` at the root.
fn directory_of(file_path: &str) -> &str {
    match file_path.rfind('/') {
        Some(idx) => &file_path[..idx],
        None => ".",
    }
}

fn relative_path(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}
