//! Report formatting and printing.
//!
//! Kept apart from the library so `ann` can be used without printing side
//! effects.

use std::io::{self, Write};

use colored::Colorize;

use super::run::CommandOutput;
use crate::config::{Config, ConfigSource};
use crate::core::types::{DeclKind, SourceFile};
use crate::generate::GenerateSummary;

/// Success mark for consistent output formatting
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

pub fn print(output: &CommandOutput) {
    print_to(output, &mut io::stdout().lock());
}

pub fn print_to<W: Write>(output: &CommandOutput, writer: &mut W) {
    match output {
        CommandOutput::Generate(summary) => print_generate(summary, writer),
        CommandOutput::Clean(removed) => print_clean(removed, writer),
        CommandOutput::Scan { files, json: true } => print_scan_json(files, writer),
        CommandOutput::Scan { files, json: false } => print_scan(files, writer),
        CommandOutput::ConfigUpdated { source, changed } => {
            print_config_updated(source, *changed, writer)
        }
        CommandOutput::ConfigList { source, config } => print_config_list(source, config, writer),
    }
}

fn plural(count: usize, singular: &str, plural: &str) -> String {
    format!("{} {}", count, if count == 1 { singular } else { plural })
}

fn success<W: Write>(writer: &mut W, message: String) {
    let _ = writeln!(writer, "{} {}", SUCCESS_MARK.green(), message.green());
}

fn print_generate<W: Write>(summary: &GenerateSummary, writer: &mut W) {
    success(
        writer,
        format!(
            "Generated {} from {} into {}",
            plural(summary.entries, "entry", "entries"),
            plural(summary.files_scanned, "file", "files"),
            summary.output_file.display()
        ),
    );
}

fn print_clean<W: Write>(removed: &[std::path::PathBuf], writer: &mut W) {
    if removed.is_empty() {
        success(writer, "No generated directories found.".to_string());
        return;
    }
    for dir in removed {
        let _ = writeln!(writer, "  {} {}", "removed".red(), dir.display());
    }
    success(
        writer,
        format!("Removed {}", plural(removed.len(), "directory", "directories")),
    );
}

fn print_scan<W: Write>(files: &[SourceFile], writer: &mut W) {
    let mut declarations = 0;
    let mut registered = 0;
    for file in files.iter().filter(|file| !file.declarations.is_empty()) {
        let _ = writeln!(
            writer,
            "{} {}",
            file.file_path.bold(),
            format!("(package {})", file.package_name).dimmed()
        );
        for decl in &file.declarations {
            declarations += 1;
            let keyword = match decl.kind {
                DeclKind::Callable => "func",
                DeclKind::TypeDef => "type",
            };
            let _ = writeln!(writer, "  {} {}", keyword.cyan(), decl.path);
            if decl.is_registered() {
                registered += 1;
            }
            for item in &decl.annotations {
                let _ = writeln!(writer, "    @{}", item.rendered);
            }
        }
    }
    success(
        writer,
        format!(
            "Scanned {}: {}, {} registered",
            plural(files.len(), "file", "files"),
            plural(declarations, "declaration", "declarations"),
            registered
        ),
    );
}

fn print_scan_json<W: Write>(files: &[SourceFile], writer: &mut W) {
    match serde_json::to_string_pretty(files) {
        Ok(json) => {
            let _ = writeln!(writer, "{}", json);
        }
        Err(err) => {
            let _ = writeln!(writer, "{} {}", "error:".bold().red(), err);
        }
    }
}

fn print_config_updated<W: Write>(source: &ConfigSource, changed: bool, writer: &mut W) {
    if changed {
        success(writer, format!("Updated {}", source));
    } else {
        let _ = writeln!(writer, "No matching aliases in {}", source);
    }
}

fn print_config_list<W: Write>(source: &ConfigSource, config: &Config, writer: &mut W) {
    if config.replace.is_empty() {
        let _ = writeln!(writer, "No aliases configured in {}", source);
        return;
    }
    for (import_path, aliases) in &config.replace {
        let _ = writeln!(writer, "{}: {}", import_path.bold(), aliases.join(", "));
    }
}
