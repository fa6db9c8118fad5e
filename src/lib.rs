//! Ann - annotation registry generator for Go modules
//!
//! Ann scans a Go module for exported functions and types whose doc comments
//! carry `@` annotations, qualifies the `[Type]` and `<Callable>` references
//! inside them against each file's imports, and writes a Go registry file that
//! maps every annotated declaration to its runtime handle.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (arguments, dispatch, reporting)
//! - `config`: Import-alias configuration loading and saving
//! - `core`: Source scanning and annotation resolution
//! - `error`: Error types shared by the library
//! - `generate`: Registry rendering and output directory management
//! - `lexer`: Line-oriented lexer for Go-like source

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod generate;
pub mod lexer;
