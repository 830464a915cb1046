//! sesf-core: SESF specification parser.
//!
//! Turns a markdown-flavoured SESF spec into a [`Document`]: title, meta
//! fields, raw section lines, types, functions and actions, BEHAVIOR and
//! PROCEDURE blocks, and the PRECEDENCE list.
//!
//! # Public API
//!
//! - [`parse()`] -- parse text with the standard grammar
//! - [`load_document()`] -- read a file, parse it, reject non-specs
//! - [`Grammar`] -- keyword table driving the block parser
//! - [`LoadError`] -- failures that stop validation before any check
//! - AST types: [`Document`], [`Behavior`], [`Procedure`], [`Rule`],
//!   [`ErrorDecl`], [`Example`], [`Step`], [`TypeDecl`]

pub mod ast;
pub mod error;
pub mod grammar;
pub mod load;
pub mod meta;
pub mod parser;
pub mod preprocess;
pub mod source;

// ── Convenience re-exports: key types ────────────────────────────────

pub use ast::{
    Behavior, BlockKind, BlockView, Document, ErrorDecl, Example, Procedure, Rule, SectionLine,
    Step, TypeDecl, TypeField,
};
pub use error::LoadError;
pub use grammar::{Grammar, SectionKind, SubBlockKind};
pub use source::{FileSystemProvider, InMemoryProvider, SourceProvider};

// ── Convenience re-exports: entry points ─────────────────────────────

pub use load::{load_document, load_document_with_provider};
pub use parser::{parse, parse_with_grammar};
