//! Spec loading: read a file, parse it, and reject files that are not
//! SESF specifications.

use crate::ast::Document;
use crate::error::LoadError;
use crate::grammar::Grammar;
use crate::parser;
use crate::source::{FileSystemProvider, SourceProvider};
use std::path::Path;
use tracing::debug;

/// Load and parse the spec at `path` from disk.
pub fn load_document(path: &Path) -> Result<Document, LoadError> {
    load_document_with_provider(path, &FileSystemProvider)
}

/// Load and parse the spec at `path` using the given [`SourceProvider`].
///
/// A document with no Meta fields is rejected with
/// [`LoadError::NotASpec`]; every other problem in the text is left for
/// the checks to report.
pub fn load_document_with_provider(
    path: &Path,
    provider: &dyn SourceProvider,
) -> Result<Document, LoadError> {
    if !provider.exists(path) {
        return Err(LoadError::NotFound {
            path: path.to_owned(),
        });
    }
    let text = provider.read_source(path).map_err(|source| LoadError::Read {
        path: path.to_owned(),
        source,
    })?;

    let doc = parser::parse_with_grammar(&text, &Grammar::sesf());
    debug!(
        path = %path.display(),
        behaviors = doc.behaviors.len(),
        procedures = doc.procedures.len(),
        types = doc.types.len(),
        "parsed spec"
    );

    if doc.meta.is_empty() {
        return Err(LoadError::NotASpec {
            path: path.to_owned(),
        });
    }
    Ok(doc)
}
