use std::path::PathBuf;

/// Process-level failures that stop validation before any check runs.
///
/// Everything else a spec can get wrong is reported as a diagnostic, not
/// an error.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The spec path does not exist.
    #[error("File not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// The path exists but could not be read.
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file parsed, but no Meta fields were found in it.
    #[error("No SESF Meta section found in {}", path.display())]
    NotASpec { path: PathBuf },
}

impl LoadError {
    pub fn path(&self) -> &std::path::Path {
        match self {
            LoadError::NotFound { path }
            | LoadError::Read { path, .. }
            | LoadError::NotASpec { path } => path,
        }
    }

    /// Short machine-readable kind, used in JSON output.
    pub fn kind(&self) -> &'static str {
        match self {
            LoadError::NotFound { .. } => "not_found",
            LoadError::Read { .. } => "read",
            LoadError::NotASpec { .. } => "not_a_spec",
        }
    }

    /// Extra line shown under the error in text mode, if any.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            LoadError::NotASpec { .. } => Some("Is this an SESF specification?"),
            _ => None,
        }
    }

    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "error": self.to_string(),
            "kind":  self.kind(),
            "path":  self.path().display().to_string(),
        })
    }
}
