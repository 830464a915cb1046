pub(crate) mod parse;
pub(crate) mod validate;

use std::process;

use sesf_core::{Document, LoadError};

use crate::OutputFormat;

/// Load a spec, or report the load failure and exit 1.
pub(crate) fn load_or_exit(file: &std::path::Path, output: OutputFormat, quiet: bool) -> Document {
    match sesf_core::load_document(file) {
        Ok(doc) => doc,
        Err(e) => {
            report_load_error(&e, output, quiet);
            process::exit(1);
        }
    }
}

fn report_load_error(e: &LoadError, output: OutputFormat, quiet: bool) {
    match output {
        OutputFormat::Json => {
            let err_json = serde_json::to_string_pretty(&e.to_json_value())
                .unwrap_or_else(|_| crate::error_json(&e.to_string()));
            eprintln!("{}", err_json);
        }
        OutputFormat::Text => {
            if !quiet {
                eprintln!("{}", e);
                if let Some(hint) = e.hint() {
                    eprintln!("{}", hint);
                }
            }
        }
    }
}
