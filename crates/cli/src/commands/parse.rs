use std::path::Path;

use crate::OutputFormat;

/// Print the parsed document tree. The tree is JSON in both output modes;
/// text mode adds a one-line summary on stderr unless quiet.
pub(crate) fn cmd_parse(file: &Path, output: OutputFormat, quiet: bool) {
    let doc = super::load_or_exit(file, output, quiet);

    let pretty = serde_json::to_string_pretty(&doc)
        .unwrap_or_else(|e| format!("serialization error: {}", e));
    println!("{}", pretty);

    if output == OutputFormat::Text && !quiet {
        eprintln!(
            "parsed '{}': {} behavior(s), {} procedure(s), {} type(s)",
            doc.title,
            doc.behaviors.len(),
            doc.procedures.len(),
            doc.types.len()
        );
    }
}
