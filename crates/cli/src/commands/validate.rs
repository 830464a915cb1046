use std::path::Path;
use std::process;

use tracing::debug;

use crate::render::render_text;
use crate::{report_error, OutputFormat};

pub(crate) fn cmd_validate(file: &Path, check: Option<&str>, output: OutputFormat, quiet: bool) {
    let doc = super::load_or_exit(file, output, quiet);

    let report = match check {
        None => sesf_analyze::analyze(&doc),
        Some(list) => {
            let names: Vec<&str> = list.split(',').filter(|s| !s.trim().is_empty()).collect();
            if names.is_empty() {
                report_error("--check requires at least one check name", output, quiet);
                process::exit(1);
            }
            match sesf_analyze::analyze_selected(&doc, &names) {
                Ok(report) => report,
                Err(e) => {
                    report_error(&e.to_string(), output, quiet);
                    process::exit(1);
                }
            }
        }
    };

    debug!(
        file = %file.display(),
        passed = report.summary.passed,
        warnings = report.summary.warnings,
        failures = report.summary.failures,
        "validation finished"
    );

    match output {
        OutputFormat::Text => print!("{}", render_text(&report, quiet)),
        OutputFormat::Json => {
            let value = report.to_json(&file.display().to_string());
            let pretty = serde_json::to_string_pretty(&value)
                .unwrap_or_else(|e| format!("serialization error: {}", e));
            println!("{}", pretty);
        }
    }

    process::exit(report.exit_code());
}
