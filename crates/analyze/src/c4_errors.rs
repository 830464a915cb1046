//! C4: Error consistency.

use sesf_core::Document;

use crate::report::{Category, Diagnostic};

pub const VALID_SEVERITIES: &[&str] = &["critical", "warning", "info"];

/// Every ERROR needs a known SEVERITY, an ACTION and a MESSAGE. Errors in
/// a block with no rules or steps are orphaned.
pub fn check_errors(doc: &Document) -> Vec<Diagnostic> {
    let mut out = Vec::new();

    for block in doc.blocks().filter(|b| !b.errors.is_empty()) {
        let label = block.label();
        if block.unit_count == 0 {
            out.push(
                Diagnostic::warn(
                    Category::ErrorConsistency,
                    format!(
                        "{label} has {} error(s) but no {} (orphaned errors)",
                        block.errors.len(),
                        block.kind.units()
                    ),
                )
                .at(block.line),
            );
        }

        let mut well_defined = 0;
        for error in block.errors {
            let mut missing = Vec::new();
            match error.severity.as_deref() {
                None => missing.push("SEVERITY"),
                Some(sev) if !VALID_SEVERITIES.contains(&sev.to_lowercase().as_str()) => {
                    out.push(
                        Diagnostic::warn(
                            Category::ErrorConsistency,
                            format!(
                                "ERROR '{}' in {label} has invalid severity '{sev}' \
                                 (expected: critical, warning, info)",
                                error.name
                            ),
                        )
                        .at(error.line),
                    );
                }
                Some(_) => {}
            }
            if error.action.is_none() {
                missing.push("ACTION");
            }
            if error.message.is_none() {
                missing.push("MESSAGE");
            }

            if missing.is_empty() {
                well_defined += 1;
            } else {
                out.push(
                    Diagnostic::warn(
                        Category::ErrorConsistency,
                        format!(
                            "ERROR '{}' in {label} missing: {}",
                            error.name,
                            missing.join(", ")
                        ),
                    )
                    .at(error.line),
                );
            }
        }

        if well_defined > 0 {
            out.push(
                Diagnostic::pass(
                    Category::ErrorConsistency,
                    format!("{label} has {well_defined} well-defined error(s)"),
                )
                .at(block.line),
            );
        }
    }
    out
}
