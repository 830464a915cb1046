//! C5: Example coverage per block.

use sesf_core::Document;

use crate::report::{Category, Diagnostic};

pub fn check_examples(doc: &Document) -> Vec<Diagnostic> {
    let mut out = Vec::new();

    for block in doc.blocks() {
        let label = block.label();
        let examples = block.examples.len();
        if examples == 0 {
            out.push(
                Diagnostic::warn(
                    Category::ExampleConsistency,
                    format!("{label} has no examples"),
                )
                .at(block.line),
            );
            continue;
        }

        out.push(
            Diagnostic::pass(
                Category::ExampleConsistency,
                format!("{label} has {examples} example(s)"),
            )
            .at(block.line),
        );

        // One example per rule (or step) is the expected minimum.
        if block.unit_count > 0 && examples < block.unit_count {
            out.push(
                Diagnostic::warn(
                    Category::ExampleConsistency,
                    format!(
                        "{label} has fewer examples ({examples}) than {} ({})",
                        block.kind.units(),
                        block.unit_count
                    ),
                )
                .at(block.line),
            );
        }
    }
    out
}
