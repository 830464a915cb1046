//! Human-readable report rendering.

use std::fmt::Write;

use sesf_analyze::{Report, Status};

const RULE_WIDTH: usize = 50;

/// Render a report as grouped text lines with a summary footer.
///
/// With `quiet`, PASS lines are dropped, as are headers of groups that
/// contain nothing else. The summary is always printed.
pub(crate) fn render_text(report: &Report, quiet: bool) -> String {
    let mut out = String::new();

    for (category, diagnostics) in report.groups() {
        let shown: Vec<_> = diagnostics
            .iter()
            .filter(|d| !quiet || d.status != Status::Pass)
            .collect();
        if shown.is_empty() {
            continue;
        }
        let _ = writeln!(out, "\n  \u{2500}\u{2500} {} \u{2500}\u{2500}", category.label());
        for d in shown {
            let _ = write!(out, "  [{}] {} {}", d.status, d.status.symbol(), d.message);
            if let Some(line) = d.line {
                let _ = write!(out, " (line {})", line);
            }
            out.push('\n');
        }
    }

    let s = &report.summary;
    let _ = writeln!(out, "\n{}", "\u{2500}".repeat(RULE_WIDTH));
    let _ = writeln!(
        out,
        "Results: {} passed, {} warnings, {} failures",
        s.passed, s.warnings, s.failures
    );
    out
}
