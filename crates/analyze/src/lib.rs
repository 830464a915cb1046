//! SESF checks -- C1-C6 validation suite with structured output.
//!
//! Every check is a pure function over a parsed [`sesf_core::Document`]
//! returning its own diagnostics. The `analyze()` function runs them in a
//! fixed order and aggregates the results into a [`Report`].

pub mod c1_structure;
pub mod c2_types;
pub mod c3_rule_integrity;
pub mod c4_errors;
pub mod c5_examples;
pub mod c6_cross_behavior;
pub mod keywords;
pub mod report;
pub mod tier;

pub use keywords::is_requirement_keyword;
pub use report::{Category, Diagnostic, Report, Status, Summary};
pub use tier::{Tier, TierDecl};

use sesf_core::Document;
use std::str::FromStr;
use tracing::debug;

/// Failure to set up a selective run.
#[derive(Debug, thiserror::Error)]
pub enum AnalyzeError {
    #[error("unknown check '{0}' (expected one of: structure, types, rules, errors, examples, cross)")]
    UnknownCheck(String),
}

/// One of the six checks, in report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Check {
    Structure,
    Types,
    Rules,
    Errors,
    Examples,
    Cross,
}

impl Check {
    pub const ALL: [Check; 6] = [
        Check::Structure,
        Check::Types,
        Check::Rules,
        Check::Errors,
        Check::Examples,
        Check::Cross,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Check::Structure => "structure",
            Check::Types => "types",
            Check::Rules => "rules",
            Check::Errors => "errors",
            Check::Examples => "examples",
            Check::Cross => "cross",
        }
    }

    pub fn run(self, doc: &Document) -> Vec<Diagnostic> {
        match self {
            Check::Structure => c1_structure::check_structure(doc),
            Check::Types => c2_types::check_types(doc),
            Check::Rules => c3_rule_integrity::check_rule_integrity(doc),
            Check::Errors => c4_errors::check_errors(doc),
            Check::Examples => c5_examples::check_examples(doc),
            Check::Cross => c6_cross_behavior::check_cross_behavior(doc),
        }
    }
}

impl FromStr for Check {
    type Err = AnalyzeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Check::ALL
            .into_iter()
            .find(|c| c.name() == s)
            .ok_or_else(|| AnalyzeError::UnknownCheck(s.to_string()))
    }
}

/// Run all six checks on a parsed document.
pub fn analyze(doc: &Document) -> Report {
    run_checks(doc, &Check::ALL)
}

/// Run only the named checks, still in the fixed report order.
///
/// Valid names: "structure", "types", "rules", "errors", "examples",
/// "cross".
pub fn analyze_selected(doc: &Document, names: &[&str]) -> Result<Report, AnalyzeError> {
    let mut checks = names
        .iter()
        .map(|n| n.trim().parse::<Check>())
        .collect::<Result<Vec<_>, _>>()?;
    checks.sort();
    checks.dedup();
    Ok(run_checks(doc, &checks))
}

fn run_checks(doc: &Document, checks: &[Check]) -> Report {
    let tier = TierDecl::from_document(doc).effective();
    let mut report = Report::new(doc.title.clone(), tier);
    for check in checks {
        let diagnostics = check.run(doc);
        debug!(
            check = check.name(),
            count = diagnostics.len(),
            failures = diagnostics.iter().filter(|d| d.status == Status::Fail).count(),
            "check finished"
        );
        report.record(check.name(), diagnostics);
    }
    report
}
