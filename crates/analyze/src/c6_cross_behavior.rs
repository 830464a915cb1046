//! C6: Cross-behavior PRIORITY/PRECEDENCE agreement (complex tier only).

use std::collections::BTreeSet;

use sesf_core::Document;

use crate::c3_rule_integrity::tagged_rules;
use crate::report::{Category, Diagnostic};
use crate::tier::{Tier, TierDecl};

pub fn check_cross_behavior(doc: &Document) -> Vec<Diagnostic> {
    if TierDecl::from_document(doc).declared() != Some(Tier::Complex) {
        return vec![Diagnostic::pass(
            Category::CrossBehavior,
            "Cross-behavior checks only apply to complex tier",
        )];
    }

    let tagged = tagged_rules(doc);
    let listed: BTreeSet<&str> = doc.precedence.iter().map(String::as_str).collect();

    match (tagged.is_empty(), listed.is_empty()) {
        (true, true) => {
            return vec![Diagnostic::pass(
                Category::CrossBehavior,
                "No cross-behavior PRIORITY/PRECEDENCE to check",
            )]
        }
        (false, true) => {
            return vec![Diagnostic::fail(
                Category::CrossBehavior,
                "Complex tier has PRIORITY-tagged rules across behaviors but no PRECEDENCE block",
            )]
        }
        // Precedence without tags is reported by rule integrity.
        (true, false) => return Vec::new(),
        (false, false) => {}
    }

    let mut out = Vec::new();
    for (name, rule) in &tagged {
        if listed.contains(name) {
            continue;
        }
        let owner = rule.behaviors.last().copied().unwrap_or_default();
        out.push(
            Diagnostic::warn(
                Category::CrossBehavior,
                format!(
                    "Rule '{name}' (BEHAVIOR '{owner}') has PRIORITY tag but is not in PRECEDENCE block"
                ),
            )
            .at(rule.line),
        );
    }
    for name in &listed {
        if !tagged.contains_key(name) {
            out.push(Diagnostic::warn(
                Category::CrossBehavior,
                format!("Rule '{name}' in PRECEDENCE block but has no PRIORITY tag"),
            ));
        }
    }
    if out.is_empty() {
        out.push(Diagnostic::pass(
            Category::CrossBehavior,
            format!(
                "All {} PRIORITY-tagged rule(s) are listed in PRECEDENCE block",
                tagged.len()
            ),
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::Status;
    use sesf_core::parse;

    fn complex(body: &str) -> Document {
        parse(&format!("T\nMeta: Tier: complex\n{body}"))
    }

    const TWO_BEHAVIORS: &str = "BEHAVIOR pay: x\n  RULE fraud: PRIORITY 1\n    y\nBEHAVIOR ship: x\n  RULE hold: PRIORITY 2\n    y\n";

    #[test]
    fn non_complex_tiers_pass_trivially() {
        let doc = parse("T\nMeta: Tier: standard\n");
        let diags = check_cross_behavior(&doc);
        assert_eq!(diags.len(), 1);
        assert_eq!(
            diags[0].message,
            "Cross-behavior checks only apply to complex tier"
        );
    }

    #[test]
    fn tags_without_precedence_fail() {
        let diags = check_cross_behavior(&complex(TWO_BEHAVIORS));
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].status, Status::Fail);
    }

    #[test]
    fn full_agreement_passes() {
        let body = format!("{TWO_BEHAVIORS}PRECEDENCE:\n1. fraud\n2. hold\n");
        let diags = check_cross_behavior(&complex(&body));
        assert_eq!(diags.len(), 1);
        assert_eq!(
            diags[0].message,
            "All 2 PRIORITY-tagged rule(s) are listed in PRECEDENCE block"
        );
    }

    #[test]
    fn mismatches_name_the_owning_behavior() {
        let body = format!("{TWO_BEHAVIORS}PRECEDENCE:\n1. fraud\n2. zeta\n3. alpha\n");
        let diags = check_cross_behavior(&complex(&body));
        let msgs: Vec<_> = diags.iter().map(|d| d.message.as_str()).collect();
        assert_eq!(
            msgs,
            vec![
                "Rule 'hold' (BEHAVIOR 'ship') has PRIORITY tag but is not in PRECEDENCE block",
                "Rule 'alpha' in PRECEDENCE block but has no PRIORITY tag",
                "Rule 'zeta' in PRECEDENCE block but has no PRIORITY tag",
            ]
        );
        assert_eq!(diags[0].line, Some(7));
    }

    #[test]
    fn nothing_to_check_passes() {
        let diags = check_cross_behavior(&complex("BEHAVIOR b: x\n  RULE r:\n    y\n"));
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].status, Status::Pass);
    }

    #[test]
    fn precedence_without_tags_is_left_to_rule_integrity() {
        let diags = check_cross_behavior(&complex("PRECEDENCE:\n1. a\n"));
        assert!(diags.is_empty());
    }
}
