//! C3: Rule integrity.
//!
//! Checks that PRIORITY-tagged rules and the PRECEDENCE block agree.

use std::collections::{BTreeMap, BTreeSet};

use sesf_core::Document;

use crate::report::{Category, Diagnostic};
use crate::tier::{Tier, TierDecl};

/// A PRIORITY-tagged rule and where it was declared.
#[derive(Debug, Clone)]
pub struct TaggedRule<'a> {
    /// Every behavior declaring a tagged rule with this name, in file order.
    pub behaviors: Vec<&'a str>,
    /// Line of the last declaration.
    pub line: u32,
}

/// Tagged rules keyed by rule name. A later declaration of the same name
/// replaces the line of an earlier one.
pub fn tagged_rules(doc: &Document) -> BTreeMap<&str, TaggedRule<'_>> {
    let mut tagged: BTreeMap<&str, TaggedRule<'_>> = BTreeMap::new();
    for (behavior, rule) in doc.rules() {
        if rule.priority.is_none() {
            continue;
        }
        let entry = tagged.entry(rule.name.as_str()).or_insert(TaggedRule {
            behaviors: Vec::new(),
            line: rule.line,
        });
        entry.line = rule.line;
        if !entry.behaviors.contains(&behavior) {
            entry.behaviors.push(behavior);
        }
    }
    tagged
}

pub fn check_rule_integrity(doc: &Document) -> Vec<Diagnostic> {
    let mut out = Vec::new();
    let tier = TierDecl::from_document(doc).declared();
    let tagged = tagged_rules(doc);
    let has_precedence = !doc.precedence.is_empty();
    let has_tags = !tagged.is_empty();

    if has_tags && !has_precedence {
        match tier {
            Some(Tier::Complex) => out.push(Diagnostic::fail(
                Category::RuleIntegrity,
                "Complex tier has PRIORITY-tagged rules but no PRECEDENCE block",
            )),
            Some(Tier::Standard) => out.push(Diagnostic::pass(
                Category::RuleIntegrity,
                "Standard tier: PRIORITY tags present without PRECEDENCE block (acceptable)",
            )),
            _ => {}
        }
    }

    if has_tags && has_precedence {
        let listed: BTreeSet<&str> = doc.precedence.iter().map(String::as_str).collect();
        let mut mismatch = false;

        for (name, rule) in &tagged {
            if !listed.contains(name) {
                mismatch = true;
                out.push(
                    Diagnostic::warn(
                        Category::RuleIntegrity,
                        format!("Rule '{name}' has PRIORITY tag but is not listed in PRECEDENCE block"),
                    )
                    .at(rule.line),
                );
            }
        }
        for name in &doc.precedence {
            if !tagged.contains_key(name.as_str()) {
                mismatch = true;
                out.push(Diagnostic::warn(
                    Category::RuleIntegrity,
                    format!(
                        "Rule '{name}' listed in PRECEDENCE block but has no PRIORITY tag in its behavior"
                    ),
                ));
            }
        }
        if !mismatch {
            out.push(Diagnostic::pass(
                Category::RuleIntegrity,
                format!(
                    "PRECEDENCE and PRIORITY tags are consistent ({} rule(s))",
                    tagged.len()
                ),
            ));
        }
    } else if has_precedence {
        out.push(Diagnostic::warn(
            Category::RuleIntegrity,
            "PRECEDENCE block exists but no rules have PRIORITY tags",
        ));
    } else if !has_tags {
        out.push(Diagnostic::pass(
            Category::RuleIntegrity,
            "No PRECEDENCE/PRIORITY declarations (none required)",
        ));
    }

    for (name, rule) in &tagged {
        if rule.behaviors.len() > 1 {
            out.push(
                Diagnostic::warn(
                    Category::RuleIntegrity,
                    format!(
                        "Rule '{name}' has PRIORITY tag in more than one BEHAVIOR ({}); its PRECEDENCE entry is ambiguous",
                        rule.behaviors.join(", ")
                    ),
                )
                .at(rule.line),
            );
        }
    }

    out
}
