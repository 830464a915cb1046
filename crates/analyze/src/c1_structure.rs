//! C1: Structural completeness.
//!
//! Tier declaration, required sections for the tier, expected meta fields,
//! block presence and size, and lowercase requirement keywords in section
//! text.

use std::collections::BTreeSet;

use sesf_core::{BlockKind, Document, SectionKind};

use crate::keywords;
use crate::report::{Category, Diagnostic};
use crate::tier::TierDecl;

/// Meta fields every spec should carry, in report order.
pub const EXPECTED_META_FIELDS: &[&str] = &["date", "domain", "status", "version"];

pub fn check_structure(doc: &Document) -> Vec<Diagnostic> {
    let mut out = Vec::new();

    let decl = TierDecl::from_document(doc);
    out.push(match &decl {
        TierDecl::Declared(tier) => {
            Diagnostic::pass(Category::Meta, format!("Tier declared: {tier}"))
        }
        TierDecl::Missing => Diagnostic::fail(
            Category::Meta,
            "Tier not declared in Meta section (expected: micro, standard, or complex)",
        ),
        TierDecl::Unknown(raw) => Diagnostic::fail(
            Category::Meta,
            format!("Unknown tier '{raw}' in Meta (expected: micro, standard, or complex)"),
        ),
    });

    let tier = decl.effective();
    for section in tier.required_sections() {
        let present = doc.has_section(section)
            || (section == SectionKind::Behaviors && doc.has_blocks());
        let label = section.label();
        out.push(if present {
            Diagnostic::pass(
                Category::Sections,
                format!("Required section '{label}' present"),
            )
        } else {
            Diagnostic::fail(
                Category::Sections,
                format!("Required section '{label}' missing (required for {tier} tier)"),
            )
        });
    }

    for field in EXPECTED_META_FIELDS {
        match doc.meta_value(field).filter(|v| !v.is_empty()) {
            Some(value) => out.push(Diagnostic::pass(
                Category::Meta,
                format!("Meta field '{field}' present: {value}"),
            )),
            None => out.push(Diagnostic::warn(
                Category::Meta,
                format!("Meta field '{field}' missing or empty"),
            )),
        }
    }

    check_blocks(doc, &mut out);
    check_name_collisions(doc, &mut out);
    check_keywords(doc, &mut out);
    out
}

fn check_blocks(doc: &Document, out: &mut Vec<Diagnostic>) {
    if !doc.has_blocks() {
        out.push(Diagnostic::fail(Category::Behaviors, "No BEHAVIOR blocks found"));
        return;
    }
    if !doc.behaviors.is_empty() {
        out.push(Diagnostic::pass(
            Category::Behaviors,
            format!("Found {} BEHAVIOR block(s)", doc.behaviors.len()),
        ));
    }
    if !doc.procedures.is_empty() {
        out.push(Diagnostic::pass(
            Category::Behaviors,
            format!("Found {} PROCEDURE block(s)", doc.procedures.len()),
        ));
    }

    for block in doc.blocks() {
        let (unit, units) = match block.kind {
            BlockKind::Behavior => ("rule", "rules"),
            BlockKind::Procedure => ("step", "steps"),
        };
        let d = if block.unit_count > 0 {
            Diagnostic::pass(
                Category::Behaviors,
                format!("{} has {} {unit}(s)", block.label(), block.unit_count),
            )
        } else {
            Diagnostic::warn(
                Category::Behaviors,
                format!("{} has no {units}", block.label()),
            )
        };
        out.push(d.at(block.line));
    }
}

/// A BEHAVIOR and a PROCEDURE with the same name cannot be told apart by
/// name alone.
fn check_name_collisions(doc: &Document, out: &mut Vec<Diagnostic>) {
    let behavior_names: BTreeSet<&str> = doc.behaviors.iter().map(|b| b.name.as_str()).collect();
    for procedure in &doc.procedures {
        if behavior_names.contains(procedure.name.as_str()) {
            out.push(
                Diagnostic::warn(
                    Category::Behaviors,
                    format!(
                        "Name '{}' is used by both a BEHAVIOR and a PROCEDURE (ambiguous)",
                        procedure.name
                    ),
                )
                .at(procedure.line),
            );
        }
    }
}

fn check_keywords(doc: &Document, out: &mut Vec<Diagnostic>) {
    let mut lines: Vec<_> = doc.sections.values().flatten().collect();
    lines.sort_by_key(|l| l.line);

    let mut seen: BTreeSet<(u32, &str)> = BTreeSet::new();
    for line in lines {
        for word in keywords::lowercase_requirement_keywords(&line.text) {
            if seen.insert((line.line, word)) {
                out.push(
                    Diagnostic::warn(
                        Category::Keywords,
                        format!(
                            "Lowercase '{word}' appears to be a requirement keyword -- use '{}'",
                            word.to_uppercase()
                        ),
                    )
                    .at(line.line),
                );
            }
        }
    }
}
