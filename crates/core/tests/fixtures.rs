//! Parser tests over the conformance fixtures in conformance/.

use std::path::{Path, PathBuf};

use sesf_core::{load_document, LoadError, SectionKind};

/// Locate the workspace root.
fn workspace_root() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .and_then(|p| p.parent())
        .expect("workspace root")
        .to_path_buf()
}

fn load(fixture: &str) -> sesf_core::Document {
    let path = workspace_root().join(fixture);
    load_document(&path).unwrap_or_else(|e| panic!("failed to load {}: {}", fixture, e))
}

fn collect_markdown(dir: &Path) -> Vec<PathBuf> {
    let mut paths: Vec<_> = std::fs::read_dir(dir)
        .unwrap()
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.extension().is_some_and(|e| e == "md"))
        .collect();
    paths.sort();
    paths
}

// ──────────────────────────────────────────────
// Positive fixtures
// ──────────────────────────────────────────────

#[test]
fn email_validator_parses() {
    let doc = load("conformance/positive/email_validator.md");
    assert_eq!(doc.title, "Email Address Validator");
    assert_eq!(doc.meta_value("date"), Some("2026-03-01"));
    assert_eq!(doc.behaviors.len(), 1);

    let b = &doc.behaviors[0];
    assert_eq!(b.name, "validate_email");
    assert_eq!(b.rules.len(), 2);
    assert_eq!(b.errors.len(), 1);
    assert_eq!(b.examples.len(), 2);
    assert_eq!(b.errors[0].severity.as_deref(), Some("critical"));
    assert_eq!(
        b.errors[0].message.as_deref(),
        Some("Invalid email address: does not meet structural requirements")
    );
    assert!(b.rules[1]
        .raw_text
        .contains("AND the portion after \"@\" MUST be at least 3 characters long"));
}

#[test]
fn order_processor_functions_actions_and_types() {
    let doc = load("conformance/positive/order_processor.md");
    assert_eq!(doc.meta_value("tier"), Some("standard"));
    assert_eq!(doc.functions, vec!["validate_order"]);
    assert_eq!(doc.actions, vec!["send_confirmation"]);

    let names: Vec<_> = doc.types.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["Order", "ProcessingResult"]);
    let order = &doc.types[0];
    assert_eq!(order.fields.len(), 3);
    assert!(order.fields[0].required);
    assert!(!order.fields[2].required);

    let rule = &doc.behaviors[0].rules[0];
    assert_eq!(rule.when.as_deref(), Some("order.amount > 0"));
    assert_eq!(rule.then.as_deref(), Some("validate_order(order)"));
    assert_eq!(rule.else_.as_deref(), Some("reject the order"));

    for kind in [
        SectionKind::Scope,
        SectionKind::Inputs,
        SectionKind::Outputs,
        SectionKind::Types,
        SectionKind::Functions,
        SectionKind::Constraints,
        SectionKind::Dependencies,
    ] {
        assert!(doc.has_section(kind), "missing section {kind}");
    }
}

#[test]
fn payment_routing_priorities_and_precedence() {
    let doc = load("conformance/positive/payment_routing.md");
    assert_eq!(doc.title, "Payment Routing");
    assert_eq!(
        doc.precedence,
        vec!["fraud_block", "limit_check", "currency_route"]
    );
    let priorities: Vec<_> = doc
        .rules()
        .map(|(owner, r)| (owner, r.name.as_str(), r.priority))
        .collect();
    assert_eq!(
        priorities,
        vec![
            ("screen_payment", "fraud_block", Some(1)),
            ("screen_payment", "limit_check", Some(2)),
            ("route_payment", "currency_route", Some(3)),
        ]
    );
    assert!(!doc.types[1].fields[1].type_str.contains("default"));
}

#[test]
fn daily_report_frontmatter_and_procedure() {
    let doc = load("conformance/positive/daily_report.md");
    assert_eq!(doc.title, "Daily Report Generator");
    assert!(doc.behaviors.is_empty());
    assert_eq!(doc.procedures.len(), 1);

    let p = &doc.procedures[0];
    assert_eq!(p.name, "generate_report");
    assert_eq!(p.line, 12);
    let steps: Vec<_> = p.steps.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(steps, vec!["gather_data", "aggregate", "format_output"]);
    assert_eq!(
        p.steps[1].body,
        "COMPUTE total_sales as SUM of transaction amounts\nCOMPUTE transaction_count as COUNT of transactions"
    );
    assert_eq!(p.errors[0].name, "no_transactions");
    assert_eq!(p.examples[0].name, "typical_day");
}

#[test]
fn fenced_document_is_unwrapped() {
    let doc = load("conformance/positive/fenced_greeting.md");
    assert_eq!(doc.title, "Greeting Service");
    assert_eq!(doc.behaviors[0].line, 11);
    assert!(!doc
        .sections
        .values()
        .flatten()
        .any(|l| l.text.contains("closing fence")));
}

#[test]
fn every_fixture_parses_identically_twice() {
    let root = workspace_root().join("conformance");
    let mut tested = 0;
    for dir in ["positive", "negative"] {
        for path in collect_markdown(&root.join(dir)) {
            let text = std::fs::read_to_string(&path).unwrap();
            assert_eq!(sesf_core::parse(&text), sesf_core::parse(&text));
            tested += 1;
        }
    }
    assert!(tested > 0, "no fixtures found -- check paths");
}

#[test]
fn parsed_document_serializes_to_json() {
    let doc = load("conformance/positive/payment_routing.md");
    let json = serde_json::to_value(&doc).unwrap();
    assert_eq!(json["title"], "Payment Routing");
    assert_eq!(json["behaviors"][0]["rules"][0]["priority"], 1);
    assert!(json["sections"]["precedence"].is_array());
    assert!(json["behaviors"][0]["rules"][0].get("else").is_some());
}

// ──────────────────────────────────────────────
// Negative fixtures
// ──────────────────────────────────────────────

#[test]
fn shopping_list_is_not_a_spec() {
    let path = workspace_root().join("conformance/negative/not_a_spec.md");
    let err = load_document(&path).unwrap_err();
    assert!(matches!(err, LoadError::NotASpec { .. }));
    assert!(err.to_string().starts_with("No SESF Meta section found in"));
}

#[test]
fn missing_file_is_reported() {
    let path = workspace_root().join("conformance/positive/does_not_exist.md");
    let err = load_document(&path).unwrap_err();
    assert!(matches!(err, LoadError::NotFound { .. }));
}

#[test]
fn missing_tier_still_parses() {
    let doc = load("conformance/negative/missing_tier.md");
    assert_eq!(doc.meta_value("tier"), None);
    assert_eq!(doc.meta_value("version"), Some("1.0.0"));
}
