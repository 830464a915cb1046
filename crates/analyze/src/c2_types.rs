//! C2: Type consistency.
//!
//! Scans block text for `type.field` references and checks them against
//! the Types section, then reports declared types that nothing mentions.

use std::collections::{BTreeSet, HashMap};
use std::sync::OnceLock;

use sesf_core::{Document, SectionKind, TypeDecl};

use crate::report::{Category, Diagnostic};

/// Right-hand parts that are file extensions or domains, not fields.
const IGNORED_FIELDS: &[&str] = &[
    "pdf", "txt", "csv", "json", "xml", "md", "py", "js", "html", "css", "yaml", "yml", "toml",
    "ini", "cfg", "com", "org", "net", "io", "ca",
];

/// Left-hand parts from abbreviations such as `i.e.` and `a.m.`.
const IGNORED_TYPES: &[&str] = &["e", "i", "a"];

#[allow(clippy::expect_used)] // Static regex pattern is hardcoded and valid
fn field_ref_re() -> &'static regex::Regex {
    static RE: OnceLock<regex::Regex> = OnceLock::new();
    RE.get_or_init(|| regex::Regex::new(r"\b([a-z_]+)\.([a-z_]+)\b").expect("valid regex"))
}

/// `PurchaseOrder` -> `purchase_order`.
pub fn pascal_to_snake(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let mut prev: Option<char> = None;
    for c in name.chars() {
        if c.is_ascii_uppercase()
            && prev.is_some_and(|p| p.is_ascii_lowercase() || p.is_ascii_digit())
        {
            out.push('_');
        }
        out.push(c);
        prev = Some(c);
    }
    out.to_lowercase()
}

/// Every piece of block text that may mention a type.
fn block_text(doc: &Document) -> Vec<&str> {
    let mut text = Vec::new();
    for behavior in &doc.behaviors {
        for rule in &behavior.rules {
            text.extend(rule.when.as_deref());
            text.extend(rule.then.as_deref());
            text.extend(rule.else_.as_deref());
            text.push(rule.raw_text.as_str());
        }
    }
    for procedure in &doc.procedures {
        for step in &procedure.steps {
            text.push(step.body.as_str());
        }
    }
    for block in doc.blocks() {
        for error in block.errors {
            text.extend(error.when.as_deref());
            text.extend(error.message.as_deref());
        }
        for example in block.examples {
            text.push(example.input.as_str());
            text.push(example.expected.as_str());
        }
    }
    text.retain(|t| !t.is_empty());
    text
}

/// Case-insensitive whole-word matcher for a type name.
fn name_matcher(name: &str) -> Option<regex::Regex> {
    regex::RegexBuilder::new(&format!(r"\b{}\b", regex::escape(name)))
        .case_insensitive(true)
        .build()
        .ok()
}

pub fn check_types(doc: &Document) -> Vec<Diagnostic> {
    let mut out = Vec::new();
    if doc.types.is_empty() {
        return out;
    }

    let mut by_name: HashMap<String, &TypeDecl> = HashMap::new();
    for decl in &doc.types {
        by_name.insert(decl.name.to_lowercase(), decl);
        by_name.insert(pascal_to_snake(&decl.name), decl);
    }

    let text = block_text(doc);
    let mut referenced: BTreeSet<String> = BTreeSet::new();
    let mut seen: BTreeSet<(&str, &str)> = BTreeSet::new();

    for chunk in &text {
        for caps in field_ref_re().captures_iter(chunk) {
            let (Some(t), Some(f)) = (caps.get(1), caps.get(2)) else {
                continue;
            };
            let (type_part, field_part) = (t.as_str(), f.as_str());
            if IGNORED_FIELDS.contains(&field_part) || IGNORED_TYPES.contains(&type_part) {
                continue;
            }
            referenced.insert(type_part.to_owned());
            if !seen.insert((type_part, field_part)) {
                continue;
            }

            match by_name.get(type_part) {
                None => out.push(Diagnostic::warn(
                    Category::TypeConsistency,
                    format!(
                        "Referenced type '{type_part}' not found in Types section \
                         (from '{type_part}.{field_part}')"
                    ),
                )),
                Some(decl) if !decl.has_field(field_part) => out.push(
                    Diagnostic::warn(
                        Category::TypeConsistency,
                        format!(
                            "{type_part}.{field_part} \u{2014} field '{field_part}' not found \
                             in type '{}'",
                            decl.name
                        ),
                    )
                    .at(decl.line),
                ),
                Some(_) => {}
            }
        }
    }

    // Bare type names in Inputs/Outputs and in block text.
    let io_lines = doc
        .section_lines(SectionKind::Inputs)
        .iter()
        .chain(doc.section_lines(SectionKind::Outputs))
        .map(|l| l.text.as_str());
    let haystack: Vec<&str> = io_lines.chain(text.iter().copied()).collect();
    for decl in &doc.types {
        let Some(re) = name_matcher(&decl.name) else {
            continue;
        };
        if haystack.iter().any(|line| re.is_match(line)) {
            referenced.insert(decl.name.to_lowercase());
        }
    }

    let is_referenced = |decl: &TypeDecl| {
        referenced.contains(&decl.name.to_lowercase())
            || referenced.contains(&pascal_to_snake(&decl.name))
    };

    let mut used = 0;
    for decl in &doc.types {
        if is_referenced(decl) {
            used += 1;
        } else {
            out.push(
                Diagnostic::warn(
                    Category::TypeConsistency,
                    format!("Type '{}' defined but never referenced", decl.name),
                )
                .at(decl.line),
            );
        }
    }

    if used > 0 {
        out.insert(
            0,
            Diagnostic::pass(
                Category::TypeConsistency,
                format!(
                    "{used} of {} defined type(s) are referenced",
                    doc.types.len()
                ),
            ),
        );
    }
    out
}
