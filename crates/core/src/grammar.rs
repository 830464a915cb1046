//! SESF grammar table: section vocabulary, block openers, and the small
//! line matchers the block parser is built from.
//!
//! The parser never consults module-level keyword sets. It receives a
//! [`Grammar`] value, so tests can exercise the state machine against a
//! reduced or extended vocabulary.

use serde::Serialize;

use crate::ast::BlockKind;

// ──────────────────────────────────────────────
// Sections
// ──────────────────────────────────────────────

/// A top-level section of a document.
///
/// Variant order is the conventional order of sections in a spec and is
/// the iteration order of `Document::sections`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Meta,
    Purpose,
    Audience,
    Scope,
    Inputs,
    Outputs,
    Types,
    Functions,
    Behaviors,
    /// Never written as a header; PROCEDURE blocks record into it.
    Procedures,
    Precedence,
    Constraints,
    Dependencies,
    Changelog,
}

impl SectionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            SectionKind::Meta => "meta",
            SectionKind::Purpose => "purpose",
            SectionKind::Audience => "audience",
            SectionKind::Scope => "scope",
            SectionKind::Inputs => "inputs",
            SectionKind::Outputs => "outputs",
            SectionKind::Types => "types",
            SectionKind::Functions => "functions",
            SectionKind::Behaviors => "behaviors",
            SectionKind::Procedures => "procedures",
            SectionKind::Precedence => "precedence",
            SectionKind::Constraints => "constraints",
            SectionKind::Dependencies => "dependencies",
            SectionKind::Changelog => "changelog",
        }
    }

    /// Capitalized form used in diagnostics (`Purpose`, `Meta`).
    pub fn label(self) -> String {
        let name = self.as_str();
        let mut chars = name.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

impl std::fmt::Display for SectionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ──────────────────────────────────────────────
// Sub-blocks
// ──────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubBlockKind {
    Rule,
    Error,
    Example,
    Step,
}

// ──────────────────────────────────────────────
// Grammar table
// ──────────────────────────────────────────────

/// Keyword table consumed by the block parser.
#[derive(Debug, Clone)]
pub struct Grammar {
    /// Header keyword (lower-case) -> section.
    sections: Vec<(&'static str, SectionKind)>,
    /// Opening keyword -> block kind.
    blocks: Vec<(&'static str, BlockKind)>,
    behavior_sub_blocks: Vec<(&'static str, SubBlockKind)>,
    procedure_sub_blocks: Vec<(&'static str, SubBlockKind)>,
    precedence_keyword: &'static str,
    function_keyword: &'static str,
    action_keyword: &'static str,
}

impl Default for Grammar {
    fn default() -> Self {
        Self::sesf()
    }
}

impl Grammar {
    /// The standard SESF vocabulary.
    pub fn sesf() -> Self {
        Grammar {
            sections: vec![
                ("meta", SectionKind::Meta),
                ("purpose", SectionKind::Purpose),
                ("scope", SectionKind::Scope),
                ("inputs", SectionKind::Inputs),
                ("outputs", SectionKind::Outputs),
                ("types", SectionKind::Types),
                ("functions", SectionKind::Functions),
                ("behaviors", SectionKind::Behaviors),
                ("precedence", SectionKind::Precedence),
                ("constraints", SectionKind::Constraints),
                ("dependencies", SectionKind::Dependencies),
                ("changelog", SectionKind::Changelog),
                ("audience", SectionKind::Audience),
            ],
            blocks: vec![
                ("BEHAVIOR", BlockKind::Behavior),
                ("PROCEDURE", BlockKind::Procedure),
            ],
            behavior_sub_blocks: vec![
                ("RULE", SubBlockKind::Rule),
                ("ERROR", SubBlockKind::Error),
                ("EXAMPLE", SubBlockKind::Example),
            ],
            procedure_sub_blocks: vec![
                ("STEP", SubBlockKind::Step),
                ("ERROR", SubBlockKind::Error),
                ("EXAMPLE", SubBlockKind::Example),
            ],
            precedence_keyword: "PRECEDENCE",
            function_keyword: "FUNCTION",
            action_keyword: "ACTION",
        }
    }

    /// Drop a section keyword from the vocabulary. Lines spelling it are
    /// then treated as ordinary content.
    pub fn without_section(mut self, kind: SectionKind) -> Self {
        self.sections.retain(|(_, k)| *k != kind);
        self
    }

    /// Is `keyword` (any case) a recognised section header word?
    pub fn is_section_keyword(&self, keyword: &str) -> bool {
        let low = keyword.to_lowercase();
        let low = low.trim_end_matches(':');
        self.sections.iter().any(|(k, _)| *k == low)
    }

    /// Match a trimmed line against the section vocabulary.
    ///
    /// Accepts `Keyword` and `Keyword:` in any case. The meta section also
    /// accepts trailing content (`Meta: Version 1.0 | ...`); the content is
    /// returned alongside the kind.
    pub fn section_header<'a>(&self, trimmed: &'a str) -> Option<(SectionKind, &'a str)> {
        for (keyword, kind) in &self.sections {
            let Some(rest) = strip_prefix_ci(trimmed, keyword) else {
                continue;
            };
            if rest.is_empty() || rest == ":" {
                return Some((*kind, ""));
            }
            if *kind == SectionKind::Meta {
                if let Some(content) = rest.strip_prefix(':') {
                    return Some((*kind, content.trim()));
                }
            }
        }
        None
    }

    /// `BEHAVIOR <name>:` / `PROCEDURE <name>:`.
    pub fn block_opener<'a>(&self, trimmed: &'a str) -> Option<(BlockKind, &'a str)> {
        self.blocks
            .iter()
            .find_map(|(kw, kind)| keyword_name(trimmed, kw, ':').map(|name| (*kind, name)))
    }

    /// Sub-block opener valid inside a block of the given kind.
    pub fn sub_block_opener<'a>(
        &self,
        block: BlockKind,
        trimmed: &'a str,
    ) -> Option<(SubBlockKind, &'a str)> {
        let table = match block {
            BlockKind::Behavior => &self.behavior_sub_blocks,
            BlockKind::Procedure => &self.procedure_sub_blocks,
        };
        table
            .iter()
            .find_map(|(kw, kind)| keyword_name(trimmed, kw, ':').map(|name| (*kind, name)))
    }

    /// `PRECEDENCE:` with optional trailing text.
    pub fn is_precedence_header(&self, trimmed: &str) -> bool {
        trimmed
            .strip_prefix(self.precedence_keyword)
            .is_some_and(|rest| rest.trim_start().starts_with(':'))
    }

    /// `FUNCTION <name>(`.
    pub fn function_decl<'a>(&self, trimmed: &'a str) -> Option<&'a str> {
        keyword_name(trimmed, self.function_keyword, '(')
    }

    /// `ACTION <name>(`.
    pub fn action_decl<'a>(&self, trimmed: &'a str) -> Option<&'a str> {
        keyword_name(trimmed, self.action_keyword, '(')
    }
}

// ──────────────────────────────────────────────
// Line matchers
// ──────────────────────────────────────────────

pub(crate) fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Split a leading run of word characters off `s`.
fn take_word(s: &str) -> (&str, &str) {
    let end = s.find(|c: char| !is_word_char(c)).unwrap_or(s.len());
    s.split_at(end)
}

/// Case-insensitive ASCII prefix strip.
pub(crate) fn strip_prefix_ci<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    let head = s.get(..prefix.len())?;
    if head.eq_ignore_ascii_case(prefix) {
        Some(&s[prefix.len()..])
    } else {
        None
    }
}

/// `KEYWORD <ws>+ <word> <ws>* <terminator>`; returns the word.
fn keyword_name<'a>(line: &'a str, keyword: &str, terminator: char) -> Option<&'a str> {
    let rest = line.strip_prefix(keyword)?;
    let after_ws = rest.trim_start();
    if after_ws.len() == rest.len() {
        return None;
    }
    let (name, tail) = take_word(after_ws);
    if name.is_empty() || !tail.trim_start().starts_with(terminator) {
        return None;
    }
    Some(name)
}

/// `Name {` opening a type declaration.
pub(crate) fn type_opener(trimmed: &str) -> Option<&str> {
    let (name, tail) = take_word(trimmed);
    if name.is_empty() || !tail.trim_start().starts_with('{') {
        return None;
    }
    Some(name)
}

/// `<digits>. <rule_name>` inside a PRECEDENCE block.
pub(crate) fn precedence_entry(trimmed: &str) -> Option<&str> {
    let digits_end = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(trimmed.len());
    if digits_end == 0 {
        return None;
    }
    let rest = trimmed[digits_end..].strip_prefix('.')?.trim_start();
    let (name, _) = take_word(rest);
    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}

/// A parsed `field: type[, qualifier]` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FieldLine<'a> {
    pub name: &'a str,
    pub type_str: &'a str,
    pub qualifier: Option<&'a str>,
}

/// Parse a type field line.
///
/// The qualifier is the text after the first comma that is followed by
/// exactly `required`, exactly `optional`, or `default:...` running to the
/// end of the line. Commas anywhere else belong to the type expression.
pub(crate) fn field_line(trimmed: &str) -> Option<FieldLine<'_>> {
    let (name, tail) = take_word(trimmed);
    if name.is_empty() {
        return None;
    }
    let rest = tail.trim_start().strip_prefix(':')?.trim_start();
    if rest.is_empty() {
        return None;
    }

    let mut type_part = rest;
    let mut qualifier = None;
    for (idx, _) in rest.match_indices(',').filter(|(idx, _)| *idx > 0) {
        let after = rest[idx + 1..].trim_start();
        if after == "required" || after == "optional" || after.starts_with("default:") {
            type_part = &rest[..idx];
            qualifier = Some(after);
            break;
        }
    }

    let type_str = type_part.trim().trim_end_matches(',').trim();
    if type_str.is_empty() {
        return None;
    }
    Some(FieldLine {
        name,
        type_str,
        qualifier,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn section_header_accepts_colon_and_case() {
        let g = Grammar::sesf();
        assert_eq!(g.section_header("Purpose"), Some((SectionKind::Purpose, "")));
        assert_eq!(g.section_header("SCOPE:"), Some((SectionKind::Scope, "")));
        assert_eq!(g.section_header("Purposeful"), None);
        assert_eq!(g.section_header("Scope: narrow"), None);
    }

    #[test]
    fn meta_header_keeps_trailing_content() {
        let g = Grammar::sesf();
        assert_eq!(
            g.section_header("Meta: Version 1.0 | Tier: micro"),
            Some((SectionKind::Meta, "Version 1.0 | Tier: micro"))
        );
    }

    #[test]
    fn without_section_removes_keyword() {
        let g = Grammar::sesf().without_section(SectionKind::Changelog);
        assert_eq!(g.section_header("Changelog"), None);
        assert!(!g.is_section_keyword("changelog"));
        assert!(g.is_section_keyword("Purpose:"));
        assert!(g.is_section_keyword("Purpose::"));
        assert!(!g.is_section_keyword("Purpose:x"));
    }

    #[test]
    fn block_opener_requires_name_and_colon() {
        let g = Grammar::sesf();
        assert_eq!(
            g.block_opener("BEHAVIOR validate_email: check things"),
            Some((BlockKind::Behavior, "validate_email"))
        );
        assert_eq!(
            g.block_opener("PROCEDURE run :"),
            Some((BlockKind::Procedure, "run"))
        );
        assert_eq!(g.block_opener("BEHAVIOR: nameless"), None);
        assert_eq!(g.block_opener("BEHAVIORS"), None);
        assert_eq!(g.block_opener("behavior lower:"), None);
    }

    #[test]
    fn sub_block_table_depends_on_block_kind() {
        let g = Grammar::sesf();
        assert_eq!(
            g.sub_block_opener(BlockKind::Behavior, "RULE r1:"),
            Some((SubBlockKind::Rule, "r1"))
        );
        assert_eq!(g.sub_block_opener(BlockKind::Procedure, "RULE r1:"), None);
        assert_eq!(
            g.sub_block_opener(BlockKind::Procedure, "STEP gather:"),
            Some((SubBlockKind::Step, "gather"))
        );
        assert_eq!(g.sub_block_opener(BlockKind::Behavior, "STEP gather:"), None);
    }

    #[test]
    fn function_and_action_declarations() {
        let g = Grammar::sesf();
        assert_eq!(
            g.function_decl("FUNCTION validate_order(order: Order) -> boolean"),
            Some("validate_order")
        );
        assert_eq!(g.action_decl("ACTION notify (x)"), Some("notify"));
        assert_eq!(g.function_decl("FUNCTION missing_paren"), None);
    }

    #[test]
    fn precedence_header_and_entries() {
        let g = Grammar::sesf();
        assert!(g.is_precedence_header("PRECEDENCE:"));
        assert!(g.is_precedence_header("PRECEDENCE : rules in order"));
        assert!(!g.is_precedence_header("PRECEDENCE rules"));
        assert_eq!(
            precedence_entry("1. fraud_check (from BEHAVIOR x)"),
            Some("fraud_check")
        );
        assert_eq!(precedence_entry("12.limit"), Some("limit"));
        assert_eq!(precedence_entry("- not numbered"), None);
    }

    #[test]
    fn field_line_qualifiers() {
        let f = field_line("id: string, required").unwrap();
        assert_eq!((f.name, f.type_str, f.qualifier), ("id", "string", Some("required")));

        let f = field_line("note: string, optional").unwrap();
        assert_eq!(f.qualifier, Some("optional"));

        let f = field_line("amount: number").unwrap();
        assert_eq!((f.type_str, f.qualifier), ("number", None));

        let f = field_line("lookup: map<string, int>, default: {}").unwrap();
        assert_eq!(f.type_str, "map<string, int>");
        assert_eq!(f.qualifier, Some("default: {}"));

        let f = field_line("tags: list of string, optional, default: []").unwrap();
        assert_eq!(f.type_str, "list of string, optional");
        assert_eq!(f.qualifier, Some("default: []"));

        assert!(field_line("no colon here").is_none());
        assert!(field_line("empty:").is_none());
    }

    #[test]
    fn type_opener_matches_brace() {
        assert_eq!(type_opener("PurchaseOrder {"), Some("PurchaseOrder"));
        assert_eq!(type_opener("Order{"), Some("Order"));
        assert_eq!(type_opener("Order"), None);
    }

    #[test]
    fn section_label_capitalizes() {
        assert_eq!(SectionKind::Dependencies.label(), "Dependencies");
    }
}
