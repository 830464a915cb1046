//! Document model for parsed SESF specifications.
//!
//! These types are produced by the parser and consumed read-only by every
//! checker in `sesf-analyze`. They live here so that checker modules can
//! import them without depending on the parser.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::grammar::SectionKind;

// ──────────────────────────────────────────────
// Sections
// ──────────────────────────────────────────────

/// One raw line recorded under a section, with its source line number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionLine {
    pub line: u32,
    pub text: String,
}

// ──────────────────────────────────────────────
// Types block
// ──────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeField {
    pub name: String,
    pub type_str: String,
    pub required: bool,
}

/// A `Name { ... }` declaration from the Types section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeDecl {
    pub name: String,
    pub fields: Vec<TypeField>,
    pub line: u32,
}

impl TypeDecl {
    pub fn new(name: impl Into<String>, line: u32) -> Self {
        TypeDecl {
            name: name.into(),
            fields: Vec::new(),
            line,
        }
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.fields.iter().any(|f| f.name.eq_ignore_ascii_case(name))
    }
}

// ──────────────────────────────────────────────
// Sub-blocks
// ──────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Rule {
    pub name: String,
    pub when: Option<String>,
    pub then: Option<String>,
    #[serde(rename = "else")]
    pub else_: Option<String>,
    pub priority: Option<i64>,
    /// Every body line, newline-terminated, in file order.
    pub raw_text: String,
    pub line: u32,
}

/// An `ERROR` sub-block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ErrorDecl {
    pub name: String,
    pub when: Option<String>,
    pub severity: Option<String>,
    pub action: Option<String>,
    pub message: Option<String>,
    pub line: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Example {
    pub name: String,
    pub input: String,
    pub expected: String,
    pub notes: Option<String>,
    pub line: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Step {
    pub name: String,
    pub body: String,
    pub line: u32,
}

// ──────────────────────────────────────────────
// Blocks
// ──────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Behavior {
    pub name: String,
    pub rules: Vec<Rule>,
    pub errors: Vec<ErrorDecl>,
    pub examples: Vec<Example>,
    pub line: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Procedure {
    pub name: String,
    pub steps: Vec<Step>,
    pub errors: Vec<ErrorDecl>,
    pub examples: Vec<Example>,
    pub line: u32,
}

/// Which kind of top-level block a [`BlockView`] was taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BlockKind {
    Behavior,
    Procedure,
}

impl BlockKind {
    /// Opening keyword as written in a spec.
    pub fn keyword(self) -> &'static str {
        match self {
            BlockKind::Behavior => "BEHAVIOR",
            BlockKind::Procedure => "PROCEDURE",
        }
    }

    /// Plural noun for the body entries: rules for behaviors, steps for
    /// procedures.
    pub fn units(self) -> &'static str {
        match self {
            BlockKind::Behavior => "rules",
            BlockKind::Procedure => "steps",
        }
    }
}

/// Uniform read-only view over a Behavior or a Procedure.
///
/// Error and example checks treat both block kinds alike, with rules and
/// steps playing the same role.
#[derive(Debug, Clone, Copy)]
pub struct BlockView<'a> {
    pub kind: BlockKind,
    pub name: &'a str,
    pub line: u32,
    /// Number of RULE (behavior) or STEP (procedure) entries.
    pub unit_count: usize,
    pub errors: &'a [ErrorDecl],
    pub examples: &'a [Example],
}

impl<'a> BlockView<'a> {
    /// `BEHAVIOR 'name'` / `PROCEDURE 'name'`, used in diagnostic messages.
    pub fn label(&self) -> String {
        format!("{} '{}'", self.kind.keyword(), self.name)
    }
}

// ──────────────────────────────────────────────
// Document
// ──────────────────────────────────────────────

/// A fully parsed SESF document. Built once by the parser.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Document {
    pub title: String,
    /// Meta fields, keys lower-cased.
    pub meta: BTreeMap<String, String>,
    pub sections: BTreeMap<SectionKind, Vec<SectionLine>>,
    pub types: Vec<TypeDecl>,
    pub functions: Vec<String>,
    pub actions: Vec<String>,
    pub behaviors: Vec<Behavior>,
    pub procedures: Vec<Procedure>,
    /// Rule names from the PRECEDENCE block, in file order.
    pub precedence: Vec<String>,
}

impl Document {
    pub fn meta_value(&self, key: &str) -> Option<&str> {
        self.meta.get(key).map(String::as_str)
    }

    pub fn has_section(&self, kind: SectionKind) -> bool {
        self.sections.contains_key(&kind)
    }

    pub fn section_lines(&self, kind: SectionKind) -> &[SectionLine] {
        self.sections.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    /// True when at least one BEHAVIOR or PROCEDURE block was parsed.
    pub fn has_blocks(&self) -> bool {
        !self.behaviors.is_empty() || !self.procedures.is_empty()
    }

    /// Behaviors first, then procedures, each in file order.
    pub fn blocks(&self) -> impl Iterator<Item = BlockView<'_>> {
        let behaviors = self.behaviors.iter().map(|b| BlockView {
            kind: BlockKind::Behavior,
            name: &b.name,
            line: b.line,
            unit_count: b.rules.len(),
            errors: &b.errors,
            examples: &b.examples,
        });
        let procedures = self.procedures.iter().map(|p| BlockView {
            kind: BlockKind::Procedure,
            name: &p.name,
            line: p.line,
            unit_count: p.steps.len(),
            errors: &p.errors,
            examples: &p.examples,
        });
        behaviors.chain(procedures)
    }

    /// All rules across all behaviors, paired with the owning behavior name.
    pub fn rules(&self) -> impl Iterator<Item = (&str, &Rule)> {
        self.behaviors
            .iter()
            .flat_map(|b| b.rules.iter().map(move |r| (b.name.as_str(), r)))
    }
}
