//! Open-frame stack entries and the parse context derived from them.

use crate::ast::{Behavior, BlockKind, ErrorDecl, Example, Procedure, Rule, Step, TypeDecl};
use crate::grammar::{SectionKind, SubBlockKind};

/// Where the parser currently is. Each context has its own transition
/// function in the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseContext {
    /// Before any section header.
    TopLevel,
    Meta,
    Types,
    /// Inside a `Name { ... }` declaration.
    Type,
    Functions,
    Precedence,
    /// Any other section; lines are kept as raw text.
    Section(SectionKind),
    Block(BlockKind),
    SubBlock(SubBlockKind),
}

/// An entity under construction. Closing a frame moves it into its parent
/// frame (or the document for blocks and types).
#[derive(Debug)]
pub(super) enum Frame {
    Behavior(Behavior),
    Procedure(Procedure),
    Rule(Rule),
    Error(ErrorDecl),
    Example(Example),
    Step(Step),
    Type(TypeDecl),
}

impl Frame {
    pub(super) fn sub_block(kind: SubBlockKind, name: &str, line: u32) -> Frame {
        let name = name.to_owned();
        match kind {
            SubBlockKind::Rule => Frame::Rule(Rule {
                name,
                line,
                ..Default::default()
            }),
            SubBlockKind::Error => Frame::Error(ErrorDecl {
                name,
                line,
                ..Default::default()
            }),
            SubBlockKind::Example => Frame::Example(Example {
                name,
                line,
                ..Default::default()
            }),
            SubBlockKind::Step => Frame::Step(Step {
                name,
                line,
                ..Default::default()
            }),
        }
    }

    pub(super) fn block(kind: BlockKind, name: &str, line: u32) -> Frame {
        match kind {
            BlockKind::Behavior => Frame::Behavior(Behavior {
                name: name.to_owned(),
                line,
                ..Default::default()
            }),
            BlockKind::Procedure => Frame::Procedure(Procedure {
                name: name.to_owned(),
                line,
                ..Default::default()
            }),
        }
    }

    pub(super) fn context(&self) -> ParseContext {
        match self {
            Frame::Behavior(_) => ParseContext::Block(BlockKind::Behavior),
            Frame::Procedure(_) => ParseContext::Block(BlockKind::Procedure),
            Frame::Rule(_) => ParseContext::SubBlock(SubBlockKind::Rule),
            Frame::Error(_) => ParseContext::SubBlock(SubBlockKind::Error),
            Frame::Example(_) => ParseContext::SubBlock(SubBlockKind::Example),
            Frame::Step(_) => ParseContext::SubBlock(SubBlockKind::Step),
            Frame::Type(_) => ParseContext::Type,
        }
    }

    pub(super) fn is_sub_block(&self) -> bool {
        matches!(self.context(), ParseContext::SubBlock(_))
    }

    pub(super) fn block_kind(&self) -> Option<BlockKind> {
        match self {
            Frame::Behavior(_) => Some(BlockKind::Behavior),
            Frame::Procedure(_) => Some(BlockKind::Procedure),
            _ => None,
        }
    }

    pub(super) fn name(&self) -> &str {
        match self {
            Frame::Behavior(b) => &b.name,
            Frame::Procedure(p) => &p.name,
            Frame::Rule(r) => &r.name,
            Frame::Error(e) => &e.name,
            Frame::Example(e) => &e.name,
            Frame::Step(s) => &s.name,
            Frame::Type(t) => &t.name,
        }
    }
}
