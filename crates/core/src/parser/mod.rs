//! Block parser: a line-oriented state machine from preprocessed lines to
//! a [`Document`].
//!
//! The parser keeps the active section plus a small stack of open frames
//! (block, sub-block, type). The [`ParseContext`] is derived from both and
//! selects the transition function for each line. Closing a frame moves it
//! into its parent, so closing a block flushes its open sub-block first.
//!
//! Parsing never fails. Lines that match nothing are kept as raw section
//! text.

mod body;
mod frame;

pub use frame::ParseContext;

use crate::ast::{BlockKind, Document, SectionLine, TypeDecl, TypeField};
use crate::grammar::{self, Grammar, SectionKind, SubBlockKind};
use crate::meta;
use crate::preprocess::{preprocess, NumberedLine};
use frame::Frame;
use tracing::{debug, trace};

/// Parse SESF text with the standard grammar.
pub fn parse(text: &str) -> Document {
    parse_with_grammar(text, &Grammar::sesf())
}

/// Parse SESF text with a caller-supplied grammar table.
pub fn parse_with_grammar(text: &str, grammar: &Grammar) -> Document {
    let lines = preprocess(text);
    let mut parser = BlockParser::new(grammar);
    for line in &lines {
        if parser.feed(line) == Flow::Stop {
            debug!(line = line.number, "document separator, parsing stopped");
            break;
        }
    }
    parser.finish()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Stop,
}

struct BlockParser<'g> {
    grammar: &'g Grammar,
    doc: Document,
    section: Option<SectionKind>,
    stack: Vec<Frame>,
}

impl<'g> BlockParser<'g> {
    fn new(grammar: &'g Grammar) -> Self {
        BlockParser {
            grammar,
            doc: Document::default(),
            section: None,
            stack: Vec::new(),
        }
    }

    fn finish(mut self) -> Document {
        self.close_all();
        self.doc
    }

    fn context(&self) -> ParseContext {
        if let Some(frame) = self.stack.last() {
            return frame.context();
        }
        match self.section {
            None => ParseContext::TopLevel,
            Some(SectionKind::Meta) => ParseContext::Meta,
            Some(SectionKind::Types) => ParseContext::Types,
            Some(SectionKind::Functions) => ParseContext::Functions,
            Some(SectionKind::Precedence) => ParseContext::Precedence,
            Some(other) => ParseContext::Section(other),
        }
    }

    fn feed(&mut self, line: &NumberedLine<'_>) -> Flow {
        let raw = line.text.trim_end();
        let trimmed = raw.trim();
        let number = line.number;

        if trimmed.is_empty() {
            if let Some(kind) = self.section {
                self.record(kind, number, "");
            }
            return Flow::Continue;
        }

        if trimmed == "---" && (!self.doc.title.is_empty() || !self.doc.meta.is_empty()) {
            return Flow::Stop;
        }

        if self.doc.title.is_empty() && self.try_title(trimmed) {
            return Flow::Continue;
        }

        let indented = raw.starts_with([' ', '\t']);

        if !indented {
            if let Some((kind, rest)) = self.grammar.section_header(trimmed) {
                self.enter_section(kind, rest);
                return Flow::Continue;
            }
        }

        if let Some((kind, name)) = self.grammar.block_opener(trimmed) {
            self.open_block(kind, name, number, trimmed);
            return Flow::Continue;
        }

        if !indented && self.grammar.is_precedence_header(trimmed) {
            self.enter_section(SectionKind::Precedence, "");
            return Flow::Continue;
        }

        match self.context() {
            ParseContext::TopLevel => {}
            ParseContext::Meta => self.meta_line(number, trimmed),
            ParseContext::Types | ParseContext::Type => self.types_line(number, trimmed),
            ParseContext::Functions => self.functions_line(number, trimmed),
            ParseContext::Precedence => self.precedence_line(number, trimmed),
            ParseContext::Section(kind) => self.record(kind, number, trimmed),
            ParseContext::Block(_) | ParseContext::SubBlock(_) => {
                self.block_line(number, trimmed)
            }
        }
        Flow::Continue
    }

    // -- Title ----------------------------------------------------

    fn try_title(&mut self, trimmed: &str) -> bool {
        if trimmed.starts_with('#') {
            let title = trimmed.trim_start_matches('#').trim();
            if !title.is_empty() {
                self.doc.title = title.to_owned();
                return true;
            }
        }
        if self.section.is_some() {
            return false;
        }
        let is_meta_line = trimmed
            .get(..4)
            .is_some_and(|head| head.eq_ignore_ascii_case("meta"));
        if self.grammar.is_section_keyword(trimmed) || is_meta_line || trimmed.starts_with('*') {
            return false;
        }
        self.doc.title = trimmed.to_owned();
        true
    }

    // -- Section and block transitions ----------------------------

    fn enter_section(&mut self, kind: SectionKind, rest: &str) {
        self.close_all();
        debug!(section = %kind, "entering section");
        self.section = Some(kind);
        self.doc.sections.entry(kind).or_default();
        if kind == SectionKind::Meta && !rest.is_empty() {
            self.doc.meta.extend(meta::parse_pipe_line(rest));
        }
    }

    fn open_block(&mut self, kind: BlockKind, name: &str, number: u32, trimmed: &str) {
        self.close_all();
        let section = match kind {
            BlockKind::Behavior => SectionKind::Behaviors,
            BlockKind::Procedure => SectionKind::Procedures,
        };
        debug!(block = kind.keyword(), name, line = number, "opening block");
        self.section = Some(section);
        self.record(section, number, trimmed);
        self.stack.push(Frame::block(kind, name, number));
    }

    // -- Per-context transitions ----------------------------------

    fn meta_line(&mut self, number: u32, trimmed: &str) {
        self.record(SectionKind::Meta, number, trimmed);
        if trimmed.contains('|') {
            self.doc.meta.extend(meta::parse_pipe_line(trimmed));
        } else if let Some((key, value)) = meta::parse_bullet_line(trimmed) {
            self.doc.meta.insert(key, value);
        }
    }

    fn types_line(&mut self, number: u32, trimmed: &str) {
        self.record(SectionKind::Types, number, trimmed);

        if let Some(name) = grammar::type_opener(trimmed) {
            self.close_all();
            trace!(name, line = number, "opening type");
            self.stack.push(Frame::Type(TypeDecl::new(name, number)));
            return;
        }

        if trimmed == "}" {
            self.close_all();
            return;
        }
        let Some(Frame::Type(decl)) = self.stack.last_mut() else {
            return;
        };
        if let Some(field) = grammar::field_line(trimmed) {
            let required = !field
                .qualifier
                .unwrap_or("required")
                .to_lowercase()
                .contains("optional");
            decl.fields.push(TypeField {
                name: field.name.to_owned(),
                type_str: field.type_str.to_owned(),
                required,
            });
        }
    }

    fn functions_line(&mut self, number: u32, trimmed: &str) {
        self.record(SectionKind::Functions, number, trimmed);
        if let Some(name) = self.grammar.function_decl(trimmed) {
            self.doc.functions.push(name.to_owned());
        } else if let Some(name) = self.grammar.action_decl(trimmed) {
            self.doc.actions.push(name.to_owned());
        }
    }

    fn precedence_line(&mut self, number: u32, trimmed: &str) {
        self.record(SectionKind::Precedence, number, trimmed);
        if let Some(name) = grammar::precedence_entry(trimmed) {
            self.doc.precedence.push(name.to_owned());
        }
    }

    fn block_line(&mut self, number: u32, trimmed: &str) {
        if let Some(section) = self.section {
            self.record(section, number, trimmed);
        }
        let Some(block) = self.current_block_kind() else {
            return;
        };

        if let Some((kind, name)) = self.grammar.sub_block_opener(block, trimmed) {
            self.close_sub_block();
            trace!(?kind, name, line = number, "opening sub-block");
            let mut frame = Frame::sub_block(kind, name, number);
            if let (SubBlockKind::Rule, Frame::Rule(rule)) = (kind, &mut frame) {
                rule.priority = body::inline_priority(trimmed);
            }
            self.stack.push(frame);
            return;
        }

        match self.stack.last_mut() {
            Some(Frame::Rule(rule)) => body::rule_line(rule, trimmed),
            Some(Frame::Error(error)) => body::error_line(error, trimmed),
            Some(Frame::Example(example)) => body::example_line(example, trimmed),
            Some(Frame::Step(step)) => body::step_line(step, trimmed),
            _ => {}
        }
    }

    // -- Frame stack ----------------------------------------------

    fn current_block_kind(&self) -> Option<BlockKind> {
        self.stack.iter().rev().find_map(Frame::block_kind)
    }

    fn record(&mut self, kind: SectionKind, line: u32, text: &str) {
        self.doc.sections.entry(kind).or_default().push(SectionLine {
            line,
            text: text.to_owned(),
        });
    }

    fn close_sub_block(&mut self) {
        if self.stack.last().is_some_and(Frame::is_sub_block) {
            self.close_frame();
        }
    }

    fn close_all(&mut self) {
        while !self.stack.is_empty() {
            self.close_frame();
        }
    }

    /// Pop the top frame and attach it to its parent.
    fn close_frame(&mut self) {
        let Some(frame) = self.stack.pop() else {
            return;
        };
        trace!(name = frame.name(), context = ?frame.context(), "closing frame");
        let parent = self.stack.last_mut();
        match (frame, parent) {
            (Frame::Rule(rule), Some(Frame::Behavior(b))) => b.rules.push(rule),
            (Frame::Error(error), Some(Frame::Behavior(b))) => b.errors.push(error),
            (Frame::Error(error), Some(Frame::Procedure(p))) => p.errors.push(error),
            (Frame::Example(example), Some(Frame::Behavior(b))) => b.examples.push(example),
            (Frame::Example(example), Some(Frame::Procedure(p))) => p.examples.push(example),
            (Frame::Step(step), Some(Frame::Procedure(p))) => p.steps.push(step),
            (Frame::Behavior(b), None) => self.doc.behaviors.push(b),
            (Frame::Procedure(p), None) => self.doc.procedures.push(p),
            (Frame::Type(t), None) => self.doc.types.push(t),
            (orphan, _) => {
                debug!(name = orphan.name(), "dropping frame with no valid parent");
            }
        }
    }
}
