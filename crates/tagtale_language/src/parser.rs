//! Line parser for rule source.
//!
//! The grammar is line-oriented:
//! - `### desc` starts a new rule (and finishes the previous one)
//! - `> text` appends a narrative template
//! - `->` on its own switches from precondition to postcondition
//! - anything else is a constraint line of whitespace-separated tokens:
//!   `+tag` is required, `-tag` is forbidden, a bare token is a bind.
//!   One bind makes a tag constraint, two make a relation constraint.
//!
//! Lines before the first `###` are a free-form preamble and are skipped.

use tagtale_foundation::{Error, Result};

use crate::ast::{Condition, Constraint, RelConstraint, Rule, TagConstraint};
use crate::span::Span;
use crate::template::Template;

const RULE_MARKER: &str = "###";
const TEXT_MARKER: char = '>';
const POST_MARKER: &str = "->";

/// The tokens of one constraint line, split by prefix.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConstraintLine {
    /// Bare tokens, in order.
    pub binds: Vec<String>,
    /// `+`-prefixed tokens without the prefix.
    pub required: Vec<String>,
    /// `-`-prefixed tokens without the prefix.
    pub forbidden: Vec<String>,
}

/// Splits a constraint line into binds, required tags, and forbidden tags.
///
/// # Errors
/// Returns a grammar error for a lone `+` or `-` token.
pub fn tokenize_constraint(line: &str, line_no: u32) -> Result<ConstraintLine> {
    let mut tokens = ConstraintLine::default();
    for token in line.split_whitespace() {
        if let Some(tag) = token.strip_prefix('+') {
            tokens.required.push(tag_name(tag, line, line_no)?);
        } else if let Some(tag) = token.strip_prefix('-') {
            tokens.forbidden.push(tag_name(tag, line, line_no)?);
        } else {
            tokens.binds.push(token.to_string());
        }
    }
    Ok(tokens)
}

fn tag_name(tag: &str, line: &str, line_no: u32) -> Result<String> {
    if tag.is_empty() {
        return Err(Error::grammar(line_no, "empty tag name", line));
    }
    Ok(tag.to_string())
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Section {
    Pre,
    Post,
}

/// Incremental rule parser; feed it lines, then finish.
struct RuleParser {
    rules: Vec<Rule>,
    current: Option<Rule>,
    section: Section,
}

impl RuleParser {
    fn new() -> Self {
        Self {
            rules: Vec::new(),
            current: None,
            section: Section::Pre,
        }
    }

    fn line(&mut self, line_no: u32, line: &str) -> Result<()> {
        if let Some(desc) = line.strip_prefix(RULE_MARKER) {
            self.flush();
            let mut rule = Rule::new(desc.trim());
            rule.span = Span::of_line(line_no, line);
            self.current = Some(rule);
            self.section = Section::Pre;
            return Ok(());
        }

        // Preamble before the first rule.
        let Some(rule) = self.current.as_mut() else {
            return Ok(());
        };

        if let Some(text) = line.strip_prefix(TEXT_MARKER) {
            let template = Template::parse(text.trim()).map_err(|e| e.at_line(line_no, line))?;
            rule.texts.push(template);
            return Ok(());
        }

        if line.trim() == POST_MARKER {
            self.section = Section::Post;
            return Ok(());
        }

        let tokens = tokenize_constraint(line, line_no)?;
        if tokens == ConstraintLine::default() {
            return Ok(());
        }

        let constraint = constraint(tokens, line_no, line)?;
        let condition: &mut Condition = match self.section {
            Section::Pre => &mut rule.pre,
            Section::Post => &mut rule.post,
        };
        condition.constraints.push(constraint);
        Ok(())
    }

    fn flush(&mut self) {
        if let Some(rule) = self.current.take() {
            self.rules.push(rule);
        }
    }

    fn finish(mut self) -> Vec<Rule> {
        self.flush();
        self.rules
    }
}

fn constraint(tokens: ConstraintLine, line_no: u32, line: &str) -> Result<Constraint> {
    let ConstraintLine {
        mut binds,
        required,
        forbidden,
    } = tokens;

    match binds.len() {
        1 => Ok(Constraint::Tag(TagConstraint {
            bind: binds.remove(0),
            required,
            forbidden,
        })),
        2 => {
            if !forbidden.is_empty() {
                return Err(Error::grammar(
                    line_no,
                    "relation constraints cannot forbid tags",
                    line,
                ));
            }
            if required.is_empty() {
                return Err(Error::grammar(
                    line_no,
                    "relation constraint names no relation tag",
                    line,
                ));
            }
            let target = binds.remove(1);
            let source = binds.remove(0);
            Ok(Constraint::Rel(RelConstraint {
                source,
                target,
                tags: required,
            }))
        }
        n => Err(Error::grammar(
            line_no,
            format!("expected 1 or 2 binds, found {n}"),
            line,
        )),
    }
}

/// Parses rule source lines into rules, in source order.
///
/// Parsing is purely structural: a rule without templates parses fine and
/// is only rejected by [`crate::validate`].
///
/// # Errors
/// Returns a grammar error naming the first malformed line.
pub fn parse<I, S>(lines: I) -> Result<Vec<Rule>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut parser = RuleParser::new();
    for (idx, line) in lines.into_iter().enumerate() {
        let line_no = u32::try_from(idx + 1).unwrap_or(u32::MAX);
        parser.line(line_no, line.as_ref())?;
    }
    Ok(parser.finish())
}

/// Parses rule source text.
///
/// # Errors
/// Returns a grammar error naming the first malformed line.
pub fn parse_str(source: &str) -> Result<Vec<Rule>> {
    parse(source.lines())
}
