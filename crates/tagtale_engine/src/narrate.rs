//! Narration: template choice, rendering, and output sinks.

use std::io::Write;

use rand::Rng;
use rand::seq::SliceRandom;
use tagtale_foundation::{Error, Result};
use tagtale_language::Template;
use tagtale_storage::World;

use crate::pattern::Bindings;
use crate::rule::CompiledRule;

/// Where narrative lines go.
pub trait NarrativeSink {
    /// Emits one line of narrative.
    ///
    /// # Errors
    /// Returns an error if the line cannot be written.
    fn emit(&mut self, line: &str) -> Result<()>;
}

impl NarrativeSink for Vec<String> {
    fn emit(&mut self, line: &str) -> Result<()> {
        self.push(line.to_string());
        Ok(())
    }
}

/// A sink writing one line per emission to any [`Write`].
#[derive(Debug)]
pub struct WriterSink<W: Write> {
    writer: W,
}

impl<W: Write> WriterSink<W> {
    /// Wraps a writer.
    #[must_use]
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Returns the wrapped writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> NarrativeSink for WriterSink<W> {
    fn emit(&mut self, line: &str) -> Result<()> {
        writeln!(self.writer, "{line}")?;
        Ok(())
    }
}

/// Chooses and renders narrative templates.
pub struct Narrator;

impl Narrator {
    /// Picks one of `rule`'s templates uniformly at random.
    ///
    /// # Errors
    /// Returns `NoTemplate` if the rule has none.
    pub fn choose<'r, R: Rng + ?Sized>(rule: &'r CompiledRule, rng: &mut R) -> Result<&'r Template> {
        rule.texts
            .choose(rng)
            .ok_or_else(|| Error::no_template(&rule.desc))
    }

    /// Renders `template`, replacing each placeholder with the bound
    /// entity's name.
    #[must_use]
    pub fn render(template: &Template, bindings: &Bindings, world: &World) -> String {
        template.render(|bind| bindings.get(bind).and_then(|id| world.entity_name(id)))
    }
}
