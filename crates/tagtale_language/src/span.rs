//! Source location tracking.

/// Where a rule starts in its source text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Span {
    /// 1-based line number.
    pub line: u32,
    /// 1-based column of the first non-blank character.
    pub column: u32,
}

impl Span {
    /// Creates a new span.
    #[must_use]
    pub const fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }

    /// Creates a span for a source line, locating its first non-blank
    /// character.
    #[must_use]
    pub fn of_line(line: u32, text: &str) -> Self {
        let leading = text.chars().take_while(|c| c.is_whitespace()).count();
        let column = u32::try_from(leading + 1).unwrap_or(u32::MAX);
        Self { line, column }
    }
}
