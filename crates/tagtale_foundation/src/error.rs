//! Error types for tagtale.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.
//! Every variant except [`ErrorKind::LimitExceeded`] and [`ErrorKind::Io`]
//! is a load-time error: once a simulation is running, an empty match or a
//! superseded binding is a normal outcome, not an error.

use std::fmt;

use thiserror::Error;

/// Result alias used across the workspace.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for tagtale operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Creates a grammar error for a rule-source line.
    #[must_use]
    pub fn grammar(line: u32, message: impl Into<String>, context: impl Into<String>) -> Self {
        Self::new(ErrorKind::Grammar {
            message: message.into(),
            line,
            context: context.into(),
        })
    }

    /// Places a grammar error on `line_no` of the source, with `source_line`
    /// as the offending text. Other kinds are returned unchanged.
    #[must_use]
    pub fn at_line(mut self, line_no: u32, source_line: &str) -> Self {
        if let ErrorKind::Grammar { line, context, .. } = &mut self.kind {
            *line = line_no;
            *context = source_line.to_string();
        }
        self
    }

    /// Creates an error for a rule without narrative templates.
    #[must_use]
    pub fn no_template(rule: impl Into<String>) -> Self {
        Self::new(ErrorKind::NoTemplate { rule: rule.into() })
    }

    /// Creates an error for a bind used outside the precondition's scope.
    #[must_use]
    pub fn binding_scope(rule: impl Into<String>, bind: impl Into<String>) -> Self {
        Self::new(ErrorKind::BindingScope {
            rule: rule.into(),
            bind: bind.into(),
        })
    }

    /// Creates an unknown entity error.
    #[must_use]
    pub fn unknown_entity(name: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnknownEntity(name.into()))
    }

    /// Creates a duplicate entity error.
    #[must_use]
    pub fn duplicate_entity(name: impl Into<String>) -> Self {
        Self::new(ErrorKind::DuplicateEntity(name.into()))
    }

    /// Creates an activation limit error.
    #[must_use]
    pub fn limit_exceeded(limit: usize, found: usize) -> Self {
        Self::new(ErrorKind::LimitExceeded { limit, found })
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal(message.into()))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::new(ErrorKind::Io(err))
    }
}

/// Categorized error kinds.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// A rule or world source line could not be parsed.
    #[error("grammar error on line {line}: {message}")]
    Grammar {
        /// Description of the problem.
        message: String,
        /// Line number (1-indexed).
        line: u32,
        /// The offending source line.
        context: String,
    },

    /// A rule has no narrative template to choose from.
    #[error("rule '{rule}' has no narrative template")]
    NoTemplate {
        /// Description of the rule.
        rule: String,
    },

    /// A postcondition or template names a bind the precondition never binds.
    #[error("rule '{rule}' uses bind '{bind}' which its precondition does not bind")]
    BindingScope {
        /// Description of the rule.
        rule: String,
        /// The out-of-scope bind name.
        bind: String,
    },

    /// An entity name was referenced but never declared.
    #[error("unknown entity: {0}")]
    UnknownEntity(String),

    /// An entity name was declared twice.
    #[error("duplicate entity: {0}")]
    DuplicateEntity(String),

    /// The opt-in per-tick activation cap was exceeded.
    #[error("limit exceeded: {found} activations in one tick (max {limit})")]
    LimitExceeded {
        /// The configured limit.
        limit: usize,
        /// How many activations were found.
        found: usize,
    },

    /// Reading a source file failed.
    #[error("i/o error: {0}")]
    Io(std::io::Error),

    /// Internal error (should not happen).
    #[error("internal error: {0}")]
    Internal(String),
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Source file name.
    pub source: Option<String>,
    /// Line number in source.
    pub line: Option<u32>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the source file.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Sets the line.
    #[must_use]
    pub fn with_line(mut self, line: u32) -> Self {
        self.line = Some(line);
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(source) = &self.source {
            write!(f, "at {source}")?;
            if let Some(line) = self.line {
                write!(f, ":{line}")?;
            }
        }
        Ok(())
    }
}
