//! Core error types for the whisker-rs templating engine.
//!
//! This module provides the [`WhiskerError`] enum covering the template
//! syntax errors detected during parsing, the data-model access errors, and
//! sink I/O failures surfaced while rendering to a writer.

use thiserror::Error;

/// The primary error type for the whisker-rs engine.
///
/// The four syntax variants carry the 0-based byte offset of the offending
/// tag's opening delimiter in the original template source; their `Display`
/// forms are the engine's stable error-message surface and are matched
/// verbatim by callers.
///
/// The enum is `Clone` so that a parse error stored inside a template can be
/// handed back from every render attempt against that template.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WhiskerError {
    // ── Template syntax errors ───────────────────────────────────────

    /// A tag was opened but its end delimiter never appeared.
    #[error("Unclosed tag at {position}")]
    UnclosedTag {
        /// Byte offset of the tag's opening delimiter.
        position: usize,
    },

    /// A section was opened but never closed by a matching end tag.
    #[error("Unclosed section \"{name}\" at {position}")]
    UnclosedSection {
        /// The section name.
        name: String,
        /// Byte offset of the section-begin tag's opening delimiter.
        position: usize,
    },

    /// A section end tag appeared with no section open.
    #[error("Unopened section \"{name}\" at {position}")]
    UnopenedSection {
        /// The name carried by the stray end tag.
        name: String,
        /// Byte offset of the end tag's opening delimiter.
        position: usize,
    },

    /// A set-delimiter tag did not contain exactly two valid delimiter
    /// tokens.
    #[error("Invalid set delimiter tag at {position}")]
    InvalidSetDelimiter {
        /// Byte offset of the tag's opening delimiter.
        position: usize,
    },

    // ── Data model ───────────────────────────────────────────────────

    /// `set` was called on a value that is not an Object.
    #[error("Cannot set \"{name}\" on a non-object value")]
    NotAnObject {
        /// The key that was being set.
        name: String,
    },

    /// `push_back` was called on a value that is not a List.
    #[error("Cannot push onto a non-list value")]
    NotAList,

    // ── IO ───────────────────────────────────────────────────────────

    /// An I/O error occurred while writing rendered output to a sink.
    #[error("IO error: {0}")]
    Io(String),
}

impl WhiskerError {
    /// Returns `true` for the template syntax variants, i.e. the errors that
    /// can invalidate a template at parse time.
    pub const fn is_syntax_error(&self) -> bool {
        matches!(
            self,
            Self::UnclosedTag { .. }
                | Self::UnclosedSection { .. }
                | Self::UnopenedSection { .. }
                | Self::InvalidSetDelimiter { .. }
        )
    }
}

impl From<std::io::Error> for WhiskerError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

/// A convenience type alias for `Result<T, WhiskerError>`.
pub type WhiskerResult<T> = Result<T, WhiskerError>;
