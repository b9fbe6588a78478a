//! Compiled template handle.
//!
//! [`Template::new`] parses the source text up front and records any syntax
//! error instead of panicking; the handle stays usable for inspection either
//! way. Rendering is read-only with respect to the template, so one compiled
//! template can serve many renders against different data.

use std::io;
use std::str::FromStr;

use whisker_rs_core::error::{WhiskerError, WhiskerResult};

use crate::data::Data;
use crate::parser::{self, Node};
use crate::renderer;

/// A compiled template: the parsed node tree, or the syntax error that
/// prevented compilation.
#[derive(Debug, Clone)]
pub struct Template {
    nodes: Vec<Node>,
    error: Option<WhiskerError>,
}

impl Template {
    /// Compiles template source, recording rather than returning a failure.
    #[must_use]
    pub fn new(source: &str) -> Self {
        match parser::parse(source) {
            Ok(nodes) => Self { nodes, error: None },
            Err(err) => {
                tracing::debug!(error = %err, "template failed to compile");
                Self {
                    nodes: Vec::new(),
                    error: Some(err),
                }
            }
        }
    }

    /// Whether compilation succeeded.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.error.is_none()
    }

    /// The recorded compile error, if any.
    #[must_use]
    pub fn error(&self) -> Option<&WhiskerError> {
        self.error.as_ref()
    }

    /// Human-readable compile error, or the empty string when valid.
    #[must_use]
    pub fn error_message(&self) -> String {
        self.error.as_ref().map(ToString::to_string).unwrap_or_default()
    }

    /// The parsed node tree. Empty when compilation failed.
    #[must_use]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Renders against `data` and returns the produced text.
    ///
    /// # Errors
    ///
    /// Returns the recorded compile error on an invalid template, or a parse
    /// error surfaced from lambda or partial expansion. A render failure
    /// never marks the template invalid.
    pub fn render(&self, data: &Data) -> WhiskerResult<String> {
        if let Some(err) = &self.error {
            return Err(err.clone());
        }
        renderer::render(&self.nodes, data)
    }

    /// Renders against `data`, writing the produced text to `sink`.
    ///
    /// # Errors
    ///
    /// Fails for the same reasons as [`Template::render`], or when the sink
    /// rejects the write. Nothing is written unless the render succeeds.
    pub fn render_to<W: io::Write>(&self, sink: &mut W, data: &Data) -> WhiskerResult<()> {
        let output = self.render(data)?;
        sink.write_all(output.as_bytes())?;
        Ok(())
    }
}

impl FromStr for Template {
    type Err = WhiskerError;

    /// Strict compilation: a syntax error is returned instead of recorded.
    fn from_str(source: &str) -> Result<Self, Self::Err> {
        parser::parse(source).map(|nodes| Self { nodes, error: None })
    }
}
