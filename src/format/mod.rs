//! Composable rendering pipeline for configuration artifacts.
//!
//! A [`Pipeline`] threads a [`Content`] through an ordered list of
//! [`Formatter`]s. The first formatter receives the artifact's structured
//! value; every later formatter receives its predecessor's output, and the
//! last one must produce text.
//!
//! ```
//! use js_rules::format::{HeaderStyle, Lines, Pipeline};
//! use serde_json::json;
//!
//! let pipeline = Pipeline::new()
//!     .then(Lines)
//!     .then(HeaderStyle::hashed().header("generated"));
//! let text = pipeline.render(&json!(["node_modules"])).unwrap();
//! assert_eq!(text, "# generated\nnode_modules\n");
//! ```
pub mod header;
pub mod lines;
pub mod yaml;

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::error::FormatError;

pub use header::{HeaderFormatter, HeaderInput, HeaderStyle};
pub use lines::Lines;
pub use yaml::Yaml;

/// Value flowing between formatters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    /// Structured configuration (mapping or sequence).
    Value(Value),
    /// Already-rendered text.
    Text(String),
}

impl Content {
    /// Short description of the content's shape, used in error messages.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Value(Value::Array(_)) => "a sequence",
            Self::Value(Value::Object(_)) => "a mapping",
            Self::Value(_) => "a scalar",
            Self::Text(_) => "text",
        }
    }
}

/// A single pure rendering step.
///
/// Implementations must not keep mutable state: the same input always
/// produces the same output.
pub trait Formatter: Send + Sync + fmt::Debug {
    /// Name used in error messages.
    fn name(&self) -> &'static str;

    /// Transform `input` into the next representation.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError`] if `input` has a shape this formatter cannot
    /// render.
    fn format(&self, input: Content) -> Result<Content, FormatError>;
}

/// Ordered sequence of formatters.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    steps: Vec<Arc<dyn Formatter>>,
}

impl Pipeline {
    /// Create an empty pipeline.
    #[must_use]
    pub const fn new() -> Self {
        Self { steps: Vec::new() }
    }

    /// Append a formatter, returning the extended pipeline.
    #[must_use]
    pub fn then(mut self, formatter: impl Formatter + 'static) -> Self {
        self.steps.push(Arc::new(formatter));
        self
    }

    /// Number of formatters in the pipeline.
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Returns `true` if the pipeline has no formatters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Render `value` by folding it through every formatter in order.
    ///
    /// # Errors
    ///
    /// Returns the first [`FormatError`] raised by a formatter, or
    /// [`FormatError::NotText`] if the final output is still structured.
    pub fn render(&self, value: &Value) -> Result<String, FormatError> {
        let rendered = self
            .steps
            .iter()
            .try_fold(Content::Value(value.clone()), |content, step| {
                step.format(content)
            })?;
        match rendered {
            Content::Text(text) => Ok(text),
            Content::Value(_) => Err(FormatError::NotText),
        }
    }
}
