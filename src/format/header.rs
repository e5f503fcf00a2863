//! Banner decorator prepended to rendered artifacts.
use super::{Content, Formatter};
use crate::error::FormatError;

/// Header text: a single line or a multi-line banner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderInput {
    /// One banner line.
    SingleLine(String),
    /// Several banner lines, rendered in order.
    MultiLine(Vec<String>),
}

impl HeaderInput {
    fn lines(&self) -> &[String] {
        match self {
            Self::SingleLine(line) => std::slice::from_ref(line),
            Self::MultiLine(lines) => lines,
        }
    }
}

impl From<&str> for HeaderInput {
    fn from(line: &str) -> Self {
        Self::SingleLine(line.to_string())
    }
}

impl From<String> for HeaderInput {
    fn from(line: String) -> Self {
        Self::SingleLine(line)
    }
}

impl From<Vec<String>> for HeaderInput {
    fn from(lines: Vec<String>) -> Self {
        Self::MultiLine(lines)
    }
}

/// Factory for header formatters sharing a line prefix and suffix.
///
/// `HeaderStyle::new(prefix, suffix).header(text)` yields a [`Formatter`]
/// that renders each header line as `prefix + line`, trims trailing
/// whitespace, appends `suffix`, and places the block before the body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderStyle {
    prefix: String,
    suffix: String,
}

impl HeaderStyle {
    /// Create a style with explicit prefix and suffix.
    #[must_use]
    pub fn new(prefix: impl Into<String>, suffix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            suffix: suffix.into(),
        }
    }

    /// Shell/YAML comment banner: `# ` prefix, newline suffix.
    #[must_use]
    pub fn hashed() -> Self {
        Self::new("# ", "\n")
    }

    /// Bind the header text, producing a formatter.
    #[must_use]
    pub fn header(&self, header: impl Into<HeaderInput>) -> HeaderFormatter {
        HeaderFormatter {
            style: self.clone(),
            header: header.into(),
        }
    }

    fn render_block(&self, header: &HeaderInput) -> String {
        header.lines().iter().fold(String::new(), |mut block, line| {
            let decorated = format!("{}{line}", self.prefix);
            block.push_str(decorated.trim_end());
            block.push_str(&self.suffix);
            block
        })
    }
}

/// Formatter that prepends a bound header to text content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderFormatter {
    style: HeaderStyle,
    header: HeaderInput,
}

impl HeaderFormatter {
    /// The header text this formatter injects.
    #[must_use]
    pub const fn header(&self) -> &HeaderInput {
        &self.header
    }
}

impl Formatter for HeaderFormatter {
    fn name(&self) -> &'static str {
        "header"
    }

    fn format(&self, input: Content) -> Result<Content, FormatError> {
        match input {
            Content::Text(body) => {
                let mut out = self.style.render_block(&self.header);
                out.push_str(&body);
                Ok(Content::Text(out))
            }
            other => Err(FormatError::UnexpectedInput {
                formatter: self.name(),
                expected: "text",
                found: other.kind(),
            }),
        }
    }
}
