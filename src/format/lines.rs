//! List-to-lines formatter.
use serde_json::Value;

use super::{Content, Formatter};
use crate::error::FormatError;

/// Renders a sequence of strings as one newline-terminated line per entry.
///
/// An empty sequence renders as the empty string.
#[derive(Debug, Clone, Copy, Default)]
pub struct Lines;

impl Formatter for Lines {
    fn name(&self) -> &'static str {
        "lines"
    }

    fn format(&self, input: Content) -> Result<Content, FormatError> {
        let items = match input {
            Content::Value(Value::Array(items)) => items,
            other => return Err(self.reject(other.kind())),
        };
        items
            .iter()
            .try_fold(String::new(), |mut acc, item| {
                let line = item.as_str().ok_or(())?;
                acc.push_str(line);
                acc.push('\n');
                Ok(acc)
            })
            .map(Content::Text)
            .map_err(|()| self.reject("a sequence with non-string entries"))
    }
}

impl Lines {
    const fn reject(self, found: &'static str) -> FormatError {
        FormatError::UnexpectedInput {
            formatter: "lines",
            expected: "a sequence of strings",
            found,
        }
    }
}
