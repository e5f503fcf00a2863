//! Structured-to-text formatter.
use serde_json::Value;

use super::{Content, Formatter};
use crate::error::FormatError;

/// Serializes a structured value as block-style YAML.
#[derive(Debug, Clone, Copy, Default)]
pub struct Yaml;

impl Formatter for Yaml {
    fn name(&self) -> &'static str {
        "yaml"
    }

    fn format(&self, input: Content) -> Result<Content, FormatError> {
        match input {
            Content::Value(value @ (Value::Object(_) | Value::Array(_))) => {
                Ok(Content::Text(serde_yaml::to_string(&value)?))
            }
            other => Err(FormatError::UnexpectedInput {
                formatter: self.name(),
                expected: "a mapping or sequence",
                found: other.kind(),
            }),
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use serde_json::json;

    fn render(value: Value) -> String {
        match Yaml.format(Content::Value(value)).unwrap() {
            Content::Text(text) => text,
            Content::Value(v) => panic!("expected text, got {v:?}"),
        }
    }

    #[test]
    fn mapping_keeps_declaration_order() {
        let text = render(json!({
            "singleQuote": true,
            "semi": true,
            "tabWidth": 2,
            "printWidth": 120,
        }));
        assert_eq!(
            text,
            "singleQuote: true\nsemi: true\ntabWidth: 2\nprintWidth: 120\n"
        );
    }

    #[test]
    fn nested_sequence_round_trips() {
        let value = json!({"extends": ["@r2d2bzh"]});
        let text = render(value.clone());
        assert!(text.starts_with("extends:\n"), "got {text:?}");
        let parsed: Value = serde_yaml::from_str(&text).unwrap();
        assert_eq!(parsed, value);
    }

    #[test]
    fn output_is_block_style() {
        let text = render(json!({"a": {"b": [1, 2]}}));
        assert!(!text.contains('{'), "flow mapping in {text:?}");
        assert!(!text.contains('['), "flow sequence in {text:?}");
    }

    #[test]
    fn rejects_text_input() {
        let err = Yaml.format(Content::Text("x".into())).unwrap_err();
        assert!(matches!(
            err,
            FormatError::UnexpectedInput { found: "text", .. }
        ));
    }

    #[test]
    fn rejects_scalar_input() {
        let err = Yaml.format(Content::Value(json!(42))).unwrap_err();
        assert!(matches!(
            err,
            FormatError::UnexpectedInput { found: "a scalar", .. }
        ));
    }
}
