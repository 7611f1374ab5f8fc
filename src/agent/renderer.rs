//! Prompt rendering contract and the placeholder renderer.

use crate::error::AgentError;
use serde_json::{Map, Value};

/// Resolves one prompt template against the run's working data.
///
/// `Ok(None)` means the template does not apply to this run and is skipped.
pub trait PromptRenderer: Send + Sync {
    fn render(
        &self,
        template: &Value,
        context: &Map<String, Value>,
    ) -> Result<Option<String>, AgentError>;
}

/// `{key}` substitution from top-level context keys.
///
/// - A text template renders only when every placeholder has a non-null value;
///   otherwise it is skipped.
/// - A mapping template lists variants; the first one that renders wins.
/// - `{{` and `}}` write literal braces.
/// - String values are inserted as-is, other values as JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderRenderer;

impl PromptRenderer for PlaceholderRenderer {
    fn render(
        &self,
        template: &Value,
        context: &Map<String, Value>,
    ) -> Result<Option<String>, AgentError> {
        match template {
            Value::String(text) => render_text(text, context),
            Value::Object(variants) => {
                for variant in variants.values() {
                    if let Some(rendered) = self.render(variant, context)? {
                        return Ok(Some(rendered));
                    }
                }
                Ok(None)
            }
            Value::Null => Ok(None),
            other => Err(AgentError::Render(format!(
                "Unsupported template value: {}",
                other
            ))),
        }
    }
}

fn render_text(text: &str, context: &Map<String, Value>) -> Result<Option<String>, AgentError> {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.char_indices().peekable();

    while let Some((start, c)) = chars.next() {
        match c {
            '{' if matches!(chars.peek(), Some((_, '{'))) => {
                chars.next();
                out.push('{');
            }
            '{' => {
                let mut key = String::new();
                let mut closed = false;
                for (_, k) in chars.by_ref() {
                    if k == '}' {
                        closed = true;
                        break;
                    }
                    key.push(k);
                }
                if !closed {
                    return Err(AgentError::Render(format!(
                        "Unclosed placeholder at byte {}",
                        start
                    )));
                }
                let key = key.trim();
                if key.is_empty() {
                    return Err(AgentError::Render(format!(
                        "Empty placeholder at byte {}",
                        start
                    )));
                }
                match context.get(key) {
                    None | Some(Value::Null) => return Ok(None),
                    Some(Value::String(value)) => out.push_str(value),
                    Some(value) => out.push_str(&value.to_string()),
                }
            }
            '}' if matches!(chars.peek(), Some((_, '}'))) => {
                chars.next();
                out.push('}');
            }
            '}' => {
                return Err(AgentError::Render(format!(
                    "Unmatched '}}' at byte {}",
                    start
                )))
            }
            c => out.push(c),
        }
    }

    if out.trim().is_empty() {
        Ok(None)
    } else {
        Ok(Some(out))
    }
}
