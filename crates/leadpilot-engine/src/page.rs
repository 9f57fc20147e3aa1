//! Landing page blocks as stored by the site builder.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One content block of a generated page.
///
/// `data` is builder-defined; the accessors below read only the keys the
/// refiner cares about and return `None` when they are absent or malformed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    #[serde(rename = "type")]
    pub block_type: String,
    #[serde(default)]
    pub data: Value,
}

impl Block {
    #[must_use]
    pub fn new(block_type: impl Into<String>) -> Self {
        Self {
            block_type: block_type.into(),
            data: Value::Null,
        }
    }

    #[must_use]
    pub fn with_data(block_type: impl Into<String>, data: Value) -> Self {
        Self {
            block_type: block_type.into(),
            data,
        }
    }

    /// Explicit `(textColor, backgroundColor)` pair, if both are set.
    #[must_use]
    pub fn colors(&self) -> Option<(&str, &str)> {
        let text = self.data.get("textColor")?.as_str()?;
        let background = self.data.get("backgroundColor")?.as_str()?;
        Some((text, background))
    }

    /// `(width, height)` of the block's `image` object, if both are numeric.
    #[must_use]
    pub fn image_size(&self) -> Option<(f64, f64)> {
        let image = self.data.get("image")?;
        let width = image.get("width")?.as_f64()?;
        let height = image.get("height")?.as_f64()?;
        Some((width, height))
    }

    /// Declared form field names from `fields`, falling back to `formFields`.
    ///
    /// Object entries contribute a non-empty `name`, else a non-empty `id`.
    /// Strings are taken as-is and numbers or booleans are stringified;
    /// anything else is skipped.
    #[must_use]
    pub fn form_fields(&self) -> Vec<String> {
        let list = self
            .data
            .get("fields")
            .and_then(Value::as_array)
            .or_else(|| self.data.get("formFields").and_then(Value::as_array));

        let Some(entries) = list else {
            return Vec::new();
        };

        entries.iter().filter_map(field_name).collect()
    }
}

fn field_name(entry: &Value) -> Option<String> {
    match entry {
        Value::String(s) => Some(s.clone()),
        Value::Number(_) | Value::Bool(_) => Some(entry.to_string()),
        Value::Object(map) => ["name", "id"]
            .iter()
            .filter_map(|key| map.get(*key).and_then(Value::as_str))
            .find(|value| !value.is_empty())
            .map(str::to_string),
        Value::Null | Value::Array(_) => None,
    }
}
