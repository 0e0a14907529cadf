use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

use super::EntryId;

/// A recipe as the API returns it. Only `id` and `title` are typed; the
/// rest (ingredients, instructions, caption, ...) stays in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecipeRef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EntryId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, JsonValue>,
}

impl RecipeRef {
    /// Stable key for list rendering: the id, else the title.
    pub fn key(&self) -> String {
        match (&self.id, &self.title) {
            (Some(id), _) => id.to_string(),
            (None, Some(title)) => title.clone(),
            (None, None) => String::new(),
        }
    }

    pub fn caption(&self) -> Option<&str> {
        self.extra.get("caption").and_then(JsonValue::as_str)
    }

    /// One display line per ingredient. Tuple-shaped entries such as
    /// `["2", "cups", "flour"]` are joined with spaces.
    pub fn ingredient_lines(&self) -> Vec<String> {
        let Some(JsonValue::Array(items)) = self.extra.get("ingredients") else {
            return Vec::new();
        };
        items
            .iter()
            .map(|item| match item {
                JsonValue::String(s) => s.clone(),
                JsonValue::Array(parts) => parts
                    .iter()
                    .map(|p| match p {
                        JsonValue::String(s) => s.clone(),
                        other => other.to_string(),
                    })
                    .collect::<Vec<_>>()
                    .join(" "),
                other => other.to_string(),
            })
            .collect()
    }

    /// Non-blank instruction lines, trimmed.
    pub fn instruction_steps(&self) -> Vec<String> {
        self.extra
            .get("instructions")
            .and_then(JsonValue::as_str)
            .unwrap_or_default()
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect()
    }
}
