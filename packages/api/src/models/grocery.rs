use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

/// An ingredient worth buying, with how many recipes it would complete.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroceryRecommendation {
    #[serde(default)]
    pub ingredient: Option<String>,
    #[serde(default)]
    pub unlocks: Option<u64>,
    #[serde(flatten)]
    pub extra: Map<String, JsonValue>,
}

impl GroceryRecommendation {
    /// `"{ingredient} (unlocks N recipe[s])"`.
    pub fn label(&self) -> String {
        let ingredient = self.ingredient.as_deref().unwrap_or_default();
        let unlocks = self.unlocks.unwrap_or(0);
        let plural = if unlocks == 1 { "" } else { "s" };
        format!("{ingredient} (unlocks {unlocks} recipe{plural})")
    }
}
