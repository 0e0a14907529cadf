use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

use super::EntryId;

/// Unit the backend assumes when none is given.
pub const DEFAULT_UNIT: &str = "pieces";

fn default_unit() -> String {
    DEFAULT_UNIT.to_string()
}

/// A pantry row as stored on the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PantryEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EntryId>,
    pub ingredient_name: String,
    #[serde(default)]
    pub quantity: Option<f64>,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, JsonValue>,
}

impl PantryEntry {
    /// `"2 pieces"`, `"0.5 kg"`, or empty when the quantity is unknown.
    pub fn amount(&self) -> String {
        match (self.quantity, self.unit.as_deref()) {
            (Some(q), Some(unit)) if !unit.is_empty() => format!("{q} {unit}"),
            (Some(q), _) => q.to_string(),
            (None, _) => String::new(),
        }
    }
}

/// Body of `POST /pantry/` (insert, or add to an existing row).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPantryItem {
    pub ingredient_name: String,
    pub quantity: f64,
    #[serde(default = "default_unit")]
    pub unit: String,
}

impl NewPantryItem {
    pub fn new(ingredient_name: impl Into<String>, quantity: f64) -> Self {
        Self {
            ingredient_name: ingredient_name.into(),
            quantity,
            unit: default_unit(),
        }
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = unit.into();
        self
    }
}

/// Body of `PUT /pantry/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PantryUpdate {
    pub quantity: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

/// Which of a recipe's ingredients the pantry covers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IngredientCheck {
    #[serde(default)]
    pub available: Vec<String>,
    #[serde(default)]
    pub missing: Vec<String>,
    #[serde(default)]
    pub total_ingredients: u64,
    #[serde(default)]
    pub have_count: u64,
    #[serde(default)]
    pub need_count: u64,
    /// Only present on `/pantry/check/recipe/{id}`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub can_make: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipe_id: Option<EntryId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipe_title: Option<String>,
}
