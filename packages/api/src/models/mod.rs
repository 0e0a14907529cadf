//! Wire models for the reciPal API.
//!
//! Records the client only displays keep every unknown field in an `extra`
//! map so nothing the server sends is lost on a round trip.

mod auth;
mod grocery;
mod pantry;
mod recipe;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use auth::{Credentials, SignupReceipt, TokenGrant};
pub use grocery::GroceryRecommendation;
pub use pantry::{IngredientCheck, NewPantryItem, PantryEntry, PantryUpdate, DEFAULT_UNIT};
pub use recipe::RecipeRef;

/// Server-issued identifier. The backend uses integers for some tables and
/// UUID strings for others.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntryId {
    Number(i64),
    Text(String),
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for EntryId {
    fn from(n: i64) -> Self {
        Self::Number(n)
    }
}

impl From<&str> for EntryId {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for EntryId {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}
