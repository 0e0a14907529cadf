//! Everything the dashboard shows, fetched in one go.

use futures::future::try_join3;
use store::KeyValueStore;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::{GroceryRecommendation, PantryEntry, RecipeRef};
use crate::signal::AbortSignal;

/// How many rows each dashboard card previews.
pub const PREVIEW_LEN: usize = 3;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardData {
    pub recipes: Vec<RecipeRef>,
    pub pantry: Vec<PantryEntry>,
    pub recommendations: Vec<GroceryRecommendation>,
}

impl DashboardData {
    pub fn recent_recipes(&self) -> &[RecipeRef] {
        &self.recipes[..self.recipes.len().min(PREVIEW_LEN)]
    }

    pub fn pantry_preview(&self) -> &[PantryEntry] {
        &self.pantry[..self.pantry.len().min(PREVIEW_LEN)]
    }

    /// Put a freshly created recipe first, replacing any older copy.
    pub fn add_recipe(&mut self, recipe: RecipeRef) {
        if recipe.id.is_some() {
            self.recipes.retain(|r| r.id != recipe.id);
        }
        self.recipes.insert(0, recipe);
    }
}

/// Fetch recipes, pantry and recommendations concurrently.
///
/// All three share `signal`; the first failure wins and the rest are dropped.
pub async fn dashboard<S: KeyValueStore>(
    client: &ApiClient<S>,
    signal: &AbortSignal,
) -> Result<DashboardData, ApiError> {
    let (recipes, pantry, recommendations) = try_join3(
        client.recipes().with_signal(signal).list(),
        client.pantry().with_signal(signal).list(),
        client.grocery().with_signal(signal).recommendations(),
    )
    .await?;
    tracing::debug!(
        recipes = recipes.len(),
        pantry = pantry.len(),
        recommendations = recommendations.len(),
        "dashboard loaded"
    );
    Ok(DashboardData {
        recipes,
        pantry,
        recommendations,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EntryId;

    fn recipe(id: i64, title: &str) -> RecipeRef {
        RecipeRef {
            id: Some(EntryId::Number(id)),
            title: Some(title.into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_previews_cap_at_three() {
        let data = DashboardData {
            recipes: (1..=5).map(|i| recipe(i, "r")).collect(),
            ..Default::default()
        };
        assert_eq!(data.recent_recipes().len(), 3);
        assert!(data.pantry_preview().is_empty());
    }

    #[test]
    fn test_add_recipe_replaces_same_id() {
        let mut data = DashboardData {
            recipes: vec![recipe(1, "old"), recipe(2, "other")],
            ..Default::default()
        };
        data.add_recipe(recipe(1, "new"));
        let titles: Vec<_> = data.recipes.iter().filter_map(|r| r.title.as_deref()).collect();
        assert_eq!(titles, vec!["new", "other"]);
    }
}
