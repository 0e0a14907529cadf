//! Server-side pantry under `/pantry`.

use serde_json::json;
use store::KeyValueStore;

use crate::client::{ApiClient, RequestOptions};
use crate::error::ApiError;
use crate::models::{EntryId, IngredientCheck, NewPantryItem, PantryEntry, PantryUpdate};
use crate::signal::AbortSignal;

pub struct PantryApi<'a, S> {
    client: &'a ApiClient<S>,
    signal: Option<AbortSignal>,
}

impl<'a, S: KeyValueStore> PantryApi<'a, S> {
    pub fn new(client: &'a ApiClient<S>) -> Self {
        Self {
            client,
            signal: None,
        }
    }

    /// Guard every call made through this handle with `signal`.
    pub fn with_signal(mut self, signal: &AbortSignal) -> Self {
        self.signal = Some(signal.clone());
        self
    }

    fn options(&self, options: RequestOptions) -> RequestOptions {
        options.with_signal(self.signal.as_ref())
    }

    /// All pantry rows of the signed-in user.
    pub async fn list(&self) -> Result<Vec<PantryEntry>, ApiError> {
        self.client.get_list("/pantry/", self.signal.as_ref()).await
    }

    /// Insert an ingredient, or add to its quantity when it already exists.
    pub async fn upsert(&self, item: &NewPantryItem) -> Result<Option<PantryEntry>, ApiError> {
        let data = self
            .client
            .request("/pantry/", self.options(RequestOptions::post().with_json(item)?))
            .await?;
        Ok(entry_from(data))
    }

    pub async fn update(
        &self,
        id: &EntryId,
        update: &PantryUpdate,
    ) -> Result<Option<PantryEntry>, ApiError> {
        let data = self
            .client
            .request(
                &format!("/pantry/{id}"),
                self.options(RequestOptions::put().with_json(update)?),
            )
            .await?;
        Ok(entry_from(data))
    }

    pub async fn delete(&self, id: &EntryId) -> Result<(), ApiError> {
        self.client
            .request(&format!("/pantry/{id}"), self.options(RequestOptions::delete()))
            .await?;
        Ok(())
    }

    /// Split `ingredients` into what the pantry has and what is missing.
    pub async fn check(&self, ingredients: &[String]) -> Result<IngredientCheck, ApiError> {
        let body = json!({ "ingredients": ingredients });
        self.client
            .send_json(
                "/pantry/check",
                self.options(RequestOptions::post().with_body(body)),
            )
            .await
    }

    /// [`check`](Self::check) against a stored recipe's ingredient list.
    pub async fn check_recipe(&self, recipe_id: &EntryId) -> Result<IngredientCheck, ApiError> {
        self.client
            .get_json(
                &format!("/pantry/check/recipe/{recipe_id}"),
                self.signal.as_ref(),
            )
            .await
    }
}

/// Write endpoints answer with either the row or a status message.
fn entry_from(data: Option<serde_json::Value>) -> Option<PantryEntry> {
    let data = data?;
    match serde_json::from_value(data) {
        Ok(entry) => Some(entry),
        Err(e) => {
            tracing::debug!("pantry write returned no row: {e}");
            None
        }
    }
}
