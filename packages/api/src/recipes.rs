//! Recipe collection under `/recipes`.

use store::KeyValueStore;

use crate::client::{ApiClient, RequestOptions};
use crate::error::ApiError;
use crate::models::{EntryId, RecipeRef};
use crate::signal::AbortSignal;

pub struct RecipesApi<'a, S> {
    client: &'a ApiClient<S>,
    signal: Option<AbortSignal>,
}

impl<'a, S: KeyValueStore> RecipesApi<'a, S> {
    pub fn new(client: &'a ApiClient<S>) -> Self {
        Self {
            client,
            signal: None,
        }
    }

    pub fn with_signal(mut self, signal: &AbortSignal) -> Self {
        self.signal = Some(signal.clone());
        self
    }

    pub async fn list(&self) -> Result<Vec<RecipeRef>, ApiError> {
        self.client.get_list("/recipes/", self.signal.as_ref()).await
    }

    pub async fn get(&self, id: &EntryId) -> Result<RecipeRef, ApiError> {
        self.client
            .get_json(&format!("/recipes/{id}"), self.signal.as_ref())
            .await
    }

    /// Ask the server to build a recipe from a short-video URL.
    pub async fn extract(&self, video_url: &str) -> Result<RecipeRef, ApiError> {
        self.client
            .send_json(
                "/recipes/extract",
                RequestOptions::post()
                    .with_query("url", video_url)
                    .with_signal(self.signal.as_ref()),
            )
            .await
    }

    pub async fn delete(&self, id: &EntryId) -> Result<(), ApiError> {
        self.client
            .request(
                &format!("/recipes/{id}"),
                RequestOptions::delete().with_signal(self.signal.as_ref()),
            )
            .await?;
        Ok(())
    }
}
