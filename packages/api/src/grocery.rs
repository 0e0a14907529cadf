//! Grocery recommendations under `/grocery`.

use store::KeyValueStore;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::GroceryRecommendation;
use crate::signal::AbortSignal;

pub struct GroceryApi<'a, S> {
    client: &'a ApiClient<S>,
    signal: Option<AbortSignal>,
}

impl<'a, S: KeyValueStore> GroceryApi<'a, S> {
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

    /// Ingredients ranked by how many saved recipes they would complete.
    pub async fn recommendations(&self) -> Result<Vec<GroceryRecommendation>, ApiError> {
        self.client
            .get_list("/grocery/recommendations", self.signal.as_ref())
            .await
    }
}
