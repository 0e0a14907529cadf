//! # API crate — HTTP client for the reciPal backend
//!
//! Every screen of the app talks to the backend through one [`ApiClient`].
//! The client owns the request normalization (bearer header, JSON bodies,
//! error message resolution) and hands out thin per-feature handles.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`client`] | [`ApiClient::request`] and the typed `get_json` / `send_json` / `get_list` helpers |
//! | [`config`] | Base URL from `RECIPAL_API_URL` |
//! | [`error`] | [`ApiError`] / [`RequestError`] and the user-facing message mapping |
//! | [`signal`] | [`AbortSignal`], cancellation shared by a view's requests |
//! | [`models`] | Wire types: credentials, pantry rows, recipes, recommendations |
//! | [`auth`] | `/auth` signup, login, logout |
//! | [`pantry`] | `/pantry` CRUD and ingredient checks |
//! | [`recipes`] | `/recipes` list, detail, extraction, delete |
//! | [`grocery`] | `/grocery/recommendations` |
//! | [`dashboard`] | Concurrent fetch of everything the dashboard shows |

pub mod auth;
pub mod client;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod grocery;
pub mod models;
pub mod pantry;
pub mod recipes;
pub mod signal;

pub use auth::AuthApi;
pub use client::{ApiClient, RequestOptions};
pub use config::ApiConfig;
pub use dashboard::{dashboard, DashboardData};
pub use error::{ApiError, RequestError};
pub use grocery::GroceryApi;
pub use pantry::PantryApi;
pub use recipes::RecipesApi;
pub use signal::AbortSignal;

use store::KeyValueStore;

impl<S: KeyValueStore> ApiClient<S> {
    pub fn auth(&self) -> AuthApi<'_, S> {
        AuthApi::new(self)
    }

    pub fn pantry(&self) -> PantryApi<'_, S> {
        PantryApi::new(self)
    }

    pub fn recipes(&self) -> RecipesApi<'_, S> {
        RecipesApi::new(self)
    }

    pub fn grocery(&self) -> GroceryApi<'_, S> {
        GroceryApi::new(self)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::time::Duration;

    use axum::extract::{Path, Query};
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::{get, post, put};
    use axum::{Json, Router};
    use serde_json::{json, Value as JsonValue};
    use store::{MemoryStore, Session};

    use super::*;
    use crate::models::{Credentials, EntryId, NewPantryItem, PantryUpdate};

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn bearer(headers: &HeaderMap) -> JsonValue {
        headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(|v| JsonValue::String(v.to_string()))
            .unwrap_or(JsonValue::Null)
    }

    fn backend() -> Router {
        Router::new()
            .route(
                "/auth/login",
                post(|Json(body): Json<JsonValue>| async move {
                    if body["password"] == "hunter2" {
                        (
                            StatusCode::OK,
                            Json(json!({"access_token": "tok-123", "token_type": "bearer"})),
                        )
                    } else {
                        (
                            StatusCode::BAD_REQUEST,
                            Json(json!({"detail": "Invalid login credentials"})),
                        )
                    }
                }),
            )
            .route(
                "/auth/signup",
                post(|Json(body): Json<JsonValue>| async move {
                    if body["username"] == "instant" {
                        Json(json!({
                            "message": "user created",
                            "user_id": 8,
                            "username": "instant",
                            "access_token": "tok-signup"
                        }))
                    } else {
                        Json(json!({
                            "message": "user created",
                            "user_id": 7,
                            "username": body["username"]
                        }))
                    }
                }),
            )
            .route(
                "/pantry/",
                get(|headers: HeaderMap| async move {
                    Json(json!([{
                        "id": 1,
                        "ingredient_name": "eggs",
                        "quantity": 12,
                        "unit": "pieces",
                        "seen_auth": bearer(&headers)
                    }]))
                })
                .post(|headers: HeaderMap, Json(body): Json<JsonValue>| async move {
                    Json(json!({
                        "id": 2,
                        "ingredient_name": body["ingredient_name"],
                        "quantity": body["quantity"],
                        "unit": body["unit"],
                        "seen_auth": bearer(&headers)
                    }))
                }),
            )
            .route(
                "/pantry/{id}",
                put(
                    |Path(id): Path<i64>, headers: HeaderMap, Json(body): Json<JsonValue>| async move {
                        if id == 0 {
                            return Json(json!({"message": "Nothing to update"}));
                        }
                        Json(json!({
                            "id": id,
                            "ingredient_name": "eggs",
                            "quantity": body["quantity"],
                            "unit": body["unit"],
                            "seen_auth": bearer(&headers)
                        }))
                    },
                )
                .delete(|Path(id): Path<i64>, headers: HeaderMap| async move {
                    if bearer(&headers) == "Bearer tok-123" {
                        (
                            StatusCode::OK,
                            Json(json!({"message": format!("Item {id} deleted")})),
                        )
                    } else {
                        (
                            StatusCode::UNAUTHORIZED,
                            Json(json!({"detail": "Not authenticated"})),
                        )
                    }
                }),
            )
            .route(
                "/pantry/check/recipe/{id}",
                get(|Path(id): Path<i64>| async move {
                    Json(json!({
                        "recipe_id": id,
                        "recipe_title": "Omelette",
                        "available": ["eggs"],
                        "missing": [],
                        "total_ingredients": 1,
                        "have_count": 1,
                        "need_count": 0,
                        "can_make": true
                    }))
                }),
            )
            .route(
                "/pantry/check",
                post(|Json(body): Json<JsonValue>| async move {
                    let wanted = body["ingredients"].as_array().cloned().unwrap_or_default();
                    Json(json!({
                        "available": ["eggs"],
                        "missing": wanted.into_iter().filter(|i| i != "eggs").collect::<Vec<_>>(),
                        "total_ingredients": 2,
                        "have_count": 1,
                        "need_count": 1
                    }))
                }),
            )
            .route(
                "/recipes/",
                get(|| async { Json(json!({"error": "not a list"})) }),
            )
            .route(
                "/recipes/{id}",
                get(|Path(id): Path<i64>| async move {
                    if id == 404 {
                        return (
                            StatusCode::NOT_FOUND,
                            Json(json!({"detail": "Recipe not found"})),
                        );
                    }
                    (
                        StatusCode::OK,
                        Json(json!({
                            "id": id,
                            "title": "Shakshuka",
                            "ingredients": ["eggs", "tomatoes"]
                        })),
                    )
                })
                .delete(|Path(id): Path<i64>| async move {
                    Json(json!({"message": format!("Recipe {id} deleted")}))
                }),
            )
            .route(
                "/recipes/extract",
                post(|Query(params): Query<HashMap<String, String>>| async move {
                    Json(json!({"id": 5, "title": "From reel", "source": params.get("url")}))
                }),
            )
            .route(
                "/grocery/recommendations",
                get(|| async { Json(json!([{"ingredient": "milk", "unlocks": 2}])) }),
            )
            .route(
                "/echo",
                post(|headers: HeaderMap, body: String| async move {
                    Json(json!({
                        "content_type": headers
                            .get("content-type")
                            .and_then(|v| v.to_str().ok()),
                        "body": body
                    }))
                }),
            )
            .route("/empty", get(|| async { StatusCode::NO_CONTENT }))
            .route(
                "/fail/error-field",
                get(|| async { (StatusCode::CONFLICT, Json(json!({"error": "duplicate"}))) }),
            )
            .route(
                "/fail/plain",
                get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded") }),
            )
            .route(
                "/fail/bare",
                get(|| async { StatusCode::SERVICE_UNAVAILABLE }),
            )
            .route(
                "/slow",
                get(|| async {
                    tokio::time::sleep(Duration::from_secs(30)).await;
                    Json(json!({"late": true}))
                }),
            )
    }

    async fn client() -> ApiClient<MemoryStore> {
        let base = serve(backend()).await;
        ApiClient::new(ApiConfig::new(base), Session::new(MemoryStore::new()))
    }

    async fn signed_in_client() -> ApiClient<MemoryStore> {
        let client = client().await;
        client
            .auth()
            .login(&Credentials::new("cook@recipal.app", "hunter2"))
            .await
            .unwrap();
        client
    }

    #[tokio::test]
    async fn test_anonymous_request_has_no_bearer() {
        let client = client().await;
        let rows = client.pantry().list().await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].extra["seen_auth"], JsonValue::Null);
    }

    #[tokio::test]
    async fn test_login_stores_token_and_sends_bearer() {
        let client = client().await;
        let grant = client
            .auth()
            .login(&Credentials::new("cook@recipal.app", "hunter2"))
            .await
            .unwrap();
        assert_eq!(grant.access_token, "tok-123");
        assert_eq!(client.session().token().as_deref(), Some("tok-123"));

        let rows = client.pantry().list().await.unwrap();
        assert_eq!(rows[0].extra["seen_auth"], "Bearer tok-123");

        client.auth().logout();
        assert!(!client.session().is_authenticated());
    }

    #[tokio::test]
    async fn test_failed_login_surfaces_detail() {
        let client = client().await;
        let err = client
            .auth()
            .login(&Credentials::new("cook@recipal.app", "wrong"))
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(400));
        assert_eq!(err.user_message().as_deref(), Some("Invalid login credentials"));
        assert_eq!(client.session().token(), None);
    }

    #[tokio::test]
    async fn test_json_passthrough_unchanged() {
        let client = client().await;
        let data = client
            .request("/grocery/recommendations", RequestOptions::get())
            .await
            .unwrap();
        assert_eq!(data, Some(json!([{"ingredient": "milk", "unlocks": 2}])));

        let recs = client.grocery().recommendations().await.unwrap();
        assert_eq!(recs[0].label(), "milk (unlocks 2 recipes)");
    }

    #[tokio::test]
    async fn test_json_body_and_explicit_content_type() {
        let client = client().await;
        let data = client
            .request("/echo", RequestOptions::post().with_body(json!({"a": 1})))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(data["content_type"], "application/json");
        assert_eq!(data["body"], r#"{"a":1}"#);

        let data = client
            .request(
                "/echo",
                RequestOptions::post()
                    .with_header("Content-Type", "text/plain")
                    .with_body(json!("raw text")),
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(data["content_type"], "text/plain");
        assert_eq!(data["body"], "raw text");
    }

    #[tokio::test]
    async fn test_empty_body_is_none() {
        let client = client().await;
        let data = client.request("/empty", RequestOptions::get()).await.unwrap();
        assert_eq!(data, None);
    }

    #[tokio::test]
    async fn test_error_message_sources() {
        let client = client().await;

        let err = client
            .request("/fail/error-field", RequestOptions::get())
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(409));
        assert_eq!(err.to_string(), "duplicate");

        let err = client
            .request("/fail/plain", RequestOptions::get())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "upstream exploded");
        match err {
            ApiError::Request(e) => assert_eq!(e.body, Some(json!("upstream exploded"))),
            other => panic!("unexpected error: {other:?}"),
        }

        let err = client
            .request("/fail/bare", RequestOptions::get())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Service Unavailable");
    }

    #[tokio::test]
    async fn test_non_array_list_is_empty() {
        let client = client().await;
        let recipes = client.recipes().list().await.unwrap();
        assert!(recipes.is_empty());
    }

    #[tokio::test]
    async fn test_extract_sends_url_query() {
        let client = client().await;
        let recipe = client
            .recipes()
            .extract("https://video.example/reel?id=1&t=2")
            .await
            .unwrap();
        assert_eq!(recipe.title.as_deref(), Some("From reel"));
        assert_eq!(recipe.extra["source"], "https://video.example/reel?id=1&t=2");
    }

    #[tokio::test]
    async fn test_pantry_check() {
        let client = client().await;
        let check = client
            .pantry()
            .check(&["eggs".to_string(), "milk".to_string()])
            .await
            .unwrap();
        assert_eq!(check.missing, vec!["milk"]);
        assert_eq!(check.need_count, 1);
    }

    #[tokio::test]
    async fn test_abort_cancels_in_flight_request() {
        let client = client().await;
        let signal = AbortSignal::new();

        let (result, ()) = futures::join!(
            client.request("/slow", RequestOptions::get().with_signal(Some(&signal))),
            async {
                tokio::time::sleep(Duration::from_millis(50)).await;
                signal.abort();
            }
        );
        let err = result.unwrap_err();
        assert!(err.is_cancelled());
        assert_eq!(err.user_message(), None);
    }

    #[tokio::test]
    async fn test_dashboard_aggregates() {
        let client = client().await;
        let data = dashboard(&client, &AbortSignal::new()).await.unwrap();
        assert!(data.recipes.is_empty());
        assert_eq!(data.pantry.len(), 1);
        assert_eq!(data.recommendations.len(), 1);
    }

    #[tokio::test]
    async fn test_dashboard_after_abort_is_cancelled() {
        let client = client().await;
        let signal = AbortSignal::new();
        signal.abort();
        let err = dashboard(&client, &signal).await.unwrap_err();
        assert!(err.is_cancelled());
    }

    #[tokio::test]
    async fn test_signup_without_token_stays_signed_out() {
        let client = client().await;
        let receipt = client
            .auth()
            .signup(&Credentials::new("new@recipal.app", "pw").with_username("ana"))
            .await
            .unwrap();
        assert_eq!(receipt.user_id, Some(EntryId::Number(7)));
        assert_eq!(receipt.username.as_deref(), Some("ana"));
        assert!(!client.session().is_authenticated());
    }

    #[tokio::test]
    async fn test_signup_with_token_signs_in() {
        let client = client().await;
        let receipt = client
            .auth()
            .signup(&Credentials::new("fast@recipal.app", "pw").with_username("instant"))
            .await
            .unwrap();
        assert_eq!(receipt.access_token.as_deref(), Some("tok-signup"));
        assert_eq!(client.session().token().as_deref(), Some("tok-signup"));
    }

    #[tokio::test]
    async fn test_pantry_upsert_sends_bearer_and_default_unit() {
        let client = signed_in_client().await;
        let entry = client
            .pantry()
            .upsert(&NewPantryItem::new("rice", 2.0))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(entry.id, Some(EntryId::Number(2)));
        assert_eq!(entry.ingredient_name, "rice");
        assert_eq!(entry.amount(), "2 pieces");
        assert_eq!(entry.extra["seen_auth"], "Bearer tok-123");
    }

    #[tokio::test]
    async fn test_pantry_update_by_id() {
        let client = signed_in_client().await;
        let update = PantryUpdate {
            quantity: 3.0,
            unit: Some("dozen".to_string()),
        };
        let entry = client
            .pantry()
            .update(&EntryId::Number(1), &update)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(entry.id, Some(EntryId::Number(1)));
        assert_eq!(entry.amount(), "3 dozen");
        assert_eq!(entry.extra["seen_auth"], "Bearer tok-123");

        let nothing = client
            .pantry()
            .update(&EntryId::Number(0), &update)
            .await
            .unwrap();
        assert_eq!(nothing, None);
    }

    #[tokio::test]
    async fn test_pantry_delete_requires_bearer() {
        let client = client().await;
        let err = client.pantry().delete(&EntryId::Number(1)).await.unwrap_err();
        assert_eq!(err.status(), Some(401));
        assert_eq!(err.user_message().as_deref(), Some("Not authenticated"));

        let client = signed_in_client().await;
        client.pantry().delete(&EntryId::Number(1)).await.unwrap();
    }

    #[tokio::test]
    async fn test_pantry_check_recipe() {
        let client = signed_in_client().await;
        let check = client
            .pantry()
            .check_recipe(&EntryId::Number(9))
            .await
            .unwrap();
        assert_eq!(check.recipe_id, Some(EntryId::Number(9)));
        assert_eq!(check.can_make, Some(true));
        assert!(check.missing.is_empty());
    }

    #[tokio::test]
    async fn test_recipe_get_and_delete() {
        let client = client().await;
        let recipe = client.recipes().get(&EntryId::Number(3)).await.unwrap();
        assert_eq!(recipe.id, Some(EntryId::Number(3)));
        assert_eq!(recipe.title.as_deref(), Some("Shakshuka"));
        assert_eq!(recipe.ingredient_lines(), vec!["eggs", "tomatoes"]);

        let err = client
            .recipes()
            .get(&EntryId::Number(404))
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.to_string(), "Recipe not found");

        client.recipes().delete(&EntryId::Number(3)).await.unwrap();
    }
}
