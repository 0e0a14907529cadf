//! # Request wrapper shared by every feature client
//!
//! [`ApiClient::request`] is the single place where the client talks HTTP:
//!
//! 1. join the path onto the configured base URL;
//! 2. attach `Authorization: Bearer <token>` when the [`Session`] holds one;
//! 3. serialize the body to JSON unless the caller set a `Content-Type`;
//! 4. read the whole response as text and parse it ([`parse_body`]);
//! 5. turn non-success statuses into [`RequestError`] ([`error_message`]).
//!
//! Nothing is retried or cached. A request guarded by an [`AbortSignal`]
//! resolves to [`ApiError::Cancelled`] once the signal fires.

use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value as JsonValue;
use store::{KeyValueStore, Session};

use crate::config::ApiConfig;
use crate::error::{ApiError, RequestError};
use crate::signal::AbortSignal;

/// Per-request settings. Defaults to a bodiless `GET`.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub method: Method,
    pub headers: Vec<(String, String)>,
    pub query: Vec<(String, String)>,
    pub body: Option<JsonValue>,
    pub signal: Option<AbortSignal>,
}

impl RequestOptions {
    pub fn get() -> Self {
        Self::default()
    }

    pub fn post() -> Self {
        Self::method(Method::POST)
    }

    pub fn put() -> Self {
        Self::method(Method::PUT)
    }

    pub fn delete() -> Self {
        Self::method(Method::DELETE)
    }

    pub fn method(method: Method) -> Self {
        Self {
            method,
            ..Self::default()
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Append a query parameter; values are percent-encoded on send.
    pub fn with_query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    pub fn with_body(mut self, body: JsonValue) -> Self {
        self.body = Some(body);
        self
    }

    /// Serialize `body` now so encoding failures surface before any I/O.
    pub fn with_json<T: Serialize + ?Sized>(self, body: &T) -> Result<Self, ApiError> {
        Ok(self.with_body(serde_json::to_value(body)?))
    }

    pub fn with_signal(mut self, signal: Option<&AbortSignal>) -> Self {
        self.signal = signal.cloned();
        self
    }

    fn has_content_type(&self) -> bool {
        self.headers
            .iter()
            .any(|(name, _)| name.eq_ignore_ascii_case(CONTENT_TYPE.as_str()))
    }
}

/// HTTP client for the reciPal API.
#[derive(Clone, Debug)]
pub struct ApiClient<S> {
    http: reqwest::Client,
    config: ApiConfig,
    session: Session<S>,
}

impl<S: KeyValueStore> ApiClient<S> {
    pub fn new(config: ApiConfig, session: Session<S>) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
            session,
        }
    }

    /// Use a custom HTTP client (connection pool reuse, proxies, tests).
    pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
        self.http = http;
        self
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub fn session(&self) -> &Session<S> {
        &self.session
    }

    /// Send a request and return the parsed body (`None` when empty).
    pub async fn request(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<Option<JsonValue>, ApiError> {
        let url = self.config.endpoint(path);
        let explicit_content_type = options.has_content_type();
        let RequestOptions {
            method,
            headers,
            query,
            body,
            signal,
        } = options;

        tracing::debug!(%method, %url, "api request");

        let mut builder = self.http.request(method.clone(), &url);
        if !query.is_empty() {
            builder = builder.query(&query);
        }
        for (name, value) in &headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(token) = self.session.token() {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = body {
            builder = match (explicit_content_type, body) {
                (true, JsonValue::String(text)) => builder.body(text),
                (true, other) => builder.body(other.to_string()),
                (false, other) => builder
                    .header(CONTENT_TYPE, "application/json")
                    .body(other.to_string()),
            };
        }

        let exchange = async {
            let response = builder.send().await?;
            let status = response.status();
            let text = response.text().await?;
            Ok::<_, reqwest::Error>((status, text))
        };
        let (status, text) = match &signal {
            Some(signal) => signal.guard(exchange).await??,
            None => exchange.await?,
        };

        let data = parse_body(&text);
        if !status.is_success() {
            let message = error_message(status, data.as_ref());
            tracing::debug!(%method, %url, status = status.as_u16(), %message, "api request failed");
            return Err(RequestError {
                status: status.as_u16(),
                message,
                body: data,
            }
            .into());
        }
        Ok(data)
    }

    /// `GET` `path` and deserialize the body into `T`.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        signal: Option<&AbortSignal>,
    ) -> Result<T, ApiError> {
        self.send_json(path, RequestOptions::get().with_signal(signal))
            .await
    }

    /// [`request`](Self::request), then deserialize the body into `T`.
    ///
    /// An empty body is offered to `T` as JSON `null`.
    pub async fn send_json<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<T, ApiError> {
        decode(self.request(path, options).await?)
    }

    /// `GET` a list endpoint. Anything other than a JSON array is read as an
    /// empty list.
    pub async fn get_list<T: DeserializeOwned>(
        &self,
        path: &str,
        signal: Option<&AbortSignal>,
    ) -> Result<Vec<T>, ApiError> {
        decode_list(
            self.request(path, RequestOptions::get().with_signal(signal))
                .await?,
        )
    }
}

/// Parse a response body: empty → `None`, JSON → the value, otherwise the raw
/// text as a JSON string.
pub fn parse_body(text: &str) -> Option<JsonValue> {
    if text.is_empty() {
        return None;
    }
    Some(
        serde_json::from_str(text).unwrap_or_else(|_| JsonValue::String(text.to_string())),
    )
}

/// Resolve the message for a failed response.
///
/// Precedence: `detail`, then `error`, then the body itself, then the status
/// reason phrase. Empty strings, `null` and `false` are skipped.
pub fn error_message(status: StatusCode, body: Option<&JsonValue>) -> String {
    body.and_then(|data| {
        data.get("detail")
            .and_then(message_text)
            .or_else(|| data.get("error").and_then(message_text))
            .or_else(|| message_text(data))
    })
    .unwrap_or_else(|| {
        status
            .canonical_reason()
            .map(str::to_string)
            .unwrap_or_else(|| status.as_u16().to_string())
    })
}

/// Plain-text bodies are used verbatim rather than JSON-quoted, and `0` is a
/// message like any other value; only `null`, `false` and `""` count as absent.
fn message_text(value: &JsonValue) -> Option<String> {
    match value {
        JsonValue::Null | JsonValue::Bool(false) => None,
        JsonValue::String(s) if s.is_empty() => None,
        JsonValue::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

pub(crate) fn decode<T: DeserializeOwned>(data: Option<JsonValue>) -> Result<T, ApiError> {
    serde_json::from_value(data.unwrap_or(JsonValue::Null)).map_err(Into::into)
}

pub(crate) fn decode_list<T: DeserializeOwned>(
    data: Option<JsonValue>,
) -> Result<Vec<T>, ApiError> {
    match data {
        Some(JsonValue::Array(items)) => items
            .into_iter()
            .map(serde_json::from_value)
            .collect::<Result<_, _>>()
            .map_err(Into::into),
        _ => Ok(Vec::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_body() {
        assert_eq!(parse_body(""), None);
        assert_eq!(parse_body(r#"{"a":1}"#), Some(json!({"a": 1})));
        assert_eq!(parse_body("[1,2]"), Some(json!([1, 2])));
        assert_eq!(parse_body("null"), Some(JsonValue::Null));
        assert_eq!(
            parse_body("Internal Server Error"),
            Some(json!("Internal Server Error"))
        );
    }

    #[test]
    fn test_error_message_precedence() {
        let status = StatusCode::BAD_REQUEST;

        let both = json!({"detail": "Email already registered.", "error": "dup"});
        assert_eq!(
            error_message(status, Some(&both)),
            "Email already registered."
        );

        let error_only = json!({"error": "quota exceeded"});
        assert_eq!(error_message(status, Some(&error_only)), "quota exceeded");

        let empty_detail = json!({"detail": "", "error": "fallback"});
        assert_eq!(error_message(status, Some(&empty_detail)), "fallback");

        let neither = json!({"code": 17});
        assert_eq!(error_message(status, Some(&neither)), r#"{"code":17}"#);

        let raw = json!("upstream timeout");
        assert_eq!(error_message(status, Some(&raw)), "upstream timeout");

        let zero = json!({"detail": 0});
        assert_eq!(error_message(status, Some(&zero)), "0");

        let falsy = json!({"detail": false, "error": null});
        assert_eq!(error_message(status, Some(&falsy)), r#"{"detail":false,"error":null}"#);

        assert_eq!(error_message(status, None), "Bad Request");
        assert_eq!(
            error_message(StatusCode::NOT_FOUND, Some(&JsonValue::Null)),
            "Not Found"
        );
    }

    #[test]
    fn test_error_message_structured_detail() {
        // FastAPI validation failures carry a list in `detail`
        let body = json!({"detail": [{"loc": ["body", "quantity"], "msg": "field required"}]});
        let message = error_message(StatusCode::UNPROCESSABLE_ENTITY, Some(&body));
        assert!(message.contains("field required"));
    }

    #[test]
    fn test_decode_list_tolerates_non_arrays() {
        let empty: Vec<JsonValue> = decode_list(None).unwrap();
        assert!(empty.is_empty());

        let object: Vec<JsonValue> = decode_list(Some(json!({"items": []}))).unwrap();
        assert!(object.is_empty());

        let numbers: Vec<u32> = decode_list(Some(json!([1, 2, 3]))).unwrap();
        assert_eq!(numbers, vec![1, 2, 3]);
    }

    #[test]
    fn test_decode_reports_shape_mismatch() {
        let result: Result<Vec<u32>, _> = decode(Some(json!({"not": "a list"})));
        assert!(matches!(result, Err(ApiError::Decode(_))));
    }

    #[test]
    fn test_request_options_content_type_detection() {
        assert!(!RequestOptions::post().has_content_type());
        assert!(RequestOptions::post()
            .with_header("content-type", "text/plain")
            .has_content_type());
    }
}
