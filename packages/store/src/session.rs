//! # Session — the persisted bearer token
//!
//! A [`Session`] wraps a [`KeyValueStore`] and owns exactly one key,
//! [`TOKEN_KEY`]. It is an explicit value: build one at startup and hand it to
//! whatever issues authenticated requests. Nothing here is process-global.
//!
//! ## Token payload decoding
//!
//! [`Session::current_user`] base64url-decodes the middle segment of a
//! JWT-shaped token and reads `sub`/`user_id`/`id` and `email` from it. The
//! signature is **not** verified. The result is for display only ("signed in as
//! …") and must never gate access to anything; the server stays the only
//! authority on whether a token is valid.
//!
//! ## Failure behaviour
//!
//! Store failures are logged and swallowed. A broken or unavailable store
//! degrades to "signed out" instead of surfacing an error to every request.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::kv::KeyValueStore;

/// Key under which the bearer token is persisted.
pub const TOKEN_KEY: &str = "access";

/// Identity read from an unverified token payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: String,
    pub email: Option<String>,
}

impl CurrentUser {
    /// Email when the token carries one, otherwise the identifier.
    pub fn display_name(&self) -> &str {
        self.email.as_deref().unwrap_or(&self.id)
    }
}

/// Bearer-token session backed by a [`KeyValueStore`].
#[derive(Clone, Debug, Default)]
pub struct Session<S> {
    store: S,
}

impl<S: KeyValueStore> Session<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Persist `token` for subsequent requests.
    pub fn set_token(&self, token: &str) {
        if let Err(e) = self.store.set(TOKEN_KEY, token) {
            tracing::warn!(error = %e, "failed to persist session token");
        }
    }

    /// The persisted token. An empty stored value counts as absent.
    pub fn token(&self) -> Option<String> {
        match self.store.get(TOKEN_KEY) {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                tracing::warn!(error = %e, "failed to read session token");
                None
            }
        }
    }

    /// Remove the persisted token (logout).
    pub fn clear_token(&self) {
        if let Err(e) = self.store.remove(TOKEN_KEY) {
            tracing::warn!(error = %e, "failed to clear session token");
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    /// Decode the user from the persisted token without verifying it.
    pub fn current_user(&self) -> Option<CurrentUser> {
        decode_token_user(&self.token()?)
    }
}

/// Read the identity claims from the payload segment of `token`.
///
/// Returns `None` for anything that is not a three-segment token with a
/// base64url JSON object in the middle carrying an identifier.
pub fn decode_token_user(token: &str) -> Option<CurrentUser> {
    let mut segments = token.split('.');
    let (_header, payload) = (segments.next()?, segments.next()?);
    segments.next()?;
    if segments.next().is_some() {
        return None;
    }

    let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')).ok()?;
    let claims: JsonValue = serde_json::from_slice(&bytes).ok()?;

    let id = ["sub", "user_id", "id"]
        .iter()
        .find_map(|key| claim_text(claims.get(key)?))?;
    let email = claims.get("email").and_then(claim_text);

    Some(CurrentUser { id, email })
}

fn claim_text(value: &JsonValue) -> Option<String> {
    match value {
        JsonValue::String(s) if !s.is_empty() => Some(s.clone()),
        JsonValue::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;

    fn token_with(payload: &str) -> String {
        format!(
            "{}.{}.signature",
            URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":"JWT"}"#),
            URL_SAFE_NO_PAD.encode(payload)
        )
    }

    #[test]
    fn test_set_get_clear() {
        let session = Session::new(MemoryStore::new());

        session.set_token("x");
        assert_eq!(session.token().as_deref(), Some("x"));
        assert!(session.is_authenticated());

        session.clear_token();
        assert_eq!(session.token(), None);
        assert!(!session.is_authenticated());
    }

    #[test]
    fn test_token_persisted_under_fixed_key() {
        let store = MemoryStore::new();
        let session = Session::new(store.clone());

        session.set_token("abc");
        assert_eq!(store.get(TOKEN_KEY).unwrap().as_deref(), Some("abc"));
    }

    #[test]
    fn test_empty_token_counts_as_absent() {
        let store = MemoryStore::new();
        store.set(TOKEN_KEY, "").unwrap();

        assert_eq!(Session::new(store).token(), None);
    }

    #[test]
    fn test_current_user_from_payload() {
        let session = Session::new(MemoryStore::new());
        session.set_token(&token_with(r#"{"sub":"u-42","email":"cook@recipal.local"}"#));

        let user = session.current_user().unwrap();
        assert_eq!(user.id, "u-42");
        assert_eq!(user.email.as_deref(), Some("cook@recipal.local"));
        assert_eq!(user.display_name(), "cook@recipal.local");
    }

    #[test]
    fn test_current_user_identifier_fallbacks() {
        let user = decode_token_user(&token_with(r#"{"user_id":7}"#)).unwrap();
        assert_eq!(user.id, "7");
        assert_eq!(user.email, None);
        assert_eq!(user.display_name(), "7");

        let user = decode_token_user(&token_with(r#"{"id":"abc","sub":""}"#)).unwrap();
        assert_eq!(user.id, "abc");
    }

    #[test]
    fn test_current_user_tolerates_padding() {
        let payload = base64::engine::general_purpose::URL_SAFE.encode(r#"{"sub":"p"}"#);
        let token = format!("h.{payload}.s");
        assert_eq!(decode_token_user(&token).unwrap().id, "p");
    }

    #[test]
    fn test_current_user_absent_for_bad_tokens() {
        let session = Session::new(MemoryStore::new());
        assert_eq!(session.current_user(), None);

        let tokens = vec![
            "user-123".to_string(),
            "a.b".to_string(),
            "a.!!!.c".to_string(),
            format!("{}.extra", token_with(r#"{"sub":"u"}"#)),
            token_with("not json"),
            token_with(r#"["sub"]"#),
            token_with(r#"{"email":"no-id@recipal.local"}"#),
        ];
        for token in &tokens {
            assert_eq!(decode_token_user(token), None, "token {token:?}");
        }
    }
}
