use serde::{Deserialize, Serialize};

use super::EntryId;

/// Login and signup form payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
    /// Only sent on signup.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            username: None,
        }
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }
}

/// Successful login response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenGrant {
    #[serde(alias = "access", alias = "token")]
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
}

/// Signup response. Accounts that need email confirmation come back without
/// a token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignupReceipt {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub user_id: Option<EntryId>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default, alias = "access", alias = "token")]
    pub access_token: Option<String>,
}
