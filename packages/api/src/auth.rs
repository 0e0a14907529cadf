//! Signup, login and logout against `/auth`.
//!
//! The token returned by the server is stored in the client's [`Session`]
//! as-is; every later request picks it up from there.
//!
//! [`Session`]: store::Session

use store::{CurrentUser, KeyValueStore};

use crate::client::{ApiClient, RequestOptions};
use crate::error::ApiError;
use crate::models::{Credentials, SignupReceipt, TokenGrant};

pub struct AuthApi<'a, S> {
    client: &'a ApiClient<S>,
}

impl<'a, S: KeyValueStore> AuthApi<'a, S> {
    pub fn new(client: &'a ApiClient<S>) -> Self {
        Self { client }
    }

    /// Create an account. When the server already hands back a token the
    /// user is signed in right away.
    pub async fn signup(&self, credentials: &Credentials) -> Result<SignupReceipt, ApiError> {
        let receipt: SignupReceipt = self
            .client
            .send_json(
                "/auth/signup",
                RequestOptions::post().with_json(credentials)?,
            )
            .await?;
        if let Some(token) = receipt.access_token.as_deref().filter(|t| !t.is_empty()) {
            self.client.session().set_token(token);
        }
        tracing::debug!(email = %credentials.email, "signed up");
        Ok(receipt)
    }

    /// Exchange credentials for a bearer token and store it.
    pub async fn login(&self, credentials: &Credentials) -> Result<TokenGrant, ApiError> {
        let grant: TokenGrant = self
            .client
            .send_json(
                "/auth/login",
                RequestOptions::post().with_json(&Credentials {
                    username: None,
                    ..credentials.clone()
                })?,
            )
            .await?;
        self.client.session().set_token(&grant.access_token);
        tracing::debug!(email = %credentials.email, "logged in");
        Ok(grant)
    }

    /// Forget the stored token. Purely local; the server keeps no session.
    pub fn logout(&self) {
        self.client.session().clear_token();
        tracing::debug!("logged out");
    }

    pub fn current_user(&self) -> Option<CurrentUser> {
        self.client.session().current_user()
    }
}
