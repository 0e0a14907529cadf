//! API endpoint configuration.

use reqwest::Url;

use crate::error::ApiError;

/// Environment variable holding the API base URL.
pub const API_URL_ENV: &str = "RECIPAL_API_URL";

/// Local development backend, used when nothing else is configured.
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";

/// Where the reciPal API lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

impl ApiConfig {
    /// Use `base_url` as-is, minus any trailing slash.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Read the base URL from [`API_URL_ENV`], falling back to [`DEFAULT_API_URL`].
    ///
    /// Native builds also load a `.env` file. Browser builds have no process
    /// environment, so the variable is baked in at compile time instead.
    pub fn from_env() -> Result<Self, ApiError> {
        let configured = Self::configured_url().filter(|url| !url.trim().is_empty());
        let base_url = match configured {
            Some(url) => url,
            None => {
                tracing::info!("{API_URL_ENV} not set, using default: {DEFAULT_API_URL}");
                DEFAULT_API_URL.to_string()
            }
        };

        Url::parse(&base_url).map_err(|e| ApiError::Config(format!("{API_URL_ENV}: {e}")))?;
        Ok(Self::new(base_url))
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn configured_url() -> Option<String> {
        dotenvy::dotenv().ok();
        std::env::var(API_URL_ENV).ok()
    }

    #[cfg(target_arch = "wasm32")]
    fn configured_url() -> Option<String> {
        option_env!("RECIPAL_API_URL").map(str::to_string)
    }

    /// Override the base URL.
    pub fn with_base_url(self, base_url: impl Into<String>) -> Self {
        Self::new(base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for an API path such as `/pantry/check`.
    pub fn endpoint(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{path}", self.base_url)
        } else {
            format!("{}/{path}", self.base_url)
        }
    }
}
