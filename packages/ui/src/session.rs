//! Session and API client context.
//!
//! [`AppProvider`] builds one [`ApiClient`] for the whole app, backed by the
//! platform's key-value store, and shares it through context along with the
//! signed-in user.
//!
//! | Target | Token store |
//! |--------|-------------|
//! | wasm32 + `web` | `localStorage` |
//! | native | TOML file under the data dir |
//! | wasm32 without `web` | memory |

use api::{ApiClient, ApiConfig};
use dioxus::prelude::*;
use store::{CurrentUser, KeyValueStore, Session};

#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub type PlatformStore = store::LocalStorageStore;
#[cfg(not(target_arch = "wasm32"))]
pub type PlatformStore = store::FileStore;
#[cfg(all(target_arch = "wasm32", not(feature = "web")))]
pub type PlatformStore = store::MemoryStore;

fn platform_store() -> PlatformStore {
    #[cfg(all(target_arch = "wasm32", feature = "web"))]
    {
        store::LocalStorageStore::new()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        store::FileStore::default_location()
    }
    #[cfg(all(target_arch = "wasm32", not(feature = "web")))]
    {
        store::MemoryStore::new()
    }
}

/// Build the app's client from the environment.
pub fn make_client() -> ApiClient<PlatformStore> {
    let config = ApiConfig::from_env().unwrap_or_else(|e| {
        tracing::error!("{e}; falling back to the default API URL");
        ApiConfig::default()
    });
    tracing::info!("API at {}", config.base_url());
    ApiClient::new(config, Session::new(platform_store()))
}

/// Who is signed in, as far as the client can tell.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthState {
    /// Decoded from the stored token; not verified.
    pub user: Option<CurrentUser>,
    pub authenticated: bool,
}

impl AuthState {
    pub fn from_client<S: KeyValueStore>(client: &ApiClient<S>) -> Self {
        Self {
            user: client.session().current_user(),
            authenticated: client.session().is_authenticated(),
        }
    }

    /// Name to show for the signed-in user. Opaque tokens have none, but the
    /// user is still signed in and can log out.
    pub fn display_name(&self) -> Option<&str> {
        self.user.as_ref().map(CurrentUser::display_name)
    }
}

pub fn use_api() -> ApiClient<PlatformStore> {
    use_context::<ApiClient<PlatformStore>>()
}

/// Returns a signal that updates when the user logs in or out.
pub fn use_auth() -> Signal<AuthState> {
    use_context::<Signal<AuthState>>()
}

#[component]
pub fn AppProvider(children: Element) -> Element {
    let client = use_context_provider(make_client);
    let client_for_state = client.clone();
    use_context_provider(move || Signal::new(AuthState::from_client(&client_for_state)));

    rsx! {
        {children}
    }
}
