//! Shared UI for the reciPal client.
//!
//! Components here know nothing about routing; the `web` binary wires them
//! into pages and decides where to navigate after login, logout, etc.

use dioxus::prelude::*;

mod session;
pub use session::{make_client, use_api, use_auth, AppProvider, AuthState, PlatformStore};

mod scanner;
pub use scanner::{make_scanner, PlatformScanner, SCANNER_VIDEO_ID};

mod navbar;
pub use navbar::Navbar;

mod auth;
pub use auth::{LoginForm, LogoutButton, SignupForm};

pub mod views;

/// Shown while a request is in flight.
#[component]
pub fn Loading(#[props(default = "Loading…".to_string())] label: String) -> Element {
    rsx! {
        p { class: "muted", "{label}" }
    }
}

/// Inline error banner. Renders nothing for `None`.
#[component]
pub fn ErrorBanner(#[props(!optional)] message: Option<String>) -> Element {
    rsx! {
        if let Some(message) = message {
            div { class: "error-banner", role: "alert", "{message}" }
        }
    }
}
