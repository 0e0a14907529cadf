//! Login, signup and logout.

use api::models::Credentials;
use dioxus::prelude::*;

use crate::{use_api, use_auth, AuthState, ErrorBanner};

#[component]
pub fn LoginForm(on_success: EventHandler<()>) -> Element {
    let client = use_api();
    let mut auth = use_auth();
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut busy = use_signal(|| false);

    let onsubmit = move |evt: FormEvent| {
        evt.prevent_default();
        let client = client.clone();
        async move {
            busy.set(true);
            error.set(None);
            let credentials = Credentials::new(email().trim(), password());
            match client.auth().login(&credentials).await {
                Ok(_) => {
                    auth.set(AuthState::from_client(&client));
                    on_success.call(());
                }
                Err(e) => error.set(e.user_message()),
            }
            busy.set(false);
        }
    };

    rsx! {
        form {
            class: "auth-form",
            onsubmit: onsubmit,
            h1 { "Log in" }
            ErrorBanner { message: error() }
            label { r#for: "login-email", "Email" }
            input {
                id: "login-email",
                r#type: "email",
                required: true,
                value: email(),
                oninput: move |e| email.set(e.value()),
            }
            label { r#for: "login-password", "Password" }
            input {
                id: "login-password",
                r#type: "password",
                required: true,
                value: password(),
                oninput: move |e| password.set(e.value()),
            }
            button {
                r#type: "submit",
                disabled: busy(),
                if busy() { "Logging in…" } else { "Log in" }
            }
        }
    }
}

#[component]
pub fn SignupForm(on_success: EventHandler<bool>) -> Element {
    let client = use_api();
    let mut auth = use_auth();
    let mut username = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| Option::<String>::None);
    let mut notice = use_signal(|| Option::<String>::None);
    let mut busy = use_signal(|| false);

    let onsubmit = move |evt: FormEvent| {
        evt.prevent_default();
        let client = client.clone();
        async move {
            busy.set(true);
            error.set(None);
            let credentials =
                Credentials::new(email().trim(), password()).with_username(username().trim());
            match client.auth().signup(&credentials).await {
                Ok(receipt) => {
                    let state = AuthState::from_client(&client);
                    let signed_in = state.authenticated;
                    auth.set(state);
                    notice.set(receipt.message);
                    on_success.call(signed_in);
                }
                Err(e) => error.set(e.user_message()),
            }
            busy.set(false);
        }
    };

    rsx! {
        form {
            class: "auth-form",
            onsubmit: onsubmit,
            h1 { "Create an account" }
            ErrorBanner { message: error() }
            if let Some(notice) = notice() {
                p { class: "notice", "{notice}" }
            }
            label { r#for: "signup-username", "Username" }
            input {
                id: "signup-username",
                required: true,
                value: username(),
                oninput: move |e| username.set(e.value()),
            }
            label { r#for: "signup-email", "Email" }
            input {
                id: "signup-email",
                r#type: "email",
                required: true,
                value: email(),
                oninput: move |e| email.set(e.value()),
            }
            label { r#for: "signup-password", "Password" }
            input {
                id: "signup-password",
                r#type: "password",
                required: true,
                value: password(),
                oninput: move |e| password.set(e.value()),
            }
            button {
                r#type: "submit",
                disabled: busy(),
                if busy() { "Creating account…" } else { "Sign up" }
            }
        }
    }
}

/// Forget the token and go back to the login page.
#[component]
pub fn LogoutButton(
    #[props(default = "Log out".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
) -> Element {
    let client = use_api();
    let mut auth = use_auth();

    let onclick = move |_| {
        client.auth().logout();
        auth.set(AuthState::default());
        #[cfg(target_arch = "wasm32")]
        {
            if let Some(window) = web_sys::window() {
                let _ = window.location().set_href("/login");
            }
        }
    };

    rsx! {
        button {
            class: "{class}",
            onclick: onclick,
            "{label}"
        }
    }
}
