//! Who is signed in, with a way out.

use dioxus::prelude::*;

use crate::{use_api, use_auth, Loading, LogoutButton};

#[component]
pub fn Profile(on_login: EventHandler<()>) -> Element {
    let client = use_api();
    let auth = use_auth();
    let state = auth();

    let pantry_count = use_resource(move || {
        let client = client.clone();
        async move {
            if !auth().authenticated {
                return None;
            }
            match client.pantry().list().await {
                Ok(rows) => Some(rows.len()),
                Err(e) => {
                    tracing::warn!("failed to count pantry items: {e}");
                    None
                }
            }
        }
    });

    if !state.authenticated {
        return rsx! {
            main {
                class: "profile-page",
                h1 { "Account" }
                p { class: "muted", "You are not signed in." }
                button {
                    class: "btn btn-primary",
                    onclick: move |_| on_login.call(()),
                    "Log in"
                }
            }
        };
    }

    let name = state.display_name().unwrap_or("friend").to_string();
    let email = state.user.as_ref().and_then(|user| user.email.clone());
    let pantry_body = match &*pantry_count.read_unchecked() {
        None => rsx! { Loading {} },
        Some(Some(count)) => rsx! {
            p {
                b { "{count}" }
                " item(s) in pantry"
            }
        },
        Some(None) => rsx! { p { class: "muted", "Pantry unavailable." } },
    };

    rsx! {
        main {
            class: "profile-page",
            h1 { "Account" }
            p { "Welcome back, {name}" }

            section {
                class: "card",
                h2 { "Your pantry" }
                {pantry_body}
            }

            section {
                class: "card",
                h2 { "Session" }
                if let Some(email) = email {
                    p {
                        class: "muted",
                        "Signed in as "
                        b { "{email}" }
                    }
                } else {
                    p { class: "muted", "Signed in" }
                }
                LogoutButton { class: "btn" }
            }
        }
    }
}
