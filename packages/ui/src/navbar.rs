use dioxus::prelude::*;

use crate::{use_auth, LogoutButton};

#[component]
pub fn Navbar(children: Element) -> Element {
    let auth = use_auth();
    let state = auth();
    let user_name = state.display_name().map(str::to_string);

    rsx! {
        nav {
            class: "navbar",
            span { class: "navbar-brand", "reciPal" }
            div { class: "navbar-links", {children} }
            if state.authenticated {
                div {
                    class: "navbar-user",
                    if let Some(name) = user_name {
                        span { "{name}" }
                    }
                    LogoutButton { class: "navbar-logout" }
                }
            }
        }
    }
}
