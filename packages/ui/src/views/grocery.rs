//! Recommended groceries, checked off one by one.

use api::models::GroceryRecommendation;
use dioxus::prelude::*;

use crate::{use_api, Loading};

/// Rows still on the list, as `(position, label)`. Positions identify rows;
/// recommendations may lack an ingredient name.
fn open_rows(list: &[GroceryRecommendation], bought: &[usize]) -> Vec<(usize, String)> {
    list.iter()
        .enumerate()
        .filter(|(i, _)| !bought.contains(i))
        .map(|(i, rec)| (i, rec.label()))
        .collect()
}

#[component]
pub fn GroceryList() -> Element {
    let client = use_api();
    let mut bought = use_signal(Vec::<usize>::new);

    let recommendations = use_resource(move || {
        let client = client.clone();
        async move { client.grocery().recommendations().await }
    });

    let body = match &*recommendations.read_unchecked() {
        None => rsx! { Loading {} },
        Some(result) => {
            let rows = match result {
                Ok(list) => open_rows(list, &bought.read()),
                Err(e) => {
                    tracing::warn!("failed to load grocery list: {e}");
                    Vec::new()
                }
            };
            rsx! {
                if rows.is_empty() {
                    p { class: "grocery-empty", "Your list is empty." }
                } else {
                    ul {
                        class: "grocery-list",
                        for (id, text) in rows {
                            li {
                                key: "{id}",
                                class: "grocery-item",
                                label {
                                    input {
                                        r#type: "checkbox",
                                        onchange: move |_| bought.write().push(id),
                                    }
                                    " {text}"
                                }
                            }
                        }
                    }
                }
            }
        }
    };

    rsx! {
        main {
            class: "grocery-page",
            h1 { "Grocery List" }
            p {
                class: "muted",
                "Ingredients that complete the most of your saved recipes."
            }
            div { class: "grocery-card", {body} }
        }
    }
}
