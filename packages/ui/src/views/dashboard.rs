//! Dashboard: latest recipes, a pantry preview and top grocery picks.
//!
//! All three lists load together under one [`AbortSignal`] that is fired
//! when the page unmounts; the resulting cancellation is never shown.

use api::models::RecipeRef;
use api::{AbortSignal, DashboardData};
use dioxus::prelude::*;

use super::NewRecipeForm;
use crate::{use_api, use_auth, ErrorBanner, Loading};

#[component]
pub fn Dashboard(on_open_recipe: EventHandler<String>) -> Element {
    let client = use_api();
    let auth = use_auth();
    let signal = use_hook(AbortSignal::new);
    use_drop({
        let signal = signal.clone();
        move || signal.abort()
    });

    let mut data = use_signal(|| Option::<DashboardData>::None);
    let mut error = use_signal(|| Option::<String>::None);

    let _loader = use_resource({
        let client = client.clone();
        move || {
            let client = client.clone();
            let signal = signal.clone();
            async move {
                match api::dashboard(&client, &signal).await {
                    Ok(loaded) => {
                        data.set(Some(loaded));
                        error.set(None);
                    }
                    Err(e) => error.set(e.user_message()),
                }
            }
        }
    });

    let on_created = move |recipe: RecipeRef| {
        if let Some(current) = data.write().as_mut() {
            current.add_recipe(recipe);
        }
        let client = client.clone();
        spawn(async move {
            match client.grocery().recommendations().await {
                Ok(recs) => {
                    if let Some(current) = data.write().as_mut() {
                        current.recommendations = recs;
                    }
                }
                Err(e) => tracing::warn!("failed to refresh recommendations: {e}"),
            }
        });
    };

    let greeting = auth()
        .user
        .map(|user| user.display_name().to_string())
        .unwrap_or_else(|| "chef".to_string());

    let body = match data() {
        None => rsx! { Loading {} },
        Some(loaded) => {
            let recipes: Vec<(String, String, Option<String>)> = loaded
                .recent_recipes()
                .iter()
                .map(|r| {
                    (
                        r.key(),
                        r.title.clone().unwrap_or_default(),
                        r.id.as_ref().map(ToString::to_string),
                    )
                })
                .collect();
            let pantry: Vec<(String, String, String)> = loaded
                .pantry_preview()
                .iter()
                .map(|p| {
                    let key = p
                        .id
                        .as_ref()
                        .map(ToString::to_string)
                        .unwrap_or_else(|| p.ingredient_name.clone());
                    (key, p.ingredient_name.clone(), p.amount())
                })
                .collect();
            let picks: Vec<String> = loaded
                .recommendations
                .iter()
                .take(api::dashboard::PREVIEW_LEN)
                .map(|rec| rec.label())
                .collect();
            let recipe_count = loaded.recipes.len();
            let pantry_count = loaded.pantry.len();

            rsx! {
                div {
                    class: "dash-stats",
                    div { class: "dash-stat", strong { "{recipe_count}" } " recipes" }
                    div { class: "dash-stat", strong { "{pantry_count}" } " pantry items" }
                }
                div {
                    class: "dash-grid",
                    section {
                        class: "card",
                        h2 { "Recent recipes" }
                        for (key, title, id) in recipes {
                            div {
                                key: "{key}",
                                class: "dash-list-item",
                                onclick: move |_| {
                                    if let Some(id) = &id {
                                        on_open_recipe.call(id.clone());
                                    }
                                },
                                p { "{title}" }
                            }
                        }
                    }
                    section {
                        class: "card",
                        h2 { "Pantry" }
                        for (key, name, amount) in pantry {
                            div {
                                key: "{key}",
                                class: "dash-list-item",
                                p { "{name}" }
                                span { class: "muted", "{amount}" }
                            }
                        }
                    }
                    section {
                        class: "card",
                        h2 { "Worth buying" }
                        for pick in picks {
                            p { key: "{pick}", "{pick}" }
                        }
                    }
                }
            }
        }
    };

    rsx! {
        main {
            class: "dashboard",
            h1 { class: "dash-title", "Welcome back, {greeting}" }
            NewRecipeForm { on_created }
            ErrorBanner { message: error() }
            {body}
        }
    }
}
