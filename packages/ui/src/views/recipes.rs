//! Recipe collection, detail and video extraction.

use api::models::{EntryId, IngredientCheck, RecipeRef};
use api::AbortSignal;
use dioxus::prelude::*;

use crate::{use_api, ErrorBanner, Loading};

/// Route parameters are strings; numeric ones are sent back as numbers.
fn parse_id(raw: &str) -> EntryId {
    raw.parse::<i64>()
        .map(EntryId::Number)
        .unwrap_or_else(|_| EntryId::Text(raw.to_string()))
}

#[component]
pub fn RecipeList(on_open: EventHandler<String>) -> Element {
    let client = use_api();
    let mut query = use_signal(String::new);
    let mut created = use_signal(Vec::<RecipeRef>::new);

    let recipes = use_resource(move || {
        let client = client.clone();
        async move { client.recipes().list().await }
    });

    let body = match &*recipes.read_unchecked() {
        None => rsx! { Loading {} },
        Some(Err(e)) => rsx! { ErrorBanner { message: e.user_message() } },
        Some(Ok(list)) => {
            let needle = query().to_lowercase();
            let shown: Vec<RecipeRef> = created
                .read()
                .iter()
                .chain(list.iter())
                .filter(|r| {
                    r.title
                        .as_deref()
                        .unwrap_or_default()
                        .to_lowercase()
                        .contains(&needle)
                })
                .cloned()
                .collect();
            rsx! {
                if shown.is_empty() {
                    p { class: "muted", "No recipes yet." }
                }
                div {
                    class: "recipe-grid",
                    for (key, recipe) in shown.into_iter().map(|r| (r.key(), r)) {
                        RecipeCard { key: "{key}", recipe, on_open }
                    }
                }
            }
        }
    };

    rsx! {
        main {
            class: "page",
            h1 { "Recipe Collection" }
            input {
                r#type: "search",
                placeholder: "Search recipe titles…",
                value: query(),
                oninput: move |e| query.set(e.value()),
            }
            NewRecipeForm {
                on_created: move |recipe: RecipeRef| created.write().insert(0, recipe),
            }
            {body}
        }
    }
}

#[component]
fn RecipeCard(recipe: RecipeRef, on_open: EventHandler<String>) -> Element {
    let title = recipe.title.clone().unwrap_or_else(|| "Untitled".to_string());
    let id = recipe.id.as_ref().map(ToString::to_string);
    rsx! {
        article {
            class: "card recipe-card",
            onclick: move |_| {
                if let Some(id) = &id {
                    on_open.call(id.clone());
                }
            },
            h3 { "{title}" }
            if let Some(caption) = recipe.caption() {
                p { class: "muted", "{caption}" }
            }
        }
    }
}

/// Turn a short-video URL into a saved recipe.
#[component]
pub fn NewRecipeForm(on_created: EventHandler<RecipeRef>) -> Element {
    let client = use_api();
    let mut url = use_signal(String::new);
    let mut busy = use_signal(|| false);
    let mut error = use_signal(|| Option::<String>::None);

    let onsubmit = move |evt: FormEvent| {
        evt.prevent_default();
        let client = client.clone();
        async move {
            let link = url().trim().to_string();
            if link.is_empty() {
                return;
            }
            busy.set(true);
            error.set(None);
            match client.recipes().extract(&link).await {
                Ok(recipe) => {
                    url.set(String::new());
                    on_created.call(recipe);
                }
                Err(e) => error.set(e.user_message()),
            }
            busy.set(false);
        }
    };

    rsx! {
        form {
            class: "new-recipe",
            onsubmit: onsubmit,
            input {
                r#type: "url",
                placeholder: "Paste a recipe video link",
                value: url(),
                oninput: move |e| url.set(e.value()),
            }
            button {
                r#type: "submit",
                disabled: busy(),
                if busy() { "Extracting…" } else { "Add recipe" }
            }
            ErrorBanner { message: error() }
        }
    }
}

#[component]
pub fn RecipeDetail(id: ReadOnlySignal<String>, on_back: EventHandler<()>) -> Element {
    let client = use_api();
    let signal = use_hook(AbortSignal::new);
    use_drop({
        let signal = signal.clone();
        move || signal.abort()
    });
    let mut check = use_signal(|| Option::<IngredientCheck>::None);
    let mut action_error = use_signal(|| Option::<String>::None);

    let recipe = use_resource({
        let client = client.clone();
        let signal = signal.clone();
        move || {
            let client = client.clone();
            let signal = signal.clone();
            let entry = parse_id(&id());
            async move { client.recipes().with_signal(&signal).get(&entry).await }
        }
    });

    let check_pantry = {
        let client = client.clone();
        move |_| {
            let client = client.clone();
            async move {
                match client.pantry().check_recipe(&parse_id(&id())).await {
                    Ok(result) => check.set(Some(result)),
                    Err(e) => action_error.set(e.user_message()),
                }
            }
        }
    };

    let delete = move |_| {
        let client = client.clone();
        async move {
            match client.recipes().delete(&parse_id(&id())).await {
                Ok(()) => on_back.call(()),
                Err(e) => action_error.set(e.user_message()),
            }
        }
    };

    let body = match &*recipe.read_unchecked() {
        None => rsx! { Loading {} },
        Some(Err(e)) => rsx! { ErrorBanner { message: e.user_message() } },
        Some(Ok(recipe)) => {
            let title = recipe.title.clone().unwrap_or_default();
            let caption = recipe.caption().map(str::to_string);
            let ingredients = recipe.ingredient_lines();
            let steps = recipe.instruction_steps();
            rsx! {
                article {
                    class: "recipe-detail card",
                    h1 { "{title}" }
                    if let Some(caption) = caption {
                        p { class: "recipe-detail-caption", "{caption}" }
                    }
                    section {
                        h2 { "Ingredients" }
                        ul {
                            for (i, line) in ingredients.into_iter().enumerate() {
                                li { key: "{i}", "{line}" }
                            }
                        }
                    }
                    section {
                        h2 { "Instructions" }
                        if steps.is_empty() {
                            p { class: "muted", "No instructions provided." }
                        } else {
                            ol {
                                for (i, step) in steps.into_iter().enumerate() {
                                    li { key: "{i}", "{step}" }
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
            class: "page",
            button { class: "back-link", onclick: move |_| on_back.call(()), "← Back to Recipes" }
            {body}
            div {
                class: "recipe-actions",
                button { class: "btn", onclick: check_pantry, "Check my pantry" }
                button { class: "btn btn-danger", onclick: delete, "Delete" }
            }
            ErrorBanner { message: action_error() }
            if let Some(result) = check() {
                PantryCheck { check: result }
            }
        }
    }
}

#[component]
fn PantryCheck(check: IngredientCheck) -> Element {
    let verdict = match check.can_make {
        Some(true) => "You can make this now.",
        Some(false) => "Some ingredients are missing.",
        None => "",
    };
    let missing = check.missing.join(", ");
    rsx! {
        section {
            class: "pantry-check",
            p { "Have {check.have_count} of {check.total_ingredients} ingredients. {verdict}" }
            if !check.missing.is_empty() {
                p { class: "muted", "Missing: {missing}" }
            }
        }
    }
}
