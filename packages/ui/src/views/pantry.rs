//! Pantry page: scan or type barcodes, search, remove.
//!
//! The page owns one [`PlatformScanner`](crate::PlatformScanner) and stops it
//! when it unmounts, so the camera never outlives the page.

use dioxus::prelude::*;
use pantry::{PantryItem, PantryList};

use crate::{make_scanner, ErrorBanner, SCANNER_VIDEO_ID};

#[component]
pub fn PantryPage() -> Element {
    let scanner = use_hook(make_scanner);
    let mut items = use_signal(PantryList::new);
    let mut query = use_signal(String::new);
    let mut manual = use_signal(String::new);
    let mut scanning = use_signal(|| false);
    let mut error = use_signal(|| Option::<String>::None);
    let mut last_added = use_signal(|| Option::<String>::None);

    use_drop({
        let scanner = scanner.clone();
        move || scanner.stop()
    });

    let start_scan = {
        let scanner = scanner.clone();
        move |_| {
            let scanner = scanner.clone();
            async move {
                error.set(None);
                scanning.set(true);
                let outcome = scanner
                    .scan(move |code: &str| {
                        let item = items.write().add_item(code);
                        last_added.set(Some(item.title));
                    })
                    .await;
                match outcome {
                    Ok(outcome) => tracing::debug!(?outcome, "scan finished"),
                    Err(e) => error.set(Some(e.to_string())),
                }
                scanning.set(scanner.is_active());
            }
        }
    };

    let stop_scan = {
        let scanner = scanner.clone();
        move |_| {
            scanner.stop();
            scanning.set(false);
        }
    };

    let add_manual = move |evt: FormEvent| {
        evt.prevent_default();
        if let Some(item) = items.write().add_manual(&manual()) {
            last_added.set(Some(item.title));
            manual.set(String::new());
        }
    };

    let visible: Vec<PantryItem> = items.read().search(&query()).into_iter().cloned().collect();
    let total = items.read().len();

    rsx! {
        main {
            class: "pantry-page",
            h1 { "My Pantry" }
            p { class: "muted", "{total} item(s) scanned" }

            section {
                class: "scanner",
                video {
                    id: SCANNER_VIDEO_ID,
                    class: "scanner-preview",
                    autoplay: true,
                    muted: true,
                    hidden: !scanning(),
                }
                if scanning() {
                    button { class: "btn", onclick: stop_scan, "Stop scanning" }
                } else {
                    button { class: "btn btn-primary", onclick: start_scan, "Scan barcode" }
                }
                ErrorBanner { message: error() }
                if let Some(title) = last_added() {
                    p { class: "notice", "Added {title}" }
                }
            }

            form {
                class: "manual-entry",
                onsubmit: add_manual,
                input {
                    placeholder: "Enter a barcode",
                    value: manual(),
                    oninput: move |e| manual.set(e.value()),
                }
                button { r#type: "submit", "Add" }
            }

            input {
                class: "pantry-search",
                r#type: "search",
                placeholder: "Search by name, brand or barcode…",
                value: query(),
                oninput: move |e| query.set(e.value()),
            }

            if visible.is_empty() {
                p { class: "muted", "Nothing here yet." }
            } else {
                ul {
                    class: "pantry-list",
                    for item in visible {
                        PantryRow {
                            key: "{item.id}",
                            item: item.clone(),
                            on_remove: move |id: String| items.write().remove_item(&id),
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn PantryRow(item: PantryItem, on_remove: EventHandler<String>) -> Element {
    let id = item.id.clone();
    rsx! {
        li {
            class: "pantry-item",
            div {
                strong { "{item.title}" }
                span { class: "muted", " {item.brand}" }
            }
            code { "{item.barcode}" }
            button {
                class: "btn btn-small",
                onclick: move |_| on_remove.call(id.clone()),
                "Remove"
            }
        }
    }
}
