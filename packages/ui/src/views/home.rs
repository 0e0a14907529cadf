use dioxus::prelude::*;

#[component]
pub fn Home() -> Element {
    rsx! {
        section {
            class: "hero",
            h1 { class: "hero-title", "Cook with what you have" }
            p {
                class: "hero-subtitle",
                "Save recipes from short videos, keep track of your pantry, and get a grocery list that unlocks the most meals."
            }
        }
        section {
            class: "features",
            article {
                class: "card",
                h3 { "Recipe Sharing" }
                p { "Paste a video link and get the recipe written out." }
            }
            article {
                class: "card",
                h3 { "Smart Pantry" }
                p { "Scan barcodes to fill your pantry and see which recipes you can make." }
            }
            article {
                class: "card",
                h3 { "Grocery Lists" }
                p { "Buy the few ingredients that complete the most recipes." }
            }
        }
    }
}
