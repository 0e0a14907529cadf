//! Route targets: the shared views plus where each one navigates to.

use dioxus::prelude::*;

use crate::Route;

pub use ui::views::Home;

#[component]
pub fn DashboardPage() -> Element {
    let nav = use_navigator();
    rsx! {
        ui::views::Dashboard {
            on_open_recipe: move |id: String| {
                nav.push(Route::RecipeView { id });
            },
        }
    }
}

#[component]
pub fn Recipes() -> Element {
    let nav = use_navigator();
    rsx! {
        ui::views::RecipeList {
            on_open: move |id: String| {
                nav.push(Route::RecipeView { id });
            },
        }
    }
}

#[component]
pub fn RecipeView(id: String) -> Element {
    let nav = use_navigator();
    rsx! {
        ui::views::RecipeDetail {
            id,
            on_back: move |_| {
                nav.push(Route::Recipes {});
            },
        }
    }
}

#[component]
pub fn Pantry() -> Element {
    rsx! {
        ui::views::PantryPage {}
    }
}

#[component]
pub fn Grocery() -> Element {
    rsx! {
        ui::views::GroceryList {}
    }
}

#[component]
pub fn Account() -> Element {
    let nav = use_navigator();
    rsx! {
        ui::views::Profile {
            on_login: move |_| {
                nav.push(Route::Login {});
            },
        }
    }
}

#[component]
pub fn Login() -> Element {
    let nav = use_navigator();
    rsx! {
        main {
            class: "auth-page",
            ui::LoginForm {
                on_success: move |_| {
                    nav.replace(Route::DashboardPage {});
                },
            }
            p {
                "No account yet? "
                Link { to: Route::Signup {}, "Sign up" }
            }
        }
    }
}

#[component]
pub fn Signup() -> Element {
    let nav = use_navigator();
    rsx! {
        main {
            class: "auth-page",
            ui::SignupForm {
                on_success: move |signed_in: bool| {
                    if signed_in {
                        nav.replace(Route::DashboardPage {});
                    }
                },
            }
            p {
                "Already registered? "
                Link { to: Route::Login {}, "Log in" }
            }
        }
    }
}
