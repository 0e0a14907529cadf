use dioxus::prelude::*;

use ui::{use_auth, AppProvider, Navbar};
use views::{
    Account, DashboardPage, Grocery, Home, Login, Pantry, RecipeView, Recipes, Signup,
};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(Shell)]
        #[route("/")]
        Home {},
        #[route("/dashboard")]
        DashboardPage {},
        #[route("/recipes")]
        Recipes {},
        #[route("/recipes/:id")]
        RecipeView { id: String },
        #[route("/pantry")]
        Pantry {},
        #[route("/grocery")]
        Grocery {},
        #[route("/profile")]
        Account {},
        #[route("/login")]
        Login {},
        #[route("/signup")]
        Signup {},
}

const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    init_logging();
    dioxus::launch(App);
}

/// Native runs get an `EnvFilter` subscriber (`RUST_LOG`); the browser uses
/// the logger `dioxus::launch` installs.
fn init_logging() {
    #[cfg(not(target_arch = "wasm32"))]
    {
        use tracing_subscriber::EnvFilter;

        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
    }
}

#[component]
fn App() -> Element {
    rsx! {
        document::Title { "reciPal" }
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        AppProvider {
            Router::<Route> {}
        }
    }
}

/// Navigation bar around every page.
#[component]
fn Shell() -> Element {
    let auth = use_auth();

    rsx! {
        Navbar {
            Link { to: Route::Home {}, "Home" }
            Link { to: Route::DashboardPage {}, "Dashboard" }
            Link { to: Route::Recipes {}, "Recipes" }
            Link { to: Route::Pantry {}, "Pantry" }
            Link { to: Route::Grocery {}, "Grocery List" }
            if auth().authenticated {
                Link { to: Route::Account {}, "Profile" }
            } else {
                Link { to: Route::Login {}, "Log in" }
                Link { to: Route::Signup {}, "Sign up" }
            }
        }
        Outlet::<Route> {}
    }
}
