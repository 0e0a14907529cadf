//! Page bodies. Each takes callbacks for anything that navigates.

mod dashboard;
pub use dashboard::Dashboard;

mod grocery;
pub use grocery::GroceryList;

mod home;
pub use home::Home;

mod pantry;
pub use pantry::PantryPage;

mod recipes;
pub use recipes::{NewRecipeForm, RecipeDetail, RecipeList};

mod profile;
pub use profile::Profile;
