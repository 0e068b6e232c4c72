pub mod draft;
pub mod store;

pub use draft::{DraftFields, Field};
pub use store::{AddError, Recipe, RecipeStore};
