//! Terrain recipes: weighted, patchy and layered block selection.
#![forbid(unsafe_code)]

pub mod book;
pub mod colour;
pub mod error;
pub mod recipe;
pub mod rng;

pub use book::RecipeBook;
pub use colour::block_colour;
pub use error::RecipeError;
pub use recipe::{Mode, RecipeId, Row, TerrainRecipe, compare_by_name};
pub use rng::JavaRandom;
