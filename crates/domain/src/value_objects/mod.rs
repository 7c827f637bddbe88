//! Value objects - Immutable objects defined by their attributes

mod difficulty;
mod names;
mod price;

pub use difficulty::Difficulty;
pub use names::{CuisineName, MealName};
pub use price::Price;
