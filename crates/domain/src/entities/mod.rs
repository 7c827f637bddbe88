//! Domain entities

mod meal;

pub use meal::{Meal, MealStatus, NewMeal};
