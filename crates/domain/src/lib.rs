//! MealMax domain: meal records, scoring, and battle rules.
//!
//! Everything here is pure. Persistence and randomness live in the engine
//! and are passed in as values.

pub mod battle;
pub mod entities;
pub mod error;
pub mod ids;
pub mod leaderboard;
pub mod scoring;
pub mod value_objects;

pub use battle::{decide, win_probability, BattleOutcome, CombatantList, Side, MAX_COMBATANTS};
pub use entities::{Meal, MealStatus, NewMeal};
pub use error::DomainError;
pub use ids::MealId;
pub use leaderboard::{LeaderboardEntry, LeaderboardSort};
pub use scoring::{ScoringTable, TierWeights};
pub use value_objects::{CuisineName, Difficulty, MealName, Price};
