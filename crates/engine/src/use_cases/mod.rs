//! Use cases - User story orchestration.
//!
//! Each module contains use cases for a specific domain area.
//! Use cases orchestrate across entity modules to fulfill user stories.

pub mod battle;
pub mod kitchen;
pub mod leaderboard;

pub use battle::{BattleEngine, BattleError, BattleResult, BattleUseCases};
pub use kitchen::{CreateMealData, KitchenOps, KitchenUseCases};
pub use leaderboard::{LeaderboardError, LeaderboardOps, LeaderboardUseCases};
