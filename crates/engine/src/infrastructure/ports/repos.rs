//! Repository port traits for database access.

use async_trait::async_trait;
use mealmax_domain::{BattleOutcome, LeaderboardSort, Meal, MealId, NewMeal};

use super::error::RepoError;

// =============================================================================
// Meal Catalog
// =============================================================================

/// Raw access to the meal table.
///
/// Lookups return soft-deleted rows too; the `Meals` entity applies the
/// active-record filter so the rule lives in one place.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MealRepo: Send + Sync {
    /// Insert a meal. Fails with `ConstraintViolation` when the name is
    /// already taken by an active meal.
    async fn insert(&self, meal: &NewMeal) -> Result<MealId, RepoError>;

    async fn get(&self, id: MealId) -> Result<Option<Meal>, RepoError>;

    /// Active row for this name if one exists, else the newest deleted one.
    async fn get_by_name(&self, name: &str) -> Result<Option<Meal>, RepoError>;

    async fn mark_deleted(&self, id: MealId) -> Result<(), RepoError>;

    /// Increment `battles`, and `wins` too when the outcome is a win.
    async fn increment_stats(&self, id: MealId, outcome: BattleOutcome) -> Result<(), RepoError>;

    /// Count one battle for both meals atomically: a win for `winner` and a
    /// loss for `loser`. Neither row changes unless both are live.
    async fn record_battle(&self, winner: MealId, loser: MealId) -> Result<(), RepoError>;

    /// Active meals with at least one battle, ordered descending by `sort`.
    async fn leaderboard(&self, sort: LeaderboardSort) -> Result<Vec<Meal>, RepoError>;

    /// Drop and recreate the table from the schema script.
    async fn reset(&self) -> Result<(), RepoError>;

    /// Round-trip a trivial query to confirm the store is reachable.
    async fn ping(&self) -> Result<(), RepoError>;
}
