//! Meal entity module.
//!
//! The record store: wraps the meal repository port and applies the
//! soft-delete rules. Every read goes through [`active`], so a deleted row
//! looks exactly like a missing one to callers.

use std::sync::Arc;

use mealmax_domain::{BattleOutcome, DomainError, LeaderboardSort, Meal, MealId, NewMeal};

use crate::infrastructure::ports::{MealRepo, RepoError};

const ENTITY: &str = "Meal";

/// Meal entity - handles catalog operations.
pub struct Meals {
    repo: Arc<dyn MealRepo>,
}

impl Meals {
    pub fn new(repo: Arc<dyn MealRepo>) -> Self {
        Self { repo }
    }

    /// Insert a validated meal with zeroed battle stats.
    pub async fn create(&self, meal: NewMeal) -> Result<Meal, MealError> {
        let id = match self.repo.insert(&meal).await {
            Ok(id) => id,
            Err(e) if e.is_constraint_violation() => {
                tracing::warn!(name = %meal.name, "Rejected duplicate meal name");
                return Err(DomainError::duplicate(ENTITY, meal.name.as_str()).into());
            }
            Err(e) => return Err(e.into()),
        };

        tracing::info!(meal_id = %id, name = %meal.name, "Created meal");
        Ok(meal.into_meal(id))
    }

    /// Soft-delete a meal. Distinguishes missing from already deleted.
    pub async fn delete(&self, id: MealId) -> Result<(), MealError> {
        let mut meal = self.stored(id).await?;
        meal.mark_deleted()?;
        self.repo.mark_deleted(id).await?;
        tracing::info!(meal_id = %id, "Soft-deleted meal");
        Ok(())
    }

    pub async fn get(&self, id: MealId) -> Result<Meal, MealError> {
        let meal = self.repo.get(id).await?;
        tracing::debug!(meal_id = %id, found = meal.is_some(), "Looked up meal by id");
        Ok(active(meal, || DomainError::not_found_id(ENTITY, id))?)
    }

    pub async fn get_by_name(&self, name: &str) -> Result<Meal, MealError> {
        let meal = self.repo.get_by_name(name).await?;
        tracing::debug!(name, found = meal.is_some(), "Looked up meal by name");
        Ok(active(meal, || DomainError::not_found_name(ENTITY, name))?)
    }

    /// Record one battle result against a live meal.
    pub async fn record_outcome(&self, id: MealId, outcome: BattleOutcome) -> Result<(), MealError> {
        let mut meal = self.stored(id).await?;
        meal.record(outcome)?;
        self.repo.increment_stats(id, outcome).await?;
        tracing::debug!(meal_id = %id, outcome = %outcome, "Recorded battle outcome");
        Ok(())
    }

    /// Record a finished battle for both meals, or for neither.
    ///
    /// Both records are checked before anything is written, and the store
    /// applies the two updates in one transaction.
    pub async fn record_battle(&self, winner: MealId, loser: MealId) -> Result<(), MealError> {
        let mut winning = self.stored(winner).await?;
        let mut losing = self.stored(loser).await?;
        winning.record(BattleOutcome::Win)?;
        losing.record(BattleOutcome::Loss)?;

        self.repo.record_battle(winner, loser).await?;
        tracing::debug!(winner = %winner, loser = %loser, "Recorded battle");
        Ok(())
    }

    /// Live, battle-tested meals ordered by the requested statistic.
    pub async fn ranked(&self, sort: LeaderboardSort) -> Result<Vec<Meal>, MealError> {
        Ok(self.repo.leaderboard(sort).await?)
    }

    /// Destroy every record and recreate the empty table.
    pub async fn reset_catalog(&self) -> Result<(), MealError> {
        self.repo.reset().await?;
        tracing::info!("Meal catalog reset");
        Ok(())
    }

    pub async fn health_check(&self) -> Result<(), MealError> {
        Ok(self.repo.ping().await?)
    }

    /// Stored row including soft-deleted ones; missing rows are NotFound.
    async fn stored(&self, id: MealId) -> Result<Meal, MealError> {
        self.repo
            .get(id)
            .await?
            .ok_or_else(|| DomainError::not_found_id(ENTITY, id).into())
    }
}

/// The single active-record filter for every read path.
fn active(meal: Option<Meal>, missing: impl FnOnce() -> DomainError) -> Result<Meal, DomainError> {
    match meal {
        Some(meal) if !meal.is_deleted() => Ok(meal),
        _ => Err(missing()),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum MealError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}

impl MealError {
    pub fn domain(&self) -> Option<&DomainError> {
        match self {
            Self::Domain(e) => Some(e),
            Self::Repo(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use mealmax_domain::{CuisineName, Difficulty, MealName, MealStatus, Price};
    use mockall::predicate::eq;

    use super::*;
    use crate::infrastructure::ports::MockMealRepo;

    fn new_meal(name: &str, price: f64, difficulty: Difficulty) -> NewMeal {
        NewMeal::new(
            MealName::new(name).expect("name"),
            CuisineName::new("Japanese").expect("cuisine"),
            Price::new(price).expect("price"),
            difficulty,
        )
    }

    fn pizza(status: MealStatus) -> Meal {
        let mut meal = new_meal("Pizza", 15.0, Difficulty::High).into_meal(MealId::new(1));
        meal.status = status;
        meal
    }

    #[tokio::test]
    async fn create_returns_fresh_record() {
        let mut repo = MockMealRepo::new();
        repo.expect_insert()
            .withf(|meal| meal.name.as_str() == "Sushi" && meal.difficulty == Difficulty::High)
            .times(1)
            .returning(|_| Ok(MealId::new(7)));

        let meals = Meals::new(Arc::new(repo));
        let meal = meals
            .create(new_meal("Sushi", 10.0, Difficulty::High))
            .await
            .expect("created");

        assert_eq!(meal.id, MealId::new(7));
        assert_eq!((meal.battles, meal.wins), (0, 0));
        assert_eq!(meal.status, MealStatus::Active);
    }

    #[tokio::test]
    async fn create_maps_constraint_violation_to_duplicate() {
        let mut repo = MockMealRepo::new();
        repo.expect_insert()
            .returning(|_| Err(RepoError::constraint("UNIQUE constraint failed: meals.meal")));

        let meals = Meals::new(Arc::new(repo));
        let err = meals
            .create(new_meal("Sushi", 11.0, Difficulty::Med))
            .await
            .expect_err("duplicate");

        assert_eq!(err.to_string(), "Meal with name 'Sushi' already exists");
        assert!(matches!(err.domain(), Some(DomainError::Duplicate { .. })));
    }

    #[tokio::test]
    async fn delete_reads_record_then_marks_deleted() {
        let mut repo = MockMealRepo::new();
        let mut seq = mockall::Sequence::new();
        repo.expect_get()
            .with(eq(MealId::new(1)))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(Some(pizza(MealStatus::Active))));
        repo.expect_mark_deleted()
            .with(eq(MealId::new(1)))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));

        Meals::new(Arc::new(repo))
            .delete(MealId::new(1))
            .await
            .expect("deleted");
    }

    #[tokio::test]
    async fn delete_missing_meal_is_not_found() {
        let mut repo = MockMealRepo::new();
        repo.expect_get().returning(|_| Ok(None));
        repo.expect_mark_deleted().never();

        let err = Meals::new(Arc::new(repo))
            .delete(MealId::new(999))
            .await
            .expect_err("missing");
        assert_eq!(err.to_string(), "Meal with ID 999 not found");
    }

    #[tokio::test]
    async fn delete_twice_reports_already_deleted() {
        let mut repo = MockMealRepo::new();
        repo.expect_get()
            .returning(|_| Ok(Some(pizza(MealStatus::Deleted))));
        repo.expect_mark_deleted().never();

        let err = Meals::new(Arc::new(repo))
            .delete(MealId::new(1))
            .await
            .expect_err("already deleted");
        assert_eq!(err.to_string(), "Meal with ID 1 has been deleted");
    }

    #[tokio::test]
    async fn get_returns_active_meal() {
        let mut repo = MockMealRepo::new();
        repo.expect_get()
            .with(eq(MealId::new(1)))
            .returning(|_| Ok(Some(pizza(MealStatus::Active))));

        let meal = Meals::new(Arc::new(repo))
            .get(MealId::new(1))
            .await
            .expect("found");
        assert_eq!(meal, pizza(MealStatus::Active));
    }

    #[tokio::test]
    async fn get_hides_deleted_and_missing_meals() {
        let mut repo = MockMealRepo::new();
        repo.expect_get()
            .with(eq(MealId::new(1)))
            .returning(|_| Ok(Some(pizza(MealStatus::Deleted))));
        repo.expect_get()
            .with(eq(MealId::new(999)))
            .returning(|_| Ok(None));

        let meals = Meals::new(Arc::new(repo));
        let deleted = meals.get(MealId::new(1)).await.expect_err("deleted");
        assert_eq!(deleted.to_string(), "Meal with ID 1 not found");
        let missing = meals.get(MealId::new(999)).await.expect_err("missing");
        assert_eq!(missing.to_string(), "Meal with ID 999 not found");
    }

    #[tokio::test]
    async fn get_by_name_hides_missing_meal() {
        let mut repo = MockMealRepo::new();
        repo.expect_get_by_name()
            .withf(|name| name == "Pizza")
            .returning(|_| Ok(Some(pizza(MealStatus::Active))));
        repo.expect_get_by_name()
            .withf(|name| name == "LarryElison")
            .returning(|_| Ok(None));

        let meals = Meals::new(Arc::new(repo));
        assert_eq!(
            meals.get_by_name("Pizza").await.expect("found").id,
            MealId::new(1)
        );
        let err = meals.get_by_name("LarryElison").await.expect_err("missing");
        assert_eq!(err.to_string(), "Meal with name LarryElison not found");
    }

    #[tokio::test]
    async fn record_outcome_increments_live_meal() {
        let mut repo = MockMealRepo::new();
        repo.expect_get()
            .returning(|_| Ok(Some(pizza(MealStatus::Active))));
        repo.expect_increment_stats()
            .with(eq(MealId::new(1)), eq(BattleOutcome::Win))
            .times(1)
            .returning(|_, _| Ok(()));

        Meals::new(Arc::new(repo))
            .record_outcome(MealId::new(1), BattleOutcome::Win)
            .await
            .expect("recorded");
    }

    #[tokio::test]
    async fn record_outcome_rejects_deleted_meal_without_updating() {
        let mut repo = MockMealRepo::new();
        repo.expect_get()
            .with(eq(MealId::new(1)))
            .times(1)
            .returning(|_| Ok(Some(pizza(MealStatus::Deleted))));
        repo.expect_increment_stats().never();

        let err = Meals::new(Arc::new(repo))
            .record_outcome(MealId::new(1), BattleOutcome::Win)
            .await
            .expect_err("deleted");
        assert_eq!(err.to_string(), "Meal with ID 1 has been deleted");
    }

    fn meal_with(id: i64, status: MealStatus) -> Meal {
        let mut meal = new_meal("Steak", 23.0, Difficulty::High).into_meal(MealId::new(id));
        meal.status = status;
        meal
    }

    #[tokio::test]
    async fn record_battle_writes_both_rows_in_one_call() {
        let mut repo = MockMealRepo::new();
        repo.expect_get()
            .returning(|id| Ok(Some(meal_with(id.get(), MealStatus::Active))));
        repo.expect_record_battle()
            .with(eq(MealId::new(2)), eq(MealId::new(1)))
            .times(1)
            .returning(|_, _| Ok(()));
        repo.expect_increment_stats().never();

        Meals::new(Arc::new(repo))
            .record_battle(MealId::new(2), MealId::new(1))
            .await
            .expect("recorded");
    }

    #[tokio::test]
    async fn record_battle_writes_nothing_when_either_side_is_deleted() {
        for deleted in [1, 2] {
            let mut repo = MockMealRepo::new();
            repo.expect_get().returning(move |id| {
                let status = if id.get() == deleted {
                    MealStatus::Deleted
                } else {
                    MealStatus::Active
                };
                Ok(Some(meal_with(id.get(), status)))
            });
            repo.expect_record_battle().never();
            repo.expect_increment_stats().never();

            let err = Meals::new(Arc::new(repo))
                .record_battle(MealId::new(1), MealId::new(2))
                .await
                .expect_err("deleted combatant");
            assert_eq!(
                err.to_string(),
                format!("Meal with ID {deleted} has been deleted")
            );
        }
    }

    #[tokio::test]
    async fn record_battle_with_missing_meal_is_not_found() {
        let mut repo = MockMealRepo::new();
        repo.expect_get()
            .with(eq(MealId::new(1)))
            .returning(|_| Ok(Some(meal_with(1, MealStatus::Active))));
        repo.expect_get()
            .with(eq(MealId::new(999)))
            .returning(|_| Ok(None));
        repo.expect_record_battle().never();

        let err = Meals::new(Arc::new(repo))
            .record_battle(MealId::new(1), MealId::new(999))
            .await
            .expect_err("missing loser");
        assert_eq!(err.to_string(), "Meal with ID 999 not found");
    }

    #[tokio::test]
    async fn repository_failures_pass_through() {
        let mut repo = MockMealRepo::new();
        repo.expect_reset()
            .returning(|| Err(RepoError::database("reset_catalog", "disk full")));

        let err = Meals::new(Arc::new(repo))
            .reset_catalog()
            .await
            .expect_err("failed");
        assert!(matches!(err, MealError::Repo(RepoError::Database { .. })));
        assert!(err.domain().is_none());
    }
}
