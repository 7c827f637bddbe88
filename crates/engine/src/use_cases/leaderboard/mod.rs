//! Leaderboard use cases.

use std::sync::Arc;

use mealmax_domain::{DomainError, LeaderboardEntry, LeaderboardSort};

use crate::entities::{MealError, Meals};

/// Container for leaderboard use cases.
pub struct LeaderboardUseCases {
    pub ops: Arc<LeaderboardOps>,
}

impl LeaderboardUseCases {
    pub fn new(ops: Arc<LeaderboardOps>) -> Self {
        Self { ops }
    }
}

pub struct LeaderboardOps {
    meals: Arc<Meals>,
}

impl LeaderboardOps {
    pub fn new(meals: Arc<Meals>) -> Self {
        Self { meals }
    }

    /// Ranked live meals that have fought at least once.
    ///
    /// `sort` defaults to wins; any key other than `wins` or `win_pct` is rejected.
    pub async fn leaderboard(
        &self,
        sort: Option<&str>,
    ) -> Result<Vec<LeaderboardEntry>, LeaderboardError> {
        let sort = match sort {
            Some(key) => key.parse::<LeaderboardSort>().inspect_err(|_| {
                tracing::warn!(sort = key, "Rejected leaderboard sort key");
            })?,
            None => LeaderboardSort::default(),
        };

        let entries: Vec<LeaderboardEntry> = self
            .meals
            .ranked(sort)
            .await?
            .into_iter()
            .filter_map(LeaderboardEntry::from_meal)
            .collect();

        tracing::debug!(sort = %sort, rows = entries.len(), "Built leaderboard");
        Ok(entries)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LeaderboardError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Meal(#[from] MealError),
}

impl LeaderboardError {
    pub fn domain(&self) -> Option<&DomainError> {
        match self {
            Self::Domain(e) => Some(e),
            Self::Meal(e) => e.domain(),
        }
    }
}

#[cfg(test)]
mod tests {
    use mealmax_domain::{CuisineName, Difficulty, Meal, MealId, MealName, NewMeal, Price};
    use mockall::predicate::eq;

    use super::*;
    use crate::infrastructure::ports::MockMealRepo;

    fn fought(id: i64, name: &str, battles: u32, wins: u32) -> Meal {
        let mut meal = NewMeal::new(
            MealName::new(name).expect("name"),
            CuisineName::new("Italian").expect("cuisine"),
            Price::new(10.0).expect("price"),
            Difficulty::Med,
        )
        .into_meal(MealId::new(id));
        meal.battles = battles;
        meal.wins = wins;
        meal
    }

    fn ops_with(repo: MockMealRepo) -> LeaderboardOps {
        LeaderboardOps::new(Arc::new(Meals::new(Arc::new(repo))))
    }

    #[tokio::test]
    async fn defaults_to_wins_and_keeps_store_order() {
        let mut repo = MockMealRepo::new();
        repo.expect_leaderboard()
            .with(eq(LeaderboardSort::Wins))
            .times(1)
            .returning(|_| {
                Ok(vec![
                    fought(1, "Meal A", 10, 4),
                    fought(2, "Meal B", 6, 3),
                    fought(3, "Meal C", 3, 1),
                ])
            });

        let rows = ops_with(repo).leaderboard(None).await.expect("ranked");
        let wins: Vec<u32> = rows.iter().map(|r| r.wins).collect();
        assert_eq!(wins, vec![4, 3, 1]);
        assert_eq!(rows[0].win_pct, 40.0);
        assert_eq!(rows[2].win_pct, 33.3);
    }

    #[tokio::test]
    async fn win_pct_key_is_passed_through() {
        let mut repo = MockMealRepo::new();
        repo.expect_leaderboard()
            .with(eq(LeaderboardSort::WinPct))
            .times(1)
            .returning(|_| Ok(vec![fought(2, "Meal B", 6, 3), fought(1, "Meal A", 10, 4)]));

        let rows = ops_with(repo)
            .leaderboard(Some("win_pct"))
            .await
            .expect("ranked");
        assert_eq!(rows[0].id, MealId::new(2));
        assert_eq!(rows[0].win_pct, 50.0);
    }

    #[tokio::test]
    async fn unknown_sort_key_never_reaches_the_store() {
        let mut repo = MockMealRepo::new();
        repo.expect_leaderboard().never();

        let err = ops_with(repo)
            .leaderboard(Some("invalid_sort"))
            .await
            .expect_err("bad key");
        assert_eq!(err.to_string(), "Invalid sort_by parameter: invalid_sort");
        assert!(matches!(err.domain(), Some(DomainError::InvalidSortKey(_))));
    }

    #[tokio::test]
    async fn empty_store_gives_empty_board() {
        let mut repo = MockMealRepo::new();
        repo.expect_leaderboard().returning(|_| Ok(Vec::new()));

        let rows = ops_with(repo).leaderboard(Some("wins")).await.expect("ranked");
        assert!(rows.is_empty());
    }
}
