//! Application state and composition.

use std::sync::Arc;

use mealmax_domain::ScoringTable;

use crate::entities::Meals;
use crate::infrastructure::ports::{MealRepo, RandomPort};
use crate::use_cases;

/// Main application state.
///
/// Holds the record store and all use cases.
/// Passed to HTTP handlers via Axum state.
pub struct App {
    pub meals: Arc<Meals>,
    pub use_cases: UseCases,
}

/// Container for all use cases.
pub struct UseCases {
    pub kitchen: use_cases::KitchenUseCases,
    pub battle: use_cases::BattleUseCases,
    pub leaderboard: use_cases::LeaderboardUseCases,
}

impl App {
    /// Create a new App with all dependencies wired up.
    pub fn new(
        repo: Arc<dyn MealRepo>,
        random: Arc<dyn RandomPort>,
        scoring: ScoringTable,
    ) -> Self {
        let meals = Arc::new(Meals::new(repo));

        let kitchen = use_cases::KitchenUseCases::new(Arc::new(use_cases::KitchenOps::new(
            meals.clone(),
        )));
        let battle = use_cases::BattleUseCases::new(Arc::new(use_cases::BattleEngine::new(
            meals.clone(),
            random,
            scoring,
        )));
        let leaderboard = use_cases::LeaderboardUseCases::new(Arc::new(
            use_cases::LeaderboardOps::new(meals.clone()),
        ));

        Self {
            meals,
            use_cases: UseCases {
                kitchen,
                battle,
                leaderboard,
            },
        }
    }
}
