//! Battle use cases.
//!
//! Handles meal battles. The flow is:
//! 1. Up to two meals are prepped into the combatant slots
//! 2. Resolution scores both and draws one roll against the win curve
//! 3. The winner is recorded as a win and the loser as a loss, together:
//!    if either meal was deleted after prep, neither is counted
//!
//! Resolution leaves the slots as they are. Resolving again without
//! clearing re-fights the same pair and counts both battles.

use std::sync::Arc;

use mealmax_domain::{
    decide, win_probability, CombatantList, DomainError, Meal, MealId, ScoringTable, Side,
};
use serde::Serialize;
use tokio::sync::Mutex;

use crate::entities::{MealError, Meals};
use crate::infrastructure::ports::RandomPort;

/// Container for battle use cases.
pub struct BattleUseCases {
    pub engine: Arc<BattleEngine>,
}

impl BattleUseCases {
    pub fn new(engine: Arc<BattleEngine>) -> Self {
        Self { engine }
    }
}

/// Result of a resolved battle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BattleResult {
    pub winner: MealId,
    pub winner_name: String,
    pub loser: MealId,
    pub loser_name: String,
    /// Scores in prep order.
    pub scores: [f64; 2],
    /// Chance the first-prepped meal had of winning.
    pub first_win_probability: f64,
    pub roll: f64,
}

/// Owns the combatant slots and resolves battles between them.
pub struct BattleEngine {
    meals: Arc<Meals>,
    random: Arc<dyn RandomPort>,
    scoring: ScoringTable,
    combatants: Mutex<CombatantList>,
}

impl BattleEngine {
    pub fn new(meals: Arc<Meals>, random: Arc<dyn RandomPort>, scoring: ScoringTable) -> Self {
        Self {
            meals,
            random,
            scoring,
            combatants: Mutex::new(CombatantList::new()),
        }
    }

    /// Add a meal to the next free slot.
    pub async fn prep(&self, meal: Meal) -> Result<(), BattleError> {
        let mut combatants = self.combatants.lock().await;
        let (id, name) = (meal.id, meal.name.to_string());
        combatants.prep(meal).inspect_err(|_| {
            tracing::warn!(meal_id = %id, "Combatant list is full");
        })?;
        tracing::info!(meal_id = %id, name = %name, slot = combatants.len(), "Prepped combatant");
        Ok(())
    }

    /// Look a live meal up by name and prep it.
    pub async fn prep_by_name(&self, name: &str) -> Result<Meal, BattleError> {
        let meal = self.meals.get_by_name(name).await?;
        self.prep(meal.clone()).await?;
        Ok(meal)
    }

    pub async fn clear(&self) {
        self.combatants.lock().await.clear();
        tracing::info!("Cleared combatants");
    }

    /// Current combatants in prep order.
    pub async fn combatants(&self) -> Vec<Meal> {
        self.combatants.lock().await.as_slice().to_vec()
    }

    /// Battle strength of a meal under the configured table.
    pub fn score(&self, meal: &Meal) -> f64 {
        self.scoring.score(meal)
    }

    /// Fight the two prepped meals and record the outcome for both.
    pub async fn resolve(&self) -> Result<BattleResult, BattleError> {
        let combatants = self.combatants.lock().await;
        let (first, second) = combatants.pair().inspect_err(|_| {
            tracing::warn!(prepped = combatants.len(), "Battle requested without two combatants");
        })?;

        let score_a = self.score(first);
        let score_b = self.score(second);
        let probability = win_probability(score_a, score_b);
        let roll = self.random.gen_unit();
        tracing::debug!(
            first = %first.id,
            second = %second.id,
            score_a,
            score_b,
            probability,
            roll,
            "Scored combatants"
        );

        let (winner, loser) = match decide(score_a, score_b, roll) {
            Side::First => (first, second),
            Side::Second => (second, first),
        };

        self.meals.record_battle(winner.id, loser.id).await?;

        tracing::info!(winner = %winner.id, loser = %loser.id, "Battle resolved");

        Ok(BattleResult {
            winner: winner.id,
            winner_name: winner.name.to_string(),
            loser: loser.id,
            loser_name: loser.name.to_string(),
            scores: [score_a, score_b],
            first_win_probability: probability,
            roll,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BattleError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Meal(#[from] MealError),
}

impl BattleError {
    pub fn domain(&self) -> Option<&DomainError> {
        match self {
            Self::Domain(e) => Some(e),
            Self::Meal(e) => e.domain(),
        }
    }
}
