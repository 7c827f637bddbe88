//! Battle rules: combatant slots, win probability, and outcome decision
//!
//! The random draw is not taken here. Callers supply a roll in `[0, 1)`
//! so the decision stays a pure function of its inputs.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::entities::Meal;
use crate::error::DomainError;

/// Maximum number of meals that can be prepped for one battle.
pub const MAX_COMBATANTS: usize = 2;

/// Largest deviation from an even fight. Keeps every matchup winnable.
const MAX_EDGE: f64 = 0.45;

/// Result of a battle from one participant's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BattleOutcome {
    Win,
    Loss,
}

impl BattleOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Win => "win",
            Self::Loss => "loss",
        }
    }
}

impl fmt::Display for BattleOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which prepped slot won.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    First,
    Second,
}

/// Probability that the first combatant wins, given both scores.
///
/// The signed gap `(a - b) / (|a| + |b|)` is clipped to `[-1, 1]`, its
/// magnitude is passed through an ease-out curve, and the result is scaled
/// into `[0.05, 0.95]`. Equal scores give `0.5`; a wider gap always favors
/// the stronger side more, but never to certainty.
pub fn win_probability(score_a: f64, score_b: f64) -> f64 {
    let total = score_a.abs() + score_b.abs();
    if !total.is_finite() || total == 0.0 {
        return 0.5;
    }
    let delta = ((score_a - score_b) / total).clamp(-1.0, 1.0);
    let magnitude = delta.abs();
    let edge = MAX_EDGE * (1.0 - (1.0 - magnitude).powi(2));
    if delta >= 0.0 {
        0.5 + edge
    } else {
        0.5 - edge
    }
}

/// Decide the winner from both scores and a uniform roll in `[0, 1)`.
pub fn decide(score_a: f64, score_b: f64, roll: f64) -> Side {
    if roll < win_probability(score_a, score_b) {
        Side::First
    } else {
        Side::Second
    }
}

/// Ordered list of at most two prepped meals.
///
/// Resolving a battle does not clear the list; callers clear explicitly.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CombatantList {
    combatants: Vec<Meal>,
}

impl CombatantList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a combatant.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidState` when two meals are already prepped.
    pub fn prep(&mut self, meal: Meal) -> Result<(), DomainError> {
        if self.combatants.len() >= MAX_COMBATANTS {
            return Err(DomainError::invalid_state(
                "Combatant list is full, cannot add more combatants.",
            ));
        }
        self.combatants.push(meal);
        Ok(())
    }

    pub fn clear(&mut self) {
        self.combatants.clear();
    }

    pub fn as_slice(&self) -> &[Meal] {
        &self.combatants
    }

    pub fn len(&self) -> usize {
        self.combatants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.combatants.is_empty()
    }

    /// Both combatants, in prep order.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidState` unless exactly two are prepped.
    pub fn pair(&self) -> Result<(&Meal, &Meal), DomainError> {
        match self.combatants.as_slice() {
            [first, second] => Ok((first, second)),
            _ => Err(DomainError::invalid_state(
                "Two combatants must be prepped for a battle.",
            )),
        }
    }
}
