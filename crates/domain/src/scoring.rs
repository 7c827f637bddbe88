//! Battle strength scoring
//!
//! `score = price * multiplier - modifier`, with the multiplier and
//! modifier looked up per difficulty tier. The table is data so deployments
//! can recalibrate the higher tiers without touching the formula.

use serde::{Deserialize, Serialize};

use crate::entities::Meal;
use crate::value_objects::{Difficulty, Price};

/// Linear weights for one difficulty tier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierWeights {
    pub multiplier: f64,
    pub modifier: f64,
}

impl TierWeights {
    pub const fn new(multiplier: f64, modifier: f64) -> Self {
        Self {
            multiplier,
            modifier,
        }
    }
}

/// Per-tier scoring weights.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringTable {
    pub low: TierWeights,
    pub med: TierWeights,
    pub high: TierWeights,
}

impl Default for ScoringTable {
    fn default() -> Self {
        Self {
            low: TierWeights::new(6.0, 3.0),
            med: TierWeights::new(6.0, 2.0),
            high: TierWeights::new(6.0, 1.0),
        }
    }
}

impl ScoringTable {
    pub fn weights(&self, difficulty: Difficulty) -> TierWeights {
        match difficulty {
            Difficulty::Low => self.low,
            Difficulty::Med => self.med,
            Difficulty::High => self.high,
        }
    }

    pub fn weights_mut(&mut self, difficulty: Difficulty) -> &mut TierWeights {
        match difficulty {
            Difficulty::Low => &mut self.low,
            Difficulty::Med => &mut self.med,
            Difficulty::High => &mut self.high,
        }
    }

    /// Battle strength for a price/difficulty pair.
    pub fn score_parts(&self, price: Price, difficulty: Difficulty) -> f64 {
        let weights = self.weights(difficulty);
        (price.value() * weights.multiplier) - weights.modifier
    }

    /// Battle strength for a meal record.
    pub fn score(&self, meal: &Meal) -> f64 {
        self.score_parts(meal.price, meal.difficulty)
    }
}
