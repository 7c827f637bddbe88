//! Meal entity - a catalog record that can be sent into battle
//!
//! Records are soft-deleted: the status tag flips to `Deleted` once and
//! never back, and deleted records are excluded from every later read and
//! mutation. Battle counters only ever grow, with `battles >= wins`.

use serde::{Deserialize, Serialize};

use crate::battle::BattleOutcome;
use crate::error::DomainError;
use crate::ids::MealId;
use crate::value_objects::{CuisineName, Difficulty, MealName, Price};

/// Lifecycle tag for a meal record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MealStatus {
    #[default]
    Active,
    Deleted,
}

impl MealStatus {
    pub fn from_deleted_flag(deleted: bool) -> Self {
        if deleted {
            Self::Deleted
        } else {
            Self::Active
        }
    }

    pub fn is_deleted(self) -> bool {
        matches!(self, Self::Deleted)
    }
}

/// Validated input for inserting a new meal.
#[derive(Debug, Clone, PartialEq)]
pub struct NewMeal {
    pub name: MealName,
    pub cuisine: CuisineName,
    pub price: Price,
    pub difficulty: Difficulty,
}

impl NewMeal {
    pub fn new(name: MealName, cuisine: CuisineName, price: Price, difficulty: Difficulty) -> Self {
        Self {
            name,
            cuisine,
            price,
            difficulty,
        }
    }

    /// Materialize the stored record once the store has assigned an ID.
    pub fn into_meal(self, id: MealId) -> Meal {
        Meal {
            id,
            name: self.name,
            cuisine: self.cuisine,
            price: self.price,
            difficulty: self.difficulty,
            battles: 0,
            wins: 0,
            status: MealStatus::Active,
        }
    }
}

/// A persisted meal record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Meal {
    pub id: MealId,
    #[serde(rename = "meal")]
    pub name: MealName,
    pub cuisine: CuisineName,
    pub price: Price,
    pub difficulty: Difficulty,
    pub battles: u32,
    pub wins: u32,
    #[serde(default)]
    pub status: MealStatus,
}

impl Meal {
    pub fn is_deleted(&self) -> bool {
        self.status.is_deleted()
    }

    /// Apply one battle result to the counters.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Deleted` if the record is soft-deleted.
    pub fn record(&mut self, outcome: BattleOutcome) -> Result<(), DomainError> {
        if self.is_deleted() {
            return Err(DomainError::deleted("Meal", self.id));
        }
        self.battles += 1;
        if outcome == BattleOutcome::Win {
            self.wins += 1;
        }
        Ok(())
    }

    /// Soft-delete this record.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Deleted` if it is already deleted.
    pub fn mark_deleted(&mut self) -> Result<(), DomainError> {
        if self.is_deleted() {
            return Err(DomainError::deleted("Meal", self.id));
        }
        self.status = MealStatus::Deleted;
        Ok(())
    }

    /// Wins as a percentage of battles; `None` until the meal has fought.
    pub fn win_pct(&self) -> Option<f64> {
        if self.battles == 0 {
            return None;
        }
        Some(100.0 * f64::from(self.wins) / f64::from(self.battles))
    }
}
