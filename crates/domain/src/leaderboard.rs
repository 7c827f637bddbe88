//! Leaderboard ranking keys and rows

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::entities::Meal;
use crate::error::DomainError;
use crate::ids::MealId;
use crate::value_objects::{CuisineName, Difficulty, MealName, Price};

/// Statistic the leaderboard is ordered by (descending).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaderboardSort {
    #[default]
    Wins,
    WinPct,
}

impl LeaderboardSort {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Wins => "wins",
            Self::WinPct => "win_pct",
        }
    }
}

impl fmt::Display for LeaderboardSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LeaderboardSort {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "wins" => Ok(Self::Wins),
            "win_pct" => Ok(Self::WinPct),
            other => Err(DomainError::invalid_sort_key(other)),
        }
    }
}

/// One ranked meal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub id: MealId,
    pub meal: MealName,
    pub cuisine: CuisineName,
    pub price: Price,
    pub difficulty: Difficulty,
    pub battles: u32,
    pub wins: u32,
    /// Percentage rounded to one decimal place.
    pub win_pct: f64,
}

impl LeaderboardEntry {
    /// Build a row from a battle-tested meal; `None` if it never fought.
    pub fn from_meal(meal: Meal) -> Option<Self> {
        let win_pct = meal.win_pct()?;
        Some(Self {
            id: meal.id,
            meal: meal.name,
            cuisine: meal.cuisine,
            price: meal.price,
            difficulty: meal.difficulty,
            battles: meal.battles,
            wins: meal.wins,
            win_pct: (win_pct * 10.0).round() / 10.0,
        })
    }
}
