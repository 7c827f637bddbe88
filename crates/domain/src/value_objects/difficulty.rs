//! Preparation difficulty tiers

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;

/// How hard a meal is to prepare. Stored and transmitted as `LOW`/`MED`/`HIGH`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Difficulty {
    Low,
    Med,
    High,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Low, Difficulty::Med, Difficulty::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Med => "MED",
            Self::High => "HIGH",
        }
    }

    /// The rejection error for any raw value outside the three tiers,
    /// including values that were never strings to begin with.
    pub fn invalid(value: impl fmt::Display) -> DomainError {
        DomainError::validation(format!(
            "Invalid difficulty level: {value}. Must be 'LOW', 'MED', or 'HIGH'."
        ))
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "LOW" => Ok(Self::Low),
            "MED" => Ok(Self::Med),
            "HIGH" => Ok(Self::High),
            other => Err(Self::invalid(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_the_three_tiers() {
        for tier in Difficulty::ALL {
            assert_eq!(tier.as_str().parse::<Difficulty>().expect("valid"), tier);
        }
    }

    #[test]
    fn rejects_other_spellings() {
        let err = "Hard".parse::<Difficulty>().expect_err("invalid");
        assert_eq!(
            err.to_string(),
            "Validation failed: Invalid difficulty level: Hard. Must be 'LOW', 'MED', or 'HIGH'."
        );
        assert!("low".parse::<Difficulty>().is_err());
    }

    #[test]
    fn non_string_values_report_their_rendering() {
        let err = Difficulty::invalid(420);
        assert!(err
            .to_string()
            .contains("Invalid difficulty level: 420. Must be 'LOW', 'MED', or 'HIGH'."));
    }

    #[test]
    fn serde_uses_uppercase_labels() {
        assert_eq!(
            serde_json::to_string(&Difficulty::Med).expect("serialize"),
            "\"MED\""
        );
    }
}
