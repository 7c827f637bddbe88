//! Validated name newtypes for meal records
//!
//! These newtypes ensure that names are valid by construction:
//! - Non-empty
//! - Within length limits
//! - Trimmed of leading/trailing whitespace

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

/// Maximum length for name fields (MealName, CuisineName)
const MAX_NAME_LENGTH: usize = 200;

fn validated(kind: &str, name: String) -> Result<String, DomainError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(DomainError::validation(format!("{kind} cannot be empty")));
    }
    if trimmed.chars().count() > MAX_NAME_LENGTH {
        return Err(DomainError::validation(format!(
            "{kind} cannot exceed {MAX_NAME_LENGTH} characters"
        )));
    }
    Ok(trimmed.to_string())
}

// ============================================================================
// MealName
// ============================================================================

/// A validated meal name (non-empty, <=200 chars, trimmed)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MealName(String);

impl MealName {
    /// Create a new validated meal name.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the trimmed name is empty or
    /// longer than 200 characters.
    pub fn new(name: impl Into<String>) -> Result<Self, DomainError> {
        validated("Meal name", name.into()).map(Self)
    }

    /// Returns the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MealName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for MealName {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<MealName> for String {
    fn from(name: MealName) -> String {
        name.0
    }
}

// ============================================================================
// CuisineName
// ============================================================================

/// A validated cuisine (category) label
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CuisineName(String);

impl CuisineName {
    pub fn new(name: impl Into<String>) -> Result<Self, DomainError> {
        validated("Cuisine", name.into()).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CuisineName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for CuisineName {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<CuisineName> for String {
    fn from(name: CuisineName) -> String {
        name.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meal_name_is_trimmed() {
        let name = MealName::new("  Sushi ").expect("valid name");
        assert_eq!(name.as_str(), "Sushi");
    }

    #[test]
    fn empty_names_are_rejected() {
        assert!(matches!(MealName::new("   "), Err(DomainError::Validation(_))));
        assert!(matches!(CuisineName::new(""), Err(DomainError::Validation(_))));
    }

    #[test]
    fn overlong_names_are_rejected() {
        let long = "x".repeat(MAX_NAME_LENGTH + 1);
        let err = MealName::new(long).expect_err("too long");
        assert!(err.to_string().contains("cannot exceed 200"));
        assert!(MealName::new("x".repeat(MAX_NAME_LENGTH)).is_ok());
    }

    #[test]
    fn names_deserialize_through_validation() {
        let ok: CuisineName = serde_json::from_str("\"Japanese\"").expect("valid");
        assert_eq!(ok.to_string(), "Japanese");
        assert!(serde_json::from_str::<MealName>("\"  \"").is_err());
    }
}
