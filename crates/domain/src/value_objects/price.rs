//! Meal price value object

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::DomainError;

/// A strictly positive, finite price.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Price(f64);

impl Price {
    /// Validate a numeric price.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` when the value is non-finite or `<= 0`.
    pub fn new(value: f64) -> Result<Self, DomainError> {
        if !value.is_finite() || value <= 0.0 {
            return Err(Self::invalid(value));
        }
        Ok(Self(value))
    }

    /// Parse a price from raw text, e.g. a form field or query value.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let value = raw
            .trim()
            .parse::<f64>()
            .map_err(|_| Self::invalid(raw))?;
        if !value.is_finite() || value <= 0.0 {
            return Err(Self::invalid(raw));
        }
        Ok(Self(value))
    }

    /// The rejection error for any raw value that is not a usable price.
    pub fn invalid(value: impl fmt::Display) -> DomainError {
        DomainError::validation(format!(
            "Invalid price: {value}. Price must be a positive number."
        ))
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl TryFrom<f64> for Price {
    type Error = DomainError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Price> for f64 {
    fn from(price: Price) -> f64 {
        price.0
    }
}
