//! Kitchen use cases.
//!
//! Catalog management: turning loosely typed create requests into validated
//! meals, plus lookup, soft delete, and full resets.

use std::sync::Arc;

use mealmax_domain::{CuisineName, Difficulty, DomainError, Meal, MealId, MealName, NewMeal, Price};
use serde::Deserialize;
use serde_json::Value;

use crate::entities::{MealError, Meals};

/// Container for kitchen use cases.
pub struct KitchenUseCases {
    pub ops: Arc<KitchenOps>,
}

impl KitchenUseCases {
    pub fn new(ops: Arc<KitchenOps>) -> Self {
        Self { ops }
    }
}

/// Create request as received from a client.
///
/// `price` and `difficulty` stay untyped until validation so that a
/// wrong-typed value is reported with its own rendering.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateMealData {
    pub meal: String,
    pub cuisine: String,
    pub price: Value,
    pub difficulty: Value,
}

impl CreateMealData {
    /// Validate price, then difficulty, then names.
    pub fn into_new_meal(self) -> Result<NewMeal, DomainError> {
        let price = match &self.price {
            Value::Number(n) => match n.as_f64() {
                Some(value) => Price::new(value).map_err(|_| Price::invalid(n))?,
                None => return Err(Price::invalid(n)),
            },
            Value::String(s) => Price::parse(s)?,
            other => return Err(Price::invalid(other)),
        };

        let difficulty = match &self.difficulty {
            Value::String(s) => s.parse::<Difficulty>()?,
            other => return Err(Difficulty::invalid(other)),
        };

        Ok(NewMeal::new(
            MealName::new(self.meal)?,
            CuisineName::new(self.cuisine)?,
            price,
            difficulty,
        ))
    }
}

/// Catalog operations.
pub struct KitchenOps {
    meals: Arc<Meals>,
}

impl KitchenOps {
    pub fn new(meals: Arc<Meals>) -> Self {
        Self { meals }
    }

    pub async fn create(&self, data: CreateMealData) -> Result<Meal, MealError> {
        let meal = data.into_new_meal().inspect_err(|e| {
            tracing::warn!(error = %e, "Rejected meal create request");
        })?;
        self.meals.create(meal).await
    }

    pub async fn delete(&self, id: MealId) -> Result<(), MealError> {
        self.meals.delete(id).await
    }

    pub async fn get(&self, id: MealId) -> Result<Meal, MealError> {
        self.meals.get(id).await
    }

    pub async fn get_by_name(&self, name: &str) -> Result<Meal, MealError> {
        self.meals.get_by_name(name).await
    }

    pub async fn clear_catalog(&self) -> Result<(), MealError> {
        self.meals.reset_catalog().await
    }

    pub async fn db_check(&self) -> Result<(), MealError> {
        self.meals.health_check().await
    }
}
