//! HTTP routes.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use mealmax_domain::{DomainError, MealId};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::app::App;
use crate::entities::MealError;
use crate::use_cases::{BattleError, CreateMealData, LeaderboardError};

/// Create all HTTP routes.
pub fn routes() -> Router<Arc<App>> {
    Router::new()
        .route("/", get(health))
        .route("/api/health", get(health))
        .route("/api/db-check", get(db_check))
        .route("/api/clear-meals", delete(clear_meals))
        .route("/api/create-meal", post(create_meal))
        .route("/api/delete-meal/{id}", delete(delete_meal))
        .route("/api/get-meal-by-id/{id}", get(get_meal_by_id))
        .route("/api/get-meal-by-name/{name}", get(get_meal_by_name))
        .route("/api/prep-combatant", post(prep_combatant))
        .route("/api/get-combatants", get(get_combatants))
        .route("/api/clear-combatants", post(clear_combatants))
        .route("/api/battle", get(battle))
        .route("/api/leaderboard", get(leaderboard))
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}

async fn db_check(State(app): State<Arc<App>>) -> Result<Json<Value>, ApiError> {
    app.use_cases.kitchen.ops.db_check().await?;
    Ok(Json(json!({ "database_status": "healthy" })))
}

// =============================================================================
// Kitchen
// =============================================================================

async fn clear_meals(State(app): State<Arc<App>>) -> Result<Json<Value>, ApiError> {
    app.use_cases.kitchen.ops.clear_catalog().await?;
    Ok(Json(json!({ "status": "success" })))
}

async fn create_meal(
    State(app): State<Arc<App>>,
    payload: Result<Json<CreateMealData>, JsonRejection>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let Json(data) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let meal = app.use_cases.kitchen.ops.create(data).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "status": "success", "meal": meal })),
    ))
}

async fn delete_meal(
    State(app): State<Arc<App>>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    app.use_cases.kitchen.ops.delete(MealId::new(id)).await?;
    Ok(Json(json!({ "status": "success" })))
}

async fn get_meal_by_id(
    State(app): State<Arc<App>>,
    Path(id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    let meal = app.use_cases.kitchen.ops.get(MealId::new(id)).await?;
    Ok(Json(json!({ "status": "success", "meal": meal })))
}

async fn get_meal_by_name(
    State(app): State<Arc<App>>,
    Path(name): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let meal = app.use_cases.kitchen.ops.get_by_name(&name).await?;
    Ok(Json(json!({ "status": "success", "meal": meal })))
}

// =============================================================================
// Battle
// =============================================================================

#[derive(Debug, Deserialize)]
struct PrepRequest {
    meal: String,
}

async fn prep_combatant(
    State(app): State<Arc<App>>,
    payload: Result<Json<PrepRequest>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    let engine = &app.use_cases.battle.engine;
    engine.prep_by_name(&request.meal).await?;
    Ok(Json(json!({
        "status": "success",
        "combatants": engine.combatants().await,
    })))
}

async fn get_combatants(State(app): State<Arc<App>>) -> Json<Value> {
    let combatants = app.use_cases.battle.engine.combatants().await;
    Json(json!({ "status": "success", "combatants": combatants }))
}

async fn clear_combatants(State(app): State<Arc<App>>) -> Json<Value> {
    app.use_cases.battle.engine.clear().await;
    Json(json!({ "status": "success" }))
}

async fn battle(State(app): State<Arc<App>>) -> Result<Json<Value>, ApiError> {
    let result = app.use_cases.battle.engine.resolve().await?;
    Ok(Json(json!({
        "status": "success",
        "winner": result.winner_name,
        "battle": result,
    })))
}

// =============================================================================
// Leaderboard
// =============================================================================

#[derive(Debug, Deserialize)]
struct LeaderboardQuery {
    sort: Option<String>,
}

async fn leaderboard(
    State(app): State<Arc<App>>,
    Query(query): Query<LeaderboardQuery>,
) -> Result<Json<Value>, ApiError> {
    let entries = app
        .use_cases
        .leaderboard
        .ops
        .leaderboard(query.sort.as_deref())
        .await?;
    Ok(Json(json!({ "status": "success", "leaderboard": entries })))
}

// =============================================================================
// Errors
// =============================================================================

#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    Conflict(String),
    Internal(String),
}

impl ApiError {
    fn from_domain(domain: Option<&DomainError>, message: String) -> Self {
        match domain {
            Some(DomainError::Validation(_) | DomainError::InvalidSortKey(_)) => {
                ApiError::BadRequest(message)
            }
            Some(DomainError::NotFound { .. } | DomainError::Deleted { .. }) => {
                ApiError::NotFound(message)
            }
            Some(DomainError::Duplicate { .. } | DomainError::InvalidState(_)) => {
                ApiError::Conflict(message)
            }
            None => ApiError::Internal(message),
        }
    }
}

impl axum::response::IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "Request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal error".to_string())
            }
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

impl From<MealError> for ApiError {
    fn from(e: MealError) -> Self {
        ApiError::from_domain(e.domain(), e.to_string())
    }
}

impl From<BattleError> for ApiError {
    fn from(e: BattleError) -> Self {
        ApiError::from_domain(e.domain(), e.to_string())
    }
}

impl From<LeaderboardError> for ApiError {
    fn from(e: LeaderboardError) -> Self {
        ApiError::from_domain(e.domain(), e.to_string())
    }
}
