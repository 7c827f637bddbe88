//! SQLite-backed meal catalog.

use std::path::PathBuf;

use async_trait::async_trait;
use mealmax_domain::{
    BattleOutcome, CuisineName, Difficulty, LeaderboardSort, Meal, MealId, MealName, MealStatus,
    NewMeal, Price,
};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use crate::infrastructure::ports::{MealRepo, RepoError};

/// Schema script executed on catalog reset (drops and recreates the table).
const DEFAULT_SCHEMA: &str = include_str!("../../sql/create_meal_table.sql");

/// Idempotent schema applied when the store is opened.
const ENSURE_SCHEMA: &str = r#"
    CREATE TABLE IF NOT EXISTS meals (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        meal TEXT NOT NULL,
        cuisine TEXT NOT NULL,
        price REAL NOT NULL CHECK (price > 0),
        difficulty TEXT NOT NULL CHECK (difficulty IN ('HIGH', 'MED', 'LOW')),
        battles INTEGER NOT NULL DEFAULT 0,
        wins INTEGER NOT NULL DEFAULT 0,
        deleted BOOLEAN NOT NULL DEFAULT FALSE,
        CHECK (battles >= wins AND wins >= 0)
    );
    CREATE UNIQUE INDEX IF NOT EXISTS meals_active_name ON meals (meal) WHERE deleted = FALSE;
"#;

/// Filter shared by every query that must only see live rows.
const ACTIVE_FILTER: &str = "deleted = FALSE";

const MEAL_COLUMNS: &str = "id, meal, cuisine, price, difficulty, battles, wins, deleted";

/// SQLite implementation of the meal catalog.
pub struct SqliteMealRepo {
    pool: SqlitePool,
    schema_path: Option<PathBuf>,
}

impl SqliteMealRepo {
    /// Open (creating if needed) the database file and ensure the schema.
    pub async fn new(db_path: &str, schema_path: Option<PathBuf>) -> Result<Self, RepoError> {
        let pool = SqlitePool::connect(&format!("sqlite:{}?mode=rwc", db_path))
            .await
            .map_err(|e| RepoError::database("connect", e))?;

        sqlx::raw_sql(ENSURE_SCHEMA)
            .execute(&pool)
            .await
            .map_err(|e| RepoError::database("ensure_schema", e))?;

        tracing::debug!(db_path, "Meal catalog ready");
        Ok(Self { pool, schema_path })
    }

    async fn schema_script(&self) -> Result<String, RepoError> {
        match &self.schema_path {
            Some(path) => tokio::fs::read_to_string(path).await.map_err(|e| {
                RepoError::database("read_schema", format!("{}: {}", path.display(), e))
            }),
            None => Ok(DEFAULT_SCHEMA.to_string()),
        }
    }
}

fn row_to_meal(row: &SqliteRow) -> Result<Meal, RepoError> {
    let get_err = |e: sqlx::Error| RepoError::serialization(e);

    let id: i64 = row.try_get("id").map_err(get_err)?;
    let name: String = row.try_get("meal").map_err(get_err)?;
    let cuisine: String = row.try_get("cuisine").map_err(get_err)?;
    let price: f64 = row.try_get("price").map_err(get_err)?;
    let difficulty: String = row.try_get("difficulty").map_err(get_err)?;
    let battles: i64 = row.try_get("battles").map_err(get_err)?;
    let wins: i64 = row.try_get("wins").map_err(get_err)?;
    let deleted: bool = row.try_get("deleted").map_err(get_err)?;

    Ok(Meal {
        id: MealId::new(id),
        name: MealName::new(name).map_err(RepoError::serialization)?,
        cuisine: CuisineName::new(cuisine).map_err(RepoError::serialization)?,
        price: Price::new(price).map_err(RepoError::serialization)?,
        difficulty: difficulty
            .parse::<Difficulty>()
            .map_err(RepoError::serialization)?,
        battles: u32::try_from(battles).map_err(RepoError::serialization)?,
        wins: u32::try_from(wins).map_err(RepoError::serialization)?,
        status: MealStatus::from_deleted_flag(deleted),
    })
}

/// Counter update for one outcome, limited to the live row.
fn stats_update(outcome: BattleOutcome) -> String {
    let wins = match outcome {
        BattleOutcome::Win => ", wins = wins + 1",
        BattleOutcome::Loss => "",
    };
    format!("UPDATE meals SET battles = battles + 1{wins} WHERE id = ? AND {ACTIVE_FILTER}")
}

fn order_column(sort: LeaderboardSort) -> &'static str {
    match sort {
        LeaderboardSort::Wins => "wins",
        LeaderboardSort::WinPct => "win_pct",
    }
}

#[async_trait]
impl MealRepo for SqliteMealRepo {
    async fn insert(&self, meal: &NewMeal) -> Result<MealId, RepoError> {
        let result = sqlx::query(
            r#"
            INSERT INTO meals (meal, cuisine, price, difficulty)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(meal.name.as_str())
        .bind(meal.cuisine.as_str())
        .bind(meal.price.value())
        .bind(meal.difficulty.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                RepoError::constraint(format!("meal name '{}' is taken", meal.name))
            }
            _ => RepoError::database("insert_meal", e),
        })?;

        Ok(MealId::new(result.last_insert_rowid()))
    }

    async fn get(&self, id: MealId) -> Result<Option<Meal>, RepoError> {
        let row = sqlx::query(&format!("SELECT {MEAL_COLUMNS} FROM meals WHERE id = ?"))
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepoError::database("get_meal", e))?;

        row.as_ref().map(row_to_meal).transpose()
    }

    async fn get_by_name(&self, name: &str) -> Result<Option<Meal>, RepoError> {
        let row = sqlx::query(&format!(
            "SELECT {MEAL_COLUMNS} FROM meals WHERE meal = ? ORDER BY deleted ASC, id DESC LIMIT 1"
        ))
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepoError::database("get_meal_by_name", e))?;

        row.as_ref().map(row_to_meal).transpose()
    }

    async fn mark_deleted(&self, id: MealId) -> Result<(), RepoError> {
        let result = sqlx::query("UPDATE meals SET deleted = TRUE WHERE id = ?")
            .bind(id.get())
            .execute(&self.pool)
            .await
            .map_err(|e| RepoError::database("delete_meal", e))?;

        if result.rows_affected() == 0 {
            return Err(RepoError::not_found("Meal", id));
        }
        Ok(())
    }

    async fn increment_stats(&self, id: MealId, outcome: BattleOutcome) -> Result<(), RepoError> {
        let result = sqlx::query(&stats_update(outcome))
            .bind(id.get())
            .execute(&self.pool)
            .await
            .map_err(|e| RepoError::database("update_meal_stats", e))?;

        if result.rows_affected() == 0 {
            return Err(RepoError::not_found("Meal", id));
        }
        Ok(())
    }

    async fn record_battle(&self, winner: MealId, loser: MealId) -> Result<(), RepoError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| RepoError::database("record_battle", e))?;

        for (id, outcome) in [(winner, BattleOutcome::Win), (loser, BattleOutcome::Loss)] {
            let result = sqlx::query(&stats_update(outcome))
                .bind(id.get())
                .execute(&mut *tx)
                .await
                .map_err(|e| RepoError::database("record_battle", e))?;

            // Dropping the transaction rolls back the other row.
            if result.rows_affected() == 0 {
                return Err(RepoError::not_found("Meal", id));
            }
        }

        tx.commit()
            .await
            .map_err(|e| RepoError::database("record_battle", e))?;
        Ok(())
    }

    async fn leaderboard(&self, sort: LeaderboardSort) -> Result<Vec<Meal>, RepoError> {
        let query = format!(
            r#"
            SELECT {MEAL_COLUMNS}, (wins * 1.0 / battles) AS win_pct
            FROM meals WHERE {ACTIVE_FILTER} AND battles > 0
            ORDER BY {} DESC
            "#,
            order_column(sort)
        );

        let rows = sqlx::query(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepoError::database("leaderboard", e))?;

        rows.iter().map(row_to_meal).collect()
    }

    async fn reset(&self) -> Result<(), RepoError> {
        let script = self.schema_script().await?;
        sqlx::raw_sql(&script)
            .execute(&self.pool)
            .await
            .map_err(|e| RepoError::database("reset_catalog", e))?;

        // A replacement script may leave out the active-name index.
        sqlx::raw_sql(ENSURE_SCHEMA)
            .execute(&self.pool)
            .await
            .map_err(|e| RepoError::database("ensure_schema", e))?;
        Ok(())
    }

    async fn ping(&self) -> Result<(), RepoError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| RepoError::database("ping", e))?;
        Ok(())
    }
}
