//! Engine configuration loaded from environment variables.
//!
//! Supported environment variables:
//! - MEALMAX_DB_PATH: SQLite database file (default `meal_max.db`)
//! - SQL_CREATE_TABLE_PATH: schema script used by catalog resets (default: embedded)
//! - SERVER_HOST / SERVER_PORT (or PORT): listen address (default `0.0.0.0:5000`)
//! - MEALMAX_SCORE_{LOW,MED,HIGH}_{MULTIPLIER,MODIFIER}: scoring table overrides
//! - CORS_ALLOWED_ORIGINS: `*` or a comma-separated origin list

use std::path::PathBuf;

use mealmax_domain::{Difficulty, ScoringTable};

const DEFAULT_DB_PATH: &str = "meal_max.db";
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 5000;

#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub db_path: String,
    pub schema_path: Option<PathBuf>,
    pub server_host: String,
    pub server_port: u16,
    pub scoring: ScoringTable,
    pub cors_allowed_origins: Option<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            db_path: DEFAULT_DB_PATH.to_string(),
            schema_path: None,
            server_host: DEFAULT_HOST.to_string(),
            server_port: DEFAULT_PORT,
            scoring: ScoringTable::default(),
            cors_allowed_origins: None,
        }
    }
}

impl EngineConfig {
    /// Build the configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(path) = non_empty(lookup("MEALMAX_DB_PATH")) {
            config.db_path = path;
        }
        config.schema_path = non_empty(lookup("SQL_CREATE_TABLE_PATH")).map(PathBuf::from);
        if let Some(host) = non_empty(lookup("SERVER_HOST")) {
            config.server_host = host;
        }
        if let Some(val) = non_empty(lookup("SERVER_PORT").or_else(|| lookup("PORT"))) {
            match val.parse::<u16>() {
                Ok(port) => config.server_port = port,
                Err(_) => tracing::warn!(val = %val, "SERVER_PORT is not a valid port, ignoring"),
            }
        }
        config.cors_allowed_origins = non_empty(lookup("CORS_ALLOWED_ORIGINS"));

        apply_scoring_overrides(&mut config.scoring, &lookup);
        config
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Apply `MEALMAX_SCORE_<TIER>_<FIELD>` overrides to the scoring table.
fn apply_scoring_overrides(table: &mut ScoringTable, lookup: &impl Fn(&str) -> Option<String>) {
    for tier in Difficulty::ALL {
        let weights = table.weights_mut(tier);
        for (field, slot) in [
            ("MULTIPLIER", &mut weights.multiplier),
            ("MODIFIER", &mut weights.modifier),
        ] {
            let key = format!("MEALMAX_SCORE_{}_{}", tier.as_str(), field);
            let Some(val) = non_empty(lookup(&key)) else {
                continue;
            };
            match val.parse::<f64>() {
                Ok(parsed) if parsed.is_finite() => {
                    *slot = parsed;
                    tracing::info!(key = %key, value = parsed, "Applied scoring override");
                }
                _ => tracing::warn!(key = %key, val = %val, "Scoring override is not a finite number, ignoring"),
            }
        }
    }
}
