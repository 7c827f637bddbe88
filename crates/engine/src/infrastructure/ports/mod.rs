//! Port traits for infrastructure boundaries.
//!
//! These are the ONLY abstractions in the engine. Everything else is concrete types.
//! Ports exist for:
//! - Database access (could swap SQLite -> Postgres)
//! - Randomness (for testing)

mod error;
mod repos;
mod testing;

// =============================================================================
// Repository Ports
// =============================================================================
pub use repos::MealRepo;

// =============================================================================
// Test-Only Mocks (only available during test builds)
// =============================================================================
#[cfg(test)]
pub use repos::MockMealRepo;

#[cfg(test)]
pub use testing::MockRandomPort;

// =============================================================================
// Testing Ports
// =============================================================================
pub use testing::RandomPort;

// =============================================================================
// Error Types
// =============================================================================
pub use error::RepoError;
