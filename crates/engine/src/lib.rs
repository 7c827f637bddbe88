//! MealMax Engine library.
//!
//! Server-side code for the meal battle service.
//!
//! ## Structure
//!
//! - `entities/` - The meal record store wrapping the repository port
//! - `use_cases/` - Kitchen, battle and leaderboard orchestration
//! - `infrastructure/` - Ports, SQLite adapter, randomness and configuration
//! - `api/` - HTTP entry points
//! - `app` - Application composition

pub mod api;
pub mod app;
pub mod entities;
pub mod infrastructure;
pub mod use_cases;

pub use app::App;
