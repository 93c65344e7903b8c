#![forbid(unsafe_code)]

//! Core domain model and program builder for Fireground.
//!
//! This crate provides:
//! - Domain types (exercises, slot rules, goals, program days)
//! - Exercise library loading and the built-in library
//! - Scoring, deterministic selection and replacement suggestions
//! - The multi-week program builder and its validator
//! - Persistence (active program state, CSV export) and configuration

pub mod types;
pub mod error;
pub mod history;
pub mod scorer;
pub mod selector;
pub mod rules;
pub mod progression;
pub mod library;
pub mod goals;
pub mod builder;
pub mod replacement;
pub mod validator;
pub mod config;
pub mod logging;
pub mod state;
pub mod export;

#[cfg(test)]
mod test_utils;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use history::RecencyHistory;
pub use scorer::{score, Rejection, Score};
pub use selector::{pick_many, select, SelectOptions};
pub use library::{default_library, ExerciseRecord, Library};
pub use goals::{Goals, GoalsRequest};
pub use builder::{build_program, build_program_with_history};
pub use replacement::{suggest_replacements, ReplaceOptions};
pub use validator::validate_program;
pub use config::Config;
pub use state::ActiveProgram;
pub use export::export_csv;
