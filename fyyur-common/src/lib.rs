//! # Fyyur Common Library
//!
//! Shared code for the Fyyur service and its tooling:
//! - Error type used by every data-access operation
//! - Configuration resolution (CLI, environment, TOML, compiled defaults)
//! - Database initialization, migrations and record models
//! - Fixed form choices (genres, US states)
//! - Timestamp parsing and display formatting

pub mod choices;
pub mod config;
pub mod db;
pub mod error;
pub mod time;

pub use error::{Error, Result};
