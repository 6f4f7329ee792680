//! # Pulse Common Library
//!
//! Shared code for the pulse services including:
//! - Error taxonomy for the fetch-and-aggregate pipeline
//! - Configuration loading (environment + TOML file)

pub mod config;
pub mod error;

pub use error::{Error, Result};
