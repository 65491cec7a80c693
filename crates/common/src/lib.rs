//! Shared utilities, configuration, and error handling for HRDesk
//!
//! This crate provides common functionality used across the HRDesk console:
//! - Configuration management following 12-factor principles
//! - Error types and handling
//! - State machine error type shared by session lifecycles
//! - Tracing subscriber setup

pub mod config;
pub mod error;
pub mod logging;
pub mod state;

pub use config::{Config, LogFormat};
pub use error::{Error, Result};
pub use state::StateError;
