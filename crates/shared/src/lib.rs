//! Shared types, errors, and configuration for Ucto.
//!
//! This crate provides common types used across all other crates:
//! - Currency codes and cent rounding
//! - Typed IDs for type-safe entity references
//! - Pagination types for list operations
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::{AppConfig, LedgerConfig, LogConfig, LogFormat, TaxConfig};
pub use error::{AppError, AppResult};
