//! # Painel Domain
//!
//! Shared domain types for the Painel access layer.
//!
//! This crate contains:
//! - Session and API error types and Result definitions
//! - User profile types returned by the accounts backend
//! - Persisted-record, routing, and renewal constants
//! - Configuration structures
//!
//! ## Architecture
//! - No dependencies on other Painel crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod user;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use user::*;
