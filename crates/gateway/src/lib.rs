//! # Painel Gateway
//!
//! Authenticated request gateway for the Painel dashboard.
//!
//! This crate contains:
//! - The [`ApiClient`] every dashboard API call goes through, with bearer
//!   attachment and 401 renew-and-retry handling
//! - Typed access to the accounts profile and password endpoints
//! - The configuration loader (environment, file, defaults)
//!
//! ## Architecture
//! - Credentials are injected through `painel_session::CredentialProvider`;
//!   the gateway never touches token storage directly
//! - Relative endpoints resolve under the versioned API path, absolute URLs
//!   pass through untouched

pub mod accounts;
pub mod client;
pub mod config;

// Re-export commonly used items
pub use accounts::{AccountsService, DetailResponse};
pub use client::{ApiClient, RequestOptions};
