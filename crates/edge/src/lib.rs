//! # Painel Edge
//!
//! Edge route guard for the Painel dashboard.
//!
//! This crate contains:
//! - A pure decision table over the request path and session-cookie
//!   presence ([`evaluate_route`])
//! - Axum middleware that turns those decisions into temporary redirects
//!   ([`route_guard`])
//!
//! ## Architecture
//! - Cookie presence alone gates navigation; token contents are never
//!   inspected at the edge
//! - Signed-in users are kept off the public pages and signed-out users
//!   are kept off everything else

pub mod guard;

// Re-export commonly used items
pub use guard::{evaluate_route, has_session_cookie, route_guard, RouteDecision};
