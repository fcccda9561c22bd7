//! Application constants
//!
//! Centralized location for all domain-level constants shared by the session
//! store, the request gateway, and the edge route guard.

// Persisted session record (durable store keys)
pub const ACCESS_TOKEN_KEY: &str = "access_token";
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";
pub const USER_KEY: &str = "user";

// Cookie substrate (the edge guard reads these for presence only)
pub const ACCESS_TOKEN_COOKIE: &str = "access_token";
pub const REFRESH_TOKEN_COOKIE: &str = "refresh_token";

// API routing
pub const API_BASE_PATH: &str = "/api/v1";
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_HTTP_TIMEOUT_SECONDS: u64 = 30;

// Page routes used by redirects and the route guard
pub const LOGIN_PATH: &str = "/login";
pub const DASHBOARD_PATH: &str = "/dashboard";
pub const PUBLIC_ROUTE_PREFIXES: &[&str] = &["/login", "/forgot-password", "/reset-password"];

// Silent renewal: the watcher wakes every interval and refreshes once the
// access token has less than the threshold left to live
pub const REFRESH_THRESHOLD_SECONDS: i64 = 300;
pub const EXPIRY_CHECK_INTERVAL_SECONDS: u64 = 30;
