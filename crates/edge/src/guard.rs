//! Route guard decisions for browser navigation
//!
//! Evaluates the request path and session-cookie presence before any page
//! renders. Cookie contents are never validated here; a token that turns out
//! to be stale is caught by the gateway on the first API call it makes.

use axum::{
    extract::Request,
    http::{header, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use painel_domain::constants::{
    ACCESS_TOKEN_COOKIE, DASHBOARD_PATH, LOGIN_PATH, PUBLIC_ROUTE_PREFIXES, REFRESH_TOKEN_COOKIE,
};
use tracing::debug;

/// Outcome of evaluating one navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    /// Let the request continue to the page layer.
    Pass,
    /// Send the browser elsewhere with a temporary (307) redirect.
    Redirect(&'static str),
}

/// Decides what to do with a navigation request.
///
/// Rules, in evaluation order:
/// 1. API calls (`/api` prefix) and dotted asset paths pass through
/// 2. The root path always redirects, to the dashboard with a session and
///    to the login page without one
/// 3. Public pages (login, password recovery) redirect signed-in users to
///    the dashboard
/// 4. Every other page redirects signed-out users to the login page
///
/// # Arguments
///
/// * `path` - Request path, e.g. `/dashboard/settings`
/// * `has_session` - Whether either session cookie is present
#[must_use]
pub fn evaluate_route(path: &str, has_session: bool) -> RouteDecision {
    // API calls and dotted asset paths are not page navigations.
    if path.starts_with("/api") || path.contains('.') {
        return RouteDecision::Pass;
    }

    // The root never renders content of its own.
    if path == "/" {
        return if has_session {
            RouteDecision::Redirect(DASHBOARD_PATH)
        } else {
            RouteDecision::Redirect(LOGIN_PATH)
        };
    }

    let is_public = PUBLIC_ROUTE_PREFIXES
        .iter()
        .any(|prefix| path.starts_with(prefix));

    if is_public && has_session {
        return RouteDecision::Redirect(DASHBOARD_PATH);
    }

    if !is_public && !has_session {
        return RouteDecision::Redirect(LOGIN_PATH);
    }

    RouteDecision::Pass
}

/// Reports whether the request carries a session cookie.
///
/// Either the access or the refresh cookie counts. An empty value is a
/// deleted cookie, not a session.
#[must_use]
pub fn has_session_cookie(headers: &HeaderMap) -> bool {
    let Some(cookies) = headers.get(header::COOKIE).and_then(|v| v.to_str().ok()) else {
        return false;
    };

    cookie_value(cookies, ACCESS_TOKEN_COOKIE).is_some()
        || cookie_value(cookies, REFRESH_TOKEN_COOKIE).is_some()
}

/// Extracts a named cookie from a `Cookie` header value.
///
/// First occurrence wins, matching browser semantics.
fn cookie_value<'a>(cookies: &'a str, name: &str) -> Option<&'a str> {
    for pair in cookies.split(';') {
        let Some((key, value)) = pair.trim().split_once('=') else {
            continue;
        };
        if key.trim() == name {
            let value = value.trim();
            if value.is_empty() {
                return None;
            }
            return Some(value);
        }
    }
    None
}

/// Axum middleware applying [`evaluate_route`] to every request.
///
/// Attach it with `axum::middleware::from_fn`:
///
/// ```no_run
/// use axum::{middleware, routing::get, Router};
///
/// let app: Router = Router::new()
///     .route("/dashboard", get(|| async { "ok" }))
///     .layer(middleware::from_fn(painel_edge::route_guard));
/// ```
pub async fn route_guard(request: Request, next: Next) -> Response {
    let decision = evaluate_route(request.uri().path(), has_session_cookie(request.headers()));

    match decision {
        RouteDecision::Pass => next.run(request).await,
        RouteDecision::Redirect(location) => {
            debug!("Redirecting {} to {location}", request.uri().path());
            Redirect::temporary(location).into_response()
        }
    }
}
