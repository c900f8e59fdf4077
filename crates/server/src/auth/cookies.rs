use axum::http::{header, HeaderMap, HeaderValue};
use cookie::Cookie;
use std::sync::{Arc, Mutex};

/// Our HTTP-only cookie; its value is the backend session id.
pub const SESSION_COOKIE: &str = "cab_session";

/// Session cookie issued by the delivery backend.
pub const BACKEND_SESSION_COOKIE: &str = "JSESSIONID";

fn cookie_secure() -> bool {
    std::env::var("COOKIE_SECURE")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(false)
}

fn cookie_domain() -> Option<String> {
    std::env::var("COOKIE_DOMAIN")
        .ok()
        .filter(|d| !d.is_empty())
}

fn to_header(cookie: Cookie<'_>) -> Option<HeaderValue> {
    match HeaderValue::from_str(&cookie.to_string()) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::error!(error = %e, "Refusing to emit an invalid Set-Cookie header");
            None
        }
    }
}

/// Set-Cookie value carrying the backend session id. Lives as long as the
/// browser session; the backend decides when the id expires.
pub fn build_session_cookie(session_id: &str) -> Option<HeaderValue> {
    let mut cookie = Cookie::build((SESSION_COOKIE, session_id.to_string()))
        .http_only(true)
        .same_site(cookie::SameSite::Lax)
        .path("/")
        .secure(cookie_secure());

    if let Some(domain) = cookie_domain() {
        cookie = cookie.domain(domain);
    }

    to_header(cookie.build())
}

/// Set-Cookie value that removes the session cookie.
pub fn build_clear_cookie() -> Option<HeaderValue> {
    let mut cookie = Cookie::build((SESSION_COOKIE, ""))
        .http_only(true)
        .same_site(cookie::SameSite::Lax)
        .path("/")
        .max_age(cookie::time::Duration::ZERO);

    if let Some(domain) = cookie_domain() {
        cookie = cookie.domain(domain);
    }

    to_header(cookie.build())
}

/// Parse a specific cookie value from the `Cookie` request header(s).
pub fn extract_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    for header_value in headers.get_all(header::COOKIE) {
        let Ok(cookie_str) = header_value.to_str() else {
            continue;
        };
        for c in Cookie::split_parse(cookie_str).flatten() {
            if c.name() == name && !c.value().is_empty() {
                return Some(c.value().to_string());
            }
        }
    }
    None
}

/// Backend session id carried by our cookie.
pub fn extract_session_id(headers: &HeaderMap) -> Option<String> {
    extract_cookie(headers, SESSION_COOKIE)
}

/// Backend session id from a backend response's `Set-Cookie` headers.
pub fn backend_session_from_set_cookie(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .filter_map(|raw| Cookie::parse(raw.to_string()).ok())
        .find(|c| c.name() == BACKEND_SESSION_COOKIE && !c.value().is_empty())
        .map(|c| c.value().to_string())
}

/// `Cookie` request header that presents a session id to the backend.
pub fn backend_cookie_header(session_id: &str) -> String {
    Cookie::new(BACKEND_SESSION_COOKIE, session_id).to_string()
}

/// Cookie change requested by a server function, applied by the middleware.
#[derive(Clone, Debug, PartialEq)]
pub enum PendingCookieAction {
    Set(String),
    Clear,
}

/// Shared slot for server functions to communicate cookie actions to the
/// middleware. Stored in request extensions.
#[derive(Clone, Debug, Default)]
pub struct CookieSlot(pub Arc<Mutex<Option<PendingCookieAction>>>);

impl CookieSlot {
    pub fn schedule(&self, action: PendingCookieAction) {
        if let Ok(mut pending) = self.0.lock() {
            *pending = Some(action);
        }
    }

    pub fn take(&self) -> Option<PendingCookieAction> {
        self.0.lock().ok().and_then(|mut pending| pending.take())
    }
}

/// Hand a cookie change to the middleware of the current request.
pub fn schedule(action: PendingCookieAction) {
    if let Some(ctx) = dioxus::fullstack::FullstackContext::current() {
        let parts = ctx.parts_mut();
        match parts.extensions.get::<CookieSlot>() {
            Some(slot) => slot.schedule(action),
            None => tracing::warn!("No cookie slot on request; is session_middleware installed?"),
        }
    }
}

/// Schedule the session cookie to be cleared by the middleware.
pub fn schedule_clear_cookie() {
    schedule(PendingCookieAction::Clear);
}

/// Apply a pending action to outgoing response headers.
pub fn apply_action(headers: &mut HeaderMap, action: PendingCookieAction) {
    let value = match action {
        PendingCookieAction::Set(session_id) => build_session_cookie(&session_id),
        PendingCookieAction::Clear => build_clear_cookie(),
    };
    if let Some(value) = value {
        headers.append(header::SET_COOKIE, value);
    }
}
