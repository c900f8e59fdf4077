pub mod cookies;
pub mod middleware;
pub mod session;

/// Backend session id presented by the browser, inserted by
/// [`middleware::session_middleware`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionId(pub String);

/// Session of the request behind the current server function call.
///
/// Reads the middleware-provided extension first and falls back to parsing
/// the cookie header, which covers calls that bypassed the middleware.
pub fn current_session() -> Option<SessionId> {
    let ctx = dioxus::fullstack::FullstackContext::current()?;
    let parts = ctx.parts_mut();
    if let Some(session) = parts.extensions.get::<SessionId>() {
        return Some(session.clone());
    }
    cookies::extract_session_id(&parts.headers).map(SessionId)
}
