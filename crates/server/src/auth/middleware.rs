use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;

use super::cookies::{self, CookieSlot, PendingCookieAction};
use super::SessionId;

/// Session plumbing for every request.
///
/// Before the handler runs it exposes the browser's session id as a
/// [`SessionId`] extension and inserts a [`CookieSlot`]. Afterwards any
/// cookie change a server function scheduled is written to the response.
///
/// Never rejects a request; server functions decide what a missing session means.
pub async fn session_middleware(mut req: Request, next: Next) -> Response {
    if let Some(session_id) = cookies::extract_session_id(req.headers()) {
        req.extensions_mut().insert(SessionId(session_id));
    }

    let cookie_slot = CookieSlot::default();
    req.extensions_mut().insert(cookie_slot.clone());

    let mut response = next.run(req).await;

    if let Some(action) = cookie_slot.take() {
        tracing::debug!(
            clear = matches!(action, PendingCookieAction::Clear),
            "Applying scheduled session cookie change"
        );
        cookies::apply_action(response.headers_mut(), action);
    }

    response
}
