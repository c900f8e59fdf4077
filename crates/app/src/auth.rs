use dioxus::prelude::*;
use shared_types::{authorize, AppError, AuthResult, GuardView, Identity, Role, SessionState};

use crate::routes::Route;

/// Global authentication state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AuthState {
    pub identity: Signal<Option<Identity>>,
    /// Bumped whenever guarded pages should ask the server again.
    pub revision: Signal<u32>,
}

impl AuthState {
    pub fn new() -> Self {
        Self {
            identity: Signal::new(None),
            revision: Signal::new(0),
        }
    }

    pub fn set_identity(&mut self, identity: Identity) {
        self.identity.set(Some(identity));
    }

    pub fn clear(&mut self) {
        self.identity.set(None);
    }

    /// Re-run identity resolution on every mounted guard.
    pub fn refresh(&mut self) {
        *self.revision.write() += 1;
    }
}

/// Hook to access auth state.
pub fn use_auth() -> AuthState {
    use_context::<AuthState>()
}

/// Turn the raw server function result into a [`SessionState`].
fn session_state(result: Option<&Result<Option<Identity>, ServerFnError>>) -> SessionState {
    match result {
        None => SessionState::Pending,
        Some(Ok(identity)) => SessionState::Resolved(identity.clone()),
        Some(Err(e)) => SessionState::Failed(
            AppError::from_server_error(&e.to_string())
                .unwrap_or_else(|| AppError::unavailable(e.to_string())),
        ),
    }
}

/// Protect a page for `required`.
///
/// Resolution runs on the client after first render, so the page shows up
/// immediately with `fallback` and `loading = true`. A visitor who is not
/// signed in as `required` is sent to that role's login page (replace). If
/// the session cannot be checked at all the page stays up with the fallback.
///
/// The role is fixed for the lifetime of the hook; key the calling
/// component by role when the same component serves several roles.
pub fn use_role_guard(required: Role, fallback: Identity) -> GuardView {
    let mut auth = use_auth();

    let resource = use_resource(move || async move {
        // Subscribe so `AuthState::refresh` re-runs the lookup.
        let _ = (auth.revision)();
        server::api::current_identity().await
    });

    use_effect(move || {
        let state = session_state(resource.read().as_ref());
        let result = authorize(required, &state);
        match &result {
            AuthResult::Authorized(identity) => auth.set_identity(identity.clone()),
            AuthResult::Unauthorized(reason) => {
                tracing::debug!(?reason, %required, "Guard redirecting to login");
                auth.clear();
            }
            AuthResult::Loading | AuthResult::Unavailable => {}
        }
        if let Some(page) = result.redirect(required) {
            navigator().replace(Route::from(page));
        }
    });

    let state = session_state(resource.read().as_ref());
    authorize(required, &state).view(&fallback)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use shared_types::AppErrorKind;

    #[test]
    fn pending_resource_is_pending_session() {
        assert_eq!(session_state(None), SessionState::Pending);
    }

    #[test]
    fn structured_server_error_is_kept() {
        let err = ServerFnError::new(
            error_json(&AppError::unauthorized("로그인이 필요합니다.")),
        );
        match session_state(Some(&Err(err))) {
            SessionState::Failed(e) => assert_eq!(e.kind, AppErrorKind::Unauthorized),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn opaque_server_error_is_unavailable() {
        let err = ServerFnError::new("connection reset");
        match session_state(Some(&Err(err))) {
            SessionState::Failed(e) => assert_eq!(e.kind, AppErrorKind::Unavailable),
            other => panic!("unexpected {other:?}"),
        }
    }

    fn error_json(err: &AppError) -> String {
        format!(r#"{{"kind":"{}","message":"{}"}}"#, err.kind, err.message)
    }
}
