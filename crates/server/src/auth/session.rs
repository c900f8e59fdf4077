//! What a backend answer means for our session cookie.

use shared_types::{content_for, AppError, Identity, Role};

use super::cookies::{self, PendingCookieAction};

/// Result of a session call together with the cookie change it implies.
#[derive(Debug, PartialEq)]
pub struct SessionOutcome<T> {
    pub cookie: Option<PendingCookieAction>,
    pub result: Result<T, AppError>,
}

impl<T> SessionOutcome<T> {
    /// Schedule the cookie change for the current request and return the result.
    pub fn apply(self) -> Result<T, AppError> {
        if let Some(action) = self.cookie {
            cookies::schedule(action);
        }
        self.result
    }
}

/// A backend login succeeded as `identity`. Only an account holding the
/// page's role gets a cookie; any session the browser already has is left alone.
pub fn after_login(required: Role, session_id: &str, identity: Identity) -> SessionOutcome<Identity> {
    if identity.role != required {
        tracing::warn!(expected = %required, actual = %identity.role, "Login with a different role");
        return SessionOutcome {
            cookie: None,
            result: Err(AppError::forbidden(format!(
                "{} 계정이 아닙니다. 알맞은 로그인 화면을 이용해 주세요.",
                content_for(required).role_label
            ))),
        };
    }

    tracing::info!(role = %identity.role, "Signed in");
    SessionOutcome {
        cookie: Some(PendingCookieAction::Set(session_id.to_string())),
        result: Ok(identity),
    }
}

/// The backend was asked who owns the browser's session.
/// A session it no longer knows is cleared; outages leave the cookie in place.
pub fn after_lookup(lookup: Result<Option<Identity>, AppError>) -> SessionOutcome<Option<Identity>> {
    match lookup {
        Ok(None) => {
            tracing::info!("Backend no longer recognises session, clearing cookie");
            SessionOutcome {
                cookie: Some(PendingCookieAction::Clear),
                result: Ok(None),
            }
        }
        other => SessionOutcome {
            cookie: None,
            result: other,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::AppErrorKind;

    fn owner() -> Identity {
        Identity {
            account_id: Some(2),
            login_key: Some("owner@example.com".into()),
            name: "박사장".into(),
            role: Role::Owner,
            mobile: None,
        }
    }

    #[test]
    fn matching_role_sets_cookie() {
        let outcome = after_login(Role::Owner, "sess-1", owner());
        assert_eq!(outcome.cookie, Some(PendingCookieAction::Set("sess-1".into())));
        assert_eq!(outcome.result, Ok(owner()));
    }

    #[test]
    fn wrong_role_is_forbidden_and_leaves_cookie_alone() {
        let outcome = after_login(Role::Rider, "sess-1", owner());
        assert_eq!(outcome.cookie, None);
        let err = outcome.result.unwrap_err();
        assert_eq!(err.kind, AppErrorKind::Forbidden);
        assert!(err.message.starts_with("라이더 계정이 아닙니다."));
    }

    #[test]
    fn unknown_session_is_cleared() {
        let outcome = after_lookup(Ok(None));
        assert_eq!(outcome.cookie, Some(PendingCookieAction::Clear));
        assert_eq!(outcome.result, Ok(None));
    }

    #[test]
    fn known_session_and_outage_keep_cookie() {
        let outcome = after_lookup(Ok(Some(owner())));
        assert_eq!(outcome.cookie, None);
        assert_eq!(outcome.result, Ok(Some(owner())));

        let outcome = after_lookup(Err(AppError::unavailable("down")));
        assert_eq!(outcome.cookie, None);
        assert_eq!(outcome.result.unwrap_err().kind, AppErrorKind::Unavailable);
    }
}
