use crate::{AppError, Identity, Page, Role};

/// What the client knows about the current session.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    /// The identity lookup has not finished.
    Pending,
    /// `None` when the visitor is not signed in.
    Resolved(Option<Identity>),
    Failed(AppError),
}

#[derive(Debug, Clone, PartialEq)]
pub enum DenyReason {
    NotSignedIn,
    RoleMismatch { actual: Role },
}

/// Decision for a role-protected page.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthResult {
    Loading,
    Authorized(Identity),
    Unauthorized(DenyReason),
    /// The session could not be checked. The page stays up with its
    /// fallback identity.
    Unavailable,
}

/// Identity and loading flag handed to the page.
#[derive(Debug, Clone, PartialEq)]
pub struct GuardView {
    pub identity: Identity,
    pub loading: bool,
}

impl AuthResult {
    pub fn view(&self, fallback: &Identity) -> GuardView {
        match self {
            AuthResult::Loading => GuardView {
                identity: fallback.clone(),
                loading: true,
            },
            AuthResult::Authorized(identity) => GuardView {
                identity: identity.clone(),
                loading: false,
            },
            AuthResult::Unauthorized(_) | AuthResult::Unavailable => GuardView {
                identity: fallback.clone(),
                loading: false,
            },
        }
    }

    /// Where to send the visitor, if anywhere.
    pub fn redirect(&self, required: Role) -> Option<Page> {
        match self {
            AuthResult::Unauthorized(_) => Some(Page::Login(required)),
            _ => None,
        }
    }
}

pub fn authorize(required: Role, state: &SessionState) -> AuthResult {
    match state {
        SessionState::Pending => AuthResult::Loading,
        SessionState::Resolved(None) => AuthResult::Unauthorized(DenyReason::NotSignedIn),
        SessionState::Resolved(Some(identity)) if identity.role == required => {
            AuthResult::Authorized(identity.clone())
        }
        SessionState::Resolved(Some(identity)) => {
            AuthResult::Unauthorized(DenyReason::RoleMismatch {
                actual: identity.role,
            })
        }
        SessionState::Failed(err) if err.is_auth_failure() => {
            AuthResult::Unauthorized(DenyReason::NotSignedIn)
        }
        SessionState::Failed(_) => AuthResult::Unavailable,
    }
}
