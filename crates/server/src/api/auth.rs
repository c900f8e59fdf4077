use dioxus::prelude::*;
use shared_types::{Identity, MessageResponse, Role, SignupRequest, UniqueField};

#[cfg(feature = "server")]
use crate::error_convert::{AppErrorExt, ValidateRequest};

/// Message shown on the login page after a successful signup.
pub const SIGNUP_COMPLETE_MESSAGE: &str = "회원가입이 완료되었습니다. 로그인해 주세요.";

/// Identity behind the caller's session cookie.
///
/// `Ok(None)` means "not signed in": no cookie, or a cookie the backend no
/// longer honours (in which case the stale cookie is cleared). Backend
/// outages surface as an `Unavailable` error, never as `None`.
#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn current_identity() -> Result<Option<Identity>, ServerFnError> {
    use crate::auth::{current_session, session};
    use crate::backend::BackendClient;

    let Some(current) = current_session() else {
        return Ok(None);
    };

    let lookup = BackendClient::shared().me(&current.0).await;
    session::after_lookup(lookup)
        .apply()
        .map_err(|e| e.into_server_fn_error())
}

/// Sign in as `role`. Sets the HTTP-only session cookie on success.
///
/// The account must actually hold `role`; an owner signing in on the rider
/// page is refused rather than bounced between dashboards.
#[cfg_attr(feature = "server", tracing::instrument(skip(password)))]
#[server]
pub async fn login(
    role: Role,
    login_key: String,
    password: String,
) -> Result<Identity, ServerFnError> {
    use crate::auth::session;
    use crate::backend::BackendClient;
    use shared_types::{AppError, LoginRequest};

    let req = LoginRequest::new(role, login_key, password);
    req.validate_request()
        .map_err(|e| e.into_server_fn_error())?;

    let client = BackendClient::shared();
    let backend = client
        .login(&req)
        .await
        .map_err(|e| e.into_server_fn_error())?;

    let identity = client
        .me(&backend.session_id)
        .await
        .map_err(|e| e.into_server_fn_error())?
        .ok_or_else(|| {
            AppError::unauthorized("로그인 세션을 확인하지 못했습니다. 다시 로그인해 주세요.")
                .into_server_fn_error()
        })?;

    session::after_login(role, &backend.session_id, identity)
        .apply()
        .map_err(|e| e.into_server_fn_error())
}

/// Create an account for the request's role. Does not sign the user in.
#[cfg_attr(feature = "server", tracing::instrument(skip(request), fields(role = %request.role())))]
#[server]
pub async fn signup(request: SignupRequest) -> Result<MessageResponse, ServerFnError> {
    use crate::backend::BackendClient;

    request
        .validate_all()
        .map_err(|e| e.into_server_fn_error())?;

    BackendClient::shared()
        .signup(&request)
        .await
        .map_err(|e| e.into_server_fn_error())?;

    Ok(MessageResponse {
        message: SIGNUP_COMPLETE_MESSAGE.to_string(),
    })
}

/// Whether `value` is still free for a personal signup. Blank values are
/// left to the signup validation.
#[cfg_attr(feature = "server", tracing::instrument(skip(value)))]
#[server]
pub async fn check_available(field: UniqueField, value: String) -> Result<bool, ServerFnError> {
    use crate::backend::BackendClient;

    let value = value.trim();
    if value.is_empty() {
        return Ok(true);
    }

    let taken = BackendClient::shared()
        .exists(field, value)
        .await
        .map_err(|e| e.into_server_fn_error())?;
    Ok(!taken)
}

/// Forget the session on this side. The backend session simply expires.
#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn logout() -> Result<(), ServerFnError> {
    crate::auth::cookies::schedule_clear_cookie();
    Ok(())
}
