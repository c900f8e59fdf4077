//! HTTP client for the delivery backend.
//!
//! The backend keeps sessions server-side and identifies them by the
//! `JSESSIONID` cookie. This module turns its endpoints into typed calls
//! and its failure envelopes into [`AppError`]s.

use reqwest::header::{ACCEPT, COOKIE};
use reqwest::{Response, StatusCode};
use shared_types::{
    AppError, BackendConfig, BackendFailure, ExistsResponse, Identity, LoginRequest,
    LoginResponse, MeResponse, SignupRequest, UniqueField, LOGIN_ENDPOINT, ME_ENDPOINT,
};
use std::sync::OnceLock;
use std::time::Duration;

use crate::auth::cookies;
use crate::error_convert::ReqwestErrorExt;

/// Outcome of a successful backend login.
#[derive(Debug, Clone)]
pub struct BackendSession {
    pub session_id: String,
    pub login: LoginResponse,
}

#[derive(Debug, Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    config: BackendConfig,
}

static SHARED: OnceLock<BackendClient> = OnceLock::new();

impl BackendClient {
    pub fn new(config: BackendConfig) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Falling back to a default HTTP client");
                reqwest::Client::new()
            });
        Self { http, config }
    }

    /// Process-wide client built from the loaded configuration.
    pub fn shared() -> &'static BackendClient {
        SHARED.get_or_init(|| BackendClient::new(crate::config::backend_config().clone()))
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// `POST /api/v1/auth/login`. The session id comes back in `Set-Cookie`.
    #[tracing::instrument(skip_all, fields(account_type = %req.account_type))]
    pub async fn login(&self, req: &LoginRequest) -> Result<BackendSession, AppError> {
        let response = self
            .http
            .post(self.config.endpoint(LOGIN_ENDPOINT))
            .header(ACCEPT, "application/json")
            .json(req)
            .send()
            .await
            .map_err(ReqwestErrorExt::into_app_error)?;

        if !response.status().is_success() {
            return Err(failure(response).await);
        }

        let session_id = cookies::backend_session_from_set_cookie(response.headers())
            .ok_or_else(|| AppError::internal("Backend login did not return a session cookie"))?;
        let login: LoginResponse = response
            .json()
            .await
            .map_err(ReqwestErrorExt::into_app_error)?;

        tracing::info!(account_id = ?login.account_id, "Backend login succeeded");
        Ok(BackendSession { session_id, login })
    }

    /// `GET /api/v1/auth/me`. `Ok(None)` when the backend does not
    /// recognise the session.
    #[tracing::instrument(skip_all)]
    pub async fn me(&self, session_id: &str) -> Result<Option<Identity>, AppError> {
        let response = self
            .http
            .get(self.config.endpoint(ME_ENDPOINT))
            .header(ACCEPT, "application/json")
            .header(COOKIE, cookies::backend_cookie_header(session_id))
            .send()
            .await
            .map_err(ReqwestErrorExt::into_app_error)?;

        match response.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                tracing::debug!(status = %response.status(), "Backend rejected session");
                Ok(None)
            }
            status if status.is_success() => {
                let me: MeResponse = response
                    .json()
                    .await
                    .map_err(ReqwestErrorExt::into_app_error)?;
                Identity::try_from(me).map(Some)
            }
            _ => Err(failure(response).await),
        }
    }

    /// Post a signup to the role's endpoint. The backend answers with a
    /// bare `"ok"` or a small JSON body; either way only the status matters.
    #[tracing::instrument(skip_all, fields(role = %req.role()))]
    pub async fn signup(&self, req: &SignupRequest) -> Result<(), AppError> {
        let response = self
            .http
            .post(self.config.endpoint(req.endpoint()))
            .header(ACCEPT, "application/json")
            .json(&req.body())
            .send()
            .await
            .map_err(ReqwestErrorExt::into_app_error)?;

        if !response.status().is_success() {
            return Err(failure(response).await);
        }
        tracing::info!("Backend signup accepted");
        Ok(())
    }

    /// `GET /api/v1/auth/exists/*`. True when an account already uses `value`.
    #[tracing::instrument(skip(self, value))]
    pub async fn exists(&self, field: UniqueField, value: &str) -> Result<bool, AppError> {
        let response = self
            .http
            .get(self.config.endpoint(field.endpoint()))
            .header(ACCEPT, "application/json")
            .query(&[(field.query_param(), value)])
            .send()
            .await
            .map_err(ReqwestErrorExt::into_app_error)?;

        if !response.status().is_success() {
            return Err(failure(response).await);
        }
        let body: ExistsResponse = response
            .json()
            .await
            .map_err(ReqwestErrorExt::into_app_error)?;
        Ok(body.exists)
    }

    /// Whether the backend answers HTTP at all. Any status counts.
    pub async fn probe(&self) -> Result<(), String> {
        self.http
            .get(self.config.endpoint("/"))
            .send()
            .await
            .map(|_| ())
            .map_err(|e| e.into_app_error().message)
    }
}

/// Read a failed response into an [`AppError`].
async fn failure(response: Response) -> AppError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    let envelope: BackendFailure = serde_json::from_str(&body).unwrap_or_else(|_| BackendFailure {
        message: Some(body.trim().to_string()).filter(|b| !b.is_empty() && b.len() < 200),
        ..BackendFailure::default()
    });
    let err = envelope.into_app_error(status);
    tracing::warn!(status, kind = %err.kind, message = %err.message, "Backend call failed");
    err
}
