use dioxus::prelude::ServerFnError;
use shared_types::AppError;

/// Convert a reqwest::Error from a backend call into an AppError.
///
/// Anything that means "we never got an answer" is `Unavailable`; a reply we
/// could not read is `InternalError`.
pub fn reqwest_to_app_error(err: reqwest::Error) -> AppError {
    if err.is_timeout() {
        AppError::unavailable("배달 서버 응답이 지연되고 있습니다. 잠시 후 다시 시도해 주세요.")
    } else if err.is_connect() || err.is_request() {
        AppError::unavailable("배달 서버에 연결할 수 없습니다. 잠시 후 다시 시도해 주세요.")
    } else if err.is_decode() || err.is_body() {
        AppError::internal(format!("Unreadable backend response: {err}"))
    } else {
        AppError::internal(err.to_string())
    }
}

/// Convert an AppError into a ServerFnError by serializing as JSON.
pub fn app_error_to_server_fn_error(err: AppError) -> ServerFnError {
    let json = serde_json::to_string(&err).unwrap_or_else(|_| err.message.clone());
    ServerFnError::new(json)
}

/// Extension trait providing `.into_app_error()` on reqwest::Error.
pub trait ReqwestErrorExt {
    fn into_app_error(self) -> AppError;
}

impl ReqwestErrorExt for reqwest::Error {
    fn into_app_error(self) -> AppError {
        reqwest_to_app_error(self)
    }
}

/// Extension trait providing `.into_server_fn_error()` on AppError.
pub trait AppErrorExt {
    fn into_server_fn_error(self) -> ServerFnError;
}

impl AppErrorExt for AppError {
    fn into_server_fn_error(self) -> ServerFnError {
        app_error_to_server_fn_error(self)
    }
}

/// Trait for validating request DTOs before processing.
pub trait ValidateRequest {
    fn validate_request(&self) -> Result<(), AppError>;
}

impl<T: validator::Validate> ValidateRequest for T {
    fn validate_request(&self) -> Result<(), AppError> {
        self.validate().map_err(AppError::from)
    }
}
