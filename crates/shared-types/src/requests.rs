//! Request and response bodies exchanged with the delivery backend.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{AppError, Role};

#[cfg(feature = "validation")]
use validator::{Validate, ValidationError};

const PASSWORD_SPECIALS: &str = "!@#$%^&*()_+-=[]{};':\"\\|,.<>/?";

pub const PASSWORD_POLICY_MESSAGE: &str =
    "비밀번호는 8자 이상이며, 영문·숫자·특수문자를 포함해야 합니다.";

/// At least eight characters with a letter, a digit and a symbol.
pub fn meets_password_policy(password: &str) -> bool {
    password.chars().count() >= 8
        && password.chars().any(|c| c.is_ascii_alphabetic())
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| PASSWORD_SPECIALS.contains(c))
}

/// Korean mobile number, digits only: `01` + carrier digit + 7 or 8 digits.
pub fn is_valid_mobile(mobile: &str) -> bool {
    let len = mobile.len();
    (10..=11).contains(&len)
        && mobile.chars().all(|c| c.is_ascii_digit())
        && mobile.starts_with("01")
        && matches!(mobile.as_bytes()[2], b'0' | b'1' | b'6' | b'7' | b'8' | b'9')
}

#[cfg(feature = "validation")]
fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message("필수 입력 항목입니다.".into()));
    }
    Ok(())
}

#[cfg(feature = "validation")]
fn validate_password(value: &str) -> Result<(), ValidationError> {
    if !meets_password_policy(value) {
        return Err(ValidationError::new("password_policy").with_message(PASSWORD_POLICY_MESSAGE.into()));
    }
    Ok(())
}

#[cfg(feature = "validation")]
fn validate_mobile(value: &str) -> Result<(), ValidationError> {
    if !is_valid_mobile(value) {
        return Err(ValidationError::new("mobile")
            .with_message("휴대폰 번호 형식이 올바르지 않습니다.(예: 01012345678)".into()));
    }
    Ok(())
}

#[cfg(feature = "validation")]
fn validate_terms(accepted: &bool) -> Result<(), ValidationError> {
    if !accepted {
        return Err(ValidationError::new("terms").with_message("필수 약관에 동의해 주세요.".into()));
    }
    Ok(())
}

/// Body of `POST /api/v1/auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "validation", derive(validator::Validate))]
pub struct LoginRequest {
    pub account_type: String,
    #[cfg_attr(feature = "validation", validate(custom(function = "validate_not_blank")))]
    pub login_key: String,
    #[cfg_attr(feature = "validation", validate(custom(function = "validate_not_blank")))]
    pub password: String,
}

impl LoginRequest {
    pub fn new(role: Role, login_key: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            account_type: role.account_type().to_string(),
            login_key: login_key.into().trim().to_string(),
            password: password.into(),
        }
    }
}

/// Successful login payload. The session itself travels in `Set-Cookie`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub account_id: Option<i64>,
    #[serde(alias = "nickname")]
    pub name: Option<String>,
    pub role_name: Option<String>,
}

/// Personal (customer) signup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "validation", derive(validator::Validate))]
pub struct UserSignupRequest {
    #[cfg_attr(
        feature = "validation",
        validate(email(message = "이메일 형식이 올바르지 않습니다."))
    )]
    pub login_id: String,
    #[cfg_attr(feature = "validation", validate(custom(function = "validate_mobile")))]
    pub mobile: String,
    #[cfg_attr(feature = "validation", validate(custom(function = "validate_password")))]
    pub password: String,
    #[cfg_attr(
        feature = "validation",
        validate(must_match(other = "password", message = "비밀번호와 비밀번호 확인이 일치하지 않습니다."))
    )]
    pub confirm_password: String,
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 2, max = 20, message = "닉네임은 2~20자로 입력하세요."))
    )]
    pub nickname: String,
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 2, max = 30, message = "이름은 2~30자로 입력하세요."))
    )]
    pub name: String,
    #[cfg_attr(feature = "validation", validate(custom(function = "validate_terms")))]
    pub required_terms_accepted: bool,
    #[serde(default)]
    pub marketing_terms_accepted: bool,
}

/// Store owner signup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "validation", derive(validator::Validate))]
pub struct OwnerSignupRequest {
    #[cfg_attr(
        feature = "validation",
        validate(email(message = "이메일 형식이 올바르지 않습니다."))
    )]
    pub email: String,
    #[cfg_attr(feature = "validation", validate(custom(function = "validate_password")))]
    pub password: String,
    #[cfg_attr(
        feature = "validation",
        validate(must_match(other = "password", message = "비밀번호와 비밀번호 확인이 일치하지 않습니다."))
    )]
    pub confirm_password: String,
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 2, max = 100, message = "이름은 2~100자로 입력하세요."))
    )]
    pub name: String,
    #[cfg_attr(feature = "validation", validate(custom(function = "validate_mobile")))]
    pub mobile: String,
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 5, max = 50, message = "사업자등록번호를 확인해 주세요."))
    )]
    pub business_registration_number: String,
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 2, max = 100, message = "가게 이름은 2~100자로 입력하세요."))
    )]
    pub store_name: String,
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 5, max = 400, message = "가게 주소를 확인해 주세요."))
    )]
    pub store_address: String,
}

/// How a rider gets around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VehicleType {
    #[default]
    Walking,
    Bicycle,
    Motorbike,
    Car,
}

pub const ALL_VEHICLE_TYPES: [VehicleType; 4] = [
    VehicleType::Walking,
    VehicleType::Bicycle,
    VehicleType::Motorbike,
    VehicleType::Car,
];

impl VehicleType {
    /// Motor vehicles need a license and a plate number.
    pub fn requires_vehicle_info(&self) -> bool {
        matches!(self, VehicleType::Motorbike | VehicleType::Car)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleType::Walking => "WALKING",
            VehicleType::Bicycle => "BICYCLE",
            VehicleType::Motorbike => "MOTORBIKE",
            VehicleType::Car => "CAR",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            VehicleType::Walking => "도보",
            VehicleType::Bicycle => "자전거",
            VehicleType::Motorbike => "오토바이",
            VehicleType::Car => "자동차",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        ALL_VEHICLE_TYPES.into_iter().find(|v| v.as_str() == raw)
    }
}

impl fmt::Display for VehicleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rider signup. License and vehicle numbers only matter for motor vehicles.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "validation", derive(validator::Validate))]
#[cfg_attr(
    feature = "validation",
    validate(schema(function = "validate_rider_vehicle", skip_on_field_errors = false))
)]
pub struct RiderSignupRequest {
    #[cfg_attr(
        feature = "validation",
        validate(email(message = "이메일 형식이 올바르지 않습니다."))
    )]
    pub email: String,
    #[cfg_attr(feature = "validation", validate(custom(function = "validate_password")))]
    pub password: String,
    #[cfg_attr(
        feature = "validation",
        validate(must_match(other = "password", message = "비밀번호와 비밀번호 확인이 일치하지 않습니다."))
    )]
    pub confirm_password: String,
    #[cfg_attr(feature = "validation", validate(custom(function = "validate_not_blank")))]
    pub name: String,
    #[cfg_attr(feature = "validation", validate(custom(function = "validate_mobile")))]
    pub mobile: String,
    pub vehicle_type: VehicleType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vehicle_number: Option<String>,
}

impl RiderSignupRequest {
    /// Name of the first missing vehicle field, if any.
    pub fn missing_vehicle_field(&self) -> Option<&'static str> {
        if !self.vehicle_type.requires_vehicle_info() {
            return None;
        }
        let blank = |v: &Option<String>| v.as_deref().map(str::trim).unwrap_or_default().is_empty();
        if blank(&self.license_number) {
            Some("license_number")
        } else if blank(&self.vehicle_number) {
            Some("vehicle_number")
        } else {
            None
        }
    }
}

#[cfg(feature = "validation")]
fn validate_rider_vehicle(req: &RiderSignupRequest) -> Result<(), ValidationError> {
    match req.missing_vehicle_field() {
        Some(field) => Err(ValidationError::new(field)
            .with_message("오토바이/자동차는 면허번호와 차량번호가 필요합니다.".into())),
        None => Ok(()),
    }
}

/// Signup for any role.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum SignupRequest {
    User(UserSignupRequest),
    Owner(OwnerSignupRequest),
    Rider(RiderSignupRequest),
}

impl SignupRequest {
    pub fn role(&self) -> Role {
        match self {
            SignupRequest::User(_) => Role::User,
            SignupRequest::Owner(_) => Role::Owner,
            SignupRequest::Rider(_) => Role::Rider,
        }
    }

    /// Backend path that accepts this signup.
    pub fn endpoint(&self) -> &'static str {
        signup_endpoint(self.role())
    }

    /// Backend JSON body.
    pub fn body(&self) -> serde_json::Value {
        let body = match self {
            SignupRequest::User(req) => serde_json::to_value(req),
            SignupRequest::Owner(req) => serde_json::to_value(req),
            SignupRequest::Rider(req) => serde_json::to_value(req),
        };
        body.unwrap_or(serde_json::Value::Null)
    }

    #[cfg(feature = "validation")]
    pub fn validate_all(&self) -> Result<(), AppError> {
        let result = match self {
            SignupRequest::User(req) => req.validate(),
            SignupRequest::Owner(req) => req.validate(),
            SignupRequest::Rider(req) => req.validate(),
        };
        result.map_err(AppError::from)
    }
}

pub fn signup_endpoint(role: Role) -> &'static str {
    match role {
        Role::User => "/api/v1/auth/signup",
        Role::Owner => "/api/v1/store-owner/auth/signup",
        Role::Rider => "/api/v1/deliverer/auth/signup",
    }
}

pub const LOGIN_ENDPOINT: &str = "/api/v1/auth/login";
pub const ME_ENDPOINT: &str = "/api/v1/auth/me";

/// Personal-signup fields the backend can check for duplicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UniqueField {
    LoginId,
    Mobile,
    Nickname,
}

pub const ALL_UNIQUE_FIELDS: [UniqueField; 3] =
    [UniqueField::LoginId, UniqueField::Mobile, UniqueField::Nickname];

impl UniqueField {
    pub fn endpoint(&self) -> &'static str {
        match self {
            UniqueField::LoginId => "/api/v1/auth/exists/login-id",
            UniqueField::Mobile => "/api/v1/auth/exists/mobile",
            UniqueField::Nickname => "/api/v1/auth/exists/nickname",
        }
    }

    /// Query parameter carrying the value.
    pub fn query_param(&self) -> &'static str {
        match self {
            UniqueField::LoginId => "loginId",
            UniqueField::Mobile => "mobile",
            UniqueField::Nickname => "nickname",
        }
    }

    /// Form field name, as used for field errors.
    pub fn form_field(&self) -> &'static str {
        match self {
            UniqueField::LoginId => "login_id",
            UniqueField::Mobile => "mobile",
            UniqueField::Nickname => "nickname",
        }
    }

    pub fn taken_message(&self) -> &'static str {
        match self {
            UniqueField::LoginId => "이미 사용 중인 아이디입니다.",
            UniqueField::Mobile => "이미 가입된 휴대폰 번호입니다.",
            UniqueField::Nickname => "이미 사용 중인 닉네임입니다.",
        }
    }

    pub fn value_of<'a>(&self, req: &'a UserSignupRequest) -> &'a str {
        match self {
            UniqueField::LoginId => &req.login_id,
            UniqueField::Mobile => &req.mobile,
            UniqueField::Nickname => &req.nickname,
        }
    }
}

/// Body of the backend `exists/*` endpoints.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ExistsResponse {
    pub exists: bool,
}

/// Plain acknowledgement returned to the browser.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MessageResponse {
    pub message: String,
}

/// Failure envelope produced by the backend's exception handlers.
///
/// The backend calls `ApiResponse.fail(code, message)` against a
/// `(success, data, message)` record, so the code usually arrives in
/// `message` and the human text in `data`. A dedicated `code` field is
/// honoured when present.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct BackendFailure {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

fn looks_like_code(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_uppercase() || c == '_')
}

fn code_for_status(status: u16) -> &'static str {
    match status {
        400 => "BAD_REQUEST",
        401 => "UNAUTHORIZED",
        403 => "FORBIDDEN",
        404 => "RESOURCE_NOT_FOUND",
        _ => "INTERNAL_ERROR",
    }
}

impl BackendFailure {
    /// Convert into an [`AppError`], using the HTTP status when the body
    /// carries no code.
    pub fn into_app_error(self, status: u16) -> AppError {
        let data_text = match &self.data {
            Some(serde_json::Value::String(s)) => Some(s.clone()),
            _ => None,
        };
        let (code, text) = match (self.code, self.message) {
            (Some(code), message) => (code, message.or(data_text)),
            (None, Some(message)) if looks_like_code(&message) => (message, data_text),
            (None, message) => (code_for_status(status).to_string(), message),
        };
        let text = text
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| default_message(&code).to_string());
        AppError::from_backend_code(&code, text)
    }
}

fn default_message(code: &str) -> &'static str {
    match code {
        "INVALID_CREDENTIALS" => "아이디 또는 비밀번호가 올바르지 않습니다.",
        "UNAUTHORIZED" => "로그인이 필요합니다.",
        "FORBIDDEN" => "접근 권한이 없습니다.",
        "BAD_REQUEST" => "요청 값을 확인해 주세요.",
        _ => "요청을 처리하지 못했습니다. 잠시 후 다시 시도해 주세요.",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AppErrorKind;

    fn rider(vehicle_type: VehicleType) -> RiderSignupRequest {
        RiderSignupRequest {
            email: "rider@example.com".into(),
            password: "ride!2024x".into(),
            confirm_password: "ride!2024x".into(),
            name: "이배달".into(),
            mobile: "01098765432".into(),
            vehicle_type,
            license_number: None,
            vehicle_number: None,
        }
    }

    #[test]
    fn password_policy() {
        assert!(meets_password_policy("abcd123!"));
        assert!(!meets_password_policy("abcd1234"));
        assert!(!meets_password_policy("abc!1"));
        assert!(!meets_password_policy("!!!!1111"));
    }

    #[test]
    fn unique_fields_point_at_exists_endpoints() {
        let req = UserSignupRequest {
            login_id: "kim@example.com".into(),
            mobile: "01012345678".into(),
            nickname: "먹보".into(),
            ..Default::default()
        };
        let checks: Vec<_> = ALL_UNIQUE_FIELDS
            .iter()
            .map(|f| (f.endpoint(), f.query_param(), f.value_of(&req)))
            .collect();
        assert_eq!(
            checks,
            vec![
                ("/api/v1/auth/exists/login-id", "loginId", "kim@example.com"),
                ("/api/v1/auth/exists/mobile", "mobile", "01012345678"),
                ("/api/v1/auth/exists/nickname", "nickname", "먹보"),
            ]
        );
        let parsed: ExistsResponse = serde_json::from_str(r#"{"exists":true}"#).unwrap();
        assert!(parsed.exists);
    }

    #[test]
    fn mobile_format() {
        assert!(is_valid_mobile("01012345678"));
        assert!(is_valid_mobile("0111234567"));
        assert!(!is_valid_mobile("010-1234-5678"));
        assert!(!is_valid_mobile("02123456789"));
        assert!(!is_valid_mobile("0121234567"));
    }

    #[test]
    fn login_request_uses_backend_field_names() {
        let req = LoginRequest::new(Role::Owner, "  boss@example.com ", "pw");
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["accountType"], "OWNER");
        assert_eq!(json["loginKey"], "boss@example.com");
    }

    #[test]
    fn rider_vehicle_info_rule() {
        assert_eq!(rider(VehicleType::Walking).missing_vehicle_field(), None);
        assert_eq!(rider(VehicleType::Bicycle).missing_vehicle_field(), None);
        assert_eq!(
            rider(VehicleType::Motorbike).missing_vehicle_field(),
            Some("license_number")
        );
        let mut car = rider(VehicleType::Car);
        car.license_number = Some("11-22-333333-44".into());
        assert_eq!(car.missing_vehicle_field(), Some("vehicle_number"));
        car.vehicle_number = Some("12가3456".into());
        assert_eq!(car.missing_vehicle_field(), None);
    }

    #[test]
    fn signup_endpoints_per_role() {
        assert_eq!(
            SignupRequest::User(UserSignupRequest::default()).endpoint(),
            "/api/v1/auth/signup"
        );
        assert_eq!(
            SignupRequest::Owner(OwnerSignupRequest::default()).endpoint(),
            "/api/v1/store-owner/auth/signup"
        );
        assert_eq!(
            SignupRequest::Rider(rider(VehicleType::Walking)).role(),
            Role::Rider
        );
    }

    #[test]
    fn rider_body_omits_missing_vehicle_fields() {
        let body = SignupRequest::Rider(rider(VehicleType::Bicycle)).body();
        assert_eq!(body["vehicleType"], "BICYCLE");
        assert_eq!(body["confirmPassword"], "ride!2024x");
        assert!(body.get("licenseNumber").is_none());
    }

    #[test]
    fn failure_with_code_in_message_slot() {
        let body: BackendFailure = serde_json::from_str(
            r#"{"success":false,"data":"Invalid credentials.","message":"INVALID_CREDENTIALS"}"#,
        )
        .unwrap();
        let err = body.into_app_error(401);
        assert_eq!(err.kind, AppErrorKind::Unauthorized);
        assert_eq!(err.message, "Invalid credentials.");
    }

    #[test]
    fn failure_with_explicit_code() {
        let body: BackendFailure = serde_json::from_str(
            r#"{"success":false,"code":"BAD_REQUEST","message":"이미 사용 중인 이메일입니다."}"#,
        )
        .unwrap();
        let err = body.into_app_error(400);
        assert_eq!(err.kind, AppErrorKind::BadRequest);
        assert_eq!(err.message, "이미 사용 중인 이메일입니다.");
    }

    #[test]
    fn failure_without_code_uses_status() {
        let body: BackendFailure =
            serde_json::from_str(r#"{"success":false,"message":"Email is already in use."}"#).unwrap();
        let err = body.into_app_error(400);
        assert_eq!(err.kind, AppErrorKind::BadRequest);
        assert_eq!(err.message, "Email is already in use.");

        let err = BackendFailure::default().into_app_error(403);
        assert_eq!(err.kind, AppErrorKind::Forbidden);
        assert_eq!(err.message, "접근 권한이 없습니다.");
    }

    #[cfg(feature = "validation")]
    mod validation {
        use super::*;

        fn has_field(err: &AppError, field: &str) -> bool {
            AppError::field_message(&err.field_errors, field).is_some()
        }

        #[test]
        fn rider_signup_rejects_mismatched_confirmation() {
            let mut req = rider(VehicleType::Walking);
            req.confirm_password = "different!1".into();
            assert!(req.validate().is_err());
        }

        #[test]
        fn motorbike_rider_needs_vehicle_info() {
            let err = SignupRequest::Rider(rider(VehicleType::Motorbike))
                .validate_all()
                .unwrap_err();
            assert_eq!(err.kind, AppErrorKind::ValidationError);
            assert!(has_field(&err, "license_number"));
        }

        #[test]
        fn walking_rider_passes() {
            assert!(SignupRequest::Rider(rider(VehicleType::Walking))
                .validate_all()
                .is_ok());
        }

        #[test]
        fn user_signup_requires_terms_and_email() {
            let req = UserSignupRequest {
                login_id: "not-an-email".into(),
                mobile: "01012345678".into(),
                password: "abcd123!".into(),
                confirm_password: "abcd123!".into(),
                nickname: "먹보".into(),
                name: "김민수".into(),
                required_terms_accepted: false,
                marketing_terms_accepted: false,
            };
            let err = SignupRequest::User(req).validate_all().unwrap_err();
            assert!(has_field(&err, "login_id"));
            assert!(has_field(&err, "required_terms_accepted"));
        }

        #[test]
        fn blank_login_key_is_rejected() {
            let req = LoginRequest::new(Role::User, "   ", "secret");
            let err = AppError::from(req.validate().unwrap_err());
            assert!(has_field(&err, "login_key"));
        }
    }
}
