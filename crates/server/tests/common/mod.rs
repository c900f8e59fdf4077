use axum::{
    body::Body,
    extract::Query,
    http::{header, HeaderMap, Request, StatusCode},
    response::{IntoResponse, Response},
    routing::{get as get_route, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use server::backend::BackendClient;
use shared_types::BackendConfig;
use tower::ServiceExt;

/// Accounts known to the fake backend: (login key, password, account type, name).
pub const ACCOUNTS: &[Account] = &[
    ("minsu", "Passw0rd!", "USER", "김민수"),
    ("owner@example.com", "Owner!2024", "OWNER", "박사장"),
    ("rider@example.com", "Ride!2024x", "RIDER", ""),
];

/// Login key that every signup endpoint reports as already taken.
pub const TAKEN: &str = "taken@example.com";

/// Mobile number and nickname the duplicate checks report as taken.
pub const TAKEN_MOBILE: &str = "01011112222";
pub const TAKEN_NICKNAME: &str = "먹보";

fn session_for(login_key: &str) -> String {
    format!("sess-{}", login_key.replace(['@', '.'], "-"))
}

type Account = (&'static str, &'static str, &'static str, &'static str);

fn account_for_session(headers: &HeaderMap) -> Option<&'static Account> {
    let cookie = headers.get(header::COOKIE)?.to_str().ok()?;
    let session = cookie
        .split(';')
        .filter_map(|c| c.trim().strip_prefix("JSESSIONID="))
        .next()?;
    ACCOUNTS.iter().find(|a| session_for(a.0) == session)
}

fn account_id(account: &Account) -> usize {
    ACCOUNTS.iter().position(|a| a.0 == account.0).unwrap_or_default() + 1
}

fn fail(status: StatusCode, code: &str, text: &str) -> Response {
    (
        status,
        Json(json!({ "success": false, "data": text, "message": code })),
    )
        .into_response()
}

async fn login(Json(body): Json<Value>) -> Response {
    let key = body["loginKey"].as_str().unwrap_or_default();
    let password = body["password"].as_str().unwrap_or_default();
    let account_type = body["accountType"].as_str().unwrap_or_default();

    match ACCOUNTS
        .iter()
        .find(|a| a.0 == key && a.1 == password && a.2 == account_type)
    {
        Some(account) => (
            [(
                header::SET_COOKIE,
                format!("JSESSIONID={}; Path=/; HttpOnly", session_for(account.0)),
            )],
            Json(json!({
                "accountId": 1,
                "name": account.3,
                "roleName": format!("ROLE_{}", account.2),
            })),
        )
            .into_response(),
        None => fail(
            StatusCode::UNAUTHORIZED,
            "INVALID_CREDENTIALS",
            "Invalid credentials.",
        ),
    }
}

async fn me(headers: HeaderMap) -> Response {
    match account_for_session(&headers) {
        Some(account) => {
            let name = Some(account.3).filter(|n| !n.is_empty());
            Json(json!({
                "userId": account_id(account),
                "loginKey": account.0,
                "name": name,
                "roleName": format!("ROLE_{}", account.2),
                "accountType": account.2,
            }))
            .into_response()
        }
        None => StatusCode::UNAUTHORIZED.into_response(),
    }
}

async fn signup(Json(body): Json<Value>) -> Response {
    let key = body["email"]
        .as_str()
        .or(body["loginId"].as_str())
        .unwrap_or_default();
    if key == TAKEN {
        return fail(
            StatusCode::BAD_REQUEST,
            "DUPLICATE_EMAIL",
            "이미 가입된 이메일입니다.",
        );
    }
    "ok".into_response()
}

async fn exists(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    let taken = params.iter().any(|(key, value)| match key.as_str() {
        "loginId" => value == TAKEN || ACCOUNTS.iter().any(|a| a.0 == value),
        "mobile" => value == TAKEN_MOBILE,
        "nickname" => value == TAKEN_NICKNAME,
        _ => false,
    });
    Json(json!({ "exists": taken }))
}

/// Stand-in for the delivery backend's auth endpoints.
pub fn fake_backend() -> Router {
    Router::new()
        .route("/", get_route(|| async { StatusCode::NOT_FOUND }))
        .route("/api/v1/auth/login", post(login))
        .route("/api/v1/auth/me", get_route(me))
        .route("/api/v1/auth/signup", post(signup))
        .route("/api/v1/auth/exists/login-id", get_route(exists))
        .route("/api/v1/auth/exists/mobile", get_route(exists))
        .route("/api/v1/auth/exists/nickname", get_route(exists))
        .route("/api/v1/store-owner/auth/signup", post(signup))
        .route("/api/v1/deliverer/auth/signup", post(signup))
}

/// Serve the fake backend on an ephemeral port and return a client for it.
pub async fn spawn_backend() -> BackendClient {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, fake_backend()).await.unwrap();
    });
    BackendClient::new(BackendConfig {
        base_url: format!("http://{addr}"),
        timeout_secs: 5,
    })
}

/// Client pointed at a port nobody listens on.
#[allow(dead_code)]
pub async fn unreachable_backend() -> BackendClient {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    BackendClient::new(BackendConfig {
        base_url: format!("http://{addr}"),
        timeout_secs: 2,
    })
}

#[allow(dead_code)]
/// Helper to make a GET request against a router and read the body.
pub async fn get(app: &Router, uri: &str) -> (StatusCode, HeaderMap, String) {
    send(app, Request::builder().uri(uri).body(Body::empty()).unwrap()).await
}

#[allow(dead_code)]
/// Helper to make a GET request carrying a `Cookie` header.
pub async fn get_with_cookie(
    app: &Router,
    uri: &str,
    cookie: &str,
) -> (StatusCode, HeaderMap, String) {
    send(
        app,
        Request::builder()
            .uri(uri)
            .header(header::COOKIE, cookie)
            .body(Body::empty())
            .unwrap(),
    )
    .await
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, HeaderMap, String) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, headers, String::from_utf8(body.to_vec()).unwrap())
}
