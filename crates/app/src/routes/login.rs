use crate::auth::use_auth;
use crate::routes::Route;
use crate::Flash;
use dioxus::prelude::*;
use shared_types::{content_for, AppError, Role};
use shared_ui::{Button, Card, CardContent, CardFooter, Form, Input, PageHeader};
use std::collections::HashMap;

fn login_key_label(role: Role) -> &'static str {
    match role {
        Role::User => "아이디(이메일) 또는 휴대폰 번호",
        Role::Owner | Role::Rider => "이메일",
    }
}

/// Sign-in page for one role. Keyed so switching roles starts a fresh form.
#[component]
pub fn RoleLogin(role: Role) -> Element {
    rsx! { LoginForm { key: "{role}", role } }
}

/// On success the identity goes into the shared auth state, guards are
/// told to refresh and the URL is replaced with the role's main page.
#[component]
fn LoginForm(role: Role) -> Element {
    let mut auth = use_auth();
    let flash: Flash = use_context();
    let mut login_key = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error_msg = use_signal(|| Option::<String>::None);
    let mut field_errors = use_signal(HashMap::<String, String>::new);
    let mut loading = use_signal(|| false);
    let notice = use_signal(move || flash.take());

    let content = content_for(role);

    // Already signed in as this role: skip the form.
    use_effect(move || {
        let signed_in = auth
            .identity
            .read()
            .as_ref()
            .is_some_and(|identity| identity.role == role);
        if signed_in {
            navigator().replace(Route::RoleMain { role });
        }
    });

    let handle_login = move |_: FormEvent| async move {
        loading.set(true);
        error_msg.set(None);
        field_errors.set(HashMap::new());

        match server::api::login(role, login_key(), password()).await {
            Ok(identity) => {
                auth.set_identity(identity);
                auth.refresh();
                navigator().replace(Route::RoleMain { role });
            }
            Err(e) => {
                let err_str = e.to_string();
                let fe = AppError::parse_field_errors(&err_str);
                if fe.is_empty() {
                    error_msg.set(Some(AppError::friendly_message(&err_str)));
                } else {
                    field_errors.set(fe);
                }
                password.set(String::new());
            }
        }
        loading.set(false);
    };

    let field_error =
        move |field: &str| AppError::field_message(&field_errors.read(), field).map(str::to_string);

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./auth.css") }

        div { class: "auth-page",
            PageHeader {
                title: "{content.role_label} 로그인",
                subtitle: "가입한 계정으로 로그인하세요.",
            }

            Card { class: "auth-card",
                CardContent {
                    if let Some(message) = notice() {
                        div { class: "auth-success", role: "status", "{message}" }
                    }

                    Form { onsubmit: handle_login, error: error_msg(),
                        Input {
                            name: "login_key",
                            label: login_key_label(role).to_string(),
                            value: login_key(),
                            on_input: move |e: FormEvent| login_key.set(e.value()),
                            error: field_error("login_key"),
                            disabled: loading(),
                        }
                        Input {
                            name: "password",
                            label: "비밀번호",
                            input_type: "password",
                            value: password(),
                            on_input: move |e: FormEvent| password.set(e.value()),
                            error: field_error("password"),
                            disabled: loading(),
                        }
                        Button {
                            class: "auth-submit",
                            button_type: "submit",
                            loading: loading(),
                            if loading() { "로그인 중..." } else { "로그인" }
                        }
                    }
                }

                CardFooter { class: "auth-footer",
                    span { "아직 회원이 아니신가요?" }
                    Link { to: Route::RoleSignup { role }, "회원가입" }
                }
            }

            Link { class: "auth-back", to: Route::RoleSelect {}, "다른 회원 유형 선택" }
        }
    }
}
