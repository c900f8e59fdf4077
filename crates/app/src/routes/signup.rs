use crate::routes::Route;
use crate::Flash;
use dioxus::prelude::*;
use shared_types::{
    content_for, AppError, OwnerSignupRequest, RiderSignupRequest, Role, SignupRequest,
    UserSignupRequest, VehicleType, ALL_UNIQUE_FIELDS, ALL_VEHICLE_TYPES, PASSWORD_POLICY_MESSAGE,
};
use shared_ui::{Button, Card, CardContent, CardFooter, Form, FormSelect, Input, PageHeader};
use std::collections::HashMap;

/// Request state shared by the three signup forms.
#[derive(Clone, Copy)]
struct SubmitState {
    loading: Signal<bool>,
    error: Signal<Option<String>>,
    field_errors: Signal<HashMap<String, String>>,
}

impl SubmitState {
    fn field(&self, name: &str) -> Option<String> {
        AppError::field_message(&self.field_errors.read(), name).map(str::to_string)
    }

    /// Ask the backend whether the login id, mobile and nickname are free.
    /// Taken values become field errors. A failed check is left to the
    /// signup call, which rejects duplicates itself.
    async fn check_unique(mut self, request: &UserSignupRequest) -> bool {
        self.loading.set(true);
        self.error.set(None);
        self.field_errors.set(HashMap::new());

        let mut taken = HashMap::new();
        for field in ALL_UNIQUE_FIELDS {
            let value = field.value_of(request).to_string();
            match server::api::check_available(field, value).await {
                Ok(true) => {}
                Ok(false) => {
                    taken.insert(
                        field.form_field().to_string(),
                        field.taken_message().to_string(),
                    );
                }
                Err(e) => tracing::warn!(error = %e, ?field, "Duplicate check failed"),
            }
        }

        self.loading.set(false);
        if taken.is_empty() {
            return true;
        }
        self.error.set(Some("입력값을 확인해 주세요.".to_string()));
        self.field_errors.set(taken);
        false
    }

    /// Send the request. On success the login page greets the new account.
    async fn submit(mut self, request: SignupRequest, flash: Flash) {
        let role = request.role();
        self.loading.set(true);
        self.error.set(None);
        self.field_errors.set(HashMap::new());

        match server::api::signup(request).await {
            Ok(resp) => {
                flash.show(resp.message);
                navigator().replace(Route::RoleLogin { role });
            }
            Err(e) => {
                let err_str = e.to_string();
                let fe = AppError::parse_field_errors(&err_str);
                if fe.is_empty() {
                    self.error.set(Some(AppError::friendly_message(&err_str)));
                } else {
                    self.error.set(Some("입력값을 확인해 주세요.".to_string()));
                    self.field_errors.set(fe);
                }
            }
        }
        self.loading.set(false);
    }
}

fn use_submit_state() -> SubmitState {
    SubmitState {
        loading: use_signal(|| false),
        error: use_signal(|| None),
        field_errors: use_signal(HashMap::new),
    }
}

/// Role-specific signup page.
#[component]
pub fn RoleSignup(role: Role) -> Element {
    let content = content_for(role);

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./auth.css") }

        div { class: "auth-page",
            PageHeader {
                title: "{content.role_label} 회원가입",
                subtitle: "{PASSWORD_POLICY_MESSAGE}",
            }

            Card { class: "auth-card",
                CardContent {
                    match role {
                        Role::User => rsx! { UserSignupForm {} },
                        Role::Owner => rsx! { OwnerSignupForm {} },
                        Role::Rider => rsx! { RiderSignupForm {} },
                    }
                }
                CardFooter { class: "auth-footer",
                    span { "이미 회원이신가요?" }
                    Link { to: Route::RoleLogin { role }, "로그인" }
                }
            }

            Link { class: "auth-back", to: Route::RoleSelect {}, "다른 회원 유형 선택" }
        }
    }
}

#[component]
fn UserSignupForm() -> Element {
    let flash: Flash = use_context();
    let state = use_submit_state();
    let mut form = use_signal(UserSignupRequest::default);

    let handle_submit = move |_: FormEvent| async move {
        let request = form.read().clone();
        if state.check_unique(&request).await {
            state.submit(SignupRequest::User(request), flash).await;
        }
    };

    let loading = (state.loading)();

    rsx! {
        Form { onsubmit: handle_submit, error: (state.error)(),
            Input {
                name: "login_id",
                label: "아이디(이메일)",
                input_type: "email",
                value: form.read().login_id.clone(),
                on_input: move |e: FormEvent| form.write().login_id = e.value(),
                error: state.field("login_id"),
                disabled: loading,
            }
            Input {
                name: "password",
                label: "비밀번호",
                input_type: "password",
                value: form.read().password.clone(),
                on_input: move |e: FormEvent| form.write().password = e.value(),
                error: state.field("password"),
                disabled: loading,
            }
            Input {
                name: "confirm_password",
                label: "비밀번호 확인",
                input_type: "password",
                value: form.read().confirm_password.clone(),
                on_input: move |e: FormEvent| form.write().confirm_password = e.value(),
                error: state.field("confirm_password"),
                disabled: loading,
            }
            Input {
                name: "name",
                label: "이름",
                value: form.read().name.clone(),
                on_input: move |e: FormEvent| form.write().name = e.value(),
                error: state.field("name"),
                disabled: loading,
            }
            Input {
                name: "nickname",
                label: "닉네임",
                value: form.read().nickname.clone(),
                on_input: move |e: FormEvent| form.write().nickname = e.value(),
                error: state.field("nickname"),
                disabled: loading,
            }
            Input {
                name: "mobile",
                label: "휴대폰 번호",
                input_type: "tel",
                placeholder: "01012345678",
                value: form.read().mobile.clone(),
                on_input: move |e: FormEvent| form.write().mobile = e.value(),
                error: state.field("mobile"),
                disabled: loading,
            }

            label { class: "auth-check",
                input {
                    r#type: "checkbox",
                    name: "required_terms_accepted",
                    checked: form.read().required_terms_accepted,
                    disabled: loading,
                    onchange: move |e: FormEvent| form.write().required_terms_accepted = e.checked(),
                }
                span { "(필수) 이용약관 및 개인정보 처리방침에 동의합니다." }
            }
            if let Some(message) = state.field("required_terms_accepted") {
                p { class: "input-error", role: "alert", "{message}" }
            }
            label { class: "auth-check",
                input {
                    r#type: "checkbox",
                    name: "marketing_terms_accepted",
                    checked: form.read().marketing_terms_accepted,
                    disabled: loading,
                    onchange: move |e: FormEvent| form.write().marketing_terms_accepted = e.checked(),
                }
                span { "(선택) 마케팅 정보 수신에 동의합니다." }
            }

            Button {
                class: "auth-submit",
                button_type: "submit",
                loading: loading,
                if loading { "가입 중..." } else { "가입하기" }
            }
        }
    }
}

#[component]
fn OwnerSignupForm() -> Element {
    let flash: Flash = use_context();
    let state = use_submit_state();
    let mut form = use_signal(OwnerSignupRequest::default);

    let handle_submit = move |_: FormEvent| async move {
        state
            .submit(SignupRequest::Owner(form.read().clone()), flash)
            .await;
    };

    let loading = (state.loading)();

    rsx! {
        Form { onsubmit: handle_submit, error: (state.error)(),
            Input {
                name: "email",
                label: "이메일",
                input_type: "email",
                value: form.read().email.clone(),
                on_input: move |e: FormEvent| form.write().email = e.value(),
                error: state.field("email"),
                disabled: loading,
            }
            Input {
                name: "password",
                label: "비밀번호",
                input_type: "password",
                value: form.read().password.clone(),
                on_input: move |e: FormEvent| form.write().password = e.value(),
                error: state.field("password"),
                disabled: loading,
            }
            Input {
                name: "confirm_password",
                label: "비밀번호 확인",
                input_type: "password",
                value: form.read().confirm_password.clone(),
                on_input: move |e: FormEvent| form.write().confirm_password = e.value(),
                error: state.field("confirm_password"),
                disabled: loading,
            }
            Input {
                name: "name",
                label: "대표자 이름",
                value: form.read().name.clone(),
                on_input: move |e: FormEvent| form.write().name = e.value(),
                error: state.field("name"),
                disabled: loading,
            }
            Input {
                name: "mobile",
                label: "휴대폰 번호",
                input_type: "tel",
                placeholder: "01012345678",
                value: form.read().mobile.clone(),
                on_input: move |e: FormEvent| form.write().mobile = e.value(),
                error: state.field("mobile"),
                disabled: loading,
            }
            Input {
                name: "business_registration_number",
                label: "사업자등록번호",
                placeholder: "1234567890",
                value: form.read().business_registration_number.clone(),
                on_input: move |e: FormEvent| form.write().business_registration_number = e.value(),
                error: state.field("business_registration_number"),
                disabled: loading,
            }
            Input {
                name: "store_name",
                label: "가게 이름",
                value: form.read().store_name.clone(),
                on_input: move |e: FormEvent| form.write().store_name = e.value(),
                error: state.field("store_name"),
                disabled: loading,
            }
            Input {
                name: "store_address",
                label: "가게 주소",
                value: form.read().store_address.clone(),
                on_input: move |e: FormEvent| form.write().store_address = e.value(),
                error: state.field("store_address"),
                disabled: loading,
            }

            Button {
                class: "auth-submit",
                button_type: "submit",
                loading: loading,
                if loading { "가입 중..." } else { "가입하기" }
            }
        }
    }
}

#[component]
fn RiderSignupForm() -> Element {
    let flash: Flash = use_context();
    let state = use_submit_state();
    let mut form = use_signal(RiderSignupRequest::default);

    let handle_submit = move |_: FormEvent| async move {
        let mut request = form.read().clone();
        if !request.vehicle_type.requires_vehicle_info() {
            request.license_number = None;
            request.vehicle_number = None;
        }
        state.submit(SignupRequest::Rider(request), flash).await;
    };

    let loading = (state.loading)();
    let vehicle_type = form.read().vehicle_type;

    rsx! {
        Form { onsubmit: handle_submit, error: (state.error)(),
            Input {
                name: "email",
                label: "이메일",
                input_type: "email",
                value: form.read().email.clone(),
                on_input: move |e: FormEvent| form.write().email = e.value(),
                error: state.field("email"),
                disabled: loading,
            }
            Input {
                name: "password",
                label: "비밀번호",
                input_type: "password",
                value: form.read().password.clone(),
                on_input: move |e: FormEvent| form.write().password = e.value(),
                error: state.field("password"),
                disabled: loading,
            }
            Input {
                name: "confirm_password",
                label: "비밀번호 확인",
                input_type: "password",
                value: form.read().confirm_password.clone(),
                on_input: move |e: FormEvent| form.write().confirm_password = e.value(),
                error: state.field("confirm_password"),
                disabled: loading,
            }
            Input {
                name: "name",
                label: "이름",
                value: form.read().name.clone(),
                on_input: move |e: FormEvent| form.write().name = e.value(),
                error: state.field("name"),
                disabled: loading,
            }
            Input {
                name: "mobile",
                label: "휴대폰 번호",
                input_type: "tel",
                placeholder: "01012345678",
                value: form.read().mobile.clone(),
                on_input: move |e: FormEvent| form.write().mobile = e.value(),
                error: state.field("mobile"),
                disabled: loading,
            }
            FormSelect {
                name: "vehicle_type",
                label: "이동 수단",
                value: vehicle_type.as_str().to_string(),
                disabled: loading,
                onchange: move |e: FormEvent| {
                    if let Some(parsed) = VehicleType::parse(&e.value()) {
                        form.write().vehicle_type = parsed;
                    }
                },
                for vt in ALL_VEHICLE_TYPES {
                    option {
                        key: "{vt}",
                        value: vt.as_str(),
                        selected: vt == vehicle_type,
                        "{vt.label()}"
                    }
                }
            }
            if vehicle_type.requires_vehicle_info() {
                Input {
                    name: "license_number",
                    label: "운전면허 번호",
                    value: form.read().license_number.clone().unwrap_or_default(),
                    on_input: move |e: FormEvent| form.write().license_number = Some(e.value()),
                    error: state.field("license_number"),
                    disabled: loading,
                }
                Input {
                    name: "vehicle_number",
                    label: "차량 번호",
                    placeholder: "12가3456",
                    value: form.read().vehicle_number.clone().unwrap_or_default(),
                    on_input: move |e: FormEvent| form.write().vehicle_number = Some(e.value()),
                    error: state.field("vehicle_number"),
                    disabled: loading,
                }
            }

            Button {
                class: "auth-submit",
                button_type: "submit",
                loading: loading,
                if loading { "가입 중..." } else { "가입하기" }
            }
        }
    }
}
