use crate::auth::{use_auth, use_role_guard};
use crate::routes::Route;
use dioxus::prelude::*;
use shared_types::{content_for, format_korean_date, AppClock, Role};
use shared_ui::{Button, ButtonVariant, DashboardLayout};

/// Protected main page for a role. Keyed so a role change re-runs the guard.
#[component]
pub fn RoleMain(role: Role) -> Element {
    rsx! { MainPage { key: "{role}", role } }
}

#[component]
fn MainPage(role: Role) -> Element {
    let content = content_for(role);
    let view = use_role_guard(role, content.fallback_identity());
    let clock: AppClock = use_context();
    let date_text = format_korean_date(clock.today());

    let mut auth = use_auth();
    let mut signing_out = use_signal(|| false);

    let handle_logout = move |_: MouseEvent| async move {
        signing_out.set(true);
        if let Err(e) = server::api::logout().await {
            tracing::warn!(error = %e, "Logout request failed");
        }
        auth.clear();
        navigator().replace(Route::RoleLogin { role });
    };

    rsx! {
        DashboardLayout {
            role_label: content.role_label,
            user_name: view.identity.name.clone(),
            date_text,
            quick_actions: content.quick_actions,
            summary_cards: content.summary_cards,
            activities: content.activities,
            notices: content.notices,
            is_loading: view.loading,
            actions: rsx! {
                Button {
                    variant: ButtonVariant::Outline,
                    loading: signing_out(),
                    onclick: handle_logout,
                    "로그아웃"
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::AuthState;
    use chrono::NaiveDate;
    use shared_types::ALL_ROLES;

    #[component]
    fn Harness(role: Role) -> Element {
        use_context_provider(AuthState::new);
        use_context_provider(|| AppClock::Fixed(NaiveDate::from_ymd_opt(2024, 5, 3).unwrap()));
        rsx! { MainPage { role } }
    }

    fn render(role: Role) -> String {
        let mut dom = VirtualDom::new_with_props(Harness, HarnessProps { role });
        dom.rebuild_in_place();
        dioxus_ssr::render(&dom)
    }

    /// Text nodes the page must show, in display order.
    fn expected_text(role: Role) -> Vec<String> {
        let content = content_for(role);
        let mut texts = vec![content.role_label.to_string()];
        for a in content.quick_actions {
            texts.extend([a.label, a.hint].map(String::from));
        }
        for c in content.summary_cards {
            texts.extend([c.title, c.value, c.meta].map(String::from));
        }
        for a in content.activities {
            texts.extend([a.title, a.time, a.status].map(String::from));
        }
        for n in content.notices {
            texts.extend([n.title, n.detail].map(String::from));
        }
        texts
    }

    /// Whether every text appears as a whole text node, each after the previous one.
    fn appears_in_order(html: &str, texts: &[String]) -> Result<(), String> {
        let mut cursor = 0;
        for text in texts {
            let needle = format!(">{text}<");
            match html[cursor..].find(&needle) {
                Some(offset) => cursor += offset + needle.len(),
                None => return Err(format!("{text:?} missing or out of order")),
            }
        }
        Ok(())
    }

    #[test]
    fn every_role_page_shows_its_content_in_order() {
        for role in ALL_ROLES {
            let html = render(role);
            if let Err(problem) = appears_in_order(&html, &expected_text(role)) {
                panic!("{role} main page: {problem}");
            }
        }
    }

    #[test]
    fn renders_fallback_identity_while_session_resolves() {
        for role in ALL_ROLES {
            let content = content_for(role);
            let html = render(role);

            assert!(html.contains(r#"data-loading="true""#));
            let name = content.fallback_name;
            let greeting = if name.ends_with('님') {
                format!("{name}, 안녕하세요")
            } else {
                format!("{name}님, 안녕하세요")
            };
            assert!(html.contains(&greeting), "{role}: {greeting}");
            assert!(!html.contains("님님"));
            assert!(html.contains("5월 3일 금"));
            assert!(html.contains("로그아웃"));
        }
    }
}
