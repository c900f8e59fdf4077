use dioxus::prelude::*;
use dioxus_free_icons::icons::ld_icons::{LdBell, LdCalendar};
use dioxus_free_icons::Icon;
use shared_types::{Activity, Notice, QuickAction, SummaryCard};

use crate::{Badge, BadgeTone, Card, CardContent, CardDescription, CardHeader, CardTitle};

/// `name` with the honorific `님`, unless it already ends in one.
fn honorific(name: &str) -> String {
    if name.ends_with('님') {
        name.to_string()
    } else {
        format!("{name}님")
    }
}

/// Main-page shell shared by every role.
///
/// Purely presentational. Collections render in the order given, and
/// `is_loading` only changes how the header looks; nothing is hidden while
/// the session is still resolving.
#[component]
pub fn DashboardLayout(
    #[props(into)] role_label: String,
    #[props(into)] user_name: String,
    #[props(into)] date_text: String,
    quick_actions: &'static [QuickAction],
    summary_cards: &'static [SummaryCard],
    activities: &'static [Activity],
    notices: &'static [Notice],
    #[props(default = false)] is_loading: bool,
    /// Rendered at the right of the header (logout and the like).
    actions: Option<Element>,
) -> Element {
    let greeting = honorific(&user_name);

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div {
            class: "dashboard",
            "data-loading": if is_loading { "true" } else { "false" },
            header { class: "dashboard-header",
                div { class: "dashboard-greeting",
                    span { class: "dashboard-role", "{role_label}" }
                    h1 { class: "dashboard-user", "{greeting}, 안녕하세요" }
                    p { class: "dashboard-date",
                        Icon { icon: LdCalendar, width: 14, height: 14 }
                        span { "{date_text}" }
                    }
                    if is_loading {
                        p { class: "dashboard-loading", "로그인 정보를 확인하는 중..." }
                    }
                }
                div { class: "dashboard-actions", {actions} }
            }

            section { class: "dashboard-section",
                h2 { class: "dashboard-section-title", "빠른 메뉴" }
                div { class: "quick-action-grid",
                    for action in quick_actions.iter() {
                        button { class: "quick-action", r#type: "button",
                            strong { class: "quick-action-label", "{action.label}" }
                            span { class: "quick-action-hint", "{action.hint}" }
                        }
                    }
                }
            }

            section { class: "dashboard-section summary-grid",
                for card in summary_cards.iter() {
                    Card { class: "summary-card",
                        CardHeader {
                            CardDescription { "{card.title}" }
                            CardTitle { "{card.value}" }
                        }
                        CardContent {
                            span { class: "summary-meta", "{card.meta}" }
                        }
                    }
                }
            }

            div { class: "dashboard-columns",
                section { class: "dashboard-section",
                    h2 { class: "dashboard-section-title", "최근 활동" }
                    ul { class: "activity-list",
                        for activity in activities.iter() {
                            li { class: "activity-item",
                                div { class: "activity-text",
                                    span { class: "activity-title", "{activity.title}" }
                                    span { class: "activity-time", "{activity.time}" }
                                }
                                Badge { tone: BadgeTone::for_status(activity.status), "{activity.status}" }
                            }
                        }
                    }
                }

                section { class: "dashboard-section",
                    h2 { class: "dashboard-section-title",
                        Icon { icon: LdBell, width: 16, height: 16 }
                        "공지사항"
                    }
                    ul { class: "notice-list",
                        for notice in notices.iter() {
                            li { class: "notice-item",
                                strong { class: "notice-title", "{notice.title}" }
                                p { class: "notice-detail", "{notice.detail}" }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use shared_types::{OWNER_CONTENT, USER_CONTENT};

    fn render(app: fn() -> Element) -> String {
        let mut dom = VirtualDom::new(app);
        dom.rebuild_in_place();
        dioxus_ssr::render(&dom)
    }

    /// Positions of each needle in `html`, in the order given.
    fn positions(html: &str, needles: &[&str]) -> Vec<usize> {
        needles
            .iter()
            .map(|n| html.find(n).unwrap_or_else(|| panic!("missing {n}")))
            .collect()
    }

    fn user_dashboard() -> Element {
        rsx! {
            DashboardLayout {
                role_label: USER_CONTENT.role_label,
                user_name: "김민수",
                date_text: "5월 3일 금",
                quick_actions: USER_CONTENT.quick_actions,
                summary_cards: USER_CONTENT.summary_cards,
                activities: USER_CONTENT.activities,
                notices: USER_CONTENT.notices,
            }
        }
    }

    fn loading_owner_dashboard() -> Element {
        rsx! {
            DashboardLayout {
                role_label: OWNER_CONTENT.role_label,
                user_name: OWNER_CONTENT.fallback_name,
                date_text: "5월 3일 금",
                quick_actions: OWNER_CONTENT.quick_actions,
                summary_cards: OWNER_CONTENT.summary_cards,
                activities: OWNER_CONTENT.activities,
                notices: OWNER_CONTENT.notices,
                is_loading: true,
            }
        }
    }

    #[test]
    fn renders_header_fields() {
        let html = render(user_dashboard);
        assert!(html.contains("사용자"));
        assert!(html.contains("김민수님, 안녕하세요"));
        assert!(html.contains("5월 3일 금"));
        assert!(html.contains(r#"data-loading="false""#));
        assert!(!html.contains("dashboard-loading"));
    }

    #[test]
    fn collections_keep_display_order() {
        let html = render(user_dashboard);

        let labels: Vec<&str> = USER_CONTENT.quick_actions.iter().map(|a| a.label).collect();
        let found = positions(&html, &labels);
        let mut sorted = found.clone();
        sorted.sort();
        assert_eq!(found, sorted);

        let titles: Vec<&str> = USER_CONTENT.activities.iter().map(|a| a.title).collect();
        let found = positions(&html, &titles);
        let mut sorted = found.clone();
        sorted.sort();
        assert_eq!(found, sorted);
    }

    #[test]
    fn every_item_is_rendered() {
        let html = render(user_dashboard);
        assert_eq!(html.matches(r#"class="quick-action""#).count(), 3);
        assert_eq!(html.matches(r#"class="activity-item""#).count(), 5);
        assert_eq!(html.matches(r#"class="notice-item""#).count(), 2);
        assert!(html.contains("12,500P"));
        assert!(html.contains("다음 주 화요일 02:00 ~ 03:00"));
    }

    #[test]
    fn honorific_is_not_doubled() {
        assert_eq!(honorific("김민수"), "김민수님");
        assert_eq!(honorific("샘플 사장님"), "샘플 사장님");
    }

    #[test]
    fn loading_state_shows_fallback_name() {
        let html = render(loading_owner_dashboard);
        assert!(html.contains(r#"data-loading="true""#));
        assert!(html.contains("샘플 사장님, 안녕하세요"));
        assert!(!html.contains("사장님님"));
        assert!(html.contains("로그인 정보를 확인하는 중..."));
        // Content is still there while loading.
        assert!(html.contains("주문 관리"));
    }
}
