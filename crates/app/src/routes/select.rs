use crate::routes::Route;
use dioxus::prelude::*;
use shared_types::{content_for, Role, ALL_ROLES};
use shared_ui::{Card, CardContent, CardDescription, CardFooter, CardHeader, CardTitle, PageHeader};

fn tagline(role: Role) -> &'static str {
    match role {
        Role::User => "가까운 맛집에서 주문하고 배달 현황을 확인해요.",
        Role::Owner => "들어온 주문을 접수하고 가게를 관리해요.",
        Role::Rider => "배차를 받고 배달과 정산을 관리해요.",
    }
}

/// Landing page: pick a role, then log in or sign up.
#[component]
pub fn RoleSelect() -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./auth.css") }

        div { class: "auth-page",
            PageHeader {
                title: "CatchABite",
                subtitle: "어떤 회원으로 이용하시나요?",
            }

            div { class: "role-grid",
                for role in ALL_ROLES {
                    Card { class: "role-card", key: "{role}",
                        CardHeader {
                            CardTitle { "{content_for(role).role_label}" }
                            CardDescription { "{tagline(role)}" }
                        }
                        CardContent {
                            Link {
                                class: "button role-card-primary",
                                to: Route::RoleLogin { role },
                                "로그인"
                            }
                        }
                        CardFooter {
                            Link {
                                class: "role-card-link",
                                to: Route::RoleSignup { role },
                                "회원가입"
                            }
                        }
                    }
                }
            }
        }
    }
}
