pub mod login;
pub mod main_page;
pub mod select;
pub mod signup;

use dioxus::prelude::*;
use shared_types::{resolve, Page, Role};
use shared_ui::Skeleton;

use login::RoleLogin;
use main_page::RoleMain;
use select::RoleSelect;
use signup::RoleSignup;

/// Application routes.
///
/// Only rendering routes live here. `/`, bare role paths and anything
/// unknown fall through to [`Redirector`], which consults the shared route
/// table and replaces the URL.
#[derive(Clone, Routable, Debug, PartialEq)]
pub enum Route {
    #[route("/select")]
    RoleSelect {},
    #[route("/:role/login")]
    RoleLogin { role: Role },
    #[route("/:role/signup")]
    RoleSignup { role: Role },
    #[route("/:role/main")]
    RoleMain { role: Role },
    #[route("/:..segments")]
    Redirector { segments: Vec<String> },
}

impl From<Page> for Route {
    fn from(page: Page) -> Self {
        match page {
            Page::Select => Route::RoleSelect {},
            Page::Login(role) => Route::RoleLogin { role },
            Page::Signup(role) => Route::RoleSignup { role },
            Page::Main(role) => Route::RoleMain { role },
        }
    }
}

/// Catch-all. Resolves the path and replaces it with the canonical page,
/// so redirects never leave a history entry.
#[component]
fn Redirector(segments: Vec<String>) -> Element {
    let path = format!("/{}", segments.join("/"));
    let target = Route::from(resolve(&path).page());

    use_effect(use_reactive((&target,), |(target,)| {
        navigator().replace(target);
    }));

    rsx! {
        div { class: "redirecting", "aria-busy": "true",
            Skeleton { width: "12rem" }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use shared_types::ALL_ROLES;

    #[test]
    fn routes_render_canonical_page_paths() {
        let mut pages = vec![Page::Select];
        for role in ALL_ROLES {
            pages.extend([Page::Login(role), Page::Signup(role), Page::Main(role)]);
        }
        for page in pages {
            assert_eq!(Route::from(page).to_string(), page.path());
        }
    }

    #[test]
    fn role_paths_parse_into_role_routes() {
        assert_eq!(
            "/owner/main".parse::<Route>().ok(),
            Some(Route::RoleMain { role: Role::Owner })
        );
        assert_eq!(
            "/rider/signup".parse::<Route>().ok(),
            Some(Route::RoleSignup { role: Role::Rider })
        );
    }

    #[test]
    fn unknown_role_falls_through_to_redirector() {
        match "/admin/main".parse::<Route>() {
            Ok(Route::Redirector { segments }) => assert_eq!(segments, vec!["admin", "main"]),
            other => panic!("unexpected {other:?}"),
        }
    }
}
