//! Path table for the front end.
//!
//! Entries are tried top to bottom and the first match wins. The last entry
//! is the catch-all, so every path resolves to something.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::Role;

/// A page that can actually be rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Page {
    Select,
    Login(Role),
    Signup(Role),
    Main(Role),
}

impl Page {
    /// Canonical path of the page.
    pub fn path(&self) -> String {
        match self {
            Page::Select => "/select".to_string(),
            Page::Login(role) => format!("/{role}/login"),
            Page::Signup(role) => format!("/{role}/signup"),
            Page::Main(role) => format!("/{role}/main"),
        }
    }

    pub fn role(&self) -> Option<Role> {
        match self {
            Page::Select => None,
            Page::Login(role) | Page::Signup(role) | Page::Main(role) => Some(*role),
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// Outcome of looking a path up in the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Render(Page),
    /// Navigate with history replace; the original path leaves no entry.
    Redirect(Page),
}

impl Resolution {
    /// The page that ends up on screen.
    pub fn page(&self) -> Page {
        match self {
            Resolution::Render(page) | Resolution::Redirect(page) => *page,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Select,
    Login,
    Signup,
    Main,
}

impl Target {
    fn page(self, role: Option<Role>) -> Option<Page> {
        match (self, role) {
            (Target::Select, _) => Some(Page::Select),
            (Target::Login, Some(role)) => Some(Page::Login(role)),
            (Target::Signup, Some(role)) => Some(Page::Signup(role)),
            (Target::Main, Some(role)) => Some(Page::Main(role)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Render(Target),
    Redirect(Target),
}

/// One row of the table. `:role` binds a lowercase role segment and `*`
/// matches anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteEntry {
    pub pattern: &'static str,
    pub action: Action,
}

pub const FALLBACK_PATTERN: &str = "*";

pub const ROUTES: &[RouteEntry] = &[
    RouteEntry { pattern: "/", action: Action::Redirect(Target::Select) },
    RouteEntry { pattern: "/select", action: Action::Render(Target::Select) },
    RouteEntry { pattern: "/:role/login", action: Action::Render(Target::Login) },
    RouteEntry { pattern: "/:role/signup", action: Action::Render(Target::Signup) },
    RouteEntry { pattern: "/:role/main", action: Action::Render(Target::Main) },
    RouteEntry { pattern: "/:role", action: Action::Redirect(Target::Main) },
    RouteEntry { pattern: FALLBACK_PATTERN, action: Action::Redirect(Target::Select) },
];

fn segments(path: &str) -> Vec<&str> {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    path.split('/').filter(|s| !s.is_empty()).collect()
}

/// `Some(bound role)` when the pattern matches; the inner option is the
/// role bound by `:role`, if the pattern has one.
fn match_pattern(pattern: &str, path: &[&str]) -> Option<Option<Role>> {
    if pattern == FALLBACK_PATTERN {
        return Some(None);
    }
    let expected = segments(pattern);
    if expected.len() != path.len() {
        return None;
    }
    let mut role = None;
    for (want, got) in expected.iter().zip(path) {
        if *want == ":role" {
            role = Some(Role::from_path(got)?);
        } else if want != got {
            return None;
        }
    }
    Some(role)
}

/// Look a path up in [`ROUTES`].
pub fn resolve(path: &str) -> Resolution {
    let path = segments(path);
    for entry in ROUTES {
        let Some(role) = match_pattern(entry.pattern, &path) else {
            continue;
        };
        let resolution = match entry.action {
            Action::Render(target) => target.page(role).map(Resolution::Render),
            Action::Redirect(target) => target.page(role).map(Resolution::Redirect),
        };
        if let Some(resolution) = resolution {
            return resolution;
        }
    }
    Resolution::Redirect(Page::Select)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ALL_ROLES;

    #[test]
    fn root_redirects_to_select() {
        assert_eq!(resolve("/"), Resolution::Redirect(Page::Select));
        assert_eq!(resolve(""), Resolution::Redirect(Page::Select));
    }

    #[test]
    fn select_renders() {
        assert_eq!(resolve("/select"), Resolution::Render(Page::Select));
    }

    #[test]
    fn role_pages_render() {
        for role in ALL_ROLES {
            assert_eq!(resolve(&format!("/{role}/login")), Resolution::Render(Page::Login(role)));
            assert_eq!(resolve(&format!("/{role}/signup")), Resolution::Render(Page::Signup(role)));
            assert_eq!(resolve(&format!("/{role}/main")), Resolution::Render(Page::Main(role)));
        }
    }

    #[test]
    fn bare_role_redirects_to_main_in_one_hop() {
        for role in ALL_ROLES {
            let first = resolve(&format!("/{role}"));
            assert_eq!(first, Resolution::Redirect(Page::Main(role)));
            assert_eq!(resolve(&first.page().path()), Resolution::Render(Page::Main(role)));
        }
    }

    #[test]
    fn unmatched_paths_fall_back_to_select() {
        for path in ["/admin", "/user/settings", "/USER/main", "/a/b/c/d", "/owner/main/extra"] {
            assert_eq!(resolve(path), Resolution::Redirect(Page::Select), "{path}");
        }
    }

    #[test]
    fn trailing_slash_and_query_are_ignored() {
        assert_eq!(resolve("/user/"), Resolution::Redirect(Page::Main(Role::User)));
        assert_eq!(resolve("/rider//login"), Resolution::Render(Page::Login(Role::Rider)));
        assert_eq!(resolve("/select?from=mail"), Resolution::Render(Page::Select));
    }

    #[test]
    fn fallback_is_unique_and_last() {
        let fallbacks: Vec<_> = ROUTES
            .iter()
            .enumerate()
            .filter(|(_, e)| e.pattern == FALLBACK_PATTERN)
            .map(|(i, _)| i)
            .collect();
        assert_eq!(fallbacks, vec![ROUTES.len() - 1]);
    }

    #[test]
    fn page_paths_are_canonical() {
        assert_eq!(Page::Select.path(), "/select");
        assert_eq!(Page::Login(Role::Owner).path(), "/owner/login");
        assert_eq!(Page::Main(Role::Rider).to_string(), "/rider/main");
        assert_eq!(Page::Signup(Role::User).role(), Some(Role::User));
    }
}
