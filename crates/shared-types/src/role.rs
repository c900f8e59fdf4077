use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Account roles served by the delivery front end.
///
/// Each role owns its own login, signup and main pages. The lowercase
/// path form (`user`, `owner`, `rider`) is what appears in URLs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    User,
    Owner,
    Rider,
}

/// All roles in landing-page display order.
pub const ALL_ROLES: [Role; 3] = [Role::User, Role::Owner, Role::Rider];

impl Role {
    /// Lowercase URL segment.
    pub fn as_path(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Owner => "owner",
            Role::Rider => "rider",
        }
    }

    /// Account type sent to the backend login endpoint.
    pub fn account_type(&self) -> &'static str {
        match self {
            Role::User => "USER",
            Role::Owner => "OWNER",
            Role::Rider => "RIDER",
        }
    }

    /// Granted authority the backend attaches to a session of this role.
    pub fn authority(&self) -> &'static str {
        match self {
            Role::User => "ROLE_USER",
            Role::Owner => "ROLE_OWNER",
            Role::Rider => "ROLE_RIDER",
        }
    }

    /// Match a URL segment exactly. Route segments are lowercase only.
    pub fn from_path(segment: &str) -> Option<Self> {
        ALL_ROLES.into_iter().find(|r| r.as_path() == segment)
    }

    /// Normalize a backend role or account-type string.
    ///
    /// Accepts `ROLE_`-prefixed authorities as well as bare names, in any
    /// case. `STORE_OWNER` is the backend's name for the owner role.
    pub fn from_authority(raw: &str) -> Result<Self, ParseRoleError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ParseRoleError::Blank);
        }
        let upper = trimmed.to_uppercase();
        let bare = upper.strip_prefix("ROLE_").unwrap_or(&upper);
        match bare {
            "USER" => Ok(Role::User),
            "OWNER" | "STORE_OWNER" => Ok(Role::Owner),
            "RIDER" => Ok(Role::Rider),
            _ => Err(ParseRoleError::Unknown(trimmed.to_string())),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_path())
    }
}

/// `FromStr` is the route-segment parser, so it is strict about case.
impl FromStr for Role {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(ParseRoleError::Blank);
        }
        Role::from_path(s).ok_or_else(|| ParseRoleError::Unknown(s.to_string()))
    }
}

/// Failure to interpret a role string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseRoleError {
    Blank,
    Unknown(String),
}

impl fmt::Display for ParseRoleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseRoleError::Blank => write!(f, "role must not be blank"),
            ParseRoleError::Unknown(raw) => write!(f, "unknown role: {raw}"),
        }
    }
}

impl std::error::Error for ParseRoleError {}
