use serde::{Deserialize, Serialize};

use crate::{AppError, Role};

/// The signed-in account as the dashboard sees it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub login_key: Option<String>,
    pub name: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile: Option<String>,
}

impl Identity {
    /// Placeholder shown before the real identity resolves.
    pub fn fallback(name: impl Into<String>, role: Role) -> Self {
        Self {
            account_id: None,
            login_key: None,
            name: name.into(),
            role,
            mobile: None,
        }
    }
}

/// Payload of the backend `GET /api/v1/auth/me` endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeResponse {
    /// Sent as `userId` by the backend for every account type.
    #[serde(alias = "userId")]
    pub account_id: Option<i64>,
    pub login_key: Option<String>,
    pub name: Option<String>,
    pub role_name: Option<String>,
    pub mobile: Option<String>,
    pub account_type: Option<String>,
}

impl TryFrom<MeResponse> for Identity {
    type Error = AppError;

    /// Role comes from the granted authority, falling back to the account type.
    /// Riders have no display name on the backend, so their login key stands in.
    fn try_from(me: MeResponse) -> Result<Self, Self::Error> {
        let raw_role = me
            .role_name
            .as_deref()
            .or(me.account_type.as_deref())
            .unwrap_or_default();
        let role = Role::from_authority(raw_role)
            .map_err(|e| AppError::internal(format!("Backend returned {e}")))?;

        let name = me
            .name
            .clone()
            .filter(|n| !n.trim().is_empty())
            .or_else(|| me.login_key.clone())
            .ok_or_else(|| AppError::internal("Backend identity has no name"))?;

        Ok(Self {
            account_id: me.account_id,
            login_key: me.login_key,
            name,
            role,
            mobile: me.mobile,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn me_response_parses_backend_json() {
        let json = r#"{"userId":7,"loginKey":"kim@example.com","name":"김민수",
            "roleName":"ROLE_USER","mobile":"01012345678","accountType":"USER"}"#;
        let me: MeResponse = serde_json::from_str(json).unwrap();
        let identity = Identity::try_from(me).unwrap();
        assert_eq!(identity.account_id, Some(7));
        assert_eq!(identity.name, "김민수");
        assert_eq!(identity.role, Role::User);
    }

    #[test]
    fn store_owner_authority_maps_to_owner() {
        let me = MeResponse {
            account_id: Some(3),
            login_key: Some("owner@example.com".into()),
            name: Some("박사장".into()),
            role_name: Some("ROLE_STORE_OWNER".into()),
            mobile: None,
            account_type: Some("OWNER".into()),
        };
        assert_eq!(Identity::try_from(me).unwrap().role, Role::Owner);
    }

    #[test]
    fn rider_without_name_uses_login_key() {
        let me = MeResponse {
            account_id: Some(11),
            login_key: Some("rider@example.com".into()),
            name: None,
            role_name: None,
            mobile: None,
            account_type: Some("RIDER".into()),
        };
        let identity = Identity::try_from(me).unwrap();
        assert_eq!(identity.role, Role::Rider);
        assert_eq!(identity.name, "rider@example.com");
    }

    #[test]
    fn unknown_role_is_an_error() {
        let me = MeResponse {
            account_id: None,
            login_key: Some("x".into()),
            name: Some("x".into()),
            role_name: Some("ROLE_ADMIN".into()),
            mobile: None,
            account_type: None,
        };
        assert!(Identity::try_from(me).is_err());
    }
}
