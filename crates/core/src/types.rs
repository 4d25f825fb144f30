use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

/// Roles that grant access to the admin console
pub const ADMIN_ROLES: [&str; 2] = ["admin", "superadmin"];

/// Account record nested inside the user payload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Account {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, JsonValue>,
}

/// Identity of the signed-in user as returned by `/auth/me` and `/auth/login`.
///
/// The backend may send `_id`, `id` or both. A user object without either is
/// still a signed-in user; only the id lookup comes back empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    object_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account: Option<Account>,
    /// Fields the console does not interpret but keeps for display
    #[serde(flatten)]
    pub extra: Map<String, JsonValue>,
}

impl SessionUser {
    /// Create a user with only an id
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            object_id: None,
            name: None,
            email: None,
            role: None,
            account: None,
            extra: Map::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    pub fn with_account_role(mut self, role: impl Into<String>) -> Self {
        self.account.get_or_insert_with(Account::default).role = Some(role.into());
        self
    }

    /// `id` if present, otherwise the document `_id`
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref().or(self.object_id.as_deref())
    }

    /// Whether either the top-level or the account role is an admin role
    pub fn is_admin(&self) -> bool {
        let account_role = self.account.as_ref().and_then(|a| a.role.as_deref());
        [self.role.as_deref(), account_role]
            .into_iter()
            .flatten()
            .any(|role| ADMIN_ROLES.contains(&role))
    }

    /// Name to show in the UI, falling back to the email and then the id
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.email.as_deref())
            .or(self.id())
            .unwrap_or("User")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserializes_backend_payload() {
        let user: SessionUser = serde_json::from_value(json!({
            "_id": "65f0c1",
            "name": "Dr. Rahman",
            "email": "rahman@example.com",
            "role": "user",
            "account": { "role": "admin", "status": "active" },
            "phone": "+8801700000000"
        }))
        .unwrap();

        assert_eq!(user.id(), Some("65f0c1"));
        assert!(user.is_admin());
        assert_eq!(user.extra["phone"], "+8801700000000");
        assert_eq!(user.account.unwrap().extra["status"], "active");
    }

    #[test]
    fn accepts_both_id_fields() {
        let user: SessionUser = serde_json::from_value(json!({
            "_id": "65f0c1",
            "id": "65f0c1",
            "email": "admin@example.com",
            "role": "admin"
        }))
        .unwrap();

        assert_eq!(user.id(), Some("65f0c1"));
        assert!(user.is_admin());
        assert!(user.extra.is_empty());
    }

    #[test]
    fn id_prefers_plain_id() {
        let user: SessionUser =
            serde_json::from_value(json!({ "_id": "doc", "id": "virtual" })).unwrap();
        assert_eq!(user.id(), Some("virtual"));
    }

    #[test]
    fn user_without_id_still_decodes() {
        let user: SessionUser =
            serde_json::from_value(json!({ "email": "a@b.c", "role": "doctor" })).unwrap();
        assert_eq!(user.id(), None);
        assert_eq!(user.display_name(), "a@b.c");

        let user: SessionUser = serde_json::from_value(json!({})).unwrap();
        assert_eq!(user.display_name(), "User");
    }

    #[test]
    fn admin_roles() {
        assert!(SessionUser::new("1").with_role("superadmin").is_admin());
        assert!(SessionUser::new("1").with_role("admin").is_admin());
        assert!(SessionUser::new("1").with_account_role("admin").is_admin());
        assert!(!SessionUser::new("1").with_role("doctor").is_admin());
        assert!(!SessionUser::new("1").is_admin());
    }

    #[test]
    fn display_name_fallbacks() {
        assert_eq!(SessionUser::new("u1").display_name(), "u1");
        assert_eq!(
            SessionUser::new("u1").with_email("a@b.c").display_name(),
            "a@b.c"
        );
        assert_eq!(
            SessionUser::new("u1")
                .with_email("a@b.c")
                .with_name("Ana")
                .display_name(),
            "Ana"
        );
    }
}
