//! Authentication state and the predicates derived from it

use medadmin_core::SessionUser;

/// Binary authorization level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Admin,
    User,
}

/// Where the session stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthStatus {
    Loading,
    Anonymous,
    Authenticated(Role),
}

/// Authentication state held by the controller.
///
/// `is_authenticated` and `is_admin` are computed from `user` on every call
/// so they can never drift from it.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthState {
    pub user: Option<SessionUser>,
    pub is_loading: bool,
}

impl Default for AuthState {
    fn default() -> Self {
        Self {
            user: None,
            // Start loading until the session is resolved
            is_loading: true,
        }
    }
}

impl AuthState {
    pub fn anonymous() -> Self {
        Self {
            user: None,
            is_loading: false,
        }
    }

    pub fn authenticated(user: SessionUser) -> Self {
        Self {
            user: Some(user),
            is_loading: false,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.user.as_ref().is_some_and(SessionUser::is_admin)
    }

    pub fn status(&self) -> AuthStatus {
        match &self.user {
            _ if self.is_loading => AuthStatus::Loading,
            None => AuthStatus::Anonymous,
            Some(user) if user.is_admin() => AuthStatus::Authenticated(Role::Admin),
            Some(_) => AuthStatus::Authenticated(Role::User),
        }
    }
}
