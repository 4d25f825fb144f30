//! Route guard decision

use super::state::AuthState;
use medadmin_core::{PublicPaths, routes};

/// Navigation the guard asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Redirect {
    Login,
    AccessDenied,
}

impl Redirect {
    pub fn path(self) -> &'static str {
        match self {
            Self::Login => routes::LOGIN,
            Self::AccessDenied => routes::ACCESS_DENIED,
        }
    }
}

/// What a guarded view should do this render
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// Render the protected children
    Render,
    /// Session still resolving: show a placeholder, do not navigate
    Loading,
    /// Navigate away and render no protected content
    Redirect(Redirect),
    /// Anonymous on the login path itself: render nothing, stay put
    Blocked,
}

impl GuardDecision {
    pub fn navigation(self) -> Option<Redirect> {
        match self {
            Self::Redirect(redirect) => Some(redirect),
            _ => None,
        }
    }

    pub fn renders_children(self) -> bool {
        self == Self::Render
    }
}

/// Decide how a guarded view renders for `path`.
///
/// Public paths always render. Otherwise nothing protected renders until the
/// session has resolved to an authenticated user with the required role.
pub fn evaluate(
    state: &AuthState,
    path: &str,
    require_admin: bool,
    public_paths: &PublicPaths,
) -> GuardDecision {
    if public_paths.contains(path) {
        return GuardDecision::Render;
    }
    if state.is_loading {
        return GuardDecision::Loading;
    }
    if !state.is_authenticated() {
        return if PublicPaths::new([routes::LOGIN]).contains(path) {
            GuardDecision::Blocked
        } else {
            GuardDecision::Redirect(Redirect::Login)
        };
    }
    if require_admin && !state.is_admin() {
        return GuardDecision::Redirect(Redirect::AccessDenied);
    }
    GuardDecision::Render
}
