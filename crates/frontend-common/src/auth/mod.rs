//! Authentication module

pub mod auth_guard;
pub mod context;
pub mod controller;
pub mod guard;
pub mod state;

// Re-export commonly used items
pub use auth_guard::AuthGuard;
pub use context::{AuthContext, AuthProvider, use_auth, use_is_admin, use_is_authenticated};
pub use controller::{AuthSessionController, LoginOutcome, Subscription};
pub use guard::{GuardDecision, Redirect, evaluate};
pub use state::{AuthState, AuthStatus, Role};
