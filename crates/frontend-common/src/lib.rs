pub mod auth;
pub mod client;
pub mod components;
pub mod config;
pub mod logging;
pub mod navigation;

pub use auth::{AuthGuard, AuthProvider, AuthSessionController, LoginOutcome, use_auth};
pub use client::create_session_client;
pub use components::{LoadingSpinner, StatusCard};
pub use config::{AppConfig, ConfigError};
pub use navigation::BrowserNavigator;
