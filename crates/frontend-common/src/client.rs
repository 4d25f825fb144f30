//! Client configuration and initialization

use crate::config::AppConfig;
use medadmin_core::Navigator;
pub use medadmin_http::ClientError;
use medadmin_http::SessionClient;
use std::sync::Arc;

/// Build the session client for the application root
pub fn create_session_client(
    config: &AppConfig,
    navigator: Arc<dyn Navigator>,
) -> Result<SessionClient, ClientError> {
    SessionClient::builder()
        .base_url(&config.backend_url)
        .timeout(config.request_timeout)
        .navigator(navigator)
        .build()
}
