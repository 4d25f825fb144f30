//! Browser navigation

use medadmin_core::Navigator;
use tracing::{debug, warn};

/// Full-page navigation through `window.location`
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserNavigator;

impl Navigator for BrowserNavigator {
    fn navigate(&self, path: &str) {
        let Some(window) = web_sys::window() else {
            warn!(path, "no window available for navigation");
            return;
        };

        let location = window.location();
        // Reloading the page we are already on would restart the session check
        if location.pathname().is_ok_and(|current| current == path) {
            debug!(path, "already at navigation target");
            return;
        }

        if let Err(err) = location.set_href(path) {
            warn!(path, ?err, "navigation failed");
        }
    }
}
