//! Navigation seam shared by the session client and the auth controller

use std::sync::Arc;

/// Performs a full-page navigation to an absolute app path
pub trait Navigator: Send + Sync {
    fn navigate(&self, path: &str);
}

/// Navigator that only logs; used where no browser window exists
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopNavigator;

impl Navigator for NoopNavigator {
    fn navigate(&self, path: &str) {
        tracing::debug!(path, "navigation requested without a browser window");
    }
}

impl<N: Navigator + ?Sized> Navigator for Arc<N> {
    fn navigate(&self, path: &str) {
        (**self).navigate(path);
    }
}

/// Navigator that records every requested path
#[cfg(any(test, feature = "tests"))]
#[derive(Debug, Default, Clone)]
pub struct RecordingNavigator {
    visits: Arc<std::sync::Mutex<Vec<String>>>,
}

#[cfg(any(test, feature = "tests"))]
impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visits(&self) -> Vec<String> {
        self.visits
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }
}

#[cfg(any(test, feature = "tests"))]
impl Navigator for RecordingNavigator {
    fn navigate(&self, path: &str) {
        self.visits
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(path.to_string());
    }
}
