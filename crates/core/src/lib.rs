//! MedAdmin core types shared by the HTTP client and the frontend

pub mod navigation;
pub mod routes;
pub mod types;

pub use navigation::{Navigator, NoopNavigator};
pub use routes::PublicPaths;
pub use types::{Account, SessionUser};

#[cfg(any(test, feature = "tests"))]
pub use navigation::RecordingNavigator;
