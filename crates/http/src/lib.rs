//! MedAdmin HTTP client
//!
//! Wraps every backend call with the in-memory access token and recovers
//! expired sessions through the refresh cookie.

pub mod client;
pub mod types;

pub use client::error::{ClientError, NETWORK_ERROR_MESSAGE};
pub use client::refresh::RefreshState;
pub use client::{
    ApiResponse, DEFAULT_TIMEOUT, RequestOptions, SessionClient, SessionClientBuilder,
};
pub use types::{AccessToken, LoginResponse};
