//! Session-aware HTTP client for the MedAdmin backend
//!
//! Every request carries the in-memory access token. A 401 triggers one
//! shared refresh through the httpOnly refresh cookie, after which the
//! original request is retried exactly once.

pub mod auth;
pub mod error;
pub mod refresh;

use crate::types::AccessToken;
use bytes::Bytes;
use error::ClientError;
use medadmin_core::{Navigator, NoopNavigator, routes};
use refresh::{RefreshGate, RefreshState, Ticket};
use reqwest::{Client, ClientBuilder, Method, StatusCode, header};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Per-request timeout applied unless overridden
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[cfg(not(target_arch = "wasm32"))]
const DEFAULT_USER_AGENT: &str = concat!("medadmin-client/", env!("CARGO_PKG_VERSION"));

/// Per-call options
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Return a 401 as-is instead of refreshing the session
    pub skip_refresh: bool,
    /// Overrides the client timeout for this call
    pub timeout: Option<Duration>,
}

impl RequestOptions {
    /// Options for calls whose 401 must never start a refresh
    pub fn terminal() -> Self {
        Self {
            skip_refresh: true,
            ..Self::default()
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// A received response with its body already read
#[derive(Debug, Clone)]
pub struct ApiResponse {
    status: StatusCode,
    body: Bytes,
}

impl ApiResponse {
    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Decode the body; an empty body decodes as JSON `null`
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ClientError> {
        if self.body.iter().all(u8::is_ascii_whitespace) {
            return Ok(serde_json::from_value(Value::Null)?);
        }
        Ok(serde_json::from_slice(&self.body)?)
    }

    fn into_result(self) -> Result<Self, ClientError> {
        if self.status.is_success() {
            Ok(self)
        } else {
            Err(ClientError::from_status(self.status, &self.body))
        }
    }
}

struct Call<'a> {
    method: Method,
    path: &'a str,
    body: Option<&'a Value>,
    options: &'a RequestOptions,
}

struct ClientInner {
    http: Client,
    base_url: String,
    timeout: Duration,
    token: RwLock<Option<AccessToken>>,
    refresh: RefreshGate,
    // set after a failed refresh, cleared when a new token is installed
    session_ended: AtomicBool,
    navigator: Arc<dyn Navigator>,
}

/// MedAdmin API client
#[derive(Clone)]
pub struct SessionClient {
    inner: Arc<ClientInner>,
}

impl SessionClient {
    /// Create a new client with default configuration
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        Self::builder().base_url(base_url).build()
    }

    /// Create a new client builder
    pub fn builder() -> SessionClientBuilder {
        SessionClientBuilder::default()
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// Current access token, if any
    pub fn access_token(&self) -> Option<AccessToken> {
        self.inner
            .token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn has_access_token(&self) -> bool {
        self.access_token().is_some()
    }

    /// Install a token obtained from login
    pub fn set_access_token(&self, token: impl Into<AccessToken>) {
        self.store_token(Some(token.into()));
        self.inner.session_ended.store(false, Ordering::SeqCst);
    }

    pub fn clear_access_token(&self) {
        self.store_token(None);
    }

    pub fn refresh_state(&self) -> RefreshState {
        self.inner.refresh.state()
    }

    /// Number of requests waiting on the in-flight refresh
    pub fn queued_requests(&self) -> usize {
        self.inner.refresh.queued()
    }

    fn store_token(&self, token: Option<AccessToken>) {
        *self
            .inner
            .token
            .write()
            .unwrap_or_else(PoisonError::into_inner) = token;
    }

    /// Send a request relative to the base URL.
    ///
    /// Non-success statuses come back as [`ClientError`]; a 401 is recovered
    /// through the refresh endpoint once unless `options.skip_refresh` is set.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
        options: RequestOptions,
    ) -> Result<ApiResponse, ClientError> {
        let call = Call {
            method,
            path,
            body,
            options: &options,
        };

        let token = self.access_token();
        let response = self.dispatch(&call, token.as_ref()).await?;
        if response.status() != StatusCode::UNAUTHORIZED || !self.may_refresh(&options) {
            return response.into_result();
        }

        debug!(method = %call.method, path, "access token rejected, recovering session");
        let token = self.recover_session().await?;

        // Retried once; a second 401 goes back to the caller untouched
        self.dispatch(&call, Some(&token)).await?.into_result()
    }

    fn may_refresh(&self, options: &RequestOptions) -> bool {
        !options.skip_refresh && !self.inner.session_ended.load(Ordering::SeqCst)
    }

    async fn recover_session(&self) -> Result<AccessToken, ClientError> {
        match self.inner.refresh.enter() {
            Ticket::Wait(rx) => {
                debug!("refresh already in flight, queueing request");
                rx.await.unwrap_or_else(|_| Err(refresh::abandoned()))
            }
            Ticket::Lead(lease) => {
                let outcome = self.refresh_access_token().await;
                match &outcome {
                    Ok(token) => {
                        self.store_token(Some(token.clone()));
                        let resumed = lease.settle(&outcome);
                        info!(resumed, "access token refreshed");
                    }
                    Err(error) => {
                        let rejected = lease.settle(&outcome);
                        warn!(%error, rejected, "session refresh failed, signing out");
                        self.clear_access_token();
                        self.inner.session_ended.store(true, Ordering::SeqCst);
                        self.inner.navigator.navigate(routes::LOGIN);
                    }
                }
                outcome
            }
        }
    }

    async fn dispatch(
        &self,
        call: &Call<'_>,
        token: Option<&AccessToken>,
    ) -> Result<ApiResponse, ClientError> {
        let url = format!("{}{}", self.inner.base_url, call.path);
        let mut request = self
            .inner
            .http
            .request(call.method.clone(), url)
            .header(header::CONTENT_TYPE, "application/json");

        if let Some(token) = token {
            request = request.header(header::AUTHORIZATION, format!("Bearer {}", token.as_str()));
        }
        if let Some(body) = call.body {
            request = request.json(body);
        }

        #[cfg(target_arch = "wasm32")]
        {
            request = request.fetch_credentials_include();
        }

        let timeout = call.options.timeout.unwrap_or(self.inner.timeout);
        let response = send(request, timeout).await?;
        let status = response.status();
        let body = response.bytes().await?;
        debug!(method = %call.method, path = call.path, status = status.as_u16(), "response received");

        Ok(ApiResponse { status, body })
    }

    /// `GET` and decode the JSON body
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        self.request(Method::GET, path, None, RequestOptions::default())
            .await?
            .json()
    }

    /// `POST` a JSON body and decode the response
    pub async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        self.send_json(Method::POST, path, body).await
    }

    /// `PUT` a JSON body and decode the response
    pub async fn put<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        self.send_json(Method::PUT, path, body).await
    }

    /// `PATCH` a JSON body and decode the response
    pub async fn patch<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        self.send_json(Method::PATCH, path, body).await
    }

    /// `DELETE` and decode the response
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        self.request(Method::DELETE, path, None, RequestOptions::default())
            .await?
            .json()
    }

    async fn send_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let body = serde_json::to_value(body)?;
        self.request(method, path, Some(&body), RequestOptions::default())
            .await?
            .json()
    }
}

#[cfg(not(target_arch = "wasm32"))]
async fn send(
    request: reqwest::RequestBuilder,
    timeout: Duration,
) -> Result<reqwest::Response, ClientError> {
    Ok(request.timeout(timeout).send().await?)
}

// fetch has no timeout of its own, so race it against a timer
#[cfg(target_arch = "wasm32")]
async fn send(
    request: reqwest::RequestBuilder,
    timeout: Duration,
) -> Result<reqwest::Response, ClientError> {
    use futures::future::{Either, select};
    use gloo_timers::future::TimeoutFuture;

    let millis = u32::try_from(timeout.as_millis()).unwrap_or(u32::MAX);
    let response = std::pin::pin!(request.send());
    let timer = std::pin::pin!(TimeoutFuture::new(millis));

    match select(response, timer).await {
        Either::Left((result, _)) => Ok(result?),
        Either::Right(_) => {
            warn!(timeout_ms = millis, "request timed out");
            Err(ClientError::network())
        }
    }
}

/// Builder for SessionClient
#[derive(Default)]
pub struct SessionClientBuilder {
    base_url: Option<String>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
    navigator: Option<Arc<dyn Navigator>>,
}

impl SessionClientBuilder {
    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the user agent. Ignored in the browser.
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Where to send the browser when the session cannot be refreshed
    pub fn navigator(mut self, navigator: Arc<dyn Navigator>) -> Self {
        self.navigator = Some(navigator);
        self
    }

    /// Build the client
    pub fn build(self) -> Result<SessionClient, ClientError> {
        let base_url = self
            .base_url
            .ok_or_else(|| ClientError::Configuration("base_url is required".into()))?;

        // Ensure base_url ends without a trailing slash
        let base_url = base_url.trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(ClientError::Configuration("base_url is empty".into()));
        }

        #[cfg(not(target_arch = "wasm32"))]
        let http = ClientBuilder::new()
            .user_agent(
                self.user_agent
                    .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string()),
            )
            .cookie_store(true)
            .build()?;

        // The browser owns User-Agent and the cookie jar
        #[cfg(target_arch = "wasm32")]
        let http = ClientBuilder::new().build()?;

        Ok(SessionClient {
            inner: Arc::new(ClientInner {
                http,
                base_url,
                timeout: self.timeout.unwrap_or(DEFAULT_TIMEOUT),
                token: RwLock::new(None),
                refresh: RefreshGate::new(),
                session_ended: AtomicBool::new(false),
                navigator: self.navigator.unwrap_or_else(|| Arc::new(NoopNavigator)),
            }),
        })
    }
}
