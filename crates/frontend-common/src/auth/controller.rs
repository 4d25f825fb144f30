//! Auth session controller
//!
//! Owns the signed-in user and the login/logout/current-user flows. The
//! access token stays inside the [`SessionClient`]; this type only tells the
//! client when to install or drop it. Views observe changes through
//! [`AuthSessionController::subscribe`].

use super::state::AuthState;
use medadmin_core::{Navigator, SessionUser, routes};
use medadmin_http::{ClientError, SessionClient};
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use std::sync::Arc;
use tracing::{info, warn};

/// Message shown when the server gives no reason for a failed login
pub const LOGIN_FAILED_MESSAGE: &str = "Login failed";

/// Result of a login attempt. Failure is an expected outcome, not an error.
#[derive(Debug, Clone, PartialEq)]
pub enum LoginOutcome {
    Success(SessionUser),
    Failure(String),
}

impl LoginOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn user(&self) -> Option<&SessionUser> {
        match self {
            Self::Success(user) => Some(user),
            Self::Failure(_) => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Success(_) => None,
            Self::Failure(message) => Some(message),
        }
    }
}

type Listener = Rc<dyn Fn(&AuthState)>;

struct ControllerInner {
    client: SessionClient,
    navigator: Arc<dyn Navigator>,
    state: RefCell<AuthState>,
    listeners: RefCell<Vec<(usize, Listener)>>,
    next_listener: Cell<usize>,
    initialized: Cell<bool>,
}

/// Process-wide authentication state holder
#[derive(Clone)]
pub struct AuthSessionController {
    inner: Rc<ControllerInner>,
}

impl PartialEq for AuthSessionController {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl AuthSessionController {
    pub fn new(client: SessionClient, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            inner: Rc::new(ControllerInner {
                client,
                navigator,
                state: RefCell::new(AuthState::default()),
                listeners: RefCell::new(Vec::new()),
                next_listener: Cell::new(0),
                initialized: Cell::new(false),
            }),
        }
    }

    pub fn client(&self) -> &SessionClient {
        &self.inner.client
    }

    /// Snapshot of the current state
    pub fn state(&self) -> AuthState {
        self.inner.state.borrow().clone()
    }

    pub fn user(&self) -> Option<SessionUser> {
        self.inner.state.borrow().user.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.inner.state.borrow().is_loading
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner.state.borrow().is_authenticated()
    }

    pub fn is_admin(&self) -> bool {
        self.inner.state.borrow().is_admin()
    }

    /// Call `listener` after every state assignment until the returned
    /// subscription is dropped
    pub fn subscribe(&self, listener: impl Fn(&AuthState) + 'static) -> Subscription {
        let id = self.inner.next_listener.get();
        self.inner.next_listener.set(id + 1);
        self.inner
            .listeners
            .borrow_mut()
            .push((id, Rc::new(listener)));

        Subscription {
            controller: Rc::downgrade(&self.inner),
            id,
        }
    }

    fn assign(&self, next: AuthState) {
        *self.inner.state.borrow_mut() = next.clone();

        // Listeners may read the controller, so no borrow is held while they run
        let listeners: Vec<Listener> = self
            .inner
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();
        for listener in listeners {
            listener(&next);
        }
    }

    /// Resolve the session once at startup. Later calls return the current
    /// state without touching the network.
    pub async fn initialize(&self) -> AuthState {
        if self.inner.initialized.replace(true) {
            return self.state();
        }

        // A 401 here runs the silent refresh inside the client
        match self.inner.client.me().await {
            Ok(user) => {
                info!(user = user.id().unwrap_or("-"), "session restored");
                self.assign(AuthState::authenticated(user));
            }
            Err(error) => {
                info!(%error, "no active session");
                self.inner.client.clear_access_token();
                self.assign(AuthState::anonymous());
            }
        }
        self.state()
    }

    /// Fetch the current user and replace the stored one. Errors are returned
    /// without touching the stored user.
    pub async fn get_me(&self) -> Result<SessionUser, ClientError> {
        let user = self.inner.client.me().await?;
        let is_loading = self.is_loading();
        self.assign(AuthState {
            user: Some(user.clone()),
            is_loading,
        });
        Ok(user)
    }

    pub async fn login(&self, email: &str, password: &str) -> LoginOutcome {
        match self.inner.client.login(email, password).await {
            Ok(response) => {
                self.inner.client.set_access_token(response.access_token);
                info!(user = response.user.id().unwrap_or("-"), "signed in");
                self.assign(AuthState::authenticated(response.user.clone()));
                LoginOutcome::Success(response.user)
            }
            Err(error) => {
                warn!(%error, "login failed");
                let message = error.server_message().unwrap_or(LOGIN_FAILED_MESSAGE);
                LoginOutcome::Failure(message.to_string())
            }
        }
    }

    /// Sign out. The server call is best-effort; local state is always
    /// cleared and the browser is sent to the login page.
    pub async fn logout(&self) {
        if let Err(error) = self.inner.client.logout().await {
            warn!(%error, "logout request failed");
        }

        self.inner.client.clear_access_token();
        self.assign(AuthState::anonymous());
        info!("signed out");
        self.inner.navigator.navigate(routes::LOGIN);
    }
}

/// Keeps a listener registered; dropping it unsubscribes
#[must_use = "dropping the subscription unsubscribes immediately"]
pub struct Subscription {
    controller: Weak<ControllerInner>,
    id: usize,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.controller.upgrade() {
            inner
                .listeners
                .borrow_mut()
                .retain(|(id, _)| *id != self.id);
        }
    }
}
