//! Single-flight gate for access token refreshes
//!
//! The first request that needs a refresh becomes the leader and performs the
//! call. Requests that need one while it is in flight queue a continuation and
//! are woken, in the order they arrived, with the leader's outcome.

use super::error::ClientError;
use crate::types::AccessToken;
use futures::channel::oneshot;
use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

pub(crate) type RefreshOutcome = Result<AccessToken, ClientError>;

/// Whether a refresh call is currently in flight
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshState {
    Idle,
    Refreshing,
}

struct GateInner {
    state: RefreshState,
    queue: VecDeque<oneshot::Sender<RefreshOutcome>>,
}

pub(crate) struct RefreshGate {
    inner: Mutex<GateInner>,
}

/// Result of entering the gate
pub(crate) enum Ticket<'a> {
    /// Caller must perform the refresh and settle the lease
    Lead(RefreshLease<'a>),
    /// A refresh is already running; await its outcome
    Wait(oneshot::Receiver<RefreshOutcome>),
}

impl RefreshGate {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(GateInner {
                state: RefreshState::Idle,
                queue: VecDeque::new(),
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, GateInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn state(&self) -> RefreshState {
        self.lock().state
    }

    pub fn queued(&self) -> usize {
        self.lock().queue.len()
    }

    pub fn enter(&self) -> Ticket<'_> {
        let mut inner = self.lock();
        match inner.state {
            RefreshState::Refreshing => {
                let (tx, rx) = oneshot::channel();
                inner.queue.push_back(tx);
                Ticket::Wait(rx)
            }
            RefreshState::Idle => {
                inner.state = RefreshState::Refreshing;
                Ticket::Lead(RefreshLease {
                    gate: self,
                    settled: false,
                })
            }
        }
    }

    /// Returns to Idle and wakes every queued request with `outcome`
    fn settle(&self, outcome: &RefreshOutcome) -> usize {
        let waiters = {
            let mut inner = self.lock();
            inner.state = RefreshState::Idle;
            std::mem::take(&mut inner.queue)
        };

        let resumed = waiters.len();
        for waiter in waiters {
            // receiver gone means the caller was dropped
            let _ = waiter.send(outcome.clone());
        }
        resumed
    }
}

impl Default for RefreshGate {
    fn default() -> Self {
        Self::new()
    }
}

/// Held by the leader while its refresh call is in flight
pub(crate) struct RefreshLease<'a> {
    gate: &'a RefreshGate,
    settled: bool,
}

impl RefreshLease<'_> {
    /// Release the gate, returning how many queued requests were resumed
    pub fn settle(mut self, outcome: &RefreshOutcome) -> usize {
        self.settled = true;
        self.gate.settle(outcome)
    }
}

impl Drop for RefreshLease<'_> {
    fn drop(&mut self) {
        if !self.settled {
            tracing::warn!("token refresh abandoned before completion");
            self.gate.settle(&Err(abandoned()));
        }
    }
}

/// Error delivered when the leader went away without an outcome
pub(crate) fn abandoned() -> ClientError {
    ClientError::refresh_failed(ClientError::Network {
        message: "Session refresh was interrupted".to_string(),
    })
}
