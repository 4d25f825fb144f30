//! Dashboard statistics service

use medadmin_http::{ClientError, SessionClient};
use serde::Deserialize;

/// Counter with an optional month-over-month trend in percent
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Metric {
    pub total: u64,
    pub active: u64,
    pub trend: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Revenue {
    pub total: f64,
    pub trend: Option<f64>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Activity {
    pub action: String,
    #[serde(default)]
    pub timestamp: String,
}

/// Body of `GET /admin/stats`. Missing sections read as zero.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct DashboardStats {
    pub users: Metric,
    pub bookings: Metric,
    pub visa_applications: Metric,
    pub revenue: Revenue,
    pub recent_activity: Vec<Activity>,
}

#[cfg(target_arch = "wasm32")]
const RETRY_BASE_DELAY_MS: u32 = 1_000;
#[cfg(target_arch = "wasm32")]
const RETRY_MAX_DELAY_MS: u32 = 30_000;

#[derive(Clone)]
pub struct StatsService {
    client: SessionClient,
}

impl StatsService {
    pub fn new(client: SessionClient) -> Self {
        Self { client }
    }

    /// Fetch the dashboard counters
    pub async fn fetch(&self) -> Result<DashboardStats, ClientError> {
        self.client.get("/admin/stats").await
    }

    /// Fetch, retrying up to `retries` more times with exponential backoff.
    /// A failed session refresh is final.
    pub async fn fetch_with_retry(&self, retries: u32) -> Result<DashboardStats, ClientError> {
        let mut attempt = 0;
        loop {
            match self.fetch().await {
                Ok(stats) => return Ok(stats),
                Err(err) if attempt < retries && !err.is_refresh_failed() => {
                    tracing::debug!(attempt, error = %err, "retrying dashboard stats");
                    backoff(attempt).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
async fn backoff(attempt: u32) {
    let delay = RETRY_BASE_DELAY_MS
        .saturating_mul(1 << attempt.min(5))
        .min(RETRY_MAX_DELAY_MS);
    gloo::timers::future::TimeoutFuture::new(delay).await;
}

// no browser timer natively; retries run back to back
#[cfg(not(target_arch = "wasm32"))]
async fn backoff(_attempt: u32) {}
