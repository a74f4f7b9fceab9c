//! Client configuration.
//!
//! One [`ClientConfig`] is built at startup and handed to the client; there
//! is no process-global state. Defaults match the public BigGIM deployment.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Base path of the public BigGIM API.
pub const DEFAULT_BASE_URL: &str = "http://biggim.ncats.io/api";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL every endpoint path is joined onto.
    pub base_url: String,
    /// Per-request timeout applied by the HTTP client.
    pub request_timeout: Duration,
    /// Delay between status polls for interaction queries.
    pub poll_interval: Duration,
    /// Consecutive transport errors tolerated while polling before the
    /// job is abandoned.
    pub max_poll_errors: u32,
    /// Overall wall-clock bound on a polling loop. `None` polls until the
    /// job leaves the running state, however long that takes.
    pub poll_deadline: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: Duration::from_secs(30),
            poll_interval: Duration::from_secs(5),
            max_poll_errors: 3,
            poll_deadline: None,
        }
    }
}

impl ClientConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    pub fn with_max_poll_errors(mut self, max: u32) -> Self {
        self.max_poll_errors = max;
        self
    }

    pub fn with_poll_deadline(mut self, deadline: Duration) -> Self {
        self.poll_deadline = Some(deadline);
        self
    }
}
