//! biggim-test-utils — Shared testing utilities for the BigGIM workspace.
//!
//! The centrepiece is [`ScriptedTransport`], an in-memory
//! [`ApiTransport`] fed from queues of canned responses so orchestration
//! and polling behaviour can be tested deterministically, without a
//! network.

pub use pretty_assertions;

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use biggim_common::transport::ApiTransport;
use biggim_common::{BigGimError, Result};

/// A request observed by [`ScriptedTransport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recorded {
    Get {
        endpoint: String,
        params: Vec<(String, String)>,
    },
    Post {
        endpoint: String,
        form: Vec<(String, String)>,
    },
    Fetch {
        url: String,
    },
}

type Script<T> = Mutex<VecDeque<Result<T>>>;

/// In-memory transport replaying scripted responses in FIFO order per
/// method. Running out of script is a test bug and panics loudly. Every
/// issued request is recorded so tests can assert exact request counts
/// and payloads.
#[derive(Default)]
pub struct ScriptedTransport {
    gets: Script<Value>,
    posts: Script<Value>,
    fetches: Script<String>,
    log: Mutex<Vec<Recorded>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_get(&self, resp: Result<Value>) {
        self.gets.lock().unwrap().push_back(resp);
    }

    pub fn push_post(&self, resp: Result<Value>) {
        self.posts.lock().unwrap().push_back(resp);
    }

    pub fn push_fetch(&self, resp: Result<String>) {
        self.fetches.lock().unwrap().push_back(resp);
    }

    /// Canned HTTP error shaped like what `HttpTransport` produces.
    pub fn http_error(status: u16, body: Value) -> BigGimError {
        BigGimError::Http { status, body }
    }

    /// Every request issued so far, in order.
    pub fn requests(&self) -> Vec<Recorded> {
        self.log.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.log.lock().unwrap().len()
    }

    fn next<T>(script: &Script<T>, method: &str) -> Result<T> {
        script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| panic!("ScriptedTransport: script exhausted for {method}"))
    }
}

#[async_trait]
impl ApiTransport for ScriptedTransport {
    async fn get_json(&self, endpoint: &str, params: &[(String, String)]) -> Result<Value> {
        self.log.lock().unwrap().push(Recorded::Get {
            endpoint: endpoint.to_string(),
            params: params.to_vec(),
        });
        Self::next(&self.gets, "GET")
    }

    async fn post_form(&self, endpoint: &str, form: &[(String, String)]) -> Result<Value> {
        self.log.lock().unwrap().push(Recorded::Post {
            endpoint: endpoint.to_string(),
            form: form.to_vec(),
        });
        Self::next(&self.posts, "POST")
    }

    async fn fetch_text(&self, url: &str) -> Result<String> {
        self.log.lock().unwrap().push(Recorded::Fetch { url: url.to_string() });
        Self::next(&self.fetches, "FETCH")
    }
}
