use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BigGimError {
    /// Non-2xx response from the service, with the decoded error body
    /// when the server sent one.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: serde_json::Value },

    #[error("HTTP request error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    /// No usable columns for the requested tissues; raised before any
    /// remote job is submitted since no meaningful query can be built.
    #[error("no BigGIM columns related to {tissues:?}")]
    NoColumns { tissues: Vec<String> },

    /// Too many consecutive failures while polling a job's status.
    #[error("gave up polling job status after {attempts} consecutive errors")]
    PollingExhausted { attempts: u32 },

    /// The polling deadline elapsed while the job was still running.
    #[error("job still running after {elapsed:?}")]
    PollTimeout { elapsed: Duration },

    #[error("malformed response: missing field `{0}`")]
    MissingField(&'static str),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BigGimError {
    /// True for an HTTP 404 response (tissue or resource not found).
    pub fn is_not_found(&self) -> bool {
        matches!(self, BigGimError::Http { status: 404, .. })
    }
}

pub type Result<T> = std::result::Result<T, BigGimError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_not_found() {
        let e = BigGimError::Http { status: 404, body: serde_json::Value::Null };
        assert!(e.is_not_found());

        let e = BigGimError::Http { status: 500, body: serde_json::Value::Null };
        assert!(!e.is_not_found());

        let e = BigGimError::MissingField("request_id");
        assert!(!e.is_not_found());
    }
}
