//! Job submission, status polling, and result-shard assembly.
//!
//! BigGIM queries run asynchronously: submission returns a `request_id`,
//! a status endpoint reports `running` until the job finishes, and the
//! final status carries the URIs of one or more CSV result shards.
//!
//! Endpoints used:
//!   POST biggim/query               -> { request_id, ... }
//!   GET  biggim/status/{request_id} -> { status, request_uri: [urls] }

use std::time::Duration;

use serde_json::Value;
use tokio::time::{sleep, Instant};
use tracing::{debug, info, instrument, warn};

use biggim_common::{BigGimError, Result};

use crate::expand::expand_gene_set;
use crate::query::{build_payload, QueryOptions};
use crate::table::InteractionTable;
use crate::{BigGimClient, DEFAULT_TABLE};

const RUNNING: &str = "running";

/// Delay policy between status polls.
#[derive(Debug, Clone, Copy)]
pub enum Backoff {
    /// Same delay every iteration.
    Fixed(Duration),
    /// Delay grows by `step` after every iteration.
    Linear { start: Duration, step: Duration },
}

impl Backoff {
    fn delay(&self, iteration: u32) -> Duration {
        match *self {
            Backoff::Fixed(d) => d,
            Backoff::Linear { start, step } => start + step * iteration,
        }
    }
}

impl BigGimClient {
    /// Submit a query payload, returning the job's `request_id`.
    ///
    /// A failed submission aborts the workflow with the original error;
    /// there is no job handle to fall back on.
    #[instrument(skip(self, payload))]
    pub async fn submit(&self, endpoint: &str, payload: &[(String, String)]) -> Result<String> {
        let resp = self.transport.post_form(endpoint, payload).await?;
        let request_id = resp["request_id"]
            .as_str()
            .ok_or(BigGimError::MissingField("request_id"))?
            .to_string();
        info!(request_id, endpoint, "job submitted");
        Ok(request_id)
    }

    /// Poll `{status_endpoint}/{request_id}` until the job leaves the
    /// `running` state and return the final status document.
    ///
    /// A transport error counts against a consecutive-error budget of
    /// `max_poll_errors` retries; the error after the budget is spent is
    /// fatal ([`BigGimError::PollingExhausted`]) and no further request is
    /// issued. A successful poll resets the budget. With a configured
    /// `poll_deadline`, a job still running once the deadline elapses
    /// fails with [`BigGimError::PollTimeout`].
    #[instrument(skip(self))]
    pub async fn poll(
        &self,
        status_endpoint: &str,
        request_id: &str,
        backoff: Backoff,
    ) -> Result<Value> {
        let endpoint = format!("{status_endpoint}/{request_id}");
        let started = Instant::now();
        let mut errors: u32 = 0;
        let mut iteration: u32 = 0;

        loop {
            if let Some(deadline) = self.config.poll_deadline {
                let elapsed = started.elapsed();
                if elapsed >= deadline {
                    warn!(request_id, ?elapsed, "poll deadline exceeded, abandoning job");
                    return Err(BigGimError::PollTimeout { elapsed });
                }
            }

            match self.transport.get_json(&endpoint, &[]).await {
                Ok(status) => {
                    errors = 0;
                    if status["status"].as_str() != Some(RUNNING) {
                        debug!(request_id, status = %status["status"], "job finished");
                        return Ok(status);
                    }
                    debug!(request_id, "job still running, checking again");
                }
                Err(e) => {
                    errors += 1;
                    if errors > self.config.max_poll_errors {
                        warn!(request_id, errors, "giving up on job status");
                        return Err(BigGimError::PollingExhausted { attempts: errors });
                    }
                    warn!(request_id, errors, error = %e, "status poll failed, trying again");
                }
            }

            sleep(backoff.delay(iteration)).await;
            iteration += 1;
        }
    }

    /// Download every result shard listed in a final status document and
    /// concatenate them into one table.
    #[instrument(skip(self, status))]
    pub async fn fetch_shards(&self, status: &Value) -> Result<InteractionTable> {
        let uris: Vec<&str> = status["request_uri"]
            .as_array()
            .map(|a| a.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default();
        if uris.is_empty() {
            // A terminal status without shards means the job failed remotely.
            return Err(BigGimError::MissingField("request_uri"));
        }

        let mut shards = Vec::with_capacity(uris.len());
        for uri in &uris {
            shards.push(self.transport.fetch_text(uri).await?);
        }
        let table = InteractionTable::from_shards(&shards)?;
        info!(shards = uris.len(), rows = table.len(), "assembled result table");
        Ok(table)
    }

    /// Run a full interaction query: resolve tissue columns, submit, poll
    /// to completion, and assemble the result shards.
    #[instrument(skip(self, options))]
    pub async fn run_query(
        &self,
        genes: &[String],
        tissues: &[String],
        options: QueryOptions,
    ) -> Result<InteractionTable> {
        let columns = self.resolve_columns(tissues, DEFAULT_TABLE).await?;
        let payload = build_payload(genes, &columns, DEFAULT_TABLE, &options);
        let request_id = self.submit("biggim/query", &payload).await?;
        let status = self
            .poll("biggim/status", &request_id, Backoff::Fixed(self.config.poll_interval))
            .await?;
        self.fetch_shards(&status).await
    }

    /// Find genes related to the seeds in the given tissues: run a query,
    /// then expand the seed set with up to `n` partners of the strongest
    /// interactions. See [`expand_gene_set`].
    #[instrument(skip(self, options))]
    pub async fn find_related_genes(
        &self,
        genes: &[String],
        tissues: &[String],
        n: usize,
        options: QueryOptions,
    ) -> Result<Vec<String>> {
        let table = self.run_query(genes, tissues, options).await?;
        Ok(expand_gene_set(&table, genes, n))
    }

    /// Ad hoc submit/poll/fetch against any endpoint sharing BigGIM's job
    /// shape. The status endpoint is derived from the first path segment
    /// of `endpoint`; polling backs off linearly (1 s, then +5 s per
    /// iteration), gentler on long-running exploratory jobs than the
    /// fixed interval.
    #[instrument(skip(self, params))]
    pub async fn run_job(
        &self,
        endpoint: &str,
        params: &[(String, String)],
    ) -> Result<InteractionTable> {
        let request_id = self.submit(endpoint, params).await?;
        let service = endpoint.split('/').next().unwrap_or(endpoint);
        let status_endpoint = format!("{service}/status");
        let backoff = Backoff::Linear {
            start: Duration::from_secs(1),
            step: Duration::from_secs(5),
        };
        let status = self.poll(&status_endpoint, &request_id, backoff).await?;
        self.fetch_shards(&status).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_backoff() {
        let backoff = Backoff::Fixed(Duration::from_secs(5));
        assert_eq!(backoff.delay(0), Duration::from_secs(5));
        assert_eq!(backoff.delay(7), Duration::from_secs(5));
    }

    #[test]
    fn test_linear_backoff_schedule() {
        let backoff = Backoff::Linear {
            start: Duration::from_secs(1),
            step: Duration::from_secs(5),
        };
        assert_eq!(backoff.delay(0), Duration::from_secs(1));
        assert_eq!(backoff.delay(1), Duration::from_secs(6));
        assert_eq!(backoff.delay(2), Duration::from_secs(11));
    }
}
