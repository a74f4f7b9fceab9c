//! biggim-client — Client for the NCATS BigGIM gene-interaction service.
//!
//! BigGIM serves tissue-specific gene interaction tables behind an
//! asynchronous job API: a query is submitted, its status polled until it
//! leaves the `running` state, and the results downloaded as one or more
//! CSV shards which concatenate into a single interaction table.
//!
//! The workflow for "find genes related to a tissue of interest":
//! 1. Resolve which data columns the tissues map to ([`BigGimClient::resolve_columns`]).
//! 2. Submit an interaction query over those columns and poll it to
//!    completion ([`BigGimClient::run_query`]).
//! 3. Optionally expand the seed gene set with the partners of the
//!    strongest interactions ([`BigGimClient::find_related_genes`]).
//!
//! # Example
//!
//! ```rust,no_run
//! use biggim_client::BigGimClient;
//! use biggim_client::query::QueryOptions;
//!
//! #[tokio::main]
//! async fn main() -> biggim_common::Result<()> {
//!     let client = BigGimClient::new()?;
//!
//!     let genes = vec!["5111".to_string(), "6996".to_string()];
//!     let tissues = vec!["brain".to_string()];
//!
//!     let options = QueryOptions { query_id2: true, ..Default::default() };
//!     let related = client.find_related_genes(&genes, &tissues, 250, options).await?;
//!     println!("{} related genes", related.len());
//!     Ok(())
//! }
//! ```

pub mod columns;
pub mod expand;
pub mod jobs;
pub mod query;
pub mod table;

use std::sync::Arc;

use biggim_common::config::ClientConfig;
use biggim_common::transport::{ApiTransport, HttpTransport};
use biggim_common::Result;

pub use table::InteractionTable;

/// Interaction table the high-level helpers query.
pub const DEFAULT_TABLE: &str = "BigGIM_70_v1";

/// Client for the BigGIM REST API.
pub struct BigGimClient {
    pub(crate) transport: Arc<dyn ApiTransport>,
    pub(crate) config: ClientConfig,
}

impl BigGimClient {
    /// Client against the public BigGIM deployment with default settings.
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let transport = Arc::new(HttpTransport::new(&config)?);
        Ok(Self { transport, config })
    }

    /// Use a custom transport. Tests script one; embedders can bring
    /// their own HTTP stack.
    pub fn with_transport(transport: Arc<dyn ApiTransport>, config: ClientConfig) -> Self {
        Self { transport, config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}
