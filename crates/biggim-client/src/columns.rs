//! Tissue-to-column resolution against BigGIM metadata.
//!
//! Endpoint used:
//!   GET metadata/tissue/{tissue} -> { substudies: [ { columns: [ { name, table: { name } } ] } ] }

use tracing::{debug, info, instrument};

use biggim_common::{BigGimError, Result};

use crate::BigGimClient;

/// Substring patterns marking a column as noise for tissue queries.
const NOISE_PATTERNS: [&str; 2] = ["TCGA", "Pvalue"];

/// True when a column name matches one of the known noise patterns.
///
/// Plain substring match: any column merely containing `TCGA` or `Pvalue`
/// is excluded, matching what the service's established clients do.
pub fn is_noise_column(name: &str) -> bool {
    NOISE_PATTERNS.iter().any(|p| name.contains(p))
}

impl BigGimClient {
    /// Columns associated with a single tissue in `table`.
    ///
    /// An unknown tissue (HTTP 404) resolves to an empty list; every other
    /// failure propagates. Duplicates are not removed at this level.
    #[instrument(skip(self))]
    pub async fn tissue_columns(&self, tissue: &str, table: &str) -> Result<Vec<String>> {
        let endpoint = format!("metadata/tissue/{tissue}");
        let md = match self.transport.get_json(&endpoint, &[]).await {
            Ok(md) => md,
            Err(e) if e.is_not_found() => {
                debug!(tissue, "tissue not found in BigGIM metadata");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e),
        };

        let mut columns = Vec::new();
        if let Some(substudies) = md["substudies"].as_array() {
            for substudy in substudies {
                let Some(cols) = substudy["columns"].as_array() else { continue };
                for column in cols {
                    if column["table"]["name"].as_str() == Some(table) {
                        if let Some(name) = column["name"].as_str() {
                            columns.push(name.to_string());
                        }
                    }
                }
            }
        }
        Ok(columns)
    }

    /// Columns for a set of tissues in `table`, noise-filtered.
    ///
    /// Unions per-tissue results, removes duplicates (output order is not
    /// part of the contract) and drops noise columns. Fails with
    /// [`BigGimError::NoColumns`] when nothing usable remains, since no
    /// meaningful query can be built from an empty column set.
    #[instrument(skip(self))]
    pub async fn resolve_columns(&self, tissues: &[String], table: &str) -> Result<Vec<String>> {
        let mut columns = Vec::new();
        for tissue in tissues {
            columns.extend(self.tissue_columns(tissue, table).await?);
        }
        columns.sort();
        columns.dedup();
        columns.retain(|c| !is_noise_column(c));

        if columns.is_empty() {
            return Err(BigGimError::NoColumns { tissues: tissues.to_vec() });
        }
        info!(count = columns.len(), "resolved BigGIM columns");
        Ok(columns)
    }
}
