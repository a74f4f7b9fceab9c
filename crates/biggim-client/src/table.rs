//! In-memory interaction tables assembled from CSV result shards.

use biggim_common::Result;

/// Column holding the (averaged) interaction strength.
pub const MEAN_COLUMN: &str = "mean";

/// Row-oriented table concatenated from the CSV shards of a finished job.
///
/// Every shard carries a leading row-index column which means nothing once
/// shards are concatenated; [`InteractionTable::from_shards`] drops it from
/// headers and rows alike. After assembly the table has at least the
/// `Gene1`, `Gene2` and `mean` columns plus whatever per-tissue columns
/// the query selected.
#[derive(Debug, Clone, Default)]
pub struct InteractionTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl InteractionTable {
    /// Parse and concatenate CSV shards, row-major, dropping the leading
    /// index column. Headers come from the first shard.
    pub fn from_shards(shards: &[String]) -> Result<Self> {
        let mut table = Self::default();
        for shard in shards {
            let mut reader = csv::Reader::from_reader(shard.as_bytes());
            if table.headers.is_empty() {
                table.headers = reader.headers()?.iter().skip(1).map(str::to_string).collect();
            }
            for record in reader.records() {
                let record = record?;
                table.rows.push(record.iter().skip(1).map(str::to_string).collect());
            }
        }
        Ok(table)
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a named column, if present.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Cell accessor; `None` when either index is out of range.
    pub fn get(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row).and_then(|r| r.get(col)).map(String::as_str)
    }

    /// Rows reordered by the `mean` column, strongest interactions first.
    /// Rows whose `mean` does not parse sink to the end; ties keep their
    /// original order.
    pub fn sorted_by_mean_desc(&self) -> Self {
        let mean_idx = self.column_index(MEAN_COLUMN);
        let mean_of = |row: &Vec<String>| {
            mean_idx
                .and_then(|i| row.get(i))
                .and_then(|v| v.parse::<f64>().ok())
        };

        let mut rows = self.rows.clone();
        rows.sort_by(|a, b| {
            mean_of(b)
                .partial_cmp(&mean_of(a))
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        Self { headers: self.headers.clone(), rows }
    }
}
