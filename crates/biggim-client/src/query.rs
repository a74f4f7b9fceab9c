//! Query payload construction for `biggim/query`.

/// Per-column restriction threshold sent with every query; interactions
/// weaker than this are filtered server-side.
const RESTRICTION_THRESHOLD: &str = "-2.0";

/// Knobs of an interaction query. Defaults mirror the service's notebook
/// usage: a generous row limit, no column averaging, one-sided gene list.
#[derive(Debug, Clone)]
pub struct QueryOptions {
    /// Maximum number of interaction rows the service should return.
    pub limit: u64,
    /// Ask the service to average the selected columns into `mean`.
    pub average_columns: bool,
    /// Duplicate the gene list into `ids2`, forcing the service to
    /// consider every pairwise interaction within the input set.
    pub query_id2: bool,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            limit: 1_000_000,
            average_columns: false,
            query_id2: false,
        }
    }
}

/// Build the form payload for a BigGIM interaction query.
///
/// `restriction_gt` interleaves every column with the threshold
/// (`col_a,-2.0,col_b,-2.0,...`), the wire format the service expects.
pub fn build_payload(
    genes: &[String],
    columns: &[String],
    table: &str,
    options: &QueryOptions,
) -> Vec<(String, String)> {
    let gene_list = genes.join(",");
    let restriction = columns
        .iter()
        .map(|c| format!("{c},{RESTRICTION_THRESHOLD}"))
        .collect::<Vec<_>>()
        .join(",");

    let mut payload = vec![
        ("restriction_gt".to_string(), restriction),
        ("table".to_string(), table.to_string()),
        ("columns".to_string(), columns.join(",")),
        ("ids1".to_string(), gene_list.clone()),
        ("limit".to_string(), options.limit.to_string()),
        ("average_columns".to_string(), options.average_columns.to_string()),
    ];
    if options.query_id2 {
        payload.push(("ids2".to_string(), gene_list));
    }
    payload
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field<'a>(payload: &'a [(String, String)], key: &str) -> Option<&'a str> {
        payload.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    #[test]
    fn test_restriction_threshold_per_column() {
        let genes = vec!["1017".to_string()];
        let columns = vec!["GTEx_Brain_Correlation".to_string(), "GIANT_Brain".to_string()];
        let payload = build_payload(&genes, &columns, "BigGIM_70_v1", &QueryOptions::default());

        assert_eq!(
            field(&payload, "restriction_gt"),
            Some("GTEx_Brain_Correlation,-2.0,GIANT_Brain,-2.0")
        );
        assert_eq!(field(&payload, "columns"), Some("GTEx_Brain_Correlation,GIANT_Brain"));
        assert_eq!(field(&payload, "table"), Some("BigGIM_70_v1"));
        assert_eq!(field(&payload, "limit"), Some("1000000"));
        assert_eq!(field(&payload, "average_columns"), Some("false"));
    }

    #[test]
    fn test_ids2_duplicates_ids1_when_requested() {
        let genes = vec!["1017".to_string(), "5111".to_string()];
        let columns = vec!["GTEx_Brain_Correlation".to_string()];

        let options = QueryOptions { query_id2: true, ..Default::default() };
        let payload = build_payload(&genes, &columns, "BigGIM_70_v1", &options);
        assert_eq!(field(&payload, "ids1"), field(&payload, "ids2"));
        assert_eq!(field(&payload, "ids1"), Some("1017,5111"));
    }

    #[test]
    fn test_ids2_absent_by_default() {
        let genes = vec!["1017".to_string()];
        let columns = vec!["GTEx_Brain_Correlation".to_string()];
        let payload = build_payload(&genes, &columns, "BigGIM_70_v1", &QueryOptions::default());
        assert_eq!(field(&payload, "ids2"), None);
    }
}
