//! Seed gene-set expansion over ranked interaction rows.

use std::collections::HashSet;

use tracing::debug;

use crate::table::InteractionTable;

/// Grow `seed_genes` with the partners of the strongest interactions.
///
/// Rows are visited in descending `mean` order; both `Gene1` and `Gene2`
/// of each row join the set until it holds `seed_genes.len() + n` members
/// or rows run out (the last accepted row may overshoot the cap by one
/// when both of its genes are new).
///
/// Members are then normalised to canonical integer strings — non-numeric
/// identifiers are dropped, leading zeros collapse — and returned sorted
/// lexicographically (`"10"` before `"2"`). The string sort matches the
/// ordering the service's established clients produce; keep it unless
/// downstream consumers agree to a numeric order.
pub fn expand_gene_set(table: &InteractionTable, seed_genes: &[String], n: usize) -> Vec<String> {
    let ranked = table.sorted_by_mean_desc();
    let gene1 = ranked.column_index("Gene1");
    let gene2 = ranked.column_index("Gene2");
    let cap = seed_genes.len() + n;

    let mut genes: HashSet<String> = seed_genes.iter().cloned().collect();
    for row in ranked.rows() {
        if genes.len() >= cap {
            break;
        }
        for idx in [gene1, gene2].into_iter().flatten() {
            if let Some(gene) = row.get(idx) {
                genes.insert(gene.clone());
            }
        }
    }

    let mut out: Vec<String> = genes
        .iter()
        .filter_map(|g| g.trim().parse::<i64>().ok())
        .map(|v| v.to_string())
        .collect();
    out.sort();
    out.dedup();
    debug!(seeds = seed_genes.len(), expanded = out.len(), "expanded gene set");
    out
}
