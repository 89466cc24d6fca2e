//! Connected-component diagnostics, grounded on the union-find grouping
//! used by `StructuredHypergraph::get_parts` in the teacher's
//! `hypergraph/structured_hypergraph.rs`: two vertices are in the same
//! component iff some chain of hyperedges connects them.
//!
//! Not on the hot path of any core operation; used by the CLI's `verify`
//! subcommand and by tests that want to sanity-check an extracted
//! sub-hypergraph.

use union_find::{QuickUnionUf, UnionByRank, UnionFind};

use super::Hypergraph;
use crate::ids::VertexId;

/// Assigns every active vertex a component id in `0..num_components`, with
/// ids ordered by each component's smallest vertex id (so the result is
/// deterministic regardless of hash/iteration order).
pub fn connected_components(hg: &Hypergraph) -> (Vec<usize>, usize) {
    let active: Vec<VertexId> = hg.all_active_vertices().collect();
    if active.is_empty() {
        return (Vec::new(), 0);
    }
    let max_index = active.iter().map(|v| v.index()).max().unwrap();
    let mut uf: QuickUnionUf<UnionByRank> = QuickUnionUf::new(max_index + 1);

    for e in hg.all_active_edges() {
        let pins = hg.pins(e);
        for pair in pins.windows(2) {
            uf.union(pair[0].index(), pair[1].index());
        }
    }

    let mut root_to_component: std::collections::HashMap<usize, usize> =
        std::collections::HashMap::new();
    let mut roots_in_order = Vec::new();
    for &v in &active {
        let root = uf.find(v.index());
        root_to_component.entry(root).or_insert_with(|| {
            roots_in_order.push(root);
            roots_in_order.len() - 1
        });
    }

    let labels: Vec<usize> = active
        .iter()
        .map(|&v| root_to_component[&uf.find(v.index())])
        .collect();
    (labels, roots_in_order.len())
}
