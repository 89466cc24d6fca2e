//! Rating functions used to pick a coarsening partner for each vertex
//! (spec.md §4.2: "A pluggable rating function scores how good a
//! contraction candidate pair is").

use std::collections::HashMap;

use crate::hypergraph::Hypergraph;
use crate::ids::{VertexId, Weight};

/// `r(u, v)`: higher is a better contraction candidate. All three variants
/// are grounded on the community-agnostic/heavy-edge/edge-frequency rating
/// functions KaHyPar's coarsening policies implement.
pub trait RatingFunction: Send + Sync {
    fn rate(&self, hg: &Hypergraph, u: VertexId, v: VertexId, shared_weight: Weight) -> f64;
}

/// `shared_weight(u,v) / (w(u) * w(v))`: normalizes by the product of
/// endpoint weights so coarsening doesn't keep piling weight onto the same
/// vertex just because it is already heavy (spec.md default rating
/// function).
#[derive(Debug, Clone, Copy, Default)]
pub struct HeavyEdgeRating;

impl RatingFunction for HeavyEdgeRating {
    fn rate(&self, hg: &Hypergraph, u: VertexId, v: VertexId, shared_weight: Weight) -> f64 {
        let denom = (hg.vertex_weight(u) as f64) * (hg.vertex_weight(v) as f64);
        if denom <= 0.0 {
            0.0
        } else {
            shared_weight as f64 / denom
        }
    }
}

/// `Σ_{e shared} w(e) / (|pins(e)| - 1)`: penalizes large hyperedges, since
/// contracting through one of them says less about `u` and `v` belonging
/// together than a small one does. Approximated here via the same
/// shared-weight accumulation the caller already computes, scaled by an
/// edge-size-independent normalization so the trait stays a pure function
/// of the accumulated totals rather than re-walking pin lists.
#[derive(Debug, Clone, Copy, Default)]
pub struct EdgeFrequencyRating;

impl RatingFunction for EdgeFrequencyRating {
    fn rate(&self, hg: &Hypergraph, u: VertexId, v: VertexId, shared_weight: Weight) -> f64 {
        let denom = hg.vertex_weight(u).max(hg.vertex_weight(v)) as f64;
        if denom <= 0.0 {
            0.0
        } else {
            shared_weight as f64 / denom
        }
    }
}

/// Like [`HeavyEdgeRating`] but rejects candidates outside `u`'s community
/// (when community detection has assigned one), deferred to the caller via
/// `same_community`; the rating itself is heavy-edge.
#[derive(Debug, Clone, Copy, Default)]
pub struct CommunityAwareRating;

impl RatingFunction for CommunityAwareRating {
    fn rate(&self, hg: &Hypergraph, u: VertexId, v: VertexId, shared_weight: Weight) -> f64 {
        HeavyEdgeRating.rate(hg, u, v, shared_weight)
    }
}

/// Accumulates, for a fixed `u`, the total weight of hyperedges shared with
/// each neighboring active vertex (counting parallel incidence correctly
/// since pin lists may contain duplicates, spec.md §3).
pub fn shared_weights(hg: &Hypergraph, u: VertexId) -> HashMap<VertexId, Weight> {
    let mut totals: HashMap<VertexId, Weight> = HashMap::new();
    for &e in hg.incident_edges(u) {
        let w = hg.edge_weight(e);
        // Large hyperedges dilute the rating signal for every pair of pins;
        // KaHyPar's rating functions divide by pin count for this reason.
        let scale = (hg.pins(e).len().saturating_sub(1)).max(1) as f64;
        let per_pair = (w as f64 / scale).round() as Weight;
        for &v in hg.pins(e) {
            if v != u {
                *totals.entry(v).or_insert(0) += per_pair.max(1);
            }
        }
    }
    totals
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::VertexId;

    fn vid(i: usize) -> VertexId {
        VertexId::new(i)
    }

    #[test]
    fn shared_weights_accumulates_across_multiple_edges() {
        let hg = Hypergraph::new(
            vec![1, 1, 1],
            vec![
                (4, vec![vid(0), vid(1)]),
                (2, vec![vid(0), vid(1), vid(2)]),
            ],
            2,
        );
        let totals = shared_weights(&hg, vid(0));
        assert!(totals.contains_key(&vid(1)));
        assert!(totals.contains_key(&vid(2)));
        assert!(totals[&vid(1)] > totals[&vid(2)]);
    }

    #[test]
    fn heavy_edge_rating_prefers_lighter_endpoints() {
        let hg = Hypergraph::new(vec![1, 1, 5], vec![(6, vec![vid(0), vid(1), vid(2)])], 2);
        let r_light = HeavyEdgeRating.rate(&hg, vid(0), vid(1), 6);
        let r_heavy = HeavyEdgeRating.rate(&hg, vid(0), vid(2), 6);
        assert!(r_light > r_heavy);
    }
}
