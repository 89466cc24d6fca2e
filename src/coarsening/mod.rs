//! Rating-based coarsening (spec.md §4.2): repeatedly contracts matched
//! pairs of vertices until the hypergraph shrinks below a contraction
//! limit, recording the history-stack length after each pass so the
//! multilevel driver knows where to stop uncoarsening and run refinement.

pub mod rating;

use std::collections::HashSet;

use rating::{shared_weights, RatingFunction};

use crate::hypergraph::Hypergraph;
use crate::ids::{VertexId, Weight};
use crate::rng::{Rng, TieBreakingPolicy};

pub struct CoarseningConfig {
    pub contraction_limit: usize,
    pub max_allowed_node_weight: Weight,
    pub tie_breaking: TieBreakingPolicy,
}

pub struct CoarseningResult {
    /// `hg.history_len()` snapshotted at the end of each pass, ascending.
    /// The multilevel driver uncoarsens one boundary gap at a time.
    pub level_boundaries: Vec<usize>,
}

/// Runs coarsening passes until `hg.num_vertices() <= contraction_limit` or
/// a full pass fails to find any eligible pair (all remaining active
/// vertices already exceed the weight bound pairwise — spec.md §4.2 edge
/// case).
pub fn coarsen(
    hg: &mut Hypergraph,
    rating_fn: &dyn RatingFunction,
    config: &CoarseningConfig,
    rng: &mut Rng,
) -> CoarseningResult {
    let mut level_boundaries = Vec::new();

    loop {
        if hg.num_vertices() <= config.contraction_limit {
            break;
        }

        let mut order: Vec<VertexId> = hg.all_active_vertices().collect();
        rng.shuffle(&mut order);
        let mut matched: HashSet<VertexId> = HashSet::new();
        let mut contracted_this_pass = 0usize;

        for u in order {
            if hg.num_vertices() <= config.contraction_limit {
                break;
            }
            if matched.contains(&u) || !hg.is_vertex_active(u) {
                continue;
            }

            let mut best: Option<(VertexId, f64)> = None;
            for (v, shared_weight) in shared_weights(hg, u) {
                if matched.contains(&v) || !hg.is_vertex_active(v) {
                    continue;
                }
                if hg.vertex_weight(u) + hg.vertex_weight(v) > config.max_allowed_node_weight {
                    continue;
                }
                let r = rating_fn.rate(hg, u, v, shared_weight);
                best = Some(match best {
                    None => (v, r),
                    Some((best_v, best_r)) => {
                        if r > best_r || (r == best_r && config.tie_breaking.accept_equal(rng)) {
                            (v, r)
                        } else {
                            (best_v, best_r)
                        }
                    }
                });
            }

            if let Some((v, _)) = best {
                hg.contract_tracked(u, v).expect(
                    "rating-selected candidates are both active and unassigned, satisfying contract's preconditions",
                );
                matched.insert(u);
                matched.insert(v);
                contracted_this_pass += 1;
            }
        }

        level_boundaries.push(hg.history_len());
        tracing::debug!(
            contracted_this_pass,
            num_vertices = hg.num_vertices(),
            "coarsening pass finished"
        );
        if contracted_this_pass == 0 {
            break;
        }
    }

    CoarseningResult { level_boundaries }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::VertexId;

    fn vid(i: usize) -> VertexId {
        VertexId::new(i)
    }

    #[test]
    fn coarsens_down_to_contraction_limit() {
        let mut hg = Hypergraph::new(
            vec![1; 8],
            vec![
                (1, vec![vid(0), vid(1)]),
                (1, vec![vid(2), vid(3)]),
                (1, vec![vid(4), vid(5)]),
                (1, vec![vid(6), vid(7)]),
                (1, vec![vid(1), vid(2)]),
                (1, vec![vid(5), vid(6)]),
            ],
            2,
        );
        let config = CoarseningConfig {
            contraction_limit: 4,
            max_allowed_node_weight: 100,
            tie_breaking: TieBreakingPolicy::FirstWins,
        };
        let mut rng = Rng::from_seed(1);
        let result = coarsen(&mut hg, &rating::HeavyEdgeRating, &config, &mut rng);
        assert!(hg.num_vertices() <= 4);
        assert!(!result.level_boundaries.is_empty());
    }

    #[test]
    fn respects_max_allowed_node_weight() {
        let mut hg = Hypergraph::new(vec![10, 10], vec![(1, vec![vid(0), vid(1)])], 2);
        let config = CoarseningConfig {
            contraction_limit: 1,
            max_allowed_node_weight: 15, // 10+10 exceeds this
            tie_breaking: TieBreakingPolicy::FirstWins,
        };
        let mut rng = Rng::from_seed(1);
        coarsen(&mut hg, &rating::HeavyEdgeRating, &config, &mut rng);
        assert_eq!(hg.num_vertices(), 2, "no contraction should have been legal");
    }
}
