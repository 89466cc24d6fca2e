//! Recursive bisection for `k > 2` (spec.md §4.6), grounded literally on
//! `original_source/kahypar/partition/recursive_bisection.h`: an explicit
//! frame stack rather than naive call-stack recursion, and the same
//! relaxed-epsilon formula (clamped at `0.99`) so that early, heavily
//! imbalanced bisections don't starve later ones of slack.
//!
//! Each frame owns a sub-hypergraph, a `local -> original` vertex mapping,
//! and the contiguous range of final block ids `[lo, hi]` it is
//! responsible for. A frame with `hi == lo` just writes its vertices into
//! that one block of the original hypergraph. Otherwise it bisects,
//! extracts both halves, and walks through exactly the three states the
//! original's `RBHypergraphState` names:
//!
//! - `Unpartitioned`: not yet bisected. Bisect it now, carve out part 0 and
//!   part 1, and push part 0's frame for immediate processing.
//! - `PartitionedAndPart1Extracted`: part 0's subtree is fully done (the
//!   stack guarantees that, since it's LIFO); push part 1's frame now.
//! - `Finished`: nothing left to do for this frame.

use crate::coarsening::rating::RatingFunction;
use crate::coarsening::CoarseningConfig;
use crate::error::{HypartError, Result};
use crate::hypergraph::{Hypergraph, NullObserver};
use crate::ids::{BlockId, VertexId, Weight};
use crate::multilevel::{self, MultilevelConfig};
use crate::objective::Objective;
use crate::rng::{Rng, TieBreakingPolicy};

pub struct RecursiveBisectionConfig {
    pub coarsening_contraction_limit: usize,
    pub max_allowed_node_weight: Weight,
    pub tie_breaking: TieBreakingPolicy,
    pub nruns_initial_partitioning: usize,
    pub objective: Objective,
    pub max_fm_passes: usize,
    pub epsilon: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FrameState {
    Unpartitioned,
    PartitionedAndPart1Extracted,
    Finished,
}

struct Frame {
    hg: Hypergraph,
    mapping: Vec<VertexId>,
    lo: usize,
    hi: usize,
    state: FrameState,
    mid: usize,
    part1: Option<(Hypergraph, Vec<VertexId>)>,
}

/// `min(0.99, (1 + epsilon)^base - 1)` where
/// `base = ceil(W_original / k_original) / ceil(W_current / k_current)`
/// (`original_source/kahypar/partition/recursive_bisection.h`,
/// `calculateRelaxedEpsilon`). As the recursion descends into smaller,
/// lighter sub-hypergraphs this relaxes the per-step balance constraint
/// just enough that rounding error accumulated by earlier bisections can't
/// make a later one infeasible.
fn relaxed_epsilon(
    original_total_weight: Weight,
    original_k: usize,
    current_total_weight: Weight,
    current_k: usize,
    epsilon: f64,
) -> f64 {
    let top = (original_total_weight as f64 / original_k as f64).ceil();
    let bottom = (current_total_weight as f64 / current_k as f64).ceil();
    let base = top / bottom;
    let adjusted = (1.0 + epsilon).powf(base) - 1.0;
    adjusted.min(0.99)
}

fn bisection_config(config: &RecursiveBisectionConfig, epsilon: f64) -> MultilevelConfig {
    MultilevelConfig {
        coarsening: CoarseningConfig {
            contraction_limit: config.coarsening_contraction_limit,
            max_allowed_node_weight: config.max_allowed_node_weight,
            tie_breaking: config.tie_breaking,
        },
        nruns_initial_partitioning: config.nruns_initial_partitioning,
        objective: config.objective,
        max_fm_passes: config.max_fm_passes,
        epsilon,
    }
}

/// Partitions `hg` into `num_blocks` blocks by recursive bisection
/// (spec.md §4.6). `hg` must start with every vertex unassigned.
pub fn partition(
    hg: &mut Hypergraph,
    num_blocks: usize,
    config: &RecursiveBisectionConfig,
    rating_fn: &dyn RatingFunction,
    rng: &mut Rng,
) -> Result<()> {
    if num_blocks == 0 {
        return Err(HypartError::config_invalid("num_blocks must be at least 1"));
    }
    if num_blocks == 1 {
        let mut obs = NullObserver;
        for v in hg.all_active_vertices().collect::<Vec<_>>() {
            hg.set_node_part(v, BlockId::new(0), &mut obs)
                .map_err(|e| HypartError::state_invariant(e.to_string()))?;
        }
        return Ok(());
    }

    let original_total_weight = hg.total_weight();
    let identity_mapping: Vec<VertexId> = (0..hg.num_vertices()).map(VertexId::new).collect();

    let mut stack = vec![Frame {
        hg: hg.clone(),
        mapping: identity_mapping,
        lo: 0,
        hi: num_blocks - 1,
        state: FrameState::Unpartitioned,
        mid: 0,
        part1: None,
    }];

    while let Some(mut frame) = stack.pop() {
        let k_sub = frame.hi - frame.lo + 1;

        match frame.state {
            FrameState::Unpartitioned if k_sub == 1 => {
                let mut obs = NullObserver;
                for v in frame.hg.all_active_vertices().collect::<Vec<_>>() {
                    hg.set_node_part(frame.mapping[v.index()], BlockId::new(frame.lo), &mut obs)
                        .map_err(|e| HypartError::state_invariant(e.to_string()))?;
                }
            }
            FrameState::Unpartitioned => {
                let k0 = k_sub.div_ceil(2);
                let eps = relaxed_epsilon(
                    original_total_weight,
                    num_blocks,
                    frame.hg.total_weight(),
                    k_sub,
                    config.epsilon,
                );
                let mut sub = frame.hg.clone();
                multilevel::partition(&mut sub, 2, &bisection_config(config, eps), rating_fn, rng)?;

                let (part0_hg, part0_local) = sub.extract_block(BlockId::new(0), false, 1);
                let (part1_hg, part1_local) = sub.extract_block(BlockId::new(1), false, 1);
                let part0_mapping: Vec<VertexId> =
                    part0_local.iter().map(|&v| frame.mapping[v.index()]).collect();
                let part1_mapping: Vec<VertexId> =
                    part1_local.iter().map(|&v| frame.mapping[v.index()]).collect();

                let mid = frame.lo + k0 - 1;
                frame.mid = mid;
                frame.part1 = Some((part1_hg, part1_mapping));
                frame.state = FrameState::PartitionedAndPart1Extracted;

                let part0_lo = frame.lo;
                stack.push(frame);
                stack.push(Frame {
                    hg: part0_hg,
                    mapping: part0_mapping,
                    lo: part0_lo,
                    hi: mid,
                    state: FrameState::Unpartitioned,
                    mid: 0,
                    part1: None,
                });
            }
            FrameState::PartitionedAndPart1Extracted => {
                let (part1_hg, part1_mapping) = frame
                    .part1
                    .take()
                    .expect("PartitionedAndPart1Extracted always carries a pending part1");
                let part1_lo = frame.mid + 1;
                let part1_hi = frame.hi;
                frame.state = FrameState::Finished;
                stack.push(frame);
                stack.push(Frame {
                    hg: part1_hg,
                    mapping: part1_mapping,
                    lo: part1_lo,
                    hi: part1_hi,
                    state: FrameState::Unpartitioned,
                    mid: 0,
                    part1: None,
                });
            }
            FrameState::Finished => {}
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coarsening::rating::HeavyEdgeRating;
    use crate::ids::BlockId;

    fn vid(i: usize) -> VertexId {
        VertexId::new(i)
    }

    fn four_clusters() -> Hypergraph {
        // 4 disjoint triangles of 3 vertices each, 12 total.
        let mut edges = Vec::new();
        for c in 0..4 {
            let base = c * 3;
            edges.push((1, vec![vid(base), vid(base + 1), vid(base + 2)]));
        }
        Hypergraph::new(vec![1; 12], edges, 4)
    }

    fn config() -> RecursiveBisectionConfig {
        RecursiveBisectionConfig {
            coarsening_contraction_limit: 2,
            max_allowed_node_weight: 100,
            tie_breaking: TieBreakingPolicy::FirstWins,
            nruns_initial_partitioning: 2,
            objective: Objective::Cut,
            max_fm_passes: 5,
            epsilon: 0.2,
        }
    }

    #[test]
    fn four_way_split_of_four_clusters_has_zero_cut() {
        let mut hg = four_clusters();
        let mut rng = Rng::from_seed(7);
        partition(&mut hg, 4, &config(), &HeavyEdgeRating, &mut rng).unwrap();

        for v in 0..12 {
            assert!(hg.vertex_block(vid(v)).is_valid());
        }
        assert_eq!(crate::objective::cut(&hg), 0);

        // every block should end up with exactly one cluster's worth of weight
        for j in 0..4 {
            assert_eq!(hg.block_weight(BlockId::new(j)), 3);
        }
    }

    #[test]
    fn k_equal_one_assigns_everything_to_block_zero() {
        let mut hg = four_clusters();
        let mut rng = Rng::from_seed(1);
        partition(&mut hg, 1, &config(), &HeavyEdgeRating, &mut rng).unwrap();
        for v in 0..12 {
            assert_eq!(hg.vertex_block(vid(v)), BlockId::new(0));
        }
    }
}
