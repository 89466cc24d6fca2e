//! Initial partitioning of the coarsest hypergraph (spec.md §4.2: "Produces
//! a first feasible-or-near-feasible partition of the coarsest
//! hypergraph.").
//!
//! Grounded on the best-of-`nruns` contract described in
//! `original_source/kahypar/partition/initial_partitioning/i_initial_partitioner.h`:
//! run several independent attempts and keep whichever scored lowest on the
//! configured objective, rather than committing to the first one found.

use crate::hypergraph::{Hypergraph, NullObserver};
use crate::ids::{BlockId, VertexId, Weight};
use crate::objective::{self, Objective};
use crate::rng::Rng;

/// Greedily assigns each vertex (visited in a random order) to whichever
/// block currently has the least weight among those that would stay under
/// `max_block_weight`, falling back to the globally lightest block if none
/// qualifies (refinement is responsible for correcting any resulting
/// imbalance — spec.md §4.4's balance-constrained move filter).
fn greedy_assignment(
    hg: &Hypergraph,
    num_blocks: usize,
    max_block_weight: Weight,
    rng: &mut Rng,
) -> Vec<(VertexId, BlockId)> {
    let mut order: Vec<VertexId> = hg.all_active_vertices().collect();
    rng.shuffle(&mut order);

    let mut block_weights = vec![0 as Weight; num_blocks];
    let mut assignment = Vec::with_capacity(order.len());

    for v in order {
        let w = hg.vertex_weight(v);
        let target = (0..num_blocks)
            .filter(|&j| block_weights[j] + w <= max_block_weight)
            .min_by_key(|&j| block_weights[j])
            .unwrap_or_else(|| {
                (0..num_blocks)
                    .min_by_key(|&j| block_weights[j])
                    .expect("num_blocks must be > 0")
            });
        block_weights[target] += w;
        assignment.push((v, BlockId::new(target)));
    }
    assignment
}

/// Runs `nruns` independent greedy attempts on throwaway clones of `hg` and
/// applies whichever scored best on `objective` to `hg` itself.
pub fn initial_partition(
    hg: &mut Hypergraph,
    num_blocks: usize,
    max_block_weight: Weight,
    nruns: usize,
    objective: Objective,
    rng: &mut Rng,
) {
    assert!(nruns >= 1, "initial partitioning requires at least one attempt");

    let mut best: Option<(Vec<(VertexId, BlockId)>, Weight)> = None;
    for _ in 0..nruns {
        let assignment = greedy_assignment(hg, num_blocks, max_block_weight, rng);
        let mut trial = hg.clone();
        let mut obs = NullObserver;
        for &(v, j) in &assignment {
            trial
                .set_node_part(v, j, &mut obs)
                .expect("greedy_assignment assigns every active vertex exactly once");
        }
        let score = objective::evaluate(&trial, objective);
        best = Some(match best {
            None => (assignment, score),
            Some((best_assignment, best_score)) if score < best_score => (assignment, score),
            Some(kept) => kept,
        });
    }

    let (assignment, _) = best.expect("nruns >= 1 guarantees at least one attempt");
    let mut obs = NullObserver;
    for (v, j) in assignment {
        hg.set_node_part(v, j, &mut obs)
            .expect("the winning attempt's assignment applies cleanly to the same hypergraph state");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vid(i: usize) -> VertexId {
        VertexId::new(i)
    }

    #[test]
    fn every_vertex_ends_up_assigned() {
        let mut hg = Hypergraph::new(
            vec![1, 1, 1, 1, 1, 1],
            vec![
                (1, vec![vid(0), vid(1), vid(2)]),
                (1, vec![vid(3), vid(4), vid(5)]),
            ],
            2,
        );
        let mut rng = Rng::from_seed(3);
        initial_partition(&mut hg, 2, 4, 3, Objective::Cut, &mut rng);
        for v in 0..6 {
            assert!(hg.vertex_block(vid(v)).is_valid());
        }
    }

    #[test]
    fn respects_max_block_weight_when_feasible() {
        let mut hg = Hypergraph::new(vec![1; 8], vec![(1, vec![vid(0), vid(1)])], 4);
        let mut rng = Rng::from_seed(9);
        initial_partition(&mut hg, 4, 2, 5, Objective::Km1, &mut rng);
        for j in 0..4 {
            assert!(hg.block_weight(BlockId::new(j)) <= 2);
        }
    }
}
