//! k-way FM refinement (spec.md §4.3): the same pass skeleton as
//! [`super::twoway`], but a vertex may move to any of the other `k - 1`
//! blocks rather than just the one alternative. The gain cache already
//! tracks a full per-block gain row, so no extra machinery is needed here
//! beyond not asserting `k == 2`.

use crate::gain_cache::GainCache;
use crate::hypergraph::Hypergraph;
use crate::ids::Weight;

use super::refine_to_fixed_point;

pub fn refine(hg: &mut Hypergraph, max_block_weight: Weight, max_passes: usize) -> Weight {
    assert!(hg.num_blocks() >= 2, "kway::refine requires at least two blocks");
    let mut gain_cache = GainCache::build(hg);
    refine_to_fixed_point(hg, &mut gain_cache, max_block_weight, max_passes)
}
