//! 2-way FM refinement (spec.md §4.3): a thin entry point over the shared
//! pass skeleton in the parent module, specialized to the bisection case.

use crate::gain_cache::GainCache;
use crate::hypergraph::Hypergraph;
use crate::ids::Weight;

use super::refine_to_fixed_point;

/// Runs 2-way FM local search to a fixed point. `hg` must have exactly two
/// blocks; enforced with an assertion since a bisection driver calling
/// this on anything else is a programming error, not a runtime input
/// condition.
pub fn refine(hg: &mut Hypergraph, max_block_weight: Weight, max_passes: usize) -> Weight {
    assert_eq!(hg.num_blocks(), 2, "twoway::refine requires a 2-way hypergraph");
    let mut gain_cache = GainCache::build(hg);
    refine_to_fixed_point(hg, &mut gain_cache, max_block_weight, max_passes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hypergraph::NullObserver;
    use crate::ids::{BlockId, VertexId};

    fn vid(i: usize) -> VertexId {
        VertexId::new(i)
    }

    #[test]
    fn fixes_an_obviously_bad_bisection() {
        // Two disjoint triangles; if split down the middle the cut is avoidable.
        let mut hg = Hypergraph::new(
            vec![1; 6],
            vec![
                (1, vec![vid(0), vid(1), vid(2)]),
                (1, vec![vid(3), vid(4), vid(5)]),
            ],
            2,
        );
        let mut obs = NullObserver;
        // Deliberately bad: split each triangle across both blocks.
        hg.set_node_part(vid(0), BlockId::new(0), &mut obs).unwrap();
        hg.set_node_part(vid(1), BlockId::new(0), &mut obs).unwrap();
        hg.set_node_part(vid(2), BlockId::new(1), &mut obs).unwrap();
        hg.set_node_part(vid(3), BlockId::new(1), &mut obs).unwrap();
        hg.set_node_part(vid(4), BlockId::new(1), &mut obs).unwrap();
        hg.set_node_part(vid(5), BlockId::new(0), &mut obs).unwrap();

        let before = crate::objective::cut(&hg);
        refine(&mut hg, 10, 10);
        let after = crate::objective::cut(&hg);
        assert!(after <= before);
        assert_eq!(after, 0, "both triangles should end up fully internal");
    }
}
