//! Undo records for `Hypergraph::contract`/`uncontract` and for the parallel
//! hyperedge compaction pass (spec.md §4.1: "Returns a `Memento` recording…",
//! and "one edge is disabled with memento info for restoration").

use crate::ids::{HyperedgeId, VertexId, Weight};

/// `e` contained both `u` and `v` before the contraction: `v` was removed
/// from `pins(e)` at `pin_pos`.
#[derive(Debug, Clone, Copy)]
pub struct BothCaseRecord {
    pub edge: HyperedgeId,
    pub pin_pos: usize,
}

/// `e` contained only `v`: `v`'s slot in `pins(e)` was rewritten to `u` in
/// place (`pin_pos` unchanged by the rewrite, so nothing to record there
/// beyond the edge id for bookkeeping), and `e` was appended to `u`'s
/// incidence list at `appended_at`.
#[derive(Debug, Clone, Copy)]
pub struct ReplacedCaseRecord {
    pub edge: HyperedgeId,
    pub pin_pos: usize,
    pub appended_at: usize,
}

/// Everything needed to exactly reverse one `contract(u, v)` call
/// (spec.md §4.1).
#[derive(Debug, Clone)]
pub struct Memento {
    pub u: VertexId,
    pub v: VertexId,
    pub original_weight_u: Weight,
    pub both_case: Vec<BothCaseRecord>,
    pub replaced_case: Vec<ReplacedCaseRecord>,
}

/// Undo record for one lazily-detected parallel-hyperedge merge
/// (spec.md §4.1: "weights are combined and one edge is disabled").
#[derive(Debug, Clone)]
pub struct ParallelMergeMemento {
    pub kept: HyperedgeId,
    pub removed: HyperedgeId,
    pub removed_weight: Weight,
    /// `(vertex, position)` pairs recording where `removed` sat in each of
    /// its pins' incidence lists, in the order they were removed — restored
    /// in reverse so a vertex incident to `removed` more than once (pin
    /// multiplicity is allowed, spec.md §3) comes back in the right slots.
    pub incidence_records: Vec<(VertexId, usize)>,
}

/// One entry of the contraction history stack (spec.md §3: "A contraction
/// history stack recording undo information for each performed
/// contraction."). Parallel-hyperedge merges share the same LIFO stack
/// because they are, from the uncontraction machinery's point of view,
/// just another reversible structural edit.
#[derive(Debug, Clone)]
pub enum HistoryEntry {
    Contraction(Memento),
    ParallelMerge(ParallelMergeMemento),
}
