//! Incremental gain cache (spec.md §4.3: "gains for every (active vertex,
//! candidate target block) pair, updated incrementally as moves are
//! applied rather than recomputed from scratch").
//!
//! `gain(v, j)` is the change in the partition's objective if `v` moved
//! from its current block to `j`:
//!
//! ```text
//! gain(v, j) = Σ_{e ∈ I(v)} w(e) * ( [Φ(e, b(v)) == 1] - [Φ(e, j) == 0] )
//! ```
//!
//! which is the standard FM cut-gain formula generalized to any block pair;
//! for `k == 2` it is exactly cut gain, and summed appropriately it is also
//! what drives km1 local search (spec.md §4.4), so one cache serves both
//! objectives. The cache implements [`MoveObserver`] and is kept current by
//! `Hypergraph::change_node_part`'s `Φ` deltas; the moved vertex's own row
//! is recomputed once per move via [`GainCache::finish_move`] since its
//! "from" block changed wholesale rather than incrementally.

use crate::hypergraph::{Hypergraph, MoveObserver};
use crate::ids::{BlockId, HyperedgeId, VertexId, Weight};

#[derive(Clone, Debug)]
pub struct GainCache {
    num_blocks: usize,
    gains: Vec<Vec<Weight>>,
}

impl GainCache {
    /// Computes gains from scratch for every active, assigned vertex.
    /// O(Σ pin-degree); called once before refinement starts and again by
    /// [`GainCache::finish_move`] for a single vertex after it moves.
    pub fn build(hg: &Hypergraph) -> Self {
        let num_blocks = hg.num_blocks();
        let n = hg
            .all_active_vertices()
            .map(|v| v.index())
            .max()
            .map(|m| m + 1)
            .unwrap_or(0);
        let mut gains = vec![vec![0; num_blocks]; n];
        for v in hg.all_active_vertices() {
            gains[v.index()] = Self::row_for(hg, v, num_blocks);
        }
        GainCache { num_blocks, gains }
    }

    fn row_for(hg: &Hypergraph, v: VertexId, num_blocks: usize) -> Vec<Weight> {
        let mut row = vec![0; num_blocks];
        let own_block = hg.vertex_block(v);
        if !own_block.is_valid() {
            return row;
        }
        for &e in hg.incident_edges(v) {
            let w = hg.edge_weight(e);
            let from_term = if hg.pin_count(e, own_block) == 1 { w } else { 0 };
            for (j, slot) in row.iter_mut().enumerate() {
                if j == own_block.index() {
                    continue;
                }
                let to_term = if hg.pin_count(e, BlockId::new(j)) == 0 { w } else { 0 };
                *slot += from_term - to_term;
            }
        }
        row
    }

    pub fn gain(&self, v: VertexId, j: BlockId) -> Weight {
        self.gains[v.index()][j.index()]
    }

    /// The highest-gain eligible target block for `v` (ties broken toward
    /// the lowest block id; the refiner applies its own tie-breaking policy
    /// and balance filtering on top of this).
    pub fn best_target(&self, v: VertexId, current: BlockId) -> Option<(BlockId, Weight)> {
        self.gains[v.index()]
            .iter()
            .enumerate()
            .filter(|&(j, _)| j != current.index())
            .map(|(j, &g)| (BlockId::new(j), g))
            .max_by_key(|&(_, g)| g)
    }

    /// Recomputes `v`'s entire gain row after it has moved (its own "from"
    /// block changed, which the per-edge incremental update in
    /// [`MoveObserver::on_pin_count_changed`] does not attempt to patch).
    pub fn finish_move(&mut self, hg: &Hypergraph, v: VertexId) {
        if v.index() >= self.gains.len() {
            self.gains.resize(v.index() + 1, vec![0; self.num_blocks]);
        }
        self.gains[v.index()] = Self::row_for(hg, v, self.num_blocks);
    }

    /// Applies the "from-term" delta for `block`'s count transition to
    /// every active pin of the edge currently sitting in `block` (excluding
    /// `exclude`, whose row is rebuilt wholesale by `finish_move` instead):
    /// `contrib_from` depends only on `Φ(e, b(v))`, so it shifts `gain(v,
    /// j)` uniformly across every `j != block`.
    fn apply_from_term_delta(
        &mut self,
        hg: &Hypergraph,
        pins: &[VertexId],
        block: BlockId,
        delta: Weight,
        exclude: VertexId,
    ) {
        if delta == 0 {
            return;
        }
        for &v in pins {
            if v == exclude || hg.vertex_block(v) != block {
                continue;
            }
            for j in 0..self.num_blocks {
                if j != block.index() {
                    self.gains[v.index()][j] += delta;
                }
            }
        }
    }

    /// Applies the "to-term" delta for `block`'s count transition to every
    /// active pin of the edge not currently in `block`: `contrib_to(e,
    /// block)` affects `gain(v, block)` for any such `v`.
    fn apply_to_term_delta(
        &mut self,
        hg: &Hypergraph,
        pins: &[VertexId],
        block: BlockId,
        delta: Weight,
        exclude: VertexId,
    ) {
        if delta == 0 {
            return;
        }
        for &v in pins {
            if v == exclude || hg.vertex_block(v) == block {
                continue;
            }
            self.gains[v.index()][block.index()] -= delta;
        }
    }
}

impl MoveObserver for GainCache {
    fn on_pin_count_changed(
        &mut self,
        hg: &Hypergraph,
        edge: HyperedgeId,
        edge_weight: Weight,
        moved_vertex: VertexId,
        from: BlockId,
        to: BlockId,
        old_count_from: u32,
        new_count_from: u32,
        old_count_to: u32,
        new_count_to: u32,
    ) {
        let pins = hg.pins(edge).to_vec();

        if from.is_valid() {
            let from_delta = {
                let new_ind = if new_count_from == 1 { 1 } else { 0 };
                let old_ind = if old_count_from == 1 { 1 } else { 0 };
                (new_ind - old_ind) * edge_weight
            };
            self.apply_from_term_delta(hg, &pins, from, from_delta, moved_vertex);

            let to_term_delta_from = {
                let new_ind = if new_count_from == 0 { 1 } else { 0 };
                let old_ind = if old_count_from == 0 { 1 } else { 0 };
                (new_ind - old_ind) * edge_weight
            };
            self.apply_to_term_delta(hg, &pins, from, to_term_delta_from, moved_vertex);
        }

        let from_delta_to = {
            let new_ind = if new_count_to == 1 { 1 } else { 0 };
            let old_ind = if old_count_to == 1 { 1 } else { 0 };
            (new_ind - old_ind) * edge_weight
        };
        self.apply_from_term_delta(hg, &pins, to, from_delta_to, moved_vertex);

        let to_term_delta_to = {
            let new_ind = if new_count_to == 0 { 1 } else { 0 };
            let old_ind = if old_count_to == 0 { 1 } else { 0 };
            (new_ind - old_ind) * edge_weight
        };
        self.apply_to_term_delta(hg, &pins, to, to_term_delta_to, moved_vertex);
    }
}
