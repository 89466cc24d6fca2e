//! The hypergraph data structure (spec.md §3, §4.1).
//!
//! A `Hypergraph` tracks, for every active hyperedge `e` and block `i`, the
//! pin count `Φ(e,i)` and connectivity `λ(e) = |{i : Φ(e,i) > 0}|`
//! incrementally as vertices move between blocks, rather than recomputing
//! them from scratch. Contraction and uncontraction are exact inverses of
//! each other (proved for the underlying list type in
//! [`dynamic_list`]); this is what lets the multilevel driver coarsen,
//! partition, and then walk back up through every level with a working
//! partition at each one.

pub mod components;
pub mod dynamic_list;
pub mod fingerprint;
pub mod memento;

use dynamic_list::DynamicList;
use memento::{BothCaseRecord, HistoryEntry, Memento, ParallelMergeMemento, ReplacedCaseRecord};
use thiserror::Error;

use crate::ids::{BlockId, HyperedgeId, VertexId, Weight};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HypergraphOpError {
    #[error("vertex {0} is already assigned to a block")]
    AlreadyAssigned(VertexId),
    #[error("vertex {vertex} is not in block {expected} (actual {actual})")]
    WrongSource {
        vertex: VertexId,
        expected: BlockId,
        actual: BlockId,
    },
    #[error("vertex {0} is not active")]
    NotActive(VertexId),
    #[error("hyperedge {0} is not active")]
    EdgeNotActive(HyperedgeId),
    #[error("cannot contract a vertex into itself ({0})")]
    SelfContraction(VertexId),
    #[error(
        "contract requires both vertices unassigned or in the same block (u={u_block}, v={v_block})"
    )]
    BlockMismatch { u_block: BlockId, v_block: BlockId },
    #[error("uncontract/undo_merge called but the memento is not the top of the history stack")]
    NotTopOfHistory,
}

pub type OpResult<T> = std::result::Result<T, HypergraphOpError>;

/// What `Hypergraph::undo_last` just reversed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UndoOutcome {
    Contraction { u: VertexId, v: VertexId },
    ParallelMerge,
}

/// Receives incremental `Φ(e,i)` deltas as vertices move between blocks, so
/// the refiner's gain cache (spec.md §4.3) never has to rescan a hyperedge
/// to stay current. Passed explicitly into the mutating calls rather than
/// stored on the hypergraph — see DESIGN.md for why.
pub trait MoveObserver {
    /// `hg` reflects the state *after* this edge's `Φ` counts have already
    /// been updated; `old_count_from`/`old_count_to` are what they were
    /// just before. Called once per hyperedge incident to the moved vertex.
    #[allow(clippy::too_many_arguments)]
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
    );
}

/// A `MoveObserver` that does nothing, for callers that do not maintain a
/// gain cache (initial partitioning, tests, offline objective recomputation).
pub struct NullObserver;

impl MoveObserver for NullObserver {
    fn on_pin_count_changed(
        &mut self,
        _hg: &Hypergraph,
        _edge: HyperedgeId,
        _edge_weight: Weight,
        _moved_vertex: VertexId,
        _from: BlockId,
        _to: BlockId,
        _old_count_from: u32,
        _new_count_from: u32,
        _old_count_to: u32,
        _new_count_to: u32,
    ) {
    }
}

#[derive(Clone, Debug)]
struct VertexRecord {
    weight: Weight,
    block: BlockId,
    active: bool,
    incidence: DynamicList<HyperedgeId>,
}

#[derive(Clone, Debug)]
struct HyperedgeRecord {
    weight: Weight,
    active: bool,
    pins: DynamicList<VertexId>,
    pin_counts: Vec<u32>,
    connectivity_set: Vec<BlockId>,
}

impl HyperedgeRecord {
    fn connectivity(&self) -> usize {
        self.connectivity_set.len()
    }
}

#[derive(Clone, Debug)]
pub struct Hypergraph {
    num_blocks: usize,
    vertices: Vec<VertexRecord>,
    hyperedges: Vec<HyperedgeRecord>,
    block_weights: Vec<Weight>,
    total_weight: Weight,
    history: Vec<HistoryEntry>,
}

impl Hypergraph {
    /// Builds a hypergraph with `num_blocks` blocks from a vertex-weight
    /// list and a list of (weight, pins) hyperedges. All vertices start
    /// unassigned (`BlockId::INVALID`).
    pub fn new(
        vertex_weights: Vec<Weight>,
        hyperedges: Vec<(Weight, Vec<VertexId>)>,
        num_blocks: usize,
    ) -> Self {
        let total_weight = vertex_weights.iter().sum();
        let mut vertices: Vec<VertexRecord> = vertex_weights
            .into_iter()
            .map(|weight| VertexRecord {
                weight,
                block: BlockId::INVALID,
                active: true,
                incidence: DynamicList::new(),
            })
            .collect();

        let mut records = Vec::with_capacity(hyperedges.len());
        for (edge_index, (weight, pins)) in hyperedges.into_iter().enumerate() {
            let edge_id = HyperedgeId::new(edge_index);
            for &v in &pins {
                vertices[v.index()].incidence.push_active(edge_id);
            }
            records.push(HyperedgeRecord {
                weight,
                active: true,
                pins: DynamicList::from_active(pins),
                pin_counts: vec![0; num_blocks],
                connectivity_set: Vec::new(),
            });
        }

        Hypergraph {
            num_blocks,
            vertices,
            hyperedges: records,
            block_weights: vec![0; num_blocks],
            total_weight,
            history: Vec::new(),
        }
    }

    pub fn num_blocks(&self) -> usize {
        self.num_blocks
    }

    pub fn num_vertices(&self) -> usize {
        self.vertices.iter().filter(|v| v.active).count()
    }

    pub fn num_hyperedges(&self) -> usize {
        self.hyperedges.iter().filter(|e| e.active).count()
    }

    /// `W(V)`: total weight of the original, unmerged vertex set. Constant
    /// across contraction because contracted weight always moves from one
    /// active vertex to another, never vanishes (spec.md §3).
    pub fn total_weight(&self) -> Weight {
        self.total_weight
    }

    pub fn block_weight(&self, block: BlockId) -> Weight {
        self.block_weights[block.index()]
    }

    pub fn vertex_weight(&self, v: VertexId) -> Weight {
        self.vertices[v.index()].weight
    }

    pub fn vertex_block(&self, v: VertexId) -> BlockId {
        self.vertices[v.index()].block
    }

    pub fn is_vertex_active(&self, v: VertexId) -> bool {
        self.vertices[v.index()].active
    }

    pub fn edge_weight(&self, e: HyperedgeId) -> Weight {
        self.hyperedges[e.index()].weight
    }

    pub fn is_edge_active(&self, e: HyperedgeId) -> bool {
        self.hyperedges[e.index()].active
    }

    pub fn pins(&self, e: HyperedgeId) -> &[VertexId] {
        self.hyperedges[e.index()].pins.active()
    }

    pub fn incident_edges(&self, v: VertexId) -> &[HyperedgeId] {
        self.vertices[v.index()].incidence.active()
    }

    pub fn pin_count(&self, e: HyperedgeId, block: BlockId) -> u32 {
        self.hyperedges[e.index()].pin_counts[block.index()]
    }

    pub fn connectivity(&self, e: HyperedgeId) -> usize {
        self.hyperedges[e.index()].connectivity()
    }

    pub fn connectivity_set(&self, e: HyperedgeId) -> &[BlockId] {
        &self.hyperedges[e.index()].connectivity_set
    }

    pub fn all_active_vertices(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.vertices
            .iter()
            .enumerate()
            .filter(|(_, v)| v.active)
            .map(|(i, _)| VertexId::new(i))
    }

    pub fn all_active_edges(&self) -> impl Iterator<Item = HyperedgeId> + '_ {
        self.hyperedges
            .iter()
            .enumerate()
            .filter(|(_, e)| e.active)
            .map(|(i, _)| HyperedgeId::new(i))
    }

    fn adjust_pin_count(&mut self, e: HyperedgeId, block: BlockId, delta: i64) -> (u32, u32) {
        let record = &mut self.hyperedges[e.index()];
        let old = record.pin_counts[block.index()];
        let new = (old as i64 + delta) as u32;
        record.pin_counts[block.index()] = new;
        if old == 0 && new > 0 {
            record.connectivity_set.push(block);
        } else if old > 0 && new == 0 {
            record.connectivity_set.retain(|&b| b != block);
        }
        (old, new)
    }

    /// Assigns `v` to block `j` for the first time (spec.md §4.1:
    /// "Fails with `AlreadyAssigned`").
    pub fn set_node_part(
        &mut self,
        v: VertexId,
        j: BlockId,
        observer: &mut impl MoveObserver,
    ) -> OpResult<()> {
        let current = self.vertices[v.index()].block;
        if current.is_valid() {
            return Err(HypergraphOpError::AlreadyAssigned(v));
        }
        let weight = self.vertices[v.index()].weight;
        self.vertices[v.index()].block = j;
        self.block_weights[j.index()] += weight;

        let edges = self.vertices[v.index()].incidence.active().to_vec();
        for e in edges {
            if !self.hyperedges[e.index()].active {
                continue;
            }
            let edge_weight = self.hyperedges[e.index()].weight;
            let (old_to, new_to) = self.adjust_pin_count(e, j, 1);
            observer.on_pin_count_changed(
                &*self,
                e,
                edge_weight,
                v,
                BlockId::INVALID,
                j,
                0,
                0,
                old_to,
                new_to,
            );
        }
        Ok(())
    }

    /// Moves `v` from block `from` to block `to` (spec.md §4.1: "Fails with
    /// `WrongSource` if `b(v) != from`.").
    pub fn change_node_part(
        &mut self,
        v: VertexId,
        from: BlockId,
        to: BlockId,
        observer: &mut impl MoveObserver,
    ) -> OpResult<()> {
        let current = self.vertices[v.index()].block;
        if !self.vertices[v.index()].active {
            return Err(HypergraphOpError::NotActive(v));
        }
        if current != from {
            return Err(HypergraphOpError::WrongSource {
                vertex: v,
                expected: from,
                actual: current,
            });
        }

        let weight = self.vertices[v.index()].weight;
        self.vertices[v.index()].block = to;
        self.block_weights[from.index()] -= weight;
        self.block_weights[to.index()] += weight;

        let edges = self.vertices[v.index()].incidence.active().to_vec();
        for e in edges {
            if !self.hyperedges[e.index()].active {
                continue;
            }
            let edge_weight = self.hyperedges[e.index()].weight;
            let (old_from, new_from) = self.adjust_pin_count(e, from, -1);
            let (old_to, new_to) = self.adjust_pin_count(e, to, 1);
            observer.on_pin_count_changed(
                &*self, e, edge_weight, v, from, to, old_from, new_from, old_to, new_to,
            );
        }
        Ok(())
    }

    /// Merges `v` into `u`: `w(u) += w(v)`, every hyperedge incident to `v`
    /// is rewritten to refer to `u` instead, and `v` is marked inactive
    /// (spec.md §4.1). Both vertices must currently be unassigned or share a
    /// block. Returns a [`Memento`] that exactly reverses the operation.
    pub fn contract(&mut self, u: VertexId, v: VertexId) -> OpResult<Memento> {
        if u == v {
            return Err(HypergraphOpError::SelfContraction(u));
        }
        if !self.vertices[u.index()].active || !self.vertices[v.index()].active {
            return Err(HypergraphOpError::NotActive(if !self.vertices[u.index()].active {
                u
            } else {
                v
            }));
        }
        let u_block = self.vertices[u.index()].block;
        let v_block = self.vertices[v.index()].block;
        if u_block.is_valid() != v_block.is_valid() || (u_block.is_valid() && u_block != v_block) {
            return Err(HypergraphOpError::BlockMismatch { u_block, v_block });
        }

        let original_weight_u = self.vertices[u.index()].weight;
        self.vertices[u.index()].weight += self.vertices[v.index()].weight;

        let v_edges = self.vertices[v.index()].incidence.active().to_vec();
        let mut both_case = Vec::new();
        let mut replaced_case = Vec::new();

        for e in v_edges {
            let edge_has_u = self.hyperedges[e.index()].pins.position(u).is_some();
            if edge_has_u {
                let pin_pos = self.hyperedges[e.index()].pins.position(v).expect(
                    "v must still be a pin of every edge in its own incidence list",
                );
                self.hyperedges[e.index()].pins.swap_remove_active(pin_pos);
                if u_block.is_valid() {
                    self.adjust_pin_count(e, u_block, -1);
                }
                both_case.push(BothCaseRecord { edge: e, pin_pos });
            } else {
                let pin_pos = self.hyperedges[e.index()].pins.position(v).expect(
                    "v must still be a pin of every edge in its own incidence list",
                );
                self.hyperedges[e.index()].pins.replace_active(pin_pos, u);
                let appended_at = self.vertices[u.index()].incidence.push_active(e);
                replaced_case.push(ReplacedCaseRecord {
                    edge: e,
                    pin_pos,
                    appended_at,
                });
            }
        }

        self.vertices[v.index()].active = false;

        Ok(Memento {
            u,
            v,
            original_weight_u,
            both_case,
            replaced_case,
        })
    }

    /// Reverses the most recent `contract` call. The caller is responsible
    /// for LIFO discipline (spec.md §3); violating it is a programming
    /// error, surfaced here as `NotTopOfHistory` only when a `history` stack
    /// is in use via [`Hypergraph::contract_tracked`]/[`Hypergraph::uncontract_tracked`].
    pub fn uncontract(&mut self, memento: &Memento) {
        let Memento {
            u,
            v,
            original_weight_u,
            both_case,
            replaced_case,
        } = memento;
        let u = *u;
        let v = *v;

        for record in replaced_case.iter().rev() {
            self.vertices[u.index()]
                .incidence
                .swap_remove_active(record.appended_at);
            self.hyperedges[record.edge.index()]
                .pins
                .replace_active(record.pin_pos, v);
        }

        for record in both_case.iter().rev() {
            self.hyperedges[record.edge.index()]
                .pins
                .restore_active(record.pin_pos);
            let block = self.vertices[v.index()].block;
            if block.is_valid() {
                self.adjust_pin_count(record.edge, block, 1);
            }
        }

        self.vertices[u.index()].weight = *original_weight_u;
        self.vertices[v.index()].active = true;
    }

    /// Contracts and pushes the memento onto the internal history stack,
    /// for callers (the coarsener) that want the hypergraph itself to own
    /// LIFO discipline rather than threading mementos through their own
    /// call stack.
    pub fn contract_tracked(&mut self, u: VertexId, v: VertexId) -> OpResult<()> {
        let memento = self.contract(u, v)?;
        self.history.push(HistoryEntry::Contraction(memento));
        Ok(())
    }

    /// Pops and reverses the top entry of the internal history stack
    /// (contraction or parallel merge), whichever it is. The `Contraction`
    /// case reports `(u, v)` so the multilevel driver can give the
    /// reactivated `v` the same block `u` currently holds — `uncontract`
    /// itself is partition-agnostic and leaves `v`'s block exactly as it
    /// was before the contraction (spec.md §4.5: "the uncontracted vertex
    /// inherits its representative's current block").
    pub fn undo_last(&mut self) -> OpResult<UndoOutcome> {
        match self.history.pop() {
            Some(HistoryEntry::Contraction(memento)) => {
                let (u, v) = (memento.u, memento.v);
                self.uncontract(&memento);
                Ok(UndoOutcome::Contraction { u, v })
            }
            Some(HistoryEntry::ParallelMerge(merge)) => {
                self.undo_parallel_merge(&merge);
                Ok(UndoOutcome::ParallelMerge)
            }
            None => Err(HypergraphOpError::NotTopOfHistory),
        }
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Merges `removed` into `kept` (spec.md §4.1: parallel hyperedge
    /// detection merges equal-pin-set edges, summing weights and disabling
    /// the redundant one). `removed` is taken out of every one of its
    /// pins' incidence lists so it is invisible to future contractions.
    pub fn merge_parallel_hyperedge(
        &mut self,
        kept: HyperedgeId,
        removed: HyperedgeId,
    ) -> OpResult<ParallelMergeMemento> {
        if !self.hyperedges[kept.index()].active || !self.hyperedges[removed.index()].active {
            return Err(HypergraphOpError::EdgeNotActive(
                if !self.hyperedges[kept.index()].active {
                    kept
                } else {
                    removed
                },
            ));
        }
        let removed_weight = self.hyperedges[removed.index()].weight;
        self.hyperedges[kept.index()].weight += removed_weight;

        let pins = self.hyperedges[removed.index()].pins.active().to_vec();
        let mut incidence_records = Vec::with_capacity(pins.len());
        for vertex in pins {
            let pos = self.vertices[vertex.index()]
                .incidence
                .position(removed)
                .expect("removed edge must be in every one of its pins' incidence lists");
            self.vertices[vertex.index()].incidence.swap_remove_active(pos);
            incidence_records.push((vertex, pos));
        }
        self.hyperedges[removed.index()].active = false;

        let merge = ParallelMergeMemento {
            kept,
            removed,
            removed_weight,
            incidence_records,
        };
        self.history.push(HistoryEntry::ParallelMerge(merge.clone()));
        Ok(merge)
    }

    fn undo_parallel_merge(&mut self, merge: &ParallelMergeMemento) {
        self.hyperedges[merge.removed.index()].active = true;
        self.hyperedges[merge.kept.index()].weight -= merge.removed_weight;
        for &(vertex, pos) in merge.incidence_records.iter().rev() {
            self.vertices[vertex.index()]
                .incidence
                .restore_active(pos);
        }
    }

    /// Extracts the induced sub-hypergraph on the vertices currently
    /// assigned to `block`, renumbering vertices `0..`. Hyperedges whose
    /// restriction to this block would have fewer than two pins are
    /// dropped when `keep_singletons` is false; both the cut and km1
    /// objectives currently call this with `keep_singletons = false` (see
    /// DESIGN.md for why the distinction collapses). The new hypergraph has
    /// `new_num_blocks` blocks and all its vertices unassigned. Returns the
    /// extracted hypergraph plus a `new -> old` vertex id mapping
    /// (spec.md §4.1, §4.6).
    pub fn extract_block(
        &self,
        block: BlockId,
        keep_singletons: bool,
        new_num_blocks: usize,
    ) -> (Hypergraph, Vec<VertexId>) {
        let mut new_to_old = Vec::new();
        let mut old_to_new = vec![None; self.vertices.len()];
        for v in self.all_active_vertices() {
            if self.vertices[v.index()].block == block {
                old_to_new[v.index()] = Some(VertexId::new(new_to_old.len()));
                new_to_old.push(v);
            }
        }

        let vertex_weights: Vec<Weight> = new_to_old.iter().map(|&v| self.vertex_weight(v)).collect();

        let mut new_hyperedges = Vec::new();
        for e in self.all_active_edges() {
            let restricted: Vec<VertexId> = self
                .pins(e)
                .iter()
                .filter_map(|&v| old_to_new[v.index()])
                .collect();
            let keep = if keep_singletons {
                !restricted.is_empty()
            } else {
                restricted.len() >= 2
            };
            if keep {
                new_hyperedges.push((self.edge_weight(e), restricted));
            }
        }

        (
            Hypergraph::new(vertex_weights, new_hyperedges, new_num_blocks),
            new_to_old,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vid(i: usize) -> VertexId {
        VertexId::new(i)
    }

    fn sample() -> Hypergraph {
        // vertices 0,1,2,3 ; edges: {0,1,2} w=1, {1,2,3} w=1, {0,3} w=2
        Hypergraph::new(
            vec![1, 1, 1, 1],
            vec![
                (1, vec![vid(0), vid(1), vid(2)]),
                (1, vec![vid(1), vid(2), vid(3)]),
                (2, vec![vid(0), vid(3)]),
            ],
            2,
        )
    }

    #[test]
    fn contract_then_uncontract_restores_exact_state() {
        let mut hg = sample();
        let before = format!("{hg:?}");
        let memento = hg.contract(vid(0), vid(2)).unwrap();

        assert!(!hg.is_vertex_active(vid(2)));
        assert_eq!(hg.vertex_weight(vid(0)), 2);

        hg.uncontract(&memento);
        assert!(hg.is_vertex_active(vid(2)));
        assert_eq!(hg.vertex_weight(vid(0)), 1);
        assert_eq!(format!("{hg:?}"), before);
    }

    #[test]
    fn pin_counts_track_moves_and_undo() {
        let mut hg = sample();
        let mut obs = NullObserver;
        hg.set_node_part(vid(0), BlockId::new(0), &mut obs).unwrap();
        hg.set_node_part(vid(1), BlockId::new(0), &mut obs).unwrap();
        hg.set_node_part(vid(2), BlockId::new(1), &mut obs).unwrap();
        hg.set_node_part(vid(3), BlockId::new(1), &mut obs).unwrap();

        let e0 = HyperedgeId::new(0); // {0,1,2}
        assert_eq!(hg.pin_count(e0, BlockId::new(0)), 2);
        assert_eq!(hg.pin_count(e0, BlockId::new(1)), 1);
        assert_eq!(hg.connectivity(e0), 2);

        hg.change_node_part(vid(2), BlockId::new(1), BlockId::new(0), &mut obs)
            .unwrap();
        assert_eq!(hg.pin_count(e0, BlockId::new(0)), 3);
        assert_eq!(hg.pin_count(e0, BlockId::new(1)), 0);
        assert_eq!(hg.connectivity(e0), 1);
    }

    #[test]
    fn set_node_part_rejects_double_assignment() {
        let mut hg = sample();
        let mut obs = NullObserver;
        hg.set_node_part(vid(0), BlockId::new(0), &mut obs).unwrap();
        let err = hg.set_node_part(vid(0), BlockId::new(1), &mut obs).unwrap_err();
        assert_eq!(err, HypergraphOpError::AlreadyAssigned(vid(0)));
    }

    #[test]
    fn extract_block_drops_singletons_and_renumbers() {
        let mut hg = sample();
        let mut obs = NullObserver;
        hg.set_node_part(vid(0), BlockId::new(0), &mut obs).unwrap();
        hg.set_node_part(vid(1), BlockId::new(0), &mut obs).unwrap();
        hg.set_node_part(vid(2), BlockId::new(1), &mut obs).unwrap();
        hg.set_node_part(vid(3), BlockId::new(1), &mut obs).unwrap();

        let (sub, mapping) = hg.extract_block(BlockId::new(0), false, 2);
        assert_eq!(sub.num_vertices(), 2);
        assert_eq!(mapping, vec![vid(0), vid(1)]);
        // edge {0,1,2} restricted to block 0 is {0,1}: kept.
        // edge {0,3} restricted to block 0 is {0}: dropped (singleton).
        assert_eq!(sub.num_hyperedges(), 1);
    }

    #[test]
    fn cut_and_km1_extraction_agree_on_mixed_input() {
        let mut hg = sample();
        let mut obs = NullObserver;
        hg.set_node_part(vid(0), BlockId::new(0), &mut obs).unwrap();
        hg.set_node_part(vid(1), BlockId::new(0), &mut obs).unwrap();
        hg.set_node_part(vid(2), BlockId::new(1), &mut obs).unwrap();
        hg.set_node_part(vid(3), BlockId::new(1), &mut obs).unwrap();

        let (cut_sub, cut_map) = hg.extract_block(BlockId::new(0), false, 2);
        let (km1_sub, km1_map) = hg.extract_block(BlockId::new(0), false, 2);
        assert_eq!(cut_map, km1_map);
        assert_eq!(cut_sub.num_hyperedges(), km1_sub.num_hyperedges());
        assert_eq!(cut_sub.num_vertices(), km1_sub.num_vertices());
    }

    #[test]
    fn parallel_merge_then_undo_restores_incidence() {
        let mut hg = Hypergraph::new(
            vec![1, 1, 1],
            vec![
                (1, vec![vid(0), vid(1)]),
                (1, vec![vid(0), vid(1)]), // parallel to edge 0
                (1, vec![vid(1), vid(2)]),
            ],
            2,
        );
        let before = format!("{hg:?}");
        let e0 = HyperedgeId::new(0);
        let e1 = HyperedgeId::new(1);
        hg.merge_parallel_hyperedge(e0, e1).unwrap();
        assert!(!hg.is_edge_active(e1));
        assert_eq!(hg.edge_weight(e0), 2);
        assert!(!hg.incident_edges(vid(0)).contains(&e1));

        hg.undo_last().unwrap();
        assert_eq!(format!("{hg:?}"), before);
    }
}
