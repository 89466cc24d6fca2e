//! Shared FM (Fiduccia–Mattheyses) local search skeleton (spec.md §4.3,
//! §4.4). One pass moves vertices in decreasing gain order, allows
//! temporarily negative cumulative gain (so the search can climb out of a
//! local optimum), and rolls back to whichever prefix of moves scored
//! best — the classic FM move-then-rollback structure. [`twoway`] and
//! [`kway`] both call [`run_pass`]; the only difference between them is how
//! many blocks a vertex may move to, which the shared gain cache already
//! handles generically (spec.md's design note: "one FM pass skeleton
//! shared by the 2-way and k-way refiners").

pub mod kway;
pub mod twoway;

use crate::bucket_queue::BucketQueue;
use crate::gain_cache::GainCache;
use crate::hypergraph::Hypergraph;
use crate::ids::{BlockId, VertexId, Weight};

/// Scans every block for the highest-gain move that would keep that
/// block's weight under `max_block_weight`. `O(k)`; called once per queue
/// insertion and once per pop (block weights can shift between the two).
fn best_feasible_target(
    hg: &Hypergraph,
    gain_cache: &GainCache,
    v: VertexId,
    max_block_weight: Weight,
) -> Option<(BlockId, Weight)> {
    let current = hg.vertex_block(v);
    let w = hg.vertex_weight(v);
    (0..hg.num_blocks())
        .filter(|&j| j != current.index())
        .map(BlockId::new)
        .filter(|&j| hg.block_weight(j) + w <= max_block_weight)
        .map(|j| (j, gain_cache.gain(v, j)))
        .max_by_key(|&(_, g)| g)
}

/// Runs one FM pass over every currently-assigned active vertex, applying
/// moves greedily by gain and rolling back to the best-scoring prefix.
/// Returns the net objective improvement actually kept (non-negative,
/// since a pass that finds nothing better than the empty prefix rolls back
/// everything).
pub fn run_pass(hg: &mut Hypergraph, gain_cache: &mut GainCache, max_block_weight: Weight) -> Weight {
    let seeds: Vec<VertexId> = hg.all_active_vertices().collect();
    run_pass_seeded(hg, gain_cache, max_block_weight, &seeds)
}

/// Like [`run_pass`], but the priority queue is seeded only with `seeds`
/// rather than every active vertex (spec.md §4.5 step 3: uncoarsening runs
/// the refiner "with the two affected vertices seeded onto the PQ", so the
/// per-level cost tracks the handful of vertices an uncontraction touches
/// rather than the whole graph). Neighbors of a moved vertex are still
/// pulled into the queue as the pass cascades, exactly as in [`run_pass`] —
/// only the *starting* candidate set differs.
pub fn run_pass_seeded(
    hg: &mut Hypergraph,
    gain_cache: &mut GainCache,
    max_block_weight: Weight,
    seeds: &[VertexId],
) -> Weight {
    let candidates: Vec<VertexId> = seeds
        .iter()
        .copied()
        .filter(|&v| hg.vertex_block(v).is_valid())
        .collect();
    if candidates.is_empty() {
        return 0;
    }

    let max_gain: Weight = hg.all_active_edges().map(|e| hg.edge_weight(e)).sum::<Weight>().max(1);
    let mut queue = BucketQueue::new(max_gain, candidates.len());
    for &v in &candidates {
        if let Some((_, g)) = best_feasible_target(hg, gain_cache, v, max_block_weight) {
            queue.insert(v, g);
        }
    }

    let mut moves: Vec<(VertexId, BlockId, BlockId)> = Vec::new();
    let mut cumulative: Weight = 0;
    let mut best_cumulative: Weight = 0;
    let mut best_len: usize = 0;
    let mut locked = std::collections::HashSet::new();

    while let Some((v, _)) = queue.extract_max() {
        if locked.contains(&v) {
            continue;
        }
        let from = hg.vertex_block(v);
        let Some((to, gain)) = best_feasible_target(hg, gain_cache, v, max_block_weight) else {
            continue;
        };

        hg.change_node_part(v, from, to, gain_cache)
            .expect("v is active and currently in `from`, checked by best_feasible_target's caller invariants");
        gain_cache.finish_move(hg, v);
        locked.insert(v);
        moves.push((v, from, to));
        cumulative += gain;
        if cumulative > best_cumulative {
            best_cumulative = cumulative;
            best_len = moves.len();
        }

        for &e in hg.incident_edges(v) {
            for &u in hg.pins(e) {
                if !locked.contains(&u) && hg.vertex_block(u).is_valid() {
                    if let Some((_, g)) = best_feasible_target(hg, gain_cache, u, max_block_weight) {
                        queue.update_gain(u, g);
                    } else {
                        queue.remove(u);
                    }
                }
            }
        }
    }

    for &(v, from, to) in moves[best_len..].iter().rev() {
        hg.change_node_part(v, to, from, gain_cache)
            .expect("undoing a move this same pass just made is always legal");
        gain_cache.finish_move(hg, v);
    }

    tracing::debug!(
        moves_made = moves.len(),
        moves_kept = best_len,
        gain = best_cumulative,
        "FM pass finished"
    );
    best_cumulative
}

/// Repeats [`run_pass`] until a pass fails to improve the objective or
/// `max_passes` is reached (spec.md §4.4: local search runs to a fixed
/// point or a pass budget).
pub fn refine_to_fixed_point(
    hg: &mut Hypergraph,
    gain_cache: &mut GainCache,
    max_block_weight: Weight,
    max_passes: usize,
) -> Weight {
    let mut total = 0;
    for _ in 0..max_passes {
        let gained = run_pass(hg, gain_cache, max_block_weight);
        total += gained;
        if gained <= 0 {
            break;
        }
    }
    total
}

/// Repeats [`run_pass_seeded`] with the same `seeds` until a pass fails to
/// improve the objective or `max_passes` is reached — the seeded analogue
/// of [`refine_to_fixed_point`], used by the multilevel driver so that
/// uncoarsening a level costs O(affected vertices), not O(n), per level
/// (spec.md §4.5 step 3).
pub fn refine_seeded_to_fixed_point(
    hg: &mut Hypergraph,
    gain_cache: &mut GainCache,
    max_block_weight: Weight,
    max_passes: usize,
    seeds: &[VertexId],
) -> Weight {
    let mut total = 0;
    for _ in 0..max_passes {
        let gained = run_pass_seeded(hg, gain_cache, max_block_weight, seeds);
        total += gained;
        if gained <= 0 {
            break;
        }
    }
    total
}
