//! The multilevel driver (spec.md §4.5): coarsen, initial-partition the
//! coarsest hypergraph, then uncoarsen one coarsening pass at a time,
//! running local search after each step back up.

use crate::coarsening::rating::RatingFunction;
use crate::coarsening::{coarsen, CoarseningConfig};
use crate::error::{HypartError, Result};
use crate::gain_cache::GainCache;
use crate::hypergraph::{Hypergraph, UndoOutcome};
use crate::ids::{BlockId, VertexId, Weight};
use crate::initial_partitioning::initial_partition;
use crate::objective::Objective;
use crate::refinement::refine_seeded_to_fixed_point;
use crate::rng::Rng;

pub struct MultilevelConfig {
    pub coarsening: CoarseningConfig,
    pub nruns_initial_partitioning: usize,
    pub objective: Objective,
    pub max_fm_passes: usize,
    pub epsilon: f64,
}

/// `ceil((1 + epsilon) * W(V) / k)`, the per-block weight bound every
/// accepted partition must respect (spec.md §4.2, §4.4).
pub fn max_block_weight(total_weight: Weight, num_blocks: usize, epsilon: f64) -> Weight {
    ((1.0 + epsilon) * total_weight as f64 / num_blocks as f64).ceil() as Weight
}

/// Runs the full multilevel pipeline in place on `hg`, leaving every active
/// vertex assigned to a block in `0..num_blocks`.
pub fn partition(
    hg: &mut Hypergraph,
    num_blocks: usize,
    config: &MultilevelConfig,
    rating_fn: &dyn RatingFunction,
    rng: &mut Rng,
) -> Result<()> {
    if num_blocks == 0 {
        return Err(HypartError::config_invalid("num_blocks must be at least 1"));
    }
    let max_weight = max_block_weight(hg.total_weight(), num_blocks, config.epsilon);
    if max_weight * num_blocks as Weight < hg.total_weight() {
        return Err(HypartError::Infeasible {
            k: num_blocks,
            epsilon: config.epsilon,
            reason: format!(
                "no assignment of {num_blocks} blocks with per-block weight <= {max_weight} can hold total weight {}",
                hg.total_weight()
            ),
        });
    }

    let coarsening_result = coarsen(hg, rating_fn, &config.coarsening, rng);
    tracing::info!(
        num_vertices = hg.num_vertices(),
        num_levels = coarsening_result.level_boundaries.len(),
        "coarsening finished"
    );

    initial_partition(
        hg,
        num_blocks,
        max_weight,
        config.nruns_initial_partitioning,
        config.objective,
        rng,
    );
    tracing::info!(
        objective = crate::objective::evaluate(hg, config.objective),
        "initial partition computed"
    );

    // One gain cache lives for the whole uncoarsening walk: each level only
    // seeds the PQ with the vertices that level's uncontractions touched
    // (spec.md §4.5 step 3), so the cache is kept incrementally correct by
    // `set_node_part`/`change_node_part` rather than rebuilt per level —
    // rebuilding from scratch at every level would be an O(pin-degree) scan
    // per level, defeating the near-linear total cost spec.md §1 names as a
    // design requirement for the multilevel scheme.
    let mut gain_cache = GainCache::build(hg);

    let boundaries = &coarsening_result.level_boundaries;
    for i in (0..boundaries.len()).rev() {
        let lower = if i == 0 { 0 } else { boundaries[i - 1] };
        let mut seeds: Vec<VertexId> = Vec::new();
        while hg.history_len() > lower {
            match hg
                .undo_last()
                .map_err(|e| HypartError::state_invariant(e.to_string()))?
            {
                UndoOutcome::Contraction { u, v } => {
                    let block = hg.vertex_block(u);
                    if block.is_valid() {
                        inherit_block(hg, v, block, &mut gain_cache)?;
                    }
                    seeds.push(u);
                    seeds.push(v);
                }
                UndoOutcome::ParallelMerge => {}
            }
        }
        let before = crate::objective::evaluate(hg, config.objective);
        refine_seeded_to_fixed_point(hg, &mut gain_cache, max_weight, config.max_fm_passes, &seeds);
        let after = crate::objective::evaluate(hg, config.objective);
        tracing::info!(
            level = i,
            num_vertices = hg.num_vertices(),
            seeds = seeds.len(),
            objective_before = before,
            objective_after = after,
            "level refined"
        );
    }

    Ok(())
}

/// Assigns the just-reactivated vertex `v` to the block it contracted into
/// (`u`'s block), keeping `gain_cache` incrementally correct via
/// `set_node_part`'s observer hook, then filling in `v`'s own gain row —
/// `set_node_part` only patches other vertices' rows as `Φ` shifts, since
/// `v` had no prior row to patch from (spec.md §4.2 gain-cache note).
fn inherit_block(hg: &mut Hypergraph, v: VertexId, block: BlockId, gain_cache: &mut GainCache) -> Result<()> {
    hg.set_node_part(v, block, gain_cache)
        .map_err(|e| HypartError::state_invariant(e.to_string()))?;
    gain_cache.finish_move(hg, v);
    Ok(())
}
