//! Parallel hyperedge detection (spec.md §4.1: "Parallel hyperedges (equal
//! pin sets, possibly after a contraction) are detected lazily... weights
//! are combined and one edge is disabled.").
//!
//! Computing a 64-bit order-independent fingerprint of each edge's pin set
//! lets us group candidates by fingerprint in one rayon-parallel pass
//! instead of comparing every pair of edges; only edges that collide still
//! need an exact pin-set comparison before being merged.

use std::collections::HashMap;

use rayon::prelude::*;

use super::Hypergraph;
use crate::ids::{HyperedgeId, VertexId};

const FNV_OFFSET: u64 = 0xcbf29ce484222325;
const FNV_PRIME: u64 = 0x100000001b3;

fn fnv1a(bytes: &[u8]) -> u64 {
    let mut hash = FNV_OFFSET;
    for &b in bytes {
        hash ^= b as u64;
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}

/// Order-independent fingerprint: combine per-pin hashes with XOR so
/// `fingerprint({a,b}) == fingerprint({b,a})`, then fold in the pin count so
/// a subset can't collide with its superset by accident.
fn fingerprint(pins: &[VertexId]) -> u64 {
    let combined = pins
        .iter()
        .map(|v| fnv1a(&v.index().to_le_bytes()))
        .fold(0u64, |acc, h| acc ^ h);
    combined.wrapping_mul(FNV_PRIME) ^ (pins.len() as u64)
}

fn same_pin_set(a: &[VertexId], b: &[VertexId]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut sorted_a: Vec<VertexId> = a.to_vec();
    let mut sorted_b: Vec<VertexId> = b.to_vec();
    sorted_a.sort();
    sorted_b.sort();
    sorted_a == sorted_b
}

/// Returns `(kept, removed)` pairs of parallel hyperedges found among the
/// hypergraph's currently active edges. Candidates are grouped by
/// fingerprint in parallel; within a group, exact pin-set equality is
/// checked (FNV-1a is not collision-free) before pairing the edge up with
/// the smallest-id keeper in its group.
pub fn detect_parallel_hyperedges(hg: &Hypergraph) -> Vec<(HyperedgeId, HyperedgeId)> {
    let active: Vec<HyperedgeId> = hg.all_active_edges().collect();
    let fingerprints: Vec<(HyperedgeId, u64)> = active
        .par_iter()
        .map(|&e| (e, fingerprint(hg.pins(e))))
        .collect();

    let mut groups: HashMap<u64, Vec<HyperedgeId>> = HashMap::new();
    for (e, fp) in fingerprints {
        groups.entry(fp).or_default().push(e);
    }

    let mut merges = Vec::new();
    for candidates in groups.into_values() {
        if candidates.len() < 2 {
            continue;
        }
        let mut kept: Vec<HyperedgeId> = Vec::new();
        for e in candidates {
            if let Some(&keeper) = kept.iter().find(|&&k| same_pin_set(hg.pins(k), hg.pins(e))) {
                merges.push((keeper, e));
            } else {
                kept.push(e);
            }
        }
    }
    merges
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vid(i: usize) -> VertexId {
        VertexId::new(i)
    }

    #[test]
    fn fingerprint_is_order_independent() {
        let a = vec![vid(1), vid(2), vid(3)];
        let mut b = a.clone();
        b.reverse();
        assert_eq!(fingerprint(&a), fingerprint(&b));
    }

    #[test]
    fn detects_exact_duplicate_pin_sets() {
        let hg = Hypergraph::new(
            vec![1, 1, 1],
            vec![
                (1, vec![vid(0), vid(1)]),
                (1, vec![vid(1), vid(0)]),
                (1, vec![vid(1), vid(2)]),
            ],
            2,
        );
        let merges = detect_parallel_hyperedges(&hg);
        assert_eq!(merges.len(), 1);
        assert_eq!(merges[0], (HyperedgeId::new(0), HyperedgeId::new(1)));
    }

    #[test]
    fn distinct_pin_sets_are_not_merged() {
        let hg = Hypergraph::new(
            vec![1, 1, 1],
            vec![(1, vec![vid(0), vid(1)]), (1, vec![vid(1), vid(2)])],
            2,
        );
        assert!(detect_parallel_hyperedges(&hg).is_empty());
    }
}
