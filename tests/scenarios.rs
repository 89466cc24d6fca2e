//! Concrete scenarios S1-S6 from spec.md §8, run against the public API.

use hypart::coarsening::rating::HeavyEdgeRating;
use hypart::hypergraph::{Hypergraph, NullObserver};
use hypart::ids::{BlockId, VertexId};
use hypart::objective::{cut, km1, soed};
use hypart::recursive_bisection::{self, RecursiveBisectionConfig};
use hypart::refinement::twoway;
use hypart::rng::{Rng, TieBreakingPolicy};

fn v(i: usize) -> VertexId {
    VertexId::new(i)
}

fn assign(hg: &mut Hypergraph, blocks: &[usize]) {
    let mut obs = NullObserver;
    for (i, &b) in blocks.iter().enumerate() {
        hg.set_node_part(v(i), BlockId::new(b), &mut obs).unwrap();
    }
}

#[test]
fn s1_nested_edges_fully_internal_has_zero_cut_and_km1() {
    let mut hg = Hypergraph::new(vec![1, 1, 1], vec![(1, vec![v(0), v(1), v(2)]), (1, vec![v(0), v(1)])], 2);
    assign(&mut hg, &[0, 0, 0]);
    assert_eq!(cut(&hg), 0);
    assert_eq!(km1(&hg), 0);
}

#[test]
fn s2_splitting_off_one_vertex_cuts_the_spanning_edge_only() {
    let mut hg = Hypergraph::new(vec![1, 1, 1], vec![(1, vec![v(0), v(1), v(2)]), (1, vec![v(0), v(1)])], 2);
    assign(&mut hg, &[0, 0, 1]);
    assert_eq!(cut(&hg), 1);
    assert_eq!(km1(&hg), 1);
    assert_eq!(soed(&hg), 2);
}

#[test]
fn s3_four_vertices_two_crossing_edges() {
    let mut hg = Hypergraph::new(vec![1, 1, 1, 1], vec![(1, vec![v(0), v(2), v(3)]), (1, vec![v(1), v(2)])], 2);
    assign(&mut hg, &[0, 0, 1, 1]);
    assert_eq!(cut(&hg), 2);
    assert_eq!(km1(&hg), 2);
}

#[test]
fn s4_path_hypergraph_four_way_split_is_balanced_and_low_cut() {
    let mut edges = Vec::new();
    for i in 0..15 {
        edges.push((1, vec![v(i), v(i + 1)]));
    }
    let mut hg = Hypergraph::new(vec![1; 16], edges, 4);

    let config = RecursiveBisectionConfig {
        coarsening_contraction_limit: 2,
        max_allowed_node_weight: 16,
        tie_breaking: TieBreakingPolicy::LastWins,
        nruns_initial_partitioning: 4,
        objective: hypart::objective::Objective::Cut,
        max_fm_passes: 8,
        epsilon: 0.03,
    };
    let rating = HeavyEdgeRating;
    let mut rng = Rng::from_seed(7);
    recursive_bisection::partition(&mut hg, 4, &config, &rating, &mut rng).unwrap();

    let mut weights = [0i64; 4];
    for i in 0..16 {
        let b = hg.vertex_block(v(i));
        assert!(b.is_valid());
        weights[b.index()] += hg.vertex_weight(v(i));
    }
    assert_eq!(weights.iter().sum::<i64>(), 16);
    for w in weights {
        assert_eq!(w, 4);
    }
    assert!(cut(&hg) <= 3);
}

#[test]
fn s5_coarsener_respects_contraction_limit_and_weight_bound_at_scale() {
    let n = 1024;
    let mut edges = Vec::new();
    for i in 0..n - 1 {
        edges.push((1, vec![v(i), v(i + 1)]));
    }
    let hg = Hypergraph::new(vec![1; n], edges, 2);
    let max_allowed_node_weight = 3; // floor(3.25) truncated toward a small integer bound
    let config = hypart::coarsening::CoarseningConfig {
        contraction_limit: 160,
        max_allowed_node_weight,
        tie_breaking: TieBreakingPolicy::LastWins,
    };
    let mut rng = Rng::from_seed(3);
    let rating = HeavyEdgeRating;
    let mut hg = hg;
    hypart::coarsening::coarsen(&mut hg, &rating, &config, &mut rng);

    let active: Vec<VertexId> = hg.all_active_vertices().collect();
    assert!(active.len() <= 160);
    for vtx in active {
        assert!(hg.vertex_weight(vtx) <= max_allowed_node_weight);
    }
}

#[test]
fn s6_two_way_fm_fixes_k33_style_bipartition_in_one_pass() {
    let mut hg = Hypergraph::new(
        vec![1; 6],
        vec![(1, vec![v(0), v(1), v(2)]), (1, vec![v(3), v(4), v(5)])],
        2,
    );
    assign(&mut hg, &[0, 1, 0, 1, 0, 1]);
    assert_eq!(cut(&hg), 2);

    let max_block_weight = 4;
    twoway::refine(&mut hg, max_block_weight, 1);
    assert_eq!(cut(&hg), 0);
}
