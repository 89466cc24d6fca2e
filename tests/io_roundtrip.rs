//! I/O round-trip laws from spec.md §8: writing a partition file then
//! reading it back yields the same assignment vector, and hMetis files
//! round-trip through write/read.

use std::io::Cursor;

use hypart::hypergraph::NullObserver;
use hypart::ids::{BlockId, VertexId};
use hypart::io::{hmetis, partition_file};

#[test]
fn partition_file_round_trips_through_write_then_read() {
    let mut hg = hypart::hypergraph::Hypergraph::new(
        vec![1, 2, 3, 1],
        vec![
            (1, vec![VertexId::new(0), VertexId::new(1)]),
            (1, vec![VertexId::new(2), VertexId::new(3)]),
        ],
        3,
    );
    let mut obs = NullObserver;
    let assignment = [1usize, 0, 2, 0];
    for (i, &b) in assignment.iter().enumerate() {
        hg.set_node_part(VertexId::new(i), BlockId::new(b), &mut obs).unwrap();
    }

    let mut buf = Vec::new();
    partition_file::write_partition(&mut buf, &hg).unwrap();
    let read_back = partition_file::read_partition(Cursor::new(buf)).unwrap();

    let expected: Vec<BlockId> = assignment.iter().map(|&b| BlockId::new(b)).collect();
    assert_eq!(read_back, expected);
}

#[test]
fn hmetis_weighted_file_round_trips_edges_and_vertex_weights() {
    let text = "% sample\n3 5 11\n4 1 2 3\n1 2 4\n7 1 5\n10\n20\n30\n40\n50\n";
    let parsed = hmetis::read_hmetis(Cursor::new(text)).unwrap();
    let hg = parsed.into_hypergraph(2);

    let mut buf = Vec::new();
    hmetis::write_hmetis(&mut buf, &hg).unwrap();

    let reparsed = hmetis::read_hmetis(Cursor::new(buf)).unwrap();
    let hg2 = reparsed.into_hypergraph(2);

    assert_eq!(hg2.num_vertices(), hg.num_vertices());
    assert_eq!(hg2.num_hyperedges(), hg.num_hyperedges());
    for v in hg.all_active_vertices() {
        assert_eq!(hg2.vertex_weight(v), hg.vertex_weight(v));
    }
    for e in hg.all_active_edges() {
        assert_eq!(hg2.edge_weight(e), hg.edge_weight(e));
        assert_eq!(hg2.pins(e), hg.pins(e));
    }
}

#[test]
fn hmetis_reader_rejects_truncated_file() {
    let text = "2 4\n1 2 3\n";
    let err = hmetis::read_hmetis(Cursor::new(text)).unwrap_err();
    assert!(matches!(err, hypart::error::HypartError::InputFormat(_)));
}
