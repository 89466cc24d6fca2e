//! hMetis hypergraph file format (spec.md §6), grounded on the `.hgr`
//! reader/writer in `other_examples/.../src/hgr.rs` and extended to the
//! full weighted hMetis dialect: a header `numHyperedges numVertices
//! [fmt]`, one line per hyperedge (`[weight] v1 v2 ...`, vertices 1-based),
//! followed by one vertex-weight line per vertex when `fmt` asks for it.
//! `fmt` is the usual two-digit flag: the tens digit marks vertex weights,
//! the ones digit marks hyperedge weights. Lines starting with `%` are
//! comments and skipped.

use std::io::{BufRead, BufReader, BufWriter, Write};

use crate::error::{HypartError, Result};
use crate::hypergraph::Hypergraph;
use crate::ids::{VertexId, Weight};

fn non_comment_lines<R: BufRead>(reader: R) -> impl Iterator<Item = std::io::Result<String>> {
    reader
        .lines()
        .filter(|line| !matches!(line, Ok(l) if l.trim().is_empty() || l.trim_start().starts_with('%')))
}

pub fn read_hmetis<R: BufRead>(reader: R) -> Result<ParsedHypergraph> {
    let mut lines = non_comment_lines(reader);
    let header = lines
        .next()
        .ok_or_else(|| HypartError::input_format("empty hMetis file: missing header"))?
        .map_err(|e| HypartError::input_format(e.to_string()))?;
    let header_fields: Vec<&str> = header.split_whitespace().collect();
    if header_fields.len() < 2 {
        return Err(HypartError::input_format(format!(
            "malformed header line: {header:?}"
        )));
    }
    let num_hyperedges: usize = header_fields[0]
        .parse()
        .map_err(|_| HypartError::input_format("header hyperedge count is not an integer"))?;
    let num_vertices: usize = header_fields[1]
        .parse()
        .map_err(|_| HypartError::input_format("header vertex count is not an integer"))?;
    let fmt: u32 = match header_fields.get(2) {
        Some(s) => s
            .parse()
            .map_err(|_| HypartError::input_format("header fmt digit is not an integer"))?,
        None => 0,
    };
    let has_edge_weights = fmt % 10 == 1;
    let has_vertex_weights = fmt / 10 == 1;

    let mut hyperedges = Vec::with_capacity(num_hyperedges);
    for edge_index in 0..num_hyperedges {
        let line = lines
            .next()
            .ok_or_else(|| {
                HypartError::input_format(format!(
                    "expected {num_hyperedges} hyperedge lines, file ended after {edge_index}"
                ))
            })?
            .map_err(|e| HypartError::input_format(e.to_string()))?;
        let mut fields = line.split_whitespace();

        let weight: Weight = if has_edge_weights {
            let w = fields
                .next()
                .ok_or_else(|| HypartError::input_format(format!("hyperedge {edge_index} missing weight")))?;
            w.parse()
                .map_err(|_| HypartError::input_format(format!("hyperedge {edge_index} weight is not an integer")))?
        } else {
            1
        };

        let mut pins = Vec::new();
        for token in fields {
            let one_based: usize = token
                .parse()
                .map_err(|_| HypartError::input_format(format!("hyperedge {edge_index} has a non-integer pin")))?;
            if one_based == 0 || one_based > num_vertices {
                return Err(HypartError::input_format(format!(
                    "hyperedge {edge_index} references out-of-range vertex {one_based}"
                )));
            }
            pins.push(VertexId::new(one_based - 1));
        }
        if pins.len() < 2 {
            return Err(HypartError::input_format(format!(
                "hyperedge {edge_index} has fewer than two pins"
            )));
        }
        hyperedges.push((weight, pins));
    }

    let mut vertex_weights = vec![1; num_vertices];
    if has_vertex_weights {
        for (i, w) in vertex_weights.iter_mut().enumerate() {
            let line = lines
                .next()
                .ok_or_else(|| {
                    HypartError::input_format(format!("expected a weight line for vertex {i}"))
                })?
                .map_err(|e| HypartError::input_format(e.to_string()))?;
            *w = line
                .trim()
                .parse()
                .map_err(|_| HypartError::input_format(format!("vertex {i} weight is not an integer")))?;
        }
    }

    Ok(ParsedHypergraph {
        vertex_weights,
        hyperedges,
    })
}

/// Raw parsed hMetis contents. hMetis files don't carry a target block
/// count, so materializing a [`Hypergraph`] is a separate step left to the
/// caller, who knows `num_blocks` from [`crate::config::Config`].
pub struct ParsedHypergraph {
    pub vertex_weights: Vec<Weight>,
    pub hyperedges: Vec<(Weight, Vec<VertexId>)>,
}

impl ParsedHypergraph {
    pub fn into_hypergraph(self, num_blocks: usize) -> Hypergraph {
        Hypergraph::new(self.vertex_weights, self.hyperedges, num_blocks)
    }
}

/// Writes `hg` back out in hMetis format with `fmt = 11` (both edge and
/// vertex weights present), the least ambiguous round-trip choice.
pub fn write_hmetis<W: Write>(writer: &mut W, hg: &Hypergraph) -> Result<()> {
    let mut w = BufWriter::new(writer);
    writeln!(w, "{} {} 11", hg.num_hyperedges(), hg.num_vertices())
        .map_err(|e| HypartError::input_format(e.to_string()))?;
    for e in hg.all_active_edges() {
        write!(w, "{}", hg.edge_weight(e)).map_err(|e| HypartError::input_format(e.to_string()))?;
        for v in hg.pins(e) {
            write!(w, " {}", v.index() + 1).map_err(|e| HypartError::input_format(e.to_string()))?;
        }
        writeln!(w).map_err(|e| HypartError::input_format(e.to_string()))?;
    }
    for v in hg.all_active_vertices() {
        writeln!(w, "{}", hg.vertex_weight(v)).map_err(|e| HypartError::input_format(e.to_string()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn parses_unweighted_sample() {
        let text = "2 4\n1 2 3\n2 3 4\n";
        let hg = read_hmetis(Cursor::new(text)).unwrap().into_hypergraph(2);
        assert_eq!(hg.num_vertices(), 4);
        assert_eq!(hg.num_hyperedges(), 2);
        assert_eq!(hg.edge_weight(crate::ids::HyperedgeId::new(0)), 1);
    }

    #[test]
    fn parses_weighted_edges_and_vertices() {
        let text = "% a comment\n2 3 11\n5 1 2\n3 2 3\n10\n20\n30\n";
        let hg = read_hmetis(Cursor::new(text)).unwrap().into_hypergraph(2);
        assert_eq!(hg.edge_weight(crate::ids::HyperedgeId::new(0)), 5);
        assert_eq!(hg.vertex_weight(VertexId::new(0)), 10);
        assert_eq!(hg.vertex_weight(VertexId::new(2)), 30);
    }

    #[test]
    fn rejects_out_of_range_pin() {
        let text = "1 2\n1 5\n";
        let err = read_hmetis(Cursor::new(text)).unwrap_err();
        assert!(matches!(err, HypartError::InputFormat(_)));
    }

    #[test]
    fn round_trips_through_write_and_read() {
        let text = "2 4 1\n3 1 2 3\n4 2 3 4\n";
        let hg = read_hmetis(Cursor::new(text)).unwrap().into_hypergraph(2);
        let mut buf = Vec::new();
        write_hmetis(&mut buf, &hg).unwrap();
        let reparsed = read_hmetis(Cursor::new(buf)).unwrap().into_hypergraph(2);
        assert_eq!(reparsed.num_vertices(), hg.num_vertices());
        assert_eq!(reparsed.num_hyperedges(), hg.num_hyperedges());
    }
}
