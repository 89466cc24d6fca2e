//! Partition assignment files (spec.md §6): one line per vertex, in vertex
//! id order, giving that vertex's 0-based block id. Matches the hMetis
//! convention used by `other_examples/.../hgr.rs`'s `write_partition`.

use std::io::{BufRead, Write};

use crate::error::{HypartError, Result};
use crate::hypergraph::Hypergraph;
use crate::ids::BlockId;

pub fn write_partition<W: Write>(writer: &mut W, hg: &Hypergraph) -> Result<()> {
    for v in hg.all_active_vertices() {
        writeln!(writer, "{}", hg.vertex_block(v).index())
            .map_err(|e| HypartError::input_format(e.to_string()))?;
    }
    Ok(())
}

pub fn read_partition<R: BufRead>(reader: R) -> Result<Vec<BlockId>> {
    let mut blocks = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| HypartError::input_format(e.to_string()))?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let j: usize = trimmed
            .parse()
            .map_err(|_| HypartError::input_format(format!("partition line {i} is not an integer")))?;
        blocks.push(BlockId::new(j));
    }
    Ok(blocks)
}
