//! External I/O formats (spec.md §6): hMetis hypergraph files and plain
//! partition-assignment files.

pub mod hmetis;
pub mod partition_file;
