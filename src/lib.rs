//! In-memory GFA1 assembly graphs that can be edited in place.
//!
//! Lines are parsed with [`parser::GFAParser`], stored in a
//! [`graph::Graph`], and printed again through the `Display`
//! implementations in [`writer`].

pub mod cigar;
pub mod gfa;
pub mod graph;
pub mod optfields;
pub mod parser;
pub mod writer;

pub use graph::{Graph, GraphConfig, GraphError, GraphResult};
