use std::{error, fmt};

use bstr::BString;

use crate::gfa::LineKind;

pub type GraphResult<T> = Result<T, GraphError>;

/// Errors raised by the graph editing operations. A failing
/// operation leaves the graph unchanged.
#[derive(Debug, Clone, PartialEq)]
pub enum GraphError {
    /// The name is already used by a segment or a path.
    DuplicateName(BString),
    /// No live line of the given kind is identified by the name.
    NotFound(LineKind, BString),
    InvalidArgument(String),
    /// There is no unbranched, consistently oriented chain of links
    /// from the first to the last segment.
    NoUnbranchedPath { from: BString, to: BString },
    /// Following single links from `from` came back to an already
    /// visited segment before reaching `to`.
    CyclicSegmentPath { from: BString, to: BString },
    /// Sequences can only be joined over overlaps that are a single
    /// match operation, or unknown.
    UnsupportedOverlap { from: BString, to: BString, overlap: String },
    /// The overlapping ends of two segments don't share the sequence
    /// the overlap claims.
    InconsistentOverlap { from: BString, to: BString },
    /// The segment is not part of the graph.
    NotConnected(BString),
}

impl fmt::Display for GraphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use GraphError as GE;
        match self {
            GE::DuplicateName(name) => {
                write!(f, "Segment or path name not unique '{}'", name)
            }
            GE::NotFound(kind, name) => write!(f, "No {} found for {}", kind, name),
            GE::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            GE::NoUnbranchedPath { from, to } => write!(
                f,
                "No unbranched segments path from {} to {}",
                from, to
            ),
            GE::CyclicSegmentPath { from, to } => write!(
                f,
                "Unbranched segments path from {} loops without reaching {}",
                from, to
            ),
            GE::UnsupportedOverlap { from, to, overlap } => write!(
                f,
                "Overlap {} between {} and {} contains operations other than M",
                overlap, from, to
            ),
            GE::InconsistentOverlap { from, to } => write!(
                f,
                "Inconsistent overlap between {} and {}",
                from, to
            ),
            GE::NotConnected(name) => write!(
                f,
                "Segment {} is not connected to a graph",
                name
            ),
        }
    }
}

impl error::Error for GraphError {}

impl GraphError {
    pub(crate) fn not_found(kind: LineKind, name: &[u8]) -> Self {
        GraphError::NotFound(kind, name.into())
    }
}
