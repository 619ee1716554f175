//! An editable GFA graph. Lines are kept in per-kind slot arrays,
//! and every edit keeps the name, connectivity, and path indices in
//! step with the live lines.

pub mod error;

mod delete;
mod index;
mod insert;
mod names;
mod query;
mod rewrite;
mod store;

pub use self::error::*;
pub use self::index::EndpointRole;
pub use self::query::{ConnectivitySymbol, ContainmentRole, Extremity};
pub use self::rewrite::{divide_counts, SegmentWalk};
pub use self::store::LineId;

use std::collections::BTreeSet;

use bstr::{BStr, ByteSlice};

#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};

use crate::{
    gfa::{Containment, Edge, EdgeKind, Line, Link},
    optfields::{OptFields, OptionalFields},
};

use self::{
    index::{BackReferenceIndex, ConnectivityIndex},
    names::NameIndex,
    store::{EdgeSlots, LineStore},
};

/// Controls how the graph treats references to segments it doesn't
/// know.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
pub struct GraphConfig {
    /// When set, inserting a link, containment, or path that names
    /// an unknown segment first adds a segment with unknown sequence
    /// under that name.
    pub materialize_segments: bool,
}

impl GraphConfig {
    pub fn lazy() -> Self {
        GraphConfig {
            materialize_segments: true,
        }
    }

    pub fn strict() -> Self {
        GraphConfig {
            materialize_segments: false,
        }
    }
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self::strict()
    }
}

/// A GFA graph supporting insertion, cascading deletion, and the
/// structural rewrites segment multiplication and unbranched chain
/// merging.
#[derive(Debug, Clone)]
pub struct Graph<T: OptFields = OptionalFields> {
    config: GraphConfig,
    lines: LineStore<T>,
    names: NameIndex,
    connections: ConnectivityIndex,
    paths_with: BackReferenceIndex,
}

impl<T: OptFields> Default for Graph<T> {
    fn default() -> Self {
        Self::with_config(Default::default())
    }
}

impl<T: OptFields> Graph<T> {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_config(config: GraphConfig) -> Self {
        Graph {
            config,
            lines: Default::default(),
            names: Default::default(),
            connections: Default::default(),
            paths_with: Default::default(),
        }
    }

    /// Builds a graph by inserting `lines` in order, stopping at the
    /// first line that can't be inserted.
    pub fn from_lines<I>(config: GraphConfig, lines: I) -> GraphResult<Self>
    where
        I: IntoIterator<Item = Line<T>>,
    {
        let mut graph = Self::with_config(config);
        for line in lines {
            graph.insert_line(line)?;
        }
        Ok(graph)
    }

    #[inline]
    pub fn config(&self) -> GraphConfig {
        self.config
    }

    /// Slots of the edges of one kind attached to `name` at either
    /// end. Self-loops appear once.
    pub(crate) fn incident_slots(
        &self,
        kind: EdgeKind,
        name: &[u8],
    ) -> BTreeSet<usize> {
        EndpointRole::ALL
            .iter()
            .flat_map(|&role| self.connections.edges_at(kind, role, name))
            .copied()
            .collect()
    }

    /// Whether every index entry refers to a live line that matches
    /// it, and every live line is indexed.
    pub fn indices_consistent(&self) -> bool {
        self.names_consistent()
            && self.edges_consistent::<Link<T>>()
            && self.edges_consistent::<Containment<T>>()
            && self.paths_consistent()
    }

    fn names_consistent(&self) -> bool {
        let segments = &self.lines.segments;
        let paths = &self.lines.paths;
        let names = &self.names;

        let segment_names = segments.iter().all(|(slot, s)| {
            names.segments.map_name(&s.name) == Some(slot)
                && names.segments.inverse_map_name(slot) == Some(s.name.as_bstr())
        });
        let path_names = paths.iter().all(|(slot, p)| {
            names.paths.map_name(&p.path_name) == Some(slot)
                && names.paths.inverse_map_name(slot)
                    == Some(p.path_name.as_bstr())
        });

        let disjoint = paths
            .iter()
            .all(|(_, p)| names.segments.map_name(&p.path_name).is_none());

        segment_names
            && path_names
            && disjoint
            && names.segments.len() == segments.live()
            && names.paths.len() == paths.live()
    }

    fn edges_consistent<E: EdgeSlots<T>>(&self) -> bool {
        fn endpoint<E: Edge>(edge: &E, role: EndpointRole) -> &BStr {
            match role {
                EndpointRole::From => edge.from_segment(),
                EndpointRole::To => edge.to_segment(),
            }
        }

        let slots = E::slots(&self.lines);

        let entries_live = EndpointRole::ALL.iter().all(|&role| {
            self.connections.entries(E::KIND, role).all(|(name, slot)| {
                slots
                    .get(slot)
                    .map_or(false, |e| endpoint(e, role) == name.as_bstr())
            })
        });

        let edges_indexed = slots.iter().all(|(slot, edge)| {
            EndpointRole::ALL.iter().all(|&role| {
                self.connections
                    .edges_at(E::KIND, role, endpoint(edge, role))
                    .contains(&slot)
            })
        });

        entries_live && edges_indexed
    }

    fn paths_consistent(&self) -> bool {
        let paths = &self.lines.paths;

        let entries_live = self.paths_with.entries().all(|(name, slot)| {
            paths.get(slot).map_or(false, |p| p.visits(name))
        });

        let paths_indexed = paths.iter().all(|(slot, path)| {
            path.iter()
                .all(|(name, _)| self.paths_with.paths_through(name).contains(&slot))
        });

        entries_live && paths_indexed
    }
}
