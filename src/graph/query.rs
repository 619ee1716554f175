use std::{collections::BTreeSet, fmt};

use bstr::{BStr, ByteSlice};

use crate::{
    gfa::{
        Containment, EdgeKind, Header, LineKind, LineRef, Link, Orientation,
        Path, Segment,
    },
    optfields::OptFields,
};

use super::{
    error::{GraphError, GraphResult},
    index::EndpointRole,
    store::LineId,
    Graph,
};

/// The two ends of a segment, as read on the forward strand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Extremity {
    Left,
    Right,
}

impl Extremity {
    /// The end of the `from` segment a link with the given
    /// orientation leaves from.
    fn leaving(orient: Orientation) -> Self {
        match orient {
            Orientation::Forward => Extremity::Right,
            Orientation::Backward => Extremity::Left,
        }
    }

    /// The end of the `to` segment a link with the given orientation
    /// arrives at.
    fn arriving(orient: Orientation) -> Self {
        match orient {
            Orientation::Forward => Extremity::Left,
            Orientation::Backward => Extremity::Right,
        }
    }
}

/// How many dovetail overlaps attach to one end of a segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ConnectivitySymbol {
    Zero,
    One,
    Multiple,
}

impl ConnectivitySymbol {
    pub fn from_count(count: usize) -> Self {
        match count {
            0 => ConnectivitySymbol::Zero,
            1 => ConnectivitySymbol::One,
            _ => ConnectivitySymbol::Multiple,
        }
    }
}

impl fmt::Display for ConnectivitySymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectivitySymbol::Zero => write!(f, "0"),
            ConnectivitySymbol::One => write!(f, "1"),
            ConnectivitySymbol::Multiple => write!(f, "M"),
        }
    }
}

/// The part a segment plays in a containment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContainmentRole {
    /// The segment contains the other one.
    Container,
    /// The segment is contained in the other one.
    Contained,
}

impl From<ContainmentRole> for EndpointRole {
    fn from(role: ContainmentRole) -> Self {
        match role {
            ContainmentRole::Container => EndpointRole::From,
            ContainmentRole::Contained => EndpointRole::To,
        }
    }
}

impl<T: OptFields> Graph<T> {
    pub fn segment(&self, name: &[u8]) -> Option<&Segment<T>> {
        let slot = self.segment_slot(name)?;
        self.lines.segments.get(slot)
    }

    #[inline]
    pub fn segment_slot(&self, name: &[u8]) -> Option<usize> {
        self.names.segments.map_name(name)
    }

    /// The name of the live segment in `slot`.
    pub fn segment_name(&self, slot: usize) -> Option<&BStr> {
        self.names.segments.inverse_map_name(slot)
    }

    pub fn path(&self, name: &[u8]) -> Option<&Path<T>> {
        let slot = self.path_slot(name)?;
        self.lines.paths.get(slot)
    }

    #[inline]
    pub fn path_slot(&self, name: &[u8]) -> Option<usize> {
        self.names.paths.map_name(name)
    }

    /// The live line with the given id, if any.
    pub fn line(&self, id: LineId) -> Option<LineRef<'_, T>> {
        self.lines.get(id)
    }

    pub fn link(&self, slot: usize) -> Option<&Link<T>> {
        self.lines.links.get(slot)
    }

    pub fn containment(&self, slot: usize) -> Option<&Containment<T>> {
        self.lines.containments.get(slot)
    }

    pub fn headers(&self) -> impl Iterator<Item = &Header<T>> {
        self.lines.headers.iter().map(|(_, h)| h)
    }

    pub fn segments(&self) -> impl Iterator<Item = &Segment<T>> {
        self.lines.segments.iter().map(|(_, s)| s)
    }

    pub fn links(&self) -> impl Iterator<Item = &Link<T>> {
        self.lines.links.iter().map(|(_, l)| l)
    }

    pub fn containments(&self) -> impl Iterator<Item = &Containment<T>> {
        self.lines.containments.iter().map(|(_, c)| c)
    }

    pub fn paths(&self) -> impl Iterator<Item = &Path<T>> {
        self.lines.paths.iter().map(|(_, p)| p)
    }

    /// The number of live lines of a kind.
    pub fn count(&self, kind: LineKind) -> usize {
        self.lines.live(kind)
    }

    /// The `VN` tag of the first header, if any.
    pub fn version(&self) -> Option<&BStr> {
        self.headers()
            .find_map(|h| h.version.as_ref())
            .map(|v| v.as_bstr())
    }

    /// Slots of the edges of `kind` that have segment `name` at the
    /// end `role`.
    pub fn edges_at(
        &self,
        kind: EdgeKind,
        role: EndpointRole,
        name: &[u8],
    ) -> &BTreeSet<usize> {
        self.connections.edges_at(kind, role, name)
    }

    /// Links with `name` as their from segment.
    pub fn links_from<'a>(
        &'a self,
        name: &[u8],
    ) -> impl Iterator<Item = &'a Link<T>> + 'a {
        self.links_at(EndpointRole::From, name)
    }

    /// Links with `name` as their to segment.
    pub fn links_to<'a>(
        &'a self,
        name: &[u8],
    ) -> impl Iterator<Item = &'a Link<T>> + 'a {
        self.links_at(EndpointRole::To, name)
    }

    fn links_at<'a>(
        &'a self,
        role: EndpointRole,
        name: &[u8],
    ) -> impl Iterator<Item = &'a Link<T>> + 'a {
        let links = &self.lines.links;
        self.connections
            .edges_at(EdgeKind::Link, role, name)
            .iter()
            .filter_map(move |&slot| links.get(slot))
    }

    /// Slots of the paths visiting segment `name`.
    pub fn paths_through(&self, name: &[u8]) -> &BTreeSet<usize> {
        self.paths_with.paths_through(name)
    }

    pub fn paths_through_segment<'a>(
        &'a self,
        name: &[u8],
    ) -> impl Iterator<Item = &'a Path<T>> + 'a {
        let paths = &self.lines.paths;
        self.paths_with
            .paths_through(name)
            .iter()
            .filter_map(move |&slot| paths.get(slot))
    }

    /// The links overlapping an end of segment `name`, or either end
    /// if `extremity` is `None`. Self-loops are listed once.
    pub fn dovetails(
        &self,
        name: &[u8],
        extremity: Option<Extremity>,
    ) -> Vec<&Link<T>> {
        self.incident_slots(EdgeKind::Link, name)
            .into_iter()
            .filter_map(|slot| self.lines.links.get(slot))
            .filter(|link| match extremity {
                None => true,
                Some(end) => {
                    let leaves = link.from_segment.as_slice() == name
                        && Extremity::leaving(link.from_orient) == end;
                    let arrives = link.to_segment.as_slice() == name
                        && Extremity::arriving(link.to_orient) == end;
                    leaves || arrives
                }
            })
            .collect()
    }

    /// The number of dovetails at the left and the right end of a
    /// segment, classified as zero, one, or multiple.
    pub fn connectivity(
        &self,
        name: &[u8],
    ) -> GraphResult<(ConnectivitySymbol, ConnectivitySymbol)> {
        if self.segment(name).is_none() {
            return Err(GraphError::NotConnected(name.into()));
        }
        let count = |end| self.dovetails(name, Some(end)).len();
        Ok((
            ConnectivitySymbol::from_count(count(Extremity::Left)),
            ConnectivitySymbol::from_count(count(Extremity::Right)),
        ))
    }

    /// Containments in which segment `name` is either the container
    /// or the contained segment.
    pub fn containments_of(&self, name: &[u8]) -> Vec<&Containment<T>> {
        self.incident_slots(EdgeKind::Containment, name)
            .into_iter()
            .filter_map(|slot| self.lines.containments.get(slot))
            .collect()
    }

    pub fn containments_as(
        &self,
        name: &[u8],
        role: ContainmentRole,
    ) -> Vec<&Containment<T>> {
        self.connections
            .edges_at(EdgeKind::Containment, role.into(), name)
            .iter()
            .filter_map(|&slot| self.lines.containments.get(slot))
            .collect()
    }
}
