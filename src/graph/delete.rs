use std::collections::BTreeSet;

use bstr::{BString, ByteSlice};

use log::debug;

use crate::{
    gfa::{Containment, Edge, EdgeKind, LineKind, Link, Orientation},
    optfields::OptFields,
};

use super::{
    error::{GraphError, GraphResult},
    index::EndpointRole,
    store::EdgeSlots,
    Graph,
};

fn edge_description(
    from: &[u8],
    from_orient: Orientation,
    to: &[u8],
    to_orient: Orientation,
) -> BString {
    format!(
        "{}{} {}{}",
        from.as_bstr(),
        from_orient,
        to.as_bstr(),
        to_orient
    )
    .into()
}

impl<T: OptFields> Graph<T> {
    /// Removes a segment together with every link and containment
    /// attached to it and every path that visits it.
    pub fn delete_segment(&mut self, name: &[u8]) -> GraphResult<()> {
        let slot = self
            .names
            .segments
            .map_name(name)
            .ok_or_else(|| GraphError::not_found(LineKind::Segment, name))?;

        let links = self.remove_incident_edges::<Link<T>>(name);
        let containments = self.remove_incident_edges::<Containment<T>>(name);

        let paths: Vec<usize> =
            self.paths_with.paths_through(name).iter().copied().collect();
        for &path in paths.iter() {
            self.remove_path(path);
        }

        self.lines.segments.tombstone(slot);
        self.names.segments.remove(name);
        debug!(
            "deleted segment {} with {} links, {} containments, {} paths",
            name.as_bstr(),
            links,
            containments,
            paths.len()
        );
        Ok(())
    }

    /// Removes the link with the given ends. The link may also be
    /// stored in its reverse form.
    pub fn delete_link(
        &mut self,
        from: &[u8],
        from_orient: Orientation,
        to: &[u8],
        to_orient: Orientation,
    ) -> GraphResult<()> {
        let probe: Link<()> = Link::new(from, from_orient, to, to_orient, None);
        let slot = self.find_link(&probe).ok_or_else(|| {
            GraphError::NotFound(
                LineKind::Link,
                edge_description(from, from_orient, to, to_orient),
            )
        })?;
        self.remove_edge::<Link<T>>(slot);
        debug!("deleted link at {}", slot);
        Ok(())
    }

    /// Removes the first containment of `to` in `from` at `pos` with
    /// the given orientations.
    pub fn delete_containment(
        &mut self,
        from: &[u8],
        from_orient: Orientation,
        to: &[u8],
        to_orient: Orientation,
        pos: usize,
    ) -> GraphResult<()> {
        let containments = &self.lines.containments;
        let slot = self
            .connections
            .edges_at(EdgeKind::Containment, EndpointRole::From, from)
            .iter()
            .copied()
            .find(|&slot| {
                containments.get(slot).map_or(false, |c| {
                    c.container_orient == from_orient
                        && c.contained_name.as_slice() == to
                        && c.contained_orient == to_orient
                        && c.pos == pos
                })
            })
            .ok_or_else(|| {
                GraphError::NotFound(
                    LineKind::Containment,
                    edge_description(from, from_orient, to, to_orient),
                )
            })?;
        self.remove_edge::<Containment<T>>(slot);
        debug!("deleted containment at {}", slot);
        Ok(())
    }

    /// Removes every link and containment between `a` and `b`, in
    /// either direction and with any orientation. Returns the number
    /// of removed edges.
    pub fn unconnect_segments(&mut self, a: &[u8], b: &[u8]) -> usize {
        let links = self.remove_edges_between::<Link<T>>(a, b);
        let containments = self.remove_edges_between::<Containment<T>>(a, b);
        debug!(
            "unconnected {} and {}: {} links, {} containments",
            a.as_bstr(),
            b.as_bstr(),
            links,
            containments
        );
        links + containments
    }

    pub fn delete_path(&mut self, name: &[u8]) -> GraphResult<()> {
        let slot = self
            .names
            .paths
            .map_name(name)
            .ok_or_else(|| GraphError::not_found(LineKind::Path, name))?;
        self.remove_path(slot);
        debug!("deleted path {}", name.as_bstr());
        Ok(())
    }

    fn remove_edges_between<E: EdgeSlots<T>>(
        &mut self,
        a: &[u8],
        b: &[u8],
    ) -> usize {
        let edges = E::slots(&self.lines);
        let between = |from: &[u8], to: &[u8]| -> Vec<usize> {
            self.connections
                .edges_at(E::KIND, EndpointRole::From, from)
                .iter()
                .copied()
                .filter(|&slot| {
                    edges
                        .get(slot)
                        .map_or(false, |e| e.to_segment().as_bytes() == to)
                })
                .collect()
        };
        let slots: BTreeSet<usize> =
            between(a, b).into_iter().chain(between(b, a)).collect();

        for &slot in slots.iter() {
            self.remove_edge::<E>(slot);
        }
        slots.len()
    }

    fn remove_incident_edges<E: EdgeSlots<T>>(&mut self, name: &[u8]) -> usize {
        let slots = self.incident_slots(E::KIND, name);
        for &slot in slots.iter() {
            self.remove_edge::<E>(slot);
        }
        slots.len()
    }

    /// Tombstones an edge and drops it from the connectivity index.
    fn remove_edge<E: EdgeSlots<T>>(&mut self, slot: usize) -> Option<E> {
        let edge = E::slots_mut(&mut self.lines).tombstone(slot)?;
        self.connections.unindex_edge(
            E::KIND,
            slot,
            edge.from_segment(),
            edge.to_segment(),
        );
        Some(edge)
    }

    fn remove_path(&mut self, slot: usize) {
        if let Some(path) = self.lines.paths.tombstone(slot) {
            self.paths_with
                .unindex_path(slot, path.iter().map(|(name, _)| name.as_bytes()));
            self.names.paths.remove(&path.path_name);
            debug!("removed path {} at {}", path.path_name, slot);
        }
    }
}
