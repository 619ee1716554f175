use bstr::{BString, ByteSlice};

use log::debug;

use crate::{
    gfa::{EdgeKind, Line, LineKind, Link, Path, Segment},
    optfields::OptFields,
};

use super::{
    error::{GraphError, GraphResult},
    index::EndpointRole,
    store::{EdgeSlots, LineId},
    Graph,
};

impl<T: OptFields> Graph<T> {
    /// Adds a line to the graph, updating every index. Inserting a
    /// link with the same ends as a live link changes nothing and
    /// returns the id of the link already present.
    pub fn insert_line(&mut self, line: Line<T>) -> GraphResult<LineId> {
        match line {
            Line::Header(header) => {
                let id = self.lines.insert(Line::Header(header));
                debug!("inserted header at {}", id.slot);
                Ok(id)
            }
            Line::Segment(segment) => self.add_segment(segment),
            Line::Link(link) => self.add_link(link),
            Line::Containment(containment) => self.add_edge(containment),
            Line::Path(path) => self.add_path(path),
        }
    }

    pub(crate) fn add_segment(
        &mut self,
        segment: Segment<T>,
    ) -> GraphResult<LineId> {
        self.names.check_unused(&segment.name)?;
        let name = segment.name.clone();
        let slot = self.lines.segments.push(segment);
        debug!("inserted segment {} at {}", name, slot);
        self.names.segments.insert(name, slot);
        Ok(LineId::new(LineKind::Segment, slot))
    }

    /// The slot of the live link with the same ends as `link`, in
    /// either direction.
    pub(crate) fn find_link<U: OptFields>(&self, link: &Link<U>) -> Option<usize> {
        let from = self.connections.edges_at(
            EdgeKind::Link,
            EndpointRole::From,
            &link.from_segment,
        );
        // the reverse form is indexed with `to` as its from segment
        let reversed = self.connections.edges_at(
            EdgeKind::Link,
            EndpointRole::From,
            &link.to_segment,
        );

        from.iter().chain(reversed.iter()).copied().find(|&slot| {
            self.lines
                .links
                .get(slot)
                .map_or(false, |l| l.same_ends(link))
        })
    }

    fn add_link(&mut self, link: Link<T>) -> GraphResult<LineId> {
        if let Some(slot) = self.find_link(&link) {
            debug!(
                "link {}{} {}{} already present at {}",
                link.from_segment,
                link.from_orient,
                link.to_segment,
                link.to_orient,
                slot
            );
            return Ok(LineId::new(LineKind::Link, slot));
        }
        self.add_edge(link)
    }

    fn add_edge<E: EdgeSlots<T>>(&mut self, edge: E) -> GraphResult<LineId> {
        let from = BString::from(edge.from_segment().as_bytes());
        let to = BString::from(edge.to_segment().as_bytes());

        self.check_materializable(&from)?;
        self.check_materializable(&to)?;
        self.materialize(&from);
        self.materialize(&to);

        let slot = E::slots_mut(&mut self.lines).push(edge);
        self.connections.index_edge(E::KIND, slot, &from, &to);
        debug!("inserted {:?} {} -> {} at {}", E::KIND, from, to, slot);

        Ok(LineId::new(E::KIND.into(), slot))
    }

    fn add_path(&mut self, path: Path<T>) -> GraphResult<LineId> {
        if path.segment_names.is_empty() {
            return Err(GraphError::InvalidArgument(format!(
                "path {} has no segments",
                path.path_name
            )));
        }
        self.names.check_unused(&path.path_name)?;
        for (name, _) in path.iter() {
            self.check_materializable(name)?;
        }
        // a materialized step would take the path's own name
        if self.config.materialize_segments && path.visits(&path.path_name) {
            return Err(GraphError::DuplicateName(path.path_name.clone()));
        }

        let name = path.path_name.clone();
        let steps: Vec<BString> =
            path.iter().map(|(seg, _)| BString::from(seg.as_bytes())).collect();

        for seg in steps.iter() {
            self.materialize(seg);
        }

        let slot = self.lines.paths.push(path);
        self.names.paths.insert(name.clone(), slot);
        self.paths_with
            .index_path(slot, steps.iter().map(|s| s.as_slice()));
        debug!("inserted path {} over {} steps at {}", name, steps.len(), slot);

        Ok(LineId::new(LineKind::Path, slot))
    }

    /// A name that would be materialized must not already name a path.
    fn check_materializable(&self, name: &[u8]) -> GraphResult<()> {
        if self.config.materialize_segments
            && self.names.segments.map_name(name).is_none()
        {
            self.names.check_unused(name)
        } else {
            Ok(())
        }
    }

    fn materialize(&mut self, name: &[u8]) {
        if !self.config.materialize_segments
            || self.names.segments.map_name(name).is_some()
        {
            return;
        }
        let slot = self.lines.segments.push(Segment::placeholder(name));
        self.names.segments.insert(name.into(), slot);
        debug!("materialized segment {} at {}", name.as_bstr(), slot);
    }
}
