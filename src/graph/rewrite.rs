use bstr::{BString, ByteSlice};

use fnv::FnvHashSet;

use log::debug;

use crate::{
    gfa::{
        sequence, Containment, EdgeKind, LineKind, Link, OptionalIntegers,
        Orientation, Segment, COUNT_TAGS,
    },
    optfields::OptFields,
};

use super::{
    error::{GraphError, GraphResult},
    index::EndpointRole,
    store::{EdgeSlots, LineId},
    Graph,
};

/// Replaces each count field present on `line` with its share of a
/// split into `factor` parts, rounding toward zero.
pub fn divide_counts<L: OptionalIntegers + ?Sized>(line: &mut L, factor: usize) {
    let factor = factor as i64;
    for tag in COUNT_TAGS.iter() {
        if let Some(count) = line.get_optional_integer(tag) {
            line.set_optional_integer(tag, count / factor);
        }
    }
}

/// An unbranched walk over segments and the links it follows, so
/// that `links[i]` connects `segments[i]` to `segments[i + 1]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentWalk {
    pub segments: Vec<BString>,
    pub links: Vec<usize>,
}

fn oriented(seq: &[u8], orient: Orientation) -> BString {
    if orient.is_reverse() {
        sequence::reverse_complement(seq)
    } else {
        seq.into()
    }
}

impl<T: OptFields> Graph<T> {
    /// Splits a segment into itself and one copy per name in
    /// `copy_names`. Counts on the segment and its edges are divided
    /// evenly over the copies, and every edge is duplicated onto each
    /// copy. Returns the ids of the new segments.
    pub fn multiply_segment<N: AsRef<[u8]>>(
        &mut self,
        name: &[u8],
        copy_names: &[N],
    ) -> GraphResult<Vec<LineId>> {
        if copy_names.is_empty() {
            return Err(GraphError::InvalidArgument(format!(
                "multiplying {} needs at least one copy name",
                name.as_bstr()
            )));
        }
        let slot = self
            .names
            .segments
            .map_name(name)
            .ok_or_else(|| GraphError::not_found(LineKind::Segment, name))?;

        let copies: Vec<&[u8]> = copy_names.iter().map(|c| c.as_ref()).collect();
        let mut seen = FnvHashSet::default();
        for &copy in copies.iter() {
            self.names.check_unused(copy)?;
            if !seen.insert(copy) {
                return Err(GraphError::DuplicateName(copy.into()));
            }
        }

        let factor = copies.len() + 1;
        let mut original = match self.lines.segments.get_mut(slot) {
            Some(segment) => {
                divide_counts(segment, factor);
                segment.clone()
            }
            None => return Err(GraphError::not_found(LineKind::Segment, name)),
        };

        let links = self.divide_incident_counts::<Link<T>>(name, factor);
        let containments =
            self.divide_incident_counts::<Containment<T>>(name, factor);

        let mut ids = Vec::with_capacity(copies.len());
        for &copy in copies.iter() {
            original.name = copy.into();
            ids.push(self.add_segment(original.clone())?);
        }

        for &copy in copies.iter() {
            self.attach_copy(&links, copy)?;
            self.attach_copy(&containments, copy)?;
        }

        debug!(
            "multiplied segment {} by {}, {} links and {} containments per copy",
            name.as_bstr(),
            factor,
            links.len(),
            containments.len()
        );
        Ok(ids)
    }

    pub fn duplicate_segment(
        &mut self,
        name: &[u8],
        copy_name: &[u8],
    ) -> GraphResult<LineId> {
        let ids = self.multiply_segment(name, &[copy_name])?;
        ids.into_iter().next().ok_or_else(|| {
            GraphError::InvalidArgument(format!(
                "duplicating {} produced no copy",
                name.as_bstr()
            ))
        })
    }

    /// Divides the counts of each edge attached to `name` once, and
    /// returns the edges with the end at which `name` is attached.
    /// Self-loops are returned once per end.
    fn divide_incident_counts<E: EdgeSlots<T>>(
        &mut self,
        name: &[u8],
        factor: usize,
    ) -> Vec<(EndpointRole, E)> {
        for slot in self.incident_slots(E::KIND, name) {
            if let Some(edge) = E::slots_mut(&mut self.lines).get_mut(slot) {
                divide_counts(edge, factor);
            }
        }

        let edges = E::slots(&self.lines);
        let mut attached = Vec::new();
        for &role in EndpointRole::ALL.iter() {
            for &slot in self.connections.edges_at(E::KIND, role, name) {
                if let Some(edge) = edges.get(slot) {
                    attached.push((role, edge.clone()));
                }
            }
        }
        attached
    }

    fn attach_copy<E: EdgeSlots<T>>(
        &mut self,
        attached: &[(EndpointRole, E)],
        copy: &[u8],
    ) -> GraphResult<()> {
        for (role, edge) in attached.iter() {
            let mut edge = edge.clone();
            match role {
                EndpointRole::From => edge.set_from_segment(copy.into()),
                EndpointRole::To => edge.set_to_segment(copy.into()),
            }
            self.insert_line(edge.into())?;
        }
        Ok(())
    }

    /// Follows the only link leaving each segment, starting at `from`,
    /// until `to` is reached. Fails if a segment on the way has no or
    /// several outgoing links, if the orientation a link arrives in
    /// differs from the one the next link leaves in, or if the walk
    /// comes back to a segment it already visited.
    pub fn find_unbranched_path(
        &self,
        from: &[u8],
        to: &[u8],
    ) -> GraphResult<SegmentWalk> {
        let no_path = || GraphError::NoUnbranchedPath {
            from: from.into(),
            to: to.into(),
        };

        let mut segments: Vec<BString> = vec![from.into()];
        let mut links = Vec::new();
        let mut visited: FnvHashSet<BString> = FnvHashSet::default();
        visited.insert(from.into());

        let mut arrival: Option<Orientation> = None;
        let mut current: BString = from.into();

        while current.as_slice() != to {
            let leaving =
                self.connections
                    .edges_at(EdgeKind::Link, EndpointRole::From, &current);
            let slot = match leaving.iter().next() {
                Some(&slot) if leaving.len() == 1 => slot,
                _ => return Err(no_path()),
            };
            let link = self.lines.links.get(slot).ok_or_else(no_path)?;

            if arrival.map_or(false, |o| o != link.from_orient) {
                return Err(no_path());
            }

            let next = link.to_segment.clone();
            if !visited.insert(next.clone()) {
                return Err(GraphError::CyclicSegmentPath {
                    from: from.into(),
                    to: to.into(),
                });
            }

            arrival = Some(link.to_orient);
            links.push(slot);
            segments.push(next.clone());
            current = next;
        }

        Ok(SegmentWalk { segments, links })
    }

    /// Joins the oriented sequences of `chain`, the segments of `walk`,
    /// dropping the part of each segment that the preceding link's
    /// overlap covers. Pairs are joined in walk order, and the first
    /// pair holding an unknown sequence makes the result unknown.
    fn stitch_sequences(
        &self,
        walk: &SegmentWalk,
        chain: &[&Segment<T>],
    ) -> GraphResult<BString> {
        let mut merged = BString::from(Vec::new());
        for (i, &slot) in walk.links.iter().enumerate() {
            let (from, to) = (&walk.segments[i], &walk.segments[i + 1]);
            let link = self.lines.links.get(slot).ok_or_else(|| {
                GraphError::NoUnbranchedPath {
                    from: from.clone(),
                    to: to.clone(),
                }
            })?;

            let (head, tail) = (chain[i], chain[i + 1]);
            if head.has_unknown_sequence() || tail.has_unknown_sequence() {
                return Ok(sequence::UNKNOWN.into());
            }

            let cut = match &link.overlap {
                None => 0,
                Some(cigar) => cigar.single_match_len().ok_or_else(|| {
                    GraphError::UnsupportedOverlap {
                        from: from.clone(),
                        to: to.clone(),
                        overlap: cigar.to_string(),
                    }
                })?,
            };

            if i == 0 {
                merged = oriented(&head.sequence, link.from_orient);
            }
            let next = oriented(&tail.sequence, link.to_orient);

            if cut > merged.len() || cut > next.len() {
                return Err(GraphError::InconsistentOverlap {
                    from: from.clone(),
                    to: to.clone(),
                });
            }
            if merged[merged.len() - cut..] != next[..cut] {
                return Err(GraphError::InconsistentOverlap {
                    from: from.clone(),
                    to: to.clone(),
                });
            }
            merged.extend_from_slice(&next[cut..]);
        }

        Ok(merged)
    }

    /// The sum of each count field over the segments of a chain.
    /// Fields absent from every segment stay absent.
    fn sum_counts(chain: &[&Segment<T>], merged: &mut Segment<T>) {
        for tag in COUNT_TAGS.iter() {
            let total = chain
                .iter()
                .filter_map(|s| s.get_optional_integer(tag))
                .fold(None, |acc: Option<i64>, c| Some(acc.unwrap_or(0) + c));
            if let Some(total) = total {
                merged.set_optional_integer(tag, total);
            }
        }
    }

    /// Replaces the unbranched chain of segments from `first` to
    /// `last` by a single segment, named by joining the names along
    /// the chain with `_`. Links entering `first` and leaving `last`
    /// are moved to the merged segment; everything else attached to
    /// the chain is removed with it. Returns the merged segment's
    /// name.
    pub fn merge_unbranched_segpath(
        &mut self,
        first: &[u8],
        last: &[u8],
    ) -> GraphResult<BString> {
        if first == last {
            return Err(GraphError::InvalidArgument(format!(
                "cannot merge segment {} with itself",
                first.as_bstr()
            )));
        }
        for name in [first, last].iter() {
            if self.segment(name).is_none() {
                return Err(GraphError::not_found(LineKind::Segment, name));
            }
        }

        let walk = self.find_unbranched_path(first, last)?;
        let chain = walk
            .segments
            .iter()
            .map(|name| {
                self.segment(name)
                    .ok_or_else(|| GraphError::not_found(LineKind::Segment, name))
            })
            .collect::<GraphResult<Vec<_>>>()?;
        let sequence = self.stitch_sequences(&walk, &chain)?;

        let mut merged_name = BString::from(Vec::new());
        for (i, name) in walk.segments.iter().enumerate() {
            if i > 0 {
                merged_name.push(b'_');
            }
            merged_name.extend_from_slice(name);
        }
        self.names.check_unused(&merged_name)?;

        // other tags are carried over from `first`
        let mut merged = chain[0].clone();
        merged.name = merged_name.clone();
        merged.sequence = sequence;
        Self::sum_counts(&chain, &mut merged);

        let (first_reversed, last_reversed) =
            match (walk.links.first(), walk.links.last()) {
                (Some(&head), Some(&tail)) => {
                    let head = self.lines.links.get(head);
                    let tail = self.lines.links.get(tail);
                    (
                        head.map_or(false, |l| l.from_orient.is_reverse()),
                        tail.map_or(false, |l| l.to_orient.is_reverse()),
                    )
                }
                _ => (false, false),
            };

        let entering: Vec<Link<T>> = self
            .links_to(first)
            .map(|link| {
                let mut link = link.clone();
                link.to_segment = merged_name.clone();
                if first_reversed {
                    link.to_orient = !link.to_orient;
                }
                link
            })
            .collect();
        let leaving: Vec<Link<T>> = self
            .links_from(last)
            .map(|link| {
                let mut link = link.clone();
                link.from_segment = merged_name.clone();
                if last_reversed {
                    link.from_orient = !link.from_orient;
                }
                link
            })
            .collect();

        self.add_segment(merged)?;
        for link in entering.into_iter().chain(leaving) {
            self.insert_line(link.into())?;
        }
        for name in walk.segments.iter() {
            self.delete_segment(name)?;
        }

        debug!(
            "merged {} segments from {} to {} into {}",
            walk.segments.len(),
            first.as_bstr(),
            last.as_bstr(),
            merged_name
        );
        Ok(merged_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        cigar::CIGAR,
        gfa::{Line, Path},
        graph::GraphConfig,
        optfields::OptionalFields,
    };

    use Orientation::*;

    fn segment<T: OptFields>(name: &str, seq: &str) -> Line<T> {
        Line::Segment(Segment::new(name.as_bytes(), seq.as_bytes()))
    }

    fn counted(name: &str, seq: &str, kc: i64, rc: i64) -> Line<OptionalFields> {
        let mut seg = Segment::new(name.as_bytes(), seq.as_bytes());
        seg.set_optional_integer(b"KC", kc);
        seg.set_optional_integer(b"RC", rc);
        Line::Segment(seg)
    }

    fn link<T: OptFields>(
        from: &str,
        from_orient: Orientation,
        to: &str,
        to_orient: Orientation,
        overlap: &str,
    ) -> Line<T> {
        let overlap = match overlap {
            "*" => None,
            ov => CIGAR::from_bytestring(ov.as_bytes()),
        };
        Line::Link(Link::new(
            from.as_bytes(),
            from_orient,
            to.as_bytes(),
            to_orient,
            overlap,
        ))
    }

    fn graph_from<T: OptFields>(lines: Vec<Line<T>>) -> Graph<T> {
        Graph::from_lines(GraphConfig::strict(), lines).unwrap()
    }

    #[test]
    fn divide_counts_truncates() {
        let mut seg: Segment<OptionalFields> = Segment::new(b"s", b"A");
        seg.set_optional_integer(b"KC", 7);
        seg.set_optional_integer(b"FC", 1);
        divide_counts(&mut seg, 2);
        assert_eq!(seg.get_optional_integer(b"KC"), Some(3));
        assert_eq!(seg.get_optional_integer(b"FC"), Some(0));
        assert_eq!(seg.get_optional_integer(b"RC"), None);
    }

    #[test]
    fn multiply_copies_edges_and_divides_counts() {
        let mut self_loop: Link<OptionalFields> =
            Link::new(b"s", Forward, b"s", Forward, None);
        self_loop.set_optional_integer(b"KC", 12);
        let mut graph = graph_from(vec![
            counted("a", "A", 10, 4),
            counted("s", "C", 9, 6),
            link("a", Forward, "s", Forward, "*"),
            Line::Link(self_loop),
            Line::Containment(Containment::new(b"s", Forward, b"a", Forward, 0, None)),
        ]);

        let ids = graph.multiply_segment(b"s", &["s2", "s3"]).unwrap();
        assert_eq!(ids.len(), 2);

        for name in &[&b"s"[..], b"s2", b"s3"] {
            let seg = graph.segment(name).unwrap();
            assert_eq!(seg.get_optional_integer(b"KC"), Some(3));
            assert_eq!(seg.get_optional_integer(b"RC"), Some(2));
        }
        assert_eq!(
            graph.segment(b"a").unwrap().get_optional_integer(b"KC"),
            Some(10)
        );

        // the self-loop is divided once, and copied onto each end
        let loop_counts: Vec<_> = graph
            .links()
            .filter(|l| l.get_optional_integer(b"KC").is_some())
            .map(|l| l.get_optional_integer(b"KC"))
            .collect();
        assert_eq!(loop_counts, vec![Some(4); 5]);

        assert!(graph.links_to(b"s2").any(|l| l.from_segment == "a"));
        assert!(graph.links_from(b"s3").any(|l| l.to_segment == "s"));
        assert!(graph.links_to(b"s3").any(|l| l.from_segment == "s"));
        assert_eq!(graph.containments_of(b"s2").len(), 1);
        assert_eq!(graph.count(LineKind::Link), 2 + 2 * 3);
        assert_eq!(graph.count(LineKind::Containment), 3);
        assert!(graph.indices_consistent());
    }

    #[test]
    fn multiply_validates_before_editing() {
        let mut graph: Graph<OptionalFields> =
            graph_from(vec![counted("s", "A", 8, 8), counted("t", "A", 1, 1)]);
        let empty: &[&str] = &[];

        assert!(matches!(
            graph.multiply_segment(b"s", empty),
            Err(GraphError::InvalidArgument(_))
        ));
        assert_eq!(
            graph.multiply_segment(b"s", &["u", "t"]),
            Err(GraphError::DuplicateName("t".into()))
        );
        assert_eq!(
            graph.multiply_segment(b"s", &["u", "u"]),
            Err(GraphError::DuplicateName("u".into()))
        );
        assert_eq!(
            graph.duplicate_segment(b"x", b"y"),
            Err(GraphError::NotFound(LineKind::Segment, "x".into()))
        );
        assert_eq!(
            graph.segment(b"s").unwrap().get_optional_integer(b"KC"),
            Some(8)
        );
        assert_eq!(graph.count(LineKind::Segment), 2);
    }

    #[test]
    fn duplicate_then_delete_restores_edges() {
        let mut graph: Graph<OptionalFields> = graph_from(vec![
            counted("a", "A", 5, 5),
            counted("s", "C", 8, 3),
            segment("b", "G"),
            link("a", Forward, "s", Forward, "*"),
            link("s", Forward, "b", Backward, "*"),
        ]);
        let before: Vec<_> = graph.links().cloned().collect();

        graph.duplicate_segment(b"s", b"c").unwrap();
        assert_eq!(graph.count(LineKind::Link), 4);
        graph.delete_segment(b"c").unwrap();

        let after: Vec<_> = graph.links().cloned().collect();
        assert_eq!(before, after);
        let s = graph.segment(b"s").unwrap();
        assert_eq!(s.get_optional_integer(b"KC"), Some(4));
        assert_eq!(s.get_optional_integer(b"RC"), Some(1));
        assert!(graph.indices_consistent());
    }

    #[test]
    fn unbranched_walks() {
        let graph: Graph<()> = graph_from(vec![
            link("a", Forward, "b", Forward, "*"),
            link("b", Forward, "c", Backward, "*"),
            link("c", Backward, "d", Forward, "*"),
            link("d", Forward, "e", Forward, "*"),
            link("d", Forward, "f", Forward, "*"),
            link("x", Forward, "y", Backward, "*"),
            link("y", Forward, "z", Forward, "*"),
        ]);

        let walk = graph.find_unbranched_path(b"a", b"d").unwrap();
        assert_eq!(walk.segments, vec!["a", "b", "c", "d"]);
        assert_eq!(walk.links, vec![0, 1, 2]);

        let no_path = |from: &str, to: &str| GraphError::NoUnbranchedPath {
            from: from.into(),
            to: to.into(),
        };
        assert_eq!(graph.find_unbranched_path(b"a", b"e"), Err(no_path("a", "e")));
        assert_eq!(graph.find_unbranched_path(b"e", b"a"), Err(no_path("e", "a")));
        assert_eq!(graph.find_unbranched_path(b"x", b"z"), Err(no_path("x", "z")));
    }

    #[test]
    fn cyclic_walks_are_detected() {
        let graph: Graph<()> = graph_from(vec![
            link("a", Forward, "b", Forward, "*"),
            link("b", Forward, "c", Forward, "*"),
            link("c", Forward, "a", Forward, "*"),
        ]);
        assert_eq!(
            graph.find_unbranched_path(b"a", b"z"),
            Err(GraphError::CyclicSegmentPath {
                from: "a".into(),
                to: "z".into()
            })
        );
    }

    #[test]
    fn merge_without_overlap() {
        let mut graph: Graph<()> = graph_from(vec![
            segment("A", "ACGT"),
            segment("B", "GGTT"),
            link("A", Forward, "B", Forward, "0M"),
        ]);
        let merged = graph.merge_unbranched_segpath(b"A", b"B").unwrap();
        assert_eq!(merged, "A_B");
        assert_eq!(graph.segment(b"A_B").unwrap().sequence, "ACGTGGTT");
        assert!(graph.segment(b"A").is_none());
        assert_eq!(graph.count(LineKind::Segment), 1);
        assert_eq!(graph.count(LineKind::Link), 0);
        assert!(graph.indices_consistent());
    }

    #[test]
    fn merge_with_overlap_and_counts() {
        let mut graph = graph_from(vec![
            counted("A", "ACGTAG", 10, 1),
            counted("B", "AGCTTT", 5, 2),
            segment("x", "TTAC"),
            segment("y", "GG"),
            link("x", Forward, "A", Forward, "2M"),
            link("A", Forward, "B", Forward, "2M"),
            link("B", Forward, "y", Backward, "*"),
            Line::Path(Path::new(
                b"p",
                vec![("A".into(), Forward), ("B".into(), Forward)],
                vec![],
            )),
        ]);

        let merged = graph.merge_unbranched_segpath(b"A", b"B").unwrap();
        let seg = graph.segment(&merged).unwrap();
        assert_eq!(seg.sequence, "ACGTAGCTTT");
        assert_eq!(seg.get_optional_integer(b"KC"), Some(15));
        assert_eq!(seg.get_optional_integer(b"RC"), Some(3));
        assert_eq!(seg.get_optional_integer(b"FC"), None);

        let entering: Vec<_> = graph.links_to(b"A_B").collect();
        assert_eq!(entering.len(), 1);
        assert_eq!(entering[0].from_segment, "x");
        assert_eq!(entering[0].to_orient, Forward);
        assert_eq!(entering[0].overlap, CIGAR::from_bytestring(b"2M"));

        let leaving: Vec<_> = graph.links_from(b"A_B").collect();
        assert_eq!(leaving.len(), 1);
        assert_eq!(leaving[0].to_segment, "y");
        assert_eq!(leaving[0].from_orient, Forward);

        assert!(graph.path(b"p").is_none());
        assert!(graph.indices_consistent());
    }

    #[test]
    fn merge_reverse_chain() {
        let mut graph: Graph<()> = graph_from(vec![
            segment("A", "TTG"),
            segment("B", "ACT"),
            segment("x", "A"),
            link("x", Forward, "A", Backward, "*"),
            link("A", Backward, "B", Backward, "1M"),
        ]);

        let merged = graph.merge_unbranched_segpath(b"A", b"B").unwrap();
        assert_eq!(graph.segment(&merged).unwrap().sequence, "CAAGT");

        let entering: Vec<_> = graph.links_to(&merged).collect();
        assert_eq!(entering.len(), 1);
        assert_eq!(entering[0].to_orient, Forward);
        assert!(graph.indices_consistent());
    }

    #[test]
    fn merge_rejects_bad_overlaps() {
        let mut graph: Graph<()> = graph_from(vec![
            segment("A", "ACGT"),
            segment("B", "TTTT"),
            segment("C", "GGGG"),
            link("A", Forward, "B", Forward, "2M"),
            link("B", Forward, "C", Forward, "1M1I"),
        ]);

        assert_eq!(
            graph.merge_unbranched_segpath(b"A", b"B"),
            Err(GraphError::InconsistentOverlap {
                from: "A".into(),
                to: "B".into()
            })
        );
        assert!(matches!(
            graph.merge_unbranched_segpath(b"B", b"C"),
            Err(GraphError::UnsupportedOverlap { .. })
        ));
        assert!(matches!(
            graph.merge_unbranched_segpath(b"A", b"A"),
            Err(GraphError::InvalidArgument(_))
        ));
        assert_eq!(graph.count(LineKind::Segment), 3);
        assert_eq!(graph.count(LineKind::Link), 2);
        assert!(graph.indices_consistent());
    }

    #[test]
    fn merge_of_unknown_sequences() {
        let mut graph: Graph<()> = graph_from(vec![
            segment("A", "ACGT"),
            segment("B", "*"),
            link("A", Forward, "B", Forward, "3M"),
        ]);
        let merged = graph.merge_unbranched_segpath(b"A", b"B").unwrap();
        assert!(graph.segment(&merged).unwrap().has_unknown_sequence());
    }

    #[test]
    fn merge_checks_the_whole_chain_first() {
        let mut graph: Graph<()> = graph_from(vec![
            segment("A", "*"),
            segment("C", "ACGT"),
            link("A", Forward, "B", Forward, "*"),
            link("B", Forward, "C", Forward, "*"),
        ]);
        let before = graph.to_string();

        assert_eq!(
            graph.merge_unbranched_segpath(b"A", b"C"),
            Err(GraphError::NotFound(LineKind::Segment, "B".into()))
        );
        assert_eq!(graph.to_string(), before);
        assert!(graph.segment(b"A").is_some());
        assert!(graph.segment(b"A_B_C").is_none());
        assert!(graph.indices_consistent());
    }

    #[test]
    fn merge_joins_pairs_in_order() {
        let mut graph: Graph<()> = graph_from(vec![
            segment("A", "ACGT"),
            segment("B", "GTCC"),
            segment("C", "*"),
            link("A", Forward, "B", Forward, "1M1I"),
            link("B", Forward, "C", Forward, "*"),
        ]);
        assert!(matches!(
            graph.merge_unbranched_segpath(b"A", b"C"),
            Err(GraphError::UnsupportedOverlap { .. })
        ));
        assert_eq!(graph.count(LineKind::Segment), 3);

        // an unknown pair ends the join before later overlaps are read
        let mut graph: Graph<()> = graph_from(vec![
            segment("A", "*"),
            segment("B", "GTCC"),
            segment("C", "TTTT"),
            link("A", Forward, "B", Forward, "*"),
            link("B", Forward, "C", Forward, "1M1I"),
        ]);
        let merged = graph.merge_unbranched_segpath(b"A", b"C").unwrap();
        assert!(graph.segment(&merged).unwrap().has_unknown_sequence());
    }

    #[test]
    fn merged_segment_keeps_first_tags() {
        let mut first: Segment<OptionalFields> = Segment::new(b"A", b"ACGT");
        first.set_optional_integer(b"XA", 42);
        first.set_optional_integer(b"KC", 3);
        let mut second: Segment<OptionalFields> = Segment::new(b"B", b"TT");
        second.set_optional_integer(b"XA", 7);
        second.set_optional_integer(b"KC", 4);

        let mut graph: Graph<OptionalFields> = graph_from(vec![
            Line::Segment(first),
            Line::Segment(second),
            link("A", Forward, "B", Forward, "*"),
        ]);
        let merged = graph.merge_unbranched_segpath(b"A", b"B").unwrap();
        let seg = graph.segment(&merged).unwrap();
        assert_eq!(seg.sequence, "ACGTTT");
        assert_eq!(seg.get_optional_integer(b"XA"), Some(42));
        assert_eq!(seg.get_optional_integer(b"KC"), Some(7));
    }

    #[test]
    fn merge_needs_a_branch_free_chain() {
        let mut graph: Graph<()> = graph_from(vec![
            segment("A", "A"),
            segment("B", "C"),
            segment("C", "G"),
            segment("D", "T"),
            link("A", Forward, "B", Forward, "*"),
            link("B", Forward, "C", Forward, "*"),
            link("B", Forward, "D", Forward, "*"),
        ]);
        assert_eq!(
            graph.merge_unbranched_segpath(b"A", b"C"),
            Err(GraphError::NoUnbranchedPath {
                from: "A".into(),
                to: "C".into()
            })
        );
        assert_eq!(graph.count(LineKind::Segment), 4);
    }
}
