use crate::{
    gfa::{
        Containment, Edge, Header, Line, LineKind, LineRef, Link, Path,
        Segment,
    },
    optfields::OptFields,
};

/// Identifies a line by its record kind and its slot in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LineId {
    pub kind: LineKind,
    pub slot: usize,
}

impl LineId {
    #[inline]
    pub fn new(kind: LineKind, slot: usize) -> Self {
        LineId { kind, slot }
    }
}

/// Append-only slot array. Removing a line leaves an empty slot
/// behind, so slot indices stay valid for the life of the store.
#[derive(Debug, Clone)]
pub(crate) struct Slots<L> {
    lines: Vec<Option<L>>,
    live: usize,
}

impl<L> Default for Slots<L> {
    fn default() -> Self {
        Slots {
            lines: Vec::new(),
            live: 0,
        }
    }
}

impl<L> Slots<L> {
    pub(crate) fn push(&mut self, line: L) -> usize {
        let slot = self.lines.len();
        self.lines.push(Some(line));
        self.live += 1;
        slot
    }

    #[inline]
    pub(crate) fn get(&self, slot: usize) -> Option<&L> {
        self.lines.get(slot).and_then(Option::as_ref)
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, slot: usize) -> Option<&mut L> {
        self.lines.get_mut(slot).and_then(Option::as_mut)
    }

    /// Empties the slot, returning the line if it was live.
    pub(crate) fn tombstone(&mut self, slot: usize) -> Option<L> {
        let line = self.lines.get_mut(slot).and_then(Option::take);
        if line.is_some() {
            self.live -= 1;
        }
        line
    }

    /// Live lines with their slots, in insertion order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = (usize, &L)> + '_ {
        self.lines
            .iter()
            .enumerate()
            .filter_map(|(slot, line)| line.as_ref().map(|l| (slot, l)))
    }

    #[inline]
    pub(crate) fn live(&self) -> usize {
        self.live
    }
}

/// Per record kind slot arrays holding every line of a graph.
#[derive(Debug, Clone)]
pub(crate) struct LineStore<T: OptFields> {
    pub(crate) headers: Slots<Header<T>>,
    pub(crate) segments: Slots<Segment<T>>,
    pub(crate) links: Slots<Link<T>>,
    pub(crate) containments: Slots<Containment<T>>,
    pub(crate) paths: Slots<Path<T>>,
}

impl<T: OptFields> Default for LineStore<T> {
    fn default() -> Self {
        LineStore {
            headers: Default::default(),
            segments: Default::default(),
            links: Default::default(),
            containments: Default::default(),
            paths: Default::default(),
        }
    }
}

impl<T: OptFields> LineStore<T> {
    pub(crate) fn insert(&mut self, line: Line<T>) -> LineId {
        let kind = line.kind();
        let slot = match line {
            Line::Header(x) => self.headers.push(x),
            Line::Segment(x) => self.segments.push(x),
            Line::Link(x) => self.links.push(x),
            Line::Containment(x) => self.containments.push(x),
            Line::Path(x) => self.paths.push(x),
        };
        LineId::new(kind, slot)
    }

    pub(crate) fn get(&self, id: LineId) -> Option<LineRef<'_, T>> {
        let slot = id.slot;
        match id.kind {
            LineKind::Header => self.headers.get(slot).map(LineRef::Header),
            LineKind::Segment => self.segments.get(slot).map(LineRef::Segment),
            LineKind::Link => self.links.get(slot).map(LineRef::Link),
            LineKind::Containment => {
                self.containments.get(slot).map(LineRef::Containment)
            }
            LineKind::Path => self.paths.get(slot).map(LineRef::Path),
        }
    }

    pub(crate) fn live(&self, kind: LineKind) -> usize {
        match kind {
            LineKind::Header => self.headers.live(),
            LineKind::Segment => self.segments.live(),
            LineKind::Link => self.links.live(),
            LineKind::Containment => self.containments.live(),
            LineKind::Path => self.paths.live(),
        }
    }
}

/// Edge records with their own slot array in a `LineStore`.
pub(crate) trait EdgeSlots<T: OptFields>: Edge + Into<Line<T>> {
    fn slots(store: &LineStore<T>) -> &Slots<Self>;

    fn slots_mut(store: &mut LineStore<T>) -> &mut Slots<Self>;
}

impl<T: OptFields> EdgeSlots<T> for Link<T> {
    #[inline]
    fn slots(store: &LineStore<T>) -> &Slots<Self> {
        &store.links
    }

    #[inline]
    fn slots_mut(store: &mut LineStore<T>) -> &mut Slots<Self> {
        &mut store.links
    }
}

impl<T: OptFields> EdgeSlots<T> for Containment<T> {
    #[inline]
    fn slots(store: &LineStore<T>) -> &Slots<Self> {
        &store.containments
    }

    #[inline]
    fn slots_mut(store: &mut LineStore<T>) -> &mut Slots<Self> {
        &mut store.containments
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tombstoned_slots_are_not_reused() {
        let mut slots: Slots<&str> = Default::default();
        assert_eq!(slots.push("a"), 0);
        assert_eq!(slots.push("b"), 1);
        assert_eq!(slots.tombstone(0), Some("a"));
        assert_eq!(slots.tombstone(0), None);
        assert_eq!(slots.push("c"), 2);

        assert_eq!(slots.get(0), None);
        assert_eq!(slots.get(2), Some(&"c"));
        assert_eq!(slots.live(), 2);
        let live: Vec<_> = slots.iter().map(|(i, l)| (i, *l)).collect();
        assert_eq!(live, vec![(1, "b"), (2, "c")]);
    }

    #[test]
    fn store_dispatches_on_kind() {
        let mut store: LineStore<()> = Default::default();
        let seg = store.insert(Line::Segment(Segment::new(b"1", b"ACGT")));
        let hdr = store.insert(Line::Header(Header::default()));
        assert_eq!(seg, LineId::new(LineKind::Segment, 0));
        assert_eq!(hdr, LineId::new(LineKind::Header, 0));

        assert!(matches!(store.get(seg), Some(LineRef::Segment(_))));
        assert_eq!(store.live(LineKind::Segment), 1);
        assert!(store.segments.tombstone(seg.slot).is_some());
        assert!(store.get(seg).is_none());
        assert_eq!(store.live(LineKind::Segment), 0);
        assert_eq!(store.live(LineKind::Header), 1);
    }
}
