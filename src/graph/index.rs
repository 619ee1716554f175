use std::collections::BTreeSet;

use bstr::{BString, ByteSlice};

use fnv::FnvHashMap;

use crate::gfa::EdgeKind;

/// Which end of an edge a segment is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EndpointRole {
    From,
    To,
}

impl EndpointRole {
    pub const ALL: [EndpointRole; 2] = [EndpointRole::From, EndpointRole::To];
}

type SlotSets = FnvHashMap<BString, BTreeSet<usize>>;

static EMPTY: BTreeSet<usize> = BTreeSet::new();

fn add_slot(sets: &mut SlotSets, name: &[u8], slot: usize) {
    sets.entry(name.into()).or_default().insert(slot);
}

fn remove_slot(sets: &mut SlotSets, name: &[u8], slot: usize) {
    if let Some(set) = sets.get_mut(name.as_bstr()) {
        set.remove(&slot);
        if set.is_empty() {
            sets.remove(name.as_bstr());
        }
    }
}

/// For each edge kind and endpoint role, the slots of the edges
/// attached to a segment there.
#[derive(Debug, Default, Clone)]
pub(crate) struct ConnectivityIndex {
    sets: [SlotSets; 4],
}

impl ConnectivityIndex {
    #[inline]
    fn sets(&self, kind: EdgeKind, role: EndpointRole) -> &SlotSets {
        &self.sets[kind as usize * 2 + role as usize]
    }

    #[inline]
    fn sets_mut(&mut self, kind: EdgeKind, role: EndpointRole) -> &mut SlotSets {
        &mut self.sets[kind as usize * 2 + role as usize]
    }

    pub(crate) fn index_edge(
        &mut self,
        kind: EdgeKind,
        slot: usize,
        from: &[u8],
        to: &[u8],
    ) {
        log::trace!(
            "index {:?} {} at {} -> {}",
            kind,
            slot,
            from.as_bstr(),
            to.as_bstr()
        );
        add_slot(self.sets_mut(kind, EndpointRole::From), from, slot);
        add_slot(self.sets_mut(kind, EndpointRole::To), to, slot);
    }

    /// Entries that are not present are ignored.
    pub(crate) fn unindex_edge(
        &mut self,
        kind: EdgeKind,
        slot: usize,
        from: &[u8],
        to: &[u8],
    ) {
        log::trace!("unindex {:?} {}", kind, slot);
        remove_slot(self.sets_mut(kind, EndpointRole::From), from, slot);
        remove_slot(self.sets_mut(kind, EndpointRole::To), to, slot);
    }

    pub(crate) fn edges_at(
        &self,
        kind: EdgeKind,
        role: EndpointRole,
        name: &[u8],
    ) -> &BTreeSet<usize> {
        self.sets(kind, role).get(name.as_bstr()).unwrap_or(&EMPTY)
    }

    /// Every (segment name, slot) entry of one kind and role.
    pub(crate) fn entries(
        &self,
        kind: EdgeKind,
        role: EndpointRole,
    ) -> impl Iterator<Item = (&BString, usize)> + '_ {
        self.sets(kind, role)
            .iter()
            .flat_map(|(name, slots)| slots.iter().map(move |&s| (name, s)))
    }
}

/// Paths traversing each segment.
#[derive(Debug, Default, Clone)]
pub(crate) struct BackReferenceIndex {
    paths_with: SlotSets,
}

impl BackReferenceIndex {
    pub(crate) fn index_path<'a, I>(&mut self, slot: usize, segment_names: I)
    where
        I: IntoIterator<Item = &'a [u8]>,
    {
        for name in segment_names {
            add_slot(&mut self.paths_with, name, slot);
        }
    }

    /// Entries that are not present are ignored.
    pub(crate) fn unindex_path<'a, I>(&mut self, slot: usize, segment_names: I)
    where
        I: IntoIterator<Item = &'a [u8]>,
    {
        for name in segment_names {
            remove_slot(&mut self.paths_with, name, slot);
        }
    }

    pub(crate) fn paths_through(&self, name: &[u8]) -> &BTreeSet<usize> {
        self.paths_with.get(name.as_bstr()).unwrap_or(&EMPTY)
    }

    pub(crate) fn entries(&self) -> impl Iterator<Item = (&BString, usize)> + '_ {
        self.paths_with
            .iter()
            .flat_map(|(name, slots)| slots.iter().map(move |&s| (name, s)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edges_are_indexed_at_both_ends() {
        use EdgeKind::*;
        use EndpointRole::*;

        let mut index = ConnectivityIndex::default();
        index.index_edge(Link, 0, b"a", b"b");
        index.index_edge(Link, 1, b"a", b"c");
        index.index_edge(Containment, 0, b"a", b"b");

        let slots = |k, r, n: &[u8]| -> Vec<usize> {
            index.edges_at(k, r, n).iter().copied().collect()
        };
        assert_eq!(slots(Link, From, b"a"), vec![0, 1]);
        assert_eq!(slots(Link, To, b"b"), vec![0]);
        assert_eq!(slots(Link, To, b"a"), Vec::<usize>::new());
        assert_eq!(slots(Containment, To, b"b"), vec![0]);
    }

    #[test]
    fn unindexing_is_idempotent() {
        use EdgeKind::*;
        use EndpointRole::*;

        let mut index = ConnectivityIndex::default();
        index.index_edge(Link, 4, b"a", b"a");
        index.unindex_edge(Link, 4, b"a", b"a");
        index.unindex_edge(Link, 4, b"a", b"a");
        index.unindex_edge(Containment, 9, b"x", b"y");

        assert!(index.edges_at(Link, From, b"a").is_empty());
        assert_eq!(index.entries(Link, To).count(), 0);
    }

    #[test]
    fn paths_are_indexed_per_segment() {
        let mut index = BackReferenceIndex::default();
        index.index_path(2, vec![&b"a"[..], b"b", b"a"]);
        index.index_path(5, vec![&b"b"[..]]);

        assert_eq!(index.paths_through(b"a").len(), 1);
        assert_eq!(
            index.paths_through(b"b").iter().copied().collect::<Vec<_>>(),
            vec![2, 5]
        );

        index.unindex_path(2, vec![&b"a"[..], b"b", b"a"]);
        assert!(index.paths_through(b"a").is_empty());
        assert_eq!(index.entries().count(), 1);
    }
}
