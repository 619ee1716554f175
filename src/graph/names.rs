use bstr::{BStr, BString, ByteSlice};

use fnv::FnvHashMap;

use super::error::{GraphError, GraphResult};

/// Bidirectional map between names and store slots.
#[derive(Debug, Default, Clone, PartialEq)]
pub(crate) struct NameMap {
    name_map: FnvHashMap<BString, usize>,
    inverse_map: Vec<Option<BString>>,
}

impl NameMap {
    #[inline]
    pub(crate) fn map_name<N: AsRef<[u8]>>(&self, name: N) -> Option<usize> {
        self.name_map.get(name.as_ref().as_bstr()).copied()
    }

    #[inline]
    pub(crate) fn inverse_map_name(&self, slot: usize) -> Option<&BStr> {
        self.inverse_map
            .get(slot)
            .and_then(Option::as_ref)
            .map(|n| n.as_bstr())
    }

    pub(crate) fn insert(&mut self, name: BString, slot: usize) {
        if self.inverse_map.len() <= slot {
            self.inverse_map.resize(slot + 1, None);
        }
        self.inverse_map[slot] = Some(name.clone());
        self.name_map.insert(name, slot);
    }

    pub(crate) fn remove(&mut self, name: &[u8]) -> Option<usize> {
        let slot = self.name_map.remove(name.as_bstr())?;
        if let Some(entry) = self.inverse_map.get_mut(slot) {
            *entry = None;
        }
        Some(slot)
    }

    pub(crate) fn len(&self) -> usize {
        self.name_map.len()
    }
}

/// Segment and path names, which share a single namespace.
#[derive(Debug, Default, Clone)]
pub(crate) struct NameIndex {
    pub(crate) segments: NameMap,
    pub(crate) paths: NameMap,
}

impl NameIndex {
    #[inline]
    pub(crate) fn is_used(&self, name: &[u8]) -> bool {
        self.segments.map_name(name).is_some()
            || self.paths.map_name(name).is_some()
    }

    pub(crate) fn check_unused(&self, name: &[u8]) -> GraphResult<()> {
        if self.is_used(name) {
            Err(GraphError::DuplicateName(name.into()))
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_map_both_ways() {
        let mut map = NameMap::default();
        map.insert("s1".into(), 0);
        map.insert("s2".into(), 3);

        assert_eq!(map.map_name("s2"), Some(3));
        assert_eq!(map.inverse_map_name(3), Some("s2".into()));
        assert_eq!(map.inverse_map_name(1), None);
        assert_eq!(map.inverse_map_name(10), None);
        assert_eq!(map.len(), 2);

        assert_eq!(map.remove(b"s2"), Some(3));
        assert_eq!(map.remove(b"s2"), None);
        assert_eq!(map.map_name("s2"), None);
        assert_eq!(map.inverse_map_name(3), None);
    }

    #[test]
    fn segments_and_paths_share_names() {
        let mut names = NameIndex::default();
        names.segments.insert("x".into(), 0);
        names.paths.insert("p".into(), 0);

        assert!(names.check_unused(b"y").is_ok());
        assert_eq!(
            names.check_unused(b"p"),
            Err(GraphError::DuplicateName("p".into()))
        );
        assert!(names.is_used(b"x"));
    }
}
