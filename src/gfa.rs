pub mod orientation;
pub mod sequence;
pub mod traits;

pub use self::orientation::*;
pub use self::traits::*;

use crate::{cigar::CIGAR, optfields::*};

use bstr::{BStr, BString, ByteSlice};

/// This module defines the various GFA line types that the graph
/// stores, and the tags of the count fields the graph edits.

/// Optional integer tags holding k-mer, read, and fragment counts.
pub const COUNT_TAGS: [OptTag; 3] = [*b"KC", *b"RC", *b"FC"];

/// Overlap of a link, containment, or path step; `None` is the
/// unspecified overlap `*`.
pub type Overlap = Option<CIGAR>;

/// The record kind of a GFA line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LineKind {
    Header,
    Segment,
    Link,
    Containment,
    Path,
}

impl LineKind {
    /// The record type letter used in GFA1 text.
    pub fn record_type(&self) -> char {
        match self {
            LineKind::Header => 'H',
            LineKind::Segment => 'S',
            LineKind::Link => 'L',
            LineKind::Containment => 'C',
            LineKind::Path => 'P',
        }
    }
}

impl std::fmt::Display for LineKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            LineKind::Header => "header",
            LineKind::Segment => "segment",
            LineKind::Link => "link",
            LineKind::Containment => "containment",
            LineKind::Path => "path",
        };
        write!(f, "{}", name)
    }
}

/// Enum containing the different kinds of GFA lines.
#[derive(Debug, Clone, PartialEq, PartialOrd)]
pub enum Line<T: OptFields> {
    Header(Header<T>),
    Segment(Segment<T>),
    Link(Link<T>),
    Containment(Containment<T>),
    Path(Path<T>),
}

#[derive(Debug, Clone, PartialEq, PartialOrd)]
pub enum LineRef<'a, T: OptFields> {
    Header(&'a Header<T>),
    Segment(&'a Segment<T>),
    Link(&'a Link<T>),
    Containment(&'a Containment<T>),
    Path(&'a Path<T>),
}

impl<T: OptFields> Line<T> {
    pub fn kind(&self) -> LineKind {
        match self {
            Line::Header(_) => LineKind::Header,
            Line::Segment(_) => LineKind::Segment,
            Line::Link(_) => LineKind::Link,
            Line::Containment(_) => LineKind::Containment,
            Line::Path(_) => LineKind::Path,
        }
    }

    pub fn as_ref(&self) -> LineRef<'_, T> {
        match self {
            Line::Header(x) => LineRef::Header(x),
            Line::Segment(x) => LineRef::Segment(x),
            Line::Link(x) => LineRef::Link(x),
            Line::Containment(x) => LineRef::Containment(x),
            Line::Path(x) => LineRef::Path(x),
        }
    }
}

macro_rules! impl_into_line {
    ($($line:ident),* $(,)?) => {
        $(
            impl<T: OptFields> From<$line<T>> for Line<T> {
                #[inline]
                fn from(line: $line<T>) -> Self {
                    Line::$line(line)
                }
            }
        )*
    };
}

impl_into_line!(Header, Segment, Link, Containment, Path);

impl<'a, T: OptFields> LineRef<'a, T> {
    pub fn kind(&self) -> LineKind {
        match self {
            LineRef::Header(_) => LineKind::Header,
            LineRef::Segment(_) => LineKind::Segment,
            LineRef::Link(_) => LineKind::Link,
            LineRef::Containment(_) => LineKind::Containment,
            LineRef::Path(_) => LineKind::Path,
        }
    }

    /// Deep copy of the referenced line.
    pub fn to_owned_line(&self) -> Line<T> {
        match self {
            LineRef::Header(x) => Line::Header((*x).clone()),
            LineRef::Segment(x) => Line::Segment((*x).clone()),
            LineRef::Link(x) => Line::Link((*x).clone()),
            LineRef::Containment(x) => Line::Containment((*x).clone()),
            LineRef::Path(x) => Line::Path((*x).clone()),
        }
    }
}

/// A header line of a GFA graph
#[derive(Debug, Clone, PartialEq, PartialOrd)]
pub struct Header<T: OptFields> {
    pub version: Option<BString>,
    pub optional: T,
}

impl<T: OptFields> Default for Header<T> {
    fn default() -> Self {
        Header {
            version: Some("1.0".into()),
            optional: Default::default(),
        }
    }
}

/// A segment in a GFA graph. The sequence `*` marks an unknown
/// sequence.
#[derive(Default, Debug, Clone, PartialEq, PartialOrd)]
pub struct Segment<T: OptFields> {
    pub name: BString,
    pub sequence: BString,
    pub optional: T,
}

impl<T: OptFields> Segment<T> {
    pub fn new(name: &[u8], sequence: &[u8]) -> Self {
        Segment {
            name: BString::from(name),
            sequence: BString::from(sequence),
            optional: Default::default(),
        }
    }

    /// A segment with unknown sequence, used when a segment is only
    /// known by reference.
    pub fn placeholder(name: &[u8]) -> Self {
        Self::new(name, sequence::UNKNOWN)
    }

    pub fn has_unknown_sequence(&self) -> bool {
        sequence::is_unknown(&self.sequence)
    }
}

#[derive(Default, Debug, Clone, PartialEq, PartialOrd)]
pub struct Link<T: OptFields> {
    pub from_segment: BString,
    pub from_orient: Orientation,
    pub to_segment: BString,
    pub to_orient: Orientation,
    pub overlap: Overlap,
    pub optional: T,
}

impl<T: OptFields> Link<T> {
    pub fn new(
        from_segment: &[u8],
        from_orient: Orientation,
        to_segment: &[u8],
        to_orient: Orientation,
        overlap: Overlap,
    ) -> Link<T> {
        Link {
            from_segment: from_segment.into(),
            from_orient,
            to_segment: to_segment.into(),
            to_orient,
            overlap,
            optional: Default::default(),
        }
    }

    /// Whether this link and `other` describe the same dovetail
    /// overlap, either as written or read from the other strand.
    pub fn same_ends<U: OptFields>(&self, other: &Link<U>) -> bool {
        let direct = self.from_segment == other.from_segment
            && self.from_orient == other.from_orient
            && self.to_segment == other.to_segment
            && self.to_orient == other.to_orient;
        let reverse = self.from_segment == other.to_segment
            && self.from_orient == !other.to_orient
            && self.to_segment == other.from_segment
            && self.to_orient == !other.from_orient;
        direct || reverse
    }
}

/// `container_name` contains `contained_name` starting at `pos`.
#[derive(Default, Debug, Clone, PartialEq, PartialOrd)]
pub struct Containment<T: OptFields> {
    pub container_name: BString,
    pub container_orient: Orientation,
    pub contained_name: BString,
    pub contained_orient: Orientation,
    pub pos: usize,
    pub overlap: Overlap,
    pub optional: T,
}

impl<T: OptFields> Containment<T> {
    pub fn new(
        container_name: &[u8],
        container_orient: Orientation,
        contained_name: &[u8],
        contained_orient: Orientation,
        pos: usize,
        overlap: Overlap,
    ) -> Self {
        Containment {
            container_name: container_name.into(),
            container_orient,
            contained_name: contained_name.into(),
            contained_orient,
            pos,
            overlap,
            optional: Default::default(),
        }
    }
}

/// An ordered walk over oriented segments.
#[derive(Default, Debug, Clone, PartialEq, PartialOrd)]
pub struct Path<T: OptFields> {
    pub path_name: BString,
    pub segment_names: Vec<(BString, Orientation)>,
    pub overlaps: Vec<Overlap>,
    pub optional: T,
}

impl<T: OptFields> Path<T> {
    pub fn new(
        path_name: &[u8],
        segment_names: Vec<(BString, Orientation)>,
        overlaps: Vec<Overlap>,
    ) -> Self {
        Path {
            path_name: path_name.into(),
            segment_names,
            overlaps,
            optional: Default::default(),
        }
    }

    /// Produces an iterator over the segments of the given path
    pub fn iter(&self) -> impl Iterator<Item = (&'_ BStr, Orientation)> {
        self.segment_names.iter().map(|(n, o)| (n.as_bstr(), *o))
    }

    /// Whether the walk visits the segment `name`.
    pub fn visits(&self, name: &[u8]) -> bool {
        self.segment_names.iter().any(|(n, _)| n.as_slice() == name)
    }
}
