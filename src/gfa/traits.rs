use bstr::{BStr, BString, ByteSlice};

use crate::optfields::{OptFields, OptTag};

use super::{Containment, Header, Line, LineKind, Link, Orientation, Path, Segment};

/// Typed access to the optional integer fields of a line, e.g. the
/// `KC`, `RC` and `FC` counts.
pub trait OptionalIntegers {
    fn get_optional_integer(&self, tag: &OptTag) -> Option<i64>;

    /// Has no effect on lines that do not store optional fields.
    fn set_optional_integer(&mut self, tag: &OptTag, value: i64);
}

macro_rules! impl_optional_integers {
    ($($line:ident),* $(,)?) => {
        $(
            impl<T: OptFields> OptionalIntegers for $line<T> {
                #[inline]
                fn get_optional_integer(&self, tag: &OptTag) -> Option<i64> {
                    self.optional.get_int(tag)
                }

                #[inline]
                fn set_optional_integer(&mut self, tag: &OptTag, value: i64) {
                    self.optional.set_int(tag, value)
                }
            }
        )*
    };
}

impl_optional_integers!(Header, Segment, Link, Containment, Path);

impl<T: OptFields> OptionalIntegers for Line<T> {
    fn get_optional_integer(&self, tag: &OptTag) -> Option<i64> {
        match self {
            Line::Header(x) => x.get_optional_integer(tag),
            Line::Segment(x) => x.get_optional_integer(tag),
            Line::Link(x) => x.get_optional_integer(tag),
            Line::Containment(x) => x.get_optional_integer(tag),
            Line::Path(x) => x.get_optional_integer(tag),
        }
    }

    fn set_optional_integer(&mut self, tag: &OptTag, value: i64) {
        match self {
            Line::Header(x) => x.set_optional_integer(tag, value),
            Line::Segment(x) => x.set_optional_integer(tag, value),
            Line::Link(x) => x.set_optional_integer(tag, value),
            Line::Containment(x) => x.set_optional_integer(tag, value),
            Line::Path(x) => x.set_optional_integer(tag, value),
        }
    }
}

/// The kinds of lines that connect two segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EdgeKind {
    Link,
    Containment,
}

impl EdgeKind {
    pub const ALL: [EdgeKind; 2] = [EdgeKind::Link, EdgeKind::Containment];
}

impl From<EdgeKind> for LineKind {
    fn from(kind: EdgeKind) -> Self {
        match kind {
            EdgeKind::Link => LineKind::Link,
            EdgeKind::Containment => LineKind::Containment,
        }
    }
}

/// Lines connecting two segment ends: links and containments.
pub trait Edge: OptionalIntegers + Clone {
    const KIND: EdgeKind;

    fn from_segment(&self) -> &BStr;
    fn from_orient(&self) -> Orientation;
    fn to_segment(&self) -> &BStr;
    fn to_orient(&self) -> Orientation;

    fn set_from_segment(&mut self, name: BString);
    fn set_to_segment(&mut self, name: BString);

    #[inline]
    fn is_self_loop(&self) -> bool {
        self.from_segment() == self.to_segment()
    }
}

impl<T: OptFields> Edge for Link<T> {
    const KIND: EdgeKind = EdgeKind::Link;

    fn from_segment(&self) -> &BStr {
        self.from_segment.as_bstr()
    }

    fn from_orient(&self) -> Orientation {
        self.from_orient
    }

    fn to_segment(&self) -> &BStr {
        self.to_segment.as_bstr()
    }

    fn to_orient(&self) -> Orientation {
        self.to_orient
    }

    fn set_from_segment(&mut self, name: BString) {
        self.from_segment = name;
    }

    fn set_to_segment(&mut self, name: BString) {
        self.to_segment = name;
    }
}

impl<T: OptFields> Edge for Containment<T> {
    const KIND: EdgeKind = EdgeKind::Containment;

    fn from_segment(&self) -> &BStr {
        self.container_name.as_bstr()
    }

    fn from_orient(&self) -> Orientation {
        self.container_orient
    }

    fn to_segment(&self) -> &BStr {
        self.contained_name.as_bstr()
    }

    fn to_orient(&self) -> Orientation {
        self.contained_orient
    }

    fn set_from_segment(&mut self, name: BString) {
        self.container_name = name;
    }

    fn set_to_segment(&mut self, name: BString) {
        self.contained_name = name;
    }
}
