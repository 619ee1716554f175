use std::fmt::{self, Write};

use crate::{
    gfa::{Containment, Header, Line, Link, Overlap, Path, Segment},
    graph::Graph,
    optfields::OptFields,
};

fn write_optional_fields<T: OptFields, W: Write>(
    optional: &T,
    stream: &mut W,
) -> fmt::Result {
    for field in optional.fields() {
        write!(stream, "\t{}", field)?;
    }
    Ok(())
}

fn write_overlap<W: Write>(overlap: &Overlap, stream: &mut W) -> fmt::Result {
    match overlap {
        Some(cigar) => write!(stream, "{}", cigar),
        None => write!(stream, "*"),
    }
}

pub fn write_header<T: OptFields, W: Write>(
    header: &Header<T>,
    stream: &mut W,
) -> fmt::Result {
    write!(stream, "H")?;
    if let Some(version) = &header.version {
        write!(stream, "\tVN:Z:{}", version)?;
    }
    write_optional_fields(&header.optional, stream)
}

pub fn write_segment<T: OptFields, W: Write>(
    seg: &Segment<T>,
    stream: &mut W,
) -> fmt::Result {
    write!(stream, "S\t{}\t{}", seg.name, seg.sequence)?;
    write_optional_fields(&seg.optional, stream)
}

pub fn write_link<T: OptFields, W: Write>(
    link: &Link<T>,
    stream: &mut W,
) -> fmt::Result {
    write!(
        stream,
        "L\t{}\t{}\t{}\t{}\t",
        link.from_segment, link.from_orient, link.to_segment, link.to_orient
    )?;
    write_overlap(&link.overlap, stream)?;
    write_optional_fields(&link.optional, stream)
}

pub fn write_containment<T: OptFields, W: Write>(
    cont: &Containment<T>,
    stream: &mut W,
) -> fmt::Result {
    write!(
        stream,
        "C\t{}\t{}\t{}\t{}\t{}\t",
        cont.container_name,
        cont.container_orient,
        cont.contained_name,
        cont.contained_orient,
        cont.pos
    )?;
    write_overlap(&cont.overlap, stream)?;
    write_optional_fields(&cont.optional, stream)
}

// An empty overlap list is written as `*`
pub fn write_path<T: OptFields, W: Write>(
    path: &Path<T>,
    stream: &mut W,
) -> fmt::Result {
    write!(stream, "P\t{}\t", path.path_name)?;
    for (i, (name, orient)) in path.iter().enumerate() {
        if i != 0 {
            write!(stream, ",")?;
        }
        write!(stream, "{}{}", name, orient)?;
    }
    write!(stream, "\t")?;
    if path.overlaps.is_empty() {
        write!(stream, "*")?;
    }
    for (i, overlap) in path.overlaps.iter().enumerate() {
        if i != 0 {
            write!(stream, ",")?;
        }
        write_overlap(overlap, stream)?;
    }
    write_optional_fields(&path.optional, stream)
}

pub fn write_line<T: OptFields, W: Write>(
    line: &Line<T>,
    stream: &mut W,
) -> fmt::Result {
    match line {
        Line::Header(x) => write_header(x, stream),
        Line::Segment(x) => write_segment(x, stream),
        Line::Link(x) => write_link(x, stream),
        Line::Containment(x) => write_containment(x, stream),
        Line::Path(x) => write_path(x, stream),
    }
}

/// Writes every live line of the graph, one per line, with headers
/// first, then segments, links, containments, and paths.
pub fn write_graph<T: OptFields, W: Write>(
    graph: &Graph<T>,
    stream: &mut W,
) -> fmt::Result {
    for header in graph.headers() {
        write_header(header, stream)?;
        writeln!(stream)?;
    }
    for seg in graph.segments() {
        write_segment(seg, stream)?;
        writeln!(stream)?;
    }
    for link in graph.links() {
        write_link(link, stream)?;
        writeln!(stream)?;
    }
    for cont in graph.containments() {
        write_containment(cont, stream)?;
        writeln!(stream)?;
    }
    for path in graph.paths() {
        write_path(path, stream)?;
        writeln!(stream)?;
    }
    Ok(())
}

macro_rules! impl_display_gfa {
    ($($line:ident => $writer:ident),* $(,)?) => {
        $(
            impl<T: OptFields> fmt::Display for $line<T> {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    $writer(self, f)
                }
            }
        )*
    };
}

impl_display_gfa!(
    Header => write_header,
    Segment => write_segment,
    Link => write_link,
    Containment => write_containment,
    Path => write_path,
    Line => write_line,
    Graph => write_graph,
);
