pub mod error;

pub use self::error::*;

use nom::branch::alt;
use nom::bytes::complete::tag;
use nom::combinator::{all_consuming, map};
use nom::IResult;

use bstr::{io::BufReadExt, BString, ByteSlice};
use lazy_static::lazy_static;
use regex::bytes::Regex;

use crate::{cigar::CIGAR, gfa::*, optfields::*};

/// Builds GFA lines from tab-separated GFA1 records. Only the five
/// record types the graph stores are recognized.
#[derive(Debug, Clone, Default)]
pub struct GFAParser<T: OptFields> {
    tolerance: ParserTolerance,
    _optional_fields: std::marker::PhantomData<T>,
}

impl<T: OptFields> GFAParser<T> {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_tolerance(tolerance: ParserTolerance) -> Self {
        GFAParser {
            tolerance,
            _optional_fields: std::marker::PhantomData,
        }
    }

    pub fn parse_gfa_line(&self, bytes: &[u8]) -> GFAResult<Line<T>> {
        let line = bytes.trim_end_with(|c| c == '\r' || c == '\n');
        if line.is_empty() {
            return Err(ParseError::EmptyLine);
        }

        let mut fields = line.split_str(b"\t");
        let hdr = fields.next().ok_or(ParseError::EmptyLine)?;

        let invalid_line = |e: ParseFieldError| ParseError::invalid_line(e, line);

        let line = match hdr {
            b"H" => Header::parse_line(fields).map(Line::Header),
            b"S" => Segment::parse_line(fields).map(Line::Segment),
            b"L" => Link::parse_line(fields).map(Line::Link),
            b"C" => Containment::parse_line(fields).map(Line::Containment),
            b"P" => Path::parse_line(fields).map(Line::Path),
            _ => return Err(ParseError::UnknownLineType),
        }
        .map_err(invalid_line)?;
        Ok(line)
    }

    /// Parse every line, skipping the errors the tolerance allows.
    pub fn parse_lines<I>(&self, lines: I) -> GFAResult<Vec<Line<T>>>
    where
        I: IntoIterator,
        I::Item: AsRef<[u8]>,
    {
        let mut result = Vec::new();
        for line in lines {
            match self.parse_gfa_line(line.as_ref()) {
                Ok(parsed) => result.push(parsed),
                Err(err) if err.can_safely_continue(&self.tolerance) => {
                    log::trace!("skipping line: {}", err);
                }
                Err(err) => return Err(err),
            }
        }
        Ok(result)
    }

    pub fn parse_file<P: AsRef<std::path::Path>>(
        &self,
        path: P,
    ) -> GFAResult<Vec<Line<T>>> {
        use std::{fs::File, io::BufReader};

        let file = File::open(path.as_ref())?;
        let lines = BufReader::new(file).byte_lines();

        let mut result = Vec::new();
        for line in lines {
            let line = line?;
            match self.parse_gfa_line(&line) {
                Ok(parsed) => result.push(parsed),
                Err(err) if err.can_safely_continue(&self.tolerance) => {
                    log::trace!("skipping line: {}", err);
                }
                Err(err) => return Err(err),
            }
        }
        Ok(result)
    }
}

fn next_field<I, P>(mut input: I) -> GFAFieldResult<P>
where
    I: Iterator<Item = P>,
    P: AsRef<[u8]>,
{
    input.next().ok_or(ParseFieldError::MissingFields)
}

fn parse_name<I>(input: &mut I) -> GFAFieldResult<BString>
where
    I: Iterator,
    I::Item: AsRef<[u8]>,
{
    lazy_static! {
        static ref RE: Regex = Regex::new(r"(?-u)^[!-)+-<>-~][!-~]*$").unwrap();
    }

    let next = next_field(input)?;
    RE.find(next.as_ref())
        .map(|s| BString::from(s.as_bytes()))
        .ok_or(ParseFieldError::InvalidField("name"))
}

fn parse_sequence<I>(input: &mut I) -> GFAFieldResult<BString>
where
    I: Iterator,
    I::Item: AsRef<[u8]>,
{
    lazy_static! {
        static ref RE: Regex = Regex::new(r"(?-u)^(\*|[A-Za-z=.]+)$").unwrap();
    }

    let next = next_field(input)?;
    RE.find(next.as_ref())
        .map(|s| BString::from(s.as_bytes()))
        .ok_or(ParseFieldError::InvalidField("sequence"))
}

fn orientation(input: &[u8]) -> IResult<&[u8], Orientation> {
    let fwd = map(tag("+"), |_| Orientation::Forward);
    let bkw = map(tag("-"), |_| Orientation::Backward);
    all_consuming(alt((fwd, bkw)))(input)
}

fn parse_orientation<I>(input: &mut I) -> GFAFieldResult<Orientation>
where
    I: Iterator,
    I::Item: AsRef<[u8]>,
{
    let next = next_field(input)?;
    let parsed = orientation(next.as_ref()).ok().map(|(_, o)| o);
    Orientation::parse_error(parsed)
}

fn parse_overlap_bytes(input: &[u8]) -> GFAFieldResult<Overlap> {
    if input == b"*" {
        Ok(None)
    } else {
        CIGAR::from_bytestring(input)
            .map(Some)
            .ok_or(ParseFieldError::InvalidField("overlap"))
    }
}

fn parse_overlap<I>(input: &mut I) -> GFAFieldResult<Overlap>
where
    I: Iterator,
    I::Item: AsRef<[u8]>,
{
    let next = next_field(input)?;
    parse_overlap_bytes(next.as_ref())
}

/// Parse a single step of a path's segment list, e.g. `12-`.
fn parse_step(input: &[u8]) -> GFAFieldResult<(BString, Orientation)> {
    let (name, orient) = match input.len() {
        0 | 1 => return Err(ParseFieldError::InvalidField("segment_names")),
        n => input.split_at(n - 1),
    };
    let orient = Orientation::parse_error(Orientation::from_bytes_plus_minus(
        orient,
    ))?;
    Ok((BString::from(name), orient))
}

trait ParseGFA: Sized {
    fn parse_line<I>(input: I) -> GFAFieldResult<Self>
    where
        I: Iterator,
        I::Item: AsRef<[u8]>;
}

impl<T: OptFields> ParseGFA for Header<T> {
    fn parse_line<I>(input: I) -> GFAFieldResult<Self>
    where
        I: Iterator,
        I::Item: AsRef<[u8]>,
    {
        let fields: Vec<OptField> = OptFields::parse(input);

        let mut version = None;
        let mut rest = Vec::with_capacity(fields.len());
        for field in fields {
            match (&field.tag, &field.value) {
                (b"VN", OptFieldVal::Z(vn)) if version.is_none() => {
                    version = Some(vn.clone());
                }
                _ => rest.push(field.to_string()),
            }
        }

        Ok(Header {
            version,
            optional: T::parse(rest),
        })
    }
}

impl<T: OptFields> ParseGFA for Segment<T> {
    fn parse_line<I>(mut input: I) -> GFAFieldResult<Self>
    where
        I: Iterator,
        I::Item: AsRef<[u8]>,
    {
        let name = parse_name(&mut input)?;
        let sequence = parse_sequence(&mut input)?;
        Ok(Segment {
            name,
            sequence,
            optional: T::parse(input),
        })
    }
}

impl<T: OptFields> ParseGFA for Link<T> {
    fn parse_line<I>(mut input: I) -> GFAFieldResult<Self>
    where
        I: Iterator,
        I::Item: AsRef<[u8]>,
    {
        let from_segment = parse_name(&mut input)?;
        let from_orient = parse_orientation(&mut input)?;
        let to_segment = parse_name(&mut input)?;
        let to_orient = parse_orientation(&mut input)?;
        let overlap = parse_overlap(&mut input)?;

        Ok(Link {
            from_segment,
            from_orient,
            to_segment,
            to_orient,
            overlap,
            optional: T::parse(input),
        })
    }
}

impl<T: OptFields> ParseGFA for Containment<T> {
    fn parse_line<I>(mut input: I) -> GFAFieldResult<Self>
    where
        I: Iterator,
        I::Item: AsRef<[u8]>,
    {
        let container_name = parse_name(&mut input)?;
        let container_orient = parse_orientation(&mut input)?;
        let contained_name = parse_name(&mut input)?;
        let contained_orient = parse_orientation(&mut input)?;
        let pos = next_field(&mut input)?;
        let pos = pos.as_ref().to_str()?.parse()?;
        let overlap = parse_overlap(&mut input)?;

        Ok(Containment {
            container_name,
            container_orient,
            contained_name,
            contained_orient,
            pos,
            overlap,
            optional: T::parse(input),
        })
    }
}

impl<T: OptFields> ParseGFA for Path<T> {
    fn parse_line<I>(mut input: I) -> GFAFieldResult<Self>
    where
        I: Iterator,
        I::Item: AsRef<[u8]>,
    {
        let path_name = parse_name(&mut input)?;

        let segment_names = next_field(&mut input)?
            .as_ref()
            .split_str(b",")
            .map(parse_step)
            .collect::<GFAFieldResult<Vec<_>>>()?;

        let overlaps = next_field(&mut input)?;
        let overlaps = match overlaps.as_ref() {
            b"*" => Vec::new(),
            ovs => ovs
                .split_str(b",")
                .map(parse_overlap_bytes)
                .collect::<GFAFieldResult<Vec<_>>>()?,
        };

        Ok(Path {
            path_name,
            segment_names,
            overlaps,
            optional: T::parse(input),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn parse<T: OptFields>(line: &str) -> GFAResult<Line<T>> {
        GFAParser::new().parse_gfa_line(line.as_bytes())
    }

    #[test]
    fn can_parse_header() {
        let hdr: Line<OptionalFields> = parse("H\tVN:Z:1.0\tXX:i:3").unwrap();
        match hdr {
            Line::Header(h) => {
                assert_eq!(h.version, Some("1.0".into()));
                assert_eq!(h.optional.get_int(b"XX"), Some(3));
            }
            _ => panic!("Error parsing header"),
        }
    }

    #[test]
    fn can_parse_link() {
        let link: Line<()> = parse("L\t11\t+\t12\t-\t4M").unwrap();
        let link_ = Link::new(
            b"11",
            Orientation::Forward,
            b"12",
            Orientation::Backward,
            CIGAR::from_bytestring(b"4M"),
        );
        assert_eq!(link, Line::Link(link_));
    }

    #[test]
    fn can_parse_containment() {
        let cont: Line<()> = parse("C\t1\t-\t2\t+\t110\t100M").unwrap();
        let cont_ = Containment::new(
            b"1",
            Orientation::Backward,
            b"2",
            Orientation::Forward,
            110,
            CIGAR::from_bytestring(b"100M"),
        );
        assert_eq!(cont, Line::Containment(cont_));
    }

    #[test]
    fn can_parse_path() {
        use Orientation::*;
        let path: Line<()> = parse("P\t14\t11+,12-,13+\t4M,*").unwrap();
        let path_ = Path::new(
            b"14",
            vec![
                ("11".into(), Forward),
                ("12".into(), Backward),
                ("13".into(), Forward),
            ],
            vec![CIGAR::from_bytestring(b"4M"), None],
        );
        assert_eq!(path, Line::Path(path_));
    }

    #[test]
    fn segment_optional_fields() {
        let seg: Line<OptionalFields> =
            parse("S\t11\tACCTT\tKC:i:123\tUR:Z:http://test.com/").unwrap();
        match seg {
            Line::Segment(s) => {
                assert_eq!(s.name, "11");
                assert_eq!(s.sequence, "ACCTT");
                assert_eq!(s.optional.get_int(b"KC"), Some(123));
                assert_eq!(s.optional.len(), 2);
            }
            _ => panic!("Error parsing segment"),
        }

        let seg: Line<()> = parse("S\t11\t*\tKC:i:123").unwrap();
        assert_eq!(seg, Line::Segment(Segment::placeholder(b"11")));
    }

    #[test]
    fn malformed_lines() {
        assert!(matches!(
            parse::<()>("L\t1\t+\t2\tx\t*"),
            Err(ParseError::InvalidLine(ParseFieldError::OrientationError, _))
        ));
        assert!(matches!(
            parse::<()>("L\t1\t+\t2"),
            Err(ParseError::InvalidLine(ParseFieldError::MissingFields, _))
        ));
        assert!(matches!(
            parse::<()>("C\t1\t+\t2\t+\tten\t*"),
            Err(ParseError::InvalidLine(ParseFieldError::InvalidNumber, _))
        ));
        assert!(matches!(
            parse::<()>("P\tp\t1+,2x\t*"),
            Err(ParseError::InvalidLine(ParseFieldError::OrientationError, _))
        ));
        assert!(matches!(parse::<()>("# comment"), Err(ParseError::UnknownLineType)));
        assert!(matches!(parse::<()>(""), Err(ParseError::EmptyLine)));
    }

    #[test]
    fn tolerance_decides_what_is_skipped() {
        let input = vec!["H\tVN:Z:1.0", "# comment", "", "S\t1\tA", "S\t\tA"];

        let safe: GFAParser<()> = GFAParser::new();
        assert!(safe.parse_lines(&input).is_err());

        let lenient: GFAParser<()> =
            GFAParser::with_tolerance(ParserTolerance::IgnoreAll);
        assert_eq!(lenient.parse_lines(&input).unwrap().len(), 2);

        let pedantic: GFAParser<()> =
            GFAParser::with_tolerance(ParserTolerance::Pedantic);
        assert!(pedantic.parse_lines(&input[..1]).is_ok());
        assert!(pedantic.parse_lines(&input[..2]).is_err());
    }

    #[test]
    fn can_parse_gfa_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "H\tVN:Z:1.0").unwrap();
        writeln!(file, "S\t1\tCAAATAAG").unwrap();
        writeln!(file, "S\t2\tA").unwrap();
        writeln!(file, "L\t1\t+\t2\t+\t0M").unwrap();
        writeln!(file, "# comment\r").unwrap();
        writeln!(file, "P\tx\t1+,2+\t0M").unwrap();

        let parser: GFAParser<OptionalFields> = GFAParser::new();
        let lines = parser.parse_file(file.path()).unwrap();
        let kinds: Vec<_> = lines.iter().map(Line::kind).collect();
        assert_eq!(
            kinds,
            vec![
                LineKind::Header,
                LineKind::Segment,
                LineKind::Segment,
                LineKind::Link,
                LineKind::Path
            ]
        );
    }
}
