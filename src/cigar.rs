use bytemuck::{Contiguous, Pod, Zeroable};

use nom::{bytes::complete::*, IResult};

#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};

#[repr(u8)]
#[derive(
    Contiguous, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
pub enum CIGAROp {
    M = 0,
    I = 1,
    D = 2,
    N = 3,
    S = 4,
    H = 5,
    P = 6,
    E = 7,
    X = 8,
}

impl CIGAROp {
    fn from_u8_byte(value: u8) -> Option<Self> {
        Self::from_integer(value)
    }

    fn to_u8_char(self) -> u8 {
        use CIGAROp::*;
        match self {
            M => b'M',
            I => b'I',
            D => b'D',
            N => b'N',
            S => b'S',
            H => b'H',
            P => b'P',
            E => b'=',
            X => b'X',
        }
    }
}

impl std::fmt::Display for CIGAROp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sym = char::from(self.to_u8_char());
        write!(f, "{}", sym)
    }
}

/// A memory-efficient representation of a single CIGAR op + length, as
/// a u32.
#[repr(transparent)]
#[derive(
    Zeroable, Pod, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
pub struct CIGARPair(u32);

#[allow(clippy::len_without_is_empty)]
impl CIGARPair {
    /// Lengths must fit in 28 bits.
    pub fn new(len: u32, op: CIGAROp) -> Option<Self> {
        if len < (1 << 28) {
            Some(CIGARPair((len << 4) | (op.into_integer() as u32)))
        } else {
            None
        }
    }

    #[inline]
    pub fn len(&self) -> u32 {
        self.0 >> 4
    }

    #[inline]
    pub fn op(&self) -> CIGAROp {
        let op = (self.0 & 0xF) as u8;
        // only ever constructed from a valid op
        CIGAROp::from_u8_byte(op).unwrap_or(CIGAROp::M)
    }

    pub fn into_pair(&self) -> (u32, CIGAROp) {
        (self.len(), self.op())
    }
}

impl From<CIGARPair> for u32 {
    fn from(cg: CIGARPair) -> Self {
        bytemuck::cast(cg)
    }
}

impl std::fmt::Display for CIGARPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.len(), self.op())
    }
}

/// An overlap alignment between two segment ends.
#[derive(Debug, Default, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
pub struct CIGAR(pub Vec<CIGARPair>);

impl CIGAR {
    /// Returns `None` if a length does not fit in a `CIGARPair`.
    pub fn from_pairs<I>(pairs: I) -> Option<Self>
    where
        I: IntoIterator<Item = (u32, CIGAROp)>,
    {
        pairs
            .into_iter()
            .map(|(len, op)| CIGARPair::new(len, op))
            .collect::<Option<Vec<_>>>()
            .map(CIGAR)
    }

    fn parse_op_cmd(input: &[u8]) -> IResult<&[u8], CIGAROp> {
        use nom::{branch::alt, combinator::map};
        use CIGAROp::*;
        alt((
            map(tag("M"), |_| M),
            map(tag("I"), |_| I),
            map(tag("D"), |_| D),
            map(tag("N"), |_| N),
            map(tag("S"), |_| S),
            map(tag("H"), |_| H),
            map(tag("P"), |_| P),
            map(tag("="), |_| E),
            map(tag("X"), |_| X),
        ))(input)
    }

    fn parse_len(input: &[u8]) -> IResult<&[u8], u32> {
        use nom::{character::complete::digit1, combinator::map_opt};
        map_opt(digit1, |bs: &[u8]| {
            std::str::from_utf8(bs).ok()?.parse::<u32>().ok()
        })(input)
    }

    pub(crate) fn parser_bytestring(i: &[u8]) -> IResult<&[u8], Self> {
        use nom::{
            combinator::{map, map_opt},
            multi::many1,
            sequence::pair,
        };
        map(
            many1(map_opt(
                pair(Self::parse_len, Self::parse_op_cmd),
                |(len, op)| CIGARPair::new(len, op),
            )),
            CIGAR,
        )(i)
    }

    /// Parse a CIGAR object from an ASCII byte slice; the whole
    /// slice must be consumed.
    pub fn from_bytestring(i: &[u8]) -> Option<Self> {
        match Self::parser_bytestring(i) {
            Ok((rest, cg)) if rest.is_empty() => Some(cg),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.0.iter().fold(0, |s, pair| s + pair.len() as usize)
    }

    /// is_empty corresponds to whether or not the contained vector is
    /// empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, CIGAROp)> + '_ {
        self.0.iter().map(CIGARPair::into_pair)
    }

    /// The length of the overlap if it consists of exactly one `M`
    /// operation, e.g. `Some(12)` for "12M" and `None` for "4M1I3M".
    pub fn single_match_len(&self) -> Option<usize> {
        match self.0.as_slice() {
            [pair] if pair.op() == CIGAROp::M => Some(pair.len() as usize),
            _ => None,
        }
    }
}

impl std::fmt::Display for CIGAR {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for pair in self.0.iter() {
            write!(f, "{}", pair)?
        }
        Ok(())
    }
}
