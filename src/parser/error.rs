use std::{error, fmt};

use bstr::ByteSlice;

pub type GFAFieldResult<T> = Result<T, ParseFieldError>;
pub type GFAResult<T> = Result<T, ParseError>;

/// Which bad lines `GFAParser::parse_lines` and `parse_file` skip.
///
/// `Safe` skips empty lines and unknown record types (comments
/// included), `IgnoreAll` skips every malformed line, and `Pedantic`
/// skips nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserTolerance {
    IgnoreAll,
    Safe,
    Pedantic,
}

impl Default for ParserTolerance {
    fn default() -> Self {
        Self::Safe
    }
}

/// What was wrong with a single field of a record.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseFieldError {
    Utf8Error,
    /// A numeric field, such as a containment position, was not an
    /// unsigned integer.
    InvalidNumber,
    OrientationError,
    /// The named field did not match its GFA1 format.
    InvalidField(&'static str),
    MissingFields,
}

impl From<bstr::Utf8Error> for ParseFieldError {
    fn from(_: bstr::Utf8Error) -> Self {
        ParseFieldError::Utf8Error
    }
}

impl From<std::num::ParseIntError> for ParseFieldError {
    fn from(_: std::num::ParseIntError) -> Self {
        ParseFieldError::InvalidNumber
    }
}

impl fmt::Display for ParseFieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use ParseFieldError as PFE;
        match self {
            PFE::Utf8Error => write!(f, "field is not valid UTF-8"),
            PFE::InvalidNumber => write!(f, "field is not an unsigned integer"),
            PFE::OrientationError => write!(f, "orientation is neither + nor -"),
            PFE::InvalidField(field) => write!(f, "malformed {} field", field),
            PFE::MissingFields => write!(f, "record has too few fields"),
        }
    }
}

impl error::Error for ParseFieldError {}

/// Why a line could not become a `Line`.
#[derive(Debug)]
pub enum ParseError {
    /// The record type is not one of `H S L C P`.
    UnknownLineType,
    EmptyLine,
    /// The field error and the offending line, lossily decoded.
    InvalidLine(ParseFieldError, String),
    IOError(std::io::Error),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::UnknownLineType => write!(f, "unsupported record type"),
            ParseError::EmptyLine => write!(f, "empty line"),
            ParseError::InvalidLine(err, line) => {
                write!(f, "{} in line '{}'", err, line)
            }
            ParseError::IOError(err) => write!(f, "could not read GFA: {}", err),
        }
    }
}

impl From<std::io::Error> for ParseError {
    fn from(err: std::io::Error) -> Self {
        ParseError::IOError(err)
    }
}

impl error::Error for ParseError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            ParseError::InvalidLine(err, _) => Some(err),
            ParseError::IOError(err) => Some(err),
            _ => None,
        }
    }
}

impl ParseError {
    pub(crate) fn invalid_line(error: ParseFieldError, line: &[u8]) -> Self {
        ParseError::InvalidLine(error, line.to_str_lossy().into_owned())
    }

    /// Whether a line-iterating parser with tolerance `tol` may skip
    /// the line that raised this error.
    pub fn can_safely_continue(&self, tol: &ParserTolerance) -> bool {
        match tol {
            ParserTolerance::IgnoreAll => !matches!(self, ParseError::IOError(_)),
            ParserTolerance::Safe => matches!(
                self,
                ParseError::EmptyLine | ParseError::UnknownLineType
            ),
            ParserTolerance::Pedantic => false,
        }
    }
}
