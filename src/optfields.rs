use bstr::{BString, ByteSlice};

use lazy_static::lazy_static;
use regex::bytes::Regex;

/// These type aliases are useful for configuring the graph
pub type OptionalFields = Vec<OptField>;
pub type NoOptionalFields = ();

/// Two-character tag of an optional field, e.g. `*b"KC"`.
pub type OptTag = [u8; 2];

/// An optional field a la SAM
#[derive(Debug, Clone, PartialEq, PartialOrd)]
pub struct OptField {
    pub tag: OptTag,
    pub value: OptFieldVal,
}

#[derive(Debug, Clone, PartialEq, PartialOrd)]
pub enum OptFieldVal {
    A(u8),
    Int(i64),
    Float(f32),
    Z(BString),
    J(BString),
    H(Vec<u32>),
    BInt(Vec<i64>),
    BFloat(Vec<f32>),
}

impl OptField {
    /// Create a new OptField from a tag name and a value.
    pub fn new(tag: OptTag, value: OptFieldVal) -> Self {
        OptField { tag, value }
    }

    /// Parses an optional field from a bytestring in the format
    /// <TAG>:<TYPE>:<VALUE>
    pub fn parse(input: &[u8]) -> Option<Self> {
        lazy_static! {
            static ref RE_HEAD: Regex =
                Regex::new(r"(?-u)^[A-Za-z][A-Za-z0-9]:[AifZJHB]:").unwrap();
            static ref RE_CHAR: Regex = Regex::new(r"(?-u)[!-~]").unwrap();
            static ref RE_INT: Regex = Regex::new(r"(?-u)[-+]?[0-9]+").unwrap();
            static ref RE_FLOAT: Regex =
                Regex::new(r"(?-u)[-+]?[0-9]*\.?[0-9]+([eE][-+]?[0-9]+)?")
                    .unwrap();
            static ref RE_STRING: Regex = Regex::new(r"(?-u)[ !-~]+").unwrap();
            static ref RE_BYTES: Regex = Regex::new(r"(?-u)[0-9A-F]+").unwrap();
        }

        use std::str::from_utf8;
        use OptFieldVal::*;

        if !RE_HEAD.is_match(input) {
            return None;
        }

        let tag = [input[0], input[1]];
        let o_type = input[3];
        let o_contents = &input[5..];

        let o_val = match o_type {
            // char
            b'A' => RE_CHAR.find(o_contents).map(|s| s.as_bytes()[0]).map(A),
            // int
            b'i' => RE_INT
                .find(o_contents)
                .and_then(|s| from_utf8(s.as_bytes()).ok())
                .and_then(|s| s.parse().ok())
                .map(Int),
            // float
            b'f' => RE_FLOAT
                .find(o_contents)
                .and_then(|s| from_utf8(s.as_bytes()).ok())
                .and_then(|s| s.parse().ok())
                .map(Float),
            // string
            b'Z' => RE_STRING
                .find(o_contents)
                .map(|s| s.as_bytes().into())
                .map(Z),
            // JSON string
            b'J' => RE_STRING
                .find(o_contents)
                .map(|s| s.as_bytes().into())
                .map(J),
            // bytearray
            b'H' => RE_BYTES
                .find(o_contents)
                .and_then(|s| from_utf8(s.as_bytes()).ok())
                .map(|s| s.chars().filter_map(|c| c.to_digit(16)))
                .map(|s| H(s.collect())),
            // float or int array
            b'B' => {
                let (first, rest) = o_contents.split_first()?;
                let rest = rest
                    .split_str(b",")
                    .filter_map(|s| from_utf8(s.as_bytes()).ok());
                if *first == b'f' {
                    Some(BFloat(rest.filter_map(|s| s.parse().ok()).collect()))
                } else {
                    Some(BInt(rest.filter_map(|s| s.parse().ok()).collect()))
                }
            }
            _ => None,
        }?;

        Some(Self::new(tag, o_val))
    }
}

/// The Display implementation output that can be parsed back to OptField
impl std::fmt::Display for OptField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use OptFieldVal::*;

        write!(f, "{}{}:", char::from(self.tag[0]), char::from(self.tag[1]))?;

        match &self.value {
            A(x) => write!(f, "A:{}", char::from(*x)),
            Int(x) => write!(f, "i:{}", x),
            Float(x) => write!(f, "f:{}", x),
            Z(x) => write!(f, "Z:{}", x),
            J(x) => write!(f, "J:{}", x),
            H(x) => {
                write!(f, "H:")?;
                for a in x {
                    write!(f, "{:X}", a)?
                }
                Ok(())
            }
            BInt(x) => {
                write!(f, "B:i")?;
                for (i, a) in x.iter().enumerate() {
                    let sep = if i == 0 { "" } else { "," };
                    write!(f, "{}{}", sep, a)?
                }
                Ok(())
            }
            BFloat(x) => {
                write!(f, "B:f")?;
                for (i, a) in x.iter().enumerate() {
                    let sep = if i == 0 { "" } else { "," };
                    write!(f, "{}{}", sep, a)?
                }
                Ok(())
            }
        }
    }
}

/// OptFields describes how to parse, store, and query optional fields
pub trait OptFields: Sized + Default + Clone {
    /// Return the optional field with the given tag, if it exists.
    fn get_field(&self, tag: &OptTag) -> Option<&OptField>;

    /// Return all optional fields.
    fn fields(&self) -> &[OptField];

    /// Set the integer field `tag`, replacing any existing field
    /// with that tag.
    fn set_int(&mut self, tag: &OptTag, value: i64);

    /// Given a sequence of bytestrings, parse them as optional fields
    /// to create a collection
    fn parse<T>(input: T) -> Self
    where
        T: IntoIterator,
        T::Item: AsRef<[u8]>;

    /// Return the value of the integer field `tag`, if it exists and
    /// is an integer.
    fn get_int(&self, tag: &OptTag) -> Option<i64> {
        match self.get_field(tag)?.value {
            OptFieldVal::Int(x) => Some(x),
            _ => None,
        }
    }
}

/// This implementation is useful for performance if we don't actually
/// need any optional fields. Setting a field is a no-op.
impl OptFields for () {
    fn get_field(&self, _: &OptTag) -> Option<&OptField> {
        None
    }

    fn fields(&self) -> &[OptField] {
        &[]
    }

    fn set_int(&mut self, _: &OptTag, _: i64) {}

    fn parse<T>(_input: T) -> Self
    where
        T: IntoIterator,
        T::Item: AsRef<[u8]>,
    {
    }
}

/// Stores all the optional fields in a vector
impl OptFields for Vec<OptField> {
    fn get_field(&self, tag: &OptTag) -> Option<&OptField> {
        self.iter().find(|o| &o.tag == tag)
    }

    fn fields(&self) -> &[OptField] {
        self.as_slice()
    }

    fn set_int(&mut self, tag: &OptTag, value: i64) {
        let value = OptFieldVal::Int(value);
        match self.iter_mut().find(|o| &o.tag == tag) {
            Some(field) => field.value = value,
            None => self.push(OptField::new(*tag, value)),
        }
    }

    fn parse<T>(input: T) -> Self
    where
        T: IntoIterator,
        T::Item: AsRef<[u8]>,
    {
        input
            .into_iter()
            .filter_map(|f| OptField::parse(f.as_ref()))
            .collect()
    }
}
