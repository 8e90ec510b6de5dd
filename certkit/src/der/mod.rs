//! A strict DER reader and a canonical DER writer.
//!
//! [`Reader`] walks a borrowed buffer and hands out [`Element`]s that borrow
//! from it.  Anything that is valid BER but not valid DER (indefinite lengths,
//! non-minimal lengths or integers, sloppy booleans) is rejected.
//!
//! [`Writer`] produces DER only.

use core::fmt;

mod reader;
mod time;
mod writer;

pub use reader::{BitString, Reader};
pub use time::Time;
pub use writer::Writer;
pub(crate) use writer::is_printable;

/// The class bits of an identifier octet.
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Class {
    Universal,
    Application,
    ContextSpecific,
    Private,
}

impl Class {
    fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0 => Self::Universal,
            1 => Self::Application,
            2 => Self::ContextSpecific,
            _ => Self::Private,
        }
    }

    fn bits(self) -> u8 {
        match self {
            Self::Universal => 0,
            Self::Application => 1,
            Self::ContextSpecific => 2,
            Self::Private => 3,
        }
    }
}

/// A decoded identifier: class, constructed flag and tag number.
///
/// Tag numbers of 31 and above use the high-tag-number form on the wire.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Tag {
    /// The tag class
    pub class: Class,
    /// Whether the content is itself a sequence of elements
    pub constructed: bool,
    /// The tag number
    pub number: u32,
}

impl Tag {
    /// BOOLEAN
    pub const BOOLEAN: Self = Self::universal(1, false);
    /// INTEGER
    pub const INTEGER: Self = Self::universal(2, false);
    /// BIT STRING
    pub const BIT_STRING: Self = Self::universal(3, false);
    /// OCTET STRING
    pub const OCTET_STRING: Self = Self::universal(4, false);
    /// NULL
    pub const NULL: Self = Self::universal(5, false);
    /// OBJECT IDENTIFIER
    pub const OID: Self = Self::universal(6, false);
    /// UTF8String
    pub const UTF8_STRING: Self = Self::universal(12, false);
    /// SEQUENCE and SEQUENCE OF
    pub const SEQUENCE: Self = Self::universal(16, true);
    /// SET and SET OF
    pub const SET: Self = Self::universal(17, true);
    /// PrintableString
    pub const PRINTABLE_STRING: Self = Self::universal(19, false);
    /// TeletexString (T61String)
    pub const T61_STRING: Self = Self::universal(20, false);
    /// IA5String
    pub const IA5_STRING: Self = Self::universal(22, false);
    /// UTCTime
    pub const UTC_TIME: Self = Self::universal(23, false);
    /// GeneralizedTime
    pub const GENERALIZED_TIME: Self = Self::universal(24, false);
    /// VisibleString
    pub const VISIBLE_STRING: Self = Self::universal(26, false);
    /// UniversalString
    pub const UNIVERSAL_STRING: Self = Self::universal(28, false);
    /// BMPString
    pub const BMP_STRING: Self = Self::universal(30, false);

    /// A universal-class tag.
    pub const fn universal(number: u32, constructed: bool) -> Self {
        Self {
            class: Class::Universal,
            constructed,
            number,
        }
    }

    /// A context-specific tag, as in `[n]`.
    pub const fn context(number: u32, constructed: bool) -> Self {
        Self {
            class: Class::ContextSpecific,
            constructed,
            number,
        }
    }

    /// Whether this is a context-specific tag with the given number, of either form.
    pub fn is_context(&self, number: u32) -> bool {
        self.class == Class::ContextSpecific && self.number == number
    }

    fn name(&self) -> Option<&'static str> {
        if self.class != Class::Universal {
            return None;
        }
        Some(match self.number {
            1 => "BOOLEAN",
            2 => "INTEGER",
            3 => "BIT STRING",
            4 => "OCTET STRING",
            5 => "NULL",
            6 => "OBJECT IDENTIFIER",
            12 => "UTF8String",
            16 => "SEQUENCE",
            17 => "SET",
            19 => "PrintableString",
            20 => "T61String",
            22 => "IA5String",
            23 => "UTCTime",
            24 => "GeneralizedTime",
            26 => "VisibleString",
            28 => "UniversalString",
            30 => "BMPString",
            _ => return None,
        })
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(name) = self.name() {
            return f.write_str(name);
        }
        match self.class {
            Class::Universal => write!(f, "UNIVERSAL {}", self.number),
            Class::Application => write!(f, "[APPLICATION {}]", self.number),
            Class::ContextSpecific => write!(f, "[{}]", self.number),
            Class::Private => write!(f, "[PRIVATE {}]", self.number),
        }
    }
}

/// One tag-length-value element, borrowed from the input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Element<'a> {
    /// The element's tag
    pub tag: Tag,
    /// The content octets
    pub content: &'a [u8],
    /// The complete encoding: identifier, length and content
    pub raw: &'a [u8],
}

impl<'a> Element<'a> {
    /// A reader over this element's content.
    pub fn reader(&self) -> Reader<'a> {
        Reader::init(self.content)
    }
}
