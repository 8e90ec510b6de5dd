use alloc::string::String;

use num_bigint::{BigInt, BigUint};

use super::time::{self, Time};
use super::{Class, Element, Tag};
use crate::error::{EncodingError, Error};
use crate::oid;

/// Read DER from a byte slice.
///
/// Every `read_*` method either consumes exactly one complete value and
/// advances, or fails.  After a failure the reader's position is unspecified
/// and the caller is expected to abandon the parse.
#[derive(Clone, Debug)]
pub struct Reader<'a> {
    buf: &'a [u8],
    offs: usize,
}

impl<'a> Reader<'a> {
    /// Start reading at the front of `bytes`.
    pub fn init(bytes: &'a [u8]) -> Self {
        Self {
            buf: bytes,
            offs: 0,
        }
    }

    /// Consume and return everything not yet read.
    pub fn rest(&mut self) -> &'a [u8] {
        let ret = &self.buf[self.offs..];
        self.offs = self.buf.len();
        ret
    }

    /// Consume exactly `len` bytes.
    pub fn take(&mut self, len: usize) -> Result<&'a [u8], Error> {
        if self.left() < len {
            return Err(EncodingError::Truncated.into());
        }

        let current = self.offs;
        self.offs += len;
        Ok(&self.buf[current..current + len])
    }

    /// Whether anything remains.
    pub fn any_left(&self) -> bool {
        self.offs < self.buf.len()
    }

    /// How many bytes remain.
    pub fn left(&self) -> usize {
        self.buf.len() - self.offs
    }

    /// How many bytes have been consumed.
    pub fn used(&self) -> usize {
        self.offs
    }

    /// Fail with `TrailingData(what)` if anything remains.
    pub fn expect_empty(&self, what: &'static str) -> Result<(), Error> {
        match self.any_left() {
            true => Err(EncodingError::TrailingData(what).into()),
            false => Ok(()),
        }
    }

    fn read_byte(&mut self) -> Result<u8, Error> {
        let b = self.take(1)?;
        Ok(b[0])
    }

    /// Read an identifier octet, plus any high-tag-number octets.
    pub fn read_tag(&mut self) -> Result<Tag, Error> {
        let first = self.read_byte()?;
        let class = Class::from_bits(first >> 6);
        let constructed = first & 0x20 != 0;
        let mut number = u32::from(first & 0x1f);

        if number == 0x1f {
            number = 0;
            loop {
                let b = self.read_byte()?;
                if number == 0 && b == 0x80 {
                    return Err(EncodingError::TagOverflow.into());
                }
                if number > u32::MAX >> 7 {
                    return Err(EncodingError::TagOverflow.into());
                }
                number = (number << 7) | u32::from(b & 0x7f);
                if b & 0x80 == 0 {
                    break;
                }
            }

            // the low-tag-number form must be used where it can be
            if number < 0x1f {
                return Err(EncodingError::TagOverflow.into());
            }
        }

        Ok(Tag {
            class,
            constructed,
            number,
        })
    }

    /// Read a definite, minimally-encoded length.
    pub fn read_length(&mut self) -> Result<usize, Error> {
        let first = self.read_byte()?;
        if first < 0x80 {
            return Ok(usize::from(first));
        }

        let count = usize::from(first & 0x7f);
        match count {
            0 => return Err(EncodingError::IndefiniteLength.into()),
            c if c > size_of::<usize>() => return Err(EncodingError::LengthOverflow.into()),
            _ => {}
        }

        let bytes = self.take(count)?;
        if bytes[0] == 0 {
            return Err(EncodingError::NonCanonicalLength.into());
        }

        let len = bytes
            .iter()
            .fold(0usize, |acc, &b| (acc << 8) | usize::from(b));
        if len < 0x80 {
            return Err(EncodingError::NonCanonicalLength.into());
        }
        Ok(len)
    }

    /// Read one complete element of any type.
    pub fn read_element(&mut self) -> Result<Element<'a>, Error> {
        let start = self.offs;
        let tag = self.read_tag()?;
        let len = self.read_length()?;
        let content = self.take(len)?;
        Ok(Element {
            tag,
            content,
            raw: &self.buf[start..self.offs],
        })
    }

    /// Look at the next tag without consuming anything.
    pub fn peek_tag(&self) -> Result<Tag, Error> {
        self.clone().read_tag()
    }

    /// Read one element, which must have tag `expected`.
    pub fn read_expected(&mut self, expected: Tag) -> Result<Element<'a>, Error> {
        let element = self.read_element()?;
        match element.tag == expected {
            true => Ok(element),
            false => Err(EncodingError::UnexpectedTag {
                expected,
                got: element.tag,
            }
            .into()),
        }
    }

    /// Read the content octets of an element with tag `expected`.
    pub fn read_content(&mut self, expected: Tag) -> Result<&'a [u8], Error> {
        Ok(self.read_expected(expected)?.content)
    }

    /// Read the next element only if it has tag `tag`.
    pub fn read_optional(&mut self, tag: Tag) -> Result<Option<Element<'a>>, Error> {
        if !self.any_left() || self.peek_tag()? != tag {
            return Ok(None);
        }
        self.read_element().map(Some)
    }

    /// Read a SEQUENCE, returning a reader over its content.
    pub fn read_sequence(&mut self) -> Result<Self, Error> {
        self.read_content(Tag::SEQUENCE).map(Self::init)
    }

    /// Read a SET, returning a reader over its content.
    pub fn read_set(&mut self) -> Result<Self, Error> {
        self.read_content(Tag::SET).map(Self::init)
    }

    /// Read a constructed `[n]` element, returning a reader over its content.
    pub fn read_context(&mut self, number: u32) -> Result<Self, Error> {
        self.read_content(Tag::context(number, true))
            .map(Self::init)
    }

    /// Read an explicitly-tagged `[n]` element if it is next.
    pub fn read_optional_context(&mut self, number: u32) -> Result<Option<Self>, Error> {
        Ok(self
            .read_optional(Tag::context(number, true))?
            .map(|e| e.reader()))
    }

    /// Read an INTEGER of any size and sign.
    pub fn read_integer(&mut self) -> Result<BigInt, Error> {
        let content = self.read_content(Tag::INTEGER)?;
        check_integer(content)?;
        Ok(BigInt::from_signed_bytes_be(content))
    }

    /// Read a non-negative INTEGER of any size.
    pub fn read_unsigned(&mut self) -> Result<BigUint, Error> {
        Ok(BigUint::from_bytes_be(self.read_unsigned_bytes()?))
    }

    /// Read a non-negative INTEGER, returning its big-endian magnitude
    /// without any leading zero octet.
    pub fn read_unsigned_bytes(&mut self) -> Result<&'a [u8], Error> {
        let content = self.read_content(Tag::INTEGER)?;
        check_integer(content)?;
        match content {
            [first, ..] if first & 0x80 != 0 => Err(EncodingError::IntegerOutOfRange.into()),
            [0, rest @ ..] if !rest.is_empty() => Ok(rest),
            _ => Ok(content),
        }
    }

    /// Read a non-negative INTEGER that fits in a `u64`.
    pub fn read_small_integer(&mut self) -> Result<u64, Error> {
        let bytes = self.read_unsigned_bytes()?;
        if bytes.len() > 8 {
            return Err(EncodingError::IntegerOutOfRange.into());
        }
        Ok(bytes
            .iter()
            .fold(0u64, |acc, &b| (acc << 8) | u64::from(b)))
    }

    /// Read a BOOLEAN.
    pub fn read_boolean(&mut self) -> Result<bool, Error> {
        match self.read_content(Tag::BOOLEAN)? {
            [0x00] => Ok(false),
            [0xff] => Ok(true),
            _ => Err(EncodingError::InvalidBoolean.into()),
        }
    }

    /// Read a NULL.
    pub fn read_null(&mut self) -> Result<(), Error> {
        match self.read_content(Tag::NULL)? {
            [] => Ok(()),
            _ => Err(EncodingError::InvalidNull.into()),
        }
    }

    /// Read an OCTET STRING.
    pub fn read_octet_string(&mut self) -> Result<&'a [u8], Error> {
        self.read_content(Tag::OCTET_STRING)
    }

    /// Read a BIT STRING.
    pub fn read_bit_string(&mut self) -> Result<BitString<'a>, Error> {
        let content = self.read_content(Tag::BIT_STRING)?;
        let (&unused_bits, bytes) = content
            .split_first()
            .ok_or(EncodingError::InvalidBitString)?;

        if unused_bits > 7 {
            return Err(EncodingError::InvalidBitString.into());
        }

        // DER requires the padding bits to be zero, and none for an empty string
        match bytes.last() {
            None if unused_bits != 0 => return Err(EncodingError::InvalidBitString.into()),
            Some(last) if last & ((1u8 << unused_bits) - 1) != 0 => {
                return Err(EncodingError::InvalidBitString.into());
            }
            _ => {}
        }

        Ok(BitString { bytes, unused_bits })
    }

    /// Read a BIT STRING which must be a whole number of octets.
    pub fn read_bit_string_bytes(&mut self) -> Result<&'a [u8], Error> {
        let bits = self.read_bit_string()?;
        match bits.unused_bits {
            0 => Ok(bits.bytes),
            _ => Err(EncodingError::UnusedBitsSet.into()),
        }
    }

    /// Read an OBJECT IDENTIFIER, returning its validated content octets.
    ///
    /// Compare the result against the constants in [`crate::oid`].
    pub fn read_oid(&mut self) -> Result<&'a [u8], Error> {
        let content = self.read_content(Tag::OID)?;
        oid::validate(content)?;
        Ok(content)
    }

    /// Read a UTCTime.
    pub fn read_utc_time(&mut self) -> Result<Time, Error> {
        time::parse_utc_time(self.read_content(Tag::UTC_TIME)?)
    }

    /// Read a GeneralizedTime.
    pub fn read_generalized_time(&mut self) -> Result<Time, Error> {
        time::parse_generalized_time(self.read_content(Tag::GENERALIZED_TIME)?)
    }

    /// Read an X.509 `Time`: either a UTCTime or a GeneralizedTime.
    pub fn read_time(&mut self) -> Result<Time, Error> {
        match self.peek_tag()? {
            Tag::GENERALIZED_TIME => self.read_generalized_time(),
            _ => self.read_utc_time(),
        }
    }

    /// Read a UTF8String.
    pub fn read_utf8_string(&mut self) -> Result<&'a str, Error> {
        let content = self.read_content(Tag::UTF8_STRING)?;
        core::str::from_utf8(content).map_err(|_| EncodingError::InvalidString.into())
    }

    /// Read a BMPString.
    pub fn read_bmp_string(&mut self) -> Result<String, Error> {
        decode_bmp(self.read_content(Tag::BMP_STRING)?)
    }

    /// Read any of the string types X.509 allows in names and qualifiers.
    ///
    /// Accepts UTF8String, PrintableString, IA5String, VisibleString,
    /// T61String (read as ISO-8859-1), BMPString and UniversalString.
    pub fn read_directory_string(&mut self) -> Result<String, Error> {
        let element = self.read_element()?;
        let content = element.content;
        match element.tag {
            Tag::UTF8_STRING => core::str::from_utf8(content)
                .map(String::from)
                .map_err(|_| EncodingError::InvalidString.into()),
            Tag::PRINTABLE_STRING | Tag::IA5_STRING | Tag::VISIBLE_STRING => {
                match content.is_ascii() {
                    true => Ok(content.iter().map(|&b| char::from(b)).collect()),
                    false => Err(EncodingError::InvalidString.into()),
                }
            }
            Tag::T61_STRING => Ok(content.iter().map(|&b| char::from(b)).collect()),
            Tag::BMP_STRING => decode_bmp(content),
            Tag::UNIVERSAL_STRING => decode_universal(content),
            got => Err(EncodingError::UnexpectedTag {
                expected: Tag::UTF8_STRING,
                got,
            }
            .into()),
        }
    }
}

/// A BIT STRING value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BitString<'a> {
    /// The octets holding the bits, most significant bit first
    pub bytes: &'a [u8],
    /// How many low-order bits of the final octet are padding
    pub unused_bits: u8,
}

impl BitString<'_> {
    /// Whether named bit `n` is set.  Bit 0 is the high bit of the first octet.
    pub fn bit(&self, n: usize) -> bool {
        self.bytes
            .get(n / 8)
            .is_some_and(|b| b & (0x80 >> (n % 8)) != 0)
    }
}

fn check_integer(content: &[u8]) -> Result<(), Error> {
    match content {
        [] => Err(EncodingError::InvalidInteger.into()),
        [0x00, next, ..] if next & 0x80 == 0 => Err(EncodingError::InvalidInteger.into()),
        [0xff, next, ..] if next & 0x80 != 0 => Err(EncodingError::InvalidInteger.into()),
        _ => Ok(()),
    }
}

fn decode_bmp(content: &[u8]) -> Result<String, Error> {
    if content.len() % 2 != 0 {
        return Err(EncodingError::InvalidString.into());
    }

    let units = content
        .chunks_exact(2)
        .map(|pair| u16::from_be_bytes([pair[0], pair[1]]));
    char::decode_utf16(units)
        .collect::<Result<String, _>>()
        .map_err(|_| EncodingError::InvalidString.into())
}

fn decode_universal(content: &[u8]) -> Result<String, Error> {
    if content.len() % 4 != 0 {
        return Err(EncodingError::InvalidString.into());
    }

    content
        .chunks_exact(4)
        .map(|quad| {
            char::from_u32(u32::from_be_bytes([quad[0], quad[1], quad[2], quad[3]]))
                .ok_or(Error::from(EncodingError::InvalidString))
        })
        .collect()
}
