use alloc::vec::Vec;

use num_bigint::{BigInt, BigUint};

use super::time::{self, Time};
use super::{Reader, Tag};

/// Build DER into a growable buffer.
///
/// Constructed values are written with closures, which keeps every length
/// correct without a second pass:
///
/// ```
/// # use certkit::der::Writer;
/// let mut w = Writer::new();
/// w.write_sequence(|w| {
///     w.write_small_integer(3);
///     w.write_null();
/// });
/// assert_eq!(w.finish(), vec![0x30, 0x05, 0x02, 0x01, 0x03, 0x05, 0x00]);
/// ```
#[derive(Debug, Default)]
pub struct Writer {
    buf: Vec<u8>,
}

impl Writer {
    /// Make an empty writer.
    pub fn new() -> Self {
        Self { buf: Vec::new() }
    }

    /// Take the encoding.
    pub fn finish(self) -> Vec<u8> {
        self.buf
    }

    /// The encoding so far.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Append already-encoded DER.
    pub fn write_raw(&mut self, der: &[u8]) {
        self.buf.extend_from_slice(der);
    }

    /// Write one element with the given tag and content octets.
    pub fn write_element(&mut self, tag: Tag, content: &[u8]) {
        self.write_header(tag, content.len());
        self.buf.extend_from_slice(content);
    }

    fn write_element_concat(&mut self, tag: Tag, a: &[u8], b: &[u8]) {
        self.write_header(tag, a.len() + b.len());
        self.buf.extend_from_slice(a);
        self.buf.extend_from_slice(b);
    }

    fn write_header(&mut self, tag: Tag, len: usize) {
        let first = (tag.class.bits() << 6) | if tag.constructed { 0x20 } else { 0 };
        if tag.number < 0x1f {
            self.buf.push(first | tag.number as u8);
        } else {
            self.buf.push(first | 0x1f);
            let septets = (32 - tag.number.leading_zeros()).div_ceil(7);
            for i in (0..septets).rev() {
                let more = if i == 0 { 0 } else { 0x80 };
                self.buf
                    .push(more | ((tag.number >> (7 * i)) & 0x7f) as u8);
            }
        }

        if len <= 0x7f {
            // Short form
            self.buf.push(len as u8);
        } else {
            // Long form
            let size = len.to_be_bytes();
            let leading_zero_bytes = size
                .iter()
                .position(|&x| x != 0)
                .unwrap_or(size.len());
            let encoded_bytes = size.len() - leading_zero_bytes;
            self.buf.push(0x80 + encoded_bytes as u8);
            self.buf
                .extend_from_slice(&size[leading_zero_bytes..]);
        }
    }

    /// Write a constructed element whose content is produced by `f`.
    pub fn write_constructed(&mut self, tag: Tag, f: impl FnOnce(&mut Self)) {
        let mut inner = Self::new();
        f(&mut inner);
        self.write_element(tag, &inner.buf);
    }

    /// Write a SEQUENCE.
    pub fn write_sequence(&mut self, f: impl FnOnce(&mut Self)) {
        self.write_constructed(Tag::SEQUENCE, f);
    }

    /// Write a SET OF, sorting the children into DER order.
    pub fn write_set(&mut self, f: impl FnOnce(&mut Self)) {
        let mut inner = Self::new();
        f(&mut inner);

        let mut children = Vec::new();
        let mut rd = Reader::init(&inner.buf);
        while let Ok(element) = rd.read_element() {
            children.push(element.raw);
        }
        children.sort_unstable();

        self.write_header(Tag::SET, inner.buf.len());
        for child in children {
            self.buf.extend_from_slice(child);
        }
    }

    /// Write an explicitly-tagged `[n]` element.
    pub fn write_context(&mut self, number: u32, f: impl FnOnce(&mut Self)) {
        self.write_constructed(Tag::context(number, true), f);
    }

    /// Write an INTEGER.
    pub fn write_integer(&mut self, value: &BigInt) {
        let bytes = value.to_signed_bytes_be();
        match bytes.is_empty() {
            true => self.write_element(Tag::INTEGER, &[0]),
            false => self.write_element(Tag::INTEGER, &bytes),
        }
    }

    /// Write a non-negative INTEGER.
    pub fn write_unsigned(&mut self, value: &BigUint) {
        self.write_unsigned_bytes(&value.to_bytes_be());
    }

    /// Write a non-negative INTEGER from its big-endian magnitude.
    ///
    /// Leading zero octets are removed, and one is added back when the high
    /// bit is set.
    pub fn write_unsigned_bytes(&mut self, magnitude: &[u8]) {
        let start = magnitude
            .iter()
            .position(|&b| b != 0)
            .unwrap_or(magnitude.len());
        let magnitude = &magnitude[start..];
        match magnitude.first() {
            None => self.write_element(Tag::INTEGER, &[0]),
            Some(b) if b & 0x80 != 0 => self.write_element_concat(Tag::INTEGER, &[0], magnitude),
            Some(_) => self.write_element(Tag::INTEGER, magnitude),
        }
    }

    /// Write a non-negative INTEGER.
    pub fn write_small_integer(&mut self, value: u64) {
        self.write_unsigned_bytes(&value.to_be_bytes());
    }

    /// Write a BOOLEAN.
    pub fn write_boolean(&mut self, value: bool) {
        self.write_element(Tag::BOOLEAN, &[if value { 0xff } else { 0x00 }]);
    }

    /// Write a NULL.
    pub fn write_null(&mut self) {
        self.write_element(Tag::NULL, &[]);
    }

    /// Write an OCTET STRING.
    pub fn write_octet_string(&mut self, value: &[u8]) {
        self.write_element(Tag::OCTET_STRING, value);
    }

    /// Write a BIT STRING holding whole octets.
    pub fn write_bit_string(&mut self, value: &[u8]) {
        self.write_element_concat(Tag::BIT_STRING, &[0u8], value);
    }

    /// Write a BIT STRING of named bits, where bit 0 is the high bit of the first octet.
    ///
    /// Trailing zero bits are dropped, as DER requires.
    pub fn write_named_bits(&mut self, bits: &[bool]) {
        let used = bits
            .iter()
            .rposition(|&b| b)
            .map_or(0, |last| last + 1);

        let mut octets = Vec::with_capacity(1 + used.div_ceil(8));
        octets.push(((8 - used % 8) % 8) as u8);
        for chunk in bits[..used].chunks(8) {
            let octet = chunk
                .iter()
                .enumerate()
                .fold(0u8, |acc, (i, &b)| acc | (u8::from(b) << (7 - i)));
            octets.push(octet);
        }
        self.write_element(Tag::BIT_STRING, &octets);
    }

    /// Write an OBJECT IDENTIFIER from its content octets, as found in [`crate::oid`].
    pub fn write_oid(&mut self, oid: &[u8]) {
        self.write_element(Tag::OID, oid);
    }

    /// Write a UTF8String.
    pub fn write_utf8_string(&mut self, value: &str) {
        self.write_element(Tag::UTF8_STRING, value.as_bytes());
    }

    /// Write a PrintableString.  The caller ensures `value` is in its character set.
    pub fn write_printable_string(&mut self, value: &str) {
        self.write_element(Tag::PRINTABLE_STRING, value.as_bytes());
    }

    /// Write an IA5String.  The caller ensures `value` is ASCII.
    pub fn write_ia5_string(&mut self, value: &str) {
        self.write_element(Tag::IA5_STRING, value.as_bytes());
    }

    /// Write a BMPString (UTF-16BE).
    pub fn write_bmp_string(&mut self, value: &str) {
        let content = value
            .encode_utf16()
            .flat_map(u16::to_be_bytes)
            .collect::<Vec<u8>>();
        self.write_element(Tag::BMP_STRING, &content);
    }

    /// Write an X.509 `Time`: UTCTime for 1950 through 2049, GeneralizedTime
    /// otherwise.
    pub fn write_time(&mut self, value: Time) {
        let (tag, buf, len) = time::encode(value);
        self.write_element(tag, &buf[..len]);
    }
}

/// Whether `c` is in the PrintableString character set.
pub(crate) fn is_printable(c: char) -> bool {
    c.is_ascii_alphanumeric() || " '()+,-./:=?".contains(c)
}
