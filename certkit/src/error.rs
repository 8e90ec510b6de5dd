//! Error types used throughout certkit.

use alloc::string::String;
use core::fmt;

use crate::der::Tag;
use crate::rand::GetRandomFailed;

/// certkit reports failures using this type.
///
/// The variants distinguish the *kind* of failure so that callers can report it
/// accurately; none of them are transient, and nothing in certkit retries.
#[non_exhaustive]
#[derive(Debug, PartialEq, Clone)]
pub enum Error {
    /// The input violated DER or PEM structure.  The parameter says how.
    MalformedEncoding(EncodingError),

    /// The input named an algorithm that is recognised but not implemented, or
    /// not recognised at all.  The parameter is a name or a dotted OID.
    UnsupportedAlgorithm(String),

    /// Decryption or integrity checking failed.
    ///
    /// This covers a wrong password, corrupted ciphertext and a PKCS#12 MAC
    /// mismatch, which are deliberately not distinguished from each other.
    DecryptionFailed,

    /// A textual name was not found in certkit's tables.
    UnknownName(String),

    /// An elliptic curve was not in certkit's table, or the crypto provider
    /// does not support it.
    UnsupportedCurve(String),

    /// The crypto provider failed to produce random bytes.
    FailedToGetRandomBytes,

    /// The crypto provider failed to produce a signature.
    SigningFailed,

    /// Reading or writing a file failed.
    Io(IoErrorKind),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedEncoding(e) => write!(f, "malformed encoding: {e}"),
            Self::UnsupportedAlgorithm(alg) => write!(f, "unsupported algorithm: {alg}"),
            Self::DecryptionFailed => write!(f, "decryption failed"),
            Self::UnknownName(name) => write!(f, "unknown name: {name}"),
            Self::UnsupportedCurve(curve) => write!(f, "unsupported curve: {curve}"),
            Self::FailedToGetRandomBytes => write!(f, "failed to get random bytes"),
            Self::SigningFailed => write!(f, "signing failed"),
            Self::Io(kind) => write!(f, "i/o error: {kind:?}"),
        }
    }
}

impl core::error::Error for Error {}

impl From<EncodingError> for Error {
    #[inline]
    fn from(e: EncodingError) -> Self {
        Self::MalformedEncoding(e)
    }
}

impl From<GetRandomFailed> for Error {
    fn from(_: GetRandomFailed) -> Self {
        Self::FailedToGetRandomBytes
    }
}

#[cfg(feature = "std")]
impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.kind())
    }
}

/// The kind of an i/o failure.
#[cfg(feature = "std")]
pub type IoErrorKind = std::io::ErrorKind;

/// The kind of an i/o failure.
///
/// Without the `std` feature certkit performs no i/o, so this is uninhabited.
#[cfg(not(feature = "std"))]
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum IoErrorKind {}

/// The ways in which DER or PEM input can be structurally invalid.
#[non_exhaustive]
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum EncodingError {
    /// The input ended before a complete value was read.
    Truncated,
    /// A value had a different tag than the one required here.
    UnexpectedTag {
        /// The tag that was required
        expected: Tag,
        /// The tag that was found
        got: Tag,
    },
    /// An indefinite-length encoding was found; only DER is accepted.
    IndefiniteLength,
    /// A length was not encoded in its shortest form.
    NonCanonicalLength,
    /// A length did not fit in `usize`.
    LengthOverflow,
    /// A high-number tag did not fit in `u32`, or was not minimally encoded.
    TagOverflow,
    /// An INTEGER was empty or not minimally encoded.
    InvalidInteger,
    /// An INTEGER was negative or too large where a small non-negative number is required.
    IntegerOutOfRange,
    /// A BOOLEAN was not encoded as 0x00 or 0xff.
    InvalidBoolean,
    /// A NULL had content.
    InvalidNull,
    /// A BIT STRING header was invalid.
    InvalidBitString,
    /// A BIT STRING had unused bits where whole bytes are required.
    UnusedBitsSet,
    /// An OBJECT IDENTIFIER was malformed.
    InvalidObjectIdentifier,
    /// A UTCTime or GeneralizedTime was malformed or out of range.
    InvalidTime,
    /// A string value was not valid in its declared character set.
    InvalidString,
    /// A version number was not one certkit understands.  The parameter names the structure.
    UnsupportedVersion(&'static str),
    /// A mandatory field was absent.  The parameter names it.
    MissingField(&'static str),
    /// Bytes followed a complete value.  The parameter names the value.
    TrailingData(&'static str),
    /// A signature algorithm identifier was not recognised.
    UnrecognizedSignatureAlgorithm,
    /// The algorithm in a certificate's body differs from the outer one.
    SignatureAlgorithmMismatch,
    /// An elliptic-curve point encoding was invalid.
    InvalidPoint,
    /// Nested structures exceeded certkit's depth limit.
    TooDeeplyNested,
    /// PEM text had something other than whitespace where `-----BEGIN ` was required.
    PemMissingBegin,
    /// A PEM instance had no `-----END ` line, or a label was not terminated.
    PemMissingEnd,
    /// A PEM instance's END label differed from its BEGIN label.
    PemLabelMismatch,
    /// A PEM body was not valid Base64.
    InvalidBase64,
}

impl fmt::Display for EncodingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Truncated => write!(f, "input truncated"),
            Self::UnexpectedTag { expected, got } => {
                write!(f, "expected tag {expected}, got {got}")
            }
            Self::IndefiniteLength => write!(f, "indefinite length is not DER"),
            Self::NonCanonicalLength => write!(f, "length not minimally encoded"),
            Self::LengthOverflow => write!(f, "length overflow"),
            Self::TagOverflow => write!(f, "tag number overflow"),
            Self::InvalidInteger => write!(f, "invalid integer"),
            Self::IntegerOutOfRange => write!(f, "integer out of range"),
            Self::InvalidBoolean => write!(f, "invalid boolean"),
            Self::InvalidNull => write!(f, "invalid null"),
            Self::InvalidBitString => write!(f, "invalid bit string"),
            Self::UnusedBitsSet => write!(f, "bit string has unused bits"),
            Self::InvalidObjectIdentifier => write!(f, "invalid object identifier"),
            Self::InvalidTime => write!(f, "invalid time"),
            Self::InvalidString => write!(f, "invalid string"),
            Self::UnsupportedVersion(what) => write!(f, "unsupported {what} version"),
            Self::MissingField(what) => write!(f, "missing {what}"),
            Self::TrailingData(what) => write!(f, "trailing data after {what}"),
            Self::UnrecognizedSignatureAlgorithm => {
                write!(f, "unrecognized signature algorithm")
            }
            Self::SignatureAlgorithmMismatch => write!(f, "signature algorithm mismatch"),
            Self::InvalidPoint => write!(f, "invalid elliptic curve point"),
            Self::TooDeeplyNested => write!(f, "too deeply nested"),
            Self::PemMissingBegin => write!(f, "expected PEM BEGIN line"),
            Self::PemMissingEnd => write!(f, "missing PEM END line"),
            Self::PemLabelMismatch => write!(f, "PEM BEGIN and END labels differ"),
            Self::InvalidBase64 => write!(f, "invalid base64"),
        }
    }
}

impl core::error::Error for EncodingError {}
