//! X.509 certificates.
//!
//! [`Certificate::decode`] turns DER into a [`Certificate`] value, hashing the
//! signed portion on the way so that [`Certificate::verify`] needs only the
//! issuer's public key.  [`Certificate::sign`] goes the other way.
//!
//! Nothing here looks at validity periods, builds chains or checks
//! revocation.

use alloc::vec::Vec;

use num_bigint::BigInt;

use crate::crypto::{hash, CryptoProvider};
use crate::der::{Reader, Tag, Time};
use crate::error::{EncodingError, Error};
use crate::key::PublicKey;
use crate::log::trace;

mod algorithm;
mod extensions;
mod name;
mod sign;
mod verify;

pub use algorithm::SignatureAlgorithm;
pub use extensions::{
    AccessDescription, AccessMethod, BasicConstraints, CertificatePolicy, ExtendedKeyUsage,
    Extensions, GeneralName, KeyUsage, PolicyQualifier,
};
pub use name::{DistinguishedName, NameAttribute};

/// The certificate format version.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum Version {
    /// v1, which has no extensions
    V1,
    /// v2, which adds unique identifiers
    V2,
    /// v3, which adds extensions
    #[default]
    V3,
}

impl Version {
    fn from_u64(value: u64) -> Result<Self, Error> {
        match value {
            0 => Ok(Self::V1),
            1 => Ok(Self::V2),
            2 => Ok(Self::V3),
            _ => Err(EncodingError::UnsupportedVersion("certificate").into()),
        }
    }
}

/// A decoded X.509 certificate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Certificate {
    /// The format version
    pub version: Version,
    /// The serial number, which can in practice be negative
    pub serial_number: BigInt,
    /// `notBefore`
    pub valid_from: Time,
    /// `notAfter`
    pub valid_to: Time,
    /// Who signed the certificate
    pub issuer: DistinguishedName,
    /// Who the certificate is about
    pub subject: DistinguishedName,
    /// The subject's public key
    pub public_key: PublicKey,
    /// The extensions certkit interprets
    pub extensions: Extensions,
    /// How the certificate was signed
    pub signature_algorithm: SignatureAlgorithm,
    /// The digest of the signed `TBSCertificate`, using the hash implied by
    /// `signature_algorithm`.
    pub signed_content_hash: hash::Output,
    /// The signature, as it appeared in the certificate
    pub signature: Vec<u8>,
}

impl Certificate {
    /// Decode a DER certificate.
    ///
    /// The provider is used to hash the signed portion of the certificate.
    pub fn decode(der: &[u8], provider: &CryptoProvider) -> Result<Self, Error> {
        let mut rd = Reader::init(der);
        let mut cert = rd.read_sequence()?;
        rd.expect_empty("certificate")?;

        let tbs = cert.read_expected(Tag::SEQUENCE)?;
        let signature_algorithm = SignatureAlgorithm::read(&mut cert)?;
        let signature = cert.read_bit_string_bytes()?.to_vec();
        cert.expect_empty("certificate")?;

        let mut body = tbs.reader();
        let version = match body.read_optional_context(0)? {
            Some(mut explicit) => {
                let version = Version::from_u64(explicit.read_small_integer()?)?;
                explicit.expect_empty("version")?;
                version
            }
            None => Version::V1,
        };

        let serial_number = body.read_integer()?;
        if SignatureAlgorithm::read(&mut body)? != signature_algorithm {
            return Err(EncodingError::SignatureAlgorithmMismatch.into());
        }

        let issuer = DistinguishedName::read(&mut body)?;
        let mut validity = body.read_sequence()?;
        let valid_from = validity.read_time()?;
        let valid_to = validity.read_time()?;
        validity.expect_empty("validity")?;
        let subject = DistinguishedName::read(&mut body)?;
        let public_key = PublicKey::read_spki(&mut body)?;

        // issuerUniqueID and subjectUniqueID
        body.read_optional(Tag::context(1, false))?;
        body.read_optional(Tag::context(2, false))?;

        let extensions = match body.read_optional_context(3)? {
            Some(mut explicit) => {
                let extensions = Extensions::read(&mut explicit)?;
                explicit.expect_empty("extensions")?;
                extensions
            }
            None => Extensions::default(),
        };
        body.expect_empty("certificate body")?;

        let hash = provider.hash(signature_algorithm.hash_algorithm())?;
        let signed_content_hash = hash.hash(tbs.raw);
        trace!(
            "decoded {version:?} certificate signed with {signature_algorithm}, {} extensions critical but unhandled",
            extensions.unhandled_critical.len()
        );

        Ok(Self {
            version,
            serial_number,
            valid_from,
            valid_to,
            issuer,
            subject,
            public_key,
            extensions,
            signature_algorithm,
            signed_content_hash,
            signature,
        })
    }
}
