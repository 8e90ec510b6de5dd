//! Object identifiers.
//!
//! The constants in this module are the DER *content* octets of each
//! identifier, without tag or length, so they compare directly against what
//! [`Reader::read_oid`](crate::der::Reader::read_oid) returns.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use core::str::FromStr;

use crate::error::{EncodingError, Error};

/// An owned, validated object identifier.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectIdentifier(Vec<u8>);

impl ObjectIdentifier {
    /// Make an identifier from DER content octets.
    pub fn from_der_content(content: &[u8]) -> Result<Self, Error> {
        validate(content)?;
        Ok(Self(content.to_vec()))
    }

    /// The DER content octets.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl PartialEq<[u8]> for ObjectIdentifier {
    fn eq(&self, other: &[u8]) -> bool {
        self.0 == other
    }
}

impl PartialEq<&[u8]> for ObjectIdentifier {
    fn eq(&self, other: &&[u8]) -> bool {
        self.0 == *other
    }
}

impl fmt::Display for ObjectIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_dotted(&self.0, f)
    }
}

impl fmt::Debug for ObjectIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ObjectIdentifier(")?;
        fmt_dotted(&self.0, f)?;
        f.write_str(")")
    }
}

impl FromStr for ObjectIdentifier {
    type Err = Error;

    /// Parse dotted-decimal notation, like `1.2.840.113549`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bad = || Error::MalformedEncoding(EncodingError::InvalidObjectIdentifier);

        let mut arcs = s.split('.').map(|arc| arc.parse::<u128>());
        let first = arcs.next().ok_or_else(bad)?.map_err(|_| bad())?;
        let second = arcs.next().ok_or_else(bad)?.map_err(|_| bad())?;
        if first > 2 || (first < 2 && second >= 40) {
            return Err(bad());
        }

        let mut out = Vec::new();
        push_base128(&mut out, first * 40 + second);
        for arc in arcs {
            push_base128(&mut out, arc.map_err(|_| bad())?);
        }
        Ok(Self(out))
    }
}

fn push_base128(out: &mut Vec<u8>, mut value: u128) {
    let mut tmp = [0u8; 19];
    let mut i = tmp.len() - 1;
    tmp[i] = (value & 0x7f) as u8;
    value >>= 7;
    while value != 0 {
        i -= 1;
        tmp[i] = 0x80 | (value & 0x7f) as u8;
        value >>= 7;
    }
    out.extend_from_slice(&tmp[i..]);
}

/// Checks the base-128 structure of OID content octets.
pub(crate) fn validate(content: &[u8]) -> Result<(), EncodingError> {
    match content.last() {
        None => return Err(EncodingError::InvalidObjectIdentifier),
        Some(last) if last & 0x80 != 0 => return Err(EncodingError::InvalidObjectIdentifier),
        _ => {}
    }

    // arcs are limited to 128 bits: at most 19 septets, the first holding two bits
    let mut arc_first = 0;
    let mut arc_len = 0;
    for &b in content {
        if arc_len == 0 {
            if b == 0x80 {
                return Err(EncodingError::InvalidObjectIdentifier);
            }
            arc_first = b & 0x7f;
        }
        arc_len += 1;
        if arc_len > 19 || (arc_len == 19 && arc_first > 0x03) {
            return Err(EncodingError::InvalidObjectIdentifier);
        }
        if b & 0x80 == 0 {
            arc_len = 0;
        }
    }
    Ok(())
}

/// Render OID content octets in dotted-decimal form.
///
/// Used when an identifier ends up in an error or log message.
pub fn to_dotted(content: &[u8]) -> String {
    struct Dotted<'a>(&'a [u8]);

    impl fmt::Display for Dotted<'_> {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            fmt_dotted(self.0, f)
        }
    }

    alloc::format!("{}", Dotted(content))
}

fn fmt_dotted(content: &[u8], f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let mut value = 0u128;
    let mut first = true;
    for &b in content {
        value = (value << 7) | u128::from(b & 0x7f);
        if b & 0x80 != 0 {
            continue;
        }

        if first {
            let (a, b) = match value {
                0..=39 => (0, value),
                40..=79 => (1, value - 40),
                _ => (2, value - 80),
            };
            write!(f, "{a}.{b}")?;
            first = false;
        } else {
            write!(f, ".{value}")?;
        }
        value = 0;
    }
    Ok(())
}

// Public key and signature algorithms
/// `rsaEncryption` (1.2.840.113549.1.1.1)
pub const RSA_ENCRYPTION: &[u8] = &[0x2a, 0x86, 0x48, 0x86, 0xf7, 0x0d, 0x01, 0x01, 0x01];
/// `id-mgf1` (1.2.840.113549.1.1.8)
pub const MGF1: &[u8] = &[0x2a, 0x86, 0x48, 0x86, 0xf7, 0x0d, 0x01, 0x01, 0x08];
/// `id-RSASSA-PSS` (1.2.840.113549.1.1.10)
pub const RSASSA_PSS: &[u8] = &[0x2a, 0x86, 0x48, 0x86, 0xf7, 0x0d, 0x01, 0x01, 0x0a];
/// `sha256WithRSAEncryption` (1.2.840.113549.1.1.11)
pub const SHA256_WITH_RSA_ENCRYPTION: &[u8] = &[0x2a, 0x86, 0x48, 0x86, 0xf7, 0x0d, 0x01, 0x01, 0x0b];
/// `sha384WithRSAEncryption` (1.2.840.113549.1.1.12)
pub const SHA384_WITH_RSA_ENCRYPTION: &[u8] = &[0x2a, 0x86, 0x48, 0x86, 0xf7, 0x0d, 0x01, 0x01, 0x0c];
/// `sha512WithRSAEncryption` (1.2.840.113549.1.1.13)
pub const SHA512_WITH_RSA_ENCRYPTION: &[u8] = &[0x2a, 0x86, 0x48, 0x86, 0xf7, 0x0d, 0x01, 0x01, 0x0d];
/// `sha224WithRSAEncryption` (1.2.840.113549.1.1.14)
pub const SHA224_WITH_RSA_ENCRYPTION: &[u8] = &[0x2a, 0x86, 0x48, 0x86, 0xf7, 0x0d, 0x01, 0x01, 0x0e];
/// `id-ecPublicKey` (1.2.840.10045.2.1)
pub const EC_PUBLIC_KEY: &[u8] = &[0x2a, 0x86, 0x48, 0xce, 0x3d, 0x02, 0x01];
/// `prime-field` (1.2.840.10045.1.1)
pub const PRIME_FIELD: &[u8] = &[0x2a, 0x86, 0x48, 0xce, 0x3d, 0x01, 0x01];
/// `ecdsa-with-SHA224` (1.2.840.10045.4.3.1)
pub const ECDSA_WITH_SHA224: &[u8] = &[0x2a, 0x86, 0x48, 0xce, 0x3d, 0x04, 0x03, 0x01];
/// `ecdsa-with-SHA256` (1.2.840.10045.4.3.2)
pub const ECDSA_WITH_SHA256: &[u8] = &[0x2a, 0x86, 0x48, 0xce, 0x3d, 0x04, 0x03, 0x02];
/// `ecdsa-with-SHA384` (1.2.840.10045.4.3.3)
pub const ECDSA_WITH_SHA384: &[u8] = &[0x2a, 0x86, 0x48, 0xce, 0x3d, 0x04, 0x03, 0x03];
/// `ecdsa-with-SHA512` (1.2.840.10045.4.3.4)
pub const ECDSA_WITH_SHA512: &[u8] = &[0x2a, 0x86, 0x48, 0xce, 0x3d, 0x04, 0x03, 0x04];

// Named curves
/// `secp256r1 (P-256)` (1.2.840.10045.3.1.7)
pub const SECP256R1: &[u8] = &[0x2a, 0x86, 0x48, 0xce, 0x3d, 0x03, 0x01, 0x07];
/// `secp384r1 (P-384)` (1.3.132.0.34)
pub const SECP384R1: &[u8] = &[0x2b, 0x81, 0x04, 0x00, 0x22];
/// `secp521r1 (P-521)` (1.3.132.0.35)
pub const SECP521R1: &[u8] = &[0x2b, 0x81, 0x04, 0x00, 0x23];
/// `secp256k1` (1.3.132.0.10)
pub const SECP256K1: &[u8] = &[0x2b, 0x81, 0x04, 0x00, 0x0a];

// Digest algorithms
/// `id-sha1` (1.3.14.3.2.26)
pub const SHA1: &[u8] = &[0x2b, 0x0e, 0x03, 0x02, 0x1a];
/// `id-sha256` (2.16.840.1.101.3.4.2.1)
pub const SHA256: &[u8] = &[0x60, 0x86, 0x48, 0x01, 0x65, 0x03, 0x04, 0x02, 0x01];
/// `id-sha384` (2.16.840.1.101.3.4.2.2)
pub const SHA384: &[u8] = &[0x60, 0x86, 0x48, 0x01, 0x65, 0x03, 0x04, 0x02, 0x02];
/// `id-sha512` (2.16.840.1.101.3.4.2.3)
pub const SHA512: &[u8] = &[0x60, 0x86, 0x48, 0x01, 0x65, 0x03, 0x04, 0x02, 0x03];
/// `id-sha224` (2.16.840.1.101.3.4.2.4)
pub const SHA224: &[u8] = &[0x60, 0x86, 0x48, 0x01, 0x65, 0x03, 0x04, 0x02, 0x04];

// Name attribute types
/// `id-at-commonName` (2.5.4.3)
pub const COMMON_NAME: &[u8] = &[0x55, 0x04, 0x03];
/// `id-at-surname` (2.5.4.4)
pub const SURNAME: &[u8] = &[0x55, 0x04, 0x04];
/// `id-at-serialNumber` (2.5.4.5)
pub const SERIAL_NUMBER: &[u8] = &[0x55, 0x04, 0x05];
/// `id-at-countryName` (2.5.4.6)
pub const COUNTRY_NAME: &[u8] = &[0x55, 0x04, 0x06];
/// `id-at-localityName` (2.5.4.7)
pub const LOCALITY_NAME: &[u8] = &[0x55, 0x04, 0x07];
/// `id-at-stateOrProvinceName` (2.5.4.8)
pub const STATE_OR_PROVINCE_NAME: &[u8] = &[0x55, 0x04, 0x08];
/// `id-at-streetAddress` (2.5.4.9)
pub const STREET_ADDRESS: &[u8] = &[0x55, 0x04, 0x09];
/// `id-at-organizationName` (2.5.4.10)
pub const ORGANIZATION_NAME: &[u8] = &[0x55, 0x04, 0x0a];
/// `id-at-organizationalUnitName` (2.5.4.11)
pub const ORGANIZATIONAL_UNIT_NAME: &[u8] = &[0x55, 0x04, 0x0b];
/// `id-at-title` (2.5.4.12)
pub const TITLE: &[u8] = &[0x55, 0x04, 0x0c];
/// `id-at-businessCategory` (2.5.4.15)
pub const BUSINESS_CATEGORY: &[u8] = &[0x55, 0x04, 0x0f];
/// `id-at-postalCode` (2.5.4.17)
pub const POSTAL_CODE: &[u8] = &[0x55, 0x04, 0x11];
/// `id-at-givenName` (2.5.4.42)
pub const GIVEN_NAME: &[u8] = &[0x55, 0x04, 0x2a];
/// `id-at-initials` (2.5.4.43)
pub const INITIALS: &[u8] = &[0x55, 0x04, 0x2b];
/// `id-at-generationQualifier` (2.5.4.44)
pub const GENERATION_QUALIFIER: &[u8] = &[0x55, 0x04, 0x2c];
/// `id-at-dnQualifier` (2.5.4.46)
pub const DN_QUALIFIER: &[u8] = &[0x55, 0x04, 0x2e];
/// `id-at-pseudonym` (2.5.4.65)
pub const PSEUDONYM: &[u8] = &[0x55, 0x04, 0x41];
/// `emailAddress` (1.2.840.113549.1.9.1)
pub const EMAIL_ADDRESS: &[u8] = &[0x2a, 0x86, 0x48, 0x86, 0xf7, 0x0d, 0x01, 0x09, 0x01];
/// `domainComponent` (0.9.2342.19200300.100.1.25)
pub const DOMAIN_COMPONENT: &[u8] = &[0x09, 0x92, 0x26, 0x89, 0x93, 0xf2, 0x2c, 0x64, 0x01, 0x19];
/// `userId` (0.9.2342.19200300.100.1.1)
pub const USER_ID: &[u8] = &[0x09, 0x92, 0x26, 0x89, 0x93, 0xf2, 0x2c, 0x64, 0x01, 0x01];
/// `jurisdictionOfIncorporationLocalityName` (1.3.6.1.4.1.311.60.2.1.1)
pub const JURISDICTION_LOCALITY_NAME: &[u8] = &[0x2b, 0x06, 0x01, 0x04, 0x01, 0x82, 0x37, 0x3c, 0x02, 0x01, 0x01];
/// `jurisdictionOfIncorporationStateOrProvinceName` (1.3.6.1.4.1.311.60.2.1.2)
pub const JURISDICTION_STATE_OR_PROVINCE_NAME: &[u8] = &[0x2b, 0x06, 0x01, 0x04, 0x01, 0x82, 0x37, 0x3c, 0x02, 0x01, 0x02];
/// `jurisdictionOfIncorporationCountryName` (1.3.6.1.4.1.311.60.2.1.3)
pub const JURISDICTION_COUNTRY_NAME: &[u8] = &[0x2b, 0x06, 0x01, 0x04, 0x01, 0x82, 0x37, 0x3c, 0x02, 0x01, 0x03];

// Certificate extensions
/// `id-ce-subjectKeyIdentifier` (2.5.29.14)
pub const SUBJECT_KEY_IDENTIFIER: &[u8] = &[0x55, 0x1d, 0x0e];
/// `id-ce-keyUsage` (2.5.29.15)
pub const KEY_USAGE: &[u8] = &[0x55, 0x1d, 0x0f];
/// `id-ce-basicConstraints` (2.5.29.19)
pub const BASIC_CONSTRAINTS: &[u8] = &[0x55, 0x1d, 0x13];
/// `id-ce-certificatePolicies` (2.5.29.32)
pub const CERTIFICATE_POLICIES: &[u8] = &[0x55, 0x1d, 0x20];
/// `id-ce-authorityKeyIdentifier` (2.5.29.35)
pub const AUTHORITY_KEY_IDENTIFIER: &[u8] = &[0x55, 0x1d, 0x23];
/// `id-ce-extKeyUsage` (2.5.29.37)
pub const EXTENDED_KEY_USAGE: &[u8] = &[0x55, 0x1d, 0x25];
/// `id-pe-authorityInfoAccess` (1.3.6.1.5.5.7.1.1)
pub const AUTHORITY_INFO_ACCESS: &[u8] = &[0x2b, 0x06, 0x01, 0x05, 0x05, 0x07, 0x01, 0x01];
/// `anyExtendedKeyUsage` (2.5.29.37.0)
pub const ANY_EXTENDED_KEY_USAGE: &[u8] = &[0x55, 0x1d, 0x25, 0x00];
/// `id-kp-serverAuth` (1.3.6.1.5.5.7.3.1)
pub const KP_SERVER_AUTH: &[u8] = &[0x2b, 0x06, 0x01, 0x05, 0x05, 0x07, 0x03, 0x01];
/// `id-kp-clientAuth` (1.3.6.1.5.5.7.3.2)
pub const KP_CLIENT_AUTH: &[u8] = &[0x2b, 0x06, 0x01, 0x05, 0x05, 0x07, 0x03, 0x02];
/// `id-kp-codeSigning` (1.3.6.1.5.5.7.3.3)
pub const KP_CODE_SIGNING: &[u8] = &[0x2b, 0x06, 0x01, 0x05, 0x05, 0x07, 0x03, 0x03];
/// `id-kp-emailProtection` (1.3.6.1.5.5.7.3.4)
pub const KP_EMAIL_PROTECTION: &[u8] = &[0x2b, 0x06, 0x01, 0x05, 0x05, 0x07, 0x03, 0x04];
/// `id-kp-timeStamping` (1.3.6.1.5.5.7.3.8)
pub const KP_TIME_STAMPING: &[u8] = &[0x2b, 0x06, 0x01, 0x05, 0x05, 0x07, 0x03, 0x08];
/// `id-kp-OCSPSigning` (1.3.6.1.5.5.7.3.9)
pub const KP_OCSP_SIGNING: &[u8] = &[0x2b, 0x06, 0x01, 0x05, 0x05, 0x07, 0x03, 0x09];
/// `id-qt-cps` (1.3.6.1.5.5.7.2.1)
pub const QT_CPS: &[u8] = &[0x2b, 0x06, 0x01, 0x05, 0x05, 0x07, 0x02, 0x01];
/// `id-qt-unotice` (1.3.6.1.5.5.7.2.2)
pub const QT_UNOTICE: &[u8] = &[0x2b, 0x06, 0x01, 0x05, 0x05, 0x07, 0x02, 0x02];
/// `id-ad-ocsp` (1.3.6.1.5.5.7.48.1)
pub const AD_OCSP: &[u8] = &[0x2b, 0x06, 0x01, 0x05, 0x05, 0x07, 0x30, 0x01];
/// `id-ad-caIssuers` (1.3.6.1.5.5.7.48.2)
pub const AD_CA_ISSUERS: &[u8] = &[0x2b, 0x06, 0x01, 0x05, 0x05, 0x07, 0x30, 0x02];

// PKCS#7 content types
/// `data` (1.2.840.113549.1.7.1)
pub const PKCS7_DATA: &[u8] = &[0x2a, 0x86, 0x48, 0x86, 0xf7, 0x0d, 0x01, 0x07, 0x01];
/// `signedData` (1.2.840.113549.1.7.2)
pub const PKCS7_SIGNED_DATA: &[u8] = &[0x2a, 0x86, 0x48, 0x86, 0xf7, 0x0d, 0x01, 0x07, 0x02];
/// `encryptedData` (1.2.840.113549.1.7.6)
pub const PKCS7_ENCRYPTED_DATA: &[u8] = &[0x2a, 0x86, 0x48, 0x86, 0xf7, 0x0d, 0x01, 0x07, 0x06];

// PKCS#12 password-based encryption
/// `pbeWithSHAAnd128BitRC4` (1.2.840.113549.1.12.1.1)
pub const PBE_SHA1_RC4_128: &[u8] = &[0x2a, 0x86, 0x48, 0x86, 0xf7, 0x0d, 0x01, 0x0c, 0x01, 0x01];
/// `pbeWithSHAAnd40BitRC4` (1.2.840.113549.1.12.1.2)
pub const PBE_SHA1_RC4_40: &[u8] = &[0x2a, 0x86, 0x48, 0x86, 0xf7, 0x0d, 0x01, 0x0c, 0x01, 0x02];
/// `pbeWithSHAAnd3-KeyTripleDES-CBC` (1.2.840.113549.1.12.1.3)
pub const PBE_SHA1_3DES: &[u8] = &[0x2a, 0x86, 0x48, 0x86, 0xf7, 0x0d, 0x01, 0x0c, 0x01, 0x03];
/// `pbeWithSHAAnd2-KeyTripleDES-CBC` (1.2.840.113549.1.12.1.4)
pub const PBE_SHA1_2DES: &[u8] = &[0x2a, 0x86, 0x48, 0x86, 0xf7, 0x0d, 0x01, 0x0c, 0x01, 0x04];
/// `pbeWithSHAAnd128BitRC2-CBC` (1.2.840.113549.1.12.1.5)
pub const PBE_SHA1_RC2_128: &[u8] = &[0x2a, 0x86, 0x48, 0x86, 0xf7, 0x0d, 0x01, 0x0c, 0x01, 0x05];
/// `pbewithSHAAnd40BitRC2-CBC` (1.2.840.113549.1.12.1.6)
pub const PBE_SHA1_RC2_40: &[u8] = &[0x2a, 0x86, 0x48, 0x86, 0xf7, 0x0d, 0x01, 0x0c, 0x01, 0x06];
/// `id-PBES2` (1.2.840.113549.1.5.13)
pub const PBES2: &[u8] = &[0x2a, 0x86, 0x48, 0x86, 0xf7, 0x0d, 0x01, 0x05, 0x0d];

// PKCS#12 bags and attributes
/// `keyBag` (1.2.840.113549.1.12.10.1.1)
pub const KEY_BAG: &[u8] = &[0x2a, 0x86, 0x48, 0x86, 0xf7, 0x0d, 0x01, 0x0c, 0x0a, 0x01, 0x01];
/// `pkcs8ShroudedKeyBag` (1.2.840.113549.1.12.10.1.2)
pub const PKCS8_SHROUDED_KEY_BAG: &[u8] = &[0x2a, 0x86, 0x48, 0x86, 0xf7, 0x0d, 0x01, 0x0c, 0x0a, 0x01, 0x02];
/// `certBag` (1.2.840.113549.1.12.10.1.3)
pub const CERT_BAG: &[u8] = &[0x2a, 0x86, 0x48, 0x86, 0xf7, 0x0d, 0x01, 0x0c, 0x0a, 0x01, 0x03];
/// `crlBag` (1.2.840.113549.1.12.10.1.4)
pub const CRL_BAG: &[u8] = &[0x2a, 0x86, 0x48, 0x86, 0xf7, 0x0d, 0x01, 0x0c, 0x0a, 0x01, 0x04];
/// `secretBag` (1.2.840.113549.1.12.10.1.5)
pub const SECRET_BAG: &[u8] = &[0x2a, 0x86, 0x48, 0x86, 0xf7, 0x0d, 0x01, 0x0c, 0x0a, 0x01, 0x05];
/// `safeContentsBag` (1.2.840.113549.1.12.10.1.6)
pub const SAFE_CONTENTS_BAG: &[u8] = &[0x2a, 0x86, 0x48, 0x86, 0xf7, 0x0d, 0x01, 0x0c, 0x0a, 0x01, 0x06];
/// `x509Certificate` (1.2.840.113549.1.9.22.1)
pub const X509_CERTIFICATE: &[u8] = &[0x2a, 0x86, 0x48, 0x86, 0xf7, 0x0d, 0x01, 0x09, 0x16, 0x01];
/// `friendlyName` (1.2.840.113549.1.9.20)
pub const FRIENDLY_NAME: &[u8] = &[0x2a, 0x86, 0x48, 0x86, 0xf7, 0x0d, 0x01, 0x09, 0x14];
/// `localKeyId` (1.2.840.113549.1.9.21)
pub const LOCAL_KEY_ID: &[u8] = &[0x2a, 0x86, 0x48, 0x86, 0xf7, 0x0d, 0x01, 0x09, 0x15];
