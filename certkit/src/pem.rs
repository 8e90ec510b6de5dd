//! PEM files: Base64 text between `-----BEGIN X-----` and `-----END X-----`
//! lines, in the style of RFC 7468.
//!
//! Loading is strict.  Only whitespace may appear between instances, the END
//! label must repeat the BEGIN label, and a single bad instance fails the
//! whole file.  Explanatory text and RFC 1421 headers are not accepted.

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use pki_types::CertificateDer;

use crate::crypto::CryptoProvider;
use crate::error::{EncodingError, Error};
use crate::key::ecc::EcPrivateKey;
use crate::key::rsa::RsaPrivateKey;
use crate::key::PrivateKey;
use crate::log::{debug, trace};
use crate::pkcs8;

const BOM: &[u8] = b"\xef\xbb\xbf";
const BEGIN: &[u8] = b"-----BEGIN ";
const END: &[u8] = b"-----END ";
const DASHES: &[u8] = b"-----";
const LINE_LEN: usize = 64;

/// The label of a PEM instance.
///
/// Labels certkit does not know are kept in `Unknown` so that they survive a
/// load and save.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum PemType {
    /// `CERTIFICATE`
    Certificate,
    /// `TRUSTED CERTIFICATE`
    TrustedCertificate,
    /// `CERTIFICATE REQUEST`
    CertificateRequest,
    /// `NEW CERTIFICATE REQUEST`
    NewCertificateRequest,
    /// `X509 CRL`
    X509Crl,
    /// `PKCS7`
    Pkcs7,
    /// `CMS`
    Cms,
    /// `PRIVATE KEY`: PKCS#8
    PrivateKey,
    /// `ENCRYPTED PRIVATE KEY`: encrypted PKCS#8
    EncryptedPrivateKey,
    /// `RSA PRIVATE KEY`: PKCS#1
    RsaPrivateKey,
    /// `RSA PUBLIC KEY`: PKCS#1
    RsaPublicKey,
    /// `PUBLIC KEY`: `SubjectPublicKeyInfo`
    PublicKey,
    /// `DSA PRIVATE KEY`
    DsaPrivateKey,
    /// `DSA PARAMETERS`
    DsaParameters,
    /// `EC PRIVATE KEY`: SEC1
    EcPrivateKey,
    /// `EC PARAMETERS`
    EcParameters,
    /// `DH PARAMETERS`
    DhParameters,
    /// `X9.42 DH PARAMETERS`
    X942DhParameters,
    /// `SSL SESSION PARAMETERS`
    SslSessionParameters,
    /// `PARAMETERS`
    Parameters,
    /// `ATTRIBUTE CERTIFICATE`
    AttributeCertificate,
    /// `ANY PRIVATE KEY`
    AnyPrivateKey,
    /// `SSH2 PUBLIC KEY`
    Ssh2PublicKey,
    /// `SSH2 ENCRYPTED PRIVATE KEY`
    Ssh2EncryptedPrivateKey,
    /// Any other label
    Unknown(String),
}

impl PemType {
    /// The label as it appears after `BEGIN ` and `END `.
    pub fn label(&self) -> &str {
        match self {
            Self::Certificate => "CERTIFICATE",
            Self::TrustedCertificate => "TRUSTED CERTIFICATE",
            Self::CertificateRequest => "CERTIFICATE REQUEST",
            Self::NewCertificateRequest => "NEW CERTIFICATE REQUEST",
            Self::X509Crl => "X509 CRL",
            Self::Pkcs7 => "PKCS7",
            Self::Cms => "CMS",
            Self::PrivateKey => "PRIVATE KEY",
            Self::EncryptedPrivateKey => "ENCRYPTED PRIVATE KEY",
            Self::RsaPrivateKey => "RSA PRIVATE KEY",
            Self::RsaPublicKey => "RSA PUBLIC KEY",
            Self::PublicKey => "PUBLIC KEY",
            Self::DsaPrivateKey => "DSA PRIVATE KEY",
            Self::DsaParameters => "DSA PARAMETERS",
            Self::EcPrivateKey => "EC PRIVATE KEY",
            Self::EcParameters => "EC PARAMETERS",
            Self::DhParameters => "DH PARAMETERS",
            Self::X942DhParameters => "X9.42 DH PARAMETERS",
            Self::SslSessionParameters => "SSL SESSION PARAMETERS",
            Self::Parameters => "PARAMETERS",
            Self::AttributeCertificate => "ATTRIBUTE CERTIFICATE",
            Self::AnyPrivateKey => "ANY PRIVATE KEY",
            Self::Ssh2PublicKey => "SSH2 PUBLIC KEY",
            Self::Ssh2EncryptedPrivateKey => "SSH2 ENCRYPTED PRIVATE KEY",
            Self::Unknown(label) => label,
        }
    }

    /// Map a label to its type.  This never fails.
    pub fn from_label(label: &str) -> Self {
        match label {
            "CERTIFICATE" => Self::Certificate,
            "TRUSTED CERTIFICATE" => Self::TrustedCertificate,
            "CERTIFICATE REQUEST" => Self::CertificateRequest,
            "NEW CERTIFICATE REQUEST" => Self::NewCertificateRequest,
            "X509 CRL" => Self::X509Crl,
            "PKCS7" => Self::Pkcs7,
            "CMS" => Self::Cms,
            "PRIVATE KEY" => Self::PrivateKey,
            "ENCRYPTED PRIVATE KEY" => Self::EncryptedPrivateKey,
            "RSA PRIVATE KEY" => Self::RsaPrivateKey,
            "RSA PUBLIC KEY" => Self::RsaPublicKey,
            "PUBLIC KEY" => Self::PublicKey,
            "DSA PRIVATE KEY" => Self::DsaPrivateKey,
            "DSA PARAMETERS" => Self::DsaParameters,
            "EC PRIVATE KEY" => Self::EcPrivateKey,
            "EC PARAMETERS" => Self::EcParameters,
            "DH PARAMETERS" => Self::DhParameters,
            "X9.42 DH PARAMETERS" => Self::X942DhParameters,
            "SSL SESSION PARAMETERS" => Self::SslSessionParameters,
            "PARAMETERS" => Self::Parameters,
            "ATTRIBUTE CERTIFICATE" => Self::AttributeCertificate,
            "ANY PRIVATE KEY" => Self::AnyPrivateKey,
            "SSH2 PUBLIC KEY" => Self::Ssh2PublicKey,
            "SSH2 ENCRYPTED PRIVATE KEY" => Self::Ssh2EncryptedPrivateKey,
            other => Self::Unknown(other.to_string()),
        }
    }
}

impl fmt::Display for PemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One BEGIN/END block and its decoded payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PemInstance {
    /// The block's label
    pub pem_type: PemType,
    /// The decoded payload, normally DER
    pub content: Vec<u8>,
}

impl PemInstance {
    /// Make an instance.
    pub fn new(pem_type: PemType, content: impl Into<Vec<u8>>) -> Self {
        Self {
            pem_type,
            content: content.into(),
        }
    }
}

/// An ordered list of PEM instances.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PemFile {
    /// The instances, in file order
    pub instances: Vec<PemInstance>,
}

impl PemFile {
    /// Parse PEM text.  A leading UTF-8 byte order mark is skipped.
    pub fn load(text: &[u8]) -> Result<Self, Error> {
        let mut rest = text.strip_prefix(BOM).unwrap_or(text);
        let mut instances = Vec::new();

        loop {
            rest = skip_whitespace(rest);
            if rest.is_empty() {
                break;
            }

            let after_begin = rest
                .strip_prefix(BEGIN)
                .ok_or(EncodingError::PemMissingBegin)?;
            let (label, body) = split_label(after_begin)?;

            let end = find(body, END).ok_or(EncodingError::PemMissingEnd)?;
            let (end_label, after) = split_label(&body[end + END.len()..])?;
            if end_label != label {
                return Err(EncodingError::PemLabelMismatch.into());
            }

            let label = core::str::from_utf8(label).map_err(|_| EncodingError::InvalidString)?;
            let pem_type = PemType::from_label(label);
            if let PemType::Unknown(label) = &pem_type {
                debug!("unknown PEM label {label:?}");
            }

            instances.push(PemInstance {
                pem_type,
                content: decode_base64(&body[..end])?,
            });
            rest = after;
        }

        trace!("loaded {} PEM instance(s)", instances.len());
        Ok(Self { instances })
    }

    /// Write the instances out with CRLF line endings and 64-column Base64.
    pub fn save(&self) -> String {
        let mut out = String::new();
        for instance in &self.instances {
            let label = instance.pem_type.label();
            out.push_str("-----BEGIN ");
            out.push_str(label);
            out.push_str("-----\r\n");

            let encoded = STANDARD.encode(&instance.content);
            for line in encoded.as_bytes().chunks(LINE_LEN) {
                out.extend(line.iter().copied().map(char::from));
                out.push_str("\r\n");
            }

            out.push_str("-----END ");
            out.push_str(label);
            out.push_str("-----\r\n");
        }
        out
    }

    /// The contents of every `CERTIFICATE` instance, in order.
    pub fn certificates(&self) -> Vec<CertificateDer<'static>> {
        self.instances
            .iter()
            .filter(|instance| instance.pem_type == PemType::Certificate)
            .map(|instance| CertificateDer::from(instance.content.clone()))
            .collect()
    }

    /// Decode the first `PRIVATE KEY`, `RSA PRIVATE KEY` or `EC PRIVATE KEY`
    /// instance.
    ///
    /// Returns `Ok(None)` if there is no such instance, and an error if the
    /// first one found does not decode.
    pub fn first_private_key(
        &self,
        provider: &CryptoProvider,
    ) -> Result<Option<PrivateKey>, Error> {
        for instance in &self.instances {
            let content = &instance.content[..];
            let key = match instance.pem_type {
                PemType::PrivateKey => pkcs8::decode(content, provider)?,
                PemType::RsaPrivateKey => PrivateKey::Rsa(RsaPrivateKey::from_pkcs1_der(content)?),
                PemType::EcPrivateKey => {
                    PrivateKey::Ec(EcPrivateKey::from_sec1_der(content, provider)?)
                }
                _ => continue,
            };
            return Ok(Some(key));
        }
        Ok(None)
    }

    /// Read and parse the PEM file at `path`.
    #[cfg(feature = "std")]
    pub fn load_file(path: impl AsRef<std::path::Path>) -> Result<Self, Error> {
        Self::load(&std::fs::read(path)?)
    }

    /// Write the instances to `path`.
    #[cfg(feature = "std")]
    pub fn save_file(&self, path: impl AsRef<std::path::Path>) -> Result<(), Error> {
        std::fs::write(path, self.save())?;
        Ok(())
    }
}

fn skip_whitespace(input: &[u8]) -> &[u8] {
    let start = input
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(input.len());
    &input[start..]
}

/// Split `LABEL-----rest` into `LABEL` and `rest`.  Labels are one line.
fn split_label(input: &[u8]) -> Result<(&[u8], &[u8]), Error> {
    let end = find(input, DASHES).ok_or(EncodingError::PemMissingEnd)?;
    let label = &input[..end];
    if label.iter().any(|&b| b == b'\r' || b == b'\n') {
        return Err(EncodingError::PemMissingEnd.into());
    }
    Ok((label, &input[end + DASHES.len()..]))
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

fn decode_base64(body: &[u8]) -> Result<Vec<u8>, Error> {
    let compact = body
        .iter()
        .copied()
        .filter(|b| !b.is_ascii_whitespace())
        .collect::<Vec<u8>>();
    STANDARD
        .decode(compact)
        .map_err(|_| EncodingError::InvalidBase64.into())
}
