use alloc::string::String;
use alloc::vec::Vec;

use num_bigint::BigUint;

use crate::der::{Class, Reader, Tag, Writer};
use crate::error::{EncodingError, Error};
use crate::log::debug;
use crate::oid::{self, ObjectIdentifier};

/// The certificate extensions certkit interprets.
///
/// Extensions outside this set are skipped on decode.  Those marked critical
/// are listed in `unhandled_critical` so that a caller can apply its own policy.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Extensions {
    /// `basicConstraints`
    pub basic_constraints: Option<BasicConstraints>,
    /// `keyUsage`
    pub key_usage: Option<KeyUsage>,
    /// `extKeyUsage`
    pub extended_key_usage: Vec<ExtendedKeyUsage>,
    /// `certificatePolicies`
    pub certificate_policies: Vec<CertificatePolicy>,
    /// `authorityInfoAccess`
    pub authority_info_access: Vec<AccessDescription>,
    /// `subjectKeyIdentifier`, as an integer
    pub subject_key_id: Option<BigUint>,
    /// The `keyIdentifier` of `authorityKeyIdentifier`, as an integer
    pub authority_key_id: Option<BigUint>,
    /// Critical extensions that were present but not understood.
    ///
    /// These are never written back out.
    pub unhandled_critical: Vec<ObjectIdentifier>,
}

impl Extensions {
    /// Whether there is nothing to encode.
    pub fn is_empty(&self) -> bool {
        self.basic_constraints.is_none()
            && self.key_usage.is_none()
            && self.extended_key_usage.is_empty()
            && self.certificate_policies.is_empty()
            && self.authority_info_access.is_empty()
            && self.subject_key_id.is_none()
            && self.authority_key_id.is_none()
    }

    /// Read the `Extensions` SEQUENCE.
    pub(crate) fn read(rd: &mut Reader<'_>) -> Result<Self, Error> {
        let mut list = rd.read_sequence()?;
        let mut out = Self::default();

        while list.any_left() {
            let mut ext = list.read_sequence()?;
            let ext_oid = ext.read_oid()?;
            let critical = read_optional_boolean(&mut ext)?.unwrap_or(false);
            let value = ext.read_octet_string()?;
            ext.expect_empty("extension")?;

            let mut value = Reader::init(value);
            match ext_oid {
                oid::BASIC_CONSTRAINTS => {
                    out.basic_constraints = Some(BasicConstraints::read(&mut value)?)
                }
                oid::KEY_USAGE => out.key_usage = Some(KeyUsage::read(&mut value)?),
                oid::EXTENDED_KEY_USAGE => {
                    out.extended_key_usage = read_extended_key_usage(&mut value)?
                }
                oid::SUBJECT_KEY_IDENTIFIER => {
                    out.subject_key_id = Some(BigUint::from_bytes_be(value.read_octet_string()?))
                }
                oid::AUTHORITY_KEY_IDENTIFIER => {
                    out.authority_key_id = read_authority_key_id(&mut value)?
                }
                oid::CERTIFICATE_POLICIES => {
                    out.certificate_policies = read_certificate_policies(&mut value)?
                }
                oid::AUTHORITY_INFO_ACCESS => {
                    out.authority_info_access = read_authority_info_access(&mut value)?
                }
                other => {
                    debug!(
                        "skipping {} extension {}",
                        if critical { "critical" } else { "non-critical" },
                        oid::to_dotted(other)
                    );
                    if critical {
                        out.unhandled_critical
                            .push(ObjectIdentifier::from_der_content(other)?);
                    }
                    continue;
                }
            }
            value.expect_empty("extension value")?;
        }

        Ok(out)
    }

    /// Write the `Extensions` SEQUENCE.  Basic constraints and key usage are
    /// marked critical.
    pub(crate) fn write(&self, w: &mut Writer) {
        w.write_sequence(|w| {
            if let Some(bc) = &self.basic_constraints {
                write_extension(w, oid::BASIC_CONSTRAINTS, true, |w| bc.write(w));
            }
            if let Some(ku) = &self.key_usage {
                write_extension(w, oid::KEY_USAGE, true, |w| ku.write(w));
            }
            if !self.extended_key_usage.is_empty() {
                write_extension(w, oid::EXTENDED_KEY_USAGE, false, |w| {
                    w.write_sequence(|w| {
                        for eku in &self.extended_key_usage {
                            w.write_oid(eku.oid());
                        }
                    })
                });
            }
            if let Some(skid) = &self.subject_key_id {
                write_extension(w, oid::SUBJECT_KEY_IDENTIFIER, false, |w| {
                    w.write_octet_string(&skid.to_bytes_be())
                });
            }
            if let Some(akid) = &self.authority_key_id {
                write_extension(w, oid::AUTHORITY_KEY_IDENTIFIER, false, |w| {
                    w.write_sequence(|w| {
                        w.write_element(Tag::context(0, false), &akid.to_bytes_be())
                    })
                });
            }
            if !self.certificate_policies.is_empty() {
                write_extension(w, oid::CERTIFICATE_POLICIES, false, |w| {
                    w.write_sequence(|w| {
                        for policy in &self.certificate_policies {
                            policy.write(w);
                        }
                    })
                });
            }
            if !self.authority_info_access.is_empty() {
                write_extension(w, oid::AUTHORITY_INFO_ACCESS, false, |w| {
                    w.write_sequence(|w| {
                        for ad in &self.authority_info_access {
                            ad.write(w);
                        }
                    })
                });
            }
        });
    }
}

/// DER omits BOOLEANs that equal their FALSE default, but explicit ones are
/// common enough to accept.
fn read_optional_boolean(rd: &mut Reader<'_>) -> Result<Option<bool>, Error> {
    match rd.any_left() && rd.peek_tag()? == Tag::BOOLEAN {
        true => rd.read_boolean().map(Some),
        false => Ok(None),
    }
}

fn write_extension(w: &mut Writer, id: &[u8], critical: bool, value: impl FnOnce(&mut Writer)) {
    let mut inner = Writer::new();
    value(&mut inner);
    w.write_sequence(|w| {
        w.write_oid(id);
        if critical {
            w.write_boolean(true);
        }
        w.write_octet_string(inner.as_bytes());
    });
}

/// The `basicConstraints` extension.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BasicConstraints {
    /// Whether the subject is a certificate authority
    pub ca: bool,
    /// The maximum number of intermediate certificates that may follow
    pub path_len: Option<u64>,
}

impl BasicConstraints {
    fn read(rd: &mut Reader<'_>) -> Result<Self, Error> {
        let mut seq = rd.read_sequence()?;
        let ca = read_optional_boolean(&mut seq)?.unwrap_or(false);
        let path_len = match seq.any_left() {
            true => Some(seq.read_small_integer()?),
            false => None,
        };
        seq.expect_empty("basic constraints")?;
        Ok(Self { ca, path_len })
    }

    fn write(&self, w: &mut Writer) {
        w.write_sequence(|w| {
            if self.ca {
                w.write_boolean(true);
            }
            if let Some(len) = self.path_len {
                w.write_small_integer(len);
            }
        });
    }
}

/// The `keyUsage` extension, as a set of bits.
///
/// Bit `n` of the value is named bit `n` of the BIT STRING.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct KeyUsage(pub u16);

impl KeyUsage {
    /// `digitalSignature`
    pub const DIGITAL_SIGNATURE: Self = Self(1 << 0);
    /// `nonRepudiation`, also known as `contentCommitment`
    pub const NON_REPUDIATION: Self = Self(1 << 1);
    /// `keyEncipherment`
    pub const KEY_ENCIPHERMENT: Self = Self(1 << 2);
    /// `dataEncipherment`
    pub const DATA_ENCIPHERMENT: Self = Self(1 << 3);
    /// `keyAgreement`
    pub const KEY_AGREEMENT: Self = Self(1 << 4);
    /// `keyCertSign`
    pub const KEY_CERT_SIGN: Self = Self(1 << 5);
    /// `cRLSign`
    pub const CRL_SIGN: Self = Self(1 << 6);
    /// `encipherOnly`
    pub const ENCIPHER_ONLY: Self = Self(1 << 7);
    /// `decipherOnly`
    pub const DECIPHER_ONLY: Self = Self(1 << 8);

    /// Whether every bit in `other` is set in `self`.
    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    fn read(rd: &mut Reader<'_>) -> Result<Self, Error> {
        let bits = rd.read_bit_string()?;
        Ok(Self(
            (0..9)
                .filter(|&n| bits.bit(n))
                .fold(0, |acc, n| acc | (1 << n)),
        ))
    }

    fn write(&self, w: &mut Writer) {
        let bits = (0..9)
            .map(|n| self.0 & (1 << n) != 0)
            .collect::<Vec<_>>();
        w.write_named_bits(&bits);
    }
}

impl core::ops::BitOr for KeyUsage {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// One purpose from the `extKeyUsage` extension.
#[non_exhaustive]
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ExtendedKeyUsage {
    /// `anyExtendedKeyUsage`
    Any,
    /// `id-kp-serverAuth`
    ServerAuth,
    /// `id-kp-clientAuth`
    ClientAuth,
    /// `id-kp-codeSigning`
    CodeSigning,
    /// `id-kp-emailProtection`
    EmailProtection,
    /// `id-kp-timeStamping`
    TimeStamping,
    /// `id-kp-OCSPSigning`
    OcspSigning,
    /// Any other purpose
    Other(ObjectIdentifier),
}

impl ExtendedKeyUsage {
    fn from_oid(id: &[u8]) -> Result<Self, Error> {
        Ok(match id {
            oid::ANY_EXTENDED_KEY_USAGE => Self::Any,
            oid::KP_SERVER_AUTH => Self::ServerAuth,
            oid::KP_CLIENT_AUTH => Self::ClientAuth,
            oid::KP_CODE_SIGNING => Self::CodeSigning,
            oid::KP_EMAIL_PROTECTION => Self::EmailProtection,
            oid::KP_TIME_STAMPING => Self::TimeStamping,
            oid::KP_OCSP_SIGNING => Self::OcspSigning,
            other => Self::Other(ObjectIdentifier::from_der_content(other)?),
        })
    }

    fn oid(&self) -> &[u8] {
        match self {
            Self::Any => oid::ANY_EXTENDED_KEY_USAGE,
            Self::ServerAuth => oid::KP_SERVER_AUTH,
            Self::ClientAuth => oid::KP_CLIENT_AUTH,
            Self::CodeSigning => oid::KP_CODE_SIGNING,
            Self::EmailProtection => oid::KP_EMAIL_PROTECTION,
            Self::TimeStamping => oid::KP_TIME_STAMPING,
            Self::OcspSigning => oid::KP_OCSP_SIGNING,
            Self::Other(id) => id.as_bytes(),
        }
    }
}

fn read_extended_key_usage(rd: &mut Reader<'_>) -> Result<Vec<ExtendedKeyUsage>, Error> {
    let mut seq = rd.read_sequence()?;
    let mut out = Vec::new();
    while seq.any_left() {
        out.push(ExtendedKeyUsage::from_oid(seq.read_oid()?)?);
    }
    Ok(out)
}

fn read_authority_key_id(rd: &mut Reader<'_>) -> Result<Option<BigUint>, Error> {
    let mut seq = rd.read_sequence()?;
    let key_id = seq
        .read_optional(Tag::context(0, false))?
        .map(|e| BigUint::from_bytes_be(e.content));
    // authorityCertIssuer and authorityCertSerialNumber are not kept
    while seq.any_left() {
        seq.read_element()?;
    }
    Ok(key_id)
}

/// One entry of the `certificatePolicies` extension.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CertificatePolicy {
    /// The policy's object identifier
    pub identifier: ObjectIdentifier,
    /// The qualifiers certkit understands; others are dropped
    pub qualifiers: Vec<PolicyQualifier>,
}

/// A policy qualifier.
#[non_exhaustive]
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PolicyQualifier {
    /// `id-qt-cps`: a pointer to a certification practice statement
    Cps(String),
    /// `id-qt-unotice`: the explicit text of a user notice, if it has one
    UserNotice(Option<String>),
}

impl CertificatePolicy {
    fn read(rd: &mut Reader<'_>) -> Result<Self, Error> {
        let mut info = rd.read_sequence()?;
        let identifier = ObjectIdentifier::from_der_content(info.read_oid()?)?;
        let mut qualifiers = Vec::new();

        if info.any_left() {
            let mut list = info.read_sequence()?;
            while list.any_left() {
                let mut pqi = list.read_sequence()?;
                match pqi.read_oid()? {
                    oid::QT_CPS => {
                        let uri = pqi.read_content(Tag::IA5_STRING)?;
                        let uri = core::str::from_utf8(uri)
                            .ok()
                            .filter(|s| s.is_ascii())
                            .ok_or(Error::from(EncodingError::InvalidString))?;
                        qualifiers.push(PolicyQualifier::Cps(uri.into()));
                    }
                    oid::QT_UNOTICE => {
                        let mut notice = pqi.read_sequence()?;
                        // noticeRef is not kept
                        notice.read_optional(Tag::SEQUENCE)?;
                        let text = match notice.any_left() {
                            true => Some(notice.read_directory_string()?),
                            false => None,
                        };
                        notice.expect_empty("user notice")?;
                        qualifiers.push(PolicyQualifier::UserNotice(text));
                    }
                    other => {
                        debug!("skipping policy qualifier {}", oid::to_dotted(other));
                        continue;
                    }
                }
                pqi.expect_empty("policy qualifier")?;
            }
        }
        info.expect_empty("policy information")?;

        Ok(Self {
            identifier,
            qualifiers,
        })
    }

    fn write(&self, w: &mut Writer) {
        w.write_sequence(|w| {
            w.write_oid(self.identifier.as_bytes());
            if self.qualifiers.is_empty() {
                return;
            }
            w.write_sequence(|w| {
                for qualifier in &self.qualifiers {
                    w.write_sequence(|w| match qualifier {
                        PolicyQualifier::Cps(uri) => {
                            w.write_oid(oid::QT_CPS);
                            w.write_ia5_string(uri);
                        }
                        PolicyQualifier::UserNotice(text) => {
                            w.write_oid(oid::QT_UNOTICE);
                            w.write_sequence(|w| {
                                if let Some(text) = text {
                                    w.write_utf8_string(text);
                                }
                            });
                        }
                    });
                }
            });
        });
    }
}

fn read_certificate_policies(rd: &mut Reader<'_>) -> Result<Vec<CertificatePolicy>, Error> {
    let mut seq = rd.read_sequence()?;
    let mut out = Vec::new();
    while seq.any_left() {
        out.push(CertificatePolicy::read(&mut seq)?);
    }
    Ok(out)
}

/// One entry of the `authorityInfoAccess` extension.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccessDescription {
    /// What the location offers
    pub method: AccessMethod,
    /// Where to find it
    pub location: GeneralName,
}

/// The `accessMethod` of an [`AccessDescription`].
#[non_exhaustive]
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AccessMethod {
    /// `id-ad-ocsp`
    Ocsp,
    /// `id-ad-caIssuers`
    CaIssuers,
    /// Any other method
    Other(ObjectIdentifier),
}

/// The `GeneralName` forms certkit keeps.
#[non_exhaustive]
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GeneralName {
    /// `rfc822Name`
    Email(String),
    /// `dNSName`
    Dns(String),
    /// `uniformResourceIdentifier`
    Uri(String),
    /// Some other form, identified by its context tag number
    Unsupported(u32),
}

impl GeneralName {
    fn read(rd: &mut Reader<'_>) -> Result<Self, Error> {
        let element = rd.read_element()?;
        let ia5 = || {
            core::str::from_utf8(element.content)
                .ok()
                .filter(|s| s.is_ascii())
                .map(String::from)
                .ok_or(Error::from(EncodingError::InvalidString))
        };

        match element.tag {
            t if t == Tag::context(1, false) => Ok(Self::Email(ia5()?)),
            t if t == Tag::context(2, false) => Ok(Self::Dns(ia5()?)),
            t if t == Tag::context(6, false) => Ok(Self::Uri(ia5()?)),
            t if t.class == Class::ContextSpecific => Ok(Self::Unsupported(t.number)),
            got => Err(EncodingError::UnexpectedTag {
                expected: Tag::context(6, false),
                got,
            }
            .into()),
        }
    }

    fn write(&self, w: &mut Writer) {
        match self {
            Self::Email(s) => w.write_element(Tag::context(1, false), s.as_bytes()),
            Self::Dns(s) => w.write_element(Tag::context(2, false), s.as_bytes()),
            Self::Uri(s) => w.write_element(Tag::context(6, false), s.as_bytes()),
            // nothing was kept, so there is nothing to write
            Self::Unsupported(_) => {}
        }
    }
}

impl AccessDescription {
    fn read(rd: &mut Reader<'_>) -> Result<Self, Error> {
        let mut seq = rd.read_sequence()?;
        let method = match seq.read_oid()? {
            oid::AD_OCSP => AccessMethod::Ocsp,
            oid::AD_CA_ISSUERS => AccessMethod::CaIssuers,
            other => AccessMethod::Other(ObjectIdentifier::from_der_content(other)?),
        };
        let location = GeneralName::read(&mut seq)?;
        seq.expect_empty("access description")?;
        Ok(Self { method, location })
    }

    fn write(&self, w: &mut Writer) {
        if let GeneralName::Unsupported(_) = self.location {
            return;
        }
        w.write_sequence(|w| {
            match &self.method {
                AccessMethod::Ocsp => w.write_oid(oid::AD_OCSP),
                AccessMethod::CaIssuers => w.write_oid(oid::AD_CA_ISSUERS),
                AccessMethod::Other(id) => w.write_oid(id.as_bytes()),
            }
            self.location.write(w);
        });
    }
}

fn read_authority_info_access(rd: &mut Reader<'_>) -> Result<Vec<AccessDescription>, Error> {
    let mut seq = rd.read_sequence()?;
    let mut out = Vec::new();
    while seq.any_left() {
        out.push(AccessDescription::read(&mut seq)?);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use std::prelude::v1::*;
    use std::vec;

    use super::*;

    fn round_trip(ext: &Extensions) -> Extensions {
        let mut w = Writer::new();
        ext.write(&mut w);
        let der = w.finish();
        let mut rd = Reader::init(&der);
        let read = Extensions::read(&mut rd).unwrap();
        assert!(!rd.any_left());
        read
    }

    #[test]
    fn all_extensions_round_trip() {
        let ext = Extensions {
            basic_constraints: Some(BasicConstraints {
                ca: true,
                path_len: Some(0),
            }),
            key_usage: Some(KeyUsage::KEY_CERT_SIGN | KeyUsage::CRL_SIGN),
            extended_key_usage: vec![
                ExtendedKeyUsage::ServerAuth,
                ExtendedKeyUsage::Other("1.3.6.1.4.1.311.10.3.4".parse().unwrap()),
            ],
            certificate_policies: vec![CertificatePolicy {
                identifier: "2.23.140.1.2.1".parse().unwrap(),
                qualifiers: vec![
                    PolicyQualifier::Cps("https://ca.example/cps".into()),
                    PolicyQualifier::UserNotice(Some("hello".into())),
                    PolicyQualifier::UserNotice(None),
                ],
            }],
            authority_info_access: vec![
                AccessDescription {
                    method: AccessMethod::Ocsp,
                    location: GeneralName::Uri("http://ocsp.example".into()),
                },
                AccessDescription {
                    method: AccessMethod::CaIssuers,
                    location: GeneralName::Dns("ca.example".into()),
                },
            ],
            subject_key_id: Some(BigUint::from(0x1234_5678u32)),
            authority_key_id: Some(BigUint::from(0xabcdu32)),
            unhandled_critical: vec![],
        };
        assert!(!ext.is_empty());
        assert_eq!(round_trip(&ext), ext);
    }

    #[test]
    fn key_usage_bits() {
        let mut w = Writer::new();
        (KeyUsage::DIGITAL_SIGNATURE | KeyUsage::KEY_ENCIPHERMENT).write(&mut w);
        assert_eq!(w.finish(), vec![0x03, 0x02, 0x05, 0xa0]);

        let mut w = Writer::new();
        KeyUsage::DECIPHER_ONLY.write(&mut w);
        let der = w.finish();
        assert_eq!(der, vec![0x03, 0x03, 0x07, 0x00, 0x80]);
        let ku = KeyUsage::read(&mut Reader::init(&der)).unwrap();
        assert!(ku.contains(KeyUsage::DECIPHER_ONLY));
        assert!(!ku.contains(KeyUsage::DIGITAL_SIGNATURE));
    }

    #[test]
    fn basic_constraints_defaults() {
        let mut w = Writer::new();
        BasicConstraints::default().write(&mut w);
        let der = w.finish();
        assert_eq!(der, vec![0x30, 0x00]);
        assert_eq!(
            BasicConstraints::read(&mut Reader::init(&der)).unwrap(),
            BasicConstraints::default()
        );
    }

    #[test]
    fn unknown_critical_extension_is_recorded() {
        let mut w = Writer::new();
        w.write_sequence(|w| {
            // 1.3.6.1.4.1.11129.2.4.2 (SCT list), critical for the sake of the test
            let sct = [0x2b, 0x06, 0x01, 0x04, 0x01, 0xd6, 0x79, 0x02, 0x04, 0x02];
            write_extension(w, &sct, true, |w| w.write_octet_string(&[1, 2, 3]));
            // 2.5.29.17 (subjectAltName), not critical
            write_extension(w, &[0x55, 0x1d, 0x11], false, |w| w.write_sequence(|_| {}));
        });
        let der = w.finish();

        let ext = Extensions::read(&mut Reader::init(&der)).unwrap();
        assert!(ext.is_empty());
        assert_eq!(
            ext.unhandled_critical,
            vec!["1.3.6.1.4.1.11129.2.4.2"
                .parse::<ObjectIdentifier>()
                .unwrap()]
        );
    }

    #[test]
    fn explicit_false_critical_flag_is_accepted() {
        let mut w = Writer::new();
        w.write_sequence(|w| {
            w.write_sequence(|w| {
                w.write_oid(oid::SUBJECT_KEY_IDENTIFIER);
                w.write_boolean(false);
                let mut inner = Writer::new();
                inner.write_octet_string(&[0x01, 0x02]);
                w.write_octet_string(inner.as_bytes());
            });
        });
        let der = w.finish();
        let ext = Extensions::read(&mut Reader::init(&der)).unwrap();
        assert_eq!(ext.subject_key_id, Some(BigUint::from(0x0102u32)));
    }

    #[test]
    fn other_general_names_are_unsupported() {
        let mut w = Writer::new();
        w.write_sequence(|w| {
            w.write_oid(oid::AD_CA_ISSUERS);
            // directoryName [4]
            w.write_constructed(Tag::context(4, true), |w| w.write_sequence(|_| {}));
        });
        let der = w.finish();
        let ad = AccessDescription::read(&mut Reader::init(&der)).unwrap();
        assert_eq!(ad.location, GeneralName::Unsupported(4));
    }
}
