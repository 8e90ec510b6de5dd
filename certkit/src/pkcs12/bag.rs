use alloc::string::String;
use alloc::vec::Vec;

use pki_types::CertificateDer;

use crate::crypto::CryptoProvider;
use crate::der::{Reader, Writer};
use crate::error::{EncodingError, Error};
use crate::key::PrivateKey;
use crate::log::debug;
use crate::{oid, pkcs8};

/// `safeContentsBag`s may nest this deep and no deeper.
const MAX_DEPTH: usize = 8;

/// What a `SafeBag` holds, going by its `bagId`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum BagType {
    Key,
    ShroudedKey,
    Certificate,
    Crl,
    Secret,
    SafeContents,
    Unknown,
}

impl BagType {
    fn from_oid(bag_id: &[u8]) -> Self {
        match bag_id {
            oid::KEY_BAG => Self::Key,
            oid::PKCS8_SHROUDED_KEY_BAG => Self::ShroudedKey,
            oid::CERT_BAG => Self::Certificate,
            oid::CRL_BAG => Self::Crl,
            oid::SECRET_BAG => Self::Secret,
            oid::SAFE_CONTENTS_BAG => Self::SafeContents,
            _ => Self::Unknown,
        }
    }
}

/// The attributes certkit keeps from a bag.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(super) struct BagAttributes {
    pub(super) friendly_name: Option<String>,
    pub(super) local_key_id: Option<Vec<u8>>,
}

impl BagAttributes {
    fn read(rd: &mut Reader<'_>) -> Result<Self, Error> {
        let mut out = Self::default();
        let mut set = rd.read_set()?;

        while set.any_left() {
            let mut attr = set.read_sequence()?;
            let attr_oid = attr.read_oid()?;
            let mut values = attr.read_set()?;
            attr.expect_empty("bag attribute")?;

            match attr_oid {
                oid::FRIENDLY_NAME => out.friendly_name = Some(values.read_bmp_string()?),
                oid::LOCAL_KEY_ID => out.local_key_id = Some(values.read_octet_string()?.to_vec()),
                other => {
                    debug!("skipping bag attribute {}", oid::to_dotted(other));
                    continue;
                }
            }
            // both attributes are single-valued
            values.expect_empty("bag attribute")?;
        }

        Ok(out)
    }

    fn write(&self, w: &mut Writer) {
        if self.friendly_name.is_none() && self.local_key_id.is_none() {
            return;
        }

        w.write_set(|w| {
            if let Some(name) = &self.friendly_name {
                w.write_sequence(|w| {
                    w.write_oid(oid::FRIENDLY_NAME);
                    w.write_set(|w| w.write_bmp_string(name));
                });
            }
            if let Some(id) = &self.local_key_id {
                w.write_sequence(|w| {
                    w.write_oid(oid::LOCAL_KEY_ID);
                    w.write_set(|w| w.write_octet_string(id));
                });
            }
        });
    }
}

/// Everything found in one or more `SafeContents`, in order.
#[derive(Debug, Default)]
pub(super) struct Bags {
    pub(super) keys: Vec<(PrivateKey, BagAttributes)>,
    pub(super) certificates: Vec<(CertificateDer<'static>, BagAttributes)>,
}

impl Bags {
    /// Read a `SafeContents` and add its bags.  `password` is in BMPString form
    /// and is needed for shrouded key bags.
    pub(super) fn read_safe_contents(
        &mut self,
        rd: &mut Reader<'_>,
        password: &[u8],
        provider: &CryptoProvider,
        depth: usize,
    ) -> Result<(), Error> {
        if depth > MAX_DEPTH {
            return Err(EncodingError::TooDeeplyNested.into());
        }

        let mut bags = rd.read_sequence()?;
        while bags.any_left() {
            let mut bag = bags.read_sequence()?;
            let bag_id = bag.read_oid()?;
            let mut value = bag.read_context(0)?;
            let attributes = match bag.any_left() {
                true => BagAttributes::read(&mut bag)?,
                false => BagAttributes::default(),
            };
            bag.expect_empty("safe bag")?;

            match BagType::from_oid(bag_id) {
                BagType::Key => {
                    let key = pkcs8::read(&mut value, provider)?;
                    self.keys.push((key, attributes));
                }
                BagType::ShroudedKey => {
                    let key = pkcs8::read_encrypted(&mut value, password, provider)?;
                    self.keys.push((key, attributes));
                }
                BagType::Certificate => {
                    if let Some(cert) = read_cert_bag(&mut value)? {
                        self.certificates.push((cert, attributes));
                    }
                }
                BagType::SafeContents => {
                    self.read_safe_contents(&mut value, password, provider, depth + 1)?;
                }
                BagType::Crl => {
                    debug!("skipping CRL bag");
                    continue;
                }
                BagType::Secret => {
                    debug!("skipping secret bag");
                    continue;
                }
                BagType::Unknown => {
                    debug!("skipping unknown bag type {}", oid::to_dotted(bag_id));
                    continue;
                }
            }
            value.expect_empty("bag value")?;
        }

        Ok(())
    }

    /// Write one `SafeContents` holding a key bag (if there is a key) and a
    /// certificate bag for each certificate.
    pub(super) fn write_safe_contents(&self, w: &mut Writer) {
        w.write_sequence(|w| {
            for (key, attributes) in &self.keys {
                w.write_sequence(|w| {
                    w.write_oid(oid::KEY_BAG);
                    w.write_context(0, |w| pkcs8::write(key, w));
                    attributes.write(w);
                });
            }
            for (cert, attributes) in &self.certificates {
                w.write_sequence(|w| {
                    w.write_oid(oid::CERT_BAG);
                    w.write_context(0, |w| {
                        w.write_sequence(|w| {
                            w.write_oid(oid::X509_CERTIFICATE);
                            w.write_context(0, |w| w.write_octet_string(cert));
                        })
                    });
                    attributes.write(w);
                });
            }
        });
    }
}

/// `CertBag ::= SEQUENCE { certId OID, certValue [0] EXPLICIT ANY }`
///
/// Only X.509 certificates are returned; other certificate types are skipped.
fn read_cert_bag(rd: &mut Reader<'_>) -> Result<Option<CertificateDer<'static>>, Error> {
    let mut bag = rd.read_sequence()?;
    let cert_id = bag.read_oid()?;
    let mut value = bag.read_context(0)?;
    bag.expect_empty("certificate bag")?;

    if cert_id != oid::X509_CERTIFICATE {
        debug!("skipping certificate of type {}", oid::to_dotted(cert_id));
        return Ok(None);
    }

    let der = value.read_octet_string()?;
    value.expect_empty("certificate bag")?;
    Ok(Some(CertificateDer::from(der.to_vec())))
}

#[cfg(test)]
mod tests {
    use std::prelude::v1::*;
    use std::vec;

    use super::*;
    use crate::crypto::test_provider::TEST_PROVIDER;

    fn nested_safe_contents(levels: usize) -> Vec<u8> {
        let mut w = Writer::new();
        w.write_sequence(|_| {});
        let mut der = w.finish();
        for _ in 0..levels {
            let mut w = Writer::new();
            w.write_sequence(|w| {
                w.write_sequence(|w| {
                    w.write_oid(oid::SAFE_CONTENTS_BAG);
                    w.write_context(0, |w| w.write_raw(&der));
                });
            });
            der = w.finish();
        }
        der
    }

    #[test]
    fn nesting_limit() {
        let der = nested_safe_contents(MAX_DEPTH);
        let mut bags = Bags::default();
        bags.read_safe_contents(&mut Reader::init(&der), &[0, 0], &TEST_PROVIDER, 0)
            .unwrap();
        assert!(bags.keys.is_empty());

        let der = nested_safe_contents(MAX_DEPTH + 1);
        assert_eq!(
            Bags::default().read_safe_contents(&mut Reader::init(&der), &[0, 0], &TEST_PROVIDER, 0),
            Err(Error::from(EncodingError::TooDeeplyNested))
        );
    }

    #[test]
    fn safe_contents_round_trip() {
        let mut bags = Bags::default();
        bags.certificates.push((
            CertificateDer::from(vec![0x30, 0x00]),
            BagAttributes {
                friendly_name: Some("cert".into()),
                local_key_id: None,
            },
        ));
        let mut w = Writer::new();
        bags.write_safe_contents(&mut w);
        let der = w.finish();

        let mut read = Bags::default();
        read.read_safe_contents(&mut Reader::init(&der), &[0, 0], &TEST_PROVIDER, 0)
            .unwrap();
        assert_eq!(read.certificates, bags.certificates);
    }

    #[test]
    fn attributes_round_trip() {
        let attributes = BagAttributes {
            friendly_name: Some("my key".into()),
            local_key_id: Some(vec![1, 2, 3, 4]),
        };
        let mut w = Writer::new();
        attributes.write(&mut w);
        let der = w.finish();
        assert_eq!(der[0], 0x31);
        assert_eq!(BagAttributes::read(&mut Reader::init(&der)).unwrap(), attributes);
    }

    #[test]
    fn no_attributes_writes_nothing() {
        let mut w = Writer::new();
        BagAttributes::default().write(&mut w);
        assert!(w.finish().is_empty());
    }

    #[test]
    fn bag_types() {
        for (bag_id, bag_type) in [
            (oid::KEY_BAG, BagType::Key),
            (oid::PKCS8_SHROUDED_KEY_BAG, BagType::ShroudedKey),
            (oid::CERT_BAG, BagType::Certificate),
            (oid::CRL_BAG, BagType::Crl),
            (oid::SECRET_BAG, BagType::Secret),
            (oid::SAFE_CONTENTS_BAG, BagType::SafeContents),
            (oid::RSA_ENCRYPTION, BagType::Unknown),
        ] {
            assert_eq!(BagType::from_oid(bag_id), bag_type);
        }
    }

    #[test]
    fn unknown_bags_are_skipped() {
        let mut w = Writer::new();
        w.write_sequence(|w| {
            w.write_sequence(|w| {
                w.write_oid(oid::SECRET_BAG);
                w.write_context(0, |w| w.write_null());
            });
            w.write_sequence(|w| {
                w.write_oid(oid::RSA_ENCRYPTION);
                w.write_context(0, |w| w.write_null());
            });
        });
        let der = w.finish();

        let mut bags = Bags::default();
        bags.read_safe_contents(&mut Reader::init(&der), &[0, 0], &TEST_PROVIDER, 0)
            .unwrap();
        assert!(bags.keys.is_empty());
        assert!(bags.certificates.is_empty());
    }

    #[test]
    fn non_x509_certificates_are_skipped() {
        let mut w = Writer::new();
        w.write_sequence(|w| {
            // sdsiCertificate
            w.write_oid(&[0x2a, 0x86, 0x48, 0x86, 0xf7, 0x0d, 0x01, 0x09, 0x16, 0x02]);
            w.write_context(0, |w| w.write_ia5_string("abc"));
        });
        let der = w.finish();
        assert_eq!(read_cert_bag(&mut Reader::init(&der)), Ok(None));
    }
}
