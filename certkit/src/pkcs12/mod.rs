//! PKCS#12 (RFC 7292) key and certificate bundles, the `.p12`/`.pfx` files
//! that browsers and OpenSSL exchange.
//!
//! [`Pkcs12Container::load`] understands the password-integrity mode and the
//! legacy password-privacy schemes listed in [`PbeScheme`].  Public-key
//! integrity and privacy modes (`signedData`, `envelopedData`) are not
//! supported.
//!
//! ```no_run
//! # fn example(der: &[u8], provider: &certkit::crypto::CryptoProvider) -> Result<(), certkit::Error> {
//! use certkit::pkcs12::Pkcs12Container;
//!
//! let bundle = Pkcs12Container::load(der, "test1234", provider)?;
//! for (cert, name) in bundle.certificates.iter().zip(&bundle.friendly_names) {
//!     println!("{name}: {} bytes", cert.len());
//! }
//! # Ok(())
//! # }
//! ```

use alloc::string::String;
use alloc::vec::Vec;

use pki_types::CertificateDer;
use subtle::ConstantTimeEq;
use zeroize::Zeroizing;

use crate::crypto::{CryptoProvider, HashAlgorithm};
use crate::der::{Reader, Tag, Writer};
use crate::error::{EncodingError, Error};
use crate::key::PrivateKey;
use crate::log::{debug, trace, warn};
use crate::oid;
use crate::rand;

mod bag;
mod kdf;
mod pbe;

use bag::{BagAttributes, Bags};
pub use kdf::{bmp_password, derive_key, ID_IV, ID_KEY, ID_MAC};
pub(crate) use pbe::PbeParams;
pub use pbe::PbeScheme;
use pbe::{read_iterations, MAX_ITERATIONS};

/// The contents of a PKCS#12 bundle.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Pkcs12Container {
    /// The private key, if the bundle has one
    pub private_key: Option<PrivateKey>,
    /// The certificates.  The one belonging to `private_key`, if it can be
    /// identified, comes first.
    pub certificates: Vec<CertificateDer<'static>>,
    /// The friendly name of each certificate, in the same order as
    /// `certificates`.  Certificates without a name have an empty string.
    pub friendly_names: Vec<String>,
    /// The friendly name of `private_key`
    pub friendly_name_of_key: Option<String>,
}

impl Pkcs12Container {
    /// Decode a DER PKCS#12 bundle protected by `password`.
    ///
    /// A wrong password, corrupted ciphertext and a failed integrity check are
    /// all reported as [`Error::DecryptionFailed`].
    pub fn load(der: &[u8], password: &str, provider: &CryptoProvider) -> Result<Self, Error> {
        let password = bmp_password(password);

        let mut rd = Reader::init(der);
        let mut pfx = rd.read_sequence()?;
        rd.expect_empty("PFX")?;

        if pfx.read_small_integer()? != 3 {
            return Err(EncodingError::UnsupportedVersion("PFX").into());
        }

        let mut auth_safe = pfx.read_sequence()?;
        let auth_safe = match auth_safe.read_oid()? {
            oid::PKCS7_DATA => read_data(&mut auth_safe)?,
            oid::PKCS7_SIGNED_DATA => {
                debug!("public-key integrity mode is not supported");
                return Err(Error::UnsupportedAlgorithm("signedData".into()));
            }
            other => return Err(Error::UnsupportedAlgorithm(oid::to_dotted(other))),
        };

        match pfx.any_left() {
            true => {
                let mut mac_data = pfx.read_sequence()?;
                check_mac(&mut mac_data, auth_safe, &password, provider)?;
                mac_data.expect_empty("MAC data")?;
            }
            false => debug!("bundle has no MAC"),
        }
        pfx.expect_empty("PFX")?;

        let mut bags = Bags::default();
        let mut rd = Reader::init(auth_safe);
        let mut contents = rd.read_sequence()?;
        rd.expect_empty("authenticated safe")?;

        while contents.any_left() {
            let mut info = contents.read_sequence()?;
            match info.read_oid()? {
                oid::PKCS7_DATA => {
                    let data = read_data(&mut info)?;
                    read_safe_contents(&mut bags, data, &password, provider)?;
                }
                oid::PKCS7_ENCRYPTED_DATA => {
                    let mut explicit = info.read_context(0)?;
                    let plaintext = decrypt_encrypted_data(&mut explicit, &password, provider)?;
                    explicit.expect_empty("encrypted data")?;
                    match read_safe_contents(&mut bags, &plaintext, &password, provider) {
                        Err(Error::MalformedEncoding(_)) => return Err(Error::DecryptionFailed),
                        other => other?,
                    }
                }
                other => {
                    debug!("unsupported content type {}", oid::to_dotted(other));
                    return Err(Error::UnsupportedAlgorithm(oid::to_dotted(other)));
                }
            }
            info.expect_empty("content info")?;
        }

        Ok(Self::from_bags(bags))
    }

    fn from_bags(bags: Bags) -> Self {
        let mut keys = bags.keys.into_iter();
        let (private_key, key_attributes) = match keys.next() {
            Some((key, attributes)) => (Some(key), attributes),
            None => (None, BagAttributes::default()),
        };
        if keys.next().is_some() {
            debug!("bundle has more than one key; using the first");
        }

        let mut certificates = bags.certificates;
        if let Some(id) = &key_attributes.local_key_id {
            let matching = certificates
                .iter()
                .position(|(_, attributes)| attributes.local_key_id.as_ref() == Some(id));
            if let Some(index) = matching {
                let cert = certificates.remove(index);
                certificates.insert(0, cert);
            }
        }

        trace!(
            "loaded bundle with {} key(s) and {} certificate(s)",
            usize::from(private_key.is_some()),
            certificates.len()
        );

        let (certificates, friendly_names) = certificates
            .into_iter()
            .map(|(cert, attributes)| (cert, attributes.friendly_name.unwrap_or_default()))
            .unzip();

        Self {
            private_key,
            certificates,
            friendly_names,
            friendly_name_of_key: key_attributes.friendly_name,
        }
    }

    /// Encode the bundle with `password`, using [`Pkcs12Options::default()`].
    pub fn save(&self, password: &str, provider: &CryptoProvider) -> Result<Vec<u8>, Error> {
        self.save_with(password, &Pkcs12Options::default(), provider)
    }

    /// Encode the bundle with `password` and the given options.
    ///
    /// The key and the certificates are written into one encrypted
    /// `SafeContents`.  The key and the first certificate are tied together
    /// with a `localKeyId` attribute: the SHA-1 hash of the certificate.
    pub fn save_with(
        &self,
        password: &str,
        options: &Pkcs12Options,
        provider: &CryptoProvider,
    ) -> Result<Vec<u8>, Error> {
        if !(1..=MAX_ITERATIONS).contains(&options.iterations) {
            return Err(EncodingError::IntegerOutOfRange.into());
        }
        let password = bmp_password(password);
        let sha1 = provider.hash(HashAlgorithm::Sha1)?;

        let local_key_id = match (&self.private_key, self.certificates.first()) {
            (Some(_), Some(cert)) => Some(sha1.hash(cert).as_ref().to_vec()),
            _ => None,
        };

        let mut bags = Bags::default();
        if let Some(key) = &self.private_key {
            bags.keys.push((
                key.clone(),
                BagAttributes {
                    friendly_name: self.friendly_name_of_key.clone(),
                    local_key_id: local_key_id.clone(),
                },
            ));
        }
        for (i, cert) in self.certificates.iter().enumerate() {
            let friendly_name = self
                .friendly_names
                .get(i)
                .filter(|name| !name.is_empty())
                .cloned();
            bags.certificates.push((
                cert.clone(),
                BagAttributes {
                    friendly_name,
                    local_key_id: local_key_id.clone().filter(|_| i == 0),
                },
            ));
        }

        let mut safe_contents = Writer::new();
        bags.write_safe_contents(&mut safe_contents);
        let safe_contents = Zeroizing::new(safe_contents.finish());

        let salt = rand::salt(provider.secure_random, options.salt_len)?;
        let params = PbeParams {
            scheme: options.scheme,
            salt: &salt,
            iterations: options.iterations,
        };
        let ciphertext = params.encrypt(&password, &safe_contents, provider)?;

        let mut auth_safe = Writer::new();
        auth_safe.write_sequence(|w| {
            w.write_sequence(|w| {
                w.write_oid(oid::PKCS7_ENCRYPTED_DATA);
                w.write_context(0, |w| {
                    w.write_sequence(|w| {
                        w.write_small_integer(0);
                        w.write_sequence(|w| {
                            w.write_oid(oid::PKCS7_DATA);
                            params.write(w);
                            w.write_element(Tag::context(0, false), &ciphertext);
                        });
                    });
                });
            });
        });
        let auth_safe = auth_safe.finish();

        let mac = match options.mac {
            true => {
                let salt = rand::salt(provider.secure_random, options.salt_len)?;
                let key = derive_key(
                    sha1,
                    ID_MAC,
                    &password,
                    &salt,
                    options.iterations,
                    sha1.output_len(),
                );
                let tag = provider
                    .hmac(HashAlgorithm::Sha1)?
                    .open_key(&key)
                    .sign(&[auth_safe.as_slice()]);
                Some((tag, salt))
            }
            false => None,
        };

        let mut pfx = Writer::new();
        pfx.write_sequence(|w| {
            w.write_small_integer(3);
            w.write_sequence(|w| {
                w.write_oid(oid::PKCS7_DATA);
                w.write_context(0, |w| w.write_octet_string(&auth_safe));
            });
            if let Some((tag, salt)) = &mac {
                w.write_sequence(|w| {
                    w.write_sequence(|w| {
                        w.write_sequence(|w| {
                            w.write_oid(oid::SHA1);
                            w.write_null();
                        });
                        w.write_octet_string(tag.as_ref());
                    });
                    w.write_octet_string(salt);
                    w.write_small_integer(options.iterations);
                });
            }
        });

        debug!(
            "saved bundle with {} certificate(s) using {:?}",
            self.certificates.len(),
            options.scheme
        );
        Ok(pfx.finish())
    }

    /// Read and decode the bundle at `path`.
    #[cfg(feature = "std")]
    pub fn load_file(
        path: impl AsRef<std::path::Path>,
        password: &str,
        provider: &CryptoProvider,
    ) -> Result<Self, Error> {
        Self::load(&std::fs::read(path)?, password, provider)
    }

    /// Encode the bundle with default options and write it to `path`.
    #[cfg(feature = "std")]
    pub fn save_file(
        &self,
        path: impl AsRef<std::path::Path>,
        password: &str,
        provider: &CryptoProvider,
    ) -> Result<(), Error> {
        std::fs::write(path, self.save(password, provider)?)?;
        Ok(())
    }
}

/// How [`Pkcs12Container::save_with`] protects a bundle.
///
/// The default is 3DES encryption with 51 200 iterations and 20-byte salts,
/// plus an HMAC-SHA1 MAC.  Every PKCS#12 reader in common use accepts that.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pkcs12Options {
    scheme: PbeScheme,
    iterations: u64,
    salt_len: usize,
    mac: bool,
}

impl Pkcs12Options {
    /// Use `scheme` to encrypt the bundle contents.
    pub fn with_scheme(mut self, scheme: PbeScheme) -> Self {
        self.scheme = scheme;
        self
    }

    /// Use `iterations` rounds for key derivation, for both encryption and
    /// the MAC.  It must be between 1 and 10 000 000.
    pub fn with_iterations(mut self, iterations: u64) -> Self {
        self.iterations = iterations;
        self
    }

    /// Use salts of `salt_len` random bytes.
    pub fn with_salt_len(mut self, salt_len: usize) -> Self {
        self.salt_len = salt_len;
        self
    }

    /// Whether to add a MAC over the bundle.
    pub fn with_mac(mut self, mac: bool) -> Self {
        self.mac = mac;
        self
    }
}

impl Default for Pkcs12Options {
    fn default() -> Self {
        Self {
            scheme: PbeScheme::Sha1TripleDes3Key,
            iterations: 51_200,
            salt_len: 20,
            mac: true,
        }
    }
}

/// The `[0] EXPLICIT OCTET STRING` content of a `data` ContentInfo.
fn read_data<'a>(info: &mut Reader<'a>) -> Result<&'a [u8], Error> {
    let mut explicit = info.read_context(0)?;
    let data = explicit.read_octet_string()?;
    explicit.expect_empty("data")?;
    Ok(data)
}

fn read_safe_contents(
    bags: &mut Bags,
    der: &[u8],
    password: &[u8],
    provider: &CryptoProvider,
) -> Result<(), Error> {
    let mut rd = Reader::init(der);
    bags.read_safe_contents(&mut rd, password, provider, 0)?;
    rd.expect_empty("safe contents")
}

/// ```text
/// EncryptedData ::= SEQUENCE {
///     version Version,
///     encryptedContentInfo EncryptedContentInfo }
/// EncryptedContentInfo ::= SEQUENCE {
///     contentType ContentType,
///     contentEncryptionAlgorithm AlgorithmIdentifier,
///     encryptedContent [0] IMPLICIT OCTET STRING OPTIONAL }
/// ```
fn decrypt_encrypted_data(
    rd: &mut Reader<'_>,
    password: &[u8],
    provider: &CryptoProvider,
) -> Result<Zeroizing<Vec<u8>>, Error> {
    let mut data = rd.read_sequence()?;
    if data.read_small_integer()? != 0 {
        return Err(EncodingError::UnsupportedVersion("encrypted data").into());
    }

    let mut info = data.read_sequence()?;
    data.expect_empty("encrypted data")?;
    let content_type = info.read_oid()?;
    if content_type != oid::PKCS7_DATA {
        return Err(Error::UnsupportedAlgorithm(oid::to_dotted(content_type)));
    }
    let params = PbeParams::read(&mut info)?;
    let ciphertext = info
        .read_optional(Tag::context(0, false))?
        .ok_or(EncodingError::MissingField("encrypted content"))?;
    info.expect_empty("encrypted content info")?;

    params.decrypt(password, ciphertext.content, provider)
}

/// ```text
/// MacData ::= SEQUENCE {
///     mac DigestInfo,
///     macSalt OCTET STRING,
///     iterations INTEGER DEFAULT 1 }
/// ```
fn check_mac(
    mac_data: &mut Reader<'_>,
    auth_safe: &[u8],
    password: &[u8],
    provider: &CryptoProvider,
) -> Result<(), Error> {
    let mut digest_info = mac_data.read_sequence()?;
    let mut alg = digest_info.read_sequence()?;
    let alg_oid = alg.read_oid()?;
    let hash_algorithm = HashAlgorithm::from_oid(alg_oid)
        .ok_or_else(|| Error::UnsupportedAlgorithm(oid::to_dotted(alg_oid)))?;
    if alg.any_left() {
        alg.read_null()?;
    }
    alg.expect_empty("MAC algorithm")?;
    let expected = digest_info.read_octet_string()?;
    digest_info.expect_empty("MAC")?;

    let salt = mac_data.read_octet_string()?;
    let iterations = match mac_data.any_left() {
        true => read_iterations(mac_data)?,
        false => 1,
    };

    let hash = provider.hash(hash_algorithm)?;
    let key = derive_key(
        hash,
        ID_MAC,
        password,
        salt,
        iterations,
        hash.output_len(),
    );
    let actual = provider
        .hmac(hash_algorithm)?
        .open_key(&key)
        .sign(&[auth_safe]);

    match bool::from(actual.as_ref().ct_eq(expected)) {
        true => Ok(()),
        false => {
            warn!("PKCS#12 MAC check failed");
            Err(Error::DecryptionFailed)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::prelude::v1::*;
    use std::vec;

    use num_bigint::BigUint;

    use super::*;
    use crate::crypto::test_provider::TEST_PROVIDER;
    use crate::key::rsa::RsaPrivateKey;

    fn container() -> Pkcs12Container {
        Pkcs12Container {
            private_key: Some(PrivateKey::Rsa(RsaPrivateKey {
                modulus: BigUint::from(3233u32),
                public_exponent: BigUint::from(17u32),
                private_exponent: BigUint::from(413u32),
                crt: None,
            })),
            certificates: vec![
                CertificateDer::from(vec![0x30, 0x03, 0x02, 0x01, 0x01]),
                CertificateDer::from(vec![0x30, 0x03, 0x02, 0x01, 0x02]),
            ],
            friendly_names: vec!["leaf".into(), String::new()],
            friendly_name_of_key: Some("my key".into()),
        }
    }

    fn quick() -> Pkcs12Options {
        Pkcs12Options::default().with_iterations(3)
    }

    #[test]
    fn save_then_load() {
        let bundle = container();
        for scheme in [
            PbeScheme::Sha1TripleDes3Key,
            PbeScheme::Sha1TripleDes2Key,
            PbeScheme::Sha1Rc2_128,
            PbeScheme::Sha1Rc2_40,
        ] {
            let der = bundle
                .save_with("pass", &quick().with_scheme(scheme), &TEST_PROVIDER)
                .unwrap();
            assert_eq!(
                Pkcs12Container::load(&der, "pass", &TEST_PROVIDER).unwrap(),
                bundle
            );
        }
    }

    #[test]
    fn wrong_password() {
        let der = container()
            .save_with("pass", &quick(), &TEST_PROVIDER)
            .unwrap();
        assert_eq!(
            Pkcs12Container::load(&der, "wrong", &TEST_PROVIDER),
            Err(Error::DecryptionFailed)
        );

        // without the MAC, decryption itself has to notice
        let der = container()
            .save_with("pass", &quick().with_mac(false), &TEST_PROVIDER)
            .unwrap();
        assert_eq!(
            Pkcs12Container::load(&der, "wrong", &TEST_PROVIDER),
            Err(Error::DecryptionFailed)
        );
    }

    #[test]
    fn tampered_bundle_fails_mac() {
        let mut der = container()
            .save_with("pass", &quick(), &TEST_PROVIDER)
            .unwrap();
        // flip a byte of the ciphertext, which sits well inside the authSafe
        let mid = der.len() / 2;
        der[mid] ^= 1;
        assert_eq!(
            Pkcs12Container::load(&der, "pass", &TEST_PROVIDER),
            Err(Error::DecryptionFailed)
        );
    }

    #[test]
    fn key_certificate_moves_first() {
        let mut bags = Bags::default();
        bags.keys.push((
            container().private_key.unwrap(),
            BagAttributes {
                friendly_name: None,
                local_key_id: Some(vec![2]),
            },
        ));
        for (id, byte) in [(1u8, 0x11u8), (2, 0x22), (3, 0x33)] {
            bags.certificates.push((
                CertificateDer::from(vec![byte]),
                BagAttributes {
                    friendly_name: None,
                    local_key_id: Some(vec![id]),
                },
            ));
        }

        let bundle = Pkcs12Container::from_bags(bags);
        let firsts = bundle
            .certificates
            .iter()
            .map(|c| c[0])
            .collect::<Vec<_>>();
        assert_eq!(firsts, [0x22, 0x11, 0x33]);
        assert_eq!(bundle.friendly_names, ["", "", ""]);
        assert_eq!(bundle.friendly_name_of_key, None);
    }

    #[test]
    fn certificates_only() {
        let bundle = Pkcs12Container {
            private_key: None,
            friendly_name_of_key: None,
            ..container()
        };
        let der = bundle
            .save_with("", &quick(), &TEST_PROVIDER)
            .unwrap();
        let loaded = Pkcs12Container::load(&der, "", &TEST_PROVIDER).unwrap();
        assert_eq!(loaded, bundle);
    }

    #[test]
    fn version_must_be_three() {
        let mut w = Writer::new();
        w.write_sequence(|w| {
            w.write_small_integer(2);
        });
        assert_eq!(
            Pkcs12Container::load(&w.finish(), "", &TEST_PROVIDER),
            Err(Error::from(EncodingError::UnsupportedVersion("PFX")))
        );
    }

    #[test]
    fn signed_data_is_unsupported() {
        let mut w = Writer::new();
        w.write_sequence(|w| {
            w.write_small_integer(3);
            w.write_sequence(|w| {
                w.write_oid(oid::PKCS7_SIGNED_DATA);
                w.write_context(0, |w| w.write_sequence(|_| {}));
            });
        });
        assert_eq!(
            Pkcs12Container::load(&w.finish(), "", &TEST_PROVIDER),
            Err(Error::UnsupportedAlgorithm("signedData".into()))
        );
    }

    #[test]
    fn bad_iterations_are_refused() {
        assert_eq!(
            container().save_with("", &quick().with_iterations(0), &TEST_PROVIDER),
            Err(Error::from(EncodingError::IntegerOutOfRange))
        );
    }
}
