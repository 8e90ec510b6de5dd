use alloc::format;
use alloc::vec::Vec;

use pki_types::CertificateDer;

use super::algorithm::SignatureScheme;
use super::{Certificate, SignatureAlgorithm};
use crate::crypto::CryptoProvider;
use crate::der::Writer;
use crate::error::Error;
use crate::key::PrivateKey;
use crate::log::debug;

impl Certificate {
    /// Encode the `TBSCertificate` that [`Certificate::sign`] would sign.
    ///
    /// The result is always a v3 body.  `self.version`, `self.signature_algorithm`,
    /// `self.signed_content_hash` and `self.signature` are not used, and
    /// `extensions.unhandled_critical` cannot be encoded, so it is dropped.
    pub fn to_tbs_der(&self, algorithm: SignatureAlgorithm) -> Vec<u8> {
        let mut w = Writer::new();
        w.write_sequence(|w| {
            w.write_context(0, |w| w.write_small_integer(2));
            w.write_integer(&self.serial_number);
            algorithm.write(w);
            self.issuer.write(w);
            w.write_sequence(|w| {
                w.write_time(self.valid_from);
                w.write_time(self.valid_to);
            });
            self.subject.write(w);
            self.public_key.write_spki(w);
            if !self.extensions.is_empty() {
                w.write_context(3, |w| self.extensions.write(w));
            }
        });
        w.finish()
    }

    /// Sign the certificate's contents with `issuer_key`, returning the DER
    /// certificate.
    ///
    /// `issuer_key` must suit `algorithm`: an RSA key for the PKCS#1 and PSS
    /// algorithms, a key on a named curve for ECDSA.
    pub fn sign(
        &self,
        issuer_key: &PrivateKey,
        algorithm: SignatureAlgorithm,
        provider: &CryptoProvider,
    ) -> Result<CertificateDer<'static>, Error> {
        let hash = algorithm.hash_algorithm();
        let tbs = self.to_tbs_der(algorithm);
        let digest = provider.hash(hash)?.hash(&tbs);
        let digest = digest.as_ref();

        let signature = match (issuer_key, algorithm.scheme()) {
            (PrivateKey::Rsa(key), SignatureScheme::RsaPkcs1) => {
                provider.rsa.sign_pkcs1(key, hash, digest)?
            }
            (PrivateKey::Rsa(key), SignatureScheme::RsaPss) => {
                provider.rsa.sign_pss(key, hash, digest)?
            }
            (PrivateKey::Ec(key), SignatureScheme::Ecdsa) => {
                let curve = key.curve.require_named()?;
                let (r, s) = provider
                    .ecdsa
                    .sign(curve, &key.secret, digest)?;
                let mut sig = Writer::new();
                sig.write_sequence(|w| {
                    w.write_unsigned_bytes(&r);
                    w.write_unsigned_bytes(&s);
                });
                sig.finish()
            }
            (PrivateKey::Rsa(_), _) => {
                return Err(Error::UnsupportedAlgorithm(format!("{algorithm} with an RSA key")));
            }
            (PrivateKey::Ec(_), _) => {
                return Err(Error::UnsupportedAlgorithm(format!("{algorithm} with an EC key")));
            }
        };
        debug!("signed certificate with {algorithm}");

        let mut w = Writer::new();
        w.write_sequence(|w| {
            w.write_raw(&tbs);
            algorithm.write(w);
            w.write_bit_string(&signature);
        });
        Ok(CertificateDer::from(w.finish()))
    }
}
