use subtle::ConstantTimeEq;

use super::algorithm::SignatureScheme;
use super::Certificate;
use crate::crypto::{CryptoProvider, HashAlgorithm};
use crate::der::Reader;
use crate::error::Error;
use crate::key::ecc::EcPublicKey;
use crate::key::rsa::RsaPublicKey;
use crate::key::PublicKey;
use crate::log::debug;

impl Certificate {
    /// Check the certificate's signature against `issuer`.
    ///
    /// This only checks the signature: not validity times, not key usage, not
    /// the issuer's name.  Any failure, including an unparseable signature or
    /// a key of the wrong type, is `false`.
    pub fn verify(&self, issuer: &PublicKey, provider: &CryptoProvider) -> bool {
        let hash = self.signature_algorithm.hash_algorithm();
        let digest = self.signed_content_hash.as_ref();

        match (issuer, self.signature_algorithm.scheme()) {
            (PublicKey::Rsa(key), SignatureScheme::RsaPkcs1) => {
                verify_pkcs1(key, hash, digest, &self.signature, provider)
            }
            (PublicKey::Rsa(key), SignatureScheme::RsaPss) => provider
                .rsa
                .verify_pss(key, hash, digest, &self.signature),
            (PublicKey::Ec(key), SignatureScheme::Ecdsa) => {
                verify_ecdsa(key, digest, &self.signature, provider)
            }
            _ => {
                debug!(
                    "{} cannot be checked with this type of key",
                    self.signature_algorithm
                );
                false
            }
        }
    }
}

fn verify_pkcs1(
    key: &RsaPublicKey,
    hash: HashAlgorithm,
    digest: &[u8],
    signature: &[u8],
    provider: &CryptoProvider,
) -> bool {
    let Some(digest_info) = provider.rsa.public_decrypt(key, signature) else {
        return false;
    };

    match parse_digest_info(&digest_info) {
        Ok((alg, signed)) if alg == Some(hash) => signed.ct_eq(digest).into(),
        _ => false,
    }
}

/// `DigestInfo ::= SEQUENCE { digestAlgorithm AlgorithmIdentifier, digest OCTET STRING }`
fn parse_digest_info(der: &[u8]) -> Result<(Option<HashAlgorithm>, &[u8]), Error> {
    let mut rd = Reader::init(der);
    let mut info = rd.read_sequence()?;
    rd.expect_empty("digest info")?;

    let mut alg = info.read_sequence()?;
    let hash = HashAlgorithm::from_oid(alg.read_oid()?);
    if alg.any_left() {
        alg.read_null()?;
    }
    alg.expect_empty("digest algorithm")?;

    let digest = info.read_octet_string()?;
    info.expect_empty("digest info")?;
    Ok((hash, digest))
}

fn verify_ecdsa(
    key: &EcPublicKey,
    digest: &[u8],
    signature: &[u8],
    provider: &CryptoProvider,
) -> bool {
    let Some(curve) = key.curve.named() else {
        debug!("ECDSA verification needs a named curve");
        return false;
    };
    if key.point.is_infinity() {
        return false;
    }

    let Ok((r, s)) = parse_ecdsa_signature(signature) else {
        return false;
    };
    provider
        .ecdsa
        .verify(curve, &key.to_sec1_point(), digest, r, s)
}

/// `Ecdsa-Sig-Value ::= SEQUENCE { r INTEGER, s INTEGER }`
pub(super) fn parse_ecdsa_signature(der: &[u8]) -> Result<(&[u8], &[u8]), Error> {
    let mut rd = Reader::init(der);
    let mut seq = rd.read_sequence()?;
    rd.expect_empty("ECDSA signature")?;
    let r = seq.read_unsigned_bytes()?;
    let s = seq.read_unsigned_bytes()?;
    seq.expect_empty("ECDSA signature")?;
    Ok((r, s))
}

#[cfg(test)]
mod tests {
    use std::prelude::v1::*;

    use super::*;
    use crate::der::Writer;
    use crate::error::EncodingError;

    #[test]
    fn digest_info() {
        let mut w = Writer::new();
        w.write_sequence(|w| {
            w.write_sequence(|w| {
                w.write_oid(HashAlgorithm::Sha384.oid());
                w.write_null();
            });
            w.write_octet_string(&[0xaa; 48]);
        });
        let der = w.finish();
        let (alg, digest) = parse_digest_info(&der).unwrap();
        assert_eq!(alg, Some(HashAlgorithm::Sha384));
        assert_eq!(digest, &[0xaa; 48][..]);

        let mut long = der.clone();
        long.push(0);
        assert_eq!(
            parse_digest_info(&long),
            Err(Error::from(EncodingError::TrailingData("digest info")))
        );
    }

    #[test]
    fn ecdsa_signature() {
        let der = [0x30, 0x07, 0x02, 0x02, 0x00, 0x80, 0x02, 0x01, 0x05];
        assert_eq!(
            parse_ecdsa_signature(&der),
            Ok((&[0x80][..], &[0x05][..]))
        );

        // r is negative
        let der = [0x30, 0x06, 0x02, 0x01, 0x80, 0x02, 0x01, 0x05];
        assert!(parse_ecdsa_signature(&der).is_err());
    }
}
