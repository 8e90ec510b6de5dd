use alloc::vec;
use alloc::vec::Vec;

use ::rsa::traits::PublicKeyParts;
use ::rsa::{BigUint, Pkcs1v15Sign, Pss};
use certkit::crypto::{HashAlgorithm, RsaSigner};
use certkit::key::rsa::{RsaPrivateKey, RsaPublicKey};
use certkit::Error;

use super::Provider;

impl RsaSigner for Provider {
    fn public_decrypt(&self, key: &RsaPublicKey, signature: &[u8]) -> Option<Vec<u8>> {
        let key = public_key(key)?;
        let k = key.size();
        if signature.len() != k {
            return None;
        }

        let s = BigUint::from_bytes_be(signature);
        if &s >= key.n() {
            return None;
        }
        let m = ::rsa::hazmat::rsa_encrypt(&key, &s).ok()?;

        let m = m.to_bytes_be();
        let mut em = vec![0u8; k.checked_sub(m.len())?];
        em.extend_from_slice(&m);
        strip_pkcs1_type1(&em).map(<[u8]>::to_vec)
    }

    fn verify_pss(
        &self,
        key: &RsaPublicKey,
        hash: HashAlgorithm,
        digest: &[u8],
        signature: &[u8],
    ) -> bool {
        let (Some(key), Some(scheme)) = (public_key(key), pss(hash)) else {
            return false;
        };
        key.verify(scheme, digest, signature).is_ok()
    }

    fn sign_pkcs1(
        &self,
        key: &RsaPrivateKey,
        hash: HashAlgorithm,
        digest: &[u8],
    ) -> Result<Vec<u8>, Error> {
        let scheme = match hash {
            HashAlgorithm::Sha1 => Pkcs1v15Sign::new::<sha1::Sha1>(),
            HashAlgorithm::Sha224 => Pkcs1v15Sign::new::<sha2::Sha224>(),
            HashAlgorithm::Sha256 => Pkcs1v15Sign::new::<sha2::Sha256>(),
            HashAlgorithm::Sha384 => Pkcs1v15Sign::new::<sha2::Sha384>(),
            HashAlgorithm::Sha512 => Pkcs1v15Sign::new::<sha2::Sha512>(),
            _ => return Err(Error::UnsupportedAlgorithm(alloc::format!("{hash}"))),
        };
        private_key(key)?
            .sign(scheme, digest)
            .map_err(|_| Error::SigningFailed)
    }

    fn sign_pss(
        &self,
        key: &RsaPrivateKey,
        hash: HashAlgorithm,
        digest: &[u8],
    ) -> Result<Vec<u8>, Error> {
        let scheme = pss(hash).ok_or_else(|| Error::UnsupportedAlgorithm(alloc::format!("{hash}")))?;
        private_key(key)?
            .sign_with_rng(&mut rand_core::OsRng, scheme, digest)
            .map_err(|_| Error::SigningFailed)
    }
}

/// PSS with MGF1 over the same hash and a salt as long as the digest.
fn pss(hash: HashAlgorithm) -> Option<Pss> {
    Some(match hash {
        HashAlgorithm::Sha256 => Pss::new_with_salt::<sha2::Sha256>(32),
        HashAlgorithm::Sha384 => Pss::new_with_salt::<sha2::Sha384>(48),
        HashAlgorithm::Sha512 => Pss::new_with_salt::<sha2::Sha512>(64),
        _ => return None,
    })
}

fn public_key(key: &RsaPublicKey) -> Option<::rsa::RsaPublicKey> {
    ::rsa::RsaPublicKey::new(
        BigUint::from_bytes_be(&key.modulus.to_bytes_be()),
        BigUint::from_bytes_be(&key.public_exponent.to_bytes_be()),
    )
    .ok()
}

fn private_key(key: &RsaPrivateKey) -> Result<::rsa::RsaPrivateKey, Error> {
    let convert = |n: &certkit::num_bigint::BigUint| BigUint::from_bytes_be(&n.to_bytes_be());
    let primes = match &key.crt {
        Some(crt) => vec![convert(&crt.prime1), convert(&crt.prime2)],
        None => Vec::new(),
    };
    ::rsa::RsaPrivateKey::from_components(
        convert(&key.modulus),
        convert(&key.public_exponent),
        convert(&key.private_exponent),
        primes,
    )
    .map_err(|_| Error::SigningFailed)
}

/// `00 01 ff .. ff 00 T`, with at least eight `ff` octets.  Returns `T`.
fn strip_pkcs1_type1(em: &[u8]) -> Option<&[u8]> {
    let [0x00, 0x01, rest @ ..] = em else {
        return None;
    };
    let padding = rest.iter().position(|&b| b != 0xff)?;
    match (padding >= 8, rest[padding]) {
        (true, 0x00) => Some(&rest[padding + 1..]),
        _ => None,
    }
}
