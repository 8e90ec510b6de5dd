use alloc::boxed::Box;
use alloc::vec;
use alloc::vec::Vec;

use zeroize::Zeroizing;

use super::cipher::{BlockCipher, BlockCipherAlgorithm};
use super::hash::{self, Context as _, Hash as _, HashAlgorithm};
use super::{hmac, CryptoProvider, EcdsaSigner, GetRandomFailed, RsaSigner, SecureRandom};
use crate::der::Writer;
use crate::error::Error;
use crate::key::ecc::NamedCurve;
use crate::key::rsa::{RsaPrivateKey, RsaPublicKey};

/// This is a `CryptoProvider` that provides NO SECURITY and is for testing only.
///
/// Its hash is a rotate-and-xor fold, its "RSA" and "ECDSA" signatures are the
/// digest in a thin wrapper and its block cipher is an xor.  They round-trip
/// and they notice changed input, which is all the unit tests need.
pub(crate) static TEST_PROVIDER: CryptoProvider = CryptoProvider {
    hashes: &[
        &Hash(HashAlgorithm::Sha1),
        &Hash(HashAlgorithm::Sha224),
        &Hash(HashAlgorithm::Sha256),
        &Hash(HashAlgorithm::Sha384),
        &Hash(HashAlgorithm::Sha512),
    ],
    hmacs: &[&Hmac(HashAlgorithm::Sha1), &Hmac(HashAlgorithm::Sha256)],
    rsa: &Provider,
    ecdsa: &Provider,
    block_cipher: &Provider,
    secure_random: &Provider,
};

#[derive(Debug)]
struct Hash(HashAlgorithm);

impl hash::Hash for Hash {
    fn start(&self) -> Box<dyn hash::Context> {
        Box::new(HashContext {
            len: self.0.output_len(),
            state: [0x5a; hash::Output::MAX_LEN],
            count: 0,
        })
    }

    fn hash(&self, data: &[u8]) -> hash::Output {
        let mut ctx = self.start();
        ctx.update(data);
        ctx.finish()
    }

    fn algorithm(&self) -> HashAlgorithm {
        self.0
    }
}

struct HashContext {
    len: usize,
    state: [u8; hash::Output::MAX_LEN],
    count: usize,
}

impl hash::Context for HashContext {
    fn update(&mut self, data: &[u8]) {
        for &b in data {
            let i = self.count % self.len;
            self.state[i] = self.state[i].rotate_left(1) ^ b;
            self.count += 1;
        }
    }

    fn finish(self: Box<Self>) -> hash::Output {
        hash::Output::new(&self.state[..self.len])
    }
}

#[derive(Debug)]
struct Hmac(HashAlgorithm);

impl hmac::Hmac for Hmac {
    fn open_key(&self, key: &[u8]) -> Box<dyn hmac::Key> {
        Box::new(HmacKey {
            hash: Hash(self.0),
            key: key.to_vec(),
        })
    }

    fn hash_algorithm(&self) -> HashAlgorithm {
        self.0
    }
}

struct HmacKey {
    hash: Hash,
    key: Vec<u8>,
}

impl hmac::Key for HmacKey {
    fn sign(&self, data: &[&[u8]]) -> hmac::Tag {
        let mut ctx = self.hash.start();
        ctx.update(&self.key);
        for d in data {
            ctx.update(d);
        }
        ctx.finish()
    }
}

#[derive(Debug)]
struct Provider;

impl SecureRandom for Provider {
    fn fill(&self, bytes: &mut [u8]) -> Result<(), GetRandomFailed> {
        for (out, value) in bytes.iter_mut().zip(RAND.iter().cycle()) {
            *out = *value;
        }
        Ok(())
    }
}

const RAND: &[u8] = b"Rand";

/// A "signature" is the DigestInfo itself, so the public operation is the identity.
impl RsaSigner for Provider {
    fn public_decrypt(&self, _key: &RsaPublicKey, signature: &[u8]) -> Option<Vec<u8>> {
        Some(signature.to_vec())
    }

    fn verify_pss(
        &self,
        _key: &RsaPublicKey,
        _hash: HashAlgorithm,
        digest: &[u8],
        signature: &[u8],
    ) -> bool {
        digest == signature
    }

    fn sign_pkcs1(
        &self,
        _key: &RsaPrivateKey,
        hash: HashAlgorithm,
        digest: &[u8],
    ) -> Result<Vec<u8>, Error> {
        let mut w = Writer::new();
        w.write_sequence(|w| {
            w.write_sequence(|w| {
                w.write_oid(hash.oid());
                w.write_null();
            });
            w.write_octet_string(digest);
        });
        Ok(w.finish())
    }

    fn sign_pss(
        &self,
        _key: &RsaPrivateKey,
        _hash: HashAlgorithm,
        digest: &[u8],
    ) -> Result<Vec<u8>, Error> {
        Ok(digest.to_vec())
    }
}

/// `r` is the digest behind a 0x01 octet, so it never loses leading zeros.
impl EcdsaSigner for Provider {
    fn verify(&self, _curve: NamedCurve, _point: &[u8], digest: &[u8], r: &[u8], s: &[u8]) -> bool {
        r.split_first() == Some((&1, digest)) && s == [1]
    }

    fn sign(
        &self,
        _curve: NamedCurve,
        _secret: &[u8],
        digest: &[u8],
    ) -> Result<(Vec<u8>, Vec<u8>), Error> {
        let mut r = vec![1];
        r.extend_from_slice(digest);
        Ok((r, vec![1]))
    }

    fn public_point(&self, curve: NamedCurve, secret: &[u8]) -> Result<Vec<u8>, Error> {
        let mut point = vec![0x04];
        point.extend_from_slice(secret);
        point.extend_from_slice(secret);
        match point.len() == 1 + 2 * curve.field_len() {
            true => Ok(point),
            false => Err(Error::UnsupportedCurve(curve.name().into())),
        }
    }
}

/// xor with the key and IV, under real PKCS#7 padding.  The key and IV are
/// appended in the clear so that a wrong key is always noticed.
impl BlockCipher for Provider {
    fn decrypt_cbc(
        &self,
        algorithm: BlockCipherAlgorithm,
        key: &[u8],
        iv: &[u8],
        ciphertext: &[u8],
    ) -> Result<Zeroizing<Vec<u8>>, Error> {
        let block = algorithm.block_len();
        let check = key_check(key, iv, block);
        if ciphertext.len() % block != 0 || ciphertext.len() <= check.len() {
            return Err(Error::DecryptionFailed);
        }

        let (body, tail) = ciphertext.split_at(ciphertext.len() - check.len());
        if tail != check {
            return Err(Error::DecryptionFailed);
        }

        let mut plain = Zeroizing::new(mask(key, iv, body));
        let pad = usize::from(*plain.last().ok_or(Error::DecryptionFailed)?);
        if pad == 0
            || pad > block
            || !plain[plain.len() - pad..]
                .iter()
                .all(|&b| usize::from(b) == pad)
        {
            return Err(Error::DecryptionFailed);
        }
        let len = plain.len() - pad;
        plain.truncate(len);
        Ok(plain)
    }

    fn encrypt_cbc(
        &self,
        algorithm: BlockCipherAlgorithm,
        key: &[u8],
        iv: &[u8],
        plaintext: &[u8],
    ) -> Result<Vec<u8>, Error> {
        let block = algorithm.block_len();
        let pad = block - plaintext.len() % block;
        let mut padded = plaintext.to_vec();
        padded.resize(plaintext.len() + pad, pad as u8);

        let mut out = mask(key, iv, &padded);
        out.extend_from_slice(&key_check(key, iv, block));
        Ok(out)
    }
}

fn mask(key: &[u8], iv: &[u8], data: &[u8]) -> Vec<u8> {
    data.iter()
        .zip(key.iter().cycle())
        .zip(iv.iter().cycle())
        .map(|((d, k), i)| d ^ k ^ i)
        .collect()
}

fn key_check(key: &[u8], iv: &[u8], block: usize) -> Vec<u8> {
    let mut check = key.to_vec();
    check.extend_from_slice(iv);
    check.resize(check.len().div_ceil(block) * block, 0);
    check
}
