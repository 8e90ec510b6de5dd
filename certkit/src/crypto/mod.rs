use core::fmt::Debug;

use crate::error::Error;

pub use crate::rand::GetRandomFailed;

/// Block ciphers.
pub mod cipher;

/// Hash functions.
pub mod hash;

/// HMAC.
pub mod hmac;

mod signer;

#[cfg(test)]
pub(crate) mod test_provider;

pub use cipher::{BlockCipher, BlockCipherAlgorithm};
pub use hash::HashAlgorithm;
pub use signer::{EcdsaSigner, RsaSigner};

/// Controls core cryptography used by certkit.
///
/// certkit implements no cryptographic primitives.  Everything it needs is
/// reached through the fields of this struct, which are all `&'static`
/// references to trait objects: a provider is normally a `static` or is built
/// by a function like `certkit_rustcrypto::provider()`.
///
/// There is no process-wide default provider.  Every operation that needs
/// cryptography takes a `&CryptoProvider` argument.
///
/// # Writing a provider
///
/// Implement [`hash::Hash`], [`hmac::Hmac`], [`RsaSigner`], [`EcdsaSigner`],
/// [`BlockCipher`] and [`SecureRandom`] for types of your own, and fill in the
/// fields.  It is fine to leave out hash algorithms you do not need; operations
/// that need them fail with [`Error::UnsupportedAlgorithm`].
#[allow(clippy::exhaustive_structs)]
#[derive(Debug, Clone)]
pub struct CryptoProvider {
    /// Hash functions.  Certificates use SHA-224 through SHA-512; PKCS#12
    /// needs SHA-1.
    pub hashes: &'static [&'static dyn hash::Hash],

    /// HMAC over the same hash functions, for PKCS#12 integrity checks.
    pub hmacs: &'static [&'static dyn hmac::Hmac],

    /// RSA signature operations.
    pub rsa: &'static dyn RsaSigner,

    /// ECDSA signature and curve operations.
    pub ecdsa: &'static dyn EcdsaSigner,

    /// CBC-mode block ciphers for PKCS#12 password-based encryption.
    pub block_cipher: &'static dyn BlockCipher,

    /// Source of cryptographically secure random numbers, used for salts.
    pub secure_random: &'static dyn SecureRandom,
}

impl CryptoProvider {
    /// Find the hash function for `algorithm`.
    pub fn hash(&self, algorithm: HashAlgorithm) -> Result<&'static dyn hash::Hash, Error> {
        self.hashes
            .iter()
            .find(|h| h.algorithm() == algorithm)
            .copied()
            .ok_or_else(|| Error::UnsupportedAlgorithm(alloc::format!("{algorithm}")))
    }

    /// Find the HMAC implementation over `algorithm`.
    pub fn hmac(&self, algorithm: HashAlgorithm) -> Result<&'static dyn hmac::Hmac, Error> {
        self.hmacs
            .iter()
            .find(|h| h.hash_algorithm() == algorithm)
            .copied()
            .ok_or_else(|| Error::UnsupportedAlgorithm(alloc::format!("HMAC-{algorithm}")))
    }
}

/// A source of cryptographically secure randomness.
pub trait SecureRandom: Send + Sync + Debug {
    /// Fill the given buffer with random bytes.
    ///
    /// The bytes must be sourced from a cryptographically secure random number
    /// generator seeded with good quality, secret entropy.
    ///
    /// This is used for the salts in PKCS#12 bundles.
    fn fill(&self, buf: &mut [u8]) -> Result<(), GetRandomFailed>;
}
