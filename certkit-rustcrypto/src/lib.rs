//! A [`certkit`] crypto provider built on the pure-Rust RustCrypto crates.
//!
//! ```
//! let provider = certkit_rustcrypto::provider();
//! let der = include_bytes!("../../test-ca/rsa-2048/ca.der");
//! let cert = certkit::x509::Certificate::decode(der, &provider).unwrap();
//! assert!(cert.verify(&cert.public_key, &provider));
//! ```
//!
//! Supported: SHA-1 and SHA-2, HMAC over those, RSA PKCS#1 v1.5 and PSS,
//! ECDSA on P-256, P-384 and secp256k1, and 3DES and RC2 in CBC mode.
//! P-521 is recognised by certkit but not supported here.

#![no_std]
#![forbid(unsafe_code)]
#![warn(missing_docs, unreachable_pub)]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

use certkit::crypto::{CryptoProvider, GetRandomFailed, SecureRandom};

mod cipher;
mod ecdsa;
mod hash;
mod hmac;
mod rsa;

/// A provider with every algorithm this crate implements.
pub fn provider() -> CryptoProvider {
    CryptoProvider {
        hashes: hash::ALL,
        hmacs: hmac::ALL,
        rsa: &Provider,
        ecdsa: &Provider,
        block_cipher: &Provider,
        secure_random: &Provider,
    }
}

#[derive(Debug)]
struct Provider;

impl SecureRandom for Provider {
    fn fill(&self, bytes: &mut [u8]) -> Result<(), GetRandomFailed> {
        use rand_core::RngCore;
        rand_core::OsRng
            .try_fill_bytes(bytes)
            .map_err(|_| GetRandomFailed)
    }
}
