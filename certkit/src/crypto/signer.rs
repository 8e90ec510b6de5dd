use alloc::vec::Vec;
use core::fmt::Debug;

use super::hash::HashAlgorithm;
use crate::error::Error;
use crate::key::ecc::NamedCurve;
use crate::key::rsa::{RsaPrivateKey, RsaPublicKey};

/// RSA operations.
///
/// certkit parses and checks the `DigestInfo` of PKCS#1 v1.5 signatures itself,
/// so only the raw public-key operation is needed for those.
pub trait RsaSigner: Send + Sync + Debug {
    /// Apply the public key to `signature` and strip EMSA-PKCS1-v1_5 (block type 1)
    /// padding, returning what was signed: normally a DER `DigestInfo`.
    ///
    /// Returns `None` if the signature is out of range or the padding is wrong.
    fn public_decrypt(&self, key: &RsaPublicKey, signature: &[u8]) -> Option<Vec<u8>>;

    /// Verify an RSASSA-PSS signature over `digest`, using MGF1 with the same hash
    /// and a salt as long as the digest.
    fn verify_pss(
        &self,
        key: &RsaPublicKey,
        hash: HashAlgorithm,
        digest: &[u8],
        signature: &[u8],
    ) -> bool;

    /// Make an RSASSA-PKCS1-v1_5 signature over `digest`.
    fn sign_pkcs1(
        &self,
        key: &RsaPrivateKey,
        hash: HashAlgorithm,
        digest: &[u8],
    ) -> Result<Vec<u8>, Error>;

    /// Make an RSASSA-PSS signature over `digest`, with the parameters described
    /// for [`RsaSigner::verify_pss`].
    fn sign_pss(
        &self,
        key: &RsaPrivateKey,
        hash: HashAlgorithm,
        digest: &[u8],
    ) -> Result<Vec<u8>, Error>;
}

/// ECDSA and curve operations.
///
/// Points are passed in uncompressed SEC1 form (`04 || x || y`), and scalars as
/// big-endian unsigned integers.  Scalars may be shorter than the field length.
pub trait EcdsaSigner: Send + Sync + Debug {
    /// Verify the ECDSA signature `(r, s)` over a pre-computed `digest`.
    ///
    /// Returns `false` for unsupported curves and invalid points too.
    fn verify(&self, curve: NamedCurve, point: &[u8], digest: &[u8], r: &[u8], s: &[u8]) -> bool;

    /// Sign a pre-computed `digest` with `secret`, returning `(r, s)`.
    fn sign(
        &self,
        curve: NamedCurve,
        secret: &[u8],
        digest: &[u8],
    ) -> Result<(Vec<u8>, Vec<u8>), Error>;

    /// Compute the public point `secret·G`.
    fn public_point(&self, curve: NamedCurve, secret: &[u8]) -> Result<Vec<u8>, Error>;
}
