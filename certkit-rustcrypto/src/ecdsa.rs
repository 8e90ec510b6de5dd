use alloc::vec::Vec;

use certkit::crypto::EcdsaSigner;
use certkit::key::ecc::NamedCurve;
use certkit::Error;

use super::Provider;

impl EcdsaSigner for Provider {
    fn verify(&self, curve: NamedCurve, point: &[u8], digest: &[u8], r: &[u8], s: &[u8]) -> bool {
        match curve {
            NamedCurve::Secp256r1 => nist_p256::verify(point, digest, r, s),
            NamedCurve::Secp384r1 => nist_p384::verify(point, digest, r, s),
            NamedCurve::Secp256k1 => secp256k1::verify(point, digest, r, s),
            NamedCurve::Secp521r1 => false,
        }
    }

    fn sign(
        &self,
        curve: NamedCurve,
        secret: &[u8],
        digest: &[u8],
    ) -> Result<(Vec<u8>, Vec<u8>), Error> {
        match curve {
            NamedCurve::Secp256r1 => nist_p256::sign(secret, digest),
            NamedCurve::Secp384r1 => nist_p384::sign(secret, digest),
            NamedCurve::Secp256k1 => secp256k1::sign(secret, digest),
            NamedCurve::Secp521r1 => Err(Error::UnsupportedCurve(curve.name().into())),
        }
    }

    fn public_point(&self, curve: NamedCurve, secret: &[u8]) -> Result<Vec<u8>, Error> {
        match curve {
            NamedCurve::Secp256r1 => nist_p256::public_point(secret),
            NamedCurve::Secp384r1 => nist_p384::public_point(secret),
            NamedCurve::Secp256k1 => secp256k1::public_point(secret),
            NamedCurve::Secp521r1 => Err(Error::UnsupportedCurve(curve.name().into())),
        }
    }
}

/// The same three operations for each curve crate.
macro_rules! curve_ops {
    ($name:ident, $krate:ident) => {
        mod $name {
            use alloc::vec::Vec;

            use certkit::Error;
            use signature::hazmat::{PrehashSigner, PrehashVerifier};
            use $krate::ecdsa::{Signature, SigningKey, VerifyingKey};
            use $krate::FieldBytes;

            pub(super) fn verify(point: &[u8], digest: &[u8], r: &[u8], s: &[u8]) -> bool {
                let (Some(r), Some(s)) = (field_bytes(r), field_bytes(s)) else {
                    return false;
                };
                let Ok(key) = VerifyingKey::from_sec1_bytes(point) else {
                    return false;
                };
                let Ok(signature) = Signature::from_scalars(r, s) else {
                    return false;
                };
                // both s and n - s are valid
                let signature = signature.normalize_s().unwrap_or(signature);
                key.verify_prehash(digest, &signature).is_ok()
            }

            pub(super) fn sign(secret: &[u8], digest: &[u8]) -> Result<(Vec<u8>, Vec<u8>), Error> {
                let key = SigningKey::from_slice(secret).map_err(|_| Error::SigningFailed)?;
                let signature: Signature = key
                    .sign_prehash(digest)
                    .map_err(|_| Error::SigningFailed)?;
                let signature = signature.normalize_s().unwrap_or(signature);
                let (r, s) = signature.split_bytes();
                Ok((r.to_vec(), s.to_vec()))
            }

            pub(super) fn public_point(secret: &[u8]) -> Result<Vec<u8>, Error> {
                let key = SigningKey::from_slice(secret).map_err(|_| Error::SigningFailed)?;
                Ok(key
                    .verifying_key()
                    .to_encoded_point(false)
                    .as_bytes()
                    .to_vec())
            }

            /// Left-pad a big-endian scalar to the field length.
            fn field_bytes(scalar: &[u8]) -> Option<FieldBytes> {
                let mut out = FieldBytes::default();
                let start = out.len().checked_sub(scalar.len())?;
                out[start..].copy_from_slice(scalar);
                Some(out)
            }
        }
    };
}

curve_ops!(nist_p256, p256);
curve_ops!(nist_p384, p384);
curve_ops!(secp256k1, k256);
