use pki_types::SubjectPublicKeyInfoDer;

use crate::der::{Reader, Writer};
use crate::error::Error;
use crate::oid;

/// Elliptic curves and EC keys.
pub mod ecc;

/// RSA keys.
pub mod rsa;

use ecc::{EcPoint, EcPrivateKey, EcPublicKey, EllipticCurve};
use rsa::{RsaPrivateKey, RsaPublicKey};

/// A public key of one of the supported types.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PublicKey {
    /// An RSA key
    Rsa(RsaPublicKey),
    /// An elliptic-curve key
    Ec(EcPublicKey),
}

impl PublicKey {
    /// Decode a `SubjectPublicKeyInfo`.
    pub fn from_spki_der(der: &[u8]) -> Result<Self, Error> {
        let mut rd = Reader::init(der);
        let key = Self::read_spki(&mut rd)?;
        rd.expect_empty("public key info")?;
        Ok(key)
    }

    /// Encode as a `SubjectPublicKeyInfo`.
    pub fn to_spki_der(&self) -> SubjectPublicKeyInfoDer<'static> {
        let mut w = Writer::new();
        self.write_spki(&mut w);
        SubjectPublicKeyInfoDer::from(w.finish())
    }

    pub(crate) fn read_spki(rd: &mut Reader<'_>) -> Result<Self, Error> {
        let mut spki = rd.read_sequence()?;
        let mut alg = spki.read_sequence()?;
        let alg_oid = alg.read_oid()?;

        let key = match alg_oid {
            oid::RSA_ENCRYPTION => {
                if alg.any_left() {
                    alg.read_null()?;
                }
                let bits = spki.read_bit_string_bytes()?;
                Self::Rsa(RsaPublicKey::from_pkcs1_der(bits)?)
            }
            oid::EC_PUBLIC_KEY => {
                let curve = EllipticCurve::read(&mut alg)?;
                let point = EcPoint::from_sec1(spki.read_bit_string_bytes()?)?;
                Self::Ec(EcPublicKey { curve, point })
            }
            other => return Err(Error::UnsupportedAlgorithm(oid::to_dotted(other))),
        };

        alg.expect_empty("algorithm identifier")?;
        spki.expect_empty("public key info")?;
        Ok(key)
    }

    pub(crate) fn write_spki(&self, w: &mut Writer) {
        w.write_sequence(|w| match self {
            Self::Rsa(key) => {
                w.write_sequence(|w| {
                    w.write_oid(oid::RSA_ENCRYPTION);
                    w.write_null();
                });
                w.write_bit_string(&key.to_pkcs1_der());
            }
            Self::Ec(key) => {
                w.write_sequence(|w| {
                    w.write_oid(oid::EC_PUBLIC_KEY);
                    key.curve.write(w);
                });
                w.write_bit_string(&key.to_sec1_point());
            }
        });
    }
}

/// A private key of one of the supported types.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PrivateKey {
    /// An RSA key
    Rsa(RsaPrivateKey),
    /// An elliptic-curve key
    Ec(EcPrivateKey),
}

impl PrivateKey {
    /// The matching public key.
    pub fn public_key(&self) -> PublicKey {
        match self {
            Self::Rsa(key) => PublicKey::Rsa(key.public_key()),
            Self::Ec(key) => PublicKey::Ec(key.public_key()),
        }
    }
}

impl From<RsaPrivateKey> for PrivateKey {
    fn from(key: RsaPrivateKey) -> Self {
        Self::Rsa(key)
    }
}

impl From<EcPrivateKey> for PrivateKey {
    fn from(key: EcPrivateKey) -> Self {
        Self::Ec(key)
    }
}

#[cfg(test)]
mod tests {
    use std::prelude::v1::*;

    use num_bigint::BigUint;

    use super::ecc::NamedCurve;
    use super::*;
    use crate::error::EncodingError;

    #[test]
    fn rsa_spki_round_trip() {
        let key = PublicKey::Rsa(RsaPublicKey {
            modulus: BigUint::from(3233u32),
            public_exponent: BigUint::from(17u32),
        });
        let der = key.to_spki_der();
        assert_eq!(PublicKey::from_spki_der(&der).unwrap(), key);
    }

    #[test]
    fn ec_spki_round_trip() {
        let key = PublicKey::Ec(EcPublicKey {
            curve: EllipticCurve::Named(NamedCurve::Secp384r1),
            point: NamedCurve::Secp384r1.parameters().generator,
        });
        let der = key.to_spki_der();
        assert_eq!(der[der.len() - 97], 0x04);
        assert_eq!(PublicKey::from_spki_der(&der).unwrap(), key);
    }

    #[test]
    fn unsupported_key_type() {
        let mut w = Writer::new();
        w.write_sequence(|w| {
            w.write_sequence(|w| {
                // id-Ed25519
                w.write_oid(&[0x2b, 0x65, 0x70]);
            });
            w.write_bit_string(&[0; 32]);
        });
        assert_eq!(
            PublicKey::from_spki_der(&w.finish()),
            Err(Error::UnsupportedAlgorithm("1.3.101.112".into()))
        );
    }

    #[test]
    fn trailing_data_after_spki() {
        let key = PublicKey::Rsa(RsaPublicKey {
            modulus: BigUint::from(3233u32),
            public_exponent: BigUint::from(17u32),
        });
        let mut der = key.to_spki_der().as_ref().to_vec();
        der.push(0);
        assert_eq!(
            PublicKey::from_spki_der(&der),
            Err(Error::from(EncodingError::TrailingData("public key info")))
        );
    }
}
