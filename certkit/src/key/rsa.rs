//! RSA keys and their PKCS#1 encodings.

use core::fmt;

use num_bigint::BigUint;
use pki_types::PrivatePkcs1KeyDer;

use crate::der::{Reader, Writer};
use crate::error::{EncodingError, Error};

/// An RSA public key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RsaPublicKey {
    /// The modulus `n`
    pub modulus: BigUint,
    /// The public exponent `e`
    pub public_exponent: BigUint,
}

impl RsaPublicKey {
    /// Decode a PKCS#1 `RSAPublicKey`.
    pub fn from_pkcs1_der(der: &[u8]) -> Result<Self, Error> {
        let mut rd = Reader::init(der);
        let key = Self::read(&mut rd)?;
        rd.expect_empty("RSA public key")?;
        Ok(key)
    }

    /// Encode as a PKCS#1 `RSAPublicKey`.
    pub fn to_pkcs1_der(&self) -> alloc::vec::Vec<u8> {
        let mut w = Writer::new();
        self.write(&mut w);
        w.finish()
    }

    /// The length of the modulus in bytes, which is also the signature length.
    pub fn modulus_len(&self) -> usize {
        (self.modulus.bits() as usize).div_ceil(8)
    }

    pub(crate) fn read(rd: &mut Reader<'_>) -> Result<Self, Error> {
        let mut seq = rd.read_sequence()?;
        let modulus = seq.read_unsigned()?;
        let public_exponent = seq.read_unsigned()?;
        seq.expect_empty("RSA public key")?;
        Ok(Self {
            modulus,
            public_exponent,
        })
    }

    pub(crate) fn write(&self, w: &mut Writer) {
        w.write_sequence(|w| {
            w.write_unsigned(&self.modulus);
            w.write_unsigned(&self.public_exponent);
        });
    }
}

/// An RSA private key.
///
/// The CRT values are carried when the encoding has them, but nothing checks
/// that they are consistent with the modulus and exponents.
#[derive(Clone, PartialEq, Eq)]
pub struct RsaPrivateKey {
    /// The modulus `n`
    pub modulus: BigUint,
    /// The public exponent `e`
    pub public_exponent: BigUint,
    /// The private exponent `d`
    pub private_exponent: BigUint,
    /// The Chinese-remainder-theorem values, if known
    pub crt: Option<RsaCrtParams>,
}

/// Chinese-remainder-theorem values for an RSA private key.
#[derive(Clone, PartialEq, Eq)]
pub struct RsaCrtParams {
    /// `p`
    pub prime1: BigUint,
    /// `q`
    pub prime2: BigUint,
    /// `d mod (p-1)`
    pub exponent1: BigUint,
    /// `d mod (q-1)`
    pub exponent2: BigUint,
    /// `q^-1 mod p`
    pub coefficient: BigUint,
}

impl RsaPrivateKey {
    /// Decode a PKCS#1 `RSAPrivateKey`, as found in `RSA PRIVATE KEY` PEM files.
    pub fn from_pkcs1_der(der: &[u8]) -> Result<Self, Error> {
        let mut rd = Reader::init(der);
        let key = Self::read(&mut rd)?;
        rd.expect_empty("RSA private key")?;
        Ok(key)
    }

    /// Encode as a PKCS#1 `RSAPrivateKey`.
    ///
    /// A key without CRT values is written with zeros in their place.
    pub fn to_pkcs1_der(&self) -> PrivatePkcs1KeyDer<'static> {
        let mut w = Writer::new();
        self.write(&mut w);
        PrivatePkcs1KeyDer::from(w.finish())
    }

    /// The matching public key.
    pub fn public_key(&self) -> RsaPublicKey {
        RsaPublicKey {
            modulus: self.modulus.clone(),
            public_exponent: self.public_exponent.clone(),
        }
    }

    pub(crate) fn read(rd: &mut Reader<'_>) -> Result<Self, Error> {
        let mut seq = rd.read_sequence()?;
        match seq.read_small_integer()? {
            0 => {}
            1 => return Err(Error::UnsupportedAlgorithm("multi-prime RSA".into())),
            _ => return Err(EncodingError::UnsupportedVersion("RSA private key").into()),
        }

        let modulus = seq.read_unsigned()?;
        let public_exponent = seq.read_unsigned()?;
        let private_exponent = seq.read_unsigned()?;
        let crt = RsaCrtParams {
            prime1: seq.read_unsigned()?,
            prime2: seq.read_unsigned()?,
            exponent1: seq.read_unsigned()?,
            exponent2: seq.read_unsigned()?,
            coefficient: seq.read_unsigned()?,
        };
        seq.expect_empty("RSA private key")?;

        Ok(Self {
            modulus,
            public_exponent,
            private_exponent,
            crt: (!crt.is_empty()).then_some(crt),
        })
    }

    pub(crate) fn write(&self, w: &mut Writer) {
        let zero = BigUint::default();
        w.write_sequence(|w| {
            w.write_small_integer(0);
            w.write_unsigned(&self.modulus);
            w.write_unsigned(&self.public_exponent);
            w.write_unsigned(&self.private_exponent);
            match &self.crt {
                Some(crt) => {
                    for v in [
                        &crt.prime1,
                        &crt.prime2,
                        &crt.exponent1,
                        &crt.exponent2,
                        &crt.coefficient,
                    ] {
                        w.write_unsigned(v);
                    }
                }
                None => {
                    for _ in 0..5 {
                        w.write_unsigned(&zero);
                    }
                }
            }
        });
    }
}

impl RsaCrtParams {
    fn is_empty(&self) -> bool {
        [
            &self.prime1,
            &self.prime2,
            &self.exponent1,
            &self.exponent2,
            &self.coefficient,
        ]
        .iter()
        .all(|v| v.bits() == 0)
    }
}

impl fmt::Debug for RsaPrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RsaPrivateKey")
            .field("modulus_bits", &self.modulus.bits())
            .field("public_exponent", &self.public_exponent)
            .field("has_crt", &self.crt.is_some())
            .finish_non_exhaustive()
    }
}

impl fmt::Debug for RsaCrtParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RsaCrtParams")
            .finish_non_exhaustive()
    }
}
