use core::fmt;

use crate::crypto::HashAlgorithm;
use crate::der::{Reader, Writer};
use crate::error::{EncodingError, Error};
use crate::log::trace;
use crate::oid;

/// The certificate signature algorithms certkit understands.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SignatureAlgorithm {
    /// `sha224WithRSAEncryption`
    RsaPkcs1Sha224,
    /// `sha256WithRSAEncryption`
    RsaPkcs1Sha256,
    /// `sha384WithRSAEncryption`
    RsaPkcs1Sha384,
    /// `sha512WithRSAEncryption`
    RsaPkcs1Sha512,
    /// `id-RSASSA-PSS` with SHA-256, MGF1-SHA-256 and a 32-byte salt
    RsaPssSha256,
    /// `id-RSASSA-PSS` with SHA-384, MGF1-SHA-384 and a 48-byte salt
    RsaPssSha384,
    /// `id-RSASSA-PSS` with SHA-512, MGF1-SHA-512 and a 64-byte salt
    RsaPssSha512,
    /// `ecdsa-with-SHA224`
    EcdsaSha224,
    /// `ecdsa-with-SHA256`
    EcdsaSha256,
    /// `ecdsa-with-SHA384`
    EcdsaSha384,
    /// `ecdsa-with-SHA512`
    EcdsaSha512,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum SignatureScheme {
    RsaPkcs1,
    RsaPss,
    Ecdsa,
}

impl SignatureAlgorithm {
    /// Every supported algorithm.
    pub const ALL: [Self; 11] = [
        Self::RsaPkcs1Sha224,
        Self::RsaPkcs1Sha256,
        Self::RsaPkcs1Sha384,
        Self::RsaPkcs1Sha512,
        Self::RsaPssSha256,
        Self::RsaPssSha384,
        Self::RsaPssSha512,
        Self::EcdsaSha224,
        Self::EcdsaSha256,
        Self::EcdsaSha384,
        Self::EcdsaSha512,
    ];

    /// The digest computed over the signed data.
    pub fn hash_algorithm(self) -> HashAlgorithm {
        match self {
            Self::RsaPkcs1Sha224 | Self::EcdsaSha224 => HashAlgorithm::Sha224,
            Self::RsaPkcs1Sha256 | Self::RsaPssSha256 | Self::EcdsaSha256 => HashAlgorithm::Sha256,
            Self::RsaPkcs1Sha384 | Self::RsaPssSha384 | Self::EcdsaSha384 => HashAlgorithm::Sha384,
            Self::RsaPkcs1Sha512 | Self::RsaPssSha512 | Self::EcdsaSha512 => HashAlgorithm::Sha512,
        }
    }

    pub(crate) fn scheme(self) -> SignatureScheme {
        match self {
            Self::RsaPkcs1Sha224
            | Self::RsaPkcs1Sha256
            | Self::RsaPkcs1Sha384
            | Self::RsaPkcs1Sha512 => SignatureScheme::RsaPkcs1,
            Self::RsaPssSha256 | Self::RsaPssSha384 | Self::RsaPssSha512 => SignatureScheme::RsaPss,
            Self::EcdsaSha224 | Self::EcdsaSha256 | Self::EcdsaSha384 | Self::EcdsaSha512 => {
                SignatureScheme::Ecdsa
            }
        }
    }

    fn oid(self) -> &'static [u8] {
        match self {
            Self::RsaPkcs1Sha224 => oid::SHA224_WITH_RSA_ENCRYPTION,
            Self::RsaPkcs1Sha256 => oid::SHA256_WITH_RSA_ENCRYPTION,
            Self::RsaPkcs1Sha384 => oid::SHA384_WITH_RSA_ENCRYPTION,
            Self::RsaPkcs1Sha512 => oid::SHA512_WITH_RSA_ENCRYPTION,
            Self::RsaPssSha256 | Self::RsaPssSha384 | Self::RsaPssSha512 => oid::RSASSA_PSS,
            Self::EcdsaSha224 => oid::ECDSA_WITH_SHA224,
            Self::EcdsaSha256 => oid::ECDSA_WITH_SHA256,
            Self::EcdsaSha384 => oid::ECDSA_WITH_SHA384,
            Self::EcdsaSha512 => oid::ECDSA_WITH_SHA512,
        }
    }

    /// Read an `AlgorithmIdentifier` naming a signature algorithm.
    pub(crate) fn read(rd: &mut Reader<'_>) -> Result<Self, Error> {
        let mut alg = rd.read_sequence()?;
        let alg_oid = alg.read_oid()?;

        let algorithm = match alg_oid {
            oid::SHA224_WITH_RSA_ENCRYPTION => Self::RsaPkcs1Sha224,
            oid::SHA256_WITH_RSA_ENCRYPTION => Self::RsaPkcs1Sha256,
            oid::SHA384_WITH_RSA_ENCRYPTION => Self::RsaPkcs1Sha384,
            oid::SHA512_WITH_RSA_ENCRYPTION => Self::RsaPkcs1Sha512,
            oid::ECDSA_WITH_SHA224 => Self::EcdsaSha224,
            oid::ECDSA_WITH_SHA256 => Self::EcdsaSha256,
            oid::ECDSA_WITH_SHA384 => Self::EcdsaSha384,
            oid::ECDSA_WITH_SHA512 => Self::EcdsaSha512,
            oid::RSASSA_PSS => {
                let params = alg.read_sequence()?;
                alg.expect_empty("signature algorithm")?;
                return read_pss_params(params);
            }
            other => {
                trace!("unrecognized signature algorithm {}", oid::to_dotted(other));
                return Err(EncodingError::UnrecognizedSignatureAlgorithm.into());
            }
        };

        // PKCS#1 identifiers carry NULL parameters, ECDSA ones none at all.
        // Both forms are met in practice for either family.
        if alg.any_left() {
            alg.read_null()?;
        }
        alg.expect_empty("signature algorithm")?;
        Ok(algorithm)
    }

    /// Write this algorithm as an `AlgorithmIdentifier`.
    pub(crate) fn write(self, w: &mut Writer) {
        w.write_sequence(|w| {
            w.write_oid(self.oid());
            match self.scheme() {
                SignatureScheme::RsaPkcs1 => w.write_null(),
                SignatureScheme::RsaPss => write_pss_params(w, self.hash_algorithm()),
                SignatureScheme::Ecdsa => {}
            }
        });
    }
}

impl fmt::Display for SignatureAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::RsaPkcs1Sha224 => "sha224WithRSAEncryption",
            Self::RsaPkcs1Sha256 => "sha256WithRSAEncryption",
            Self::RsaPkcs1Sha384 => "sha384WithRSAEncryption",
            Self::RsaPkcs1Sha512 => "sha512WithRSAEncryption",
            Self::RsaPssSha256 => "rsassaPss-SHA256",
            Self::RsaPssSha384 => "rsassaPss-SHA384",
            Self::RsaPssSha512 => "rsassaPss-SHA512",
            Self::EcdsaSha224 => "ecdsa-with-SHA224",
            Self::EcdsaSha256 => "ecdsa-with-SHA256",
            Self::EcdsaSha384 => "ecdsa-with-SHA384",
            Self::EcdsaSha512 => "ecdsa-with-SHA512",
        })
    }
}

/// Only the parameter sets that tie the message digest, the MGF1 digest and the
/// salt length together are accepted.  The defaults (SHA-1 throughout) are not.
fn read_pss_params(mut params: Reader<'_>) -> Result<SignatureAlgorithm, Error> {
    let unrecognized = || Error::from(EncodingError::UnrecognizedSignatureAlgorithm);

    let hash = match params.read_optional_context(0)? {
        Some(mut hash) => {
            let alg = read_hash_identifier(&mut hash)?;
            hash.expect_empty("hash algorithm")?;
            alg
        }
        None => return Err(unrecognized()),
    };

    let mgf_hash = match params.read_optional_context(1)? {
        Some(mut mgf) => {
            let mut mgf_alg = mgf.read_sequence()?;
            if mgf_alg.read_oid()? != oid::MGF1 {
                return Err(unrecognized());
            }
            let alg = read_hash_identifier(&mut mgf_alg)?;
            mgf_alg.expect_empty("mask generation function")?;
            mgf.expect_empty("mask generation function")?;
            alg
        }
        None => return Err(unrecognized()),
    };

    let salt_len = match params.read_optional_context(2)? {
        Some(mut salt) => {
            let len = salt.read_small_integer()?;
            salt.expect_empty("salt length")?;
            len
        }
        None => 20,
    };

    if let Some(mut trailer) = params.read_optional_context(3)? {
        if trailer.read_small_integer()? != 1 {
            return Err(unrecognized());
        }
        trailer.expect_empty("trailer field")?;
    }
    params.expect_empty("RSASSA-PSS parameters")?;

    let algorithm = match hash {
        HashAlgorithm::Sha256 => SignatureAlgorithm::RsaPssSha256,
        HashAlgorithm::Sha384 => SignatureAlgorithm::RsaPssSha384,
        HashAlgorithm::Sha512 => SignatureAlgorithm::RsaPssSha512,
        _ => return Err(unrecognized()),
    };

    match mgf_hash == hash && salt_len == hash.output_len() as u64 {
        true => Ok(algorithm),
        false => Err(unrecognized()),
    }
}

fn read_hash_identifier(rd: &mut Reader<'_>) -> Result<HashAlgorithm, Error> {
    let mut alg = rd.read_sequence()?;
    let hash = HashAlgorithm::from_oid(alg.read_oid()?)
        .ok_or(Error::from(EncodingError::UnrecognizedSignatureAlgorithm))?;
    if alg.any_left() {
        alg.read_null()?;
    }
    alg.expect_empty("hash algorithm")?;
    Ok(hash)
}

fn write_pss_params(w: &mut Writer, hash: HashAlgorithm) {
    let write_hash = |w: &mut Writer| {
        w.write_sequence(|w| {
            w.write_oid(hash.oid());
            w.write_null();
        })
    };

    w.write_sequence(|w| {
        w.write_context(0, write_hash);
        w.write_context(1, |w| {
            w.write_sequence(|w| {
                w.write_oid(oid::MGF1);
                write_hash(w);
            })
        });
        w.write_context(2, |w| w.write_small_integer(hash.output_len() as u64));
    });
}
