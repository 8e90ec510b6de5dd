use alloc::vec::Vec;

use zeroize::Zeroizing;

use super::kdf::{derive_key, ID_IV, ID_KEY};
use crate::crypto::{BlockCipherAlgorithm, CryptoProvider, HashAlgorithm};
use crate::der::{Reader, Writer};
use crate::error::{EncodingError, Error};
use crate::log::debug;
use crate::oid;

/// Iteration counts above this are refused rather than run.
pub(crate) const MAX_ITERATIONS: u64 = 10_000_000;

/// The PKCS#12 password-based encryption schemes certkit implements.
///
/// All of them derive keys with SHA-1.  The RC4 schemes and PBES2 are
/// recognised but not implemented.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PbeScheme {
    /// `pbeWithSHAAnd3-KeyTripleDES-CBC`
    #[default]
    Sha1TripleDes3Key,
    /// `pbeWithSHAAnd2-KeyTripleDES-CBC`
    Sha1TripleDes2Key,
    /// `pbeWithSHAAnd128BitRC2-CBC`
    Sha1Rc2_128,
    /// `pbewithSHAAnd40BitRC2-CBC`
    Sha1Rc2_40,
}

impl PbeScheme {
    /// The scheme's object identifier.
    pub fn oid(self) -> &'static [u8] {
        match self {
            Self::Sha1TripleDes3Key => oid::PBE_SHA1_3DES,
            Self::Sha1TripleDes2Key => oid::PBE_SHA1_2DES,
            Self::Sha1Rc2_128 => oid::PBE_SHA1_RC2_128,
            Self::Sha1Rc2_40 => oid::PBE_SHA1_RC2_40,
        }
    }

    fn from_oid(id: &[u8]) -> Result<Self, Error> {
        let unsupported = |name: &str| {
            debug!("unsupported encryption scheme {name}");
            Err(Error::UnsupportedAlgorithm(name.into()))
        };

        match id {
            oid::PBE_SHA1_3DES => Ok(Self::Sha1TripleDes3Key),
            oid::PBE_SHA1_2DES => Ok(Self::Sha1TripleDes2Key),
            oid::PBE_SHA1_RC2_128 => Ok(Self::Sha1Rc2_128),
            oid::PBE_SHA1_RC2_40 => Ok(Self::Sha1Rc2_40),
            oid::PBE_SHA1_RC4_128 => unsupported("pbeWithSHAAnd128BitRC4"),
            oid::PBE_SHA1_RC4_40 => unsupported("pbeWithSHAAnd40BitRC4"),
            oid::PBES2 => unsupported("PBES2"),
            other => unsupported(&oid::to_dotted(other)),
        }
    }

    fn cipher(self) -> BlockCipherAlgorithm {
        match self {
            Self::Sha1TripleDes3Key => BlockCipherAlgorithm::TripleDes3Key,
            Self::Sha1TripleDes2Key => BlockCipherAlgorithm::TripleDes2Key,
            Self::Sha1Rc2_128 => BlockCipherAlgorithm::Rc2 { effective_bits: 128 },
            Self::Sha1Rc2_40 => BlockCipherAlgorithm::Rc2 { effective_bits: 40 },
        }
    }

    fn key_len(self) -> usize {
        match self {
            Self::Sha1TripleDes3Key => 24,
            Self::Sha1TripleDes2Key | Self::Sha1Rc2_128 => 16,
            Self::Sha1Rc2_40 => 5,
        }
    }
}

/// A PBE `AlgorithmIdentifier`: scheme, salt and iteration count.
#[derive(Debug)]
pub(crate) struct PbeParams<'a> {
    pub(crate) scheme: PbeScheme,
    pub(crate) salt: &'a [u8],
    pub(crate) iterations: u64,
}

impl<'a> PbeParams<'a> {
    pub(crate) fn read(rd: &mut Reader<'a>) -> Result<Self, Error> {
        let mut alg = rd.read_sequence()?;
        let scheme = PbeScheme::from_oid(alg.read_oid()?)?;

        let mut params = alg.read_sequence()?;
        let salt = params.read_octet_string()?;
        let iterations = read_iterations(&mut params)?;
        params.expect_empty("PBE parameters")?;
        alg.expect_empty("PBE algorithm")?;

        Ok(Self {
            scheme,
            salt,
            iterations,
        })
    }

    pub(crate) fn write(&self, w: &mut Writer) {
        w.write_sequence(|w| {
            w.write_oid(self.scheme.oid());
            w.write_sequence(|w| {
                w.write_octet_string(self.salt);
                w.write_small_integer(self.iterations);
            });
        });
    }

    /// Decrypt `ciphertext`.  `password` is in BMPString form.
    pub(crate) fn decrypt(
        &self,
        password: &[u8],
        ciphertext: &[u8],
        provider: &CryptoProvider,
    ) -> Result<Zeroizing<Vec<u8>>, Error> {
        let (key, iv) = self.derive(password, provider)?;
        provider
            .block_cipher
            .decrypt_cbc(self.scheme.cipher(), &key, &iv, ciphertext)
    }

    /// Encrypt `plaintext`.  `password` is in BMPString form.
    pub(crate) fn encrypt(
        &self,
        password: &[u8],
        plaintext: &[u8],
        provider: &CryptoProvider,
    ) -> Result<Vec<u8>, Error> {
        let (key, iv) = self.derive(password, provider)?;
        provider
            .block_cipher
            .encrypt_cbc(self.scheme.cipher(), &key, &iv, plaintext)
    }

    fn derive(
        &self,
        password: &[u8],
        provider: &CryptoProvider,
    ) -> Result<(Zeroizing<Vec<u8>>, Zeroizing<Vec<u8>>), Error> {
        let sha1 = provider.hash(HashAlgorithm::Sha1)?;
        let cipher = self.scheme.cipher();
        let key = derive_key(
            sha1,
            ID_KEY,
            password,
            self.salt,
            self.iterations,
            self.scheme.key_len(),
        );
        let iv = derive_key(
            sha1,
            ID_IV,
            password,
            self.salt,
            self.iterations,
            cipher.block_len(),
        );
        Ok((key, iv))
    }
}

/// Read a positive iteration count no larger than [`MAX_ITERATIONS`].
pub(crate) fn read_iterations(rd: &mut Reader<'_>) -> Result<u64, Error> {
    match rd.read_small_integer()? {
        n @ 1..=MAX_ITERATIONS => Ok(n),
        _ => Err(EncodingError::IntegerOutOfRange.into()),
    }
}
