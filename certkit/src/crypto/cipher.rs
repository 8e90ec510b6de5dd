use alloc::vec::Vec;
use core::fmt::Debug;

use zeroize::Zeroizing;

use crate::error::Error;

/// The block ciphers used by the legacy PKCS#12 password-based encryption schemes.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlockCipherAlgorithm {
    /// DES-EDE3 with three independent 8-byte keys.
    TripleDes3Key,
    /// DES-EDE with two 8-byte keys, the first reused as the third.
    TripleDes2Key,
    /// RC2 with a 5- or 16-byte key.
    Rc2 {
        /// The effective key length in bits, normally the key length times eight.
        effective_bits: u16,
    },
}

impl BlockCipherAlgorithm {
    /// The cipher's block length, which is also its IV length.
    pub fn block_len(self) -> usize {
        8
    }
}

/// CBC-mode encryption with PKCS#7 padding.
///
/// Implementations add padding when encrypting and check and remove it when
/// decrypting.
pub trait BlockCipher: Send + Sync + Debug {
    /// Decrypt `ciphertext`, returning the unpadded plaintext.
    ///
    /// A wrong key almost always shows up as bad padding; report that as
    /// [`Error::DecryptionFailed`].  An unimplemented `algorithm` is
    /// [`Error::UnsupportedAlgorithm`].
    fn decrypt_cbc(
        &self,
        algorithm: BlockCipherAlgorithm,
        key: &[u8],
        iv: &[u8],
        ciphertext: &[u8],
    ) -> Result<Zeroizing<Vec<u8>>, Error>;

    /// Pad and encrypt `plaintext`.
    fn encrypt_cbc(
        &self,
        algorithm: BlockCipherAlgorithm,
        key: &[u8],
        iv: &[u8],
        plaintext: &[u8],
    ) -> Result<Vec<u8>, Error>;
}
