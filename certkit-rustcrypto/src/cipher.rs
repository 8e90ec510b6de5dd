use alloc::vec::Vec;

use cbc::cipher::block_padding::Pkcs7;
use cbc::cipher::{BlockDecryptMut, BlockEncryptMut, InnerIvInit, KeyIvInit};
use certkit::crypto::{BlockCipher, BlockCipherAlgorithm};
use certkit::Error;
use zeroize::Zeroizing;

use super::Provider;

impl BlockCipher for Provider {
    fn decrypt_cbc(
        &self,
        algorithm: BlockCipherAlgorithm,
        key: &[u8],
        iv: &[u8],
        ciphertext: &[u8],
    ) -> Result<Zeroizing<Vec<u8>>, Error> {
        let plaintext = match algorithm {
            BlockCipherAlgorithm::TripleDes3Key => {
                cbc::Decryptor::<des::TdesEde3>::new_from_slices(key, iv)
                    .map_err(|_| Error::DecryptionFailed)?
                    .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
            }
            BlockCipherAlgorithm::TripleDes2Key => {
                cbc::Decryptor::<des::TdesEde2>::new_from_slices(key, iv)
                    .map_err(|_| Error::DecryptionFailed)?
                    .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
            }
            BlockCipherAlgorithm::Rc2 { effective_bits } => {
                let cipher = rc2::Rc2::new_with_eff_key_len(key, usize::from(effective_bits));
                cbc::Decryptor::inner_iv_slice_init(cipher, iv)
                    .map_err(|_| Error::DecryptionFailed)?
                    .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
            }
            _ => return Err(Error::UnsupportedAlgorithm(alloc::format!("{algorithm:?}"))),
        };

        plaintext
            .map(Zeroizing::new)
            .map_err(|_| Error::DecryptionFailed)
    }

    fn encrypt_cbc(
        &self,
        algorithm: BlockCipherAlgorithm,
        key: &[u8],
        iv: &[u8],
        plaintext: &[u8],
    ) -> Result<Vec<u8>, Error> {
        let bad_key = |_| Error::UnsupportedAlgorithm(alloc::format!("{algorithm:?} key length"));
        Ok(match algorithm {
            BlockCipherAlgorithm::TripleDes3Key => {
                cbc::Encryptor::<des::TdesEde3>::new_from_slices(key, iv)
                    .map_err(bad_key)?
                    .encrypt_padded_vec_mut::<Pkcs7>(plaintext)
            }
            BlockCipherAlgorithm::TripleDes2Key => {
                cbc::Encryptor::<des::TdesEde2>::new_from_slices(key, iv)
                    .map_err(bad_key)?
                    .encrypt_padded_vec_mut::<Pkcs7>(plaintext)
            }
            BlockCipherAlgorithm::Rc2 { effective_bits } => {
                let cipher = rc2::Rc2::new_with_eff_key_len(key, usize::from(effective_bits));
                cbc::Encryptor::inner_iv_slice_init(cipher, iv)
                    .map_err(bad_key)?
                    .encrypt_padded_vec_mut::<Pkcs7>(plaintext)
            }
            _ => return Err(Error::UnsupportedAlgorithm(alloc::format!("{algorithm:?}"))),
        })
    }
}
