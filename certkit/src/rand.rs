//! Salts are the only random material certkit makes.

use alloc::vec;
use alloc::vec::Vec;

use crate::crypto::SecureRandom;
use crate::error::Error;
use crate::log::trace;

/// A fresh salt of `len` bytes.
pub(crate) fn salt(secure_random: &dyn SecureRandom, len: usize) -> Result<Vec<u8>, Error> {
    let mut salt = vec![0; len];
    secure_random.fill(&mut salt)?;
    trace!("generated {len}-byte salt");
    Ok(salt)
}

/// The [`SecureRandom`] source could not produce bytes.
#[derive(Debug)]
pub struct GetRandomFailed;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::test_provider::TEST_PROVIDER;

    #[test]
    fn salt_length() {
        assert!(salt(TEST_PROVIDER.secure_random, 0)
            .unwrap()
            .is_empty());
        assert_eq!(salt(TEST_PROVIDER.secure_random, 6).unwrap(), b"RandRa");
    }

    #[derive(Debug)]
    struct Broken;

    impl SecureRandom for Broken {
        fn fill(&self, _: &mut [u8]) -> Result<(), GetRandomFailed> {
            Err(GetRandomFailed)
        }
    }

    #[test]
    fn failure_is_reported() {
        assert_eq!(salt(&Broken, 8), Err(Error::FailedToGetRandomBytes));
    }
}
