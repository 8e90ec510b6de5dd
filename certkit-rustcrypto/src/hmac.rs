use alloc::boxed::Box;
use core::fmt;
use core::marker::PhantomData;

use certkit::crypto::hash::HashAlgorithm;
use certkit::crypto::hmac;
use ::hmac::digest::core_api::BlockSizeUser;
use ::hmac::digest::Digest;
use ::hmac::{Mac, SimpleHmac};

pub(crate) static ALL: &[&dyn hmac::Hmac] = &[
    &Hmac::<sha1::Sha1>::new(HashAlgorithm::Sha1),
    &Hmac::<sha2::Sha224>::new(HashAlgorithm::Sha224),
    &Hmac::<sha2::Sha256>::new(HashAlgorithm::Sha256),
    &Hmac::<sha2::Sha384>::new(HashAlgorithm::Sha384),
    &Hmac::<sha2::Sha512>::new(HashAlgorithm::Sha512),
];

pub(crate) struct Hmac<D> {
    algorithm: HashAlgorithm,
    digest: PhantomData<fn() -> D>,
}

impl<D> Hmac<D> {
    pub(crate) const fn new(algorithm: HashAlgorithm) -> Self {
        Self {
            algorithm,
            digest: PhantomData,
        }
    }
}

impl<D> fmt::Debug for Hmac<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Hmac")
            .field(&self.algorithm)
            .finish()
    }
}

impl<D> hmac::Hmac for Hmac<D>
where
    D: Digest + BlockSizeUser + Clone + Send + Sync + 'static,
{
    fn open_key(&self, key: &[u8]) -> Box<dyn hmac::Key> {
        Box::new(Key(
            <SimpleHmac<D> as Mac>::new_from_slice(key).expect("HMAC accepts keys of any length"),
        ))
    }

    fn hash_algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }
}

struct Key<D: Digest + BlockSizeUser>(SimpleHmac<D>);

impl<D> hmac::Key for Key<D>
where
    D: Digest + BlockSizeUser + Clone + Send + Sync + 'static,
{
    fn sign(&self, data: &[&[u8]]) -> hmac::Tag {
        let mut ctx = self.0.clone();
        for d in data {
            ctx.update(d);
        }
        hmac::Tag::new(&ctx.finalize().into_bytes()[..])
    }
}
