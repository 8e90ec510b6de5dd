use alloc::boxed::Box;
use core::fmt;
use core::marker::PhantomData;

use certkit::crypto::hash::{self, HashAlgorithm};
use sha2::Digest;

pub(crate) static ALL: &[&dyn hash::Hash] = &[
    &Hash::<sha1::Sha1>::new(HashAlgorithm::Sha1),
    &Hash::<sha2::Sha224>::new(HashAlgorithm::Sha224),
    &Hash::<sha2::Sha256>::new(HashAlgorithm::Sha256),
    &Hash::<sha2::Sha384>::new(HashAlgorithm::Sha384),
    &Hash::<sha2::Sha512>::new(HashAlgorithm::Sha512),
];

pub(crate) struct Hash<D> {
    algorithm: HashAlgorithm,
    digest: PhantomData<fn() -> D>,
}

impl<D> Hash<D> {
    pub(crate) const fn new(algorithm: HashAlgorithm) -> Self {
        Self {
            algorithm,
            digest: PhantomData,
        }
    }
}

impl<D> fmt::Debug for Hash<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Hash")
            .field(&self.algorithm)
            .finish()
    }
}

impl<D: Digest + Send + Sync + 'static> hash::Hash for Hash<D> {
    fn start(&self) -> Box<dyn hash::Context> {
        Box::new(Context(D::new()))
    }

    fn hash(&self, data: &[u8]) -> hash::Output {
        hash::Output::new(&D::digest(data)[..])
    }

    fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }
}

struct Context<D>(D);

impl<D: Digest + Send + Sync + 'static> hash::Context for Context<D> {
    fn update(&mut self, data: &[u8]) {
        self.0.update(data);
    }

    fn finish(self: Box<Self>) -> hash::Output {
        hash::Output::new(&self.0.finalize()[..])
    }
}
