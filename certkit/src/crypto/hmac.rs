use alloc::boxed::Box;
use core::fmt::Debug;

use super::hash::{HashAlgorithm, Output};

/// HMAC (RFC 2104) over one hash function.
///
/// PKCS#12 integrity checking is the only user.  A provider supplies one of
/// these for each hash it wants to allow in a bundle's `MacData`; SHA-1 is
/// what nearly every bundle uses.
pub trait Hmac: Send + Sync + Debug {
    /// Key an HMAC computation.  `key` may be any length.
    fn open_key(&self, key: &[u8]) -> Box<dyn Key>;

    /// The hash function underneath.
    fn hash_algorithm(&self) -> HashAlgorithm;
}

/// An HMAC key, ready to produce tags.
pub trait Key: Send + Sync {
    /// The tag over the concatenation of the slices in `data`.
    fn sign(&self, data: &[&[u8]]) -> Tag;
}

/// An HMAC tag: one output of the underlying hash function.
pub type Tag = Output;
