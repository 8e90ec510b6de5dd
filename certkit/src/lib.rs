//! # certkit - public-key-infrastructure containers
//!
//! certkit parses, verifies and serializes the binary artifacts that carry keys and
//! certificates around:
//!
//! * X.509 certificates ([`x509::Certificate`]), including signature verification
//!   against an issuer key and signing of new certificates.
//! * PKCS#12 bundles ([`pkcs12::Pkcs12Container`]), including the legacy
//!   password-based encryption schemes still produced by common tooling.
//! * PKCS#8 private keys ([`pkcs8`]), plus bare PKCS#1 and SEC1 keys.
//! * PEM text files ([`pem::PemFile`]).
//!
//! Everything is built on a small DER reader and writer ([`der`]) that borrows from
//! the input buffer while walking it and only copies bytes when a value is
//! materialised.
//!
//! ## Non-features
//!
//! certkit does not generate keys, build or validate certificate chains, check
//! validity periods, or check revocation.  It also does not implement any
//! cryptographic primitive itself.
//!
//! ## Design overview
//!
//! ### certkit does not do cryptography
//!
//! Hashing, RSA and ECDSA operations, block ciphers and random number generation
//! are reached through a [`crypto::CryptoProvider`] value which the caller passes
//! explicitly to each operation that needs one.  The `certkit-rustcrypto` crate
//! provides a complete provider built on the RustCrypto crates.
//!
//! ### certkit does not do IO
//!
//! All decoders take byte slices and all encoders return owned buffers.  With the
//! `std` feature there are thin `load_file`/`save_file` helpers which read or write
//! a whole file and forward to the in-memory API.
//!
//! ### Errors
//!
//! Decoders fail atomically: either a complete value is returned or an
//! [`Error`] describing what kind of failure occurred.  Signature verification
//! returns a plain `bool`, because an invalid signature is an expected outcome.
//!
//! ## Crate features
//!
//! - `std` (enabled by default): file helpers.
//! - `logging` (enabled by default): emit diagnostics through the `log` crate.

#![forbid(unsafe_code, unused_must_use)]
#![deny(
    clippy::alloc_instead_of_core,
    clippy::clone_on_ref_ptr,
    clippy::std_instead_of_core,
    clippy::use_self,
    clippy::upper_case_acronyms,
    trivial_casts,
    trivial_numeric_casts,
    missing_docs,
    unreachable_pub,
    unused_import_braces,
    unused_extern_crates,
    unused_qualifications
)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

extern crate alloc;
// Only the file helpers and the tests need std; everything else must build
// against `core` and `alloc` alone.
#[cfg(any(feature = "std", test))]
extern crate std;

#[cfg(feature = "logging")]
#[allow(clippy::single_component_path_imports)]
use log;

#[cfg(not(feature = "logging"))]
mod log {
    macro_rules! trace    ( ($($tt:tt)*) => {{}} );
    macro_rules! debug    ( ($($tt:tt)*) => {{}} );
    macro_rules! warn     ( ($($tt:tt)*) => {{}} );
    pub(crate) use {debug, trace, warn};
}

/// The DER reader and writer everything else is built on.
pub mod der;

/// Cryptographic capabilities consumed by certkit.
pub mod crypto;

/// RSA and elliptic-curve key types.
pub mod key;

/// Object identifiers known to certkit.
pub mod oid;

/// PEM text envelopes.
pub mod pem;

/// PKCS#8 private-key containers.
pub mod pkcs8;

/// PKCS#12 key and certificate bundles.
pub mod pkcs12;

/// X.509 certificates.
pub mod x509;

mod error;
mod rand;

pub use crate::error::{EncodingError, Error, IoErrorKind};
pub use crate::key::{PrivateKey, PublicKey};

/// Re-export of the `rustls-pki-types` crate, whose types appear in certkit's API.
pub use pki_types;

/// Re-export of the `num-bigint` crate, whose integer types appear in certkit's API.
pub use num_bigint;
