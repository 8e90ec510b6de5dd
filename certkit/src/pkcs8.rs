//! PKCS#8 `PrivateKeyInfo`, the format of `PRIVATE KEY` PEM files, and its
//! password-protected form `EncryptedPrivateKeyInfo`.
//!
//! RSA and elliptic-curve keys are supported.  Encrypted keys must use one of
//! the legacy PKCS#12 schemes in [`crate::pkcs12::PbeScheme`].

use pki_types::PrivatePkcs8KeyDer;

use crate::crypto::CryptoProvider;
use crate::der::{Reader, Tag, Writer};
use crate::error::{EncodingError, Error};
use crate::key::ecc::{EcPrivateKey, EllipticCurve};
use crate::key::rsa::RsaPrivateKey;
use crate::key::PrivateKey;
use crate::log::debug;
use crate::oid;
use crate::pkcs12::{bmp_password, PbeParams};

/// Decode a DER `PrivateKeyInfo`.
///
/// `provider` is needed only for EC keys that omit their public point.
pub fn decode(der: &[u8], provider: &CryptoProvider) -> Result<PrivateKey, Error> {
    let mut rd = Reader::init(der);
    let key = read(&mut rd, provider)?;
    rd.expect_empty("private key info")?;
    Ok(key)
}

/// Encode `key` as a DER `PrivateKeyInfo`.
///
/// EC keys carry their curve in the algorithm identifier and again, with the
/// public point, inside the SEC1 structure.
pub fn encode(key: &PrivateKey) -> PrivatePkcs8KeyDer<'static> {
    let mut w = Writer::new();
    write(key, &mut w);
    PrivatePkcs8KeyDer::from(w.finish())
}

/// Decrypt and decode a DER `EncryptedPrivateKeyInfo`.
///
/// A wrong password is reported as [`Error::DecryptionFailed`].
pub fn decode_encrypted(
    der: &[u8],
    password: &str,
    provider: &CryptoProvider,
) -> Result<PrivateKey, Error> {
    let mut rd = Reader::init(der);
    let key = read_encrypted(&mut rd, &bmp_password(password), provider)?;
    rd.expect_empty("encrypted private key info")?;
    Ok(key)
}

pub(crate) fn read(rd: &mut Reader<'_>, provider: &CryptoProvider) -> Result<PrivateKey, Error> {
    let mut info = rd.read_sequence()?;
    match info.read_small_integer()? {
        0 | 1 => {}
        _ => return Err(EncodingError::UnsupportedVersion("private key info").into()),
    }

    let mut alg = info.read_sequence()?;
    let alg_oid = alg.read_oid()?;
    let private_key = info.read_octet_string()?;

    // attributes [0] and, from version 1, publicKey [1]
    if info.read_optional(Tag::context(0, true))?.is_some() {
        debug!("ignoring private key attributes");
    }
    info.read_optional(Tag::context(1, false))?;
    info.expect_empty("private key info")?;

    let mut inner = Reader::init(private_key);
    let key = match alg_oid {
        oid::RSA_ENCRYPTION => {
            if alg.any_left() {
                alg.read_null()?;
            }
            PrivateKey::Rsa(RsaPrivateKey::read(&mut inner)?)
        }
        oid::EC_PUBLIC_KEY => {
            let outer_curve = match alg.any_left() {
                true => Some(EllipticCurve::read(&mut alg)?),
                false => None,
            };
            PrivateKey::Ec(EcPrivateKey::read_sec1(&mut inner, outer_curve, provider)?)
        }
        other => return Err(Error::UnsupportedAlgorithm(oid::to_dotted(other))),
    };
    alg.expect_empty("private key algorithm")?;
    inner.expect_empty("private key")?;

    Ok(key)
}

pub(crate) fn write(key: &PrivateKey, w: &mut Writer) {
    w.write_sequence(|w| {
        w.write_small_integer(0);
        match key {
            PrivateKey::Rsa(key) => {
                w.write_sequence(|w| {
                    w.write_oid(oid::RSA_ENCRYPTION);
                    w.write_null();
                });
                w.write_octet_string(key.to_pkcs1_der().secret_pkcs1_der());
            }
            PrivateKey::Ec(key) => {
                w.write_sequence(|w| {
                    w.write_oid(oid::EC_PUBLIC_KEY);
                    key.curve.write(w);
                });
                w.write_octet_string(key.to_sec1_der().secret_sec1_der());
            }
        }
    });
}

/// `password` is in BMPString form.
pub(crate) fn read_encrypted(
    rd: &mut Reader<'_>,
    password: &[u8],
    provider: &CryptoProvider,
) -> Result<PrivateKey, Error> {
    let mut info = rd.read_sequence()?;
    let params = PbeParams::read(&mut info)?;
    let ciphertext = info.read_octet_string()?;
    info.expect_empty("encrypted private key info")?;

    let plaintext = params.decrypt(password, ciphertext, provider)?;
    // A wrong password that happens to leave valid padding yields garbage.
    let mut rd = Reader::init(&plaintext);
    let key = read(&mut rd, provider).and_then(|key| {
        rd.expect_empty("private key info")?;
        Ok(key)
    });
    match key {
        Err(Error::MalformedEncoding(_)) => Err(Error::DecryptionFailed),
        other => other,
    }
}
