//! PKCS#12 bundles written by OpenSSL, and bundles written by certkit.

use certkit::crypto::HashAlgorithm;
use certkit::pkcs12::{
    bmp_password, derive_key, PbeScheme, Pkcs12Container, Pkcs12Options, ID_IV, ID_KEY, ID_MAC,
};
use certkit::{pkcs8, Error, PrivateKey};
use pki_types::CertificateDer;

mod common;

use common::{bytes_for, provider, KeyType, PASSWORD};

fn load(file: &str, password: &str) -> Result<Pkcs12Container, Error> {
    Pkcs12Container::load(bytes_for("pkcs12", file), password, &provider())
}

fn end_key(kt: KeyType) -> PrivateKey {
    pkcs8::decode(kt.bytes_for("end.key.der"), &provider()).unwrap()
}

#[test]
fn rsa_3des() {
    let bundle = load("rsa-3des.p12", PASSWORD).unwrap();
    assert_eq!(bundle.private_key, Some(end_key(KeyType::Rsa2048)));
    assert_eq!(bundle.friendly_name_of_key.as_deref(), Some("test key"));
    assert_eq!(
        bundle.certificates,
        vec![CertificateDer::from(KeyType::Rsa2048.end_der())]
    );
    assert_eq!(bundle.friendly_names, vec!["test key".to_string()]);
}

#[test]
fn rsa_legacy_rc2_with_chain() {
    let bundle = load("rsa-legacy-rc2.p12", PASSWORD).unwrap();
    assert_eq!(bundle.private_key, Some(end_key(KeyType::Rsa2048)));
    assert_eq!(bundle.friendly_name_of_key.as_deref(), Some("legacy key"));
    assert_eq!(
        bundle.certificates,
        vec![
            CertificateDer::from(KeyType::Rsa2048.end_der()),
            CertificateDer::from(KeyType::Rsa2048.ca_der()),
        ]
    );
    assert_eq!(
        bundle.friendly_names,
        vec!["legacy key".to_string(), String::new()]
    );
}

#[test]
fn ec_chain_2des() {
    let bundle = load("ec-chain-2des.p12", PASSWORD).unwrap();
    assert_eq!(bundle.private_key, Some(end_key(KeyType::EcdsaP256)));
    assert_eq!(bundle.friendly_name_of_key.as_deref(), Some("ec key"));
    assert_eq!(bundle.certificates.len(), 2);
    assert_eq!(bundle.certificates[0].as_ref(), KeyType::EcdsaP256.end_der());
    assert_eq!(bundle.certificates[1].as_ref(), KeyType::EcdsaP256.ca_der());
}

#[test]
fn wrong_password() {
    for file in ["rsa-3des.p12", "rsa-legacy-rc2.p12", "ec-chain-2des.p12"] {
        assert_eq!(load(file, "test12345"), Err(Error::DecryptionFailed), "{file}");
        assert_eq!(load(file, ""), Err(Error::DecryptionFailed), "{file}");
    }
}

#[test]
fn rc4_is_unsupported() {
    assert!(matches!(
        load("rsa-rc4.p12", PASSWORD),
        Err(Error::UnsupportedAlgorithm(_))
    ));
}

#[test]
fn corrupted_bundle_fails() {
    let mut der = bytes_for("pkcs12", "rsa-3des.p12").to_vec();
    // somewhere in the middle of the encrypted certificate
    let middle = der.len() / 3;
    der[middle] ^= 0x80;
    assert!(Pkcs12Container::load(&der, PASSWORD, &provider()).is_err());
}

#[test]
fn truncation_never_panics() {
    let provider = provider();
    let der = bytes_for("pkcs12", "ec-chain-2des.p12");
    for len in (0..der.len()).step_by(7) {
        assert!(Pkcs12Container::load(&der[..len], PASSWORD, &provider).is_err());
    }
}

#[test]
fn save_then_load() {
    let provider = provider();
    let original = load("rsa-legacy-rc2.p12", PASSWORD).unwrap();

    for scheme in [
        PbeScheme::Sha1TripleDes3Key,
        PbeScheme::Sha1TripleDes2Key,
        PbeScheme::Sha1Rc2_128,
        PbeScheme::Sha1Rc2_40,
    ] {
        let options = Pkcs12Options::default()
            .with_scheme(scheme)
            .with_iterations(100);
        let der = original
            .save_with("new password", &options, &provider)
            .unwrap();

        let loaded = Pkcs12Container::load(&der, "new password", &provider).unwrap();
        assert_eq!(loaded, original, "{scheme:?}");
        assert_eq!(
            Pkcs12Container::load(&der, PASSWORD, &provider),
            Err(Error::DecryptionFailed)
        );
    }
}

#[test]
fn save_ec_bundle_with_defaults() {
    let provider = provider();
    let original = load("ec-chain-2des.p12", PASSWORD).unwrap();
    let der = original.save("another", &provider).unwrap();
    assert_eq!(
        Pkcs12Container::load(&der, "another", &provider),
        Ok(original)
    );
}

#[test]
fn saved_bundle_without_mac() {
    let provider = provider();
    let bundle = Pkcs12Container {
        private_key: Some(end_key(KeyType::EcdsaP384)),
        certificates: vec![CertificateDer::from(KeyType::EcdsaP384.end_der())],
        friendly_names: vec!["p384".into()],
        friendly_name_of_key: Some("p384".into()),
    };
    let options = Pkcs12Options::default()
        .with_iterations(10)
        .with_mac(false);
    let der = bundle.save_with("pw", &options, &provider).unwrap();
    assert_eq!(
        Pkcs12Container::load(&der, "pw", &provider),
        Ok(bundle)
    );
}

#[cfg(feature = "std")]
#[test]
fn bundles_on_disk() {
    let provider = provider();
    let bundle = load("rsa-3des.p12", PASSWORD).unwrap();
    let path = std::env::temp_dir().join(format!("certkit-{}.p12", std::process::id()));

    bundle
        .save_file(&path, PASSWORD, &provider)
        .unwrap();
    let loaded = Pkcs12Container::load_file(&path, PASSWORD, &provider);
    std::fs::remove_file(&path).unwrap();
    assert_eq!(loaded, Ok(bundle));
}

/// Vectors produced by OpenSSL's `PKCS12_key_gen_uni`.
#[test]
fn key_derivation_vectors() {
    let provider = provider();
    let sha1 = provider.hash(HashAlgorithm::Sha1).unwrap();

    let smeg = bmp_password("smeg");
    let salt = hex::decode("0a58cf64530d823f").unwrap();
    assert_eq!(
        hex::encode(&*derive_key(sha1, ID_KEY, &smeg, &salt, 1, 24)),
        "8aaae6297b6cb04642ab5b077851284eb7128f1a2a7fbca3"
    );
    assert_eq!(
        hex::encode(&*derive_key(sha1, ID_IV, &smeg, &salt, 1, 8)),
        "79993dfe048d3b76"
    );

    let queeg = bmp_password("queeg");
    let salt = hex::decode("05dec959acff72f7").unwrap();
    assert_eq!(
        hex::encode(&*derive_key(sha1, ID_KEY, &queeg, &salt, 1000, 24)),
        "ed2034e36328830ff09df1e1a07dd357185dac0d4f9eb3d4"
    );
    assert_eq!(
        hex::encode(&*derive_key(sha1, ID_IV, &queeg, &salt, 1000, 8)),
        "11dedad7758d4860"
    );
    assert_eq!(
        hex::encode(&*derive_key(sha1, ID_MAC, &queeg, &salt, 1000, 20)),
        "8e6f200e446345e726b49ef9c7899edd9c498401"
    );
}

#[test]
fn bmp_password_encoding() {
    assert_eq!(&*bmp_password(""), &[0u8, 0][..]);
    assert_eq!(
        &*bmp_password("ab\u{e9}"),
        &[0, b'a', 0, b'b', 0, 0xe9, 0, 0][..]
    );
}
