#![allow(dead_code)]

use certkit::crypto::CryptoProvider;

macro_rules! embed_files {
    (
        $(
            ($name:ident, $keytype:expr, $path:expr);
        )+
    ) => {
        $(
            const $name: &'static [u8] = include_bytes!(
                concat!("../../../test-ca/", $keytype, "/", $path));
        )+

        pub fn bytes_for(keytype: &str, path: &str) -> &'static [u8] {
            match (keytype, path) {
                $(
                    ($keytype, $path) => $name,
                )+
                _ => panic!("unknown keytype {} with path {}", keytype, path),
            }
        }
    }
}

embed_files! {
    (ECDSA_P256_CA_DER, "ecdsa-p256", "ca.der");
    (ECDSA_P256_CA_KEY_DER, "ecdsa-p256", "ca.key.der");
    (ECDSA_P256_END_DER, "ecdsa-p256", "end.der");
    (ECDSA_P256_END_KEY_DER, "ecdsa-p256", "end.key.der");
    (ECDSA_P256_END_KEY, "ecdsa-p256", "end.key");
    (ECDSA_P256_END_FULLCHAIN, "ecdsa-p256", "end.fullchain.pem");
    (ECDSA_P256_END_NOPUB_KEY_DER, "ecdsa-p256", "end.nopub.key.der");
    (ECDSA_P256_END_NOPUB_SEC1_DER, "ecdsa-p256", "end.nopub.sec1.der");
    (ECDSA_P256_END_EXPLICIT_KEY_DER, "ecdsa-p256", "end.explicit.key.der");
    (ECDSA_P256_END_EXPLICIT_SEC1_DER, "ecdsa-p256", "end.explicit.sec1.der");

    (ECDSA_P384_CA_DER, "ecdsa-p384", "ca.der");
    (ECDSA_P384_CA_KEY_DER, "ecdsa-p384", "ca.key.der");
    (ECDSA_P384_END_DER, "ecdsa-p384", "end.der");
    (ECDSA_P384_END_KEY_DER, "ecdsa-p384", "end.key.der");
    (ECDSA_P384_END_KEY, "ecdsa-p384", "end.key");
    (ECDSA_P384_END_FULLCHAIN, "ecdsa-p384", "end.fullchain.pem");

    (RSA_2048_CA_DER, "rsa-2048", "ca.der");
    (RSA_2048_CA_KEY_DER, "rsa-2048", "ca.key.der");
    (RSA_2048_END_DER, "rsa-2048", "end.der");
    (RSA_2048_END_KEY_DER, "rsa-2048", "end.key.der");
    (RSA_2048_END_KEY, "rsa-2048", "end.key");
    (RSA_2048_END_FULLCHAIN, "rsa-2048", "end.fullchain.pem");

    (PKCS12_RSA_3DES, "pkcs12", "rsa-3des.p12");
    (PKCS12_RSA_LEGACY_RC2, "pkcs12", "rsa-legacy-rc2.p12");
    (PKCS12_EC_CHAIN_2DES, "pkcs12", "ec-chain-2des.p12");
    (PKCS12_RSA_RC4, "pkcs12", "rsa-rc4.p12");

    (PEM_MIXED, "pem", "mixed.pem");
}

/// The password of every bundle under `test-ca/pkcs12`.
pub const PASSWORD: &str = "test1234";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyType {
    Rsa2048,
    EcdsaP256,
    EcdsaP384,
}

pub static ALL_KEY_TYPES: &[KeyType] = &[KeyType::Rsa2048, KeyType::EcdsaP256, KeyType::EcdsaP384];

impl KeyType {
    pub fn bytes_for(&self, part: &str) -> &'static [u8] {
        bytes_for(self.dir(), part)
    }

    pub fn dir(&self) -> &'static str {
        match self {
            Self::Rsa2048 => "rsa-2048",
            Self::EcdsaP256 => "ecdsa-p256",
            Self::EcdsaP384 => "ecdsa-p384",
        }
    }

    pub fn ca_der(&self) -> &'static [u8] {
        self.bytes_for("ca.der")
    }

    pub fn end_der(&self) -> &'static [u8] {
        self.bytes_for("end.der")
    }
}

pub fn provider() -> CryptoProvider {
    // ignore the error: several tests in one binary all try to install a logger
    let _ = env_logger::builder().is_test(true).try_init();
    certkit_rustcrypto::provider()
}
