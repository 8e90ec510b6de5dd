//! Decoding, verifying and signing the certificates under `test-ca`.

use certkit::der::Reader;
use certkit::key::ecc::NamedCurve;
use certkit::num_bigint::{BigInt, BigUint};
use certkit::oid::ObjectIdentifier;
use certkit::x509::{
    AccessDescription, AccessMethod, BasicConstraints, Certificate, ExtendedKeyUsage,
    GeneralName, KeyUsage, NameAttribute, PolicyQualifier, SignatureAlgorithm, Version,
};
use certkit::{pkcs8, EncodingError, Error, PrivateKey, PublicKey};

mod common;

use common::{provider, KeyType, ALL_KEY_TYPES};

fn decode(der: &[u8]) -> Certificate {
    Certificate::decode(der, &provider()).unwrap()
}

#[test]
fn ca_fields() {
    for kt in ALL_KEY_TYPES {
        let ca = decode(kt.ca_der());
        println!("{kt:?}: {}", ca.signature_algorithm);

        assert_eq!(ca.version, Version::V3);
        assert_eq!(ca.serial_number, BigInt::from(0x7c1d5e));
        assert_eq!(ca.issuer, ca.subject);
        assert_eq!(ca.subject.get(NameAttribute::CountryName), Some("US"));
        assert_eq!(
            ca.subject.get(NameAttribute::StateOrProvinceName),
            Some("California")
        );
        assert_eq!(
            ca.subject.get(NameAttribute::LocalityName),
            Some("San Francisco")
        );
        assert_eq!(
            ca.subject.get(NameAttribute::OrganizationName),
            Some("Certkit Test")
        );
        assert_eq!(
            ca.subject.get(NameAttribute::OrganizationalUnitName),
            Some("Testing")
        );
        assert_eq!(
            ca.subject.get(NameAttribute::CommonName),
            Some(format!("Certkit {} CA", kt.dir()).as_str())
        );

        // 2026-10-16T04:28:03Z and twenty years less five leap days later
        assert_eq!(ca.valid_from.unix_secs(), 1_792_124_883);
        assert_eq!(ca.valid_to.unix_secs(), 2_422_844_883);
        assert_eq!(
            ca.valid_to.unix_secs() - ca.valid_from.unix_secs(),
            7300 * 86_400
        );
        assert_eq!(ca.valid_from.to_string(), "2026-10-16T04:28:03Z");

        let ext = &ca.extensions;
        assert_eq!(
            ext.basic_constraints,
            Some(BasicConstraints {
                ca: true,
                path_len: None
            })
        );
        let usage = ext.key_usage.unwrap();
        assert!(usage.contains(KeyUsage::KEY_CERT_SIGN));
        assert!(usage.contains(KeyUsage::CRL_SIGN));
        assert!(usage.contains(KeyUsage::DIGITAL_SIGNATURE));
        assert!(!usage.contains(KeyUsage::KEY_ENCIPHERMENT));
        assert_eq!(
            ext.extended_key_usage,
            vec![ExtendedKeyUsage::ServerAuth, ExtendedKeyUsage::ClientAuth]
        );

        assert_eq!(ext.certificate_policies.len(), 1);
        let policy = &ext.certificate_policies[0];
        assert_eq!(
            policy.identifier,
            "1.3.6.1.4.1.44947.1.1.1"
                .parse::<ObjectIdentifier>()
                .unwrap()
        );
        assert_eq!(
            policy.qualifiers,
            vec![
                PolicyQualifier::Cps("http://cps.example.com/".into()),
                PolicyQualifier::UserNotice(Some("Test certificates only".into())),
            ]
        );

        assert_eq!(
            ext.authority_info_access,
            vec![
                AccessDescription {
                    method: AccessMethod::Ocsp,
                    location: GeneralName::Uri("http://ocsp.example.com/".into()),
                },
                AccessDescription {
                    method: AccessMethod::CaIssuers,
                    location: GeneralName::Uri("http://ca.example.com/ca.der".into()),
                },
            ]
        );

        // OpenSSL leaves the authority key identifier out of self-signed certificates
        assert!(ext.subject_key_id.is_some());
        assert_eq!(ext.authority_key_id, None);
        assert!(ext.unhandled_critical.is_empty());
    }
}

#[test]
fn rsa_ca_key_identifier() {
    let ca = decode(KeyType::Rsa2048.ca_der());
    let expected = hex::decode("f8767ca1cce0f626fd40a6538187e7d80fa7c5d4").unwrap();
    assert_eq!(
        ca.extensions.subject_key_id,
        Some(BigUint::from_bytes_be(&expected))
    );
}

#[test]
fn end_entity_fields() {
    for kt in ALL_KEY_TYPES {
        let ca = decode(kt.ca_der());
        let end = decode(kt.end_der());

        assert_eq!(end.serial_number, BigInt::from(0xa1b2_c3d4_e5f6_0718_u64));
        assert_eq!(end.issuer, ca.subject);
        assert_eq!(
            end.subject.get(NameAttribute::CommonName),
            Some("testserver.com")
        );
        assert_eq!(end.subject.get(NameAttribute::CountryName), None);
        assert_eq!(end.valid_from, ca.valid_from);

        let ext = &end.extensions;
        assert_eq!(
            ext.basic_constraints,
            Some(BasicConstraints {
                ca: false,
                path_len: None
            })
        );
        assert_eq!(
            ext.key_usage,
            Some(KeyUsage(
                KeyUsage::DIGITAL_SIGNATURE.0 | KeyUsage::KEY_ENCIPHERMENT.0
            ))
        );
        assert_eq!(ext.extended_key_usage, vec![ExtendedKeyUsage::ServerAuth]);
        assert!(ext.certificate_policies.is_empty());
        assert!(ext.authority_info_access.is_empty());
        assert_eq!(ext.authority_key_id, ca.extensions.subject_key_id);
        assert_ne!(ext.subject_key_id, ca.extensions.subject_key_id);
    }
}

#[test]
fn signature_algorithms() {
    let expected = [
        (
            KeyType::Rsa2048,
            SignatureAlgorithm::RsaPkcs1Sha256,
            SignatureAlgorithm::RsaPkcs1Sha384,
        ),
        (
            KeyType::EcdsaP256,
            SignatureAlgorithm::EcdsaSha256,
            SignatureAlgorithm::EcdsaSha256,
        ),
        (
            KeyType::EcdsaP384,
            SignatureAlgorithm::EcdsaSha384,
            SignatureAlgorithm::EcdsaSha512,
        ),
    ];

    for (kt, ca_alg, end_alg) in expected {
        let ca = decode(kt.ca_der());
        let end = decode(kt.end_der());
        assert_eq!(ca.signature_algorithm, ca_alg);
        assert_eq!(end.signature_algorithm, end_alg);
        assert_eq!(
            ca.signed_content_hash.as_ref().len(),
            ca_alg.hash_algorithm().output_len()
        );
    }
}

#[test]
fn public_key_types() {
    assert!(matches!(
        decode(KeyType::Rsa2048.ca_der()).public_key,
        PublicKey::Rsa(ref key) if key.modulus.bits() == 2048
    ));
    for kt in [KeyType::EcdsaP256, KeyType::EcdsaP384] {
        let PublicKey::Ec(key) = decode(kt.ca_der()).public_key else {
            panic!("{kt:?} CA should have an EC key");
        };
        assert!(!key.point.is_infinity());
    }
}

#[test]
fn self_signed_and_chain_verify() {
    let provider = provider();
    for kt in ALL_KEY_TYPES {
        let ca = decode(kt.ca_der());
        let end = decode(kt.end_der());
        assert!(ca.verify(&ca.public_key, &provider), "{kt:?} CA");
        assert!(end.verify(&ca.public_key, &provider), "{kt:?} end");
    }
}

#[test]
fn wrong_issuer_key_fails() {
    let provider = provider();
    for kt in ALL_KEY_TYPES {
        let end = decode(kt.end_der());
        // self-verification uses the end-entity's own key
        assert!(!end.verify(&end.public_key, &provider), "{kt:?}");
    }

    let rsa_ca = decode(KeyType::Rsa2048.ca_der());
    let p256_ca = decode(KeyType::EcdsaP256.ca_der());
    let p384_ca = decode(KeyType::EcdsaP384.ca_der());
    assert!(!rsa_ca.verify(&p256_ca.public_key, &provider));
    assert!(!p256_ca.verify(&rsa_ca.public_key, &provider));
    assert!(!p256_ca.verify(&p384_ca.public_key, &provider));
}

#[test]
fn corrupted_signature_fails() {
    let provider = provider();
    for kt in ALL_KEY_TYPES {
        // the final octets of a certificate are always signature bits
        let mut der = kt.ca_der().to_vec();
        let last = der.len() - 1;
        der[last] ^= 0x01;

        let cert = decode(&der);
        assert!(!cert.verify(&cert.public_key, &provider), "{kt:?}");
    }
}

#[test]
fn corrupted_body_fails() {
    let provider = provider();
    let original = KeyType::Rsa2048.ca_der();
    let position = original
        .windows(7)
        .position(|w| w == b"Testing")
        .unwrap();

    // the issuer comes first
    let mut der = original.to_vec();
    der[position] = b'R';
    let cert = decode(&der);
    assert_eq!(
        cert.issuer.get(NameAttribute::OrganizationalUnitName),
        Some("Resting")
    );
    assert_ne!(cert.issuer, cert.subject);
    assert!(!cert.verify(&cert.public_key, &provider));
}

#[test]
fn truncation_is_an_encoding_error() {
    let provider = provider();
    for kt in ALL_KEY_TYPES {
        let der = kt.ca_der();
        assert!(matches!(
            Certificate::decode(&der[..der.len() - 3], &provider),
            Err(Error::MalformedEncoding(_))
        ));

        for len in 0..der.len() {
            assert!(
                matches!(
                    Certificate::decode(&der[..len], &provider),
                    Err(Error::MalformedEncoding(_))
                ),
                "{kt:?} truncated to {len}"
            );
        }
    }
}

#[test]
fn trailing_data_is_refused() {
    let mut der = KeyType::EcdsaP256.ca_der().to_vec();
    der.extend_from_slice(&[0x05, 0x00]);
    assert_eq!(
        Certificate::decode(&der, &provider()),
        Err(Error::MalformedEncoding(EncodingError::TrailingData(
            "certificate"
        )))
    );
}

fn ca_key(kt: KeyType) -> PrivateKey {
    pkcs8::decode(kt.bytes_for("ca.key.der"), &provider()).unwrap()
}

#[test]
fn sign_and_verify_new_certificates() {
    let provider = provider();
    let cases = [
        (KeyType::Rsa2048, SignatureAlgorithm::RsaPkcs1Sha256),
        (KeyType::Rsa2048, SignatureAlgorithm::RsaPkcs1Sha512),
        (KeyType::Rsa2048, SignatureAlgorithm::RsaPssSha256),
        (KeyType::Rsa2048, SignatureAlgorithm::RsaPssSha384),
        (KeyType::EcdsaP256, SignatureAlgorithm::EcdsaSha256),
        (KeyType::EcdsaP256, SignatureAlgorithm::EcdsaSha384),
        (KeyType::EcdsaP384, SignatureAlgorithm::EcdsaSha384),
        (KeyType::EcdsaP384, SignatureAlgorithm::EcdsaSha512),
    ];

    for (kt, algorithm) in cases {
        let ca = decode(kt.ca_der());
        let mut template = decode(kt.end_der());
        template.serial_number = BigInt::from(-42);
        template
            .subject
            .push(NameAttribute::OrganizationalUnitName, "Re-signed");

        let der = template
            .sign(&ca_key(kt), algorithm, &provider)
            .unwrap();
        let signed = decode(&der);

        assert_eq!(signed.signature_algorithm, algorithm);
        assert_eq!(signed.serial_number, BigInt::from(-42));
        assert_eq!(signed.subject, template.subject);
        assert_eq!(signed.issuer, template.issuer);
        assert_eq!(signed.public_key, template.public_key);
        assert_eq!(signed.extensions, template.extensions);
        assert_eq!(signed.valid_from, template.valid_from);
        assert_eq!(signed.valid_to, template.valid_to);

        assert!(signed.verify(&ca.public_key, &provider), "{kt:?} {algorithm}");
        assert!(!signed.verify(&signed.public_key, &provider));
    }
}

#[test]
fn ecdsa_signatures_have_low_s() {
    let provider = provider();
    for (kt, curve, algorithm) in [
        (KeyType::EcdsaP256, NamedCurve::Secp256r1, SignatureAlgorithm::EcdsaSha256),
        (KeyType::EcdsaP384, NamedCurve::Secp384r1, SignatureAlgorithm::EcdsaSha384),
    ] {
        let half_order = curve.parameters().order >> 1u32;
        let template = decode(kt.end_der());
        let key = ca_key(kt);

        for serial in 0..16 {
            let mut cert = template.clone();
            cert.serial_number = BigInt::from(serial);
            let signed = decode(&cert.sign(&key, algorithm, &provider).unwrap());

            let mut rd = Reader::init(&signed.signature);
            let mut sig = rd.read_sequence().unwrap();
            sig.read_unsigned().unwrap();
            let s = sig.read_unsigned().unwrap();
            assert!(s <= half_order, "{kt:?} serial {serial}");
        }
    }
}

#[test]
fn pkcs1_signatures_are_deterministic() {
    let provider = provider();
    let template = decode(KeyType::Rsa2048.end_der());
    let key = ca_key(KeyType::Rsa2048);

    let first = template
        .sign(&key, SignatureAlgorithm::RsaPkcs1Sha256, &provider)
        .unwrap();
    let second = template
        .sign(&key, SignatureAlgorithm::RsaPkcs1Sha256, &provider)
        .unwrap();
    assert_eq!(first, second);
}

#[test]
fn key_and_algorithm_must_agree() {
    let provider = provider();
    let template = decode(KeyType::EcdsaP256.end_der());
    assert!(matches!(
        template.sign(
            &ca_key(KeyType::EcdsaP256),
            SignatureAlgorithm::RsaPkcs1Sha256,
            &provider
        ),
        Err(Error::UnsupportedAlgorithm(_))
    ));
    assert!(matches!(
        template.sign(
            &ca_key(KeyType::Rsa2048),
            SignatureAlgorithm::EcdsaSha256,
            &provider
        ),
        Err(Error::UnsupportedAlgorithm(_))
    ));
}
