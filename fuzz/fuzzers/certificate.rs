#![no_main]
#[macro_use]
extern crate libfuzzer_sys;
extern crate certkit;

use certkit::x509::Certificate;

fuzz_target!(|data: &[u8]| {
    let provider = certkit_rustcrypto::provider();
    if let Ok(cert) = Certificate::decode(data, &provider) {
        let _ = cert.verify(&cert.public_key, &provider);
        let tbs = cert.to_tbs_der(cert.signature_algorithm);
        assert!(!tbs.is_empty());
    }
});
