#![no_main]
#[macro_use]
extern crate libfuzzer_sys;
extern crate certkit;

use certkit::pkcs8;

fuzz_target!(|data: &[u8]| {
    let provider = certkit_rustcrypto::provider();
    if let Ok(key) = pkcs8::decode(data, &provider) {
        let der = pkcs8::encode(&key);
        assert_eq!(pkcs8::decode(der.secret_pkcs8_der(), &provider), Ok(key));
    }
    let _ = pkcs8::decode_encrypted(data, "password", &provider);
});
