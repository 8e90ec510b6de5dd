#![no_main]
#[macro_use]
extern crate libfuzzer_sys;
extern crate certkit;

use certkit::pkcs12::Pkcs12Container;

fuzz_target!(|data: &[u8]| {
    let provider = certkit_rustcrypto::provider();
    let _ = Pkcs12Container::load(data, "password", &provider);
});
