#![no_main]
#[macro_use]
extern crate libfuzzer_sys;
extern crate certkit;

use certkit::pem::PemFile;

fuzz_target!(|data: &[u8]| {
    if let Ok(pem) = PemFile::load(data) {
        let saved = pem.save();
        assert_eq!(PemFile::load(saved.as_bytes()), Ok(pem));
    }
});
