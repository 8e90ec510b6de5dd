#![no_main]
#[macro_use]
extern crate libfuzzer_sys;
extern crate certkit;

use certkit::der::{Reader, Writer};
use certkit::Error;

fn rewrite(rd: &mut Reader<'_>, depth: usize) -> Result<Vec<u8>, Error> {
    let mut w = Writer::new();
    while rd.any_left() {
        let element = rd.read_element()?;
        match element.tag.constructed && depth < 32 {
            true => {
                let content = rewrite(&mut element.reader(), depth + 1)?;
                w.write_element(element.tag, &content);
            }
            false => w.write_element(element.tag, element.content),
        }
    }
    Ok(w.finish())
}

fuzz_target!(|data: &[u8]| {
    // the reader only accepts canonical tags and lengths
    if let Ok(out) = rewrite(&mut Reader::init(data), 0) {
        assert_eq!(out, data);
    }
});
