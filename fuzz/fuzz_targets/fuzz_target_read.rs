#![no_main]
use bmp_console::{Bmp, Glyphs};
use libfuzzer_sys::fuzz_target;
use std::io::Cursor;

fuzz_target!(|data: &[u8]| {
    if let Ok(bmp) = Bmp::read(Cursor::new(data)) {
        let _ = bmp.render(Glyphs::BLOCK, std::io::sink());
    }
});
