#![no_main]
use bmp_console::fuzz::BmpAndDepth;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: BmpAndDepth| {
    data.round_trip();
});
