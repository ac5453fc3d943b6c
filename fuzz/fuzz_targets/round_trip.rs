#![no_main]
#[macro_use] extern crate libfuzzer_sys;
extern crate rhuff;

fuzz_target!(|data: &[u8]| {
    rhuff::round_trip(data);
});
