#![no_main]
#[macro_use] extern crate libfuzzer_sys;
extern crate rhuff;
use std::io::{Cursor, Write};

/// Discards everything but gives up after a fixed amount, a forged header can claim
/// up to 2^64 symbols.
struct Capped(usize);

impl Write for Capped {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        if self.0 < buf.len() {
            return Err(std::io::ErrorKind::WriteZero.into());
        }
        self.0 -= buf.len();
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

fuzz_target!(|data: &[u8]| {
    let _ = rhuff::decompress(Cursor::new(data), Capped(1 << 20));
});
