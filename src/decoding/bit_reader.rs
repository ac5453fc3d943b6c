use crate::io::{Error, ErrorKind, Read};

/// Reads single bits from a byte oriented source, *most significant bit* first.
///
/// Bytes are pulled from the source one at a time when the previous one is used up,
/// so the source should be buffered.
pub(crate) struct BitReader<R: Read> {
    source: R,
    byte: u8,
    /// Unread bits left in `byte`
    bits_left: u8,
    /// Bytes pulled from the source so far, including a partially read one
    bytes_read: u64,
}

impl<R: Read> BitReader<R> {
    pub fn new(source: R) -> Self {
        BitReader {
            source,
            byte: 0,
            bits_left: 0,
            bytes_read: 0,
        }
    }

    /// The next bit, `None` once the source is exhausted.
    pub fn read_bit(&mut self) -> Result<Option<bool>, Error> {
        if self.bits_left == 0 {
            match self.next_byte()? {
                Some(byte) => {
                    self.byte = byte;
                    self.bits_left = 8;
                }
                None => return Ok(None),
            }
        }
        self.bits_left -= 1;
        Ok(Some((self.byte >> self.bits_left) & 1 == 1))
    }

    /// Reassemble a symbol from 8 bits, the first bit read being the *least significant* one.
    pub fn read_symbol(&mut self) -> Result<Option<u8>, Error> {
        let mut symbol = 0u8;
        for idx in 0..8 {
            match self.read_bit()? {
                Some(bit) => symbol |= u8::from(bit) << idx,
                None => return Ok(None),
            }
        }
        Ok(Some(symbol))
    }

    /// Throw away the unread bits of the current byte.
    pub fn align_to_byte(&mut self) {
        self.bits_left = 0;
    }

    pub fn bytes_read(&self) -> u64 {
        self.bytes_read
    }

    fn next_byte(&mut self) -> Result<Option<u8>, Error> {
        let mut buf = [0u8; 1];
        loop {
            match self.source.read(&mut buf) {
                Ok(0) => return Ok(None),
                Ok(_) => {
                    self.bytes_read += 1;
                    return Ok(Some(buf[0]));
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => return Err(e),
            }
        }
    }
}
