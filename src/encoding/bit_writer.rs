use crate::io::{Error, Write};

/// An interface for writing single bits into a byte oriented sink.
///
/// Bits are packed starting at the *most significant position* of each byte.
/// Completed bytes are handed to the sink right away, the byte that is still
/// being filled lives in the writer until it is completed or padded.
pub(crate) struct BitWriter<W: Write> {
    output: W,
    /// The byte currently being filled, bits are shifted in from the right
    byte: u8,
    /// How many bits of `byte` are occupied, always 0..=7
    bits_count: u8,
    /// Completed bytes handed to `output` so far
    bytes_written: u64,
}

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum BitWriterError {
    #[error("Can't write a whole byte, the writer holds {bits} bits of an unfinished byte")]
    NotByteAligned { bits: u8 },
    #[error(transparent)]
    Io(#[from] Error),
}

impl<W: Write> BitWriter<W> {
    /// Initialize a new writer. Write new bits with `write_bit`, and
    /// obtain the sink back using `finish`
    pub fn new(output: W) -> Self {
        Self {
            output,
            byte: 0,
            bits_count: 0,
            bytes_written: 0,
        }
    }

    pub fn write_bit(&mut self, bit: bool) -> Result<(), Error> {
        self.byte = (self.byte << 1) | u8::from(bit);
        self.bits_count += 1;
        if self.bits_count == 8 {
            self.output.write_all(&[self.byte])?;
            self.bytes_written += 1;
            self.byte = 0;
            self.bits_count = 0;
        }
        Ok(())
    }

    /// Write every bit of `bits` in order.
    pub fn write_bits(&mut self, bits: &[bool]) -> Result<(), Error> {
        for bit in bits {
            self.write_bit(*bit)?;
        }
        Ok(())
    }

    /// Write the 8 bits of `symbol` starting with the *least significant* one.
    pub fn write_symbol(&mut self, symbol: u8) -> Result<(), Error> {
        for idx in 0..8 {
            self.write_bit((symbol >> idx) & 1 == 1)?;
        }
        Ok(())
    }

    /// Fill the current byte with 0 bits. Does nothing if the writer is byte aligned.
    pub fn pad_to_byte(&mut self) -> Result<(), Error> {
        while self.bits_count != 0 {
            self.write_bit(false)?;
        }
        Ok(())
    }

    /// Write whole bytes. Only allowed on a byte boundary.
    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), BitWriterError> {
        if self.bits_count != 0 {
            return Err(BitWriterError::NotByteAligned {
                bits: self.bits_count,
            });
        }
        self.output.write_all(bytes)?;
        self.bytes_written += bytes.len() as u64;
        Ok(())
    }

    pub fn is_byte_aligned(&self) -> bool {
        self.bits_count == 0
    }

    /// Number of bytes handed to the sink, not counting the unfinished byte.
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    /// Pad the last byte, flush and return the sink.
    ///
    /// This function consumes the writer, so it cannot be used after
    /// finishing
    pub fn finish(mut self) -> Result<W, Error> {
        self.pad_to_byte()?;
        self.output.flush()?;
        Ok(self.output)
    }
}
