//! Contains [`FrequencyTable`], the occurrence count of every byte value
//! in some input.
use crate::common::ALPHABET_SIZE;
use crate::io::{Error, ErrorKind, Read};

/// A dense table of 256 counters, one per byte value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [u64; ALPHABET_SIZE],
}

impl Default for FrequencyTable {
    fn default() -> Self {
        Self::new()
    }
}

impl FrequencyTable {
    pub fn new() -> Self {
        FrequencyTable {
            counts: [0; ALPHABET_SIZE],
        }
    }

    pub fn from_bytes(data: &[u8]) -> Self {
        let mut table = Self::new();
        table.add_bytes(data);
        table
    }

    /// Count every byte `source` yields until it is exhausted.
    pub fn from_reader(mut source: impl Read) -> Result<Self, Error> {
        let mut table = Self::new();
        let mut buf = [0u8; 8 * 1024];
        loop {
            match source.read(&mut buf) {
                Ok(0) => return Ok(table),
                Ok(n) => table.add_bytes(&buf[..n]),
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => return Err(e),
            }
        }
    }

    pub fn add_bytes(&mut self, data: &[u8]) {
        for byte in data {
            self.counts[*byte as usize] += 1;
        }
    }

    pub fn count(&self, symbol: u8) -> u64 {
        self.counts[symbol as usize]
    }

    /// How many byte values occur at least once.
    pub fn distinct_symbols(&self) -> usize {
        self.counts.iter().filter(|count| **count > 0).count()
    }

    /// Sum of all counters.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// `(symbol, count)` for every symbol that occurs, in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|(_, count)| **count > 0)
            .map(|(symbol, count)| (symbol as u8, *count))
    }
}
