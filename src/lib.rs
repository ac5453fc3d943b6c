//! A lossless two-pass Huffman compressor.
//!
//! Compression counts every byte of the input, builds a Huffman tree with a
//! min-heap backed priority queue, writes the tree shape and the total symbol
//! count as a header and then re-reads the input to bit-pack every byte with
//! its code. Decompression rebuilds the tree from the header and walks it bit by
//! bit until the recorded number of symbols has been emitted.
//!
//! The entry points are [`compress`] and [`decompress`], which work on any
//! seekable reader and any writer, plus the in-memory and file based helpers
//! built on top of them.
#![deny(trivial_casts, trivial_numeric_casts, rust_2018_idioms)]

pub const VERBOSE: bool = false;

macro_rules! vprintln {
    ($($x:expr),*) => {
        if crate::VERBOSE {
            std::println!($($x),*);
        }
    }
}

pub mod common;
pub mod decoding;
pub mod encoding;
pub mod heap;
pub mod huffman;
pub mod io;
mod tests;

pub use decoding::{
    decompress, decompress_file, decompress_to_vec, read_header, DecompressError,
    DecompressSummary, Header, HeaderError,
};
pub use encoding::{compress, compress_file, compress_to_vec, CompressError, CompressSummary};
pub use heap::{BinaryHeap, PriorityQueue};
pub use huffman::{CodeTable, FrequencyTable, HuffmanNode, HuffmanTree};

/// Compresses `data`, decompresses the result and asserts that nothing changed.
///
/// Inputs whose length collides with the count sentinel are skipped, they can't
/// be represented in the format.
#[cfg(any(test, feature = "fuzz_exports"))]
pub fn round_trip(data: &[u8]) {
    let compressed = match compress_to_vec(data) {
        Ok(compressed) => compressed,
        Err(CompressError::AmbiguousFraming(_)) => return,
        Err(e) => panic!("compression failed: {e}"),
    };
    let decompressed = decompress_to_vec(&compressed).unwrap();
    assert_eq!(data, decompressed.as_slice());
}
