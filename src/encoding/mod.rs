//! Structures and utilities used for compressing data into the Huffman format.
pub(crate) mod bit_writer;
mod compressor;
pub(crate) mod header;

pub use bit_writer::BitWriterError;
pub use compressor::*;
