//! Structures and utilities used for decoding Huffman formatted data

pub(crate) mod bit_reader;
mod decompressor;
mod header;

pub use decompressor::*;
pub use header::*;
