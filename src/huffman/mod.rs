//! Huffman coding is a method of encoding where symbols are assigned a code,
//! and more commonly used symbols get shorter codes, and less commonly
//! used symbols get longer codes. Codes are prefix free, meaning no two codes
//! will start with the same sequence of bits.
//!
//! This module holds the pieces shared by compression and decompression: the
//! symbol counts, the tree built from them and the code table derived from the tree.
mod code_table;
mod frequency;
mod tree;

pub use code_table::*;
pub use frequency::*;
pub use tree::*;
