//! Writes the header that precedes the payload: the tree shape and the total
//! symbol count.
//!
//! ```text
//! | flag | tree bits | 0 padding | 0xFF | count (1/2/4/8 bytes, BE) | 0xFF |
//! ```
//!
//! The flag is 1 if the root is a leaf. For such a tree the flag is followed by the
//! leaf's symbol, otherwise every child of every internal node is written left before
//! right: a 1 bit and 8 symbol bits for a leaf, a 0 bit and its own children for an
//! internal node.
use super::bit_writer::BitWriter;
use super::CompressError;
use crate::common::SENTINEL;
use crate::huffman::{HuffmanNode, HuffmanTree};
use crate::io::Write;

/// Write the flag and the tree shape, then pad to the next byte boundary.
pub(crate) fn write_tree<W: Write>(
    writer: &mut BitWriter<W>,
    tree: &HuffmanTree,
) -> Result<(), CompressError> {
    let root = tree.root();
    match root {
        HuffmanNode::Leaf { symbol, .. } => {
            writer.write_bit(true)?;
            writer.write_symbol(*symbol)?;
        }
        HuffmanNode::Internal { .. } => {
            writer.write_bit(false)?;
            write_children(writer, root)?;
        }
    }
    writer.pad_to_byte()?;
    Ok(())
}

fn write_children<W: Write>(
    writer: &mut BitWriter<W>,
    node: &HuffmanNode,
) -> Result<(), CompressError> {
    for child in [node.left(), node.right()] {
        match child {
            Some(HuffmanNode::Leaf { symbol, .. }) => {
                writer.write_bit(true)?;
                writer.write_symbol(*symbol)?;
            }
            Some(internal) => {
                writer.write_bit(false)?;
                write_children(writer, internal)?;
            }
            None => return Err(CompressError::IncompleteTree),
        }
    }
    Ok(())
}

/// Write the already encoded symbol count between two sentinels.
pub(crate) fn write_symbol_count<W: Write>(
    writer: &mut BitWriter<W>,
    count_bytes: &[u8],
) -> Result<(), CompressError> {
    writer.write_bytes(&[SENTINEL])?;
    writer.write_bytes(count_bytes)?;
    writer.write_bytes(&[SENTINEL])?;
    Ok(())
}
