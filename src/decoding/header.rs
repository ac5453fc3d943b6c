use super::bit_reader::BitReader;
use crate::common::{count_width, COUNT_WIDTHS, MAX_TREE_DEPTH, SENTINEL};
use crate::huffman::{HuffmanNode, HuffmanTree};
use crate::io::{Error, ErrorKind, Read, Seek};

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum HeaderError {
    #[error(transparent)]
    Io(#[from] Error),
    #[error("Huffman tree is empty, the compressed stream has no content")]
    EmptyTree,
    #[error("Stream ended inside the header")]
    UnexpectedEnd,
    #[error("Huffman tree is deeper than {} levels. Stream is probably corrupted", MAX_TREE_DEPTH)]
    TreeTooDeep,
    #[error("Symbol 0x{symbol:02X} appears twice in the huffman tree. Stream is probably corrupted")]
    DuplicateSymbol { symbol: u8 },
    #[error("Expected the sentinel 0xFF at offset {offset} after the tree, got: {got:?}")]
    MissingSentinel { offset: u64, got: Option<u8> },
    #[error("Symbol count is longer than 8 bytes, the closing sentinel is missing")]
    CountFieldTooLong,
    #[error("Symbol count is {width} bytes long, should be one of {:?}", COUNT_WIDTHS)]
    InvalidCountWidth { width: usize },
    #[error("Symbol count {value} is stored in {width} bytes, which is more than it needs")]
    NonMinimalCount { width: usize, value: u64 },
}

/// Everything the header of a compressed stream says.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    /// The tree rebuilt from its shape. Leaf weights are not stored and read as 0
    pub tree: HuffmanTree,
    /// Bytes taken by the flag, the tree and its padding
    pub tree_bytes: u64,
    /// Number of symbols the payload decodes to
    pub symbol_count: u64,
    /// Bytes taken by the whole header, the payload starts right after it
    pub header_bytes: u64,
}

impl Header {
    /// True if the flag bit marked the tree as a lone leaf.
    pub fn is_single_symbol(&self) -> bool {
        self.tree.is_single_symbol()
    }
}

/// Read the header from the start of `source`.
///
/// This takes two passes over the header: the tree is rebuilt bit by bit, then the
/// source is rewound and scanned again for the sentinel that follows the tree. On
/// success `source` is positioned at the first payload byte.
pub fn read_header<R: Read + Seek>(source: &mut R) -> Result<Header, HeaderError> {
    source.rewind()?;
    let mut bits = BitReader::new(&mut *source);
    let tree = read_tree(&mut bits)?;
    let tree_bytes = bits.bytes_read();
    vprintln!("Rebuilt tree with {} leaves from {} bytes", tree.leaf_count(), tree_bytes);

    source.rewind()?;
    skip_to_sentinel(source, tree_bytes)?;
    let (symbol_count, width) = read_symbol_count(source)?;

    Ok(Header {
        tree,
        tree_bytes,
        symbol_count,
        header_bytes: tree_bytes + 2 + width as u64,
    })
}

/// Rebuild the tree. The first bit is the flag: 1 for a lone leaf whose symbol
/// follows, 0 for an internal root whose children follow.
pub(crate) fn read_tree<R: Read>(bits: &mut BitReader<R>) -> Result<HuffmanTree, HeaderError> {
    let mut reader = TreeReader {
        bits,
        seen: [false; 256],
    };
    let root_is_leaf = reader.bits.read_bit()?.ok_or(HeaderError::EmptyTree)?;
    let root = if root_is_leaf {
        reader.read_leaf()?
    } else {
        reader.read_children(HuffmanNode::internal(None, None), 0)?
    };
    reader.bits.align_to_byte();
    Ok(HuffmanTree::from_root(root))
}

struct TreeReader<'b, R: Read> {
    bits: &'b mut BitReader<R>,
    seen: [bool; 256],
}

impl<R: Read> TreeReader<'_, R> {
    fn read_node(&mut self, depth: usize) -> Result<HuffmanNode, HeaderError> {
        let is_leaf = self.bits.read_bit()?.ok_or(HeaderError::UnexpectedEnd)?;
        if is_leaf {
            self.read_leaf()
        } else {
            self.read_children(HuffmanNode::internal(None, None), depth)
        }
    }

    /// Fill the empty child slots of the internal `node` sitting at `depth`.
    fn read_children(
        &mut self,
        mut node: HuffmanNode,
        depth: usize,
    ) -> Result<HuffmanNode, HeaderError> {
        if depth >= MAX_TREE_DEPTH {
            return Err(HeaderError::TreeTooDeep);
        }
        let left = self.read_node(depth + 1)?;
        node.set_left(left);
        let right = self.read_node(depth + 1)?;
        node.set_right(right);
        Ok(node)
    }

    fn read_leaf(&mut self) -> Result<HuffmanNode, HeaderError> {
        let symbol = self.bits.read_symbol()?.ok_or(HeaderError::UnexpectedEnd)?;
        if std::mem::replace(&mut self.seen[symbol as usize], true) {
            return Err(HeaderError::DuplicateSymbol { symbol });
        }
        Ok(HuffmanNode::leaf(symbol, 0))
    }
}

/// Skip the `tree_bytes` bytes of the tree, then expect the opening sentinel.
fn skip_to_sentinel<R: Read>(source: &mut R, tree_bytes: u64) -> Result<(), HeaderError> {
    let skipped = std::io::copy(&mut source.by_ref().take(tree_bytes), &mut std::io::sink())?;
    if skipped != tree_bytes {
        return Err(HeaderError::UnexpectedEnd);
    }
    match read_byte(source)? {
        Some(SENTINEL) => Ok(()),
        got => Err(HeaderError::MissingSentinel {
            offset: tree_bytes,
            got,
        }),
    }
}

/// Accumulate big-endian bytes until the closing sentinel. Returns the count and the
/// number of bytes it was stored in.
fn read_symbol_count<R: Read>(source: &mut R) -> Result<(u64, usize), HeaderError> {
    let mut value: u64 = 0;
    let mut width = 0;
    loop {
        let byte = read_byte(source)?.ok_or(HeaderError::UnexpectedEnd)?;
        if byte == SENTINEL {
            break;
        }
        if width == 8 {
            return Err(HeaderError::CountFieldTooLong);
        }
        value = (value << 8) | u64::from(byte);
        width += 1;
    }

    if !COUNT_WIDTHS.contains(&width) {
        return Err(HeaderError::InvalidCountWidth { width });
    }
    if count_width(value) != width {
        return Err(HeaderError::NonMinimalCount { width, value });
    }
    Ok((value, width))
}

fn read_byte<R: Read>(source: &mut R) -> Result<Option<u8>, Error> {
    let mut buf = [0u8; 1];
    loop {
        match source.read(&mut buf) {
            Ok(0) => return Ok(None),
            Ok(_) => return Ok(Some(buf[0])),
            Err(e) if e.kind() == ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
}
