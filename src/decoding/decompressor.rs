//! The decompression pipeline, from header and packed payload back to the raw bytes.
use super::bit_reader::BitReader;
use super::header::{read_header, HeaderError};
use crate::huffman::HuffmanNode;
use crate::io::{BufReader, BufWriter, Cursor, Error, Read, Seek, Write};
use std::fs::File;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum DecompressError {
    #[error(transparent)]
    Io(#[from] Error),
    #[error("Failed to read the header: {0}")]
    Header(#[from] HeaderError),
    #[error("Huffman tree has an internal node with a missing child")]
    IncompleteTree,
}

/// What a call to [`decompress`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecompressSummary {
    /// The symbol count the header promised
    pub expected_symbols: u64,
    /// Symbols actually written to the output
    pub decoded_symbols: u64,
}

impl DecompressSummary {
    /// True if the payload ran out before the promised number of symbols was decoded.
    pub fn stopped_early(&self) -> bool {
        self.decoded_symbols < self.expected_symbols
    }
}

const OUTPUT_CHUNK: usize = 8 * 1024;

/// Decompress the stream `input` holds from its start and write the result to `output`.
///
/// Decoding stops once the symbol count from the header has been reached, so the padding
/// bits at the end of the payload are never interpreted. A payload that ends too soon is
/// not an error: everything decoded up to that point is written and the returned summary
/// reports the shortfall.
pub fn decompress<R: Read + Seek, W: Write>(
    input: R,
    output: W,
) -> Result<DecompressSummary, DecompressError> {
    let mut source = BufReader::new(input);
    let header = read_header(&mut source)?;
    vprintln!(
        "Header: {} bytes, {} symbols to decode",
        header.header_bytes,
        header.symbol_count
    );

    let mut sink = BufWriter::new(output);
    let root = header.tree.root();
    let decoded_symbols = match root {
        HuffmanNode::Leaf { symbol, .. } => {
            repeat_symbol(&mut sink, *symbol, header.symbol_count)?
        }
        HuffmanNode::Internal { .. } => {
            decode_payload(&mut source, &mut sink, root, header.symbol_count)?
        }
    };
    sink.flush()?;

    if decoded_symbols < header.symbol_count {
        vprintln!(
            "Payload ended after {} of {} symbols",
            decoded_symbols,
            header.symbol_count
        );
    }

    Ok(DecompressSummary {
        expected_symbols: header.symbol_count,
        decoded_symbols,
    })
}

/// A lone leaf has an empty code, the payload carries nothing and the symbol is
/// simply repeated.
fn repeat_symbol<W: Write>(sink: &mut W, symbol: u8, count: u64) -> Result<u64, Error> {
    let chunk = [symbol; OUTPUT_CHUNK];
    let mut left = count;
    while left > 0 {
        let n = left.min(OUTPUT_CHUNK as u64) as usize;
        sink.write_all(&chunk[..n])?;
        left -= n as u64;
    }
    Ok(count)
}

/// Walk the tree from `root`, one payload bit per step, emitting a symbol and starting
/// over at every leaf.
fn decode_payload<R: Read, W: Write>(
    source: R,
    sink: &mut W,
    root: &HuffmanNode,
    count: u64,
) -> Result<u64, DecompressError> {
    let mut bits = BitReader::new(source);
    let mut buf = Vec::with_capacity(OUTPUT_CHUNK);
    let mut decoded: u64 = 0;
    let mut node = root;

    while decoded < count {
        let Some(bit) = bits.read_bit()? else {
            break;
        };
        node = node.child(bit).ok_or(DecompressError::IncompleteTree)?;
        if let HuffmanNode::Leaf { symbol, .. } = node {
            buf.push(*symbol);
            decoded += 1;
            node = root;
            if buf.len() == OUTPUT_CHUNK {
                sink.write_all(&buf)?;
                buf.clear();
            }
        }
    }
    sink.write_all(&buf)?;
    Ok(decoded)
}

/// Decompress `data` into a new buffer.
///
/// A payload that ends early yields the symbols decoded so far, use [`decompress`] to
/// find out whether that happened.
pub fn decompress_to_vec(data: &[u8]) -> Result<Vec<u8>, DecompressError> {
    let mut output = Vec::new();
    decompress(Cursor::new(data), &mut output)?;
    Ok(output)
}

/// Decompress the file at `input` into a newly created (or truncated) file at `output`.
pub fn decompress_file(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
) -> Result<DecompressSummary, DecompressError> {
    let source = File::open(input)?;
    let target = File::create(output)?;
    decompress(source, target)
}
