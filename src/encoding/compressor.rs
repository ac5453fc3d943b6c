//! The compression pipeline, from raw input bytes to header and packed payload.
use super::bit_writer::{BitWriter, BitWriterError};
use super::header;
use crate::common::{encode_symbol_count, CountFieldError};
use crate::huffman::{FrequencyTable, HuffmanNode, HuffmanTree, TreeBuildError};
use crate::io::{BufReader, BufWriter, Cursor, Error, ErrorKind, Read, Seek, Write};
use std::fs::File;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum CompressError {
    #[error(transparent)]
    Io(#[from] Error),
    #[error(transparent)]
    BitWriterError(#[from] BitWriterError),
    #[error(transparent)]
    TreeBuildError(#[from] TreeBuildError),
    #[error("Can't frame the symbol count: {0}")]
    AmbiguousFraming(#[source] CountFieldError),
    #[error("Huffman tree has an internal node with a missing child")]
    IncompleteTree,
    #[error("Input changed between passes, symbol 0x{symbol:02X} was not counted")]
    UnknownSymbol { symbol: u8 },
    #[error("Input changed between passes, counted {expected} symbols but encoded {got}")]
    SymbolCountChanged { expected: u64, got: u64 },
}

/// What a call to [`compress`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompressSummary {
    /// Number of input bytes, which is also the count stored in the header
    pub total_symbols: u64,
    /// Number of different byte values in the input
    pub distinct_symbols: usize,
    /// Size of the header including both sentinels and the count
    pub header_bytes: u64,
    /// Size of the whole compressed output
    pub bytes_written: u64,
}

/// Compress everything `input` holds from its start and write the result to `output`.
///
/// The input is read twice: once to count the symbols and once, after the tree and the
/// code table exist, to encode them. Both passes rewind to the start first.
///
/// Inputs whose length can't be stored unambiguously between the count sentinels are
/// rejected with [`CompressError::AmbiguousFraming`] before anything is written.
pub fn compress<R: Read + Seek, W: Write>(
    input: R,
    output: W,
) -> Result<CompressSummary, CompressError> {
    let mut source = BufReader::new(input);

    source.rewind()?;
    let frequencies = FrequencyTable::from_reader(&mut source)?;
    source.rewind()?;
    let distinct_symbols = frequencies.distinct_symbols();
    vprintln!("Counted {} distinct symbols", distinct_symbols);

    let tree = match HuffmanTree::build(&frequencies) {
        Ok(tree) => tree,
        // Nothing to encode. Store a lone leaf so the header still describes a tree,
        // the count of 0 keeps the decoder from ever emitting its symbol
        Err(TreeBuildError::EmptyAlphabet) => HuffmanTree::from_root(HuffmanNode::leaf(0, 0)),
        Err(e) => return Err(e.into()),
    };
    let total_symbols = tree.total_symbols();
    let count_bytes = encode_symbol_count(total_symbols).map_err(CompressError::AmbiguousFraming)?;

    let mut writer = BitWriter::new(BufWriter::new(output));
    header::write_tree(&mut writer, &tree)?;
    header::write_symbol_count(&mut writer, &count_bytes)?;
    let header_bytes = writer.bytes_written();
    vprintln!("Wrote header of {} bytes", header_bytes);

    let table = tree.code_table();
    drop(tree);

    let mut encoded: u64 = 0;
    let mut buf = [0u8; 8 * 1024];
    loop {
        let n = match source.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };
        for symbol in &buf[..n] {
            let code = table
                .code(*symbol)
                .ok_or(CompressError::UnknownSymbol { symbol: *symbol })?;
            writer.write_bits(code)?;
        }
        encoded += n as u64;
    }
    if encoded != total_symbols {
        return Err(CompressError::SymbolCountChanged {
            expected: total_symbols,
            got: encoded,
        });
    }

    let bytes_written = writer.bytes_written() + u64::from(!writer.is_byte_aligned());
    writer.finish()?;

    Ok(CompressSummary {
        total_symbols,
        distinct_symbols,
        header_bytes,
        bytes_written,
    })
}

/// Compress `data` into a new buffer.
pub fn compress_to_vec(data: &[u8]) -> Result<Vec<u8>, CompressError> {
    let mut output = Vec::new();
    compress(Cursor::new(data), &mut output)?;
    Ok(output)
}

/// Compress the file at `input` into a newly created (or truncated) file at `output`.
pub fn compress_file(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
) -> Result<CompressSummary, CompressError> {
    let source = File::open(input)?;
    let target = File::create(output)?;
    compress(source, target)
}

#[cfg(test)]
mod tests {
    use super::{compress, compress_to_vec, CompressError};
    use crate::common::CountFieldError;
    use std::io::Cursor;

    #[test]
    fn empty_input_has_a_degenerate_header() {
        let compressed = compress_to_vec(&[]).unwrap();
        // flag 1, symbol 0x00, padding | 0xFF | 0 | 0xFF
        assert_eq!(compressed, vec![0b1000_0000, 0x00, 0xff, 0x00, 0xff]);
    }

    #[test]
    fn single_symbol_has_no_payload() {
        let compressed = compress_to_vec(b"aaaaaaa").unwrap();
        assert_eq!(compressed, vec![0b1100_0011, 0x00, 0xff, 7, 0xff]);
    }

    #[test]
    fn summary_adds_up() {
        let data = b"aaaabbbc";
        let mut out = Vec::new();
        let summary = compress(Cursor::new(&data[..]), &mut out).unwrap();
        assert_eq!(summary.total_symbols, 8);
        assert_eq!(summary.distinct_symbols, 3);
        // 29 tree bits -> 4 bytes, then 0xFF 8 0xFF
        assert_eq!(summary.header_bytes, 7);
        assert_eq!(&out[4..7], &[0xff, 8, 0xff]);
        // a: 1 bit, b and c: 2 bits -> 4 + 6 + 2 = 12 bits -> 2 bytes
        assert_eq!(summary.bytes_written, 9);
        assert_eq!(out.len() as u64, summary.bytes_written);
    }

    #[test]
    fn input_is_read_from_the_start() {
        let mut input = Cursor::new(b"xyzxyz".to_vec());
        input.set_position(4);
        let from_middle = {
            let mut out = Vec::new();
            compress(&mut input, &mut out).unwrap();
            out
        };
        assert_eq!(from_middle, compress_to_vec(b"xyzxyz").unwrap());
    }

    #[test]
    fn colliding_length_is_rejected() {
        let data = vec![b'q'; 255];
        let mut out = Vec::new();
        match compress(Cursor::new(&data), &mut out) {
            Err(CompressError::AmbiguousFraming(CountFieldError::SentinelCollision {
                value,
                ..
            })) => assert_eq!(value, 255),
            other => panic!("unexpected result: {other:?}"),
        }
        assert!(out.is_empty(), "nothing must be written");
    }
}
