//! Re-exports of the std values the codec reads and writes through.
pub use std::io::{BufReader, BufWriter, Cursor, Error, ErrorKind, Read, Seek, SeekFrom, Write};
