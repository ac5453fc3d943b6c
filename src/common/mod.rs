//! Values and interfaces shared between the encoding side
//! and the decoding side.

// --- ALPHABET ---
/// Every byte value is a symbol.
pub const ALPHABET_SIZE: usize = 256;

// --- HEADER ---
/// Delimits the end of the serialized tree and the end of the symbol count.
pub const SENTINEL: u8 = 0xFF;
/// A tree over at most 256 leaves can't be deeper than this.
pub const MAX_TREE_DEPTH: usize = ALPHABET_SIZE - 1;
/// The symbol count is stored using one of these widths, in bytes.
pub const COUNT_WIDTHS: [usize; 4] = [1, 2, 4, 8];

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum CountFieldError {
    #[error("Symbol count {value} is encoded as {bytes:02X?} which contains the sentinel byte 0xFF, the count field would be ambiguous")]
    SentinelCollision { value: u64, bytes: Vec<u8> },
}

/// Returns the number of bytes used to store `val` in the count field, as
/// either 1, 2, 4 or 8 bytes.
///
/// The thresholds are exclusive, so `0xFF` already takes two bytes.
pub fn count_width(val: u64) -> usize {
    if val < 0xFF {
        1
    } else if val < 0xFFFF {
        2
    } else if val < 0xFFFF_FFFF {
        4
    } else {
        8
    }
}

/// Returns `val` as a **big-endian** byte sequence of width [`count_width`].
///
/// Fails when one of those bytes is the sentinel, since the decoder stops at the
/// first sentinel it sees.
pub fn encode_symbol_count(val: u64) -> Result<Vec<u8>, CountFieldError> {
    let width = count_width(val);
    let bytes = val.to_be_bytes()[8 - width..].to_vec();
    if bytes.contains(&SENTINEL) {
        return Err(CountFieldError::SentinelCollision { value: val, bytes });
    }
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::{count_width, encode_symbol_count, CountFieldError};

    #[test]
    fn width_detection() {
        assert_eq!(count_width(0), 1);
        assert_eq!(count_width(0xfe), 1);
        assert_eq!(count_width(0xff), 2);
        assert_eq!(count_width(0xff_fe), 2);
        assert_eq!(count_width(0xff_ff), 4);
        assert_eq!(count_width(0xffff_fffe), 4);
        assert_eq!(count_width(0xffff_ffff), 8);
        assert_eq!(count_width(u64::MAX), 8);
    }

    #[test]
    fn bytes_are_big_endian() {
        assert_eq!(encode_symbol_count(0).unwrap(), vec![0]);
        assert_eq!(encode_symbol_count(8).unwrap(), vec![8]);
        assert_eq!(encode_symbol_count(0x1234).unwrap(), vec![0x12, 0x34]);
        assert_eq!(
            encode_symbol_count(0x0001_0000).unwrap(),
            vec![0x00, 0x01, 0x00, 0x00]
        );
        assert_eq!(
            encode_symbol_count(0x0102_0304_0506).unwrap(),
            vec![0x00, 0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06]
        );
    }

    #[test]
    fn sentinel_collisions_are_reported() {
        assert_eq!(
            encode_symbol_count(0xff),
            Err(CountFieldError::SentinelCollision {
                value: 0xff,
                bytes: vec![0x00, 0xff]
            })
        );
        assert!(encode_symbol_count(0x01ff).is_err());
        assert!(encode_symbol_count(0xff00).is_err());
        assert!(encode_symbol_count(0x0100).is_ok());
    }
}
