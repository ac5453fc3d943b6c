#[cfg(test)]
use rand::{rngs::SmallRng, Rng, SeedableRng};

#[cfg(test)]
fn random_data(rng: &mut SmallRng, len: usize, alphabet: u8) -> Vec<u8> {
    (0..len).map(|_| rng.gen_range(0..alphabet)).collect()
}

#[test]
fn round_trip_edge_cases() {
    crate::round_trip(b"");
    crate::round_trip(b"x");
    crate::round_trip(b"xy");
    crate::round_trip(b"aaaabbbc");
    crate::round_trip(&[0xff; 3]);
    crate::round_trip(&[0x00, 0xff, 0x00, 0xff, 0xff]);
    crate::round_trip(b"Lorem ipsum dolor sit amet, consectetur adipiscing elit");
}

#[test]
fn round_trip_every_byte_value() {
    let data: Vec<u8> = (0..=255u8).cycle().take(256 * 3).collect();
    crate::round_trip(&data);

    // every value once, the tree is as deep and as wide as it gets
    let once: Vec<u8> = (0..=255u8).rev().collect();
    let compressed = crate::compress_to_vec(&once).unwrap();
    let header = crate::read_header(&mut std::io::Cursor::new(&compressed)).unwrap();
    assert_eq!(header.tree.leaf_count(), 256);
    assert_eq!(crate::decompress_to_vec(&compressed).unwrap(), once);
}

#[test]
fn round_trip_random_data() {
    let mut rng = SmallRng::seed_from_u64(0xDEADBEEF);
    for _ in 0..50 {
        let len = rng.gen_range(0..5_000);
        let alphabet = rng.gen_range(1..=255);
        crate::round_trip(&random_data(&mut rng, len, alphabet));
    }
}

#[test]
fn round_trip_skewed_data() {
    // Fibonacci weights give the deepest trees for a given alphabet
    let mut data = Vec::new();
    let (mut a, mut b) = (1usize, 1usize);
    for symbol in 0..20u8 {
        data.extend(std::iter::repeat(symbol).take(a));
        (a, b) = (b, a + b);
    }
    let compressed = crate::compress_to_vec(&data).unwrap();
    let header = crate::read_header(&mut std::io::Cursor::new(&compressed)).unwrap();
    assert_eq!(header.tree.depth(), 19);
    assert_eq!(crate::decompress_to_vec(&compressed).unwrap(), data);
}

#[test]
fn compression_shrinks_redundant_input() {
    let mut rng = SmallRng::seed_from_u64(42);
    let data = random_data(&mut rng, 100_000, 4);
    let compressed = crate::compress_to_vec(&data).unwrap();
    // 4 symbols need at most 2 bits each
    assert!(compressed.len() < data.len() / 4 + 64);
}

#[test]
fn single_symbol_sets_the_flag() {
    let compressed = crate::compress_to_vec(&[b'k'; 1000]).unwrap();
    assert_eq!(compressed[0] >> 7, 1);
    // header only: flag and symbol, 0xFF, 1000 as two bytes, 0xFF
    assert_eq!(compressed, vec![0b1110_1011, 0b0000_0000, 0xff, 0x03, 0xe8, 0xff]);
    assert_eq!(crate::decompress_to_vec(&compressed).unwrap(), vec![b'k'; 1000]);

    let compressed = crate::compress_to_vec(b"kl").unwrap();
    assert_eq!(compressed[0] >> 7, 0);
}

#[test]
fn count_colliding_with_the_sentinel() {
    use crate::common::CountFieldError;
    use crate::CompressError;

    for len in [255usize, 0x1ff, 0xff00] {
        match crate::compress_to_vec(&vec![7u8; len]) {
            Err(CompressError::AmbiguousFraming(CountFieldError::SentinelCollision {
                value,
                ..
            })) => assert_eq!(value, len as u64),
            other => panic!("length {len} should be rejected, got {other:?}"),
        }
    }
    // the neighbours are fine
    crate::round_trip(&[7u8; 254]);
    crate::round_trip(&[7u8; 256]);
}

#[test]
fn corrupt_streams_are_errors() {
    use crate::{decompress_to_vec, DecompressError, HeaderError};

    assert!(matches!(
        decompress_to_vec(&[]),
        Err(DecompressError::Header(HeaderError::EmptyTree))
    ));
    // tree never finishes
    assert!(matches!(
        decompress_to_vec(&[0u8; 4]),
        Err(DecompressError::Header(HeaderError::UnexpectedEnd))
    ));
    assert!(matches!(
        decompress_to_vec(&[0u8; 64]),
        Err(DecompressError::Header(HeaderError::TreeTooDeep))
    ));

    let compressed = crate::compress_to_vec(b"hello world").unwrap();
    let header = crate::read_header(&mut std::io::Cursor::new(&compressed)).unwrap();
    let sentinel_at = header.tree_bytes as usize;

    let mut no_sentinel = compressed.clone();
    no_sentinel[sentinel_at] = 0x00;
    assert!(matches!(
        decompress_to_vec(&no_sentinel),
        Err(DecompressError::Header(HeaderError::MissingSentinel { .. }))
    ));

    let cut_in_count = &compressed[..sentinel_at + 2];
    assert!(matches!(
        decompress_to_vec(cut_in_count),
        Err(DecompressError::Header(HeaderError::UnexpectedEnd))
    ));
}

#[test]
fn truncated_payload_decodes_a_prefix() {
    let mut rng = SmallRng::seed_from_u64(7);
    let data = random_data(&mut rng, 4_000, 30);
    let compressed = crate::compress_to_vec(&data).unwrap();

    let header = crate::read_header(&mut std::io::Cursor::new(&compressed)).unwrap();
    let cut = header.header_bytes as usize + (compressed.len() - header.header_bytes as usize) / 2;

    let mut out = Vec::new();
    let summary = crate::decompress(std::io::Cursor::new(&compressed[..cut]), &mut out).unwrap();
    assert!(summary.stopped_early());
    assert!(!out.is_empty());
    assert_eq!(&data[..out.len()], out.as_slice());
}

#[test]
fn garbage_never_panics() {
    let mut rng = SmallRng::seed_from_u64(0xC0FFEE);
    for _ in 0..500 {
        let len = rng.gen_range(0..64);
        // no 0xFF bytes, so the header can never be complete
        let garbage = random_data(&mut rng, len, 255);
        assert!(crate::decompress_to_vec(&garbage).is_err());
    }
}

#[test]
fn files_round_trip() {
    let dir = std::env::temp_dir().join(format!("rhuff-test-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let plain = dir.join("plain.txt");
    let packed = dir.join("plain.txt.huff");
    let unpacked = dir.join("plain.txt.out");

    let data = b"she sells sea shells by the sea shore".repeat(100);
    std::fs::write(&plain, &data).unwrap();

    let summary = crate::compress_file(&plain, &packed).unwrap();
    assert_eq!(summary.total_symbols, data.len() as u64);
    assert_eq!(
        std::fs::metadata(&packed).unwrap().len(),
        summary.bytes_written
    );

    let summary = crate::decompress_file(&packed, &unpacked).unwrap();
    assert!(!summary.stopped_early());
    assert_eq!(std::fs::read(&unpacked).unwrap(), data);

    std::fs::remove_dir_all(&dir).unwrap();
}
