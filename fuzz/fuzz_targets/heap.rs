#![no_main]
#[macro_use] extern crate libfuzzer_sys;
extern crate rhuff;
use rhuff::BinaryHeap;

// Every byte is an operation: odd bytes insert their value, even bytes extract
fuzz_target!(|data: &[u8]| {
    let mut heap = BinaryHeap::new(64);
    let mut shadow: Vec<u8> = Vec::new();
    for &op in data {
        if op % 2 == 1 {
            match heap.insert(op) {
                Ok(()) => shadow.push(op),
                Err(rejected) => assert_eq!(shadow.len(), rejected.capacity),
            }
        } else {
            shadow.sort_unstable_by(|a, b| b.cmp(a));
            assert_eq!(heap.extract_min(), shadow.pop());
        }
        assert!(heap.satisfies_heap_property());
        assert_eq!(heap.len(), shadow.len());
    }
});
