use super::binary_heap::{BinaryHeap, CapacityExceeded};
use core::cmp::Ordering;

/// A capacity bounded min-priority queue backed by a [`BinaryHeap`].
///
/// Size the queue up front for everything it will ever hold at once, inserts into a
/// full queue are rejected.
pub struct PriorityQueue<T, C = fn(&T, &T) -> Ordering> {
    heap: BinaryHeap<T, C>,
}

impl<T: Ord> PriorityQueue<T> {
    pub fn new(capacity: usize) -> Self {
        PriorityQueue {
            heap: BinaryHeap::new(capacity),
        }
    }
}

impl<T, C> PriorityQueue<T, C>
where
    C: Fn(&T, &T) -> Ordering,
{
    pub fn with_comparator(capacity: usize, compare: C) -> Self {
        PriorityQueue {
            heap: BinaryHeap::with_comparator(capacity, compare),
        }
    }

    pub fn insert(&mut self, element: T) -> Result<(), CapacityExceeded<T>> {
        self.heap.insert(element)
    }

    pub fn extract_min(&mut self) -> Option<T> {
        self.heap.extract_min()
    }

    pub fn peek_min(&self) -> Option<&T> {
        self.heap.get_min()
    }

    #[doc(alias = "size")]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    #[doc(alias = "empty")]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.heap.capacity()
    }

    pub fn heap(&self) -> &BinaryHeap<T, C> {
        &self.heap
    }
}
