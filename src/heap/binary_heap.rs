use core::cmp::Ordering;
use core::fmt;

/// A fixed capacity, array backed binary min-heap.
///
/// Elements are ordered by the comparator handed to [`BinaryHeap::with_comparator`],
/// the smallest element sits at index 0 and for every index `i` the children at
/// `2i + 1` and `2i + 2` never compare less than their parent.
///
/// The heap owns its elements. Whatever is still stored when the heap is dropped
/// is dropped with it.
///
/// Equal elements are not kept in insertion order. Which of two equal elements
/// comes out first depends on the swaps that happened while sifting.
pub struct BinaryHeap<T, C = fn(&T, &T) -> Ordering> {
    data: Vec<T>,
    capacity: usize,
    compare: C,
}

/// Returned by [`BinaryHeap::insert`] when the heap is already full. Hands the
/// rejected element back to the caller.
#[derive(thiserror::Error)]
#[error("Heap is full, it can hold at most {capacity} elements")]
pub struct CapacityExceeded<T> {
    pub element: T,
    pub capacity: usize,
}

impl<T> fmt::Debug for CapacityExceeded<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CapacityExceeded")
            .field("capacity", &self.capacity)
            .finish_non_exhaustive()
    }
}

impl<T: Ord> BinaryHeap<T> {
    /// Create an empty heap ordered by `T`'s own ordering.
    pub fn new(capacity: usize) -> Self {
        Self::with_comparator(capacity, T::cmp)
    }
}

impl<T, C> BinaryHeap<T, C>
where
    C: Fn(&T, &T) -> Ordering,
{
    /// Create an empty heap that holds at most `capacity` elements.
    ///
    /// A heap with capacity 0 rejects every insert.
    pub fn with_comparator(capacity: usize, compare: C) -> Self {
        BinaryHeap {
            data: Vec::with_capacity(capacity),
            capacity,
            compare,
        }
    }

    /// Append `element` and move it up until its parent is not greater than it.
    pub fn insert(&mut self, element: T) -> Result<(), CapacityExceeded<T>> {
        if self.data.len() == self.capacity {
            return Err(CapacityExceeded {
                element,
                capacity: self.capacity,
            });
        }

        self.data.push(element);
        let mut idx = self.data.len() - 1;
        while idx != 0 {
            let parent = (idx - 1) / 2;
            if (self.compare)(&self.data[parent], &self.data[idx]) != Ordering::Greater {
                break;
            }
            self.data.swap(parent, idx);
            idx = parent;
        }
        Ok(())
    }

    /// Remove and return the smallest element, `None` if the heap is empty.
    pub fn extract_min(&mut self) -> Option<T> {
        match self.data.len() {
            0 => None,
            1 => self.data.pop(),
            _ => {
                // swap_remove moves the last element into the root slot
                let min = self.data.swap_remove(0);
                self.sift_down(0);
                Some(min)
            }
        }
    }

    /// The smallest element without removing it, `None` if the heap is empty.
    pub fn get_min(&self) -> Option<&T> {
        self.data.first()
    }

    #[doc(alias = "size")]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[doc(alias = "empty")]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_full(&self) -> bool {
        self.data.len() == self.capacity
    }

    /// Checks that no element compares less than its parent.
    pub fn satisfies_heap_property(&self) -> bool {
        (1..self.data.len()).all(|idx| {
            let parent = (idx - 1) / 2;
            (self.compare)(&self.data[idx], &self.data[parent]) != Ordering::Less
        })
    }

    /// Restore the heap property below `idx` after the element at `idx` was replaced.
    ///
    /// A left child wins over the current element only if it is strictly smaller, the right
    /// child only if it is strictly smaller than the winner of that first comparison.
    fn sift_down(&mut self, mut idx: usize) {
        let len = self.data.len();
        loop {
            let left = 2 * idx + 1;
            let right = 2 * idx + 2;
            let mut smallest = idx;

            if left < len && (self.compare)(&self.data[left], &self.data[smallest]) == Ordering::Less
            {
                smallest = left;
            }
            if right < len
                && (self.compare)(&self.data[right], &self.data[smallest]) == Ordering::Less
            {
                smallest = right;
            }

            if smallest == idx {
                return;
            }
            self.data.swap(idx, smallest);
            idx = smallest;
        }
    }
}

impl<T: fmt::Debug, C> fmt::Debug for BinaryHeap<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BinaryHeap")
            .field("data", &self.data)
            .field("capacity", &self.capacity)
            .finish()
    }
}
