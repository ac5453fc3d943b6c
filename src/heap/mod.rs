//! A binary min-heap with a fixed capacity and the priority queue the tree
//! builder uses on top of it.
//!
//! Both containers own their elements and order them with a comparator chosen at
//! construction time. Elements left in a container are dropped with it.
mod binary_heap;
mod priority_queue;

pub use binary_heap::*;
pub use priority_queue::*;
