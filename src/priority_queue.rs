use crate::error::{Error, Result};
use std::cmp::Ordering;
use std::collections::BinaryHeap;

struct QueueEntry<T> {
    priority: i32,
    sequence: u64,
    item: T,
}

impl<T> Eq for QueueEntry<T> {}

impl<T> PartialEq for QueueEntry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.priority == other.priority && self.sequence == other.sequence
    }
}

impl<T> PartialOrd for QueueEntry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for QueueEntry<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap: the smallest priority has to compare greatest,
        // and among equal priorities the earliest insertion wins.
        match other.priority.cmp(&self.priority) {
            Ordering::Equal => other.sequence.cmp(&self.sequence),
            s => s,
        }
    }
}

/// Min-priority queue with FIFO ordering among equal priorities.
///
/// There is no decrease-key: the search re-enqueues a cell whenever its cost improves,
/// so the same item may be present several times.
pub struct PriorityQueue<T> {
    heap: BinaryHeap<QueueEntry<T>>,
    next_sequence: u64,
}

impl<T> Default for PriorityQueue<T> {
    fn default() -> Self {
        PriorityQueue {
            heap: BinaryHeap::new(),
            next_sequence: 0,
        }
    }
}

impl<T> PriorityQueue<T> {
    pub fn new() -> PriorityQueue<T> {
        PriorityQueue::default()
    }

    pub fn enqueue(&mut self, item: T, priority: i32) {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.heap.push(QueueEntry {
            priority,
            sequence,
            item,
        });
    }

    /// Removes the item with the lowest priority value.
    pub fn dequeue(&mut self) -> Result<T> {
        self.heap
            .pop()
            .map(|entry| entry.item)
            .ok_or(Error::EmptyQueue)
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowest_priority_first() {
        let mut queue = PriorityQueue::new();
        queue.enqueue('c', 7);
        queue.enqueue('a', -2);
        queue.enqueue('b', 3);
        assert_eq!(queue.len(), 3);
        assert_eq!(queue.dequeue(), Ok('a'));
        assert_eq!(queue.dequeue(), Ok('b'));
        assert_eq!(queue.dequeue(), Ok('c'));
        assert!(queue.is_empty());
    }

    /// Equal priorities must come out in insertion order so searches stay reproducible.
    #[test]
    fn equal_priorities_are_fifo() {
        let mut queue = PriorityQueue::new();
        queue.enqueue("first", 4);
        queue.enqueue("low", 1);
        queue.enqueue("second", 4);
        queue.enqueue("low again", 1);
        queue.enqueue("third", 4);
        let order: Vec<_> = std::iter::from_fn(|| queue.dequeue().ok()).collect();
        assert_eq!(order, vec!["low", "low again", "first", "second", "third"]);
    }

    #[test]
    fn duplicates_are_kept() {
        let mut queue = PriorityQueue::new();
        queue.enqueue(5, 3);
        queue.enqueue(5, 1);
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.dequeue(), Ok(5));
        assert_eq!(queue.dequeue(), Ok(5));
    }

    #[test]
    fn dequeue_empty_fails() {
        let mut queue: PriorityQueue<u8> = PriorityQueue::new();
        assert_eq!(queue.dequeue(), Err(Error::EmptyQueue));
        queue.enqueue(1, 0);
        assert!(queue.dequeue().is_ok());
        assert_eq!(queue.dequeue(), Err(Error::EmptyQueue));
    }
}
