//! Bounded buffer that drops its oldest entries once full.

use std::collections::VecDeque;
use std::collections::vec_deque;

/// A capacity-limited FIFO log.
///
/// Pushing into a full buffer evicts the oldest element and hands it back,
/// so callers can release anything keyed by it.
#[derive(Clone, Debug)]
pub struct RingBuffer<T> {
    items: VecDeque<T>,
    capacity: usize,
}

impl<T> RingBuffer<T> {
    /// Creates an empty buffer. A zero capacity is raised to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            items: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Appends `item`, returning the evicted oldest element if full.
    pub fn push(&mut self, item: T) -> Option<T> {
        let evicted = if self.items.len() == self.capacity {
            self.items.pop_front()
        } else {
            None
        };
        self.items.push_back(item);
        evicted
    }

    /// Oldest first.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    #[inline]
    pub fn last(&self) -> Option<&T> {
        self.items.back()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Oldest to newest.
    pub fn iter(&self) -> vec_deque::Iter<'_, T> {
        self.items.iter()
    }

    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.items.iter().cloned().collect()
    }
}

impl<'a, T> IntoIterator for &'a RingBuffer<T> {
    type Item = &'a T;
    type IntoIter = vec_deque::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_within_capacity() {
        let mut buf = RingBuffer::new(3);
        assert_eq!(buf.push(1), None);
        assert_eq!(buf.push(2), None);
        assert_eq!(buf.len(), 2);
        assert_eq!(buf.get(0), Some(&1));
        assert_eq!(buf.last(), Some(&2));
    }

    #[test]
    fn test_push_evicts_oldest() {
        let mut buf = RingBuffer::new(2);
        buf.push("a");
        buf.push("b");
        assert_eq!(buf.push("c"), Some("a"));
        assert_eq!(buf.to_vec(), vec!["b", "c"]);
        assert_eq!(buf.len(), buf.capacity());
    }

    #[test]
    fn test_zero_capacity_holds_one() {
        let mut buf = RingBuffer::new(0);
        buf.push(1);
        assert_eq!(buf.push(2), Some(1));
        assert_eq!(buf.to_vec(), vec![2]);
    }

    #[test]
    fn test_clear() {
        let mut buf = RingBuffer::new(4);
        buf.push(1);
        buf.push(2);
        buf.clear();
        assert!(buf.is_empty());
        assert_eq!(buf.push(3), None);
        assert_eq!(buf.to_vec(), vec![3]);
    }

    #[test]
    fn test_iter_order() {
        let mut buf = RingBuffer::new(3);
        for i in 0..5 {
            buf.push(i);
        }
        let seen: Vec<_> = (&buf).into_iter().copied().collect();
        assert_eq!(seen, vec![2, 3, 4]);
    }
}
