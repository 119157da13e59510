//! Min-heap entry for Prim's algorithm.

use std::cmp::Ordering;

/// A weighted entry that makes [`std::collections::BinaryHeap`] pop the
/// smallest weight first, then the smallest key.
#[derive(Debug, Clone, Copy)]
pub(crate) struct MinEntry<K> {
    pub weight: f64,
    pub key: K,
}

impl<K> MinEntry<K> {
    pub fn new(weight: f64, key: K) -> Self {
        Self { weight, key }
    }
}

impl<K: Ord> Ord for MinEntry<K> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: BinaryHeap is a max-heap
        other
            .weight
            .total_cmp(&self.weight)
            .then_with(|| other.key.cmp(&self.key))
    }
}

impl<K: Ord> PartialOrd for MinEntry<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K: Ord> PartialEq for MinEntry<K> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<K: Ord> Eq for MinEntry<K> {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BinaryHeap;

    #[test]
    fn test_pops_smallest_weight_then_key() {
        let mut heap = BinaryHeap::new();
        heap.push(MinEntry::new(2.0, 1));
        heap.push(MinEntry::new(1.0, 7));
        heap.push(MinEntry::new(1.0, 3));
        heap.push(MinEntry::new(0.5, 9));

        let order: Vec<(f64, usize)> = std::iter::from_fn(|| heap.pop())
            .map(|e| (e.weight, e.key))
            .collect();
        assert_eq!(order, vec![(0.5, 9), (1.0, 3), (1.0, 7), (2.0, 1)]);
    }

    #[test]
    fn test_tuple_keys() {
        let mut heap = BinaryHeap::new();
        heap.push(MinEntry::new(1.0, (2, 0)));
        heap.push(MinEntry::new(1.0, (1, 5)));
        assert_eq!(heap.pop().map(|e| e.key), Some((1, 5)));
    }
}
