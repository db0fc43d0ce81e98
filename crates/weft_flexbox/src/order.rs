//! Iteration over flex items in `order` order
use std::collections::BTreeMap;

/// Lowest order value an item can have. The two values below it are kept free so that order
/// values can be used as keys in tables that reserve them as markers.
pub const MIN_ORDER: i32 = i32::MIN + 2;

/// Groups items into buckets keyed by their order value. Buckets are visited in ascending order,
/// items within a bucket in the order they were added.
#[derive(Debug, Default, Clone)]
pub struct OrderIterator {
    buckets: BTreeMap<i32, Vec<usize>>,
}

impl OrderIterator {
    /// Creates the iterator from `(index, order)` pairs given in document order
    pub fn new(items: impl IntoIterator<Item = (usize, i32)>) -> Self {
        let mut buckets: BTreeMap<i32, Vec<usize>> = BTreeMap::new();

        for (index, order) in items {
            buckets.entry(order.max(MIN_ORDER)).or_default().push(index);
        }

        Self { buckets }
    }

    /// Item indices in layout order
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.buckets.values().flatten().copied()
    }

    pub fn len(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buckets_are_stable() {
        let it = OrderIterator::new([(0, 1), (1, 0), (2, 1), (3, -5), (4, 0)]);
        assert_eq!(it.iter().collect::<Vec<_>>(), vec![3, 1, 4, 0, 2]);
        assert_eq!(it.len(), 5);
    }

    #[test]
    fn extreme_orders_are_clamped() {
        let it = OrderIterator::new([(0, MIN_ORDER), (1, i32::MIN), (2, i32::MIN + 1)]);
        assert_eq!(it.iter().collect::<Vec<_>>(), vec![0, 1, 2]);

        let it = OrderIterator::new(std::iter::empty());
        assert!(it.is_empty());
        assert_eq!(it.iter().next(), None);
    }
}
