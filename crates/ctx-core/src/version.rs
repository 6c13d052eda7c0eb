//! Ordering predicates for project versions

use std::fmt;

/// A project version drawn from a total order.
///
/// Implemented for every `Ord` type; the core never assumes a numeric or
/// timestamp representation.
pub trait Version: Ord + Clone + fmt::Debug {
    fn is_earlier_than(&self, other: &Self) -> bool {
        self < other
    }

    fn is_later_than(&self, other: &Self) -> bool {
        self > other
    }

    fn is_earlier_than_or_equal_to(&self, other: &Self) -> bool {
        self <= other
    }
}

impl<T: Ord + Clone + fmt::Debug> Version for T {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn predicates_follow_ord() {
        assert!(1u64.is_earlier_than(&2));
        assert!(!2u64.is_earlier_than(&2));
        assert!(3u64.is_later_than(&2));
        assert!(2u64.is_earlier_than_or_equal_to(&2));
        assert!(!3u64.is_earlier_than_or_equal_to(&2));
    }

    #[test]
    fn tuple_versions_compare_lexicographically() {
        assert!((1u32, 9u32).is_earlier_than(&(2, 0)));
    }
}
