//! Set-valued control over a fixed catalog.

use std::collections::BTreeSet;

/// Membership set where each toggle flips one item in or out.
///
/// Backed by a `BTreeSet`, so iteration follows the item type's ordering
/// regardless of the order items were toggled in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleSet<T: Ord> {
    selected: BTreeSet<T>,
}

impl<T: Ord> Default for ToggleSet<T> {
    fn default() -> Self {
        Self {
            selected: BTreeSet::new(),
        }
    }
}

impl<T: Ord + Copy> ToggleSet<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove `item` if present, insert it otherwise.
    pub fn toggle(&mut self, item: T) {
        if !self.selected.remove(&item) {
            self.selected.insert(item);
        }
    }

    pub fn contains(&self, item: T) -> bool {
        self.selected.contains(&item)
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = T> + '_ {
        self.selected.iter().copied()
    }
}

impl<T: Ord + Copy> FromIterator<T> for ToggleSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            selected: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_adds_then_removes() {
        let mut set = ToggleSet::new();
        assert!(set.is_empty());

        set.toggle(3);
        set.toggle(1);
        assert!(set.contains(3));
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![1, 3]);

        set.toggle(3);
        assert!(!set.contains(3));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn order_of_toggles_is_irrelevant() {
        let a: ToggleSet<u8> = [2, 0, 1].into_iter().collect();
        let mut b = ToggleSet::new();
        b.toggle(1);
        b.toggle(2);
        b.toggle(0);
        assert_eq!(a, b);
    }
}
