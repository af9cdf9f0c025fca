//! Reusable item slots for list renderers.
//!
//! # Invariants
//! - Slots are never destroyed while bound data shrinks; surplus slots are
//!   hidden (`None`).
//! - With `Fixed(n)` sizing at most `n` items are shown; the rest are
//!   reported as overflow.
//! - With `FitToData` the slot count always equals the last bound length.

use log::warn;

/// How many slots a pool keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PoolSizing {
    Fixed(usize),
    #[default]
    FitToData,
}

/// Outcome of binding data to a pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BindOutcome {
    pub shown: usize,
    pub hidden: usize,
    pub overflow: usize,
}

/// A pool of item slots reused across data changes.
#[derive(Debug, Clone)]
pub struct ItemPool<T> {
    sizing: PoolSizing,
    slots: Vec<Option<T>>,
}

impl<T: Clone> ItemPool<T> {
    pub fn new(sizing: PoolSizing) -> Self {
        let slots = match sizing {
            PoolSizing::Fixed(capacity) => vec![None; capacity],
            PoolSizing::FitToData => Vec::new(),
        };
        Self { sizing, slots }
    }

    pub fn sizing(&self) -> PoolSizing {
        self.sizing
    }

    /// Binds `items` to slots in order, hiding any surplus slot.
    pub fn bind(&mut self, items: &[T]) -> BindOutcome {
        if self.sizing == PoolSizing::FitToData {
            self.slots.resize(items.len(), None);
        }

        for (index, slot) in self.slots.iter_mut().enumerate() {
            *slot = items.get(index).cloned();
        }

        let shown = items.len().min(self.slots.len());
        let overflow = items.len() - shown;
        if overflow > 0 {
            warn!(
                "event=pool_bind module=view status=overflow capacity={} items={} overflow={}",
                self.slots.len(),
                items.len(),
                overflow
            );
        }

        BindOutcome {
            shown,
            hidden: self.slots.len() - shown,
            overflow,
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Bound item at `index`, `None` when the slot is hidden or absent.
    pub fn slot(&self, index: usize) -> Option<&T> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    pub fn is_visible(&self, index: usize) -> bool {
        self.slot(index).is_some()
    }

    /// Visible items in slot order.
    pub fn visible(&self) -> impl Iterator<Item = &T> {
        self.slots.iter().filter_map(Option::as_ref)
    }
}

#[cfg(test)]
mod tests {
    use super::{BindOutcome, ItemPool, PoolSizing};

    #[test]
    fn fixed_pool_hides_surplus_slots() {
        let mut pool = ItemPool::new(PoolSizing::Fixed(4));
        let outcome = pool.bind(&["a", "b"]);
        assert_eq!(
            outcome,
            BindOutcome {
                shown: 2,
                hidden: 2,
                overflow: 0
            }
        );
        assert!(pool.is_visible(1));
        assert!(!pool.is_visible(2));
        assert_eq!(pool.capacity(), 4);
    }

    #[test]
    fn fixed_pool_reports_overflow() {
        let mut pool = ItemPool::new(PoolSizing::Fixed(2));
        let outcome = pool.bind(&[1, 2, 3]);
        assert_eq!(outcome.shown, 2);
        assert_eq!(outcome.overflow, 1);
        assert_eq!(pool.visible().copied().collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn rebinding_fewer_items_hides_previous_ones() {
        let mut pool = ItemPool::new(PoolSizing::Fixed(3));
        pool.bind(&[1, 2, 3]);
        pool.bind(&[9]);
        assert_eq!(pool.visible().copied().collect::<Vec<_>>(), vec![9]);
        assert_eq!(pool.capacity(), 3);
    }

    #[test]
    fn fit_to_data_tracks_item_count() {
        let mut pool = ItemPool::new(PoolSizing::FitToData);
        assert_eq!(pool.bind(&[1, 2, 3, 4, 5]).overflow, 0);
        assert_eq!(pool.capacity(), 5);
        pool.bind(&[1]);
        assert_eq!(pool.capacity(), 1);
    }
}
