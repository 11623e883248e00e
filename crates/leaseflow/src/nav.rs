//! Bounded navigation history.
//!
//! The marketplace UI keeps a stack of visited pages so back-navigation and
//! "where did I come from" checks work without a framework router. This is
//! the framework-independent core: a plain array-backed stack with a fixed
//! capacity that evicts its oldest entry instead of growing without bound.

/// Fixed-capacity stack; pushing onto a full stack drops the bottom entry.
#[derive(Debug, Clone)]
pub struct BoundedStack<T> {
    entries: Vec<T>,
    capacity: usize,
}

impl<T> BoundedStack<T> {
    /// Capacity must be at least 1.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity.max(1)),
            capacity: capacity.max(1),
        }
    }

    pub fn push(&mut self, entry: T) {
        if self.entries.len() == self.capacity {
            self.entries.remove(0);
        }
        self.entries.push(entry);
    }

    pub fn pop(&mut self) -> Option<T> {
        self.entries.pop()
    }

    pub fn peek(&self) -> Option<&T> {
        self.entries.last()
    }

    /// The entry just below the top; the page the user navigated from.
    pub fn peek_second(&self) -> Option<&T> {
        self.entries.len().checked_sub(2).map(|i| &self.entries[i])
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
