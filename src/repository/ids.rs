//! Per-kind identifier allocation

use serde::{Deserialize, Serialize};

/// Hands out increasing IDs for one entity kind. IDs are never reused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdAllocator {
    next: i32,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    /// Return the current value and advance the counter.
    ///
    /// `None` once the ID space is exhausted; `i32::MAX` is never handed out.
    pub fn allocate(&mut self) -> Option<i32> {
        let id = self.next;
        self.next = id.checked_add(1)?;
        Some(id)
    }

    /// The ID the next call to `allocate` will return
    pub fn peek(&self) -> i32 {
        self.next
    }

    pub fn restore(&mut self, next: i32) {
        self.next = next;
    }

    /// Build an allocator that cannot collide with any of `existing`,
    /// honouring a persisted counter when it is further ahead.
    pub fn resume(stored_next: i32, existing: impl IntoIterator<Item = i32>) -> Self {
        let after_max = existing
            .into_iter()
            .max()
            .map_or(1, |max| max.checked_add(1).unwrap_or(i32::MAX));
        let mut allocator = Self::new();
        allocator.restore(stored_next.max(after_max).max(1));
        allocator
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

/// Next-ID counters for every entity kind, as persisted in snapshots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NextIds {
    pub authors: i32,
    pub books: i32,
    pub patrons: i32,
    pub loans: i32,
}

impl Default for NextIds {
    fn default() -> Self {
        Self {
            authors: 1,
            books: 1,
            patrons: 1,
            loans: 1,
        }
    }
}
