/// Default number of entries a history retains
pub const HISTORY_LIMIT: usize = 50;

/// Whether committing an entry equal to the current one is recorded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuplicatePolicy {
    Record,
    Suppress,
}

/// A bounded, linear undo/redo history.
///
/// Holds at least one entry at all times; `cursor` always indexes the entry that
/// reflects the current state. Committing after an undo discards the undone branch.
/// Once the limit is exceeded the oldest entries are evicted.
#[derive(Debug, Clone)]
pub struct History<T> {
    entries: Vec<T>,
    cursor: usize,
    limit: usize,
    policy: DuplicatePolicy,
}

impl<T: Clone + PartialEq> History<T> {
    /// A history whose only entry is `initial`
    pub fn new(initial: T) -> Self {
        History {
            entries: vec![initial],
            cursor: 0,
            limit: HISTORY_LIMIT,
            policy: DuplicatePolicy::Record,
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit.max(1);
        self.evict();
        self
    }

    pub fn with_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Rebuild a history from stored parts. Returns `None` if the parts are inconsistent.
    pub fn from_parts(entries: Vec<T>, cursor: usize) -> Option<Self> {
        if cursor >= entries.len() {
            return None;
        }
        Some(History {
            entries,
            cursor,
            limit: HISTORY_LIMIT,
            policy: DuplicatePolicy::Record,
        })
    }

    /// Record a new state. Returns false if it was suppressed as a duplicate.
    pub fn commit(&mut self, entry: T) -> bool {
        if self.policy == DuplicatePolicy::Suppress && self.entries[self.cursor] == entry {
            return false;
        }
        self.entries.truncate(self.cursor + 1);
        self.entries.push(entry);
        self.cursor = self.entries.len() - 1;
        self.evict();
        true
    }

    /// Step back. `None` when already at the oldest entry.
    pub fn undo(&mut self) -> Option<&T> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        Some(&self.entries[self.cursor])
    }

    /// Step forward. `None` when already at the newest entry.
    pub fn redo(&mut self) -> Option<&T> {
        if self.cursor + 1 >= self.entries.len() {
            return None;
        }
        self.cursor += 1;
        Some(&self.entries[self.cursor])
    }

    /// Drop everything and start over from `initial`
    pub fn reset(&mut self, initial: T) {
        self.entries.clear();
        self.entries.push(initial);
        self.cursor = 0;
    }

    pub fn current(&self) -> &T {
        &self.entries[self.cursor]
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn entries(&self) -> &[T] {
        &self.entries
    }

    /// Drop the oldest entries beyond the limit, shifting the cursor with them
    fn evict(&mut self) {
        if self.entries.len() > self.limit {
            let excess = self.entries.len() - self.limit;
            self.entries.drain(..excess);
            self.cursor = self.cursor.saturating_sub(excess);
        }
    }
}
