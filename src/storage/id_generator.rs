//! Sequential ID generation for tasks

/// Hands out monotonically increasing task ids.
///
/// Once `u64::MAX` has been issued (or seeded) the generator is exhausted and
/// never hands out another id.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    next: Option<u64>,
}

impl Default for IdGenerator {
    fn default() -> Self {
        IdGenerator { next: Some(1) }
    }
}

impl IdGenerator {
    /// Start a generator above the highest id already in use
    pub fn after<I>(ids: I) -> Self
    where
        I: IntoIterator<Item = u64>,
    {
        let max_id = ids.into_iter().max().unwrap_or(0);
        IdGenerator {
            next: max_id.checked_add(1),
        }
    }

    /// Return the next id and advance the counter, or `None` when exhausted
    pub fn next_id(&mut self) -> Option<u64> {
        let id = self.next?;
        self.next = id.checked_add(1);
        Some(id)
    }

    /// The id the next call to `next_id` will return
    pub fn peek(&self) -> Option<u64> {
        self.next
    }
}
