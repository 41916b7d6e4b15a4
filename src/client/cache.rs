/// Handed out before a fetch; the response may only be applied with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

/// Last-fetched copy of a backend collection.
///
/// Every fetch takes a [`Ticket`] first. A response is stored only when its
/// ticket is newer than the one that produced the current value, so a slow
/// response to an older request never replaces a fresher one.
#[derive(Debug, Clone)]
pub struct Cache<T> {
    value: T,
    issued: u64,
    applied: u64,
}

impl<T: Default> Default for Cache<T> {
    fn default() -> Self {
        Self {
            value: T::default(),
            issued: 0,
            applied: 0,
        }
    }
}

impl<T> Cache<T> {
    pub fn begin(&mut self) -> Ticket {
        self.issued += 1;
        Ticket(self.issued)
    }

    /// Store `value` if `ticket` is newer than the current one.
    /// Returns whether it was stored.
    pub fn apply(&mut self, ticket: Ticket, value: T) -> bool {
        if ticket.0 <= self.applied {
            tracing::debug!(
                "Dropping stale response (ticket {}, current {})",
                ticket.0,
                self.applied
            );
            return false;
        }
        self.applied = ticket.0;
        self.value = value;
        true
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    /// Whether any fetch has been applied yet.
    pub fn is_loaded(&self) -> bool {
        self.applied > 0
    }
}
