//! Trailing-edge debouncer.
//!
//! # Invariants
//! - At most one value is pending; scheduling replaces it and restarts the
//!   delay window.
//! - A pending value is yielded at most once.

#[derive(Debug, Clone, PartialEq, Eq)]
struct Pending<T> {
    value: T,
    due_at_ms: i64,
}

/// Delays a value until input pauses for `delay_ms`.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    delay_ms: i64,
    pending: Option<Pending<T>>,
}

impl<T> Debouncer<T> {
    pub fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms: i64::try_from(delay_ms).unwrap_or(i64::MAX),
            pending: None,
        }
    }

    /// Schedules `value`, replacing any pending one.
    ///
    /// Returns `true` when a previously pending value was discarded.
    pub fn schedule(&mut self, value: T, now_ms: i64) -> bool {
        let replaced = self.pending.is_some();
        self.pending = Some(Pending {
            value,
            due_at_ms: now_ms.saturating_add(self.delay_ms),
        });
        replaced
    }

    /// Drops the pending value without firing it.
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|pending| pending.value)
    }

    /// Yields the pending value once its deadline has passed.
    pub fn poll(&mut self, now_ms: i64) -> Option<T> {
        let due = self
            .pending
            .as_ref()
            .is_some_and(|pending| pending.due_at_ms <= now_ms);
        if due {
            self.cancel()
        } else {
            None
        }
    }

    /// Yields the pending value regardless of its deadline.
    pub fn flush(&mut self) -> Option<T> {
        self.cancel()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn deadline_ms(&self) -> Option<i64> {
        self.pending.as_ref().map(|pending| pending.due_at_ms)
    }

    pub fn delay_ms(&self) -> i64 {
        self.delay_ms
    }
}
