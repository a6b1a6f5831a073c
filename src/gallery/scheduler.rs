//! Deferred work keyed by purpose, run against a monotonic millisecond clock.
//!
//! Scheduling a key that is already pending replaces the pending entry, and
//! any key can be cancelled. The clock only moves when [`Scheduler::advance`]
//! is called. The gallery session advances it by wall-clock time before every
//! request (see `gallery::state`).

/// One scheduled entry.
#[derive(Debug, Clone)]
struct Entry<K, T> {
    key: K,
    due_ms: u64,
    seq: u64,
    task: T,
}

#[derive(Debug, Clone)]
pub struct Scheduler<K, T> {
    now_ms: u64,
    next_seq: u64,
    entries: Vec<Entry<K, T>>,
}

impl<K, T> Default for Scheduler<K, T> {
    fn default() -> Self {
        Self {
            now_ms: 0,
            next_seq: 0,
            entries: Vec::new(),
        }
    }
}

impl<K: PartialEq, T> Scheduler<K, T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Run `task` `delay_ms` from now. Replaces any pending task under `key`.
    pub fn schedule(&mut self, key: K, delay_ms: u64, task: T) {
        self.cancel(&key);
        let seq = self.next_seq;
        self.next_seq += 1;
        self.entries.push(Entry {
            key,
            due_ms: self.now_ms.saturating_add(delay_ms),
            seq,
            task,
        });
    }

    /// Drop the pending task under `key`. Returns whether one was pending.
    pub fn cancel(&mut self, key: &K) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.key != *key);
        self.entries.len() != before
    }

    /// Drop every pending task. The clock keeps its position.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn pending(&self) -> usize {
        self.entries.len()
    }

    /// Milliseconds until the earliest pending task, if any.
    pub fn next_due_in(&self) -> Option<u64> {
        self.entries
            .iter()
            .map(|e| e.due_ms.saturating_sub(self.now_ms))
            .min()
    }

    /// Move the clock forward and remove every task now due.
    ///
    /// Due tasks come back ordered by due time, then by scheduling order.
    pub fn advance(&mut self, elapsed_ms: u64) -> Vec<(K, T)> {
        self.now_ms = self.now_ms.saturating_add(elapsed_ms);
        let now = self.now_ms;

        let mut due = Vec::new();
        let mut i = 0;
        while i < self.entries.len() {
            if self.entries[i].due_ms <= now {
                due.push(self.entries.swap_remove(i));
            } else {
                i += 1;
            }
        }
        due.sort_by_key(|e| (e.due_ms, e.seq));
        due.into_iter().map(|e| (e.key, e.task)).collect()
    }
}
