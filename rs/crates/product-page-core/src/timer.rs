//! Deferred work on a caller-driven millisecond clock.
//!
//! The page has no thread and no real timer: the host reports the current
//! time and the scheduler hands back whatever has come due. Tasks due at the
//! same instant come out in the order they were scheduled.

/// Handle to one scheduled task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(u64);

#[derive(Debug)]
struct Entry<T> {
    id: TaskId,
    due: u64,
    task: T,
}

#[derive(Debug)]
pub struct Scheduler<T> {
    now: u64,
    next_id: u64,
    pending: Vec<Entry<T>>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self { now: 0, next_id: 0, pending: Vec::new() }
    }

    pub fn now(&self) -> u64 {
        self.now
    }

    /// Move the clock forward. Time never runs backwards.
    pub fn set_now(&mut self, now: u64) {
        self.now = self.now.max(now);
    }

    pub fn schedule(&mut self, delay_ms: u64, task: T) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        self.pending.push(Entry { id, due: self.now.saturating_add(delay_ms), task });
        id
    }

    /// Drop a task before it fires. Returns false if it already fired or
    /// was cancelled.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        match self.pending.iter().position(|e| e.id == id) {
            Some(i) => {
                self.pending.remove(i);
                true
            }
            None => false,
        }
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    pub fn next_due(&self) -> Option<u64> {
        self.pending.iter().map(|e| e.due).min()
    }

    /// Take the earliest task due at or before `until` and move the clock to
    /// its due time, so anything it schedules is relative to that instant.
    pub fn pop_due(&mut self, until: u64) -> Option<(u64, T)> {
        let i = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, e)| e.due <= until)
            .min_by_key(|(_, e)| (e.due, e.id))
            .map(|(i, _)| i)?;
        let entry = self.pending.remove(i);
        self.set_now(entry.due);
        Some((entry.due, entry.task))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_in_due_then_schedule_order() {
        let mut s = Scheduler::new();
        s.schedule(500, "b");
        s.schedule(100, "a");
        s.schedule(500, "c");
        assert_eq!(s.next_due(), Some(100));
        assert_eq!(s.pop_due(99), None);
        assert_eq!(s.pop_due(1000), Some((100, "a")));
        assert_eq!(s.now(), 100);
        assert_eq!(s.pop_due(1000), Some((500, "b")));
        assert_eq!(s.pop_due(1000), Some((500, "c")));
        assert_eq!(s.pop_due(1000), None);
    }

    #[test]
    fn test_delay_is_relative_to_current_clock() {
        let mut s = Scheduler::new();
        s.set_now(1000);
        s.schedule(3000, ());
        assert_eq!(s.next_due(), Some(4000));
        s.set_now(10);
        assert_eq!(s.now(), 1000);
    }

    #[test]
    fn test_cancel_only_once() {
        let mut s = Scheduler::new();
        let id = s.schedule(10, 1);
        s.schedule(20, 2);
        assert!(s.cancel(id));
        assert!(!s.cancel(id));
        assert_eq!(s.pending(), 1);
        assert_eq!(s.pop_due(100), Some((20, 2)));
    }
}
