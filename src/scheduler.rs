//! Cancellable deferred tasks driven by the event loop clock

use std::collections::{BTreeMap, HashMap};
use std::time::{Duration, Instant};

/// Handle returned when a task is scheduled, used to cancel it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskHandle(u64);

/// Deadline-ordered task queue.
///
/// Nothing runs on its own: the owner calls [`Scheduler::take_due`] with the
/// current instant and executes what comes back.
#[derive(Debug)]
pub struct Scheduler<T> {
    next_id: u64,
    queue: BTreeMap<(Instant, u64), T>,
    deadlines: HashMap<u64, Instant>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self {
            next_id: 0,
            queue: BTreeMap::new(),
            deadlines: HashMap::new(),
        }
    }
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a task to become due at `at`
    pub fn schedule_at(&mut self, at: Instant, task: T) -> TaskHandle {
        let id = self.next_id;
        self.next_id += 1;
        self.queue.insert((at, id), task);
        self.deadlines.insert(id, at);
        TaskHandle(id)
    }

    /// Schedule a task to become due `delay` after `now`
    pub fn schedule_after(&mut self, now: Instant, delay: Duration, task: T) -> TaskHandle {
        self.schedule_at(now + delay, task)
    }

    /// Cancel a pending task, returning it if it had not run yet
    pub fn cancel(&mut self, handle: TaskHandle) -> Option<T> {
        let at = self.deadlines.remove(&handle.0)?;
        self.queue.remove(&(at, handle.0))
    }

    #[cfg(test)]
    pub fn is_pending(&self, handle: TaskHandle) -> bool {
        self.deadlines.contains_key(&handle.0)
    }

    /// Remove and return every task due at or before `now`, earliest first.
    /// Tasks sharing a deadline come back in scheduling order.
    pub fn take_due(&mut self, now: Instant) -> Vec<T> {
        let mut due = Vec::new();
        while let Some(entry) = self.queue.first_entry() {
            let (at, id) = *entry.key();
            if at > now {
                break;
            }
            due.push(entry.remove());
            self.deadlines.remove(&id);
        }
        due
    }

    /// Earliest pending deadline
    pub fn next_deadline(&self) -> Option<Instant> {
        self.queue.keys().next().map(|(at, _)| *at)
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
