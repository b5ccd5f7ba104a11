//! Tick-driven task scheduler
//!
//! Replacement for engine-side delayed/repeating callbacks: the per-second
//! round timer and the "show outcome window after half the jingle" delay are
//! both scheduled here. Single-threaded, advanced once per simulation tick;
//! no blocking waits.

/// Handle for cancelling a scheduled task
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskHandle(u64);

#[derive(Debug, Clone, Copy)]
enum Repeat {
    Once,
    Every(u64),
}

#[derive(Debug)]
struct Entry<A> {
    id: u64,
    due: u64,
    repeat: Repeat,
    action: A,
}

/// Schedules actions of type `A` on the simulation tick timeline
#[derive(Debug)]
pub struct Scheduler<A> {
    now: u64,
    next_id: u64,
    entries: Vec<Entry<A>>,
}

impl<A: Clone> Scheduler<A> {
    pub fn new() -> Self {
        Self {
            now: 0,
            next_id: 1,
            entries: Vec::new(),
        }
    }

    /// Schedule `action` to fire once, `delay_ticks` ticks from now
    pub fn after(&mut self, delay_ticks: u64, action: A) -> TaskHandle {
        self.insert(self.now + delay_ticks.max(1), Repeat::Once, action)
    }

    /// Schedule `action` to fire every `interval_ticks` ticks
    pub fn every(&mut self, interval_ticks: u64, action: A) -> TaskHandle {
        let interval = interval_ticks.max(1);
        self.insert(self.now + interval, Repeat::Every(interval), action)
    }

    fn insert(&mut self, due: u64, repeat: Repeat, action: A) -> TaskHandle {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push(Entry {
            id,
            due,
            repeat,
            action,
        });
        TaskHandle(id)
    }

    /// Cancel a task. Cancelling twice, or cancelling a task that already
    /// fired, is a no-op.
    pub fn cancel(&mut self, handle: TaskHandle) {
        self.entries.retain(|e| e.id != handle.0);
    }

    /// Advance the timeline by one tick and return the actions that came due,
    /// in scheduling order
    pub fn advance(&mut self) -> Vec<A> {
        self.now += 1;
        let now = self.now;
        let mut due = Vec::new();
        self.entries.retain_mut(|entry| {
            if entry.due > now {
                return true;
            }
            due.push(entry.action.clone());
            match entry.repeat {
                Repeat::Once => false,
                Repeat::Every(interval) => {
                    entry.due = now + interval;
                    true
                }
            }
        });
        due
    }

    pub fn pending_count(&self) -> usize {
        self.entries.len()
    }

    pub fn now(&self) -> u64 {
        self.now
    }
}

impl<A: Clone> Default for Scheduler<A> {
    fn default() -> Self {
        Self::new()
    }
}
