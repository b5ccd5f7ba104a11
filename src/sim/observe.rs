//! Reactive value cells
//!
//! The round's score and timer are observed by HUD-style subscribers. A
//! write always notifies, even when the value is unchanged - the timer
//! display relies on being poked every second regardless of value.

/// Handle returned by [`Watched::subscribe`], used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionId(u64);

/// A value with force-notify observer semantics
pub struct Watched<T: Copy> {
    value: T,
    next_id: u64,
    subscribers: Vec<(u64, Box<dyn FnMut(T)>)>,
}

impl<T: Copy> Watched<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            next_id: 1,
            subscribers: Vec::new(),
        }
    }

    pub fn get(&self) -> T {
        self.value
    }

    /// Write the value and notify every subscriber, unconditionally
    pub fn set(&mut self, value: T) {
        self.value = value;
        for (_, callback) in &mut self.subscribers {
            callback(value);
        }
    }

    /// Register a callback invoked on every subsequent write
    pub fn subscribe(&mut self, callback: impl FnMut(T) + 'static) -> SubscriptionId {
        let id = self.next_id;
        self.next_id += 1;
        self.subscribers.push((id, Box::new(callback)));
        SubscriptionId(id)
    }

    /// Remove a subscription; unknown ids are a no-op
    pub fn unsubscribe(&mut self, id: SubscriptionId) {
        self.subscribers.retain(|(sub_id, _)| *sub_id != id.0);
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

impl<T: Copy + std::fmt::Debug> std::fmt::Debug for Watched<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Watched")
            .field("value", &self.value)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
