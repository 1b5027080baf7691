//! Framework-independent observable value.
//!
//! [`Observable`] holds the latest value of some piece of state and lets any
//! number of readers subscribe to changes. It is a thin layer over
//! [`tokio::sync::watch`]: one writer, many readers, and readers that fall
//! behind only ever see the most recent value.

use std::fmt;
use tokio::sync::watch;

/// A single-writer, multi-reader value that notifies subscribers on change.
pub struct Observable<T> {
    sender: watch::Sender<T>,
}

impl<T> Observable<T> {
    pub fn new(initial: T) -> Self {
        let (sender, _) = watch::channel(initial);
        Self { sender }
    }

    /// Replace the value and notify subscribers.
    ///
    /// The value is stored even when nobody is subscribed.
    pub fn set(&self, value: T) {
        self.sender.send_replace(value);
    }

    /// Modify the value in place and notify subscribers.
    pub fn update<F>(&self, modify: F)
    where
        F: FnOnce(&mut T),
    {
        self.sender.send_modify(modify);
    }

    /// Run `f` against the current value without cloning it.
    pub fn with<R, F>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        f(&self.sender.borrow())
    }

    /// Subscribe to changes. The current value counts as already seen.
    pub fn subscribe(&self) -> watch::Receiver<T> {
        self.sender.subscribe()
    }
}

impl<T: Clone> Observable<T> {
    /// Clone out the current value
    pub fn get(&self) -> T {
        self.sender.borrow().clone()
    }
}

impl<T: Default> Default for Observable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

/// Remembers which value of a subscription was last looked at.
///
/// Used by view-models to ask "did the selected project change since I
/// last loaded?" without running a listener task.
#[derive(Debug)]
pub struct ChangeWatcher<T> {
    receiver: watch::Receiver<T>,
}

impl<T> ChangeWatcher<T> {
    pub fn new(receiver: watch::Receiver<T>) -> Self {
        Self { receiver }
    }

    /// True if a new value was published since the last call. Marks it seen.
    pub fn take_change(&mut self) -> bool {
        match self.receiver.has_changed() {
            Ok(true) => {
                self.receiver.mark_unchanged();
                true
            }
            // The sender is gone, nothing more will change.
            Ok(false) | Err(_) => false,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observable").field("value", &*self.sender.borrow()).finish()
    }
}
