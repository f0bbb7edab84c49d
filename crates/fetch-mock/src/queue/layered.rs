//! One-shot entries layered over a persistent fallback.

use std::collections::VecDeque;

/// FIFO of one-shot entries over a persistent fallback.
///
/// Each `next` consumes the front entry if there is one, otherwise it returns
/// a copy of the fallback, which is never consumed.
#[derive(Debug, Clone)]
pub struct LayeredQueue<T> {
    once: VecDeque<T>,
    fallback: T,
}

impl<T: Clone + Default> LayeredQueue<T> {
    pub fn new() -> Self {
        Self {
            once: VecDeque::new(),
            fallback: T::default(),
        }
    }

    /// Append a one-shot entry.
    pub fn push_once(&mut self, entry: T) {
        self.once.push_back(entry);
    }

    /// Replace the persistent fallback. Queued entries are untouched.
    pub fn set_fallback(&mut self, entry: T) {
        self.fallback = entry;
    }

    /// Entry for the next call, consuming a one-shot entry if one is queued.
    pub fn next(&mut self) -> T {
        self.once
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone())
    }

    /// Entry the next call would get, without consuming it.
    pub fn peek(&self) -> &T {
        self.once.front().unwrap_or(&self.fallback)
    }

    pub fn fallback(&self) -> &T {
        &self.fallback
    }

    /// Number of queued one-shot entries.
    pub fn pending(&self) -> usize {
        self.once.len()
    }

    /// Drop queued entries and restore the default fallback.
    pub fn reset(&mut self) {
        self.once.clear();
        self.fallback = T::default();
    }
}

impl<T: Clone + Default> Default for LayeredQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}
