//! Version-guarded state slots.
//!
//! Every cached value in the client state remembers the version of the request
//! that produced it. Request versions are handed out by [`VersionCounter`] in
//! issue order, so a response only replaces the slot if its request was issued
//! after the one behind the current value.

use std::sync::atomic::{AtomicU64, Ordering};

/// Monotonic source of request versions for one state slot.
#[derive(Debug, Default)]
pub struct VersionCounter {
    next: AtomicU64,
}

impl VersionCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues the next version. The first issued version is 1.
    pub fn issue(&self) -> u64 {
        self.next.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Last version handed out (0 if none).
    pub fn current(&self) -> u64 {
        self.next.load(Ordering::SeqCst)
    }
}

/// A value plus the version of the request that last replaced it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Versioned<T> {
    value: T,
    version: u64,
}

impl<T> Versioned<T> {
    pub fn new(value: T) -> Self {
        Self { value, version: 0 }
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Replaces the value wholesale if `version` is newer than the committed one.
    ///
    /// Returns `false` (and drops `value`) for stale versions.
    pub fn commit(&mut self, version: u64, value: T) -> bool {
        if version <= self.version {
            return false;
        }
        self.value = value;
        self.version = version;
        true
    }
}
