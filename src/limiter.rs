//! Fixed-capacity concurrency limiter.
//!
//! Decode + resize holds a full image in memory; letting every request do it
//! at once would let peak memory grow with request count. The limiter is a
//! counting semaphore: [`Limiter::acquire`] blocks the calling thread until
//! one of the configured slots is free and returns an RAII [`Permit`] that
//! gives the slot back when dropped — on every exit path, including errors.
//!
//! This is the only intentional backpressure point in the pipeline. No
//! timeout, no cancellation: a slow resize simply occupies its slot until
//! it completes.

use std::sync::{Condvar, Mutex};

#[derive(Debug)]
pub struct Limiter {
    capacity: usize,
    active: Mutex<usize>,
    released: Condvar,
}

impl Limiter {
    /// A limiter with `capacity` slots. Capacity must be at least 1
    /// (enforced by config validation upstream); a zero here would block
    /// every caller forever, so it is clamped.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            active: Mutex::new(0),
            released: Condvar::new(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Take a slot, blocking until one is free.
    pub fn acquire(&self) -> Permit<'_> {
        let mut active = self.active.lock().unwrap();
        while *active >= self.capacity {
            active = self.released.wait(active).unwrap();
        }
        *active += 1;
        Permit { limiter: self }
    }

    /// Slots currently held.
    pub fn in_use(&self) -> usize {
        *self.active.lock().unwrap()
    }
}

/// A held limiter slot. Dropping it releases the slot and wakes one waiter.
#[derive(Debug)]
pub struct Permit<'a> {
    limiter: &'a Limiter,
}

impl Drop for Permit<'_> {
    fn drop(&mut self) {
        let mut active = self.limiter.active.lock().unwrap();
        *active -= 1;
        self.limiter.released.notify_one();
    }
}
