// nt_hal/src/trap/collections/ring_buffer.rs

//! # Fixed-Capacity Ring Buffer
//!
//! An inline, const-constructible circular buffer. When full, pushing
//! overwrites the oldest element. Needs no allocator, so it can sit in a
//! `static` and be touched from the trap path.

use core::fmt;

pub struct RingBuffer<T: Copy, const N: usize> {
    slots: [Option<T>; N],
    head: usize,
    count: usize,
}

impl<T: Copy, const N: usize> RingBuffer<T, N> {
    const CAPACITY_CHECK: () = assert!(N > 0, "RingBuffer capacity cannot be zero");

    pub const fn new() -> Self {
        #[allow(clippy::let_unit_value)]
        let _ = Self::CAPACITY_CHECK;
        Self {
            slots: [None; N],
            head: 0,
            count: 0,
        }
    }

    /// Pushes an element, overwriting the oldest one when full.
    pub fn push(&mut self, item: T) {
        self.slots[self.head] = Some(item);
        self.head = (self.head + 1) % N;
        if self.count < N {
            self.count += 1;
        }
    }

    /// Returns the newest element without removing it.
    pub fn back(&self) -> Option<&T> {
        if self.is_empty() {
            return None;
        }
        self.slots[(self.head + N - 1) % N].as_ref()
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Iterates from oldest to newest.
    pub fn iter(&self) -> Iter<'_, T, N> {
        Iter {
            buffer: self,
            index: self.tail(),
            remaining: self.count,
        }
    }

    fn tail(&self) -> usize {
        (self.head + N - self.count) % N
    }
}

impl<T: Copy, const N: usize> Default for RingBuffer<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

pub struct Iter<'a, T: Copy, const N: usize> {
    buffer: &'a RingBuffer<T, N>,
    index: usize,
    remaining: usize,
}

impl<'a, T: Copy, const N: usize> Iterator for Iter<'a, T, N> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let item = self.buffer.slots[self.index].as_ref();
        self.index = (self.index + 1) % N;
        self.remaining -= 1;
        item
    }
}

impl<T: Copy + fmt::Debug, const N: usize> fmt::Debug for RingBuffer<T, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
