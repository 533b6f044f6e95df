// nt_hal/src/trap/collections/mod.rs

//! # Kernel Collections Module
//!
//! Allocation-free data structures usable from the trap path.

pub mod ring_buffer;

pub use self::ring_buffer::RingBuffer;
