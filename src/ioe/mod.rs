// nt_hal/src/ioe/mod.rs

//! # I/O Extension (IOE)
//!
//! Polled collaborators for the NEMU devices. Each one is a short sequence
//! of register reads and writes: nothing blocks and nothing fails, an empty
//! poll just means nothing happened.
//!
//! Devices talk to the machine through the [`Port`] trait so the same
//! sequences run against [`Mmio`] on the target and against a recording
//! bus in tests.

pub mod gpu;
pub mod input;
pub mod serial;
pub mod timer;

/// Base of the NEMU device register window.
pub const DEVICE_BASE: usize = 0xa000_0000;
/// Base of the NEMU framebuffer.
pub const MMIO_BASE: usize = 0xa100_0000;

pub const SERIAL_PORT: usize = DEVICE_BASE + 0x0000_03f8;
pub const KBD_ADDR: usize = DEVICE_BASE + 0x0000_0060;
pub const RTC_ADDR: usize = DEVICE_BASE + 0x0000_0070;
pub const TIMER_ADDR: usize = DEVICE_BASE + 0x0000_0048;
pub const VGACTL_ADDR: usize = DEVICE_BASE + 0x0000_0100;
pub const FB_ADDR: usize = MMIO_BASE;

/// Fixed-width register access at absolute addresses.
pub trait Port {
    fn read8(&self, addr: usize) -> u8;
    fn read32(&self, addr: usize) -> u32;
    fn read64(&self, addr: usize) -> u64;
    fn write8(&self, addr: usize, value: u8);
    fn write32(&self, addr: usize, value: u32);
}

/// Volatile memory-mapped access.
///
/// Only meaningful on the NEMU machine, where every address used by this
/// module is backed by a device.
#[derive(Debug, Clone, Copy, Default)]
pub struct Mmio;

impl Port for Mmio {
    fn read8(&self, addr: usize) -> u8 {
        unsafe { core::ptr::read_volatile(addr as *const u8) }
    }

    fn read32(&self, addr: usize) -> u32 {
        unsafe { core::ptr::read_volatile(addr as *const u32) }
    }

    fn read64(&self, addr: usize) -> u64 {
        unsafe { core::ptr::read_volatile(addr as *const u64) }
    }

    fn write8(&self, addr: usize, value: u8) {
        unsafe { core::ptr::write_volatile(addr as *mut u8, value) }
    }

    fn write32(&self, addr: usize, value: u32) {
        unsafe { core::ptr::write_volatile(addr as *mut u32, value) }
    }
}
