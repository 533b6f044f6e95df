// nt_hal/src/trap/infrastructure/di/mod.rs

//! # Dependency Injection System - Global Access
//!
//! Holds the process-wide `CteSystem`, wired to the native hart on the
//! target and to a simulated one everywhere else, plus the C-ABI bridge the
//! trap-entry routine calls.

pub mod container;
pub mod traits;

pub use self::container::CteSystem;
pub use self::traits::HardwareController;

use crate::trap::ds::Context;

#[cfg(all(target_arch = "riscv64", target_os = "none"))]
use super::low_level::{self, NativeHart};
#[cfg(not(all(target_arch = "riscv64", target_os = "none")))]
use super::sim::SimulatedHart;

#[cfg(all(target_arch = "riscv64", target_os = "none"))]
static HART: NativeHart = NativeHart;

#[cfg(not(all(target_arch = "riscv64", target_os = "none")))]
static HART: SimulatedHart = SimulatedHart::new();

/// The global `CteSystem` instance.
static SYSTEM: CteSystem = CteSystem::new(&HART);

pub fn system() -> &'static CteSystem {
    &SYSTEM
}

/// The address `init` installs as the trap vector.
#[cfg(all(target_arch = "riscv64", target_os = "none"))]
pub fn trap_entry() -> usize {
    low_level::trap_entry()
}

/// The address `init` installs as the trap vector. The simulated hart
/// vectors straight into the bridge.
#[cfg(not(all(target_arch = "riscv64", target_os = "none")))]
pub fn trap_entry() -> usize {
    __nt_irq_handle as usize
}

/// Called by the trap-entry routine with the frame it just saved; returns
/// the frame to restore.
#[no_mangle]
pub extern "C" fn __nt_irq_handle(frame: *mut Context) -> *mut Context {
    // Safety: the trap-entry routine passes the frame it owns on the
    // interrupted stack, and traps stay masked until it resumes.
    unsafe { SYSTEM.handle_raw(frame) }
}

/// Takes a trap on the simulated hart: masks interrupts, runs the same
/// dispatch as the bridge, then restores the enable bit from the frame
/// being resumed. Panics raised by the handler unwind to the caller.
///
/// # Safety
/// A non-null `frame` must point to a complete frame that nothing else
/// touches during the call.
#[cfg(not(all(target_arch = "riscv64", target_os = "none")))]
pub unsafe fn simulate_trap(frame: *mut Context) -> *mut Context {
    if let Some(saved) = unsafe { frame.as_mut() } {
        HART.take_trap(saved);
    }
    let next = unsafe { SYSTEM.handle_raw(frame) };
    if let Some(resumed) = unsafe { next.as_ref() } {
        HART.return_from_trap(resumed);
    }
    next
}
