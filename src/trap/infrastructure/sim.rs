// nt_hal/src/trap/infrastructure/sim.rs

//! # Simulated Hart
//!
//! A software stand-in for the machine-mode trap state of one hart. Hosted
//! builds run the whole trap layer against it; tests use it as a
//! `HardwareController` double.

use super::di::traits::HardwareController;
use crate::trap::ds::{mstatus, reg, Context, EntryFn, Exception, TrapCause};
use core::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// Trap vector and interrupt-enable bit, held in atomics.
#[derive(Debug)]
pub struct SimulatedHart {
    vector: AtomicUsize,
    mie: AtomicBool,
}

impl SimulatedHart {
    pub const fn new() -> Self {
        Self {
            vector: AtomicUsize::new(0),
            mie: AtomicBool::new(false),
        }
    }

    /// What the hart does to its status on trap entry: the enable bit moves
    /// into MPIE of the saved status and is cleared, so the dispatcher runs
    /// masked.
    pub fn take_trap(&self, frame: &mut Context) {
        let was_enabled = self.mie.swap(false, Ordering::AcqRel);
        frame.mstatus = if was_enabled {
            mstatus::MPP_MACHINE | mstatus::MPIE
        } else {
            mstatus::MPP_MACHINE
        };
    }

    /// `mret`: the enable bit comes back from the resumed frame's MPIE.
    pub fn return_from_trap(&self, frame: &Context) {
        self.mie
            .store(frame.resumes_with_interrupts(), Ordering::Release);
    }
}

impl Default for SimulatedHart {
    fn default() -> Self {
        Self::new()
    }
}

impl HardwareController for SimulatedHart {
    fn install_trap_vector(&self, entry: usize) {
        self.vector.store(entry, Ordering::Release);
    }

    fn trap_vector(&self) -> usize {
        self.vector.load(Ordering::Acquire)
    }

    fn interrupts_enabled(&self) -> bool {
        self.mie.load(Ordering::Acquire)
    }

    fn set_interrupts(&self, enable: bool) {
        self.mie.store(enable, Ordering::Release);
    }
}

/// A frame as the trap-entry routine would save it for `cause` at `pc`.
pub fn trap_frame(cause: TrapCause, pc: usize) -> Context {
    let mut frame = Context::zeroed();
    frame.mcause = cause.bits();
    frame.mepc = pc;
    frame.mstatus = mstatus::MPP_MACHINE;
    frame
}

/// A frame for an `ecall` at `pc` carrying `call_number` in `a7`.
pub fn ecall_frame(call_number: usize, pc: usize) -> Context {
    let mut frame = trap_frame(Exception::MachineEnvCall.into(), pc);
    frame.gpr[reg::A7] = call_number;
    frame
}

/// Runs a manufactured context the way resuming it would: calls the saved
/// pc as an entry function with `a0` as its argument, on the host stack.
///
/// # Safety
/// `context.mepc` must hold the address of an [`EntryFn`], as it does for
/// every frame built by `kcontext`.
pub unsafe fn resume_entry(context: &Context) {
    // Safety: upheld by the caller.
    let entry: EntryFn = unsafe { core::mem::transmute::<usize, EntryFn>(context.mepc) };
    entry(context.gpr[reg::A0]);
}
