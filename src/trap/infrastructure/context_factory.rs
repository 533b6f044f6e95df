// nt_hal/src/trap/infrastructure/context_factory.rs

//! # Context Factory
//!
//! Manufactures register frames for kernel threads that have never trapped.
//! Resuming such a frame through the trap path starts `entry(arg)`.

use crate::trap::ds::{frame, mstatus, reg, Area, Context, ContextRef, EntryFn, InterruptPolicy};

/// Alignment of every stack pointer the factory hands out.
pub const STACK_ALIGN: usize = 16;

/// Smallest stack area that still leaves the entry function some room
/// below the frame.
pub const MIN_STACK_SIZE: usize = frame::SIZE + 4 * STACK_ALIGN;

/// Where a manufactured thread lands if its entry function returns.
pub extern "C" fn thread_exit_trampoline() -> ! {
    panic!("kernel thread returned from its entry function");
}

/// Builds a frame at the top of `stack` that resumes in `entry(arg)`.
///
/// The frame occupies the highest 16-byte-aligned `frame::SIZE` bytes of
/// the area and the stack pointer starts right below it, so the thread
/// grows its stack downward from there. Every other general-purpose
/// register is zero. The saved status returns to machine mode with
/// interrupts enabled on resume exactly when `policy` allows them.
///
/// # Panics
/// Panics if the area cannot hold a frame at all. A stack that holds the
/// frame but is too small for what `entry` needs is not detected.
///
/// # Safety
/// `stack` must be writable memory that nothing else uses while the thread
/// it backs is alive.
pub unsafe fn kcontext(
    stack: Area,
    entry: EntryFn,
    arg: usize,
    policy: InterruptPolicy,
) -> ContextRef {
    let top = stack.end & !(STACK_ALIGN - 1);
    let Some(base) = top
        .checked_sub(frame::SIZE)
        .filter(|&base| base >= stack.start && base != 0)
    else {
        panic!("stack area {:?} cannot hold a register frame", stack);
    };
    debug_assert!(
        stack.size() >= MIN_STACK_SIZE,
        "kernel stack of {} bytes is below the {} byte minimum",
        stack.size(),
        MIN_STACK_SIZE
    );

    let mut context = Context::zeroed();
    context.gpr[reg::RA] = thread_exit_trampoline as usize;
    context.gpr[reg::SP] = base;
    context.gpr[reg::A0] = arg;
    context.mepc = entry as usize;
    context.mcause = 0;
    context.mstatus = if policy.allows_interrupts() {
        mstatus::MPP_MACHINE | mstatus::MPIE
    } else {
        mstatus::MPP_MACHINE
    };

    let ptr = base as *mut Context;
    // Safety: `base` is non-null, 16-byte aligned and `frame::SIZE` bytes
    // below the aligned top of the caller's area.
    unsafe {
        ptr.write(context);
        match ContextRef::from_raw(ptr) {
            Some(handle) => handle,
            None => unreachable!(),
        }
    }
}
