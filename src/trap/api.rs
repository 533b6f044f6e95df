// nt_hal/src/trap/api.rs

//! # Public API for the Trap Subsystem
//!
//! The kernel-facing entry points, all backed by the global `CteSystem`.

use crate::trap::ds::{Area, ContextRef, CteConfig, EntryFn, Handler};
use crate::trap::infrastructure::di;
use crate::trap::infrastructure::dispatcher::TrapLog;

/// Installs the trap vector and `handler` with [`CteConfig::DEFAULT`].
///
/// Always returns `true`. Calling it again replaces the handler.
pub fn init(handler: Handler) -> bool {
    init_with(CteConfig::DEFAULT, handler)
}

/// Like [`init`], with an explicit configuration.
///
/// Must run before interrupts are enabled, and never while a trap is being
/// delivered.
pub fn init_with(config: CteConfig, handler: Handler) -> bool {
    di::system().init(config, handler, di::trap_entry())
}

/// Gives the processor to the handler as a `Yield` event.
///
/// Issues `ecall` with the yield sentinel in `a7`, so the handler may
/// resume a different context; this call returns when this context is
/// resumed again.
#[cfg(all(target_arch = "riscv64", target_os = "none"))]
pub fn yield_now() {
    crate::trap::infrastructure::low_level::ecall_yield();
}

/// Gives the processor to the handler as a `Yield` event.
///
/// Hosted builds have no `ecall`: a scratch frame carrying the sentinel is
/// delivered through the trap bridge instead. The frame only lives for
/// this call, so a handler must not keep it for later resumption.
#[cfg(not(all(target_arch = "riscv64", target_os = "none")))]
pub fn yield_now() {
    use crate::trap::ds::YIELD_SENTINEL;
    use crate::trap::infrastructure::sim;

    let mut scratch = sim::ecall_frame(YIELD_SENTINEL, yield_now as usize);
    // Safety: the scratch frame is complete and owned by this call.
    unsafe {
        di::simulate_trap(&mut scratch);
    }
}

/// Whether machine interrupts are enabled. Always `false` under
/// [`InterruptPolicy::AlwaysDisabled`](crate::trap::InterruptPolicy).
pub fn interrupts_enabled() -> bool {
    di::system().interrupts_enabled()
}

/// Enables or disables machine interrupts, subject to the active policy.
pub fn set_interrupts(enable: bool) {
    di::system().set_interrupts(enable);
}

/// Manufactures a context that starts `entry(arg)` on `stack` when resumed.
///
/// # Safety
/// `stack` must be writable memory reserved for the new thread for as long
/// as it runs, and large enough for everything `entry` calls.
pub unsafe fn kcontext(stack: Area, entry: EntryFn, arg: usize) -> ContextRef {
    unsafe { di::system().kcontext(stack, entry, arg) }
}

/// The active configuration.
pub fn config() -> CteConfig {
    di::system().config()
}

/// How many traps have reached the installed handler.
pub fn delivered_traps() -> u64 {
    di::system().dispatcher().delivered()
}

/// The most recent traps nothing in the cause table recognised.
pub fn unknown_traps() -> TrapLog {
    di::system().dispatcher().unknown_traps()
}
