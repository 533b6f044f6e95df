// nt_hal/src/trap/mod.rs

//! # Context and Trap Extension (CTE)
//!
//! Suspends an execution on a trap, captures its registers into a
//! [`Context`], classifies the trap into a portable [`Event`], hands both to
//! the kernel's handler and resumes whichever context the handler returns.
//! Returning a different context than the one passed in is how a kernel
//! switches executions.
//!
//! ```text
//! trap -> __nt_trap_entry (save) -> __nt_irq_handle -> Dispatcher
//!      -> classifier -> handler -> __nt_trap_entry (restore) -> mret
//! ```

// Make submodules accessible within the trap crate.
mod api;
pub mod collections;
pub mod ds;
pub mod infrastructure;

// Publicly re-export the entire API module.
pub use self::api::*;

pub use self::ds::{
    frame, reg, Area, Context, ContextRef, CteConfig, EntryFn, Event, EventKind, Exception,
    Handler, Interrupt, InterruptPolicy, TrapCause, YIELD_SENTINEL,
};
pub use self::infrastructure::di::{CteSystem, HardwareController};
pub use self::infrastructure::dispatcher::{Dispatcher, TrapLog, UnknownTrap};
pub use self::infrastructure::sim;

#[cfg(not(all(target_arch = "riscv64", target_os = "none")))]
pub use self::infrastructure::di::simulate_trap;
