// nt_hal/src/lib.rs

//! # NT HAL
//!
//! A small hardware-abstraction layer for kernels running on the NEMU
//! RISC-V machine. It hides trap delivery, register-frame layout and
//! device register access behind a portable interface:
//!
//! * [`trap`]: context/trap abstraction (CTE). Trap classification,
//!   handler dispatch, kernel-thread context creation, interrupt control.
//! * [`trm`]: the turing-machine basics (character output, halt, heap).
//! * [`ioe`]: polled device collaborators (timer, RTC, keyboard, GPU).
//! * [`console`]: formatted diagnostic output.
//!
//! On hosted targets the hardware-facing pieces are replaced by a simulated
//! hart, so the whole contract can be exercised with `cargo test`.

#![cfg_attr(not(test), no_std)]

// 声明模块
pub mod console;
pub mod ioe;
pub mod test;
pub mod trap;
pub mod trm;

pub use trap::{
    init, init_with, interrupts_enabled, kcontext, set_interrupts, yield_now, Area, Context,
    ContextRef, CteConfig, Event, EventKind, Handler, InterruptPolicy,
};

use core::fmt;

/// Errors reported by the fallible, caller-facing parts of the HAL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HalError {
    /// An address range whose end lies below its start.
    InvalidArea { start: usize, end: usize },
    /// The TRM heap was initialised twice.
    HeapAlreadyInitialized,
    /// The heap area cannot hold even the allocator's bookkeeping.
    HeapTooSmall { size: usize },
}

impl fmt::Display for HalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArea { start, end } => {
                write!(f, "Invalid area: end {:#x} lies below start {:#x}.", end, start)
            }
            Self::HeapAlreadyInitialized => write!(f, "The TRM heap has already been initialized."),
            Self::HeapTooSmall { size } => write!(f, "Heap area of {} bytes is too small.", size),
        }
    }
}

/// Panic处理器 - 当发生panic时调用
#[cfg(all(feature = "panic-handler", target_os = "none", not(test)))]
#[panic_handler]
fn panic(info: &core::panic::PanicInfo) -> ! {
    // 关闭中断，防止在打印过程中再次陷入
    trap::set_interrupts(false);

    error_print!("KERNEL PANIC!");
    if let Some(location) = info.location() {
        error_print!("  Location: {}:{}", location.file(), location.line());
    }
    error_print!("  Message: {}", info.message());
    error_print!("System halted.");

    trm::halt(1)
}
