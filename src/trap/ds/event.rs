// nt_hal/src/trap/ds/event.rs

//! # Events
//!
//! The portable, ISA-independent answer to "why did this trap happen".

use super::types::TrapCause;
use core::fmt;

/// The closed set of reasons a handler can be invoked for.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// A synchronous service request.
    Syscall,
    /// A voluntary hand-over of the processor.
    Yield,
    /// A trap nothing else maps to. What to do about it is the handler's call.
    Error,
    /// The machine timer fired.
    IrqTimer,
    /// A device raised an external interrupt.
    IrqIoDev,
}

/// One classified trap. Lives for a single dispatch.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Event {
    pub kind: EventKind,
    /// Raw `mcause`, kept for diagnostics.
    pub cause: usize,
    pub msg: &'static str,
}

impl Event {
    pub const fn new(kind: EventKind, cause: TrapCause, msg: &'static str) -> Self {
        Self {
            kind,
            cause: cause.bits(),
            msg,
        }
    }

    pub fn trap_cause(&self) -> TrapCause {
        TrapCause::from_bits(self.cause)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} ({}, cause {:#x})", self.kind, self.msg, self.cause)
    }
}
