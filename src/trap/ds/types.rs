// nt_hal/src/trap/ds/types.rs

//! # Trap Cause Definitions
//!
//! Machine-mode trap causes as reported in `mcause`.

use core::fmt;

/// Machine-level interrupts.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[repr(usize)]
pub enum Interrupt {
    SupervisorSoft = 1,
    MachineSoft = 3,
    SupervisorTimer = 5,
    MachineTimer = 7,
    SupervisorExternal = 9,
    MachineExternal = 11,
}

/// Synchronous exceptions.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[repr(usize)]
pub enum Exception {
    InstructionMisaligned = 0,
    InstructionFault = 1,
    IllegalInstruction = 2,
    Breakpoint = 3,
    LoadMisaligned = 4,
    LoadFault = 5,
    StoreMisaligned = 6,
    StoreFault = 7,
    UserEnvCall = 8,
    SupervisorEnvCall = 9,
    MachineEnvCall = 11,
    InstructionPageFault = 12,
    LoadPageFault = 13,
    StorePageFault = 15,
}

const INTERRUPT_BIT: usize = 1 << (usize::BITS - 1);

/// A wrapper for the `mcause` register.
#[derive(Copy, Clone, PartialEq, Eq)]
pub struct TrapCause {
    bits: usize,
}

impl TrapCause {
    /// Creates a `TrapCause` from the raw bits of `mcause`.
    pub const fn from_bits(bits: usize) -> Self {
        Self { bits }
    }

    pub const fn exception(exception: Exception) -> Self {
        Self::from_bits(exception as usize)
    }

    pub const fn interrupt(interrupt: Interrupt) -> Self {
        Self::from_bits(INTERRUPT_BIT | interrupt as usize)
    }

    /// Returns the raw bits of `mcause`.
    pub const fn bits(&self) -> usize {
        self.bits
    }

    /// The most significant bit of `mcause` is set for interrupts.
    pub const fn is_interrupt(&self) -> bool {
        self.bits & INTERRUPT_BIT != 0
    }

    /// Returns the interrupt or exception code.
    pub const fn code(&self) -> usize {
        self.bits & !INTERRUPT_BIT
    }
}

impl From<Exception> for TrapCause {
    fn from(exception: Exception) -> Self {
        Self::exception(exception)
    }
}

impl From<Interrupt> for TrapCause {
    fn from(interrupt: Interrupt) -> Self {
        Self::interrupt(interrupt)
    }
}

impl fmt::Debug for TrapCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = if self.is_interrupt() { "Interrupt" } else { "Exception" };
        write!(f, "TrapCause::{}(code: {}, raw: {:#x})", kind, self.code(), self.bits)
    }
}

impl fmt::Display for TrapCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.bits)
    }
}
