// nt_hal/src/trap/ds/context.rs

//! # Register Frame
//!
//! Defines the saved processor state of one suspended execution and the
//! frame schema the trap-entry assembly is built against.

use super::types::TrapCause;
use crate::HalError;
use core::fmt;
use core::ops::{Deref, DerefMut};
use core::ptr::NonNull;

/// Layout of [`Context`] as seen by the trap-entry assembly.
///
/// The assembly receives these values as `const` operands, and the
/// assertions at the bottom of this module stop the build if the Rust
/// structure drifts from them.
pub mod frame {
    /// Bumped whenever a field is added, removed or moved.
    pub const VERSION: u32 = 1;
    /// Number of general-purpose register slots (`x0`..`x31`).
    pub const GPR_COUNT: usize = 32;
    /// Width of one register slot in bytes.
    pub const WORD: usize = core::mem::size_of::<usize>();
    pub const OFF_GPR: usize = 0;
    pub const OFF_CAUSE: usize = GPR_COUNT * WORD;
    pub const OFF_STATUS: usize = OFF_CAUSE + WORD;
    pub const OFF_EPC: usize = OFF_STATUS + WORD;
    /// Total frame size, padded so a frame keeps the stack 16-byte aligned.
    pub const SIZE: usize = (OFF_EPC + WORD + 15) & !15;
}

/// Register indices with a fixed role in the calling convention.
pub mod reg {
    pub const ZERO: usize = 0;
    pub const RA: usize = 1;
    pub const SP: usize = 2;
    pub const A0: usize = 10;
    pub const A1: usize = 11;
    pub const A2: usize = 12;
    /// The call-number register of a synchronous call.
    pub const A7: usize = 17;
}

/// Call number that turns a synchronous call into a voluntary yield.
pub const YIELD_SENTINEL: usize = usize::MAX;

/// `mstatus` bits written into manufactured contexts.
pub mod mstatus {
    /// Machine interrupt enable.
    pub const MIE: usize = 1 << 3;
    /// Interrupt enable restored into `MIE` by `mret`.
    pub const MPIE: usize = 1 << 7;
    /// Previous privilege = machine mode.
    pub const MPP_MACHINE: usize = 0b11 << 11;
}

/// # Context
///
/// The complete state of a hart at the moment a trap occurs, in exactly the
/// order the trap-entry assembly stores it. Every field is restored on
/// resume, so whoever produces a `Context` must initialise all of them.
#[repr(C, align(16))]
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Context {
    /// General-purpose registers x0-x31. `gpr[2]` holds the stack pointer
    /// to resume with.
    pub gpr: [usize; frame::GPR_COUNT],
    /// Machine Cause Register (`mcause`).
    pub mcause: usize,
    /// Machine Status Register (`mstatus`).
    pub mstatus: usize,
    /// Machine Exception Program Counter (`mepc`).
    pub mepc: usize,
}

impl Context {
    /// Creates a new, zero-initialized `Context`.
    pub const fn zeroed() -> Self {
        Self {
            gpr: [0; frame::GPR_COUNT],
            mcause: 0,
            mstatus: 0,
            mepc: 0,
        }
    }

    /// Interprets `mcause` as a trap cause.
    pub fn cause(&self) -> TrapCause {
        TrapCause::from_bits(self.mcause)
    }

    pub fn pc(&self) -> usize {
        self.mepc
    }

    pub fn set_pc(&mut self, pc: usize) {
        self.mepc = pc;
    }

    pub fn sp(&self) -> usize {
        self.gpr[reg::SP]
    }

    /// The call number of a synchronous call (`a7`).
    pub fn call_number(&self) -> usize {
        self.gpr[reg::A7]
    }

    /// Argument `n` of a synchronous call (`a0`..`a5`).
    pub fn arg(&self, n: usize) -> usize {
        debug_assert!(n < 6, "only a0-a5 carry call arguments");
        self.gpr[reg::A0 + n]
    }

    /// Sets the value seen in `a0` when this context resumes.
    pub fn set_return_value(&mut self, value: usize) {
        self.gpr[reg::A0] = value;
    }

    /// Whether interrupts come back on when this context resumes.
    pub fn resumes_with_interrupts(&self) -> bool {
        self.mstatus & mstatus::MPIE != 0
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::zeroed()
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("mepc", &format_args!("{:#x}", self.mepc))
            .field("mcause", &self.cause())
            .field("mstatus", &format_args!("{:#x}", self.mstatus))
            .field("sp", &format_args!("{:#x}", self.sp()))
            .field("a0", &format_args!("{:#x}", self.gpr[reg::A0]))
            .field("a7", &format_args!("{:#x}", self.gpr[reg::A7]))
            .finish()
    }
}

const _: () = {
    assert!(core::mem::offset_of!(Context, gpr) == frame::OFF_GPR);
    assert!(core::mem::offset_of!(Context, mcause) == frame::OFF_CAUSE);
    assert!(core::mem::offset_of!(Context, mstatus) == frame::OFF_STATUS);
    assert!(core::mem::offset_of!(Context, mepc) == frame::OFF_EPC);
    assert!(core::mem::size_of::<Context>() == frame::SIZE);
    assert!(frame::SIZE % 16 == 0);
};

/// # Context Reference
///
/// An exclusive, non-null handle to a [`Context`] living somewhere in
/// memory: on the trapped execution's stack, or at the top of a stack
/// prepared by `kcontext`.
///
/// Only one party holds the handle at a time: the trap path hands it to the
/// handler, the handler hands one back. `Option<ContextRef>` has the ABI of
/// a nullable `*mut Context`, with `None` playing the role of null.
#[repr(transparent)]
pub struct ContextRef(NonNull<Context>);

// Handing a frame to whoever runs the dispatcher is the whole point.
unsafe impl Send for ContextRef {}

impl ContextRef {
    /// Wraps a raw frame pointer, returning `None` for null.
    ///
    /// # Safety
    /// A non-null `ptr` must point to a valid, initialised `Context` that
    /// nothing else reads or writes while the returned handle is alive.
    pub unsafe fn from_raw(ptr: *mut Context) -> Option<Self> {
        NonNull::new(ptr).map(Self)
    }

    pub fn as_ptr(&self) -> *mut Context {
        self.0.as_ptr()
    }

    /// Gives up the handle, returning the raw frame pointer.
    pub fn into_raw(self) -> *mut Context {
        self.0.as_ptr()
    }

    /// Whether both handles name the same frame.
    pub fn ptr_eq(&self, other: &ContextRef) -> bool {
        self.0 == other.0
    }
}

impl From<&'static mut Context> for ContextRef {
    fn from(context: &'static mut Context) -> Self {
        Self(NonNull::from(context))
    }
}

impl Deref for ContextRef {
    type Target = Context;

    fn deref(&self) -> &Context {
        // Safety: exclusivity and validity are construction invariants.
        unsafe { self.0.as_ref() }
    }
}

impl DerefMut for ContextRef {
    fn deref_mut(&mut self) -> &mut Context {
        // Safety: exclusivity and validity are construction invariants.
        unsafe { self.0.as_mut() }
    }
}

impl fmt::Debug for ContextRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContextRef({:p}) ", self.0)?;
        fmt::Debug::fmt(&**self, f)
    }
}

/// A half-open address range `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Area {
    pub start: usize,
    pub end: usize,
}

impl Area {
    pub fn new(start: usize, end: usize) -> Result<Self, HalError> {
        if end < start {
            return Err(HalError::InvalidArea { start, end });
        }
        Ok(Self { start, end })
    }

    /// The area covered by `bytes`.
    pub fn from_slice(bytes: &mut [u8]) -> Self {
        let range = bytes.as_mut_ptr_range();
        Self {
            start: range.start as usize,
            end: range.end as usize,
        }
    }

    /// Zero for an inverted area built without [`Area::new`].
    pub fn size(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn contains(&self, addr: usize) -> bool {
        (self.start..self.end).contains(&addr)
    }
}
