// nt_hal/src/trap/infrastructure/classifier.rs

//! # Event Classifier
//!
//! Maps a raw trap cause plus the captured frame to exactly one [`Event`].
//! The mapping is a lookup in a static table, so it runs the same on the
//! hart and in a host test.

use crate::trap::ds::{
    Context, Event, EventKind, Exception, Interrupt, TrapCause, YIELD_SENTINEL,
};

/// Width of the `ecall` instruction. A synchronous call resumes past it.
pub const ECALL_WIDTH: usize = 4;

/// What a table entry does with a matching cause.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Route {
    /// A synchronous call: `Yield` when the call number is the sentinel,
    /// `Syscall` otherwise. The pc moves past the call instruction.
    SyncCall,
    /// A fixed event; the pc is left alone.
    Fixed(EventKind),
}

struct CauseEntry {
    cause: TrapCause,
    route: Route,
    msg: &'static str,
}

const CAUSE_TABLE: &[CauseEntry] = &[
    CauseEntry {
        cause: TrapCause::exception(Exception::UserEnvCall),
        route: Route::SyncCall,
        msg: "environment call from U-mode",
    },
    CauseEntry {
        cause: TrapCause::exception(Exception::SupervisorEnvCall),
        route: Route::SyncCall,
        msg: "environment call from S-mode",
    },
    CauseEntry {
        cause: TrapCause::exception(Exception::MachineEnvCall),
        route: Route::SyncCall,
        msg: "environment call from M-mode",
    },
    CauseEntry {
        cause: TrapCause::interrupt(Interrupt::MachineTimer),
        route: Route::Fixed(EventKind::IrqTimer),
        msg: "machine timer interrupt",
    },
    CauseEntry {
        cause: TrapCause::interrupt(Interrupt::MachineExternal),
        route: Route::Fixed(EventKind::IrqIoDev),
        msg: "machine external interrupt",
    },
];

/// The outcome of classifying one trap.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Classification {
    pub event: Event,
    /// Bytes to add to the saved pc before the handler sees the frame.
    pub pc_advance: usize,
}

impl Classification {
    /// Whether the cause had no entry in the table.
    pub fn is_unrecognized(&self) -> bool {
        self.event.kind == EventKind::Error
    }

    /// Applies the pc side effect to the frame.
    pub fn apply(&self, context: &mut Context) {
        context.mepc = context.mepc.wrapping_add(self.pc_advance);
    }
}

/// Classifies a trap without touching the frame.
pub fn classify(cause: TrapCause, context: &Context) -> Classification {
    let Some(entry) = CAUSE_TABLE.iter().find(|entry| entry.cause == cause) else {
        return Classification {
            event: Event::new(EventKind::Error, cause, "unrecognized trap cause"),
            pc_advance: 0,
        };
    };

    match entry.route {
        Route::SyncCall => {
            let kind = if context.call_number() == YIELD_SENTINEL {
                EventKind::Yield
            } else {
                EventKind::Syscall
            };
            Classification {
                event: Event::new(kind, cause, entry.msg),
                pc_advance: ECALL_WIDTH,
            }
        }
        Route::Fixed(kind) => Classification {
            event: Event::new(kind, cause, entry.msg),
            pc_advance: 0,
        },
    }
}

/// Classifies a trap and moves the saved pc past a synchronous call.
pub fn classify_and_advance(cause: TrapCause, context: &mut Context) -> Event {
    let classification = classify(cause, context);
    classification.apply(context);
    classification.event
}
