// nt_hal/src/trap/infrastructure/dispatcher.rs

//! # Dispatcher
//!
//! Classifies a trap, hands the event and the frame to the registered
//! handler, and returns the frame the trap path should resume.

use super::classifier;
use super::registry::HandlerRegistry;
use crate::trap::collections::RingBuffer;
use crate::trap::ds::{ContextRef, Handler, TrapCause};
use crate::error_print;
use core::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use spin::Mutex;

/// Number of unrecognized traps remembered per dispatcher.
pub const TRAP_LOG_CAPACITY: usize = 32;

/// A trap the classifier had no mapping for.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct UnknownTrap {
    pub cause: TrapCause,
    pub pc: usize,
}

pub type TrapLog = RingBuffer<UnknownTrap, TRAP_LOG_CAPACITY>;

pub struct Dispatcher {
    registry: HandlerRegistry,
    unknown: Mutex<TrapLog>,
    dispatching: AtomicBool,
    delivered: AtomicU64,
}

impl Dispatcher {
    pub const fn new() -> Self {
        Self {
            registry: HandlerRegistry::new(),
            unknown: Mutex::new(RingBuffer::new()),
            dispatching: AtomicBool::new(false),
            delivered: AtomicU64::new(0),
        }
    }

    pub fn registry(&self) -> &HandlerRegistry {
        &self.registry
    }

    /// Shorthand for `registry().install(handler)`.
    pub fn register(&self, handler: Handler) -> Option<Handler> {
        self.registry.install(handler)
    }

    /// Dispatches the trap described by the frame's own `mcause`.
    pub fn dispatch_frame(&self, context: ContextRef) -> ContextRef {
        let cause = context.cause();
        self.dispatch(cause, context)
    }

    /// Runs one trap through classification and the handler.
    ///
    /// With no handler registered the frame comes back untouched: not even
    /// the pc is advanced. A handler returning `None` has left nothing to
    /// resume, which is fatal.
    ///
    /// # Panics
    /// Panics if the handler returns `None`, or if a trap arrives while
    /// this dispatcher is still handling the previous one.
    pub fn dispatch(&self, cause: TrapCause, mut context: ContextRef) -> ContextRef {
        let Some(handler) = self.registry.current() else {
            return context;
        };

        let _guard = DispatchGuard::enter(&self.dispatching, cause);
        self.delivered.fetch_add(1, Ordering::Relaxed);

        let classification = classifier::classify(cause, &context);
        if classification.is_unrecognized() {
            error_print!("Unknown Event: {}", cause);
            // The kernel may be copying the log when the trap arrives;
            // spinning here would never let it finish.
            match self.unknown.try_lock() {
                Some(mut log) => log.push(UnknownTrap {
                    cause,
                    pc: context.pc(),
                }),
                None => error_print!("Trap log busy, dropped entry for {}", cause),
            }
        }
        classification.apply(&mut context);

        let event = classification.event;
        match handler(event, context) {
            Some(next) => next,
            None => panic!("event handler returned a null context for {}", event),
        }
    }

    /// How many traps reached a registered handler.
    pub fn delivered(&self) -> u64 {
        self.delivered.load(Ordering::Relaxed)
    }

    /// Copies out the unrecognized traps seen so far, oldest first.
    pub fn unknown_traps(&self) -> TrapLog {
        let log = self.unknown.lock();
        let mut copy = TrapLog::new();
        for entry in log.iter() {
            copy.push(*entry);
        }
        copy
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Marks a dispatch in progress; a second `enter` before the first guard
/// drops means a trap was taken with traps unmasked.
struct DispatchGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> DispatchGuard<'a> {
    fn enter(flag: &'a AtomicBool, cause: TrapCause) -> Self {
        if flag.swap(true, Ordering::AcqRel) {
            panic!("nested trap {:?} delivered during dispatch", cause);
        }
        Self { flag }
    }
}

impl Drop for DispatchGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}
