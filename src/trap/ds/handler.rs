// nt_hal/src/trap/ds/handler.rs

//! # Handler Definitions

use super::context::ContextRef;
use super::event::Event;

/// The kernel's event handler.
///
/// It receives the classified event together with the interrupted context
/// and returns the context to resume: the same one, or a different one to
/// switch executions. Returning `None` (a null context) is fatal.
pub type Handler = fn(Event, ContextRef) -> Option<ContextRef>;

/// Entry point of a manufactured kernel thread. Receives the `arg` given to
/// `kcontext` in `a0`.
pub type EntryFn = extern "C" fn(arg: usize);
