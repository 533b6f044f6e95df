// nt_hal/src/trap/ds/mod.rs

//! # Trap Data Structures Module
//!
//! Register frames, trap causes, events, the handler signature and the
//! layer's configuration.

pub mod config;
pub mod context;
pub mod event;
pub mod handler;
pub mod types;

pub use self::config::{CteConfig, InterruptPolicy};
pub use self::context::{frame, mstatus, reg, Area, Context, ContextRef, YIELD_SENTINEL};
pub use self::event::{Event, EventKind};
pub use self::handler::{EntryFn, Handler};
pub use self::types::{Exception, Interrupt, TrapCause};
