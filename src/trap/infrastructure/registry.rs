// nt_hal/src/trap/infrastructure/registry.rs

//! # Handler Registry
//!
//! A single slot holding the kernel's event handler. Unset until the first
//! registration; each later registration replaces the previous handler.

use crate::trap::ds::Handler;
use spin::RwLock;

pub struct HandlerRegistry {
    slot: RwLock<Option<Handler>>,
}

impl HandlerRegistry {
    pub const fn new() -> Self {
        Self {
            slot: RwLock::new(None),
        }
    }

    /// Stores `handler`, returning the one it replaced.
    pub fn install(&self, handler: Handler) -> Option<Handler> {
        self.slot.write().replace(handler)
    }

    /// The current handler. The lock is released before the caller runs it,
    /// so a handler may re-register itself.
    pub fn current(&self) -> Option<Handler> {
        *self.slot.read()
    }

    pub fn is_installed(&self) -> bool {
        self.slot.read().is_some()
    }
}

impl Default for HandlerRegistry {
    fn default() -> Self {
        Self::new()
    }
}
