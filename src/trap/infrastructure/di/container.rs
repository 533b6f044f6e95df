// nt_hal/src/trap/infrastructure/di/container.rs

//! # Trap System Dependency Injection Container
//!
//! Defines `CteSystem`, which ties a dispatcher to the hart it serves and
//! the policy it was configured with.

use super::traits::HardwareController;
use crate::info_print;
use crate::trap::ds::{Area, Context, ContextRef, CteConfig, EntryFn, Handler, InterruptPolicy};
use crate::trap::infrastructure::context_factory;
use crate::trap::infrastructure::dispatcher::Dispatcher;
use spin::RwLock;

pub struct CteSystem {
    dispatcher: Dispatcher,
    hart: &'static dyn HardwareController,
    config: RwLock<CteConfig>,
}

impl CteSystem {
    /// Creates a system for `hart` with the default configuration and no
    /// handler.
    pub const fn new(hart: &'static dyn HardwareController) -> Self {
        Self {
            dispatcher: Dispatcher::new(),
            hart,
            config: RwLock::new(CteConfig::DEFAULT),
        }
    }

    /// Points the hart's trap vector at `trap_entry` and installs `handler`.
    ///
    /// Calling it again replaces the handler and the configuration. Always
    /// reports success: a bad vector only shows up at the next trap.
    pub fn init(&self, config: CteConfig, handler: Handler, trap_entry: usize) -> bool {
        self.hart.install_trap_vector(trap_entry);
        *self.config.write() = config;
        self.dispatcher.register(handler);
        if !config.interrupts.allows_interrupts() {
            self.hart.set_interrupts(false);
        }
        info_print!(
            "CTE initialized: vector {:#x}, interrupts {:?}",
            trap_entry,
            config.interrupts
        );
        true
    }

    pub fn config(&self) -> CteConfig {
        *self.config.read()
    }

    pub fn policy(&self) -> InterruptPolicy {
        self.config.read().interrupts
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    pub fn hardware_controller(&self) -> &dyn HardwareController {
        self.hart
    }

    pub fn interrupts_enabled(&self) -> bool {
        match self.policy() {
            InterruptPolicy::Masking => self.hart.interrupts_enabled(),
            InterruptPolicy::AlwaysDisabled => false,
        }
    }

    pub fn set_interrupts(&self, enable: bool) {
        match self.policy() {
            InterruptPolicy::Masking => self.hart.set_interrupts(enable),
            InterruptPolicy::AlwaysDisabled => self.hart.set_interrupts(false),
        }
    }

    /// Builds a kernel-thread context whose interrupt state follows the
    /// active policy.
    ///
    /// # Safety
    /// See [`context_factory::kcontext`].
    pub unsafe fn kcontext(&self, stack: Area, entry: EntryFn, arg: usize) -> ContextRef {
        unsafe { context_factory::kcontext(stack, entry, arg, self.policy()) }
    }

    /// Dispatches the trap saved in `frame` and returns the frame to resume.
    ///
    /// # Panics
    /// Panics if `frame` is null: the trap path has nothing to hand over.
    ///
    /// # Safety
    /// A non-null `frame` must point to a complete, exclusively owned frame.
    pub unsafe fn handle_raw(&self, frame: *mut Context) -> *mut Context {
        let Some(context) = (unsafe { ContextRef::from_raw(frame) }) else {
            panic!("trap delivered without a register frame");
        };
        self.dispatcher.dispatch_frame(context).into_raw()
    }
}
