// nt_hal/src/trap/infrastructure/mod.rs

//! # Trap Infrastructure Module
//!
//! The implementation behind the trap API: classification and dispatch,
//! the handler registry, the context factory, the hart controllers and the
//! dependency-injection container that wires them together.

pub mod classifier;
pub mod context_factory;
pub mod di;
pub mod dispatcher;
pub mod registry;
pub mod sim;

// Trap-entry assembly and CSR access for the real hart.
#[cfg(all(target_arch = "riscv64", target_os = "none"))]
pub mod low_level;
