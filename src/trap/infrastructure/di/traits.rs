// nt_hal/src/trap/infrastructure/di/traits.rs

//! # Dependency Injection Traits
//!
//! The seam between the portable trap layer and the hart it runs on.

/// Interface for Hardware Control.
///
/// Covers the two pieces of machine state the trap layer owns: the trap
/// vector and the global interrupt-enable bit.
pub trait HardwareController: Send + Sync {
    /// Points the hardware trap vector at `entry`.
    fn install_trap_vector(&self, entry: usize);

    /// The currently installed trap vector.
    fn trap_vector(&self) -> usize;

    /// Whether machine-level interrupts are enabled.
    fn interrupts_enabled(&self) -> bool;

    /// Enables or disables machine-level interrupts.
    fn set_interrupts(&self, enable: bool);
}
