// nt_hal/src/trap/ds/config.rs

//! # Trap Layer Configuration

/// How the interrupt-enable accessors behave.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum InterruptPolicy {
    /// The accessors read and write the hart's interrupt-enable bit.
    Masking,
    /// Interrupts stay off. `set_interrupts` forces the bit clear and
    /// `interrupts_enabled` always answers `false`; manufactured contexts
    /// resume with interrupts disabled.
    AlwaysDisabled,
}

impl InterruptPolicy {
    /// Whether interrupts may ever be switched on under this policy.
    pub const fn allows_interrupts(self) -> bool {
        matches!(self, Self::Masking)
    }
}

/// Runtime configuration handed to `init_with`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct CteConfig {
    pub interrupts: InterruptPolicy,
}

impl CteConfig {
    /// The configuration `init` uses. The `inert-interrupts` feature selects
    /// [`InterruptPolicy::AlwaysDisabled`].
    pub const DEFAULT: Self = Self {
        interrupts: if cfg!(feature = "inert-interrupts") {
            InterruptPolicy::AlwaysDisabled
        } else {
            InterruptPolicy::Masking
        },
    };

    pub const fn masking() -> Self {
        Self {
            interrupts: InterruptPolicy::Masking,
        }
    }

    pub const fn inert() -> Self {
        Self {
            interrupts: InterruptPolicy::AlwaysDisabled,
        }
    }
}

impl Default for CteConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
