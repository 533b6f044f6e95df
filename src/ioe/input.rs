// nt_hal/src/ioe/input.rs

//! Keyboard.
//!
//! The status word holds the key code with bit 15 set for a press. A
//! non-zero status has to be acknowledged by writing 1 to the word after
//! it before the device presents the next event.

use super::{Port, KBD_ADDR};

pub const KEYDOWN_MASK: u32 = 0x8000;
const KBD_ACK: usize = KBD_ADDR + 4;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub keydown: bool,
    /// Zero when no key event was pending.
    pub keycode: u32,
}

impl KeyEvent {
    pub fn is_none(&self) -> bool {
        self.keycode == 0 && !self.keydown
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct InputConfig {
    pub present: bool,
}

/// NEMU always wires up the keyboard.
pub fn config(_port: &impl Port) -> InputConfig {
    InputConfig { present: true }
}

/// Takes the pending key event, if any.
pub fn poll_key(port: &impl Port) -> KeyEvent {
    let info = port.read32(KBD_ADDR);
    if info != 0 {
        port.write32(KBD_ACK, 1);
    }
    KeyEvent {
        keydown: info & KEYDOWN_MASK != 0,
        keycode: info & !KEYDOWN_MASK,
    }
}
