// nt_hal/src/ioe/serial.rs

//! Serial console. The port takes one byte per write and never stalls.

use super::{Port, SERIAL_PORT};

pub fn putch(port: &impl Port, ch: u8) {
    port.write8(SERIAL_PORT, ch);
}

pub fn puts(port: &impl Port, s: &str) {
    for byte in s.bytes() {
        putch(port, byte);
    }
}
