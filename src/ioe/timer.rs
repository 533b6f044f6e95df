// nt_hal/src/ioe/timer.rs

//! Uptime counter and real-time clock.

use super::{Port, RTC_ADDR, TIMER_ADDR};

/// Wall-clock time as the RTC reports it.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Rtc {
    pub second: i32,
    pub minute: i32,
    pub hour: i32,
    pub day: i32,
    pub month: i32,
    pub year: i32,
}

/// Microseconds since the machine started.
pub fn uptime_us(port: &impl Port) -> u64 {
    port.read64(TIMER_ADDR)
}

/// Reads the six RTC fields, seconds first.
pub fn rtc(port: &impl Port) -> Rtc {
    let field = |index: usize| port.read32(RTC_ADDR + 4 * index) as i32;
    Rtc {
        second: field(0),
        minute: field(1),
        hour: field(2),
        day: field(3),
        month: field(4),
        year: field(5),
    }
}
