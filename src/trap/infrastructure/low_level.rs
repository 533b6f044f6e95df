// nt_hal/src/trap/infrastructure/low_level.rs

//! # Low-Level Trap Hardware Control
//!
//! The trap-entry assembly and direct access to the machine-mode trap CSRs.
//! Only built for the bare-metal riscv64 target.

use super::di::traits::HardwareController;
use crate::trap::ds::{frame, reg, Context, YIELD_SENTINEL};
use core::arch::{asm, global_asm};
use riscv::register::mstatus;

// Saves x1, x3-x31, the pre-trap sp and the trap CSRs into a frame pushed
// on the current stack, calls the bridge with the frame in a0, then resumes
// from whichever frame the bridge returned. sp is restored last, from the
// returned frame's gpr[2]. The hart clears mstatus.MIE on entry and nothing
// here sets it, so dispatch runs with traps masked.
global_asm!(
    r#"
    .section .text
    .globl __nt_trap_entry
    .align 3
__nt_trap_entry:
    addi sp, sp, -{size}
    sd x1, 1*{w}(sp)
    sd x3, 3*{w}(sp)
    sd x4, 4*{w}(sp)
    sd x5, 5*{w}(sp)
    sd x6, 6*{w}(sp)
    sd x7, 7*{w}(sp)
    sd x8, 8*{w}(sp)
    sd x9, 9*{w}(sp)
    sd x10, 10*{w}(sp)
    sd x11, 11*{w}(sp)
    sd x12, 12*{w}(sp)
    sd x13, 13*{w}(sp)
    sd x14, 14*{w}(sp)
    sd x15, 15*{w}(sp)
    sd x16, 16*{w}(sp)
    sd x17, 17*{w}(sp)
    sd x18, 18*{w}(sp)
    sd x19, 19*{w}(sp)
    sd x20, 20*{w}(sp)
    sd x21, 21*{w}(sp)
    sd x22, 22*{w}(sp)
    sd x23, 23*{w}(sp)
    sd x24, 24*{w}(sp)
    sd x25, 25*{w}(sp)
    sd x26, 26*{w}(sp)
    sd x27, 27*{w}(sp)
    sd x28, 28*{w}(sp)
    sd x29, 29*{w}(sp)
    sd x30, 30*{w}(sp)
    sd x31, 31*{w}(sp)

    addi t0, sp, {size}
    sd t0, 2*{w}(sp)
    csrr t0, mcause
    csrr t1, mstatus
    csrr t2, mepc
    sd t0, {off_cause}(sp)
    sd t1, {off_status}(sp)
    sd t2, {off_epc}(sp)

    mv a0, sp
    call {bridge}
    mv sp, a0

    ld t1, {off_status}(sp)
    ld t2, {off_epc}(sp)
    csrw mstatus, t1
    csrw mepc, t2

    ld x1, 1*{w}(sp)
    ld x3, 3*{w}(sp)
    ld x4, 4*{w}(sp)
    ld x5, 5*{w}(sp)
    ld x6, 6*{w}(sp)
    ld x7, 7*{w}(sp)
    ld x8, 8*{w}(sp)
    ld x9, 9*{w}(sp)
    ld x10, 10*{w}(sp)
    ld x11, 11*{w}(sp)
    ld x12, 12*{w}(sp)
    ld x13, 13*{w}(sp)
    ld x14, 14*{w}(sp)
    ld x15, 15*{w}(sp)
    ld x16, 16*{w}(sp)
    ld x17, 17*{w}(sp)
    ld x18, 18*{w}(sp)
    ld x19, 19*{w}(sp)
    ld x20, 20*{w}(sp)
    ld x21, 21*{w}(sp)
    ld x22, 22*{w}(sp)
    ld x23, 23*{w}(sp)
    ld x24, 24*{w}(sp)
    ld x25, 25*{w}(sp)
    ld x26, 26*{w}(sp)
    ld x27, 27*{w}(sp)
    ld x28, 28*{w}(sp)
    ld x29, 29*{w}(sp)
    ld x30, 30*{w}(sp)
    ld x31, 31*{w}(sp)
    ld sp, 2*{w}(sp)
    mret
    "#,
    size = const frame::SIZE,
    w = const frame::WORD,
    off_cause = const frame::OFF_CAUSE,
    off_status = const frame::OFF_STATUS,
    off_epc = const frame::OFF_EPC,
    bridge = sym super::di::__nt_irq_handle,
);

extern "C" {
    fn __nt_trap_entry();
}

/// Address of the trap-entry routine, as written into `mtvec`.
pub fn trap_entry() -> usize {
    __nt_trap_entry as usize
}

/// The hart this code runs on.
pub struct NativeHart;

impl HardwareController for NativeHart {
    fn install_trap_vector(&self, entry: usize) {
        // Direct mode: the low two bits stay zero because the entry is
        // 8-byte aligned.
        unsafe {
            asm!("csrw mtvec, {}", in(reg) entry);
        }
    }

    fn trap_vector(&self) -> usize {
        let value: usize;
        unsafe {
            asm!("csrr {}, mtvec", out(reg) value);
        }
        value
    }

    fn interrupts_enabled(&self) -> bool {
        mstatus::read().mie()
    }

    fn set_interrupts(&self, enable: bool) {
        unsafe {
            if enable {
                mstatus::set_mie();
            } else {
                mstatus::clear_mie();
            }
        }
    }
}

/// Traps into the dispatcher with the yield sentinel as the call number.
#[inline]
pub fn ecall_yield() {
    unsafe {
        asm!("ecall", in("a7") YIELD_SENTINEL, lateout("a0") _);
    }
}

const _: () = {
    assert!(frame::WORD == 8);
    assert!(reg::SP == 2);
    assert!(core::mem::size_of::<Context>() == frame::SIZE);
};
