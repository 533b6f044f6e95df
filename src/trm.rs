// nt_hal/src/trm.rs

//! # Turing Machine Basics
//!
//! The minimum a program needs from the machine: a byte sink, a way to
//! stop, and a heap region.

use crate::trap::Area;
use crate::HalError;
use core::alloc::{GlobalAlloc, Layout};
use core::ptr::{self, NonNull};
use linked_list_allocator::Heap;
use spin::Mutex;

/// Start of physical memory on the NEMU machine.
pub const PMEM_BASE: usize = 0x8000_0000;
/// Size of physical memory on the NEMU machine.
pub const PMEM_SIZE: usize = 0x1000_0000;
/// One past the last byte of physical memory.
pub const PMEM_END: usize = PMEM_BASE + PMEM_SIZE;

/// Writes one byte to the machine console.
#[cfg(all(target_os = "none", not(test)))]
#[inline]
pub fn putch(ch: u8) {
    use crate::ioe::{serial, Mmio};
    serial::putch(&Mmio, ch);
}

/// Writes one byte to the machine console.
#[cfg(test)]
#[inline]
pub fn putch(ch: u8) {
    use std::io::Write;
    let _ = std::io::stdout().write_all(&[ch]);
}

/// Writes one byte to the machine console. Hosted builds have no serial
/// device, so the byte is dropped.
#[cfg(not(any(target_os = "none", test)))]
#[inline]
pub fn putch(_ch: u8) {}

/// Stops the machine with `code` as the exit status.
///
/// NEMU treats `ebreak` as the "good/bad trap" instruction and reads the
/// status from `a0`.
#[cfg(all(target_arch = "riscv64", target_os = "none"))]
pub fn halt(code: i32) -> ! {
    unsafe {
        core::arch::asm!("ebreak", in("a0") code as usize);
    }
    // ebreak does not return on NEMU; spin if a debugger resumes us.
    loop {
        core::hint::spin_loop();
    }
}

/// Stops the machine with `code` as the exit status.
#[cfg(not(all(target_arch = "riscv64", target_os = "none")))]
pub fn halt(code: i32) -> ! {
    panic!("machine halted with code {}", code)
}

/// The free memory between the end of the loaded image and the end of
/// physical memory.
#[cfg(all(target_arch = "riscv64", target_os = "none"))]
pub fn heap() -> Area {
    extern "C" {
        static _heap_start: u8;
    }
    // Safety: only the address of the linker symbol is taken.
    let start = unsafe { ptr::addr_of!(_heap_start) as usize };
    Area { start, end: PMEM_END }
}

/// Smallest area the linked-list allocator can keep a hole descriptor in.
const MIN_HEAP_SIZE: usize = 4 * core::mem::size_of::<usize>();

/// A `GlobalAlloc` over a first-fit linked-list heap.
pub struct TrmHeap {
    heap: Mutex<Option<Heap>>,
}

impl TrmHeap {
    pub const fn new() -> Self {
        Self {
            heap: Mutex::new(None),
        }
    }

    /// Hands `area` to the allocator.
    ///
    /// # Safety
    /// `area` must be valid, writable memory that nothing else uses for as
    /// long as this heap is alive.
    pub unsafe fn init(&self, area: Area) -> Result<(), HalError> {
        let mut guard = self.heap.lock();
        if guard.is_some() {
            return Err(HalError::HeapAlreadyInitialized);
        }
        if area.size() < MIN_HEAP_SIZE {
            return Err(HalError::HeapTooSmall { size: area.size() });
        }

        let mut heap = Heap::empty();
        heap.init(area.start as *mut u8, area.size());
        *guard = Some(heap);
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.heap.lock().is_some()
    }

    /// Returns `(total, used, free)` in bytes.
    pub fn usage(&self) -> Option<(usize, usize, usize)> {
        self.heap
            .lock()
            .as_ref()
            .map(|heap| (heap.size(), heap.used(), heap.free()))
    }
}

impl Default for TrmHeap {
    fn default() -> Self {
        Self::new()
    }
}

unsafe impl GlobalAlloc for TrmHeap {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        match self.heap.lock().as_mut() {
            Some(heap) => heap
                .allocate_first_fit(layout)
                .map_or(ptr::null_mut(), NonNull::as_ptr),
            None => ptr::null_mut(),
        }
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        if let (Some(heap), Some(ptr)) = (self.heap.lock().as_mut(), NonNull::new(ptr)) {
            heap.deallocate(ptr, layout);
        }
    }
}

#[cfg(all(feature = "global-heap", target_arch = "riscv64", target_os = "none", not(test)))]
#[global_allocator]
pub static GLOBAL_HEAP: TrmHeap = TrmHeap::new();

/// Gives the whole TRM heap area to the global allocator.
#[cfg(all(feature = "global-heap", target_arch = "riscv64", target_os = "none", not(test)))]
pub fn init_heap() -> Result<(), HalError> {
    // Safety: the linker script reserves everything above `_heap_start`.
    unsafe { GLOBAL_HEAP.init(heap()) }
}
