// nt_hal/src/main.rs

// 演示内核：在 NEMU 上启动，运行自测，然后用两个内核线程演示协作式调度
#![cfg_attr(target_os = "none", no_std)]
#![cfg_attr(target_os = "none", no_main)]

#[cfg(all(target_arch = "riscv64", target_os = "none"))]
mod kernel {
    use core::arch::{asm, global_asm};
    use core::ptr::addr_of_mut;
    use nt_hal::trap::{self, Area, ContextRef, Event, EventKind};
    use nt_hal::{error_print, info_print, println, trm, warn_print};
    use spin::Mutex;

    // 程序入口：设置启动栈后跳转到 rust_main
    global_asm!(
        r#"
        .section .text.entry
        .globl _start
    _start:
        la sp, _stack_top
        call rust_main
    "#
    );

    // 每个内核线程的栈大小 (16KB)
    const THREAD_STACK_SIZE: usize = 4096 * 4;
    // 切换这么多次后停机
    const MAX_SWITCHES: usize = 8;

    const SYS_WHOAMI: usize = 1;

    #[repr(align(16))]
    struct Stack([u8; THREAD_STACK_SIZE]);

    static mut STACK_A: Stack = Stack([0; THREAD_STACK_SIZE]);
    static mut STACK_B: Stack = Stack([0; THREAD_STACK_SIZE]);

    /// 轮转调度器：每次 Yield 切换到另一个线程
    struct Scheduler {
        threads: [Option<ContextRef>; 2],
        boot: Option<ContextRef>,
        current: Option<usize>,
        switches: usize,
    }

    impl Scheduler {
        const fn new() -> Self {
            Self {
                threads: [None, None],
                boot: None,
                current: None,
                switches: 0,
            }
        }

        fn switch(&mut self, ctx: ContextRef) -> Option<ContextRef> {
            match self.current {
                Some(id) => self.threads[id] = Some(ctx),
                None => self.boot = Some(ctx),
            }

            self.switches += 1;
            if self.switches > MAX_SWITCHES {
                info_print!("{} context switches done, halting", MAX_SWITCHES);
                trm::halt(0);
            }

            let next = self.current.map_or(0, |id| (id + 1) % self.threads.len());
            self.current = Some(next);
            self.threads[next].take()
        }
    }

    static SCHEDULER: Mutex<Scheduler> = Mutex::new(Scheduler::new());

    fn on_event(event: Event, mut ctx: ContextRef) -> Option<ContextRef> {
        match event.kind {
            EventKind::Yield => SCHEDULER.lock().switch(ctx),
            EventKind::Syscall => {
                let value = match ctx.call_number() {
                    SYS_WHOAMI => SCHEDULER.lock().current.unwrap_or(usize::MAX),
                    _ => usize::MAX,
                };
                ctx.set_return_value(value);
                Some(ctx)
            }
            EventKind::Error => {
                error_print!("Unhandled trap: {} at {:#x}", event, ctx.pc());
                trm::halt(1)
            }
            EventKind::IrqTimer | EventKind::IrqIoDev => {
                warn_print!("Spurious interrupt: {}", event);
                Some(ctx)
            }
        }
    }

    fn syscall(number: usize, arg: usize) -> usize {
        let ret: usize;
        unsafe {
            asm!("ecall", in("a7") number, inlateout("a0") arg => ret);
        }
        ret
    }

    extern "C" fn worker(tag: usize) {
        let mut round = 0usize;
        loop {
            let id = syscall(SYS_WHOAMI, 0);
            println!("[thread {}] tag {:#x}, round {}", id, tag, round);
            round += 1;
            trap::yield_now();
        }
    }

    fn stack_area(stack: *mut Stack) -> Area {
        // Safety: each stack backs exactly one kernel thread.
        Area::from_slice(unsafe { &mut (*stack).0 })
    }

    /// 清除BSS段
    unsafe fn clear_bss() {
        extern "C" {
            static mut sbss: u8;
            static mut ebss: u8;
        }
        let start = addr_of_mut!(sbss) as usize;
        let end = addr_of_mut!(ebss) as usize;
        for addr in start..end {
            unsafe { core::ptr::write_volatile(addr as *mut u8, 0) };
        }
    }

    /// Rust主函数 - 系统的真正入口点
    #[no_mangle]
    extern "C" fn rust_main() -> ! {
        unsafe { clear_bss() };
        info_print!("nt_hal demo starting");

        if let Err(err) = trm::init_heap() {
            error_print!("Heap initialization failed: {}", err);
            trm::halt(1);
        }
        let heap = trm::heap();
        info_print!("Heap: [{:#x}, {:#x})", heap.start, heap.end);

        if !nt_hal::test::run_all_tests() {
            trm::halt(1);
        }

        trap::init(on_event);
        unsafe {
            let a = trap::kcontext(stack_area(addr_of_mut!(STACK_A)), worker, 0xa);
            let b = trap::kcontext(stack_area(addr_of_mut!(STACK_B)), worker, 0xb);
            SCHEDULER.lock().threads = [Some(a), Some(b)];
        }

        // 第一次让出：启动上下文被保存，线程 0 开始运行
        trap::yield_now();

        warn_print!("Boot context resumed unexpectedly");
        trm::halt(1)
    }
}

#[cfg(not(all(target_arch = "riscv64", target_os = "none")))]
fn main() {
    println!("nt_hal_demo only runs on the riscv64 NEMU machine");
}
