//! Kernel-facing trap API, driven through the global system on the
//! simulated hart. Tests share that system, so each one holds `SERIAL`.

use nt_hal::trap::{
    self, reg, sim, Area, Context, ContextRef, CteConfig, Event, EventKind, Exception, Interrupt,
    InterruptPolicy, TrapCause, YIELD_SENTINEL,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard};

static SERIAL: Mutex<()> = Mutex::new(());
static EVENTS: Mutex<Vec<EventKind>> = Mutex::new(Vec::new());

fn serial() -> MutexGuard<'static, ()> {
    SERIAL.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn events() -> MutexGuard<'static, Vec<EventKind>> {
    EVENTS.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn record(event: Event, mut ctx: ContextRef) -> Option<ContextRef> {
    events().push(event.kind);
    if event.kind == EventKind::Syscall {
        let value = ctx.call_number() + 100;
        ctx.set_return_value(value);
    }
    Some(ctx)
}

fn install_recorder(config: CteConfig) {
    events().clear();
    assert!(trap::init_with(config, record));
}

fn deliver(frame: &mut Context) -> *mut Context {
    unsafe { trap::simulate_trap(frame) }
}

#[test]
fn yield_reaches_handler_as_yield() {
    let _serial = serial();
    install_recorder(CteConfig::masking());
    let before = trap::delivered_traps();

    trap::yield_now();

    assert_eq!(*events(), vec![EventKind::Yield]);
    assert_eq!(trap::delivered_traps(), before + 1);
}

#[test]
fn n_traps_invoke_handler_n_times() {
    let _serial = serial();
    install_recorder(CteConfig::masking());

    let mut frames = vec![
        sim::ecall_frame(4, 0x1000),
        sim::trap_frame(Interrupt::MachineTimer.into(), 0x2000),
        sim::ecall_frame(YIELD_SENTINEL, 0x3000),
        sim::trap_frame(Interrupt::MachineExternal.into(), 0x4000),
        sim::trap_frame(Exception::StoreFault.into(), 0x5000),
        sim::ecall_frame(0, 0x6000),
    ];
    for frame in frames.iter_mut() {
        let out = deliver(frame);
        assert_eq!(out, frame as *mut Context);
    }

    assert_eq!(
        *events(),
        vec![
            EventKind::Syscall,
            EventKind::IrqTimer,
            EventKind::Yield,
            EventKind::IrqIoDev,
            EventKind::Error,
            EventKind::Syscall,
        ]
    );
}

#[test]
fn syscall_resumes_past_ecall_with_result() {
    let _serial = serial();
    install_recorder(CteConfig::masking());

    let mut frame = sim::ecall_frame(7, 0x8000_1000);
    deliver(&mut frame);

    assert_eq!(frame.mepc, 0x8000_1004);
    assert_eq!(frame.gpr[reg::A0], 107);

    // Delivering the resumed frame again moves on, never back.
    deliver(&mut frame);
    assert_eq!(frame.mepc, 0x8000_1008);
}

#[test]
fn unknown_trap_is_logged_with_its_pc() {
    let _serial = serial();
    install_recorder(CteConfig::masking());

    let mut frame = sim::trap_frame(Exception::IllegalInstruction.into(), 0x8000_2000);
    deliver(&mut frame);

    assert_eq!(*events(), vec![EventKind::Error]);
    assert_eq!(frame.mepc, 0x8000_2000);
    let log = trap::unknown_traps();
    let last = log.back().copied().unwrap();
    assert_eq!(last.cause, TrapCause::from(Exception::IllegalInstruction));
    assert_eq!(last.pc, 0x8000_2000);
}

static NEXT: Mutex<Option<usize>> = Mutex::new(None);

fn switch_to_next(_: Event, _: ContextRef) -> Option<ContextRef> {
    let next = NEXT.lock().unwrap().take()?;
    unsafe { ContextRef::from_raw(next as *mut Context) }
}

#[test]
fn returning_another_context_switches_to_it() {
    let _serial = serial();
    trap::init_with(CteConfig::masking(), switch_to_next);
    trap::set_interrupts(false);

    let other: &'static mut Context = Box::leak(Box::new(sim::ecall_frame(0, 0x9000)));
    // The other context was suspended with interrupts on.
    other.mstatus |= nt_hal::trap::ds::mstatus::MPIE;
    let other_ptr = other as *mut Context;
    *NEXT.lock().unwrap() = Some(other_ptr as usize);

    let mut current = sim::ecall_frame(YIELD_SENTINEL, 0x8000);
    let resumed = deliver(&mut current);

    assert_eq!(resumed, other_ptr);
    assert_eq!(current.mepc, 0x8004);
    assert!(trap::interrupts_enabled());
    trap::set_interrupts(false);
}

#[test]
fn interrupt_accessors_under_masking() {
    let _serial = serial();
    install_recorder(CteConfig::masking());

    trap::set_interrupts(true);
    assert!(trap::interrupts_enabled());
    trap::set_interrupts(true);
    assert!(trap::interrupts_enabled());
    trap::set_interrupts(false);
    assert!(!trap::interrupts_enabled());
    trap::set_interrupts(false);
    assert!(!trap::interrupts_enabled());
}

#[test]
fn interrupt_accessors_when_always_disabled() {
    let _serial = serial();
    install_recorder(CteConfig::inert());
    assert_eq!(trap::config().interrupts, InterruptPolicy::AlwaysDisabled);

    for enable in [true, false, true] {
        trap::set_interrupts(enable);
        assert!(!trap::interrupts_enabled());
    }

    // Traps still get delivered while interrupts stay off.
    trap::yield_now();
    assert_eq!(*events(), vec![EventKind::Yield]);
    assert!(!trap::interrupts_enabled());
}

static ENTRY_ARG: AtomicUsize = AtomicUsize::new(0);

extern "C" fn thread_entry(arg: usize) {
    ENTRY_ARG.store(arg, Ordering::SeqCst);
}

#[test]
fn kcontext_starts_entry_with_arg_on_its_stack() {
    let _serial = serial();
    install_recorder(CteConfig::masking());

    let memory: &'static mut [u8] = Box::leak(vec![0u8; 8192].into_boxed_slice());
    let stack = Area::from_slice(memory);
    let ctx = unsafe { trap::kcontext(stack, thread_entry, 0xdead_beef) };

    assert!(stack.contains(ctx.sp()));
    assert_eq!(ctx.sp() % 16, 0);
    assert_eq!(ctx.pc(), thread_entry as usize);
    assert!(ctx.resumes_with_interrupts());

    // The simulated resume calls `entry` on the test thread's own stack, so
    // only the saved sp is checked here. Running on the manufactured stack
    // is exercised by the demo kernel's thread switches on NEMU.
    ENTRY_ARG.store(0, Ordering::SeqCst);
    unsafe { sim::resume_entry(&ctx) };
    assert_eq!(ENTRY_ARG.load(Ordering::SeqCst), 0xdead_beef);
}

#[test]
fn kcontext_interrupt_state_follows_policy() {
    let _serial = serial();
    install_recorder(CteConfig::inert());

    let memory: &'static mut [u8] = Box::leak(vec![0u8; 4096].into_boxed_slice());
    let ctx = unsafe { trap::kcontext(Area::from_slice(memory), thread_entry, 1) };
    assert!(!ctx.resumes_with_interrupts());
}

fn drop_context(_: Event, _: ContextRef) -> Option<ContextRef> {
    None
}

#[test]
#[should_panic(expected = "null context")]
fn handler_returning_null_aborts() {
    let _serial = serial();
    trap::init(drop_context);
    trap::yield_now();
}
