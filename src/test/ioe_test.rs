// 设备（IOE）功能测试模块
// 只有 NEMU 目标机上才有真实设备，其他平台上这些测试被跳过

use super::{TestCase, TestResult, TestRunner};
use crate::ioe::{gpu, input, serial, timer, Mmio};
use crate::println;

/// 返回可用的设备端口
#[cfg(all(target_arch = "riscv64", target_os = "none"))]
fn device_port() -> Option<Mmio> {
    Some(Mmio)
}

/// 返回可用的设备端口
#[cfg(not(all(target_arch = "riscv64", target_os = "none")))]
fn device_port() -> Option<Mmio> {
    None
}

/// 测试直接写串口
fn test_serial_puts() -> TestResult {
    let Some(port) = device_port() else {
        return TestResult::Skip;
    };
    serial::puts(&port, "  serial: direct write ok\n");
    TestResult::Pass
}

/// 测试计时器单调递增
fn test_uptime_monotonic() -> TestResult {
    let Some(port) = device_port() else {
        return TestResult::Skip;
    };
    let first = timer::uptime_us(&port);
    let second = timer::uptime_us(&port);
    check!(second >= first, "uptime went backwards: {} -> {}", first, second);
    println!("  uptime: {} us", second);
    TestResult::Pass
}

/// 测试 RTC 字段在合理范围内
fn test_rtc_fields() -> TestResult {
    let Some(port) = device_port() else {
        return TestResult::Skip;
    };
    let now = timer::rtc(&port);
    check!((0..60).contains(&now.second), "second out of range: {}", now.second);
    check!((0..60).contains(&now.minute), "minute out of range: {}", now.minute);
    check!((0..24).contains(&now.hour), "hour out of range: {}", now.hour);
    println!(
        "  rtc: {}-{:02}-{:02} {:02}:{:02}:{:02}",
        now.year, now.month, now.day, now.hour, now.minute, now.second
    );
    TestResult::Pass
}

/// 测试键盘轮询在无输入时不报告按键
fn test_keyboard_poll() -> TestResult {
    let Some(port) = device_port() else {
        return TestResult::Skip;
    };
    check!(input::config(&port).present, "keyboard not present");
    // 排空启动前积累的事件
    for _ in 0..64 {
        if input::poll_key(&port).is_none() {
            return TestResult::Pass;
        }
    }
    println!("  FAIL: keyboard never reported an empty queue");
    TestResult::Fail
}

/// 测试显示配置并提交一次同步
fn test_gpu_sync() -> TestResult {
    let Some(port) = device_port() else {
        return TestResult::Skip;
    };
    check!(gpu::status(&port).ready, "VGA controller not ready");
    let screen = gpu::config(&port);
    println!("  screen: {}x{}", screen.width, screen.height);
    if screen.width == 0 || screen.height == 0 {
        // 没有启用 VGA 设备
        return TestResult::Skip;
    }

    let pixels = [0x00ff_ffffu32; 16];
    gpu::fbdraw(
        &port,
        &screen,
        &gpu::FbDraw {
            x: 0,
            y: 0,
            w: 4,
            h: 4,
            pixels: Some(&pixels),
            sync: true,
        },
    );
    TestResult::Pass
}

/// 设备测试用例列表
const IOE_TESTS: &[TestCase] = &[
    TestCase {
        name: "serial_puts",
        func: test_serial_puts,
        description: "Serial port takes a direct string write",
    },
    TestCase {
        name: "uptime_monotonic",
        func: test_uptime_monotonic,
        description: "Timer never runs backwards",
    },
    TestCase {
        name: "rtc_fields",
        func: test_rtc_fields,
        description: "RTC reports a plausible time of day",
    },
    TestCase {
        name: "keyboard_poll",
        func: test_keyboard_poll,
        description: "Keyboard poll drains to an empty event",
    },
    TestCase {
        name: "gpu_sync",
        func: test_gpu_sync,
        description: "Framebuffer write followed by a sync",
    },
];

/// 运行所有设备测试
pub fn run_ioe_tests(runner: &mut TestRunner) {
    runner.run_suite("IOE", IOE_TESTS);
}
