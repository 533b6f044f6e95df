// 控制台输出模块
// 通过 TRM 的 putch 原语实现格式化输出，同时作为陷阱分发器的诊断输出端

use core::fmt;
use crate::trm;

/// 格式化输出函数
pub fn print(args: fmt::Arguments) {
    use core::fmt::Write;
    // Stdout 的 write_str 永远不会失败
    let _ = Stdout.write_fmt(args);
}

/// 直接输出字符串
fn print_str(s: &str) {
    for byte in s.bytes() {
        trm::putch(byte);
    }
}

/// 标准输出结构体，实现Write trait以支持格式化输出
struct Stdout;

impl core::fmt::Write for Stdout {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        print_str(s);
        Ok(())
    }
}

/// print宏 - 格式化输出
#[macro_export]
macro_rules! print {
    ($($arg:tt)*) => {
        $crate::console::print(format_args!($($arg)*))
    };
}

/// println宏 - 格式化输出并换行
#[macro_export]
macro_rules! println {
    () => {
        $crate::print!("\n")
    };
    ($($arg:tt)*) => {
        $crate::print!("{}\n", format_args!($($arg)*))
    };
}

/// 调试输出宏 - 带有文件和行号信息
#[macro_export]
macro_rules! debug_print {
    ($($arg:tt)*) => {{
        $crate::print!("[{}:{}] ", file!(), line!());
        $crate::println!($($arg)*);
    }};
}

/// 带颜色前缀的日志输出，供下面的分级宏使用
#[doc(hidden)]
#[macro_export]
macro_rules! __log_print {
    ($color:literal, $tag:literal, $($arg:tt)*) => {{
        $crate::print!(concat!("\x1b[", $color, "m[", $tag, "] "));
        $crate::print!($($arg)*);
        $crate::print!("\x1b[0m\n");
    }};
}

/// 错误输出宏 - 红色高亮显示
#[macro_export]
macro_rules! error_print {
    ($($arg:tt)*) => {
        $crate::__log_print!("31", "ERROR", $($arg)*)
    };
}

/// 警告输出宏 - 黄色高亮显示
#[macro_export]
macro_rules! warn_print {
    ($($arg:tt)*) => {
        $crate::__log_print!("33", "WARN", $($arg)*)
    };
}

/// 信息输出宏 - 绿色高亮显示
#[macro_export]
macro_rules! info_print {
    ($($arg:tt)*) => {
        $crate::__log_print!("32", "INFO", $($arg)*)
    };
}
