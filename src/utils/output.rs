//! # 运行日志
//!
//! corpus-runner 的全部终端输出：启动信息、逐个失败输入的 `[!!]` 行、
//! 汇总行，以及 stderr 上的致命错误。
//!
//! 消息文本由 `*_message` 函数生成，便于单独测试；`print_*` 只负责
//! 加前缀与着色。运行期间的输出由调用方包在 `ProgressBar::suspend` 中。
//!
//! ## 依赖关系
//! - 被 `main.rs`、`commands/run.rs` 与 `batch/runner.rs` 使用
//! - 使用 `process/native.rs` 推断信号
//! - 使用 `colored` crate

use crate::config::Timeout;
use crate::process::native::signal_of;

use colored::{ColoredString, Colorize};
use std::error::Error;
use std::path::Path;
use std::time::Duration;

fn ok_tag() -> ColoredString {
    "[OK]".green().bold()
}

fn fail_tag() -> ColoredString {
    "[!!]".red().bold()
}

fn err_tag() -> ColoredString {
    "[ERR]".red().bold()
}

/// 启动横幅
pub fn print_banner() {
    println!(
        "{} {} {} starting up...",
        ok_tag(),
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    );
}

/// 输入收集完成
pub fn print_inputs_found(count: usize) {
    println!("{} Found {} input files.", ok_tag(), count);
}

/// 目标命令与运行参数
pub fn print_target(command: &str, timeout: Timeout, jobs: usize) {
    println!("{} {}", "[*]".blue().bold(), target_message(command, timeout, jobs));
}

/// 打印警告消息
pub fn print_warning(msg: &str) {
    println!("{} {}", "[WARN]".yellow().bold(), msg);
}

/// 超时被终止的输入
pub fn print_timed_out(input: &Path, timeout: Timeout) {
    println!("{} {}", fail_tag(), timeout_message(input, timeout));
}

/// 非零退出的输入
pub fn print_nonzero_exit(input: &Path, code: i32, duration: Duration) {
    println!("{} {}", fail_tag(), exit_message(input, code, duration));
}

/// 分隔线 + 汇总行
pub fn print_all_done(total: usize, elapsed: Duration, throughput: f64) {
    println!("{}", "─".repeat(60).dimmed());
    println!(
        "{} {}",
        "[DONE]".green().bold(),
        summary_message(total, elapsed, throughput)
    );
}

/// 致命错误及其直接原因（stderr）
pub fn print_error(err: &dyn Error) {
    eprintln!("{} {}", err_tag(), err);
    if let Some(source) = err.source() {
        eprintln!("{}   caused by: {}", err_tag(), source);
    }
}

fn target_message(command: &str, timeout: Timeout, jobs: usize) -> String {
    format!(
        "Target: {} (timeout {}, {} job{})",
        command,
        timeout,
        jobs,
        if jobs == 1 { "" } else { "s" }
    )
}

fn timeout_message(input: &Path, timeout: Timeout) -> String {
    format!("Input {} timed out after {}.", input.display(), timeout)
}

/// 退出码同时以十进制和十六进制显示（Windows 异常码多为 0xC...）
fn exit_message(input: &Path, code: i32, duration: Duration) -> String {
    let mut msg = format!(
        "{:?} exited with code {} (0x{:x})",
        input.display().to_string(),
        code,
        code
    );
    if let Some(signal) = signal_of(code) {
        msg.push_str(&format!(", possibly signal {}", signal));
    }
    msg.push_str(&format!(" after {:.2?}", duration));
    msg
}

fn summary_message(total: usize, elapsed: Duration, throughput: f64) -> String {
    format!(
        "All done. {} files in {:.2?} ({:.2}/s)",
        total, elapsed, throughput
    )
}
