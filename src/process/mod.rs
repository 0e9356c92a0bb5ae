//! # 进程控制模块
//!
//! 单次调用的生命周期：创建 → 等待（带超时）→ 终止 → 分类 → 释放。
//!
//! ## 结构
//! - `ProcessControl` / `ProcessHandle`: 可移植的进程控制接口
//! - `native`: 基于 `std::process` 的实现（含平台相关的退出码处理）
//! - `runner`: 只依赖接口的调用状态机
//!
//! ## 依赖关系
//! - 被 `batch/runner.rs` 调用
//! - 使用 `template.rs` 的 `InvocationRequest`
//! - 使用 `config.rs` 的 `Timeout`

pub mod native;
pub mod runner;

pub use native::NativeProcessControl;
pub use runner::ProcessRunner;

use crate::config::Timeout;
use crate::template::InvocationRequest;

use std::io;
use std::path::PathBuf;
use std::time::Duration;

/// 进程创建能力
pub trait ProcessControl: Send + Sync {
    type Handle: ProcessHandle;

    /// 启动具体命令
    fn spawn(&self, request: &InvocationRequest) -> io::Result<Self::Handle>;
}

/// 运行中的进程
///
/// 实现必须在 drop 时释放所有系统资源；若进程仍未被回收，
/// drop 时应将其终止并回收。
pub trait ProcessHandle {
    /// 进程 ID
    fn id(&self) -> u32;

    /// 等待进程退出，超时返回 `Ok(None)`
    fn wait_timeout(&mut self, timeout: Timeout) -> io::Result<Option<i32>>;

    /// 强制终止并回收进程
    fn terminate(&mut self) -> io::Result<()>;
}

/// 单次调用的分类结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvocationStatus {
    /// 退出码为 0
    Success,
    /// 退出码非 0
    NonZeroExit,
    /// 超时后被强制终止
    TimedOut,
}

/// 单次调用记录
#[derive(Debug, Clone)]
pub struct InvocationResult {
    pub input: PathBuf,
    /// 进程退出码；超时被终止的调用没有退出码
    pub exit_code: Option<i32>,
    pub status: InvocationStatus,
    pub duration: Duration,
}
