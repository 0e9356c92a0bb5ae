//! # 原生进程控制
//!
//! 基于 `std::process::Command` 实现 `ProcessControl`。
//!
//! ## 功能
//! - 标准输入为空；目标输出默认丢弃
//! - 带退避的 `try_wait` 轮询实现超时等待
//! - 句柄 drop 时终止并回收未结束的子进程（避免僵尸进程/句柄泄漏）
//!
//! ## 依赖关系
//! - 被 `process/runner.rs` 通过 trait 调用
//! - 被 `commands/run.rs` 构造

use super::{ProcessControl, ProcessHandle};
use crate::config::Timeout;
use crate::template::InvocationRequest;

use std::io;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};

/// 轮询间隔下限
const POLL_MIN: Duration = Duration::from_millis(1);
/// 轮询间隔上限
const POLL_MAX: Duration = Duration::from_millis(50);

/// 基于标准库的进程控制
#[derive(Debug, Clone, Default)]
pub struct NativeProcessControl {
    /// 目标进程是否继承标准输出/错误
    show_output: bool,
}

impl NativeProcessControl {
    pub fn new(show_output: bool) -> Self {
        Self { show_output }
    }

    fn output_stdio(&self) -> Stdio {
        if self.show_output {
            Stdio::inherit()
        } else {
            Stdio::null()
        }
    }
}

impl ProcessControl for NativeProcessControl {
    type Handle = NativeHandle;

    fn spawn(&self, request: &InvocationRequest) -> io::Result<NativeHandle> {
        let child = Command::new(request.program())
            .args(request.args())
            .stdin(Stdio::null())
            .stdout(self.output_stdio())
            .stderr(self.output_stdio())
            .spawn()?;

        Ok(NativeHandle {
            child,
            reaped: false,
        })
    }
}

/// 原生子进程句柄
#[derive(Debug)]
pub struct NativeHandle {
    child: Child,
    /// 是否已被 wait 回收
    reaped: bool,
}

impl ProcessHandle for NativeHandle {
    fn id(&self) -> u32 {
        self.child.id()
    }

    fn wait_timeout(&mut self, timeout: Timeout) -> io::Result<Option<i32>> {
        let limit = match timeout {
            Timeout::Infinite => {
                let status = self.child.wait()?;
                self.reaped = true;
                return Ok(Some(exit_code(status)));
            }
            Timeout::Bounded(limit) => limit,
        };

        let start = Instant::now();
        let mut interval = POLL_MIN;

        loop {
            if let Some(status) = self.child.try_wait()? {
                self.reaped = true;
                return Ok(Some(exit_code(status)));
            }

            let elapsed = start.elapsed();
            if elapsed >= limit {
                return Ok(None);
            }

            thread::sleep(interval.min(limit - elapsed));
            interval = (interval * 2).min(POLL_MAX);
        }
    }

    fn terminate(&mut self) -> io::Result<()> {
        if self.reaped {
            return Ok(());
        }
        match self.child.kill() {
            Ok(()) => {}
            // 进程恰好在超时后自行退出
            Err(e) if e.kind() == io::ErrorKind::InvalidInput => {}
            Err(e) => return Err(e),
        }
        self.child.wait()?;
        self.reaped = true;
        Ok(())
    }
}

impl Drop for NativeHandle {
    fn drop(&mut self) {
        if !self.reaped {
            let _ = self.child.kill();
            let _ = self.child.wait();
        }
    }
}

/// 取得退出码；被信号终止的进程按 shell 惯例记为 128 + 信号值
#[cfg(unix)]
pub fn exit_code(status: ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;

    match (status.code(), status.signal()) {
        (Some(code), _) => code,
        (None, Some(signal)) => 128 + signal,
        (None, None) => -1,
    }
}

/// 取得退出码
#[cfg(not(unix))]
pub fn exit_code(status: ExitStatus) -> i32 {
    status.code().unwrap_or(-1)
}

/// 退出码对应的信号（仅 Unix，用于日志）
#[cfg(unix)]
pub fn signal_of(code: i32) -> Option<i32> {
    (code > 128 && code < 128 + 65).then_some(code - 128)
}

#[cfg(not(unix))]
pub fn signal_of(_code: i32) -> Option<i32> {
    None
}
