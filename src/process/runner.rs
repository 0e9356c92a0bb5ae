//! # 调用执行器
//!
//! 单次调用的状态机：
//!
//! ```text
//! Created ──spawn──▶ Running ──exit──────▶ Completed (Success / NonZeroExit)
//!    │                  ├──timeout─▶ terminate ─▶ TimedOut
//!    ▼                  ▼
//! SpawnFailed       WaitFailed / TerminateFailed
//! ```
//!
//! `Completed` 和 `TimedOut` 是记录结果；其余三种终止整个运行。
//! 句柄在每条路径上都随作用域结束而释放。
//!
//! ## 依赖关系
//! - 被 `batch/runner.rs` 调用
//! - 只依赖 `ProcessControl` / `ProcessHandle` 接口

use super::{InvocationResult, InvocationStatus, ProcessControl, ProcessHandle};
use crate::config::Timeout;
use crate::error::{Result, RunnerError};
use crate::template::InvocationRequest;

use std::time::Instant;

/// 调用执行器
pub struct ProcessRunner<C> {
    control: C,
    timeout: Timeout,
}

impl<C: ProcessControl> ProcessRunner<C> {
    pub fn new(control: C, timeout: Timeout) -> Self {
        Self { control, timeout }
    }

    pub fn timeout(&self) -> Timeout {
        self.timeout
    }

    /// 执行一次调用并分类结果
    pub fn run(&self, request: &InvocationRequest) -> Result<InvocationResult> {
        let start = Instant::now();

        let mut handle =
            self.control
                .spawn(request)
                .map_err(|source| RunnerError::SpawnFailed {
                    command: request.command_line(),
                    source,
                })?;
        let pid = handle.id();

        let waited = handle
            .wait_timeout(self.timeout)
            .map_err(|source| RunnerError::WaitFailed {
                command: request.command_line(),
                pid,
                source,
            })?;

        let (exit_code, status) = match waited {
            Some(0) => (Some(0), InvocationStatus::Success),
            Some(code) => (Some(code), InvocationStatus::NonZeroExit),
            None => {
                handle
                    .terminate()
                    .map_err(|source| RunnerError::TerminateFailed {
                        command: request.command_line(),
                        pid,
                        source,
                    })?;
                (None, InvocationStatus::TimedOut)
            }
        };
        drop(handle);

        Ok(InvocationResult {
            input: request.input().to_path_buf(),
            exit_code,
            status,
            duration: start.elapsed(),
        })
    }
}


#[cfg(all(test, unix))]
mod native_tests {
    use super::*;
    use crate::process::native::tests::is_alive;
    use crate::process::NativeProcessControl;
    use crate::template::CommandTemplate;

    use std::fs;
    use std::path::Path;
    use std::time::Duration;

    #[test]
    fn test_sleep_times_out_and_target_is_gone() {
        let tmp = tempfile::tempdir().unwrap();
        let pid_file = tmp.path().join("pid");

        let runner = ProcessRunner::new(
            NativeProcessControl::default(),
            Timeout::Bounded(Duration::from_millis(500)),
        );
        let script = format!("echo $$ > '{}'; exec sleep 10", pid_file.display());
        let request = CommandTemplate::new(vec![
            "sh".to_string(),
            "-c".to_string(),
            script,
            "@@".to_string(),
        ])
        .unwrap()
        .substitute(Path::new("a.txt"));

        let result = runner.run(&request).unwrap();
        assert_eq!(result.status, InvocationStatus::TimedOut);
        assert_eq!(result.exit_code, None);
        assert!(result.duration < Duration::from_secs(5));

        // `exec` 保持同一个 pid，记录下的就是被终止的 sleep
        let pid: u32 = fs::read_to_string(&pid_file)
            .unwrap()
            .trim()
            .parse()
            .unwrap();
        assert!(!is_alive(pid));
    }

    #[test]
    fn test_false_is_nonzero() {
        let runner = ProcessRunner::new(
            NativeProcessControl::default(),
            Timeout::Bounded(Duration::from_secs(5)),
        );
        let request = CommandTemplate::parse("false @@")
            .unwrap()
            .substitute(Path::new("a.txt"));

        let result = runner.run(&request).unwrap();
        assert_eq!(result.status, InvocationStatus::NonZeroExit);
        assert_eq!(result.exit_code, Some(1));
    }
}
