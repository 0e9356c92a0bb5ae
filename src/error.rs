//! # 统一错误处理模块
//!
//! 定义 corpus-runner 的所有错误类型，使用 `thiserror` 派生。
//!
//! 这里只收录会终止整个运行的错误；单次调用的非零退出和超时属于
//! 正常记录结果，见 `process::InvocationStatus`。
//!
//! ## 依赖关系
//! - 被所有其他模块使用
//! - 无外部模块依赖

use thiserror::Error;

/// corpus-runner 统一错误类型
#[derive(Error, Debug)]
pub enum RunnerError {
    // ─────────────────────────────────────────────────────────────
    // 配置错误（在启动任何进程之前检测）
    // ─────────────────────────────────────────────────────────────
    #[error("Wait timeout ({ms} ms) too long! Maximum is {max} ms, or -1 for infinite")]
    TimeoutTooLong { ms: i64, max: u64 },

    #[error("Invalid wait timeout: {0} ms (use -1 for infinite)")]
    InvalidTimeout(i64),

    #[error("Bad pattern {pattern:?}: {reason}")]
    BadPattern { pattern: String, reason: String },

    #[error("Failed to read input directory: {path}")]
    DirectoryReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("No matching inputs found for {pattern:?}")]
    NoInputsFound { pattern: String },

    #[error("No substitute markers (@@) in target command: {command:?}")]
    MissingMarker { command: String },

    #[error("No target command given")]
    EmptyCommand,

    // ─────────────────────────────────────────────────────────────
    // 进程控制错误（基础设施故障）
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to create process: {command}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed waiting on process {pid} ({command})")]
    WaitFailed {
        command: String,
        pid: u32,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to terminate timed-out process {pid} ({command})")]
    TerminateFailed {
        command: String,
        pid: u32,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to build worker pool: {0}")]
    ThreadPool(String),
}

impl RunnerError {
    /// 是否为配置错误（需要额外打印用法说明）
    pub fn is_usage_error(&self) -> bool {
        matches!(
            self,
            RunnerError::TimeoutTooLong { .. }
                | RunnerError::InvalidTimeout(_)
                | RunnerError::BadPattern { .. }
                | RunnerError::DirectoryReadError { .. }
                | RunnerError::NoInputsFound { .. }
                | RunnerError::MissingMarker { .. }
                | RunnerError::EmptyCommand
        )
    }
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, RunnerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usage_error_tiers() {
        assert!(RunnerError::EmptyCommand.is_usage_error());
        assert!(RunnerError::NoInputsFound {
            pattern: "x/*.pdf".to_string()
        }
        .is_usage_error());

        let spawn = RunnerError::SpawnFailed {
            command: "missing @@".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert!(!spawn.is_usage_error());
    }
}
