//! # 运行配置
//!
//! 由命令行参数构造一次、之后只读的运行配置。
//!
//! ## 依赖关系
//! - 由 `cli/mod.rs` 构造
//! - 被 `commands/run.rs` 和 `process/` 使用

use crate::error::{Result, RunnerError};
use crate::template::CommandTemplate;

use std::fmt;
use std::time::Duration;

/// 单次等待上限（1 小时）
pub const MAX_WAIT_MS: u64 = 3600 * 1000;

/// 表示“无限等待”的命令行取值
pub const INFINITE_SENTINEL: i64 = -1;

/// 默认超时（毫秒）
pub const DEFAULT_TIMEOUT_MS: i64 = 10_000;

/// 单次调用的等待时限
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timeout {
    /// 最多等待给定时长
    Bounded(Duration),
    /// 一直等到进程退出
    Infinite,
}

impl Timeout {
    /// 从命令行毫秒值解析，`-1` 表示无限等待
    pub fn from_millis(ms: i64) -> Result<Self> {
        if ms == INFINITE_SENTINEL {
            return Ok(Timeout::Infinite);
        }
        if ms < 0 {
            return Err(RunnerError::InvalidTimeout(ms));
        }
        if (ms as u64) > MAX_WAIT_MS {
            return Err(RunnerError::TimeoutTooLong {
                ms,
                max: MAX_WAIT_MS,
            });
        }
        Ok(Timeout::Bounded(Duration::from_millis(ms as u64)))
    }
}

impl fmt::Display for Timeout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Timeout::Bounded(d) => write!(f, "{}ms", d.as_millis()),
            Timeout::Infinite => write!(f, "infinite"),
        }
    }
}

/// 一次运行的完整配置
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// 单次调用超时
    pub timeout: Timeout,
    /// 输入文件 glob（目录 + 文件名模式）
    pub inputs: String,
    /// 目标命令模板
    pub template: CommandTemplate,
    /// 并行作业数（1 = 顺序执行，0 = 自动）
    pub jobs: usize,
    /// 目标进程是否继承标准输出/错误
    pub show_output: bool,
    /// 是否显示进度条
    pub progress: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_from_millis() {
        assert_eq!(Timeout::from_millis(-1).unwrap(), Timeout::Infinite);
        assert_eq!(
            Timeout::from_millis(0).unwrap(),
            Timeout::Bounded(Duration::ZERO)
        );
        assert_eq!(
            Timeout::from_millis(DEFAULT_TIMEOUT_MS).unwrap(),
            Timeout::Bounded(Duration::from_secs(10))
        );
        assert_eq!(
            Timeout::from_millis(MAX_WAIT_MS as i64).unwrap(),
            Timeout::Bounded(Duration::from_secs(3600))
        );
    }

    #[test]
    fn test_timeout_rejects_out_of_range() {
        assert!(matches!(
            Timeout::from_millis(MAX_WAIT_MS as i64 + 1),
            Err(RunnerError::TimeoutTooLong { .. })
        ));
        assert!(matches!(
            Timeout::from_millis(-2),
            Err(RunnerError::InvalidTimeout(-2))
        ));
    }

    #[test]
    fn test_timeout_display() {
        assert_eq!(Timeout::Infinite.to_string(), "infinite");
        assert_eq!(
            Timeout::Bounded(Duration::from_millis(250)).to_string(),
            "250ms"
        );
    }
}
