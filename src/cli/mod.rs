//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数，并校验为只读的 `RunConfig`。
//!
//! ## 用法
//! ```text
//! corpus-runner -i corpus/*.pdf -t 5000 -- ./target -in @@ -other
//! corpus-runner -i corpus/*.pdf "./target -in @@ -other"
//! ```
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 构造 `config.rs` 的 `RunConfig`

use crate::config::{RunConfig, Timeout, DEFAULT_TIMEOUT_MS};
use crate::error::Result;
use crate::template::CommandTemplate;

use clap::Parser;

/// corpus-runner - 对语料库中的每个文件运行一次目标命令
#[derive(Parser, Debug)]
#[command(name = "corpus-runner")]
#[command(version)]
#[command(
    about = "Runs a command with a set of inputs and records nonzero exit codes",
    long_about = None
)]
#[command(after_help = "( @@ will be substituted with each input )")]
pub struct Cli {
    /// Process wait timeout (ms), -1 for INFINITE
    #[arg(
        short = 't',
        long,
        env = "CORPUS_RUNNER_TIMEOUT",
        default_value_t = DEFAULT_TIMEOUT_MS,
        allow_negative_numbers = true
    )]
    pub timeout: i64,

    /// Glob for input files, eg: corpus/*.pdf
    #[arg(short = 'i', long, env = "CORPUS_RUNNER_INPUTS")]
    pub inputs: String,

    /// Number of parallel invocations (1 = sequential, 0 = auto)
    #[arg(short = 'j', long, default_value_t = 1)]
    pub jobs: usize,

    /// Let the target inherit stdout/stderr instead of discarding them
    #[arg(long, default_value_t = false)]
    pub show_output: bool,

    /// Hide the progress bar
    #[arg(long, default_value_t = false)]
    pub no_progress: bool,

    /// Target command and its arguments (or one quoted command line), containing @@ at least once
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub command: Vec<String>,
}

impl Cli {
    /// 校验超时与命令模板，构造运行配置
    ///
    /// 输入 glob 在 `commands::run` 中校验。
    pub fn into_config(self) -> Result<RunConfig> {
        let timeout = Timeout::from_millis(self.timeout)?;
        let template = CommandTemplate::from_args(self.command)?;

        Ok(RunConfig {
            timeout,
            inputs: self.inputs,
            template,
            jobs: self.jobs,
            show_output: self.show_output,
            progress: !self.no_progress,
        })
    }
}
