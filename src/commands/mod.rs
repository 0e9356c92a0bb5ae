//! # 命令执行模块
//!
//! 实现命令的业务逻辑。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `cli/`, `config.rs`, `batch/`, `process/`, `utils/`
//! - 子模块: run

pub mod run;

use crate::cli::Cli;
use crate::error::Result;

/// 校验参数并执行
pub fn run(cli: Cli) -> Result<()> {
    let config = cli.into_config()?;
    run::execute(config).map(|_| ())
}
