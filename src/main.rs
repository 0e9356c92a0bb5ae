//! # corpus-runner - 语料库批量测试运行器
//!
//! 对匹配 glob 的每个输入文件运行一次目标命令（`@@` 替换为文件路径），
//! 强制单次超时，记录非零退出码与超时，并报告吞吐量。
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     ├── batch/     (输入收集与批量编排)
//!   │     ├── process/   (单次调用状态机与进程控制)
//!   │     └── template.rs(命令模板)
//!   ├── config.rs   (运行配置)
//!   ├── utils/      (工具函数)
//!   └── error.rs    (错误处理)
//! ```

mod batch;
mod cli;
mod commands;
mod config;
mod error;
mod process;
mod template;
mod utils;

use clap::{CommandFactory, Parser};
use cli::Cli;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();

    if let Err(e) = commands::run(cli) {
        utils::output::print_error(&e);
        if e.is_usage_error() {
            eprintln!("\n{}", Cli::command().render_help());
        }
        std::process::exit(1);
    }
}
