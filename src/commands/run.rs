//! # run 命令实现
//!
//! 对语料库中的每个输入运行一次目标命令。
//!
//! ## 功能
//! - 收集输入文件（零匹配视为配置错误）
//! - 顺序（或有界并行）执行并记录非零退出与超时
//! - 输出吞吐量汇总与结果统计表
//!
//! ## 依赖关系
//! - 使用 `config.rs` 的 `RunConfig`
//! - 使用 `batch/`, `process/`
//! - 使用 `utils/output.rs`

use crate::batch::{BatchRunner, FileCollector, RunSummary};
use crate::config::RunConfig;
use crate::error::{Result, RunnerError};
use crate::process::{NativeProcessControl, ProcessRunner};
use crate::utils::output;

use tabled::{Table, Tabled};

/// 结果统计行
#[derive(Debug, Clone, Tabled)]
struct OutcomeRow {
    #[tabled(rename = "Outcome")]
    outcome: &'static str,
    #[tabled(rename = "Count")]
    count: usize,
    #[tabled(rename = "Share")]
    share: String,
}

/// 执行 run 命令
pub fn execute(config: RunConfig) -> Result<RunSummary> {
    output::print_banner();

    // 收集输入文件
    let collector = FileCollector::from_glob(&config.inputs)?;
    let inputs = collector.collect()?;
    if inputs.is_empty() {
        return Err(RunnerError::NoInputsFound {
            pattern: collector.spec().to_string(),
        });
    }
    output::print_inputs_found(inputs.len());

    let runner = BatchRunner::new(config.jobs).with_progress(config.progress);
    output::print_target(config.template.as_str(), config.timeout, runner.jobs());

    if runner.jobs() > 1 {
        output::print_warning("Parallel mode: invocations may run in any order.");
    }

    let process_runner = ProcessRunner::new(
        NativeProcessControl::new(config.show_output),
        config.timeout,
    );
    let summary = runner.run(&inputs, &config.template, &process_runner)?;

    print_summary(&summary);
    Ok(summary)
}

/// 打印汇总行与统计表
fn print_summary(summary: &RunSummary) {
    output::print_all_done(summary.total_inputs, summary.elapsed, summary.throughput);

    let outcomes = &summary.outcomes;
    let rows = [
        ("Success", outcomes.success),
        ("Non-zero exit", outcomes.non_zero),
        ("Timed out", outcomes.timed_out),
    ]
    .into_iter()
    .map(|(outcome, count)| OutcomeRow {
        outcome,
        count,
        share: format!("{:.1}%", share(count, summary.total_inputs)),
    })
    .collect::<Vec<_>>();

    println!("{}", Table::new(&rows));
}

/// 占比（百分数）
fn share(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 * 100.0 / total as f64
    }
}
