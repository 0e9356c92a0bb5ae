//! # 批量执行器
//!
//! 对每个输入执行一次目标命令，汇总结果并计算吞吐量。
//!
//! ## 功能
//! - 默认严格顺序执行（按枚举顺序，调用之间不重叠）
//! - 可选基于 rayon 的固定大小线程池并行
//! - 进度条显示
//! - 非零退出与超时只记录，不中断运行
//!
//! ## 依赖关系
//! - 被 `commands/run.rs` 调用
//! - 使用 `process/` 执行单次调用
//! - 使用 `utils/progress.rs` 创建进度条

use crate::config::Timeout;
use crate::error::{Result, RunnerError};
use crate::process::{InvocationResult, InvocationStatus, ProcessControl, ProcessRunner};
use crate::template::CommandTemplate;
use crate::utils::{output, progress};

use indicatif::ProgressBar;
use rayon::prelude::*;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

/// 批量处理结果统计
#[derive(Debug, Default)]
pub struct BatchResult {
    /// 成功数量
    pub success: usize,
    /// 非零退出数量
    pub non_zero: usize,
    /// 超时数量
    pub timed_out: usize,
    /// 非成功调用详情
    pub failures: Vec<InvocationResult>,
}

impl BatchResult {
    /// 合并单次调用结果
    pub fn merge(&mut self, result: InvocationResult) {
        match result.status {
            InvocationStatus::Success => self.success += 1,
            InvocationStatus::NonZeroExit => {
                self.non_zero += 1;
                self.failures.push(result);
            }
            InvocationStatus::TimedOut => {
                self.timed_out += 1;
                self.failures.push(result);
            }
        }
    }

    /// 总调用数量
    pub fn total(&self) -> usize {
        self.success + self.non_zero + self.timed_out
    }
}

/// 运行汇总
#[derive(Debug)]
pub struct RunSummary {
    pub total_inputs: usize,
    pub elapsed: Duration,
    /// 每秒调用数
    pub throughput: f64,
    pub outcomes: BatchResult,
}

impl RunSummary {
    pub fn new(outcomes: BatchResult, elapsed: Duration) -> Self {
        let total_inputs = outcomes.total();
        let secs = elapsed.as_secs_f64();
        let throughput = if secs > 0.0 {
            total_inputs as f64 / secs
        } else {
            0.0
        };

        Self {
            total_inputs,
            elapsed,
            throughput,
            outcomes,
        }
    }
}

/// 实时计数（并行模式下由多个工作线程更新）
#[derive(Default)]
struct Tally {
    success: AtomicUsize,
    non_zero: AtomicUsize,
    timed_out: AtomicUsize,
}

impl Tally {
    fn record(&self, status: InvocationStatus) {
        let counter = match status {
            InvocationStatus::Success => &self.success,
            InvocationStatus::NonZeroExit => &self.non_zero,
            InvocationStatus::TimedOut => &self.timed_out,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    fn message(&self) -> String {
        format!(
            "ok {} / fail {} / hang {}",
            self.success.load(Ordering::Relaxed),
            self.non_zero.load(Ordering::Relaxed),
            self.timed_out.load(Ordering::Relaxed)
        )
    }
}

/// 批量执行器
pub struct BatchRunner {
    /// 并行作业数（1 = 顺序执行）
    jobs: usize,
    /// 是否显示进度条
    progress: bool,
}

impl BatchRunner {
    /// 创建新的批量执行器（jobs 为 0 时使用 CPU 核数）
    pub fn new(jobs: usize) -> Self {
        let jobs = if jobs == 0 { num_cpus::get() } else { jobs };
        Self {
            jobs,
            progress: false,
        }
    }

    /// 设置是否显示进度条
    pub fn with_progress(mut self, progress: bool) -> Self {
        self.progress = progress;
        self
    }

    pub fn jobs(&self) -> usize {
        self.jobs
    }

    /// 对每个输入执行一次命令
    ///
    /// 进程创建/等待/终止失败会立即中止运行并返回错误。
    pub fn run<C: ProcessControl>(
        &self,
        inputs: &[PathBuf],
        template: &CommandTemplate,
        runner: &ProcessRunner<C>,
    ) -> Result<RunSummary> {
        let pb = progress::create_progress_bar(inputs.len() as u64, "Running", self.progress);
        let tally = Tally::default();

        let mark = Instant::now();
        let outcome = if self.jobs <= 1 {
            self.run_sequential(inputs, template, runner, &pb, &tally)
        } else {
            self.run_parallel(inputs, template, runner, &pb, &tally)
        };
        let elapsed = mark.elapsed();

        pb.finish_and_clear();

        Ok(RunSummary::new(outcome?, elapsed))
    }

    fn run_sequential<C: ProcessControl>(
        &self,
        inputs: &[PathBuf],
        template: &CommandTemplate,
        runner: &ProcessRunner<C>,
        pb: &ProgressBar,
        tally: &Tally,
    ) -> Result<BatchResult> {
        let mut batch_result = BatchResult::default();

        for input in inputs {
            let result = runner.run(&template.substitute(input))?;
            observe(&result, runner.timeout(), pb, tally);
            batch_result.merge(result);
        }

        Ok(batch_result)
    }

    fn run_parallel<C: ProcessControl>(
        &self,
        inputs: &[PathBuf],
        template: &CommandTemplate,
        runner: &ProcessRunner<C>,
        pb: &ProgressBar,
        tally: &Tally,
    ) -> Result<BatchResult> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.jobs)
            .build()
            .map_err(|e| RunnerError::ThreadPool(e.to_string()))?;

        let results: Vec<InvocationResult> = pool.install(|| {
            inputs
                .par_iter()
                .map(|input| -> Result<InvocationResult> {
                    let result = runner.run(&template.substitute(input))?;
                    observe(&result, runner.timeout(), pb, tally);
                    Ok(result)
                })
                .collect::<Result<_>>()
        })?;

        // 汇总结果
        let mut batch_result = BatchResult::default();
        for result in results {
            batch_result.merge(result);
        }

        Ok(batch_result)
    }
}

/// 更新计数与进度，并为非成功调用输出一行日志
fn observe(result: &InvocationResult, timeout: Timeout, pb: &ProgressBar, tally: &Tally) {
    tally.record(result.status);

    match (result.status, result.exit_code) {
        (InvocationStatus::TimedOut, _) => {
            pb.suspend(|| output::print_timed_out(&result.input, timeout))
        }
        (InvocationStatus::NonZeroExit, Some(code)) => {
            pb.suspend(|| output::print_nonzero_exit(&result.input, code, result.duration))
        }
        _ => {}
    }

    pb.set_message(tally.message());
    pb.inc(1);
}
