//! # 批量处理模块
//!
//! 输入枚举与批量调用编排。
//!
//! ## 功能
//! - 按 glob 收集输入文件（不排序）
//! - 逐个（或有界并行）执行目标命令
//! - 进度反馈与统计
//!
//! ## 依赖关系
//! - 被 `commands/run.rs` 使用
//! - 使用 `process/` 执行单次调用
//! - 使用 `rayon` 进行可选并行

pub mod collector;
pub mod runner;

pub use collector::FileCollector;
pub use runner::{BatchResult, BatchRunner, RunSummary};
