//! # 文件收集器
//!
//! 将 `目录/文件名模式` 形式的 glob 解析为待处理文件列表。
//!
//! ## 功能
//! - 单次读取目录，不排序
//! - 跳过子目录
//! - 文件名 glob 匹配（`glob::Pattern`）
//!
//! 标准的 glob / walk 实现会按字典序排序整个目录，文件数达到几十万时
//! 排序本身就成了主要开销。这里按文件系统返回的顺序收集，结果顺序
//! 不作保证。
//!
//! ## 依赖关系
//! - 被 `commands/run.rs` 调用
//! - 使用 `glob` 匹配文件名

use crate::error::{Result, RunnerError};

use glob::Pattern;
use std::fs;
use std::path::{is_separator, Path, PathBuf};

/// 文件收集器
pub struct FileCollector {
    /// 原始 glob
    spec: String,
    /// 目录部分（无分隔符时为 None，即当前目录）
    dir: Option<PathBuf>,
    /// 文件名模式
    pattern: Pattern,
}

impl FileCollector {
    /// 从 glob 创建，例如 `corpus/*.pdf`
    pub fn from_glob(spec: &str) -> Result<Self> {
        let (dir, name_pattern) = match spec.rfind(is_separator) {
            Some(0) => (Some(PathBuf::from(&spec[..1])), &spec[1..]),
            Some(idx) => (Some(PathBuf::from(&spec[..idx])), &spec[idx + 1..]),
            None => (None, spec),
        };

        if name_pattern.is_empty() {
            return Err(RunnerError::BadPattern {
                pattern: spec.to_string(),
                reason: "missing file name pattern".to_string(),
            });
        }

        let pattern = Pattern::new(name_pattern).map_err(|e| RunnerError::BadPattern {
            pattern: spec.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            spec: spec.to_string(),
            dir,
            pattern,
        })
    }

    /// 被扫描的目录
    pub fn directory(&self) -> &Path {
        self.dir.as_deref().unwrap_or_else(|| Path::new("."))
    }

    /// 原始 glob
    pub fn spec(&self) -> &str {
        &self.spec
    }

    /// 收集所有匹配的文件（顺序为目录读取顺序）
    pub fn collect(&self) -> Result<Vec<PathBuf>> {
        let dir = self.directory();
        let read_error = |source: std::io::Error| RunnerError::DirectoryReadError {
            path: dir.display().to_string(),
            source,
        };

        let mut matches = Vec::new();
        for entry in fs::read_dir(dir).map_err(read_error)? {
            let entry = entry.map_err(read_error)?;
            if entry.file_type().map_err(read_error)?.is_dir() {
                continue;
            }

            let name = entry.file_name();
            if !self.pattern.matches(&name.to_string_lossy()) {
                continue;
            }

            matches.push(match &self.dir {
                Some(d) => d.join(&name),
                None => PathBuf::from(&name),
            });
        }

        Ok(matches)
    }
}
