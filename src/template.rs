//! # 命令模板
//!
//! 保存目标命令及其 `@@` 替换标记，为每个输入生成具体命令。
//!
//! 替换是逐字的（非正则），标记本身是固定语法。输入路径以 `OsStr`
//! 原样拼入参数，非 UTF-8 文件名不会被改写。
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 构造
//! - 被 `batch/runner.rs` 和 `process/` 使用

use crate::error::{Result, RunnerError};

use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::{Path, PathBuf};

/// 输入路径替换标记
pub const MARKER: &str = "@@";

/// 检查命令中是否含有替换标记
pub fn has_marker(command: &str) -> bool {
    command.contains(MARKER)
}

/// 将命令中每个标记替换为输入路径
pub fn substitute(command: &str, input: &str) -> String {
    command.replace(MARKER, input)
}

/// 按字节替换单个命令词中的标记
fn substitute_os(word: &str, input: &OsStr) -> OsString {
    let mut out = OsString::with_capacity(word.len() + input.len());
    let mut pieces = word.split(MARKER);
    if let Some(first) = pieces.next() {
        out.push(first);
    }
    for piece in pieces {
        out.push(input);
        out.push(piece);
    }
    out
}

/// 目标命令模板
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandTemplate {
    words: Vec<String>,
    line: String,
}

impl CommandTemplate {
    /// 从命令词列表创建（程序名 + 参数）
    pub fn new(words: Vec<String>) -> Result<Self> {
        if words.is_empty() {
            return Err(RunnerError::EmptyCommand);
        }

        let line = words.join(" ");
        if !has_marker(&line) {
            return Err(RunnerError::MissingMarker { command: line });
        }

        Ok(Self { words, line })
    }

    /// 从单行命令创建，按空白拆分
    pub fn parse(line: &str) -> Result<Self> {
        Self::new(line.split_whitespace().map(str::to_string).collect())
    }

    /// 从命令行位置参数创建
    ///
    /// 只给出一个含空白的参数时（`"target -in @@"`），视为整行命令并按空白拆分；
    /// 否则每个参数就是一个命令词。
    pub fn from_args(words: Vec<String>) -> Result<Self> {
        if let [line] = words.as_slice() {
            if line.contains(char::is_whitespace) {
                return Self::parse(line);
            }
        }
        Self::new(words)
    }

    /// 原始命令行（以空格连接）
    pub fn as_str(&self) -> &str {
        &self.line
    }

    /// 为给定输入生成具体调用
    pub fn substitute(&self, input: &Path) -> InvocationRequest {
        let mut argv = self
            .words
            .iter()
            .map(|w| substitute_os(w, input.as_os_str()));

        // new() 保证至少有一个命令词
        let program = argv.next().unwrap_or_default();

        InvocationRequest {
            input: input.to_path_buf(),
            program,
            args: argv.collect(),
        }
    }
}

impl fmt::Display for CommandTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.line)
    }
}

/// 已完成替换的单次调用请求
///
/// 只能由 `CommandTemplate::substitute` 生成，程序名总是存在。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationRequest {
    input: PathBuf,
    program: OsString,
    args: Vec<OsString>,
}

impl InvocationRequest {
    /// 本次调用对应的输入
    pub fn input(&self) -> &Path {
        &self.input
    }

    /// 程序名
    pub fn program(&self) -> &OsStr {
        &self.program
    }

    /// 程序参数
    pub fn args(&self) -> &[OsString] {
        &self.args
    }

    /// 完整命令行（仅用于日志，非 UTF-8 字节按替换字符显示）
    pub fn command_line(&self) -> String {
        let mut line = self.program.to_string_lossy().into_owned();
        for arg in &self.args {
            line.push(' ');
            line.push_str(&arg.to_string_lossy());
        }
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn os(words: &[&str]) -> Vec<OsString> {
        words.iter().map(OsString::from).collect()
    }

    #[test]
    fn test_has_marker() {
        assert!(has_marker("target -in @@"));
        assert!(has_marker("@@"));
        assert!(!has_marker("target -in file"));
        assert!(!has_marker("target @ @"));
        assert!(!has_marker(""));
    }

    #[test]
    fn test_substitute_every_marker() {
        let out = substitute("cmp @@ @@.bak --log=@@", "a.pdf");
        assert_eq!(out, "cmp a.pdf a.pdf.bak --log=a.pdf");
        assert!(!has_marker(&out));
        assert_eq!(out.matches("a.pdf").count(), 3);
    }

    #[test]
    fn test_substitute_is_literal() {
        assert_eq!(substitute("x @@ $1 .*", "in$1"), "x in$1 $1 .*");
    }

    #[test]
    fn test_substitute_os_matches_string_form() {
        for word in ["@@", "-o=@@.out", "@@@@", "plain", "a@@b@@c", "@@@"] {
            assert_eq!(
                substitute_os(word, OsStr::new("in.bin")),
                OsString::from(substitute(word, "in.bin"))
            );
        }
    }

    #[test]
    fn test_template_rejects_missing_marker() {
        assert!(matches!(
            CommandTemplate::parse("echo hello"),
            Err(RunnerError::MissingMarker { .. })
        ));
        assert!(matches!(
            CommandTemplate::parse("   "),
            Err(RunnerError::EmptyCommand)
        ));
        assert!(matches!(
            CommandTemplate::new(vec![]),
            Err(RunnerError::EmptyCommand)
        ));
    }

    #[test]
    fn test_template_substitute_request() {
        let template = CommandTemplate::parse("target -in @@ -other -o=@@.out").unwrap();
        assert_eq!(template.as_str().matches(MARKER).count(), 2);

        let req = template.substitute(Path::new("corpus/x.pdf"));
        assert_eq!(req.program(), "target");
        assert_eq!(
            req.args().to_vec(),
            os(&["-in", "corpus/x.pdf", "-other", "-o=corpus/x.pdf.out"])
        );
        assert_eq!(
            req.command_line(),
            substitute(template.as_str(), "corpus/x.pdf")
        );
        assert_eq!(req.input(), Path::new("corpus/x.pdf"));
    }

    #[test]
    fn test_path_with_spaces_stays_one_argument() {
        let template = CommandTemplate::new(vec!["cat".to_string(), "@@".to_string()]).unwrap();
        let req = template.substitute(Path::new("my corpus/a b.txt"));
        assert_eq!(req.program(), "cat");
        assert_eq!(req.args().to_vec(), os(&["my corpus/a b.txt"]));
    }

    #[test]
    fn test_from_args_splits_single_quoted_command() {
        let template = CommandTemplate::from_args(vec!["target -in  @@\t-v".to_string()]).unwrap();
        assert_eq!(template.as_str(), "target -in @@ -v");

        let req = template.substitute(Path::new("a.pdf"));
        assert_eq!(req.program(), "target");
        assert_eq!(req.args().to_vec(), os(&["-in", "a.pdf", "-v"]));

        // 多个参数时保持原样，含空格的参数仍是一个命令词
        let template = CommandTemplate::from_args(vec![
            "sh".to_string(),
            "-c".to_string(),
            "exit 3".to_string(),
            "@@".to_string(),
        ])
        .unwrap();
        let req = template.substitute(Path::new("a.pdf"));
        assert_eq!(req.args().to_vec(), os(&["-c", "exit 3", "a.pdf"]));

        assert!(matches!(
            CommandTemplate::from_args(vec!["echo hello".to_string()]),
            Err(RunnerError::MissingMarker { .. })
        ));
        assert!(matches!(
            CommandTemplate::from_args(vec![" ".to_string()]),
            Err(RunnerError::EmptyCommand)
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_input_is_passed_verbatim() {
        use std::os::unix::ffi::{OsStrExt, OsStringExt};

        let name = OsStr::from_bytes(b"corpus/bad\xff.txt");
        let template = CommandTemplate::parse("target -in @@ -o=@@.out").unwrap();
        let req = template.substitute(Path::new(name));

        assert_eq!(req.args()[1].as_bytes(), b"corpus/bad\xff.txt");
        assert_eq!(
            req.args()[2].clone().into_vec(),
            b"-o=corpus/bad\xff.txt.out".to_vec()
        );
        assert!(req.command_line().contains('\u{FFFD}'));
    }
}
