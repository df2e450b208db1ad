//! # Data Models Module / 数据模型模块
//!
//! This module defines the data structures shared by the matrix builder, the
//! regression driver and the generator harness: generic values, configuration
//! tuples, source groups, run results and phase outcomes.
//!
//! 此模块定义矩阵构建器、回归驱动和生成器测试共享的数据结构：
//! generic 值、配置元组、源文件组、运行结果和阶段结果。

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// A single candidate value for a testbench generic, as written in a suite file.
/// 套件文件中 testbench generic 的单个候选值。
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum GenericValue {
    Bool(bool),
    Int(i64),
    Text(String),
}

impl fmt::Display for GenericValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenericValue::Bool(b) => write!(f, "{}", b),
            GenericValue::Int(i) => write!(f, "{}", i),
            GenericValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<bool> for GenericValue {
    fn from(value: bool) -> Self {
        GenericValue::Bool(value)
    }
}

impl From<i64> for GenericValue {
    fn from(value: i64) -> Self {
        GenericValue::Int(value)
    }
}

impl From<&str> for GenericValue {
    fn from(value: &str) -> Self {
        GenericValue::Text(value.to_string())
    }
}

/// One point of a parameter sweep: the string form of one value per axis,
/// in axis order.
/// 参数扫描中的一个点：按轴顺序排列的每个轴一个值的字符串形式。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Configuration(pub Vec<String>);

impl Configuration {
    pub fn values(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})", self.0.join(", "))
    }
}

/// A glob of VHDL files compiled into one logical library.
/// 编译到一个逻辑库中的 VHDL 文件 glob。
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SourceGroup {
    pub pattern: String,
    pub library: String,
}

impl SourceGroup {
    pub fn new(pattern: impl Into<String>, library: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            library: library.into(),
        }
    }
}

/// Generic values bound to one testbench entity for one simulation run.
/// 为一次仿真运行绑定到某个 testbench 实体的 generic 值。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenericAssignment {
    pub entity: String,
    pub generics: Vec<(String, String)>,
}

impl GenericAssignment {
    /// Zips generic names with one configuration tuple.
    pub fn from_configuration(entity: &str, names: &[String], config: &Configuration) -> Self {
        Self {
            entity: entity.to_string(),
            generics: names
                .iter()
                .cloned()
                .zip(config.values().iter().cloned())
                .collect(),
        }
    }

    /// Flattens the pairs into the `[name, value, name, value, ...]` form the engine expects.
    pub fn flattened(&self) -> Vec<String> {
        self.generics
            .iter()
            .flat_map(|(name, value)| [name.clone(), value.clone()])
            .collect()
    }
}

/// Simulator-specific options handed to the engine's run entry point.
/// 传递给引擎运行入口的仿真器特定选项。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunOptions {
    pub sim_options: Option<String>,
    pub global_options: Vec<String>,
}

/// Pass/fail counters reported by the regression engine after a run.
/// 回归引擎在运行后报告的通过/失败计数。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct RunResult {
    pub passed: u32,
    pub failed: u32,
}

impl RunResult {
    pub fn new(passed: u32, failed: u32) -> Self {
        Self { passed, failed }
    }

    /// `true` when the failing count matches the expected number of failures.
    pub fn check(&self, expected_failures: u32) -> bool {
        self.failed == expected_failures
    }

    pub fn nothing_passed(&self) -> bool {
        self.passed == 0
    }
}

/// Captured text and exit code of an auxiliary command.
/// 辅助命令捕获的文本和退出码。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub text: String,
    pub code: Option<i32>,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Exit contribution of a regression phase.
///
/// A run where nothing passed counts as a single failure no matter what the
/// engine reports as failing. Otherwise every failing test and every failed
/// post-run verification command counts once.
///
/// 回归阶段的退出码贡献。没有任何测试通过时计为一次失败，
/// 否则每个失败测试和每个失败的运行后验证命令各计一次。
pub fn regression_exit_code(result: RunResult, post_run_failures: u32) -> u32 {
    if result.nothing_passed() {
        1
    } else {
        result.failed + post_run_failures
    }
}

/// Exit contribution of a compile-and-elaborate verification phase.
pub fn verification_exit_code(result: RunResult) -> u32 {
    if result.nothing_passed() { 1 } else { 0 }
}

/// Result of one phase of a suite run.
/// 套件运行中一个阶段的结果。
#[derive(Debug, Clone, Serialize)]
pub struct PhaseOutcome {
    pub name: String,
    pub result: RunResult,
    pub post_run_failures: u32,
    pub exit_code: u32,
    pub simulator: String,
    pub duration: Duration,
}

impl PhaseOutcome {
    pub fn is_success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Aggregated result of a whole suite run.
/// 整个套件运行的汇总结果。
#[derive(Debug, Clone, Serialize)]
pub struct SuiteOutcome {
    pub suite: String,
    pub started_at: DateTime<Local>,
    pub phases: Vec<PhaseOutcome>,
}

impl SuiteOutcome {
    pub fn new(suite: impl Into<String>) -> Self {
        Self {
            suite: suite.into(),
            started_at: Local::now(),
            phases: Vec::new(),
        }
    }

    /// Total number of failing units over all phases.
    pub fn exit_code(&self) -> u32 {
        self.phases.iter().map(|p| p.exit_code).sum()
    }

    /// The exit code squeezed into the range a process can return.
    pub fn process_exit_code(&self) -> u8 {
        u8::try_from(self.exit_code()).unwrap_or(u8::MAX)
    }

    pub fn is_success(&self) -> bool {
        self.exit_code() == 0
    }
}
