//! # Regression Engine Seam / 回归引擎接口
//!
//! The external regression tool is consumed only through this trait. The
//! driver and the generator harness are written against it; `HdlRegression`
//! in `infra` is the production implementation.
//!
//! 外部回归工具只通过此 trait 使用。驱动和生成器测试都基于它编写；
//! `infra` 中的 `HdlRegression` 是生产实现。

use anyhow::Result;

use crate::core::models::{CommandOutput, GenericAssignment, RunOptions, RunResult, SourceGroup};

/// Operations the runner needs from a regression engine. One value drives
/// exactly one run: register, configure, start, read back.
#[allow(async_fn_in_trait)]
pub trait RegressionEngine {
    /// Registers a source glob under a logical library.
    fn add_files(&mut self, group: &SourceGroup);

    /// Attaches one generic assignment to a testbench entity.
    fn add_generics(&mut self, assignment: &GenericAssignment);

    /// The simulator the engine will use, e.g. `MODELSIM` or `NVC`.
    async fn simulator_name(&mut self) -> Result<String>;

    /// Selects the simulator explicitly with extra compile options.
    fn set_simulator(&mut self, simulator: &str, com_options: &[String]);

    /// Runs everything registered so far and reports pass/fail counts.
    async fn start(&mut self, options: &RunOptions) -> Result<RunResult>;

    /// Runs an arbitrary command next to the engine and captures its output.
    async fn run_command(&mut self, argv: &[String]) -> Result<CommandOutput>;
}
