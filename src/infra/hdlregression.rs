//! # HDLRegression Backend / HDLRegression 后端
//!
//! Implements [`RegressionEngine`] on top of the HDLRegression Python package.
//! Calls are recorded and replayed as a driver script when the run starts; the
//! script prints one marked JSON line with the pass/fail counts, which is the
//! only part of the engine's output this module interprets.
//!
//! 基于 HDLRegression Python 包实现 [`RegressionEngine`]。
//! 调用会被记录下来，并在运行开始时作为驱动脚本回放；脚本会打印一行带标记的 JSON，
//! 其中包含通过/失败计数，这是本模块唯一解析的引擎输出。

use anyhow::{Context, Result};
use serde_json::Value;
use std::io::Write;
use std::path::{Path, PathBuf};
use tokio::process::Command;
use tokio_util::sync::CancellationToken;

use crate::core::engine::RegressionEngine;
use crate::core::error::RegressError;
use crate::core::models::{CommandOutput, GenericAssignment, RunOptions, RunResult, SourceGroup};
use crate::infra::command::{command_from_argv, spawn_and_capture};

const RESULT_MARKER: &str = "@@VIP_REGRESS_RESULT@@";
const SIMULATOR_MARKER: &str = "@@VIP_REGRESS_SIMULATOR@@";
/// Exit code the driver script uses when the package cannot be imported.
const MISSING_ENGINE_EXIT: i32 = 97;

const IMPORT_PRELUDE: &str = "import sys
import json
try:
    from hdlregression import HDLRegression
except:
    sys.exit(97)
";

/// Where and how the engine runs.
#[derive(Debug, Clone)]
pub struct EngineSettings {
    /// Python interpreter with HDLRegression installed.
    pub python: String,
    /// Working directory of the run; relative source globs resolve from here.
    pub work_dir: PathBuf,
    /// Simulator selected in the engine instead of the one it detects.
    pub simulator_override: Option<String>,
    /// Command-line arguments HDLRegression parses itself (`-tc`, `-g`, `-t`, ...).
    pub engine_args: Vec<String>,
    /// Print engine output while it runs.
    pub echo: bool,
}

/// A regression run driven through HDLRegression.
#[derive(Debug)]
pub struct HdlRegression {
    settings: EngineSettings,
    cancel: CancellationToken,
    calls: Vec<String>,
    simulator: Option<String>,
}

impl HdlRegression {
    pub fn new(settings: EngineSettings, cancel: CancellationToken) -> Self {
        let simulator = settings.simulator_override.clone();
        Self {
            settings,
            cancel,
            calls: Vec::new(),
            simulator,
        }
    }

    /// Checks once that the interpreter can import the package.
    pub async fn check_import(settings: &EngineSettings, cancel: &CancellationToken) -> Result<()> {
        let mut cmd = Command::new(&settings.python);
        cmd.arg("-c")
            .arg(format!("{IMPORT_PRELUDE}sys.exit(0)\n"))
            .current_dir(&settings.work_dir);
        let captured = spawn_and_capture(cmd, &[], false, cancel)
            .await
            .with_context(|| format!("Failed to run '{}'", settings.python))?;
        if captured.status.success() {
            Ok(())
        } else {
            tracing::debug!("engine import check output:\n{}", captured.output);
            Err(RegressError::MissingEngine {
                interpreter: settings.python.clone(),
            }
            .into())
        }
    }

    /// Import guard plus the `sys.argv` HDLRegression parses on construction.
    fn script_prelude(&self) -> String {
        let mut argv = vec!["vip_regress".to_string()];
        argv.extend(self.settings.engine_args.iter().cloned());
        format!("{IMPORT_PRELUDE}sys.argv = {}\n", py_list(&argv))
    }

    /// The driver script for everything recorded so far.
    pub fn render_script(&self, options: &RunOptions) -> String {
        let mut script = self.script_prelude();
        script.push_str("\nhr = HDLRegression()\n");
        if let Some(simulator) = &self.settings.simulator_override {
            script.push_str(&format!("hr.set_simulator(simulator={})\n", py_str(simulator)));
        }
        for call in &self.calls {
            script.push_str(call);
            script.push('\n');
        }
        script.push_str(&format!(
            "hr.start(sim_options={}, global_options={})\n",
            options
                .sim_options
                .as_deref()
                .map(py_str)
                .unwrap_or_else(|| "None".to_string()),
            if options.global_options.is_empty() {
                "None".to_string()
            } else {
                py_list(&options.global_options)
            }
        ));
        script.push_str(&format!(
            "print({} + json.dumps({{\"passed\": hr.get_num_pass_tests(), \"failed\": hr.get_num_fail_tests()}}))\n",
            py_str(RESULT_MARKER)
        ));
        script
    }

    async fn run_python(&self, script: &str, echo: bool) -> Result<crate::infra::command::Captured> {
        let mut file = tempfile::Builder::new()
            .prefix("vip_regress_")
            .suffix(".py")
            .tempfile()
            .context("Failed to create driver script")?;
        file.write_all(script.as_bytes())
            .context("Failed to write driver script")?;
        file.flush()?;

        tracing::debug!("driver script {}:\n{}", file.path().display(), script);

        let mut cmd = Command::new(&self.settings.python);
        cmd.arg(file.path()).current_dir(&self.settings.work_dir);
        let captured = spawn_and_capture(cmd, &[], echo, &self.cancel).await?;
        if captured.code() == Some(MISSING_ENGINE_EXIT) {
            return Err(RegressError::MissingEngine {
                interpreter: self.settings.python.clone(),
            }
            .into());
        }
        Ok(captured)
    }

    pub fn work_dir(&self) -> &Path {
        &self.settings.work_dir
    }
}

impl RegressionEngine for HdlRegression {
    fn add_files(&mut self, group: &SourceGroup) {
        self.calls.push(format!(
            "hr.add_files({}, {})",
            py_str(&group.pattern),
            py_str(&group.library)
        ));
    }

    fn add_generics(&mut self, assignment: &GenericAssignment) {
        self.calls.push(format!(
            "hr.add_generics(entity={}, generics={})",
            py_str(&assignment.entity),
            py_list(&assignment.flattened())
        ));
    }

    async fn simulator_name(&mut self) -> Result<String> {
        if let Some(name) = &self.simulator {
            return Ok(name.clone());
        }
        let script = format!(
            "{}print({} + HDLRegression().settings.get_simulator_name())\n",
            self.script_prelude(),
            py_str(SIMULATOR_MARKER)
        );
        let captured = self.run_python(&script, false).await?;
        let name = find_marked(&captured.output, SIMULATOR_MARKER)
            .map(|s| s.trim().to_string())
            .ok_or_else(|| RegressError::EngineProtocol {
                code: captured.code(),
                output: captured.output.clone(),
            })?;
        self.simulator = Some(name.clone());
        Ok(name)
    }

    fn set_simulator(&mut self, simulator: &str, com_options: &[String]) {
        self.calls.push(format!(
            "hr.set_simulator(simulator={}, com_options={})",
            py_str(simulator),
            py_list(com_options)
        ));
    }

    async fn start(&mut self, options: &RunOptions) -> Result<RunResult> {
        let script = self.render_script(options);
        let captured = self.run_python(&script, self.settings.echo).await?;
        parse_run_result(&captured.output).ok_or_else(|| {
            RegressError::EngineProtocol {
                code: captured.code(),
                output: captured.output,
            }
            .into()
        })
    }

    async fn run_command(&mut self, argv: &[String]) -> Result<CommandOutput> {
        let cmd = command_from_argv(argv, &self.settings.work_dir)?;
        let captured = spawn_and_capture(cmd, &[], false, &self.cancel).await?;
        Ok(CommandOutput {
            code: captured.code(),
            text: captured.output,
        })
    }
}

/// Extracts the counters from the marked line of the driver's output.
pub fn parse_run_result(output: &str) -> Option<RunResult> {
    find_marked(output, RESULT_MARKER).and_then(|json| serde_json::from_str(json.trim()).ok())
}

fn find_marked<'a>(output: &'a str, marker: &str) -> Option<&'a str> {
    output
        .lines()
        .rev()
        .find_map(|line| line.trim_start().strip_prefix(marker))
}

/// A Python string literal. JSON string syntax is a subset of Python's.
fn py_str(s: &str) -> String {
    Value::from(s).to_string()
}

fn py_list(items: &[String]) -> String {
    Value::from(items.to_vec()).to_string()
}
