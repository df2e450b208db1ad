// Shared test helpers for integration tests
#![allow(dead_code)]

use anyhow::Result;
use std::collections::VecDeque;
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tempfile::{TempDir, tempdir};

use vip_regress::core::driver::RunContext;
use vip_regress::core::engine::RegressionEngine;
use vip_regress::core::models::{
    CommandOutput, GenericAssignment, RunOptions, RunResult, SourceGroup,
};

/// One call received by [`FakeEngine`].
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    AddFiles(SourceGroup),
    AddGenerics(GenericAssignment),
    SimulatorName,
    SetSimulator(String, Vec<String>),
    Start(RunOptions),
    RunCommand(Vec<String>),
}

/// A scripted engine that records every call into a shared log.
#[derive(Debug, Clone)]
pub struct FakeEngine {
    pub log: Arc<Mutex<Vec<Call>>>,
    simulator: String,
    result: RunResult,
    command_outputs: Arc<Mutex<VecDeque<CommandOutput>>>,
}

impl FakeEngine {
    pub fn new(simulator: &str, result: RunResult) -> Self {
        Self {
            log: Arc::new(Mutex::new(Vec::new())),
            simulator: simulator.to_string(),
            result,
            command_outputs: Arc::new(Mutex::new(VecDeque::new())),
        }
    }

    /// Queues the outputs returned by successive `run_command` calls.
    /// Once the queue is empty every command succeeds.
    pub fn with_command_outputs(self, outputs: Vec<CommandOutput>) -> Self {
        *self.command_outputs.lock().unwrap() = outputs.into();
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.log.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.log.lock().unwrap().push(call);
    }
}

impl RegressionEngine for FakeEngine {
    fn add_files(&mut self, group: &SourceGroup) {
        self.record(Call::AddFiles(group.clone()));
    }

    fn add_generics(&mut self, assignment: &GenericAssignment) {
        self.record(Call::AddGenerics(assignment.clone()));
    }

    async fn simulator_name(&mut self) -> Result<String> {
        self.record(Call::SimulatorName);
        Ok(self.simulator.clone())
    }

    fn set_simulator(&mut self, simulator: &str, com_options: &[String]) {
        self.record(Call::SetSimulator(
            simulator.to_string(),
            com_options.to_vec(),
        ));
    }

    async fn start(&mut self, options: &RunOptions) -> Result<RunResult> {
        self.record(Call::Start(options.clone()));
        Ok(self.result)
    }

    async fn run_command(&mut self, argv: &[String]) -> Result<CommandOutput> {
        self.record(Call::RunCommand(argv.to_vec()));
        let next = self.command_outputs.lock().unwrap().pop_front();
        Ok(next.unwrap_or(CommandOutput {
            text: String::new(),
            code: Some(0),
        }))
    }
}

pub fn ok_output() -> CommandOutput {
    CommandOutput {
        text: "ok".to_string(),
        code: Some(0),
    }
}

pub fn failed_output(code: i32) -> CommandOutput {
    CommandOutput {
        text: "** Error: script failed".to_string(),
        code: Some(code),
    }
}

/// Creates `<tmp>/sim` with a couple of leftover simulation files.
pub fn setup_sim_dir() -> (TempDir, PathBuf) {
    let temp_dir = tempdir().expect("Failed to create temporary directory");
    let sim_dir = temp_dir.path().join("sim");
    fs::create_dir_all(sim_dir.join("hdlregression/library"))
        .expect("Failed to create sim directory");
    fs::write(sim_dir.join("transcript"), "# vsim leftovers").expect("Failed to write transcript");
    fs::write(sim_dir.join("hdlregression/library/work.cfg"), "lib")
        .expect("Failed to write library file");
    (temp_dir, sim_dir)
}

pub fn run_context(sim_dir: &PathBuf) -> RunContext {
    RunContext {
        sim_dir: sim_dir.clone(),
        sentinel: "sim".to_string(),
        keep_output: false,
        python: "python3".to_string(),
    }
}

pub fn entry_count(dir: &PathBuf) -> usize {
    fs::read_dir(dir).map(|entries| entries.count()).unwrap_or(0)
}

/// A small regression suite with one swept testbench and three simulator profiles.
pub const REGRESSION_SUITE: &str = r#"
name = "Demo VIP"

[regression]
sources = [
    { pattern = "../../uvvm_util/src/*.vhd", library = "uvvm_util" },
    { pattern = "../src/*.vhd", library = "demo_vip" },
]

[[regression.testbenches]]
entity = "demo_tb"
generics = ["GC_WIDTH", "GC_FLAG"]
sweeps = [
    [[8, 16], [true, false]],
    [[32], [false]],
]

[[simulators]]
names = ["MODELSIM"]
sim_options = "-t ps"
post_run = [
    ["vsim", "-c", "-do", "do ../script/compile.do; exit"],
    ["vsim", "-c", "-do", "do ../script/simulate.do; exit"],
]

[[simulators]]
names = ["NVC"]
global_options = ["--stderr=error"]

[[simulators]]
names = ["RIVIERA-PRO"]
com_options = ["-2008", "-O0"]
"#;
