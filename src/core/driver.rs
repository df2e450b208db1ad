//! # Regression Driver / 回归驱动
//!
//! Runs one regression phase against an engine: register sources and generic
//! assignments, dispatch simulator options, start the run, interpret the
//! counts, clean up and run the post-run verification commands.
//!
//! 针对引擎运行一个回归阶段：注册源文件和 generic 赋值、分派仿真器选项、
//! 启动运行、解析计数、清理并执行运行后的验证命令。

use anyhow::Result;
use colored::*;
use std::path::PathBuf;
use std::time::Instant;

use crate::core::config::{RegressionPhase, Suite};
use crate::core::engine::RegressionEngine;
use crate::core::models::{PhaseOutcome, regression_exit_code};
use crate::core::simulator::{configure, display_command};
use crate::infra::fs::{CleanupReport, cleanup_sim_dir};
use crate::infra::t;

/// Settings shared by every phase of a run.
/// 运行中所有阶段共享的设置。
#[derive(Debug, Clone)]
pub struct RunContext {
    /// The working directory; cleanup and generator output live here.
    pub sim_dir: PathBuf,
    /// Last path segment `sim_dir` must have for cleanup to touch it.
    pub sentinel: String,
    /// Leave simulation output in place after a clean run.
    pub keep_output: bool,
    /// Interpreter substituted for `{python}` in generator commands.
    pub python: String,
}

/// Prints `message` and cleans the working directory.
pub fn cleanup_working_dir(ctx: &RunContext, message: &str) -> Result<CleanupReport> {
    println!("{}", message);
    let report = cleanup_sim_dir(&ctx.sim_dir, &ctx.sentinel)?;
    match &report {
        CleanupReport::Skipped { expected, .. } => {
            println!("{}", t!("cleanup.skipped", expected = expected).yellow());
        }
        CleanupReport::Cleaned { removed, failed } => {
            tracing::info!("removed {} entries from {}", removed, ctx.sim_dir.display());
            if !failed.is_empty() {
                println!("{}", t!("cleanup.failures", count = failed.len()).yellow());
            }
        }
    }
    Ok(report)
}

/// Runs the main regression phase of `suite`.
///
/// The returned outcome's exit code is 1 when nothing passed, otherwise the
/// number of failing tests plus one for a failed post-run verification.
pub async fn run_regression<E: RegressionEngine>(
    engine: &mut E,
    suite: &Suite,
    phase: &RegressionPhase,
    ctx: &RunContext,
) -> Result<PhaseOutcome> {
    let started = Instant::now();

    for group in &phase.sources {
        engine.add_files(group);
    }
    let mut assignment_count = 0;
    for tb in &phase.testbenches {
        for assignment in tb.assignments() {
            tracing::debug!("{} {:?}", assignment.entity, assignment.generics);
            engine.add_generics(&assignment);
            assignment_count += 1;
        }
    }
    println!(
        "{}",
        t!(
            "run.registered",
            groups = phase.sources.len(),
            assignments = assignment_count
        )
    );

    let simulator = engine.simulator_name().await?;
    let profile = suite.simulator_profile(&simulator);
    println!("{}", t!("run.simulator", name = &simulator).cyan());
    if profile.is_none() {
        println!("{}", t!("run.simulator_unknown", name = &simulator).yellow());
    }
    let options = configure(engine, &simulator, profile);

    println!("{}", t!("run.starting").blue());
    let result = engine.start(&options).await?;
    println!(
        "{}",
        t!("run.result", passed = result.passed, failed = result.failed)
    );

    if result.nothing_passed() {
        println!("{}", t!("run.no_tests_passed").red());
        return Ok(PhaseOutcome {
            name: suite.name.clone(),
            result,
            post_run_failures: 0,
            exit_code: regression_exit_code(result, 0),
            simulator,
            duration: started.elapsed(),
        });
    }

    let clean_output = phase.cleanup_on_success && !ctx.keep_output;
    if result.check(0) && clean_output {
        cleanup_working_dir(ctx, &t!("cleanup.output"))?;
    }

    let mut post_run_failures = 0;
    let post_run = profile.map(|p| p.post_run.as_slice()).unwrap_or_default();
    if !post_run.is_empty() {
        println!("\n{}", t!("run.verify_scripts").blue());
        for argv in post_run {
            let command = display_command(argv);
            println!("{}", t!("run.post_run_command", command = &command));
            let output = engine.run_command(argv).await?;
            if !output.success() {
                println!("{}", output.text);
                let code = output
                    .code
                    .map(|c| c.to_string())
                    .unwrap_or_else(|| "-".to_string());
                println!("{}", t!("run.post_run_failed", code = code).red());
                post_run_failures = 1;
                break;
            }
        }
        if post_run_failures == 0 {
            println!("{}", t!("run.simulation_success").green());
            if clean_output {
                cleanup_working_dir(ctx, &t!("cleanup.output"))?;
            }
        }
    }

    Ok(PhaseOutcome {
        name: suite.name.clone(),
        result,
        post_run_failures,
        exit_code: regression_exit_code(result, post_run_failures),
        simulator,
        duration: started.elapsed(),
    })
}
