//! # Code-Generator Harness / 代码生成器测试
//!
//! Drives the interactive VVC generator through scripted answer sequences.
//! The generator always writes to the same output directory, so each scenario
//! is run to completion and its output renamed before the next one starts.
//! The generated libraries are then compiled together with a verification
//! testbench; the phase passes when that testbench passes.
//!
//! 通过预设的答案序列驱动交互式 VVC 生成器。生成器总是写入同一个输出目录，
//! 因此每个场景都运行完毕并重命名其输出后，下一个场景才会开始。
//! 随后将生成的库与验证 testbench 一起编译；该 testbench 通过即表示此阶段通过。

use anyhow::{Context, Result};
use colored::*;
use std::path::PathBuf;
use std::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::core::config::{GeneratorPhase, Suite};
use crate::core::driver::RunContext;
use crate::core::engine::RegressionEngine;
use crate::core::error::RegressError;
use crate::core::models::{PhaseOutcome, verification_exit_code};
use crate::core::planner::{PlannedScenario, plan_scenarios};
use crate::core::simulator::configure;
use crate::infra::command::{command_from_argv, spawn_and_capture, split_command_line};
use crate::infra::fs::replace_dir;
use crate::infra::t;

/// Output of one scenario after it has been moved out of the generator's way.
#[derive(Debug, Clone)]
pub struct GeneratedLibrary {
    pub scenario: PlannedScenario,
    pub dir: PathBuf,
}

/// The generator command line with `{python}` substituted.
pub fn generator_argv(generator: &GeneratorPhase, python: &str) -> Result<Vec<String>> {
    split_command_line(&generator.command.replace("{python}", python))
}

/// Runs a single scenario and renames its output directory.
///
/// # Errors
/// [`RegressError::Generator`] when the generator exits unsuccessfully, which
/// is also how a prompt sequence that does not match the answers shows up
/// (the generator reads end-of-file); [`RegressError::MissingOutput`] when it
/// exits cleanly without writing its output directory.
pub async fn run_scenario(
    argv: &[String],
    generator: &GeneratorPhase,
    scenario: &PlannedScenario,
    ctx: &RunContext,
    cancel: &CancellationToken,
) -> Result<GeneratedLibrary> {
    let output_dir = ctx.sim_dir.join(&generator.output_dir);
    if output_dir.exists() {
        remove_leftover_output(&output_dir)?;
    }

    let cmd = command_from_argv(argv, &ctx.sim_dir)?;
    let captured = spawn_and_capture(cmd, &scenario.answers, false, cancel).await?;
    tracing::debug!("scenario {} output:\n{}", scenario.name, captured.output);

    if !captured.status.success() {
        return Err(RegressError::Generator {
            scenario: scenario.name.clone(),
            reason: format!(
                "generator exited with {} after {} answers",
                captured
                    .code()
                    .map(|c| format!("code {c}"))
                    .unwrap_or_else(|| "a signal".to_string()),
                scenario.answers.len()
            ),
            output: captured.output,
        }
        .into());
    }

    if !output_dir.is_dir() {
        return Err(RegressError::MissingOutput {
            scenario: scenario.name.clone(),
            path: output_dir,
        }
        .into());
    }

    let dir = ctx.sim_dir.join(&scenario.renamed_dir);
    replace_dir(&output_dir, &dir)?;
    Ok(GeneratedLibrary {
        scenario: scenario.clone(),
        dir,
    })
}

fn remove_leftover_output(output_dir: &std::path::Path) -> Result<()> {
    tracing::info!("removing leftover generator output {}", output_dir.display());
    std::fs::remove_dir_all(output_dir)
        .with_context(|| format!("Failed to remove {}", output_dir.display()))
}

/// Runs every scenario of `generator` in order.
pub async fn generate_all(
    generator: &GeneratorPhase,
    ctx: &RunContext,
    cancel: &CancellationToken,
) -> Result<Vec<GeneratedLibrary>> {
    let argv = generator_argv(generator, &ctx.python)?;
    let scenarios = plan_scenarios(generator);
    let total = scenarios.len();

    let mut generated = Vec::with_capacity(total);
    for scenario in &scenarios {
        println!(
            "{}",
            t!(
                "generator.scenario",
                index = scenario.index,
                total = total,
                name = &scenario.name,
                answers = scenario.answers.len()
            )
            .blue()
        );
        let library = run_scenario(&argv, generator, scenario, ctx, cancel).await?;
        println!(
            "{}",
            t!("generator.renamed", path = library.dir.display())
        );
        generated.push(library);
    }
    Ok(generated)
}

/// Registers the base sources, every generated library and the verification testbench.
pub fn register_generated<E: RegressionEngine>(
    engine: &mut E,
    generator: &GeneratorPhase,
    generated: &[GeneratedLibrary],
) {
    for group in &generator.base_sources {
        engine.add_files(group);
    }
    for library in generated {
        for group in library.scenario.source_groups(generator) {
            engine.add_files(&group);
        }
    }
    for group in &generator.testbench_sources {
        engine.add_files(group);
    }
}

/// Runs the whole generator phase: scenarios, then the verification run.
pub async fn run_generator<E: RegressionEngine>(
    engine: &mut E,
    suite: &Suite,
    generator: &GeneratorPhase,
    ctx: &RunContext,
    cancel: &CancellationToken,
) -> Result<PhaseOutcome> {
    let started = Instant::now();
    println!(
        "{}",
        t!("generator.verify", count = generator.scenarios.len()).bold()
    );

    let generated = generate_all(generator, ctx, cancel).await?;

    println!("{}", t!("generator.verifying", count = generated.len()));
    register_generated(engine, generator, &generated);

    let simulator = engine.simulator_name().await?;
    println!("{}", t!("run.simulator", name = &simulator).cyan());
    let options = configure(engine, &simulator, suite.generator_simulator_profile(&simulator));

    let result = engine.start(&options).await?;
    println!(
        "{}",
        t!("run.result", passed = result.passed, failed = result.failed)
    );
    if result.nothing_passed() {
        println!("{}", t!("run.no_tests_passed").red());
    }

    Ok(PhaseOutcome {
        name: t!("generator.phase_name").to_string(),
        result,
        post_run_failures: 0,
        exit_code: verification_exit_code(result),
        simulator,
        duration: started.elapsed(),
    })
}
