//! # Suite Execution Module / 套件执行模块
//!
//! Sequences the phases of a suite: initial cleanup, the regression phase,
//! the generator phase and the final cleanup when everything passed. Each
//! phase gets a fresh engine from the caller.
//!
//! 按顺序执行套件的各个阶段：初始清理、回归阶段、生成器阶段，
//! 以及全部通过后的最终清理。每个阶段都从调用方获取一个新的引擎。

use anyhow::Result;
use colored::*;
use tokio_util::sync::CancellationToken;

use crate::core::config::Suite;
use crate::core::driver::{RunContext, cleanup_working_dir, run_regression};
use crate::core::engine::RegressionEngine;
use crate::core::generator::run_generator;
use crate::core::models::SuiteOutcome;
use crate::infra::t;

/// Which phases of a suite to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseSelection {
    pub regression: bool,
    pub generator: bool,
}

impl PhaseSelection {
    pub const ALL: PhaseSelection = PhaseSelection {
        regression: true,
        generator: true,
    };

    pub const GENERATOR_ONLY: PhaseSelection = PhaseSelection {
        regression: false,
        generator: true,
    };
}

/// Runs the selected phases of `suite`, creating one engine per phase.
pub async fn run_suite<E, F>(
    suite: &Suite,
    selection: PhaseSelection,
    ctx: &RunContext,
    cancel: &CancellationToken,
    mut new_engine: F,
) -> Result<SuiteOutcome>
where
    E: RegressionEngine,
    F: FnMut() -> E,
{
    println!("{}", t!("verify_suite", name = &suite.name).bold());
    cleanup_working_dir(ctx, &t!("cleanup.previous_runs"))?;

    let mut outcome = SuiteOutcome::new(&suite.name);

    if selection.regression {
        if let Some(regression) = &suite.regression {
            let mut engine = new_engine();
            let phase = run_regression(&mut engine, suite, regression, ctx).await?;
            outcome.phases.push(phase);
        }
    }

    if selection.generator {
        if let Some(generator) = &suite.generator {
            let mut engine = new_engine();
            let phase = run_generator(&mut engine, suite, generator, ctx, cancel).await?;
            outcome.phases.push(phase);
        }
    }

    if outcome.phases.is_empty() {
        println!("{}", t!("run.no_phases").yellow());
    } else if outcome.is_success() && !ctx.keep_output {
        cleanup_working_dir(ctx, &t!("cleanup.output"))?;
    }

    Ok(outcome)
}
