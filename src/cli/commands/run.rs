//! # Run Command Module / 运行命令模块
//!
//! This module implements the `run` and `generate` commands, which execute a
//! suite against the HDLRegression engine and turn the outcome into the
//! process exit code.
//!
//! 此模块实现 `run` 和 `generate` 命令，针对 HDLRegression 引擎执行套件，
//! 并将结果转换为进程退出码。

use anyhow::{Context, Result};
use colored::*;
use std::{env, path::PathBuf};
use tokio::signal;
use tokio_util::sync::CancellationToken;

use crate::{
    core::{
        config::{self, Suite},
        driver::RunContext,
        error::RegressError,
        execution::{PhaseSelection, run_suite},
    },
    infra::{
        fs::absolute_path,
        hdlregression::{EngineSettings, HdlRegression},
        t,
    },
    reporting::{generate_html_report, print_error_output, print_summary, write_json_report},
};

/// Where the suite comes from.
#[derive(Debug, Clone)]
pub enum SuiteSource {
    File(PathBuf),
    Builtin(String),
}

impl SuiteSource {
    pub fn load(&self) -> Result<Suite> {
        match self {
            SuiteSource::File(path) => config::load_suite(path),
            SuiteSource::Builtin(name) => config::builtin_suite(name),
        }
    }
}

/// Arguments shared by `run` and `generate`.
#[derive(Debug, Clone)]
pub struct RunArgs {
    pub suite: SuiteSource,
    pub sim_dir: PathBuf,
    pub python: Option<String>,
    pub simulator: Option<String>,
    pub keep_output: bool,
    pub html: Option<PathBuf>,
    pub json: Option<PathBuf>,
    /// Arguments after `--`, handed to HDLRegression's own parser.
    pub engine_args: Vec<String>,
    /// `--lang` was given, so the suite's language does not apply.
    pub lang_overridden: bool,
}

/// Executes the selected phases of a suite and returns the exit code.
pub async fn execute(args: RunArgs, selection: PhaseSelection) -> Result<u8> {
    let suite = args.suite.load()?;
    if !args.lang_overridden {
        rust_i18n::set_locale(&crate::resolve_locale(suite.language.clone()));
    }

    let sim_dir = absolute_path(&args.sim_dir)
        .with_context(|| t!("sim_dir_not_found", path = args.sim_dir.display()).to_string())?;
    println!("{}", t!("working_dir", path = sim_dir.display()));

    let python = args
        .python
        .or_else(|| env::var("VIP_REGRESS_PYTHON").ok())
        .unwrap_or_else(|| "python3".to_string());
    let simulator_override = args
        .simulator
        .or_else(|| env::var("VIP_REGRESS_SIMULATOR").ok());

    let cancel = setup_signal_handler();
    let settings = EngineSettings {
        python: python.clone(),
        work_dir: sim_dir.clone(),
        simulator_override,
        engine_args: args.engine_args,
        echo: true,
    };
    HdlRegression::check_import(&settings, &cancel).await?;

    let ctx = RunContext {
        sim_dir,
        sentinel: suite.sim_dir_name.clone(),
        keep_output: args.keep_output,
        python,
    };

    let outcome = match run_suite(&suite, selection, &ctx, &cancel, || {
        HdlRegression::new(settings.clone(), cancel.clone())
    })
    .await
    {
        Ok(outcome) => outcome,
        Err(e) => {
            if let Some(output) = e
                .downcast_ref::<RegressError>()
                .and_then(RegressError::captured_output)
            {
                print_error_output(&t!("captured_output"), output);
            }
            return Err(e);
        }
    };

    print_summary(&outcome);

    if let Some(report_path) = &args.html {
        println!("\n{}", t!("report.html_writing", path = report_path.display()));
        if let Err(e) = generate_html_report(&outcome, report_path) {
            eprintln!("{} {}", t!("report.html_failed").red(), e);
        }
    }
    if let Some(report_path) = &args.json {
        if let Err(e) = write_json_report(&outcome, report_path) {
            eprintln!("{} {}", t!("report.json_failed").red(), e);
        }
    }

    Ok(outcome.process_exit_code())
}

/// Sets up a signal handler for graceful shutdown.
fn setup_signal_handler() -> CancellationToken {
    let token = CancellationToken::new();
    let token_clone = token.clone();

    tokio::spawn(async move {
        if signal::ctrl_c().await.is_ok() {
            println!("\n{}", t!("shutdown_signal").yellow());
            token_clone.cancel();
        }
    });

    token
}
