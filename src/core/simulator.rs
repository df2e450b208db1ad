//! # Simulator Dispatch / 仿真器分派
//!
//! Turns the simulator name reported by the engine into engine settings,
//! using the suite's simulator table.
//!
//! 使用套件的仿真器表，将引擎报告的仿真器名称转换为引擎设置。

use crate::core::config::SimulatorProfile;
use crate::core::engine::RegressionEngine;
use crate::core::models::RunOptions;

/// Applies `profile` to `engine` and returns the options for the run.
///
/// With no profile (an unrecognized simulator) the engine is left untouched
/// and the run uses the engine's defaults.
pub fn configure<E: RegressionEngine>(
    engine: &mut E,
    simulator: &str,
    profile: Option<&SimulatorProfile>,
) -> RunOptions {
    let Some(profile) = profile else {
        tracing::info!("no options configured for simulator '{}'", simulator);
        return RunOptions::default();
    };

    if let Some(com_options) = &profile.com_options {
        engine.set_simulator(simulator, com_options);
    }

    RunOptions {
        sim_options: profile.sim_options.clone(),
        global_options: profile.global_options.clone(),
    }
}

/// Renders an argv list for display.
pub fn display_command(argv: &[String]) -> String {
    shlex::try_join(argv.iter().map(String::as_str)).unwrap_or_else(|_| argv.join(" "))
}
