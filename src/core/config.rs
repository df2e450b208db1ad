//! # Suite Configuration Module / 套件配置模块
//!
//! A suite file describes one maintenance run: the source groups to compile,
//! the testbench generic sweeps, the simulator option table and, optionally,
//! the code-generator scenarios whose outputs must compile.
//!
//! 套件文件描述一次维护运行：要编译的源文件组、testbench generic 扫描、
//! 仿真器选项表，以及可选的代码生成器场景（其输出必须能够编译）。

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;

use crate::core::error::RegressError;
use crate::core::matrix::cartesian_product;
use crate::core::models::{GenericAssignment, GenericValue, SourceGroup};

/// Suites shipped with the binary, keyed by the name accepted by `--builtin`.
static BUILTIN_SUITES: Lazy<BTreeMap<&'static str, &'static str>> = Lazy::new(|| {
    BTreeMap::from([
        (
            "bitvis-vip-axistream",
            include_str!("../../suites/bitvis_vip_axistream.toml"),
        ),
        (
            "uvvm-vvc-framework",
            include_str!("../../suites/uvvm_vvc_framework.toml"),
        ),
    ])
});

/// A complete maintenance suite, loaded from a TOML file.
/// 从 TOML 文件加载的完整维护套件。
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Suite {
    /// Display name, printed as "Verify <name>".
    pub name: String,

    /// The language for the runner's output messages (e.g., "en", "zh-CN").
    #[serde(default = "default_language")]
    pub language: String,

    /// Cleanup only touches a working directory whose last segment has this name.
    #[serde(default = "default_sim_dir_name")]
    pub sim_dir_name: String,

    #[serde(default)]
    pub regression: Option<RegressionPhase>,

    /// Simulator option table, searched in order.
    #[serde(default)]
    pub simulators: Vec<SimulatorProfile>,

    #[serde(default)]
    pub generator: Option<GeneratorPhase>,
}

/// Sources and testbench sweeps of the main regression run.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RegressionPhase {
    pub sources: Vec<SourceGroup>,
    #[serde(default)]
    pub testbenches: Vec<TestbenchMatrix>,
    /// Remove simulation output after a clean run. A later phase that reuses
    /// the engine's compiled libraries needs this off.
    #[serde(default = "default_true")]
    pub cleanup_on_success: bool,
}

/// Generic sweeps attached to one testbench entity.
///
/// Each sweep holds one axis of candidate values per generic name; a sweep of
/// single-value axes is a fixed configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TestbenchMatrix {
    pub entity: String,
    pub generics: Vec<String>,
    pub sweeps: Vec<Vec<Vec<GenericValue>>>,
}

impl TestbenchMatrix {
    /// Expands every sweep, in declaration order, into generic assignments.
    pub fn assignments(&self) -> Vec<GenericAssignment> {
        self.sweeps
            .iter()
            .flat_map(|axes| cartesian_product(axes))
            .map(|config| GenericAssignment::from_configuration(&self.entity, &self.generics, &config))
            .collect()
    }
}

/// Options applied when the engine reports one of `names` as its simulator.
/// 当引擎报告的仿真器属于 `names` 之一时应用的选项。
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SimulatorProfile {
    pub names: Vec<String>,
    #[serde(default)]
    pub sim_options: Option<String>,
    #[serde(default)]
    pub global_options: Vec<String>,
    /// When present the engine is told to use this simulator with these compile options.
    #[serde(default)]
    pub com_options: Option<Vec<String>>,
    /// Verification commands run after a successful regression, each as an argv list.
    #[serde(default)]
    pub post_run: Vec<Vec<String>>,
}

impl SimulatorProfile {
    pub fn matches(&self, simulator: &str) -> bool {
        self.names.iter().any(|n| n == simulator)
    }
}

/// The code-generator harness: scenarios plus the verification run over their outputs.
/// 代码生成器测试：场景以及对其输出的验证运行。
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneratorPhase {
    /// Command line of the interactive generator, split with shell quoting rules.
    pub command: String,
    /// Fixed directory the generator writes into, relative to the working directory.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
    /// Name each output directory is renamed to; `{index}` and `{name}` are substituted.
    #[serde(default = "default_rename_to")]
    pub rename_to: String,
    /// Glob registered for each generated library.
    pub library_glob: String,
    #[serde(default = "default_library_name")]
    pub library_name: String,
    /// Extra globs compiled into every generated library.
    #[serde(default)]
    pub library_extra_sources: Vec<String>,
    /// Sources compiled before the generated libraries.
    #[serde(default)]
    pub base_sources: Vec<SourceGroup>,
    /// The testbench that proves the generated libraries compile and elaborate.
    #[serde(default)]
    pub testbench_sources: Vec<SourceGroup>,
    /// Simulator table for the verification run. Without it the suite's
    /// `[[simulators]]` table applies; `post_run` is never used here.
    #[serde(default)]
    pub simulators: Option<Vec<SimulatorProfile>>,
    pub scenarios: Vec<Scenario>,
}

/// One scripted conversation with the generator.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Scenario {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Canned answers, one per prompt, in prompt order.
    pub answers: Vec<GenericValue>,
}

impl Scenario {
    pub fn answer_lines(&self) -> Vec<String> {
        self.answers.iter().map(ToString::to_string).collect()
    }
}

/// Substitutes the `{index}` and `{name}` placeholders of a generator pattern.
pub fn expand_pattern(pattern: &str, index: usize, name: &str) -> String {
    pattern
        .replace("{index}", &index.to_string())
        .replace("{name}", name)
}

fn default_true() -> bool {
    true
}

fn default_language() -> String {
    "en".to_string()
}

fn default_sim_dir_name() -> String {
    "sim".to_string()
}

fn default_output_dir() -> String {
    "output".to_string()
}

fn default_rename_to() -> String {
    "generated_vip_{index}".to_string()
}

fn default_library_name() -> String {
    "vip_test_{index}".to_string()
}

impl Suite {
    /// Parses and validates a suite from TOML text.
    pub fn from_toml(content: &str) -> Result<Self> {
        let suite: Suite = toml::from_str(content)?;
        suite.validate()?;
        Ok(suite)
    }

    /// Finds the first simulator profile that matches `simulator`.
    pub fn simulator_profile(&self, simulator: &str) -> Option<&SimulatorProfile> {
        self.simulators.iter().find(|p| p.matches(simulator))
    }

    /// The profile for the generator verification run: the generator's own
    /// table when it has one, the suite's otherwise.
    pub fn generator_simulator_profile(&self, simulator: &str) -> Option<&SimulatorProfile> {
        match self.generator.as_ref().and_then(|g| g.simulators.as_ref()) {
            Some(profiles) => profiles.iter().find(|p| p.matches(simulator)),
            None => self.simulator_profile(simulator),
        }
    }

    /// Checks the invariants the runner relies on.
    pub fn validate(&self) -> Result<(), RegressError> {
        if self.regression.is_none() && self.generator.is_none() {
            return Err(RegressError::invalid_suite(
                &self.name,
                "neither a [regression] nor a [generator] phase is defined",
            ));
        }

        if let Some(regression) = &self.regression {
            for tb in &regression.testbenches {
                for (i, sweep) in tb.sweeps.iter().enumerate() {
                    if sweep.len() != tb.generics.len() {
                        return Err(RegressError::invalid_suite(
                            &self.name,
                            format!(
                                "sweep {} of '{}' has {} axes for {} generics",
                                i + 1,
                                tb.entity,
                                sweep.len(),
                                tb.generics.len()
                            ),
                        ));
                    }
                    if let Some(pos) = sweep.iter().position(Vec::is_empty) {
                        return Err(RegressError::invalid_suite(
                            &self.name,
                            format!(
                                "sweep {} of '{}' has no values for {}",
                                i + 1,
                                tb.entity,
                                tb.generics[pos]
                            ),
                        ));
                    }
                }
            }
        }

        let generator_profiles = self
            .generator
            .as_ref()
            .and_then(|g| g.simulators.as_deref())
            .unwrap_or_default();
        if self
            .simulators
            .iter()
            .chain(generator_profiles)
            .any(|p| p.names.is_empty())
        {
            return Err(RegressError::invalid_suite(
                &self.name,
                "a [[simulators]] entry has no names",
            ));
        }

        if let Some(generator) = &self.generator {
            let mut seen = HashSet::new();
            for scenario in &generator.scenarios {
                if !seen.insert(scenario.name.as_str()) {
                    return Err(RegressError::invalid_suite(
                        &self.name,
                        format!("duplicate generator scenario '{}'", scenario.name),
                    ));
                }
            }
            let distinct = |p: &str| p.contains("{index}") || p.contains("{name}");
            if generator.scenarios.len() > 1
                && !(distinct(&generator.rename_to) && distinct(&generator.library_name))
            {
                return Err(RegressError::invalid_suite(
                    &self.name,
                    "rename_to and library_name must contain {index} or {name} when there is more than one scenario",
                ));
            }
        }

        Ok(())
    }
}

/// Loads and validates a suite file.
pub fn load_suite(path: &Path) -> Result<Suite> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read suite file: {}", path.display()))?;
    Suite::from_toml(&content)
        .with_context(|| format!("Failed to parse suite file: {}", path.display()))
}

/// Loads one of the suites embedded in the binary.
pub fn builtin_suite(name: &str) -> Result<Suite> {
    let content = builtin_suite_source(name).ok_or_else(|| {
        anyhow::anyhow!(
            "Unknown built-in suite '{}'. Available: {}",
            name,
            builtin_suite_names().join(", ")
        )
    })?;
    Suite::from_toml(content).with_context(|| format!("Built-in suite '{}' is invalid", name))
}

/// The TOML source of a built-in suite, used by `init` to write a starting point.
pub fn builtin_suite_source(name: &str) -> Option<&'static str> {
    BUILTIN_SUITES.get(name).copied()
}

pub fn builtin_suite_names() -> Vec<&'static str> {
    BUILTIN_SUITES.keys().copied().collect()
}
