//! # Suite Planning Module / 套件计划模块
//!
//! Expands a suite into everything it will register with the engine, without
//! running anything. Used by the `plan` command and by the generator harness
//! to name directories and libraries.
//!
//! 将套件展开为将要注册到引擎的全部内容，而不执行任何操作。
//! 供 `plan` 命令以及生成器测试用来命名目录和库。

use crate::core::config::{GeneratorPhase, Suite, expand_pattern};
use crate::core::models::{GenericAssignment, SourceGroup};

/// A generator scenario with its derived names.
/// 带有派生名称的生成器场景。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedScenario {
    /// 1-based position in the suite.
    pub index: usize,
    pub name: String,
    pub answers: Vec<String>,
    /// Directory the generator output is renamed to, relative to the working directory.
    pub renamed_dir: String,
    pub library: String,
    pub glob: String,
}

impl PlannedScenario {
    /// Source groups compiling this scenario's output and the extra sources into its library.
    pub fn source_groups(&self, generator: &GeneratorPhase) -> Vec<SourceGroup> {
        std::iter::once(self.glob.clone())
            .chain(generator.library_extra_sources.iter().cloned())
            .map(|pattern| SourceGroup::new(pattern, self.library.clone()))
            .collect()
    }
}

/// Everything a suite run would register.
#[derive(Debug, Clone, Default)]
pub struct SuitePlan {
    pub sources: Vec<SourceGroup>,
    pub assignments: Vec<GenericAssignment>,
    pub scenarios: Vec<PlannedScenario>,
}

pub fn plan_scenarios(generator: &GeneratorPhase) -> Vec<PlannedScenario> {
    generator
        .scenarios
        .iter()
        .enumerate()
        .map(|(i, scenario)| {
            let index = i + 1;
            PlannedScenario {
                index,
                name: scenario.name.clone(),
                answers: scenario.answer_lines(),
                renamed_dir: expand_pattern(&generator.rename_to, index, &scenario.name),
                library: expand_pattern(&generator.library_name, index, &scenario.name),
                glob: expand_pattern(&generator.library_glob, index, &scenario.name),
            }
        })
        .collect()
}

pub fn plan_suite(suite: &Suite) -> SuitePlan {
    let mut plan = SuitePlan::default();
    if let Some(regression) = &suite.regression {
        plan.sources = regression.sources.clone();
        plan.assignments = regression
            .testbenches
            .iter()
            .flat_map(|tb| tb.assignments())
            .collect();
    }
    if let Some(generator) = &suite.generator {
        plan.scenarios = plan_scenarios(generator);
    }
    plan
}
