//! # Config Module Unit Tests / Config 模块单元测试
//!
//! Suite parsing, validation, the built-in suites and the planner.
//!
//! 套件解析、校验、内置套件以及计划器。

mod common;

use vip_regress::cli::commands::init::rename_suite;
use vip_regress::core::config::{
    Suite, builtin_suite, builtin_suite_names, builtin_suite_source, expand_pattern, load_suite,
};
use vip_regress::core::error::RegressError;
use vip_regress::core::planner::plan_suite;

fn invalid_reason(content: &str) -> String {
    let err = Suite::from_toml(content).expect_err("suite should be rejected");
    match err.downcast_ref::<RegressError>() {
        Some(RegressError::InvalidSuite { reason, .. }) => reason.clone(),
        other => panic!("expected InvalidSuite, got {:?}", other),
    }
}

#[cfg(test)]
mod builtin_tests {
    use super::*;

    #[test]
    fn test_all_builtin_suites_parse() {
        let names = builtin_suite_names();
        assert_eq!(names, ["bitvis-vip-axistream", "uvvm-vvc-framework"]);
        for name in names {
            builtin_suite(name).unwrap();
        }
    }

    #[test]
    fn test_unknown_builtin_lists_available() {
        let err = builtin_suite("nope").unwrap_err().to_string();
        assert!(err.contains("bitvis-vip-axistream"));
        assert!(builtin_suite_source("nope").is_none());
    }

    #[test]
    fn test_axistream_assignment_counts() {
        let suite = builtin_suite("bitvis-vip-axistream").unwrap();
        let regression = suite.regression.as_ref().unwrap();
        let counts: Vec<(String, usize)> = regression
            .testbenches
            .iter()
            .map(|tb| (tb.entity.clone(), tb.assignments().len()))
            .collect();
        assert_eq!(
            counts,
            vec![
                ("axistream_bfm_tb".to_string(), 2),
                ("axistream_vvc_tb".to_string(), 15),
                ("axistream_vvc_multiple_tb".to_string(), 2),
                ("axistream_vvc_width_tb".to_string(), 1),
            ]
        );
        assert_eq!(plan_suite(&suite).assignments.len(), 20);
        assert_eq!(regression.sources.len(), 6);
        assert!(suite.generator.is_none());
    }

    #[test]
    fn test_axistream_first_sweep_order() {
        let suite = builtin_suite("bitvis-vip-axistream").unwrap();
        let vvc_tb = &suite.regression.as_ref().unwrap().testbenches[1];
        let assignments = vvc_tb.assignments();
        let widths: Vec<(&str, &str)> = assignments[..4]
            .iter()
            .map(|a| (a.generics[0].1.as_str(), a.generics[1].1.as_str()))
            .collect();
        assert_eq!(widths, [("8", "8"), ("8", "16"), ("16", "8"), ("16", "16")]);
        assert_eq!(assignments[0].generics[4], ("GC_INCLUDE_TUSER".to_string(), "true".to_string()));
    }

    #[test]
    fn test_axistream_simulator_profiles() {
        let suite = builtin_suite("bitvis-vip-axistream").unwrap();
        let modelsim = suite.simulator_profile("MODELSIM").unwrap();
        assert_eq!(modelsim.sim_options.as_deref(), Some("-t ps"));
        assert_eq!(modelsim.post_run.len(), 2);
        assert!(suite.simulator_profile("NVC").unwrap().com_options.is_none());
        assert!(suite.simulator_profile("RIVIERA-PRO").unwrap().com_options.is_some());
        assert!(suite.simulator_profile("GHDL").is_none());
    }

    #[test]
    fn test_framework_scenarios_are_distinct() {
        let suite = builtin_suite("uvvm-vvc-framework").unwrap();
        let plan = plan_suite(&suite);
        assert_eq!(plan.scenarios.len(), 14);
        assert_eq!(plan.sources.len(), 14);

        let first = &plan.scenarios[0];
        assert_eq!(first.index, 1);
        assert_eq!(first.answers, ["test_1", "n", "1", "n"]);
        assert_eq!(first.renamed_dir, "generated_vip_1");
        assert_eq!(first.library, "vip_test_1");
        assert_eq!(first.glob, "../../sim/generated_vip_1/*.vhd");

        let mut dirs: Vec<&str> = plan.scenarios.iter().map(|s| s.renamed_dir.as_str()).collect();
        dirs.sort();
        dirs.dedup();
        assert_eq!(dirs.len(), 14);
        assert_eq!(plan.scenarios[13].answers.len(), 13);
    }

    #[test]
    fn test_framework_generator_options_match_regression_rules() {
        let suite = builtin_suite("uvvm-vvc-framework").unwrap();
        assert!(!suite.regression.as_ref().unwrap().cleanup_on_success);

        let nvc = suite.simulator_profile("NVC").unwrap();
        assert_eq!(nvc.global_options.len(), 4);
        assert!(suite.generator_simulator_profile("NVC").is_none());

        let riviera = suite.generator_simulator_profile("RIVIERA").unwrap();
        assert_eq!(riviera.sim_options.as_deref(), Some("-t ns"));
        assert!(riviera.global_options.is_empty());
        assert!(riviera.com_options.is_some());
    }

    #[test]
    fn test_axistream_cleans_after_success() {
        let suite = builtin_suite("bitvis-vip-axistream").unwrap();
        assert!(suite.regression.as_ref().unwrap().cleanup_on_success);
        assert_eq!(
            suite.generator_simulator_profile("MODELSIM").map(|p| &p.names),
            suite.simulator_profile("MODELSIM").map(|p| &p.names)
        );
    }

    #[test]
    fn test_framework_simulator_group() {
        let suite = builtin_suite("uvvm-vvc-framework").unwrap();
        let modelsim = suite.simulator_profile("MODELSIM").unwrap();
        let riviera = suite.simulator_profile("RIVIERA").unwrap();
        assert_eq!(modelsim.sim_options.as_deref(), Some("-t ns"));
        assert_eq!(modelsim.names, riviera.names);
    }
}

#[cfg(test)]
mod parsing_tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_are_applied() {
        let suite = Suite::from_toml(common::REGRESSION_SUITE).unwrap();
        assert_eq!(suite.language, "en");
        assert_eq!(suite.sim_dir_name, "sim");
        assert_eq!(plan_suite(&suite).assignments.len(), 5);
    }

    #[test]
    fn test_load_suite_reports_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        fs::write(&path, "name = \"x\"\n[[regression.sources]\n").unwrap();
        let err = format!("{:#}", load_suite(&path).unwrap_err());
        assert!(err.contains("Failed to parse suite file"));
        assert!(err.contains("broken.toml"));

        let missing = dir.path().join("missing.toml");
        let err = format!("{:#}", load_suite(&missing).unwrap_err());
        assert!(err.contains("Failed to read suite file"));
    }

    #[test]
    fn test_expand_pattern() {
        assert_eq!(expand_pattern("generated_vip_{index}", 3, "test_3"), "generated_vip_3");
        assert_eq!(expand_pattern("lib_{name}", 3, "uart"), "lib_uart");
        assert_eq!(expand_pattern("fixed", 3, "uart"), "fixed");
    }

    #[test]
    fn test_rename_suite_only_touches_top_level_name() {
        let source = builtin_suite_source("bitvis-vip-axistream").unwrap();
        let renamed = rename_suite(source, "Bitvis VIP AXI Stream", "My \"Stream\" VIP");
        let suite = Suite::from_toml(&renamed).unwrap();
        assert_eq!(suite.name, "My \"Stream\" VIP");
        assert_eq!(rename_suite(source, "Bitvis VIP AXI Stream", "Bitvis VIP AXI Stream"), source);
    }
}

#[cfg(test)]
mod validation_tests {
    use super::*;

    #[test]
    fn test_suite_without_phases_is_rejected() {
        let reason = invalid_reason("name = \"empty\"\n");
        assert!(reason.contains("neither"));
    }

    #[test]
    fn test_sweep_axis_count_must_match_generics() {
        let reason = invalid_reason(
            r#"
name = "bad"
[regression]
sources = []
[[regression.testbenches]]
entity = "tb"
generics = ["A", "B"]
sweeps = [[[1], [2], [3]]]
"#,
        );
        assert!(reason.contains("3 axes for 2 generics"));
    }

    #[test]
    fn test_empty_axis_is_rejected() {
        let reason = invalid_reason(
            r#"
name = "bad"
[regression]
sources = []
[[regression.testbenches]]
entity = "tb"
generics = ["A", "B"]
sweeps = [[[1], []]]
"#,
        );
        assert!(reason.contains("no values for B"));
    }

    #[test]
    fn test_simulator_profile_needs_names() {
        let reason = invalid_reason(
            r#"
name = "bad"
[regression]
sources = []
[[simulators]]
names = []
"#,
        );
        assert!(reason.contains("no names"));
    }

    #[test]
    fn test_generator_simulator_profile_needs_names() {
        let reason = invalid_reason(
            r#"
name = "bad"
[generator]
command = "gen"
library_glob = "generated_vip_{index}/*.vhd"
[[generator.simulators]]
names = []
[[generator.scenarios]]
name = "one"
answers = ["a"]
"#,
        );
        assert!(reason.contains("no names"));
    }

    #[test]
    fn test_duplicate_scenarios_are_rejected() {
        let reason = invalid_reason(
            r#"
name = "bad"
[generator]
command = "gen"
library_glob = "generated_vip_{index}/*.vhd"
[[generator.scenarios]]
name = "same"
answers = ["a"]
[[generator.scenarios]]
name = "same"
answers = ["b"]
"#,
        );
        assert!(reason.contains("duplicate generator scenario 'same'"));
    }

    #[test]
    fn test_fixed_rename_target_needs_single_scenario() {
        let reason = invalid_reason(
            r#"
name = "bad"
[generator]
command = "gen"
rename_to = "generated"
library_glob = "generated/*.vhd"
[[generator.scenarios]]
name = "one"
answers = ["a"]
[[generator.scenarios]]
name = "two"
answers = ["b"]
"#,
        );
        assert!(reason.contains("rename_to"));
    }
}
