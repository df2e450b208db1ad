use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;
use tempfile::tempdir;

fn vip_regress() -> Command {
    let mut cmd = Command::cargo_bin("vip-regress").unwrap();
    cmd.env_remove("VIP_REGRESS_PYTHON")
        .env_remove("VIP_REGRESS_SIMULATOR")
        .env_remove("RUST_LOG");
    cmd
}

/// `plan` expands the built-in AXI-Stream suite without touching any tool.
///
/// `plan` 在不调用任何工具的情况下展开内置的 AXI-Stream 套件。
#[test]
fn test_plan_builtin_suite() {
    vip_regress()
        .args(["plan", "--builtin", "bitvis-vip-axistream", "--lang", "en"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Verify Bitvis VIP AXI Stream"))
        .stdout(predicate::str::contains("Generic assignments (20)"))
        .stdout(predicate::str::contains("axistream_vvc_width_tb"))
        .stdout(predicate::str::contains("GC_USE_SETUP_AND_HOLD=false"));
}

#[test]
fn test_plan_lists_generator_scenarios() {
    vip_regress()
        .args(["plan", "--builtin", "uvvm-vvc-framework", "--lang", "en"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Generator scenarios (14)"))
        .stdout(predicate::str::contains("generated_vip_14"));
}

#[test]
fn test_plan_in_chinese() {
    vip_regress()
        .args(["plan", "--builtin", "bitvis-vip-axistream", "--lang", "zh-CN"])
        .assert()
        .success()
        .stdout(predicate::str::contains("泛型赋值（20）"));
}

#[test]
fn test_unknown_builtin_is_rejected_by_clap() {
    vip_regress()
        .args(["plan", "--builtin", "no-such-suite"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no-such-suite"));
}

#[test]
fn test_missing_suite_file() {
    let dir = tempdir().unwrap();
    vip_regress()
        .current_dir(dir.path())
        .args(["run", "--lang", "en"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read suite file"));
}

/// A missing interpreter is reported before anything is deleted.
///
/// 缺少解释器时会在删除任何内容之前报告。
#[test]
fn test_missing_interpreter() {
    let dir = tempdir().unwrap();
    let sim_dir = dir.path().join("sim");
    fs::create_dir(&sim_dir).unwrap();
    fs::write(sim_dir.join("transcript"), "x").unwrap();

    vip_regress()
        .args(["run", "--builtin", "bitvis-vip-axistream", "--lang", "en"])
        .arg("--sim-dir")
        .arg(&sim_dir)
        .args(["--python", "/nonexistent/bin/python3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("/nonexistent/bin/python3"));

    assert!(sim_dir.join("transcript").exists());
}

/// Arguments after `--` belong to HDLRegression and are accepted verbatim.
///
/// `--` 之后的参数属于 HDLRegression，会被原样接受。
#[test]
fn test_engine_arguments_after_separator() {
    let dir = tempdir().unwrap();
    let sim_dir = dir.path().join("sim");
    fs::create_dir(&sim_dir).unwrap();

    vip_regress()
        .args(["run", "--builtin", "bitvis-vip-axistream", "--lang", "en"])
        .arg("--sim-dir")
        .arg(&sim_dir)
        .args(["--python", "/nonexistent/bin/python3"])
        .args(["--", "-tc", "axistream_vvc_tb", "-t", "4"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("/nonexistent/bin/python3"));
}

#[test]
fn test_clean_skips_foreign_directory() {
    let dir = tempdir().unwrap();
    let src = dir.path().join("src");
    fs::create_dir(&src).unwrap();
    fs::write(src.join("design.vhd"), "x").unwrap();

    vip_regress()
        .args(["clean", "--lang", "en", "--sim-dir"])
        .arg(&src)
        .assert()
        .success()
        .stdout(predicate::str::contains("Not in a 'sim' directory"));

    assert!(src.join("design.vhd").exists());
}

#[test]
fn test_clean_empties_sim_directory() {
    let dir = tempdir().unwrap();
    let sim_dir = dir.path().join("sim");
    fs::create_dir_all(sim_dir.join("hdlregression")).unwrap();
    fs::write(sim_dir.join("transcript"), "x").unwrap();

    vip_regress()
        .args(["clean", "--lang", "en", "--sim-dir"])
        .arg(&sim_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed 2 entries"));

    assert!(sim_dir.is_dir());
    assert_eq!(fs::read_dir(&sim_dir).unwrap().count(), 0);
}

#[test]
fn test_init_writes_template() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("suites").join("framework.toml");

    vip_regress()
        .args(["init", "--non-interactive", "--lang", "en"])
        .args(["--template", "uvvm-vvc-framework", "--output"])
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Suite written to"));

    let written = fs::read_to_string(&output).unwrap();
    assert!(written.contains("name = \"UVVM VVC Framework\""));

    vip_regress()
        .args(["plan", "--lang", "en", "--suite"])
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Generator scenarios (14)"));
}

#[test]
fn test_init_refuses_to_overwrite() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("VipRegress.toml");
    fs::write(&output, "# mine").unwrap();

    vip_regress()
        .args(["init", "--non-interactive", "--lang", "en", "--output"])
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("--force"));
    assert_eq!(fs::read_to_string(&output).unwrap(), "# mine");

    vip_regress()
        .args(["init", "--non-interactive", "--force", "--lang", "en", "--output"])
        .arg(&output)
        .assert()
        .success();
    assert!(fs::read_to_string(&output).unwrap().contains("Bitvis VIP AXI Stream"));
}

#[test]
fn test_no_arguments_prints_help() {
    vip_regress()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}
