#![cfg(unix)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Creates a temp dir holding `.monica.yml` with the given content.
fn project(yaml: &str) -> TempDir {
    let dir = TempDir::new().expect("temp dir");
    fs::write(dir.path().join(".monica.yml"), yaml).expect("write config");
    dir
}

fn monica(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("monica").expect("binary");
    cmd.current_dir(dir.path())
        .env_remove("MONICA_CONFIG")
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1");
    cmd
}

fn stdout_of(cmd: &mut Command) -> String {
    let output = cmd.output().expect("run monica");
    String::from_utf8_lossy(&output.stdout).into_owned()
}

const PIPELINE: &str = r#"
actions:
  - name: build
    desc: Build everything
    content:
      - action: prepare
      - command: echo cmd1
      - command: echo cmd2
  - name: prepare
    content:
      - command: echo cmdB
  - name: broken
    content:
      - command: echo before
      - command: "echo oops 1>&2; exit 4"
      - command: echo after
"#;

#[test]
fn runs_sub_actions_depth_first() {
    let dir = project(PIPELINE);
    let out = stdout_of(monica(&dir).arg("build"));

    let banner = out.find("now executing Build everything (build)").expect("banner");
    let b = out.find("-> echo cmdB").expect("cmdB");
    let one = out.find("-> echo cmd1").expect("cmd1");
    let two = out.find("-> echo cmd2").expect("cmd2");
    assert!(banner < b && b < one && one < two, "unexpected order:\n{}", out);

    // Only the chosen action is announced.
    assert!(!out.contains("(prepare)"));
}

#[test]
fn failing_command_stops_the_run() {
    let dir = project(PIPELINE);
    monica(&dir)
        .arg("broken")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("-> echo before"))
        .stdout(predicate::str::contains("echo after").not())
        .stderr(predicate::str::contains("oops"))
        .stderr(predicate::str::contains("failed with exit code 4"));
}

#[test]
fn defaults_and_flags_are_substituted() {
    let dir = project(
        r#"
actions:
  - name: greet
    desc: Say hello
    content:
      - echo hello ${who}-${who2}
    default:
      - who: world
      - who2: again
"#,
    );

    monica(&dir)
        .arg("greet")
        .assert()
        .success()
        .stdout(predicate::str::contains("hello world-again"));

    monica(&dir)
        .args(["greet", "--who", "you", "--who2", "there"])
        .assert()
        .success()
        .stdout(predicate::str::contains("hello you-there"));
}

#[test]
fn own_default_wins_over_inherited() {
    let dir = project(
        r#"
actions:
  - name: parent
    content:
      - action: child
    default:
      - x: "1"
  - name: child
    content:
      - echo x=${x}
    default:
      - x: "2"
"#,
    );

    monica(&dir)
        .arg("parent")
        .assert()
        .success()
        .stdout(predicate::str::contains("x=1"));
    monica(&dir)
        .arg("child")
        .assert()
        .success()
        .stdout(predicate::str::contains("x=2"));
}

#[test]
fn numeric_defaults_reach_the_shell_as_written() {
    let dir = project(
        r#"
version: 2
actions:
  - name: versions
    owner: platform
    content:
      - echo py=${py} t=${t} blank=[${blank}]
    default:
      - py: 3.10
      - t: 1.0
      - blank:
"#,
    );

    monica(&dir)
        .arg("versions")
        .assert()
        .success()
        .stdout(predicate::str::contains("py=3.10 t=1.0 blank=[]"));
}

#[test]
fn missing_required_flag_is_a_usage_error() {
    let dir = project(
        r#"
actions:
  - name: deploy
    content:
      - echo deploying ${env}
"#,
    );

    monica(&dir)
        .arg("deploy")
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("--env"));
}

#[test]
fn missing_config_exits_cleanly() {
    let dir = TempDir::new().expect("temp dir");
    monica(&dir)
        .arg("anything")
        .assert()
        .code(0)
        .stderr(predicate::str::contains("File .monica.yml not detected."));
}

#[test]
fn unparsable_config_exits_cleanly() {
    let dir = project("actions: [");
    monica(&dir)
        .assert()
        .code(0)
        .stderr(predicate::str::contains("Failed to parse YAML"));
}

#[test]
fn cyclic_references_are_reported_at_startup() {
    let dir = project(
        r#"
actions:
  - name: a
    content:
      - action: b
  - name: b
    content:
      - echo never
      - action: a
"#,
    );

    monica(&dir)
        .arg("b")
        .assert()
        .code(0)
        .stdout(predicate::str::contains("echo never").not())
        .stderr(predicate::str::contains("Cyclic action reference detected"));
}

#[test]
fn unresolved_reference_is_skipped() {
    let dir = project(
        r#"
actions:
  - name: a
    content:
      - action: ghost
      - echo still-runs
"#,
    );

    monica(&dir)
        .arg("a")
        .assert()
        .success()
        .stdout(predicate::str::contains("still-runs"));
}

#[test]
fn config_path_from_environment() {
    let dir = TempDir::new().expect("temp dir");
    fs::write(
        dir.path().join("tasks.toml"),
        r#"
[[actions]]
name = "hello"
content = ["echo from-toml ${n}"]
default = [{ n = 7 }]
"#,
    )
    .expect("write config");

    monica(&dir)
        .env("MONICA_CONFIG", "tasks.toml")
        .arg("hello")
        .assert()
        .success()
        .stdout(predicate::str::contains("from-toml 7"));
}

#[test]
fn shell_features_work_in_templates() {
    let dir = project(
        r#"
actions:
  - name: pipe
    content:
      - "printf 'x\ny\n' | wc -l | tr -d ' ' > count.txt"
      - cat count.txt
"#,
    );

    monica(&dir).arg("pipe").assert().success();
    let count = fs::read_to_string(dir.path().join("count.txt")).expect("count file");
    assert_eq!(count.trim(), "2");
}

#[test]
fn version_and_help_are_available() {
    let dir = project(PIPELINE);
    monica(&dir)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    monica(&dir)
        .arg("-h")
        .assert()
        .success()
        .stdout(predicate::str::contains("build"))
        .stdout(predicate::str::contains("--debug"));
}
