use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Runs the binary with all user directories pointing into `home`.
fn stoppuhr(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("stoppuhr").unwrap();
    cmd.env("HOME", home.path())
        .env("XDG_CACHE_HOME", home.path().join("cache"))
        .env("XDG_CONFIG_HOME", home.path().join("config"))
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn start_show_stop() {
    let home = tempfile::tempdir().unwrap();
    stoppuhr(&home).args(["start", "work"]).assert().success();
    assert!(home.path().join("cache/stoppuhr/work.json").is_file());
    assert!(home.path().join("config/stoppuhr").is_dir());

    stoppuhr(&home)
        .args(["show", "work"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"^[0-9hms ]+\n$").unwrap());
    stoppuhr(&home)
        .args(["show", "work", "--full"])
        .assert()
        .success()
        .stdout(predicate::str::contains(" -- -) -> "));

    stoppuhr(&home)
        .args(["stop", "work"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
    stoppuhr(&home)
        .args(["stop", "work"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Couldn't stop timer 'work': Timer is not running"));
}

#[test]
fn start_twice_fails() {
    let home = tempfile::tempdir().unwrap();
    stoppuhr(&home).arg("start").assert().success();
    assert!(home.path().join("cache/stoppuhr/default.json").is_file());
    stoppuhr(&home)
        .arg("start")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Timer is already running"));
}

#[test]
fn toggle_prints_on_stop_only() {
    let home = tempfile::tempdir().unwrap();
    stoppuhr(&home)
        .args(["toggle", "tea"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
    stoppuhr(&home)
        .args(["toggle", "tea"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

#[test]
fn show_missing_timer_fails() {
    let home = tempfile::tempdir().unwrap();
    stoppuhr(&home)
        .args(["show", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Couldn't show timer 'nope'"))
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn list_and_clear_with_storage_override() {
    let home = tempfile::tempdir().unwrap();
    let storage = home.path().join("elsewhere");
    let storage = storage.to_str().unwrap();

    stoppuhr(&home)
        .args(["--storage", storage, "list"])
        .assert()
        .success()
        .stderr(predicate::str::contains("No timers found"));

    for name in ["a", "bb"] {
        stoppuhr(&home)
            .args(["--storage", storage, "reset", name])
            .assert()
            .success();
    }
    stoppuhr(&home)
        .args(["--storage", storage, "list"])
        .assert()
        .success()
        .stdout(" a: 0s\nbb: 0s\n");

    stoppuhr(&home)
        .args(["--storage", storage, "clear", "a"])
        .assert()
        .success();
    stoppuhr(&home)
        .args(["--storage", storage, "clear", "a"])
        .assert()
        .failure();
    stoppuhr(&home)
        .args(["--storage", storage, "clear", "--all"])
        .assert()
        .success();
    stoppuhr(&home)
        .args(["--storage", storage, "list"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn clear_all_ignores_name() {
    let home = tempfile::tempdir().unwrap();
    for name in ["a", "b"] {
        stoppuhr(&home).args(["reset", name]).assert().success();
    }
    stoppuhr(&home)
        .args(["clear", "a", "--all"])
        .assert()
        .success();
    assert!(!home.path().join("cache/stoppuhr/a.json").exists());
    assert!(!home.path().join("cache/stoppuhr/b.json").exists());
}

#[test]
fn version() {
    let home = tempfile::tempdir().unwrap();
    stoppuhr(&home)
        .arg("version")
        .assert()
        .success()
        .stdout(format!("{}\n", env!("CARGO_PKG_VERSION")));
    stoppuhr(&home)
        .args(["version", "--full"])
        .assert()
        .success()
        .stdout(format!("stoppuhr {}\n", env!("CARGO_PKG_VERSION")));
}
