use std::{fs, process::Command};

fn hype_type() -> Command {
    Command::new(env!("CARGO_BIN_EXE_hype-type"))
}

#[test]
fn short_run_prints_a_summary() {
    let output = hype_type()
        .args(["--seconds", "5", "--seed", "7"])
        .output()
        .expect("failed to launch hype-type");

    assert!(output.status.success(), "hype-type should exit cleanly");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("wave"), "summary missing: {stdout}");
    assert!(stdout.contains("outcome"), "summary missing: {stdout}");
}

#[test]
fn unknown_language_is_a_blocking_error() {
    let output = hype_type()
        .args(["--seconds", "1", "--language", "klingon"])
        .output()
        .expect("failed to launch hype-type");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("klingon"), "unexpected error: {stderr}");
}

#[test]
fn free_upgrades_are_bought_immediately() {
    let path = std::env::temp_dir().join(format!("hype-type-shop-{}.json", std::process::id()));
    fs::write(
        &path,
        r#"{"trees": [{"nodes": [{"id": "sharp", "name": "Sharp", "cost": 0}]}]}"#,
    )
    .expect("write catalog");

    let output = hype_type()
        .args(["--seconds", "1", "--upgrades"])
        .arg(&path)
        .output()
        .expect("failed to launch hype-type");
    let _ = fs::remove_file(&path);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("upgrades  sharp"), "summary: {stdout}");
}
