// End-to-end tests for the wizard launcher binaries.
// Wizards are stand-in shell scripts so no display is needed.

use std::{fs, process::Command};

#[test]
fn test_missing_wizard_module() {
    let dir = tempfile::tempdir().expect("tempdir");

    let output = Command::new(env!("CARGO_BIN_EXE_wizard-visual-test"))
        .current_dir(dir.path())
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute wizard-visual-test");
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout.contains("Check the following:"));
    assert!(!stdout.contains("Application started"));
    assert!(stderr.contains("Traceback:"));
    assert!(stderr.contains("no module named 'nextcloud_restore_and_backup_v9'"));
    // Only the traceback report reaches stderr under the default log filter
    assert_eq!(stderr.matches("Wizard failed").count(), 1, "stderr:\n{stderr}");
    assert!(!stderr.contains("Wizard launch failed"), "stderr:\n{stderr}");
}

#[cfg(unix)]
#[test]
fn test_wizard_runs_until_closed() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(dir.path().join("fake_wizard.sh"), "echo wizard window closed\n").expect("write");

    let output = Command::new(env!("CARGO_BIN_EXE_wizcheck"))
        .args(["launch", "--module", "fake_wizard", "--search-path"])
        .arg(dir.path())
        .current_dir(dir.path())
        .env("RUST_LOG", "off")
        .output()
        .expect("Failed to execute wizcheck");
    let stdout = String::from_utf8_lossy(&output.stdout);

    // Default interpreter is python3 and extension .py, so the .sh file is not found
    assert_eq!(output.status.code(), Some(1), "stdout:\n{stdout}");

    fs::write(
        dir.path().join("wizcheck.toml"),
        "[launch]\nmodule = \"fake_wizard\"\ninterpreter = \"sh\"\nextensions = [\"sh\"]\n",
    )
    .expect("write config");

    let output = Command::new(env!("CARGO_BIN_EXE_wizard-visual-test"))
        .current_dir(dir.path())
        .output()
        .expect("Failed to execute wizard-visual-test");
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert_eq!(output.status.code(), Some(0), "stdout:\n{stdout}");
    assert!(stdout.contains("900x900"));
    assert!(stdout.contains("Application started"));
    assert!(stdout.contains("wizard window closed"));
    assert!(stdout.contains("Wizard closed"));
}

#[cfg(unix)]
#[test]
fn test_wizard_crash_reports_failure() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(dir.path().join("crashing_wizard.sh"), "exit 2\n").expect("write");
    fs::write(
        dir.path().join("wizcheck.toml"),
        "[launch]\nmodule = \"crashing_wizard\"\ninterpreter = \"sh\"\nextensions = [\"sh\"]\n",
    )
    .expect("write config");

    let output = Command::new(env!("CARGO_BIN_EXE_wizard-visual-test"))
        .current_dir(dir.path())
        .output()
        .expect("Failed to execute wizard-visual-test");
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr.contains("Wizard failed"));
    assert!(stderr.contains("exited with"));
}
