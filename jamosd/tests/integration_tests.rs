//! Integration tests for the host runtime

use jamosd::{HostRuntime, HostRuntimeConfig, HostRuntimeError};
use services_logger::LogLevel;
use services_workspace_manager::{TerminalConfig, TerminalMode};
use std::fs;
use std::io::Write;
use std::process::Command;
use tempfile::NamedTempFile;

fn run_script(script: &str) -> (String, HostRuntime<hal::ScriptedSource, Vec<u8>>) {
    let mut runtime = HostRuntime::scripted(HostRuntimeConfig {
        script: Some(script.to_string()),
        ..Default::default()
    })
    .unwrap();
    runtime.run().unwrap();
    let text = runtime.sink().iter().map(|&b| b as char).collect();
    (text, runtime)
}

#[test]
fn test_full_file_session() {
    let (out, runtime) = run_script(
        r#"
        # create, list, edit and read back a file
        "touch foo"
        Enter
        "ls"
        Enter
        "edit foo"
        Enter
        "hi"
        Ctrl+s
        Ctrl+q
        "cat foo"
        Enter
        "rm foo"
        Enter
        "cat foo"
        Enter
        "#,
    );

    assert!(out.starts_with("Hello lovely Anna!\n"));
    assert!(out.contains("File created: foo\n"));
    assert!(out.contains("Files:\n  foo\n"));
    assert!(out.contains("=== Editor: foo ==="));
    assert!(out.contains("\nFile saved: foo\n"));
    assert!(out.contains("\nEditor closed.\n"));
    assert!(out.contains("cat foo\nhi\n"));
    assert!(out.contains("File deleted: foo\n"));
    assert!(out.ends_with("File not found: foo\n[Desktop 1]$ "));
    assert_eq!(runtime.session().mode(), TerminalMode::Normal);
}

#[test]
fn test_desktop_switching_session() {
    let (out, runtime) = run_script(
        r#"
        Ctrl+Right
        Ctrl+Right
        Ctrl+n
        "dev"
        Enter
        Ctrl+Left
        "info"
        Enter
        "#,
    );

    assert!(out.contains("\x1b[2J\x1b[H>>> Switched to Desktop 2 <<<\n\n[Desktop 2]$ "));
    assert!(out.contains("[Desktop renamed to: dev]\n[dev]$ "));
    assert!(out.ends_with("Desktop: Desktop 1\nIndex: 1 of 2\n[Desktop 1]$ "));
    assert_eq!(runtime.session().desktop_count(), 2);
    assert_eq!(
        runtime.session().desktops().get(1).unwrap().name().to_string(),
        "dev"
    );
}

#[test]
fn test_escape_cancels_naming() {
    let (out, runtime) = run_script("Ctrl+n\n\"x\"\nEscape");
    assert!(out.ends_with("\n[Cancelled]\n[Desktop 1]$ "));
    assert_eq!(runtime.session().mode(), TerminalMode::Normal);
}

#[test]
fn test_plain_arrows_do_nothing() {
    let (out, runtime) = run_script("Right\nLeft\nUp\nDown");
    assert!(out.ends_with("Ctrl+N: Name\n\n[Desktop 1]$ "));
    assert_eq!(runtime.session().active_index(), 0);
}

#[test]
fn test_log_records_session_events() {
    let (_, runtime) = run_script("\"touch a\"\nEnter\n\"nope\"\nEnter\nCtrl+Right");
    let logger = runtime.session().logger();

    let messages: Vec<&str> = logger.entries().map(|e| e.message.as_str()).collect();
    assert!(messages.contains(&"file created"));
    assert!(messages.contains(&"desktop created"));
    assert_eq!(logger.entries_at_least(LogLevel::Warn).count(), 1);
}

#[test]
fn test_config_file_controls_capacity_and_greeting() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{"desktop_capacity": 3, "greeting": ["jamos"], "first_desktop_name": "main"}}"#
    )
    .unwrap();

    let text = fs::read_to_string(file.path()).unwrap();
    let terminal = TerminalConfig::from_json(&text).unwrap();
    let mut runtime = HostRuntime::scripted(HostRuntimeConfig {
        terminal,
        script: Some("Ctrl+Right\nCtrl+Right\nCtrl+Right".to_string()),
        ..Default::default()
    })
    .unwrap();
    runtime.run().unwrap();

    let out: String = runtime.sink().iter().map(|&b| b as char).collect();
    assert!(out.starts_with("jamos\n[main]$ "));
    assert_eq!(runtime.session().active_index(), 2);
    assert_eq!(runtime.session().desktop_count(), 3);
}

#[test]
fn test_bad_script_file_is_reported() {
    let result = HostRuntime::scripted(HostRuntimeConfig {
        script: Some("\"ok\"\nNotAKey".to_string()),
        ..Default::default()
    });
    match result {
        Err(HostRuntimeError::Script(e)) => {
            assert_eq!(e.to_string(), "Parse error at line 2: Invalid key name: NotAKey")
        }
        other => panic!("unexpected result: {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_binary_replays_script() {
    let mut script = NamedTempFile::new().unwrap();
    writeln!(script, "\"touch notes\"\nEnter\n\"ls\"\nEnter").unwrap();

    let mut config = NamedTempFile::new().unwrap();
    write!(config, "{}", TerminalConfig::default().to_json().unwrap()).unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_jamosd"))
        .arg("--config")
        .arg(config.path())
        .arg("--script")
        .arg(script.path())
        .arg("--dump-log")
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("File created: notes\n"));
    assert!(stdout.ends_with("Files:\n  notes\n[Desktop 1]$ "));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("[vfs] file created name=notes"));
}

#[test]
fn test_binary_rejects_unknown_option() {
    let output = Command::new(env!("CARGO_BIN_EXE_jamosd"))
        .arg("--bogus")
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Unknown option: --bogus"));
}

#[test]
fn test_demo_scripts_run() {
    let (out, _) = run_script(include_str!("../../demos/files.jkeys"));
    assert!(out.contains("\nFile saved: notes\n"));
    assert!(out.contains("cat notes\nhello from jamos\n"));

    let (out, runtime) = run_script(include_str!("../../demos/desktops.jkeys"));
    assert!(out.contains("Desktop: work\nIndex: 2 of 2\n"));
    assert!(out.ends_with("Wayland Compositor Status: Running\n[Desktop 1]$ "));
    assert!(runtime.session().compositor().is_running());
}
