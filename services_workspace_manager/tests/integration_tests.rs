//! End-to-end tests: raw bytes through the decoder into the session

use hal::KeyDecoder;
use services_logger::LogLevel;
use services_storage::MAX_FILES;
use services_workspace_manager::{SessionManager, TerminalConfig, TerminalMode};

const CTRL_RIGHT: &[u8] = b"\x1b[1;5C";
const CTRL_LEFT: &[u8] = b"\x1b[1;5D";
const CTRL_N: &[u8] = b"\x0e";
const CTRL_S: &[u8] = b"\x13";
const CTRL_X: &[u8] = b"\x18";
const CTRL_Q: &[u8] = b"\x11";

struct Harness {
    session: SessionManager,
    decoder: KeyDecoder,
}

impl Harness {
    fn new() -> Self {
        Self::with_config(TerminalConfig::default())
    }

    fn with_config(config: TerminalConfig) -> Self {
        let mut session = SessionManager::new(config).unwrap();
        session.boot();
        session.take_output();
        Self {
            session,
            decoder: KeyDecoder::new(),
        }
    }

    fn feed(&mut self, bytes: &[u8]) {
        for event in self.decoder.decode_all(bytes) {
            self.session.dispatch(&event);
        }
    }

    fn line(&mut self, text: &str) -> String {
        self.feed(text.as_bytes());
        self.feed(b"\r");
        self.output()
    }

    fn output(&mut self) -> String {
        self.raw_output().into_iter().map(|b| b as char).collect()
    }

    fn raw_output(&mut self) -> Vec<u8> {
        self.session.take_output()
    }
}

#[test]
fn test_help_lists_commands() {
    let mut h = Harness::new();
    let out = h.line("help");
    assert!(out.starts_with("help\nAvailable commands:\n  help    - Show this help\n"));
    assert!(out.contains("  cat     - Display file (usage: cat <name>)\n"));
    assert!(out.ends_with("[Desktop 1]$ "));
}

#[test]
fn test_clear_emits_clear_sequence_then_prompt() {
    let mut h = Harness::new();
    assert_eq!(h.line("clear"), "clear\n\x1b[2J\x1b[H[Desktop 1]$ ");
}

#[test]
fn test_info_reports_index_and_count() {
    let mut h = Harness::new();
    assert_eq!(
        h.line("info"),
        "info\nDesktop: Desktop 1\nIndex: 1 of 1\n[Desktop 1]$ "
    );

    h.feed(CTRL_RIGHT);
    h.output();
    assert_eq!(
        h.line("info"),
        "info\nDesktop: Desktop 2\nIndex: 2 of 2\n[Desktop 2]$ "
    );
}

#[test]
fn test_touch_ls_rm_cat_cycle() {
    let mut h = Harness::new();
    assert_eq!(h.line("ls"), "ls\nNo files.\n[Desktop 1]$ ");
    assert_eq!(h.line("touch foo"), "touch foo\nFile created: foo\n[Desktop 1]$ ");
    assert_eq!(h.line("ls"), "ls\nFiles:\n  foo\n[Desktop 1]$ ");
    assert_eq!(h.line("rm foo"), "rm foo\nFile deleted: foo\n[Desktop 1]$ ");
    assert_eq!(h.line("ls"), "ls\nNo files.\n[Desktop 1]$ ");
    assert_eq!(
        h.line("cat foo"),
        "cat foo\nFile not found: foo\n[Desktop 1]$ "
    );
}

#[test]
fn test_touch_duplicate_reports_error() {
    let mut h = Harness::new();
    h.line("touch a");
    assert_eq!(
        h.line("touch a"),
        "touch a\nError: Could not create file\n[Desktop 1]$ "
    );
    assert_eq!(h.session.files().len(), 1);
}

#[test]
fn test_rm_missing_file() {
    let mut h = Harness::new();
    assert_eq!(h.line("rm nope"), "rm nope\nError: File not found\n[Desktop 1]$ ");
}

#[test]
fn test_usage_messages() {
    let mut h = Harness::new();
    assert_eq!(h.line("touch "), "touch \nUsage: touch <filename>\n[Desktop 1]$ ");
    assert_eq!(h.line("rm "), "rm \nUsage: rm <filename>\n[Desktop 1]$ ");
    assert_eq!(h.line("cat "), "cat \nUsage: cat <filename>\n[Desktop 1]$ ");
    assert_eq!(h.session.mode(), TerminalMode::Normal);
}

#[test]
fn test_edit_usage_keeps_line_and_skips_prompt() {
    let mut h = Harness::new();
    assert_eq!(h.line("edit "), "edit \nUsage: edit <filename>\n");
    assert_eq!(h.session.mode(), TerminalMode::Normal);
    assert_eq!(h.session.active_desktop().unwrap().input().as_bytes(), b"edit ");

    // the kept line completes into a real edit command
    h.feed(b"notes\r");
    assert_eq!(h.session.mode(), TerminalMode::Editor);
    assert_eq!(h.session.editor().filename().as_bytes(), b"notes");
}

#[test]
fn test_edit_keeps_line_until_editor_closes() {
    let mut h = Harness::new();
    h.feed(b"edit f\r");
    assert_eq!(h.session.active_desktop().unwrap().input().as_bytes(), b"edit f");
    assert!(!h.output().ends_with("[Desktop 1]$ "));

    h.feed(CTRL_Q);
    assert!(h.session.active_desktop().unwrap().input().is_empty());
    assert_eq!(h.output(), "\nEditor closed.\n[Desktop 1]$ ");
}

#[test]
fn test_high_bytes_printed_unchanged() {
    let mut h = Harness::new();
    h.feed(b"x\xE9\r");
    assert_eq!(
        h.raw_output(),
        b"x\xE9\nUnknown command: x\xE9\n[Desktop 1]$ ".to_vec()
    );

    h.feed(b"touch \xE9\r");
    assert_eq!(
        h.raw_output(),
        b"touch \xE9\nFile created: \xE9\n[Desktop 1]$ ".to_vec()
    );

    h.feed(b"ls\r");
    assert_eq!(h.raw_output(), b"ls\nFiles:\n  \xE9\n[Desktop 1]$ ".to_vec());

    h.feed(b"cat \xE9x\r");
    assert_eq!(
        h.raw_output(),
        b"cat \xE9x\nFile not found: \xE9x\n[Desktop 1]$ ".to_vec()
    );

    h.feed(b"edit \xE9\rhi");
    h.raw_output();
    h.feed(CTRL_S);
    assert_eq!(h.raw_output(), b"\nFile saved: \xE9\n".to_vec());
    h.feed(CTRL_Q);
    h.raw_output();

    h.feed(b"rm \xE9\r");
    assert_eq!(
        h.raw_output(),
        b"rm \xE9\nFile deleted: \xE9\n[Desktop 1]$ ".to_vec()
    );
}

#[test]
fn test_info_prints_raw_desktop_name() {
    let mut h = Harness::new();
    h.feed(CTRL_N);
    h.feed(b"d\xE9v\r");
    h.raw_output();
    h.feed(b"info\r");
    assert_eq!(
        h.raw_output(),
        b"info\nDesktop: d\xE9v\nIndex: 1 of 1\n[d\xE9v]$ ".to_vec()
    );
}

#[test]
fn test_table_full_then_freed() {
    let mut h = Harness::new();
    for i in 0..MAX_FILES {
        h.line(&format!("touch f{}", i));
    }
    assert!(h.line("touch extra").contains("Error: Could not create file\n"));
    h.line("rm f3");
    assert!(h.line("touch extra").contains("File created: extra\n"));
}

#[test]
fn test_edit_save_then_cat() {
    let mut h = Harness::new();
    h.feed(b"edit foo\r");
    assert_eq!(h.session.mode(), TerminalMode::Editor);
    let rendered = h.output();
    assert!(rendered.contains("=== Editor: foo ==="));
    assert!(!rendered.ends_with("[Desktop 1]$ "));

    h.feed(b"hi");
    h.feed(CTRL_S);
    assert_eq!(h.output(), "hi\nFile saved: foo\n");
    assert_eq!(h.session.mode(), TerminalMode::Editor);
    assert!(!h.session.editor().is_modified());

    h.feed(CTRL_Q);
    assert_eq!(h.output(), "\nEditor closed.\n[Desktop 1]$ ");
    assert_eq!(h.session.mode(), TerminalMode::Normal);

    assert_eq!(h.line("cat foo"), "cat foo\nhi\n[Desktop 1]$ ");
}

#[test]
fn test_edit_existing_file_loads_content() {
    let mut h = Harness::new();
    h.feed(b"edit notes\rabc");
    h.feed(CTRL_X);
    assert_eq!(h.session.mode(), TerminalMode::Normal);
    h.output();

    h.feed(b"edit notes\r");
    assert_eq!(h.session.editor().content(), b"abc");
    assert!(h.output().contains("---\nabc\n---\n"));
}

#[test]
fn test_edit_new_file_starts_empty() {
    let mut h = Harness::new();
    h.feed(b"edit a\rold");
    h.feed(CTRL_Q);
    h.feed(b"edit b\r");
    assert!(h.session.editor().content().is_empty());
    assert!(h.session.files().find(b"a").is_none());
}

#[test]
fn test_save_and_quit_creates_file_and_prompts() {
    let mut h = Harness::new();
    h.feed(b"edit new\rx\ry");
    h.output();
    h.feed(CTRL_X);
    assert_eq!(h.output(), "\nFile saved: new\n[Desktop 1]$ ");
    let slot = h.session.files().find(b"new").unwrap();
    assert_eq!(h.session.files().read(slot, 64), b"x\ny".to_vec());
}

#[test]
fn test_save_fails_when_table_full() {
    let mut h = Harness::new();
    for i in 0..MAX_FILES {
        h.line(&format!("touch f{}", i));
    }
    h.feed(b"edit extra\rdata");
    h.output();
    h.feed(CTRL_X);
    assert_eq!(h.output(), "\nError creating file\n");
    assert_eq!(h.session.mode(), TerminalMode::Editor);
    assert!(h.session.editor().is_modified());

    let last = h.session.logger().last().unwrap();
    assert_eq!(last.level, LogLevel::Error);
    assert_eq!(last.field("file"), Some("extra"));
}

#[test]
fn test_editor_input_line_does_not_leak() {
    let mut h = Harness::new();
    h.feed(b"edit f\r");
    h.feed(CTRL_Q);
    h.output();
    assert_eq!(h.line("ls"), "ls\nNo files.\n[Desktop 1]$ ");
}

#[test]
fn test_wayland_commands() {
    let mut h = Harness::new();
    assert!(h.line("wayland").contains("Wayland Compositor Status: Stopped\n"));
    assert!(h.line("wayland start").contains("Wayland compositor started.\n"));
    assert!(h.line("wayland start").contains("is already running.\n"));
    assert!(h.line("wayland status").contains("Status: Running\n"));
    assert!(h.line("wayland stop").contains("Wayland compositor stopped.\n"));
    assert!(h.line("wayland stop").contains("is not running.\n"));
    assert!(h.line("wayland foo").contains("Usage: wayland [start|stop|status]\n"));
    assert!(!h.session.compositor().is_running());
}

#[test]
fn test_input_line_caps_at_32_bytes() {
    let mut h = Harness::new();
    let long = "x".repeat(40);
    h.feed(long.as_bytes());
    assert_eq!(h.session.active_desktop().unwrap().input().len(), 32);
    let out = h.line("");
    assert!(out.contains(&format!("Unknown command: {}\n", "x".repeat(32))));
}

#[test]
fn test_backspace_edits_command() {
    let mut h = Harness::new();
    h.feed(b"lsx\x7f");
    let out = h.line("");
    assert_eq!(out, "lsx\x08 \x08\nNo files.\n[Desktop 1]$ ");
}

#[test]
fn test_ctrl_n_and_rename_through_bytes() {
    let mut h = Harness::new();
    h.feed(CTRL_N);
    assert_eq!(h.session.mode(), TerminalMode::NamingDesktop);
    h.feed(b"work\r");
    assert_eq!(
        h.output(),
        "\n[Enter new name for desktop]: work\n[Desktop renamed to: work]\n[work]$ "
    );
    assert_eq!(h.session.mode(), TerminalMode::Normal);
}

#[test]
fn test_larger_capacity_from_config() {
    let mut h = Harness::with_config(TerminalConfig::default().with_desktop_capacity(3));
    h.feed(CTRL_RIGHT);
    h.feed(CTRL_RIGHT);
    assert_eq!(h.session.active_index(), 2);
    h.feed(CTRL_RIGHT);
    assert_eq!(h.session.active_index(), 2);
    h.feed(CTRL_LEFT);
    assert_eq!(h.session.active_index(), 1);
}
