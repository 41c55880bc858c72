use regex::Regex;
use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

struct TestContext {
    dir: TempDir,
}

impl TestContext {
    fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("Failed to create temp dir"),
        }
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }

    fn run(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_drillforge"))
            .arg("--data-dir")
            .arg(self.path())
            .args(args)
            .output()
            .expect("Failed to run drillforge")
    }

    fn stdout(&self, args: &[&str]) -> String {
        let output = self.run(args);
        assert!(
            output.status.success(),
            "drillforge {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8_lossy(&output.stdout).into_owned()
    }
}

// --- SEQUENCES ---

#[test]
fn test_sequences_add_then_list() {
    let ctx = TestContext::new();
    ctx.stdout(&["sequences", "add", "Ramp Rush", "wall", "RAMP", "floor"]);

    let listed = ctx.stdout(&["sequences", "list"]);
    assert!(listed.contains("Ramp Rush"));
    assert!(listed.contains("wall > ramp > floor"));

    let saved: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(ctx.path().join("sequences.json")).unwrap())
            .unwrap();
    assert_eq!(saved[0]["name"], "Ramp Rush");
    assert_eq!(saved[0]["steps"][1], "ramp");
}

#[test]
fn test_sequences_add_rejects_bad_input() {
    let ctx = TestContext::new();
    assert!(!ctx.run(&["sequences", "add", "Solo", "wall"]).status.success());
    assert!(!ctx.run(&["sequences", "add", "Odd", "wall", "jump"]).status.success());

    ctx.stdout(&["sequences", "add", "Box", "wall", "floor"]);
    assert!(!ctx.run(&["sequences", "add", "BOX", "cone", "edit"]).status.success());
    assert!(ctx.stdout(&["sequences", "list"]).contains("wall > floor"));
}

#[test]
fn test_sequences_remove() {
    let ctx = TestContext::new();
    ctx.stdout(&["sequences", "add", "Box", "wall", "floor"]);
    ctx.stdout(&["sequences", "remove", "box"]);

    assert!(ctx
        .stdout(&["sequences", "list"])
        .contains("You have no recorded sequences."));
    assert!(!ctx.run(&["sequences", "remove", "box"]).status.success());
}

// --- STATS ---

#[test]
fn test_stats_report_and_clear() {
    let ctx = TestContext::new();
    ctx.stdout(&["sequences", "add", "Tunnel", "wall", "floor"]);
    fs::write(
        ctx.path().join("playStats.json"),
        r#"{"Tunnel":{"totalAttempts":3,"totalTime":1500,"totalAccuracy":250,"perfectAttempts":2,"bestTime":300,"totalPerfectTime":800}}"#,
    )
    .unwrap();

    let report = ctx.stdout(&["stats", "tunnel"]);
    let attempts_row = Regex::new(r"Tunnel\s+\|\s+3\s+\|").unwrap();
    assert!(attempts_row.is_match(&report), "unexpected report:\n{}", report);
    assert!(report.contains("83%"));
    assert!(report.contains("0.30s"));
    assert!(report.contains("0.40s"));

    ctx.stdout(&["clear-stats", "TUNNEL"]);
    assert!(ctx.stdout(&["stats"]).contains("No attempts recorded yet."));
}

#[test]
fn test_stats_on_empty_store() {
    let ctx = TestContext::new();
    assert!(ctx.stdout(&["stats"]).contains("No attempts recorded yet."));
}

// --- KEYBINDS ---

#[test]
fn test_keybinds_set_ignore_and_clear() {
    let ctx = TestContext::new();
    ctx.stdout(&["keybinds", "set", "wall", "q"]);
    ctx.stdout(&["keybinds", "set", "playLoop", "Mouse3"]);
    ctx.stdout(&["keybinds", "ignore", "w, Tab"]);

    let raw: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(ctx.path().join("keybinds.json")).unwrap())
            .unwrap();
    assert_eq!(raw["wall"], "Q");
    assert_eq!(raw["playLoop"], "Mouse3");
    assert_eq!(raw["ignoredKeys"], "Tab,W");

    let shown = ctx.stdout(&["keybinds", "show"]);
    assert!(shown.contains("Mouse3"));

    ctx.stdout(&["keybinds", "clear"]);
    let raw: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(ctx.path().join("keybinds.json")).unwrap())
            .unwrap();
    assert_eq!(raw["wall"], "");
}

#[test]
fn test_keybinds_set_space() {
    let ctx = TestContext::new();
    ctx.stdout(&["keybinds", "set", "wall", " "]);

    let raw: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(ctx.path().join("keybinds.json")).unwrap())
            .unwrap();
    assert_eq!(raw["wall"], " ");
}

#[test]
fn test_unknown_role_is_rejected() {
    let ctx = TestContext::new();
    assert!(!ctx.run(&["keybinds", "set", "jump", "q"]).status.success());
}

// --- PLAY ---

#[test]
fn test_play_unknown_sequence_fails_before_touching_terminal() {
    let ctx = TestContext::new();
    let output = ctx.run(&["play", "Nope"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Unknown sequence 'Nope'"));
}
