// cli_flow.rs — End-to-end test of the `quest` binary.
//
// Flow:
//   1. quest add checklist / eternal → save file created under the project
//   2. quest record 1 twice, quest record 9 → progress saved, bad index ignored
//   3. quest list / quest score → rendered output matches saved state
//   4. a corrupt save file → non-zero exit, file left as-is

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

fn quest(project: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_quest"))
        .arg("--project-root")
        .arg(project)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

#[test]
fn add_record_list_and_score() {
    let project = TempDir::new().unwrap();

    // =========================================================
    // 1. Add goals
    // =========================================================
    let out = quest(
        project.path(),
        &["add", "checklist", "Temple", "Attend the temple", "50", "3", "500"],
    );
    assert!(out.status.success(), "{:?}", out);
    assert!(stdout(&out).contains("ChecklistGoal added!"));

    let out = quest(project.path(), &["add", "eternal", "Read", "Read daily", "100"]);
    assert!(out.status.success(), "{:?}", out);

    let save_file = project.path().join("goals.txt");
    assert!(save_file.exists());

    // =========================================================
    // 2. Record events
    // =========================================================
    let out = quest(project.path(), &["record", "1"]);
    assert!(stdout(&out).contains("You earned 50 points."));
    quest(project.path(), &["record", "1"]);

    let out = quest(project.path(), &["record", "9"]);
    assert!(out.status.success());
    assert!(stdout(&out).contains("No goal number 9."));

    assert_eq!(
        fs::read_to_string(&save_file).unwrap(),
        "100\n\
         ChecklistGoal|Temple|Attend the temple|50|3|500|2\n\
         EternalGoal|Read|Read daily|100\n"
    );

    // =========================================================
    // 3. Render
    // =========================================================
    let out = quest(project.path(), &["list"]);
    let listing = stdout(&out);
    assert!(listing.contains("1. [ ] Temple: Attend the temple (Completed 2/3)"));
    assert!(listing.contains("2. [ ] Read: Read daily (eternal)"));

    let out = quest(project.path(), &["score"]);
    assert_eq!(stdout(&out).trim(), "Current Score: 100");

    let events = fs::read_to_string(project.path().join(".quest/events.jsonl")).unwrap();
    assert!(events.contains("\"event_type\":\"goal_added\""));
    assert!(events.contains("\"event_type\":\"event_recorded\""));

    // =========================================================
    // 4. Corrupt save file
    // =========================================================
    fs::write(&save_file, "not-a-number\n").unwrap();
    let out = quest(project.path(), &["record", "1"]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("failed to load goals"));
    assert_eq!(fs::read_to_string(&save_file).unwrap(), "not-a-number\n");
}

#[test]
fn file_flag_overrides_configured_save_file() {
    let project = TempDir::new().unwrap();
    let custom = project.path().join("elsewhere").join("mine.txt");

    let out = quest(
        project.path(),
        &[
            "--file",
            custom.to_str().unwrap(),
            "add",
            "simple",
            "Hike",
            "Climb the mountain",
            "200",
        ],
    );
    assert!(out.status.success(), "{:?}", out);
    assert!(custom.exists());
    assert!(!project.path().join("goals.txt").exists());
}
