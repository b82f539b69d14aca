use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_path(file_name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("meggy-{nanos}-{file_name}"))
}

fn run(data_path: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_meggy"))
        .args(args)
        .env("MEGGY_DATA_PATH", data_path)
        .env("MEGGY_CONFIG_PATH", data_path.with_extension("json"))
        .output()
        .expect("failed to run meggy")
}

#[test]
fn one_shot_add_writes_the_data_file() {
    let data_path = temp_path("one-shot-add.txt");
    let output = run(&data_path, &["deadline", "return", "book", "/by", "2/12/2019", "1800"]);
    let stored = std::fs::read_to_string(&data_path).unwrap();
    std::fs::remove_file(&data_path).ok();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("[D][ ] return book (by: 2019-12-02 18:00)"));
    assert_eq!(stored, "deadline return book /by 02122019 1800\n");
}

#[test]
fn one_shot_list_reads_previous_runs() {
    let data_path = temp_path("one-shot-list.txt");
    run(&data_path, &["todo", "read", "book"]);
    run(&data_path, &["event", "camp", "/from", "next", "week", "/to", "later"]);
    let output = run(&data_path, &["list"]);
    std::fs::remove_file(&data_path).ok();

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("1.[T][ ] read book"));
    assert!(stdout.contains("2.[E][ ] camp (from: [next week] to: [later])"));
}

#[test]
fn one_shot_errors_are_responses() {
    let data_path = temp_path("one-shot-error.txt");
    let output = run(&data_path, &["delete", "1"]);
    std::fs::remove_file(&data_path).ok();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("out of range"));
    assert!(stdout.contains("Usage: delete <task number>"));
}

#[test]
fn data_file_flag_wins_over_environment() {
    let env_path = temp_path("env-data.txt");
    let flag_path = temp_path("flag-data.txt");
    let flag = flag_path.to_string_lossy().to_string();
    let output = run(&env_path, &["--data-file", &flag, "todo", "water", "plants"]);
    let stored = std::fs::read_to_string(&flag_path).unwrap_or_default();
    std::fs::remove_file(&flag_path).ok();

    assert!(output.status.success());
    assert_eq!(stored, "todo water plants\n");
    assert!(!env_path.exists());
}

#[test]
fn malformed_lines_in_data_file_are_skipped() {
    let data_path = temp_path("malformed.txt");
    std::fs::write(&data_path, "todo read book\nsing a song\n").unwrap();
    let output = run(&data_path, &["list"]);
    std::fs::remove_file(&data_path).ok();

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("1.[T][ ] read book"));
    assert!(!stdout.contains("2."));
}
