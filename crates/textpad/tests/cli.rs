use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

fn textpad(config_dir: &Path, args: &[&Path], script: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_textpad"))
        .args(args)
        .env("TEXTPAD_CONFIG", config_dir.join("textpad.json"))
        .env("RUST_LOG", "off")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(script.as_bytes())
        .unwrap();
    child.wait_with_output().unwrap()
}

#[test]
fn test_missing_argument_fails() {
    let dir = tempfile::tempdir().unwrap();
    let output = textpad(dir.path(), &[], "");
    assert!(!output.status.success());
}

#[test]
fn test_directory_argument_fails() {
    let dir = tempfile::tempdir().unwrap();
    let output = textpad(dir.path(), &[dir.path()], "");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("is a directory"));
}

#[test]
fn test_new_file_created_on_save() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("notes.txt");
    let output = textpad(
        dir.path(),
        &[file.as_path()],
        "type hello\nnewline\ntype world\nsave\nquit\n",
    );
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "saved\n");
    assert_eq!(std::fs::read_to_string(&file).unwrap(), "hello\nworld");
    assert!(dir.path().join("textpad.json").exists());
}

#[test]
fn test_edit_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("notes.txt");
    std::fs::write(&file, "ab\ncd").unwrap();
    let output = textpad(dir.path(), &[file.as_path()], "down\nbackspace\nprint\nundo\nprint\n");
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "abcd\nab\ncd\n");
    // nothing saved
    assert_eq!(std::fs::read_to_string(&file).unwrap(), "ab\ncd");
}
