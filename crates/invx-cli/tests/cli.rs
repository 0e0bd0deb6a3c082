use assert_cmd::Command;
use predicates::prelude::*;

fn invx() -> Command {
    Command::cargo_bin("invx").unwrap()
}

#[test]
fn help_lists_commands() {
    invx()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("process"))
        .stdout(predicate::str::contains("batch"))
        .stdout(predicate::str::contains("compare"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn process_missing_input_fails() {
    invx()
        .args(["process", "does-not-exist.pdf"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn process_rejects_non_pdf() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.txt");
    std::fs::write(&path, "plain text").unwrap();

    invx()
        .args(["process", path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported file format"));
}

#[test]
fn process_garbage_pdf_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.pdf");
    std::fs::write(&path, "not a pdf at all").unwrap();

    invx()
        .args(["process", path.to_str().unwrap()])
        .assert()
        .failure();
}

#[test]
fn batch_rejects_unknown_output_extension() {
    let dir = tempfile::tempdir().unwrap();

    invx()
        .args([
            "batch",
            dir.path().to_str().unwrap(),
            "--output",
            "results.xml",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported output format"));
}

#[test]
fn compare_help_lists_glob_input_and_flags() {
    invx()
        .args(["compare", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("glob"))
        .stdout(predicate::str::contains("--ground-truth"))
        .stdout(predicate::str::contains("--output"));
}

#[test]
fn compare_empty_directory_fails() {
    let dir = tempfile::tempdir().unwrap();

    invx()
        .args(["compare", dir.path().to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No PDF files found"));
}

#[test]
fn batch_empty_directory_fails() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("results.json");

    invx()
        .args([
            "batch",
            dir.path().to_str().unwrap(),
            "--output",
            out.to_str().unwrap(),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No PDF files found"));
}
