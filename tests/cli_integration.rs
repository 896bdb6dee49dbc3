use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn covenant(project: &Path) -> Command {
    let mut cmd = Command::cargo_bin("covenant").unwrap();
    cmd.current_dir(project)
        .env("COVENANT_DATA_DIR", project.join("data"))
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG");
    cmd
}

const FIELDS: [&str; 10] = [
    "--party1",
    "Acme Corp",
    "--party2",
    "Beta LLC",
    "--start-date",
    "2024-01-01",
    "--end-date",
    "2024-12-31",
    "--governing-law",
    "California",
];

fn files_in(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn test_templates_lists_all_three() {
    let temp = TempDir::new().unwrap();
    covenant(temp.path())
        .arg("templates")
        .assert()
        .success()
        .stdout(predicate::str::contains("Service"))
        .stdout(predicate::str::contains("Partnership"))
        .stdout(predicate::str::contains("NDA"));
}

#[test]
fn test_preview_prints_filled_agreement() {
    let temp = TempDir::new().unwrap();
    covenant(temp.path())
        .arg("preview")
        .arg("NDA")
        .args(FIELDS)
        .assert()
        .success()
        .stdout(predicate::str::contains("between Acme Corp"))
        .stdout(predicate::str::contains("governed by the laws of California."))
        .stdout(predicate::str::contains("{").not());
}

#[test]
fn test_generate_writes_requested_formats() {
    let temp = TempDir::new().unwrap();
    covenant(temp.path())
        .arg("generate")
        .arg("Service")
        .args(FIELDS)
        .args(["--txt", "--pdf"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Generated Service agreement"));

    let out = temp.path().join("output");
    let names = files_in(&out);
    assert_eq!(names.len(), 2);
    assert!(names.iter().any(|n| n.starts_with("service_") && n.ends_with(".pdf")));
    let txt = names.iter().find(|n| n.ends_with(".txt")).unwrap();
    let text = fs::read_to_string(out.join(txt)).unwrap();
    assert!(text.contains("Acme Corp"));
    assert!(text.ends_with('\n'));

    let pdf = names.iter().find(|n| n.ends_with(".pdf")).unwrap();
    let bytes = fs::read(out.join(pdf)).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}

#[test]
fn test_generate_uses_default_formats() {
    let temp = TempDir::new().unwrap();
    covenant(temp.path())
        .arg("generate")
        .arg("Partnership")
        .args(FIELDS)
        .assert()
        .success();

    let names = files_in(&temp.path().join("output"));
    assert_eq!(names.len(), 2);
    assert!(names.iter().any(|n| n.ends_with(".docx")));
    assert!(names.iter().any(|n| n.ends_with(".pdf")));
}

#[test]
fn test_generate_without_governing_law_fails() {
    let temp = TempDir::new().unwrap();
    covenant(temp.path())
        .arg("generate")
        .arg("NDA")
        .args(&FIELDS[..8])
        .arg("--txt")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Missing required fields: governing_law"));

    assert!(!temp.path().join("output").exists());
}

#[test]
fn test_history_lists_generated_documents() {
    let temp = TempDir::new().unwrap();
    covenant(temp.path())
        .arg("history")
        .assert()
        .success()
        .stdout(predicate::str::contains("No documents generated yet."));

    covenant(temp.path())
        .args(["generate", "NDA"])
        .args(FIELDS)
        .arg("--txt")
        .assert()
        .success();

    covenant(temp.path())
        .arg("history")
        .assert()
        .success()
        .stdout(predicate::str::contains("NDA"))
        .stdout(predicate::str::contains(".txt"));

    covenant(temp.path())
        .args(["history", "--clear"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cleared 1 history entry."));

    covenant(temp.path())
        .arg("history")
        .assert()
        .success()
        .stdout(predicate::str::contains("No documents generated yet."));
}

#[test]
fn test_init_copies_templates_and_uses_them() {
    let temp = TempDir::new().unwrap();
    covenant(temp.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote 3 template(s)"));

    assert!(temp.path().join(".covenant/config.json").exists());
    let service = temp.path().join("templates/service.txt");
    assert!(service.exists());

    fs::write(&service, "Hello {party1}, under {governing_law} law.\n").unwrap();
    covenant(temp.path())
        .args(["preview", "Service"])
        .args(FIELDS)
        .assert()
        .success()
        .stdout(predicate::eq("Hello Acme Corp, under California law.\n"));
}

#[test]
fn test_config_set_and_get() {
    let temp = TempDir::new().unwrap();
    covenant(temp.path())
        .args(["config", "formats", "txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("formats set to txt"));

    covenant(temp.path())
        .args(["config", "formats"])
        .assert()
        .success()
        .stdout(predicate::str::contains("txt"));

    covenant(temp.path())
        .args(["config", "history-limit", "zero"])
        .assert()
        .failure();
}

#[test]
fn test_corrupt_history_does_not_block_commands() {
    let temp = TempDir::new().unwrap();
    let data = temp.path().join("data");
    fs::create_dir_all(&data).unwrap();
    fs::write(data.join("history.json"), "{not json").unwrap();

    covenant(temp.path())
        .args(["preview", "NDA"])
        .args(FIELDS)
        .assert()
        .success()
        .stdout(predicate::str::contains("between Acme Corp"));

    covenant(temp.path())
        .args(["generate", "NDA"])
        .args(FIELDS)
        .arg("--txt")
        .assert()
        .success();

    covenant(temp.path())
        .arg("history")
        .assert()
        .success()
        .stdout(predicate::str::contains("NDA"));
}

#[test]
fn test_history_save_failure_keeps_generated_files() {
    let temp = TempDir::new().unwrap();
    let blocker = temp.path().join("blocker");
    fs::write(&blocker, "not a directory").unwrap();

    let mut cmd = Command::cargo_bin("covenant").unwrap();
    cmd.current_dir(temp.path())
        .env("COVENANT_DATA_DIR", blocker.join("data"))
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .args(["generate", "NDA"])
        .args(FIELDS)
        .arg("--txt")
        .assert()
        .success()
        .stdout(predicate::str::contains("Generated NDA agreement"))
        .stdout(predicate::str::contains("output/nda_"))
        .stdout(predicate::str::contains("Could not save history"));

    let names = files_in(&temp.path().join("output"));
    assert_eq!(names.len(), 1);
    assert!(names[0].starts_with("nda_") && names[0].ends_with(".txt"));
}
