// CLI behaviour of the docsign binary against a throwaway workspace

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn docsign(workspace: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("docsign").unwrap();
    cmd.current_dir(workspace.path())
        .env("DOCSIGN_STORAGE__ROOT", workspace.path().join("blobs"))
        .env("DOCSIGN_STORE__PATH", workspace.path().join("documents.json"))
        .env("DOCSIGN_OBSERVABILITY__JSON_LOGS", "false")
        .env_remove("RUST_LOG");
    cmd
}

fn upload(workspace: &TempDir, name: &str, contents: &[u8], owner: &str) -> serde_json::Value {
    let path = workspace.path().join(name);
    std::fs::write(&path, contents).unwrap();

    let output = docsign(workspace)
        .args(["upload", path.to_str().unwrap(), "--owner", owner])
        .output()
        .unwrap();
    assert!(output.status.success(), "upload failed: {output:?}");
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn test_help_lists_commands() {
    let workspace = TempDir::new().unwrap();
    docsign(&workspace)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("upload"))
        .stdout(predicate::str::contains("invite"))
        .stdout(predicate::str::contains("status"));
}

#[test]
fn test_upload_then_show_and_list() {
    let workspace = TempDir::new().unwrap();
    let doc = upload(&workspace, "agreement.pdf", b"%PDF-1.7 agreement", "0xalice");

    assert_eq!(doc["status"], "Pending");
    assert_eq!(doc["extension"], ".pdf");
    let id = doc["id"].as_str().unwrap().to_string();
    let hash = doc["hash"].as_str().unwrap();
    assert!(workspace.path().join("blobs").join(format!("{hash}.pdf")).exists());

    docsign(&workspace)
        .args(["show", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("agreement.pdf"))
        .stdout(predicate::str::contains("createdAt").not());

    docsign(&workspace)
        .args(["list", "--owner", "0xalice"])
        .assert()
        .success()
        .stdout(predicate::str::contains(id.as_str()));
}

#[test]
fn test_upload_keeps_non_ascii_filename() {
    let workspace = TempDir::new().unwrap();
    let doc = upload(&workspace, "résumé.pdf", b"curriculum", "0xalice");

    assert_eq!(doc["name"], "résumé.pdf");
    assert_eq!(doc["extension"], ".pdf");
}

#[test]
fn test_invite_and_status_update() {
    let workspace = TempDir::new().unwrap();
    let doc = upload(&workspace, "lease.docx", b"lease terms", "0xalice");
    let id = doc["id"].as_str().unwrap().to_string();

    docsign(&workspace)
        .args(["invite", &id, "a@x.com", "b@x.com"])
        .assert()
        .success()
        .stdout(predicate::str::contains("a@x.com"))
        .stdout(predicate::str::contains("\"notified\": true"));

    docsign(&workspace)
        .args(["status", &id, "fully-signed"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"FullySigned\""));

    // Unguarded by default: a signed document can move back
    docsign(&workspace)
        .args(["status", &id, "pending"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"Pending\""));
}

#[test]
fn test_enforced_transitions_reject_backwards_move() {
    let workspace = TempDir::new().unwrap();
    let doc = upload(&workspace, "memo.txt", b"memo", "0xalice");
    let id = doc["id"].as_str().unwrap().to_string();

    docsign(&workspace)
        .env("DOCSIGN_LIFECYCLE__ENFORCE_TRANSITIONS", "true")
        .args(["status", &id, "FullySigned"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Illegal status transition"));
}

#[test]
fn test_caller_errors_exit_with_code_two() {
    let workspace = TempDir::new().unwrap();

    docsign(&workspace)
        .args(["show", "not-a-document-id"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid document ID format"));

    docsign(&workspace)
        .args(["show", "507f1f77bcf86cd799439011"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("not found"));

    docsign(&workspace)
        .args(["list", "--owner", ""])
        .assert()
        .code(2);
}

#[test]
fn test_config_prints_effective_settings() {
    let workspace = TempDir::new().unwrap();
    docsign(&workspace)
        .env("DOCSIGN_LIFECYCLE__EXPIRATION_DAYS", "30")
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("expiration_days = 30"))
        .stdout(predicate::str::contains("notify_order = \"notify_first\""));
}
