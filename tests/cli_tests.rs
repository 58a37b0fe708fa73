//! CLI surface tests - project init and basic entity commands

mod common;

use common::{cbk, create_test_material, create_test_vendor, setup_test_project};
use predicates::prelude::*;
use std::fs;

#[test]
fn test_init_creates_project_tree() {
    let tmp = tempfile::TempDir::new().unwrap();

    cbk()
        .current_dir(tmp.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized costbook project"));

    assert!(tmp.path().join(".costbook").is_dir());
    assert!(tmp.path().join("materials").is_dir());
    assert!(tmp.path().join("ledger/quotes").is_dir());
    assert!(tmp.path().join("history/snapshots").is_dir());
}

#[test]
fn test_init_twice_fails() {
    let tmp = setup_test_project();

    cbk()
        .current_dir(tmp.path())
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_commands_outside_project_fail() {
    let tmp = tempfile::TempDir::new().unwrap();

    cbk()
        .current_dir(tmp.path())
        .args(["mat", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not inside a costbook project"));
}

#[test]
fn test_mat_new_creates_file() {
    let tmp = setup_test_project();

    cbk()
        .current_dir(tmp.path())
        .args(["mat", "new", "--name", "Wheat Flour", "--unit", "kg"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created material"));

    let files: Vec<_> = fs::read_dir(tmp.path().join("materials"))
        .unwrap()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().to_string_lossy().ends_with(".cbk.yaml"))
        .collect();
    assert_eq!(files.len(), 1, "Expected exactly one material file");

    let content = fs::read_to_string(files[0].path()).unwrap();
    assert!(content.contains("Wheat Flour"));
    assert!(content.contains("unit: kg"));
}

#[test]
fn test_mat_list_empty_project() {
    let tmp = setup_test_project();

    cbk()
        .current_dir(tmp.path())
        .args(["mat", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No materials found"));
}

#[test]
fn test_mat_list_shows_materials() {
    let tmp = setup_test_project();
    create_test_material(&tmp, "Flour");
    create_test_material(&tmp, "Sugar");

    cbk()
        .current_dir(tmp.path())
        .args(["mat", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Flour"))
        .stdout(predicate::str::contains("Sugar"))
        .stdout(predicate::str::contains("2 material(s) found"));
}

#[test]
fn test_mat_show_unknown_id_fails() {
    let tmp = setup_test_project();

    cbk()
        .current_dir(tmp.path())
        .args(["mat", "show", "MAT-01ARZ3NDEKTSV4RRFFQ69G5FAV"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No material found"));
}

#[test]
fn test_mat_show_rejects_malformed_id() {
    let tmp = setup_test_project();

    cbk()
        .current_dir(tmp.path())
        .args(["mat", "show", "not-an-id"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid entity id"));
}

#[test]
fn test_quote_record_rejects_bad_quantity() {
    let tmp = setup_test_project();
    let mat = create_test_material(&tmp, "Flour");
    let ven = create_test_vendor(&tmp, "Acme");

    cbk()
        .current_dir(tmp.path())
        .args([
            "quote", "record", "--material", &mat, "--vendor", &ven, "--quantity", "0",
            "--unit", "kg", "--price", "10",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("quantity must be positive"));
}

#[test]
fn test_quote_record_and_list() {
    let tmp = setup_test_project();
    let mat = create_test_material(&tmp, "Flour");
    let ven = create_test_vendor(&tmp, "Acme Foods");

    cbk()
        .current_dir(tmp.path())
        .args([
            "quote", "record", "--material", &mat, "--vendor", &ven, "--quantity", "25",
            "--unit", "kg", "--price", "10.5",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Recorded quote"));

    cbk()
        .current_dir(tmp.path())
        .args(["quote", "list", &mat])
        .assert()
        .success()
        .stdout(predicate::str::contains("Acme Foods"))
        .stdout(predicate::str::contains("1 quote(s) found"));

    // Denormalized cache shows through mat show
    cbk()
        .current_dir(tmp.path())
        .args(["mat", "show", &mat])
        .assert()
        .success()
        .stdout(predicate::str::contains("10.50"))
        .stdout(predicate::str::contains("Acme Foods"));
}
