//! Shared test helpers for integration tests

#![allow(dead_code)]

use assert_cmd::cargo;
use assert_cmd::Command;
use tempfile::TempDir;

/// Helper to get a cbk command
pub fn cbk() -> Command {
    Command::new(cargo::cargo_bin!("cbk"))
}

/// Helper to create a test project in a temp directory
pub fn setup_test_project() -> TempDir {
    let tmp = TempDir::new().unwrap();
    cbk().current_dir(tmp.path()).arg("init").assert().success();
    tmp
}

fn stdout_id(output: std::process::Output) -> String {
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

/// Helper to create a test material, returning its id
pub fn create_test_material(tmp: &TempDir, name: &str) -> String {
    let output = cbk()
        .current_dir(tmp.path())
        .args(["mat", "new", "--name", name, "--unit", "kg", "-o", "id"])
        .output()
        .unwrap();
    stdout_id(output)
}

/// Helper to create a test vendor, returning its id
pub fn create_test_vendor(tmp: &TempDir, name: &str) -> String {
    let output = cbk()
        .current_dir(tmp.path())
        .args(["ven", "new", "--name", name, "-o", "id"])
        .output()
        .unwrap();
    stdout_id(output)
}

/// Helper to create a test recipe, returning its id
pub fn create_test_recipe(tmp: &TempDir, code: &str, name: &str, batch_size: &str) -> String {
    let output = cbk()
        .current_dir(tmp.path())
        .args([
            "rcp",
            "new",
            "--code",
            code,
            "--name",
            name,
            "--batch-size",
            batch_size,
            "-o",
            "id",
        ])
        .output()
        .unwrap();
    stdout_id(output)
}

/// Helper to record a quote through the CLI
pub fn record_test_quote(tmp: &TempDir, material: &str, vendor: &str, price: &str) -> String {
    let output = cbk()
        .current_dir(tmp.path())
        .args([
            "quote", "record", "--material", material, "--vendor", vendor, "--quantity", "25",
            "--unit", "kg", "--price", price, "-o", "id",
        ])
        .output()
        .unwrap();
    stdout_id(output)
}

/// Helper to add a line item to a recipe, returning the item id
pub fn add_test_item(tmp: &TempDir, recipe: &str, material: &str, quantity: &str) -> String {
    let output = cbk()
        .current_dir(tmp.path())
        .args([
            "rcp", "add-item", recipe, "--material", material, "--quantity", quantity, "-o", "id",
        ])
        .output()
        .unwrap();
    stdout_id(output)
}
