//! Tests for error handling, exit codes and suggestions.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use assert_cmd::cargo;
use predicates::prelude::*;
use tempfile::TempDir;

fn bvbuilder(dir: &Path) -> Command {
    let mut cmd = cargo::cargo_bin_cmd!("bvbuilder");
    cmd.current_dir(dir)
        .env_remove("DB_HOST")
        .env_remove("DB_PORT")
        .env_remove("DB_USER")
        .env_remove("DB_PASS")
        .env_remove("DB_NAME")
        .env_remove("BVBUILDER_TEMPLATES_DIR")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_invalid_resource_name() {
    let temp = TempDir::new().unwrap();

    bvbuilder(temp.path())
        .args(["crud", "1product", "--skip-db"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("invalid resource name '1product'"))
        .stderr(predicate::str::contains("Suggestions:"));

    assert!(!temp.path().join("src").exists());
}

#[test]
fn test_invalid_version_segment() {
    let temp = TempDir::new().unwrap();

    bvbuilder(temp.path())
        .args(["model", "product", "..", "--skip-db"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("invalid version segment"));
}

#[test]
fn test_invalid_database_name() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join(".env.example"), "DB_NAME=x\n").unwrap();

    bvbuilder(temp.path())
        .args(["init", "--db-name", "shop;drop", "--skip-db"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("invalid database name"));

    assert!(!temp.path().join(".env").exists());
}

#[test]
fn test_crud_rejects_auth_flag() {
    let temp = TempDir::new().unwrap();

    bvbuilder(temp.path())
        .args(["crud", "product", "--auth"])
        .assert()
        .code(2);
}

#[test]
fn test_auth_flags_conflict() {
    let temp = TempDir::new().unwrap();

    bvbuilder(temp.path())
        .args(["route", "product", "--auth", "--no-auth", "--skip-db"])
        .assert()
        .code(2);
}

#[test]
fn test_closed_stdin_cancels_prompt() {
    let temp = TempDir::new().unwrap();

    bvbuilder(temp.path())
        .args(["route", "product", "--skip-db"])
        .write_stdin("")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Operation cancelled"));

    assert!(!temp.path().join("src").exists());
}

#[test]
fn test_missing_config_file() {
    let temp = TempDir::new().unwrap();

    bvbuilder(temp.path())
        .args(["--config", "does-not-exist.toml", "list"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn test_malformed_config_file() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("bv.toml");
    fs::write(&config, "[database]\nport = \"not a number\"\n").unwrap();

    bvbuilder(temp.path())
        .arg("--config")
        .arg(&config)
        .arg("list")
        .assert()
        .code(4);
}

#[test]
fn test_unknown_config_key() {
    let temp = TempDir::new().unwrap();

    bvbuilder(temp.path())
        .args(["config", "get", "database.colour"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("database.colour"));
}

#[test]
fn test_missing_templates_directory() {
    let temp = TempDir::new().unwrap();

    bvbuilder(temp.path())
        .env("BVBUILDER_TEMPLATES_DIR", temp.path().join("nope"))
        .args(["crud", "product", "--skip-db"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Template directory"));
}

#[test]
fn test_override_with_unknown_placeholder() {
    let temp = TempDir::new().unwrap();
    let overrides = temp.path().join("tpl");
    fs::create_dir(&overrides).unwrap();
    fs::write(overrides.join("model.basic.tmpl"), "// {{TABEL_NAME}}\n").unwrap();

    bvbuilder(temp.path())
        .env("BVBUILDER_TEMPLATES_DIR", &overrides)
        .args(["model", "product", "--skip-db"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("TABEL_NAME"));

    assert!(!temp.path().join("src/v1/models/productModel.js").exists());
}

#[test]
fn test_root_is_a_file() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("not-a-dir");
    fs::write(&file, "").unwrap();

    bvbuilder(temp.path())
        .args(["model", "product", "--skip-db", "--root"])
        .arg(&file)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Filesystem error"));
}

#[test]
fn test_missing_sql_script() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join(".env.example"), "DB_NAME=x\n").unwrap();

    bvbuilder(temp.path())
        .args(["init", "--db-name", "shop", "--sql", "missing.sql"])
        .assert()
        .failure();

    assert!(!temp.path().join(".env").exists());
}

#[test]
fn test_unreachable_database_keeps_generated_files() {
    let temp = TempDir::new().unwrap();

    bvbuilder(temp.path())
        .env("DB_HOST", "127.0.0.1")
        .env("DB_PORT", "1")
        .args(["model", "product"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Could not create table `products`"));

    assert!(temp.path().join("src/v1/models/productModel.js").exists());
}

#[test]
fn test_verbose_hint_only_without_verbose() {
    let temp = TempDir::new().unwrap();

    bvbuilder(temp.path())
        .args(["crud", "1product", "--skip-db"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--verbose"));

    bvbuilder(temp.path())
        .args(["-v", "crud", "1product", "--skip-db"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Use -v / --verbose").not());
}
