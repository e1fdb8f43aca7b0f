//! Integration tests for address-book import via the CLI.

mod common;

use common::TestEnv;
use predicates::prelude::*;
use std::fs;

fn write_candidates(env: &TestEnv, json: &str) -> std::path::PathBuf {
    let path = env.data_path().join("contacts.json");
    fs::write(&path, json).unwrap();
    path
}

#[test]
fn test_import_adds_new_people() {
    let env = TestEnv::new();
    let file = write_candidates(
        &env,
        r#"[{"name":"Jane Doe","phone":"555-1234"},{"name":"John Roe","email":"john@example.com"}]"#,
    );

    env.tt()
        .arg("import")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"imported\":2"))
        .stdout(predicate::str::contains("\"skipped_duplicates\":0"));

    env.tt()
        .args(["list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"count\":2"));
}

#[test]
fn test_import_skips_duplicates_by_phone() {
    let env = TestEnv::new();
    env.add_person("jane doe", &["--phone", "5551234"]);

    let file = write_candidates(&env, r#"[{"name":"Jane Doe","phone":"555-1234"}]"#);

    env.tt()
        .arg("import")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"imported\":0"))
        .stdout(predicate::str::contains("\"skipped_duplicates\":1"));

    env.tt()
        .args(["list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"count\":1"));
}

#[test]
fn test_import_dry_run_adds_nothing() {
    let env = TestEnv::new();
    let file = write_candidates(&env, r#"[{"name":"Jane Doe"}]"#);

    env.tt()
        .args(["import", "--dry-run"])
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"dry_run\":true"))
        .stdout(predicate::str::contains("\"imported\":1"));

    env.tt()
        .args(["list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"count\":0"));
}

#[test]
fn test_import_sets_frequency() {
    let env = TestEnv::new();
    let file = write_candidates(&env, r#"[{"name":"Jane Doe"}]"#);

    env.tt()
        .args(["import", "--frequency", "60"])
        .arg(&file)
        .assert()
        .success();

    env.tt()
        .args(["list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"contact_frequency_days\":60"));
}

#[test]
fn test_import_missing_file_fails() {
    let env = TestEnv::new();

    env.tt()
        .args(["import", "/nonexistent/contacts.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

#[test]
fn test_import_human_output() {
    let env = TestEnv::new();
    env.add_person("Jane Doe", &[]);

    let file = write_candidates(&env, r#"[{"name":"jane doe"},{"name":"New Friend"}]"#);

    env.tt()
        .args(["import", "-H"])
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("Imported 1 people, skipped 1 duplicates"))
        .stdout(predicate::str::contains("duplicate: jane doe"));
}
