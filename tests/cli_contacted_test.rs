//! Integration tests for mark-contacted, undo, and bulk operations.

mod common;

use common::TestEnv;
use predicates::prelude::*;

// === Contacted Tests ===

#[test]
fn test_contacted_increments_count() {
    let env = TestEnv::new();
    let id = env.add_person_id("Jane Doe", &[]);

    env.tt()
        .args(["contacted", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"interaction_count\":1"));
}

#[test]
fn test_contacted_same_day_twice_keeps_history_unique() {
    let env = TestEnv::new();
    let id = env.add_person_id("Jane Doe", &[]);

    env.tt().args(["contacted", &id]).assert().success();
    let output = env.tt().args(["show", &id]).output().unwrap();
    let before: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();

    env.tt()
        .args(["contacted", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"interaction_count\":2"));

    let output = env.tt().args(["show", &id]).output().unwrap();
    let after: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();

    // The count moved but the history did not grow.
    assert_eq!(after["interaction_count"], 2);
    assert_eq!(
        after["contact_history"].as_array().unwrap().len(),
        before["contact_history"].as_array().unwrap().len()
    );
}

#[test]
fn test_contacted_unknown_id_fails() {
    let env = TestEnv::new();

    env.tt()
        .args(["contacted", "tt-ffff"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

// === Undo Tests ===

#[test]
fn test_undo_with_empty_slot_fails() {
    let env = TestEnv::new();

    env.tt()
        .args(["undo"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No action to undo"));
}

#[test]
fn test_undo_restores_deleted_person() {
    let env = TestEnv::new();
    let id = env.add_person_id("Jane Doe", &[]);

    env.tt().args(["delete", &id]).assert().success();

    env.tt()
        .args(["undo"])
        .assert()
        .success()
        .stdout(predicate::str::contains(&format!("\"id\":\"{}\"", id)))
        .stdout(predicate::str::contains("\"name\":\"Jane Doe\""));

    env.tt()
        .args(["show", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("Jane Doe"));
}

#[test]
fn test_undo_reverts_contacted() {
    let env = TestEnv::new();
    let id = env.add_person_id("Jane Doe", &[]);

    env.tt().args(["contacted", &id]).assert().success();
    env.tt().args(["undo"]).assert().success();

    env.tt()
        .args(["show", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"interaction_count\":0"));
}

#[test]
fn test_undo_slot_is_single_entry() {
    let env = TestEnv::new();
    let id = env.add_person_id("Jane Doe", &[]);

    env.tt().args(["contacted", &id]).assert().success();
    env.tt().args(["undo"]).assert().success();

    // Second undo finds the slot cleared.
    env.tt()
        .args(["undo"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No action to undo"));
}

// === Bulk Tests ===

#[test]
fn test_contacted_all() {
    let env = TestEnv::new();
    let jane = env.add_person_id("Jane Doe", &[]);
    let john = env.add_person_id("John Roe", &[]);

    env.tt()
        .args(["contacted", "--all"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"attempted\":2"))
        .stdout(predicate::str::contains("\"succeeded\":2"))
        .stdout(predicate::str::contains("\"failed\":0"));

    for id in [&jane, &john] {
        env.tt()
            .args(["show", id])
            .assert()
            .success()
            .stdout(predicate::str::contains("\"interaction_count\":1"));
    }
}

#[test]
fn test_contacted_all_human() {
    let env = TestEnv::new();
    env.add_person("Jane Doe", &[]);

    env.tt()
        .args(["contacted", "--all", "-H"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Marked 1 of 1 contacted"));
}

#[test]
fn test_contacted_category_scoped() {
    let env = TestEnv::new();
    let worker = env.add_person_id("Jane Doe", &["--category", "Work"]);
    let cousin = env.add_person_id("John Roe", &["--category", "Family"]);

    env.tt()
        .args(["contacted", "--category", "Work"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"attempted\":1"));

    env.tt()
        .args(["show", &worker])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"interaction_count\":1"));

    env.tt()
        .args(["show", &cousin])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"interaction_count\":0"));
}

#[test]
fn test_contacted_empty_category_fails() {
    let env = TestEnv::new();
    env.add_person("Jane Doe", &["--category", "Work"]);

    env.tt()
        .args(["contacted", "--category", "Mentors"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No people found in category"));
}

#[test]
fn test_undo_after_bulk_restores_first_person_only() {
    let env = TestEnv::new();
    let jane = env.add_person_id("Jane Doe", &[]);
    let john = env.add_person_id("John Roe", &[]);

    env.tt().args(["contacted", "--all"]).assert().success();
    env.tt().args(["undo"]).assert().success();

    // Only the representative snapshot (the first person) reverts.
    env.tt()
        .args(["show", &jane])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"interaction_count\":0"));

    env.tt()
        .args(["show", &john])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"interaction_count\":1"));
}
