//! CLI integration tests using assert_cmd

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

fn macseal_cmd() -> Command {
    Command::cargo_bin("macseal").unwrap()
}

mod canonicalize {
    use super::*;

    #[test]
    fn test_canonicalize_sorts_keys() {
        let temp_dir = std::env::temp_dir();
        let temp_file = temp_dir.join("macseal_test_sorts.json");
        fs::write(&temp_file, r#"{"b": 2, "a": 1}"#).unwrap();

        macseal_cmd()
            .arg("canonicalize")
            .arg(&temp_file)
            .assert()
            .success()
            .stdout(predicate::eq(r#"{"a":1,"b":2}"#));

        fs::remove_file(&temp_file).ok();
    }

    #[test]
    fn test_canonicalize_invalid_json() {
        let temp_dir = std::env::temp_dir();
        let temp_file = temp_dir.join("macseal_test_invalid.json");
        fs::write(&temp_file, "{ invalid json }").unwrap();

        macseal_cmd()
            .arg("canonicalize")
            .arg(&temp_file)
            .assert()
            .failure()
            .stderr(predicate::str::contains("Failed to parse"));

        fs::remove_file(&temp_file).ok();
    }

    #[test]
    fn test_canonicalize_nonexistent_file() {
        macseal_cmd()
            .arg("canonicalize")
            .arg("nonexistent.json")
            .assert()
            .failure()
            .stderr(predicate::str::contains("Failed to read file"));
    }
}

mod sign {
    use super::*;

    #[test]
    fn test_sign_unreachable_server_fails() {
        let temp_dir = std::env::temp_dir();
        let temp_file = temp_dir.join("macseal_test_sign.json");
        fs::write(&temp_file, r#"{"x": 1}"#).unwrap();

        macseal_cmd()
            .arg("sign")
            .arg(&temp_file)
            .arg("--url")
            .arg("http://127.0.0.1:1")
            .assert()
            .failure()
            .stderr(predicate::str::contains("Sign request"));

        fs::remove_file(&temp_file).ok();
    }
}

mod verify {
    use super::*;

    #[test]
    fn test_verify_rejects_envelope_without_signature() {
        let temp_dir = std::env::temp_dir();
        let temp_file = temp_dir.join("macseal_test_no_sig.json");
        fs::write(&temp_file, r#"{"payload": {"x": 1}}"#).unwrap();

        macseal_cmd()
            .arg("verify")
            .arg(&temp_file)
            .assert()
            .failure()
            .stderr(predicate::str::contains("no signature"));

        fs::remove_file(&temp_file).ok();
    }
}

#[test]
fn test_help_lists_commands() {
    macseal_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("canonicalize"))
        .stdout(predicate::str::contains("sign"))
        .stdout(predicate::str::contains("verify"));
}
