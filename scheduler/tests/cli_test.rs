/*!
 * Command Line Tests
 * Runs the built binary against process tables on disk
 */

use pretty_assertions::assert_eq;
use std::io::Write;
use std::process::{Command, Output};
use tempfile::NamedTempFile;

fn table(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

fn rr(file: &NamedTempFile, quantum: &str) -> Output {
    Command::new(env!("CARGO_BIN_EXE_rr"))
        .arg(file.path())
        .arg(quantum)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

#[test]
fn test_prints_rows_and_averages() {
    let file = table("2\n1 0 4\n2 0 4\n");

    let output = rr(&file, "2");

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8(output.stdout).unwrap(),
        "4\t0\n7\t3\nAverage wait time: 5.50\nAverage response time: 1.50\n"
    );
}

#[test]
fn test_median_mode() {
    let file = table("4\n1 0 7\n2 2 4\n3 4 1\n4 5 4\n");

    let output = rr(&file, "median");

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8(output.stdout).unwrap(),
        "18\t0\n14\t2\n4\t4\n14\t7\nAverage wait time: 12.50\nAverage response time: 3.25\n"
    );
}

#[test]
fn test_truncated_table_fails_without_averages() {
    let file = table("3\n1 0 4\n2 0");

    let output = rr(&file, "2");

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("missing integer"));
}

#[test]
fn test_rejects_bad_tables_and_quanta() {
    let cases = [
        ("0\n", "1", "no processes"),
        ("1\n5 0 0\n", "1", "process 5 has zero burst time"),
        ("1\n1 0 99999999999999999999\n", "1", "integer overflow"),
        ("1\n1 0 3\n", "0", "zero quantum length"),
        ("1\n1 0 3\n", "abc", "missing integer"),
        ("0\n", "0", "no processes"),
    ];

    for (contents, quantum, message) in cases {
        let output = rr(&table(contents), quantum);

        let stderr = String::from_utf8_lossy(&output.stderr);
        assert_eq!(output.status.code(), Some(1), "{contents:?} with {quantum}");
        assert!(output.stdout.is_empty());
        assert!(stderr.contains(&format!(": {message}")), "{stderr}");
        assert!(!stderr.contains("error:"), "{stderr}");
    }
}

#[test]
fn test_missing_file_fails() {
    let output = Command::new(env!("CARGO_BIN_EXE_rr"))
        .arg("/nonexistent/processes.txt")
        .arg("3")
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
}
