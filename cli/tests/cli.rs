use std::fs;
use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use tempfile::TempDir;

fn write_file(path: &Path, contents: &str) {
    fs::write(path, contents).expect("write test file");
}

#[test]
fn schemes_from_line_file_print_json() {
    let dir = TempDir::new().expect("tempdir");
    let input = dir.path().join("schemes.txt");
    write_file(&input, "# keep hot pages\nmin max 80% max 100ms max willneed\n");

    cargo_bin_cmd!("damos")
        .arg("schemes")
        .arg(&input)
        .args(["--indent", "0"])
        .assert()
        .success()
        .stdout(contains("\"name\":\"0\",\"action\":\"willneed\""))
        .stdout(contains("\"min_age\":100000"));
}

#[test]
fn schemes_literal_text_to_lines() {
    cargo_bin_cmd!("damos")
        .args(["schemes", "4K max 0% 10% 1s max pageout", "--format", "lines"])
        .assert()
        .success()
        .stdout("4096 max 0% 10% 1000000us max pageout 0ms 0 0ms 0 0 0 none 0us 0 0 0");
}

#[test]
fn schemes_from_stdin() {
    cargo_bin_cmd!("damos")
        .arg("schemes")
        .args(["--format", "lines", "--no-sentinels"])
        .write_stdin("[{\"action\": \"stat\"}]")
        .assert()
        .success()
        .stdout(contains("0 18446744073709551615 0% 100% 0us 18446744073709551615us stat"));
}

#[test]
fn schemes_writes_output_file() {
    let dir = TempDir::new().expect("tempdir");
    let output = dir.path().join("out.json");

    cargo_bin_cmd!("damos")
        .args(["schemes", "min max 0% 100% 0 max cold", "-o"])
        .arg(&output)
        .assert()
        .success()
        .stdout("");

    let written = fs::read_to_string(&output).expect("read output");
    assert!(written.contains("\"action\": \"cold\""));
}

#[test]
fn schemes_invalid_line_fails() {
    cargo_bin_cmd!("damos")
        .args(["schemes", "min max 0% 100% 0 max"])
        .assert()
        .failure()
        .code(1)
        .stderr(
            contains("ERROR  given scheme is neither file nor proper scheme string")
                .and(contains("expected [7, 9, 12, 17, 18] fields")),
        );
}

#[test]
fn schemes_forced_json_grammar_rejects_lines() {
    cargo_bin_cmd!("damos")
        .args(["schemes", "--grammar", "json", "min max 0% 100% 0 max stat"])
        .assert()
        .failure()
        .stderr(contains("ERROR  invalid JSON"));
}

#[test]
fn value_bytes_and_durations() {
    cargo_bin_cmd!("damos")
        .args(["value", "bytes", "2 MiB"])
        .assert()
        .success()
        .stdout("2.000 MiB\n");

    cargo_bin_cmd!("damos")
        .args(["value", "duration", "2 h 1 m 2 s"])
        .assert()
        .success()
        .stdout("2 h 1 m 2 s\n");

    cargo_bin_cmd!("damos")
        .args(["value", "duration", "-m", "1 s"])
        .assert()
        .success()
        .stdout("1000000000\n");
}

#[test]
fn value_number_grouping() {
    cargo_bin_cmd!("damos")
        .args(["value", "number", "1234567"])
        .assert()
        .success()
        .stdout("1,234,567\n");
}

#[test]
fn value_rejects_missing_percent_sign() {
    cargo_bin_cmd!("damos")
        .args(["value", "percent", "80"])
        .assert()
        .failure()
        .stderr(contains("'%' expected after '80'"));
}
