//! Command-line behaviour of the `tradeconf` binary.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const DNB_CONFIRMATION: &str = "\
Handelsdato 01.03.2024
Oppgjørsdato 05.03.2024
Antall kjøpt 100
Pris 45,50
Oppgjørsbeløp NOK 4.550,00
Kurtasje 29,00
DNB Markets
NO0010000000 EQUI
";

const PARETO_SALE: &str = "\
Du har solgt
Total 1,000.00 USD
Pareto
";

/// Binary with the user config dir pointed into `home`.
fn tradeconf(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("tradeconf").unwrap();
    cmd.env("HOME", home).env("XDG_CONFIG_HOME", home.join(".config"));
    cmd
}

fn write_documents(dir: &Path) {
    fs::write(dir.join("a.txt"), DNB_CONFIRMATION).unwrap();
    fs::write(dir.join("b.txt"), PARETO_SALE).unwrap();
}

#[test]
fn extract_prints_json_record() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("a.txt");
    fs::write(&input, DNB_CONFIRMATION).unwrap();

    tradeconf(dir.path())
        .arg("extract")
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"direction\": \"by\""))
        .stdout(predicate::str::contains("\"amount\": \"4550.0\""))
        .stdout(predicate::str::contains("\"broker\": \"DNB\""));
}

#[test]
fn extract_prints_import_row() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("a.txt");
    fs::write(&input, DNB_CONFIRMATION).unwrap();

    tradeconf(dir.path())
        .args(["extract", "-f", "row"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "Petter,by,,csno,EQUI,03012024,03052024,,100.0,,",
        ));
}

#[test]
fn extract_missing_file_fails() {
    let dir = TempDir::new().unwrap();

    tradeconf(dir.path())
        .arg("extract")
        .arg(dir.path().join("missing.txt"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}

#[test]
fn batch_writes_one_row_per_document() {
    let dir = TempDir::new().unwrap();
    write_documents(dir.path());
    let output = dir.path().join("out.csv");

    tradeconf(dir.path())
        .arg("batch")
        .arg(dir.path().join("*.txt").to_str().unwrap())
        .arg("-o")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote 2 rows"));

    let csv = fs::read_to_string(&output).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("Petter,by,,csno,EQUI,"));
    assert!(lines[1].starts_with("Petter,sl,,csno,VIDEN,"));
}

#[test]
fn batch_review_then_corrections() {
    let dir = TempDir::new().unwrap();
    write_documents(dir.path());
    let pattern = dir.path().join("*.txt");
    let review = dir.path().join("review.json");
    let output = dir.path().join("out.csv");

    tradeconf(dir.path())
        .arg("batch")
        .arg(pattern.to_str().unwrap())
        .arg("-o")
        .arg(&output)
        .arg("--review")
        .arg(&review)
        .assert()
        .success();

    let sheet: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&review).unwrap()).unwrap();
    assert_eq!(sheet["a.txt"]["ticker"], "EQUI");
    assert_eq!(sheet["b.txt"]["direction"], "sl");

    let corrections = dir.path().join("corrections.json");
    fs::write(
        &corrections,
        r#"{"a.txt": {"ticker": "DNB", "direction": "sl"}}"#,
    )
    .unwrap();

    tradeconf(dir.path())
        .arg("batch")
        .arg(pattern.to_str().unwrap())
        .arg("-o")
        .arg(&output)
        .arg("--corrections")
        .arg(&corrections)
        .assert()
        .success()
        .stdout(predicate::str::contains("1 corrected"));

    let csv = fs::read_to_string(&output).unwrap();
    let first = csv.lines().next().unwrap();
    assert!(first.starts_with("Petter,sl,,csno,DNB,03012024,03052024,,100.0,f,"));
}

#[test]
fn batch_rejects_invalid_corrections() {
    let dir = TempDir::new().unwrap();
    write_documents(dir.path());
    let corrections = dir.path().join("corrections.json");
    fs::write(&corrections, r#"{"a.txt": {"direction": "buy"}}"#).unwrap();

    tradeconf(dir.path())
        .arg("batch")
        .arg(dir.path().join("*.txt").to_str().unwrap())
        .arg("-o")
        .arg(dir.path().join("out.csv"))
        .arg("--corrections")
        .arg(&corrections)
        .assert()
        .failure()
        .stderr(predicate::str::contains("corrections.json"));
}

#[test]
fn batch_without_matches_fails() {
    let dir = TempDir::new().unwrap();

    tradeconf(dir.path())
        .arg("batch")
        .arg(dir.path().join("*.pdf").to_str().unwrap())
        .assert()
        .failure()
        .stderr(predicate::str::contains("No matching files"));
}

#[test]
fn batch_uses_owner_from_config_file() {
    let dir = TempDir::new().unwrap();
    write_documents(dir.path());
    let config = dir.path().join("tradeconf.json");
    fs::write(&config, r#"{"export": {"owner": "Kari"}}"#).unwrap();
    let output = dir.path().join("out.csv");

    tradeconf(dir.path())
        .arg("-c")
        .arg(&config)
        .arg("batch")
        .arg(dir.path().join("*.txt").to_str().unwrap())
        .arg("-o")
        .arg(&output)
        .assert()
        .success();

    let csv = fs::read_to_string(&output).unwrap();
    assert!(csv.lines().all(|line| line.starts_with("Kari,")));
}

#[test]
fn extract_text_summary() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("a.txt");
    fs::write(&input, DNB_CONFIRMATION).unwrap();

    tradeconf(dir.path())
        .args(["extract", "-f", "text"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Document: a.txt"))
        .stdout(predicate::str::contains("processing time"));
}

#[test]
fn config_show_prints_defaults() {
    let dir = TempDir::new().unwrap();

    tradeconf(dir.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("handelsdata_samlet.csv"))
        .stdout(predicate::str::contains("\"default_ticker\": \"VIDEN\""));
}

#[test]
fn config_brokers_follow_config_file() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("tradeconf.json");
    fs::write(
        &config,
        r#"{"extraction": {"brokers": [{"name": "nordnet", "code": "NN"}], "broker_tail_lines": 10}}"#,
    )
    .unwrap();

    tradeconf(dir.path())
        .args(["config", "brokers"])
        .assert()
        .success()
        .stdout(predicate::str::contains("fearnley securities"))
        .stdout(predicate::str::contains("Last 30 lines"));

    tradeconf(dir.path())
        .arg("-c")
        .arg(&config)
        .args(["config", "brokers"])
        .assert()
        .success()
        .stdout(predicate::str::contains("nordnet"))
        .stdout(predicate::str::contains("fearnley").not())
        .stdout(predicate::str::contains("Last 10 lines"));
}

#[test]
fn config_labels_in_priority_order() {
    let dir = TempDir::new().unwrap();

    tradeconf(dir.path())
        .args(["config", "labels", "quantity"])
        .assert()
        .success()
        .stdout("Antall kjøpt\nAntall solgt\nAntall\n");

    tradeconf(dir.path())
        .args(["config", "labels"])
        .assert()
        .success()
        .stdout(predicate::str::contains("commission: Kurtasje"));

    tradeconf(dir.path())
        .args(["config", "labels", "broker"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("broker is not found by label"));
}

#[test]
fn config_commands_write_nothing() {
    let dir = TempDir::new().unwrap();

    for args in [["config", "show"], ["config", "path"]] {
        tradeconf(dir.path()).args(args).assert().success();
    }

    assert!(!dir.path().join(".config").exists());
}
