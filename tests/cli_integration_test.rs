//! Binary-level tests. Every test gets its own store directory.

mod common;

use assert_cmd::prelude::*;
use common::tarifario;
use pretty_assertions::assert_eq;
use serde_json::Value;
use std::fs;
use tempfile::TempDir;

fn json_stdout(output: std::process::Output) -> Value {
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout is not JSON")
}

fn price_of(rows: &Value, name: &str) -> u64 {
    rows.as_array()
        .unwrap()
        .iter()
        .find(|row| row["name"] == name)
        .and_then(|row| row["price"].as_u64())
        .unwrap_or_else(|| panic!("{name} missing"))
}

#[test]
fn test_prices_json_lists_whole_catalog() {
    let store = TempDir::new().unwrap();
    let output = tarifario(store.path())
        .args(["prices", "--format", "json"])
        .output()
        .unwrap();
    let rows = json_stdout(output);
    assert_eq!(rows.as_array().unwrap().len(), 63);
    assert_eq!(price_of(&rows, "Musigym 3 meses"), 338_000);
    assert_eq!(price_of(&rows, "Hogar Personalizado Clase de prueba"), 41_000);
}

#[test]
fn test_prices_overrides_and_filters() {
    let store = TempDir::new().unwrap();
    let output = tarifario(store.path())
        .args([
            "prices", "--format", "json", "--card-fee", "--group", "Musigym", "--sort", "price",
            "--desc",
        ])
        .output()
        .unwrap();
    let rows = json_stdout(output);
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 5);
    assert_eq!(rows[0]["name"], "Musigym 12 meses");
    assert_eq!(rows[4]["name"], "Musigym 1 mes");
}

#[test]
fn test_saved_settings_apply_to_later_runs() {
    let store = TempDir::new().unwrap();
    tarifario(store.path())
        .args(["prices", "--card-fee", "--save", "--format", "json"])
        .assert()
        .success();
    assert!(store.path().join("tarifario.state.v2.json").exists());

    let rows = json_stdout(
        tarifario(store.path())
            .args(["prices", "--format", "json"])
            .output()
            .unwrap(),
    );
    assert_eq!(price_of(&rows, "Musigym 3 meses"), 359_000);
}

#[test]
fn test_quote_json_breakdown() {
    let store = TempDir::new().unwrap();
    let quote = json_stdout(
        tarifario(store.path())
            .args(["quote", "--json", "Musigym", "5", "meses"])
            .output()
            .unwrap(),
    );
    assert_eq!(quote["entry"]["group"], "Musigym");
    assert_eq!(quote["breakdown"]["basis"]["kind"], "subscription");
    assert_eq!(quote["breakdown"]["basis"]["fallback"], true);
    assert_eq!(quote["breakdown"]["finalPrice"], 594_000.0);
}

#[test]
fn test_quote_unknown_name_suggests() {
    let store = TempDir::new().unwrap();
    let output = tarifario(store.path())
        .args(["quote", "musigy", "3", "meses"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("No group matched"));
    assert!(stderr.contains("Musigym 3 meses"));
}

#[test]
fn test_rules_edit_export_and_reset() {
    let store = TempDir::new().unwrap();
    let packs = store.path().join("packs.txt");
    fs::write(&packs, "4 = 0.9\n8: 0.85\nnope\n").unwrap();

    tarifario(store.path())
        .args(["rules", "edit", "--packs"])
        .arg(&packs)
        .assert()
        .success();

    let output = tarifario(store.path())
        .args(["rules", "export", "--section", "pack"])
        .output()
        .unwrap();
    assert_eq!(String::from_utf8_lossy(&output.stdout), "4=0.9\n8=0.85\n");

    tarifario(store.path()).args(["rules", "reset"]).assert().success();
    let output = tarifario(store.path())
        .args(["rules", "export", "--section", "pack"])
        .output()
        .unwrap();
    assert!(String::from_utf8_lossy(&output.stdout).contains("24=0.9"));
}

#[test]
fn test_rules_edit_applies_valid_sections_and_warns_on_the_rest() {
    let store = TempDir::new().unwrap();
    let groups = store.path().join("groups.txt");
    let months = store.path().join("months.txt");
    fs::write(&groups, "Musigym = 3\n").unwrap();
    fs::write(&months, "doce = mucho\n").unwrap();

    let output = tarifario(store.path())
        .args(["rules", "edit", "--groups"])
        .arg(&groups)
        .arg("--months")
        .arg(&months)
        .output()
        .unwrap();
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("No valid lines for months"));

    let output = tarifario(store.path())
        .args(["rules", "export", "--section", "group"])
        .output()
        .unwrap();
    assert_eq!(String::from_utf8_lossy(&output.stdout), "Musigym=3\n");

    let output = tarifario(store.path())
        .args(["rules", "export", "--section", "months"])
        .output()
        .unwrap();
    assert!(String::from_utf8_lossy(&output.stdout).contains("3=2.7"));
}

#[test]
fn test_rules_edit_rejects_useless_text() {
    let store = TempDir::new().unwrap();
    let months = store.path().join("months.txt");
    fs::write(&months, "twelve = lots\n").unwrap();

    tarifario(store.path())
        .args(["rules", "edit", "--months"])
        .arg(&months)
        .assert()
        .failure();
    assert!(!store.path().join("tarifario.state.v2.json").exists());
}

#[test]
fn test_legacy_state_is_upgraded() {
    let store = TempDir::new().unwrap();
    fs::write(
        store.path().join("tarifario.state.v1.json"),
        r#"{"base":60000,"rounding":1000,"globalPct":0,"filters":{}}"#,
    )
    .unwrap();

    let state = json_stdout(tarifario(store.path()).args(["state", "show"]).output().unwrap());
    assert_eq!(state["base"], 60_000.0);
    assert_eq!(state["ccFee"], false);
    assert!(store.path().join("tarifario.state.v2.json").exists());
    assert!(store.path().join("tarifario.state.v1.json").exists());
}

#[test]
fn test_afford_json() {
    let store = TempDir::new().unwrap();
    let report = json_stdout(
        tarifario(store.path())
            .args([
                "afford", "--smmlv", "1.000.000", "--max", "3", "--scope", "all", "--format",
                "json",
            ])
            .output()
            .unwrap(),
    );
    assert_eq!(report["status"], "ready");
    assert_eq!(report["smmlv"], 1_000_000);
    assert_eq!(report["rows"].as_array().unwrap().len(), 63);
}

#[test]
fn test_init_writes_config_once() {
    let dir = TempDir::new().unwrap();
    tarifario(dir.path()).arg("init").assert().success();
    assert!(dir.path().join(".tarifario.toml").exists());
    tarifario(dir.path()).arg("init").assert().failure();
    tarifario(dir.path()).args(["init", "--force"]).assert().success();
}

#[test]
fn test_config_file_seeds_fresh_sessions() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join(".tarifario.toml"),
        "[pricing]\nbase = 60000\n",
    )
    .unwrap();
    let rows = json_stdout(
        tarifario(dir.path())
            .args(["prices", "--format", "json"])
            .output()
            .unwrap(),
    );
    // 60000 * 1.00 * 4 * 1.00
    assert_eq!(price_of(&rows, "Sede Personalizado Paquete de 4 clases"), 240_000);
}
