//! Integration tests for the `nc` CLI commands.

#![allow(deprecated)] // Command::cargo_bin – macro replacement not yet stable

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn nocturne() -> Command {
    Command::cargo_bin("nocturne").unwrap()
}

// ---------------------------------------------------------------------------
// generate
// ---------------------------------------------------------------------------

#[test]
fn generate_prints_a_sheet() {
    nocturne()
        .args(["generate", "--class", "vampire", "--level", "advanced"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("vampire")
                .and(predicate::str::contains("Clan:"))
                .and(predicate::str::contains("Strength"))
                .and(predicate::str::contains("Disciplines")),
        );
}

#[test]
fn generate_werewolf_shows_gifts() {
    nocturne()
        .args(["generate", "-c", "werewolf", "-s", "7"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Tribe:").and(predicate::str::contains("Gifts:")));
}

#[test]
fn generate_is_reproducible_with_seed() {
    let run = || {
        nocturne()
            .args(["generate", "--seed", "99", "--json"])
            .output()
            .unwrap()
    };
    let first: serde_json::Value = serde_json::from_slice(&run().stdout).unwrap();
    let second: serde_json::Value = serde_json::from_slice(&run().stdout).unwrap();
    assert_eq!(first[0]["character"]["name_first"], second[0]["character"]["name_first"]);
    assert_eq!(first[0]["traits"].as_array().map(Vec::len), second[0]["traits"].as_array().map(Vec::len));
}

#[test]
fn generate_json_lists_every_character() {
    let output = nocturne()
        .args(["generate", "-n", "3", "--class", "hunter", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let sheets: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let sheets = sheets.as_array().unwrap();
    assert_eq!(sheets.len(), 3);
    for sheet in sheets {
        assert_eq!(sheet["character"]["character_class"], "HUNTER");
        assert!(sheet["character"]["hunter_attributes"]["creed"].is_string());
    }
}

#[test]
fn generate_v4_rolls_willpower() {
    nocturne()
        .args(["generate", "--class", "mortal", "--game-version", "v4"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Willpower").and(predicate::str::contains("V4")));
}

#[test]
fn generate_rejects_unknown_class() {
    nocturne()
        .args(["generate", "--class", "lich"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown character class"));
}

#[test]
fn generate_rejects_unknown_level() {
    nocturne()
        .args(["generate", "--level", "legendary"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown experience level"));
}

#[test]
fn generate_rejects_zero_count() {
    nocturne()
        .args(["generate", "-n", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("at least 1"));
}

#[test]
fn generate_verbose_logs_steps() {
    nocturne()
        .args(["-v", "generate", "--class", "hunter"])
        .assert()
        .success()
        .stderr(predicate::str::contains("generated character"));
}

// ---------------------------------------------------------------------------
// costs
// ---------------------------------------------------------------------------

#[test]
fn costs_lists_upgrades_and_refunds() {
    nocturne()
        .args(["costs", "strength", "--value", "2"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Strength")
                .and(predicate::str::contains("+3"))
                .and(predicate::str::contains("-1")),
        );
}

#[test]
fn costs_rejects_out_of_bounds_rating() {
    nocturne()
        .args(["costs", "Strength", "--value", "9"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("outside"));
}

#[test]
fn costs_unknown_trait() {
    nocturne()
        .args(["costs", "Juggling"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no trait named"));
}

// ---------------------------------------------------------------------------
// classes
// ---------------------------------------------------------------------------

#[test]
fn classes_shows_default_table() {
    nocturne()
        .arg("classes")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("mortal")
                .and(predicate::str::contains("1-59"))
                .and(predicate::str::contains("ghoul")),
        );
}

#[test]
fn classes_rejects_bad_percentile() {
    nocturne()
        .args(["classes", "--mortal", "101"])
        .assert()
        .failure();
}

// ---------------------------------------------------------------------------
// catalog
// ---------------------------------------------------------------------------

#[test]
fn catalog_round_trips_through_generate() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("catalog.json");
    let path_str = path.to_str().unwrap();

    nocturne()
        .args(["catalog", "-o", path_str])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote catalog"));
    assert!(path.exists());

    nocturne()
        .args(["generate", "--class", "ghoul", "--catalog", path_str])
        .assert()
        .success()
        .stdout(predicate::str::contains("Disciplines"));
}

#[test]
fn generate_with_missing_catalog_fails() {
    nocturne()
        .args(["generate", "--catalog", "/nonexistent/catalog.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot read"));
}

#[test]
fn generate_rejects_catalog_with_inverted_bounds() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("catalog.json");
    let path_str = path.to_str().unwrap();
    nocturne().args(["catalog", "-o", path_str]).assert().success();

    let mut json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    let strength = json["traits"]
        .as_array_mut()
        .unwrap()
        .iter_mut()
        .find(|t| t["name"] == "Strength")
        .unwrap();
    strength["min_value"] = 5.into();
    strength["max_value"] = 1.into();
    std::fs::write(&path, json.to_string()).unwrap();

    nocturne()
        .args(["generate", "--catalog", path_str])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid definition"));
}
