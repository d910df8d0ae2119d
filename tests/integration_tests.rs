//! Integration tests for the rig CLI
//!
//! These tests exercise the CLI commands end-to-end using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Helper to get a rig command
fn rig() -> Command {
    Command::cargo_bin("rig").unwrap()
}

/// Helper to create an initialized workspace in a temp directory
fn setup_workspace() -> TempDir {
    let tmp = TempDir::new().unwrap();
    rig().current_dir(tmp.path()).arg("init").assert().success();
    tmp
}

/// Helper to install a part by id, asserting success
fn install(tmp: &TempDir, part_id: &str) {
    rig()
        .current_dir(tmp.path())
        .args(["install", part_id])
        .assert()
        .success();
}

/// Extract a BLD- id from `rig build save` output
fn save_build(tmp: &TempDir, name: &str) -> String {
    let output = rig()
        .current_dir(tmp.path())
        .args(["build", "save", name])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    stdout
        .split_whitespace()
        .find(|w| w.starts_with("BLD-"))
        .map(|s| s.to_string())
        .expect("save output must contain a BLD- id")
}

// ============================================================================
// CLI Basic Tests
// ============================================================================

#[test]
fn test_help_displays() {
    rig()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("PC build planning"));
}

#[test]
fn test_version_displays() {
    rig()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("rig"));
}

#[test]
fn test_commands_fail_outside_workspace() {
    let tmp = TempDir::new().unwrap();
    rig()
        .current_dir(tmp.path())
        .arg("status")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a rig workspace"));
}

#[test]
fn test_completions_generate() {
    rig()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("rig"));
}

// ============================================================================
// Init
// ============================================================================

#[test]
fn test_init_creates_workspace() {
    let tmp = setup_workspace();
    assert!(tmp.path().join(".rig/config.yaml").exists());
    assert!(tmp.path().join("catalog").is_dir());
    assert!(tmp.path().join("builds").is_dir());
    assert!(tmp.path().join("catalog/cpu_001.json").exists());
}

#[test]
fn test_init_twice_without_force_is_friendly() {
    let tmp = setup_workspace();
    rig()
        .current_dir(tmp.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

// ============================================================================
// Part catalog
// ============================================================================

#[test]
fn test_part_list_shows_seed_catalog() {
    let tmp = setup_workspace();
    rig()
        .current_dir(tmp.path())
        .args(["part", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("cpu_001"))
        .stdout(predicate::str::contains("mobo_001"));
}

#[test]
fn test_part_list_filters_by_category() {
    let tmp = setup_workspace();
    rig()
        .current_dir(tmp.path())
        .args(["part", "list", "--category", "Processors"])
        .assert()
        .success()
        .stdout(predicate::str::contains("cpu_001"))
        .stdout(predicate::str::contains("cpu_002"))
        .stdout(predicate::str::contains("mobo_001").not());
}

#[test]
fn test_part_list_id_format() {
    let tmp = setup_workspace();
    rig()
        .current_dir(tmp.path())
        .args(["part", "list", "-f", "id", "--part-type", "psu"])
        .assert()
        .success()
        .stdout(predicate::str::diff("psu_001\n"));
}

#[test]
fn test_part_show_details() {
    let tmp = setup_workspace();
    rig()
        .current_dir(tmp.path())
        .args(["part", "show", "cpu_001"])
        .assert()
        .success()
        .stdout(predicate::str::contains("LGA1700"))
        .stdout(predicate::str::contains("$589"));
}

#[test]
fn test_part_list_handles_non_ascii_names() {
    let tmp = setup_workspace();
    let doc = r#"{"id":"cpu_101","name":"Processeur gravure affinée 3nm KX","type":"cpu","category":"Processors","specs":{"socket":"LGA1700"},"price_estimate":499}"#;
    fs::write(tmp.path().join("catalog/cpu_101.json"), doc).unwrap();

    // The long accented name gets truncated for the table column.
    rig()
        .current_dir(tmp.path())
        .args(["part", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("cpu_101"))
        .stdout(predicate::str::contains("Processeur gravure affin..."));
}

#[test]
fn test_part_show_unknown_fails() {
    let tmp = setup_workspace();
    rig()
        .current_dir(tmp.path())
        .args(["part", "show", "cpu_999"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

// ============================================================================
// Install / validation flow
// ============================================================================

#[test]
fn test_install_motherboard_then_cpu() {
    let tmp = setup_workspace();
    install(&tmp, "mobo_001");
    rig()
        .current_dir(tmp.path())
        .args(["install", "cpu_001"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Power 333W"));
}

#[test]
fn test_install_socket_mismatch_rejected() {
    let tmp = setup_workspace();
    install(&tmp, "mobo_001");
    rig()
        .current_dir(tmp.path())
        .args(["install", "cpu_002"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("socket_mismatch"));

    // The rejected part is not in the build.
    rig()
        .current_dir(tmp.path())
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("cpu_002").not());
}

#[test]
fn test_install_duplicate_blocked() {
    let tmp = setup_workspace();
    install(&tmp, "psu_001");
    rig()
        .current_dir(tmp.path())
        .args(["install", "psu_001"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("duplicate_category"));
}

#[test]
fn test_install_into_wrong_node_rejected() {
    let tmp = setup_workspace();
    install(&tmp, "mobo_001");
    rig()
        .current_dir(tmp.path())
        .args(["install", "cpu_001", "--node", "pcie_slot_1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("slot_mismatch"));
}

#[test]
fn test_install_unknown_node_fails() {
    let tmp = setup_workspace();
    rig()
        .current_dir(tmp.path())
        .args(["install", "mobo_001", "--node", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no open mount node"));
}

#[test]
fn test_power_overload_is_advisory_not_blocking() {
    let tmp = setup_workspace();
    install(&tmp, "mobo_001");
    install(&tmp, "cpu_001");
    install(&tmp, "psu_001");
    // 80 + 253 + 450 = 783W of 850W: fits. Status should be clean.
    install(&tmp, "gpu_001");
    rig()
        .current_dir(tmp.path())
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("783W"))
        .stdout(predicate::str::contains("power_overload").not());
}

#[test]
fn test_remove_part_and_unknown_noop() {
    let tmp = setup_workspace();
    install(&tmp, "mobo_001");
    rig()
        .current_dir(tmp.path())
        .args(["remove", "mobo_001"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed"));
    rig()
        .current_dir(tmp.path())
        .args(["remove", "mobo_001"])
        .assert()
        .success()
        .stdout(predicate::str::contains("was not installed"));
}

// ============================================================================
// Nodes / select
// ============================================================================

#[test]
fn test_nodes_on_empty_build() {
    let tmp = setup_workspace();
    rig()
        .current_dir(tmp.path())
        .args(["nodes", "-f", "id"])
        .assert()
        .success()
        .stdout(predicate::str::diff("motherboard_slot\npsu_slot\n"));
}

#[test]
fn test_nodes_after_motherboard() {
    let tmp = setup_workspace();
    install(&tmp, "mobo_001");
    rig()
        .current_dir(tmp.path())
        .args(["nodes", "-f", "id"])
        .assert()
        .success()
        .stdout(predicate::str::diff(
            "cpu_socket\npcie_slot_1\nram_slot_1\nram_slot_2\npsu_slot\n",
        ));
}

#[test]
fn test_select_then_install_uses_node() {
    let tmp = setup_workspace();
    install(&tmp, "mobo_001");
    install(&tmp, "ram_001");
    rig()
        .current_dir(tmp.path())
        .args(["select", "ram_slot_2"])
        .assert()
        .success();

    // Second stick of the same kit is allowed; it goes into the selection.
    let tmp_path = tmp.path();
    fs::copy(
        tmp_path.join("catalog/ram_001.json"),
        tmp_path.join("catalog/ram_002.json"),
    )
    .unwrap();
    let doc = fs::read_to_string(tmp_path.join("catalog/ram_002.json")).unwrap();
    fs::write(
        tmp_path.join("catalog/ram_002.json"),
        doc.replace("ram_001", "ram_002"),
    )
    .unwrap();

    rig()
        .current_dir(tmp_path)
        .args(["install", "ram_002"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ram_slot_2"));
}

#[test]
fn test_select_unknown_node_fails() {
    let tmp = setup_workspace();
    rig()
        .current_dir(tmp.path())
        .args(["select", "cpu_socket"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no open mount node"));
}

// ============================================================================
// Status / clear / reset
// ============================================================================

#[test]
fn test_status_empty_build() {
    let tmp = setup_workspace();
    rig()
        .current_dir(tmp.path())
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("No parts installed"));
}

#[test]
fn test_status_json_shape() {
    let tmp = setup_workspace();
    install(&tmp, "mobo_001");
    let output = rig()
        .current_dir(tmp.path())
        .args(["status", "-f", "json"])
        .output()
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["stats"]["total_wattage"], 80);
    assert_eq!(json["parts"][0]["part_id"], "mobo_001");
    assert!(json["open_nodes"].as_array().unwrap().len() >= 4);
}

#[test]
fn test_clear_wipes_pending_notice() {
    let tmp = setup_workspace();
    install(&tmp, "psu_001");
    // Rejected duplicate leaves a pending notice in the session.
    rig()
        .current_dir(tmp.path())
        .args(["install", "psu_001"])
        .assert()
        .failure();
    rig()
        .current_dir(tmp.path())
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("duplicate_category"));
    rig()
        .current_dir(tmp.path())
        .arg("clear")
        .assert()
        .success()
        .stdout(predicate::str::contains("Cleared 1 notice"));
    rig()
        .current_dir(tmp.path())
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("duplicate_category").not());
}

#[test]
fn test_reset_requires_confirmation() {
    let tmp = setup_workspace();
    install(&tmp, "mobo_001");
    rig()
        .current_dir(tmp.path())
        .arg("reset")
        .assert()
        .failure();
    rig()
        .current_dir(tmp.path())
        .args(["reset", "--yes"])
        .assert()
        .success();
    rig()
        .current_dir(tmp.path())
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("No parts installed"));
}

// ============================================================================
// Build save / list / show / load
// ============================================================================

#[test]
fn test_build_save_list_show() {
    let tmp = setup_workspace();
    install(&tmp, "mobo_001");
    install(&tmp, "cpu_001");
    let id = save_build(&tmp, "Plex Server");

    rig()
        .current_dir(tmp.path())
        .args(["build", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Plex Server"))
        .stdout(predicate::str::contains("333W"));

    rig()
        .current_dir(tmp.path())
        .args(["build", "show", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("cpu_001"))
        .stdout(predicate::str::contains("$878"));
}

#[test]
fn test_build_document_has_minimal_shape() {
    let tmp = setup_workspace();
    install(&tmp, "mobo_001");
    let id = save_build(&tmp, "Shape Check");

    let doc = fs::read_to_string(tmp.path().join(format!("builds/{}.json", id))).unwrap();
    let json: serde_json::Value = serde_json::from_str(&doc).unwrap();
    assert_eq!(json["name"], "Shape Check");
    assert_eq!(json["parts"][0]["part_id"], "mobo_001");
    assert_eq!(json["parts"][0]["node_id"], "motherboard_slot");
    // Placements only: no duplicated specs or prices in the document.
    assert!(doc.find("specs").is_none());
    assert!(doc.find("price_estimate").is_none());
}

#[test]
fn test_build_load_replaces_session() {
    let tmp = setup_workspace();
    install(&tmp, "mobo_001");
    install(&tmp, "cpu_001");
    let id = save_build(&tmp, "Checkpoint");

    rig()
        .current_dir(tmp.path())
        .args(["reset", "--yes"])
        .assert()
        .success();
    rig()
        .current_dir(tmp.path())
        .args(["build", "load", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 parts"));
    rig()
        .current_dir(tmp.path())
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("333W"));
}

#[test]
fn test_build_load_skips_retired_parts() {
    let tmp = setup_workspace();
    install(&tmp, "mobo_001");
    install(&tmp, "cpu_001");
    let id = save_build(&tmp, "Aging Rig");

    fs::remove_file(tmp.path().join("catalog/cpu_001.json")).unwrap();

    rig()
        .current_dir(tmp.path())
        .args(["build", "load", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 part no longer in the catalog"));
    rig()
        .current_dir(tmp.path())
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("mobo_001"))
        .stdout(predicate::str::contains("cpu_001").not());
}

#[test]
fn test_build_save_failure_records_notice() {
    let tmp = setup_workspace();
    install(&tmp, "mobo_001");

    // A file where the builds directory should be makes every save fail.
    fs::remove_dir_all(tmp.path().join("builds")).unwrap();
    fs::write(tmp.path().join("builds"), "").unwrap();

    rig()
        .current_dir(tmp.path())
        .args(["build", "save", "Doomed"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to save build"));

    // The failure is recorded on the session, not just printed once.
    rig()
        .current_dir(tmp.path())
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("save_failed"));
}

#[test]
fn test_missing_catalog_surfaces_notice() {
    let tmp = setup_workspace();
    fs::remove_dir_all(tmp.path().join("catalog")).unwrap();

    rig()
        .current_dir(tmp.path())
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("catalog_unavailable"));
}

#[test]
fn test_build_load_unknown_id_fails() {
    let tmp = setup_workspace();
    rig()
        .current_dir(tmp.path())
        .args(["build", "load", "BLD-01HQ3K4N5M6P7R8S9T0VWXYZAB"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

// ============================================================================
// Session persistence across invocations
// ============================================================================

#[test]
fn test_session_survives_invocations() {
    let tmp = setup_workspace();
    install(&tmp, "mobo_001");
    install(&tmp, "cpu_001");
    install(&tmp, "ram_001");

    rig()
        .current_dir(tmp.path())
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("343W")); // 80 + 253 + 10

    // Session file persists placements only.
    let session = fs::read_to_string(tmp.path().join(".rig/session.json")).unwrap();
    assert!(session.contains("part_id"));
    assert!(!session.contains("price_estimate"));
}

#[test]
fn test_workspace_flag_overrides_discovery() {
    let tmp = setup_workspace();
    let elsewhere = TempDir::new().unwrap();
    rig()
        .current_dir(elsewhere.path())
        .args(["--workspace", tmp.path().to_str().unwrap(), "part", "list", "--count"])
        .assert()
        .success()
        .stdout(predicate::str::diff("7\n"));
}
