//! List Command Tests
//!
//! Verifies that `domtable list`:
//! - Hides dom0 and halted VMs by default
//! - Applies state/type toggles on top of the default filter
//! - Turns unknown field names into property columns
//! - Exits 1 with `Error: ...` when a column cannot be projected

use anyhow::Result;
use domtable_testing::TestWorld;
use domtable_testing::assertions::{
    assert_failed_with, assert_row_count, assert_row_names, cell, column_names,
};
use domtable_testing::fixtures::{DEFAULT_VISIBLE, VmFixture, snapshot};

#[test]
fn test_default_list_hides_halted_and_dom0() -> Result<()> {
    let world = TestWorld::new();

    let result = world.run(&["list", "--output", "json"])?;
    assert!(result.success(), "stderr: {}", result.stderr());

    let json = result.json()?;
    assert_row_names(&json, &DEFAULT_VISIBLE)?;
    assert_eq!(
        column_names(&json)?,
        vec!["state", "label", "name", "class", "template", "netvm_label", "netvm"]
    );
    assert_eq!(json["filter"]["excluded_states"], serde_json::json!(["Halted"]));
    assert_eq!(json["generation"], 1);

    Ok(())
}

#[test]
fn test_json_cells_carry_raw_icon_identifiers() -> Result<()> {
    let world = TestWorld::new();
    let json = world.run(&["list", "--output", "json"])?.json()?;

    assert_eq!(cell(&json, "work", "state")?, "media-playback-start");
    assert_eq!(cell(&json, "disp1234", "state")?, "system-run");
    assert_eq!(cell(&json, "work", "label")?, "appvm-blue");
    assert_eq!(cell(&json, "work", "netvm_label")?, "appvm-green");
    assert_eq!(cell(&json, "sys-net", "netvm_label")?, "process-stop");
    assert_eq!(cell(&json, "sys-net", "netvm")?, "-");

    Ok(())
}

#[test]
fn test_all_and_toggles() -> Result<()> {
    let world = TestWorld::new();

    let json = world.run(&["list", "--output", "json", "--all"])?.json()?;
    assert_row_count(&json, 6)?;

    let json = world
        .run(&["list", "--output", "json", "--toggle-state", "Halted"])?
        .json()?;
    assert_row_count(&json, 6)?;

    let json = world
        .run(&[
            "list",
            "--output",
            "json",
            "--toggle-type",
            "AppVM",
            "--toggle-state",
            "Halted",
        ])?
        .json()?;
    assert_row_names(&json, &["fedora-40", "disp1234"])?;

    Ok(())
}

#[test]
fn test_fields_are_trimmed_and_ordered() -> Result<()> {
    let world = TestWorld::new();

    let json = world
        .run(&["--fields", " name , qid,ip ", "list", "--output", "json"])?
        .json()?;
    assert_eq!(column_names(&json)?, vec!["name", "qid", "ip"]);
    assert_eq!(cell(&json, "work", "qid")?, "3");
    assert_eq!(cell(&json, "work", "ip")?, "10.137.0.7");

    Ok(())
}

#[test]
fn test_unknown_field_becomes_property_column() -> Result<()> {
    let world = TestWorld::new().with_snapshot(snapshot([
        VmFixture::new("work", "AppVM", "Running", "blue").property("kernel", "6.6.48-1"),
        VmFixture::new("vault", "AppVM", "Running", "black").property("kernel", ""),
    ]));

    let json = world
        .run(&["--fields=name,kernel", "list", "--output", "json"])?
        .json()?;
    assert_eq!(cell(&json, "work", "kernel")?, "6.6.48-1");
    assert_eq!(json["columns"][1]["property"], true);
    assert_eq!(json["columns"][1]["header"], "KERNEL");

    Ok(())
}

#[test]
fn test_missing_property_fails_the_listing() -> Result<()> {
    let world = TestWorld::new();

    let result = world.run(&["--fields=name,nosuchfield", "list"])?;
    assert_failed_with(&result, "nosuchfield")?;
    assert!(result.stdout().is_empty());

    let result = world.run(&["--format", "disk", "list"])?;
    assert_failed_with(&result, "disk")?;

    Ok(())
}

#[test]
fn test_presets() -> Result<()> {
    let world = TestWorld::new();

    let json = world
        .run(&["--format", "network", "list", "--output", "json"])?
        .json()?;
    assert_eq!(cell(&json, "sys-firewall", "ipback")?, "10.138.0.1");
    assert_eq!(cell(&json, "work", "ipback")?, "-");

    let json = world
        .run(&["--format", "full", "list", "--output", "json"])?
        .json()?;
    assert_eq!(cell(&json, "disp1234", "xid")?, "9");
    assert_eq!(cell(&json, "disp1234", "uuid")?, "-");

    Ok(())
}

#[test]
fn test_fields_conflict_with_format() -> Result<()> {
    let world = TestWorld::new();
    let result = world.run(&["--fields", "name", "--format", "full", "list"])?;
    assert_failed_with(&result, "cannot be used together")?;
    Ok(())
}

#[test]
fn test_plain_output_uses_glyphs() -> Result<()> {
    let world = TestWorld::new();
    let result = world.run(&["list"])?;
    assert!(result.success(), "stderr: {}", result.stderr());

    let lines: Vec<&str> = result.stdout().lines().collect();
    assert_eq!(lines.len(), 1 + DEFAULT_VISIBLE.len());
    assert!(lines[0].contains("NAME"));
    assert!(!lines[0].contains("STATE"), "icon columns have blank headers");
    assert!(lines[1].starts_with('▶'));
    assert!(lines[1].contains("sys-net"));
    assert!(lines[1].contains('✕'));
    assert!(lines[4].starts_with('⚙'));
    assert!(!result.stdout().contains('\u{1b}'), "no color when piped");

    Ok(())
}

#[test]
fn test_unreadable_source_is_fatal() -> Result<()> {
    let world = TestWorld::new();
    std::fs::remove_file(world.snapshot_path())?;

    let result = world.run(&["list"])?;
    assert_failed_with(&result, "domains.json")?;

    Ok(())
}

#[test]
fn test_source_from_config_file() -> Result<()> {
    let world = TestWorld::new();
    let alternate = world.temp_dir().join("alternate.json");
    domtable_testing::fixtures::write_snapshot(
        &alternate,
        &snapshot([VmFixture::new("only-one", "StandaloneVM", "Running", "orange")]),
    )?;
    let world = world.with_config(&format!(
        "source = {:?}\n",
        alternate.display().to_string()
    ));

    // --source from the harness wins over config
    let json = world.run(&["list", "--output", "json"])?.json()?;
    assert_row_count(&json, DEFAULT_VISIBLE.len())?;

    let mut cmd = std::process::Command::new(env!("CARGO_BIN_EXE_domtable"));
    let output = cmd
        .arg("--data-dir")
        .arg(world.data_dir())
        .args(["list", "--output", "json"])
        .env_remove("DOMTABLE_PATH")
        .output()?;
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_row_names(&json, &["only-one"])?;

    Ok(())
}

#[test]
fn test_usage_errors_exit_one() -> Result<()> {
    let world = TestWorld::new();

    let result = world.run(&["--format", "bogus", "list"])?;
    assert_eq!(result.code(), Some(1), "stderr: {}", result.stderr());
    assert!(result.stderr().contains("bogus"));

    let result = world.run(&["list", "--toggle-state", "halted"])?;
    assert_eq!(result.code(), Some(1), "stderr: {}", result.stderr());
    assert!(result.stderr().contains("halted"));
    assert!(result.stdout().is_empty());

    let result = world.run(&["--help"])?;
    assert!(result.success());

    Ok(())
}
