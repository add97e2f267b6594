//! Watch Console Tests
//!
//! Runs `domtable watch --mode console` in the background and checks that
//! touching the state file reprints the table from a fresh snapshot.

use anyhow::Result;
use domtable_testing::TestWorld;
use domtable_testing::fixtures::{VmFixture, sample_vms, snapshot};
use domtable_testing::process::BackgroundProcess;
use std::time::Duration;

const STARTUP: Duration = Duration::from_secs(10);

#[test]
fn test_state_change_reprints_table() -> Result<()> {
    let world = TestWorld::new();
    let mut cmd = world.std_command(env!("CARGO_BIN_EXE_domtable"));
    cmd.args(["watch", "--mode", "console"]);

    let mut process = BackgroundProcess::spawn_piped(cmd)?;
    let lines = process.stdout_lines().expect("stdout is piped");

    let first = lines
        .wait_for(STARTUP, |line| line.is_empty())
        .expect("initial table printed");
    assert!(first[0].contains("generation 1: 4 of 6 domains"), "{first:?}");
    assert!(first.iter().any(|line| line.contains("sys-firewall")));

    let mut vms = sample_vms();
    vms.push(
        VmFixture::new("banking", "AppVM", "Running", "purple")
            .netvm("sys-firewall")
            .template("fedora-40"),
    );
    world.write_snapshot(&snapshot(vms))?;

    // The monitor attaches after the first print; retouch until it reports
    let mut reprinted = None;
    for _ in 0..20 {
        world.touch_state_file()?;
        reprinted = lines.wait_for(Duration::from_millis(500), |line| {
            line.contains("5 of 7 domains")
        });
        if reprinted.is_some() {
            break;
        }
    }
    assert!(reprinted.is_some(), "table was not reprinted");

    let table = lines
        .wait_for(STARTUP, |line| line.is_empty())
        .expect("reprinted table");
    assert!(table.iter().any(|line| line.contains("banking")));

    process.kill()?;
    Ok(())
}

#[test]
fn test_non_tty_tui_falls_back_to_console() -> Result<()> {
    let world = TestWorld::new();
    let mut cmd = world.std_command(env!("CARGO_BIN_EXE_domtable"));
    cmd.args(["watch", "--all"]);

    let mut process = BackgroundProcess::spawn_piped(cmd)?;
    let lines = process.stdout_lines().expect("stdout is piped");

    let first = lines
        .wait_for(STARTUP, |line| line.is_empty())
        .expect("console table printed");
    assert!(first[0].contains("6 of 6 domains"), "{first:?}");

    Ok(())
}
