//! TestWorld pattern for declarative integration test setup.
//!
//! Provides a fluent interface for:
//! - Creating isolated test environments
//! - Writing domain snapshots and touching the watched state file
//! - Executing CLI commands with proper context

use anyhow::Result;
use assert_cmd::Command;
use serde_json::Value;
use std::collections::HashMap;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::fixtures;

/// Declarative test environment builder.
///
/// # Example
/// ```no_run
/// use domtable_testing::TestWorld;
///
/// let world = TestWorld::new();
/// let result = world.run(&["list", "--output", "json"]).unwrap();
/// assert!(result.success());
/// ```
pub struct TestWorld {
    temp_dir: TempDir,
    data_dir: PathBuf,
    snapshot_path: PathBuf,
    state_file: PathBuf,
    env_vars: HashMap<String, String>,
}

impl Default for TestWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl TestWorld {
    /// Create a new isolated test environment seeded with the sample snapshot.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let base_path = temp_dir.path().to_path_buf();
        let data_dir = base_path.join(".domtable");
        let snapshot_path = base_path.join("domains.json");
        let state_file = base_path.join("qubes").join("qubes.xml");

        std::fs::create_dir_all(&data_dir).expect("Failed to create data dir");
        std::fs::create_dir_all(state_file.parent().expect("state file has a parent"))
            .expect("Failed to create state dir");
        std::fs::write(&state_file, "<qubes/>").expect("Failed to write state file");
        fixtures::write_snapshot(&snapshot_path, &fixtures::sample_snapshot())
            .expect("Failed to write snapshot");

        Self {
            temp_dir,
            data_dir,
            snapshot_path,
            state_file,
            env_vars: HashMap::new(),
        }
    }

    /// Replace the sample snapshot.
    pub fn with_snapshot(self, snapshot: Value) -> Self {
        self.write_snapshot(&snapshot)
            .expect("Failed to write snapshot");
        self
    }

    /// Write `config.toml` into the data directory.
    pub fn with_config(self, toml: &str) -> Self {
        std::fs::write(self.data_dir.join("config.toml"), toml).expect("Failed to write config");
        self
    }

    /// Set an environment variable for CLI execution.
    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env_vars.insert(key.into(), value.into());
        self
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn snapshot_path(&self) -> &Path {
        &self.snapshot_path
    }

    pub fn state_file(&self) -> &Path {
        &self.state_file
    }

    pub fn temp_dir(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Overwrite the snapshot in place.
    pub fn write_snapshot(&self, snapshot: &Value) -> Result<()> {
        fixtures::write_snapshot(&self.snapshot_path, snapshot)
    }

    /// Rewrite the state file so a running monitor fires.
    pub fn touch_state_file(&self) -> Result<()> {
        let stamp = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)?
            .as_nanos();
        std::fs::write(&self.state_file, format!("<qubes stamp=\"{}\"/>", stamp))?;
        Ok(())
    }

    /// Configure a CLI command with this test environment's settings.
    ///
    /// The caller must provide the base command (e.g., from `Command::cargo_bin("domtable")`).
    /// This method configures it with the data-dir, snapshot, state file and env vars.
    pub fn configure_command<'a>(&self, cmd: &'a mut Command) -> &'a mut Command {
        cmd.arg("--data-dir")
            .arg(&self.data_dir)
            .arg("--source")
            .arg(&self.snapshot_path)
            .arg("--state-file")
            .arg(&self.state_file)
            .current_dir(self.temp_dir.path())
            .env_remove("RUST_LOG")
            .env_remove("DOMTABLE_PATH");

        for (key, value) in &self.env_vars {
            cmd.env(key, value);
        }

        cmd
    }

    /// Build a plain `std::process::Command` for long-running invocations.
    ///
    /// Integration tests pass `env!("CARGO_BIN_EXE_domtable")`.
    pub fn std_command(&self, bin_path: impl AsRef<OsStr>) -> std::process::Command {
        let mut cmd = std::process::Command::new(bin_path);
        cmd.arg("--data-dir")
            .arg(&self.data_dir)
            .arg("--source")
            .arg(&self.snapshot_path)
            .arg("--state-file")
            .arg(&self.state_file)
            .current_dir(self.temp_dir.path())
            .env_remove("RUST_LOG")
            .env_remove("DOMTABLE_PATH");

        for (key, value) in &self.env_vars {
            cmd.env(key, value);
        }

        cmd
    }

    /// Execute a command using the project's binary and return the result.
    ///
    /// # Example
    /// ```no_run
    /// # use domtable_testing::TestWorld;
    /// let world = TestWorld::new();
    /// let result = world.run(&["columns"]).unwrap();
    /// assert!(result.success());
    /// ```
    #[allow(deprecated)]
    pub fn run(&self, args: &[&str]) -> Result<CliResult> {
        let mut cmd = Command::cargo_bin("domtable")
            .map_err(|e| anyhow::anyhow!("Failed to find domtable binary: {}", e))?;

        self.configure_command(&mut cmd);
        cmd.args(args);

        let output = cmd.output()?;

        Ok(CliResult {
            status: output.status,
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }
}

/// Result of a CLI command execution.
#[derive(Debug)]
pub struct CliResult {
    pub status: std::process::ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl CliResult {
    /// Check if the command succeeded.
    pub fn success(&self) -> bool {
        self.status.success()
    }

    pub fn code(&self) -> Option<i32> {
        self.status.code()
    }

    /// Parse stdout as JSON.
    pub fn json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::from_str(&self.stdout)?)
    }

    /// Get stdout as a string.
    pub fn stdout(&self) -> &str {
        &self.stdout
    }

    /// Get stderr as a string.
    pub fn stderr(&self) -> &str {
        &self.stderr
    }
}
