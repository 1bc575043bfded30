use assert_cmd::Command;
use std::path::Path;
use tempfile::TempDir;

/// Runs the binary inside a scratch directory so a stray `taskdeck.toml`
/// or `TASKDECK_*` variable from the host cannot leak into a test.
pub struct CliTestHarness {
    temp_dir: TempDir,
}

impl CliTestHarness {
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
        Self { temp_dir }
    }

    /// Get a Command instance configured for testing
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("taskdeck").expect("Failed to find taskdeck binary");
        cmd.current_dir(self.temp_dir.path());
        for (key, _) in std::env::vars() {
            if key.starts_with("TASKDECK_") {
                cmd.env_remove(key);
            }
        }
        cmd.env("TASKDECK_TIMEZONE", "UTC");
        cmd
    }

    /// Writes `taskdeck.toml` into the working directory of every command.
    pub fn write_config(&self, contents: &str) {
        std::fs::write(self.dir().join("taskdeck.toml"), contents)
            .expect("Failed to write config file");
    }

    pub fn dir(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Helper to run a command and assert success
    pub fn run_success(&self, args: &[&str]) -> assert_cmd::assert::Assert {
        self.command().args(args).assert().success()
    }

    /// Helper to run a command and assert failure
    pub fn run_failure(&self, args: &[&str]) -> assert_cmd::assert::Assert {
        self.command().args(args).assert().failure()
    }
}

/// Utility functions for test assertions
pub mod assertions {
    use predicates::prelude::*;

    /// Predicate to check if output contains task table headers
    pub fn has_task_table_headers() -> impl Predicate<str> {
        predicate::str::contains("ID")
            .and(predicate::str::contains("Title"))
            .and(predicate::str::contains("Status"))
            .and(predicate::str::contains("Due"))
    }

    /// Predicate to check if output contains project table headers
    pub fn has_project_table_headers() -> impl Predicate<str> {
        predicate::str::contains("Name")
            .and(predicate::str::contains("Description"))
            .and(predicate::str::contains("Tasks"))
    }

    /// Predicate to check for empty result set
    pub fn empty_result() -> impl Predicate<str> {
        predicate::str::contains("No tasks found")
    }

    /// Predicate to check for error messages
    pub fn has_error() -> impl Predicate<str> {
        predicate::str::contains("Error").or(predicate::str::contains("error"))
    }
}
