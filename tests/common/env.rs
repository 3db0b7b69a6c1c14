//! Test environment for isolated gardener runs.
//!
//! Provides `TestEnv` - a temp source tree and a temp config home, plus
//! helpers to run the gardener binary against them.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Result of running the gardener binary
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    /// Check if command succeeded
    #[allow(dead_code)]
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Combine stdout and stderr
    #[allow(dead_code)]
    pub fn combined_output(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }
}

/// Isolated test environment.
///
/// The config home is pointed at an empty temp directory so a developer's
/// own `gardener/config.toml` never leaks into a test.
pub struct TestEnv {
    pub root: TempDir,
    pub config_home: TempDir,
    bin: PathBuf,
}

#[allow(dead_code)]
impl TestEnv {
    pub fn new() -> Self {
        Self {
            root: TempDir::new().expect("Failed to create temp root"),
            config_home: TempDir::new().expect("Failed to create temp config home"),
            bin: PathBuf::from(env!("CARGO_BIN_EXE_gardener")),
        }
    }

    /// Get path relative to the tree root
    pub fn path(&self, relative: &str) -> PathBuf {
        self.root.path().join(relative)
    }

    /// Write a file into the tree, creating parents
    pub fn write(&self, relative: &str, content: &str) -> &Self {
        let full_path = self.path(relative);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create directories");
        }
        std::fs::write(&full_path, content).expect("Failed to write file");
        self
    }

    /// Create (possibly nested) directories in the tree
    pub fn mkdir(&self, relative: &str) -> &Self {
        std::fs::create_dir_all(self.path(relative)).expect("Failed to create directory");
        self
    }

    /// Read a file from the tree
    pub fn read(&self, relative: &str) -> String {
        std::fs::read_to_string(self.path(relative))
            .unwrap_or_else(|e| panic!("Failed to read {}: {}", relative, e))
    }

    /// Write the user-level config file
    pub fn write_user_config(&self, content: &str) {
        let dir = self.config_home.path().join("gardener");
        std::fs::create_dir_all(&dir).expect("Failed to create config dir");
        std::fs::write(dir.join("config.toml"), content).expect("Failed to write config");
    }

    /// Run gardener with the tree root as working directory
    pub fn run(&self, args: &[&str]) -> TestResult {
        self.run_with_env(args, &[])
    }

    /// Run gardener with extra environment variables
    pub fn run_with_env(&self, args: &[&str], env_vars: &[(&str, &str)]) -> TestResult {
        self.run_from_with_env(self.root.path(), args, env_vars)
    }

    /// Run gardener from a specific directory
    pub fn run_from_with_env(
        &self,
        cwd: &Path,
        args: &[&str],
        env_vars: &[(&str, &str)],
    ) -> TestResult {
        let mut cmd = Command::new(&self.bin);
        cmd.current_dir(cwd)
            .args(args)
            .env("XDG_CONFIG_HOME", self.config_home.path())
            .env("HOME", self.config_home.path())
            .env_remove("GARDENER_BUILD_FILE_NAMES")
            .env_remove("GARDENER_RULE_KIND")
            .env_remove("GARDENER_MANAGED_TAG")
            .env_remove("GARDENER_FOLLOW_SYMLINKS")
            .env_remove("GARDENER_VERBOSITY");

        for (key, value) in env_vars {
            cmd.env(key, value);
        }

        let output = cmd.output().expect("Failed to execute gardener");
        output_to_result(output)
    }
}

fn output_to_result(output: Output) -> TestResult {
    TestResult {
        success: output.status.success(),
        exit_code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    }
}
