//! Common test utilities for Mathvox CLI tests.
//!
//! Provides `TestEnv`, an isolated environment with temp directories for
//! working files and HOME, plus helpers to run the mathvox binary with
//! controlled environment variables and stdin.

use std::io::Write as _;
use std::path::PathBuf;
use std::process::{Command, Output, Stdio};

use tempfile::TempDir;

/// Result of running a mathvox CLI command
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

/// Isolated test environment.
///
/// HOME and XDG_CONFIG_HOME point at a scratch directory so a developer's
/// real `~/.config/mathvox/config.toml` never leaks into a test, and the
/// MATHVOX_* variables are cleared unless a test sets them explicitly.
pub struct TestEnv {
    pub work_dir: TempDir,
    home_dir: TempDir,
    bin: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            work_dir: TempDir::new().expect("create work dir"),
            home_dir: TempDir::new().expect("create home dir"),
            bin: PathBuf::from(env!("CARGO_BIN_EXE_mathvox")),
        }
    }

    /// Path relative to the scratch working directory
    pub fn work_path(&self, relative: &str) -> PathBuf {
        self.work_dir.path().join(relative)
    }

    fn command(&self, args: &[&str], env_vars: &[(&str, &str)]) -> Command {
        let mut cmd = Command::new(&self.bin);
        cmd.current_dir(self.work_dir.path())
            .args(args)
            .env("HOME", self.home_dir.path())
            .env("XDG_CONFIG_HOME", self.home_dir.path())
            .env_remove("MATHVOX_MATHMAPS_DIR")
            .env_remove("MATHVOX_LOCALE")
            .env_remove("MATHVOX_CACHE");
        for (key, value) in env_vars {
            cmd.env(key, value);
        }
        cmd
    }

    pub fn run(&self, args: &[&str]) -> TestResult {
        self.run_with_env(args, &[])
    }

    pub fn run_with_env(&self, args: &[&str], env_vars: &[(&str, &str)]) -> TestResult {
        let output = self
            .command(args, env_vars)
            .output()
            .expect("failed to execute mathvox");
        to_result(output)
    }

    /// Run with the given text piped to stdin.
    pub fn run_with_stdin(&self, args: &[&str], input: &str) -> TestResult {
        let mut child = self
            .command(args, &[])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .expect("failed to spawn mathvox");
        child
            .stdin
            .as_mut()
            .expect("stdin piped")
            .write_all(input.as_bytes())
            .expect("write stdin");
        let output = child.wait_with_output().expect("wait for mathvox");
        to_result(output)
    }
}

fn to_result(output: Output) -> TestResult {
    TestResult {
        success: output.status.success(),
        exit_code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    }
}
