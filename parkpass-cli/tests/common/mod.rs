//! Common test utilities for CLI integration tests.
//!
//! Every command runs against an isolated data directory, with the
//! `PARKPASS_*` environment cleared so the host's settings never leak in.

use std::path::PathBuf;

use assert_cmd::Command;
use serde_json::Value;
use tempfile::TempDir;

const PARKPASS_ENV: [&str; 8] = [
    "PARKPASS_DATA_DIR",
    "PARKPASS_CONFIG",
    "PARKPASS_BUSY_TIMEOUT",
    "PARKPASS_DISABLE_AUTOINIT",
    "PARKPASS_LOG_MODE",
    "PARKPASS_MAXIMUM_LOCK_WAIT_SECONDS",
    "PARKPASS_OUTPUT_FORMAT",
    "PARKPASS_DEFAULT_SLOT_GROUP",
];

/// Test environment with isolated data directory.
pub struct TestEnv {
    /// Temporary directory (kept alive for the duration of the test)
    #[allow(dead_code)]
    temp_dir: TempDir,
    /// Path to the temporary directory
    pub temp_path: PathBuf,
    /// Path to the parkpass data directory
    pub data_dir: PathBuf,
}

/// Exit status and parsed stdout of one invocation.
#[allow(dead_code)]
pub struct Reply {
    pub code: i32,
    pub json: Value,
    pub stderr: String,
}

#[allow(dead_code)]
impl TestEnv {
    /// Create a new test environment. The data directory is not created.
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let temp_path = temp_dir.path().to_path_buf();
        let data_dir = temp_path.join("parkpass-data");

        Self {
            temp_dir,
            temp_path,
            data_dir,
        }
    }

    /// A command with only the binary and a clean environment.
    pub fn command_bare(&self) -> Command {
        let mut cmd = Command::cargo_bin("parkpass").expect("Failed to find parkpass binary");
        for name in PARKPASS_ENV {
            cmd.env_remove(name);
        }
        cmd
    }

    /// A command with `--data-dir` pointing at this environment.
    pub fn command(&self) -> Command {
        let mut cmd = self.command_bare();
        cmd.arg("--data-dir").arg(&self.data_dir);
        cmd
    }

    /// Runs `args` and parses stdout as one JSON document.
    pub fn run(&self, args: &[&str]) -> Reply {
        let output = self.command().args(args).output().expect("Failed to run parkpass");
        let stdout = String::from_utf8(output.stdout).expect("Invalid UTF-8 in output");
        let json = serde_json::from_str(stdout.trim())
            .unwrap_or_else(|e| panic!("stdout is not JSON ({e}): {stdout}"));
        Reply {
            code: output.status.code().unwrap_or(-1),
            json,
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }

    /// Runs `args` and asserts success.
    pub fn run_ok(&self, args: &[&str]) -> Value {
        let reply = self.run(args);
        assert_eq!(
            reply.code, 0,
            "parkpass {args:?} failed: {} {}",
            reply.json, reply.stderr
        );
        assert_eq!(reply.json["status"], "success");
        reply.json
    }

    /// Provisions a slot.
    pub fn add_slot(&self, code: &str, slot_type: &str, role: &str) {
        self.run_ok(&[
            "add-slot",
            "--slot-code",
            code,
            "--slot-type",
            slot_type,
            "--role",
            role,
        ]);
    }

    /// Provisions a slot in a group.
    pub fn add_grouped_slot(&self, code: &str, slot_type: &str, role: &str, group: &str) {
        self.run_ok(&[
            "add-slot",
            "--slot-code",
            code,
            "--slot-type",
            slot_type,
            "--role",
            role,
            "--group",
            group,
        ]);
    }

    /// Arguments for a valid daily visitor pass on `slot`.
    pub fn create_pass_args(slot: &str) -> Vec<String> {
        [
            "create-pass",
            "--role",
            "visitor",
            "--name",
            "Ada Lovelace",
            "--email",
            "ada@example.com",
            "--mobile",
            "+15550100",
            "--pass-type",
            "daily",
            "--slot-code",
            slot,
            "--start-date",
            "2024-05-01",
            "--end-date",
            "2024-05-01",
            "--start-time",
            "09:00",
            "--end-time",
            "17:00",
        ]
        .iter()
        .map(ToString::to_string)
        .collect()
    }

    /// Issues a pass on `slot` and returns its id.
    pub fn create_pass(&self, slot: &str) -> i64 {
        let args = Self::create_pass_args(slot);
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        let json = self.run_ok(&args);
        json["pass_id"].as_i64().expect("pass_id in reply")
    }

    /// Current status of a pass.
    pub fn pass_status(&self, id: i64) -> Value {
        self.run_ok(&["pass-status", &id.to_string()])
    }

    /// Current status label of a slot.
    pub fn slot_status(&self, code: &str) -> String {
        let output = self
            .command()
            .args(["list-slots", "--format", "json"])
            .output()
            .expect("Failed to list slots");
        let slots: Value = serde_json::from_slice(&output.stdout).expect("JSON slot list");
        slots
            .as_array()
            .expect("array")
            .iter()
            .find(|s| s["code"] == code)
            .map(|s| s["status"].as_str().unwrap_or_default().to_string())
            .unwrap_or_else(|| panic!("slot {code} not listed"))
    }
}
