// crates/oidc-gate-cli/tests/common/mod.rs
// =============================================================================
// Module: CLI Test Helpers
// Description: Binary invocation and fixture writers for CLI tests.
// Purpose: Run `oidc-gate` against temporary config and input files.
// =============================================================================

#![allow(dead_code, reason = "Test helpers are selectively used across suites.")]

use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::process::Command;
use std::process::Output;

/// Result alias for CLI tests.
pub type TestResult = Result<(), String>;

/// Valid two-realm TOML configuration.
pub const VALID_TOML: &str = r#"callback-url = "http://wada/wada"

[[realms]]
name = "A"
login-url = "http://log/in/A"
client-id = "id.A"
client-secret = "s.A"

[[realms]]
name = "B"
login-url = "http://log/in/B"
client-id = "id.B"
client-secret = "s.B"
"#;

/// Returns the compiled CLI binary path.
pub fn cli_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_oidc-gate"))
}

/// Runs the CLI in `dir` with `args` and no config env override.
pub fn run_cli(dir: &Path, args: &[&str]) -> Result<Output, String> {
    Command::new(cli_binary())
        .args(args)
        .current_dir(dir)
        .env_remove("OIDC_GATE_CONFIG")
        .output()
        .map_err(|err| format!("run oidc-gate failed: {err}"))
}

/// Writes `content` to `dir/name` and returns the path as a string.
pub fn write_file(dir: &Path, name: &str, content: &str) -> Result<String, String> {
    let path = dir.join(name);
    fs::write(&path, content).map_err(|err| format!("write {name} failed: {err}"))?;
    Ok(path.display().to_string())
}

/// Returns stdout as a string.
pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// Returns stderr as a string.
pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}
