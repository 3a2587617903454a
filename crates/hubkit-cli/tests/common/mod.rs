use std::path::Path;
use std::process::{Command, Output};

/// Build a CLI command with an isolated HOME and no inherited hubkit settings.
fn command(args: &[&str], home: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_hubkit"));
    cmd.args(args);
    cmd.env("HOME", home);
    cmd.env("XDG_CONFIG_HOME", home.join("config"));
    cmd.env_remove("HUBKIT_API_URL");
    cmd.env_remove("HUBKIT_TOKEN");
    cmd.env_remove("RUST_LOG");
    cmd
}

/// Run the CLI with a custom HOME and only the config file as settings.
pub fn run_cli_with_home(args: &[&str], home: &Path) -> Output {
    command(args, home).output().expect("Failed to execute CLI")
}

/// Run the CLI against an API given through the environment.
pub fn run_cli_with_env(args: &[&str], home: &Path, api_url: &str) -> Output {
    let mut cmd = command(args, home);
    cmd.env("HUBKIT_API_URL", api_url);
    cmd.env("HUBKIT_TOKEN", "test-token");
    cmd.output().expect("Failed to execute CLI")
}

/// Run the CLI against an API given through the environment and expect success.
pub fn run_cli_with_env_success(args: &[&str], home: &Path, api_url: &str) -> String {
    let output = run_cli_with_env(args, home, api_url);
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!("CLI command failed: {:?}\nstderr: {}", args, stderr);
    }
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Parse every stdout line as a JSON document.
pub fn json_lines(stdout: &str) -> Vec<serde_json::Value> {
    stdout
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| serde_json::from_str(line).expect("stdout line is not JSON"))
        .collect()
}
