//! git integration: author identity and repository initialization

use anyhow::{Context, Result};
use std::path::Path;
use std::process::Command;
use std::time::Duration;
use tokio::process::Command as TokioCommand;
use tokio::time::timeout;

/// Upper bound for a single git invocation
const GIT_TIMEOUT: Duration = Duration::from_secs(30);

/// Check if git is installed and runnable
pub fn is_installed() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|output| output.status.success())
        .unwrap_or(false)
}

/// `user.name` from the git configuration (if set)
pub fn user_name() -> Option<String> {
    Command::new("git")
        .args(["config", "--get", "user.name"])
        .output()
        .ok()
        .and_then(|output| {
            if output.status.success() {
                String::from_utf8(output.stdout)
                    .ok()
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
            } else {
                None
            }
        })
}

/// Author offered by default: the git user name, else the login name
pub fn default_author() -> String {
    user_name()
        .or_else(|| std::env::var("USER").ok())
        .or_else(|| std::env::var("USERNAME").ok())
        .unwrap_or_default()
}

async fn run_git(dir: &Path, args: &[&str]) -> Result<()> {
    let step = format!("git {}", args.join(" "));
    let mut command = TokioCommand::new("git");
    command.args(args).current_dir(dir);
    let output = match timeout(GIT_TIMEOUT, command.output()).await {
        Ok(result) => result.with_context(|| format!("Failed to run {}", step))?,
        Err(_) => anyhow::bail!("{} timed out after {} seconds", step, GIT_TIMEOUT.as_secs()),
    };

    if !output.status.success() {
        anyhow::bail!(
            "{} failed with exit code {}: {}",
            step,
            output.status.code().unwrap_or(-1),
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }

    Ok(())
}

/// Initialize a repository in `dir`, stage everything and commit
pub async fn init_repository(dir: &Path, message: &str) -> Result<()> {
    run_git(dir, &["init", "--quiet"]).await?;
    run_git(dir, &["add", "."]).await?;
    run_git(dir, &["commit", "--quiet", "--allow-empty", "-m", message]).await?;
    Ok(())
}
