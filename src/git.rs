//! Lookup of the source tree's current commit.

use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;
use tracing::debug;
use tracing::warn;

/// The commit recorded when the lookup fails.
pub const UNKNOWN_COMMIT: &str = "UNKNOWN";

/// Gets the commit hash checked out in `repo_dir`.
///
/// Runs `git rev-parse HEAD` in the directory. A missing `git`, a directory
/// that is not a repository, a failing exit status or a lookup that outlives
/// `timeout` all yield [`UNKNOWN_COMMIT`].
pub async fn commit_hash(repo_dir: &Path, timeout: Duration) -> String {
    let lookup = Command::new("git")
        .args(["rev-parse", "HEAD"])
        .current_dir(repo_dir)
        .stdin(Stdio::null())
        .stderr(Stdio::null())
        .kill_on_drop(true)
        .output();

    match tokio::time::timeout(timeout, lookup).await {
        Ok(Ok(output)) if output.status.success() => {
            let commit = String::from_utf8_lossy(&output.stdout).trim().to_string();
            debug!(%commit, "resolved commit of `{dir}`", dir = repo_dir.display());
            commit
        }
        Ok(Ok(output)) => {
            debug!(
                status = %output.status,
                "`git rev-parse` failed in `{dir}`",
                dir = repo_dir.display()
            );
            UNKNOWN_COMMIT.to_string()
        }
        Ok(Err(e)) => {
            warn!("failed to run `git` in `{dir}`: {e}", dir = repo_dir.display());
            UNKNOWN_COMMIT.to_string()
        }
        Err(_) => {
            warn!(
                "timed out after {secs}s looking up the commit of `{dir}`",
                secs = timeout.as_secs(),
                dir = repo_dir.display()
            );
            UNKNOWN_COMMIT.to_string()
        }
    }
}
