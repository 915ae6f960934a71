//! Pre-release repository checks

use tracing::{debug, info, instrument};

use crate::config::{Config, GitConfig};
use crate::error::{PreconditionError, Result};
use crate::version::Version;

/// Read-only view of the repository used by the release gate
pub trait RepositoryProbe {
    /// Current branch name, or `None` for a detached or unborn HEAD
    fn current_branch(&self) -> Result<Option<String>>;

    /// Number of local commits missing from `remote/branch`
    fn unpushed_commits(&self, remote: &str, branch: &str) -> Result<usize>;

    /// Number of `remote/branch` commits missing locally
    fn unpulled_commits(&self, remote: &str, branch: &str) -> Result<usize>;

    /// Paths with staged, unstaged, or untracked changes
    fn uncommitted_changes(&self) -> Result<Vec<String>>;
}

/// Refuse to release unless the repository is on the release branch, level
/// with its remote-tracking branch, and clean.
///
/// Checks run in that order and stop at the first failure.
#[instrument(skip_all, fields(remote = %git.remote, branch = %git.branch))]
pub fn verify_repository(probe: &dyn RepositoryProbe, git: &GitConfig) -> Result<()> {
    let current = probe.current_branch()?;
    let on_branch = current
        .as_deref()
        .is_some_and(|b| b.trim().eq_ignore_ascii_case(&git.branch));
    if !on_branch {
        return Err(PreconditionError::WrongBranch {
            expected: git.branch.clone(),
            actual: current.unwrap_or_else(|| "detached HEAD".to_string()),
        }
        .into());
    }

    let unpushed = probe.unpushed_commits(&git.remote, &git.branch)?;
    if unpushed > 0 {
        return Err(PreconditionError::UnpushedCommits {
            count: unpushed,
            upstream: git.upstream(),
        }
        .into());
    }

    let unpulled = probe.unpulled_commits(&git.remote, &git.branch)?;
    if unpulled > 0 {
        return Err(PreconditionError::UnpulledCommits {
            count: unpulled,
            upstream: git.upstream(),
        }
        .into());
    }

    let changes = probe.uncommitted_changes()?;
    if !changes.is_empty() {
        debug!(count = changes.len(), "working tree is dirty");
        return Err(PreconditionError::DirtyWorkingTree { files: changes }.into());
    }

    info!("repository is ready for release");
    Ok(())
}

/// Warning printed before asking for confirmation
pub fn release_warning(config: &Config, current: &Version, next: &Version) -> String {
    let name = config.project_name();
    format!(
        "WARNING: this will increment the {name} version from {current} to {next}. \
         This involves pushing a new commit to {branch} and releasing a new {registry} \
         distribution, changes you CANNOT TAKE BACK. This WILL FAIL if you do not have \
         credentials to push to the {name} repository or to publish to the {registry} registry.",
        branch = config.git.branch,
        registry = config.publish.registry_label(),
    )
}
