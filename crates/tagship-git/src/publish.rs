//! Commit, tag, and push the version bump

use std::path::PathBuf;

use tracing::{info, instrument};

use tagship_core::config::Config;
use tagship_core::{CommandSpec, Executor, Result, Version};

/// Tags created for a release
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseTags {
    /// Immutable per-version tag, e.g. `v1.3.0`
    pub release: String,
    /// Moving alias tag, e.g. `stable`
    pub stable: Option<String>,
}

/// Runs the git CLI steps of a release in the repository root
pub struct VcsPublisher<'a> {
    root: PathBuf,
    config: &'a Config,
}

impl<'a> VcsPublisher<'a> {
    /// Create a publisher for the repository at `root`
    pub fn new(root: impl Into<PathBuf>, config: &'a Config) -> Self {
        Self {
            root: root.into(),
            config,
        }
    }

    fn git(&self) -> CommandSpec {
        CommandSpec::new("git").current_dir(&self.root)
    }

    /// Commit all tracked changes and push the release branch
    #[instrument(skip_all)]
    pub fn commit_and_push(&self, executor: &Executor<'_>) -> Result<()> {
        let git = &self.config.git;

        executor.reporter().step("Committing the version bump");
        executor.mutate(&self.git().args(["commit", "-a", "-m", git.commit_message.as_str()]))?;

        executor
            .reporter()
            .step(&format!("Pushing to {}", git.upstream()));
        executor.mutate(&self.git().args(["push", git.remote.as_str(), git.branch.as_str()]))?;

        info!(remote = %git.remote, branch = %git.branch, "committed and pushed");
        Ok(())
    }

    /// Create the release tag, move the stable tag, and push both
    #[instrument(skip_all, fields(version = %version))]
    pub fn tag_release(&self, executor: &Executor<'_>, version: &Version) -> Result<ReleaseTags> {
        let version = version.to_string();
        let tags = ReleaseTags {
            release: self.config.tag_name(&version),
            stable: self.config.stable_tag().map(str::to_string),
        };

        executor
            .reporter()
            .step(&format!("Tagging release {}", tags.release));
        let message = self.config.tag_message(&version);
        executor.mutate(&self.git().args([
            "tag",
            "-a",
            "-m",
            message.as_str(),
            tags.release.as_str(),
        ]))?;

        let mut push = self
            .git()
            .args(["push", self.config.git.remote.as_str()])
            .arg(format!("refs/tags/{}", tags.release));

        if let Some(stable) = &tags.stable {
            executor
                .reporter()
                .step(&format!("Moving {} to {}", stable, tags.release));
            let message = self.config.stable_tag_message();
            executor.mutate(&self.git().args([
                "tag",
                "-a",
                "-f",
                "-m",
                message.as_str(),
                stable.as_str(),
            ]))?;
            push = push.arg(format!("+refs/tags/{}", stable));
        }

        executor.reporter().step("Pushing tags");
        executor.mutate(&push)?;

        info!(tag = %tags.release, stable = ?tags.stable, "tagged release");
        Ok(tags)
    }
}
