//! The release procedure
//!
//! Steps run strictly in order: resolve the next version, verify the
//! repository, confirm, write the version file, commit and push, tag, then
//! publish from a fresh clone. Nothing is mutated before the user confirms.

use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::{info, instrument};

use tagship_adapters::RegistryPublisher;
use tagship_core::config::Config;
use tagship_core::error::{Result, WorkflowError};
use tagship_core::workflow::{release_warning, verify_repository, Confirmer, RepositoryProbe};
use tagship_core::{Executor, ReleaseResult, VersionFile, VersionPart};
use tagship_git::VcsPublisher;

/// A single release of one project
pub struct ReleaseProcedure<'a> {
    config: &'a Config,
    root: &'a Path,
    version_file: PathBuf,
    probe: &'a dyn RepositoryProbe,
    publisher: Option<RegistryPublisher<'a>>,
}

impl<'a> ReleaseProcedure<'a> {
    /// Create a release of the repository at `root`
    pub fn new(
        config: &'a Config,
        root: &'a Path,
        version_file: impl Into<PathBuf>,
        probe: &'a dyn RepositoryProbe,
    ) -> Self {
        Self {
            config,
            root,
            version_file: version_file.into(),
            probe,
            publisher: None,
        }
    }

    /// Publish to a registry after tagging
    pub fn with_publisher(mut self, publisher: RegistryPublisher<'a>) -> Self {
        self.publisher = Some(publisher);
        self
    }

    /// Run every release step
    #[instrument(skip_all, fields(part = %part, fake = executor.is_fake()))]
    pub fn run(
        &self,
        executor: &Executor<'_>,
        confirmer: &mut dyn Confirmer,
        part: VersionPart,
    ) -> Result<ReleaseResult> {
        let start = Instant::now();
        let reporter = executor.reporter();

        let file = VersionFile::load(&self.version_file)?;
        let current = file.version()?;
        let next = current.bump(part)?;
        info!(current = %current, next = %next, "resolved next version");

        verify_repository(self.probe, &self.config.git)?;

        reporter.warning(&release_warning(self.config, &current, &next));
        if !confirmer.confirm()? {
            return Err(WorkflowError::Cancelled.into());
        }

        file.write_version(executor, &next)?;

        let vcs = VcsPublisher::new(self.root, self.config);
        vcs.commit_and_push(executor)?;
        let tags = vcs.tag_release(executor, &next)?;

        let published = match &self.publisher {
            Some(publisher) => publisher.publish(executor, &tags.release, &self.config.git.branch)?,
            None => {
                reporter.step("Publishing is disabled, skipping registry upload");
                false
            }
        };

        info!(
            version = %next,
            tag = %tags.release,
            published,
            duration_ms = start.elapsed().as_millis(),
            "release finished"
        );

        Ok(
            ReleaseResult::new(self.config.project_name(), &current, &next, part)
                .with_tags(tags.release, tags.stable)
                .with_published(published)
                .with_dry_run(executor.is_fake()),
        )
    }
}
