//! Publishing a tagged release from a fresh clone
//!
//! The release is built from a clone of the remote rather than from the
//! working copy, so only pushed, tagged sources reach the registry. The clone
//! lives in a temporary directory that is removed when publishing finishes,
//! whether or not it succeeded.

use std::path::Path;
use std::time::Instant;

use tempfile::TempDir;
use tracing::{info, instrument, warn};

use tagship_core::error::{AdapterError, Result, TagshipError};
use tagship_core::{CommandSpec, Executor};

use crate::traits::RegistryAdapter;

/// Prefix of the temporary release workspace
pub const WORKSPACE_PREFIX: &str = "tagship-release-";

/// Clones a tag into a temporary workspace and runs an adapter's upload there
pub struct RegistryPublisher<'a> {
    adapter: &'a dyn RegistryAdapter,
    clone_url: String,
}

impl<'a> RegistryPublisher<'a> {
    /// Create a publisher cloning from `clone_url`
    pub fn new(adapter: &'a dyn RegistryAdapter, clone_url: impl Into<String>) -> Self {
        Self {
            adapter,
            clone_url: clone_url.into(),
        }
    }

    /// Clone `tag` and publish it, returning whether every upload command
    /// ran and succeeded
    ///
    /// In fake mode the tag has not been pushed, so `branch` is cloned
    /// instead. The clone still runs, but its failure is only reported and
    /// the upload commands are suppressed.
    #[instrument(skip_all, fields(adapter = self.adapter.name(), tag = %tag))]
    pub fn publish(&self, executor: &Executor<'_>, tag: &str, branch: &str) -> Result<bool> {
        let start = Instant::now();
        let workspace = tempfile::Builder::new()
            .prefix(WORKSPACE_PREFIX)
            .tempdir()
            .map_err(AdapterError::Workspace)?;
        executor.reporter().step(&format!(
            "Created release directory in {}",
            workspace.path().display()
        ));

        let result = self.publish_in(executor, workspace.path(), tag, branch);
        cleanup(executor, workspace);

        let published = result?;
        info!(
            published,
            registry = self.adapter.registry(),
            duration_ms = start.elapsed().as_millis(),
            "registry publish finished"
        );
        Ok(published)
    }

    fn publish_in(
        &self,
        executor: &Executor<'_>,
        workspace: &Path,
        tag: &str,
        branch: &str,
    ) -> Result<bool> {
        let checkout = workspace.join("checkout");
        let reference = if executor.is_fake() { branch } else { tag };

        executor
            .reporter()
            .step(&format!("Cloning {} at {}", self.clone_url, reference));
        let clone = CommandSpec::new("git")
            .args(["clone", "-b", reference, self.clone_url.as_str()])
            .arg(checkout.to_string_lossy())
            .current_dir(workspace);

        match executor.run(&clone) {
            Ok(_) => {}
            Err(TagshipError::Command(e)) if executor.is_fake() => {
                warn!(error = %e, "clone failed during fake run");
                executor
                    .reporter()
                    .warning(&format!("Clone failed, continuing fake run: {}", e));
            }
            Err(e) => return Err(e),
        }

        executor.reporter().step(&format!(
            "Publishing to {} with the {} adapter",
            self.adapter.registry(),
            self.adapter.name()
        ));
        let commands = self.adapter.publish_commands(&checkout);
        let mut uploaded = !commands.is_empty();
        for command in &commands {
            let succeeded = matches!(executor.mutate(command)?, Some(out) if out.is_success());
            uploaded &= succeeded;
        }
        Ok(uploaded)
    }
}

fn cleanup(executor: &Executor<'_>, workspace: TempDir) {
    executor.reporter().step("Cleaning up release directory");
    let path = workspace.path().to_path_buf();
    if let Err(e) = workspace.close() {
        warn!(path = %path.display(), error = %e, "failed to remove release directory");
        executor.reporter().warning(&format!(
            "Could not remove release directory {}: {}",
            path.display(),
            e
        ));
    }
}
