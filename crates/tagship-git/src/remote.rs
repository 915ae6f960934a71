//! Remote operations

use tagship_core::error::GitError;

use crate::repository::{GitRepo, Result};

impl GitRepo {
    /// Get the URL for a remote
    pub fn remote_url(&self, name: &str) -> Result<String> {
        match self.repo.find_remote(name) {
            Ok(remote) => remote
                .url()
                .map(|s| s.to_string())
                .ok_or_else(|| GitError::RemoteUrlMissing(name.to_string())),
            Err(e) if e.code() == git2::ErrorCode::NotFound => {
                Err(GitError::RemoteNotFound(name.to_string()))
            }
            Err(e) => Err(GitError::Git2(e)),
        }
    }
}
