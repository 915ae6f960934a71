//! Repository status operations

use git2::{Status, StatusOptions};
use tracing::debug;

use tagship_core::error::GitError;
use tagship_core::workflow::RepositoryProbe;

use crate::repository::{GitRepo, Result};

impl GitRepo {
    /// Get the current branch name
    pub fn current_branch(&self) -> Result<Option<String>> {
        let head = match self.repo.head() {
            Ok(head) => head,
            Err(e) if e.code() == git2::ErrorCode::UnbornBranch => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        if head.is_branch() {
            Ok(head.shorthand().map(|s| s.to_string()))
        } else {
            // Detached HEAD
            Ok(None)
        }
    }

    /// Paths with staged, unstaged, or untracked changes (ignored files excluded)
    pub fn uncommitted_changes(&self) -> Result<Vec<String>> {
        let mut opts = StatusOptions::new();
        opts.include_untracked(true)
            .recurse_untracked_dirs(true)
            .include_ignored(false);

        let statuses = self.repo.statuses(Some(&mut opts))?;
        let files: Vec<String> = statuses
            .iter()
            .filter(|entry| {
                let status = entry.status();
                status != Status::CURRENT && !status.contains(Status::IGNORED)
            })
            .filter_map(|entry| entry.path().map(str::to_string))
            .collect();

        debug!(count = files.len(), "collected uncommitted changes");
        Ok(files)
    }

    /// Commits HEAD has that `remote/branch` lacks, and the reverse
    pub fn ahead_behind(&self, remote: &str, branch: &str) -> Result<(usize, usize)> {
        let local = self.head_commit()?.id();

        let refname = format!("refs/remotes/{}/{}", remote, branch);
        let upstream = match self.repo.find_reference(&refname) {
            Ok(reference) => reference.peel_to_commit()?.id(),
            Err(e) if e.code() == git2::ErrorCode::NotFound => {
                return Err(GitError::TrackingBranchNotFound {
                    remote: remote.to_string(),
                    branch: branch.to_string(),
                });
            }
            Err(e) => return Err(e.into()),
        };

        let (ahead, behind) = self.repo.graph_ahead_behind(local, upstream)?;
        debug!(remote, branch, ahead, behind, "compared with remote-tracking branch");
        Ok((ahead, behind))
    }
}

impl RepositoryProbe for GitRepo {
    fn current_branch(&self) -> tagship_core::Result<Option<String>> {
        Ok(GitRepo::current_branch(self)?)
    }

    fn unpushed_commits(&self, remote: &str, branch: &str) -> tagship_core::Result<usize> {
        Ok(self.ahead_behind(remote, branch)?.0)
    }

    fn unpulled_commits(&self, remote: &str, branch: &str) -> tagship_core::Result<usize> {
        Ok(self.ahead_behind(remote, branch)?.1)
    }

    fn uncommitted_changes(&self) -> tagship_core::Result<Vec<String>> {
        Ok(GitRepo::uncommitted_changes(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{commit_file, set_tracking_branch, setup_repo};
    use tagship_core::config::GitConfig;
    use tagship_core::error::{PreconditionError, TagshipError};
    use tagship_core::workflow::verify_repository;

    #[test]
    fn test_fresh_repository_is_clean() {
        let (_temp, repo) = setup_repo();
        assert!(repo.uncommitted_changes().unwrap().is_empty());
    }

    #[test]
    fn test_untracked_file_is_dirty() {
        let (temp, repo) = setup_repo();
        std::fs::write(temp.path().join("new_file.txt"), "new").unwrap();
        assert_eq!(repo.uncommitted_changes().unwrap(), vec!["new_file.txt"]);
    }

    #[test]
    fn test_modified_tracked_file_is_dirty() {
        let (temp, repo) = setup_repo();
        std::fs::write(temp.path().join("file.txt"), "modified").unwrap();
        assert_eq!(repo.uncommitted_changes().unwrap(), vec!["file.txt"]);
    }

    #[test]
    fn test_ignored_file_is_clean() {
        let (temp, repo) = setup_repo();
        commit_file(&repo.repo, ".gitignore", "*.pyc\n", Some("HEAD"));
        std::fs::write(temp.path().join("cache.pyc"), "bytes").unwrap();
        assert!(repo.uncommitted_changes().unwrap().is_empty());
    }

    #[test]
    fn test_current_branch() {
        let (_temp, repo) = setup_repo();
        assert_eq!(repo.current_branch().unwrap(), Some("master".to_string()));
    }

    #[test]
    fn test_detached_head_has_no_branch() {
        let (_temp, repo) = setup_repo();
        let head = repo.head_commit().unwrap().id();
        repo.repo.set_head_detached(head).unwrap();
        assert_eq!(repo.current_branch().unwrap(), None);
    }

    #[test]
    fn test_missing_tracking_branch() {
        let (_temp, repo) = setup_repo();
        assert!(matches!(
            repo.ahead_behind("origin", "master"),
            Err(GitError::TrackingBranchNotFound { .. })
        ));
    }

    #[test]
    fn test_level_with_tracking_branch() {
        let (_temp, repo) = setup_repo();
        let head = repo.head_commit().unwrap().id();
        set_tracking_branch(&repo.repo, head);
        assert_eq!(repo.ahead_behind("origin", "master").unwrap(), (0, 0));
    }

    #[test]
    fn test_ahead_of_tracking_branch() {
        let (_temp, repo) = setup_repo();
        let head = repo.head_commit().unwrap().id();
        set_tracking_branch(&repo.repo, head);
        commit_file(&repo.repo, "second.txt", "two", Some("HEAD"));

        assert_eq!(repo.ahead_behind("origin", "master").unwrap(), (1, 0));
    }

    #[test]
    fn test_behind_tracking_branch() {
        let (_temp, repo) = setup_repo();
        let head = repo.head_commit().unwrap().id();
        set_tracking_branch(&repo.repo, head);
        commit_file(
            &repo.repo,
            "remote.txt",
            "from remote",
            Some("refs/remotes/origin/master"),
        );

        assert_eq!(repo.ahead_behind("origin", "master").unwrap(), (0, 1));
    }

    #[test]
    fn test_gate_passes_twice_on_ready_repository() {
        let (_temp, repo) = setup_repo();
        let head = repo.head_commit().unwrap().id();
        set_tracking_branch(&repo.repo, head);

        let git = GitConfig::default();
        assert!(verify_repository(&repo, &git).is_ok());
        assert!(verify_repository(&repo, &git).is_ok());
    }

    #[test]
    fn test_gate_rejects_feature_branch() {
        let (_temp, repo) = setup_repo();
        let head = repo.head_commit().unwrap();
        repo.repo.branch("feature-x", &head, false).unwrap();
        repo.repo.set_head("refs/heads/feature-x").unwrap();

        let err = verify_repository(&repo, &GitConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            TagshipError::Precondition(PreconditionError::WrongBranch { .. })
        ));
    }

    #[test]
    fn test_gate_rejects_modified_file() {
        let (temp, repo) = setup_repo();
        let head = repo.head_commit().unwrap().id();
        set_tracking_branch(&repo.repo, head);
        std::fs::write(temp.path().join("file.txt"), "edited").unwrap();

        let err = verify_repository(&repo, &GitConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            TagshipError::Precondition(PreconditionError::DirtyWorkingTree { .. })
        ));
    }
}
