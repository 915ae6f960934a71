use std::path::Path;

use git2::{Oid, Repository, RepositoryInitOptions, Signature};
use tempfile::TempDir;

use crate::GitRepo;

/// A repository on `master` with one commit containing `file.txt`
pub fn setup_repo() -> (TempDir, GitRepo) {
    let temp = TempDir::new().unwrap();
    let mut opts = RepositoryInitOptions::new();
    opts.initial_head("master");
    let repo = Repository::init_opts(temp.path(), &opts).unwrap();

    commit_file(&repo, "file.txt", "content", Some("HEAD"));

    let git_repo = GitRepo::open(temp.path()).unwrap();
    (temp, git_repo)
}

/// Write `name`, stage it, and commit on top of `update_ref` (or HEAD)
pub fn commit_file(repo: &Repository, name: &str, content: &str, update_ref: Option<&str>) -> Oid {
    let workdir = repo.workdir().unwrap();
    std::fs::write(workdir.join(name), content).unwrap();

    let mut index = repo.index().unwrap();
    index.add_path(Path::new(name)).unwrap();
    index.write().unwrap();
    let tree_id = index.write_tree().unwrap();
    let tree = repo.find_tree(tree_id).unwrap();

    let sig = Signature::now("Test", "test@example.com").unwrap();
    let parent_ref = update_ref.unwrap_or("HEAD");
    let parent = repo
        .revparse_single(parent_ref)
        .ok()
        .and_then(|o| o.peel_to_commit().ok());
    let parents: Vec<&git2::Commit<'_>> = parent.iter().collect();

    repo.commit(update_ref, &sig, &sig, &format!("Add {}", name), &tree, &parents)
        .unwrap()
}

/// Point `refs/remotes/origin/master` at `oid`
pub fn set_tracking_branch(repo: &Repository, oid: Oid) {
    repo.reference("refs/remotes/origin/master", oid, true, "test tracking branch")
        .unwrap();
}
