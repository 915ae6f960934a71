//! tagship git - git operations for release automation
//!
//! Repository inspection (branch, cleanliness, ahead/behind) goes through
//! libgit2. Commits, tags, and pushes shell out to the `git` CLI through the
//! core [`Executor`](tagship_core::Executor) so fake runs can suppress them
//! and credentials are handled by the user's git setup.

mod publish;
mod remote;
mod repository;
mod status;

pub use publish::{ReleaseTags, VcsPublisher};
pub use repository::{GitRepo, Result};

#[cfg(test)]
mod test_support;
