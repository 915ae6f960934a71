//! tagship core - shared types for release automation
//!
//! This crate provides error handling, configuration, version parsing, the
//! version-declaration file, external command execution, and the repository
//! gate used by the `tagship` release procedure.

pub mod config;
pub mod error;
pub mod process;
pub mod types;
pub mod version;
pub mod version_file;
pub mod workflow;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;

pub use error::{Result, TagshipError};
pub use process::{
    CommandOutput, CommandRunner, CommandSpec, Executor, FailurePolicy, Reporter, SystemRunner,
};
pub use types::{ReleaseResult, RunMode, VersionPart};
pub use version::Version;
pub use version_file::VersionFile;
