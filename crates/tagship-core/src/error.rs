//! Error types for tagship

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using TagshipError
pub type Result<T> = std::result::Result<T, TagshipError>;

/// Main error type for tagship operations
#[derive(Debug, Error)]
pub enum TagshipError {
    /// Configuration-related errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Git-related errors
    #[error(transparent)]
    Git(#[from] GitError),

    /// Version-related errors
    #[error(transparent)]
    Version(#[from] VersionError),

    /// Repository is not in a releasable state
    #[error(transparent)]
    Precondition(#[from] PreconditionError),

    /// External command errors
    #[error(transparent)]
    Command(#[from] CommandError),

    /// Adapter-related errors
    #[error(transparent)]
    Adapter(#[from] AdapterError),

    /// Workflow-related errors
    #[error(transparent)]
    Workflow(#[from] WorkflowError),
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found at {0}")]
    NotFound(PathBuf),

    /// Invalid configuration value
    #[error("Invalid configuration: {field} - {message}")]
    InvalidValue { field: String, message: String },

    /// Missing required field
    #[error("Missing required configuration field: {0}")]
    MissingField(String),

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// IO error
    #[error("IO error reading config: {0}")]
    Io(#[from] std::io::Error),
}

/// Git-related errors
#[derive(Debug, Error)]
pub enum GitError {
    /// Repository not found
    #[error("Git repository not found at {0}")]
    RepositoryNotFound(PathBuf),

    /// Not a git repository
    #[error("Not a git repository: {0}")]
    NotARepository(PathBuf),

    /// Failed to open repository
    #[error("Failed to open repository: {0}")]
    OpenFailed(String),

    /// Repository has no working directory
    #[error("Repository at {0} has no working directory")]
    BareRepository(PathBuf),

    /// Remote not found
    #[error("Remote not found: {0}")]
    RemoteNotFound(String),

    /// Remote exists but has no URL to clone from
    #[error("Remote '{0}' has no URL configured")]
    RemoteUrlMissing(String),

    /// The remote-tracking branch used for ahead/behind checks is missing
    #[error("Remote-tracking branch {remote}/{branch} not found (fetch from {remote} first)")]
    TrackingBranchNotFound { remote: String, branch: String },

    /// Git2 library error
    #[error("Git error: {0}")]
    Git2(#[from] git2::Error),
}

/// Version-related errors
#[derive(Debug, Error)]
pub enum VersionError {
    /// Version declaration file could not be read
    #[error("Failed to read version file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Version declaration file could not be written
    #[error("Failed to write version file {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    /// No `__version__ = '...'` assignment in the file
    #[error("Version pattern not found in {0}")]
    PatternNotFound(PathBuf),

    /// Version string is not a `major.minor.patch` triple
    #[error("Malformed version declaration '{0}': {1}")]
    Malformed(String, String),

    /// Bumping would overflow a version component
    #[error("Version {0} cannot be given another {1} release")]
    Overflow(String, String),
}

/// Repository state that blocks a release
#[derive(Debug, Error)]
pub enum PreconditionError {
    /// Not on the release branch
    #[error("This must be run from the {expected} branch (currently on {actual})")]
    WrongBranch { expected: String, actual: String },

    /// Local commits not yet pushed
    #[error("Your branch has {count} commit(s) not yet on {upstream}")]
    UnpushedCommits { count: usize, upstream: String },

    /// Remote commits not yet pulled
    #[error("Your branch is {count} commit(s) behind {upstream}")]
    UnpulledCommits { count: usize, upstream: String },

    /// Uncommitted or untracked files present
    #[error("There are outstanding changes to your branch: {}", .files.join(", "))]
    DirtyWorkingTree { files: Vec<String> },
}

/// External command errors
#[derive(Debug, Error)]
pub enum CommandError {
    /// Program could not be located or started
    #[error("Failed to run \"{command}\": {reason}")]
    Spawn { command: String, reason: String },

    /// Program exited unsuccessfully
    #[error("Command \"{command}\" failed (code: {}): {output}", describe_code(.code))]
    Failed {
        command: String,
        code: Option<i32>,
        output: String,
    },
}

fn describe_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => code.to_string(),
        None => "none".to_string(),
    }
}

/// Adapter-related errors
#[derive(Debug, Error)]
pub enum AdapterError {
    /// Unsupported registry adapter
    #[error("Unsupported registry adapter: {0}")]
    UnsupportedType(String),

    /// Adapter needs a command but none was configured
    #[error("Adapter '{0}' requires publish.command to be set")]
    MissingCommand(String),

    /// Temporary release workspace could not be created or removed
    #[error("Release workspace error: {0}")]
    Workspace(std::io::Error),
}

/// Workflow-related errors
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// User cancelled
    #[error("Operation cancelled by user")]
    Cancelled,

    /// Confirmation could not be read
    #[error("Failed to read confirmation: {0}")]
    Prompt(String),
}

impl TagshipError {
    /// Whether this error is a user cancellation rather than a failure
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Workflow(WorkflowError::Cancelled))
    }
}
