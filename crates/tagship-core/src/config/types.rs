//! Configuration types

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::process::FailurePolicy;

/// Main configuration for tagship
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Project name, used in tag messages
    pub name: Option<String>,

    /// Versioning configuration
    pub versioning: VersioningConfig,

    /// Git configuration
    pub git: GitConfig,

    /// Publishing configuration
    pub publish: PublishConfig,

    /// Release behavior
    pub release: ReleaseConfig,
}

impl Config {
    /// Name shown in tag messages and the confirmation warning
    pub fn project_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.versioning.package.as_deref())
            .unwrap_or("package")
    }

    /// Location of the version-declaration file, relative to the repository root
    ///
    /// Uses `versioning.file` when set, otherwise `<package>/__init__.py`
    /// where the package falls back to the project name.
    pub fn version_file(&self) -> Result<PathBuf, ConfigError> {
        if let Some(file) = &self.versioning.file {
            return Ok(file.clone());
        }

        let package = self
            .versioning
            .package
            .as_deref()
            .or(self.name.as_deref())
            .ok_or_else(|| ConfigError::MissingField("versioning.file".to_string()))?;

        Ok(Path::new(package).join("__init__.py"))
    }

    /// Render the release tag name for `version`
    pub fn tag_name(&self, version: &str) -> String {
        self.versioning.tag_format.replace("{version}", version)
    }

    /// Render the release tag message for `version`
    pub fn tag_message(&self, version: &str) -> String {
        self.versioning
            .tag_message
            .replace("{version}", version)
            .replace("{name}", self.project_name())
    }

    /// The moving alias tag, if enabled
    pub fn stable_tag(&self) -> Option<&str> {
        self.versioning
            .stable_tag
            .as_deref()
            .filter(|tag| !tag.is_empty())
    }

    /// Render the alias tag message
    pub fn stable_tag_message(&self) -> String {
        self.versioning
            .stable_tag_message
            .replace("{name}", self.project_name())
    }
}

/// Versioning configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VersioningConfig {
    /// Path of the version-declaration file
    pub file: Option<PathBuf>,

    /// Package directory holding `__init__.py` when `file` is unset
    pub package: Option<String>,

    /// Tag format (e.g., "v{version}")
    pub tag_format: String,

    /// Release tag message; supports `{version}` and `{name}`
    pub tag_message: String,

    /// Moving alias tag; empty disables it
    pub stable_tag: Option<String>,

    /// Alias tag message; supports `{name}`
    pub stable_tag_message: String,
}

impl Default for VersioningConfig {
    fn default() -> Self {
        Self {
            file: None,
            package: None,
            tag_format: "v{version}".to_string(),
            tag_message: "Version {version} of {name}".to_string(),
            stable_tag: Some("stable".to_string()),
            stable_tag_message: "The latest stable release of {name}.".to_string(),
        }
    }
}

/// Git configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GitConfig {
    /// Remote name
    pub remote: String,

    /// Branch to release from
    pub branch: String,

    /// Commit message for the version bump
    pub commit_message: String,

    /// URL to clone for publishing (defaults to the remote's URL)
    pub clone_url: Option<String>,
}

impl GitConfig {
    /// The remote-tracking ref the gate compares against, e.g. `origin/master`
    pub fn upstream(&self) -> String {
        format!("{}/{}", self.remote, self.branch)
    }
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            remote: "origin".to_string(),
            branch: "master".to_string(),
            commit_message: "Version bump.".to_string(),
            clone_url: None,
        }
    }
}

/// Publishing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PublishConfig {
    /// Whether to publish to a registry
    pub enabled: bool,

    /// Registry adapter (python, cargo, npm, custom)
    pub adapter: String,

    /// Registry name or URL passed to the adapter
    pub repository: Option<String>,

    /// Python build tool (setuptools or twine)
    pub python_tool: String,

    /// Full argument vector for the custom adapter
    #[serde(default)]
    pub command: Vec<String>,
}

impl Default for PublishConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            adapter: "python".to_string(),
            repository: None,
            python_tool: "setuptools".to_string(),
            command: Vec::new(),
        }
    }
}

impl PublishConfig {
    /// Human-readable registry name for messages
    pub fn registry_label(&self) -> &str {
        if let Some(repository) = self.repository.as_deref() {
            return repository;
        }
        match self.adapter.as_str() {
            "python" => "PyPI",
            "cargo" => "crates.io",
            "npm" => "npm",
            _ => "package",
        }
    }
}

/// Release behavior
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReleaseConfig {
    /// Keep going after a failed git or publish command
    pub continue_on_error: bool,
}

impl ReleaseConfig {
    /// Failure policy for external commands
    pub fn failure_policy(&self) -> FailurePolicy {
        if self.continue_on_error {
            FailurePolicy::Continue
        } else {
            FailurePolicy::Abort
        }
    }
}
