//! Core types for tagship

use serde::{Deserialize, Serialize};

use crate::version::Version;

/// Part of the version to increment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VersionPart {
    /// `1.2.3` => `2.0.0`
    Major,
    /// `1.2.3` => `1.3.0`
    Minor,
    /// `1.2.3` => `1.2.4`
    Patch,
}

impl VersionPart {
    /// Returns the string representation of the part
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Major => "major",
            Self::Minor => "minor",
            Self::Patch => "patch",
        }
    }
}

impl std::fmt::Display for VersionPart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for VersionPart {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "major" => Ok(Self::Major),
            "minor" => Ok(Self::Minor),
            "patch" => Ok(Self::Patch),
            _ => Err(format!("Unknown version part: {}", s)),
        }
    }
}

/// Whether mutating actions run or are only reported
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunMode {
    /// Execute every step
    #[default]
    Real,
    /// Report mutating steps instead of executing them
    Fake,
}

impl RunMode {
    /// Build a mode from a `--fake` style flag
    pub fn from_fake_flag(fake: bool) -> Self {
        if fake {
            Self::Fake
        } else {
            Self::Real
        }
    }

    /// Whether mutating actions are suppressed
    pub fn is_fake(&self) -> bool {
        matches!(self, Self::Fake)
    }
}

/// Result of a release run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReleaseResult {
    /// The project name
    pub project: String,
    /// Version before the bump
    pub previous_version: String,
    /// Version after the bump
    pub new_version: String,
    /// Part that was incremented
    pub part: VersionPart,
    /// Release tag
    pub tag: String,
    /// Moving alias tag, if enabled
    pub stable_tag: Option<String>,
    /// Whether the publish step ran
    pub published: bool,
    /// Whether this was a fake run
    pub dry_run: bool,
}

impl ReleaseResult {
    /// Create a new release result
    pub fn new(
        project: impl Into<String>,
        previous: &Version,
        next: &Version,
        part: VersionPart,
    ) -> Self {
        Self {
            project: project.into(),
            previous_version: previous.to_string(),
            new_version: next.to_string(),
            part,
            tag: format!("v{}", next),
            stable_tag: None,
            published: false,
            dry_run: false,
        }
    }

    /// Set the tags
    pub fn with_tags(mut self, tag: impl Into<String>, stable_tag: Option<String>) -> Self {
        self.tag = tag.into();
        self.stable_tag = stable_tag;
        self
    }

    /// Set whether published
    pub fn with_published(mut self, published: bool) -> Self {
        self.published = published;
        self
    }

    /// Set whether this was a fake run
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}
