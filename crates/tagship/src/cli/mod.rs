//! CLI definition and command handling

pub mod commands;
pub mod output;
pub mod terminal;

use std::path::{Path, PathBuf};

use clap::Parser;
use tracing::info;

use tagship_adapters::{adapter_from_config, RegistryAdapter, RegistryPublisher};
use tagship_core::config::{load_config, load_config_or_default, Config};
use tagship_core::process::Reporter;
use tagship_core::{Executor, RunMode, SystemRunner, TagshipError, VersionPart};
use tagship_git::GitRepo;

use self::commands::ReleaseProcedure;
use self::terminal::ConsoleReporter;

/// Tagship - bump, tag, and publish a package release
///
/// Increments the version declared in the package's `__init__.py`, commits
/// and pushes it, tags the release, and uploads a build of the tag to the
/// package registry. Requires push access to the repository and upload
/// credentials for the registry.
#[derive(Debug, Parser)]
#[command(name = "tagship")]
#[command(author, version, about, long_about)]
pub struct Cli {
    /// The part of the version to increase: major (1.0.0 => 2.0.0),
    /// minor (0.1.0 => 0.2.0), or patch (0.0.1 => 0.0.2)
    #[arg(value_enum)]
    pub part: PartArg,

    /// Fake the release without changing anything (useful for testing)
    #[arg(long, visible_alias = "dry-run")]
    pub fake: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress output except warnings and errors
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(long, default_value = "text")]
    pub format: OutputFormat,

    /// Working directory
    #[arg(short = 'C', long)]
    pub directory: Option<PathBuf>,

    /// Configuration file (searched for from the repository root if unset)
    #[arg(short, long, env = "TAGSHIP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Version-declaration file, relative to the repository root
    #[arg(long)]
    pub version_file: Option<PathBuf>,
}

/// Version part accepted on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum PartArg {
    Major,
    Minor,
    Patch,
}

impl From<PartArg> for VersionPart {
    fn from(part: PartArg) -> Self {
        match part {
            PartArg::Major => VersionPart::Major,
            PartArg::Minor => VersionPart::Minor,
            PartArg::Patch => VersionPart::Patch,
        }
    }
}

/// Output format for CLI
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output
    Json,
}

impl Cli {
    /// Run the release
    pub fn execute(self) -> anyhow::Result<()> {
        let part = VersionPart::from(self.part);
        let mode = RunMode::from_fake_flag(self.fake);
        info!(part = %part, fake = self.fake, "executing release");

        let start_dir = match &self.directory {
            Some(dir) => dir.clone(),
            None => std::env::current_dir()?,
        };
        let repo = GitRepo::discover(&start_dir).map_err(TagshipError::from)?;
        let root = repo.path().to_path_buf();

        let config = self.load_config(&root)?;
        let version_file = match &self.version_file {
            Some(path) => root.join(path),
            None => root.join(config.version_file().map_err(TagshipError::from)?),
        };

        let adapter = if config.publish.enabled {
            Some(adapter_from_config(&config.publish)?)
        } else {
            None
        };
        let clone_url = match (&adapter, &config.git.clone_url) {
            (None, _) => None,
            (Some(_), Some(url)) => Some(url.clone()),
            (Some(_), None) => Some(
                repo.remote_url(&config.git.remote)
                    .map_err(TagshipError::from)?,
            ),
        };

        let reporter = match self.format {
            OutputFormat::Text => ConsoleReporter::stdout(self.quiet),
            OutputFormat::Json => ConsoleReporter::stderr(self.quiet),
        };
        if mode.is_fake() {
            reporter.warning("--fake passed, no changes will be made");
        }

        let runner = SystemRunner::new();
        let executor = Executor::new(&runner, &reporter, mode)
            .with_policy(config.release.failure_policy());

        let mut procedure = ReleaseProcedure::new(&config, &root, version_file, &repo);
        if let (Some(adapter), Some(url)) = (&adapter, clone_url) {
            let adapter: &dyn RegistryAdapter = adapter.as_ref();
            procedure = procedure.with_publisher(RegistryPublisher::new(adapter, url));
        }

        let mut confirmer = terminal::confirmer();
        let result = procedure.run(&executor, confirmer.as_mut(), part)?;

        match self.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(&result)?);
            }
            OutputFormat::Text => {
                if !self.quiet {
                    output::release_summary(&result);
                }
            }
        }

        Ok(())
    }

    fn load_config(&self, root: &Path) -> Result<Config, TagshipError> {
        if let Some(path) = &self.config {
            info!(path = %path.display(), "loading explicit configuration");
            return load_config(path);
        }

        let (config, path) = load_config_or_default(root)?;
        match path {
            Some(path) => info!(path = %path.display(), "loaded configuration"),
            None => {
                if !self.quiet && self.format == OutputFormat::Text {
                    output::info("No configuration found, using defaults");
                }
            }
        }
        Ok(config)
    }
}
