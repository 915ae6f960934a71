//! Configuration loading

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{ConfigError, Result};

use super::defaults::config_file_names;
use super::types::Config;
use super::validation::validate_config;

/// Load configuration from a file
pub fn load_config(path: &Path) -> Result<Config> {
    let is_yaml = path
        .extension()
        .is_some_and(|e| e == "yaml" || e == "yml");
    let format = if is_yaml { "YAML" } else { "TOML" };
    info!(path = %path.display(), format, "loading config");

    if !path.exists() {
        return Err(ConfigError::NotFound(path.to_path_buf()).into());
    }
    let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;

    let config: Config = if is_yaml {
        serde_yaml::from_str(&content).map_err(ConfigError::YamlError)?
    } else {
        toml::from_str(&content).map_err(ConfigError::TomlError)?
    };

    validate_config(&config)?;
    debug!(path = %path.display(), "config loaded and validated");
    Ok(config)
}

/// Find configuration file in directory or parent directories.
///
/// At each directory level the search checks:
///   1. `<dir>/<name>`          (e.g. `tagship.toml`)
///   2. `<dir>/.github/<name>`  (e.g. `.github/tagship.toml`)
///
/// The first match wins. Parents are walked until the filesystem root.
pub fn find_config(start_dir: &Path) -> Option<PathBuf> {
    debug!(start_dir = %start_dir.display(), "searching for config file");
    let mut current = start_dir.to_path_buf();

    loop {
        for name in config_file_names() {
            let config_path = current.join(name);
            if config_path.exists() {
                info!(path = %config_path.display(), "found config file");
                return Some(config_path);
            }

            let github_path = current.join(".github").join(name);
            if github_path.exists() {
                info!(path = %github_path.display(), "found config file in .github/");
                return Some(github_path);
            }
        }

        if !current.pop() {
            break;
        }
    }

    debug!("no config file found");
    None
}

/// Load configuration, falling back to defaults when no file exists.
///
/// A file that exists but fails to parse or validate is still an error.
pub fn load_config_or_default(dir: &Path) -> Result<(Config, Option<PathBuf>)> {
    match find_config(dir) {
        Some(path) => {
            let config = load_config(&path)?;
            Ok((config, Some(path)))
        }
        None => {
            debug!(dir = %dir.display(), "no config found, using defaults");
            Ok((Config::default(), None))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TagshipError;
    use tempfile::TempDir;

    #[test]
    fn test_find_config_toml() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("tagship.toml");
        std::fs::write(&config_path, "name = \"orchestra\"").unwrap();

        let found = find_config(temp.path());
        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn test_find_config_prefers_toml_over_yaml() {
        let temp = TempDir::new().unwrap();
        let toml_path = temp.path().join("tagship.toml");
        let yaml_path = temp.path().join("tagship.yaml");
        std::fs::write(&toml_path, "name = \"a\"").unwrap();
        std::fs::write(&yaml_path, "name: b").unwrap();

        let found = find_config(temp.path()).unwrap();
        assert_eq!(found, toml_path);
    }

    #[test]
    fn test_find_config_in_github_dir() {
        let temp = TempDir::new().unwrap();
        let github_dir = temp.path().join(".github");
        std::fs::create_dir_all(&github_dir).unwrap();
        let config_path = github_dir.join("tagship.toml");
        std::fs::write(&config_path, "name = \"orchestra\"").unwrap();

        assert_eq!(find_config(temp.path()), Some(config_path));
    }

    #[test]
    fn test_load_config_toml() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("tagship.toml");
        std::fs::write(
            &config_path,
            "name = \"orchestra\"\n\n[git]\nbranch = \"main\"\n\n[publish]\nadapter = \"cargo\"\n",
        )
        .unwrap();

        let config = load_config(&config_path).unwrap();
        assert_eq!(config.project_name(), "orchestra");
        assert_eq!(config.git.branch, "main");
        assert_eq!(config.git.remote, "origin");
        assert_eq!(config.publish.adapter, "cargo");
    }

    #[test]
    fn test_load_config_yaml() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("tagship.yaml");
        std::fs::write(
            &config_path,
            "versioning:\n  file: src/pkg/__init__.py\ngit:\n  remote: upstream\n",
        )
        .unwrap();

        let config = load_config(&config_path).unwrap();
        assert_eq!(config.git.remote, "upstream");
        assert_eq!(
            config.version_file().unwrap(),
            PathBuf::from("src/pkg/__init__.py")
        );
    }

    #[test]
    fn test_load_missing_explicit_file() {
        let temp = TempDir::new().unwrap();
        let err = load_config(&temp.path().join("custom.toml")).unwrap_err();
        assert!(matches!(err, TagshipError::Config(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_load_or_default_without_file() {
        let temp = TempDir::new().unwrap();
        let (config, path) = load_config_or_default(temp.path()).unwrap();
        assert!(path.is_none());
        assert_eq!(config.git.branch, "master");
    }

    #[test]
    fn test_load_or_default_rejects_invalid_file() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join("tagship.toml"),
            "[publish]\nadapter = \"gem\"\n",
        )
        .unwrap();

        let err = load_config_or_default(temp.path()).unwrap_err();
        assert!(matches!(
            err,
            TagshipError::Config(ConfigError::InvalidValue { .. })
        ));
    }
}
