//! Configuration validation

use tracing::debug;

use crate::error::{ConfigError, Result};

use super::types::Config;

/// Registry adapters known to tagship
pub const ADAPTERS: [&str; 4] = ["python", "cargo", "npm", "custom"];

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    debug!("validating configuration");
    validate_versioning(config)?;
    validate_git(config)?;
    validate_publish(config)?;
    debug!("configuration validation passed");
    Ok(())
}

fn invalid(field: &str, message: impl Into<String>) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        message: message.into(),
    }
}

fn validate_versioning(config: &Config) -> Result<()> {
    if !config.versioning.tag_format.contains("{version}") {
        return Err(invalid("versioning.tag_format", "must contain {version} placeholder").into());
    }

    if let Some(stable) = config.stable_tag() {
        if stable.contains("{version}") {
            return Err(invalid(
                "versioning.stable_tag",
                "must be a fixed name, not a {version} template",
            )
            .into());
        }
        if stable == config.versioning.tag_format {
            return Err(invalid(
                "versioning.stable_tag",
                "must differ from the release tag format",
            )
            .into());
        }
    }

    Ok(())
}

fn validate_git(config: &Config) -> Result<()> {
    if config.git.remote.is_empty() {
        return Err(invalid("git.remote", "remote cannot be empty").into());
    }

    if config.git.branch.is_empty() {
        return Err(invalid("git.branch", "branch cannot be empty").into());
    }

    if config.git.commit_message.trim().is_empty() {
        return Err(invalid("git.commit_message", "commit message cannot be empty").into());
    }

    Ok(())
}

fn validate_publish(config: &Config) -> Result<()> {
    let adapter = config.publish.adapter.as_str();
    if !ADAPTERS.contains(&adapter) {
        return Err(invalid(
            "publish.adapter",
            format!("must be one of: {}", ADAPTERS.join(", ")),
        )
        .into());
    }

    if adapter == "python" {
        let tools = ["setuptools", "twine"];
        if !tools.contains(&config.publish.python_tool.as_str()) {
            return Err(invalid(
                "publish.python_tool",
                format!("must be one of: {}", tools.join(", ")),
            )
            .into());
        }
    }

    if adapter == "custom" && config.publish.enabled && config.publish.command.is_empty() {
        return Err(invalid("publish.command", "custom adapter needs a command").into());
    }

    Ok(())
}
