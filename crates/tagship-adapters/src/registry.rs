//! Adapter selection from configuration

use tracing::debug;

use tagship_core::config::PublishConfig;
use tagship_core::error::{AdapterError, Result};

use crate::cargo::CargoAdapter;
use crate::custom::CustomAdapter;
use crate::npm::NpmAdapter;
use crate::python::{PythonAdapter, PythonTool};
use crate::traits::RegistryAdapter;

/// Build the adapter named by `publish.adapter`
pub fn adapter_from_config(publish: &PublishConfig) -> Result<Box<dyn RegistryAdapter>> {
    let repository = publish.repository.clone();

    let adapter: Box<dyn RegistryAdapter> = match publish.adapter.as_str() {
        "python" => {
            let tool = PythonTool::from_config(&publish.python_tool).ok_or_else(|| {
                AdapterError::UnsupportedType(format!("python/{}", publish.python_tool))
            })?;
            let adapter = PythonAdapter::new(tool);
            Box::new(match repository {
                Some(repository) => adapter.with_repository(repository),
                None => adapter,
            })
        }
        "cargo" => {
            let adapter = CargoAdapter::new();
            Box::new(match repository {
                Some(registry) => adapter.with_registry(registry),
                None => adapter,
            })
        }
        "npm" => {
            let adapter = NpmAdapter::new();
            Box::new(match repository {
                Some(registry) => adapter.with_registry(registry),
                None => adapter,
            })
        }
        "custom" => Box::new(
            CustomAdapter::from_argv(&publish.command)
                .ok_or_else(|| AdapterError::MissingCommand("custom".to_string()))?,
        ),
        other => return Err(AdapterError::UnsupportedType(other.to_string()).into()),
    };

    debug!(adapter = adapter.name(), registry = adapter.registry(), "selected registry adapter");
    Ok(adapter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use tagship_core::TagshipError;

    #[test]
    fn test_default_is_setuptools_to_pypi() {
        let adapter = adapter_from_config(&PublishConfig::default()).unwrap();
        assert_eq!(adapter.name(), "python");
        assert_eq!(adapter.registry(), "pypi");
        assert_eq!(
            adapter.publish_commands(Path::new("."))[0].to_string(),
            "python3 setup.py sdist upload -r pypi"
        );
    }

    #[test]
    fn test_repository_is_forwarded() {
        let publish = PublishConfig {
            adapter: "cargo".to_string(),
            repository: Some("internal".to_string()),
            ..PublishConfig::default()
        };
        let adapter = adapter_from_config(&publish).unwrap();
        assert_eq!(adapter.name(), "cargo");
        assert_eq!(adapter.registry(), "internal");
    }

    #[test]
    fn test_custom_requires_command() {
        let publish = PublishConfig {
            adapter: "custom".to_string(),
            ..PublishConfig::default()
        };
        assert!(matches!(
            adapter_from_config(&publish),
            Err(TagshipError::Adapter(AdapterError::MissingCommand(_)))
        ));
    }

    #[test]
    fn test_unknown_adapter() {
        let publish = PublishConfig {
            adapter: "gem".to_string(),
            ..PublishConfig::default()
        };
        assert!(matches!(
            adapter_from_config(&publish),
            Err(TagshipError::Adapter(AdapterError::UnsupportedType(_)))
        ));
    }
}
