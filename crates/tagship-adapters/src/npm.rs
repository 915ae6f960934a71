//! npm package adapter

use std::path::Path;

use tagship_core::CommandSpec;

use crate::traits::RegistryAdapter;

/// Publishes a package with `npm publish`
#[derive(Default)]
pub struct NpmAdapter {
    registry: Option<String>,
}

impl NpmAdapter {
    /// Create a new npm adapter
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish to a registry URL other than npmjs.org
    pub fn with_registry(mut self, registry: impl Into<String>) -> Self {
        self.registry = Some(registry.into());
        self
    }
}

impl RegistryAdapter for NpmAdapter {
    fn name(&self) -> &'static str {
        "npm"
    }

    fn default_registry(&self) -> &'static str {
        "https://registry.npmjs.org"
    }

    fn registry(&self) -> &str {
        self.registry
            .as_deref()
            .unwrap_or_else(|| self.default_registry())
    }

    fn publish_commands(&self, checkout: &Path) -> Vec<CommandSpec> {
        let mut cmd = CommandSpec::new("npm").arg("publish").current_dir(checkout);
        if let Some(registry) = &self.registry {
            cmd = cmd.args(["--registry", registry.as_str()]);
        }
        vec![cmd]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_publish_commands() {
        let adapter = NpmAdapter::new();
        assert_eq!(
            adapter.publish_commands(Path::new("/tmp/checkout"))[0].to_string(),
            "npm publish"
        );

        let adapter = NpmAdapter::new().with_registry("https://npm.internal.example");
        assert_eq!(
            adapter.publish_commands(Path::new("/tmp/checkout"))[0].to_string(),
            "npm publish --registry https://npm.internal.example"
        );
        assert_eq!(adapter.registry(), "https://npm.internal.example");
    }
}
