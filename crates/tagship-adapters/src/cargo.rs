//! Cargo (Rust) crate adapter

use std::path::Path;

use tagship_core::CommandSpec;

use crate::traits::RegistryAdapter;

/// Publishes a crate with `cargo publish`
#[derive(Default)]
pub struct CargoAdapter {
    registry: Option<String>,
}

impl CargoAdapter {
    /// Create a new Cargo adapter
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish to an alternate registry from `.cargo/config.toml`
    pub fn with_registry(mut self, registry: impl Into<String>) -> Self {
        self.registry = Some(registry.into());
        self
    }
}

impl RegistryAdapter for CargoAdapter {
    fn name(&self) -> &'static str {
        "cargo"
    }

    fn default_registry(&self) -> &'static str {
        "crates-io"
    }

    fn registry(&self) -> &str {
        self.registry
            .as_deref()
            .unwrap_or_else(|| self.default_registry())
    }

    fn publish_commands(&self, checkout: &Path) -> Vec<CommandSpec> {
        let mut cmd = CommandSpec::new("cargo")
            .arg("publish")
            .current_dir(checkout);
        if let Some(registry) = &self.registry {
            cmd = cmd.args(["--registry", registry.as_str()]);
        }
        vec![cmd]
    }
}
