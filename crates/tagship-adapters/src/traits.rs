//! Registry adapter traits

use std::path::Path;

use tagship_core::CommandSpec;

/// Trait for registry adapters
pub trait RegistryAdapter: Send + Sync {
    /// Get the adapter name (e.g., "python", "cargo")
    fn name(&self) -> &'static str;

    /// Get the registry published to when none is configured
    fn default_registry(&self) -> &'static str;

    /// The registry this adapter uploads to
    fn registry(&self) -> &str {
        self.default_registry()
    }

    /// Commands that build and upload the package, in order
    ///
    /// Every command runs with `checkout` as its working directory.
    fn publish_commands(&self, checkout: &Path) -> Vec<CommandSpec>;
}
