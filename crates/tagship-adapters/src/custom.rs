//! Adapter running a user-supplied publish command

use std::path::Path;

use tagship_core::CommandSpec;

use crate::traits::RegistryAdapter;

/// Runs `publish.command` as-is inside the checkout
pub struct CustomAdapter {
    command: CommandSpec,
}

impl CustomAdapter {
    /// Create an adapter from a full argument vector, `None` if it is empty
    pub fn from_argv(argv: &[String]) -> Option<Self> {
        CommandSpec::from_argv(argv).map(|command| Self { command })
    }
}

impl RegistryAdapter for CustomAdapter {
    fn name(&self) -> &'static str {
        "custom"
    }

    fn default_registry(&self) -> &'static str {
        "custom"
    }

    fn publish_commands(&self, checkout: &Path) -> Vec<CommandSpec> {
        vec![self.command.clone().current_dir(checkout)]
    }
}
