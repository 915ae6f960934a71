//! Python package adapter

use std::path::Path;

use tagship_core::CommandSpec;

use crate::traits::RegistryAdapter;

/// How the source distribution is built and uploaded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PythonTool {
    /// `setup.py sdist upload`
    Setuptools,
    /// `python -m build` followed by `twine upload`
    Twine,
}

impl PythonTool {
    /// Parse the `publish.python_tool` setting
    pub fn from_config(s: &str) -> Option<Self> {
        match s {
            "setuptools" => Some(Self::Setuptools),
            "twine" => Some(Self::Twine),
            _ => None,
        }
    }
}

/// Python package adapter, uploading an sdist to a PyPI-style index
pub struct PythonAdapter {
    tool: PythonTool,
    repository: Option<String>,
}

impl PythonAdapter {
    /// Create a new Python adapter
    pub fn new(tool: PythonTool) -> Self {
        Self {
            tool,
            repository: None,
        }
    }

    /// Upload to the named repository from `.pypirc` instead of PyPI
    pub fn with_repository(mut self, repository: impl Into<String>) -> Self {
        self.repository = Some(repository.into());
        self
    }

    fn python(&self, checkout: &Path) -> CommandSpec {
        CommandSpec::new("python3").current_dir(checkout)
    }
}

impl RegistryAdapter for PythonAdapter {
    fn name(&self) -> &'static str {
        "python"
    }

    fn default_registry(&self) -> &'static str {
        "pypi"
    }

    fn registry(&self) -> &str {
        self.repository
            .as_deref()
            .unwrap_or_else(|| self.default_registry())
    }

    fn publish_commands(&self, checkout: &Path) -> Vec<CommandSpec> {
        let repository = self.registry();
        match self.tool {
            PythonTool::Setuptools => vec![self
                .python(checkout)
                .args(["setup.py", "sdist", "upload", "-r", repository])],
            PythonTool::Twine => vec![
                self.python(checkout).args(["-m", "build", "--sdist"]),
                self.python(checkout)
                    .args(["-m", "twine", "upload", "-r", repository, "dist/*"]),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setuptools_upload() {
        let adapter = PythonAdapter::new(PythonTool::Setuptools);
        let commands = adapter.publish_commands(Path::new("/tmp/checkout"));

        assert_eq!(commands.len(), 1);
        assert_eq!(
            commands[0].to_string(),
            "python3 setup.py sdist upload -r pypi"
        );
        assert_eq!(
            commands[0].cwd.as_deref(),
            Some(Path::new("/tmp/checkout"))
        );
    }

    #[test]
    fn test_twine_upload_to_named_repository() {
        let adapter = PythonAdapter::new(PythonTool::Twine).with_repository("testpypi");
        let lines: Vec<String> = adapter
            .publish_commands(Path::new("/tmp/checkout"))
            .iter()
            .map(ToString::to_string)
            .collect();

        assert_eq!(
            lines,
            vec![
                "python3 -m build --sdist",
                "python3 -m twine upload -r testpypi dist/*",
            ]
        );
    }

    #[test]
    fn test_tool_from_config() {
        assert_eq!(
            PythonTool::from_config("setuptools"),
            Some(PythonTool::Setuptools)
        );
        assert_eq!(PythonTool::from_config("twine"), Some(PythonTool::Twine));
        assert_eq!(PythonTool::from_config("poetry"), None);
    }
}
