//! Reading and rewriting the version-declaration file

use std::ops::Range;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::Regex;
use tracing::{debug, info, instrument};

use crate::error::{Result, VersionError};
use crate::process::Executor;
use crate::version::Version;

fn version_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"__version__ = ['"](?P<version>[^'"]+)['"]"#)
            .expect("version pattern is valid")
    })
}

/// Contents of a file declaring `__version__ = '<major>.<minor>.<patch>'`
#[derive(Debug, Clone)]
pub struct VersionFile {
    path: PathBuf,
    content: String,
}

impl VersionFile {
    /// Read a version file from disk
    #[instrument(fields(path = %path.display()))]
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| VersionError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(bytes = content.len(), "read version file");
        Ok(Self::from_content(path, content))
    }

    /// Wrap already-loaded contents
    pub fn from_content(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    /// Byte range of the version text in the first matching assignment
    fn version_span(&self) -> Result<Range<usize>> {
        version_regex()
            .captures(&self.content)
            .and_then(|caps| caps.name("version"))
            .map(|m| m.range())
            .ok_or_else(|| VersionError::PatternNotFound(self.path.clone()).into())
    }

    /// The declared version string, unparsed
    pub fn raw_version(&self) -> Result<&str> {
        let span = self.version_span()?;
        Ok(&self.content[span])
    }

    /// The declared version
    pub fn version(&self) -> Result<Version> {
        let version = Version::parse(self.raw_version()?)?;
        debug!(path = %self.path.display(), version = %version, "resolved current version");
        Ok(version)
    }

    /// File contents with the declared version replaced by `version`
    ///
    /// Everything outside the version text, including the quote style, is
    /// kept byte for byte.
    pub fn render(&self, version: &Version) -> Result<String> {
        let span = self.version_span()?;
        let mut rendered = String::with_capacity(self.content.len() + 8);
        rendered.push_str(&self.content[..span.start]);
        rendered.push_str(&version.to_string());
        rendered.push_str(&self.content[span.end..]);
        Ok(rendered)
    }

    /// Write `version` into the file, or only report it in fake mode
    pub fn write_version(&self, executor: &Executor<'_>, version: &Version) -> Result<()> {
        let rendered = self.render(version)?;

        if !executor.allow_write(&self.path) {
            return Ok(());
        }

        executor
            .reporter()
            .step(&format!("Updating version in {}", self.path.display()));
        std::fs::write(&self.path, rendered).map_err(|source| VersionError::Write {
            path: self.path.clone(),
            source,
        })?;
        info!(path = %self.path.display(), version = %version, "wrote version file");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TagshipError;
    use crate::testing::{CollectingReporter, ScriptedRunner};
    use crate::types::{RunMode, VersionPart};
    use tempfile::TempDir;

    const INIT_PY: &str = "\"\"\"Orchestra.\"\"\"\n\n__version__ = '1.2.3'\ndefault_app_config = 'orchestra.apps.OrchestraConfig'\n";

    #[test]
    fn test_single_quoted_minor_bump() {
        let file = VersionFile::from_content("orchestra/__init__.py", INIT_PY);
        let current = file.version().unwrap();
        assert_eq!(current.to_string(), "1.2.3");
        assert_eq!(current.bump(VersionPart::Minor).unwrap().to_string(), "1.3.0");
    }

    #[test]
    fn test_double_quoted_major_bump() {
        let file = VersionFile::from_content("pkg/__init__.py", "__version__ = \"0.9.9\"\n");
        let next = file.version().unwrap().bump(VersionPart::Major).unwrap();
        assert_eq!(next.to_string(), "1.0.0");
    }

    #[test]
    fn test_render_preserves_surrounding_bytes() {
        let file = VersionFile::from_content("pkg/__init__.py", INIT_PY);
        let rendered = file.render(&Version::new(1, 3, 0)).unwrap();

        assert_eq!(
            rendered,
            INIT_PY.replace("__version__ = '1.2.3'", "__version__ = '1.3.0'")
        );
    }

    #[test]
    fn test_render_keeps_double_quotes() {
        let content = "x = 1\r\n__version__ = \"0.9.9\"\r\ny = 2\r\n";
        let file = VersionFile::from_content("pkg/__init__.py", content);
        let rendered = file.render(&Version::new(1, 0, 0)).unwrap();
        assert_eq!(rendered, "x = 1\r\n__version__ = \"1.0.0\"\r\ny = 2\r\n");
    }

    #[test]
    fn test_only_first_declaration_is_replaced() {
        let content = "__version__ = '1.0.0'\n# __version__ = '0.1.0'\n";
        let file = VersionFile::from_content("pkg/__init__.py", content);
        let rendered = file.render(&Version::new(1, 0, 1)).unwrap();
        assert_eq!(rendered, "__version__ = '1.0.1'\n# __version__ = '0.1.0'\n");
    }

    #[test]
    fn test_missing_pattern_is_typed_error() {
        let file = VersionFile::from_content("pkg/__init__.py", "VERSION = '1.0.0'\n");
        let err = file.version().unwrap_err();
        assert!(matches!(
            err,
            TagshipError::Version(VersionError::PatternNotFound(_))
        ));
    }

    #[test]
    fn test_malformed_version_is_typed_error() {
        let file = VersionFile::from_content("pkg/__init__.py", "__version__ = '1.2'\n");
        assert!(matches!(
            file.version(),
            Err(TagshipError::Version(VersionError::Malformed(_, _)))
        ));
    }

    #[test]
    fn test_missing_file() {
        let temp = TempDir::new().unwrap();
        let err = VersionFile::load(&temp.path().join("nope.py")).unwrap_err();
        assert!(matches!(err, TagshipError::Version(VersionError::Read { .. })));
    }

    #[test]
    fn test_write_then_read_round_trips() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("__init__.py");
        std::fs::write(&path, INIT_PY).unwrap();

        let runner = ScriptedRunner::new();
        let reporter = CollectingReporter::new();
        let exec = Executor::new(&runner, &reporter, RunMode::Real);

        let file = VersionFile::load(&path).unwrap();
        let next = file.version().unwrap().bump(VersionPart::Patch).unwrap();
        file.write_version(&exec, &next).unwrap();

        assert_eq!(VersionFile::load(&path).unwrap().version().unwrap(), next);
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, INIT_PY.replace("1.2.3", "1.2.4"));
    }

    #[test]
    fn test_fake_mode_leaves_file_untouched() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("__init__.py");
        std::fs::write(&path, INIT_PY).unwrap();

        let runner = ScriptedRunner::new();
        let reporter = CollectingReporter::new();
        let exec = Executor::new(&runner, &reporter, RunMode::Fake);

        let file = VersionFile::load(&path).unwrap();
        file.write_version(&exec, &Version::new(9, 9, 9)).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), INIT_PY);
        assert_eq!(reporter.skipped().len(), 1);
        assert!(reporter.skipped()[0].contains("__init__.py"));
    }
}
