use std::fs;
use std::path::Path;

use anyhow::Context;
use diffcheck_engine::EngineConfig;
use diffcheck_render::{SideBySideOptions, UnifiedOptions};
use serde::{Deserialize, Serialize};

/// Settings loaded from a `--config` file. Command-line flags take
/// precedence over anything set here.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub engine: EngineConfig,
    pub unified: UnifiedOptions,
    pub side_by_side: SideBySideOptions,
    /// Maximum width of each side-by-side column.
    pub wrap_column: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            engine: EngineConfig::default(),
            unified: UnifiedOptions::default(),
            side_by_side: SideBySideOptions::default(),
            wrap_column: 80,
        }
    }
}

impl Settings {
    /// Load settings from `path`, or use defaults when no path is given.
    pub fn resolve(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read settings file {}", path.display()))?;
        toml::from_str(&raw)
            .with_context(|| format!("invalid settings file {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use diffcheck_engine::Algorithm;
    use std::io::Write;

    #[test]
    fn defaults_without_file() {
        let s = Settings::resolve(None).unwrap();
        assert_eq!(s, Settings::default());
        assert_eq!(s.wrap_column, 80);
        assert_eq!(s.unified.context, 3);
    }

    #[test]
    fn loads_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "wrap_column = 60\n\n[engine]\nalgorithm = \"patience\"\nstrip_leading = [\" \"]\n\n[unified]\ncontext = 5\nleft_label = \"before\"\n\n[side_by_side]\ncontext = 1\nintraline = false"
        )
        .unwrap();

        let s = Settings::load(file.path()).unwrap();
        assert_eq!(s.wrap_column, 60);
        assert_eq!(s.engine.algorithm, Algorithm::Patience);
        assert_eq!(s.engine.strip_set(), Some(&[' '][..]));
        assert_eq!(s.unified.context, 5);
        assert_eq!(s.unified.left_label, "before");
        assert_eq!(s.unified.right_label, "Text 2");
        assert_eq!(s.side_by_side.context, Some(1));
        assert!(!s.side_by_side.intraline);
    }

    #[test]
    fn invalid_file_names_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[engine]\nalgorithm = 3").unwrap();
        let err = Settings::load(file.path()).unwrap_err();
        assert!(err.to_string().contains("invalid settings file"));
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Settings::load(&dir.path().join("absent.toml")).unwrap_err();
        assert!(err.to_string().contains("failed to read settings file"));
    }
}
