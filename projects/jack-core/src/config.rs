use jack_emit::OutputFormat;
use jack_types::{JackError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File looked up in the working directory when no `--config` is given.
pub const CONFIG_FILE: &str = "jack.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JackConfig {
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
    /// Directory for artifacts; next to each source when unset.
    #[serde(default)]
    pub dir: Option<PathBuf>,
    /// Also write the token listing of every unit.
    #[serde(default)]
    pub tokens: bool,
}

impl JackConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| JackError::io(path, e.to_string()))?;
        Self::from_toml(&content)
            .map_err(|e| JackError::config(format!("failed to parse {}: {}", path.display(), e)))
    }

    pub fn from_toml(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Reads `explicit` if given, otherwise [CONFIG_FILE] from the working
    /// directory if present, otherwise returns the defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None if Path::new(CONFIG_FILE).is_file() => Self::from_file(CONFIG_FILE),
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jack_types::JackErrorKind;

    #[test]
    fn test_defaults() {
        let config = JackConfig::from_toml("").unwrap();
        assert_eq!(config, JackConfig::default());
        assert_eq!(config.output.format, OutputFormat::Xml);
        assert!(config.output.dir.is_none());
        assert!(!config.output.tokens);
    }

    #[test]
    fn test_output_table() {
        let config = JackConfig::from_toml(
            r#"
            [output]
            format = "json"
            dir = "build"
            tokens = true
            "#,
        )
        .unwrap();
        assert_eq!(config.output.format, OutputFormat::Json);
        assert_eq!(config.output.dir, Some(PathBuf::from("build")));
        assert!(config.output.tokens);
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "[output]\nformat = \"yaml\"\n").unwrap();

        let error = JackConfig::from_file(&path).unwrap_err();
        assert!(matches!(error.kind(), JackErrorKind::ConfigError { .. }));
    }

    #[test]
    fn test_missing_explicit_file_is_io_error() {
        let error = JackConfig::load(Some(Path::new("/definitely/not/here/jack.toml"))).unwrap_err();
        assert!(matches!(error.kind(), JackErrorKind::IoError { .. }));
    }
}
