//! Configuration types for the quiz generator

use crate::export::ExportFormat;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default file name looked up in the `Config` directory next to the executable
pub const DEFAULT_CONFIG_FILE: &str = "quizgen.toml";

/// Generation service settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationSettings {
    /// Simulated latency of the mock generator in milliseconds
    pub delay_ms: u64,
    /// Give up waiting for a generation after this many seconds
    pub timeout_secs: u64,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            delay_ms: 2500,
            timeout_secs: 30,
        }
    }
}

impl GenerationSettings {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

/// Upload limits, enforced when a file is added to the wizard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadPolicy {
    /// Largest accepted file in bytes
    pub max_file_bytes: u64,
    /// Largest number of files per quiz
    pub max_files: usize,
    /// Accepted extensions, lowercase, without the dot
    pub allowed_extensions: Vec<String>,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self {
            max_file_bytes: 10 * 1024 * 1024, // 10MB
            max_files: 10,
            allowed_extensions: vec![
                "pdf".into(),
                "doc".into(),
                "docx".into(),
                "ppt".into(),
                "pptx".into(),
                "txt".into(),
            ],
        }
    }
}

impl UploadPolicy {
    /// Check if an extension is on the allow-list
    pub fn allows_extension(&self, ext: &str) -> bool {
        let ext = ext.trim_start_matches('.');
        self.allowed_extensions
            .iter()
            .any(|e| e.trim_start_matches('.').eq_ignore_ascii_case(ext))
    }

    /// Allow-list rendered for hints, e.g. `PDF, DOC, TXT`
    pub fn extensions_label(&self) -> String {
        self.allowed_extensions
            .iter()
            .map(|e| e.trim_start_matches('.').to_uppercase())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Export settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    /// Directory receiving exported documents
    pub output_dir: PathBuf,
    /// Document format
    pub format: ExportFormat,
    /// Questions per page in paginated formats
    pub questions_per_page: usize,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("exports"),
            format: ExportFormat::default(),
            questions_per_page: 5,
        }
    }
}

/// Configuration for the quiz generator
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// UI language (`en`, `id`); detected from the system when unset
    pub language: Option<String>,

    pub generation: GenerationSettings,

    pub uploads: UploadPolicy,

    pub export: ExportSettings,
}

impl AppConfig {
    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: AppConfig = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::WriteError {
                path: path.to_path_buf(),
                source: e,
            })?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::SerializeError { source: e })?;

        fs::write(path, content).map_err(|e| ConfigError::WriteError {
            path: path.to_path_buf(),
            source: e,
        })?;

        Ok(())
    }

    /// Reject values that would make the wizard unusable
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.uploads.max_files == 0 {
            return Err(ConfigError::Invalid("uploads.max_files must be at least 1".into()));
        }
        if self.uploads.allowed_extensions.is_empty() {
            return Err(ConfigError::Invalid(
                "uploads.allowed_extensions must not be empty".into(),
            ));
        }
        if self.export.questions_per_page == 0 {
            return Err(ConfigError::Invalid(
                "export.questions_per_page must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Generate a sample configuration file content
    pub fn sample_config() -> String {
        r#"# Quiz Generator Configuration File
# This file uses TOML format (https://toml.io)

# UI language: "en" or "id". Detected from the system when omitted.
# language = "id"

[generation]
# Simulated generation latency in milliseconds
delay_ms = 2500
# Give up on a generation after this many seconds
timeout_secs = 30

[uploads]
# Largest accepted file in bytes (10MB)
max_file_bytes = 10485760
# Largest number of files per quiz
max_files = 10
allowed_extensions = ["pdf", "doc", "docx", "ppt", "pptx", "txt"]

[export]
# Directory receiving exported quizzes
output_dir = "exports"
# "markdown" or "json"
format = "markdown"
# Questions per page in the Markdown export
questions_per_page = 5
"#
        .to_string()
    }
}

/// Errors that can occur when loading or saving configuration
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to read configuration file
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to parse configuration file
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
    /// Failed to write configuration file
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to serialize configuration
    SerializeError { source: toml::ser::Error },
    /// Configuration parsed but holds an unusable value
    Invalid(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ReadError { path, source } => {
                write!(f, "Failed to read config file '{}': {}", path.display(), source)
            }
            ConfigError::ParseError { path, source } => {
                write!(f, "Failed to parse config file '{}': {}", path.display(), source)
            }
            ConfigError::WriteError { path, source } => {
                write!(f, "Failed to write config file '{}': {}", path.display(), source)
            }
            ConfigError::SerializeError { source } => {
                write!(f, "Failed to serialize config: {}", source)
            }
            ConfigError::Invalid(message) => write!(f, "Invalid configuration: {}", message),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::ReadError { source, .. } => Some(source),
            ConfigError::ParseError { source, .. } => Some(source),
            ConfigError::WriteError { source, .. } => Some(source),
            ConfigError::SerializeError { source } => Some(source),
            ConfigError::Invalid(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_sample_config_parses_to_defaults() {
        let parsed: AppConfig = toml::from_str(&AppConfig::sample_config()).unwrap();
        assert_eq!(parsed, AppConfig::default());
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let parsed: AppConfig = toml::from_str("[generation]\ndelay_ms = 10\n").unwrap();
        assert_eq!(parsed.generation.delay_ms, 10);
        assert_eq!(parsed.generation.timeout_secs, 30);
        assert_eq!(parsed.uploads, UploadPolicy::default());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Config").join(DEFAULT_CONFIG_FILE);

        let mut config = AppConfig::default();
        config.language = Some("id".into());
        config.export.questions_per_page = 3;
        config.save_to_file(&path).unwrap();

        let loaded = AppConfig::load_from_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(&path, "[uploads]\nmax_files = 0\n").unwrap();

        let err = AppConfig::load_from_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = AppConfig::load_from_file("/definitely/not/here.toml").unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.toml"));
    }

    #[test]
    fn test_extension_allow_list_is_case_insensitive() {
        let policy = UploadPolicy::default();
        assert!(policy.allows_extension("PDF"));
        assert!(!policy.allows_extension("exe"));
        assert_eq!(policy.extensions_label(), "PDF, DOC, DOCX, PPT, PPTX, TXT");
    }

    #[test]
    fn test_configured_extensions_match_any_case() {
        let parsed: AppConfig =
            toml::from_str("[uploads]\nallowed_extensions = [\"PDF\", \".Txt\"]\n").unwrap();
        assert!(parsed.uploads.allows_extension("pdf"));
        assert!(parsed.uploads.allows_extension("TXT"));
        assert!(!parsed.uploads.allows_extension("doc"));
    }
}
