//! Configuration file support for hdr-nits.
//!
//! Supports TOML configuration from:
//! - XDG config: `~/.config/hdr-nits/config.toml` (lowest priority)
//! - Project-local: `.hdr-nits.toml` (searched up directory tree)
//! - CLI flags (highest priority, applied separately)

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info};

/// Top-level configuration structure.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Frame discovery settings.
    pub input: InputConfig,
    /// Output formatting settings.
    pub output: OutputConfig,
}

/// Frame discovery configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Recurse into subdirectories by default.
    pub recursive: Option<bool>,
    /// Frame file extension.
    pub extension: Option<String>,
}

/// Output formatting configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format: "text" or "json".
    pub format: Option<String>,
    /// Show progress bar.
    pub progress: Option<bool>,
    /// Only print the summary.
    pub quiet: Option<bool>,
}

impl AppConfig {
    /// Load configuration from XDG and project-local files.
    ///
    /// Priority (lowest to highest):
    /// 1. XDG config: `~/.config/hdr-nits/config.toml`
    /// 2. Project-local: `.hdr-nits.toml` (searched up from cwd)
    ///
    /// Missing files are silently ignored. Invalid values are logged as warnings.
    pub fn load() -> Self {
        let mut config = Self::default();

        if let Some(xdg_path) = xdg_config_path() {
            if xdg_path.exists() {
                info!("Loading XDG config: {}", xdg_path.display());
                if let Some(xdg_config) = load_file(&xdg_path) {
                    config = xdg_config;
                }
            } else {
                debug!("XDG config not found: {}", xdg_path.display());
            }
        }

        if let Some(project_path) = find_project_config() {
            info!("Loading project config: {}", project_path.display());
            if let Some(project_config) = load_file(&project_path) {
                config.merge(project_config);
            }
        }

        if let Err(e) = config.validate() {
            eprintln!("warning: {e}");
        }

        config
    }

    /// Validate configuration values are within acceptable ranges.
    fn validate(&self) -> Result<(), String> {
        if let Some(ref f) = self.output.format {
            if f != "text" && f != "json" {
                return Err(format!("output.format must be 'text' or 'json', got '{f}'"));
            }
        }

        if let Some(ref ext) = self.input.extension {
            if ext.trim_start_matches('.').is_empty() {
                return Err("input.extension must not be empty".to_string());
            }
        }

        Ok(())
    }

    /// Merge another config into this one.
    /// Values from `other` override values in `self` when present.
    fn merge(&mut self, other: Self) {
        self.input.recursive = other.input.recursive.or(self.input.recursive);
        self.input.extension = other
            .input
            .extension
            .or_else(|| self.input.extension.take());

        self.output.format = other.output.format.or_else(|| self.output.format.take());
        self.output.progress = other.output.progress.or(self.output.progress);
        self.output.quiet = other.output.quiet.or(self.output.quiet);
    }
}

/// Get the XDG config file path.
fn xdg_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("hdr-nits").join("config.toml"))
}

/// Find project-local config by searching up from current directory.
fn find_project_config() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    find_config_in_parents(&cwd)
}

/// Search for `.hdr-nits.toml` in the given directory and its parents.
fn find_config_in_parents(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(".hdr-nits.toml"))
        .find(|path| path.exists())
}

/// Load and parse a TOML config file.
fn load_file(path: &Path) -> Option<AppConfig> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            tracing::warn!("Failed to read config file {}: {}", path.display(), e);
            return None;
        }
    };

    match toml::from_str(&content) {
        Ok(config) => Some(config),
        Err(e) => {
            tracing::warn!("Failed to parse config file {}: {}", path.display(), e);
            None
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert!(config.input.recursive.is_none());
        assert!(config.output.format.is_none());
    }

    #[test]
    fn test_parse_empty_config() {
        let config: AppConfig = toml::from_str("").expect("parse empty config");
        assert!(config.input.extension.is_none());
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r"
[input]
recursive = true
extension = 'dpx'

[output]
format = 'json'
progress = true
quiet = false
";
        let config: AppConfig = toml::from_str(toml).expect("parse full config");

        assert_eq!(config.input.recursive, Some(true));
        assert_eq!(config.input.extension.as_deref(), Some("dpx"));
        assert_eq!(config.output.format.as_deref(), Some("json"));
        assert_eq!(config.output.progress, Some(true));
        assert_eq!(config.output.quiet, Some(false));
    }

    #[test]
    fn test_merge_overrides_present_values_only() {
        let mut base: AppConfig = toml::from_str(
            r"
[input]
recursive = true
extension = 'dpx'

[output]
format = 'json'
",
        )
        .expect("parse base");

        let override_config: AppConfig = toml::from_str(
            r"
[output]
format = 'text'
quiet = true
",
        )
        .expect("parse override");

        base.merge(override_config);

        assert_eq!(base.input.recursive, Some(true));
        assert_eq!(base.input.extension.as_deref(), Some("dpx"));
        assert_eq!(base.output.format.as_deref(), Some("text"));
        assert_eq!(base.output.quiet, Some(true));
    }

    #[test]
    fn test_merge_empty_override_preserves_base() {
        let mut base: AppConfig = toml::from_str(
            r"
[output]
progress = true
",
        )
        .expect("parse base");

        base.merge(AppConfig::default());

        assert_eq!(base.output.progress, Some(true));
    }

    #[test]
    fn test_invalid_field_type_rejected() {
        let result: Result<AppConfig, _> = toml::from_str(
            r#"
[input]
recursive = "yes"
"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_output_format_invalid() {
        let mut config = AppConfig::default();
        config.output.format = Some("xml".to_string());

        let result = config.validate();
        assert!(result.unwrap_err().contains("output.format"));
    }

    #[test]
    fn test_validate_empty_extension() {
        let mut config = AppConfig::default();
        config.input.extension = Some(".".to_string());

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_valid_passes() {
        let config: AppConfig = toml::from_str(
            r"
[input]
extension = 'dpx'

[output]
format = 'text'
",
        )
        .expect("parse valid config");

        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_find_config_in_parents() {
        let root = tempfile::tempdir().unwrap();
        let nested = root.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(root.path().join(".hdr-nits.toml"), "").unwrap();

        assert_eq!(
            find_config_in_parents(&nested),
            Some(root.path().join(".hdr-nits.toml"))
        );
    }
}
