//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/enroll/enroll.toml`
//! 3. Environment variables: `ENROLL_*` prefix
//! 4. Command line (`--file`), applied by the caller

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::ApplicationError;
use crate::domain::expand_env_vars;

/// Default name of the enrollment file, relative to the working directory.
pub const DEFAULT_DATA_FILE: &str = "Enrollments.json";

/// Unified configuration for enroll.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Enrollment file the session loads from and saves to
    pub data_file: PathBuf,
    /// Ask to save pending registrations when leaving the program
    pub check_unsaved_on_exit: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            check_unsaved_on_exit: true,
        }
    }
}

/// Raw settings for intermediate parsing (`None` means "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub data_file: Option<PathBuf>,
    pub check_unsaved_on_exit: Option<bool>,
}

/// Get the XDG config directory for enroll.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "enroll").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("enroll.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Load settings from defaults, the global config file and `ENROLL_*`.
    pub fn load() -> Result<Self, ApplicationError> {
        Self::load_from(global_config_path().as_deref())
    }

    /// Load settings using an explicit config file location.
    ///
    /// A missing file is skipped; an unreadable or malformed one is an error.
    pub fn load_from(config_file: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(path) = config_file {
            if path.exists() {
                debug!("load: config file {}", path.display());
                let raw = load_raw_settings(path)?;
                current = current.merge_with(&raw);
            }
        }

        current = Self::apply_env_overrides(current)?;
        current.expand_paths();

        Ok(current)
    }

    /// Override the data file, e.g. from `--file`.
    pub fn with_data_file(mut self, data_file: Option<&Path>) -> Self {
        if let Some(path) = data_file {
            self.data_file = path.to_path_buf();
            self.expand_paths();
        }
        self
    }

    /// Overlay wins where it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            data_file: overlay
                .data_file
                .clone()
                .unwrap_or_else(|| self.data_file.clone()),
            check_unsaved_on_exit: overlay
                .check_unsaved_on_exit
                .unwrap_or(self.check_unsaved_on_exit),
        }
    }

    /// Apply ENROLL_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("ENROLL")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("data_file") {
            settings.data_file = PathBuf::from(val);
        }
        if let Ok(val) = config.get_bool("check_unsaved_on_exit") {
            settings.check_unsaved_on_exit = val;
        }

        Ok(settings)
    }

    /// Expand `~` and `$VAR` in the data file path.
    fn expand_paths(&mut self) {
        let expanded = expand_env_vars(self.data_file.to_string_lossy().as_ref());
        self.data_file = PathBuf::from(expanded);
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# enroll configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/enroll/enroll.toml
#   Env:    ENROLL_* environment variables (e.g. ENROLL_DATA_FILE)
#   CLI:    --file <PATH>

# Enrollment file, relative to the working directory unless absolute
# data_file = "Enrollments.json"

# Offer to save pending registrations when choosing "Exit the program"
# check_unsaved_on_exit = true
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_defaults_when_created_then_uses_well_known_file() {
        let settings = Settings::default();
        assert_eq!(settings.data_file, PathBuf::from("Enrollments.json"));
        assert!(settings.check_unsaved_on_exit);
    }

    #[test]
    fn given_partial_overlay_when_merging_then_keeps_unspecified_values() {
        let overlay = RawSettings {
            data_file: None,
            check_unsaved_on_exit: Some(false),
        };
        let merged = Settings::default().merge_with(&overlay);
        assert_eq!(merged.data_file, PathBuf::from(DEFAULT_DATA_FILE));
        assert!(!merged.check_unsaved_on_exit);
    }

    #[test]
    fn given_tilde_in_data_file_when_expand_paths_then_expands_to_home() {
        let mut settings = Settings {
            data_file: PathBuf::from("~/enrollments.json"),
            check_unsaved_on_exit: true,
        };

        settings.expand_paths();

        let home = std::env::var("HOME").expect("HOME should be set");
        assert!(
            settings.data_file.to_string_lossy().starts_with(&home),
            "data_file should start with home dir: {}",
            settings.data_file.display()
        );
    }

    #[test]
    fn given_cli_file_when_overriding_then_replaces_data_file() {
        let settings = Settings::default().with_data_file(Some(Path::new("/tmp/other.json")));
        assert_eq!(settings.data_file, PathBuf::from("/tmp/other.json"));

        let unchanged = Settings::default().with_data_file(None);
        assert_eq!(unchanged, Settings::default());
    }

    #[test]
    fn given_settings_when_rendered_then_toml_names_fields() {
        let toml = Settings::default().to_toml().unwrap();
        assert!(toml.contains("data_file = \"Enrollments.json\""));
        assert!(toml.contains("check_unsaved_on_exit = true"));
    }
}
