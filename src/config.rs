//! Harness configuration
//!
//! Every harness works with no configuration at all. A `wizcheck.toml` in the
//! working directory (or a file passed with `--config`) can override the
//! window geometry, the wizard module lookup and the verification target.
//!
//! ```toml
//! [launch]
//! module = "nextcloud_restore_and_backup_v9"
//! interpreter = "python3"
//! extensions = ["py"]
//! search_path = ["../app"]
//!
//! [verify]
//! target = "nextcloud_restore_and_backup-v9.py"
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

/// File name picked up from the working directory when `--config` is absent.
pub const CONFIG_FILE_NAME: &str = "wizcheck.toml";

pub const DEFAULT_VIEWER_TITLE: &str = "Tailscale Navigation Fix - Manual Test Instructions";
pub const DEFAULT_VIEWER_WIDTH: u32 = 800;
pub const DEFAULT_VIEWER_HEIGHT: u32 = 600;

pub const DEFAULT_WIZARD_MODULE: &str = "nextcloud_restore_and_backup_v9";
pub const DEFAULT_WIZARD_INTERPRETER: &str = "python3";
pub const DEFAULT_WIZARD_GEOMETRY: (u32, u32) = (900, 900);

pub const DEFAULT_VERIFY_TARGET: &str = "nextcloud_restore_and_backup-v9.py";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HarnessConfig {
    pub viewer: ViewerConfig,
    pub launch: LaunchConfig,
    pub verify: VerifyConfig,
}

/// Instruction viewer window settings
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ViewerConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            title: DEFAULT_VIEWER_TITLE.to_string(),
            width: DEFAULT_VIEWER_WIDTH,
            height: DEFAULT_VIEWER_HEIGHT,
        }
    }
}

/// How the wizard launcher finds and starts the external wizard
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LaunchConfig {
    /// Module name looked up on the search path
    pub module: String,
    /// Program used to run the resolved module; `None` executes it directly
    pub interpreter: Option<String>,
    /// Extensions tried after the bare module name, without the dot
    pub extensions: Vec<String>,
    /// Extra directories searched after the launcher's own directory
    pub search_path: Vec<PathBuf>,
    /// Default wizard geometry, reported in the checklist
    pub geometry: (u32, u32),
}

impl Default for LaunchConfig {
    fn default() -> Self {
        Self {
            module: DEFAULT_WIZARD_MODULE.to_string(),
            interpreter: Some(DEFAULT_WIZARD_INTERPRETER.to_string()),
            extensions: vec!["py".to_string()],
            search_path: Vec::new(),
            geometry: DEFAULT_WIZARD_GEOMETRY,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VerifyConfig {
    pub target: PathBuf,
}

impl Default for VerifyConfig {
    fn default() -> Self {
        Self {
            target: PathBuf::from(DEFAULT_VERIFY_TARGET),
        }
    }
}

impl HarnessConfig {
    /// Parse configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        toml::from_str(toml_str).context("Failed to parse harness configuration")
    }

    /// Load configuration.
    ///
    /// An explicit path must exist and parse. Without one, `wizcheck.toml` in
    /// the working directory is used when present, otherwise the defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_file(path);
        }

        let implicit = Path::new(CONFIG_FILE_NAME);
        if implicit.is_file() {
            return Self::load_file(implicit);
        }

        log::debug!("No {CONFIG_FILE_NAME} found, using built-in defaults");
        Ok(Self::default())
    }

    fn load_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::from_toml(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        log::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_fixed_values() {
        let config = HarnessConfig::default();
        assert_eq!(config.viewer.width, 800);
        assert_eq!(config.viewer.height, 600);
        assert!(config.viewer.title.contains("Tailscale Navigation Fix"));
        assert_eq!(config.launch.module, "nextcloud_restore_and_backup_v9");
        assert_eq!(config.launch.geometry, (900, 900));
        assert_eq!(
            config.verify.target,
            PathBuf::from("nextcloud_restore_and_backup-v9.py")
        );
    }

    #[test]
    fn test_partial_toml_keeps_defaults() -> Result<()> {
        let config = HarnessConfig::from_toml(
            r#"
            [launch]
            module = "wizard_v10"
            search_path = ["../app"]
            "#,
        )?;
        assert_eq!(config.launch.module, "wizard_v10");
        assert_eq!(config.launch.search_path, vec![PathBuf::from("../app")]);
        assert_eq!(config.launch.extensions, vec!["py".to_string()]);
        assert_eq!(config.viewer, ViewerConfig::default());
        assert_eq!(config.verify, VerifyConfig::default());
        Ok(())
    }

    #[test]
    fn test_unknown_keys_rejected() {
        assert!(HarnessConfig::from_toml("[verify]\npath = \"x.py\"\n").is_err());
        assert!(HarnessConfig::from_toml("[nope]\n").is_err());
    }

    #[test]
    fn test_load_missing_explicit_file_fails() {
        let missing = Path::new("/definitely/not/here/wizcheck.toml");
        assert!(HarnessConfig::load(Some(missing)).is_err());
    }

    #[test]
    fn test_load_explicit_file() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("custom.toml");
        fs::write(&path, "[viewer]\nwidth = 1024\n")?;

        let config = HarnessConfig::load(Some(&path))?;
        assert_eq!(config.viewer.width, 1024);
        assert_eq!(config.viewer.height, 600);
        Ok(())
    }
}
