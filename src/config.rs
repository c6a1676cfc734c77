use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::domain::keywords::{Keywords, UNEXPANDED_FULL, UNEXPANDED_REFNAMES};
use crate::error::{Result, VersionError};

/// File name looked up in the working directory and the user config directory.
pub const CONFIG_FILE_NAME: &str = "lconf-version.toml";

/// Complete configuration for version resolution.
///
/// Fixed per build: tag and parent-directory prefixes, the path of the version
/// file relative to the source root, the VCS command surface and the two
/// export-substituted keywords.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct VersionConfig {
    #[serde(default)]
    pub tag_prefix: String,

    #[serde(default = "default_parentdir_prefix")]
    pub parentdir_prefix: String,

    #[serde(default = "default_versionfile_source")]
    pub versionfile_source: String,

    #[serde(default)]
    pub vcs: VcsConfig,

    #[serde(default)]
    pub keywords: KeywordsConfig,
}

fn default_parentdir_prefix() -> String {
    "LCONF-".to_string()
}

fn default_versionfile_source() -> String {
    "LCONF/_version.py".to_string()
}

fn default_commands() -> Vec<String> {
    vec!["git".to_string()]
}

fn default_metadata_dir() -> String {
    ".git".to_string()
}

fn default_refnames() -> String {
    UNEXPANDED_REFNAMES.to_string()
}

fn default_full() -> String {
    UNEXPANDED_FULL.to_string()
}

/// How the live-repository resolver reaches the version-control tool.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct VcsConfig {
    /// Candidate executable names, tried in order.
    #[serde(default = "default_commands")]
    pub commands: Vec<String>,

    /// Directory whose presence under the root marks a live checkout.
    #[serde(default = "default_metadata_dir")]
    pub metadata_dir: String,

    #[serde(default)]
    pub hide_stderr: bool,
}

impl Default for VcsConfig {
    fn default() -> Self {
        VcsConfig {
            commands: default_commands(),
            metadata_dir: default_metadata_dir(),
            hide_stderr: false,
        }
    }
}

/// Keyword placeholders, rewritten by `git archive` when export-subst is enabled.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct KeywordsConfig {
    #[serde(default = "default_refnames")]
    pub refnames: String,

    #[serde(default = "default_full")]
    pub full: String,
}

impl Default for KeywordsConfig {
    fn default() -> Self {
        KeywordsConfig {
            refnames: default_refnames(),
            full: default_full(),
        }
    }
}

impl KeywordsConfig {
    pub fn to_keywords(&self) -> Keywords {
        Keywords::new(self.refnames.clone(), self.full.clone())
    }
}

impl Default for VersionConfig {
    fn default() -> Self {
        VersionConfig {
            tag_prefix: String::new(),
            parentdir_prefix: default_parentdir_prefix(),
            versionfile_source: default_versionfile_source(),
            vcs: VcsConfig::default(),
            keywords: KeywordsConfig::default(),
        }
    }
}

impl VersionConfig {
    /// Checks the values the resolver relies on.
    ///
    /// # Returns
    /// * `Ok(())` - Configuration is usable
    /// * `Err(VersionError::Config)` - Empty or absolute `versionfile_source`, or no VCS command
    pub fn validate(&self) -> Result<()> {
        if self.versionfile_source.trim().is_empty() {
            return Err(VersionError::config("versionfile_source must not be empty"));
        }

        if Path::new(&self.versionfile_source).is_absolute() {
            return Err(VersionError::config(format!(
                "versionfile_source must be relative, got '{}'",
                self.versionfile_source
            )));
        }

        if self.vcs.commands.iter().all(|c| c.trim().is_empty()) {
            return Err(VersionError::config(
                "vcs.commands must name at least one executable",
            ));
        }

        Ok(())
    }

    /// Number of directory levels between the version file and the source root.
    ///
    /// Counts raw separator-delimited segments, so `LCONF//_version.py` and
    /// `LCONF/./_version.py` are both three levels deep.
    pub fn versionfile_depth(&self) -> usize {
        self.versionfile_source
            .split(std::path::MAIN_SEPARATOR)
            .count()
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `lconf-version.toml` in current directory
/// 3. `lconf-version.toml` in user config directory
/// 4. Default configuration if no file found
///
/// The loaded configuration is validated before it is returned.
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
///
/// # Returns
/// * `Ok(VersionConfig)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read, parsed or validated
pub fn load_config(config_path: Option<&str>) -> Result<VersionConfig> {
    let local = Path::new(".").join(CONFIG_FILE_NAME);

    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if local.exists() {
        fs::read_to_string(local)?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(VersionConfig::default());
        }
    } else {
        return Ok(VersionConfig::default());
    };

    let config: VersionConfig = toml::from_str(&config_str)?;
    config.validate()?;
    Ok(config)
}
