use crate::errors::{AppError, AppResult};
use crate::utils::path::absolute_root;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Data root; each workspace lives in a sub-directory.
    #[serde(default = "default_root")]
    pub root: String,
    #[serde(default = "default_workspace")]
    pub workspace: String,
    /// chrono format used when printing start/end times.
    #[serde(default = "default_date_format")]
    pub date_format: String,
    #[serde(default = "default_separator_char")]
    pub separator_char: String,
}

fn default_root() -> String {
    Config::config_dir().to_string_lossy().to_string()
}
fn default_workspace() -> String {
    "default".to_string()
}
fn default_date_format() -> String {
    "%Y-%m-%d %H:%M".to_string()
}
fn default_separator_char() -> String {
    "-".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root: default_root(),
            workspace: default_workspace(),
            date_format: default_date_format(),
            separator_char: default_separator_char(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("rtrack")
        } else {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".rtrack")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("rtrack.conf")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        let path = Self::config_file();
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(&path).map_err(|_| AppError::ConfigLoad)?;
        Ok(serde_yaml::from_str(&content)?)
    }

    pub fn save(&self) -> AppResult<()> {
        fs::create_dir_all(Self::config_dir()).map_err(|_| AppError::ConfigSave)?;
        let yaml = serde_yaml::to_string(self)?;
        fs::write(Self::config_file(), yaml).map_err(|_| AppError::ConfigSave)?;
        Ok(())
    }

    /// First character of `separator_char`, `-` when empty.
    pub fn separator(&self) -> char {
        self.separator_char.chars().next().unwrap_or('-')
    }

    /// Apply command-line overrides. A relative root is resolved against
    /// the current directory.
    pub fn with_overrides(mut self, root: Option<&str>, workspace: Option<&str>) -> Self {
        if let Some(r) = root {
            self.root = absolute_root(r).to_string_lossy().to_string();
        }
        if let Some(ws) = workspace {
            self.workspace = ws.to_string();
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let cfg: Config = serde_yaml::from_str("workspace: work\n").unwrap();
        assert_eq!(cfg.workspace, "work");
        assert_eq!(cfg.date_format, "%Y-%m-%d %H:%M");
        assert_eq!(cfg.separator(), '-');
    }

    #[test]
    fn overrides_replace_root_and_workspace() {
        let cfg = Config::default().with_overrides(Some("/tmp/data"), Some("side"));
        assert_eq!(cfg.root, "/tmp/data");
        assert_eq!(cfg.workspace, "side");
    }
}
