use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use lull_engine::module::{dylib_file_name, modules_dir_near_exe};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable naming the config file.
pub const CONFIG_ENV: &str = "LULL_CONFIG";
/// Config file looked up in the working directory when `LULL_CONFIG` is unset.
pub const CONFIG_FILE: &str = "lull.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Host settings. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    pub title: String,
    /// Initial window size in logical pixels.
    pub width: f64,
    pub height: f64,

    /// Directory holding the UI module; defaults to the executable's own
    /// directory, then the working directory.
    pub module_dir: Option<PathBuf>,
    /// Library name without platform prefix or extension.
    pub module_name: String,
    /// How often an idle host wakes up to look for a rebuilt module.
    pub module_poll_ms: f64,

    pub font_path: Option<PathBuf>,
    pub font_size: f32,

    /// `env_logger` filter; `RUST_LOG` applies when unset.
    pub log_filter: Option<String>,
    /// Background used until the module clears, `0xRRGGBBAA`.
    pub clear_color: u32,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            title: "lull".to_string(),
            width: 1024.0,
            height: 640.0,
            module_dir: None,
            module_name: "lull_ui".to_string(),
            module_poll_ms: 500.0,
            font_path: None,
            font_size: 20.0,
            log_filter: None,
            clear_color: 0x9696_96ff,
        }
    }
}

impl HostConfig {
    /// Loads `$LULL_CONFIG`, else `lull.toml`, else the defaults.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var_os(CONFIG_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE));
        Self::load_or_default(&path)
    }

    /// A missing file yields the defaults; an unreadable or malformed one
    /// is an error.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        match fs::read_to_string(path) {
            Ok(s) => Self::from_toml_str(&s).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    pub fn from_toml_str(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Full path of the module library for this platform.
    pub fn module_path(&self) -> PathBuf {
        let dir = self
            .module_dir
            .clone()
            .or_else(modules_dir_near_exe)
            .unwrap_or_else(|| PathBuf::from("."));
        dir.join(dylib_file_name(&self.module_name))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn empty_file_is_all_defaults() {
        assert_eq!(HostConfig::from_toml_str("").unwrap(), HostConfig::default());
    }

    #[test]
    fn partial_file_overrides_only_named_fields() {
        let cfg = HostConfig::from_toml_str(
            r#"
            title = "panel"
            module_poll_ms = 250.0
            clear_color = 0x202020ff
            "#,
        )
        .unwrap();
        assert_eq!(cfg.title, "panel");
        assert_eq!(cfg.module_poll_ms, 250.0);
        assert_eq!(cfg.clear_color, 0x2020_20ff);
        assert_eq!(cfg.module_name, "lull_ui");
        assert_eq!(cfg.width, 1024.0);
    }

    #[test]
    fn wrong_type_is_a_parse_error() {
        assert!(HostConfig::from_toml_str("width = \"wide\"").is_err());
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = HostConfig::load_or_default(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(cfg, HostConfig::default());
    }

    #[test]
    fn malformed_file_reports_its_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "title = ").unwrap();
        let err = HostConfig::load_or_default(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains(&file.path().display().to_string()));
    }

    #[test]
    fn module_path_uses_the_configured_dir() {
        let cfg = HostConfig {
            module_dir: Some(PathBuf::from("/opt/lull")),
            module_name: "panel".to_string(),
            ..HostConfig::default()
        };
        assert_eq!(cfg.module_path(), Path::new("/opt/lull").join(dylib_file_name("panel")));
    }

    #[test]
    fn module_path_defaults_to_the_executable_dir() {
        let exe_dir = std::env::current_exe().unwrap().parent().unwrap().to_path_buf();
        assert_eq!(
            HostConfig::default().module_path(),
            exe_dir.join(dylib_file_name("lull_ui"))
        );
    }
}
