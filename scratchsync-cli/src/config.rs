//! Optional user configuration.
//!
//! # Storage layout
//!
//! ```text
//! ~/.scratchsync/
//!   config.yaml
//! ```
//!
//! ```yaml
//! rhythmdb: /home/dj/.local/share/rhythmbox/rhythmdb.xml
//! require_base: home/dj/Music/
//! outfile: /home/dj/Music/_Serato_/database V2.new
//! ```
//!
//! Every field is optional. Command-line flags override the file; the file
//! overrides built-in defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use scratchsync_core::rhythmdb;

/// Output file used when neither `--outfile`, `--in-place`, nor the config
/// file names one.
pub const DEFAULT_OUTFILE: &str = "./out.db";

/// Errors loading `config.yaml`.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// `dirs::home_dir()` returned `None`.
    #[error("cannot determine home directory; set $HOME or equivalent")]
    HomeNotFound,

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML parse error, with the file path.
    #[error("failed to parse config at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Contents of `config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub rhythmdb: Option<PathBuf>,
    pub require_base: Option<String>,
    pub outfile: Option<PathBuf>,
}

impl Config {
    /// Flag, else config, else `~/.local/share/rhythmbox/rhythmdb.xml`.
    pub fn rhythmdb_path(&self, flag: Option<PathBuf>, home: &Path) -> PathBuf {
        flag.or_else(|| self.rhythmdb.clone())
            .unwrap_or_else(|| rhythmdb::default_path_at(home))
    }

    /// Flag, else config, else [`DEFAULT_OUTFILE`].
    pub fn outfile_path(&self, flag: Option<PathBuf>) -> PathBuf {
        flag.or_else(|| self.outfile.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTFILE))
    }

    /// Flag, else config, else no requirement.
    pub fn require_base(&self, flag: Option<String>) -> Option<String> {
        flag.or_else(|| self.require_base.clone())
    }
}

/// `<home>/.scratchsync/config.yaml`. Pure, no I/O.
pub fn config_path_at(home: &Path) -> PathBuf {
    home.join(".scratchsync").join("config.yaml")
}

/// Load the config under `home`; a missing file yields the defaults.
pub fn load_at(home: &Path) -> Result<Config, ConfigError> {
    let path = config_path_at(home);
    if !path.exists() {
        return Ok(Config::default());
    }
    let contents = std::fs::read_to_string(&path).map_err(|source| ConfigError::Io {
        path: path.clone(),
        source,
    })?;
    if contents.trim().is_empty() {
        return Ok(Config::default());
    }
    serde_yaml::from_str(&contents).map_err(|source| ConfigError::Parse { path, source })
}

/// The user's home directory.
pub fn home() -> Result<PathBuf, ConfigError> {
    dirs::home_dir().ok_or(ConfigError::HomeNotFound)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_config(home: &TempDir, yaml: &str) {
        let path = config_path_at(home.path());
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, yaml).unwrap();
    }

    #[test]
    fn missing_file_is_default() {
        let home = TempDir::new().unwrap();
        assert_eq!(load_at(home.path()).unwrap(), Config::default());
    }

    #[test]
    fn empty_file_is_default() {
        let home = TempDir::new().unwrap();
        write_config(&home, "\n");
        assert_eq!(load_at(home.path()).unwrap(), Config::default());
    }

    #[test]
    fn fields_are_read() {
        let home = TempDir::new().unwrap();
        write_config(&home, "rhythmdb: /x/rhythmdb.xml\nrequire_base: home/dj/Music/\n");
        let config = load_at(home.path()).unwrap();
        assert_eq!(config.rhythmdb, Some(PathBuf::from("/x/rhythmdb.xml")));
        assert_eq!(config.require_base.as_deref(), Some("home/dj/Music/"));
        assert!(config.outfile.is_none());
    }

    #[test]
    fn unknown_field_is_a_parse_error_with_path() {
        let home = TempDir::new().unwrap();
        write_config(&home, "rhythmbd: /typo.xml\n");
        let err = load_at(home.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }), "got {err:?}");
        assert!(err.to_string().contains("config.yaml"));
    }

    #[test]
    fn flags_override_config_override_defaults() {
        let home = Path::new("/home/dj");
        let config = Config {
            rhythmdb: Some(PathBuf::from("/cfg/rhythmdb.xml")),
            require_base: None,
            outfile: None,
        };

        assert_eq!(
            config.rhythmdb_path(Some(PathBuf::from("/flag.xml")), home),
            PathBuf::from("/flag.xml")
        );
        assert_eq!(config.rhythmdb_path(None, home), PathBuf::from("/cfg/rhythmdb.xml"));
        assert_eq!(
            Config::default().rhythmdb_path(None, home),
            PathBuf::from("/home/dj/.local/share/rhythmbox/rhythmdb.xml")
        );
        assert_eq!(config.outfile_path(None), PathBuf::from(DEFAULT_OUTFILE));
        assert_eq!(config.require_base(Some("b/".into())).as_deref(), Some("b/"));
        assert_eq!(config.require_base(None), None);
    }
}
