use crate::engine::GridSize;
use log::LevelFilter;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the directory under the platform config & data directories in
/// which the program keeps its files
const APP_DIR: &str = "torsnake";

/// Program configuration read from a configuration file
#[derive(Clone, Deserialize, Debug, Default, Eq, PartialEq)]
#[serde(default)]
pub(crate) struct Config {
    /// Gameplay settings
    pub(crate) game: GameConfig,

    /// Settings about data files
    pub(crate) files: FileConfig,

    /// Settings for the log file
    pub(crate) log: LogConfig,
}

impl Config {
    /// Return the default configuration file path
    pub(crate) fn default_path() -> Result<PathBuf, ConfigError> {
        dirs::config_local_dir()
            .map(|p| p.join(APP_DIR).join("config.toml"))
            .ok_or(ConfigError::NoPath)
    }

    /// Read configuration from a file on disk.  If the file does not exist and
    /// `allow_missing` is true, a default `Config` value is returned.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the file could not be read or if the file's contents
    /// could not be deserialized.
    pub(crate) fn load(path: &Path, allow_missing: bool) -> Result<Config, ConfigError> {
        let content = match fs_err::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && allow_missing => {
                return Ok(Config::default())
            }
            Err(e) => return Err(ConfigError::Read(e)),
        };
        toml::from_str(&content).map_err(Into::into)
    }

    /// Return the path at which the high score should be stored, or `None`
    /// if it should not be stored on disk at all.  When no path is set in the
    /// configuration, a file in the local data directory is used, if one can
    /// be determined.
    pub(crate) fn high_score_file(&self) -> Option<PathBuf> {
        if !self.files.save_high_score {
            return None;
        }
        self.files
            .high_score_file
            .clone()
            .or_else(|| data_file("scores.json"))
    }

    /// Return the path to write log messages to, if any
    pub(crate) fn log_file(&self) -> Option<PathBuf> {
        self.log.file.clone().or_else(|| data_file("torsnake.log"))
    }
}

fn data_file(name: &str) -> Option<PathBuf> {
    dirs::data_local_dir().map(|p| p.join(APP_DIR).join(name))
}

#[derive(Clone, Copy, Deserialize, Debug, Default, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub(crate) struct GameConfig {
    pub(crate) grid_size: GridSize,
}

#[derive(Clone, Deserialize, Debug, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub(crate) struct FileConfig {
    /// Path at which the high score should be stored
    pub(crate) high_score_file: Option<PathBuf>,

    /// Whether to load & save the high score in a file
    pub(crate) save_high_score: bool,
}

impl Default for FileConfig {
    fn default() -> FileConfig {
        FileConfig {
            high_score_file: None,
            save_high_score: true,
        }
    }
}

#[derive(Clone, Deserialize, Debug, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub(crate) struct LogConfig {
    pub(crate) file: Option<PathBuf>,
    pub(crate) level: LevelFilter,
}

impl Default for LogConfig {
    fn default() -> LogConfig {
        LogConfig {
            file: None,
            level: LevelFilter::Info,
        }
    }
}

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("failed to determine path to local configuration directory")]
    NoPath,
    #[error("failed to read configuration file")]
    Read(#[from] std::io::Error),
    #[error("failed to parse configuration file")]
    Parse(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn empty_config() {
        let cfg = toml::from_str::<Config>("").unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.game.grid_size, GridSize::default());
        assert!(cfg.files.save_high_score);
        assert_eq!(cfg.log.level, LevelFilter::Info);
    }

    #[test]
    fn full_config() {
        let cfg = toml::from_str::<Config>(concat!(
            "[game]\n",
            "grid-size = 12\n",
            "\n",
            "[files]\n",
            "high-score-file = \"/tmp/scores.json\"\n",
            "save-high-score = true\n",
            "\n",
            "[log]\n",
            "file = \"/tmp/torsnake.log\"\n",
            "level = \"debug\"\n",
        ))
        .unwrap();
        assert_eq!(
            cfg,
            Config {
                game: GameConfig {
                    grid_size: GridSize::new(12).unwrap(),
                },
                files: FileConfig {
                    high_score_file: Some(PathBuf::from("/tmp/scores.json")),
                    save_high_score: true,
                },
                log: LogConfig {
                    file: Some(PathBuf::from("/tmp/torsnake.log")),
                    level: LevelFilter::Debug,
                },
            }
        );
        assert_eq!(
            cfg.high_score_file(),
            Some(PathBuf::from("/tmp/scores.json"))
        );
        assert_eq!(cfg.log_file(), Some(PathBuf::from("/tmp/torsnake.log")));
    }

    #[test]
    fn no_saving() {
        let cfg = toml::from_str::<Config>(concat!(
            "[files]\n",
            "high-score-file = \"/tmp/scores.json\"\n",
            "save-high-score = false\n",
        ))
        .unwrap();
        assert_eq!(cfg.high_score_file(), None);
    }

    #[test]
    fn grid_size_out_of_range() {
        let r = toml::from_str::<Config>("[game]\ngrid-size = 4\n");
        assert!(r.is_err());
    }

    #[test]
    fn load_missing() {
        let tmpdir = tempdir().unwrap();
        let path = tmpdir.path().join("config.toml");
        assert_eq!(Config::load(&path, true).unwrap(), Config::default());
        assert!(matches!(
            Config::load(&path, false),
            Err(ConfigError::Read(_))
        ));
    }

    #[test]
    fn load_file() {
        let tmpdir = tempdir().unwrap();
        let path = tmpdir.path().join("config.toml");
        fs_err::write(&path, "[game]\ngrid-size = 30\n").unwrap();
        let cfg = Config::load(&path, false).unwrap();
        assert_eq!(cfg.game.grid_size, GridSize::new(30).unwrap());
    }

    #[test]
    fn load_invalid() {
        let tmpdir = tempdir().unwrap();
        let path = tmpdir.path().join("config.toml");
        fs_err::write(&path, "[game\n").unwrap();
        assert!(matches!(
            Config::load(&path, false),
            Err(ConfigError::Parse(_))
        ));
    }
}
