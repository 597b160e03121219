use std::fs;
use std::path::{Path, PathBuf};

use crate::model::config::Config;

/// Error type for data-directory and config handling
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse config.toml: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("cannot determine data directory: set $TICK_DIR or $HOME")]
    NoDataDir,
}

/// Resolve the data directory: explicit `-C` flag, then `$TICK_DIR`,
/// then `$HOME/.tick`.
pub fn resolve_data_dir(flag: Option<&str>) -> Result<PathBuf, ConfigError> {
    if let Some(dir) = flag {
        return Ok(PathBuf::from(dir));
    }
    if let Ok(dir) = std::env::var("TICK_DIR") {
        if !dir.is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }
    match std::env::var("HOME") {
        Ok(home) if !home.is_empty() => Ok(Path::new(&home).join(".tick")),
        _ => Err(ConfigError::NoDataDir),
    }
}

/// Read config.toml from the data directory. A missing file yields the
/// defaults; a malformed one is a real error.
pub fn read_config(data_dir: &Path) -> Result<Config, ConfigError> {
    let path = data_dir.join("config.toml");
    let text = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Config::default()),
        Err(e) => return Err(ConfigError::Read { path, source: e }),
    };
    Ok(toml::from_str(&text)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn explicit_flag_wins() {
        let dir = resolve_data_dir(Some("/tmp/elsewhere")).unwrap();
        assert_eq!(dir, PathBuf::from("/tmp/elsewhere"));
    }

    #[test]
    fn missing_config_is_default() {
        let tmp = TempDir::new().unwrap();
        let config = read_config(tmp.path()).unwrap();
        assert!(config.ui.colors.dark.is_empty());
    }

    #[test]
    fn malformed_config_is_an_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "not toml [[[").unwrap();
        assert!(matches!(
            read_config(tmp.path()),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn config_overrides_parse() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("config.toml"),
            "[ui.colors.dark]\nbackground = \"#101018\"\n",
        )
        .unwrap();
        let config = read_config(tmp.path()).unwrap();
        assert_eq!(
            config.ui.colors.dark.get("background").map(String::as_str),
            Some("#101018")
        );
    }
}
