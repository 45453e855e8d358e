//! Locating `.reducto.toml`
//!
//! The working directory wins over the home directory. [`find_config_file`]
//! takes both roots explicitly, [`load_config_file`] fills them in from the
//! running process.

use anyhow::{Context, Result};
use std::env;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = ".reducto.toml";

/// A config file that was found, with its content
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigSource {
    pub path: PathBuf,
    pub content: String,
}

/// Candidate locations in lookup order, without duplicates
pub fn search_paths(cwd: &Path, home: Option<&Path>) -> Vec<PathBuf> {
    let mut paths = vec![cwd.join(CONFIG_FILE)];
    if let Some(home) = home.map(|home| home.join(CONFIG_FILE)) {
        if !paths.contains(&home) {
            paths.push(home);
        }
    }
    paths
}

/// First readable config file below `cwd` or `home`
pub fn find_config_file(cwd: &Path, home: Option<&Path>) -> Option<ConfigSource> {
    search_paths(cwd, home).into_iter().find_map(|path| {
        let content = std::fs::read_to_string(&path).ok()?;
        log::debug!("Loaded config from {}", path.display());
        Some(ConfigSource { path, content })
    })
}

/// Look up the config file for the current directory and `$HOME`
pub fn load_config_file() -> Option<ConfigSource> {
    let cwd = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let home = env::var_os("HOME").map(PathBuf::from);
    find_config_file(&cwd, home.as_deref())
}

/// Read an explicitly requested config file, failing if it cannot be read
pub fn read_config_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn dir_with_config(content: &str) -> TempDir {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), content).unwrap();
        dir
    }

    #[test]
    fn test_working_directory_wins_over_home() {
        let cwd = dir_with_config("log_level = \"debug\"");
        let home = dir_with_config("log_level = \"warn\"");

        let found = find_config_file(cwd.path(), Some(home.path())).unwrap();
        assert_eq!(found.path, cwd.path().join(CONFIG_FILE));
        assert_eq!(found.content, "log_level = \"debug\"");
    }

    #[test]
    fn test_falls_back_to_home() {
        let cwd = TempDir::new().unwrap();
        let home = dir_with_config("echo_state = false");

        let found = find_config_file(cwd.path(), Some(home.path())).unwrap();
        assert_eq!(found.path, home.path().join(CONFIG_FILE));
    }

    #[test]
    fn test_nothing_found() {
        let cwd = TempDir::new().unwrap();
        assert_eq!(find_config_file(cwd.path(), None), None);
    }

    #[test]
    fn test_home_equal_to_cwd_is_searched_once() {
        let dir = TempDir::new().unwrap();
        assert_eq!(search_paths(dir.path(), Some(dir.path())).len(), 1);
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let err = read_config_file(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.toml"));
    }
}
