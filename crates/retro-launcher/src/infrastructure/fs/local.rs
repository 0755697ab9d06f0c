//! [`FileSystem`] backed by the host filesystem.
//!
//! Default locations on the Linux development target:
//! - config:  `$XDG_CONFIG_HOME/retrodream/config.toml` (or `~/.config/...`)
//! - data:    `$XDG_DATA_HOME/retrodream` (or `~/.local/share/retrodream`)
//! - home:    `$HOME`

use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

use tracing::debug;

use super::{FileEntry, FileSystem};

const APP_DIR: &str = "retrodream";

#[derive(Debug)]
pub struct LocalFileSystem {
    config_path: PathBuf,
    default_data_path: PathBuf,
    default_home_path: PathBuf,
    data_path: RwLock<PathBuf>,
}

impl LocalFileSystem {
    pub fn new(
        config_path: impl Into<PathBuf>,
        default_data_path: impl Into<PathBuf>,
        default_home_path: impl Into<PathBuf>,
    ) -> Self {
        let default_data_path = default_data_path.into();
        Self {
            config_path: config_path.into(),
            data_path: RwLock::new(default_data_path.clone()),
            default_data_path,
            default_home_path: default_home_path.into(),
        }
    }

    /// Builds the platform defaults from the environment.
    ///
    /// Returns `None` when neither `XDG_CONFIG_HOME` nor `HOME` is set.
    pub fn detect() -> Option<Self> {
        let home = std::env::var_os("HOME").map(PathBuf::from);
        let xdg = |var: &str, fallback: &[&str]| {
            std::env::var_os(var).map(PathBuf::from).or_else(|| {
                home.as_ref()
                    .map(|h| fallback.iter().fold(h.clone(), |p, part| p.join(part)))
            })
        };

        let config_dir = xdg("XDG_CONFIG_HOME", &[".config"])?.join(APP_DIR);
        let data_dir = xdg("XDG_DATA_HOME", &[".local", "share"])
            .map(|d| d.join(APP_DIR))
            .unwrap_or_else(|| config_dir.clone());
        let home_dir = home.unwrap_or_else(|| PathBuf::from("/"));

        Some(Self::new(config_dir.join("config.toml"), data_dir, home_dir))
    }

    pub fn with_config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = path.into();
        self
    }

    pub fn with_default_data_path(mut self, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        *self.data_path.get_mut().unwrap_or_else(PoisonError::into_inner) = path.clone();
        self.default_data_path = path;
        self
    }

    pub fn with_default_home_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.default_home_path = path.into();
        self
    }
}

impl FileSystem for LocalFileSystem {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn config_path(&self) -> PathBuf {
        self.config_path.clone()
    }

    fn default_data_path(&self) -> PathBuf {
        self.default_data_path.clone()
    }

    fn default_home_path(&self) -> PathBuf {
        self.default_home_path.clone()
    }

    fn data_path(&self) -> PathBuf {
        self.data_path
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn set_data_path(&self, path: &Path) {
        debug!("data path set to {}", path.display());
        *self.data_path.write().unwrap_or_else(PoisonError::into_inner) = path.to_path_buf();
    }

    fn list_dir(&self, path: &Path) -> std::io::Result<Vec<FileEntry>> {
        std::fs::read_dir(path)?
            .map(|entry| {
                let entry = entry?;
                let path = entry.path();
                // Follow symlinks so linked game folders browse like real ones.
                let is_dir = path.is_dir();
                Ok(FileEntry::new(path, is_dir))
            })
            .collect()
    }
}
