//! Filesystem access collaborator.
//!
//! The launcher never touches `std::fs` outside this module (the config
//! store's own file I/O aside).  Everything it needs from the filesystem goes
//! through [`FileSystem`]:
//!
//! - whether a stored path still exists (self-healing config paths),
//! - where the config file and the default data / home directories live,
//! - the contents of a directory for the file browser.
//!
//! # Testability
//!
//! Unit tests use the `mockall`-generated `MockFileSystem`; integration tests
//! point a [`LocalFileSystem`] at a temporary directory.

use std::path::{Path, PathBuf};

mod local;

pub use local::LocalFileSystem;

/// Extensions (lower case) of disc images the loader can boot.
pub const GAME_EXTENSIONS: [&str; 4] = ["gdi", "cdi", "iso", "cso"];

/// One directory entry as seen by the file browser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub name: String,
    pub path: PathBuf,
    pub is_dir: bool,
}

impl FileEntry {
    pub fn new(path: impl Into<PathBuf>, is_dir: bool) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());
        Self { name, path, is_dir }
    }

    /// `true` for regular files with a bootable disc-image extension.
    pub fn is_game(&self) -> bool {
        !self.is_dir
            && self
                .path
                .extension()
                .and_then(|e| e.to_str())
                .map(|e| GAME_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
                .unwrap_or(false)
    }
}

/// Abstraction over the platform filesystem.
///
/// Implementations use interior mutability for [`set_data_path`]
/// (`&self` receiver) so a single instance can be shared behind an `Arc`.
///
/// [`set_data_path`]: FileSystem::set_data_path
#[cfg_attr(test, mockall::automock)]
pub trait FileSystem {
    /// Returns `true` if `path` exists.
    fn exists(&self, path: &Path) -> bool;

    /// Location of the launcher's config file.
    fn config_path(&self) -> PathBuf;

    /// Platform default for the launcher data directory.
    fn default_data_path(&self) -> PathBuf;

    /// Platform default for the directory the file browser starts in.
    fn default_home_path(&self) -> PathBuf;

    /// The data directory currently in use.
    fn data_path(&self) -> PathBuf;

    /// Switches the data directory in use (resolved from the config at startup).
    fn set_data_path(&self, path: &Path);

    /// Lists the entries of `path`, unsorted.
    fn list_dir(&self, path: &Path) -> std::io::Result<Vec<FileEntry>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_detection_by_extension() {
        assert!(FileEntry::new("/cd/games/sonic.gdi", false).is_game());
        assert!(FileEntry::new("/cd/games/SOULCAL.CDI", false).is_game());
        assert!(FileEntry::new("/cd/games/rez.iso", false).is_game());
        assert!(!FileEntry::new("/cd/games/readme.txt", false).is_game());
        assert!(!FileEntry::new("/cd/games/noext", false).is_game());
    }

    #[test]
    fn test_directory_named_like_an_image_is_not_a_game() {
        assert!(!FileEntry::new("/cd/backup.iso", true).is_game());
    }

    #[test]
    fn test_entry_name_is_last_component() {
        let entry = FileEntry::new("/cd/games/crazy taxi", true);
        assert_eq!(entry.name, "crazy taxi");
    }
}
