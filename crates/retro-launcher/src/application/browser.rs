//! FileBrowser: directory listing and cursor for picking a disc image.
//!
//! Directories are listed first, then files, each group sorted by name
//! (case-insensitive).  Hidden entries (leading `.`) are skipped.
//!
//! | Key      | Action                                  |
//! |----------|-----------------------------------------|
//! | UP/DOWN  | move the cursor, wrapping at the ends   |
//! | LEFT     | page up                                 |
//! | RIGHT    | page down                               |
//! | FIRE1    | enter the selected directory            |
//! | FIRE2    | go to the parent directory              |

use std::path::{Path, PathBuf};
use std::sync::Arc;

use retro_core::KeyMask;
use tracing::{debug, warn};

use crate::infrastructure::fs::{FileEntry, FileSystem};

/// Entries skipped per LEFT/RIGHT press.
pub const PAGE_SIZE: usize = 10;

/// Something the shell needs to know about after a key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowserEvent {
    /// The browser now shows this directory.
    DirectoryChanged(PathBuf),
}

pub struct FileBrowser {
    fs: Arc<dyn FileSystem>,
    current_dir: PathBuf,
    entries: Vec<FileEntry>,
    cursor: usize,
}

impl FileBrowser {
    /// Opens the browser on `start_dir`.
    ///
    /// An unreadable directory yields an empty listing rather than an error;
    /// the user can still navigate to the parent.
    pub fn new(fs: Arc<dyn FileSystem>, start_dir: PathBuf) -> Self {
        let mut browser = Self {
            fs,
            current_dir: start_dir,
            entries: Vec::new(),
            cursor: 0,
        };
        browser.entries = browser.read_entries(&browser.current_dir).unwrap_or_else(|e| {
            warn!("cannot list {}: {e}", browser.current_dir.display());
            Vec::new()
        });
        browser
    }

    pub fn current_dir(&self) -> &Path {
        &self.current_dir
    }

    pub fn entries(&self) -> &[FileEntry] {
        &self.entries
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn selection(&self) -> Option<&FileEntry> {
        self.entries.get(self.cursor)
    }

    /// Switches to `dir`, keeping the current listing if it cannot be read.
    pub fn enter(&mut self, dir: &Path) -> bool {
        match self.read_entries(dir) {
            Ok(entries) => {
                debug!("browsing {}", dir.display());
                self.current_dir = dir.to_path_buf();
                self.entries = entries;
                self.cursor = 0;
                true
            }
            Err(e) => {
                warn!("cannot list {}: {e}", dir.display());
                false
            }
        }
    }

    pub fn handle_input(&mut self, keys: KeyMask) -> Option<BrowserEvent> {
        let len = self.entries.len();

        if keys.contains(KeyMask::FIRE1) {
            let dir = self.selection().filter(|e| e.is_dir).map(|e| e.path.clone())?;
            return self.change_dir(dir);
        }
        if keys.contains(KeyMask::FIRE2) {
            let parent = self.current_dir.parent()?.to_path_buf();
            return self.change_dir(parent);
        }

        if len == 0 {
            return None;
        }
        if keys.contains(KeyMask::UP) {
            self.cursor = (self.cursor + len - 1) % len;
        } else if keys.contains(KeyMask::DOWN) {
            self.cursor = (self.cursor + 1) % len;
        } else if keys.contains(KeyMask::LEFT) {
            self.cursor = self.cursor.saturating_sub(PAGE_SIZE);
        } else if keys.contains(KeyMask::RIGHT) {
            self.cursor = (self.cursor + PAGE_SIZE).min(len - 1);
        }
        None
    }

    fn change_dir(&mut self, dir: PathBuf) -> Option<BrowserEvent> {
        self.enter(&dir)
            .then(|| BrowserEvent::DirectoryChanged(dir))
    }

    fn read_entries(&self, dir: &Path) -> std::io::Result<Vec<FileEntry>> {
        let mut entries: Vec<FileEntry> = self
            .fs
            .list_dir(dir)?
            .into_iter()
            .filter(|e| !e.name.starts_with('.'))
            .collect();
        entries.sort_by(|a, b| {
            b.is_dir
                .cmp(&a.is_dir)
                .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        });
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::fs::MockFileSystem;

    fn listing_fs() -> MockFileSystem {
        let mut fs = MockFileSystem::new();
        fs.expect_list_dir().returning(|dir| {
            if dir == Path::new("/cd") {
                Ok(vec![
                    FileEntry::new("/cd/zelda.cdi", false),
                    FileEntry::new("/cd/games", true),
                    FileEntry::new("/cd/.hidden", false),
                    FileEntry::new("/cd/Alpha.gdi", false),
                    FileEntry::new("/cd/Backups", true),
                ])
            } else if dir == Path::new("/cd/games") {
                Ok(vec![FileEntry::new("/cd/games/rez.gdi", false)])
            } else if dir == Path::new("/") {
                Ok(vec![FileEntry::new("/cd", true)])
            } else {
                Err(std::io::Error::from(std::io::ErrorKind::NotFound))
            }
        });
        fs
    }

    fn names(browser: &FileBrowser) -> Vec<&str> {
        browser.entries().iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn test_listing_puts_directories_first_and_skips_hidden() {
        let browser = FileBrowser::new(Arc::new(listing_fs()), PathBuf::from("/cd"));
        assert_eq!(names(&browser), ["Backups", "games", "Alpha.gdi", "zelda.cdi"]);
    }

    #[test]
    fn test_cursor_wraps_both_ways() {
        // Arrange
        let mut browser = FileBrowser::new(Arc::new(listing_fs()), PathBuf::from("/cd"));

        // Act / Assert
        browser.handle_input(KeyMask::UP);
        assert_eq!(browser.cursor(), 3);
        browser.handle_input(KeyMask::DOWN);
        assert_eq!(browser.cursor(), 0);
    }

    #[test]
    fn test_page_keys_clamp_to_list() {
        let mut browser = FileBrowser::new(Arc::new(listing_fs()), PathBuf::from("/cd"));
        browser.handle_input(KeyMask::RIGHT);
        assert_eq!(browser.cursor(), 3);
        browser.handle_input(KeyMask::LEFT);
        assert_eq!(browser.cursor(), 0);
    }

    #[test]
    fn test_fire1_enters_directory_and_reports_it() {
        // Arrange: cursor on "games"
        let mut browser = FileBrowser::new(Arc::new(listing_fs()), PathBuf::from("/cd"));
        browser.handle_input(KeyMask::DOWN);

        // Act
        let event = browser.handle_input(KeyMask::FIRE1);

        // Assert
        assert_eq!(event, Some(BrowserEvent::DirectoryChanged(PathBuf::from("/cd/games"))));
        assert_eq!(browser.current_dir(), Path::new("/cd/games"));
        assert!(browser.selection().map(FileEntry::is_game).unwrap_or(false));
    }

    #[test]
    fn test_fire1_on_file_does_nothing() {
        let mut browser = FileBrowser::new(Arc::new(listing_fs()), PathBuf::from("/cd"));
        browser.handle_input(KeyMask::UP); // zelda.cdi
        assert_eq!(browser.handle_input(KeyMask::FIRE1), None);
        assert_eq!(browser.current_dir(), Path::new("/cd"));
    }

    #[test]
    fn test_fire2_goes_to_parent() {
        let mut browser = FileBrowser::new(Arc::new(listing_fs()), PathBuf::from("/cd"));
        let event = browser.handle_input(KeyMask::FIRE2);
        assert_eq!(event, Some(BrowserEvent::DirectoryChanged(PathBuf::from("/"))));
        assert_eq!(names(&browser), ["cd"]);
    }

    #[test]
    fn test_unreadable_start_directory_gives_empty_listing() {
        let mut browser = FileBrowser::new(Arc::new(listing_fs()), PathBuf::from("/gone"));
        assert!(browser.entries().is_empty());
        assert_eq!(browser.handle_input(KeyMask::DOWN), None);
        assert!(browser.selection().is_none());
    }
}
