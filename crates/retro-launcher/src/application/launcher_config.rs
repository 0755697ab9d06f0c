//! LauncherConfig: the launcher's settings on top of [`ConfigStore`].
//!
//! Registers the `main` group, loads it at startup and exposes one typed
//! getter/setter pair per setting.  Every setter persists immediately.
//!
//! # Self-healing paths
//!
//! `data_path` and `filer_last_path` are re-validated on every read.  A stored
//! directory can vanish between sessions (an SD card or disc removed, a folder
//! deleted), so when the stored path no longer exists the platform default is
//! substituted, written back and saved.  Callers never receive a dangling
//! path from the store.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use retro_core::{ConfigError, ConfigGroup, ConfigOption, ConfigStore, FloatRect};
use tracing::{info, warn};

use super::overlay::{LoaderOption, LOADER_GROUP};
use crate::infrastructure::fs::FileSystem;

/// Name of the store, used as a log prefix.
pub const CONFIG_NAME: &str = "RetroDreamConfig";
/// The single settings group.
pub const MAIN_GROUP: &str = "main";

pub const DEFAULT_SCREEN_SIZE: FloatRect = FloatRect::new(0.0, 0.0, 640.0, 480.0);
pub const DEFAULT_INPUT_DELAY_MS: i32 = 200;

/// The four settings of the `main` group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingId {
    DataPath,
    FilerPath,
    ScreenSize,
    InputDelay,
}

impl SettingId {
    pub const ALL: [SettingId; 4] = [
        SettingId::DataPath,
        SettingId::FilerPath,
        SettingId::ScreenSize,
        SettingId::InputDelay,
    ];

    /// Key of the setting inside the `main` group.
    pub fn key(self) -> &'static str {
        match self {
            SettingId::DataPath => "data_path",
            SettingId::FilerPath => "filer_last_path",
            SettingId::ScreenSize => "screen_size",
            SettingId::InputDelay => "input_delay",
        }
    }
}

/// Typed, self-healing launcher settings.
pub struct LauncherConfig {
    store: ConfigStore,
    fs: Arc<dyn FileSystem>,
}

impl LauncherConfig {
    /// Builds the store, loads it, and resolves the data path.
    ///
    /// If the config file is missing or malformed it is rewritten from the
    /// defaults right away, so a well-formed file exists from the first run.
    /// The resolved data path is handed to the filesystem collaborator.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] only if the settings schema itself is
    /// inconsistent (duplicate group or key).
    pub fn new(fs: Arc<dyn FileSystem>) -> Result<Self, ConfigError> {
        let main = ConfigGroup::new(MAIN_GROUP)
            .with_option(SettingId::DataPath.key(), path_string(&fs.default_data_path()))?
            .with_option(SettingId::FilerPath.key(), path_string(&fs.default_home_path()))?
            .with_option(SettingId::ScreenSize.key(), DEFAULT_SCREEN_SIZE)?
            .with_option(SettingId::InputDelay.key(), DEFAULT_INPUT_DELAY_MS)?;

        let mut store = ConfigStore::new(CONFIG_NAME, fs.config_path());
        store.define_group(main)?;
        store.define_group(LoaderOption::default_group()?)?;

        if !store.load() {
            info!("{CONFIG_NAME}: writing default config to {}", store.path().display());
            store.save();
        }

        let mut config = Self { store, fs };
        let data_path = config.data_path();
        config.fs.set_data_path(&data_path);
        Ok(config)
    }

    /// The launcher data directory, falling back to the platform default if
    /// the stored one no longer exists.
    pub fn data_path(&mut self) -> PathBuf {
        let fallback = self.fs.default_data_path();
        self.healed_path(SettingId::DataPath, fallback)
    }

    /// The directory the file browser was last in, falling back to the home
    /// directory if the stored one no longer exists.
    pub fn last_path(&mut self) -> PathBuf {
        let fallback = self.fs.default_home_path();
        self.healed_path(SettingId::FilerPath, fallback)
    }

    /// Remembers `path` as the last browsed directory.
    ///
    /// Ignored (returns `false`) if `path` does not exist, so a dead path is
    /// never persisted on purpose.
    pub fn set_last_path(&mut self, path: &Path) -> bool {
        if !self.fs.exists(path) {
            return false;
        }
        self.store
            .set_string(MAIN_GROUP, SettingId::FilerPath.key(), path_string(path));
        self.store.save();
        true
    }

    pub fn screen_size(&self) -> FloatRect {
        self.store.get_float_rect(MAIN_GROUP, SettingId::ScreenSize.key())
    }

    pub fn set_screen_size(&mut self, rect: FloatRect) {
        self.store
            .set_float_rect(MAIN_GROUP, SettingId::ScreenSize.key(), rect);
        self.store.save();
    }

    /// Base key-repeat delay in milliseconds.
    pub fn input_delay(&self) -> i32 {
        self.store.get_integer(MAIN_GROUP, SettingId::InputDelay.key())
    }

    pub fn set_input_delay(&mut self, ms: i32) {
        self.store
            .set_integer(MAIN_GROUP, SettingId::InputDelay.key(), ms);
        self.store.save();
    }

    /// The stored loader settings, edited by the file menu.
    pub fn loader_options(&self) -> ConfigGroup {
        self.store
            .group(LOADER_GROUP)
            .cloned()
            .unwrap_or_else(|| ConfigGroup::new(LOADER_GROUP))
    }

    /// Copies the loader settings from `options` and saves if any changed.
    ///
    /// Keys the loader group does not define, or values of another kind, are
    /// skipped.  Returns `true` if the file was written.
    pub fn set_loader_options(&mut self, options: &ConfigGroup) -> bool {
        let Some(current) = self.store.group(LOADER_GROUP) else {
            return false;
        };
        let changed: Vec<ConfigOption> = options
            .options()
            .filter(|o| {
                current.option(o.key()).is_some_and(|c| {
                    c.value().kind() == o.value().kind() && c.value() != o.value()
                })
            })
            .cloned()
            .collect();
        if changed.is_empty() {
            return false;
        }

        for option in changed {
            self.store
                .set_value(LOADER_GROUP, option.key(), option.value().clone());
        }
        self.store.save();
        true
    }

    /// Read-only view of the underlying store.
    pub fn store(&self) -> &ConfigStore {
        &self.store
    }

    fn healed_path(&mut self, id: SettingId, fallback: PathBuf) -> PathBuf {
        let stored = PathBuf::from(self.store.get_string(MAIN_GROUP, id.key()));
        if self.fs.exists(&stored) {
            return stored;
        }

        warn!(
            "{CONFIG_NAME}: {} '{}' doesn't exist, restoring default '{}'",
            id.key(),
            stored.display(),
            fallback.display()
        );
        // Only write when something changes: if the default is missing too
        // there is nothing better to persist.
        if fallback != stored {
            self.store.set_string(MAIN_GROUP, id.key(), path_string(&fallback));
            self.store.save();
        }
        fallback
    }
}

fn path_string(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
