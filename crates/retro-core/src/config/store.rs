//! The configuration store: registered groups plus their backing file.
//!
//! # Lifecycle
//!
//! ```text
//! ConfigStore::new(name, path)
//!  └─ define_group(..)       -- register defaults, once per group name
//!  └─ load()                 -- overwrite defaults with values from disk
//!  └─ get_* / set_*          -- typed access during the session
//!  └─ save()                 -- write the full state back
//! ```
//!
//! # File shape
//!
//! Every group becomes a TOML table named after the group.  Strings and
//! integers are plain values, rectangles are sub-tables:
//!
//! ```toml
//! [main]
//! data_path = "/cd/RD"
//! input_delay = 200
//!
//! [main.screen_size]
//! height = 480.0
//! left = 0.0
//! top = 0.0
//! width = 640.0
//! ```
//!
//! `toml::Table` keeps its keys sorted, so saving an unchanged store always
//! yields the same bytes.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use super::group::ConfigGroup;
use super::value::{FloatRect, OptionValue, ValueKind};
use super::ConfigError;

/// Typed key/value configuration with a backing TOML file.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    name: String,
    path: PathBuf,
    groups: Vec<ConfigGroup>,
}

impl ConfigStore {
    /// Creates an empty store backed by `path`.
    ///
    /// Nothing is read from disk until [`load`](Self::load) is called.
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            groups: Vec::new(),
        }
    }

    /// Registers a group and its default option values.
    ///
    /// Must be called before [`load`](Self::load) for the group's values to be
    /// picked up from the file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::DuplicateGroup`] if a group with the same name
    /// already exists.
    pub fn define_group(&mut self, group: ConfigGroup) -> Result<(), ConfigError> {
        if self.group(group.name()).is_some() {
            return Err(ConfigError::DuplicateGroup(group.name().to_string()));
        }
        self.groups.push(group);
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn group(&self, name: &str) -> Option<&ConfigGroup> {
        self.groups.iter().find(|g| g.name() == name)
    }

    pub fn groups(&self) -> impl Iterator<Item = &ConfigGroup> {
        self.groups.iter()
    }

    // ── Persistence ───────────────────────────────────────────────────────────

    /// Reads the backing file and overwrites matching defaults.
    ///
    /// Returns `false` if the file is absent, unreadable or structurally
    /// invalid.  The store is always left in a valid state: options the file
    /// does not mention keep their current values.
    pub fn load(&mut self) -> bool {
        match self.try_load() {
            Ok(()) => {
                debug!("{}: loaded {}", self.name, self.path.display());
                true
            }
            Err(ConfigError::Io { ref source, .. })
                if source.kind() == std::io::ErrorKind::NotFound =>
            {
                info!("{}: no config at {}, using defaults", self.name, self.path.display());
                false
            }
            Err(e) => {
                warn!("{}: could not load config: {e}", self.name);
                false
            }
        }
    }

    /// Fallible form of [`load`](Self::load).
    ///
    /// The file is validated as a whole before any value is applied, so a
    /// malformed file leaves every option untouched.  Within a valid file,
    /// values whose type does not match the registered option are skipped
    /// with a warning, and unknown groups or keys are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Parse`] if it is not TOML, and
    /// [`ConfigError::Malformed`] if a registered group is not a table.
    pub fn try_load(&mut self) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(&self.path).map_err(|source| ConfigError::Io {
            path: self.path.clone(),
            source,
        })?;
        let root: toml::Table = toml::from_str(&content)?;

        for group in &self.groups {
            if let Some(entry) = root.get(group.name()) {
                if !entry.is_table() {
                    return Err(ConfigError::Malformed(format!(
                        "'{}' is a {}, expected a table",
                        group.name(),
                        entry.type_str()
                    )));
                }
            }
        }

        for group in &mut self.groups {
            let Some(table) = root.get(group.name()).and_then(toml::Value::as_table) else {
                continue;
            };
            let group_name = group.name().to_string();
            for option in group.options_mut() {
                let Some(raw) = table.get(option.key()) else {
                    continue;
                };
                let kind = option.value().kind();
                match OptionValue::from_toml(kind, raw) {
                    Some(value) => {
                        option.replace(value);
                    }
                    None => warn!(
                        "{}: {group_name}.{} should be a {kind}, found {}; keeping default",
                        self.name,
                        option.key(),
                        raw.type_str()
                    ),
                }
            }
        }
        Ok(())
    }

    /// Writes every group and option to the backing file, replacing it.
    ///
    /// Returns `false` on failure; the in-memory state is never modified.
    pub fn save(&self) -> bool {
        match self.try_save() {
            Ok(()) => {
                debug!("{}: saved {}", self.name, self.path.display());
                true
            }
            Err(e) => {
                warn!("{}: could not save config: {e}", self.name);
                false
            }
        }
    }

    /// Fallible form of [`save`](Self::save).
    ///
    /// Creates the parent directory if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] for file-system failures or
    /// [`ConfigError::Serialize`] if serialization fails.
    pub fn try_save(&self) -> Result<(), ConfigError> {
        let content = self.to_toml_string()?;

        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir).map_err(|source| ConfigError::Io {
                path: dir.to_path_buf(),
                source,
            })?;
        }

        std::fs::write(&self.path, content).map_err(|source| ConfigError::Io {
            path: self.path.clone(),
            source,
        })
    }

    /// Renders the whole store as TOML text, exactly as `save` writes it.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Serialize`] if serialization fails.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        let mut root = toml::Table::new();
        for group in &self.groups {
            let table: toml::Table = group
                .options()
                .map(|o| (o.key().to_string(), o.value().to_toml()))
                .collect();
            root.insert(group.name().to_string(), toml::Value::Table(table));
        }
        Ok(toml::to_string(&root)?)
    }

    // ── Typed access ──────────────────────────────────────────────────────────

    /// Returns the value of `group.key`.
    ///
    /// # Panics
    ///
    /// Panics if the group or key was never registered.
    pub fn value(&self, group: &str, key: &str) -> &OptionValue {
        let Some(g) = self.group(group) else {
            panic!("{}: unknown config group '{group}'", self.name);
        };
        match g.option(key) {
            Some(option) => option.value(),
            None => panic!("{}: unknown config option '{group}.{key}'", self.name),
        }
    }

    /// Replaces the value of `group.key`.
    ///
    /// # Panics
    ///
    /// Panics if the group or key was never registered, or if `value` is not
    /// of the registered kind.
    pub fn set_value(&mut self, group: &str, key: &str, value: OptionValue) {
        let store = self.name.clone();
        let Some(g) = self.groups.iter_mut().find(|g| g.name() == group) else {
            panic!("{store}: unknown config group '{group}'");
        };
        let Some(option) = g.option_mut(key) else {
            panic!("{store}: unknown config option '{group}.{key}'");
        };
        let expected = option.value().kind();
        let found = value.kind();
        if !option.replace(value) {
            panic!("{store}: '{group}.{key}' is a {expected} option, cannot store a {found}");
        }
    }

    /// # Panics
    ///
    /// Panics if `group.key` is unknown or is not a string option.
    pub fn get_string(&self, group: &str, key: &str) -> &str {
        match self.value(group, key) {
            OptionValue::String(s) => s,
            other => self.kind_mismatch(group, key, ValueKind::String, other),
        }
    }

    /// # Panics
    ///
    /// Panics if `group.key` is unknown or is not a rectangle option.
    pub fn get_float_rect(&self, group: &str, key: &str) -> FloatRect {
        match self.value(group, key) {
            OptionValue::FloatRect(rect) => *rect,
            other => self.kind_mismatch(group, key, ValueKind::FloatRect, other),
        }
    }

    /// # Panics
    ///
    /// Panics if `group.key` is unknown or is not an integer option.
    pub fn get_integer(&self, group: &str, key: &str) -> i32 {
        match self.value(group, key) {
            OptionValue::Integer(i) => *i,
            other => self.kind_mismatch(group, key, ValueKind::Integer, other),
        }
    }

    /// # Panics
    ///
    /// Panics if `group.key` is unknown or is not a string option.
    pub fn set_string(&mut self, group: &str, key: &str, value: impl Into<String>) {
        self.set_value(group, key, OptionValue::String(value.into()));
    }

    /// # Panics
    ///
    /// Panics if `group.key` is unknown or is not a rectangle option.
    pub fn set_float_rect(&mut self, group: &str, key: &str, value: FloatRect) {
        self.set_value(group, key, OptionValue::FloatRect(value));
    }

    /// # Panics
    ///
    /// Panics if `group.key` is unknown or is not an integer option.
    pub fn set_integer(&mut self, group: &str, key: &str, value: i32) {
        self.set_value(group, key, OptionValue::Integer(value));
    }

    fn kind_mismatch(&self, group: &str, key: &str, wanted: ValueKind, found: &OptionValue) -> ! {
        panic!(
            "{}: '{group}.{key}' is a {} option, read as {wanted}",
            self.name,
            found.kind()
        )
    }
}
