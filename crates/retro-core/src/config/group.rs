//! Named groups of configuration options.

use super::value::{ConfigOption, OptionValue};
use super::ConfigError;

/// A named collection of typed options.
///
/// Options keep their registration order, which is also the order they are
/// written to disk.  Keys are unique within a group.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigGroup {
    name: String,
    options: Vec<ConfigOption>,
}

impl ConfigGroup {
    /// Creates an empty group.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            options: Vec::new(),
        }
    }

    /// Registers an option with its default value.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::DuplicateOption`] if the key is already present.
    pub fn add_option(&mut self, option: ConfigOption) -> Result<(), ConfigError> {
        if self.option(option.key()).is_some() {
            return Err(ConfigError::DuplicateOption {
                group: self.name.clone(),
                key: option.key().to_string(),
            });
        }
        self.options.push(option);
        Ok(())
    }

    /// Builder form of [`add_option`](Self::add_option).
    ///
    /// # Errors
    ///
    /// Same as [`add_option`](Self::add_option).
    pub fn with_option(
        mut self,
        key: impl Into<String>,
        value: impl Into<OptionValue>,
    ) -> Result<Self, ConfigError> {
        self.add_option(ConfigOption::new(key, value))?;
        Ok(self)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn option(&self, key: &str) -> Option<&ConfigOption> {
        self.options.iter().find(|o| o.key() == key)
    }

    /// Replaces the value of `key`.
    ///
    /// Returns `false`, leaving the group untouched, if the key is unknown or
    /// `value` is not of the registered kind.
    pub fn set(&mut self, key: &str, value: impl Into<OptionValue>) -> bool {
        let value = value.into();
        self.option_mut(key).is_some_and(|o| o.replace(value))
    }

    pub(crate) fn option_mut(&mut self, key: &str) -> Option<&mut ConfigOption> {
        self.options.iter_mut().find(|o| o.key() == key)
    }

    pub fn options(&self) -> impl Iterator<Item = &ConfigOption> {
        self.options.iter()
    }

    pub(crate) fn options_mut(&mut self) -> impl Iterator<Item = &mut ConfigOption> {
        self.options.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}
