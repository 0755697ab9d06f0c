//! Typed key/value configuration persisted as TOML.
//!
//! # Structure
//!
//! - **`value`** – the three option value kinds ([`OptionValue`]) and the
//!   rectangle type used for screen geometry ([`FloatRect`]).
//! - **`group`** – [`ConfigGroup`], an ordered set of uniquely keyed options.
//! - **`store`** – [`ConfigStore`], which owns the groups, reads them from the
//!   backing file and writes them back.
//!
//! # Two kinds of failure
//!
//! Problems with the backing file (missing, unreadable, malformed, unwritable)
//! are *recoverable*: `load()` and `save()` report them as `false` and the
//! in-memory state stays valid.  Asking for a group or key that was never
//! registered, or reading a value with the wrong typed accessor, is a bug in
//! the caller and panics.

use std::path::PathBuf;

use thiserror::Error;

pub mod group;
pub mod store;
pub mod value;

pub use group::ConfigGroup;
pub use store::ConfigStore;
pub use value::{ConfigOption, FloatRect, OptionValue, ValueKind};

/// Error type for configuration definition and persistence.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A group with this name was already registered with the store.
    #[error("config group already defined: {0}")]
    DuplicateGroup(String),

    /// An option key was registered twice within one group.
    #[error("option '{key}' already defined in group '{group}'")]
    DuplicateOption { group: String, key: String },

    /// A file system I/O error occurred.
    #[error("I/O error accessing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// The config could not be serialized to TOML.
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// The file parsed as TOML but does not have the expected shape.
    #[error("malformed config: {0}")]
    Malformed(String),
}
