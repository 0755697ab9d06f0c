//! # retro-core
//!
//! Platform-independent building blocks of the RetroDream launcher.
//!
//! The launcher is a frame-driven menu that browses disc images and hands the
//! selected one to a loader.  Almost all of it is UI composition; the parts
//! that carry real state live here so they can be tested without a renderer:
//!
//! - **`config`** – a typed key/value store persisted as TOML.  Groups of
//!   options are registered with defaults, loaded over those defaults, and
//!   written back in full on every save.
//!
//! - **`input`** – the controller bitmask and the adaptive repeat controller
//!   that speeds up cursor movement while a direction is held.
//!
//! Everything here is single-threaded and synchronous.  The only I/O is the
//! config file read and write.

pub mod config;
pub mod input;

pub use config::{ConfigError, ConfigGroup, ConfigOption, ConfigStore, FloatRect, OptionValue};
pub use input::{KeyMask, RepeatController};
