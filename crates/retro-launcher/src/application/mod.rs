//! Application layer of the launcher.
//!
//! # What is the "application" layer? (for beginners)
//!
//! In Clean Architecture the *application* layer sits between the domain
//! (`retro_core`: config storage and input timing) and the infrastructure
//! (filesystem, controller input).  Code here:
//!
//! - **Orchestrates** domain objects to fulfil a user goal (e.g., "remember
//!   the directory the user just browsed into").
//! - **Depends on abstractions** ([`FileSystem`], [`InputSource`]) rather
//!   than concrete implementations, so tests run on in-memory doubles.
//! - **Performs no OS calls of its own**; the config file is the one
//!   exception, and it goes through `retro_core::ConfigStore`.
//!
//! # Sub-modules
//!
//! - **`launcher_config`** – The launcher's four settings, their defaults and
//!   the self-healing path getters.
//!
//! - **`overlay`** – The menus that pop over the browser: file menu, option
//!   menu and credits.
//!
//! - **`browser`** – Directory listing and cursor.
//!
//! - **`shell`** – The per-frame loop tying everything above together.  Runs
//!   on every frame, so it stays allocation-light.
//!
//! [`FileSystem`]: crate::infrastructure::fs::FileSystem
//! [`InputSource`]: crate::infrastructure::input::InputSource

pub mod browser;
pub mod launcher_config;
pub mod overlay;
pub mod shell;
