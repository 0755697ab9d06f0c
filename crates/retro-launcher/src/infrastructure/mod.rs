//! Infrastructure layer for the launcher.
//!
//! Contains the OS-facing collaborators the shell consumes: filesystem
//! access (path checks, directory listing, platform default locations) and
//! controller input.
//!
//! **Dependency rule**: the `application` layer talks to these through the
//! [`fs::FileSystem`] and [`input::InputSource`] traits only, so every use
//! case can be tested with in-memory doubles.

pub mod fs;
pub mod input;
