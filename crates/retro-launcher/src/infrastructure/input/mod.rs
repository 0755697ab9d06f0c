//! Controller input collaborator.
//!
//! The platform input layer is polled once per frame for a player's raw
//! [`KeyMask`].  It synthesises key repeat itself: while a key set is held it
//! reports the keys on the first frame and again each time the repeat delay
//! elapses, and reports [`KeyMask::DELAY`] on the frames in between.  The shell
//! adjusts that delay every frame through [`InputSource::set_repeat_delay`].
//!
//! # Implementations
//!
//! - [`mock::MockInputSource`] – queue of frames injected by tests, records
//!   every repeat-delay change.
//! - [`script::ScriptedInput`] – replays a text script; drives the headless
//!   development binary.

use retro_core::KeyMask;

pub mod mock;
pub mod script;

pub use script::{ScriptError, ScriptedInput};

/// Trait abstracting the platform input layer.
pub trait InputSource {
    /// Returns this frame's key state for `player` (0-based).
    fn raw_keys(&mut self, player: usize) -> KeyMask;

    /// Sets the interval, in milliseconds, between synthetic repeat events.
    fn set_repeat_delay(&mut self, delay_ms: u32);

    /// `true` once the source will never produce input again.
    ///
    /// Live devices never run dry; recorded sources do.
    fn is_exhausted(&self) -> bool {
        false
    }
}
