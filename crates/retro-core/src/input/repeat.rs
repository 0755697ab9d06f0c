//! Adaptive key-repeat timing.
//!
//! The input layer turns a held key set into a stream of repeat events spaced
//! by a *repeat delay*.  [`RepeatController`] shortens that delay the longer
//! the same key set stays held, so a cursor scrolling through a long list
//! speeds up, and snaps back to the configured base delay the moment the
//! held set changes.
//!
//! # Acceleration curve
//!
//! | Held for        | Repeat delay   |
//! |-----------------|----------------|
//! | up to 1 s       | base           |
//! | more than 1 s   | base / 4       |
//! | more than 3 s   | base / 8       |
//! | more than 5 s   | base / 12      |
//!
//! The steps are discrete on purpose: the user can predict when the next
//! speed-up happens.

use std::time::Instant;

use super::keys::KeyMask;

/// (held seconds, divisor) steps, checked from the longest hold down.
const ACCELERATION_STEPS: [(f32, u32); 3] = [(5.0, 12), (3.0, 8), (1.0, 4)];

/// Per-frame repeat-rate state.
///
/// Not persisted; one instance lives for the whole UI session.
#[derive(Debug, Clone)]
pub struct RepeatController {
    last_keys: KeyMask,
    held_since: Instant,
    base_delay_ms: u32,
    effective_delay_ms: u32,
}

impl RepeatController {
    /// Creates a controller whose held-duration clock starts now.
    pub fn new(base_delay_ms: u32) -> Self {
        Self::starting_at(base_delay_ms, Instant::now())
    }

    /// Creates a controller whose held-duration clock starts at `start`.
    pub fn starting_at(base_delay_ms: u32, start: Instant) -> Self {
        Self {
            last_keys: KeyMask::NONE,
            held_since: start,
            base_delay_ms,
            effective_delay_ms: base_delay_ms,
        }
    }

    /// Feeds this frame's raw key state, sampling the clock now.
    ///
    /// See [`update_at`](Self::update_at).
    pub fn update(&mut self, keys: KeyMask) -> Option<u32> {
        self.update_at(keys, Instant::now())
    }

    /// Feeds the raw key state observed at `now`.
    ///
    /// Returns the repeat delay (milliseconds) the input layer should use from
    /// this frame on, or `None` for a [`KeyMask::DELAY`] frame, which carries
    /// no key-state information and leaves the controller untouched.
    pub fn update_at(&mut self, keys: KeyMask, now: Instant) -> Option<u32> {
        if keys.is_delay() {
            return None;
        }

        let changed = !(self.last_keys ^ keys).is_empty();
        self.last_keys = keys;

        if changed {
            self.effective_delay_ms = self.base_delay_ms;
            self.held_since = now;
        } else {
            let held = now.saturating_duration_since(self.held_since).as_secs_f32();
            if let Some((_, divisor)) = ACCELERATION_STEPS.iter().find(|(secs, _)| held > *secs) {
                self.effective_delay_ms = self.base_delay_ms / divisor;
            }
        }

        Some(self.effective_delay_ms)
    }

    /// Changes the base delay, e.g. after the user edits the setting.
    ///
    /// The effective delay restarts from the new base.
    pub fn set_base_delay(&mut self, base_delay_ms: u32) {
        self.base_delay_ms = base_delay_ms;
        self.effective_delay_ms = base_delay_ms;
    }

    pub fn base_delay(&self) -> u32 {
        self.base_delay_ms
    }

    pub fn effective_delay(&self) -> u32 {
        self.effective_delay_ms
    }

    pub fn last_keys(&self) -> KeyMask {
        self.last_keys
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    const BASE: u32 = 240;

    fn at(start: Instant, secs: f32) -> Instant {
        start + Duration::from_secs_f32(secs)
    }

    /// Controller that has already seen `keys` pressed at `start`.
    fn holding(keys: KeyMask, start: Instant) -> RepeatController {
        let mut ctrl = RepeatController::starting_at(BASE, start);
        assert_eq!(ctrl.update_at(keys, start), Some(BASE));
        ctrl
    }

    #[test]
    fn test_held_key_accelerates_in_steps() {
        // Arrange
        let start = Instant::now();
        let mut ctrl = holding(KeyMask::DOWN, start);

        // Act
        let samples: Vec<Option<u32>> = [0.5, 2.0, 4.0, 6.0]
            .iter()
            .map(|t| ctrl.update_at(KeyMask::DOWN, at(start, *t)))
            .collect();

        // Assert
        assert_eq!(
            samples,
            vec![Some(BASE), Some(BASE / 4), Some(BASE / 8), Some(BASE / 12)]
        );
    }

    #[test]
    fn test_thresholds_are_strict() {
        // Exactly one second held is still within the base-rate window.
        let start = Instant::now();
        let mut ctrl = holding(KeyMask::UP, start);
        assert_eq!(ctrl.update_at(KeyMask::UP, at(start, 1.0)), Some(BASE));
        assert_eq!(ctrl.update_at(KeyMask::UP, at(start, 1.01)), Some(BASE / 4));
    }

    #[test]
    fn test_changed_keys_reset_to_base_and_restart_clock() {
        // Arrange: hold long enough to reach the fastest step
        let start = Instant::now();
        let mut ctrl = holding(KeyMask::DOWN, start);
        assert_eq!(ctrl.update_at(KeyMask::DOWN, at(start, 6.0)), Some(BASE / 12));

        // Act: add a second button to the held set
        let combo = KeyMask::DOWN | KeyMask::FIRE1;
        let after_change = ctrl.update_at(combo, at(start, 6.5));

        // Assert: back to base, and the clock counts from the change
        assert_eq!(after_change, Some(BASE));
        assert_eq!(ctrl.update_at(combo, at(start, 7.0)), Some(BASE));
        assert_eq!(ctrl.update_at(combo, at(start, 7.6)), Some(BASE / 4));
    }

    #[test]
    fn test_release_resets_to_base() {
        let start = Instant::now();
        let mut ctrl = holding(KeyMask::RIGHT, start);
        ctrl.update_at(KeyMask::RIGHT, at(start, 4.0));

        assert_eq!(ctrl.update_at(KeyMask::NONE, at(start, 4.1)), Some(BASE));
        assert_eq!(ctrl.effective_delay(), BASE);
    }

    #[test]
    fn test_delay_frames_are_ignored() {
        // Arrange
        let start = Instant::now();
        let mut ctrl = holding(KeyMask::DOWN, start);

        // Act: a DELAY frame in the middle of the hold
        let result = ctrl.update_at(KeyMask::DELAY, at(start, 2.0));

        // Assert: no output, no state change, hold is still continuous
        assert_eq!(result, None);
        assert_eq!(ctrl.last_keys(), KeyMask::DOWN);
        assert_eq!(ctrl.update_at(KeyMask::DOWN, at(start, 3.5)), Some(BASE / 8));
    }

    #[test]
    fn test_set_base_delay_restarts_from_new_base() {
        let start = Instant::now();
        let mut ctrl = holding(KeyMask::DOWN, start);
        ctrl.update_at(KeyMask::DOWN, at(start, 2.0));

        ctrl.set_base_delay(120);

        assert_eq!(ctrl.base_delay(), 120);
        assert_eq!(ctrl.effective_delay(), 120);
        assert_eq!(ctrl.update_at(KeyMask::DOWN, at(start, 4.0)), Some(120 / 8));
    }
}
