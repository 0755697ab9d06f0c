//! Mock input source for testing.
//!
//! Lets tests inject per-frame key states and inspect the repeat delays the
//! shell pushed back, without a controller attached.  The source is a cheap
//! clonable handle: keep one clone in the test and hand the other to the shell.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use retro_core::KeyMask;

use super::InputSource;

#[derive(Debug, Default)]
struct MockState {
    frames: VecDeque<KeyMask>,
    delays: Vec<u32>,
    polled_players: Vec<usize>,
}

/// A mock implementation of [`InputSource`] driven by injected frames.
///
/// When no frame is queued, polling returns [`KeyMask::DELAY`].
#[derive(Debug, Clone, Default)]
pub struct MockInputSource {
    state: Arc<Mutex<MockState>>,
}

impl MockInputSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues the key state returned by the next poll.
    pub fn push_frame(&self, keys: KeyMask) {
        self.state.lock().expect("lock poisoned").frames.push_back(keys);
    }

    /// Queues several frames at once.
    pub fn push_frames(&self, frames: impl IntoIterator<Item = KeyMask>) {
        self.state
            .lock()
            .expect("lock poisoned")
            .frames
            .extend(frames);
    }

    /// Every repeat delay set so far, oldest first.
    pub fn delays(&self) -> Vec<u32> {
        self.state.lock().expect("lock poisoned").delays.clone()
    }

    /// The most recent repeat delay, if any was set.
    pub fn last_delay(&self) -> Option<u32> {
        self.state.lock().expect("lock poisoned").delays.last().copied()
    }

    /// Player indices passed to `raw_keys`, in call order.
    pub fn polled_players(&self) -> Vec<usize> {
        self.state.lock().expect("lock poisoned").polled_players.clone()
    }
}

impl InputSource for MockInputSource {
    fn raw_keys(&mut self, player: usize) -> KeyMask {
        let mut state = self.state.lock().expect("lock poisoned");
        state.polled_players.push(player);
        state.frames.pop_front().unwrap_or(KeyMask::DELAY)
    }

    fn set_repeat_delay(&mut self, delay_ms: u32) {
        self.state.lock().expect("lock poisoned").delays.push(delay_ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_returns_frames_in_order() {
        // Arrange
        let handle = MockInputSource::new();
        let mut source = handle.clone();

        // Act
        handle.push_frames([KeyMask::UP, KeyMask::NONE]);

        // Assert
        assert_eq!(source.raw_keys(0), KeyMask::UP);
        assert_eq!(source.raw_keys(0), KeyMask::NONE);
        assert_eq!(source.polled_players(), vec![0, 0]);
    }

    #[test]
    fn test_mock_reports_delay_when_queue_is_empty() {
        let mut source = MockInputSource::new();
        assert_eq!(source.raw_keys(0), KeyMask::DELAY);
    }

    #[test]
    fn test_mock_records_repeat_delays_through_clone() {
        // Arrange
        let handle = MockInputSource::new();
        let mut source = handle.clone();

        // Act
        source.set_repeat_delay(200);
        source.set_repeat_delay(50);

        // Assert
        assert_eq!(handle.delays(), vec![200, 50]);
        assert_eq!(handle.last_delay(), Some(50));
    }
}
