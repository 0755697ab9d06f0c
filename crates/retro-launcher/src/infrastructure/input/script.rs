//! Scripted input for the headless development build.
//!
//! A script is a plain text file with one step per line:
//!
//! ```text
//! # scroll down for two seconds, open the options, quit
//! DOWN 120
//! NONE 10
//! START 1
//! NONE 30
//! QUIT 1
//! ```
//!
//! Each step holds a key combination (`KEY[+KEY...]`, or `NONE`) for a number
//! of frames.  While a combination is held the source behaves like the
//! console input layer: the keys are reported on the step's first frame and
//! then once per elapsed repeat delay, with [`KeyMask::DELAY`] in between.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use retro_core::KeyMask;
use thiserror::Error;

use super::InputSource;

/// Error type for loading an input script.
#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("I/O error reading script {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("line {line}: {reason}")]
    InvalidLine { line: usize, reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Step {
    keys: KeyMask,
    frames: u32,
}

impl Step {
    fn parse(line_no: usize, text: &str) -> Result<Self, ScriptError> {
        let invalid = |reason: String| ScriptError::InvalidLine {
            line: line_no,
            reason,
        };

        let mut parts = text.split_whitespace();
        let (Some(keys), Some(frames), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(invalid(format!("expected `KEYS FRAMES`, got `{text}`")));
        };

        let mut mask = KeyMask::NONE;
        for name in keys.split('+') {
            let key = KeyMask::from_name(name)
                .filter(|k| !k.is_delay())
                .ok_or_else(|| invalid(format!("unknown key `{name}`")))?;
            mask |= key;
        }

        let frames = frames
            .parse::<u32>()
            .ok()
            .filter(|f| *f > 0)
            .ok_or_else(|| invalid(format!("frame count must be a positive integer, got `{frames}`")))?;

        Ok(Step { keys: mask, frames })
    }
}

/// Replays a parsed input script, one poll per frame.
#[derive(Debug, Clone)]
pub struct ScriptedInput {
    steps: Vec<Step>,
    step: usize,
    frame_in_step: u32,
    since_event_ms: u32,
    frame_ms: u32,
    repeat_delay_ms: u32,
    endless: bool,
}

impl ScriptedInput {
    /// Parses a script.  `frame_ms` is the simulated length of one frame.
    ///
    /// # Errors
    ///
    /// Returns [`ScriptError::InvalidLine`] for the first line that does not
    /// parse.
    pub fn parse(text: &str, frame_ms: u32) -> Result<Self, ScriptError> {
        let steps = text
            .lines()
            .enumerate()
            .map(|(i, line)| (i + 1, line.split('#').next().unwrap_or("").trim()))
            .filter(|(_, line)| !line.is_empty())
            .map(|(no, line)| Step::parse(no, line))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::with_steps(steps, frame_ms, false))
    }

    /// Reads and parses a script file.
    ///
    /// # Errors
    ///
    /// Returns [`ScriptError::Io`] if the file cannot be read, or
    /// [`ScriptError::InvalidLine`] if it does not parse.
    pub fn from_file(path: &Path, frame_ms: u32) -> Result<Self, ScriptError> {
        let text = std::fs::read_to_string(path).map_err(|source| ScriptError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text, frame_ms)
    }

    /// A source that never presses anything and never runs out.
    pub fn idle() -> Self {
        Self::with_steps(Vec::new(), 0, true)
    }

    fn with_steps(steps: Vec<Step>, frame_ms: u32, endless: bool) -> Self {
        Self {
            steps,
            step: 0,
            frame_in_step: 0,
            since_event_ms: 0,
            frame_ms,
            repeat_delay_ms: 0,
            endless,
        }
    }

    /// Number of steps in the script.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl FromStr for ScriptedInput {
    type Err = ScriptError;

    /// Parses with a 16 ms frame.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s, 16)
    }
}

impl InputSource for ScriptedInput {
    fn raw_keys(&mut self, _player: usize) -> KeyMask {
        let Some(step) = self.steps.get(self.step).copied() else {
            return KeyMask::DELAY;
        };

        let keys = if self.frame_in_step == 0 {
            self.since_event_ms = 0;
            step.keys
        } else if step.keys.is_empty() {
            KeyMask::DELAY
        } else {
            self.since_event_ms = self.since_event_ms.saturating_add(self.frame_ms);
            if self.since_event_ms >= self.repeat_delay_ms {
                self.since_event_ms = 0;
                step.keys
            } else {
                KeyMask::DELAY
            }
        };

        self.frame_in_step += 1;
        if self.frame_in_step >= step.frames {
            self.step += 1;
            self.frame_in_step = 0;
        }
        keys
    }

    fn set_repeat_delay(&mut self, delay_ms: u32) {
        self.repeat_delay_ms = delay_ms;
    }

    fn is_exhausted(&self) -> bool {
        !self.endless && self.step >= self.steps.len()
    }
}
