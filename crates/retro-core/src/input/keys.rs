//! Controller button bitmask.

use std::fmt;
use std::ops::{BitAnd, BitOr, BitOrAssign, BitXor};

/// The set of buttons held by one player during a frame.
///
/// Each button occupies one bit.  Two values are not button combinations:
///
/// - [`KeyMask::DELAY`] is reported by the input layer on frames that fall
///   between two repeat events of a held key set.  It carries no key-state
///   information and must be compared by equality, never with `contains`.
/// - [`KeyMask::QUIT`] is raised when the platform asks the application to
///   exit (window close, console reset).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct KeyMask(pub u32);

impl KeyMask {
    pub const NONE: KeyMask = KeyMask(0);
    pub const UP: KeyMask = KeyMask(1 << 0);
    pub const DOWN: KeyMask = KeyMask(1 << 1);
    pub const LEFT: KeyMask = KeyMask(1 << 2);
    pub const RIGHT: KeyMask = KeyMask(1 << 3);
    pub const SELECT: KeyMask = KeyMask(1 << 4);
    pub const START: KeyMask = KeyMask(1 << 5);
    pub const FIRE1: KeyMask = KeyMask(1 << 6);
    pub const FIRE2: KeyMask = KeyMask(1 << 7);
    pub const FIRE3: KeyMask = KeyMask(1 << 8);
    pub const FIRE4: KeyMask = KeyMask(1 << 9);
    pub const FIRE5: KeyMask = KeyMask(1 << 10);
    pub const FIRE6: KeyMask = KeyMask(1 << 11);
    pub const QUIT: KeyMask = KeyMask(1 << 12);
    /// Sentinel: no new key-state this frame.
    pub const DELAY: KeyMask = KeyMask(1 << 31);

    const NAMES: [(&'static str, KeyMask); 13] = [
        ("UP", KeyMask::UP),
        ("DOWN", KeyMask::DOWN),
        ("LEFT", KeyMask::LEFT),
        ("RIGHT", KeyMask::RIGHT),
        ("SELECT", KeyMask::SELECT),
        ("START", KeyMask::START),
        ("FIRE1", KeyMask::FIRE1),
        ("FIRE2", KeyMask::FIRE2),
        ("FIRE3", KeyMask::FIRE3),
        ("FIRE4", KeyMask::FIRE4),
        ("FIRE5", KeyMask::FIRE5),
        ("FIRE6", KeyMask::FIRE6),
        ("QUIT", KeyMask::QUIT),
    ];

    /// Returns `true` if every bit of `other` is set in `self`.
    pub fn contains(self, other: KeyMask) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// `true` for the frame-without-news sentinel.
    pub fn is_delay(self) -> bool {
        self == KeyMask::DELAY
    }

    /// Looks up a single button by its upper-case name (`"UP"`, `"FIRE1"`, ...).
    pub fn from_name(name: &str) -> Option<KeyMask> {
        let upper = name.to_ascii_uppercase();
        match upper.as_str() {
            "NONE" => Some(KeyMask::NONE),
            "DELAY" => Some(KeyMask::DELAY),
            _ => Self::NAMES
                .iter()
                .find(|(n, _)| *n == upper)
                .map(|(_, mask)| *mask),
        }
    }
}

impl BitOr for KeyMask {
    type Output = KeyMask;

    fn bitor(self, rhs: KeyMask) -> KeyMask {
        KeyMask(self.0 | rhs.0)
    }
}

impl BitOrAssign for KeyMask {
    fn bitor_assign(&mut self, rhs: KeyMask) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for KeyMask {
    type Output = KeyMask;

    fn bitand(self, rhs: KeyMask) -> KeyMask {
        KeyMask(self.0 & rhs.0)
    }
}

impl BitXor for KeyMask {
    type Output = KeyMask;

    fn bitxor(self, rhs: KeyMask) -> KeyMask {
        KeyMask(self.0 ^ rhs.0)
    }
}

impl fmt::Display for KeyMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_delay() {
            return f.write_str("DELAY");
        }
        if self.is_empty() {
            return f.write_str("NONE");
        }
        let mut first = true;
        for (name, mask) in Self::NAMES.iter() {
            if self.contains(*mask) {
                if !first {
                    f.write_str("+")?;
                }
                f.write_str(name)?;
                first = false;
            }
        }
        Ok(())
    }
}
