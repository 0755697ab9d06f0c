//! Focusable overlays: the file menu, the option menu and the credits.
//!
//! Overlays sit on top of the file browser.  At most one is visible at a
//! time and the visible one receives all input.  Each overlay only keeps its
//! own state and reports what the user asked for through an
//! [`OverlayResponse`]; the shell applies the consequences (persisting a
//! setting, hiding the dimming layer, booting an image).
//!
//! How the visibility change is animated is up to the renderer; overlays only
//! track whether they are currently shown.

use std::path::PathBuf;

use retro_core::{ConfigError, ConfigGroup, ConfigOption, FloatRect, KeyMask, OptionValue};

/// What the shell should do after an overlay handled a key event.
#[derive(Debug, Clone, PartialEq)]
pub enum OverlayResponse {
    /// Nothing beyond the overlay's own state changed.
    Handled,
    /// The overlay asks to be hidden.
    Close,
    /// Boot this disc image through the loader with these settings.
    Boot { image: PathBuf, options: ConfigGroup },
    /// Replace this overlay with the credits.
    ShowCredits,
    /// A setting was edited and should be persisted.
    Setting(SettingChange),
}

/// A settings edit made in the option menu.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SettingChange {
    InputDelay(i32),
    ScreenSize(FloatRect),
}

/// The capability every overlay variant provides.
pub trait Overlay {
    fn is_visible(&self) -> bool;
    fn set_visible(&mut self, visible: bool);
    fn handle_input(&mut self, keys: KeyMask) -> OverlayResponse;

    fn toggle(&mut self) {
        let visible = self.is_visible();
        self.set_visible(!visible);
    }
}

/// Moves `cursor` one step up or down with wrap-around.
fn step_cursor(cursor: usize, len: usize, keys: KeyMask) -> usize {
    if len == 0 {
        return 0;
    }
    if keys.contains(KeyMask::UP) {
        (cursor + len - 1) % len
    } else if keys.contains(KeyMask::DOWN) {
        (cursor + 1) % len
    } else {
        cursor
    }
}

// ── File menu ─────────────────────────────────────────────────────────────────

/// Config group holding the loader option values.
pub const LOADER_GROUP: &str = "loader";

/// Entries of the file menu, top to bottom.
///
/// `Boot` is an action; every other entry is a loader setting with a fixed
/// set of values, the first of which is the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoaderOption {
    Boot,
    Memory,
    Dma,
    Sync,
    Cdda,
    Loader,
    Os,
}

impl LoaderOption {
    pub const ALL: [LoaderOption; 7] = [
        LoaderOption::Boot,
        LoaderOption::Memory,
        LoaderOption::Dma,
        LoaderOption::Sync,
        LoaderOption::Cdda,
        LoaderOption::Loader,
        LoaderOption::Os,
    ];

    pub fn label(self) -> &'static str {
        match self {
            LoaderOption::Boot => "BOOT",
            LoaderOption::Memory => "MEMORY",
            LoaderOption::Dma => "DMA",
            LoaderOption::Sync => "SYNC",
            LoaderOption::Cdda => "CDDA",
            LoaderOption::Loader => "LOADER",
            LoaderOption::Os => "OS",
        }
    }

    /// Key inside [`LOADER_GROUP`]; `None` for `Boot`.
    pub fn key(self) -> Option<&'static str> {
        match self {
            LoaderOption::Boot => None,
            LoaderOption::Memory => Some("memory"),
            LoaderOption::Dma => Some("dma"),
            LoaderOption::Sync => Some("sync"),
            LoaderOption::Cdda => Some("cdda"),
            LoaderOption::Loader => Some("loader"),
            LoaderOption::Os => Some("os"),
        }
    }

    /// Values LEFT/RIGHT cycle through, default first.
    pub fn choices(self) -> &'static [&'static str] {
        match self {
            LoaderOption::Boot => &[],
            LoaderOption::Memory => &["0x8c004000", "0x8c000100", "0x8ce00000", "0x8cef8000"],
            LoaderOption::Dma => &["AUTO", "ON", "OFF"],
            LoaderOption::Sync => &["AUTO", "1", "2", "4", "8", "16"],
            LoaderOption::Cdda => &["OFF", "ON"],
            LoaderOption::Loader => &["AUTO", "CD", "SD", "IDE"],
            LoaderOption::Os => &["AUTO", "KATANA", "WINCE"],
        }
    }

    /// The loader group with every setting at its default.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::DuplicateOption`] if two entries share a key.
    pub fn default_group() -> Result<ConfigGroup, ConfigError> {
        let mut group = ConfigGroup::new(LOADER_GROUP);
        for option in Self::ALL {
            if let (Some(key), Some(default)) = (option.key(), option.choices().first()) {
                group.add_option(ConfigOption::new(key, *default))?;
            }
        }
        Ok(group)
    }
}

/// Per-image menu opened with FIRE4 on a game.
///
/// UP/DOWN move, LEFT/RIGHT (or FIRE1) change the selected setting, FIRE1 on
/// `Boot` boots the target with the current settings, FIRE2 closes.
#[derive(Debug, Clone)]
pub struct FileMenu {
    visible: bool,
    title: String,
    target: Option<PathBuf>,
    cursor: usize,
    options: ConfigGroup,
}

impl FileMenu {
    pub const LOADER_TITLE: &'static str = "LOADER OPTIONS";

    /// Creates the menu editing `options` (see [`LoaderOption::default_group`]).
    pub fn new(options: ConfigGroup) -> Self {
        Self {
            visible: false,
            title: String::new(),
            target: None,
            cursor: 0,
            options,
        }
    }

    /// Points the menu at a disc image and resets the cursor to `Boot`.
    pub fn set_target(&mut self, image: PathBuf) {
        self.target = Some(image);
        self.cursor = 0;
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn target(&self) -> Option<&PathBuf> {
        self.target.as_ref()
    }

    pub fn selected(&self) -> LoaderOption {
        LoaderOption::ALL[self.cursor]
    }

    pub fn options(&self) -> &ConfigGroup {
        &self.options
    }

    /// Current value of a loader setting.
    pub fn value(&self, option: LoaderOption) -> Option<&str> {
        match self.options.option(option.key()?)?.value() {
            OptionValue::String(value) => Some(value),
            _ => None,
        }
    }

    /// Steps `option` to its next (or previous) value.  A value that is not
    /// one of the choices restarts at the default.
    fn cycle(&mut self, option: LoaderOption, forward: bool) {
        let choices = option.choices();
        let Some(key) = option.key().filter(|_| !choices.is_empty()) else {
            return;
        };
        let len = choices.len();
        let current = self
            .value(option)
            .and_then(|v| choices.iter().position(|c| *c == v));
        let next = match current {
            Some(i) if forward => (i + 1) % len,
            Some(i) => (i + len - 1) % len,
            None => 0,
        };
        self.options.set(key, choices[next]);
    }
}

impl Overlay for FileMenu {
    fn is_visible(&self) -> bool {
        self.visible
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn handle_input(&mut self, keys: KeyMask) -> OverlayResponse {
        if keys.contains(KeyMask::FIRE2) {
            return OverlayResponse::Close;
        }

        let selected = self.selected();
        if selected == LoaderOption::Boot {
            if keys.contains(KeyMask::FIRE1) {
                if let Some(image) = &self.target {
                    return OverlayResponse::Boot {
                        image: image.clone(),
                        options: self.options.clone(),
                    };
                }
            }
        } else if keys.contains(KeyMask::LEFT) {
            self.cycle(selected, false);
            return OverlayResponse::Handled;
        } else if keys.contains(KeyMask::RIGHT) || keys.contains(KeyMask::FIRE1) {
            self.cycle(selected, true);
            return OverlayResponse::Handled;
        }

        self.cursor = step_cursor(self.cursor, LoaderOption::ALL.len(), keys);
        OverlayResponse::Handled
    }
}

// ── Option menu ───────────────────────────────────────────────────────────────

pub const INPUT_DELAY_STEP_MS: i32 = 10;
pub const INPUT_DELAY_MIN_MS: i32 = 10;
pub const INPUT_DELAY_MAX_MS: i32 = 1000;
pub const SCREEN_STEP: f32 = 1.0;
pub const SCREEN_MIN_EXTENT: f32 = 1.0;

/// Entries of the option menu, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionEntry {
    InputDelay,
    ScreenLeft,
    ScreenTop,
    ScreenWidth,
    ScreenHeight,
    Credits,
}

impl OptionEntry {
    pub const ALL: [OptionEntry; 6] = [
        OptionEntry::InputDelay,
        OptionEntry::ScreenLeft,
        OptionEntry::ScreenTop,
        OptionEntry::ScreenWidth,
        OptionEntry::ScreenHeight,
        OptionEntry::Credits,
    ];
}

/// Launcher settings menu opened with START.
#[derive(Debug, Clone)]
pub struct OptionMenu {
    visible: bool,
    cursor: usize,
    input_delay: i32,
    screen: FloatRect,
}

impl OptionMenu {
    /// Creates the menu showing the current settings.
    ///
    /// A delay outside the editable range (hand-edited file) is shown clamped,
    /// so the first adjustment always moves in the pressed direction.
    pub fn new(input_delay: i32, screen: FloatRect) -> Self {
        Self {
            visible: false,
            cursor: 0,
            input_delay: input_delay.clamp(INPUT_DELAY_MIN_MS, INPUT_DELAY_MAX_MS),
            screen,
        }
    }

    pub fn selected(&self) -> OptionEntry {
        OptionEntry::ALL[self.cursor]
    }

    pub fn input_delay(&self) -> i32 {
        self.input_delay
    }

    pub fn screen(&self) -> FloatRect {
        self.screen
    }

    fn adjust(&mut self, direction: f32) -> Option<SettingChange> {
        let step = SCREEN_STEP * direction;
        match self.selected() {
            OptionEntry::InputDelay => {
                let delta = INPUT_DELAY_STEP_MS * direction as i32;
                let next = self
                    .input_delay
                    .saturating_add(delta)
                    .clamp(INPUT_DELAY_MIN_MS, INPUT_DELAY_MAX_MS);
                if next == self.input_delay {
                    return None;
                }
                self.input_delay = next;
                return Some(SettingChange::InputDelay(next));
            }
            OptionEntry::ScreenLeft => self.screen.left += step,
            OptionEntry::ScreenTop => self.screen.top += step,
            OptionEntry::ScreenWidth => {
                self.screen.width = (self.screen.width + step).max(SCREEN_MIN_EXTENT)
            }
            OptionEntry::ScreenHeight => {
                self.screen.height = (self.screen.height + step).max(SCREEN_MIN_EXTENT)
            }
            OptionEntry::Credits => return None,
        }
        Some(SettingChange::ScreenSize(self.screen))
    }
}

impl Overlay for OptionMenu {
    fn is_visible(&self) -> bool {
        self.visible
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn handle_input(&mut self, keys: KeyMask) -> OverlayResponse {
        if keys.contains(KeyMask::FIRE2) {
            return OverlayResponse::Close;
        }
        if keys.contains(KeyMask::FIRE1) && self.selected() == OptionEntry::Credits {
            return OverlayResponse::ShowCredits;
        }

        let change = if keys.contains(KeyMask::LEFT) {
            self.adjust(-1.0)
        } else if keys.contains(KeyMask::RIGHT) {
            self.adjust(1.0)
        } else {
            self.cursor = step_cursor(self.cursor, OptionEntry::ALL.len(), keys);
            None
        };

        match change {
            Some(change) => OverlayResponse::Setting(change),
            None => OverlayResponse::Handled,
        }
    }
}

// ── Credits ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct Credits {
    visible: bool,
}

impl Credits {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Overlay for Credits {
    fn is_visible(&self) -> bool {
        self.visible
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn handle_input(&mut self, keys: KeyMask) -> OverlayResponse {
        let closing = KeyMask::FIRE1 | KeyMask::FIRE2 | KeyMask::START;
        if (keys & closing).is_empty() {
            OverlayResponse::Handled
        } else {
            OverlayResponse::Close
        }
    }
}
