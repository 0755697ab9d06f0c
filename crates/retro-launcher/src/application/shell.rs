//! LauncherShell: the per-frame driver of the launcher UI.
//!
//! The shell owns every piece of session state (the settings, the repeat
//! controller, the file browser and the overlays) and runs one tick per
//! frame:
//!
//! ```text
//!  InputSource::raw_keys(0)
//!        │
//!        ▼
//!  RepeatController::update_at ──► InputSource::set_repeat_delay
//!        │
//!        ▼  (skipped for DELAY / empty frames)
//!  handle_input ── global keys (QUIT, screenshot, FIRE4, START)
//!        │
//!        ▼
//!  focused element: credits > file menu > option menu > file browser
//! ```
//!
//! Rendering and the disc loader live outside this crate.  Whatever the
//! shell cannot do itself is handed back to the caller as a [`ShellAction`].

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use retro_core::{ConfigGroup, FloatRect, KeyMask, RepeatController};
use tracing::{debug, info};

use super::browser::{BrowserEvent, FileBrowser};
use super::launcher_config::LauncherConfig;
use super::overlay::{
    Credits, FileMenu, OptionMenu, Overlay, OverlayResponse, SettingChange,
};
use crate::infrastructure::fs::FileSystem;
use crate::infrastructure::input::InputSource;

/// Width of the frame drawn around the content area.
pub const OUTLINE: f32 = 6.0;
/// Sub-directory of the data path that receives screenshots.
pub const SCREENSHOT_DIR: &str = "screenshots";

/// Work the shell asks its collaborators to perform.
#[derive(Debug, Clone, PartialEq)]
pub enum ShellAction {
    /// Save a screenshot into this directory.
    Screenshot(PathBuf),
    /// Boot this disc image with the loader settings from the file menu.
    Boot { image: PathBuf, options: ConfigGroup },
    /// Leave the launcher.
    Quit,
}

#[derive(Debug, Clone, Copy)]
enum Focus {
    Credits,
    FileMenu,
    OptionMenu,
}

pub struct LauncherShell {
    config: LauncherConfig,
    input: Box<dyn InputSource>,
    repeat: RepeatController,
    browser: FileBrowser,
    file_menu: FileMenu,
    option_menu: OptionMenu,
    credits: Credits,
    dim_visible: bool,
    content_rect: FloatRect,
    quit: bool,
}

impl LauncherShell {
    /// Builds the UI state from the loaded settings.
    ///
    /// The browser opens on the last visited directory and the input source
    /// gets the configured repeat delay before the first frame.
    pub fn new(
        mut config: LauncherConfig,
        fs: Arc<dyn FileSystem>,
        mut input: Box<dyn InputSource>,
    ) -> Self {
        let start_dir = config.last_path();
        let screen = config.screen_size();
        let delay = config.input_delay();

        let base_delay = delay_ms(delay);
        input.set_repeat_delay(base_delay);

        Self {
            browser: FileBrowser::new(fs, start_dir),
            option_menu: OptionMenu::new(delay, screen),
            file_menu: FileMenu::new(config.loader_options()),
            credits: Credits::new(),
            repeat: RepeatController::new(base_delay),
            content_rect: screen.inset(OUTLINE),
            dim_visible: false,
            quit: false,
            config,
            input,
        }
    }

    /// Runs one frame, sampling the clock now.
    pub fn frame(&mut self) -> Option<ShellAction> {
        self.frame_at(Instant::now())
    }

    /// Runs one frame as if it happened at `now`.
    pub fn frame_at(&mut self, now: Instant) -> Option<ShellAction> {
        let keys = self.input.raw_keys(0);
        if let Some(delay) = self.repeat.update_at(keys, now) {
            self.input.set_repeat_delay(delay);
        }
        if keys.is_delay() || keys.is_empty() {
            return None;
        }
        self.handle_input(keys)
    }

    /// Routes one key event.
    pub fn handle_input(&mut self, keys: KeyMask) -> Option<ShellAction> {
        if keys.contains(KeyMask::QUIT) {
            info!("quit requested");
            self.quit = true;
            return Some(ShellAction::Quit);
        }

        if !self.credits.is_visible() {
            if keys.contains(KeyMask::FIRE3 | KeyMask::FIRE5 | KeyMask::FIRE6) {
                let dir = self.config.data_path().join(SCREENSHOT_DIR);
                info!("screenshot requested into {}", dir.display());
                return Some(ShellAction::Screenshot(dir));
            }
            if keys.contains(KeyMask::FIRE4) {
                if let Some(image) = self.selected_game() {
                    self.toggle_file_menu(image);
                    return None;
                }
            } else if keys.contains(KeyMask::START) {
                self.option_menu.toggle();
                self.hide_file_menu();
                self.dim_visible = self.option_menu.is_visible();
                debug!("option menu visible: {}", self.dim_visible);
                return None;
            }
        }

        self.dispatch(keys)
    }

    fn selected_game(&self) -> Option<PathBuf> {
        self.browser
            .selection()
            .filter(|e| e.is_game())
            .map(|e| e.path.clone())
    }

    fn toggle_file_menu(&mut self, image: PathBuf) {
        self.option_menu.set_visible(false);
        if self.file_menu.is_visible() {
            self.hide_file_menu();
        } else {
            self.file_menu.set_title(FileMenu::LOADER_TITLE);
            self.file_menu.set_target(image);
            self.file_menu.set_visible(true);
        }
        self.dim_visible = self.file_menu.is_visible();
        debug!("file menu visible: {}", self.dim_visible);
    }

    /// Hides the file menu, persisting the loader settings it was editing.
    fn hide_file_menu(&mut self) {
        if !self.file_menu.is_visible() {
            return;
        }
        self.file_menu.set_visible(false);
        if self.config.set_loader_options(self.file_menu.options()) {
            debug!("loader options saved");
        }
    }

    fn focus(&self) -> Option<Focus> {
        if self.credits.is_visible() {
            Some(Focus::Credits)
        } else if self.file_menu.is_visible() {
            Some(Focus::FileMenu)
        } else if self.option_menu.is_visible() {
            Some(Focus::OptionMenu)
        } else {
            None
        }
    }

    fn overlay_mut(&mut self, focus: Focus) -> &mut dyn Overlay {
        match focus {
            Focus::Credits => &mut self.credits,
            Focus::FileMenu => &mut self.file_menu,
            Focus::OptionMenu => &mut self.option_menu,
        }
    }

    fn dispatch(&mut self, keys: KeyMask) -> Option<ShellAction> {
        let Some(focus) = self.focus() else {
            if let Some(BrowserEvent::DirectoryChanged(dir)) = self.browser.handle_input(keys) {
                self.config.set_last_path(&dir);
            }
            return None;
        };

        match self.overlay_mut(focus).handle_input(keys) {
            OverlayResponse::Handled => None,
            OverlayResponse::Close => {
                match focus {
                    Focus::FileMenu => self.hide_file_menu(),
                    _ => self.overlay_mut(focus).set_visible(false),
                }
                self.dim_visible = false;
                None
            }
            OverlayResponse::Boot { image, options } => {
                info!("booting {}", image.display());
                self.hide_file_menu();
                self.dim_visible = false;
                Some(ShellAction::Boot { image, options })
            }
            OverlayResponse::ShowCredits => {
                self.option_menu.set_visible(false);
                self.credits.set_visible(true);
                self.dim_visible = true;
                None
            }
            OverlayResponse::Setting(change) => {
                self.apply_setting(change);
                None
            }
        }
    }

    fn apply_setting(&mut self, change: SettingChange) {
        match change {
            SettingChange::InputDelay(ms) => {
                info!("input delay set to {ms} ms");
                self.config.set_input_delay(ms);
                let base = delay_ms(ms);
                self.repeat.set_base_delay(base);
                self.input.set_repeat_delay(base);
            }
            SettingChange::ScreenSize(rect) => {
                debug!("screen size set to {rect:?}");
                self.config.set_screen_size(rect);
                self.content_rect = rect.inset(OUTLINE);
            }
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────────

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// `true` once a scripted input source has nothing left to replay.
    pub fn input_exhausted(&self) -> bool {
        self.input.is_exhausted()
    }

    /// Drawing area inside the outline.
    pub fn content_rect(&self) -> FloatRect {
        self.content_rect
    }

    /// Whether the dimming layer behind the overlays is shown.
    pub fn is_dimmed(&self) -> bool {
        self.dim_visible
    }

    pub fn browser(&self) -> &FileBrowser {
        &self.browser
    }

    pub fn file_menu(&self) -> &FileMenu {
        &self.file_menu
    }

    pub fn option_menu(&self) -> &OptionMenu {
        &self.option_menu
    }

    pub fn credits(&self) -> &Credits {
        &self.credits
    }

    pub fn config(&self) -> &LauncherConfig {
        &self.config
    }

    pub fn repeat(&self) -> &RepeatController {
        &self.repeat
    }
}

/// Negative delays from a hand-edited file count as zero.
fn delay_ms(ms: i32) -> u32 {
    u32::try_from(ms).unwrap_or(0)
}
