//! End-to-end tests for `LauncherShell`: real filesystem, mock controller.
//!
//! The sandbox home directory holds:
//!
//! ```text
//! home/games/       directory
//! home/notes.txt    plain file
//! home/rez.gdi      disc image
//! ```
//!
//! so the sorted listing is `games`, `notes.txt`, `rez.gdi`.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use retro_core::{FloatRect, KeyMask, OptionValue};
use retro_launcher::application::launcher_config::LauncherConfig;
use retro_launcher::application::overlay::{LoaderOption, Overlay, LOADER_GROUP};
use retro_launcher::application::shell::{LauncherShell, ShellAction, SCREENSHOT_DIR};
use retro_launcher::infrastructure::fs::{FileSystem, LocalFileSystem};
use retro_launcher::infrastructure::input::mock::MockInputSource;
use uuid::Uuid;

struct Sandbox(PathBuf);

impl Sandbox {
    fn new() -> Self {
        let root = std::env::temp_dir().join(format!("retro_shell_test_{}", Uuid::new_v4()));
        std::fs::create_dir_all(root.join("data")).expect("create data dir");
        std::fs::create_dir_all(root.join("home/games")).expect("create games dir");
        std::fs::write(root.join("home/notes.txt"), "hello").expect("write file");
        std::fs::write(root.join("home/rez.gdi"), "").expect("write image");
        Self(root)
    }

    fn path(&self, name: &str) -> PathBuf {
        self.0.join(name)
    }

    fn fs(&self) -> Arc<dyn FileSystem> {
        Arc::new(LocalFileSystem::new(
            self.path("config.toml"),
            self.path("data"),
            self.path("home"),
        ))
    }

    fn shell(&self) -> (LauncherShell, MockInputSource) {
        let fs = self.fs();
        let config = LauncherConfig::new(Arc::clone(&fs)).expect("valid schema");
        let input = MockInputSource::new();
        let shell = LauncherShell::new(config, fs, Box::new(input.clone()));
        (shell, input)
    }

    fn reopen_config(&self) -> LauncherConfig {
        LauncherConfig::new(self.fs()).expect("valid schema")
    }
}

impl Drop for Sandbox {
    fn drop(&mut self) {
        std::fs::remove_dir_all(&self.0).ok();
    }
}

/// Feeds one frame through the mock source and runs it.
fn press(shell: &mut LauncherShell, input: &MockInputSource, keys: KeyMask) -> Option<ShellAction> {
    input.push_frame(keys);
    shell.frame()
}

#[test]
fn test_browser_starts_in_home_with_sorted_listing() {
    let sandbox = Sandbox::new();
    let (shell, _input) = sandbox.shell();

    let names: Vec<&str> = shell.browser().entries().iter().map(|e| e.name.as_str()).collect();

    assert_eq!(shell.browser().current_dir(), sandbox.path("home"));
    assert_eq!(names, ["games", "notes.txt", "rez.gdi"]);
}

#[test]
fn test_start_toggles_option_menu_and_dimming() {
    // Arrange
    let sandbox = Sandbox::new();
    let (mut shell, input) = sandbox.shell();

    // Act / Assert
    press(&mut shell, &input, KeyMask::START);
    assert!(shell.option_menu().is_visible());
    assert!(shell.is_dimmed());

    press(&mut shell, &input, KeyMask::START);
    assert!(!shell.option_menu().is_visible());
    assert!(!shell.is_dimmed());
}

#[test]
fn test_boot_flow_from_file_menu() {
    // Arrange: move the cursor to rez.gdi
    let sandbox = Sandbox::new();
    let (mut shell, input) = sandbox.shell();
    press(&mut shell, &input, KeyMask::UP);

    // Act
    let opened = press(&mut shell, &input, KeyMask::FIRE4);
    let action = press(&mut shell, &input, KeyMask::FIRE1);

    // Assert
    assert_eq!(opened, None);
    let defaults = LoaderOption::default_group().expect("unique keys");
    assert_eq!(
        action,
        Some(ShellAction::Boot {
            image: sandbox.path("home/rez.gdi"),
            options: defaults,
        })
    );
    assert!(!shell.file_menu().is_visible());
    assert!(!shell.is_dimmed());
}

#[test]
fn test_fire2_closes_file_menu() {
    let sandbox = Sandbox::new();
    let (mut shell, input) = sandbox.shell();
    press(&mut shell, &input, KeyMask::UP);
    press(&mut shell, &input, KeyMask::FIRE4);

    press(&mut shell, &input, KeyMask::FIRE2);

    assert!(!shell.file_menu().is_visible());
    assert!(!shell.is_dimmed());
    // The browser kept its directory: FIRE2 went to the menu only.
    assert_eq!(shell.browser().current_dir(), sandbox.path("home"));
}

#[test]
fn test_loader_setting_is_saved_when_menu_closes() {
    // Arrange: file menu on rez.gdi, cursor on DMA
    let sandbox = Sandbox::new();
    let (mut shell, input) = sandbox.shell();
    press(&mut shell, &input, KeyMask::UP);
    press(&mut shell, &input, KeyMask::FIRE4);
    press(&mut shell, &input, KeyMask::DOWN);
    press(&mut shell, &input, KeyMask::DOWN);

    // Act: AUTO -> ON, then close
    press(&mut shell, &input, KeyMask::RIGHT);
    assert_eq!(
        sandbox.reopen_config().store().get_string(LOADER_GROUP, "dma"),
        "AUTO",
        "nothing is saved while the menu is open"
    );
    press(&mut shell, &input, KeyMask::FIRE2);

    // Assert
    assert_eq!(shell.file_menu().value(LoaderOption::Dma), Some("ON"));
    assert_eq!(
        sandbox.reopen_config().store().get_string(LOADER_GROUP, "dma"),
        "ON"
    );
}

#[test]
fn test_boot_carries_edited_loader_setting() {
    // Arrange: file menu on rez.gdi, OS set to KATANA
    let sandbox = Sandbox::new();
    let (mut shell, input) = sandbox.shell();
    press(&mut shell, &input, KeyMask::UP);
    press(&mut shell, &input, KeyMask::FIRE4);
    press(&mut shell, &input, KeyMask::UP);
    press(&mut shell, &input, KeyMask::RIGHT);
    press(&mut shell, &input, KeyMask::DOWN);

    // Act
    let action = press(&mut shell, &input, KeyMask::FIRE1);

    // Assert
    let Some(ShellAction::Boot { options, .. }) = action else {
        panic!("expected a boot action");
    };
    assert_eq!(
        options.option("os").map(|o| o.value()),
        Some(&OptionValue::from("KATANA"))
    );
    assert_eq!(
        sandbox.reopen_config().store().get_string(LOADER_GROUP, "os"),
        "KATANA"
    );
}

#[test]
fn test_screenshot_combo_targets_data_path() {
    let sandbox = Sandbox::new();
    let (mut shell, input) = sandbox.shell();

    let action = press(&mut shell, &input, KeyMask::FIRE3 | KeyMask::FIRE5 | KeyMask::FIRE6);

    assert_eq!(
        action,
        Some(ShellAction::Screenshot(sandbox.path("data").join(SCREENSHOT_DIR)))
    );
}

#[test]
fn test_quit_sets_flag() {
    let sandbox = Sandbox::new();
    let (mut shell, input) = sandbox.shell();

    let action = press(&mut shell, &input, KeyMask::QUIT);

    assert_eq!(action, Some(ShellAction::Quit));
    assert!(shell.should_quit());
}

#[test]
fn test_entering_directory_is_remembered_across_restart() {
    // Arrange: cursor starts on `games`
    let sandbox = Sandbox::new();
    let (mut shell, input) = sandbox.shell();

    // Act
    press(&mut shell, &input, KeyMask::FIRE1);
    drop(shell);

    // Assert
    assert_eq!(sandbox.reopen_config().last_path(), sandbox.path("home/games"));
}

#[test]
fn test_held_key_accelerates_then_resets_on_release() {
    // Arrange
    let sandbox = Sandbox::new();
    let (mut shell, input) = sandbox.shell();
    let t0 = Instant::now();
    input.push_frames([KeyMask::DOWN, KeyMask::DELAY, KeyMask::DOWN, KeyMask::NONE]);

    // Act
    shell.frame_at(t0);
    shell.frame_at(t0 + Duration::from_millis(1500));
    shell.frame_at(t0 + Duration::from_secs(2));
    shell.frame_at(t0 + Duration::from_secs(3));

    // Assert: startup push, press, held > 1 s, release
    assert_eq!(input.delays(), vec![200, 200, 50, 200]);
    assert_eq!(input.polled_players(), vec![0, 0, 0, 0]);
}

#[test]
fn test_option_menu_delay_change_is_applied_and_persisted() {
    // Arrange
    let sandbox = Sandbox::new();
    let (mut shell, input) = sandbox.shell();
    press(&mut shell, &input, KeyMask::START);

    // Act
    press(&mut shell, &input, KeyMask::RIGHT);

    // Assert
    assert_eq!(shell.repeat().base_delay(), 210);
    assert_eq!(input.last_delay(), Some(210));
    assert_eq!(sandbox.reopen_config().input_delay(), 210);
}

#[test]
fn test_option_menu_geometry_change_moves_content_rect() {
    // Arrange: option menu, second entry is the screen's left edge
    let sandbox = Sandbox::new();
    let (mut shell, input) = sandbox.shell();
    press(&mut shell, &input, KeyMask::START);
    press(&mut shell, &input, KeyMask::DOWN);

    // Act
    press(&mut shell, &input, KeyMask::RIGHT);

    // Assert
    assert_eq!(shell.content_rect(), FloatRect::new(7.0, 6.0, 628.0, 468.0));
    assert_eq!(
        sandbox.reopen_config().screen_size(),
        FloatRect::new(1.0, 0.0, 640.0, 480.0)
    );
}
