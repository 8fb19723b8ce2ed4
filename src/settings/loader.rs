//! Settings loading and hot-reloading.
//!
//! Settings are read from the RON files in `data/settings`. If several files
//! are present the first one (by file name) that parses wins; with none the
//! defaults are used. A `SettingsWatcher` resource flags modifications and
//! `check_settings_changes` swaps in the reloaded value.
use crate::ron_loader::{load_ron_files, setup_ron_watcher, RonWatcher};
use crate::settings::Settings;
use bevy::prelude::{info, Res, ResMut, Resource};

/// Default directory for settings files.
pub const SETTINGS_DIR: &str = "data/settings";

#[derive(Resource)]
pub struct SettingsWatcher {
    pub dir: String,
    pub watcher: RonWatcher,
}

impl SettingsWatcher {
    #[must_use]
    pub fn stub() -> Self {
        SettingsWatcher { dir: SETTINGS_DIR.to_string(), watcher: RonWatcher::stub() }
    }
}

/// Load settings from `path` (directory), falling back to `Settings::default()`.
///
/// # Example
/// ```ignore
/// let settings = load_settings_from_dir("data/settings");
/// ```
#[must_use]
pub fn load_settings_from_dir(path: &str) -> Settings {
    load_ron_files::<Settings>(path).into_iter().next().unwrap_or_default()
}

/// Create a watcher for the settings directory.
///
/// # Errors
/// Propagates the `notify::Error` when the directory cannot be watched.
pub fn setup_settings_watcher(path: &str) -> Result<SettingsWatcher, notify::Error> {
    setup_ron_watcher(path).map(|watcher| SettingsWatcher { dir: path.to_string(), watcher })
}

/// Reload the `Settings` resource after the watcher reports a change.
///
/// Gameplay values in the reloaded file are stored but only take effect on
/// the next start; everything else is picked up by the systems reading
/// `Settings` each frame.
#[allow(clippy::needless_pass_by_value)]
pub fn check_settings_changes(watcher: Res<SettingsWatcher>, mut settings: ResMut<Settings>) {
    if watcher.watcher.take_changed() {
        info!("settings changed, reloading from {}", watcher.dir);
        *settings = load_settings_from_dir(&watcher.dir);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_dir_gives_defaults() {
        let s = load_settings_from_dir("/no/such/settings/dir");
        assert_eq!(s.gameplay.max_health, 100);
        assert!(s.graphics.vsync);
    }

    #[test]
    fn stub_watcher_never_reloads() {
        let w = SettingsWatcher::stub();
        assert!(!w.watcher.take_changed());
        assert_eq!(w.dir, SETTINGS_DIR);
    }
}
