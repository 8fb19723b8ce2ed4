//! Window-related systems: vsync follows `Settings.graphics.vsync`, and
//! resizes are logged. The camera projection adapts to the new aspect ratio
//! on its own.
use bevy::prelude::*;
use bevy::window::{PresentMode, PrimaryWindow, WindowResized};
use mazewalk::settings::Settings;

/// Sync `Settings.graphics.vsync` into the present mode of the primary window.
/// Allows toggling vsync at runtime without restarting.
///
/// # Arguments
/// - `settings`: The current settings resource, from which the vsync preference is read.
/// - `windows`: Query for the primary window to update its present mode.
/// - `last`: A local cache of the last applied vsync state to avoid redundant updates.
#[allow(clippy::needless_pass_by_value)]
pub fn sync_vsync_settings(
    settings: Res<Settings>,
    mut windows: Query<&mut Window, With<PrimaryWindow>>,
    mut last: Local<Option<bool>>,
) {
    let desired = settings.graphics.vsync;
    if *last == Some(desired) { return; }

    for mut w in &mut windows {
        w.present_mode = if desired { PresentMode::Fifo } else { PresentMode::AutoNoVsync };
    }
    info!("vsync {}", if desired { "on" } else { "off" });
    *last = Some(desired);
}

pub fn log_window_resize(mut resized: EventReader<WindowResized>) {
    if let Some(e) = resized.read().last() {
        debug!("window resized to {}x{}", e.width, e.height);
    }
}
