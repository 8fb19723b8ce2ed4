//! Settings, types and defaults.
//!
//! Settings are stored as a RON file under `data/settings/` and are
//! hot-reloadable (see `settings::loader`). Every field has a serde default,
//! so a partial file only overrides what it names.
//!
//! Graphics, controls and camera values apply live. Gameplay values are
//! read once when the game starts: walls and health are fixed for a session.
use crate::collision::CollisionMode;
use crate::maze::loader::CLASSIC_MAZE_NAME;
use bevy::prelude::{KeyCode, Resource, Vec3};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub mod loader;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphicsSettings {
    #[serde(default = "GraphicsSettings::default_vsync")]
    pub vsync: bool, // Cap frame rate to the display refresh rate.
    #[serde(default = "GraphicsSettings::default_shadows")]
    pub shadows: bool, // Directional light shadows.
}

impl GraphicsSettings {
    fn default_vsync() -> bool { true }
    fn default_shadows() -> bool { false }
}

impl Default for GraphicsSettings {
    fn default() -> Self {
        Self { vsync: Self::default_vsync(), shadows: Self::default_shadows() }
    }
}

/// Controls / input settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControlsSettings {
    #[serde(default = "ControlsSettings::default_keybinds")]
    pub keybinds: HashMap<String, String>, // Action name -> key identifier
}

impl ControlsSettings {
    fn default_keybinds() -> HashMap<String, String> {
        [
            ("forward", "W"),
            ("back", "S"),
            ("left", "A"),
            ("right", "D"),
            ("toggle_debug", "F1"),
            ("toggle_grid", "F2"),
            ("dump_debug", "F3"),
        ]
        .into_iter()
        .map(|(a, k)| (a.to_string(), k.to_string()))
        .collect()
    }

    /// Key bound to `action`, if bound to a known key.
    #[must_use]
    pub fn key_for(&self, action: &str) -> Option<KeyCode> {
        self.keybinds.get(action).and_then(|s| keycode_from_str(s))
    }

    /// Key bound to `action`, or `fallback`.
    #[must_use]
    pub fn key_or(&self, action: &str, fallback: KeyCode) -> KeyCode {
        self.key_for(action).unwrap_or(fallback)
    }
}

impl Default for ControlsSettings {
    fn default() -> Self {
        Self { keybinds: Self::default_keybinds() }
    }
}

/// Rules of the game. Read once at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameplaySettings {
    #[serde(default = "GameplaySettings::default_maze")]
    pub maze: String, // Name of the maze definition to play.
    #[serde(default = "GameplaySettings::default_speed")]
    pub speed: f32, // Distance moved per frame per held direction.
    #[serde(default = "GameplaySettings::default_max_health")]
    pub max_health: i32, // Starting health and 100% of the health bar.
    #[serde(default = "GameplaySettings::default_damage")]
    pub damage_per_collision: i32, // Health lost on each colliding frame.
    #[serde(default = "GameplaySettings::default_player_size")]
    pub player_size: f32, // Edge length of the player cube.
    #[serde(default = "GameplaySettings::default_exit_spin")]
    pub exit_spin: f32, // Exit marker rotation per frame, radians.
    #[serde(default)]
    pub collision: CollisionMode, // brute_force or indexed.
}

impl GameplaySettings {
    fn default_maze() -> String { CLASSIC_MAZE_NAME.to_string() }
    fn default_speed() -> f32 { 0.1 }
    fn default_max_health() -> i32 { 100 }
    fn default_damage() -> i32 { 1 }
    fn default_player_size() -> f32 { 1.0 }
    fn default_exit_spin() -> f32 { 0.02 }
}

impl Default for GameplaySettings {
    fn default() -> Self {
        Self {
            maze: Self::default_maze(),
            speed: Self::default_speed(),
            max_health: Self::default_max_health(),
            damage_per_collision: Self::default_damage(),
            player_size: Self::default_player_size(),
            exit_spin: Self::default_exit_spin(),
            collision: CollisionMode::default(),
        }
    }
}

/// Follow-camera tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraSettings {
    #[serde(default = "CameraSettings::default_offset")]
    pub offset: [f32; 3], // Camera position relative to the player.
    #[serde(default = "CameraSettings::default_smoothing")]
    pub smoothing: f32, // Fraction of the remaining distance covered each frame.
    #[serde(default = "CameraSettings::default_fov")]
    pub fov_degrees: f32, // Vertical field of view.
    #[serde(default = "CameraSettings::default_initial")]
    pub initial_position: [f32; 3], // Where the camera starts before following.
}

impl CameraSettings {
    fn default_offset() -> [f32; 3] { [0.0, 10.0, 10.0] }
    fn default_smoothing() -> f32 { 0.1 }
    fn default_fov() -> f32 { 75.0 }
    fn default_initial() -> [f32; 3] { [0.0, 20.0, 20.0] }

    #[must_use]
    pub fn offset_vec(&self) -> Vec3 { Vec3::from_array(self.offset) }

    #[must_use]
    pub fn initial_vec(&self) -> Vec3 { Vec3::from_array(self.initial_position) }
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            offset: Self::default_offset(),
            smoothing: Self::default_smoothing(),
            fov_degrees: Self::default_fov(),
            initial_position: Self::default_initial(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebugSettings {
    #[serde(default)]
    pub log_diagnostics: bool, // Periodically log FPS/frame time.
    #[serde(default = "DebugSettings::default_dump_dir")]
    pub dump_dir: String, // Where F3 writes state dumps.
}

impl DebugSettings {
    fn default_dump_dir() -> String { "debug-dumps".to_string() }
}

impl Default for DebugSettings {
    fn default() -> Self {
        Self { log_diagnostics: false, dump_dir: Self::default_dump_dir() }
    }
}

/// Top-level Settings
#[derive(Resource, Clone, Debug, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub graphics: GraphicsSettings,
    #[serde(default)]
    pub controls: ControlsSettings,
    #[serde(default)]
    pub gameplay: GameplaySettings,
    #[serde(default)]
    pub camera: CameraSettings,
    #[serde(default)]
    pub debug: DebugSettings,
}

/// Convert a key identifier such as `"W"`, `"Up"` or `"F1"` into a `KeyCode`.
///
/// Matching is case-insensitive. Returns `None` for unknown names.
#[must_use]
pub fn keycode_from_str(name: &str) -> Option<KeyCode> {
    const LETTERS: [KeyCode; 26] = [
        KeyCode::KeyA, KeyCode::KeyB, KeyCode::KeyC, KeyCode::KeyD, KeyCode::KeyE, KeyCode::KeyF,
        KeyCode::KeyG, KeyCode::KeyH, KeyCode::KeyI, KeyCode::KeyJ, KeyCode::KeyK, KeyCode::KeyL,
        KeyCode::KeyM, KeyCode::KeyN, KeyCode::KeyO, KeyCode::KeyP, KeyCode::KeyQ, KeyCode::KeyR,
        KeyCode::KeyS, KeyCode::KeyT, KeyCode::KeyU, KeyCode::KeyV, KeyCode::KeyW, KeyCode::KeyX,
        KeyCode::KeyY, KeyCode::KeyZ,
    ];
    const DIGITS: [KeyCode; 10] = [
        KeyCode::Digit0, KeyCode::Digit1, KeyCode::Digit2, KeyCode::Digit3, KeyCode::Digit4,
        KeyCode::Digit5, KeyCode::Digit6, KeyCode::Digit7, KeyCode::Digit8, KeyCode::Digit9,
    ];
    const FUNCTION: [KeyCode; 12] = [
        KeyCode::F1, KeyCode::F2, KeyCode::F3, KeyCode::F4, KeyCode::F5, KeyCode::F6,
        KeyCode::F7, KeyCode::F8, KeyCode::F9, KeyCode::F10, KeyCode::F11, KeyCode::F12,
    ];

    let s = name.trim().to_ascii_uppercase();
    let mut chars = s.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        if c.is_ascii_uppercase() {
            return LETTERS.get((c as u8 - b'A') as usize).copied();
        }
        if c.is_ascii_digit() {
            return DIGITS.get((c as u8 - b'0') as usize).copied();
        }
    }

    if let Some(n) = s.strip_prefix('F').and_then(|rest| rest.parse::<usize>().ok()) {
        return n.checked_sub(1).and_then(|i| FUNCTION.get(i).copied());
    }

    Some(match s.as_str() {
        "UP" | "ARROWUP" => KeyCode::ArrowUp,
        "DOWN" | "ARROWDOWN" => KeyCode::ArrowDown,
        "LEFT" | "ARROWLEFT" => KeyCode::ArrowLeft,
        "RIGHT" | "ARROWRIGHT" => KeyCode::ArrowRight,
        "SPACE" => KeyCode::Space,
        "ESC" | "ESCAPE" => KeyCode::Escape,
        "ENTER" | "RETURN" => KeyCode::Enter,
        "TAB" => KeyCode::Tab,
        "LSHIFT" | "SHIFT" => KeyCode::ShiftLeft,
        "RSHIFT" => KeyCode::ShiftRight,
        "LCTRL" | "CTRL" => KeyCode::ControlLeft,
        "RCTRL" => KeyCode::ControlRight,
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ron_loader::parse_ron;

    #[test]
    fn keycodes_parse() {
        assert_eq!(keycode_from_str("w"), Some(KeyCode::KeyW));
        assert_eq!(keycode_from_str("Z"), Some(KeyCode::KeyZ));
        assert_eq!(keycode_from_str("7"), Some(KeyCode::Digit7));
        assert_eq!(keycode_from_str("F3"), Some(KeyCode::F3));
        assert_eq!(keycode_from_str("f12"), Some(KeyCode::F12));
        assert_eq!(keycode_from_str("ArrowLeft"), Some(KeyCode::ArrowLeft));
        assert_eq!(keycode_from_str("F0"), None);
        assert_eq!(keycode_from_str("F13"), None);
        assert_eq!(keycode_from_str("nope"), None);
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let s: Settings = parse_ron("(gameplay: (speed: 0.25, collision: indexed))").unwrap();
        assert!((s.gameplay.speed - 0.25).abs() < f32::EPSILON);
        assert_eq!(s.gameplay.collision, CollisionMode::Indexed);
        assert_eq!(s.gameplay.max_health, 100);
        assert_eq!(s.gameplay.maze, "classic");
        assert_eq!(s.controls.key_for("forward"), Some(KeyCode::KeyW));
        assert_eq!(s.camera.offset_vec(), Vec3::new(0.0, 10.0, 10.0));
    }

    #[test]
    fn unknown_binding_falls_back() {
        let mut c = ControlsSettings::default();
        c.keybinds.insert("toggle_debug".to_string(), "Hyper".to_string());
        assert_eq!(c.key_or("toggle_debug", KeyCode::F1), KeyCode::F1);
    }
}
