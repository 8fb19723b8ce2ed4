//! Held movement keys, sampled once per frame.
//!
//! Bevy's `ButtonInput<KeyCode>` already coalesces key events between frames,
//! so `InputState` is just a snapshot of which movement directions are held
//! right now. The per-frame update reads this snapshot and never sees
//! individual events.
use crate::settings::Settings;
use bevy::prelude::*;

/// A movement direction bound to a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveKey {
    Forward,
    Back,
    Left,
    Right,
}

impl MoveKey {
    pub const ALL: [MoveKey; 4] = [MoveKey::Forward, MoveKey::Back, MoveKey::Left, MoveKey::Right];

    /// Keybind name in `controls.keybinds`.
    #[must_use]
    pub fn action(self) -> &'static str {
        match self {
            MoveKey::Forward => "forward",
            MoveKey::Back => "back",
            MoveKey::Left => "left",
            MoveKey::Right => "right",
        }
    }

    /// Key used when the binding is missing or unparsable.
    #[must_use]
    pub fn default_key(self) -> KeyCode {
        match self {
            MoveKey::Forward => KeyCode::KeyW,
            MoveKey::Back => KeyCode::KeyS,
            MoveKey::Left => KeyCode::KeyA,
            MoveKey::Right => KeyCode::KeyD,
        }
    }
}

/// Snapshot of held movement keys.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    pub forward: bool,
    pub back: bool,
    pub left: bool,
    pub right: bool,
}

impl InputState {
    /// Record a key-down (`true`) or key-up (`false`). Last write wins.
    pub fn set(&mut self, key: MoveKey, held: bool) {
        match key {
            MoveKey::Forward => self.forward = held,
            MoveKey::Back => self.back = held,
            MoveKey::Left => self.left = held,
            MoveKey::Right => self.right = held,
        }
    }

    #[must_use]
    pub fn is_held(&self, key: MoveKey) -> bool {
        match key {
            MoveKey::Forward => self.forward,
            MoveKey::Back => self.back,
            MoveKey::Left => self.left,
            MoveKey::Right => self.right,
        }
    }

    #[must_use]
    pub fn any(&self) -> bool {
        MoveKey::ALL.iter().any(|&k| self.is_held(k))
    }

    /// Convenience constructor for a set of held keys.
    #[must_use]
    pub fn holding(keys: &[MoveKey]) -> Self {
        let mut s = Self::default();
        for &k in keys {
            s.set(k, true);
        }
        s
    }

    /// Sample the keyboard through the configured keybinds.
    #[must_use]
    pub fn from_keyboard(kb: &ButtonInput<KeyCode>, settings: &Settings) -> Self {
        let mut s = Self::default();
        for key in MoveKey::ALL {
            let code = settings.controls.key_for(key.action()).unwrap_or(key.default_key());
            s.set(key, kb.pressed(code));
        }
        s
    }
}

/// Refresh the `InputState` resource from the keyboard. First system of the frame.
#[allow(clippy::needless_pass_by_value)]
pub fn sample_input(kb: Res<ButtonInput<KeyCode>>, settings: Res<Settings>, mut input: ResMut<InputState>) {
    let next = InputState::from_keyboard(&kb, &settings);
    if *input != next {
        *input = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_write_wins() {
        let mut s = InputState::default();
        s.set(MoveKey::Left, true);
        s.set(MoveKey::Left, false);
        s.set(MoveKey::Left, true);
        assert!(s.is_held(MoveKey::Left));
        assert!(!s.is_held(MoveKey::Right));
    }

    #[test]
    fn keyboard_uses_default_bindings() {
        let mut kb = ButtonInput::<KeyCode>::default();
        kb.press(KeyCode::KeyW);
        kb.press(KeyCode::KeyD);
        let s = InputState::from_keyboard(&kb, &Settings::default());
        assert_eq!(s, InputState::holding(&[MoveKey::Forward, MoveKey::Right]));
    }

    #[test]
    fn keyboard_honours_rebinds() {
        let mut settings = Settings::default();
        settings.controls.keybinds.insert("forward".to_string(), "Up".to_string());
        let mut kb = ButtonInput::<KeyCode>::default();
        kb.press(KeyCode::KeyW);
        kb.press(KeyCode::ArrowUp);
        let s = InputState::from_keyboard(&kb, &settings);
        assert!(s.forward);

        kb.release(KeyCode::ArrowUp);
        let s = InputState::from_keyboard(&kb, &settings);
        assert!(!s.forward, "W is no longer bound to forward");
    }
}
