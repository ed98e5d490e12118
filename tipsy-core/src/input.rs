use std::collections::HashSet;

use crate::controls::KeyCode;

// Anything that can answer "is this held right now"; keyboards answer by key
// code, pads by their prefixed button name
pub trait InputSource {
    fn key_down(&self, key: KeyCode) -> bool;

    fn button_down(&self, _button: &str) -> bool {
        false
    }
}

/// Held keys and buttons, updated from key down/up events by the driver.
#[derive(Clone, Debug, Default)]
pub struct InputState {
    keys: HashSet<KeyCode>,
    buttons: HashSet<String>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_key_down(&mut self, key: KeyCode) {
        if key != KeyCode::None {
            self.keys.insert(key);
        }
    }

    pub fn on_key_up(&mut self, key: KeyCode) {
        self.keys.remove(&key);
    }

    pub fn on_button_down(&mut self, button: &str) {
        self.buttons.insert(button.to_string());
    }

    pub fn on_button_up(&mut self, button: &str) {
        self.buttons.remove(button);
    }

    pub fn release_all(&mut self) {
        self.keys.clear();
        self.buttons.clear();
    }

    pub fn held_keys(&self) -> impl Iterator<Item = &KeyCode> {
        self.keys.iter()
    }
}

impl InputSource for InputState {
    fn key_down(&self, key: KeyCode) -> bool {
        key != KeyCode::None && self.keys.contains(&key)
    }

    fn button_down(&self, button: &str) -> bool {
        self.buttons.contains(button)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn none_is_never_down() {
        let mut input = InputState::new();
        input.on_key_down(KeyCode::None);
        assert!(!input.key_down(KeyCode::None));
        assert_eq!(input.held_keys().count(), 0);
    }

    #[test]
    fn key_up_releases() {
        let mut input = InputState::new();
        input.on_key_down(KeyCode::UpArrow);
        assert!(input.key_down(KeyCode::UpArrow));
        input.on_key_up(KeyCode::UpArrow);
        assert!(!input.key_down(KeyCode::UpArrow));
    }

    #[test]
    fn release_all_clears_buttons_too() {
        let mut input = InputState::new();
        input.on_key_down(KeyCode::Space);
        input.on_button_down("XBox_GamePad_0_A");
        input.release_all();
        assert!(!input.key_down(KeyCode::Space));
        assert!(!input.button_down("XBox_GamePad_0_A"));
    }
}
