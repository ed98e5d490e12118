use std::collections::HashMap;

use tracing::debug;

use super::{Bindings, ControlKey, KeyCode, PlayerControls};
use crate::input::InputSource;
use crate::PlayerID;

pub const DEFAULT_KEYBOARD_BINDINGS: [&str; ControlKey::COUNT] = [
    "LeftArrow",
    "RightArrow",
    "UpArrow",
    "DownArrow",
    "LeftControl",
    "LeftShift",
    "Tab",
    "Escape",
    "Return",
    "Backspace",
];

#[derive(Clone, Debug)]
pub struct KeyboardControls {
    player_index: PlayerID,
    control_prefix: String,
    bindings: Bindings,
    // rebuilt from `bindings` after every change
    key_codes: HashMap<String, KeyCode>,
}

impl KeyboardControls {
    pub fn new(player_index: PlayerID) -> Self {
        let mut controls = Self {
            player_index,
            control_prefix: format!("Keyboard_{}_", player_index),
            bindings: Bindings::new(DEFAULT_KEYBOARD_BINDINGS),
            key_codes: HashMap::new(),
        };
        controls.rebuild_key_codes();
        controls
    }

    pub fn key_code(&self, key: ControlKey) -> KeyCode {
        self.key_codes
            .get(self.bindings.get(key))
            .copied()
            .unwrap_or(KeyCode::None)
    }

    pub(crate) fn rebuild_key_codes(&mut self) {
        self.key_codes.clear();
        for (_, control) in self.bindings.iter() {
            self.key_codes
                .insert(control.to_string(), KeyCode::from_name(control));
        }
    }

    pub(crate) fn bindings_mut(&mut self) -> &mut Bindings {
        &mut self.bindings
    }
}

impl PlayerControls for KeyboardControls {
    fn player_index(&self) -> PlayerID {
        self.player_index
    }

    fn control_prefix(&self) -> &str {
        &self.control_prefix
    }

    fn bindings(&self) -> &Bindings {
        &self.bindings
    }

    fn update_control(&mut self, key: ControlKey, new_control: &str) -> bool {
        let updated = self.bindings.rebind(key, new_control);
        if updated {
            debug!(
                "player {} bound {:?} to {}",
                self.player_index, key, new_control
            );
            self.rebuild_key_codes();
        }
        updated
    }

    fn reset_controls(&mut self) {
        self.bindings = Bindings::new(DEFAULT_KEYBOARD_BINDINGS);
        self.rebuild_key_codes();
    }

    fn is_pressed(&self, key: ControlKey, input: &dyn InputSource) -> bool {
        let key_code = self.key_code(key);
        key_code != KeyCode::None && input.key_down(key_code)
    }
}
