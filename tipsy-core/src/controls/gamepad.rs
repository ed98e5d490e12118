use serde::{Deserialize, Serialize};

use super::{Bindings, ControlKey, PlayerControls};
use crate::input::InputSource;
use crate::PlayerID;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePadType {
    XBox,
    Other,
}

// Pads have no built-in layout yet: every action starts unbound and a binding
// is a button name looked up under the pad's prefix
#[derive(Clone, Debug)]
pub struct GamePadControls {
    player_index: PlayerID,
    pad: GamePadType,
    control_prefix: String,
    bindings: Bindings,
}

impl GamePadControls {
    pub fn new(player_index: PlayerID, pad: GamePadType) -> Self {
        Self {
            player_index,
            pad,
            control_prefix: format!("{:?}_GamePad_{}_", pad, player_index),
            bindings: Self::default_bindings(pad),
        }
    }

    pub fn pad(&self) -> GamePadType {
        self.pad
    }

    fn default_bindings(pad: GamePadType) -> Bindings {
        match pad {
            GamePadType::XBox | GamePadType::Other => Bindings::empty(),
        }
    }
}

impl PlayerControls for GamePadControls {
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
        self.bindings.rebind(key, new_control)
    }

    fn reset_controls(&mut self) {
        self.bindings = Self::default_bindings(self.pad);
    }

    fn is_pressed(&self, key: ControlKey, input: &dyn InputSource) -> bool {
        let control = self.bindings.get(key);
        if control.is_empty() {
            return false;
        }

        input.button_down(&format!("{}{}", self.control_prefix, control))
    }
}
