use serde::{Deserialize, Serialize};

use crate::input::InputSource;
use crate::PlayerID;

pub mod drunk;
pub mod gamepad;
pub mod key_code;
pub mod keyboard;

pub use drunk::DrunkControls;
pub use gamepad::{GamePadControls, GamePadType};
pub use key_code::KeyCode;
pub use keyboard::KeyboardControls;

// The logical actions a player can bind; their raw identifiers depend on the
// device the controls were built for
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ControlKey {
    LeftTurn,
    RightTurn,
    Forward,
    Reverse,
    HandBrake,
    Grab,
    ShowList,
    Pause,
    Confirm,
    Cancel,
}

impl ControlKey {
    pub const COUNT: usize = 10;

    pub const ALL: [ControlKey; ControlKey::COUNT] = [
        ControlKey::LeftTurn,
        ControlKey::RightTurn,
        ControlKey::Forward,
        ControlKey::Reverse,
        ControlKey::HandBrake,
        ControlKey::Grab,
        ControlKey::ShowList,
        ControlKey::Pause,
        ControlKey::Confirm,
        ControlKey::Cancel,
    ];

    fn index(self) -> usize {
        self as usize
    }
}

/// Raw input identifiers for every [`ControlKey`], one slot per action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bindings {
    controls: [String; ControlKey::COUNT],
}

impl Bindings {
    pub fn new(controls: [&str; ControlKey::COUNT]) -> Self {
        Self {
            controls: controls.map(String::from),
        }
    }

    pub fn empty() -> Self {
        Self::new([""; ControlKey::COUNT])
    }

    pub fn get(&self, key: ControlKey) -> &str {
        &self.controls[key.index()]
    }

    pub fn is_bound(&self, control: &str) -> bool {
        self.controls.iter().any(|bound| bound == control)
    }

    /// Binds `key` to `new_control` unless some action already uses it.
    pub fn rebind(&mut self, key: ControlKey, new_control: &str) -> bool {
        if self.is_bound(new_control) {
            return false;
        }

        self.controls[key.index()] = new_control.to_string();
        true
    }

    // skips the uniqueness check; callers assign whole permutations
    pub(crate) fn set(&mut self, key: ControlKey, control: &str) {
        self.controls[key.index()] = control.to_string();
    }

    pub fn iter(&self) -> impl Iterator<Item = (ControlKey, &str)> {
        ControlKey::ALL
            .iter()
            .map(move |key| (*key, self.get(*key)))
    }
}

/// A per-player control scheme. The input source is only ever consulted
/// through [`PlayerControls::is_pressed`].
pub trait PlayerControls {
    fn player_index(&self) -> PlayerID;

    fn control_prefix(&self) -> &str;

    fn bindings(&self) -> &Bindings;

    /// Returns false and leaves every binding untouched if `new_control` is
    /// already bound to any action.
    fn update_control(&mut self, key: ControlKey, new_control: &str) -> bool;

    fn reset_controls(&mut self);

    fn is_pressed(&self, key: ControlKey, input: &dyn InputSource) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Bindings {
        Bindings::new(["a", "b", "c", "d", "e", "f", "g", "h", "i", "j"])
    }

    #[test]
    fn rebind_to_free_control() {
        let mut bindings = sample();
        assert!(bindings.rebind(ControlKey::Grab, "z"));
        assert_eq!(bindings.get(ControlKey::Grab), "z");
        assert!(!bindings.is_bound("f"));
    }

    #[test]
    fn rebind_to_taken_control_changes_nothing() {
        let mut bindings = sample();
        let before = bindings.clone();

        assert!(!bindings.rebind(ControlKey::Forward, "a"));
        // rebinding an action to its own control is also a conflict
        assert!(!bindings.rebind(ControlKey::Forward, "c"));
        assert_eq!(bindings, before);
    }

    #[test]
    fn iter_follows_action_order() {
        let bindings = sample();
        let keys: Vec<ControlKey> = bindings.iter().map(|(key, _)| key).collect();
        assert_eq!(keys, ControlKey::ALL.to_vec());
        assert_eq!(bindings.iter().nth(3), Some((ControlKey::Reverse, "d")));
    }
}
