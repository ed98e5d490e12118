use tracing::debug;

use super::{Bindings, ControlKey, KeyCode, KeyboardControls, PlayerControls};
use crate::input::InputSource;
use crate::PlayerID;

const MOVEMENT_KEYS: [ControlKey; 4] = [
    ControlKey::LeftTurn,
    ControlKey::RightTurn,
    ControlKey::Forward,
    ControlKey::Reverse,
];

// left, right, forward, back
const BASE_CONTROL_ORDER: [&str; 4] = ["LeftArrow", "RightArrow", "UpArrow", "DownArrow"];

// Row n gives, for each movement action, which base control it reads after
// the nth swap
const SWAP_TABLE: [[usize; 4]; 4] = [
    [0, 1, 2, 3],
    [3, 2, 0, 1],
    [1, 0, 3, 2],
    [2, 3, 1, 0],
];

/// Keyboard controls whose movement keys get shuffled every time the player
/// sobers up a little.
#[derive(Clone, Debug)]
pub struct DrunkControls {
    keyboard: KeyboardControls,
    swap_count: usize,
}

impl DrunkControls {
    pub fn new(player_index: PlayerID) -> Self {
        Self {
            keyboard: KeyboardControls::new(player_index),
            swap_count: 0,
        }
    }

    pub fn swap_count(&self) -> usize {
        self.swap_count
    }

    pub fn key_code(&self, key: ControlKey) -> KeyCode {
        self.keyboard.key_code(key)
    }

    pub fn swap_controls(&mut self) {
        self.swap_count = (self.swap_count + 1) % SWAP_TABLE.len();
        self.apply_swap();
        debug!(
            "player {} movement controls swapped to permutation {}",
            self.keyboard.player_index(),
            self.swap_count
        );
    }

    /// Which base arrow key a movement action reads after `swaps` swaps.
    /// Only movement actions take part in the shuffle.
    pub fn movement_key_after(key: ControlKey, swaps: usize) -> Option<KeyCode> {
        let slot = MOVEMENT_KEYS.iter().position(|movement| *movement == key)?;
        let base = SWAP_TABLE[swaps % SWAP_TABLE.len()][slot];
        Some(KeyCode::from_name(BASE_CONTROL_ORDER[base]))
    }

    fn apply_swap(&mut self) {
        let row = SWAP_TABLE[self.swap_count];
        let bindings = self.keyboard.bindings_mut();
        for (key, base_index) in MOVEMENT_KEYS.iter().zip(row) {
            bindings.set(*key, BASE_CONTROL_ORDER[base_index]);
        }
        self.keyboard.rebuild_key_codes();
    }
}

impl PlayerControls for DrunkControls {
    fn player_index(&self) -> PlayerID {
        self.keyboard.player_index()
    }

    fn control_prefix(&self) -> &str {
        self.keyboard.control_prefix()
    }

    fn bindings(&self) -> &Bindings {
        self.keyboard.bindings()
    }

    // The base movement keys are reserved for the movement actions, since the
    // next swap hands them back out regardless of what else is bound
    fn update_control(&mut self, key: ControlKey, new_control: &str) -> bool {
        if !MOVEMENT_KEYS.contains(&key) && BASE_CONTROL_ORDER.contains(&new_control) {
            return false;
        }
        self.keyboard.update_control(key, new_control)
    }

    fn reset_controls(&mut self) {
        self.swap_count = 0;
        self.keyboard.reset_controls();
    }

    fn is_pressed(&self, key: ControlKey, input: &dyn InputSource) -> bool {
        self.keyboard.is_pressed(key, input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controls::keyboard::DEFAULT_KEYBOARD_BINDINGS;
    use crate::input::InputState;

    fn movement(controls: &DrunkControls) -> [KeyCode; 4] {
        MOVEMENT_KEYS.map(|key| controls.key_code(key))
    }

    #[test]
    fn swaps_follow_the_permutation_table() {
        use KeyCode::*;

        let mut controls = DrunkControls::new(0);
        assert_eq!(movement(&controls), [LeftArrow, RightArrow, UpArrow, DownArrow]);

        controls.swap_controls();
        assert_eq!(controls.swap_count(), 1);
        assert_eq!(movement(&controls), [DownArrow, UpArrow, LeftArrow, RightArrow]);

        controls.swap_controls();
        assert_eq!(controls.swap_count(), 2);
        assert_eq!(movement(&controls), [RightArrow, LeftArrow, DownArrow, UpArrow]);

        controls.swap_controls();
        assert_eq!(controls.swap_count(), 3);
        assert_eq!(movement(&controls), [UpArrow, DownArrow, RightArrow, LeftArrow]);
    }

    #[test]
    fn four_swaps_return_to_identity() {
        let mut controls = DrunkControls::new(0);
        let start = controls.bindings().clone();

        for _ in 0..4 {
            controls.swap_controls();
        }

        assert_eq!(controls.swap_count(), 0);
        assert_eq!(controls.bindings(), &start);
    }

    #[test]
    fn every_swap_keeps_bindings_unique() {
        let mut controls = DrunkControls::new(0);
        for _ in 0..8 {
            controls.swap_controls();
            let bindings = controls.bindings();
            for (key, control) in bindings.iter() {
                let clashes = bindings
                    .iter()
                    .filter(|(other, bound)| *other != key && *bound == control)
                    .count();
                assert_eq!(clashes, 0);
            }
        }
    }

    #[test]
    fn swapped_forward_reads_left_arrow() {
        let mut controls = DrunkControls::new(0);
        let mut input = InputState::new();
        input.on_key_down(KeyCode::LeftArrow);

        controls.swap_controls();
        assert!(controls.is_pressed(ControlKey::Forward, &input));
        assert!(!controls.is_pressed(ControlKey::LeftTurn, &input));
    }

    #[test]
    fn movement_keys_are_reserved() {
        let mut controls = DrunkControls::new(0);
        controls.update_control(ControlKey::Forward, "W");
        assert!(!controls.update_control(ControlKey::Grab, "UpArrow"));
        assert!(controls.update_control(ControlKey::Grab, "G"));
    }

    #[test]
    fn movement_key_after_matches_live_swaps() {
        let mut controls = DrunkControls::new(0);
        for swaps in 0..8 {
            for key in MOVEMENT_KEYS {
                assert_eq!(
                    DrunkControls::movement_key_after(key, swaps),
                    Some(controls.key_code(key))
                );
            }
            controls.swap_controls();
        }

        assert_eq!(DrunkControls::movement_key_after(ControlKey::Pause, 1), None);
        assert_eq!(
            DrunkControls::movement_key_after(ControlKey::Forward, 1),
            Some(KeyCode::LeftArrow)
        );
    }

    #[test]
    fn reset_clears_swap_count() {
        let mut controls = DrunkControls::new(0);
        controls.swap_controls();
        controls.swap_controls();

        controls.reset_controls();

        assert_eq!(controls.swap_count(), 0);
        assert_eq!(controls.bindings(), &Bindings::new(DEFAULT_KEYBOARD_BINDINGS));
    }
}
