use std::collections::BTreeMap;

use tracing::info;

use tipsy_core::entity_location::EntityLocation;
use tipsy_core::input::InputState;
use tipsy_core::PlayerID;

use crate::game::phase::RoundPhase;
use crate::locomotion::body::Body;
use crate::locomotion::{LocomotionController, LocomotionTuning};

pub struct Player {
    pub id: PlayerID,
    pub controller: LocomotionController,
    pub body: Body,
    pub input: InputState,
    pub phase: RoundPhase,

    // indices of the triggers overlapped last tick
    pub current_triggers: Vec<usize>,
    pub(crate) pause_held: bool,
}

impl Player {
    fn new(id: PlayerID, start: EntityLocation, tuning: LocomotionTuning, max_speed: f32) -> Self {
        Self {
            id,
            controller: LocomotionController::new(id, start.yaw, tuning),
            body: Body::new(start, max_speed),
            input: InputState::new(),
            phase: RoundPhase::Driving,
            current_triggers: Vec::new(),
            pause_held: false,
        }
    }
}

/// Owns every live player. Ids are handed out in spawn order and never
/// reused, so a stale id simply finds nothing.
#[derive(Default)]
pub struct PlayerManager {
    players: BTreeMap<PlayerID, Player>,
    next_id: PlayerID,
}

impl PlayerManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_player(
        &mut self,
        start: EntityLocation,
        tuning: LocomotionTuning,
        max_speed: f32,
    ) -> PlayerID {
        let id = self.next_id;
        self.next_id += 1;
        self.players
            .insert(id, Player::new(id, start, tuning, max_speed));
        info!("player {} spawned at {:?}", id, start.position);
        id
    }

    pub fn get_player(&self, id: PlayerID) -> Option<&Player> {
        self.players.get(&id)
    }

    pub fn get_player_mut(&mut self, id: PlayerID) -> Option<&mut Player> {
        self.players.get_mut(&id)
    }

    pub fn remove_player(&mut self, id: PlayerID) -> Option<Player> {
        let removed = self.players.remove(&id);
        if removed.is_some() {
            info!("player {} removed", id);
        }
        removed
    }

    pub fn iter(&self) -> impl Iterator<Item = &Player> {
        self.players.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Player> {
        self.players.values_mut()
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn all_finished(&self) -> bool {
        !self.players.is_empty() && self.players.values().all(|p| p.phase.is_finished())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn spawn(manager: &mut PlayerManager) -> PlayerID {
        manager.create_player(
            EntityLocation::new(Vec3::ZERO, 0.0),
            LocomotionTuning::default(),
            6.0,
        )
    }

    #[test]
    fn ids_are_sequential_and_never_reused() {
        let mut manager = PlayerManager::new();
        assert_eq!(spawn(&mut manager), 0);
        assert_eq!(spawn(&mut manager), 1);

        assert!(manager.remove_player(0).is_some());
        assert!(manager.get_player(0).is_none());
        assert_eq!(spawn(&mut manager), 2);
        assert_eq!(manager.len(), 2);
    }

    #[test]
    fn controls_belong_to_their_player() {
        use tipsy_core::controls::PlayerControls;

        let mut manager = PlayerManager::new();
        spawn(&mut manager);
        let id = spawn(&mut manager);
        let player = manager.get_player(id).unwrap();
        assert_eq!(player.controller.controls().player_index(), id);
        assert_eq!(player.controller.controls().control_prefix(), "Keyboard_1_");
    }

    #[test]
    fn finished_only_when_everyone_is() {
        let mut manager = PlayerManager::new();
        assert!(!manager.all_finished());

        let a = spawn(&mut manager);
        let b = spawn(&mut manager);
        manager.get_player_mut(a).unwrap().phase = RoundPhase::Won;
        assert!(!manager.all_finished());

        manager.get_player_mut(b).unwrap().phase = RoundPhase::Lost;
        assert!(manager.all_finished());
    }
}
