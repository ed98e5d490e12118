use glam::Vec3;
use rand::Rng;
use tracing::{debug, info};

use tipsy_core::contact::{ContactTag, Transition};
use tipsy_core::controls::{ControlKey, DrunkControls, PlayerControls};
use tipsy_core::input::InputSource;
use tipsy_core::math::lerp;
use tipsy_core::{PlayerID, Settings};

pub mod body;


use body::MotionSink;

#[derive(Copy, Clone, Debug)]
pub struct LocomotionTuning {
    pub speed_step: f32,
    pub turn_step: f32,
    pub drunk_speed_range: (f32, f32),
    pub drunk_turn_range: (f32, f32),
    pub collision_nudge: f32,
}

impl From<&Settings> for LocomotionTuning {
    fn from(settings: &Settings) -> Self {
        Self {
            speed_step: settings.speed_step,
            turn_step: settings.turn_step,
            drunk_speed_range: (settings.drunk_speed_min, settings.drunk_speed_max),
            drunk_turn_range: (settings.drunk_turn_min, settings.drunk_turn_max),
            collision_nudge: settings.collision_nudge,
        }
    }
}

impl Default for LocomotionTuning {
    fn default() -> Self {
        Self::from(&Settings::default())
    }
}

pub struct LocomotionController {
    controls: DrunkControls,
    tuning: LocomotionTuning,

    speed: f32,
    turn: f32,
    drunkenness_speed: f32,
    drunkenness_turn: f32,

    // stays false until the first drunken force arrives
    can_move: bool,
    frozen: bool,

    score: i32,
}

impl LocomotionController {
    pub fn new(player_index: PlayerID, initial_yaw: f32, tuning: LocomotionTuning) -> Self {
        Self {
            controls: DrunkControls::new(player_index),
            tuning,
            speed: 0.0,
            turn: initial_yaw,
            drunkenness_speed: 0.0,
            drunkenness_turn: initial_yaw,
            can_move: false,
            frozen: false,
            score: 0,
        }
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn turn(&self) -> f32 {
        self.turn
    }

    pub fn drunkenness(&self) -> (f32, f32) {
        (self.drunkenness_speed, self.drunkenness_turn)
    }

    pub fn score(&self) -> i32 {
        self.score
    }

    pub fn can_move(&self) -> bool {
        self.can_move
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    pub fn controls(&self) -> &DrunkControls {
        &self.controls
    }

    pub fn controls_mut(&mut self) -> &mut DrunkControls {
        &mut self.controls
    }

    /// Advances one frame: applies held keys, drifts toward the drunken
    /// targets and hands the result to `sink`. Emits nothing while gated or
    /// frozen.
    pub fn step(&mut self, dt: f32, input: &dyn InputSource, sink: &mut dyn MotionSink) {
        if !self.can_move || self.frozen {
            return;
        }

        if self.controls.is_pressed(ControlKey::Reverse, input) {
            self.speed -= self.tuning.speed_step;
        } else if self.controls.is_pressed(ControlKey::Forward, input) {
            self.speed += self.tuning.speed_step;
        }
        self.speed = self.speed.clamp(-1.0, 1.0);

        if self.controls.is_pressed(ControlKey::LeftTurn, input) {
            self.turn -= self.tuning.turn_step;
        } else if self.controls.is_pressed(ControlKey::RightTurn, input) {
            self.turn += self.tuning.turn_step;
        }

        // Plain lerp by the frame time, so the pull toward the drunken target
        // depends on tick rate. Kept as-is; the game is tuned around it.
        self.speed = lerp(self.speed, self.drunkenness_speed, dt);
        self.turn = lerp(self.turn, self.drunkenness_turn, dt);

        sink.set_motion(self.speed, self.turn);
    }

    pub fn resample_perturbation<R: Rng>(&mut self, rng: &mut R) {
        let (speed_min, speed_max) = self.tuning.drunk_speed_range;
        let (turn_min, turn_max) = self.tuning.drunk_turn_range;

        self.drunkenness_speed = rng.gen_range(speed_min..=speed_max);
        self.drunkenness_turn = rng.gen_range(turn_min..=turn_max);
        self.can_move = true;
        self.controls.swap_controls();

        debug!(
            "player {} drunken force now speed {:.3} turn {:.1}",
            self.controls.player_index(),
            self.drunkenness_speed,
            self.drunkenness_turn
        );
    }

    /// Scores a contact and returns the transition the caller should
    /// schedule. Contacts arriving after the player froze are ignored.
    pub fn on_contact(
        &mut self,
        tag: ContactTag,
        normal: Vec3,
        sink: &mut dyn MotionSink,
    ) -> Option<Transition> {
        if self.frozen || tag == ContactTag::Ignore {
            return None;
        }

        self.score += tag.score_delta();

        match tag.transition() {
            Some(transition) => {
                info!(
                    "player {} touched {:?}, score {}, {:?} pending",
                    self.controls.player_index(),
                    tag,
                    self.score,
                    transition
                );
                self.freeze(sink);
                Some(transition)
            }
            None => {
                debug!(
                    "player {} bumped an obstacle, score {}",
                    self.controls.player_index(),
                    self.score
                );
                let speed_before = self.speed;
                self.speed = 0.0;
                sink.set_motion(self.speed, self.turn);
                sink.nudge(normal * self.tuning.collision_nudge);
                self.speed = speed_before;
                None
            }
        }
    }

    fn freeze(&mut self, sink: &mut dyn MotionSink) {
        self.frozen = true;
        sink.set_frozen(true);
    }
}
