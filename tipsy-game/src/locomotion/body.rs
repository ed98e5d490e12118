use glam::Vec3;

use tipsy_core::entity_location::EntityLocation;
use tipsy_core::math::lerp_angle;

// Receives what the controller decided each step; everything here is
// optional except the motion itself
pub trait MotionSink {
    fn set_motion(&mut self, speed: f32, turn: f32);

    fn set_frozen(&mut self, _frozen: bool) {}

    fn nudge(&mut self, _offset: Vec3) {}
}

/// Kinematic stand-in for an animated player model: the speed parameter
/// scales forward motion and the turn value is the heading being eased
/// toward.
#[derive(Clone, Debug)]
pub struct Body {
    pub location: EntityLocation,
    pub max_speed: f32,
    speed: f32,
    turn: f32,
    frozen: bool,
}

impl Body {
    pub fn new(location: EntityLocation, max_speed: f32) -> Self {
        Self {
            location,
            max_speed,
            speed: 0.0,
            turn: location.yaw,
            frozen: false,
        }
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    pub fn integrate(&mut self, dt: f32) {
        if self.frozen {
            return;
        }

        self.location.yaw = lerp_angle(self.location.yaw, self.turn, dt);
        self.location.position += self.location.forward() * self.speed * self.max_speed * dt;
    }
}

impl MotionSink for Body {
    fn set_motion(&mut self, speed: f32, turn: f32) {
        self.speed = speed;
        self.turn = turn;
    }

    fn set_frozen(&mut self, frozen: bool) {
        self.frozen = frozen;
    }

    fn nudge(&mut self, offset: Vec3) {
        self.location.position += offset;
    }
}
