use glam::Vec3;
use serde::Deserialize;

use tipsy_core::contact::ContactTag;
use tipsy_core::entity_location::EntityLocation;
use tipsy_core::math::{lerp_angle, move_towards};

use crate::physics::bounding_box::BoundingBox;
use crate::physics::constants::{TRAFFIC_CAR_SIZE, TRAFFIC_TURN_RATE};
use crate::physics::trigger_entity::TriggerEntity;

#[derive(Clone, Debug, Deserialize)]
pub struct TrafficRoute {
    pub speed: f32,
    #[serde(default = "obstacle")]
    pub tag: ContactTag,
    pub waypoints: Vec<EntityLocation>,
}

fn obstacle() -> ContactTag {
    ContactTag::Other
}

/// A car that drives its route forever, heading for one waypoint at a time
/// and wrapping back to the first.
#[derive(Clone, Debug)]
pub struct TrafficCar {
    route: TrafficRoute,
    current: usize,
    pub location: EntityLocation,
}

impl TrafficCar {
    // the route must have at least one waypoint; scenarios check this on load
    pub fn new(route: TrafficRoute) -> Self {
        let location = route.waypoints[0];
        Self {
            route,
            current: 0,
            location,
        }
    }

    pub fn current_waypoint(&self) -> usize {
        self.current
    }

    pub fn update(&mut self, dt: f32) {
        let target = self.route.waypoints[self.current];

        if self.location.position != target.position {
            self.location.position =
                move_towards(self.location.position, target.position, self.route.speed * dt);
        } else {
            self.current = (self.current + 1) % self.route.waypoints.len();
        }

        let target = self.route.waypoints[self.current];
        if self.location.yaw != target.yaw {
            self.location.yaw = lerp_angle(self.location.yaw, target.yaw, TRAFFIC_TURN_RATE * dt);
        }
    }
}

impl TriggerEntity for TrafficCar {
    fn pos(&self) -> Vec3 {
        self.location.position
    }

    fn get_bounding_box(&self) -> BoundingBox {
        BoundingBox::around(self.location.position, TRAFFIC_CAR_SIZE, self.location.yaw)
    }

    fn contact_tag(&self) -> ContactTag {
        self.route.tag
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square_route() -> TrafficRoute {
        TrafficRoute {
            speed: 1.0,
            tag: ContactTag::Other,
            waypoints: vec![
                EntityLocation::new(Vec3::ZERO, 0.0),
                EntityLocation::new(Vec3::new(0.0, 0.0, 2.0), 90.0),
                EntityLocation::new(Vec3::new(2.0, 0.0, 2.0), 180.0),
            ],
        }
    }

    #[test]
    fn drives_toward_current_waypoint() {
        let mut car = TrafficCar::new(square_route());

        // already on the first waypoint, so this tick only advances the target
        car.update(0.5);
        assert_eq!(car.current_waypoint(), 1);

        car.update(0.5);
        assert!(car
            .location
            .position
            .abs_diff_eq(Vec3::new(0.0, 0.0, 0.5), 0.0001));
    }

    #[test]
    fn wraps_back_to_first_waypoint() {
        let mut car = TrafficCar::new(square_route());
        let mut left_start = false;
        let mut came_back = false;

        for _ in 0..200 {
            car.update(0.1);
            if car.current_waypoint() != 0 {
                left_start = true;
            } else if left_start {
                came_back = true;
            }
        }
        assert!(came_back);
    }

    #[test]
    fn yaw_eases_toward_waypoint() {
        let mut car = TrafficCar::new(square_route());
        car.update(0.1);
        // target is now waypoint 1 at 90 degrees, eased by 3 * dt
        assert!((car.location.yaw - 27.0).abs() < 0.001);
    }

    #[test]
    fn is_an_obstacle_by_default() {
        let route: TrafficRoute = serde_yaml::from_str(
            "speed: 2.0\nwaypoints:\n  - position: [0.0, 0.0, 0.0]\n    yaw: 0.0\n",
        )
        .unwrap();
        assert_eq!(TrafficCar::new(route).contact_tag(), ContactTag::Other);
    }
}
