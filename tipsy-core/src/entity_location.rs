use glam::Vec3;
use serde::{Deserialize, Serialize};

// Where an entity is and which way it faces; yaw is in degrees about +Y with
// 0 facing +Z
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EntityLocation {
    pub position: Vec3,
    pub yaw: f32,
}

impl EntityLocation {
    pub fn new(position: Vec3, yaw: f32) -> Self {
        Self { position, yaw }
    }

    pub fn forward(&self) -> Vec3 {
        let radians = self.yaw.to_radians();
        Vec3::new(radians.sin(), 0.0, radians.cos())
    }
}

impl Default for EntityLocation {
    fn default() -> Self {
        Self::new(Vec3::ZERO, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_follows_yaw() {
        assert!(EntityLocation::new(Vec3::ZERO, 0.0)
            .forward()
            .abs_diff_eq(Vec3::Z, 0.0001));
        assert!(EntityLocation::new(Vec3::ZERO, 90.0)
            .forward()
            .abs_diff_eq(Vec3::X, 0.0001));
    }
}
