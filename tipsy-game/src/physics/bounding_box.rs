use glam::{Mat3, Vec3};

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BoundingBox {
    pub min_x: f32,
    pub max_x: f32,
    pub min_y: f32,
    pub max_y: f32,
    pub min_z: f32,
    pub max_z: f32,
}

impl BoundingBox {
    pub fn from_vecs(min: Vec3, max: Vec3) -> BoundingBox {
        BoundingBox {
            min_x: min.x.min(max.x),
            max_x: min.x.max(max.x),
            min_y: min.y.min(max.y),
            max_y: min.y.max(max.y),
            min_z: min.z.min(max.z),
            max_z: min.z.max(max.z),
        }
    }

    // axis-aligned box around an object of `size` at `pos`, turned `yaw` degrees
    pub fn around(pos: Vec3, size: Vec3, yaw: f32) -> BoundingBox {
        let rotation = Mat3::from_rotation_y(yaw.to_radians());

        // because of symmetry, four corners of one face are enough
        let half = size / 2.0;
        let corners = [
            Vec3::new(half.x, half.y, half.z),
            Vec3::new(-half.x, half.y, half.z),
            Vec3::new(half.x, half.y, -half.z),
            Vec3::new(-half.x, half.y, -half.z),
        ];

        // max in one direction is min in the other
        let mut extent = Vec3::ZERO;
        for corner in corners {
            extent = extent.max(rotation.mul_vec3(corner).abs());
        }

        BoundingBox::from_vecs(pos - extent, pos + extent)
    }

    pub fn pos(&self) -> Vec3 {
        Vec3::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
            (self.min_z + self.max_z) / 2.0,
        )
    }

    pub fn is_colliding(&self, other: &BoundingBox) -> bool {
        // https://developer.mozilla.org/en-US/docs/Games/Techniques/3D_collision_detection
        (self.min_x <= other.max_x && self.max_x >= other.min_x)
            && (self.min_y <= other.max_y && self.max_y >= other.min_y)
            && (self.min_z <= other.max_z && self.max_z >= other.min_z)
    }
}
