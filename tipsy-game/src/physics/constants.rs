use glam::{const_vec3, Vec3};

// full extents; x is width, z is length along the heading
pub const PLAYER_SIZE: Vec3 = const_vec3!([1.0, 1.0, 2.0]);
pub const TRAFFIC_CAR_SIZE: Vec3 = const_vec3!([2.0, 1.5, 4.0]);

// how quickly traffic swings round to face its next waypoint
pub const TRAFFIC_TURN_RATE: f32 = 3.0;
