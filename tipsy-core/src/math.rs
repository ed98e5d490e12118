use glam::Vec3;

/// Linear interpolation with `t` clamped to [0, 1].
pub fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t.clamp(0.0, 1.0)
}

/// Shortest signed difference between two angles in degrees, in (-180, 180].
pub fn delta_angle(from: f32, to: f32) -> f32 {
    let mut delta = (to - from).rem_euclid(360.0);
    if delta > 180.0 {
        delta -= 360.0;
    }
    delta
}

/// Like [`lerp`] but takes the short way around the circle.
pub fn lerp_angle(from: f32, to: f32, t: f32) -> f32 {
    from + delta_angle(from, to) * t.clamp(0.0, 1.0)
}

/// Moves `current` toward `target` by at most `max_distance`, never past it.
pub fn move_towards(current: Vec3, target: Vec3, max_distance: f32) -> Vec3 {
    let to_target = target - current;
    let distance = to_target.length();
    if distance <= max_distance || distance == 0.0 {
        return target;
    }
    current + to_target / distance * max_distance
}
