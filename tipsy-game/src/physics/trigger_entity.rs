use glam::Vec3;

use tipsy_core::contact::ContactTag;

use crate::physics::bounding_box::BoundingBox;

pub trait TriggerEntity {
    fn pos(&self) -> Vec3;
    fn get_bounding_box(&self) -> BoundingBox;
    fn contact_tag(&self) -> ContactTag;
}
