use glam::Vec3;
use serde::Deserialize;

use tipsy_core::contact::ContactTag;

use crate::physics::bounding_box::BoundingBox;
use crate::physics::trigger_entity::TriggerEntity;

// A static tagged region on the map: pickups, goals, walls
#[derive(Clone, Copy, Debug, Deserialize)]
pub struct ContactZone {
    pub tag: ContactTag,
    pub min: Vec3,
    pub max: Vec3,
}

impl ContactZone {
    pub fn new(tag: ContactTag, min: Vec3, max: Vec3) -> Self {
        Self { tag, min, max }
    }
}

impl TriggerEntity for ContactZone {
    fn pos(&self) -> Vec3 {
        self.get_bounding_box().pos()
    }

    fn get_bounding_box(&self) -> BoundingBox {
        BoundingBox::from_vecs(self.min, self.max)
    }

    fn contact_tag(&self) -> ContactTag {
        self.tag
    }
}
