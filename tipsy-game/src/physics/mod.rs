use glam::Vec3;

use tipsy_core::contact::ContactTag;

use crate::game::players::Player;
use crate::physics::bounding_box::BoundingBox;
use crate::physics::trigger_entity::TriggerEntity;

pub mod bounding_box;
pub mod constants;
pub mod contact_zone;
pub mod trigger_entity;

use constants::PLAYER_SIZE;

impl Player {
    pub fn bounding_box(&self) -> BoundingBox {
        let location = self.body.location;
        BoundingBox::around(location.position, PLAYER_SIZE, location.yaw)
    }

    /* Compare what the player overlaps now against last tick and return the
     * tag and ground-plane normal of every trigger that was just entered.
     * Staying inside a trigger never reports it twice. */
    pub fn collect_new_contacts(
        &mut self,
        triggers: &[&dyn TriggerEntity],
    ) -> Vec<(ContactTag, Vec3)> {
        let own_box = self.bounding_box();
        let position = self.body.location.position;

        let touching: Vec<usize> = triggers
            .iter()
            .enumerate()
            .filter(|(_, trigger)| own_box.is_colliding(&trigger.get_bounding_box()))
            .map(|(index, _)| index)
            .collect();

        let entered = touching
            .iter()
            .filter(|index| !self.current_triggers.contains(index))
            .map(|index| {
                let trigger = triggers[*index];
                let away = position - trigger.pos();
                let normal = Vec3::new(away.x, 0.0, away.z).normalize_or_zero();
                (trigger.contact_tag(), normal)
            })
            .collect();

        self.current_triggers = touching;
        entered
    }
}
