use std::fs;
use std::path::Path;

use glam::Vec3;
use serde::Deserialize;
use thiserror::Error;

use tipsy_core::contact::ContactTag;
use tipsy_core::controls::{ControlKey, DrunkControls, KeyCode};
use tipsy_core::entity_location::EntityLocation;
use tipsy_core::{PlayerID, Settings};

use crate::game::manager::GameMode;
use crate::physics::contact_zone::ContactZone;
use crate::traffic::TrafficRoute;

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("could not read scenario: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not parse scenario: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("key hold {hold} is for player {player} but only {spawned} players spawn")]
    UnknownPlayer {
        hold: usize,
        player: PlayerID,
        spawned: usize,
    },
    #[error("key hold {0} ends before it starts")]
    InvertedHold(usize),
    #[error("traffic route {0} has no waypoints")]
    EmptyRoute(usize),
}

// A key held down by a player from `from` seconds until `to`, or forever
#[derive(Clone, Debug, Deserialize)]
pub struct KeyHold {
    pub player: PlayerID,
    pub key: KeyCode,
    pub from: f64,
    #[serde(default)]
    pub to: Option<f64>,
}

impl KeyHold {
    pub fn is_active(&self, now: f64) -> bool {
        now >= self.from && self.to.map_or(true, |to| now < to)
    }
}

/// Everything a headless run needs besides settings: who spawns where, what
/// they press, and what they can bump into.
#[derive(Clone, Debug, Deserialize)]
pub struct Scenario {
    #[serde(default = "demo_mode")]
    pub mode: GameMode,
    pub players: Vec<EntityLocation>,
    #[serde(default)]
    pub holds: Vec<KeyHold>,
    #[serde(default)]
    pub zones: Vec<ContactZone>,
    #[serde(default)]
    pub traffic: Vec<TrafficRoute>,
}

fn demo_mode() -> GameMode {
    GameMode::Demo
}

impl Scenario {
    pub fn load(path: &Path) -> Result<Scenario, ScenarioError> {
        let text = fs::read_to_string(path)?;
        Self::from_yaml(&text)
    }

    pub fn from_yaml(text: &str) -> Result<Scenario, ScenarioError> {
        let scenario: Scenario = serde_yaml::from_str(text)?;
        scenario.validate()?;
        Ok(scenario)
    }

    pub fn validate(&self) -> Result<(), ScenarioError> {
        for (index, hold) in self.holds.iter().enumerate() {
            if hold.player >= self.players.len() {
                return Err(ScenarioError::UnknownPlayer {
                    hold: index,
                    player: hold.player,
                    spawned: self.players.len(),
                });
            }
            if hold.to.map_or(false, |to| to < hold.from) {
                return Err(ScenarioError::InvertedHold(index));
            }
        }

        for (index, route) in self.traffic.iter().enumerate() {
            if route.waypoints.is_empty() {
                return Err(ScenarioError::EmptyRoute(index));
            }
        }

        Ok(())
    }

    // Players line up along x and chase the throttle through every swap. A
    // bottle sits up the road past a wall, a car loops across the lane, and
    // anyone who misses the bottle runs into the ditch at the far end.
    pub fn demo(player_amount: usize, settings: &Settings) -> Scenario {
        let players: Vec<EntityLocation> = (0..player_amount)
            .map(|n| EntityLocation::new(Vec3::new(n as f32 * 4.0, 0.0, 0.0), 0.0))
            .collect();

        let mut holds = Vec::new();
        for player in 0..player_amount {
            holds.extend(throttle_holds(player, settings));
        }

        let zones = vec![
            ContactZone::new(
                ContactTag::Other,
                Vec3::new(-2.0, -1.0, 14.0),
                Vec3::new(2.0, 2.0, 15.0),
            ),
            ContactZone::new(
                ContactTag::HighVal,
                Vec3::new(-3.0, -1.0, 30.0),
                Vec3::new(3.0 + player_amount as f32 * 4.0, 2.0, 32.0),
            ),
            ContactZone::new(
                ContactTag::Lose,
                Vec3::new(-200.0, -1.0, 50.0),
                Vec3::new(200.0, 2.0, 52.0),
            ),
        ];

        let traffic = vec![TrafficRoute {
            speed: 3.0,
            tag: ContactTag::Other,
            waypoints: vec![
                EntityLocation::new(Vec3::new(-20.0, 0.0, 22.0), 90.0),
                EntityLocation::new(Vec3::new(20.0, 0.0, 22.0), 270.0),
            ],
        }];

        Scenario {
            mode: GameMode::Demo,
            players,
            holds,
            zones,
            traffic,
        }
    }
}

// swaps the demo scripts for; the ditch is reached long before they run out
const DEMO_SWAPS: usize = 16;

// Holds whichever arrow drives forward between one swap and the next, the
// last one for good. Nothing is held before the first swap since movement is
// gated until then.
fn throttle_holds(player: PlayerID, settings: &Settings) -> Vec<KeyHold> {
    let swap_time = |swaps: usize| {
        settings.drunkenness_initial_delay_s + (swaps - 1) as f64 * settings.drunkenness_interval_s
    };

    (1..=DEMO_SWAPS)
        .filter_map(|swaps| {
            let key = DrunkControls::movement_key_after(ControlKey::Forward, swaps)?;
            Some(KeyHold {
                player,
                key,
                from: swap_time(swaps),
                to: (swaps < DEMO_SWAPS).then(|| swap_time(swaps + 1)),
            })
        })
        .collect()
}
