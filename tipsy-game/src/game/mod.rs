use std::thread;
use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info, warn};

use tipsy_core::contact::Transition;
use tipsy_core::controls::{ControlKey, KeyCode, PlayerControls};
use tipsy_core::entity_location::EntityLocation;
use tipsy_core::{PlayerID, Settings};

use crate::locomotion::LocomotionTuning;
use crate::physics::contact_zone::ContactZone;
use crate::physics::trigger_entity::TriggerEntity;
use crate::timers::{TimerOwner, Timers};
use crate::traffic::TrafficCar;

use self::manager::GameManager;
use self::phase::{GameTask, RoundPhase};
use self::players::PlayerManager;
use self::scenario::{KeyHold, Scenario, ScenarioError};

pub mod manager;
pub mod phase;
pub mod players;
pub mod scenario;


#[derive(Clone, Debug)]
pub struct PlayerSummary {
    pub id: PlayerID,
    pub score: i32,
    pub phase: RoundPhase,
    pub location: EntityLocation,
}

/// Runs the whole simulation one fixed tick at a time and plays every
/// collaborator the controllers need: input, timers, contacts and bodies.
pub struct GameDriver {
    settings: Settings,
    tuning: LocomotionTuning,
    game: GameManager,
    players: PlayerManager,
    timers: Timers<GameTask>,
    holds: Vec<KeyHold>,
    zones: Vec<ContactZone>,
    traffic: Vec<TrafficCar>,
    rng: StdRng,

    // unscaled time, so scripted keys keep working while paused
    clock: f64,
    tick_count: u64,
}

impl GameDriver {
    pub fn new(settings: Settings, scenario: Scenario) -> Result<GameDriver, ScenarioError> {
        scenario.validate()?;

        let rng = match settings.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut driver = GameDriver {
            tuning: LocomotionTuning::from(&settings),
            settings,
            game: GameManager::new(scenario.mode),
            players: PlayerManager::new(),
            timers: Timers::new(),
            holds: scenario.holds,
            zones: scenario.zones,
            traffic: scenario.traffic.into_iter().map(TrafficCar::new).collect(),
            rng,
            clock: 0.0,
            tick_count: 0,
        };

        for start in scenario.players {
            driver.spawn_player(start);
        }

        Ok(driver)
    }

    pub fn game(&self) -> &GameManager {
        &self.game
    }

    pub fn players(&self) -> &PlayerManager {
        &self.players
    }

    pub fn timers(&self) -> &Timers<GameTask> {
        &self.timers
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn spawn_player(&mut self, start: EntityLocation) -> PlayerID {
        let id = self
            .players
            .create_player(start, self.tuning, self.settings.max_speed);

        self.timers.schedule_repeating(
            TimerOwner::Player(id),
            self.settings.drunkenness_initial_delay_s,
            self.settings.drunkenness_interval_s,
            GameTask::ResampleDrunkenness,
        );

        id
    }

    // drops the player along with anything it still had scheduled
    pub fn despawn_player(&mut self, id: PlayerID) -> bool {
        let cancelled = self.timers.cancel_owner(TimerOwner::Player(id));
        debug!("cancelled {} timers for player {}", cancelled, id);
        self.players.remove_player(id).is_some()
    }

    // Runs until the configured tick count or a quit; with `realtime` each
    // tick is padded out to the configured length
    pub fn start_loop(&mut self, realtime: bool) -> Vec<PlayerSummary> {
        let tick_duration = Duration::from_millis(self.settings.sim_tick_ms);
        let dt = tick_duration.as_secs_f64();

        loop {
            if self.game.quit_requested() {
                break;
            }
            if self.settings.sim_ticks != 0 && self.tick_count >= self.settings.sim_ticks {
                break;
            }

            let start_time = Instant::now();

            self.tick(dt);

            if realtime {
                match tick_duration.checked_sub(start_time.elapsed()) {
                    Some(remaining) => thread::sleep(remaining),
                    None => warn!("tick {} took longer than configured length", self.tick_count),
                }
            }
        }

        let summary = self.summary();
        for player in &summary {
            info!(
                "player {} finished {:?} with score {} at {:?}",
                player.id, player.phase, player.score, player.location.position
            );
        }
        summary
    }

    pub fn tick(&mut self, dt: f64) {
        self.tick_count += 1;
        self.clock += dt;

        self.sample_inputs();
        self.check_pause_keys();

        let game_dt = dt * self.game.time_scale();
        if game_dt <= 0.0 {
            return;
        }

        self.run_timers(game_dt);
        self.simulate_players(game_dt as f32);
        self.detect_contacts();
    }

    pub fn summary(&self) -> Vec<PlayerSummary> {
        self.players
            .iter()
            .map(|player| PlayerSummary {
                id: player.id,
                score: player.controller.score(),
                phase: player.phase,
                location: player.body.location,
            })
            .collect()
    }

    // scripted holds only ever touch the keys they name
    fn sample_inputs(&mut self) {
        let now = self.clock;
        for player in self.players.iter_mut() {
            let id = player.id;
            let scripted = self.holds.iter().filter(|hold| hold.player == id);
            let active: Vec<KeyCode> = scripted
                .clone()
                .filter(|hold| hold.is_active(now))
                .map(|hold| hold.key)
                .collect();

            for hold in scripted {
                if active.contains(&hold.key) {
                    player.input.on_key_down(hold.key);
                } else {
                    player.input.on_key_up(hold.key);
                }
            }
        }
    }

    // any number of players pressing pause on the same tick toggles it once
    fn check_pause_keys(&mut self) {
        let mut pressed = false;
        for player in self.players.iter_mut() {
            let held = player
                .controller
                .controls()
                .is_pressed(ControlKey::Pause, &player.input);
            pressed |= held && !player.pause_held;
            player.pause_held = held;
        }

        if pressed {
            self.game.toggle_pause();
        }
    }

    fn run_timers(&mut self, dt: f64) {
        for fired in self.timers.advance(dt) {
            match (fired.owner, fired.task) {
                (TimerOwner::Player(id), GameTask::ResampleDrunkenness) => {
                    if let Some(player) = self.players.get_player_mut(id) {
                        player.controller.resample_perturbation(&mut self.rng);
                    }
                }
                (TimerOwner::Player(id), GameTask::EndRound(transition)) => {
                    self.end_round(id, transition);
                }
                (_, GameTask::Quit) => self.game.quit(),
                (owner, task) => warn!("ignoring {:?} scheduled by {:?}", task, owner),
            }
        }
    }

    fn end_round(&mut self, id: PlayerID, transition: Transition) {
        let player = match self.players.get_player_mut(id) {
            Some(player) => player,
            None => return,
        };

        player.phase = RoundPhase::from(transition);
        info!(
            "player {} is now {:?} with score {}",
            id,
            player.phase,
            player.controller.score()
        );
        self.timers.cancel_owner(TimerOwner::Player(id));

        if self.players.all_finished() && !self.game.has_ended() {
            self.game.game_has_ended();
            self.game
                .delay_quit(self.settings.transition_delay_s, &mut self.timers);
        }
    }

    fn simulate_players(&mut self, dt: f32) {
        for car in &mut self.traffic {
            car.update(dt);
        }

        for player in self.players.iter_mut() {
            if player.phase.is_finished() {
                continue;
            }
            player.controller.step(dt, &player.input, &mut player.body);
            player.body.integrate(dt);
        }
    }

    fn detect_contacts(&mut self) {
        let mut triggers: Vec<&dyn TriggerEntity> = Vec::new();
        for zone in &self.zones {
            triggers.push(zone);
        }
        for car in &self.traffic {
            triggers.push(car);
        }

        let mut pending = Vec::new();
        for player in self.players.iter_mut() {
            for (tag, normal) in player.collect_new_contacts(&triggers) {
                if let Some(transition) = player.controller.on_contact(tag, normal, &mut player.body)
                {
                    pending.push((player.id, transition));
                }
            }
        }

        for (id, transition) in pending {
            self.timers.schedule_once(
                TimerOwner::Player(id),
                self.settings.transition_delay_s,
                GameTask::EndRound(transition),
            );
        }
    }
}
