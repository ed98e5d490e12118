use serde::Deserialize;
use tracing::{info, warn};

use crate::game::phase::GameTask;
use crate::timers::{TimerId, TimerOwner, Timers};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize)]
pub enum GameMode {
    Demo,
    Mobile,
    Release,
}

/// Game-wide state that used to live behind a global instance: mode, pause
/// and shutdown. Owned by the driver and handed out by reference.
pub struct GameManager {
    mode: GameMode,
    paused: bool,
    ended: bool,
    quit_requested: bool,
    pending_quit: Option<TimerId>,
}

impl GameManager {
    pub fn new(mode: GameMode) -> Self {
        Self {
            mode,
            paused: false,
            ended: false,
            quit_requested: false,
            pending_quit: None,
        }
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn has_ended(&self) -> bool {
        self.ended
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    // scales every game-time step; zero while paused
    pub fn time_scale(&self) -> f64 {
        if self.paused {
            0.0
        } else {
            1.0
        }
    }

    pub fn pause(&mut self) {
        if !self.paused {
            self.paused = true;
            info!("game paused");
        }
    }

    pub fn unpause(&mut self) {
        if self.paused {
            self.paused = false;
            info!("game unpaused");
        }
    }

    pub fn toggle_pause(&mut self) {
        if self.paused {
            self.unpause();
        } else {
            self.pause();
        }
    }

    /// Queues a quit on the game timer; a second request replaces the first.
    pub fn delay_quit(&mut self, delay: f64, timers: &mut Timers<GameTask>) {
        if let Some(previous) = self.pending_quit.take() {
            timers.cancel(previous);
        }
        self.pending_quit = Some(timers.schedule_once(TimerOwner::Game, delay, GameTask::Quit));
    }

    pub fn quit(&mut self) {
        self.pending_quit = None;
        self.quit_requested = true;
        info!("quit requested");
    }

    pub fn game_has_ended(&mut self) {
        if self.ended {
            warn!("game already ended");
            return;
        }
        self.ended = true;

        match self.mode {
            GameMode::Demo => info!("demo round over"),
            GameMode::Mobile => info!("mobile round over"),
            GameMode::Release => info!("round over"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_pause_flips_time_scale() {
        let mut game = GameManager::new(GameMode::Demo);
        assert_eq!(game.time_scale(), 1.0);

        game.toggle_pause();
        assert!(game.is_paused());
        assert_eq!(game.time_scale(), 0.0);

        game.toggle_pause();
        assert!(!game.is_paused());
    }

    #[test]
    fn delayed_quit_replaces_earlier_request() {
        let mut game = GameManager::new(GameMode::Release);
        let mut timers = Timers::new();

        game.delay_quit(5.0, &mut timers);
        game.delay_quit(1.0, &mut timers);
        assert_eq!(timers.len(), 1);

        let fired = timers.advance(1.0);
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].task, GameTask::Quit);
    }

    #[test]
    fn ends_only_once() {
        let mut game = GameManager::new(GameMode::Mobile);
        game.game_has_ended();
        game.game_has_ended();
        assert!(game.has_ended());
        assert_eq!(game.mode(), GameMode::Mobile);
    }
}
