use tipsy_core::PlayerID;

pub type TimerId = u64;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TimerOwner {
    Game,
    Player(PlayerID),
}

struct Timer<T> {
    id: TimerId,
    owner: TimerOwner,
    due: f64,
    period: Option<f64>,
    task: T,
}

pub struct Fired<T> {
    pub owner: TimerOwner,
    pub task: T,
}

/// Game-time callbacks advanced by the tick loop. Every timer belongs to an
/// owner so everything an entity scheduled can be dropped when it goes away.
pub struct Timers<T> {
    now: f64,
    next_id: TimerId,
    timers: Vec<Timer<T>>,
}

impl<T: Clone> Timers<T> {
    pub fn new() -> Self {
        Self {
            now: 0.0,
            next_id: 0,
            timers: Vec::new(),
        }
    }

    pub fn now(&self) -> f64 {
        self.now
    }

    pub fn schedule_once(&mut self, owner: TimerOwner, delay: f64, task: T) -> TimerId {
        self.push(owner, delay, None, task)
    }

    pub fn schedule_repeating(
        &mut self,
        owner: TimerOwner,
        initial_delay: f64,
        period: f64,
        task: T,
    ) -> TimerId {
        assert!(period > 0.0, "repeating timer needs a positive period");
        self.push(owner, initial_delay, Some(period), task)
    }

    fn push(&mut self, owner: TimerOwner, delay: f64, period: Option<f64>, task: T) -> TimerId {
        let id = self.next_id;
        self.next_id += 1;
        self.timers.push(Timer {
            id,
            owner,
            due: self.now + delay.max(0.0),
            period,
            task,
        });
        id
    }

    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.timers.len();
        self.timers.retain(|timer| timer.id != id);
        self.timers.len() != before
    }

    pub fn cancel_owner(&mut self, owner: TimerOwner) -> usize {
        let before = self.timers.len();
        self.timers.retain(|timer| timer.owner != owner);
        before - self.timers.len()
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    /// Moves game time forward and returns every callback that came due, in
    /// due order. Repeating timers fire once per elapsed period, so a long
    /// step can fire the same timer more than once.
    pub fn advance(&mut self, dt: f64) -> Vec<Fired<T>> {
        self.now += dt.max(0.0);
        let mut fired = Vec::new();

        loop {
            let next = self
                .timers
                .iter()
                .enumerate()
                .filter(|(_, timer)| timer.due <= self.now)
                .min_by(|(_, a), (_, b)| a.due.total_cmp(&b.due).then(a.id.cmp(&b.id)))
                .map(|(index, _)| index);

            let index = match next {
                Some(index) => index,
                None => break,
            };

            match self.timers[index].period {
                Some(period) => {
                    let timer = &mut self.timers[index];
                    timer.due += period;
                    fired.push(Fired {
                        owner: timer.owner,
                        task: timer.task.clone(),
                    });
                }
                None => {
                    let timer = self.timers.swap_remove(index);
                    fired.push(Fired {
                        owner: timer.owner,
                        task: timer.task,
                    });
                }
            }
        }

        fired
    }
}

impl<T: Clone> Default for Timers<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tasks(fired: Vec<Fired<&'static str>>) -> Vec<&'static str> {
        fired.into_iter().map(|f| f.task).collect()
    }

    #[test]
    fn once_fires_after_delay_not_before() {
        let mut timers = Timers::new();
        timers.schedule_once(TimerOwner::Game, 2.0, "quit");

        assert!(timers.advance(1.5).is_empty());
        assert_eq!(timers.len(), 1);
        assert_eq!(tasks(timers.advance(0.5)), vec!["quit"]);
        assert!(timers.is_empty());
        assert!(timers.advance(10.0).is_empty());
    }

    #[test]
    fn repeating_fires_every_period() {
        let mut timers = Timers::new();
        timers.schedule_repeating(TimerOwner::Player(0), 1.0, 2.0, "tick");

        assert!(timers.advance(0.5).is_empty());
        assert_eq!(tasks(timers.advance(0.5)).len(), 1);
        assert!(timers.advance(1.0).is_empty());
        assert_eq!(tasks(timers.advance(1.0)).len(), 1);
        // a long step catches up on every missed period
        assert_eq!(tasks(timers.advance(6.0)).len(), 3);
    }

    #[test]
    fn fired_in_due_order() {
        let mut timers = Timers::new();
        timers.schedule_once(TimerOwner::Game, 3.0, "third");
        timers.schedule_once(TimerOwner::Game, 1.0, "first");
        timers.schedule_once(TimerOwner::Game, 2.0, "second");

        assert_eq!(tasks(timers.advance(5.0)), vec!["first", "second", "third"]);
    }

    #[test]
    fn cancelled_owner_never_fires() {
        let mut timers = Timers::new();
        timers.schedule_once(TimerOwner::Player(1), 1.0, "won");
        timers.schedule_repeating(TimerOwner::Player(1), 0.5, 0.5, "resample");
        timers.schedule_once(TimerOwner::Player(2), 1.0, "lost");

        assert_eq!(timers.cancel_owner(TimerOwner::Player(1)), 2);
        assert_eq!(tasks(timers.advance(2.0)), vec!["lost"]);
        assert!(timers.is_empty());
    }

    #[test]
    fn cancel_single_timer() {
        let mut timers = Timers::new();
        let id = timers.schedule_once(TimerOwner::Game, 1.0, "quit");
        assert!(timers.cancel(id));
        assert!(!timers.cancel(id));
        assert!(timers.advance(1.0).is_empty());
    }
}
