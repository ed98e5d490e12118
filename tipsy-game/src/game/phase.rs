use tipsy_core::contact::Transition;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RoundPhase {
    // Weaving around the map; keys and drunken force both apply
    Driving,
    // Reached the goal
    Won,
    // Grabbed something worth points and stopped to celebrate
    Collected,
    // Hit something that ends the run
    Lost,
}

impl RoundPhase {
    pub fn is_finished(self) -> bool {
        !matches!(self, RoundPhase::Driving)
    }
}

impl From<Transition> for RoundPhase {
    fn from(transition: Transition) -> Self {
        match transition {
            Transition::Won => RoundPhase::Won,
            Transition::Collected => RoundPhase::Collected,
            Transition::Lost => RoundPhase::Lost,
        }
    }
}

// Everything the driver can schedule on its timer queue
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GameTask {
    ResampleDrunkenness,
    EndRound(Transition),
    Quit,
}
