use serde::{Deserialize, Serialize};

// What a player's contact with a tagged collider means for the round; tags
// nobody recognises count as an obstacle
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String")]
pub enum ContactTag {
    Ignore,
    Win,
    HighVal,
    MidVal,
    LowVal,
    Lose,
    Other,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Transition {
    Won,
    Collected,
    Lost,
}

impl ContactTag {
    pub fn from_tag(tag: &str) -> ContactTag {
        match tag {
            "Ignore" => ContactTag::Ignore,
            "Win" => ContactTag::Win,
            "HighVal" => ContactTag::HighVal,
            "MidVal" => ContactTag::MidVal,
            "LowVal" => ContactTag::LowVal,
            "Lose" => ContactTag::Lose,
            _ => ContactTag::Other,
        }
    }

    pub fn score_delta(self) -> i32 {
        match self {
            ContactTag::Ignore => 0,
            ContactTag::Win => 50,
            ContactTag::HighVal => 100,
            ContactTag::MidVal => 25,
            ContactTag::LowVal => 10,
            ContactTag::Lose => 0,
            ContactTag::Other => -2,
        }
    }

    /// The round-ending transition this contact schedules, if any.
    pub fn transition(self) -> Option<Transition> {
        match self {
            ContactTag::Win => Some(Transition::Won),
            ContactTag::HighVal | ContactTag::MidVal | ContactTag::LowVal => {
                Some(Transition::Collected)
            }
            ContactTag::Lose => Some(Transition::Lost),
            ContactTag::Ignore | ContactTag::Other => None,
        }
    }
}

impl From<&str> for ContactTag {
    fn from(tag: &str) -> Self {
        ContactTag::from_tag(tag)
    }
}

impl From<String> for ContactTag {
    fn from(tag: String) -> Self {
        ContactTag::from_tag(&tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_tags_are_obstacles() {
        assert_eq!(ContactTag::from_tag("Wall"), ContactTag::Other);
        assert_eq!(ContactTag::from_tag(""), ContactTag::Other);
        assert_eq!(ContactTag::from_tag("highval"), ContactTag::Other);
    }

    #[test]
    fn scoring_tags_end_the_round() {
        for tag in [ContactTag::HighVal, ContactTag::MidVal, ContactTag::LowVal] {
            assert!(tag.score_delta() > 0);
            assert_eq!(tag.transition(), Some(Transition::Collected));
        }
        assert_eq!(ContactTag::Lose.transition(), Some(Transition::Lost));
        assert_eq!(ContactTag::Other.transition(), None);
    }
}
