use serde::{Deserialize, Serialize};
use std::fmt;

/// Which side(s) scored in an accepted update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreChange {
    Unchanged,
    Home,
    Away,
    Both,
}

impl ScoreChange {
    /// Compare two scorelines of the same game.
    pub fn detect(prev_home: u32, prev_away: u32, home: u32, away: u32) -> Self {
        match (home != prev_home, away != prev_away) {
            (false, false) => ScoreChange::Unchanged,
            (true, false) => ScoreChange::Home,
            (false, true) => ScoreChange::Away,
            (true, true) => ScoreChange::Both,
        }
    }

    pub fn is_change(self) -> bool {
        self != ScoreChange::Unchanged
    }
}

impl fmt::Display for ScoreChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ScoreChange::Unchanged => "no_change",
            ScoreChange::Home => "goal_home",
            ScoreChange::Away => "goal_away",
            ScoreChange::Both => "goal_both",
        };
        f.write_str(s)
    }
}
