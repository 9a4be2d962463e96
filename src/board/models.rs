use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Mutex, PoisonError};

use super::change::ScoreChange;
use crate::error::{Result, ScoreBoardError};

/// One side of a game. The name is fixed at creation; the score is atomic so
/// it can be read from any thread while another thread updates it.
#[derive(Debug)]
pub struct Team {
    name: String,
    score: AtomicU32,
}

impl Team {
    pub fn new(name: impl Into<String>) -> Self {
        Team {
            name: name.into(),
            score: AtomicU32::new(0),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn score(&self) -> u32 {
        self.score.load(Ordering::Acquire)
    }

    fn set_score(&self, score: u32) {
        self.score.store(score, Ordering::Release);
    }

    /// A new absolute score is accepted only if it keeps the current value or
    /// adds exactly one to it.
    fn accepts(&self, proposed: i64) -> Option<u32> {
        let current = self.score();
        let proposed = u32::try_from(proposed).ok()?;
        if proposed == current || Some(proposed) == current.checked_add(1) {
            Some(proposed)
        } else {
            None
        }
    }
}

/// A game between two teams, as tracked by the board.
#[derive(Debug)]
pub struct Game {
    home: Team,
    away: Team,
    created_at: DateTime<Utc>,
    /// Board-assigned start order, used when two games share a timestamp.
    sequence: u64,
    /// Held across the validity check and both score writes.
    update_lock: Mutex<()>,
}

impl Game {
    pub(crate) fn new(home: &str, away: &str, sequence: u64) -> Self {
        Self::new_at(home, away, Utc::now(), sequence)
    }

    pub(crate) fn new_at(
        home: &str,
        away: &str,
        created_at: DateTime<Utc>,
        sequence: u64,
    ) -> Self {
        Game {
            home: Team::new(home),
            away: Team::new(away),
            created_at,
            sequence,
            update_lock: Mutex::new(()),
        }
    }

    pub fn home_team(&self) -> &Team {
        &self.home
    }

    pub fn away_team(&self) -> &Team {
        &self.away
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Sum of both team scores.
    pub fn total_score(&self) -> u64 {
        u64::from(self.home.score()) + u64::from(self.away.score())
    }

    /// True when this game is registered under exactly this (home, away) pair.
    pub fn is_between(&self, home: &str, away: &str) -> bool {
        self.home.name == home && self.away.name == away
    }

    /// Set both scores to the given absolute values.
    ///
    /// Each value must equal the team's stored score or exceed it by one.
    /// Both teams are validated before either is written, and the whole
    /// check-then-set runs under the game's lock so concurrent callers see a
    /// consistent starting point.
    pub fn advance(&self, home_score: i64, away_score: i64) -> Result<ScoreChange> {
        let _guard = self
            .update_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let prev_home = self.home.score();
        let prev_away = self.away.score();

        let (Some(home), Some(away)) = (
            self.home.accepts(home_score),
            self.away.accepts(away_score),
        ) else {
            return Err(ScoreBoardError::InvalidScore);
        };

        self.home.set_score(home);
        self.away.set_score(away);

        Ok(ScoreChange::detect(prev_home, prev_away, home, away))
    }

    /// Point-in-time copy of the game, suitable for serialization.
    pub fn snapshot(&self) -> GameSnapshot {
        let home_score = self.home.score();
        let away_score = self.away.score();
        GameSnapshot {
            home_team: self.home.name.clone(),
            away_team: self.away.name.clone(),
            home_score,
            away_score,
            total_score: u64::from(home_score) + u64::from(away_score),
            created_at: self.created_at,
        }
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} - {} {}",
            self.home.name,
            self.home.score(),
            self.away.name,
            self.away.score()
        )
    }
}

/// Serializable view of a [`Game`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub home_team: String,
    pub away_team: String,
    pub home_score: u32,
    pub away_score: u32,
    pub total_score: u64,
    pub created_at: DateTime<Utc>,
}
