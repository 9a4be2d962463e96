pub mod change;
pub mod models;
pub mod ordering;

pub use change::ScoreChange;
pub use models::{Game, GameSnapshot, Team};

use std::fmt;
use std::sync::{Arc, Weak};
use tracing::{debug, info};

use crate::error::{Result, ScoreBoardError};

/// In-memory scoreboard holding every started game.
///
/// The board owns its games. The "current game" is a non-owning handle to the
/// most recently started one and is the implicit target of
/// [`update_score`](ScoreBoard::update_score).
///
/// Structural changes (`start_game`, `finish_game`, `reset`) take `&mut self`;
/// score updates and summaries only need `&self`, so a board behind an `Arc`
/// can be scored from several threads at once.
#[derive(Debug, Default)]
pub struct ScoreBoard {
    games: Vec<Arc<Game>>,
    current: Option<Weak<Game>>,
    /// Never reset, so start order stays comparable across `reset` calls.
    next_sequence: u64,
}

impl ScoreBoard {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Lifecycle ─────────────────────────────────────────────────────────────

    /// Start a new game at 0-0 and make it the current game.
    ///
    /// Fails if a game with the same (home, away) pair is already on the
    /// board. Names are compared exactly. Any previous current game is
    /// replaced whether or not it was finished.
    pub fn start_game(&mut self, home: &str, away: &str) -> Result<()> {
        if self.find_game(home, away).is_some() {
            debug!("Rejected duplicate game {}-{}", home, away);
            return Err(ScoreBoardError::GameAlreadyExists {
                home: home.to_string(),
                away: away.to_string(),
            });
        }

        let game = Arc::new(Game::new(home, away, self.next_sequence));
        self.next_sequence += 1;
        self.current = Some(Arc::downgrade(&game));
        self.games.push(game);

        info!("Game started: {} vs {} ({} on board)", home, away, self.games.len());
        Ok(())
    }

    /// Clear the current game. The game itself stays on the board.
    pub fn finish_game(&mut self) {
        if let Some(game) = self.current.take().and_then(|w| w.upgrade()) {
            info!("Game finished: {}", game);
        }
    }

    /// Remove every game and clear the current game.
    pub fn reset(&mut self) {
        let dropped = self.games.len();
        self.games.clear();
        self.current = None;
        info!("Scoreboard reset ({} game(s) removed)", dropped);
    }

    // ── Scoring ───────────────────────────────────────────────────────────────

    /// Set the current game's score to the given absolute values.
    ///
    /// Each team may stay where it is or gain exactly one point. Fails with
    /// [`ScoreBoardError::InvalidScore`] when there is no current game or
    /// either value breaks that rule; nothing is written in that case.
    pub fn update_score(&self, home_score: i64, away_score: i64) -> Result<ScoreChange> {
        let game = self.current_game().ok_or(ScoreBoardError::InvalidScore)?;

        match game.advance(home_score, away_score) {
            Ok(change) => {
                if change.is_change() {
                    info!("Score change: {} ({})", game, change);
                } else {
                    debug!("Score unchanged: {}", game);
                }
                Ok(change)
            }
            Err(e) => {
                debug!(
                    "Rejected score {}-{} for {}: {}",
                    home_score, away_score, game, e
                );
                Err(e)
            }
        }
    }

    // ── Queries ───────────────────────────────────────────────────────────────

    /// All games ranked by total score, most recently started first on ties.
    pub fn summary(&self) -> Vec<Arc<Game>> {
        ordering::rank(&self.games)
    }

    /// All games in start order.
    pub fn games(&self) -> &[Arc<Game>] {
        &self.games
    }

    pub fn current_game(&self) -> Option<Arc<Game>> {
        self.current.as_ref().and_then(Weak::upgrade)
    }

    /// Look up a game by its exact (home, away) pair.
    pub fn find_game(&self, home: &str, away: &str) -> Option<Arc<Game>> {
        self.games.iter().find(|g| g.is_between(home, away)).cloned()
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }
}

/// Numbered summary, one game per line.
impl fmt::Display for ScoreBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, game) in self.summary().iter().enumerate() {
            writeln!(f, "{}. {}", i + 1, game)?;
        }
        Ok(())
    }
}
