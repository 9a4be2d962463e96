//! Summary ranking.
//!
//! Games are ranked by total score (highest first). Equal totals put the most
//! recently started game first: creation timestamp, then the board's start
//! sequence when two games were created within the same clock tick.

use std::cmp::Reverse;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::models::Game;

type RankKey = (Reverse<u64>, Reverse<DateTime<Utc>>, Reverse<u64>);

fn rank_key(game: &Game) -> RankKey {
    (
        Reverse(game.total_score()),
        Reverse(game.created_at()),
        Reverse(game.sequence()),
    )
}

/// Return the games in summary order.
///
/// Each key is read once up front, so a score update landing mid-sort cannot
/// make the comparison inconsistent.
pub fn rank(games: &[Arc<Game>]) -> Vec<Arc<Game>> {
    let mut ranked = games.to_vec();
    ranked.sort_by_cached_key(|g| rank_key(g));
    ranked
}
