use thiserror::Error;

/// Errors returned by [`crate::ScoreBoard`] operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoreBoardError {
    /// A game with the same (home, away) pair is already on the board.
    #[error("This game was already registered {home}-{away}")]
    GameAlreadyExists { home: String, away: String },

    /// No current game, or a team score moved by something other than 0 or +1.
    #[error("Provided score is incorrect")]
    InvalidScore,
}

pub type Result<T> = std::result::Result<T, ScoreBoardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_already_exists_message_names_both_teams() {
        let err = ScoreBoardError::GameAlreadyExists {
            home: "Poland".into(),
            away: "German".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("Poland"));
        assert!(msg.contains("German"));
    }

    #[test]
    fn test_invalid_score_message() {
        assert_eq!(
            ScoreBoardError::InvalidScore.to_string(),
            "Provided score is incorrect"
        );
    }
}
