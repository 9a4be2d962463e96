//! In-memory live sports scoreboard.
//!
//! A [`ScoreBoard`] holds every started game. Scores move one point at a time
//! and [`ScoreBoard::summary`] ranks games by total score, most recently
//! started first on ties.

pub mod board;
pub mod config;
pub mod error;
pub mod session;

pub use board::{Game, GameSnapshot, ScoreBoard, ScoreChange, Team};
pub use error::{Result, ScoreBoardError};
