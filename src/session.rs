//! Line-oriented command scripts replayed against a [`ScoreBoard`].
//!
//! ```text
//! start "South Korea" Spain
//! update 0 1
//! finish
//! summary
//! reset
//! ```

use anyhow::{bail, Context, Result};
use std::io::{BufRead, Write};
use tracing::{info, warn};

use crate::board::{GameSnapshot, ScoreBoard};

/// One parsed script line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start { home: String, away: String },
    Update { home: i64, away: i64 },
    Finish,
    Summary,
    Reset,
}

/// Parse a single line. Blank lines and `#` comments yield `Ok(None)`.
pub fn parse_line(line: &str) -> Result<Option<Command>> {
    let tokens = tokenize(line)?;
    let Some((verb, args)) = tokens.split_first() else {
        return Ok(None);
    };

    let cmd = match (verb.to_lowercase().as_str(), args) {
        ("start", [home, away]) => Command::Start {
            home: home.clone(),
            away: away.clone(),
        },
        ("update", [home, away]) => Command::Update {
            home: home
                .parse()
                .with_context(|| format!("home score '{}' is not an integer", home))?,
            away: away
                .parse()
                .with_context(|| format!("away score '{}' is not an integer", away))?,
        },
        ("finish", []) => Command::Finish,
        ("summary", []) => Command::Summary,
        ("reset", []) => Command::Reset,
        ("start" | "update", _) => bail!("'{}' expects exactly two arguments", verb),
        ("finish" | "summary" | "reset", _) => bail!("'{}' takes no arguments", verb),
        _ => bail!("unknown command '{}'", verb),
    };
    Ok(Some(cmd))
}

/// Split on whitespace, keeping `"double quoted"` runs together.
fn tokenize(line: &str) -> Result<Vec<String>> {
    let mut tokens = Vec::new();
    let mut chars = line.trim().chars().peekable();

    while let Some(&c) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
        } else if c == '#' {
            break;
        } else if c == '"' {
            chars.next();
            let mut tok = String::new();
            loop {
                match chars.next() {
                    Some('"') => break,
                    Some(ch) => tok.push(ch),
                    None => bail!("unterminated quote"),
                }
            }
            tokens.push(tok);
        } else {
            let mut tok = String::new();
            while let Some(&ch) = chars.peek() {
                if ch.is_whitespace() {
                    break;
                }
                tok.push(ch);
                chars.next();
            }
            tokens.push(tok);
        }
    }
    Ok(tokens)
}

/// Render the board's summary as numbered text lines or a JSON array.
pub fn render_summary(board: &ScoreBoard, json: bool) -> Result<String> {
    if json {
        let snapshots: Vec<GameSnapshot> = board.summary().iter().map(|g| g.snapshot()).collect();
        serde_json::to_string_pretty(&snapshots).context("Failed to serialize summary")
    } else if board.is_empty() {
        Ok("(no games)\n".to_string())
    } else {
        Ok(board.to_string())
    }
}

/// Counters reported at the end of a run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunStats {
    pub applied: usize,
    pub rejected: usize,
}

/// Replays commands against an owned board.
pub struct Session {
    board: ScoreBoard,
    json: bool,
    fail_fast: bool,
}

impl Session {
    pub fn new(json: bool, fail_fast: bool) -> Self {
        Session {
            board: ScoreBoard::new(),
            json,
            fail_fast,
        }
    }

    pub fn board(&self) -> &ScoreBoard {
        &self.board
    }

    /// Apply one command. `summary` output goes to `out`.
    pub fn apply<W: Write>(&mut self, cmd: &Command, out: &mut W) -> Result<()> {
        match cmd {
            Command::Start { home, away } => self.board.start_game(home, away)?,
            Command::Update { home, away } => {
                self.board.update_score(*home, *away)?;
            }
            Command::Finish => self.board.finish_game(),
            Command::Reset => self.board.reset(),
            Command::Summary => {
                let rendered = render_summary(&self.board, self.json)?;
                writeln!(out, "{}", rendered.trim_end()).context("Failed to write summary")?;
            }
        }
        Ok(())
    }

    /// Read and apply every line from `input`.
    ///
    /// Parse and board errors are logged and counted; with `fail_fast` the
    /// first one aborts the run.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> Result<RunStats> {
        let mut stats = RunStats::default();

        for (idx, line) in input.lines().enumerate() {
            let line_no = idx + 1;
            let line = line.with_context(|| format!("Failed to read line {}", line_no))?;

            let result = parse_line(&line)
                .and_then(|cmd| match cmd {
                    Some(cmd) => self.apply(&cmd, out).map(|_| true),
                    None => Ok(false),
                });

            match result {
                Ok(true) => stats.applied += 1,
                Ok(false) => {}
                Err(e) => {
                    if self.fail_fast {
                        return Err(e.context(format!("line {}: {}", line_no, line.trim())));
                    }
                    warn!("line {}: {} ({})", line_no, e, line.trim());
                    stats.rejected += 1;
                }
            }
        }

        info!(
            "Script complete: {} command(s) applied, {} rejected, {} game(s) on board",
            stats.applied,
            stats.rejected,
            self.board.len()
        );
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScoreBoardError;

    fn run(script: &str, fail_fast: bool) -> (Session, Result<RunStats>, String) {
        let mut session = Session::new(false, fail_fast);
        let mut out = Vec::new();
        let res = session.run(script.as_bytes(), &mut out);
        (session, res, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            parse_line("start Mexico Canada").unwrap(),
            Some(Command::Start {
                home: "Mexico".into(),
                away: "Canada".into()
            })
        );
        assert_eq!(
            parse_line("  UPDATE 0 5 ").unwrap(),
            Some(Command::Update { home: 0, away: 5 })
        );
        assert_eq!(
            parse_line("update -2 1").unwrap(),
            Some(Command::Update { home: -2, away: 1 })
        );
        assert_eq!(parse_line("finish").unwrap(), Some(Command::Finish));
        assert_eq!(parse_line("summary").unwrap(), Some(Command::Summary));
        assert_eq!(parse_line("reset").unwrap(), Some(Command::Reset));
    }

    #[test]
    fn test_parse_quoted_names() {
        assert_eq!(
            parse_line(r#"start "South Korea" "Costa Rica""#).unwrap(),
            Some(Command::Start {
                home: "South Korea".into(),
                away: "Costa Rica".into()
            })
        );
    }

    #[test]
    fn test_parse_blank_and_comment() {
        assert_eq!(parse_line("").unwrap(), None);
        assert_eq!(parse_line("   ").unwrap(), None);
        assert_eq!(parse_line("# opening round").unwrap(), None);
        assert_eq!(parse_line("finish # done").unwrap(), Some(Command::Finish));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(parse_line("start Mexico").is_err());
        assert!(parse_line("update 1").is_err());
        assert!(parse_line("update one 1").is_err());
        assert!(parse_line("finish now").is_err());
        assert!(parse_line("kickoff Mexico Canada").is_err());
        assert!(parse_line(r#"start "Mexico Canada"#).is_err());
    }

    #[test]
    fn test_run_script_and_summary() {
        let script = "\
start Mexico Canada
update 0 1
start Spain Brazil
update 1 0
update 2 0
summary
";
        let (session, res, out) = run(script, false);
        assert_eq!(res.unwrap(), RunStats { applied: 6, rejected: 0 });
        assert_eq!(out, "1. Spain 2 - Brazil 0\n2. Mexico 0 - Canada 1\n");
        assert_eq!(session.board().len(), 2);
    }

    #[test]
    fn test_run_counts_rejections() {
        let script = "\
start Poland German
start Poland German
update 10 1
bogus
update 1 0
";
        let (session, res, _) = run(script, false);
        assert_eq!(res.unwrap(), RunStats { applied: 2, rejected: 3 });
        assert_eq!(session.board().games()[0].total_score(), 1);
    }

    #[test]
    fn test_run_fail_fast_stops_at_first_error() {
        let script = "start Poland German\nupdate 5 0\nupdate 1 0\n";
        let (session, res, _) = run(script, true);
        let err = res.unwrap_err();
        assert_eq!(
            err.downcast_ref::<ScoreBoardError>(),
            Some(&ScoreBoardError::InvalidScore)
        );
        assert!(format!("{:#}", err).contains("line 2"));
        assert_eq!(session.board().games()[0].total_score(), 0);
    }

    #[test]
    fn test_render_summary_json() {
        let mut session = Session::new(true, false);
        let mut out = Vec::new();
        session
            .run("start Mexico Canada\nupdate 1 0\n".as_bytes(), &mut out)
            .unwrap();

        let rendered = render_summary(session.board(), true).unwrap();
        let parsed: Vec<GameSnapshot> = serde_json::from_str(&rendered).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].home_team, "Mexico");
        assert_eq!(parsed[0].home_score, 1);
    }

    #[test]
    fn test_render_summary_empty_text() {
        let board = ScoreBoard::new();
        assert_eq!(render_summary(&board, false).unwrap(), "(no games)\n");
        assert_eq!(render_summary(&board, true).unwrap(), "[]");
    }
}
