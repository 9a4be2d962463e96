use clap::Parser;
use std::path::PathBuf;

/// Replay a scoreboard command script and print the ranked summary
#[derive(Parser, Debug, Clone)]
#[command(name = "scoreboard", version, about)]
pub struct Config {
    /// Command script to replay (reads stdin when omitted)
    #[arg(long, env = "SCOREBOARD_SCRIPT")]
    pub script: Option<PathBuf>,

    /// Print summaries as JSON instead of numbered lines
    #[arg(long, env = "SCOREBOARD_JSON", default_value = "false")]
    pub json: bool,

    /// Stop at the first rejected command instead of logging and continuing
    #[arg(long, env = "SCOREBOARD_FAIL_FAST", default_value = "false")]
    pub fail_fast: bool,

    /// Skip the summary printed after the script finishes
    #[arg(long, env = "SCOREBOARD_NO_FINAL_SUMMARY", default_value = "false")]
    pub no_final_summary: bool,
}

impl Config {
    pub fn validate(&self) -> anyhow::Result<()> {
        if let Some(path) = &self.script {
            if !path.is_file() {
                anyhow::bail!("script '{}' does not exist or is not a file", path.display());
            }
        }
        Ok(())
    }
}
