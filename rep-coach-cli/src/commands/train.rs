use anyhow::{bail, Result};
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;

use rep_coach::config::Config;
use rep_coach::error::SessionError;
use rep_coach::services::cue::cue_for;
use rep_coach::services::frame_source::ReplaySource;
use rep_coach::services::session::{persist, SessionRunner};

use crate::ui::live::{EndOfStream, KeyboardStop, LiveOverlay};

#[derive(Args)]
pub struct TrainCommand {
    /// Exercise: curl, squat, pushup, shoulder_press, lunge, jumping_jack or plank
    exercise: String,

    /// Recorded landmark stream (JSON Lines, one frame per line)
    #[arg(short, long)]
    frames: PathBuf,

    /// Do not ring the bell on each rep
    #[arg(long)]
    silent: bool,
}

impl TrainCommand {
    pub async fn execute(self, config: &Config) -> Result<()> {
        let cue = cue_for(config.cue.enabled && !self.silent);
        let mut runner = SessionRunner::from_selector(&self.exercise, &config.capture, cue)?;
        let kind = runner.kind();

        // Fail before the session rather than after it
        let storage = super::open_storage(config)?;
        let mut source = ReplaySource::open(&self.frames)?;

        println!("{} {}", "Tip:".cyan().bold(), kind.tip());

        let mut overlay = LiveOverlay::new(kind);
        let result = match KeyboardStop::attach()? {
            Some(mut keys) => runner.run(&mut source, &mut keys, &mut overlay),
            None => runner.run(&mut source, &mut EndOfStream, &mut overlay),
        };
        overlay.finish();
        let summary = result?;

        match persist(&summary, &storage) {
            Ok(Some(record)) => {
                println!(
                    "{} Session saved: {} {}, {} calories.",
                    "✓".green(),
                    summary.display_score,
                    kind.unit(),
                    record.calories
                );
                Ok(())
            }
            Ok(None) => {
                println!("Nothing to save: no {} counted.", kind.unit());
                Ok(())
            }
            Err(SessionError::Persistence { record, source }) => {
                eprintln!("{} Failed to save workout: {:#}", "✗".red(), source);
                eprintln!("Unsaved workout:");
                eprintln!("{}", serde_json::to_string_pretty(&record)?);
                bail!("workout was not saved")
            }
            Err(e) => Err(e.into()),
        }
    }
}
