use std::io::Write;

use crate::error::CueError;

/// Side channel fired once per counted rep
pub trait CueSink: Send {
    fn play(&mut self) -> Result<(), CueError>;
}

/// Rings the terminal bell on stderr
#[derive(Debug, Default)]
pub struct TerminalBell;

impl CueSink for TerminalBell {
    fn play(&mut self) -> Result<(), CueError> {
        let mut stderr = std::io::stderr();
        stderr.write_all(b"\x07")?;
        stderr.flush()?;
        Ok(())
    }
}

/// No-op cue for headless runs and `--silent`
#[derive(Debug, Default)]
pub struct SilentCue;

impl CueSink for SilentCue {
    fn play(&mut self) -> Result<(), CueError> {
        Ok(())
    }
}

/// Pick the cue for a session
pub fn cue_for(enabled: bool) -> Box<dyn CueSink> {
    if enabled {
        Box::new(TerminalBell)
    } else {
        Box::new(SilentCue)
    }
}
