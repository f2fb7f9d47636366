use std::io::{self, Write};

use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AlertConfig {
    pub audio: bool,
    pub notification: bool,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            audio: true,
            notification: true,
        }
    }
}

#[derive(Debug, Error)]
pub enum CueError {
    #[error("cue output failed: {0}")]
    Io(#[from] io::Error),
}

/// Something that can make a short sound. Best effort only.
pub trait CueSource {
    fn play_cue(&mut self) -> Result<(), CueError>;
}

/// Receives the "countdown finished" notification.
pub trait AlertChannel {
    fn notify_expired(&mut self);
}

/// Rings the terminal bell.
pub struct TerminalBell<W: Write> {
    out: W,
}

impl<W: Write> TerminalBell<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl TerminalBell<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> CueSource for TerminalBell<W> {
    fn play_cue(&mut self) -> Result<(), CueError> {
        self.out.write_all(b"\x07")?;
        self.out.flush()?;
        Ok(())
    }
}

pub fn fire_start_cue(config: &AlertConfig, cue: &mut dyn CueSource) {
    if config.audio {
        play(cue, "start");
    }
}

pub fn fire_alert(config: &AlertConfig, cue: &mut dyn CueSource, channel: &mut dyn AlertChannel) {
    if config.audio {
        play(cue, "expiry");
    }
    if config.notification {
        channel.notify_expired();
    }
}

// Cue failures never reach the timer.
fn play(cue: &mut dyn CueSource, what: &str) {
    if let Err(e) = cue.play_cue() {
        log::warn!("{} cue failed: {}", what, e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct CountingCue {
        played: u32,
        fail: bool,
    }

    impl CueSource for CountingCue {
        fn play_cue(&mut self) -> Result<(), CueError> {
            self.played += 1;
            if self.fail {
                Err(io::Error::new(io::ErrorKind::BrokenPipe, "muted").into())
            } else {
                Ok(())
            }
        }
    }

    #[derive(Default)]
    struct CountingChannel {
        notified: u32,
    }

    impl AlertChannel for CountingChannel {
        fn notify_expired(&mut self) {
            self.notified += 1;
        }
    }

    #[test]
    fn test_failed_cue_still_notifies() {
        let mut cue = CountingCue { fail: true, ..Default::default() };
        let mut channel = CountingChannel::default();
        fire_alert(&AlertConfig::default(), &mut cue, &mut channel);
        assert_eq!(cue.played, 1);
        assert_eq!(channel.notified, 1);
    }

    #[test]
    fn test_disabled_outputs() {
        let mut cue = CountingCue::default();
        let mut channel = CountingChannel::default();
        let config = AlertConfig { audio: false, notification: false };
        fire_alert(&config, &mut cue, &mut channel);
        fire_start_cue(&config, &mut cue);
        assert_eq!(cue.played, 0);
        assert_eq!(channel.notified, 0);
    }

    #[test]
    fn test_terminal_bell_writes_bel() {
        let mut bell = TerminalBell::new(Vec::new());
        bell.play_cue().unwrap();
        assert_eq!(bell.out, b"\x07");
    }
}
