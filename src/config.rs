use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use timer_core::{Mode, DEFAULT_COUNTDOWN_MS};

use crate::alerts::AlertConfig;
use crate::cli::Args;

const MAX_PRESETS: usize = 9;
const DEFAULT_PRESETS_MS: [u64; 5] = [30_000, 60_000, 180_000, 300_000, 600_000];
const MAX_PRESET_MS: u64 = i64::MAX as u64;
const MIN_FPS: u32 = 1;
const MAX_FPS: u32 = 240;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid duration {0:?}, expected MM:SS or SS")]
    InvalidDuration(String),
    #[error("duration {0:?} is not longer than zero")]
    NonPositiveDuration(String),
}

/// Resolved runtime settings. Building these never fails: bad durations fall
/// back to defaults with a warning.
#[derive(Clone, Debug)]
pub struct Settings {
    pub mode: Mode,
    pub countdown_ms: u64,
    pub presets: Vec<u64>,
    pub frame_interval: Duration,
    pub alerts: AlertConfig,
}

impl Settings {
    pub fn from_args(args: &Args) -> Self {
        let countdown_ms = match args.preset.as_deref().map(parse_preset) {
            Some(Ok(ms)) => ms,
            Some(Err(e)) => {
                log::warn!("{}, using default of {}s", e, DEFAULT_COUNTDOWN_MS / 1000);
                DEFAULT_COUNTDOWN_MS
            }
            None => DEFAULT_COUNTDOWN_MS,
        };

        let mut presets: Vec<u64> = args
            .presets
            .iter()
            .filter_map(|s| match parse_preset(s) {
                Ok(ms) => Some(ms),
                Err(e) => {
                    log::warn!("dropping preset: {}", e);
                    None
                }
            })
            .collect();
        if presets.len() > MAX_PRESETS {
            log::warn!("only the first {} presets are bound to keys", MAX_PRESETS);
            presets.truncate(MAX_PRESETS);
        }
        if presets.is_empty() {
            presets = DEFAULT_PRESETS_MS.to_vec();
        }

        let fps = args.fps.clamp(MIN_FPS, MAX_FPS);
        if fps != args.fps {
            log::warn!("fps {} out of range, using {}", args.fps, fps);
        }

        Self {
            mode: args.mode.into(),
            countdown_ms,
            presets,
            frame_interval: Duration::from_micros(1_000_000 / fps as u64),
            alerts: AlertConfig {
                audio: !args.no_sound,
                notification: !args.no_alert,
            },
        }
    }
}

pub fn default_log_path() -> PathBuf {
    std::env::temp_dir().join("dualtimer.log")
}

/// Parse "MM:SS" or plain seconds into milliseconds
pub fn parse_mmss(s: &str) -> Result<u64, ConfigError> {
    let invalid = || ConfigError::InvalidDuration(s.to_string());
    let parts: Vec<&str> = s.split(':').collect();
    let secs = match parts.as_slice() {
        [secs] => secs.trim().parse::<u64>().map_err(|_| invalid())?,
        [mins, secs] => {
            let mins = mins.trim().parse::<u64>().map_err(|_| invalid())?;
            let secs = secs.trim().parse::<u64>().map_err(|_| invalid())?;
            mins.checked_mul(60).and_then(|m| m.checked_add(secs)).ok_or_else(invalid)?
        }
        _ => return Err(invalid()),
    };
    secs.checked_mul(1000).ok_or_else(invalid)
}

// Presets end up as signed millis in the widget, so cap rather than wrap.
fn parse_preset(s: &str) -> Result<u64, ConfigError> {
    match parse_mmss(s)? {
        0 => Err(ConfigError::NonPositiveDuration(s.to_string())),
        ms if ms > MAX_PRESET_MS => {
            log::warn!("preset {:?} too long, capping", s);
            Ok(MAX_PRESET_MS)
        }
        ms => Ok(ms),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn settings(argv: &[&str]) -> Settings {
        let mut full = vec!["dualtimer"];
        full.extend_from_slice(argv);
        Settings::from_args(&Args::parse_from(full))
    }

    #[test]
    fn test_parse_mmss() {
        assert_eq!(parse_mmss("05:00"), Ok(300_000));
        assert_eq!(parse_mmss("1:30"), Ok(90_000));
        assert_eq!(parse_mmss(" 45 "), Ok(45_000));
        assert_eq!(parse_mmss("0"), Ok(0));
    }

    #[test]
    fn test_parse_mmss_rejects_garbage() {
        assert!(matches!(parse_mmss("abc"), Err(ConfigError::InvalidDuration(_))));
        assert!(matches!(parse_mmss("1:2:3"), Err(ConfigError::InvalidDuration(_))));
        assert!(matches!(parse_mmss("-5"), Err(ConfigError::InvalidDuration(_))));
        assert!(matches!(parse_mmss(""), Err(ConfigError::InvalidDuration(_))));
    }

    #[test]
    fn test_defaults() {
        let s = settings(&[]);
        assert_eq!(s.mode, Mode::Countdown);
        assert_eq!(s.countdown_ms, DEFAULT_COUNTDOWN_MS);
        assert_eq!(s.presets, DEFAULT_PRESETS_MS.to_vec());
        assert_eq!(s.frame_interval, Duration::from_micros(16_666));
        assert!(s.alerts.audio);
        assert!(s.alerts.notification);
    }

    #[test]
    fn test_invalid_preset_falls_back() {
        assert_eq!(settings(&["--preset", "soon"]).countdown_ms, DEFAULT_COUNTDOWN_MS);
        assert_eq!(settings(&["--preset", "00:00"]).countdown_ms, DEFAULT_COUNTDOWN_MS);
        assert_eq!(settings(&["--preset", "2:00"]).countdown_ms, 120_000);
    }

    #[test]
    fn test_presets_list() {
        let s = settings(&["--presets", "10,x,0,1:00"]);
        assert_eq!(s.presets, vec![10_000, 60_000]);

        let s = settings(&["--presets", "bad"]);
        assert_eq!(s.presets, DEFAULT_PRESETS_MS.to_vec());

        let s = settings(&["--presets", "1,2,3,4,5,6,7,8,9,10,11"]);
        assert_eq!(s.presets.len(), MAX_PRESETS);
    }

    #[test]
    fn test_oversized_preset_capped() {
        let s = settings(&["--presets", "10000000000000000", "--preset", "10000000000000000"]);
        assert_eq!(s.presets, vec![MAX_PRESET_MS]);
        assert_eq!(s.countdown_ms, MAX_PRESET_MS);
        assert!(i64::try_from(s.presets[0]).is_ok());
    }

    #[test]
    fn test_flags() {
        let s = settings(&["--mode", "stopwatch", "--no-sound", "--fps", "1000"]);
        assert_eq!(s.mode, Mode::Stopwatch);
        assert!(!s.alerts.audio);
        assert!(s.alerts.notification);
        assert_eq!(s.frame_interval, Duration::from_micros(1_000_000 / MAX_FPS as u64));
    }
}
