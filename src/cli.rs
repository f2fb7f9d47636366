use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use timer_core::Mode;

#[derive(Parser, Debug)]
#[command(
    name = "dualtimer",
    version = env!("CARGO_PKG_VERSION"),
    about = "Countdown and stopwatch timer for the terminal"
)]
pub struct Args {
    /// Mode shown at startup
    #[arg(short, long, value_enum, default_value_t = StartMode::Countdown)]
    pub mode: StartMode,

    /// Initial countdown length, MM:SS or SS
    #[arg(short, long, value_name = "DURATION")]
    pub preset: Option<String>,

    /// Countdown presets bound to keys 1-9, comma separated
    #[arg(long, value_name = "LIST", value_delimiter = ',')]
    pub presets: Vec<String>,

    /// Display refresh rate
    #[arg(long, default_value_t = 60)]
    pub fps: u32,

    /// Don't ring the terminal bell on start and expiry
    #[arg(long, action)]
    pub no_sound: bool,

    /// Don't show the expiry notification
    #[arg(long, action)]
    pub no_alert: bool,

    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    #[arg(short, long, action)]
    pub verbose: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum StartMode {
    Countdown,
    Stopwatch,
}

impl From<StartMode> for Mode {
    fn from(m: StartMode) -> Self {
        match m {
            StartMode::Countdown => Mode::Countdown,
            StartMode::Stopwatch => Mode::Stopwatch,
        }
    }
}
