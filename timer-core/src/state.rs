use crate::format::format_millis;

/// Countdown length used when no preset has been configured.
pub const DEFAULT_COUNTDOWN_MS: u64 = 30 * 1000;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Mode {
    Countdown,
    Stopwatch,
}

impl Mode {
    pub fn label(&self) -> &'static str {
        match self {
            Mode::Countdown => "Countdown",
            Mode::Stopwatch => "Stopwatch",
        }
    }

    pub fn other(&self) -> Mode {
        match self {
            Mode::Countdown => Mode::Stopwatch,
            Mode::Stopwatch => Mode::Countdown,
        }
    }
}

/// The value currently shown, tagged with what it means.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Reading {
    /// Countdown time left.
    Remaining(u64),
    /// Stopwatch time accumulated.
    Elapsed(u64),
}

impl Reading {
    pub fn mode(&self) -> Mode {
        match self {
            Reading::Remaining(_) => Mode::Countdown,
            Reading::Elapsed(_) => Mode::Stopwatch,
        }
    }

    pub fn millis(&self) -> u64 {
        match *self {
            Reading::Remaining(ms) | Reading::Elapsed(ms) => ms,
        }
    }

    pub fn formatted(&self) -> String {
        format_millis(self.millis())
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum RunState {
    Stopped,
    Running,
    Paused,
    /// Countdown reached zero while ticking.
    Expired,
}

/// All mutable timing state of the widget.
///
/// While not running, `reading` is authoritative. While running it is only as
/// fresh as the last tick; use [`TimerState::live_reading`] for the value at a
/// given instant.
#[derive(Clone, Debug)]
pub struct TimerState {
    pub(crate) reading: Reading,
    pub(crate) run: RunState,
    // Countdown: remaining time at the most recent start/resume.
    pub(crate) target_ms: u64,
    // Stopwatch: elapsed time banked at the most recent start/resume.
    pub(crate) accumulated_ms: u64,
    pub(crate) anchor_ms: u64,
    pub(crate) preset_ms: Option<u64>,
}

impl TimerState {
    pub fn new_countdown(duration_ms: u64) -> Self {
        Self {
            reading: Reading::Remaining(duration_ms),
            run: RunState::Stopped,
            target_ms: duration_ms,
            accumulated_ms: 0,
            anchor_ms: 0,
            preset_ms: None,
        }
    }

    pub fn new_stopwatch() -> Self {
        Self {
            reading: Reading::Elapsed(0),
            run: RunState::Stopped,
            target_ms: 0,
            accumulated_ms: 0,
            anchor_ms: 0,
            preset_ms: None,
        }
    }

    pub fn mode(&self) -> Mode {
        self.reading.mode()
    }

    pub fn run_state(&self) -> RunState {
        self.run
    }

    pub fn is_running(&self) -> bool {
        self.run == RunState::Running
    }

    /// Last rendered (or frozen) value.
    pub fn reading(&self) -> Reading {
        self.reading
    }

    pub fn target_ms(&self) -> u64 {
        self.target_ms
    }

    pub fn anchor_ms(&self) -> u64 {
        self.anchor_ms
    }

    /// Last duration handed to `set_preset`, if any.
    pub fn preset_ms(&self) -> Option<u64> {
        self.preset_ms
    }

    /// The authoritative value at `now_ms`, recomputed from the anchor while
    /// running. A countdown past its target reads as zero.
    pub fn live_reading(&self, now_ms: u64) -> Reading {
        if !self.is_running() {
            return self.reading;
        }
        let since = now_ms.saturating_sub(self.anchor_ms);
        match self.reading {
            Reading::Remaining(_) => Reading::Remaining(self.target_ms.saturating_sub(since)),
            Reading::Elapsed(_) => Reading::Elapsed(self.accumulated_ms.saturating_add(since)),
        }
    }

    /// Begins a running segment at `now_ms`. Returns false when nothing
    /// changed: already running, or a countdown with no time left.
    pub(crate) fn start(&mut self, now_ms: u64) -> bool {
        if self.is_running() {
            return false;
        }
        match self.reading {
            Reading::Remaining(0) => return false,
            Reading::Remaining(ms) => self.target_ms = ms,
            Reading::Elapsed(ms) => self.accumulated_ms = ms,
        }
        self.anchor_ms = now_ms;
        self.run = RunState::Running;
        true
    }

    /// Freezes the reading at `now_ms`. Returns false if not running.
    pub(crate) fn pause(&mut self, now_ms: u64) -> bool {
        if !self.is_running() {
            return false;
        }
        self.reading = self.live_reading(now_ms);
        self.run = RunState::Paused;
        true
    }

    /// Back to the start value of the current mode. Caller pauses first.
    pub(crate) fn reset(&mut self) {
        self.reading = match self.reading {
            Reading::Remaining(_) => Reading::Remaining(self.target_ms),
            Reading::Elapsed(_) => {
                self.accumulated_ms = 0;
                Reading::Elapsed(0)
            }
        };
        self.run = RunState::Stopped;
    }
}
